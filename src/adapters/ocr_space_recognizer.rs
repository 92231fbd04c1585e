use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;

use crate::core::errors::BackendError;
use crate::core::interfaces::adapters::TextRecognizer;
use crate::core::models::{ImageAsset, ImageMimeType, TextSource};
use crate::global_constants;

const OCR_EXIT_CODE_PARSED: i64 = 1;
const OCR_EXIT_CODE_PARTIALLY_PARSED: i64 = 2;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    #[serde(default)]
    parsed_results: Vec<ParsedResult>,
    #[serde(rename = "OCRExitCode", default)]
    ocr_exit_code: Option<i64>,
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: Option<String>,
}

/// Remote recognizer backed by the OCR.space HTTP API.
pub struct OcrSpaceRecognizer {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OcrSpaceRecognizer {
    pub fn new(api_key: Option<String>, endpoint: String) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        log::info!(
            "[OCR_SPACE] Creating OCR.space recognizer (credential configured: {})",
            api_key.is_some()
        );

        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
        }
    }

    fn encode_data_uri(image: &ImageAsset) -> String {
        let mime = ImageMimeType::from_mime(image.declared_mime())
            .map(|mime_type| mime_type.as_mime().to_string())
            .unwrap_or_else(|| image.declared_mime().to_string());
        let base64_image = base64::engine::general_purpose::STANDARD.encode(image.bytes());

        format!("data:{};base64,{}", mime, base64_image)
    }

    async fn upload_to_ocr_space(
        &self,
        api_key: &str,
        image: &ImageAsset,
    ) -> Result<String, BackendError> {
        log::info!("[OCR_SPACE] Uploading '{}' to OCR.space", image.file_name());

        let form = reqwest::multipart::Form::new()
            .text("base64Image", Self::encode_data_uri(image))
            .text("language", global_constants::OCR_SPACE_LANGUAGE)
            .text("isOverlayRequired", "false")
            .text("OCREngine", global_constants::OCR_SPACE_ENGINE)
            .text("scale", "true");

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        log::debug!("[OCR_SPACE] Response status {}: {}", status, response_text);

        if !status.is_success() {
            return Err(BackendError::HttpStatus {
                status: status.as_u16(),
                body: response_text,
            });
        }

        interpret_response(&response_text)
    }
}

/// Turns an OCR.space payload into the recognized text, or the reason there is none.
fn interpret_response(response_text: &str) -> Result<String, BackendError> {
    let payload: OcrSpaceResponse = serde_json::from_str(response_text)
        .map_err(|error| BackendError::MalformedPayload(error.to_string()))?;

    if payload.is_errored_on_processing {
        return Err(BackendError::Service(describe_error(payload.error_message.as_ref())));
    }

    if let Some(exit_code) = payload.ocr_exit_code {
        if exit_code != OCR_EXIT_CODE_PARSED && exit_code != OCR_EXIT_CODE_PARTIALLY_PARSED {
            return Err(BackendError::Service(format!(
                "OCR exit code {}: {}",
                exit_code,
                describe_error(payload.error_message.as_ref())
            )));
        }
    }

    let text = payload
        .parsed_results
        .iter()
        .filter_map(|result| result.parsed_text.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        return Err(BackendError::EmptyText);
    }

    Ok(text)
}

fn describe_error(error_message: Option<&serde_json::Value>) -> String {
    match error_message {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(serde_json::Value::Array(messages)) => messages
            .iter()
            .filter_map(|message| message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        _ => "unknown processing error".to_string(),
    }
}

#[async_trait]
impl TextRecognizer for OcrSpaceRecognizer {
    fn source(&self) -> TextSource {
        TextSource::Remote
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn recognize(&self, image: &ImageAsset) -> Result<String, BackendError> {
        let api_key = self.api_key.as_deref().ok_or(BackendError::MissingCredential)?;

        let text = self.upload_to_ocr_space(api_key, image).await?;

        log::info!(
            "[OCR_SPACE] Text extraction complete. Extracted {} characters",
            text.len()
        );
        Ok(text)
    }
}
