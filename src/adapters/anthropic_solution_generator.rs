use async_trait::async_trait;
use serde_json::json;

use crate::core::errors::GenerationError;
use crate::core::interfaces::adapters::SolutionGenerator;
use crate::core::models::{Language, Solution};
use crate::global_constants;
use crate::utils;

const PROVIDER_NAME: &str = "Anthropic Claude";
const EXPLANATION_MARKER: &str = "EXPLANATION:";
const DEFAULT_EXPLANATION: &str = "Solution generated successfully.";

pub struct AnthropicSolutionGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl AnthropicSolutionGenerator {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(api_key, global_constants::ANTHROPIC_API_URL.to_string())
    }

    pub fn with_endpoint(api_key: Option<String>, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            endpoint,
        }
    }

    fn prompt(problem: &str, language: Language) -> String {
        format!(
            "Generate a clean {} solution for this coding problem. Return ONLY the working code without any comments, explanations, or markdown formatting:\n\n{}\n\nRequirements:\n- No comments in the code\n- No explanations\n- Clean, working code only\n- Proper syntax and structure\n\nThen on a new line starting with \"{}\", provide a brief explanation of how the solution works.",
            language, problem, EXPLANATION_MARKER
        )
    }
}

/// Splits a reply into fenced-free code and the explanation after the marker.
fn split_reply(content: &str) -> (String, String) {
    let (code_part, explanation_part) = match content.split_once(EXPLANATION_MARKER) {
        Some((code, explanation)) => (code, Some(explanation)),
        None => (content, None),
    };

    let explanation = explanation_part
        .map(str::trim)
        .filter(|explanation| !explanation.is_empty())
        .unwrap_or(DEFAULT_EXPLANATION)
        .to_string();

    (utils::strip_code_fences(code_part), explanation)
}

#[async_trait]
impl SolutionGenerator for AnthropicSolutionGenerator {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(
        &self,
        problem: &str,
        language: Language,
    ) -> Result<Solution, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential(PROVIDER_NAME))?;

        log::info!("[ANTHROPIC] Generating {} solution", language);

        let body = json!({
            "model": global_constants::ANTHROPIC_MODEL,
            "max_tokens": 1500,
            "messages": [{ "role": "user", "content": Self::prompt(problem, language) }],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", global_constants::ANTHROPIC_API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::HttpStatus {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let json: serde_json::Value = response.json().await?;
        let content = json["content"][0]["text"].as_str().unwrap_or_default();
        let (code, explanation) = split_reply(content);
        if code.is_empty() {
            return Err(GenerationError::EmptyCompletion(PROVIDER_NAME));
        }

        log::debug!("[ANTHROPIC] {} code: {}", language, utils::preview(&code, 80));

        Ok(Solution {
            code,
            explanation,
            language,
        })
    }
}
