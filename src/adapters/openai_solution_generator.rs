use async_trait::async_trait;
use serde_json::json;

use crate::core::errors::GenerationError;
use crate::core::interfaces::adapters::SolutionGenerator;
use crate::core::models::{Language, Solution};
use crate::global_constants;
use crate::utils;

const PROVIDER_NAME: &str = "OpenAI";

pub struct OpenAiSolutionGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OpenAiSolutionGenerator {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(api_key, global_constants::OPENAI_API_URL.to_string())
    }

    pub fn with_endpoint(api_key: Option<String>, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            endpoint,
        }
    }

    fn code_messages(problem: &str, language: Language) -> serde_json::Value {
        json!([
            {
                "role": "system",
                "content": format!(
                    "You are a coding expert. Generate clean, working {} code without any comments or explanations. Return only the code.",
                    language
                )
            },
            {
                "role": "user",
                "content": format!(
                    "Generate a clean {} solution for this coding problem. Return ONLY the working code without any comments, explanations, or markdown formatting:\n\n{}\n\nRequirements:\n- No comments in the code\n- No explanations\n- Clean, working code only\n- Proper syntax and structure",
                    language, problem
                )
            }
        ])
    }

    fn explanation_messages(code: &str, language: Language) -> serde_json::Value {
        json!([
            {
                "role": "user",
                "content": format!(
                    "Explain this {} code solution in a clear, step-by-step manner:\n\n{}",
                    language, code
                )
            }
        ])
    }

    async fn complete(
        &self,
        api_key: &str,
        messages: serde_json::Value,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let body = json!({
            "model": global_constants::OPENAI_MODEL,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
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
        Ok(extract_message_content(&json))
    }
}

fn extract_message_content(json: &serde_json::Value) -> String {
    json["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl SolutionGenerator for OpenAiSolutionGenerator {
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

        log::info!("[OPENAI] Generating {} solution", language);
        let raw_code = self
            .complete(api_key, Self::code_messages(problem, language), 1000, 0.1)
            .await?;
        let code = utils::strip_code_fences(&raw_code);
        if code.is_empty() {
            return Err(GenerationError::EmptyCompletion(PROVIDER_NAME));
        }

        let explanation = self
            .complete(api_key, Self::explanation_messages(&code, language), 500, 0.3)
            .await?;

        log::debug!("[OPENAI] {} code: {}", language, utils::preview(&code, 80));

        Ok(Solution {
            code,
            explanation: explanation.trim().to_string(),
            language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_follows_credential() {
        assert!(OpenAiSolutionGenerator::new(Some("sk-test".to_string())).is_available());
        assert!(!OpenAiSolutionGenerator::new(Some(" ".to_string())).is_available());
        assert!(!OpenAiSolutionGenerator::new(None).is_available());
    }

    #[tokio::test]
    async fn test_generate_without_credential_fails_fast() {
        let generator = OpenAiSolutionGenerator::new(None);

        let result = generator.generate("add two numbers", Language::Python).await;

        assert!(matches!(result, Err(GenerationError::MissingCredential("OpenAI"))));
    }

    #[test]
    fn test_code_messages_embed_problem_and_language() {
        let messages = OpenAiSolutionGenerator::code_messages("reverse a list", Language::Java);

        assert_eq!(messages[0]["role"], "system");
        assert!(messages[0]["content"].as_str().unwrap().contains("java code"));
        assert!(messages[1]["content"].as_str().unwrap().contains("reverse a list"));
    }

    #[test]
    fn test_extract_message_content_reads_first_choice() {
        let json = json!({ "choices": [{ "message": { "content": "print(1)" } }] });

        assert_eq!(extract_message_content(&json), "print(1)");
        assert_eq!(extract_message_content(&json!({ "choices": [] })), "");
    }
}
