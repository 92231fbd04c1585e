use std::sync::Arc;
use std::time::Duration;

use crate::adapters::PlaceholderGenerator;
use crate::core::errors::{BackendError, ValidationError};
use crate::core::interfaces::adapters::TextRecognizer;
use crate::core::models::{
    meets_quality_bar, usable_char_count, ExtractionResult, ImageAsset, TextSource,
};

struct RecognitionStrategy {
    recognizer: Arc<dyn TextRecognizer>,
    timeout: Duration,
}

/// Tries each recognizer in order and falls back to a canned problem when
/// none of them produces usable text.
pub struct ExtractionOrchestrator {
    strategies: Vec<RecognitionStrategy>,
    placeholder: PlaceholderGenerator,
}

impl ExtractionOrchestrator {
    pub fn build(placeholder: PlaceholderGenerator) -> Self {
        Self {
            strategies: Vec::new(),
            placeholder,
        }
    }

    /// Appends a strategy; strategies are tried in the order they were added.
    pub fn with_strategy(mut self, recognizer: Arc<dyn TextRecognizer>, timeout: Duration) -> Self {
        log::debug!(
            "[EXTRACTION] Registered {} strategy with {:?} timeout",
            recognizer.source(),
            timeout
        );
        self.strategies.push(RecognitionStrategy {
            recognizer,
            timeout,
        });
        self
    }

    pub async fn extract(&self, image: &ImageAsset) -> Result<ExtractionResult, ValidationError> {
        let mime_type = image.validate()?;
        log::info!(
            "[EXTRACTION] Extracting text from '{}' ({}, {} bytes)",
            image.file_name(),
            mime_type,
            image.byte_len()
        );

        for strategy in &self.strategies {
            let source = strategy.recognizer.source();

            if !strategy.recognizer.is_available() {
                log::info!("[EXTRACTION] Skipping {} recognizer: not configured", source);
                continue;
            }

            match Self::attempt(strategy, image).await {
                Ok(text) => {
                    log::info!(
                        "[EXTRACTION] {} recognizer produced {} usable characters",
                        source,
                        usable_char_count(&text)
                    );
                    return Ok(ExtractionResult::new(text, source));
                }
                Err(error) => {
                    log::warn!("[EXTRACTION] {} recognizer failed: {}", source, error);
                }
            }
        }

        let text = self.placeholder.produce(image).await;
        Ok(ExtractionResult::new(text, TextSource::Placeholder))
    }

    pub async fn extract_text(&self, image: &ImageAsset) -> Result<String, ValidationError> {
        Ok(self.extract(image).await?.text)
    }

    async fn attempt(
        strategy: &RecognitionStrategy,
        image: &ImageAsset,
    ) -> Result<String, BackendError> {
        let text = tokio::time::timeout(strategy.timeout, strategy.recognizer.recognize(image))
            .await
            .map_err(|_| BackendError::TimedOut(strategy.timeout))??;

        if !meets_quality_bar(&text) {
            return Err(BackendError::InsufficientText {
                chars: usable_char_count(&text),
            });
        }

        Ok(text)
    }
}
