use async_trait::async_trait;

use crate::core::errors::GenerationError;
use crate::core::models::{Language, Solution};

#[async_trait]
pub trait SolutionGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        problem: &str,
        language: Language,
    ) -> Result<Solution, GenerationError>;
}
