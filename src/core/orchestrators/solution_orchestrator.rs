use std::sync::Arc;

use crate::adapters::CannedSolutionGenerator;
use crate::core::errors::GenerationError;
use crate::core::interfaces::adapters::SolutionGenerator;
use crate::core::models::{DualSolution, GenerationStatus, Language, SolutionReport};
use crate::global_constants;
use crate::utils;

/// Produces Python and Java solutions with the first configured provider,
/// falling back to canned solutions.
pub struct SolutionOrchestrator {
    providers: Vec<Arc<dyn SolutionGenerator>>,
    fallback: CannedSolutionGenerator,
}

impl SolutionOrchestrator {
    pub fn build(providers: Vec<Arc<dyn SolutionGenerator>>) -> Self {
        Self {
            providers,
            fallback: CannedSolutionGenerator,
        }
    }

    pub async fn generate(&self, problem: &str) -> Result<SolutionReport, GenerationError> {
        if problem.trim().is_empty() {
            return Err(GenerationError::EmptyProblem);
        }

        log::info!(
            "[SOLUTIONS] Generating solutions for problem: {}",
            utils::preview(problem.trim(), 100)
        );

        let Some(provider) = self.providers.iter().find(|provider| provider.is_available()) else {
            log::info!("[SOLUTIONS] No provider configured, using canned solutions");
            let solutions = Self::generate_pair(&self.fallback, problem).await?;
            return Ok(SolutionReport {
                solutions,
                status: GenerationStatus::Success,
                message: global_constants::MESSAGE_DEMO_SOLUTIONS.to_string(),
            });
        };

        log::info!("[SOLUTIONS] Using {}", provider.name());
        match Self::generate_pair(provider.as_ref(), problem).await {
            Ok(solutions) => Ok(SolutionReport {
                solutions,
                status: GenerationStatus::Success,
                message: format!("Solutions generated successfully using {}", provider.name()),
            }),
            Err(error) => {
                log::error!("[SOLUTIONS] {} failed: {}", provider.name(), error);
                let solutions = Self::generate_pair(&self.fallback, problem).await?;
                Ok(SolutionReport {
                    solutions,
                    status: GenerationStatus::Error,
                    message: global_constants::MESSAGE_API_ERROR_SOLUTIONS.to_string(),
                })
            }
        }
    }

    async fn generate_pair(
        generator: &dyn SolutionGenerator,
        problem: &str,
    ) -> Result<DualSolution, GenerationError> {
        let (python, java) = futures::try_join!(
            generator.generate(problem, Language::Python),
            generator.generate(problem, Language::Java)
        )?;

        Ok(DualSolution { python, java })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::core::models::Solution;

    struct MockProvider {
        name: &'static str,
        available: bool,
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(name: &'static str, available: bool, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                available,
                fail,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SolutionGenerator for MockProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn generate(
            &self,
            _problem: &str,
            language: Language,
        ) -> Result<Solution, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GenerationError::EmptyCompletion("mock"));
            }
            Ok(Solution {
                code: format!("{} code from {}", language, self.name),
                explanation: "mock explanation".to_string(),
                language,
            })
        }
    }

    #[tokio::test]
    async fn test_blank_problem_is_rejected() {
        let orchestrator = SolutionOrchestrator::build(vec![]);

        assert!(matches!(
            orchestrator.generate("   ").await,
            Err(GenerationError::EmptyProblem)
        ));
    }

    #[tokio::test]
    async fn test_first_available_provider_generates_both_languages() {
        let unconfigured = MockProvider::new("first", false, false);
        let configured = MockProvider::new("second", true, false);
        let orchestrator = SolutionOrchestrator::build(vec![
            unconfigured.clone() as Arc<dyn SolutionGenerator>,
            configured.clone() as Arc<dyn SolutionGenerator>,
        ]);

        let report = orchestrator.generate("two sum").await.unwrap();

        assert_eq!(report.status, GenerationStatus::Success);
        assert_eq!(report.solutions.python.code, "python code from second");
        assert_eq!(report.solutions.java.code, "java code from second");
        assert!(report.message.contains("second"));
        assert_eq!(unconfigured.calls.load(Ordering::SeqCst), 0);
        assert_eq!(configured.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_provider_yields_demo_solutions() {
        let orchestrator = SolutionOrchestrator::build(vec![
            MockProvider::new("openai", false, false) as Arc<dyn SolutionGenerator>,
        ]);

        let report = orchestrator.generate("compute a factorial").await.unwrap();

        assert_eq!(report.status, GenerationStatus::Success);
        assert_eq!(report.message, global_constants::MESSAGE_DEMO_SOLUTIONS);
        assert!(report.solutions.python.code.contains("def factorial"));
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_with_error_status() {
        let failing = MockProvider::new("openai", true, true);
        let orchestrator =
            SolutionOrchestrator::build(vec![failing as Arc<dyn SolutionGenerator>]);

        let report = orchestrator.generate("reverse a string").await.unwrap();

        assert_eq!(report.status, GenerationStatus::Error);
        assert_eq!(report.message, global_constants::MESSAGE_API_ERROR_SOLUTIONS);
        assert!(report.solutions.java.code.contains("ProblemSolver"));
    }
}
