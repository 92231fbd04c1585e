mod extraction_orchestrator;
mod solution_orchestrator;

pub use extraction_orchestrator::ExtractionOrchestrator;
pub use solution_orchestrator::SolutionOrchestrator;
