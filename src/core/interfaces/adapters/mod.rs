mod solution_generator;
mod text_recognizer;

pub use solution_generator::SolutionGenerator;
pub use text_recognizer::TextRecognizer;
