mod anthropic_solution_generator;
mod canned_solution_generator;
mod feedback_store;
mod ocr_space_recognizer;
mod openai_solution_generator;
mod placeholder_generator;
mod tesseract_recognizer;

pub use anthropic_solution_generator::AnthropicSolutionGenerator;
pub use canned_solution_generator::CannedSolutionGenerator;
pub use feedback_store::FeedbackStore;
pub use ocr_space_recognizer::OcrSpaceRecognizer;
pub use openai_solution_generator::OpenAiSolutionGenerator;
pub use placeholder_generator::PlaceholderGenerator;
pub use tesseract_recognizer::TesseractRecognizer;
