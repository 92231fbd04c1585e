mod extraction;
mod feedback;
mod image_asset;
mod image_format;
mod solution;
mod user_settings;

pub use extraction::{meets_quality_bar, usable_char_count, ExtractionResult, TextSource};
pub use feedback::{FeedbackDraft, FeedbackEntry};
pub use image_asset::ImageAsset;
pub use image_format::ImageMimeType;
pub use solution::{DualSolution, GenerationStatus, Language, Solution, SolutionReport};
pub use user_settings::UserSettings;
