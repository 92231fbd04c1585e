pub const APPLICATION_NAME: &str = "snap-to-solve";

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const MIN_EXTRACTED_TEXT_CHARS: usize = 10;

pub const TESSERACT_PROGRAM: &str = "tesseract";
pub const TESSERACT_LANGUAGE: &str = "eng";
pub const TESSERACT_PAGE_SEGMENTATION_MODE: i32 = 6;
pub const TESSERACT_ENGINE_MODE: i32 = 3;
pub const TESSERACT_DPI: i32 = 150;
pub const TESSERACT_CHAR_WHITELIST: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    ".,;:!?'\"()[]{}<>+-*/=_%&|^~#@$`\\",
);
pub const TESSERACT_SCRATCH_PREFIX: &str = "snap_to_solve_ocr";

pub const OCR_SPACE_API_URL: &str = "https://api.ocr.space/parse/image";
pub const OCR_SPACE_LANGUAGE: &str = "eng";
pub const OCR_SPACE_ENGINE: &str = "2";

pub const DEFAULT_LOCAL_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_PLACEHOLDER_DELAY_MS: u64 = 1500;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENAI_MODEL: &str = "gpt-4";
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

pub const ENV_OCR_SPACE_API_KEY: &str = "OCR_SPACE_API_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const FEEDBACK_FILE_NAME: &str = "feedback.json";
pub const FEEDBACK_STATUS_PENDING: &str = "pending";

pub const MESSAGE_DEMO_SOLUTIONS: &str =
    "Demo solutions generated (connect API keys for real AI solutions)";
pub const MESSAGE_API_ERROR_SOLUTIONS: &str = "API error occurred, showing demo solutions";
