use std::fmt;

use serde::{Deserialize, Serialize};

use crate::global_constants;

/// Which strategy produced an extracted problem statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSource {
    Local,
    Remote,
    Placeholder,
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSource::Local => write!(f, "local"),
            TextSource::Remote => write!(f, "remote"),
            TextSource::Placeholder => write!(f, "placeholder"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
    pub source: TextSource,
}

impl ExtractionResult {
    pub fn new(text: String, source: TextSource) -> Self {
        Self { text, source }
    }

    /// True when a real backend read the text, false for canned output.
    pub fn is_recognized(&self) -> bool {
        self.source != TextSource::Placeholder
    }
}

/// Number of characters left after trimming, counted as `char`s.
pub fn usable_char_count(text: &str) -> usize {
    text.trim().chars().count()
}

pub fn meets_quality_bar(text: &str) -> bool {
    usable_char_count(text) > global_constants::MIN_EXTRACTED_TEXT_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_bar_rejects_exactly_ten_characters() {
        assert!(!meets_quality_bar("0123456789"));
        assert!(!meets_quality_bar("   0123456789 \n"));
    }

    #[test]
    fn test_quality_bar_accepts_eleven_characters() {
        assert!(meets_quality_bar("0123456789a"));
    }

    #[test]
    fn test_usable_char_count_counts_unicode_scalars() {
        assert_eq!(usable_char_count("  n! = 5×4  "), 8);
    }

    #[test]
    fn test_placeholder_results_are_not_recognized() {
        let placeholder = ExtractionResult::new("text".to_string(), TextSource::Placeholder);
        let local = ExtractionResult::new("text".to_string(), TextSource::Local);

        assert!(!placeholder.is_recognized());
        assert!(local.is_recognized());
    }

    #[test]
    fn test_text_source_display() {
        assert_eq!(TextSource::Remote.to_string(), "remote");
    }
}
