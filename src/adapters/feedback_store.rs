use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::core::models::{FeedbackDraft, FeedbackEntry};
use crate::global_constants;

/// Feedback history kept as a JSON array on disk.
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?
            .join(global_constants::APPLICATION_NAME);

        Ok(Self::at_path(data_dir.join(global_constants::FEEDBACK_FILE_NAME)))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn submit(&self, draft: FeedbackDraft) -> Result<FeedbackEntry> {
        let mut history = self.history()?;

        let entry = FeedbackEntry {
            id: Self::generate_id(),
            timestamp: Utc::now().to_rfc3339(),
            status: global_constants::FEEDBACK_STATUS_PENDING.to_string(),
            draft,
        };
        history.push(entry.clone());
        self.write(&history)?;

        log::info!("[FEEDBACK] Saved feedback {} to {:?}", entry.id, self.path);
        Ok(entry)
    }

    pub fn history(&self) -> Result<Vec<FeedbackEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read feedback from {:?}", self.path))?;
        serde_json::from_str(&contents).context("Feedback file is not valid JSON")
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {:?}", self.path))?;
            log::info!("[FEEDBACK] Cleared feedback history");
        }
        Ok(())
    }

    fn write(&self, history: &[FeedbackEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(history)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write feedback to {:?}", self.path))
    }

    fn generate_id() -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("feedback_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
    }
}
