use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::global_constants;

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    #[serde(default)]
    pub ocr_space_api_key: Option<String>,
    #[serde(default = "default_ocr_space_endpoint")]
    pub ocr_space_endpoint: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default = "default_local_timeout_secs")]
    pub local_timeout_secs: u64,
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
    #[serde(default = "default_placeholder_delay_ms")]
    pub placeholder_delay_ms: u64,
}

fn default_ocr_space_endpoint() -> String {
    global_constants::OCR_SPACE_API_URL.to_string()
}

fn default_local_timeout_secs() -> u64 {
    global_constants::DEFAULT_LOCAL_TIMEOUT_SECS
}

fn default_remote_timeout_secs() -> u64 {
    global_constants::DEFAULT_REMOTE_TIMEOUT_SECS
}

fn default_placeholder_delay_ms() -> u64 {
    global_constants::DEFAULT_PLACEHOLDER_DELAY_MS
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            ocr_space_api_key: None,
            ocr_space_endpoint: default_ocr_space_endpoint(),
            openai_api_key: None,
            anthropic_api_key: None,
            local_timeout_secs: default_local_timeout_secs(),
            remote_timeout_secs: default_remote_timeout_secs(),
            placeholder_delay_ms: default_placeholder_delay_ms(),
        }
    }
}

impl std::fmt::Debug for UserSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSettings")
            .field("ocr_space_api_key", &self.ocr_space_api_key.is_some())
            .field("ocr_space_endpoint", &self.ocr_space_endpoint)
            .field("openai_api_key", &self.openai_api_key.is_some())
            .field("anthropic_api_key", &self.anthropic_api_key.is_some())
            .field("local_timeout_secs", &self.local_timeout_secs)
            .field("remote_timeout_secs", &self.remote_timeout_secs)
            .field("placeholder_delay_ms", &self.placeholder_delay_ms)
            .finish()
    }
}

impl UserSettings {
    /// Loads the settings file, writing defaults when none exists, then
    /// applies credential overrides from the process environment.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        let mut settings = Self::load_from_path(&settings_path)?;
        settings.apply_overrides(|name| std::env::var(name).ok());
        Ok(settings)
    }

    pub fn load_from_path(settings_path: &Path) -> Result<Self> {
        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            let default_settings = Self::default();
            default_settings.save_to_path(settings_path)?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("Failed to read settings from {:?}", settings_path))?;
        let settings: UserSettings =
            serde_json::from_str(&contents).context("Settings file is not valid JSON")?;

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] {:?}", settings);

        Ok(settings)
    }

    pub fn save_to_path(&self, settings_path: &Path) -> Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)?;

        log::info!("[SETTINGS] Saved settings to {:?}", settings_path);
        Ok(())
    }

    /// Overrides credentials with any non-blank value returned by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = [
            (global_constants::ENV_OCR_SPACE_API_KEY, &mut self.ocr_space_api_key),
            (global_constants::ENV_OPENAI_API_KEY, &mut self.openai_api_key),
            (global_constants::ENV_ANTHROPIC_API_KEY, &mut self.anthropic_api_key),
        ];

        for (variable, slot) in overrides {
            if let Some(value) = lookup(variable).filter(|value| !value.trim().is_empty()) {
                log::debug!("[SETTINGS] Using {} from environment", variable);
                *slot = Some(value);
            }
        }
    }

    /// The OCR.space credential, treating a blank string as unset.
    pub fn remote_credential(&self) -> Option<String> {
        non_blank(&self.ocr_space_api_key)
    }

    pub fn openai_credential(&self) -> Option<String> {
        non_blank(&self.openai_api_key)
    }

    pub fn anthropic_credential(&self) -> Option<String> {
        non_blank(&self.anthropic_api_key)
    }

    pub fn local_timeout(&self) -> Duration {
        Duration::from_secs(self.local_timeout_secs)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }

    pub fn placeholder_delay(&self) -> Duration {
        Duration::from_millis(self.placeholder_delay_ms)
    }

    fn get_settings_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();

        assert_eq!(settings.ocr_space_endpoint, global_constants::OCR_SPACE_API_URL);
        assert!(settings.ocr_space_api_key.is_none());
        assert_eq!(settings.local_timeout(), Duration::from_secs(8));
        assert_eq!(settings.remote_timeout(), Duration::from_secs(15));
        assert_eq!(settings.placeholder_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_user_settings_deserialization_with_missing_fields_uses_defaults() {
        let json = r#"{ "ocr_space_api_key": "abc" }"#;

        let settings: UserSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.remote_credential(), Some("abc".to_string()));
        assert_eq!(settings.local_timeout_secs, global_constants::DEFAULT_LOCAL_TIMEOUT_SECS);
        assert_eq!(settings.ocr_space_endpoint, global_constants::OCR_SPACE_API_URL);
    }

    #[test]
    fn test_blank_credential_counts_as_absent() {
        let settings = UserSettings {
            ocr_space_api_key: Some("   ".to_string()),
            ..UserSettings::default()
        };

        assert!(settings.remote_credential().is_none());
    }

    #[test]
    fn test_apply_overrides_replaces_only_non_blank_values() {
        let mut settings = UserSettings {
            openai_api_key: Some("from-file".to_string()),
            ..UserSettings::default()
        };

        settings.apply_overrides(|name| match name {
            global_constants::ENV_OCR_SPACE_API_KEY => Some("ocr-env".to_string()),
            global_constants::ENV_OPENAI_API_KEY => Some("".to_string()),
            _ => None,
        });

        assert_eq!(settings.remote_credential(), Some("ocr-env".to_string()));
        assert_eq!(settings.openai_credential(), Some("from-file".to_string()));
        assert!(settings.anthropic_credential().is_none());
    }

    #[test]
    fn test_debug_output_hides_credentials() {
        let settings = UserSettings {
            ocr_space_api_key: Some("super-secret".to_string()),
            ..UserSettings::default()
        };

        let rendered = format!("{:?}", settings);

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("ocr_space_api_key: true"));
    }

    #[test]
    fn test_load_from_missing_path_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let settings = UserSettings::load_from_path(&path).unwrap();

        assert!(path.exists());
        assert_eq!(settings, UserSettings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let original = UserSettings {
            ocr_space_api_key: Some("key".to_string()),
            remote_timeout_secs: 12,
            placeholder_delay_ms: 0,
            ..UserSettings::default()
        };

        original.save_to_path(&path).unwrap();
        let loaded = UserSettings::load_from_path(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_from_path_rejects_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(UserSettings::load_from_path(&path).is_err());
    }
}
