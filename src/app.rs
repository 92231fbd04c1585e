use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::{
    AnthropicSolutionGenerator, FeedbackStore, OcrSpaceRecognizer, OpenAiSolutionGenerator,
    PlaceholderGenerator, TesseractRecognizer,
};
use crate::cli_args::{Command, FeedbackAction};
use crate::core::interfaces::adapters::SolutionGenerator;
use crate::core::models::{FeedbackDraft, ImageAsset, ImageMimeType, SolutionReport, UserSettings};
use crate::core::orchestrators::{ExtractionOrchestrator, SolutionOrchestrator};

const UNKNOWN_MIME: &str = "application/octet-stream";

pub struct SolverApp {
    extraction: ExtractionOrchestrator,
    solutions: SolutionOrchestrator,
    feedback_path: Option<PathBuf>,
}

impl SolverApp {
    pub fn build(settings: &UserSettings) -> Self {
        log::info!("[APP] Initializing application");

        let extraction = ExtractionOrchestrator::build(PlaceholderGenerator::new(
            settings.placeholder_delay(),
        ))
        .with_strategy(Arc::new(TesseractRecognizer::build()), settings.local_timeout())
        .with_strategy(
            Arc::new(OcrSpaceRecognizer::new(
                settings.remote_credential(),
                settings.ocr_space_endpoint.clone(),
            )),
            settings.remote_timeout(),
        );

        let providers: Vec<Arc<dyn SolutionGenerator>> = vec![
            Arc::new(OpenAiSolutionGenerator::new(settings.openai_credential())),
            Arc::new(AnthropicSolutionGenerator::new(settings.anthropic_credential())),
        ];

        Self {
            extraction,
            solutions: SolutionOrchestrator::build(providers),
            feedback_path: None,
        }
    }

    #[cfg(test)]
    fn with_feedback_path(mut self, path: PathBuf) -> Self {
        self.feedback_path = Some(path);
        self
    }

    /// Opened on demand so commands that never touch feedback do not need a
    /// data directory.
    fn feedback_store(&self) -> Result<FeedbackStore> {
        match &self.feedback_path {
            Some(path) => Ok(FeedbackStore::at_path(path.clone())),
            None => FeedbackStore::open_default(),
        }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Extract { image, mime } => {
                let asset = load_image(&image, mime.as_deref()).await?;
                let result = self.extraction.extract(&asset).await?;
                if !result.is_recognized() {
                    log::warn!(
                        "[APP] No backend could read '{}', showing a sample problem",
                        asset.file_name()
                    );
                }
                eprintln!("[source: {}]", result.source);
                println!("{}", result.text);
            }
            Command::Solve { image, text, mime } => {
                let problem = match (image, text) {
                    (Some(image), _) => {
                        let asset = load_image(&image, mime.as_deref()).await?;
                        self.extraction.extract_text(&asset).await?
                    }
                    (None, Some(text)) => text,
                    (None, None) => anyhow::bail!("Provide an image or --text"),
                };

                let report = self.solutions.generate(&problem).await?;
                print_report(&problem, &report);
            }
            Command::Feedback { action } => self.handle_feedback(action)?,
        }
        Ok(())
    }

    fn handle_feedback(&self, action: FeedbackAction) -> Result<()> {
        let store = self.feedback_store()?;

        match action {
            FeedbackAction::Submit {
                issue,
                language,
                problem,
                code,
                description,
            } => {
                let entry = store.submit(FeedbackDraft {
                    issue_type: issue,
                    description,
                    original_problem: problem,
                    generated_code: code,
                    language: language.to_string(),
                })?;
                println!(
                    "Feedback saved locally as {} in {:?}",
                    entry.id,
                    store.path()
                );
            }
            FeedbackAction::List => {
                let history = store.history()?;
                println!("{}", serde_json::to_string_pretty(&history)?);
            }
            FeedbackAction::Clear => {
                store.clear()?;
                println!("Feedback history cleared");
            }
        }
        Ok(())
    }
}

/// Reads an image from disk, declaring its type from `mime_override`, the
/// file extension, or the leading bytes, in that order.
pub async fn load_image(path: &Path, mime_override: Option<&str>) -> Result<ImageAsset> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {:?}", path))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let declared_mime = declared_mime_for(path, mime_override, &bytes);

    Ok(ImageAsset::from_bytes(file_name, declared_mime, bytes))
}

fn declared_mime_for(path: &Path, mime_override: Option<&str>, bytes: &[u8]) -> String {
    if let Some(mime) = mime_override {
        return mime.to_string();
    }

    path.extension()
        .and_then(|extension| ImageMimeType::from_extension(&extension.to_string_lossy()))
        .or_else(|| ImageMimeType::sniff(bytes))
        .map(|mime_type| mime_type.as_mime().to_string())
        .unwrap_or_else(|| UNKNOWN_MIME.to_string())
}

fn print_report(problem: &str, report: &SolutionReport) {
    println!("Problem:\n{}\n", problem.trim());
    println!("Status: {:?} ({})\n", report.status, report.message);

    for solution in [&report.solutions.python, &report.solutions.java] {
        println!("=== {} ===", solution.language);
        println!("{}\n", solution.code);
        println!("Explanation: {}\n", solution.explanation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_declared_mime_prefers_override() {
        let mime = declared_mime_for(&PathBuf::from("a.png"), Some("image/gif"), &PNG_SIGNATURE);

        assert_eq!(mime, "image/gif");
    }

    #[test]
    fn test_declared_mime_uses_extension_then_magic_bytes() {
        assert_eq!(
            declared_mime_for(&PathBuf::from("Shot.JPG"), None, &PNG_SIGNATURE),
            "image/jpeg"
        );
        assert_eq!(
            declared_mime_for(&PathBuf::from("upload"), None, &PNG_SIGNATURE),
            "image/png"
        );
        assert_eq!(
            declared_mime_for(&PathBuf::from("notes.txt"), None, b"hello"),
            UNKNOWN_MIME
        );
    }

    #[tokio::test]
    async fn test_load_image_reads_bytes_and_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sort_test.png");
        std::fs::write(&path, PNG_SIGNATURE).unwrap();

        let asset = load_image(&path, None).await.unwrap();

        assert_eq!(asset.file_name(), "sort_test.png");
        assert_eq!(asset.declared_mime(), "image/png");
        assert_eq!(asset.byte_len(), PNG_SIGNATURE.len());
    }

    #[tokio::test]
    async fn test_load_image_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        assert!(load_image(&temp_dir.path().join("missing.png"), None).await.is_err());
    }

    #[tokio::test]
    async fn test_feedback_commands_use_configured_store() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("feedback.json");
        let app =
            SolverApp::build(&UserSettings::default()).with_feedback_path(store_path.clone());

        app.run(Command::Feedback {
            action: FeedbackAction::Submit {
                issue: "bug".to_string(),
                language: crate::core::models::Language::Python,
                problem: "sum".to_string(),
                code: "print(0)".to_string(),
                description: "wrong answer".to_string(),
            },
        })
        .await
        .unwrap();

        assert_eq!(FeedbackStore::at_path(store_path.clone()).history().unwrap().len(), 1);

        app.run(Command::Feedback {
            action: FeedbackAction::Clear,
        })
        .await
        .unwrap();

        assert!(!store_path.exists());
    }

    #[tokio::test]
    async fn test_extract_rejects_unsupported_file_before_recognition() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "plain text").unwrap();
        let app = SolverApp::build(&UserSettings::default());

        let result = app
            .run(Command::Extract {
                image: path,
                mime: None,
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_extract_runs_without_opening_feedback_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("factorial.png");
        image::RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();
        let settings = UserSettings {
            local_timeout_secs: 5,
            placeholder_delay_ms: 0,
            ..UserSettings::default()
        };
        let app = SolverApp::build(&settings);

        let result = app
            .run(Command::Extract {
                image: path,
                mime: None,
            })
            .await;

        assert!(result.is_ok());
        assert!(app.feedback_path.is_none());
    }
}
