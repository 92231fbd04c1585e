use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use async_trait::async_trait;
use image::DynamicImage;
use rusty_tesseract::Args;
use tokio::process::Command;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::core::errors::BackendError;
use crate::core::interfaces::adapters::TextRecognizer;
use crate::core::models::{ImageAsset, TextSource};
use crate::global_constants;

#[derive(Debug, Clone)]
struct EngineInfo {
    version: String,
}

/// Local recognizer backed by the Tesseract engine. No network access.
///
/// Every engine invocation is a child process killed as soon as its future
/// is dropped, so a timed-out attempt leaves nothing running behind it.
pub struct TesseractRecognizer {
    engine_info: OnceCell<EngineInfo>,
    scratch_dir: PathBuf,
    program: PathBuf,
    leading_args: Vec<String>,
}

impl TesseractRecognizer {
    pub fn build() -> Self {
        log::info!("[TESSERACT_OCR] Creating Tesseract recognizer (engine starts lazily)");
        Self::with_scratch_dir(std::env::temp_dir())
    }

    pub fn with_scratch_dir(scratch_dir: PathBuf) -> Self {
        Self {
            engine_info: OnceCell::new(),
            scratch_dir,
            program: PathBuf::from(global_constants::TESSERACT_PROGRAM),
            leading_args: Vec::new(),
        }
    }

    #[cfg(test)]
    fn with_engine_command(mut self, program: &str, leading_args: &[&str]) -> Self {
        self.program = PathBuf::from(program);
        self.leading_args = leading_args.iter().map(|arg| arg.to_string()).collect();
        self
    }

    /// Checks the engine once. A failed check is not cached, so the next
    /// call tries again.
    async fn ensure_engine(&self) -> Result<&EngineInfo, BackendError> {
        self.engine_info
            .get_or_try_init(|| async {
                log::info!("[TESSERACT_OCR] Initializing engine");
                self.inspect_engine().await
            })
            .await
    }

    async fn inspect_engine(&self) -> Result<EngineInfo, BackendError> {
        let version_output = self
            .run_to_completion(&["--version".to_string()])
            .await
            .map_err(BackendError::Initialization)?;
        let version = combined_text(&version_output)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        let languages_output = self
            .run_to_completion(&["--list-langs".to_string()])
            .await
            .map_err(BackendError::Initialization)?;
        let has_language = combined_text(&languages_output)
            .lines()
            .any(|line| line.trim() == global_constants::TESSERACT_LANGUAGE);

        if !has_language {
            return Err(BackendError::Initialization(format!(
                "language data '{}' is not installed",
                global_constants::TESSERACT_LANGUAGE
            )));
        }

        Ok(EngineInfo { version })
    }

    fn engine_args() -> Args {
        let mut config_variables = std::collections::HashMap::new();
        config_variables.insert(
            "tessedit_char_whitelist".to_string(),
            global_constants::TESSERACT_CHAR_WHITELIST.to_string(),
        );

        Args {
            lang: global_constants::TESSERACT_LANGUAGE.to_string(),
            config_variables,
            dpi: Some(global_constants::TESSERACT_DPI),
            psm: Some(global_constants::TESSERACT_PAGE_SEGMENTATION_MODE),
            oem: Some(global_constants::TESSERACT_ENGINE_MODE),
        }
    }

    /// Command line for reading `image_path` and printing the text to stdout.
    fn recognition_command_args(args: &Args, image_path: &Path) -> Vec<String> {
        let mut command_args = vec![
            image_path.to_string_lossy().into_owned(),
            "stdout".to_string(),
            "-l".to_string(),
            args.lang.clone(),
        ];

        for (flag, value) in [("--dpi", args.dpi), ("--psm", args.psm), ("--oem", args.oem)] {
            if let Some(value) = value {
                command_args.push(flag.to_string());
                command_args.push(value.to_string());
            }
        }

        let mut config_variables: Vec<_> = args.config_variables.iter().collect();
        config_variables.sort();
        for (key, value) in config_variables {
            command_args.push("-c".to_string());
            command_args.push(format!("{}={}", key, value));
        }

        command_args
    }

    async fn run_engine(&self, scratch: &ScratchImage) -> Result<String, BackendError> {
        let command_args = Self::recognition_command_args(&Self::engine_args(), &scratch.path);
        let output = self
            .run_to_completion(&command_args)
            .await
            .map_err(BackendError::Engine)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs the engine with `args`. Dropping the returned future kills the
    /// child process.
    async fn run_to_completion(&self, args: &[String]) -> Result<Output, String> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|error| format!("failed to launch {:?}: {}", self.program, error))?;
        let output = child
            .wait_with_output()
            .await
            .map_err(|error| format!("failed waiting for {:?}: {}", self.program, error))?;

        if !output.status.success() {
            return Err(format!(
                "{:?} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(output)
    }

    fn convert_to_tesseract_compatible_format(
        image: &DynamicImage,
    ) -> Result<Vec<u8>, BackendError> {
        log::debug!("[TESSERACT_OCR] Converting image to compatible format");
        let mut buffer = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(|error| BackendError::InvalidImage(error.to_string()))?;
        Ok(buffer)
    }

    fn prepare_scratch_image(
        scratch_dir: &Path,
        bytes: &[u8],
    ) -> Result<ScratchImage, BackendError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|error| BackendError::InvalidImage(error.to_string()))?;

        log::debug!(
            "[TESSERACT_OCR] Image dimensions: {}x{}",
            decoded.width(),
            decoded.height()
        );

        let png_data = Self::convert_to_tesseract_compatible_format(&decoded)?;
        ScratchImage::write(scratch_dir, &png_data)
    }
}

// Older engine builds print --version and --list-langs on stderr.
fn combined_text(output: &Output) -> String {
    format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// PNG written for a single engine run; removed when dropped.
struct ScratchImage {
    path: PathBuf,
}

impl ScratchImage {
    fn write(scratch_dir: &Path, png_data: &[u8]) -> Result<Self, BackendError> {
        let path = scratch_dir.join(format!(
            "{}_{}.png",
            global_constants::TESSERACT_SCRATCH_PREFIX,
            Uuid::new_v4()
        ));

        std::fs::write(&path, png_data).map_err(|error| {
            BackendError::Engine(format!("failed to write scratch image: {}", error))
        })?;

        log::debug!("[TESSERACT_OCR] Wrote scratch image {:?}", path);
        Ok(Self { path })
    }
}

impl Drop for ScratchImage {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            log::warn!(
                "[TESSERACT_OCR] Failed to remove scratch image {:?}: {}",
                self.path,
                error
            );
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    fn source(&self) -> TextSource {
        TextSource::Local
    }

    async fn recognize(&self, image: &ImageAsset) -> Result<String, BackendError> {
        log::info!(
            "[TESSERACT_OCR] Starting text extraction for '{}'",
            image.file_name()
        );

        let scratch_dir = self.scratch_dir.clone();
        let bytes = image.bytes().to_vec();
        let scratch = tokio::task::spawn_blocking(move || {
            TesseractRecognizer::prepare_scratch_image(&scratch_dir, &bytes)
        })
        .await
        .map_err(|error| BackendError::Engine(error.to_string()))??;

        let engine_info = self.ensure_engine().await?;
        log::debug!("[TESSERACT_OCR] Using {}", engine_info.version);

        let extracted_text = self.run_engine(&scratch).await?;

        log::info!(
            "[TESSERACT_OCR] Text extraction complete. Extracted {} characters",
            extracted_text.len()
        );
        log::debug!("[TESSERACT_OCR] Extracted text: {}", extracted_text);

        Ok(extracted_text)
    }
}
