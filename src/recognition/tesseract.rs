//! Tesseract Recognizer
//!
//! Runs the `tesseract` CLI on a temporary copy of the image.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use super::types::{RecognitionError, RecognizedText, Recognizer, Result, TesseractOptions};

/// OCR adapter backed by the tesseract executable
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    program: PathBuf,
    options: TesseractOptions,
}

impl TesseractRecognizer {
    /// Locate the executable and check that the language data is installed
    pub async fn initialize(options: TesseractOptions) -> Result<Self> {
        let program = which::which(&options.command)
            .map_err(|_| RecognitionError::EngineNotFound(options.command.clone()))?;

        let output = Command::new(&program).arg("--list-langs").output().await?;
        // Older releases print the list on stderr
        let listing = format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        if !Self::language_available(&listing, &options.language) {
            return Err(RecognitionError::LanguageUnavailable(options.language.clone()));
        }

        info!(program = %program.display(), language = %options.language, "Tesseract ready");
        Ok(Self { program, options })
    }

    /// Options this recognizer runs with
    pub fn options(&self) -> &TesseractOptions {
        &self.options
    }

    /// Check a `--list-langs` listing for every language of `a+b`
    pub fn language_available(listing: &str, language: &str) -> bool {
        language
            .split('+')
            .filter(|lang| !lang.is_empty())
            .all(|lang| listing.lines().any(|line| line.trim() == lang))
    }

    /// Command line arguments for one image
    fn build_args(&self, image_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            image_path.as_os_str().to_os_string(),
            "stdout".into(),
            "-l".into(),
            self.options.language.clone().into(),
        ];
        if !self.options.whitelist.is_empty() {
            args.push("-c".into());
            args.push(format!("tessedit_char_whitelist={}", self.options.whitelist).into());
        }
        if self.options.preserve_interword_spaces {
            args.push("-c".into());
            args.push("preserve_interword_spaces=1".into());
        }
        args
    }
}

impl Recognizer for TesseractRecognizer {
    fn engine_path(&self) -> Option<&Path> {
        Some(&self.program)
    }

    async fn recognize(&self, image: Vec<u8>) -> Result<RecognizedText> {
        let file = tempfile::Builder::new()
            .prefix("scroll-locator-")
            .suffix(".jpg")
            .tempfile()?;
        tokio::fs::write(file.path(), &image).await?;

        let output = Command::new(&self.program)
            .args(self.build_args(file.path()))
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::OcrFailed(stderr.trim().to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.chars().count(), "Tesseract finished");
        Ok(RecognizedText::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer(options: TesseractOptions) -> TesseractRecognizer {
        TesseractRecognizer {
            program: PathBuf::from("/usr/bin/tesseract"),
            options,
        }
    }

    #[test]
    fn test_language_available() {
        let listing = "List of available languages in \"/usr/share/tessdata/\" (3):\neng\nheb\nosd\n";
        assert!(TesseractRecognizer::language_available(listing, "heb"));
        assert!(TesseractRecognizer::language_available(listing, "heb+eng"));
        assert!(!TesseractRecognizer::language_available(listing, "jpn"));
        assert!(!TesseractRecognizer::language_available(listing, "heb+jpn"));
        assert!(TesseractRecognizer::language_available(listing, "heb+"));
        assert!(TesseractRecognizer::language_available(listing, "+eng"));
    }

    #[test]
    fn test_build_args_default() {
        let rec = recognizer(TesseractOptions::default());
        let args = rec.build_args(Path::new("/tmp/page.jpg"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[0], "/tmp/page.jpg");
        assert_eq!(args[1], "stdout");
        assert_eq!(&args[2..4], ["-l", "heb"]);
        assert!(args.iter().any(|a| a.starts_with("tessedit_char_whitelist=א")));
        assert!(args.contains(&"preserve_interword_spaces=1".to_string()));
    }

    #[test]
    fn test_build_args_minimal() {
        let rec = recognizer(
            TesseractOptions::builder()
                .language("eng")
                .no_whitelist()
                .preserve_interword_spaces(false)
                .build(),
        );
        let args = rec.build_args(Path::new("page.png"));
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn test_engine_path_is_resolved_program() {
        let rec = recognizer(TesseractOptions::default());
        assert_eq!(rec.engine_path(), Some(Path::new("/usr/bin/tesseract")));
    }

    #[tokio::test]
    async fn test_initialize_missing_engine() {
        let options = TesseractOptions::builder()
            .command("definitely-not-an-ocr-engine")
            .build();
        let result = TesseractRecognizer::initialize(options).await;
        assert!(matches!(result, Err(RecognitionError::EngineNotFound(_))));
    }
}
