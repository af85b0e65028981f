//! Progress reporting for the photo pipeline.
//!
//! Stages, verbosity levels and the callback trait used by compression,
//! recognition and matching.

use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::Duration;

/// Stages of locating a column from a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocateStage {
    /// Initializing
    #[default]
    Initializing,
    /// Shrinking the photo
    Compressing,
    /// Running OCR
    Recognizing,
    /// Scoring against the corpus
    Matching,
    /// Completed
    Completed,
}

impl LocateStage {
    /// Get the short name of the stage
    pub fn name(&self) -> &'static str {
        match self {
            LocateStage::Initializing => "Initializing",
            LocateStage::Compressing => "Compressing",
            LocateStage::Recognizing => "Recognizing",
            LocateStage::Matching => "Matching",
            LocateStage::Completed => "Completed",
        }
    }

    /// Get the user-facing description of the stage
    pub fn description(&self) -> &'static str {
        match self {
            LocateStage::Initializing => "Getting ready",
            LocateStage::Compressing => "Compressing the picture",
            LocateStage::Recognizing => "Analyzing the picture",
            LocateStage::Matching => "Finding the column",
            LocateStage::Completed => "Done",
        }
    }
}

impl fmt::Display for LocateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.description())
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// No output
    Quiet,
    /// Normal output (final view only)
    #[default]
    Normal,
    /// Verbose output (every view and stage)
    Verbose,
    /// Very verbose (debug messages too)
    VeryVerbose,
}

impl OutputMode {
    /// Create OutputMode from verbosity level
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => OutputMode::Normal,
            1 => OutputMode::Verbose,
            _ => OutputMode::VeryVerbose,
        }
    }

    /// Check if output should be shown at this mode
    pub fn should_show(&self, required: OutputMode) -> bool {
        use OutputMode::*;
        match (self, required) {
            (Quiet, _) => false,
            (Normal, Quiet | Normal) => true,
            (Verbose, Quiet | Normal | Verbose) => true,
            (VeryVerbose, _) => true,
            _ => false,
        }
    }
}

/// Progress callback for the photo pipeline
pub trait ProgressCallback: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: LocateStage);

    /// Called with the percent done of the current stage
    fn on_stage_progress(&self, percent: u8);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: LocateStage, message: &str);

    /// Called for debug messages
    fn on_debug(&self, message: &str);
}

/// Progress callback that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_stage_start(&self, _stage: LocateStage) {}
    fn on_stage_progress(&self, _percent: u8) {}
    fn on_stage_complete(&self, _stage: LocateStage, _message: &str) {}
    fn on_debug(&self, _message: &str) {}
}

/// Terminal spinner showing the current stage
pub struct SpinnerProgress {
    bar: ProgressBar,
    mode: OutputMode,
}

impl SpinnerProgress {
    /// Create a spinner; hidden in quiet mode
    pub fn new(mode: OutputMode) -> Self {
        let bar = if mode == OutputMode::Quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner} {msg} {prefix}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { bar, mode }
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for SpinnerProgress {
    fn on_stage_start(&self, stage: LocateStage) {
        self.bar.set_prefix("");
        self.bar.set_message(format!("{}...", stage.description()));
    }

    fn on_stage_progress(&self, percent: u8) {
        self.bar.set_prefix(format!("{:3}%", percent.min(100)));
    }

    fn on_stage_complete(&self, stage: LocateStage, message: &str) {
        if self.mode.should_show(OutputMode::Verbose) {
            self.bar.println(format!("  {}: {}", stage.name(), message));
        }
    }

    fn on_debug(&self, message: &str) {
        if self.mode.should_show(OutputMode::VeryVerbose) {
            self.bar.println(format!("    [DEBUG] {}", message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_stage_name() {
        assert_eq!(LocateStage::Initializing.name(), "Initializing");
        assert_eq!(LocateStage::Compressing.name(), "Compressing");
        assert_eq!(LocateStage::Recognizing.name(), "Recognizing");
        assert_eq!(LocateStage::Matching.name(), "Matching");
        assert_eq!(LocateStage::Completed.name(), "Completed");
    }

    #[test]
    fn test_locate_stage_display() {
        let display = format!("{}", LocateStage::Recognizing);
        assert_eq!(display, "Recognizing (Analyzing the picture)");
    }

    #[test]
    fn test_locate_stage_default() {
        let stage: LocateStage = Default::default();
        assert_eq!(stage, LocateStage::Initializing);
    }

    #[test]
    fn test_output_mode_from_verbosity() {
        assert_eq!(OutputMode::from_verbosity(0), OutputMode::Normal);
        assert_eq!(OutputMode::from_verbosity(1), OutputMode::Verbose);
        assert_eq!(OutputMode::from_verbosity(2), OutputMode::VeryVerbose);
        assert_eq!(OutputMode::from_verbosity(10), OutputMode::VeryVerbose);
    }

    #[test]
    fn test_output_mode_quiet() {
        let mode = OutputMode::Quiet;
        assert!(!mode.should_show(OutputMode::Quiet));
        assert!(!mode.should_show(OutputMode::Normal));
        assert!(!mode.should_show(OutputMode::Verbose));
    }

    #[test]
    fn test_output_mode_normal() {
        let mode = OutputMode::Normal;
        assert!(mode.should_show(OutputMode::Quiet));
        assert!(mode.should_show(OutputMode::Normal));
        assert!(!mode.should_show(OutputMode::Verbose));
        assert!(!mode.should_show(OutputMode::VeryVerbose));
    }

    #[test]
    fn test_output_mode_verbose() {
        let mode = OutputMode::Verbose;
        assert!(mode.should_show(OutputMode::Normal));
        assert!(mode.should_show(OutputMode::Verbose));
        assert!(!mode.should_show(OutputMode::VeryVerbose));
    }

    #[test]
    fn test_hidden_spinner_accepts_updates() {
        let spinner = SpinnerProgress::new(OutputMode::Quiet);
        spinner.on_stage_start(LocateStage::Compressing);
        spinner.on_stage_progress(150);
        spinner.on_stage_complete(LocateStage::Compressing, "done");
        spinner.on_debug("debug");
        spinner.finish();
    }

    #[test]
    fn test_noop_progress() {
        let progress = NoopProgress;
        progress.on_stage_start(LocateStage::Matching);
        progress.on_stage_progress(50);
    }
}
