//! Presenters
//!
//! Render navigation steps, the analyzing notice and retake prompts.

use serde::Serialize;
use std::io::Write;
use tracing::warn;

use super::types::RetakeReason;
use crate::navigation::{render_message, RenderPayload, RenderStep, ANALYZING_MESSAGE};
use crate::progress::OutputMode;

/// Renders what the session decides to show.
///
/// Calls are synchronous and complete before the session handles the
/// next event.
pub trait Presenter: Send {
    /// Render a navigation step
    fn render_step(&mut self, render: &RenderStep);

    /// Show that a photo is being analyzed
    fn render_analyzing(&mut self) {}

    /// Ask the user for another photo
    fn render_retake(&mut self, reason: &RetakeReason);
}

/// A rendered view, as returned by the HTTP API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Step { render: RenderStep, message: String },
    Analyzing { message: String },
    Retake { reason: RetakeReason, message: String },
}

impl View {
    /// User-facing text of the view
    pub fn message(&self) -> &str {
        match self {
            View::Step { message, .. } | View::Analyzing { message } | View::Retake { message, .. } => {
                message
            }
        }
    }
}

/// Presenter that keeps every view in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    views: Vec<View>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Views rendered so far
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Take the rendered views, leaving the presenter empty
    pub fn take(&mut self) -> Vec<View> {
        std::mem::take(&mut self.views)
    }
}

impl Presenter for RecordingPresenter {
    fn render_step(&mut self, render: &RenderStep) {
        self.views.push(View::Step {
            render: *render,
            message: render_message(render),
        });
    }

    fn render_analyzing(&mut self) {
        self.views.push(View::Analyzing {
            message: ANALYZING_MESSAGE.to_string(),
        });
    }

    fn render_retake(&mut self, reason: &RetakeReason) {
        self.views.push(View::Retake {
            reason: reason.clone(),
            message: reason.to_string(),
        });
    }
}

/// Presenter writing plain text to a terminal or any writer
pub struct TerminalPresenter<W: Write> {
    out: W,
    mode: OutputMode,
    photo_prompt: bool,
}

impl TerminalPresenter<std::io::Stdout> {
    /// Presenter writing to stdout
    pub fn stdout(mode: OutputMode) -> Self {
        Self::new(std::io::stdout(), mode)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self {
            out,
            mode,
            photo_prompt: true,
        }
    }

    /// Show the "take a picture" prompt outside verbose mode.
    ///
    /// Turned off when the photo is supplied up front.
    #[must_use]
    pub fn with_photo_prompt(mut self, show: bool) -> Self {
        self.photo_prompt = show;
        self
    }

    /// Consume the presenter, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}\n", text) {
            warn!(error = %e, "Failed to write view");
        }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn render_step(&mut self, render: &RenderStep) {
        let required = match render.payload {
            RenderPayload::TakePhoto if !self.photo_prompt => OutputMode::Verbose,
            _ => OutputMode::Normal,
        };
        if self.mode.should_show(required) {
            self.write_block(&render_message(render));
        }
    }

    fn render_analyzing(&mut self) {
        if self.mode.should_show(OutputMode::Verbose) {
            self.write_block(ANALYZING_MESSAGE);
        }
    }

    fn render_retake(&mut self, reason: &RetakeReason) {
        if self.mode.should_show(OutputMode::Normal) {
            self.write_block(&reason.to_string());
        }
    }
}
