//! User-facing text for each rendered step.

use super::types::{Outcome, RenderPayload, RenderStep};

/// Shown while a photo is being analyzed
pub const ANALYZING_MESSAGE: &str = "Analyzing the picture...";

/// Shown when a section is known but no photo has been taken
pub const TAKE_PHOTO_MESSAGE: &str =
    "Now take a picture of the open scroll so we know what you're looking at.";

/// Appended to results so the user re-checks after moving
const FOLLOW_UP: &str = "feel free to take another picture to see if you need to make any adjustments.";

/// "1 column", "3 columns"
pub fn columns(count: u32) -> String {
    if count == 1 {
        "1 column".to_string()
    } else {
        format!("{} columns", count)
    }
}

/// Text for an outcome
pub fn outcome_message(outcome: &Outcome) -> String {
    match outcome {
        Outcome::AlreadyThere => format!("You're already there!\nFeel {}", FOLLOW_UP),
        Outcome::Move {
            direction,
            magnitude,
            current_column,
            target_column,
        } => format!(
            "{} {}\nIt looks like you're on column {}, but you need to get to column {}.\nWhen you get there, {}",
            direction,
            columns(*magnitude),
            current_column,
            target_column,
            FOLLOW_UP
        ),
    }
}

/// Text for a render step
pub fn render_message(render: &RenderStep) -> String {
    match &render.payload {
        RenderPayload::SelectSection { prompt_column } => format!(
            "It looks like you're on column {}.\nSelect a section so we know where you need to scroll to.",
            prompt_column
        ),
        RenderPayload::TakePhoto => TAKE_PHOTO_MESSAGE.to_string(),
        RenderPayload::Result { outcome } => outcome_message(outcome),
    }
}
