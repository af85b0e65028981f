//! Navigation module core types

use serde::Serialize;
use std::fmt;

/// What the user is asked for next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationStep {
    /// No section chosen yet
    #[default]
    AwaitingSection,
    /// Section chosen, no photo recognized yet
    AwaitingPhoto,
    /// Both known, showing directions
    ShowingResult,
}

impl NavigationStep {
    /// Get the name of the step
    pub fn name(&self) -> &'static str {
        match self {
            NavigationStep::AwaitingSection => "AwaitingSection",
            NavigationStep::AwaitingPhoto => "AwaitingPhoto",
            NavigationStep::ShowingResult => "ShowingResult",
        }
    }
}

impl fmt::Display for NavigationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the user has told us so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NavigationState {
    /// Current step
    pub step: NavigationStep,
    /// Selected section (0-indexed), None for the placeholder
    pub section: Option<usize>,
    /// Column recognized from the last photo (1-indexed)
    pub recognized_column: Option<u32>,
}

impl NavigationState {
    /// Initial state: nothing known
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a section is selected
    pub fn section_known(&self) -> bool {
        self.section.is_some()
    }

    /// Check if a photo has been recognized
    pub fn photo_known(&self) -> bool {
        self.recognized_column.is_some()
    }
}

/// Input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A section (or the placeholder) was chosen
    SectionSelected(Option<usize>),
    /// A photo was recognized as this column (1-indexed)
    PhotoRecognized(u32),
}

/// Which way to roll the scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Toward higher column numbers
    Forward,
    /// Toward lower column numbers
    Backward,
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollDirection::Forward => f.write_str("Advance"),
            ScrollDirection::Backward => f.write_str("Go backwards"),
        }
    }
}

/// Directions from the current column to the section start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Current column is the section start
    AlreadyThere,
    /// Roll `magnitude` columns in `direction`
    Move {
        direction: ScrollDirection,
        magnitude: u32,
        current_column: u32,
        target_column: u32,
    },
}

impl Outcome {
    /// Compare a section start column with the recognized column (both 1-indexed)
    pub fn compute(target_column: u32, current_column: u32) -> Self {
        let delta = i64::from(target_column) - i64::from(current_column);
        if delta == 0 {
            return Outcome::AlreadyThere;
        }

        let direction = if delta > 0 {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        };

        Outcome::Move {
            direction,
            // |a - b| of two u32 values always fits in u32
            magnitude: delta.unsigned_abs() as u32,
            current_column,
            target_column,
        }
    }
}

/// Data handed to the presenter for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderPayload {
    /// Ask for a section, telling the user where they are
    SelectSection { prompt_column: u32 },
    /// Ask for a photo
    TakePhoto,
    /// Show directions
    Result { outcome: Outcome },
}

/// One render request: a step and its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderStep {
    pub step: NavigationStep,
    pub payload: RenderPayload,
}

/// Result of applying an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the event
    pub state: NavigationState,
    /// View to render, None when nothing on screen changes
    pub render: Option<RenderStep>,
}

impl Transition {
    /// Transition that renders nothing
    pub fn silent(state: NavigationState) -> Self {
        Self {
            state,
            render: None,
        }
    }
}
