//! Navigation module
//!
//! Tracks what the user has told us (target section, current column) and
//! decides what to show next.
//!
//! # Example
//!
//! ```rust
//! use scroll_locator::navigation::{
//!     NavigationEvent, NavigationMachine, NavigationState, NavigationStep,
//! };
//! use scroll_locator::Section;
//!
//! let sections = vec![Section::new("בראשית", "Bereshit", 5)];
//! let state = NavigationState::new();
//!
//! let t = NavigationMachine::transition(&state, NavigationEvent::SectionSelected(Some(0)), &sections);
//! assert_eq!(t.state.step, NavigationStep::AwaitingPhoto);
//!
//! let t = NavigationMachine::transition(&t.state, NavigationEvent::PhotoRecognized(7), &sections);
//! assert_eq!(t.state.step, NavigationStep::ShowingResult);
//! ```

mod machine;
mod message;
mod types;

pub use machine::NavigationMachine;
pub use message::{
    columns, outcome_message, render_message, ANALYZING_MESSAGE, TAKE_PHOTO_MESSAGE,
};
pub use types::{
    NavigationEvent, NavigationState, NavigationStep, Outcome, RenderPayload, RenderStep,
    ScrollDirection, Transition,
};
