//! Navigation State Machine
//!
//! Pure transitions: `(state, event) -> (state, optional render)`.

use super::types::{
    NavigationEvent, NavigationState, NavigationStep, Outcome, RenderPayload, RenderStep,
    Transition,
};
use crate::corpus::Section;

/// Three-state navigation flow
pub struct NavigationMachine;

impl NavigationMachine {
    /// Apply an event to a state
    pub fn transition(
        state: &NavigationState,
        event: NavigationEvent,
        sections: &[Section],
    ) -> Transition {
        match event {
            NavigationEvent::SectionSelected(selection) => {
                Self::on_section_selected(state, selection, sections)
            }
            NavigationEvent::PhotoRecognized(column) => {
                Self::on_photo_recognized(state, column, sections)
            }
        }
    }

    /// Step implied by what is known
    pub fn step_for(section_known: bool, photo_known: bool) -> NavigationStep {
        match (section_known, photo_known) {
            (false, _) => NavigationStep::AwaitingSection,
            (true, false) => NavigationStep::AwaitingPhoto,
            (true, true) => NavigationStep::ShowingResult,
        }
    }

    fn on_section_selected(
        state: &NavigationState,
        selection: Option<usize>,
        sections: &[Section],
    ) -> Transition {
        // Indices outside the corpus behave like the placeholder
        let selection = selection.filter(|&index| index < sections.len());
        let mut next = NavigationState {
            section: selection,
            ..*state
        };

        // The photo prompt is already on screen; record the choice only
        if state.step == NavigationStep::AwaitingPhoto && !state.photo_known() {
            return Transition::silent(next);
        }

        next.step = Self::step_for(next.section_known(), next.photo_known());
        if next == *state {
            return Transition::silent(next);
        }

        Transition {
            state: next,
            render: Self::render_for(&next, sections),
        }
    }

    fn on_photo_recognized(
        state: &NavigationState,
        column: u32,
        sections: &[Section],
    ) -> Transition {
        let mut next = NavigationState {
            recognized_column: Some(column),
            ..*state
        };
        next.step = Self::step_for(next.section_known(), true);

        Transition {
            state: next,
            render: Self::render_for(&next, sections),
        }
    }

    /// View for a state, None when there is nothing new to say
    fn render_for(state: &NavigationState, sections: &[Section]) -> Option<RenderStep> {
        let section = state.section.and_then(|index| sections.get(index));
        let payload = match (section, state.recognized_column) {
            (None, None) => return None,
            (None, Some(column)) => RenderPayload::SelectSection {
                prompt_column: column,
            },
            (Some(_), None) => RenderPayload::TakePhoto,
            (Some(section), Some(column)) => RenderPayload::Result {
                outcome: Outcome::compute(section.start_column, column),
            },
        };

        Some(RenderStep {
            step: state.step,
            payload,
        })
    }
}
