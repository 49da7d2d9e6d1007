//! Pure state transitions for the wizard draft.
//!
//! `reduce` never mutates its input; every action maps to exactly one new
//! state computed only from the passed-in state.

use chrono::{DateTime, Utc};

use super::path::{FieldPath, FieldValue};
use super::state::{DraftSnapshot, WizardState, WizardStep};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move to a step and clear any surfaced error
    Navigate(WizardStep),
    /// Write one field and mark the draft dirty
    Change(FieldPath, FieldValue),
    SetSaving(bool),
    SetDirty(bool),
    SetError(Option<String>),
    /// `None` means "now"; always clears `dirty`
    SetSavedAt(Option<DateTime<Utc>>),
    /// Merge a persisted snapshot over the current state
    Hydrate(DraftSnapshot),
}

pub fn reduce(state: &WizardState, action: Action) -> WizardState {
    let mut next = state.clone();
    match action {
        Action::Navigate(step) => {
            next.step = step;
            next.error = None;
        }
        Action::Change(path, value) => match path.set(&state.data, value) {
            Ok(data) => {
                next.data = data;
                next.dirty = true;
            }
            // The closed path set makes this unreachable from the UI, but
            // the reducer stays total rather than panicking.
            Err(err) => next.error = Some(err.to_string()),
        },
        Action::SetSaving(saving) => next.saving = saving,
        Action::SetDirty(dirty) => next.dirty = dirty,
        Action::SetError(error) => next.error = error,
        Action::SetSavedAt(at) => {
            next.saved_at = Some(at.unwrap_or_else(Utc::now));
            next.dirty = false;
        }
        Action::Hydrate(snapshot) => {
            next.draft_id = snapshot.draft_id;
            next.step = snapshot.step;
            next.saved_at = snapshot.saved_at;
            next.data = snapshot.data.merge_over(&state.data);
        }
    }
    next
}
