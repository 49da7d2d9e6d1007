//! Draft domain: state, typed field paths, the pure reducer, persistence.

pub mod autosave;
pub mod path;
pub mod reducer;
pub mod state;
pub mod store;

pub use autosave::{SaveCoordinator, SaveKind};
pub use path::{FieldPath, FieldValue, PathError};
pub use reducer::{reduce, Action};
pub use state::{DraftSnapshot, FormData, WizardState, WizardStep};
pub use store::{DraftStore, FileDraftStore, MemoryDraftStore, StoreError};
