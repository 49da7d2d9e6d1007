pub mod dialogs;
pub mod form_field;
pub mod steps;
pub mod terminal_guard;
pub mod wizard;

pub use dialogs::{ConfirmDialog, ConfirmOutcome};
pub use wizard::{WizardEvent, WizardScreen};
