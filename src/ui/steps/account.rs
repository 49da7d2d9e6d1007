use crate::draft::path::FieldPath;
use crate::ui::form_field::FormField;
use crate::ui::wizard::{FormEntry, StepForm};

pub fn form() -> StepForm {
    StepForm::new(vec![
        FormEntry::new(
            FieldPath::AccountEmail,
            "Email",
            FormField::text("you@example.co.jp"),
        ),
        FormEntry::new(
            FieldPath::AccountPassword,
            "Password (8+ characters)",
            FormField::password("password"),
        ),
    ])
}
