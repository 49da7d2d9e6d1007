use crate::draft::path::FieldPath;
use crate::ui::form_field::FormField;
use crate::ui::wizard::{FormEntry, StepForm};

pub fn form() -> StepForm {
    StepForm::new(vec![
        FormEntry::new(
            FieldPath::DocumentsSealReady,
            "Company seal (registered inkan) prepared?",
            FormField::toggle("Ready", "Not yet"),
        ),
        FormEntry::new(
            FieldPath::DocumentsArticlesReady,
            "Articles of incorporation drafted? (optional)",
            FormField::toggle("Ready", "Not yet"),
        ),
    ])
}
