use crate::draft::path::FieldPath;
use crate::ui::form_field::FormField;
use crate::ui::wizard::{FormEntry, StepForm};

pub fn form() -> StepForm {
    StepForm::new(vec![
        FormEntry::new(
            FieldPath::CompanyNameJa,
            "Company name (Japanese)",
            FormField::text("株式会社〇〇"),
        ),
        FormEntry::new(
            FieldPath::CompanyNameEn,
            "Company name (English, optional)",
            FormField::text("Example K.K."),
        ),
        FormEntry::new(
            FieldPath::CompanyAddress,
            "Head-office address",
            FormField::text("1-2-3 Marunouchi, Chiyoda-ku, Tokyo"),
        ),
        FormEntry::new(
            FieldPath::CompanyCapitalJpy,
            "Capital (JPY)",
            FormField::amount("1000000"),
        ),
    ])
}
