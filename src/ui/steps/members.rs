use crate::draft::path::FieldPath;
use crate::ui::form_field::FormField;
use crate::ui::wizard::{FormEntry, StepForm};

pub fn form() -> StepForm {
    StepForm::new(vec![
        FormEntry::new(
            FieldPath::MembersRepresentativeName,
            "Representative director",
            FormField::text("山田太郎"),
        ),
        FormEntry::new(
            FieldPath::MembersRepresentativeAddress,
            "Representative's address",
            FormField::text("4-5-6 Shibuya, Shibuya-ku, Tokyo"),
        ),
        FormEntry::new(
            FieldPath::MembersShareholderNames,
            "Shareholders (one per line)",
            FormField::multiline("山田太郎\n山田花子"),
        ),
    ])
}
