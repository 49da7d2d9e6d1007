//! Typed field paths into the form payload.
//!
//! The draft is addressed through a closed set of paths rather than dotted
//! key strings, so a write to a nonexistent field cannot be expressed and a
//! value of the wrong shape fails loudly instead of being dropped into the
//! payload silently.

use thiserror::Error;

use super::state::{FormData, WizardStep};

/// One variant per leaf field in [`FormData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    AccountEmail,
    AccountPassword,
    CompanyNameJa,
    CompanyNameEn,
    CompanyAddress,
    CompanyCapitalJpy,
    MembersRepresentativeName,
    MembersRepresentativeAddress,
    MembersShareholderNames,
    DocumentsSealReady,
    DocumentsArticlesReady,
    ReviewAgreed,
    ReviewNotes,
}

/// A value being written through a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("field '{path}' expects a {expected} value")]
    TypeMismatch {
        path: &'static str,
        expected: &'static str,
    },
}

impl FieldPath {
    pub fn all() -> &'static [FieldPath] {
        &[
            FieldPath::AccountEmail,
            FieldPath::AccountPassword,
            FieldPath::CompanyNameJa,
            FieldPath::CompanyNameEn,
            FieldPath::CompanyAddress,
            FieldPath::CompanyCapitalJpy,
            FieldPath::MembersRepresentativeName,
            FieldPath::MembersRepresentativeAddress,
            FieldPath::MembersShareholderNames,
            FieldPath::DocumentsSealReady,
            FieldPath::DocumentsArticlesReady,
            FieldPath::ReviewAgreed,
            FieldPath::ReviewNotes,
        ]
    }

    /// Dotted form used in the snapshot surface and in log lines
    pub fn as_str(self) -> &'static str {
        match self {
            FieldPath::AccountEmail => "account.email",
            FieldPath::AccountPassword => "account.password",
            FieldPath::CompanyNameJa => "company.name_ja",
            FieldPath::CompanyNameEn => "company.name_en",
            FieldPath::CompanyAddress => "company.address",
            FieldPath::CompanyCapitalJpy => "company.capital_jpy",
            FieldPath::MembersRepresentativeName => "members.representative_name",
            FieldPath::MembersRepresentativeAddress => "members.representative_address",
            FieldPath::MembersShareholderNames => "members.shareholder_names",
            FieldPath::DocumentsSealReady => "documents.seal_ready",
            FieldPath::DocumentsArticlesReady => "documents.articles_ready",
            FieldPath::ReviewAgreed => "review.agreed",
            FieldPath::ReviewNotes => "review.notes",
        }
    }

    pub fn parse(path: &str) -> Option<FieldPath> {
        Self::all().iter().copied().find(|p| p.as_str() == path)
    }

    /// The step whose form owns this field
    pub fn step(self) -> WizardStep {
        match self {
            FieldPath::AccountEmail | FieldPath::AccountPassword => WizardStep::Account,
            FieldPath::CompanyNameJa
            | FieldPath::CompanyNameEn
            | FieldPath::CompanyAddress
            | FieldPath::CompanyCapitalJpy => WizardStep::Company,
            FieldPath::MembersRepresentativeName
            | FieldPath::MembersRepresentativeAddress
            | FieldPath::MembersShareholderNames => WizardStep::Members,
            FieldPath::DocumentsSealReady | FieldPath::DocumentsArticlesReady => {
                WizardStep::Documents
            }
            FieldPath::ReviewAgreed | FieldPath::ReviewNotes => WizardStep::Review,
        }
    }

    /// Read the addressed leaf
    pub fn get(self, data: &FormData) -> FieldValue {
        match self {
            FieldPath::AccountEmail => FieldValue::Text(data.account.email.clone()),
            FieldPath::AccountPassword => FieldValue::Text(data.account.password.clone()),
            FieldPath::CompanyNameJa => FieldValue::Text(data.company.name_ja.clone()),
            FieldPath::CompanyNameEn => FieldValue::Text(data.company.name_en.clone()),
            FieldPath::CompanyAddress => FieldValue::Text(data.company.address.clone()),
            FieldPath::CompanyCapitalJpy => FieldValue::Text(data.company.capital_jpy.clone()),
            FieldPath::MembersRepresentativeName => {
                FieldValue::Text(data.members.representative_name.clone())
            }
            FieldPath::MembersRepresentativeAddress => {
                FieldValue::Text(data.members.representative_address.clone())
            }
            FieldPath::MembersShareholderNames => {
                FieldValue::Text(data.members.shareholder_names.clone())
            }
            FieldPath::DocumentsSealReady => FieldValue::Flag(data.documents.seal_ready),
            FieldPath::DocumentsArticlesReady => FieldValue::Flag(data.documents.articles_ready),
            FieldPath::ReviewAgreed => FieldValue::Flag(data.review.agreed),
            FieldPath::ReviewNotes => FieldValue::Text(data.review.notes.clone()),
        }
    }

    /// Returns a new payload with only the addressed leaf replaced; every
    /// other field keeps its prior value.
    pub fn set(self, data: &FormData, value: FieldValue) -> Result<FormData, PathError> {
        let mut next = data.clone();
        match self {
            FieldPath::AccountEmail => next.account.email = expect_text(self, value)?,
            FieldPath::AccountPassword => next.account.password = expect_text(self, value)?,
            FieldPath::CompanyNameJa => next.company.name_ja = expect_text(self, value)?,
            FieldPath::CompanyNameEn => next.company.name_en = expect_text(self, value)?,
            FieldPath::CompanyAddress => next.company.address = expect_text(self, value)?,
            FieldPath::CompanyCapitalJpy => next.company.capital_jpy = expect_text(self, value)?,
            FieldPath::MembersRepresentativeName => {
                next.members.representative_name = expect_text(self, value)?;
            }
            FieldPath::MembersRepresentativeAddress => {
                next.members.representative_address = expect_text(self, value)?;
            }
            FieldPath::MembersShareholderNames => {
                next.members.shareholder_names = expect_text(self, value)?;
            }
            FieldPath::DocumentsSealReady => {
                next.documents.seal_ready = expect_flag(self, value)?;
            }
            FieldPath::DocumentsArticlesReady => {
                next.documents.articles_ready = expect_flag(self, value)?;
            }
            FieldPath::ReviewAgreed => next.review.agreed = expect_flag(self, value)?,
            FieldPath::ReviewNotes => next.review.notes = expect_text(self, value)?,
        }
        Ok(next)
    }
}

fn expect_text(path: FieldPath, value: FieldValue) -> Result<String, PathError> {
    match value {
        FieldValue::Text(text) => Ok(text),
        FieldValue::Flag(_) => Err(PathError::TypeMismatch {
            path: path.as_str(),
            expected: "text",
        }),
    }
}

fn expect_flag(path: FieldPath, value: FieldValue) -> Result<bool, PathError> {
    match value {
        FieldValue::Flag(flag) => Ok(flag),
        FieldValue::Text(_) => Err(PathError::TypeMismatch {
            path: path.as_str(),
            expected: "yes/no",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_only_the_addressed_leaf() {
        let mut base = FormData::default();
        base.account.email = "old@example.com".to_string();
        base.company.name_ja = "株式会社テスト".to_string();
        base.documents.seal_ready = true;

        let updated = FieldPath::AccountEmail
            .set(&base, FieldValue::Text("new@example.com".to_string()))
            .unwrap();

        assert_eq!(updated.account.email, "new@example.com");
        // Sibling within the same section is untouched
        assert_eq!(updated.account.password, base.account.password);
        // Unrelated sections are untouched
        assert_eq!(updated.company, base.company);
        assert_eq!(updated.documents, base.documents);
        assert_eq!(updated.members, base.members);
        assert_eq!(updated.review, base.review);
    }

    #[test]
    fn set_is_idempotent() {
        let base = FormData::default();
        let value = FieldValue::Text("1-2-3 Marunouchi, Chiyoda-ku".to_string());

        let once = FieldPath::CompanyAddress.set(&base, value.clone()).unwrap();
        let twice = FieldPath::CompanyAddress.set(&once, value).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn wrong_value_shape_fails_loudly() {
        let base = FormData::default();
        let err = FieldPath::DocumentsSealReady
            .set(&base, FieldValue::Text("yes".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            PathError::TypeMismatch {
                path: "documents.seal_ready",
                expected: "yes/no",
            }
        );

        let err = FieldPath::AccountEmail
            .set(&base, FieldValue::Flag(true))
            .unwrap_err();
        assert!(matches!(err, PathError::TypeMismatch { .. }));
    }

    #[test]
    fn dotted_form_round_trips() {
        for path in FieldPath::all() {
            assert_eq!(FieldPath::parse(path.as_str()), Some(*path));
        }
        assert_eq!(FieldPath::parse("account.missing"), None);
    }

    #[test]
    fn every_field_belongs_to_a_step() {
        assert_eq!(FieldPath::AccountEmail.step(), WizardStep::Account);
        assert_eq!(FieldPath::ReviewAgreed.step(), WizardStep::Review);
        assert_eq!(
            FieldPath::MembersShareholderNames.step(),
            WizardStep::Members
        );
    }
}
