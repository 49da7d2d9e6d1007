//! Draft state for the incorporation wizard: the fixed step list, the typed
//! form payload, and the snapshot shape persisted between sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five wizard steps, in filing order. The list is fixed at compile time;
/// an out-of-range step index is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Account,
    Company,
    Members,
    Documents,
    Review,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::Account,
            WizardStep::Company,
            WizardStep::Members,
            WizardStep::Documents,
            WizardStep::Review,
        ]
    }

    pub fn index(self) -> usize {
        Self::all().iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<WizardStep> {
        Self::all().get(index).copied()
    }

    /// Short identifier used in the snapshot and in log lines
    pub fn key(self) -> &'static str {
        match self {
            WizardStep::Account => "account",
            WizardStep::Company => "company",
            WizardStep::Members => "members",
            WizardStep::Documents => "documents",
            WizardStep::Review => "review",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Account => "Account",
            WizardStep::Company => "Company Info",
            WizardStep::Members => "Officers & Shareholders",
            WizardStep::Documents => "Required Documents",
            WizardStep::Review => "Review & Submit",
        }
    }

    /// Next step, clamped at the last one
    pub fn next(self) -> WizardStep {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// Previous step, clamped at the first one
    pub fn prev(self) -> WizardStep {
        match self.index() {
            0 => self,
            i => Self::from_index(i - 1).unwrap_or(self),
        }
    }

    pub fn is_last(self) -> bool {
        self.index() + 1 == Self::all().len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSection {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySection {
    /// Registered trade name in Japanese (required for the filing)
    #[serde(default)]
    pub name_ja: String,
    /// Optional romanized trade name
    #[serde(default)]
    pub name_en: String,
    /// Registered head-office address
    #[serde(default)]
    pub address: String,
    /// Stated capital in yen, entered as free text
    #[serde(default)]
    pub capital_jpy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembersSection {
    #[serde(default)]
    pub representative_name: String,
    #[serde(default)]
    pub representative_address: String,
    /// One shareholder per line
    #[serde(default)]
    pub shareholder_names: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsSection {
    /// The registered company seal has been prepared
    #[serde(default)]
    pub seal_ready: bool,
    /// Articles of incorporation are drafted (optional at this stage)
    #[serde(default)]
    pub articles_ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSection {
    #[serde(default)]
    pub agreed: bool,
    #[serde(default)]
    pub notes: String,
}

/// The full five-section form payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub account: AccountSection,
    #[serde(default)]
    pub company: CompanySection,
    #[serde(default)]
    pub members: MembersSection,
    #[serde(default)]
    pub documents: DocumentsSection,
    #[serde(default)]
    pub review: ReviewSection,
}

/// In-memory wizard state. Mutated exclusively through the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub draft_id: Uuid,
    pub step: WizardStep,
    pub saved_at: Option<DateTime<Utc>>,
    /// Data differs from the last confirmed save
    pub dirty: bool,
    /// A save is in flight
    pub saving: bool,
    pub error: Option<String>,
    pub data: FormData,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            step: WizardStep::Account,
            saved_at: None,
            dirty: false,
            saving: false,
            error: None,
            data: FormData::default(),
        }
    }
}

/// Section-level view of `FormData` as persisted. Sections missing from an
/// older snapshot deserialize as `None` and keep their defaults on hydrate;
/// a section that is present replaces the default wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotData {
    #[serde(default)]
    pub account: Option<AccountSection>,
    #[serde(default)]
    pub company: Option<CompanySection>,
    #[serde(default)]
    pub members: Option<MembersSection>,
    #[serde(default)]
    pub documents: Option<DocumentsSection>,
    #[serde(default)]
    pub review: Option<ReviewSection>,
}

impl SnapshotData {
    pub fn capture(data: &FormData) -> Self {
        Self {
            account: Some(data.account.clone()),
            company: Some(data.company.clone()),
            members: Some(data.members.clone()),
            documents: Some(data.documents.clone()),
            review: Some(data.review.clone()),
        }
    }

    /// Two-level merge: each section present in the snapshot replaces the
    /// base section entirely; absent sections keep the base values.
    pub fn merge_over(self, base: &FormData) -> FormData {
        FormData {
            account: self.account.unwrap_or_else(|| base.account.clone()),
            company: self.company.unwrap_or_else(|| base.company.clone()),
            members: self.members.unwrap_or_else(|| base.members.clone()),
            documents: self.documents.unwrap_or_else(|| base.documents.clone()),
            review: self.review.unwrap_or_else(|| base.review.clone()),
        }
    }
}

/// What goes to the draft store. Transient flags (`saving`, `error`) are
/// deliberately not persisted; they are reconstructed fresh on each load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub draft_id: Uuid,
    pub step: WizardStep,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: SnapshotData,
}

impl DraftSnapshot {
    pub fn capture(state: &WizardState) -> Self {
        Self {
            draft_id: state.draft_id,
            step: state.step,
            saved_at: state.saved_at,
            data: SnapshotData::capture(&state.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_order_is_fixed() {
        let steps = WizardStep::all();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], WizardStep::Account);
        assert_eq!(steps[4], WizardStep::Review);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(WizardStep::from_index(i), Some(*step));
        }
    }

    #[test]
    fn next_clamps_at_last_step() {
        assert_eq!(WizardStep::Review.next(), WizardStep::Review);
        assert_eq!(WizardStep::Documents.next(), WizardStep::Review);
    }

    #[test]
    fn prev_clamps_at_first_step() {
        assert_eq!(WizardStep::Account.prev(), WizardStep::Account);
        assert_eq!(WizardStep::Company.prev(), WizardStep::Account);
    }

    #[test]
    fn snapshot_round_trips_data() {
        let mut data = FormData::default();
        data.account.email = "ceo@example.co.jp".to_string();
        data.company.name_ja = "株式会社サンプル".to_string();
        data.documents.seal_ready = true;

        let restored = SnapshotData::capture(&data).merge_over(&FormData::default());
        assert_eq!(restored, data);
    }

    #[test]
    fn snapshot_missing_section_keeps_defaults() {
        let json = r#"{
            "draft_id": "6f2b0a1e-9f1d-4c70-a7ce-5a4b8f3d2e10",
            "step": "company",
            "data": { "account": { "email": "a@b.com", "password": "longenough1" } }
        }"#;
        let snapshot: DraftSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.step, WizardStep::Company);

        let merged = snapshot.data.merge_over(&FormData::default());
        assert_eq!(merged.account.email, "a@b.com");
        assert_eq!(merged.company, CompanySection::default());
        assert!(!merged.documents.seal_ready);
    }
}
