//! Per-step validation. Pure functions over the form payload; rules are
//! checked in a fixed order and the first failure wins.

use crate::draft::state::{FormData, WizardStep};

pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_FORMAT: &str = "Enter a valid email address";
pub const MSG_PASSWORD_LENGTH: &str = "Password must be at least 8 characters";
pub const MSG_COMPANY_NAME_REQUIRED: &str = "Company name (Japanese) is required";
pub const MSG_ADDRESS_REQUIRED: &str = "Head-office address is required";
pub const MSG_REPRESENTATIVE_REQUIRED: &str = "Representative director name is required";
pub const MSG_SEAL_REQUIRED: &str = "Confirm the company seal is ready";
pub const MSG_AGREEMENT_REQUIRED: &str = "You must agree to the terms before submitting";

/// Validate one step; `None` means the step may advance
pub fn validate_step(step: WizardStep, data: &FormData) -> Option<&'static str> {
    match step {
        WizardStep::Account => validate_account(data),
        WizardStep::Company => validate_company(data),
        WizardStep::Members => validate_members(data),
        WizardStep::Documents => validate_documents(data),
        WizardStep::Review => validate_review(data),
    }
}

fn validate_account(data: &FormData) -> Option<&'static str> {
    let account = &data.account;
    if account.email.trim().is_empty() {
        return Some(MSG_EMAIL_REQUIRED);
    }
    if !email_format_ok(&account.email) {
        return Some(MSG_EMAIL_FORMAT);
    }
    if account.password.chars().count() < 8 {
        return Some(MSG_PASSWORD_LENGTH);
    }
    None
}

fn validate_company(data: &FormData) -> Option<&'static str> {
    if data.company.name_ja.trim().is_empty() {
        return Some(MSG_COMPANY_NAME_REQUIRED);
    }
    if data.company.address.trim().is_empty() {
        return Some(MSG_ADDRESS_REQUIRED);
    }
    None
}

fn validate_members(data: &FormData) -> Option<&'static str> {
    if data.members.representative_name.trim().is_empty() {
        return Some(MSG_REPRESENTATIVE_REQUIRED);
    }
    None
}

fn validate_documents(data: &FormData) -> Option<&'static str> {
    // articles_ready is not required to advance
    if !data.documents.seal_ready {
        return Some(MSG_SEAL_REQUIRED);
    }
    None
}

fn validate_review(data: &FormData) -> Option<&'static str> {
    if !data.review.agreed {
        return Some(MSG_AGREEMENT_REQUIRED);
    }
    None
}

/// Exactly one `@`, non-whitespace on both sides, and a `.` somewhere in the
/// domain part.
pub fn email_format_ok(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    let local_ok = !local.is_empty() && !local.chars().any(char::is_whitespace);
    let domain_ok =
        !domain.is_empty() && !domain.chars().any(char::is_whitespace) && domain.contains('.');
    local_ok && domain_ok
}
