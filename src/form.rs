use serde::Deserialize;

use crate::models::{PreferredContact, Submission, SubmissionDraft};

/// The raw form payload as posted by the browser. Everything arrives as a
/// string; [`SubmissionForm::validate`] decides whether it may be sent
/// upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub preferred_contact: String,
}

/// Per-field empty flags produced by validation. A flagged field stays
/// marked until the user types into it again.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldErrors {
    pub full_name: bool,
    pub email: bool,
    pub phone_number: bool,
    pub age: bool,
    pub preferred_contact: bool,
}

impl FieldErrors {
    pub fn any(&self) -> bool {
        self.full_name || self.email || self.phone_number || self.age || self.preferred_contact
    }
}

impl SubmissionForm {
    pub fn empty() -> Self {
        Self {
            preferred_contact: PreferredContact::default().to_string(),
            ..Self::default()
        }
    }

    pub fn from_record(record: &Submission) -> Self {
        Self {
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            phone_number: record.phone_number.clone(),
            age: record.age.clone(),
            address: record.address.clone(),
            preferred_contact: record.preferred_contact.to_string(),
        }
    }

    /// Flags every required field that is empty after trimming. The address
    /// is the one optional field.
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            full_name: self.full_name.trim().is_empty(),
            email: self.email.trim().is_empty(),
            phone_number: self.phone_number.trim().is_empty(),
            age: self.age.trim().is_empty(),
            preferred_contact: self.preferred_contact.trim().is_empty(),
        }
    }

    /// Converts a validated form into the upstream payload.
    pub fn into_draft(self) -> SubmissionDraft {
        let preferred_contact = PreferredContact::parse(self.preferred_contact.trim());
        SubmissionDraft {
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            age: self.age,
            address: self.address,
            preferred_contact,
        }
    }
}
