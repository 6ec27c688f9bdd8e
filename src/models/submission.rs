use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record as returned by the upstream API.
///
/// `id` and `created_at` are server-assigned. A body without an `id` does
/// not deserialize and is treated as malformed by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(deserialize_with = "string_or_number")]
    pub age: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub preferred_contact: PreferredContact,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The outbound create/update payload: a submission minus the
/// server-assigned fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub age: String,
    pub address: String,
    pub preferred_contact: PreferredContact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PreferredContact {
    #[default]
    Email,
    Phone,
    Both,
}

impl PreferredContact {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredContact::Email => "Email",
            PreferredContact::Phone => "Phone",
            PreferredContact::Both => "Both",
        }
    }

    /// Parses a form value, falling back to the default for anything the
    /// select element should not have produced.
    pub fn parse(value: &str) -> Self {
        match value {
            "Phone" => PreferredContact::Phone,
            "Both" => PreferredContact::Both,
            _ => PreferredContact::Email,
        }
    }
}

impl std::fmt::Display for PreferredContact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// The upstream is loose about `age`: some deployments return it as a JSON
// number, others echo the submitted string. Accept both, normalize to String.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeValue {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match AgeValue::deserialize(deserializer)? {
        AgeValue::Text(s) => s,
        AgeValue::Number(n) => n.to_string(),
    })
}
