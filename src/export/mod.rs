pub mod csv;
pub mod pdf;

pub use csv::to_csv;
pub use pdf::to_pdf;

use crate::models::Submission;

/// The declared export schema, shared by both formats. Columns are fixed
/// rather than derived from record keys, so a heterogeneous upstream
/// response cannot reshape the output.
pub const COLUMNS: [&str; 8] = [
    "id",
    "full_name",
    "email",
    "phone_number",
    "age",
    "address",
    "preferred_contact",
    "created_at",
];

fn column_values(sub: &Submission) -> [String; 8] {
    [
        sub.id.to_string(),
        sub.full_name.clone(),
        sub.email.clone(),
        sub.phone_number.clone(),
        sub.age.clone(),
        sub.address.clone(),
        sub.preferred_contact.to_string(),
        sub.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
    ]
}
