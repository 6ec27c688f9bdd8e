use std::fmt::Write;

use crate::models::Submission;

use super::{column_values, COLUMNS};

/// Builds the CSV document, or `None` when there is nothing to export.
pub fn to_csv(submissions: &[Submission]) -> Option<String> {
    if submissions.is_empty() {
        return None;
    }

    let mut csv = String::new();
    let _ = writeln!(csv, "{}", COLUMNS.join(","));

    for sub in submissions {
        let row: Vec<String> = column_values(sub).iter().map(|v| escape(v)).collect();
        let _ = writeln!(csv, "{}", row.join(","));
    }

    Some(csv)
}

fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
