use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::notify::{self, Flash};
use crate::state::SharedState;

#[allow(dead_code)]
struct SubmissionRow {
    id: i64,
    full_name: String,
    email: String,
    phone_number: String,
    age: String,
    preferred_contact: String,
    submitted: String,
    confirming: bool,
}

#[derive(Template)]
#[template(path = "submissions.html")]
#[allow(dead_code)]
struct SubmissionsTemplate {
    rows: Vec<SubmissionRow>,
    flash_level: String,
    flash_message: String,
    dismiss_ms: u32,
}

#[derive(Deserialize)]
pub struct ListParams {
    /// Arms the inline delete confirmation for one row.
    pub confirm: Option<i64>,
}

pub async fn list_page(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, mut flash) = notify::take(jar);

    // Any fetch failure leaves the list empty; there is no retry and no
    // partial display.
    let submissions = match state.api.list().await {
        Ok(subs) => subs,
        Err(err) => {
            tracing::warn!("Failed to load submissions: {err}");
            flash = Some(Flash::error("Failed to load submissions"));
            Vec::new()
        }
    };

    let rows: Vec<SubmissionRow> = submissions
        .iter()
        .map(|sub| SubmissionRow {
            id: sub.id,
            full_name: sub.full_name.clone(),
            email: sub.email.clone(),
            phone_number: sub.phone_number.clone(),
            age: sub.age.clone(),
            preferred_contact: sub.preferred_contact.to_string(),
            submitted: sub
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            confirming: params.confirm == Some(sub.id),
        })
        .collect();

    let (flash_level, flash_message) = match flash {
        Some(f) => (f.level.as_str().to_string(), f.message),
        None => (String::new(), String::new()),
    };

    let template = SubmissionsTemplate {
        rows,
        flash_level,
        flash_message,
        dismiss_ms: notify::AUTO_DISMISS_MS,
    };
    (jar, Html(template.render().unwrap_or_default()))
}
