use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::form::{FieldErrors, SubmissionForm};
use crate::notify::{self, Flash};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "form.html")]
#[allow(dead_code)]
pub(crate) struct FormTemplate {
    editing_id: String,
    form_action: String,
    form: SubmissionForm,
    errors: FieldErrors,
    flash_level: String,
    flash_message: String,
    dismiss_ms: u32,
}

impl FormTemplate {
    pub(crate) fn new(
        editing_id: Option<i64>,
        form: SubmissionForm,
        errors: FieldErrors,
        flash: Option<Flash>,
    ) -> Self {
        let form_action = match editing_id {
            Some(id) => format!("/submissions/{id}"),
            None => "/submissions".to_string(),
        };
        let (flash_level, flash_message) = match flash {
            Some(f) => (f.level.as_str().to_string(), f.message),
            None => (String::new(), String::new()),
        };
        Self {
            editing_id: editing_id.map(|id| id.to_string()).unwrap_or_default(),
            form_action,
            form,
            errors,
            flash_level,
            flash_message,
            dismiss_ms: notify::AUTO_DISMISS_MS,
        }
    }
}

/// The edit intent: an optional record identifier carried in the query
/// string. Present means "load and update"; absent means "create".
#[derive(Deserialize)]
pub struct EditParams {
    pub edit: Option<i64>,
}

pub async fn form_page(
    State(state): State<SharedState>,
    Query(params): Query<EditParams>,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, mut flash) = notify::take(jar);

    let (editing_id, form) = match params.edit {
        Some(id) => match state.api.fetch(id).await {
            Ok(record) => (Some(id), SubmissionForm::from_record(&record)),
            Err(err) => {
                tracing::warn!("Failed to load submission {id} for edit: {err}");
                flash = Some(Flash::error("Failed to load submission"));
                (None, SubmissionForm::empty())
            }
        },
        None => (None, SubmissionForm::empty()),
    };

    let template = FormTemplate::new(editing_id, form, FieldErrors::default(), flash);
    (jar, Html(template.render().unwrap_or_default()))
}
