use askama::Template;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;

use crate::export;
use crate::form::{FieldErrors, SubmissionForm};
use crate::notify::{self, Flash};
use crate::state::SharedState;
use crate::views::form::FormTemplate;

pub async fn create(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(input): Form<SubmissionForm>,
) -> Response {
    submit(state, jar, None, input).await
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(input): Form<SubmissionForm>,
) -> Response {
    submit(state, jar, Some(id), input).await
}

/// Shared create/update path: validate, then POST or PUT upstream. A
/// validation failure re-renders the form with every empty required field
/// flagged and issues no upstream request.
async fn submit(
    state: SharedState,
    jar: CookieJar,
    editing_id: Option<i64>,
    input: SubmissionForm,
) -> Response {
    let errors = input.validate();
    if errors.any() {
        let template = FormTemplate::new(
            editing_id,
            input,
            errors,
            Some(Flash::error("Please fill in all required fields")),
        );
        return Html(template.render().unwrap_or_default()).into_response();
    }

    let draft = input.clone().into_draft();
    let result = match editing_id {
        Some(id) => state.api.update(id, &draft).await,
        None => state.api.create(&draft).await,
    };

    match result {
        Ok(_) => {
            let message = if editing_id.is_some() {
                "Updated successfully!"
            } else {
                "Submitted successfully!"
            };
            let jar = notify::set(jar, &Flash::success(message));
            (jar, Redirect::to("/submissions")).into_response()
        }
        Err(err) => {
            tracing::error!("Submission failed: {err}");
            let template = FormTemplate::new(
                editing_id,
                input,
                FieldErrors::default(),
                Some(Flash::error("Submission failed. Please try again.")),
            );
            Html(template.render().unwrap_or_default()).into_response()
        }
    }
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> impl IntoResponse {
    match state.api.delete(id).await {
        Ok(()) => {
            let jar = notify::set(jar, &Flash::success("Submission deleted"));
            (jar, Redirect::to("/submissions"))
        }
        Err(err) => {
            tracing::warn!("Failed to delete submission {id}: {err}");
            let jar = notify::set(jar, &Flash::error("Error deleting submission"));
            (jar, Redirect::to("/submissions"))
        }
    }
}

pub async fn export_csv(State(state): State<SharedState>, jar: CookieJar) -> Response {
    let submissions = match state.api.list().await {
        Ok(subs) => subs,
        Err(err) => {
            tracing::warn!("Export fetch failed: {err}");
            let jar = notify::set(jar, &Flash::error("Failed to load submissions"));
            return (jar, Redirect::to("/submissions")).into_response();
        }
    };

    match export::to_csv(&submissions) {
        Some(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"submissions.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        // Nothing to export: back to the list, no download.
        None => Redirect::to("/submissions").into_response(),
    }
}

pub async fn export_pdf(State(state): State<SharedState>, jar: CookieJar) -> Response {
    let submissions = match state.api.list().await {
        Ok(subs) => subs,
        Err(err) => {
            tracing::warn!("Export fetch failed: {err}");
            let jar = notify::set(jar, &Flash::error("Failed to load submissions"));
            return (jar, Redirect::to("/submissions")).into_response();
        }
    };

    let empty = submissions.is_empty();
    match export::to_pdf(&submissions) {
        Some(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"submissions.pdf\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        None if empty => Redirect::to("/submissions").into_response(),
        None => {
            let jar = notify::set(jar, &Flash::error("Failed to export PDF"));
            (jar, Redirect::to("/submissions")).into_response()
        }
    }
}
