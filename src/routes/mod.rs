pub mod submissions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn action_routes() -> Router<SharedState> {
    Router::new()
        .route("/submissions", post(submissions::create))
        .route("/submissions/{id}", post(submissions::update))
        .route("/submissions/{id}/delete", post(submissions::delete))
        .route("/submissions/export/csv", get(submissions::export_csv))
        .route("/submissions/export/pdf", get(submissions::export_pdf))
}
