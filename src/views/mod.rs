pub mod form;
pub mod submissions;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(form::form_page))
        .route("/submissions", get(submissions::list_page))
}
