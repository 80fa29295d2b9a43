use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/course/:code/attended", post(handlers::mark_attended))
        .route("/course/:code/missed", post(handlers::mark_missed))
        .route("/course/:code/undo", post(handlers::undo_last))
        .route("/api/courses", get(handlers::get_courses))
        .route("/api/record", post(handlers::record))
        .route("/api/undo", post(handlers::undo))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
