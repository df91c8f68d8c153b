use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/timer", get(handlers::get_timer))
        .route("/api/visibility", post(handlers::set_visibility))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}
