use crate::calendar::MonthCursor;
use crate::errors::AppError;
use crate::models::{CalendarQuery, CalendarResponse, TimerResponse, VisibilityRequest};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use chrono::Local;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.timer_snapshot().await;
    Html(render_index(&snapshot))
}

pub async fn get_timer(State(state): State<AppState>) -> Json<TimerResponse> {
    Json(state.timer_snapshot().await)
}

pub async fn set_visibility(
    State(state): State<AppState>,
    Json(payload): Json<VisibilityRequest>,
) -> Json<TimerResponse> {
    Json(state.set_visibility(payload.visible).await)
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let current = MonthCursor::containing(Local::now().date_naive());
    let year = query.year.unwrap_or(current.year);
    let month = query.month.unwrap_or(current.month);
    let cursor = MonthCursor::new(year, month)
        .ok_or_else(|| AppError::bad_request("month must be between 1 and 12"))?;

    Ok(Json(state.calendar(cursor).await))
}
