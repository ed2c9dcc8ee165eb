use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/log", get(handlers::get_log))
        .route("/api/days/:date", get(handlers::get_day).post(handlers::ensure_day))
        .route("/api/days/:date/toggle", post(handlers::toggle))
        .route("/api/days/:date/flow", post(handlers::set_flow))
        .route("/api/days/:date/cramps", post(handlers::set_cramps))
        .route("/api/days/:date/mood", post(handlers::set_mood))
        .route("/api/days/:date/clear", post(handlers::clear_day))
        .route("/api/export", get(handlers::export))
        .with_state(state)
}
