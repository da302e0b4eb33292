use crate::config::{CHAT_PATH, CONTENT_IDEAS_PATH, DASHBOARD_DATA_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CHAT_PATH, post(handlers::chat))
        .route(CONTENT_IDEAS_PATH, post(handlers::content_ideas))
        .route(DASHBOARD_DATA_PATH, get(handlers::dashboard_data))
        .with_state(state)
}
