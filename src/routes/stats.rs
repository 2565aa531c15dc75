use crate::dto::generate_dto::TrackEventRequest;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.stats_service.snapshot())
}

pub async fn track_visit(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.stats_service.clone();
    tokio::spawn(async move {
        stats.increment_daily("v", 1);
    });
    Json(json!({ "success": true }))
}

pub async fn track_event(
    State(state): State<AppState>,
    Json(payload): Json<TrackEventRequest>,
) -> impl IntoResponse {
    if !payload.event.is_empty() {
        let stats = state.stats_service.clone();
        tokio::spawn(async move {
            stats.record_event(&payload.event);
        });
    }
    Json(json!({ "success": true }))
}
