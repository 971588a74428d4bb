use crate::db::room::RoomRepository;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// GET / — the full room collection as a JSON array, each object in the
/// persisted record shape.
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Response {
    let repo = RoomRepository::new(state.db_pool.clone());

    match repo.list_all().await {
        Ok(rooms) => Json(rooms).into_response(),
        Err(e) => {
            tracing::error!("Failed to load rooms: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading rooms").into_response()
        }
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
