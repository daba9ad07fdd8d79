use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::error;

use super::HotelDirectory;
use crate::booking::domain::HotelId;

/// Read-only listing endpoints backed by a hotel directory.
pub fn hotel_router<H>(directory: Arc<H>) -> Router
where
    H: HotelDirectory + 'static,
{
    Router::new()
        .route("/api/hotels", get(list_handler::<H>))
        .route("/api/hotels/:hotel_id", get(hotel_handler::<H>))
        .with_state(directory)
}

pub(crate) async fn list_handler<H>(State(directory): State<Arc<H>>) -> Response
where
    H: HotelDirectory + 'static,
{
    match directory.list() {
        Ok(hotels) => (StatusCode::OK, axum::Json(hotels)).into_response(),
        Err(err) => {
            error!(error = %err, "failed to list hotels");
            let payload = json!({ "error": "Error fetching hotels" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn hotel_handler<H>(
    State(directory): State<Arc<H>>,
    Path(hotel_id): Path<u64>,
) -> Response
where
    H: HotelDirectory + 'static,
{
    match directory.fetch(HotelId(hotel_id)) {
        Ok(Some(hotel)) => (StatusCode::OK, axum::Json(hotel)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "Hotel not found", "hotel_id": hotel_id });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, hotel_id, "failed to fetch hotel");
            let payload = json!({ "error": "Error fetching hotel" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
