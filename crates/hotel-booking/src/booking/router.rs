use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::{debug, error};

use super::domain::{BookingId, StayRequest};
use super::repository::{BookingRepository, RepositoryError};
use super::service::{BookingService, BookingServiceError};
use crate::hotels::HotelDirectory;

/// Router builder exposing quote, booking, and rate table endpoints.
pub fn booking_router<R, H>(service: Arc<BookingService<R, H>>) -> Router
where
    R: BookingRepository + 'static,
    H: HotelDirectory + 'static,
{
    Router::new()
        .route("/api/booking", post(create_handler::<R, H>))
        .route("/api/booking/quote", post(quote_handler::<R, H>))
        .route("/api/booking/rates", get(rates_handler::<R, H>))
        .route("/api/booking/:booking_id", get(booking_handler::<R, H>))
        .with_state(service)
}

pub(crate) async fn quote_handler<R, H>(
    State(service): State<Arc<BookingService<R, H>>>,
    payload: Result<axum::Json<StayRequest>, JsonRejection>,
) -> Response
where
    R: BookingRepository + 'static,
    H: HotelDirectory + 'static,
{
    let axum::Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.quote(&request) {
        Ok(quote) => {
            let payload = json!({ "success": true, "quote": quote });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R, H>(
    State(service): State<Arc<BookingService<R, H>>>,
    payload: Result<axum::Json<StayRequest>, JsonRejection>,
) -> Response
where
    R: BookingRepository + 'static,
    H: HotelDirectory + 'static,
{
    let axum::Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.create(request) {
        Ok(booking) => {
            let payload = json!({ "success": true, "booking": booking.view() });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn booking_handler<R, H>(
    State(service): State<Arc<BookingService<R, H>>>,
    Path(booking_id): Path<u64>,
) -> Response
where
    R: BookingRepository + 'static,
    H: HotelDirectory + 'static,
{
    match service.get(BookingId(booking_id)) {
        Ok(booking) => {
            let payload = json!({ "success": true, "booking": booking.view() });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn rates_handler<R, H>(
    State(service): State<Arc<BookingService<R, H>>>,
) -> Response
where
    R: BookingRepository + 'static,
    H: HotelDirectory + 'static,
{
    (StatusCode::OK, axum::Json(service.rates().entries())).into_response()
}

fn rejection_response(rejection: JsonRejection) -> Response {
    debug!(error = %rejection, "undecodable booking payload");
    let payload = json!({
        "success": false,
        "message": rejection.body_text(),
    });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn error_response(err: BookingServiceError) -> Response {
    match err {
        BookingServiceError::Validation(error) => {
            let payload = json!({
                "success": false,
                "kind": error.kind(),
                "message": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        BookingServiceError::UnknownHotel(hotel_id) => {
            let payload = json!({
                "success": false,
                "message": format!("hotel {hotel_id} not found"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        BookingServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "success": false,
                "message": "booking not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            error!(error = %other, "booking request failed");
            let payload = json!({
                "success": false,
                "message": "Internal Server Error",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
