use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use hotel_booking::booking::{booking_router, BookingRepository, BookingService};
use hotel_booking::hotels::{hotel_router, HotelDirectory};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_booking_routes<R, H>(
    service: Arc<BookingService<R, H>>,
    hotels: Arc<H>,
) -> axum::Router
where
    R: BookingRepository + 'static,
    H: HotelDirectory + 'static,
{
    booking_router(service)
        .merge(hotel_router(hotels))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{default_hotels, InMemoryBookingRepository, InMemoryHotelDirectory};
    use axum::http::Request;
    use hotel_booking::booking::{PricingEngine, RateTable};
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let hotels = Arc::new(InMemoryHotelDirectory::new(default_hotels()));
        let service = Arc::new(BookingService::new(
            Arc::new(PricingEngine::new(RateTable::standard())),
            Arc::new(InMemoryBookingRepository::default()),
            hotels.clone(),
        ));
        with_booking_routes(service, hotels)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn merged_router_serves_hotels_and_bookings() {
        let app = router();

        let hotels = app
            .clone()
            .oneshot(
                Request::get("/api/hotels")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(hotels.status(), StatusCode::OK);

        let booking = app
            .oneshot(
                Request::post("/api/booking")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        json!({
                            "hotel_id": 2,
                            "checkIn": "2024-06-01",
                            "checkOut": "2024-06-04",
                            "guests": 1,
                            "roomType": "executive",
                            "name": "Guest",
                            "email": "guest@example.com",
                            "phone": "555-0100"
                        })
                        .to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(booking.status(), StatusCode::CREATED);
        let bytes = axum::body::to_bytes(booking.into_body(), 4096)
            .await
            .expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(body["booking"]["totalAmount"], json!(150_000));
    }
}
