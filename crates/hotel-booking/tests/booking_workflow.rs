//! End-to-end booking scenarios through the public service facade and HTTP routers:
//! rate table loading, quoting, storing, and reading bookings back.

mod common {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use hotel_booking::booking::{
        Booking, BookingId, BookingRepository, BookingService, HotelId, NewBooking,
        PaymentMethod, PricingEngine, RateTable, RepositoryError, StayRequest,
    };
    use hotel_booking::hotels::{DirectoryError, Hotel, HotelCatalog, HotelDirectory};

    pub(super) const RATES_CSV: &str = "room_type,nightly_rate\n\
        deluxe,200.00\n\
        suite,350.00\n\
        executive,500.00\n\
        family,275.50\n";

    pub(super) const HOTELS_CSV: &str = "id,name,location,image,rating,status,description\n\
        1,Harbor View,Lisbon,,4.6,Open,Riverside rooms\n\
        2,Old Mill Inn,Porto,,3.9,Closed,Quiet countryside stay\n";

    #[derive(Default)]
    pub(super) struct SqlLikeStore {
        rows: Mutex<HashMap<BookingId, Booking>>,
        inserts: Mutex<u64>,
    }

    impl SqlLikeStore {
        pub(super) fn insert_count(&self) -> u64 {
            *self.inserts.lock().expect("store mutex poisoned")
        }
    }

    impl BookingRepository for SqlLikeStore {
        fn insert(&self, booking: NewBooking) -> Result<BookingId, RepositoryError> {
            let mut inserts = self.inserts.lock().expect("store mutex poisoned");
            *inserts += 1;
            let id = BookingId(1000 + *inserts);
            self.rows
                .lock()
                .expect("store mutex poisoned")
                .insert(id, booking.into_booking(id));
            Ok(id)
        }

        fn fetch(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .expect("store mutex poisoned")
                .get(&id)
                .cloned())
        }
    }

    pub(super) struct CatalogDirectory(Vec<Hotel>);

    impl HotelDirectory for CatalogDirectory {
        fn list(&self) -> Result<Vec<Hotel>, DirectoryError> {
            Ok(self.0.clone())
        }

        fn fetch(&self, id: HotelId) -> Result<Option<Hotel>, DirectoryError> {
            Ok(self.0.iter().find(|hotel| hotel.id == id).cloned())
        }
    }

    pub(super) fn service() -> (
        Arc<BookingService<SqlLikeStore, CatalogDirectory>>,
        Arc<SqlLikeStore>,
    ) {
        let rates = RateTable::from_reader(Cursor::new(RATES_CSV)).expect("rates load");
        let hotels = HotelCatalog::from_reader(Cursor::new(HOTELS_CSV)).expect("hotels load");
        let store = Arc::new(SqlLikeStore::default());
        let service = Arc::new(BookingService::new(
            Arc::new(PricingEngine::new(rates)),
            store.clone(),
            Arc::new(CatalogDirectory(hotels)),
        ));
        (service, store)
    }

    pub(super) fn request(room_type: &str, check_in: &str, check_out: &str) -> StayRequest {
        StayRequest {
            hotel_id: Some(1),
            check_in: Some(check_in.to_string()),
            check_out: Some(check_out.to_string()),
            guests: Some(3),
            room_type: Some(room_type.to_string()),
            name: Some("Katherine Johnson".to_string()),
            email: Some("kj@example.com".to_string()),
            phone: Some("555-0199".to_string()),
            special_requests: None,
            payment_method: PaymentMethod::PayPal,
        }
    }
}

use axum::http::{header, Request, StatusCode};
use common::*;
use hotel_booking::booking::{booking_router, BookingServiceError, Money, ValidationErrorKind};
use serde_json::{json, Value};
use std::thread;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 8192)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

#[test]
fn csv_rates_price_fractional_amounts_exactly() {
    let (service, store) = service();

    let quote = service
        .quote(&request("family", "2024-06-01", "2024-06-04"))
        .expect("family room is configured");

    assert_eq!(quote.nightly_rate, Money::from_minor(27_550));
    assert_eq!(quote.total_amount, Money::from_minor(82_650));
    assert_eq!(store.insert_count(), 0);
}

#[test]
fn booking_is_stored_once_and_read_back() {
    let (service, store) = service();

    let booking = service
        .create(request("suite", "2024-12-30", "2025-01-02"))
        .expect("booking stored");

    assert_eq!(store.insert_count(), 1);
    assert_eq!(booking.quote.nights, 3);
    assert_eq!(booking.quote.total_amount, Money::from_major(1050));

    let fetched = service.get(booking.id).expect("booking readable");
    assert_eq!(fetched, booking);
}

#[test]
fn rejected_requests_do_not_write() {
    let (service, store) = service();

    let same_day = service.create(request("deluxe", "2024-06-01", "2024-06-01"));
    let unknown_room = service.create(request("penthouse", "2024-06-01", "2024-06-04"));

    for result in [same_day, unknown_room] {
        assert!(matches!(result, Err(BookingServiceError::Validation(_))));
    }
    assert_eq!(store.insert_count(), 0);
}

#[test]
fn concurrent_quotes_agree() {
    let (service, _) = service();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            thread::spawn(move || {
                service
                    .quote(&request("executive", "2024-06-01", "2024-06-08"))
                    .expect("valid quote")
            })
        })
        .collect();

    for handle in handles {
        let quote = handle.join().expect("quote thread finished");
        assert_eq!(quote.nights, 7);
        assert_eq!(quote.total_amount, Money::from_major(3500));
    }
}

#[tokio::test]
async fn http_booking_flow_round_trips_through_the_router() {
    let (service, store) = service();
    let router = booking_router(service);

    let created = router
        .clone()
        .oneshot(
            Request::post("/api/booking")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    json!({
                        "hotelId": 1,
                        "checkIn": "2024-06-01",
                        "checkOut": "2024-06-04",
                        "guests": 2,
                        "roomType": "deluxe",
                        "name": "Katherine Johnson",
                        "email": "kj@example.com",
                        "phone": "555-0199",
                        "paymentMethod": "payAtHotel"
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert_eq!(created["booking"]["totalAmount"], json!(60_000));
    assert_eq!(created["booking"]["paymentMethod"], json!("payAtHotel"));
    let id = created["booking"]["id"].as_u64().expect("numeric id");

    let fetched = router
        .oneshot(
            Request::get(format!("/api/booking/{id}"))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched = body_json(fetched).await;
    assert_eq!(fetched["booking"], created["booking"]);
    assert_eq!(store.insert_count(), 1);
}

#[tokio::test]
async fn http_validation_errors_carry_machine_readable_kind() {
    let (service, _) = service();
    let router = booking_router(service);

    let response = router
        .oneshot(
            Request::post("/api/booking/quote")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    json!({
                        "hotelId": 1,
                        "checkIn": "2024-06-01",
                        "checkOut": "2024-06-04",
                        "guests": 0,
                        "roomType": "deluxe",
                        "name": "Katherine Johnson",
                        "email": "kj@example.com",
                        "phone": "555-0199"
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["kind"],
        json!(ValidationErrorKind::InvalidGuestCount.label())
    );
}
