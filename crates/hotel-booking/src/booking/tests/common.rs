use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::booking::domain::{Booking, BookingId, HotelId, PaymentMethod, StayRequest};
use crate::booking::pricing::PricingEngine;
use crate::booking::rates::RateTable;
use crate::booking::repository::{BookingRepository, NewBooking, RepositoryError};
use crate::booking::service::BookingService;
use crate::hotels::{DirectoryError, Hotel, HotelDirectory, HotelStatus};

pub(super) fn engine() -> PricingEngine {
    PricingEngine::new(RateTable::standard())
}

pub(super) fn stay_request() -> StayRequest {
    StayRequest {
        hotel_id: Some(1),
        check_in: Some("2024-06-01".to_string()),
        check_out: Some("2024-06-04".to_string()),
        guests: Some(2),
        room_type: Some("deluxe".to_string()),
        name: Some("Grace Hopper".to_string()),
        email: Some("grace@example.com".to_string()),
        phone: Some("555-0100".to_string()),
        special_requests: Some("Late check-in".to_string()),
        payment_method: PaymentMethod::CreditCard,
    }
}

pub(super) fn hotel(id: u64) -> Hotel {
    Hotel {
        id: HotelId(id),
        name: format!("Harbor View {id}"),
        location: "Lisbon".to_string(),
        image: None,
        rating: 4.5,
        status: HotelStatus::Open,
        description: "Riverside rooms".to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    next_id: Arc<AtomicU64>,
    records: Arc<Mutex<BTreeMap<BookingId, Booking>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl BookingRepository for MemoryRepository {
    fn insert(&self, booking: NewBooking) -> Result<BookingId, RepositoryError> {
        let id = BookingId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(id, booking.into_booking(id));
        Ok(id)
    }

    fn fetch(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl BookingRepository for UnavailableRepository {
    fn insert(&self, _booking: NewBooking) -> Result<BookingId, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct MemoryHotels(pub(super) Vec<Hotel>);

impl Default for MemoryHotels {
    fn default() -> Self {
        Self(vec![hotel(1), hotel(2)])
    }
}

impl HotelDirectory for MemoryHotels {
    fn list(&self) -> Result<Vec<Hotel>, DirectoryError> {
        Ok(self.0.clone())
    }

    fn fetch(&self, id: HotelId) -> Result<Option<Hotel>, DirectoryError> {
        Ok(self.0.iter().find(|hotel| hotel.id == id).cloned())
    }
}

pub(super) struct OfflineHotels;

impl HotelDirectory for OfflineHotels {
    fn list(&self) -> Result<Vec<Hotel>, DirectoryError> {
        Err(DirectoryError::Unavailable("catalog offline".to_string()))
    }

    fn fetch(&self, _id: HotelId) -> Result<Option<Hotel>, DirectoryError> {
        Err(DirectoryError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    BookingService<MemoryRepository, MemoryHotels>,
    MemoryRepository,
) {
    let repository = MemoryRepository::default();
    let service = BookingService::new(
        Arc::new(engine()),
        Arc::new(repository.clone()),
        Arc::new(MemoryHotels::default()),
    );
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
