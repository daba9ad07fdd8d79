use chrono::NaiveDate;
use hotel_booking::booking::{
    Booking, BookingId, BookingRepository, HotelId, NewBooking, RateTable, RepositoryError,
};
use hotel_booking::error::AppError;
use hotel_booking::hotels::{DirectoryError, Hotel, HotelCatalog, HotelDirectory, HotelStatus};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stand-in for the `bookings` table: one row per insert, ids from a sequence.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBookingRepository {
    sequence: Arc<AtomicU64>,
    records: Arc<Mutex<BTreeMap<BookingId, Booking>>>,
}

impl BookingRepository for InMemoryBookingRepository {
    fn insert(&self, booking: NewBooking) -> Result<BookingId, RepositoryError> {
        let id = BookingId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(id, booking.into_booking(id));
        Ok(id)
    }

    fn fetch(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

/// Hotel table loaded once at startup.
#[derive(Clone)]
pub(crate) struct InMemoryHotelDirectory {
    hotels: Arc<Vec<Hotel>>,
}

impl InMemoryHotelDirectory {
    pub(crate) fn new(hotels: Vec<Hotel>) -> Self {
        Self {
            hotels: Arc::new(hotels),
        }
    }
}

impl HotelDirectory for InMemoryHotelDirectory {
    fn list(&self) -> Result<Vec<Hotel>, DirectoryError> {
        Ok(self.hotels.as_ref().clone())
    }

    fn fetch(&self, id: HotelId) -> Result<Option<Hotel>, DirectoryError> {
        Ok(self.hotels.iter().find(|hotel| hotel.id == id).cloned())
    }
}

pub(crate) fn default_hotels() -> Vec<Hotel> {
    vec![
        Hotel {
            id: HotelId(1),
            name: "Grand Meridian".to_string(),
            location: "Lisbon, Portugal".to_string(),
            image: None,
            rating: 4.7,
            status: HotelStatus::Open,
            description: "Riverfront suites a short walk from the old town.".to_string(),
        },
        Hotel {
            id: HotelId(2),
            name: "Alpine Lodge".to_string(),
            location: "Zermatt, Switzerland".to_string(),
            image: None,
            rating: 4.5,
            status: HotelStatus::Open,
            description: "Ski-in lodge with deluxe and executive rooms.".to_string(),
        },
        Hotel {
            id: HotelId(3),
            name: "Harbor House".to_string(),
            location: "Halifax, Canada".to_string(),
            image: None,
            rating: 4.1,
            status: HotelStatus::Closed,
            description: "Closed for renovation.".to_string(),
        },
    ]
}

pub(crate) fn load_rate_table(path: Option<&Path>) -> Result<RateTable, AppError> {
    match path {
        Some(path) => {
            let table = RateTable::from_path(path)?;
            info!(path = %path.display(), room_types = table.len(), "loaded rate table");
            Ok(table)
        }
        None => Ok(RateTable::standard()),
    }
}

pub(crate) fn load_hotels(path: Option<&Path>) -> Result<Vec<Hotel>, AppError> {
    match path {
        Some(path) => {
            let hotels = HotelCatalog::from_path(path)?;
            info!(path = %path.display(), hotels = hotels.len(), "loaded hotel catalog");
            Ok(hotels)
        }
        None => Ok(default_hotels()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
