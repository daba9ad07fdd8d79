use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{Booking, BookingId, HotelId, StayRequest};
use super::pricing::{PriceQuote, PricingEngine, ValidationError};
use super::rates::RateTable;
use super::repository::{BookingRepository, NewBooking, RepositoryError};
use crate::hotels::{DirectoryError, HotelDirectory};

/// Service composing the pricing engine, hotel directory, and booking store.
pub struct BookingService<R, H> {
    engine: Arc<PricingEngine>,
    repository: Arc<R>,
    hotels: Arc<H>,
}

impl<R, H> BookingService<R, H>
where
    R: BookingRepository + 'static,
    H: HotelDirectory + 'static,
{
    pub fn new(engine: Arc<PricingEngine>, repository: Arc<R>, hotels: Arc<H>) -> Self {
        Self {
            engine,
            repository,
            hotels,
        }
    }

    pub fn rates(&self) -> &RateTable {
        self.engine.rates()
    }

    /// Price a stay without storing anything.
    pub fn quote(&self, request: &StayRequest) -> Result<PriceQuote, BookingServiceError> {
        self.engine.quote(request).map_err(|err| {
            debug!(kind = err.kind().label(), error = %err, "quote rejected");
            BookingServiceError::from(err)
        })
    }

    /// Validate, price, and store a booking. Exactly one insert per accepted request.
    pub fn create(&self, request: StayRequest) -> Result<Booking, BookingServiceError> {
        let stay = self.engine.validate(&request).map_err(|err| {
            debug!(kind = err.kind().label(), error = %err, "booking rejected");
            BookingServiceError::from(err)
        })?;
        let quote = self.engine.price(&stay)?;

        if self.hotels.fetch(stay.hotel_id)?.is_none() {
            return Err(BookingServiceError::UnknownHotel(stay.hotel_id));
        }

        let new_booking = NewBooking {
            stay,
            quote,
            created_at: Utc::now(),
        };
        let id = self.repository.insert(new_booking.clone())?;
        let booking = new_booking.into_booking(id);

        info!(
            booking_id = %booking.id,
            hotel_id = %booking.stay.hotel_id,
            room_type = %booking.stay.room_type,
            nights = booking.quote.nights,
            total_amount = %booking.quote.total_amount,
            "booking stored"
        );

        Ok(booking)
    }

    pub fn get(&self, id: BookingId) -> Result<Booking, BookingServiceError> {
        let booking = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(booking)
    }
}

/// Error raised by the booking service.
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("hotel {0} does not exist")]
    UnknownHotel(HotelId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
