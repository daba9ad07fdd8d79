use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{Booking, BookingId, HotelId, ValidatedStay};
use super::pricing::PriceQuote;
use super::rates::Money;

/// Row handed to the store; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub stay: ValidatedStay,
    pub quote: PriceQuote,
    pub created_at: DateTime<Utc>,
}

impl NewBooking {
    pub fn into_booking(self, id: BookingId) -> Booking {
        Booking {
            id,
            stay: self.stay,
            quote: self.quote,
            created_at: self.created_at,
        }
    }
}

/// Storage abstraction for the `bookings` table.
pub trait BookingRepository: Send + Sync {
    /// Insert one row and return the generated identifier.
    fn insert(&self, booking: NewBooking) -> Result<BookingId, RepositoryError>;
    fn fetch(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("booking not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Flat booking payload returned to the site, field names as the form posts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: BookingId,
    pub hotel_id: HotelId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u64,
    pub room_type: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub payment_method: &'static str,
    pub nights: u32,
    pub nightly_rate: Money,
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn view(&self) -> BookingView {
        let stay = &self.stay;
        BookingView {
            id: self.id,
            hotel_id: stay.hotel_id,
            check_in: stay.check_in,
            check_out: stay.check_out,
            guests: stay.guests,
            room_type: stay.room_type.to_string(),
            name: stay.contact.name.clone(),
            email: stay.contact.email.clone(),
            phone: stay.contact.phone.clone(),
            special_requests: stay.special_requests.clone(),
            payment_method: stay.payment_method.label(),
            nights: self.quote.nights,
            nightly_rate: self.quote.nightly_rate,
            total_amount: self.quote.total_amount,
            created_at: self.created_at,
        }
    }
}
