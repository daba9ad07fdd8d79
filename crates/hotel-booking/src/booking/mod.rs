//! Booking intake: rate table, pricing and validation engine, and the service
//! that stores accepted bookings.

pub mod domain;
pub mod pricing;
pub mod rates;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Booking, BookingId, ContactDetails, HotelId, PaymentMethod, StayRequest, ValidatedStay,
};
pub use pricing::{
    PriceQuote, PricingEngine, ValidationError, ValidationErrorKind, DEFAULT_MAX_NIGHTS,
};
pub use rates::{Money, RateEntry, RateTable, RateTableError, RoomType, MAX_NIGHTLY_RATE};
pub use repository::{BookingRepository, BookingView, NewBooking, RepositoryError};
pub use router::booking_router;
pub use service::{BookingService, BookingServiceError};
