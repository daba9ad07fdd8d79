use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::pricing::PriceQuote;
use super::rates::RoomType;

/// Identifier of a hotel in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelId(pub u64);

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier generated by the booking store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the guest intends to pay. Recorded with the booking, never charged here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    #[serde(rename = "paypal")]
    PayPal,
    PayAtHotel,
}

impl PaymentMethod {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "creditCard",
            PaymentMethod::DebitCard => "debitCard",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::PayAtHotel => "payAtHotel",
        }
    }
}

/// Booking form submission as posted by the site.
///
/// Every field is optional on the wire so that a missing value surfaces as a
/// validation error with the field name instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRequest {
    #[serde(default, alias = "hotel_id", deserialize_with = "lenient_integer")]
    pub hotel_id: Option<i64>,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub guests: Option<i64>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Edited form inputs are posted as strings, so `"2"` and `2` are both accepted.
/// Blank or non-numeric text is treated as absent.
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FormValue {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<FormValue>::deserialize(deserializer)? {
        Some(FormValue::Number(value)) => Some(value),
        Some(FormValue::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// Guest contact details captured by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A stay request that passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedStay {
    pub hotel_id: HotelId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u64,
    pub room_type: RoomType,
    pub contact: ContactDetails,
    pub special_requests: Option<String>,
    pub payment_method: PaymentMethod,
}

/// Persisted booking: the validated stay, its quote, and the store-issued id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub stay: ValidatedStay,
    pub quote: PriceQuote,
    pub created_at: DateTime<Utc>,
}
