use chrono::NaiveDate;
use serde::Serialize;

use crate::booking::domain::{ContactDetails, HotelId, StayRequest, ValidatedStay};
use crate::booking::rates::{RateTable, RoomType};

/// Machine-readable category of a rejected stay request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationErrorKind {
    MissingField,
    InvalidDate,
    InvalidDateRange,
    UnknownRoomType,
    InvalidGuestCount,
}

impl ValidationErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            ValidationErrorKind::MissingField => "MissingField",
            ValidationErrorKind::InvalidDate => "InvalidDate",
            ValidationErrorKind::InvalidDateRange => "InvalidDateRange",
            ValidationErrorKind::UnknownRoomType => "UnknownRoomType",
            ValidationErrorKind::InvalidGuestCount => "InvalidGuestCount",
        }
    }
}

/// First rule a stay request violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },
    #[error("field '{field}' is not a YYYY-MM-DD date (found '{value}')")]
    InvalidDate { field: &'static str, value: String },
    #[error("check-out {check_out} must be after check-in {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    #[error("stay of {nights} nights exceeds the {max} night limit")]
    StayTooLong { nights: i64, max: u32 },
    #[error("unknown room type '{room_type}'")]
    UnknownRoomType { room_type: String },
    #[error("guest count must be at least 1 (found {guests})")]
    InvalidGuestCount { guests: i64 },
}

impl ValidationError {
    pub const fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::MissingField { .. } => ValidationErrorKind::MissingField,
            ValidationError::InvalidDate { .. } => ValidationErrorKind::InvalidDate,
            ValidationError::InvalidDateRange { .. } | ValidationError::StayTooLong { .. } => {
                ValidationErrorKind::InvalidDateRange
            }
            ValidationError::UnknownRoomType { .. } => ValidationErrorKind::UnknownRoomType,
            ValidationError::InvalidGuestCount { .. } => ValidationErrorKind::InvalidGuestCount,
        }
    }
}

/// Apply the rules in order and return the first violation.
pub(super) fn validate_request(
    request: &StayRequest,
    rates: &RateTable,
    max_nights: u32,
) -> Result<ValidatedStay, ValidationError> {
    let hotel_id = match request.hotel_id {
        Some(id) if id > 0 => HotelId(id as u64),
        _ => return Err(ValidationError::MissingField { field: "hotelId" }),
    };

    let contact = ContactDetails {
        name: required_text(request.name.as_deref(), "name")?,
        email: required_text(request.email.as_deref(), "email")?,
        phone: required_text(request.phone.as_deref(), "phone")?,
    };

    let check_in = required_date(request.check_in.as_deref(), "checkIn")?;
    let check_out = required_date(request.check_out.as_deref(), "checkOut")?;

    stay_nights(check_in, check_out, max_nights)?;

    let raw_room_type = required_text(request.room_type.as_deref(), "roomType")?;
    let room_type = RoomType::new(&raw_room_type);
    if rates.rate(&room_type).is_none() {
        return Err(ValidationError::UnknownRoomType {
            room_type: raw_room_type,
        });
    }

    let guests = match request.guests {
        None => return Err(ValidationError::MissingField { field: "guests" }),
        Some(count) if count < 1 => {
            return Err(ValidationError::InvalidGuestCount { guests: count })
        }
        Some(count) => count as u64,
    };

    let special_requests = request
        .special_requests
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(ValidatedStay {
        hotel_id,
        check_in,
        check_out,
        guests,
        room_type,
        contact,
        special_requests,
        payment_method: request.payment_method,
    })
}

/// Whole nights between two dates, bounded by `max_nights`.
pub(super) fn stay_nights(
    check_in: NaiveDate,
    check_out: NaiveDate,
    max_nights: u32,
) -> Result<u32, ValidationError> {
    let days = (check_out - check_in).num_days();
    if days < 1 {
        return Err(ValidationError::InvalidDateRange {
            check_in,
            check_out,
        });
    }
    if days > i64::from(max_nights) {
        return Err(ValidationError::StayTooLong {
            nights: days,
            max: max_nights,
        });
    }
    Ok(days as u32)
}

fn required_text(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::MissingField { field })
}

fn required_date(value: Option<&str>, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let raw = required_text(value, field)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate { field, value: raw })
}
