mod validation;

pub use validation::{ValidationError, ValidationErrorKind};

use serde::{Deserialize, Serialize};

use super::domain::{StayRequest, ValidatedStay};
use super::rates::{Money, RateTable};

/// Longest stay the engine will price.
pub const DEFAULT_MAX_NIGHTS: u32 = 3650;

/// Price breakdown for a single stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub nights: u32,
    pub nightly_rate: Money,
    pub total_amount: Money,
}

/// Stateless pricing over an immutable rate table.
///
/// `quote` is a pure function of the request and the table, so one engine can be
/// shared behind an `Arc` by any number of callers.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    rates: RateTable,
    max_nights: u32,
}

impl PricingEngine {
    pub fn new(rates: RateTable) -> Self {
        Self::with_max_nights(rates, DEFAULT_MAX_NIGHTS)
    }

    pub fn with_max_nights(rates: RateTable, max_nights: u32) -> Self {
        Self {
            rates,
            max_nights: max_nights.max(1),
        }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn max_nights(&self) -> u32 {
        self.max_nights
    }

    /// Validate a request and price it.
    pub fn quote(&self, request: &StayRequest) -> Result<PriceQuote, ValidationError> {
        let stay = self.validate(request)?;
        self.price(&stay)
    }

    pub fn validate(&self, request: &StayRequest) -> Result<ValidatedStay, ValidationError> {
        validation::validate_request(request, &self.rates, self.max_nights)
    }

    /// Price an already validated stay.
    ///
    /// The date range and room type are checked again so a hand-built
    /// `ValidatedStay` cannot yield a zero-night or zero-rate quote.
    pub fn price(&self, stay: &ValidatedStay) -> Result<PriceQuote, ValidationError> {
        let nights = validation::stay_nights(stay.check_in, stay.check_out, self.max_nights)?;
        let nightly_rate =
            self.rates
                .rate(&stay.room_type)
                .ok_or_else(|| ValidationError::UnknownRoomType {
                    room_type: stay.room_type.to_string(),
                })?;

        // bounded by MAX_NIGHTLY_RATE * max_nights, far below u64::MAX
        let total_amount = Money::from_minor(nightly_rate.minor_units() * u64::from(nights));

        Ok(PriceQuote {
            nights,
            nightly_rate,
            total_amount,
        })
    }
}
