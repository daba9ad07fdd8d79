use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Highest nightly rate a table may carry, in minor units (1 000 000.00).
pub const MAX_NIGHTLY_RATE: Money = Money::from_minor(100_000_000);

/// Amount in minor currency units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn from_major(units: u64) -> Self {
        Self(units * 100)
    }

    pub const fn minor_units(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = RateTableError;

    /// Accepts non-negative decimals with at most two fractional digits.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || RateTableError::InvalidAmount(raw.to_string());
        let amount = Decimal::from_str(raw.trim()).map_err(|_| invalid())?;

        if amount.is_sign_negative() || amount.scale() > 2 {
            return Err(invalid());
        }

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_u64())
            .map(Money)
            .ok_or_else(invalid)
    }
}

/// Normalized room category key (`deluxe`, `suite`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomType(String);

impl RoomType {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while building or loading a rate table.
#[derive(Debug, thiserror::Error)]
pub enum RateTableError {
    #[error("rate table has no entries")]
    Empty,
    #[error("room type key must not be blank")]
    BlankRoomType,
    #[error("room type '{0}' listed more than once")]
    DuplicateRoomType(RoomType),
    #[error("nightly rate for '{room_type}' must be between 0.01 and {max} (found {found})")]
    RateOutOfRange {
        room_type: RoomType,
        found: Money,
        max: Money,
    },
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("failed to read rate table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rate table CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Row in the rate table listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateEntry {
    pub room_type: RoomType,
    pub nightly_rate: Money,
}

/// Immutable room type to nightly rate lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<RoomType, Money>,
}

impl RateTable {
    pub fn new<I>(entries: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (RoomType, Money)>,
    {
        let mut rates = BTreeMap::new();

        for (room_type, rate) in entries {
            if room_type.as_str().is_empty() {
                return Err(RateTableError::BlankRoomType);
            }
            if rate == Money::ZERO || rate > MAX_NIGHTLY_RATE {
                return Err(RateTableError::RateOutOfRange {
                    room_type,
                    found: rate,
                    max: MAX_NIGHTLY_RATE,
                });
            }
            if rates.contains_key(&room_type) {
                return Err(RateTableError::DuplicateRoomType(room_type));
            }
            rates.insert(room_type, rate);
        }

        if rates.is_empty() {
            return Err(RateTableError::Empty);
        }

        Ok(Self { rates })
    }

    /// The rates advertised on the booking page.
    pub fn standard() -> Self {
        let rates = [
            ("deluxe", Money::from_major(200)),
            ("suite", Money::from_major(350)),
            ("executive", Money::from_major(500)),
        ]
        .into_iter()
        .map(|(key, rate)| (RoomType::new(key), rate))
        .collect();

        Self { rates }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RateTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a table from CSV with a `room_type,nightly_rate` header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for record in csv_reader.deserialize::<RateRow>() {
            let row = record?;
            entries.push((RoomType::new(&row.room_type), row.nightly_rate.parse()?));
        }

        Self::new(entries)
    }

    pub fn rate(&self, room_type: &RoomType) -> Option<Money> {
        self.rates.get(room_type).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn entries(&self) -> Vec<RateEntry> {
        self.rates
            .iter()
            .map(|(room_type, rate)| RateEntry {
                room_type: room_type.clone(),
                nightly_rate: *rate,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RateRow {
    room_type: String,
    nightly_rate: String,
}
