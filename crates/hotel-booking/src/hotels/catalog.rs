use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::{Hotel, HotelStatus};
use crate::booking::domain::HotelId;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read hotel catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hotel catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("hotel id {0} listed more than once")]
    DuplicateHotel(HotelId),
    #[error("hotel id must be a positive integer")]
    InvalidHotelId,
    #[error("rating for hotel {id} must be between 0 and 5 (found {rating})")]
    InvalidRating { id: HotelId, rating: f32 },
    #[error("status for hotel {id} must be Open or Closed (found '{status}')")]
    InvalidStatus { id: HotelId, status: String },
}

/// Loads hotel rows from a CSV export of the `hotel` table.
pub struct HotelCatalog;

impl HotelCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Hotel>, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Expects the header `id,name,location,image,rating,status,description`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Hotel>, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut seen = BTreeSet::new();
        let mut hotels = Vec::new();

        for record in csv_reader.deserialize::<HotelRow>() {
            let row = record?;
            if row.id == 0 {
                return Err(CatalogError::InvalidHotelId);
            }

            let id = HotelId(row.id);
            if !seen.insert(id) {
                return Err(CatalogError::DuplicateHotel(id));
            }
            if !(0.0..=5.0).contains(&row.rating) {
                return Err(CatalogError::InvalidRating {
                    id,
                    rating: row.rating,
                });
            }

            let status = parse_status(&row.status).ok_or_else(|| CatalogError::InvalidStatus {
                id,
                status: row.status.clone(),
            })?;

            hotels.push(Hotel {
                id,
                name: row.name,
                location: row.location,
                image: row.image,
                rating: row.rating,
                status,
                description: row.description.unwrap_or_default(),
            });
        }

        Ok(hotels)
    }
}

#[derive(Debug, Deserialize)]
struct HotelRow {
    id: u64,
    name: String,
    location: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    image: Option<String>,
    rating: f32,
    status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
}

fn parse_status(raw: &str) -> Option<HotelStatus> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "open" => Some(HotelStatus::Open),
        "closed" => Some(HotelStatus::Closed),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
