//! Hotel directory: the listing shown on the site and the existence check used
//! before a booking is stored.

pub mod catalog;
pub mod router;

pub use catalog::{CatalogError, HotelCatalog};
pub use router::hotel_router;

use serde::{Deserialize, Serialize};

use crate::booking::domain::HotelId;

/// Whether a hotel is currently taking guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HotelStatus {
    Open,
    Closed,
}

/// Directory entry for a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub rating: f32,
    pub status: HotelStatus,
    pub description: String,
}

/// Read access to the hotel table.
pub trait HotelDirectory: Send + Sync {
    fn list(&self) -> Result<Vec<Hotel>, DirectoryError>;
    fn fetch(&self, id: HotelId) -> Result<Option<Hotel>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("hotel directory unavailable: {0}")]
    Unavailable(String),
}
