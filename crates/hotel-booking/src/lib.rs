//! Pricing, validation, and storage seams for the hotel booking site.

pub mod booking;
pub mod config;
pub mod error;
pub mod hotels;
pub mod telemetry;
