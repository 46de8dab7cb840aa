//! Domain rules for the resort backend.
//!
//! This crate holds no database dependencies. Every rule here is evaluated
//! against data the caller has already loaded.

pub mod amenity;
pub mod availability;
pub mod booking;
pub mod error;
pub mod feedback;
pub mod images;
pub mod sales;
pub mod types;
