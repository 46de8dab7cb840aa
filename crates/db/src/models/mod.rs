//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` DTOs for inbound writes
//! - Aggregate row types returned by reporting queries

pub mod amenity;
pub mod booking;
pub mod dashboard;
pub mod feedback;
pub mod sale;

use resort_core::error::CoreError;
use validator::Validate;

/// Run `validator` rules on an inbound DTO, mapping failures to
/// [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}
