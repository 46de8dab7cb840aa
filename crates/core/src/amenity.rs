//! Amenity catalog rules: categories, operator switch encoding, input
//! validation, and image reference resolution.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Stored encoding of an enabled amenity.
pub const FLAG_YES: &str = "Yes";

/// Stored encoding of a disabled amenity.
pub const FLAG_NO: &str = "No";

/// Placeholder image reference meaning "no image uploaded".
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Public path under which uploaded amenity images are served.
pub const IMAGE_ROUTE_PREFIX: &str = "/uploads/am_images";

/// Largest per-guest price the `NUMERIC(10, 2)` price column holds.
pub const MAX_PRICE: f64 = 99_999_999.99;

/// Largest party size per unit. Keeps `MAX_PRICE * guests` inside the
/// `NUMERIC(12, 2)` booking total.
pub const MAX_CAPACITY: i32 = 100;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The fixed set of bookable facility kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityCategory {
    Kubo,
    Cabin,
    Table,
    Pool,
    Room,
}

/// Every category, in display order.
pub const ALL_CATEGORIES: &[AmenityCategory] = &[
    AmenityCategory::Kubo,
    AmenityCategory::Cabin,
    AmenityCategory::Table,
    AmenityCategory::Pool,
    AmenityCategory::Room,
];

impl AmenityCategory {
    /// Database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kubo => "kubo",
            Self::Cabin => "cabin",
            Self::Table => "table",
            Self::Pool => "pool",
            Self::Room => "room",
        }
    }

    /// Parse a category name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let needle = s.trim();
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: kubo, cabin, table, pool, room"
                ))
            })
    }

    /// Resolve an optional category, defaulting to `kubo` when absent or blank.
    pub fn parse_or_default(s: Option<&str>) -> Result<Self, CoreError> {
        match s.map(str::trim) {
            None | Some("") => Ok(Self::Kubo),
            Some(v) => Self::parse(v),
        }
    }
}

// ---------------------------------------------------------------------------
// Operator switch
// ---------------------------------------------------------------------------

/// Convert the operator's status field into the stored switch encoding.
///
/// Only `"available"` and `"true"` switch an amenity on.
pub fn operator_status_to_flag(status: Option<&str>) -> &'static str {
    match status.map(str::trim) {
        Some(s) if s.eq_ignore_ascii_case("available") || s.eq_ignore_ascii_case("true") => {
            FLAG_YES
        }
        _ => FLAG_NO,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the numeric and text fields of an amenity write.
pub fn validate_amenity_fields(
    name: &str,
    price: f64,
    capacity: i32,
    quantity: i32,
) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Amenity name must not be empty".into()));
    }
    if !price.is_finite() || !(0.0..=MAX_PRICE).contains(&price) {
        return Err(CoreError::Validation(format!(
            "Price must be between 0 and {MAX_PRICE}, got {price}"
        )));
    }
    if !(1..=MAX_CAPACITY).contains(&capacity) {
        return Err(CoreError::Validation(format!(
            "Capacity must be between 1 and {MAX_CAPACITY}, got {capacity}"
        )));
    }
    if quantity < 0 {
        return Err(CoreError::Validation(format!(
            "Quantity must not be negative, got {quantity}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Whether an image reference points at a file this service owns.
///
/// External URLs and the placeholder are never released.
pub fn is_managed_image(reference: &str) -> bool {
    let r = reference.trim();
    !r.is_empty() && r != DEFAULT_IMAGE && !r.starts_with("http")
}

/// Turn a stored image reference into a URL the client can load.
pub fn resolve_image_url(reference: Option<&str>, public_base_url: &str) -> Option<String> {
    let r = reference.map(str::trim).filter(|r| !r.is_empty())?;
    if r == DEFAULT_IMAGE {
        return None;
    }
    let base = public_base_url.trim_end_matches('/');
    let url = if r.starts_with("http") {
        r.to_string()
    } else if r.starts_with("/uploads") {
        format!("{base}{r}")
    } else {
        format!("{base}{IMAGE_ROUTE_PREFIX}/{r}")
    };
    Some(url)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
