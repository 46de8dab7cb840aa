//! Amenity entity model, write DTOs, and the client-facing view.

use resort_core::amenity::{
    operator_status_to_flag, resolve_image_url, validate_amenity_fields, AmenityCategory,
    MAX_CAPACITY, MAX_PRICE,
};
use resort_core::availability::{evaluate, InventorySnapshot, RawEnabledFlag};
use resort_core::error::CoreError;
use resort_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::validate_input;

/// A row from the `amenities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Amenity {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub capacity: i32,
    /// Unit inventory. `NULL` on legacy rows, read as 0.
    pub quantity: Option<i32>,
    /// Raw operator switch in its stored encoding.
    pub available: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Amenity {
    pub fn inventory(&self) -> InventorySnapshot {
        InventorySnapshot {
            total_units: self.quantity.map(i64::from),
            enabled: RawEnabledFlag::Text(self.available.clone()),
        }
    }
}

/// An amenity row together with its active booking count for one day.
#[derive(Debug, Clone, FromRow)]
pub struct AmenityWithActivity {
    #[sqlx(flatten)]
    pub amenity: Amenity,
    pub booked_today: i64,
}

// ---------------------------------------------------------------------------
// Write DTOs
// ---------------------------------------------------------------------------

/// DTO for creating an amenity from the owner dashboard form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAmenity {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[serde(alias = "type")]
    pub category: Option<String>,
    #[validate(range(min = 0.0, max = MAX_PRICE))]
    pub price: f64,
    #[validate(range(min = 1, max = MAX_CAPACITY))]
    pub capacity: i32,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    /// Operator switch: `"available"` / `"true"` enable, anything else disables.
    pub status: Option<String>,
    pub image: Option<String>,
}

/// DTO for updating an amenity. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAmenity {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "type")]
    pub category: Option<String>,
    #[validate(range(min = 0.0, max = MAX_PRICE))]
    pub price: Option<f64>,
    #[validate(range(min = 1, max = MAX_CAPACITY))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub status: Option<String>,
    pub image: Option<String>,
}

/// A validated, normalized amenity insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAmenity {
    pub name: String,
    pub description: Option<String>,
    pub category: AmenityCategory,
    pub price: f64,
    pub capacity: i32,
    pub quantity: i32,
    pub available: &'static str,
    pub image: Option<String>,
}

/// A validated, normalized amenity patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmenityPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<AmenityCategory>,
    pub price: Option<f64>,
    pub capacity: Option<i32>,
    pub quantity: Option<i32>,
    pub available: Option<&'static str>,
    pub image: Option<String>,
}

impl CreateAmenity {
    pub fn into_new(self) -> Result<NewAmenity, CoreError> {
        validate_input(&self)?;
        let category = AmenityCategory::parse_or_default(self.category.as_deref())?;
        let quantity = self.quantity.unwrap_or(0);
        validate_amenity_fields(&self.name, self.price, self.capacity, quantity)?;

        Ok(NewAmenity {
            name: self.name.trim().to_string(),
            description: self.description,
            category,
            price: self.price,
            capacity: self.capacity,
            quantity,
            available: operator_status_to_flag(self.status.as_deref()),
            image: self.image.filter(|i| !i.trim().is_empty()),
        })
    }
}

impl UpdateAmenity {
    pub fn into_patch(self) -> Result<AmenityPatch, CoreError> {
        validate_input(&self)?;
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CoreError::Validation("Amenity name must not be empty".into()));
            }
        }
        if let Some(price) = self.price {
            if !price.is_finite() {
                return Err(CoreError::Validation("Price must be a finite number".into()));
            }
        }
        let category = match self.category.as_deref() {
            Some(c) => Some(AmenityCategory::parse(c)?),
            None => None,
        };

        Ok(AmenityPatch {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description,
            category,
            price: self.price,
            capacity: self.capacity,
            quantity: self.quantity,
            available: self
                .status
                .as_deref()
                .map(|s| operator_status_to_flag(Some(s))),
            image: self.image.filter(|i| !i.trim().is_empty()),
        })
    }
}

// ---------------------------------------------------------------------------
// Client view
// ---------------------------------------------------------------------------

/// The JSON shape shared by the customer listing and the owner dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AmenityView {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub price: f64,
    /// Total unit inventory after normalization.
    pub quantity: i64,
    /// Active bookings counted against today's inventory.
    pub booked: i64,
    pub remaining: i64,
    pub available: bool,
    pub image: Option<String>,
}

impl AmenityView {
    /// Run the availability verdict for a row and shape it for the client.
    pub fn build(row: &AmenityWithActivity, public_base_url: &str) -> Self {
        let a = &row.amenity;
        let inventory = a.inventory();
        let verdict = evaluate(&inventory, Some(row.booked_today));

        Self {
            id: a.id,
            name: a.name.clone(),
            category: a.category.clone(),
            description: a.description.clone(),
            capacity: a.capacity,
            price: a.price,
            quantity: resort_core::availability::normalize_units(inventory.total_units),
            booked: row.booked_today.max(0),
            remaining: verdict.remaining,
            available: verdict.available,
            image: resolve_image_url(a.image.as_deref(), public_base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn row(quantity: Option<i32>, available: &str, booked: i64) -> AmenityWithActivity {
        AmenityWithActivity {
            amenity: Amenity {
                id: 1,
                name: "Kubo A".into(),
                description: None,
                category: "kubo".into(),
                price: 500.0,
                capacity: 6,
                quantity,
                available: available.into(),
                image: Some("k.jpg".into()),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            booked_today: booked,
        }
    }

    fn create(quantity: Option<i32>) -> CreateAmenity {
        CreateAmenity {
            name: "Cabin 2".into(),
            description: Some("Air-conditioned".into()),
            category: Some("Cabin".into()),
            price: 1500.0,
            capacity: 4,
            quantity,
            status: Some("available".into()),
            image: None,
        }
    }

    #[test]
    fn view_applies_availability_verdict() {
        let v = AmenityView::build(&row(Some(3), "Yes", 2), "http://host");
        assert!(v.available);
        assert_eq!(v.remaining, 1);
        assert_eq!(v.booked, 2);
        assert_eq!(v.image.as_deref(), Some("http://host/uploads/am_images/k.jpg"));
    }

    #[test]
    fn view_treats_null_quantity_as_zero() {
        let v = AmenityView::build(&row(None, "Yes", 0), "http://host");
        assert!(!v.available);
        assert_eq!(v.quantity, 0);
        assert_eq!(v.remaining, 0);
    }

    #[test]
    fn create_defaults_quantity_to_zero_and_normalizes() {
        let new = create(None).into_new().unwrap();
        assert_eq!(new.quantity, 0);
        assert_eq!(new.category, AmenityCategory::Cabin);
        assert_eq!(new.available, "Yes");
    }

    #[test]
    fn create_rejects_negative_quantity() {
        assert_matches!(create(Some(-1)).into_new(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_rejects_unknown_category() {
        let mut input = create(Some(1));
        input.category = Some("villa".into());
        assert_matches!(input.into_new(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn patch_maps_status_only_when_present() {
        let patch = UpdateAmenity::default().into_patch().unwrap();
        assert_eq!(patch.available, None);

        let patch = UpdateAmenity {
            status: Some("unavailable".into()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.available, Some("No"));
    }

    #[test]
    fn create_rejects_price_beyond_column_precision() {
        let mut input = create(Some(1));
        input.price = 1e9;
        assert_matches!(input.into_new(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn patch_rejects_oversized_price_and_capacity() {
        let price = UpdateAmenity {
            price: Some(1e9),
            ..Default::default()
        };
        assert_matches!(price.into_patch(), Err(CoreError::Validation(_)));

        let capacity = UpdateAmenity {
            capacity: Some(MAX_CAPACITY + 1),
            ..Default::default()
        };
        assert_matches!(capacity.into_patch(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn patch_rejects_zero_capacity() {
        let input = UpdateAmenity {
            capacity: Some(0),
            ..Default::default()
        };
        assert_matches!(input.into_patch(), Err(CoreError::Validation(_)));
    }
}
