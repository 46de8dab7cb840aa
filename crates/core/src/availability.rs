//! Amenity availability reconciliation.
//!
//! An amenity is bookable when the operator's manual switch is on and its
//! unit inventory is not used up by today's active bookings. Both the
//! customer listing and the owner dashboard go through [`evaluate`], so the
//! two surfaces can never disagree about the same row.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw inputs
// ---------------------------------------------------------------------------

/// A persisted "is this amenity turned on" value in any of its legacy
/// encodings.
///
/// Older rows hold `1`/`0`, newer rows hold `"Yes"`/`"No"`, and some imports
/// carry `"available"` or `"true"`. JSON payloads may send a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEnabledFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl From<bool> for RawEnabledFlag {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for RawEnabledFlag {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for RawEnabledFlag {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Option<String>> for RawEnabledFlag {
    fn from(v: Option<String>) -> Self {
        v.map_or(Self::Missing, Self::Text)
    }
}

/// Textual encodings that mean "switched on". Compared case-insensitively.
const TRUTHY_TEXT: &[&str] = &["yes", "available", "true", "1"];

/// Map any persisted switch encoding to a canonical boolean.
///
/// Unknown values are `false`: an ambiguous row is shown as unavailable
/// rather than bookable.
pub fn normalize_enabled_flag(raw: &RawEnabledFlag) -> bool {
    match raw {
        RawEnabledFlag::Bool(b) => *b,
        RawEnabledFlag::Int(n) => *n == 1,
        RawEnabledFlag::Float(f) => *f == 1.0,
        RawEnabledFlag::Text(s) => {
            let s = s.trim();
            TRUTHY_TEXT.iter().any(|t| s.eq_ignore_ascii_case(t))
        }
        RawEnabledFlag::Missing => false,
    }
}

/// Coerce a stored unit quantity. `NULL` and negative values become 0.
///
/// A missing quantity must never be read as one unit: that would mark
/// zero-inventory amenities as bookable.
pub fn normalize_units(raw: Option<i64>) -> i64 {
    raw.unwrap_or(0).max(0)
}

/// Coerce a live booking count. `NULL` and negative values become 0.
pub fn normalize_active_count(raw: Option<i64>) -> i64 {
    raw.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// The inventory-relevant slice of an amenity row.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySnapshot {
    pub total_units: Option<i64>,
    pub enabled: RawEnabledFlag,
}

/// The single authoritative availability answer for one amenity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityVerdict {
    pub available: bool,
    /// Units left today. Never negative.
    pub remaining: i64,
}

/// Reconcile the manual switch, the unit inventory, and today's active
/// bookings into one verdict.
///
/// Zero inventory is always fully booked, so it is never available even
/// when the switch is on.
pub fn evaluate(amenity: &InventorySnapshot, active_count: Option<i64>) -> AvailabilityVerdict {
    let total = normalize_units(amenity.total_units);
    let active = normalize_active_count(active_count);

    let fully_booked = active >= total;
    let enabled = normalize_enabled_flag(&amenity.enabled);

    AvailabilityVerdict {
        available: enabled && !fully_booked,
        remaining: (total - active).max(0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total_units: Option<i64>, enabled: impl Into<RawEnabledFlag>) -> InventorySnapshot {
        InventorySnapshot {
            total_units,
            enabled: enabled.into(),
        }
    }

    // -- normalize_enabled_flag ----------------------------------------------

    #[test]
    fn truthy_encodings_normalize_to_true() {
        for raw in [
            RawEnabledFlag::Bool(true),
            RawEnabledFlag::Int(1),
            RawEnabledFlag::Float(1.0),
            "Yes".into(),
            "available".into(),
            "true".into(),
            "1".into(),
            " YES ".into(),
        ] {
            assert!(normalize_enabled_flag(&raw), "{raw:?} should be enabled");
        }
    }

    #[test]
    fn falsy_and_unknown_encodings_fail_closed() {
        for raw in [
            RawEnabledFlag::Bool(false),
            RawEnabledFlag::Int(0),
            RawEnabledFlag::Int(2),
            RawEnabledFlag::Float(0.5),
            "No".into(),
            "unavailable".into(),
            "false".into(),
            "maybe".into(),
            "".into(),
            RawEnabledFlag::Missing,
        ] {
            assert!(!normalize_enabled_flag(&raw), "{raw:?} should be disabled");
        }
    }

    #[test]
    fn normalize_enabled_flag_is_idempotent() {
        let inputs = [
            RawEnabledFlag::Bool(true),
            RawEnabledFlag::Int(0),
            "Yes".into(),
            "garbage".into(),
            RawEnabledFlag::Missing,
        ];
        for raw in inputs {
            let once = normalize_enabled_flag(&raw);
            let twice = normalize_enabled_flag(&RawEnabledFlag::Bool(once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn raw_flag_deserializes_from_json() {
        let v: RawEnabledFlag = serde_json::from_str("true").unwrap();
        assert_eq!(v, RawEnabledFlag::Bool(true));
        let v: RawEnabledFlag = serde_json::from_str("1").unwrap();
        assert_eq!(v, RawEnabledFlag::Int(1));
        let v: RawEnabledFlag = serde_json::from_str("\"Yes\"").unwrap();
        assert_eq!(v, RawEnabledFlag::Text("Yes".into()));
        let v: RawEnabledFlag = serde_json::from_str("null").unwrap();
        assert_eq!(v, RawEnabledFlag::Missing);
    }

    // -- evaluate ------------------------------------------------------------

    #[test]
    fn remaining_is_clamped_at_zero() {
        for (total, active) in [(0, 0), (1, 5), (3, 3), (10, 4), (2, 0)] {
            let v = evaluate(&snapshot(Some(total), true), Some(active));
            assert_eq!(v.remaining, (total - active).max(0));
            assert!(v.remaining >= 0);
        }
    }

    #[test]
    fn zero_inventory_is_never_available() {
        for active in [None, Some(0), Some(3)] {
            let v = evaluate(&snapshot(Some(0), true), active);
            assert!(!v.available);
            assert_eq!(v.remaining, 0);
        }
    }

    #[test]
    fn switched_off_is_never_available() {
        let v = evaluate(&snapshot(Some(10), "No"), Some(0));
        assert!(!v.available);
        assert_eq!(v.remaining, 10);
    }

    #[test]
    fn exactly_full_counts_as_fully_booked() {
        let v = evaluate(&snapshot(Some(4), true), Some(4));
        assert!(!v.available);
        assert_eq!(v.remaining, 0);
    }

    #[test]
    fn one_unit_left_is_available() {
        let v = evaluate(&snapshot(Some(4), true), Some(3));
        assert!(v.available);
        assert_eq!(v.remaining, 1);
    }

    #[test]
    fn scenario_yes_switch_with_one_unit_left() {
        let v = evaluate(&snapshot(Some(3), "Yes"), Some(2));
        assert_eq!(
            v,
            AvailabilityVerdict {
                available: true,
                remaining: 1
            }
        );
    }

    #[test]
    fn scenario_null_quantity_defaults_to_zero_not_one() {
        let v = evaluate(&snapshot(None, true), Some(0));
        assert_eq!(
            v,
            AvailabilityVerdict {
                available: false,
                remaining: 0
            }
        );
    }

    #[test]
    fn scenario_numeric_switch_fully_booked() {
        let v = evaluate(&snapshot(Some(5), 1_i64), Some(5));
        assert_eq!(
            v,
            AvailabilityVerdict {
                available: false,
                remaining: 0
            }
        );
    }

    #[test]
    fn malformed_counts_coerce_to_zero() {
        let v = evaluate(&snapshot(Some(-2), true), Some(-7));
        assert!(!v.available);
        assert_eq!(v.remaining, 0);

        let v = evaluate(&snapshot(Some(2), true), None);
        assert!(v.available);
        assert_eq!(v.remaining, 2);
    }
}
