//! Booking lifecycle rules.
//!
//! A booking occupies one unit of its amenity while it is Confirmed or
//! Checked-In. Those two states feed the active count that the
//! availability engine consumes.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_CONFIRMED: &str = "Confirmed";
pub const STATUS_CHECKED_IN: &str = "Checked-In";
pub const STATUS_CHECKED_OUT: &str = "Checked-Out";
pub const STATUS_CANCELLED: &str = "Cancelled";

/// Status values that occupy inventory.
pub const ACTIVE_STATUSES: &[&str] = &[STATUS_CONFIRMED, STATUS_CHECKED_IN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    #[serde(rename = "Checked-In")]
    CheckedIn,
    #[serde(rename = "Checked-Out")]
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    /// Status given to bookings made through the customer surface.
    pub const INITIAL: Self = Self::Confirmed;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Confirmed => STATUS_CONFIRMED,
            Self::CheckedIn => STATUS_CHECKED_IN,
            Self::CheckedOut => STATUS_CHECKED_OUT,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }

    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_CONFIRMED => Ok(Self::Confirmed),
            STATUS_CHECKED_IN => Ok(Self::CheckedIn),
            STATUS_CHECKED_OUT => Ok(Self::CheckedOut),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid booking status '{s}'"
            ))),
        }
    }

    /// Whether a booking in this state counts against inventory.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: Self) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, CheckedIn)
                | (Confirmed, Cancelled)
                | (CheckedIn, CheckedOut)
        )
    }
}

/// Check a transition, returning a conflict error when it is illegal.
pub fn validate_transition(from: BookingStatus, to: BookingStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move booking from {} to {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

// ---------------------------------------------------------------------------
// Party size & pricing
// ---------------------------------------------------------------------------

/// Validate the party size against the per-unit capacity.
pub fn validate_guests(guests: i32, capacity: i32) -> Result<(), CoreError> {
    if guests < 1 {
        return Err(CoreError::Validation(
            "A booking needs at least 1 guest".into(),
        ));
    }
    if guests > capacity {
        return Err(CoreError::Validation(format!(
            "Maximum capacity is {capacity} guests"
        )));
    }
    Ok(())
}

/// Price of a booking: unit price times party size.
pub fn compute_total_price(price: f64, guests: i32) -> f64 {
    price * f64::from(guests)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ALL: &[BookingStatus] = &[
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::CheckedIn,
        BookingStatus::CheckedOut,
        BookingStatus::Cancelled,
    ];

    #[test]
    fn status_round_trips_through_str() {
        for s in ALL {
            assert_eq!(BookingStatus::from_str_value(s.as_str()).unwrap(), *s);
        }
        assert!(BookingStatus::from_str_value("checked-in").is_err());
    }

    #[test]
    fn status_serializes_with_hyphenated_labels() {
        let json = serde_json::to_string(&BookingStatus::CheckedIn).unwrap();
        assert_eq!(json, "\"Checked-In\"");
    }

    #[test]
    fn only_confirmed_and_checked_in_are_active() {
        let active: Vec<_> = ALL.iter().filter(|s| s.is_active()).map(|s| s.as_str()).collect();
        assert_eq!(active, ACTIVE_STATUSES);
    }

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(validate_transition(BookingStatus::Pending, BookingStatus::Confirmed).is_ok());
        assert!(validate_transition(BookingStatus::Confirmed, BookingStatus::CheckedIn).is_ok());
        assert!(validate_transition(BookingStatus::CheckedIn, BookingStatus::CheckedOut).is_ok());
        assert!(validate_transition(BookingStatus::Confirmed, BookingStatus::Cancelled).is_ok());
    }

    #[test]
    fn terminal_and_backward_transitions_conflict() {
        assert_matches!(
            validate_transition(BookingStatus::CheckedOut, BookingStatus::Confirmed),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_transition(BookingStatus::Cancelled, BookingStatus::Confirmed),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_transition(BookingStatus::CheckedIn, BookingStatus::Cancelled),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_transition(BookingStatus::Confirmed, BookingStatus::Confirmed),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn guests_must_fit_capacity() {
        assert!(validate_guests(1, 4).is_ok());
        assert!(validate_guests(4, 4).is_ok());
        assert!(validate_guests(0, 4).is_err());
        assert!(validate_guests(5, 4).is_err());
    }

    #[test]
    fn total_price_scales_with_guests() {
        assert_eq!(compute_total_price(250.0, 3), 750.0);
        assert_eq!(compute_total_price(0.0, 3), 0.0);
    }
}
