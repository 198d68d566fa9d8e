//! Validity window resolution.
//!
//! A template may carry two independent expiry bounds: a last valid slot
//! and a last valid unix timestamp (seconds). Slot time and wall-clock
//! time drift relative to each other, so when both are present the
//! resolved window keeps both and expires at whichever is reached first.
//!
//! ## Example
//!
//! ```
//! use order_translator::validity::{resolve_validity_window, ValidityWindow};
//!
//! assert_eq!(resolve_validity_window(None, None), ValidityWindow::None);
//! assert_eq!(
//!     resolve_validity_window(Some(100), Some(1_700_000_000)),
//!     ValidityWindow::ExpiresAtEarliestOf { slot: 100, unix_timestamp: 1_700_000_000 },
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Canonical expiry of an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValidityWindow {
    /// Valid until cancelled or fully filled
    #[default]
    None,
    /// Valid through the given slot (inclusive)
    ExpiresAtSlot(u64),
    /// Valid through the given unix time in seconds (inclusive)
    ExpiresAtUnixTime(i64),
    /// Expires at whichever bound is reached first
    ExpiresAtEarliestOf { slot: u64, unix_timestamp: i64 },
}

/// Collapse the two optional expiry fields into one window.
///
/// Values pass through unchanged; there is no failure case.
pub fn resolve_validity_window(
    last_valid_slot: Option<u64>,
    last_valid_unix_timestamp_in_seconds: Option<i64>,
) -> ValidityWindow {
    match (last_valid_slot, last_valid_unix_timestamp_in_seconds) {
        (None, None) => ValidityWindow::None,
        (Some(slot), None) => ValidityWindow::ExpiresAtSlot(slot),
        (None, Some(unix_timestamp)) => ValidityWindow::ExpiresAtUnixTime(unix_timestamp),
        (Some(slot), Some(unix_timestamp)) => ValidityWindow::ExpiresAtEarliestOf {
            slot,
            unix_timestamp,
        },
    }
}

impl ValidityWindow {
    /// Slot bound, if any
    pub fn last_valid_slot(&self) -> Option<u64> {
        match *self {
            ValidityWindow::ExpiresAtSlot(slot)
            | ValidityWindow::ExpiresAtEarliestOf { slot, .. } => Some(slot),
            _ => None,
        }
    }

    /// Timestamp bound, if any
    pub fn last_valid_unix_timestamp(&self) -> Option<i64> {
        match *self {
            ValidityWindow::ExpiresAtUnixTime(ts)
            | ValidityWindow::ExpiresAtEarliestOf {
                unix_timestamp: ts, ..
            } => Some(ts),
            _ => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, ValidityWindow::None)
    }

    /// True once either bound has been passed at the given clock readings.
    pub fn is_expired(&self, current_slot: u64, current_unix_timestamp: i64) -> bool {
        let slot_passed = self
            .last_valid_slot()
            .is_some_and(|slot| current_slot > slot);
        let time_passed = self
            .last_valid_unix_timestamp()
            .is_some_and(|ts| current_unix_timestamp > ts);
        slot_passed || time_passed
    }

    /// Convert to u8 for the digest record
    pub fn to_u8(&self) -> u8 {
        match self {
            ValidityWindow::None => 0,
            ValidityWindow::ExpiresAtSlot(_) => 1,
            ValidityWindow::ExpiresAtUnixTime(_) => 2,
            ValidityWindow::ExpiresAtEarliestOf { .. } => 3,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
