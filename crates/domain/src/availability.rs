// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date-range availability checking for machine bookings.
//!
//! ## Invariants
//!
//! - Ranges are inclusive on both ends: a booking through day X still holds
//!   the machine on day X.
//! - The overlap test is strictly closed-interval: adjacent ranges (one ends
//!   on day X, the next starts on day X+1) do not conflict.
//! - Only bookings in a non-terminal status (Pending, Approved, Active)
//!   occupy the calendar.

use crate::error::DomainError;
use crate::types::Booking;
use serde::{Deserialize, Serialize};
use time::Date;

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start date.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the inclusive end date.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Closed-interval overlap test.
    ///
    /// Two ranges conflict when `self.start <= other.end` and
    /// `self.end >= other.start`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Decides whether a requested range can be accepted for a machine.
///
/// Pure read: consults the supplied ledger slice and performs no writes.
/// Bookings for other machines and bookings in a terminal status are ignored.
///
/// # Errors
///
/// Returns `DomainError::MachineUnavailable` naming the first conflicting
/// booked range if the requested range overlaps any non-terminal booking for
/// the machine.
pub fn check_availability(
    machine_code: &str,
    requested: &DateRange,
    bookings: &[Booking],
) -> Result<(), DomainError> {
    for booking in bookings {
        if booking.machine_code != machine_code || !booking.status.occupies_calendar() {
            continue;
        }
        if requested.overlaps(&booking.range) {
            return Err(DomainError::MachineUnavailable {
                machine_code: machine_code.to_string(),
                conflict_start: booking.range.start(),
                conflict_end: booking.range.end(),
            });
        }
    }
    Ok(())
}

/// Returns the booked ranges for a machine, sorted by start date.
///
/// This is the calendar feed consumed by client-side date pickers: every
/// non-terminal booking's range, nothing else.
#[must_use]
pub fn booked_ranges(machine_code: &str, bookings: &[Booking]) -> Vec<DateRange> {
    let mut ranges: Vec<DateRange> = bookings
        .iter()
        .filter(|b| b.machine_code == machine_code && b.status.occupies_calendar())
        .map(|b| b.range)
        .collect();
    ranges.sort_by_key(DateRange::start);
    ranges
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use time::Month;

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).expect("valid test date")
    }

    fn range(start_day: u8, end_day: u8) -> DateRange {
        DateRange::new(
            date(2026, Month::March, start_day),
            date(2026, Month::March, end_day),
        )
        .expect("valid test range")
    }

    #[test]
    fn test_range_rejects_inverted_dates() {
        let result = DateRange::new(date(2026, Month::March, 5), date(2026, Month::March, 1));
        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let day = date(2026, Month::March, 1);
        let result = DateRange::new(day, day);
        assert!(result.is_ok());
    }

    #[test]
    fn test_overlap_is_closed_interval() {
        // [1,5] vs [4,6]: shared days 4-5
        assert!(range(1, 5).overlaps(&range(4, 6)));
        // [1,5] vs [5,8]: shared day 5
        assert!(range(1, 5).overlaps(&range(5, 8)));
        // [1,5] vs [6,8]: adjacent, no shared day
        assert!(!range(1, 5).overlaps(&range(6, 8)));
        // containment
        assert!(range(1, 8).overlaps(&range(3, 4)));
        // symmetry
        assert!(range(4, 6).overlaps(&range(1, 5)));
    }
}
