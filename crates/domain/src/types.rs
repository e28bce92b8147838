// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::availability::DateRange;
use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use crate::machine_status::{MachineStatus, MachineType};
use serde::{Deserialize, Serialize};

/// Represents a custom-hiring center.
///
/// A center has a canonical numeric ID (`center_id`) assigned by the
/// database, as well as a human-readable code used for display and scoping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Center {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the center has not been persisted yet.
    center_id: Option<i64>,
    /// The center code (e.g., "LUD"). Normalized to uppercase.
    code: String,
    /// The center's display name.
    name: String,
    /// The district the center serves.
    district: String,
    /// The state the center is located in.
    state: String,
}

// Two Centers are equal if they have the same code, regardless of their IDs.
impl PartialEq for Center {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Center {}

impl std::hash::Hash for Center {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl Center {
    /// Creates a new `Center` without a persisted ID.
    ///
    /// The code is normalized to uppercase.
    #[must_use]
    pub fn new(code: &str, name: &str, district: &str, state: &str) -> Self {
        Self {
            center_id: None,
            code: code.to_uppercase(),
            name: name.to_string(),
            district: district.to_string(),
            state: state.to_string(),
        }
    }

    /// Creates a `Center` with an existing persisted ID.
    #[must_use]
    pub fn with_id(center_id: i64, code: &str, name: &str, district: &str, state: &str) -> Self {
        Self {
            center_id: Some(center_id),
            code: code.to_uppercase(),
            name: name.to_string(),
            district: district.to_string(),
            state: state.to_string(),
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn center_id(&self) -> Option<i64> {
        self.center_id
    }

    /// Returns the center code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the center's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the district.
    #[must_use]
    pub fn district(&self) -> &str {
        &self.district
    }

    /// Returns the state.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }
}

/// A human-readable booking reference.
///
/// References have the form `BKG-` followed by exactly six uppercase
/// alphanumeric characters, and are unique across all bookings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingRef {
    value: String,
}

impl BookingRef {
    /// The constant reference prefix.
    pub const PREFIX: &'static str = "BKG-";
    /// The length of the random suffix.
    pub const SUFFIX_LEN: usize = 6;

    /// Parses and validates a booking reference.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingRef` if the value does not match
    /// the `BKG-XXXXXX` format.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let Some(suffix) = value.strip_prefix(Self::PREFIX) else {
            return Err(DomainError::InvalidBookingRef(value.to_string()));
        };
        if suffix.len() != Self::SUFFIX_LEN
            || !suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(DomainError::InvalidBookingRef(value.to_string()));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the reference value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for BookingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::str::FromStr for BookingRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identity fields for the farmer submitting a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerDetails {
    /// The farmer's full name.
    pub name: String,
    /// 10-digit contact number.
    pub contact: String,
    /// Contact email address.
    pub email: String,
    /// 12-digit Aadhaar number.
    pub aadhaar: String,
}

/// A machine in a center's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the machine has not been persisted yet.
    pub machine_id: Option<i64>,
    /// Unique machine code (e.g., "LUD-HAP-1").
    pub machine_code: String,
    /// The machine's display name.
    pub machine_name: String,
    /// The equipment category.
    pub machine_type: MachineType,
    /// Current operational status.
    pub status: MachineStatus,
    /// Year the machine was purchased.
    pub purchase_year: u16,
    /// Cumulative hours of use. Never negative.
    pub total_hours_used: f64,
    /// The owning center.
    pub center: Center,
}

impl Machine {
    /// Creates a new machine with Idle status and zero hours used.
    #[must_use]
    pub fn new(
        machine_code: &str,
        machine_name: &str,
        machine_type: MachineType,
        purchase_year: u16,
        center: Center,
    ) -> Self {
        Self {
            machine_id: None,
            machine_code: machine_code.to_string(),
            machine_name: machine_name.to_string(),
            machine_type,
            status: MachineStatus::Idle,
            purchase_year,
            total_hours_used: 0.0,
            center,
        }
    }
}

/// A reservation record in a center's booking ledger.
///
/// Bookings are never hard-deleted: terminal statuses are final record
/// states. Timestamps are assigned and refreshed by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the booking has not been persisted yet.
    pub booking_id: Option<i64>,
    /// The human-readable booking reference.
    pub booking_ref: BookingRef,
    /// The owning center. Always inherited from the machine.
    pub center: Center,
    /// The booked machine's code.
    pub machine_code: String,
    /// The requested date range (inclusive on both ends).
    pub range: DateRange,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// The submitting farmer's identity.
    pub farmer: FarmerDetails,
    /// Requested field area in acres, if given.
    pub field_area: Option<f64>,
    /// Free-text purpose, if given.
    pub purpose: Option<String>,
    /// Rejection or cancellation reason, if any.
    pub status_reason: Option<String>,
    /// Creation timestamp (storage-assigned, ISO 8601).
    pub created_at: Option<String>,
    /// Last-update timestamp (storage-assigned, ISO 8601).
    pub updated_at: Option<String>,
}

impl Booking {
    /// Creates a new booking in Pending status.
    ///
    /// The status is not a parameter: submissions always enter the ledger as
    /// Pending, and the owning center comes from the machine's center.
    #[must_use]
    pub fn new(
        booking_ref: BookingRef,
        center: Center,
        machine_code: &str,
        range: DateRange,
        farmer: FarmerDetails,
        field_area: Option<f64>,
        purpose: Option<String>,
    ) -> Self {
        Self {
            booking_id: None,
            booking_ref,
            center,
            machine_code: machine_code.to_string(),
            range,
            status: BookingStatus::Pending,
            farmer,
            field_area,
            purpose,
            status_reason: None,
            created_at: None,
            updated_at: None,
        }
    }
}
