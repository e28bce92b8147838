// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! These types are distinct from domain types and represent the API
//! contract. Dates cross the boundary as ISO 8601 strings.

use chc_hire_domain::{Booking, BookingAction, Center, DateRange, Machine};
use serde::{Deserialize, Serialize};

/// Request to create a center (government bootstrap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCenterRequest {
    /// The center code (e.g., "LUD").
    pub code: String,
    /// The center's display name.
    pub name: String,
    /// The district the center serves.
    pub district: String,
    /// The state the center is located in.
    pub state: String,
}

/// A center as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterResponse {
    /// The center code.
    pub code: String,
    /// The center's display name.
    pub name: String,
    /// The district.
    pub district: String,
    /// The state.
    pub state: String,
}

impl CenterResponse {
    /// Builds a response from a domain center.
    #[must_use]
    pub fn from_center(center: &Center) -> Self {
        Self {
            code: center.code().to_string(),
            name: center.name().to_string(),
            district: center.district().to_string(),
            state: center.state().to_string(),
        }
    }
}

/// Request to register a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterMachineRequest {
    /// Machine code. Generated from the center, type, and inventory count
    /// when absent.
    pub machine_code: Option<String>,
    /// The machine's display name.
    pub machine_name: String,
    /// The equipment category's display name (e.g., "Happy Seeder").
    pub machine_type: String,
    /// Year the machine was purchased.
    pub purchase_year: u16,
}

/// A machine as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineResponse {
    /// The machine code.
    pub machine_code: String,
    /// The machine's display name.
    pub machine_name: String,
    /// The equipment category's display name.
    pub machine_type: String,
    /// The operational status's display name.
    pub status: String,
    /// Year the machine was purchased.
    pub purchase_year: u16,
    /// Cumulative hours of use.
    pub total_hours_used: f64,
    /// The owning center's code.
    pub center_code: String,
}

impl MachineResponse {
    /// Builds a response from a domain machine.
    #[must_use]
    pub fn from_machine(machine: &Machine) -> Self {
        Self {
            machine_code: machine.machine_code.clone(),
            machine_name: machine.machine_name.clone(),
            machine_type: machine.machine_type.as_str().to_string(),
            status: machine.status.as_str().to_string(),
            purchase_year: machine.purchase_year,
            total_hours_used: machine.total_hours_used,
            center_code: machine.center.code().to_string(),
        }
    }
}

/// Request to directly edit a machine's operational status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMachineStatusRequest {
    /// The requested status's display name (e.g., "Maintenance").
    pub status: String,
}

/// Public request to create a booking.
///
/// There is no status field and no center field: submissions always enter
/// as Pending, and the owning center is inherited from the machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// The requested machine's code.
    pub machine_code: String,
    /// Requested start date (ISO 8601, inclusive).
    pub start_date: String,
    /// Requested end date (ISO 8601, inclusive).
    pub end_date: String,
    /// The farmer's full name.
    pub farmer_name: String,
    /// 10-digit contact number.
    pub farmer_contact: String,
    /// Contact email address.
    pub farmer_email: String,
    /// 12-digit Aadhaar number.
    pub farmer_aadhaar: String,
    /// Free-text purpose, if given.
    pub purpose: Option<String>,
    /// Requested field area in acres, if given.
    pub field_area: Option<f64>,
}

/// An administrative action on a booking.
///
/// A closed tagged union: each action carries exactly the fields it needs,
/// validated at deserialization rather than read loosely out of a generic
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BookingActionRequest {
    /// Accept a pending booking.
    Approve,
    /// Decline a pending booking. The reason is mandatory.
    Reject {
        /// Why the booking was declined.
        notes: String,
    },
    /// Hand the machine over to the farmer.
    Handover,
    /// Mark the machine as returned.
    Complete,
    /// Withdraw a booking. The reason is optional.
    Cancel {
        /// Why the booking was withdrawn, if given.
        #[serde(default)]
        notes: Option<String>,
    },
}

impl BookingActionRequest {
    /// Splits the request into the domain action and its notes.
    #[must_use]
    pub fn into_parts(self) -> (BookingAction, Option<String>) {
        match self {
            Self::Approve => (BookingAction::Approve, None),
            Self::Reject { notes } => (BookingAction::Reject, Some(notes)),
            Self::Handover => (BookingAction::Handover, None),
            Self::Complete => (BookingAction::Complete, None),
            Self::Cancel { notes } => (BookingAction::Cancel, notes),
        }
    }
}

/// A booking as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    /// The booking reference.
    pub booking_ref: String,
    /// The owning center's code.
    pub center_code: String,
    /// The booked machine's code.
    pub machine_code: String,
    /// Requested start date (ISO 8601, inclusive).
    pub start_date: String,
    /// Requested end date (ISO 8601, inclusive).
    pub end_date: String,
    /// The status's display name.
    pub status: String,
    /// The farmer's full name.
    pub farmer_name: String,
    /// 10-digit contact number.
    pub farmer_contact: String,
    /// Contact email address.
    pub farmer_email: String,
    /// 12-digit Aadhaar number.
    pub farmer_aadhaar: String,
    /// Requested field area in acres, if given.
    pub field_area: Option<f64>,
    /// Free-text purpose, if given.
    pub purpose: Option<String>,
    /// Rejection or cancellation reason, if any.
    pub status_reason: Option<String>,
    /// Creation timestamp, if persisted.
    pub created_at: Option<String>,
    /// Last-update timestamp, if persisted.
    pub updated_at: Option<String>,
}

impl BookingResponse {
    /// Builds a response from a domain booking.
    #[must_use]
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            booking_ref: booking.booking_ref.value().to_string(),
            center_code: booking.center.code().to_string(),
            machine_code: booking.machine_code.clone(),
            start_date: booking.range.start().to_string(),
            end_date: booking.range.end().to_string(),
            status: booking.status.as_str().to_string(),
            farmer_name: booking.farmer.name.clone(),
            farmer_contact: booking.farmer.contact.clone(),
            farmer_email: booking.farmer.email.clone(),
            farmer_aadhaar: booking.farmer.aadhaar.clone(),
            field_area: booking.field_area,
            purpose: booking.purpose.clone(),
            status_reason: booking.status_reason.clone(),
            created_at: booking.created_at.clone(),
            updated_at: booking.updated_at.clone(),
        }
    }
}

/// A list of bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingListResponse {
    /// The center the bookings belong to.
    pub center_code: String,
    /// The bookings, oldest first.
    pub bookings: Vec<BookingResponse>,
}

/// One booked date range in the calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRange {
    /// Start date (ISO 8601, inclusive).
    pub start_date: String,
    /// End date (ISO 8601, inclusive).
    pub end_date: String,
}

/// The calendar feed for a machine: every non-terminal booking's range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRangesResponse {
    /// The machine the feed is for.
    pub machine_code: String,
    /// Booked ranges, sorted by start date.
    pub booked_ranges: Vec<BookedRange>,
}

impl BookedRangesResponse {
    /// Builds the feed from domain ranges.
    #[must_use]
    pub fn from_ranges(machine_code: &str, ranges: &[DateRange]) -> Self {
        Self {
            machine_code: machine_code.to_string(),
            booked_ranges: ranges
                .iter()
                .map(|r| BookedRange {
                    start_date: r.start().to_string(),
                    end_date: r.end().to_string(),
                })
                .collect(),
        }
    }
}

/// A list of centers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterListResponse {
    /// All registered centers.
    pub centers: Vec<CenterResponse>,
}
