// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::{BookingAction, BookingStatus};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Requested start date falls after the end date.
    InvalidRange {
        /// The requested start date.
        start: time::Date,
        /// The requested end date.
        end: time::Date,
    },
    /// Requested range overlaps an existing non-terminal booking.
    MachineUnavailable {
        /// The machine that is unavailable.
        machine_code: String,
        /// Start of the conflicting booked range.
        conflict_start: time::Date,
        /// End of the conflicting booked range.
        conflict_end: time::Date,
    },
    /// The requested action is not legal from the booking's current status.
    IllegalTransition {
        /// The booking's current status.
        from: BookingStatus,
        /// The requested action.
        action: BookingAction,
    },
    /// Direct machine-status edit to Idle while an Active booking exists.
    ConflictingActiveBooking {
        /// The machine whose status edit was rejected.
        machine_code: String,
    },
    /// Direct machine-status edit to In Use without an Active booking.
    NoActiveBooking {
        /// The machine whose status edit was rejected.
        machine_code: String,
    },
    /// The action requires a non-empty reason.
    ReasonRequired {
        /// The action that was attempted without a reason.
        action: BookingAction,
    },
    /// Booking status string is not a valid status.
    InvalidBookingStatus(String),
    /// Booking action string is not a valid action.
    InvalidBookingAction(String),
    /// Machine status string is not a valid status.
    InvalidMachineStatus(String),
    /// Machine type string is not a valid equipment category.
    InvalidMachineType(String),
    /// Booking reference does not match the `BKG-XXXXXX` format.
    InvalidBookingRef(String),
    /// Farmer name is empty or invalid.
    InvalidFarmerName(String),
    /// Farmer contact is not a 10-digit number.
    InvalidFarmerContact(String),
    /// Farmer email is malformed.
    InvalidFarmerEmail(String),
    /// Aadhaar number is not a 12-digit number.
    InvalidAadhaar(String),
    /// Field area is negative or not a finite number.
    InvalidFieldArea(String),
    /// Purchase year is outside the plausible range.
    InvalidPurchaseYear(u16),
    /// Cumulative hours used is negative or not a finite number.
    InvalidHoursUsed(String),
    /// Machine code is empty or malformed.
    InvalidMachineCode(String),
    /// Machine name is empty or invalid.
    InvalidMachineName(String),
    /// Center code is empty or malformed.
    InvalidCenterCode(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Machine does not exist in the center's inventory.
    MachineNotFound {
        /// The machine code.
        machine_code: String,
    },
    /// Booking does not exist in the center's ledger.
    BookingNotFound {
        /// The booking reference.
        booking_ref: String,
    },
    /// Center does not exist.
    CenterNotFound {
        /// The center code.
        code: String,
    },
    /// Center code already exists.
    DuplicateCenter {
        /// The center code.
        code: String,
    },
    /// Machine code already exists in the center's inventory.
    DuplicateMachineCode {
        /// The machine code.
        machine_code: String,
    },
    /// Booking reference already exists in the ledger.
    DuplicateBookingRef {
        /// The booking reference.
        booking_ref: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "Invalid date range: start {start} is after end {end}")
            }
            Self::MachineUnavailable {
                machine_code,
                conflict_start,
                conflict_end,
            } => {
                write!(
                    f,
                    "Machine '{machine_code}' is unavailable: conflicts with an existing booking from {conflict_start} to {conflict_end}"
                )
            }
            Self::IllegalTransition { from, action } => {
                write!(
                    f,
                    "Action '{}' is not permitted from status '{}'",
                    action.as_str(),
                    from.as_str()
                )
            }
            Self::ConflictingActiveBooking { machine_code } => {
                write!(
                    f,
                    "Machine '{machine_code}' cannot be set to Idle: an Active booking references it"
                )
            }
            Self::NoActiveBooking { machine_code } => {
                write!(
                    f,
                    "Machine '{machine_code}' cannot be set to In Use: no Active booking references it"
                )
            }
            Self::ReasonRequired { action } => {
                write!(f, "Action '{}' requires a reason", action.as_str())
            }
            Self::InvalidBookingStatus(status) => {
                write!(f, "Invalid booking status: {status}")
            }
            Self::InvalidBookingAction(action) => {
                write!(f, "Invalid booking action: {action}")
            }
            Self::InvalidMachineStatus(status) => {
                write!(f, "Invalid machine status: {status}")
            }
            Self::InvalidMachineType(machine_type) => {
                write!(f, "Invalid machine type: {machine_type}")
            }
            Self::InvalidBookingRef(value) => {
                write!(f, "Invalid booking reference: {value}")
            }
            Self::InvalidFarmerName(msg) => write!(f, "Invalid farmer name: {msg}"),
            Self::InvalidFarmerContact(msg) => write!(f, "Invalid farmer contact: {msg}"),
            Self::InvalidFarmerEmail(msg) => write!(f, "Invalid farmer email: {msg}"),
            Self::InvalidAadhaar(msg) => write!(f, "Invalid Aadhaar number: {msg}"),
            Self::InvalidFieldArea(msg) => write!(f, "Invalid field area: {msg}"),
            Self::InvalidPurchaseYear(year) => write!(f, "Invalid purchase year: {year}"),
            Self::InvalidHoursUsed(msg) => write!(f, "Invalid hours used: {msg}"),
            Self::InvalidMachineCode(msg) => write!(f, "Invalid machine code: {msg}"),
            Self::InvalidMachineName(msg) => write!(f, "Invalid machine name: {msg}"),
            Self::InvalidCenterCode(msg) => write!(f, "Invalid center code: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::MachineNotFound { machine_code } => {
                write!(f, "Machine '{machine_code}' not found")
            }
            Self::BookingNotFound { booking_ref } => {
                write!(f, "Booking '{booking_ref}' not found")
            }
            Self::CenterNotFound { code } => write!(f, "Center '{code}' not found"),
            Self::DuplicateCenter { code } => {
                write!(f, "Center '{code}' already exists")
            }
            Self::DuplicateMachineCode { machine_code } => {
                write!(f, "Machine code '{machine_code}' already exists")
            }
            Self::DuplicateBookingRef { booking_ref } => {
                write!(f, "Booking reference '{booking_ref}' already exists")
            }
        }
    }
}

impl std::error::Error for DomainError {}
