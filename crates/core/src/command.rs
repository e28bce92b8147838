// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chc_hire_domain::{BookingAction, BookingRef, DateRange, FarmerDetails, MachineStatus, MachineType};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a new custom-hiring center.
    CreateCenter {
        /// The center code (e.g., "LUD").
        code: String,
        /// The center's display name.
        name: String,
        /// The district the center serves.
        district: String,
        /// The state the center is located in.
        state: String,
    },
    /// Register a new machine in the center's inventory.
    RegisterMachine {
        /// Unique machine code.
        machine_code: String,
        /// The machine's display name.
        machine_name: String,
        /// The equipment category.
        machine_type: MachineType,
        /// Year the machine was purchased.
        purchase_year: u16,
    },
    /// Create a booking from a public submission.
    ///
    /// The booking always enters the ledger as Pending; there is no status
    /// field here by design. The owning center is inherited from the machine.
    CreateBooking {
        /// The pre-generated booking reference.
        booking_ref: BookingRef,
        /// The requested machine's code.
        machine_code: String,
        /// The requested date range.
        range: DateRange,
        /// The submitting farmer's identity.
        farmer: FarmerDetails,
        /// Requested field area in acres, if given.
        field_area: Option<f64>,
        /// Free-text purpose, if given.
        purpose: Option<String>,
    },
    /// Apply an administrative action to a booking.
    BookingAction {
        /// The booking to act on.
        booking_ref: BookingRef,
        /// The action to apply.
        action: BookingAction,
        /// Free-text notes. Required for reject, optional for cancel.
        notes: Option<String>,
    },
    /// Directly edit a machine's operational status.
    ///
    /// Guarded: edits that would break the InUse-iff-Active invariant are
    /// rejected.
    SetMachineStatus {
        /// The machine to edit.
        machine_code: String,
        /// The requested status.
        new_status: MachineStatus,
    },
}
