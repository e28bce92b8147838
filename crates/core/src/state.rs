// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chc_hire_audit::{AuditEvent, StateSnapshot};
use chc_hire_domain::{Booking, BookingRef, Center, Machine};

/// Bootstrap metadata tracking which centers exist.
///
/// This is separate from the scoped State and represents the directory of
/// the center network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapMetadata {
    /// All centers that have been created.
    pub centers: Vec<Center>,
}

impl BootstrapMetadata {
    /// Creates new empty bootstrap metadata.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            centers: Vec::new(),
        }
    }

    /// Checks if a center exists.
    #[must_use]
    pub fn has_center(&self, center: &Center) -> bool {
        self.centers.contains(center)
    }

    /// Looks up a center by code.
    #[must_use]
    pub fn find_center(&self, code: &str) -> Option<&Center> {
        self.centers.iter().find(|c| c.code() == code)
    }

    /// Adds a center.
    pub(crate) fn add_center(&mut self, center: Center) {
        self.centers.push(center);
    }
}

impl Default for BootstrapMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete system state scoped to a single center.
///
/// One center's machine inventory and booking ledger. Scoping the state per
/// center keeps tenants isolated and gives persistence and audit a natural
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// The center this state is scoped to.
    pub center: Center,
    /// The center's machine inventory.
    pub machines: Vec<Machine>,
    /// The center's booking ledger.
    pub bookings: Vec<Booking>,
}

impl State {
    /// Creates a new empty state for a center.
    #[must_use]
    pub const fn new(center: Center) -> Self {
        Self {
            center,
            machines: Vec::new(),
            bookings: Vec::new(),
        }
    }

    /// Looks up a machine by code.
    #[must_use]
    pub fn find_machine(&self, machine_code: &str) -> Option<&Machine> {
        self.machines
            .iter()
            .find(|m| m.machine_code == machine_code)
    }

    /// Looks up a booking by reference.
    #[must_use]
    pub fn find_booking(&self, booking_ref: &BookingRef) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| &b.booking_ref == booking_ref)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "center={},machines_count={},bookings_count={}",
            self.center.code(),
            self.machines.len(),
            self.bookings.len()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a bootstrap operation.
///
/// Bootstrap operations modify the center directory, not scoped state.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// The new bootstrap metadata after the operation.
    pub new_metadata: BootstrapMetadata,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
    /// The center that was created.
    pub center: Center,
}
