// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types bridging SQLite rows and domain types.
//!
//! Raw rows are fetched with plain field types and converted to domain
//! types outside the rusqlite row callbacks, so parse failures surface as
//! `PersistenceError` instead of being shoehorned into `rusqlite::Error`.

use crate::error::PersistenceError;
use chc_hire_domain::{
    Booking, BookingRef, BookingStatus, Center, DateRange, FarmerDetails, Machine, MachineStatus,
    MachineType,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Formats a date for storage.
pub(crate) fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("format date: {e}")))
}

/// Parses a stored date.
pub(crate) fn parse_date(s: &str) -> Result<Date, PersistenceError> {
    Date::parse(s, &DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("parse date '{s}': {e}")))
}

/// A raw machine row joined with its owning center.
#[derive(Debug, Clone)]
pub(crate) struct MachineRow {
    pub machine_id: i64,
    pub machine_code: String,
    pub machine_name: String,
    pub machine_type: String,
    pub status: String,
    pub purchase_year: i64,
    pub total_hours_used: f64,
    pub center: CenterRow,
}

impl MachineRow {
    pub(crate) fn into_domain(self) -> Result<Machine, PersistenceError> {
        let machine_type: MachineType = MachineType::from_str(&self.machine_type)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let status: MachineStatus = MachineStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let purchase_year: u16 = u16::try_from(self.purchase_year).map_err(|_| {
            PersistenceError::SerializationError(format!(
                "purchase year {} out of range",
                self.purchase_year
            ))
        })?;

        Ok(Machine {
            machine_id: Some(self.machine_id),
            machine_code: self.machine_code,
            machine_name: self.machine_name,
            machine_type,
            status,
            purchase_year,
            total_hours_used: self.total_hours_used,
            center: self.center.into_domain(),
        })
    }
}

/// A raw center row.
#[derive(Debug, Clone)]
pub(crate) struct CenterRow {
    pub center_id: i64,
    pub code: String,
    pub name: String,
    pub district: String,
    pub state: String,
}

impl CenterRow {
    pub(crate) fn into_domain(self) -> Center {
        Center::with_id(
            self.center_id,
            &self.code,
            &self.name,
            &self.district,
            &self.state,
        )
    }
}

/// A raw booking row joined with its center and machine.
#[derive(Debug, Clone)]
pub(crate) struct BookingRow {
    pub booking_id: i64,
    pub booking_ref: String,
    pub machine_code: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub farmer_name: String,
    pub farmer_contact: String,
    pub farmer_email: String,
    pub farmer_aadhaar: String,
    pub field_area: Option<f64>,
    pub purpose: Option<String>,
    pub status_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub center: CenterRow,
}

impl BookingRow {
    pub(crate) fn into_domain(self) -> Result<Booking, PersistenceError> {
        let booking_ref: BookingRef = BookingRef::parse(&self.booking_ref)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let status: BookingStatus = BookingStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let range: DateRange =
            DateRange::new(parse_date(&self.start_date)?, parse_date(&self.end_date)?)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        Ok(Booking {
            booking_id: Some(self.booking_id),
            booking_ref,
            center: self.center.into_domain(),
            machine_code: self.machine_code,
            range,
            status,
            farmer: FarmerDetails {
                name: self.farmer_name,
                contact: self.farmer_contact,
                email: self.farmer_email,
                aadhaar: self.farmer_aadhaar,
            },
            field_area: self.field_area,
            purpose: self.purpose,
            status_reason: self.status_reason,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        })
    }
}

/// A persisted audit event, as stored in the `audit_log` table.
///
/// Richer than the in-memory `AuditEvent`: carries the storage-assigned
/// event ID and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventRecord {
    /// The storage-assigned event ID.
    pub event_id: i64,
    /// The acting entity's identifier, if recorded.
    pub actor_id: Option<String>,
    /// The acting entity's type, if recorded.
    pub actor_type: Option<String>,
    /// The cause (request) identifier.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name (e.g., "`ApproveBooking`").
    pub action_name: String,
    /// Optional action details.
    pub action_details: Option<String>,
    /// The logical table the event is about.
    pub subject_table: String,
    /// The subject record's identifier.
    pub subject_record_id: String,
    /// Snapshot before the transition, if one existed.
    pub old_value: Option<String>,
    /// Snapshot after the transition.
    pub new_value: String,
    /// The center the event is scoped to.
    pub center_code: String,
    /// The storage-assigned timestamp.
    pub timestamp: String,
}
