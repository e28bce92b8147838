// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries: state reconstruction and audit retrieval.

use crate::data_models::{AuditEventRecord, BookingRow, CenterRow, MachineRow};
use crate::error::PersistenceError;
use chc_hire::{BootstrapMetadata, State};
use chc_hire_domain::{Booking, Center, Machine};
use rusqlite::{Connection, OptionalExtension, Row, params};

const MACHINE_SELECT: &str = "
    SELECT m.machine_id, m.machine_code, m.machine_name, m.machine_type, m.status,
           m.purchase_year, m.total_hours_used,
           c.center_id, c.code, c.name, c.district, c.state
    FROM machines m
    JOIN centers c ON c.center_id = m.center_id";

const BOOKING_SELECT: &str = "
    SELECT b.booking_id, b.booking_ref, m.machine_code, b.start_date, b.end_date,
           b.status, b.farmer_name, b.farmer_contact, b.farmer_email, b.farmer_aadhaar,
           b.field_area, b.purpose, b.status_reason, b.created_at, b.updated_at,
           c.center_id, c.code, c.name, c.district, c.state
    FROM bookings b
    JOIN machines m ON m.machine_id = b.machine_id
    JOIN centers c ON c.center_id = b.center_id";

const AUDIT_SELECT: &str = "
    SELECT event_id, actor_id, actor_type, cause_id, cause_description,
           action_name, action_details, subject_table, subject_record_id,
           old_value, new_value, center_code, timestamp
    FROM audit_log";

fn center_row(row: &Row<'_>) -> rusqlite::Result<CenterRow> {
    Ok(CenterRow {
        center_id: row.get("center_id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        district: row.get("district")?,
        state: row.get("state")?,
    })
}

fn machine_row(row: &Row<'_>) -> rusqlite::Result<MachineRow> {
    Ok(MachineRow {
        machine_id: row.get("machine_id")?,
        machine_code: row.get("machine_code")?,
        machine_name: row.get("machine_name")?,
        machine_type: row.get("machine_type")?,
        status: row.get("status")?,
        purchase_year: row.get("purchase_year")?,
        total_hours_used: row.get("total_hours_used")?,
        center: center_row(row)?,
    })
}

fn booking_row(row: &Row<'_>) -> rusqlite::Result<BookingRow> {
    Ok(BookingRow {
        booking_id: row.get("booking_id")?,
        booking_ref: row.get("booking_ref")?,
        machine_code: row.get("machine_code")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        status: row.get("status")?,
        farmer_name: row.get("farmer_name")?,
        farmer_contact: row.get("farmer_contact")?,
        farmer_email: row.get("farmer_email")?,
        farmer_aadhaar: row.get("farmer_aadhaar")?,
        field_area: row.get("field_area")?,
        purpose: row.get("purpose")?,
        status_reason: row.get("status_reason")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        center: center_row(row)?,
    })
}

fn audit_record(row: &Row<'_>) -> rusqlite::Result<AuditEventRecord> {
    Ok(AuditEventRecord {
        event_id: row.get("event_id")?,
        actor_id: row.get("actor_id")?,
        actor_type: row.get("actor_type")?,
        cause_id: row.get("cause_id")?,
        cause_description: row.get("cause_description")?,
        action_name: row.get("action_name")?,
        action_details: row.get("action_details")?,
        subject_table: row.get("subject_table")?,
        subject_record_id: row.get("subject_record_id")?,
        old_value: row.get("old_value")?,
        new_value: row.get("new_value")?,
        center_code: row.get("center_code")?,
        timestamp: row.get("timestamp")?,
    })
}

/// Loads the directory of centers.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_bootstrap_metadata(conn: &Connection) -> Result<BootstrapMetadata, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT center_id, code, name, district, state FROM centers ORDER BY center_id",
    )?;
    let rows = stmt.query_map([], center_row)?;

    let mut metadata: BootstrapMetadata = BootstrapMetadata::new();
    for row in rows {
        metadata.centers.push(row?.into_domain());
    }
    Ok(metadata)
}

/// Looks up a center by code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_center(conn: &Connection, code: &str) -> Result<Option<Center>, PersistenceError> {
    let row = conn
        .query_row(
            "SELECT center_id, code, name, district, state FROM centers WHERE code = ?1",
            params![code],
            center_row,
        )
        .optional()?;
    Ok(row.map(CenterRow::into_domain))
}

/// Looks up the center owning a machine.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_center_for_machine(
    conn: &Connection,
    machine_code: &str,
) -> Result<Option<Center>, PersistenceError> {
    let row = conn
        .query_row(
            "SELECT c.center_id, c.code, c.name, c.district, c.state
             FROM centers c
             JOIN machines m ON m.center_id = c.center_id
             WHERE m.machine_code = ?1",
            params![machine_code],
            center_row,
        )
        .optional()?;
    Ok(row.map(CenterRow::into_domain))
}

/// Reconstructs the scoped state for a center: its machine inventory and
/// full booking ledger.
///
/// # Errors
///
/// Returns an error if a query fails or a stored row fails to convert.
pub fn get_current_state(conn: &Connection, center: &Center) -> Result<State, PersistenceError> {
    let mut state: State = State::new(center.clone());

    let mut stmt =
        conn.prepare(&format!("{MACHINE_SELECT} WHERE c.code = ?1 ORDER BY m.machine_id"))?;
    let machines = stmt.query_map(params![center.code()], machine_row)?;
    for row in machines {
        state.machines.push(row?.into_domain()?);
    }

    let mut stmt =
        conn.prepare(&format!("{BOOKING_SELECT} WHERE c.code = ?1 ORDER BY b.booking_id"))?;
    let bookings = stmt.query_map(params![center.code()], booking_row)?;
    for row in bookings {
        state.bookings.push(row?.into_domain()?);
    }

    Ok(state)
}

/// Looks up a booking by reference, across all centers.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row fails to convert.
pub fn get_booking(
    conn: &Connection,
    booking_ref: &str,
) -> Result<Option<Booking>, PersistenceError> {
    let row = conn
        .query_row(
            &format!("{BOOKING_SELECT} WHERE b.booking_ref = ?1"),
            params![booking_ref],
            booking_row,
        )
        .optional()?;
    row.map(BookingRow::into_domain).transpose()
}

/// Loads all bookings referencing a machine.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row fails to convert.
pub fn get_bookings_for_machine(
    conn: &Connection,
    machine_code: &str,
) -> Result<Vec<Booking>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "{BOOKING_SELECT} WHERE m.machine_code = ?1 ORDER BY b.start_date"
    ))?;
    let rows = stmt.query_map(params![machine_code], booking_row)?;

    let mut bookings: Vec<Booking> = Vec::new();
    for row in rows {
        bookings.push(row?.into_domain()?);
    }
    Ok(bookings)
}

/// Loads a single machine by code.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row fails to convert.
pub fn get_machine(
    conn: &Connection,
    machine_code: &str,
) -> Result<Option<Machine>, PersistenceError> {
    let row = conn
        .query_row(
            &format!("{MACHINE_SELECT} WHERE m.machine_code = ?1"),
            params![machine_code],
            machine_row,
        )
        .optional()?;
    row.map(MachineRow::into_domain).transpose()
}

/// Loads the audit timeline for a center, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_audit_timeline(
    conn: &Connection,
    center_code: &str,
) -> Result<Vec<AuditEventRecord>, PersistenceError> {
    let mut stmt =
        conn.prepare(&format!("{AUDIT_SELECT} WHERE center_code = ?1 ORDER BY event_id"))?;
    let rows = stmt.query_map(params![center_code], audit_record)?;

    let mut events: Vec<AuditEventRecord> = Vec::new();
    for row in rows {
        events.push(row?);
    }
    Ok(events)
}

/// Loads a single audit event by ID.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no such event exists.
pub fn get_audit_event(
    conn: &Connection,
    event_id: i64,
) -> Result<AuditEventRecord, PersistenceError> {
    conn.query_row(
        &format!("{AUDIT_SELECT} WHERE event_id = ?1"),
        params![event_id],
        audit_record,
    )
    .optional()?
    .ok_or(PersistenceError::EventNotFound(event_id))
}
