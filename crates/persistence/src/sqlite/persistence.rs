// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side persistence: audit append and canonical table sync.
//!
//! Every mutating operation runs inside a caller-owned transaction: the
//! audit row and the canonical row changes commit together or not at all.
//! Status updates are predicated on the pre-transition status, so a
//! transition computed against stale state fails with
//! `ConcurrentModification` instead of clobbering a newer write.

use rusqlite::{Transaction, params};
use tracing::{debug, info};

use crate::data_models::format_date;
use crate::error::PersistenceError;
use chc_hire::{BootstrapResult, State, TransitionResult};
use chc_hire_audit::AuditEvent;
use chc_hire_domain::{Booking, Center, Machine};

/// Persists an audit event.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn persist_audit_event(
    tx: &Transaction<'_>,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    tx.execute(
        "INSERT INTO audit_log (actor_id, actor_type, cause_id, cause_description,
                                action_name, action_details, subject_table, subject_record_id,
                                old_value, new_value, center_code)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            event.actor.id,
            event.actor.actor_type,
            event.cause.id,
            event.cause.description,
            event.action.name,
            event.action.details,
            event.subject.table,
            event.subject.record_id,
            event.before.as_ref().map(|s| s.data.clone()),
            event.after.data,
            event.center.code(),
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

/// Persists a bootstrap result: the center row plus its audit event.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn persist_bootstrap(
    tx: &Transaction<'_>,
    result: &BootstrapResult,
) -> Result<(i64, Center), PersistenceError> {
    let center: &Center = &result.center;
    tx.execute(
        "INSERT INTO centers (code, name, district, state) VALUES (?1, ?2, ?3, ?4)",
        params![
            center.code(),
            center.name(),
            center.district(),
            center.state()
        ],
    )?;
    let center_id: i64 = tx.last_insert_rowid();

    let event_id: i64 = persist_audit_event(tx, &result.audit_event)?;
    debug!(event_id, center = center.code(), "Persisted center bootstrap");

    Ok((
        event_id,
        Center::with_id(
            center_id,
            center.code(),
            center.name(),
            center.district(),
            center.state(),
        ),
    ))
}

/// Persists a transition result: the audit event plus the canonical row
/// changes between `previous` and the transition's new state.
///
/// # Arguments
///
/// * `tx` - The active database transaction
/// * `previous` - The state the transition was computed against
/// * `result` - The transition result to persist
///
/// # Returns
///
/// The event ID assigned to the persisted audit event.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if a status update
/// finds the stored status no longer matches the pre-transition status, or
/// any other persistence error.
pub fn persist_transition(
    tx: &Transaction<'_>,
    previous: &State,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    let event_id: i64 = persist_audit_event(tx, &result.audit_event)?;
    debug!(event_id, "Persisted audit event");

    sync_machines_tx(tx, previous, &result.new_state)?;
    sync_bookings_tx(tx, previous, &result.new_state)?;

    info!(
        event_id,
        center = result.new_state.center.code(),
        action = %result.audit_event.action.name,
        "Persisted transition"
    );

    Ok(event_id)
}

/// Inserts machines new to the state and applies status changes.
fn sync_machines_tx(
    tx: &Transaction<'_>,
    previous: &State,
    new_state: &State,
) -> Result<(), PersistenceError> {
    for machine in &new_state.machines {
        match previous
            .machines
            .iter()
            .find(|m| m.machine_code == machine.machine_code)
        {
            None => {
                insert_machine_tx(tx, machine)?;
                debug!(machine_code = %machine.machine_code, "Inserted machine");
            }
            Some(old) if old.status != machine.status => {
                let changed: usize = tx.execute(
                    "UPDATE machines
                     SET status = ?1, updated_at = CURRENT_TIMESTAMP
                     WHERE machine_code = ?2 AND status = ?3",
                    params![
                        machine.status.as_str(),
                        machine.machine_code,
                        old.status.as_str()
                    ],
                )?;
                if changed == 0 {
                    let actual: String = stored_machine_status(tx, &machine.machine_code)?;
                    return Err(PersistenceError::ConcurrentModification {
                        record_id: machine.machine_code.clone(),
                        expected: old.status.as_str().to_string(),
                        actual,
                    });
                }
                debug!(
                    machine_code = %machine.machine_code,
                    status = machine.status.as_str(),
                    "Updated machine status"
                );
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Inserts bookings new to the ledger and applies status changes.
fn sync_bookings_tx(
    tx: &Transaction<'_>,
    previous: &State,
    new_state: &State,
) -> Result<(), PersistenceError> {
    for booking in &new_state.bookings {
        match previous
            .bookings
            .iter()
            .find(|b| b.booking_ref == booking.booking_ref)
        {
            None => {
                insert_booking_tx(tx, booking)?;
                debug!(booking_ref = %booking.booking_ref, "Inserted booking");
            }
            Some(old)
                if old.status != booking.status || old.status_reason != booking.status_reason =>
            {
                let changed: usize = tx.execute(
                    "UPDATE bookings
                     SET status = ?1, status_reason = ?2, updated_at = CURRENT_TIMESTAMP
                     WHERE booking_ref = ?3 AND status = ?4",
                    params![
                        booking.status.as_str(),
                        booking.status_reason,
                        booking.booking_ref.value(),
                        old.status.as_str()
                    ],
                )?;
                if changed == 0 {
                    let actual: String = stored_booking_status(tx, booking.booking_ref.value())?;
                    return Err(PersistenceError::ConcurrentModification {
                        record_id: booking.booking_ref.value().to_string(),
                        expected: old.status.as_str().to_string(),
                        actual,
                    });
                }
                debug!(
                    booking_ref = %booking.booking_ref,
                    status = booking.status.as_str(),
                    "Updated booking status"
                );
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn insert_machine_tx(tx: &Transaction<'_>, machine: &Machine) -> Result<(), PersistenceError> {
    tx.execute(
        "INSERT INTO machines (machine_code, machine_name, machine_type, status,
                               purchase_year, total_hours_used, center_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6,
                 (SELECT center_id FROM centers WHERE code = ?7))",
        params![
            machine.machine_code,
            machine.machine_name,
            machine.machine_type.as_str(),
            machine.status.as_str(),
            machine.purchase_year,
            machine.total_hours_used,
            machine.center.code(),
        ],
    )?;
    Ok(())
}

fn insert_booking_tx(tx: &Transaction<'_>, booking: &Booking) -> Result<(), PersistenceError> {
    tx.execute(
        "INSERT INTO bookings (booking_ref, center_id, machine_id, start_date, end_date,
                               status, farmer_name, farmer_contact, farmer_email,
                               farmer_aadhaar, field_area, purpose, status_reason)
         VALUES (?1,
                 (SELECT center_id FROM centers WHERE code = ?2),
                 (SELECT machine_id FROM machines WHERE machine_code = ?3),
                 ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            booking.booking_ref.value(),
            booking.center.code(),
            booking.machine_code,
            format_date(booking.range.start())?,
            format_date(booking.range.end())?,
            booking.status.as_str(),
            booking.farmer.name,
            booking.farmer.contact,
            booking.farmer.email,
            booking.farmer.aadhaar,
            booking.field_area,
            booking.purpose,
            booking.status_reason,
        ],
    )?;
    Ok(())
}

fn stored_booking_status(
    tx: &Transaction<'_>,
    booking_ref: &str,
) -> Result<String, PersistenceError> {
    Ok(tx.query_row(
        "SELECT status FROM bookings WHERE booking_ref = ?1",
        params![booking_ref],
        |row| row.get(0),
    )?)
}

fn stored_machine_status(
    tx: &Transaction<'_>,
    machine_code: &str,
) -> Result<String, PersistenceError> {
    Ok(tx.query_row(
        "SELECT status FROM machines WHERE machine_code = ?1",
        params![machine_code],
        |row| row.get(0),
    )?)
}
