// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::data_models::AuditEventRecord;
use crate::error::PersistenceError;
use crate::sqlite::persistence::{persist_bootstrap, persist_transition};
use crate::sqlite::queries;
use crate::sqlite::schema::initialize_schema;
use chc_hire::{BootstrapMetadata, BootstrapResult, State, TransitionResult};
use chc_hire_domain::{Booking, Center, DateRange, Machine, booked_ranges};

/// SQLite-backed storage for the center network.
///
/// All mutating operations run in a single transaction: the audit append
/// and the canonical row changes commit together or not at all.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a store backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema initialization fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        initialize_schema(&conn)?;
        info!("Opened in-memory database");
        Ok(Self { conn })
    }

    /// Creates a store backed by a database file, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema initialization fails.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        initialize_schema(&conn)?;
        info!(path, "Opened database file");
        Ok(Self { conn })
    }

    /// Persists a center bootstrap result.
    ///
    /// # Returns
    ///
    /// The audit event ID and the center with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is written on failure.
    pub fn persist_bootstrap(
        &mut self,
        result: &BootstrapResult,
    ) -> Result<(i64, Center), PersistenceError> {
        let tx = self.conn.transaction()?;
        let out: (i64, Center) = persist_bootstrap(&tx, result)?;
        tx.commit()?;
        Ok(out)
    }

    /// Persists a transition result computed against `previous`.
    ///
    /// # Returns
    ///
    /// The audit event ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConcurrentModification` if the stored
    /// status diverged from `previous` since it was read; nothing is
    /// written on failure.
    pub fn persist_transition(
        &mut self,
        previous: &State,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        let tx = self.conn.transaction()?;
        let event_id: i64 = persist_transition(&tx, previous, result)?;
        tx.commit()?;
        Ok(event_id)
    }

    /// Loads the directory of centers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_bootstrap_metadata(&self) -> Result<BootstrapMetadata, PersistenceError> {
        queries::get_bootstrap_metadata(&self.conn)
    }

    /// Looks up a center by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_center(&self, code: &str) -> Result<Option<Center>, PersistenceError> {
        queries::get_center(&self.conn, code)
    }

    /// Looks up the center owning a machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_center_for_machine(
        &self,
        machine_code: &str,
    ) -> Result<Option<Center>, PersistenceError> {
        queries::get_center_for_machine(&self.conn, machine_code)
    }

    /// Reconstructs the scoped state for a center.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row fails to convert.
    pub fn get_current_state(&self, center: &Center) -> Result<State, PersistenceError> {
        queries::get_current_state(&self.conn, center)
    }

    /// Looks up a booking by reference, across all centers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row fails to
    /// convert.
    pub fn get_booking(&self, booking_ref: &str) -> Result<Option<Booking>, PersistenceError> {
        queries::get_booking(&self.conn, booking_ref)
    }

    /// Looks up a machine by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row fails to
    /// convert.
    pub fn get_machine(&self, machine_code: &str) -> Result<Option<Machine>, PersistenceError> {
        queries::get_machine(&self.conn, machine_code)
    }

    /// Returns the booked date ranges for a machine: every non-terminal
    /// booking's range, sorted by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row fails to
    /// convert.
    pub fn get_booked_ranges(
        &self,
        machine_code: &str,
    ) -> Result<Vec<DateRange>, PersistenceError> {
        let bookings: Vec<Booking> =
            queries::get_bookings_for_machine(&self.conn, machine_code)?;
        Ok(booked_ranges(machine_code, &bookings))
    }

    /// Loads the audit timeline for a center, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &self,
        center_code: &str,
    ) -> Result<Vec<AuditEventRecord>, PersistenceError> {
        queries::get_audit_timeline(&self.conn, center_code)
    }

    /// Loads a single audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if no such event exists.
    pub fn get_audit_event(&self, event_id: i64) -> Result<AuditEventRecord, PersistenceError> {
        queries::get_audit_event(&self.conn, event_id)
    }
}
