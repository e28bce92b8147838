// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// # Errors
///
/// Returns an error if schema creation fails or foreign key enforcement
/// cannot be enabled.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute_batch("PRAGMA foreign_keys = ON")?;
    let enabled: i64 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
    if enabled != 1 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS centers (
            center_id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            district TEXT NOT NULL,
            state TEXT NOT NULL,
            registered_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS machines (
            machine_id INTEGER PRIMARY KEY AUTOINCREMENT,
            machine_code TEXT NOT NULL UNIQUE,
            machine_name TEXT NOT NULL,
            machine_type TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Idle'
                CHECK(status IN ('Idle', 'In Use', 'Maintenance', 'Out of Service')),
            purchase_year INTEGER NOT NULL,
            total_hours_used REAL NOT NULL DEFAULT 0 CHECK(total_hours_used >= 0),
            center_id INTEGER NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(center_id) REFERENCES centers(center_id)
        );

        CREATE INDEX IF NOT EXISTS idx_machines_center
            ON machines(center_id);

        CREATE TABLE IF NOT EXISTS bookings (
            booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
            booking_ref TEXT NOT NULL UNIQUE,
            center_id INTEGER NOT NULL,
            machine_id INTEGER NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Pending'
                CHECK(status IN ('Pending', 'Approved', 'Rejected', 'Active', 'Completed', 'Cancelled')),
            farmer_name TEXT NOT NULL,
            farmer_contact TEXT NOT NULL,
            farmer_email TEXT NOT NULL,
            farmer_aadhaar TEXT NOT NULL,
            field_area REAL,
            purpose TEXT,
            status_reason TEXT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(center_id) REFERENCES centers(center_id),
            FOREIGN KEY(machine_id) REFERENCES machines(machine_id)
        );

        CREATE INDEX IF NOT EXISTS idx_bookings_machine_status
            ON bookings(machine_id, status);

        CREATE INDEX IF NOT EXISTS idx_bookings_center
            ON bookings(center_id);

        CREATE TABLE IF NOT EXISTS audit_log (
            event_id INTEGER PRIMARY KEY AUTOINCREMENT,
            actor_id TEXT,
            actor_type TEXT,
            cause_id TEXT NOT NULL,
            cause_description TEXT NOT NULL,
            action_name TEXT NOT NULL,
            action_details TEXT,
            subject_table TEXT NOT NULL,
            subject_record_id TEXT NOT NULL,
            old_value TEXT,
            new_value TEXT NOT NULL,
            center_code TEXT NOT NULL,
            timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_audit_center
            ON audit_log(center_code);

        CREATE INDEX IF NOT EXISTS idx_audit_subject
            ON audit_log(subject_table, subject_record_id);
        ",
    )?;

    Ok(())
}
