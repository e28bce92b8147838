// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The stored status no longer matches the status the transition was
    /// computed against: another writer got there first.
    ConcurrentModification {
        /// The record whose update was rejected.
        record_id: String,
        /// The status the transition expected.
        expected: String,
        /// The status found in storage.
        actual: String,
    },
    /// The requested center was not found.
    CenterNotFound(String),
    /// The requested machine was not found.
    MachineNotFound(String),
    /// The requested booking was not found.
    BookingNotFound(String),
    /// The requested audit event was not found.
    EventNotFound(i64),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::QueryFailed(msg) => write!(f, "Query execution failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ConcurrentModification {
                record_id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Concurrent modification of '{record_id}': expected status '{expected}', found '{actual}'"
                )
            }
            Self::CenterNotFound(code) => write!(f, "Center '{code}' not found"),
            Self::MachineNotFound(code) => write!(f, "Machine '{code}' not found"),
            Self::BookingNotFound(booking_ref) => {
                write!(f, "Booking '{booking_ref}' not found")
            }
            Self::EventNotFound(event_id) => write!(f, "Audit event {event_id} not found"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}
