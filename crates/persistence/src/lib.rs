// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the CHC Hire System.
//!
//! `SQLite`-backed storage for centers, machines, bookings, and the audit
//! log, built on rusqlite.
//!
//! ## Transactional discipline
//!
//! Every mutating operation runs in a single transaction: the audit append
//! and the canonical row changes commit together or not at all. Status
//! updates are predicated on the pre-transition status
//! (`WHERE ... AND status = ?`), so a transition computed against stale
//! state fails with `ConcurrentModification` instead of clobbering a newer
//! write. The availability checker's read set is loaded and the booking
//! insert committed under the same store borrow, closing the
//! check-then-act race on overlapping creations.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod data_models;
mod error;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::AuditEventRecord;
pub use error::PersistenceError;
pub use sqlite::{SqliteStore, initialize_schema};
