// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod persistence;
mod queries;
mod schema;
mod store;

pub use persistence::{persist_audit_event, persist_bootstrap, persist_transition};
pub use queries::{
    get_audit_event, get_audit_timeline, get_booking, get_bookings_for_machine,
    get_bootstrap_metadata, get_center, get_center_for_machine, get_current_state, get_machine,
};
pub use schema::initialize_schema;
pub use store::SqliteStore;
