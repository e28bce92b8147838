// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::SqliteStore;
use chc_hire::{BootstrapMetadata, Command, State, TransitionResult, apply, apply_bootstrap};
use chc_hire_audit::{Actor, Cause};
use chc_hire_domain::{
    BookingAction, BookingRef, Center, DateRange, FarmerDetails, MachineType,
};
use time::{Date, Month};

pub const TEST_MACHINE: &str = "LUD-HAP-1";

pub fn test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("center_admin"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn date(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::March, day).expect("valid test date")
}

pub fn range(start_day: u8, end_day: u8) -> DateRange {
    DateRange::new(date(start_day), date(end_day)).expect("valid test range")
}

pub fn test_farmer() -> FarmerDetails {
    FarmerDetails {
        name: String::from("Lifecycle Tester"),
        contact: String::from("9998887776"),
        email: String::from("tester@example.com"),
        aadhaar: String::from("123412341234"),
    }
}

pub fn booking_ref(suffix: &str) -> BookingRef {
    BookingRef::parse(&format!("BKG-{suffix}")).expect("valid test reference")
}

/// An in-memory store with one persisted center.
pub fn seeded_store() -> (SqliteStore, Center) {
    let mut store: SqliteStore =
        SqliteStore::new_in_memory().expect("in-memory store should open");

    let result = apply_bootstrap(
        &BootstrapMetadata::new(),
        Command::CreateCenter {
            code: String::from("LUD"),
            name: String::from("Ludhiana CHC"),
            district: String::from("Ludhiana"),
            state: String::from("Punjab"),
        },
        test_actor(),
        test_cause(),
    )
    .expect("center should be created");

    let (_event_id, center) = store
        .persist_bootstrap(&result)
        .expect("center should persist");

    (store, center)
}

/// Loads state, applies a command, and persists the transition.
pub fn apply_and_persist(store: &mut SqliteStore, center: &Center, command: Command) -> i64 {
    let metadata: BootstrapMetadata = store
        .get_bootstrap_metadata()
        .expect("metadata should load");
    let state: State = store
        .get_current_state(center)
        .expect("state should load");
    let result: TransitionResult = apply(&metadata, &state, command, test_actor(), test_cause())
        .expect("command should apply");
    store
        .persist_transition(&state, &result)
        .expect("transition should persist")
}

pub fn register_machine_command() -> Command {
    Command::RegisterMachine {
        machine_code: String::from(TEST_MACHINE),
        machine_name: String::from("Happy Seeder 9ft"),
        machine_type: MachineType::HappySeeder,
        purchase_year: 2023,
    }
}

pub fn create_booking_command(suffix: &str, start_day: u8, end_day: u8) -> Command {
    Command::CreateBooking {
        booking_ref: booking_ref(suffix),
        machine_code: String::from(TEST_MACHINE),
        range: range(start_day, end_day),
        farmer: test_farmer(),
        field_area: Some(2.5),
        purpose: Some(String::from("Paddy stubble management")),
    }
}

pub fn action_command(suffix: &str, action: BookingAction, notes: Option<&str>) -> Command {
    Command::BookingAction {
        booking_ref: booking_ref(suffix),
        action,
        notes: notes.map(String::from),
    }
}
