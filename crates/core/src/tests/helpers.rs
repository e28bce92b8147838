// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{BootstrapMetadata, Command, State, TransitionResult, apply};
use chc_hire_audit::{Actor, Cause};
use chc_hire_domain::{
    BookingRef, Center, DateRange, FarmerDetails, Machine, MachineType,
};
use time::{Date, Month};

pub const TEST_MACHINE: &str = "LUD-HAP-1";

pub fn test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("center_admin"))
}

pub fn public_actor() -> Actor {
    Actor::new(String::from("public"), String::from("public"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn test_center() -> Center {
    Center::new("LUD", "Ludhiana CHC", "Ludhiana", "Punjab")
}

pub fn test_metadata() -> BootstrapMetadata {
    let mut metadata: BootstrapMetadata = BootstrapMetadata::new();
    metadata.centers.push(test_center());
    metadata
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

/// A state holding one Idle Happy Seeder and an empty ledger.
pub fn state_with_machine() -> State {
    let mut state: State = State::new(test_center());
    state.machines.push(Machine::new(
        TEST_MACHINE,
        "Happy Seeder 9ft",
        MachineType::HappySeeder,
        2023,
        test_center(),
    ));
    state
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

/// Applies a command, panicking on failure. For building up test states.
pub fn apply_ok(state: &State, command: Command) -> State {
    let result: TransitionResult = apply(
        &test_metadata(),
        state,
        command,
        test_actor(),
        test_cause(),
    )
    .expect("test command should apply");
    result.new_state
}

/// A state with one machine and one Pending booking [Mar 1, Mar 5].
pub fn state_with_pending_booking() -> State {
    apply_ok(&state_with_machine(), create_booking_command("A1B2C3", 1, 5))
}
