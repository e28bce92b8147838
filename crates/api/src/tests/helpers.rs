// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{ApiResult, AuthenticatedActor, BookingResponse, CreateBookingRequest, create_booking};
use chc_hire::{BootstrapMetadata, State};
use chc_hire_audit::Cause;
use chc_hire_domain::{Center, Machine, MachineType};

pub const TEST_MACHINE: &str = "LUD-HAP-1";

pub fn center_admin() -> AuthenticatedActor {
    AuthenticatedActor::new_center_admin(String::from("admin-123"), "LUD")
}

pub fn other_center_admin() -> AuthenticatedActor {
    AuthenticatedActor::new_center_admin(String::from("admin-456"), "PAT")
}

pub fn govt_admin() -> AuthenticatedActor {
    AuthenticatedActor::new_govt_admin(String::from("govt-789"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn test_center() -> Center {
    Center::new("LUD", "Ludhiana CHC", "Ludhiana", "Punjab")
}

pub fn test_metadata() -> BootstrapMetadata {
    let mut metadata: BootstrapMetadata = BootstrapMetadata::new();
    metadata.centers.push(test_center());
    metadata
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

pub fn create_request(start_date: &str, end_date: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        machine_code: String::from(TEST_MACHINE),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        farmer_name: String::from("Lifecycle Tester"),
        farmer_contact: String::from("9998887776"),
        farmer_email: String::from("tester@example.com"),
        farmer_aadhaar: String::from("123412341234"),
        purpose: Some(String::from("Paddy stubble management")),
        field_area: Some(2.5),
    }
}

/// Creates a booking through the public API, returning the new state and
/// the created booking's reference.
pub fn booked_state(state: &State, start_date: &str, end_date: &str) -> (State, String) {
    let result: ApiResult<BookingResponse> = create_booking(
        &test_metadata(),
        state,
        create_request(start_date, end_date),
        test_cause(),
    )
    .expect("booking should be created");
    (result.new_state, result.response.booking_ref)
}
