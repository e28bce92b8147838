// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for lifecycle enforcement at the API boundary.

use super::helpers::{
    TEST_MACHINE, booked_state, center_admin, state_with_machine, test_cause, test_metadata,
};
use crate::{
    ApiError, BookingActionRequest, SetMachineStatusRequest, booking_action, set_machine_status,
};
use chc_hire::State;

fn act(
    state: &State,
    booking_ref: &str,
    request: BookingActionRequest,
) -> Result<crate::ApiResult<crate::BookingResponse>, ApiError> {
    booking_action(
        &test_metadata(),
        state,
        booking_ref,
        request,
        None,
        &center_admin(),
        test_cause(),
    )
}

#[test]
fn test_lifecycle_through_the_api() {
    let state: State = state_with_machine();
    let (state, booking_ref) = booked_state(&state, "2026-03-01", "2026-03-05");

    let approved = act(&state, &booking_ref, BookingActionRequest::Approve)
        .expect("approve should succeed");
    assert_eq!(approved.response.status, "Approved");

    let premature = act(
        &approved.new_state,
        &booking_ref,
        BookingActionRequest::Complete,
    );
    match premature.expect_err("complete from Approved must fail") {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "booking_lifecycle");
            assert!(message.contains("complete"));
            assert!(message.contains("Approved"));
        }
        other => panic!("expected DomainRuleViolation, got {other:?}"),
    }

    let active = act(
        &approved.new_state,
        &booking_ref,
        BookingActionRequest::Handover,
    )
    .expect("handover should succeed");
    assert_eq!(active.response.status, "Active");
    let machine = active
        .new_state
        .find_machine(TEST_MACHINE)
        .expect("machine should exist");
    assert_eq!(machine.status.as_str(), "In Use");

    let completed = act(
        &active.new_state,
        &booking_ref,
        BookingActionRequest::Complete,
    )
    .expect("complete should succeed");
    assert_eq!(completed.response.status, "Completed");
    let machine = completed
        .new_state
        .find_machine(TEST_MACHINE)
        .expect("machine should exist");
    assert_eq!(machine.status.as_str(), "Idle");
}

#[test]
fn test_stale_expected_status_is_conflict() {
    let state: State = state_with_machine();
    let (state, booking_ref) = booked_state(&state, "2026-03-01", "2026-03-05");

    let approved = act(&state, &booking_ref, BookingActionRequest::Approve)
        .expect("approve should succeed");

    // A second administrator still sees Pending and tries to reject
    let stale = booking_action(
        &test_metadata(),
        &approved.new_state,
        &booking_ref,
        BookingActionRequest::Reject {
            notes: String::from("duplicate request"),
        },
        Some(String::from("Pending")),
        &center_admin(),
        test_cause(),
    );

    match stale.expect_err("stale expected status must fail") {
        ApiError::Conflict { rule, message } => {
            assert_eq!(rule, "concurrent_modification");
            assert!(message.contains("Approved"));
            assert!(message.contains("Pending"));
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[test]
fn test_matching_expected_status_passes() {
    let state: State = state_with_machine();
    let (state, booking_ref) = booked_state(&state, "2026-03-01", "2026-03-05");

    let result = booking_action(
        &test_metadata(),
        &state,
        &booking_ref,
        BookingActionRequest::Approve,
        Some(String::from("Pending")),
        &center_admin(),
        test_cause(),
    );
    assert!(result.is_ok());
}

#[test]
fn test_reject_with_blank_notes_is_invalid_input() {
    let state: State = state_with_machine();
    let (state, booking_ref) = booked_state(&state, "2026-03-01", "2026-03-05");

    let result = act(
        &state,
        &booking_ref,
        BookingActionRequest::Reject {
            notes: String::from("   "),
        },
    );
    let err = result.expect_err("blank reject notes must fail");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "notes"));
}

#[test]
fn test_reject_stores_reason_in_response() {
    let state: State = state_with_machine();
    let (state, booking_ref) = booked_state(&state, "2026-03-01", "2026-03-05");

    let rejected = act(
        &state,
        &booking_ref,
        BookingActionRequest::Reject {
            notes: String::from("Machine due for servicing"),
        },
    )
    .expect("reject should succeed");

    assert_eq!(rejected.response.status, "Rejected");
    assert_eq!(
        rejected.response.status_reason.as_deref(),
        Some("Machine due for servicing")
    );
}

#[test]
fn test_unknown_booking_is_not_found() {
    let state: State = state_with_machine();

    let result = act(&state, "BKG-ZZZZZZ", BookingActionRequest::Approve);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_malformed_reference_is_invalid_input() {
    let state: State = state_with_machine();

    let result = act(&state, "not-a-reference", BookingActionRequest::Approve);
    let err = result.expect_err("malformed reference must fail");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "booking_ref"));
}

#[test]
fn test_direct_idle_edit_guard_through_the_api() {
    let state: State = state_with_machine();
    let (state, booking_ref) = booked_state(&state, "2026-03-01", "2026-03-05");

    let approved = act(&state, &booking_ref, BookingActionRequest::Approve)
        .expect("approve should succeed");
    let active = act(
        &approved.new_state,
        &booking_ref,
        BookingActionRequest::Handover,
    )
    .expect("handover should succeed");

    let result = set_machine_status(
        &test_metadata(),
        &active.new_state,
        TEST_MACHINE,
        &SetMachineStatusRequest {
            status: String::from("Idle"),
        },
        &center_admin(),
        test_cause(),
    );

    match result.expect_err("idle edit must be blocked") {
        ApiError::Conflict { rule, .. } => {
            assert_eq!(rule, "conflicting_active_booking");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }

    // Maintenance stays unconditionally allowed
    let maintenance = set_machine_status(
        &test_metadata(),
        &active.new_state,
        TEST_MACHINE,
        &SetMachineStatusRequest {
            status: String::from("Maintenance"),
        },
        &center_admin(),
        test_cause(),
    );
    assert!(maintenance.is_ok());
}
