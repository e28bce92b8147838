// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the compare-and-swap freshness check.

use super::helpers::{
    TEST_MACHINE, action_command, apply_and_persist, create_booking_command,
    register_machine_command, seeded_store, test_actor, test_cause,
};
use crate::PersistenceError;
use chc_hire::{State, TransitionResult, apply};
use chc_hire_domain::{BookingAction, BookingStatus};

/// Two transitions computed against the same read: the first commits, the
/// second must fail with `ConcurrentModification` instead of applying a
/// stale write.
#[test]
fn test_stale_booking_transition_is_rejected() {
    let (mut store, center) = seeded_store();
    apply_and_persist(&mut store, &center, register_machine_command());
    apply_and_persist(&mut store, &center, create_booking_command("A1B2C3", 1, 5));

    let metadata = store
        .get_bootstrap_metadata()
        .expect("metadata should load");
    let stale_state: State = store
        .get_current_state(&center)
        .expect("state should load");

    // Both "administrators" read the booking as Pending
    let first: TransitionResult = apply(
        &metadata,
        &stale_state,
        action_command("A1B2C3", BookingAction::Approve, None),
        test_actor(),
        test_cause(),
    )
    .expect("approve should apply");
    let second: TransitionResult = apply(
        &metadata,
        &stale_state,
        action_command("A1B2C3", BookingAction::Cancel, Some("Farmer withdrew")),
        test_actor(),
        test_cause(),
    )
    .expect("cancel should apply");

    // First write wins
    store
        .persist_transition(&stale_state, &first)
        .expect("first transition should persist");

    // Second write was computed against Pending, but the stored status is
    // now Approved
    let result = store.persist_transition(&stale_state, &second);
    assert_eq!(
        result,
        Err(PersistenceError::ConcurrentModification {
            record_id: String::from("BKG-A1B2C3"),
            expected: String::from("Pending"),
            actual: String::from("Approved"),
        })
    );

    // The rejected write left nothing behind: status is Approved, and no
    // cancel audit event was recorded
    let booking = store
        .get_booking("BKG-A1B2C3")
        .expect("query should succeed")
        .expect("booking should exist");
    assert_eq!(booking.status, BookingStatus::Approved);
    assert_eq!(booking.status_reason, None);

    let timeline = store
        .get_audit_timeline("LUD")
        .expect("timeline should load");
    assert!(
        timeline
            .iter()
            .all(|event| event.action_name != "CancelBooking")
    );
}

/// A failed persist is atomic: the audit event inserted before the CAS
/// check fired must not survive the rolled-back transaction.
#[test]
fn test_rejected_transition_rolls_back_audit_event() {
    let (mut store, center) = seeded_store();
    apply_and_persist(&mut store, &center, register_machine_command());
    apply_and_persist(&mut store, &center, create_booking_command("A1B2C3", 1, 5));

    let metadata = store
        .get_bootstrap_metadata()
        .expect("metadata should load");
    let stale_state: State = store
        .get_current_state(&center)
        .expect("state should load");

    let first: TransitionResult = apply(
        &metadata,
        &stale_state,
        action_command("A1B2C3", BookingAction::Approve, None),
        test_actor(),
        test_cause(),
    )
    .expect("approve should apply");
    let second: TransitionResult = apply(
        &metadata,
        &stale_state,
        action_command("A1B2C3", BookingAction::Reject, Some("duplicate request")),
        test_actor(),
        test_cause(),
    )
    .expect("reject should apply");

    store
        .persist_transition(&stale_state, &first)
        .expect("first transition should persist");
    let events_before: usize = store
        .get_audit_timeline("LUD")
        .expect("timeline should load")
        .len();

    assert!(store.persist_transition(&stale_state, &second).is_err());

    let events_after: usize = store
        .get_audit_timeline("LUD")
        .expect("timeline should load")
        .len();
    assert_eq!(events_before, events_after);
}

/// Two creations racing for overlapping dates: the second insert is
/// recomputed against the committed ledger and fails the availability
/// check before any write happens.
#[test]
fn test_overlapping_creations_do_not_both_commit() {
    let (mut store, center) = seeded_store();
    apply_and_persist(&mut store, &center, register_machine_command());

    let metadata = store
        .get_bootstrap_metadata()
        .expect("metadata should load");

    // First creation commits
    let state: State = store
        .get_current_state(&center)
        .expect("state should load");
    let first: TransitionResult = apply(
        &metadata,
        &state,
        create_booking_command("A1B2C3", 1, 5),
        test_actor(),
        test_cause(),
    )
    .expect("first creation should apply");
    store
        .persist_transition(&state, &first)
        .expect("first creation should persist");

    // Second creation re-reads the ledger (same store borrow that will
    // commit it) and sees the conflict
    let state: State = store
        .get_current_state(&center)
        .expect("state should load");
    let second = apply(
        &metadata,
        &state,
        create_booking_command("D4E5F6", 4, 6),
        test_actor(),
        test_cause(),
    );
    assert!(second.is_err());

    let active_and_pending: usize = store
        .get_booked_ranges(TEST_MACHINE)
        .expect("query should succeed")
        .len();
    assert_eq!(active_and_pending, 1);
}

/// A stale machine-status edit races a handover: the handover commits
/// first, the stale direct edit must not clobber In Use back to Idle.
#[test]
fn test_stale_machine_status_edit_is_rejected() {
    let (mut store, center) = seeded_store();
    apply_and_persist(&mut store, &center, register_machine_command());
    apply_and_persist(&mut store, &center, create_booking_command("A1B2C3", 1, 5));
    apply_and_persist(
        &mut store,
        &center,
        action_command("A1B2C3", BookingAction::Approve, None),
    );

    let metadata = store
        .get_bootstrap_metadata()
        .expect("metadata should load");
    let stale_state: State = store
        .get_current_state(&center)
        .expect("state should load");

    // Handover computed and committed
    let handover: TransitionResult = apply(
        &metadata,
        &stale_state,
        action_command("A1B2C3", BookingAction::Handover, None),
        test_actor(),
        test_cause(),
    )
    .expect("handover should apply");

    // Direct edit to Maintenance computed against the same stale read
    let edit: TransitionResult = apply(
        &metadata,
        &stale_state,
        chc_hire::Command::SetMachineStatus {
            machine_code: String::from(TEST_MACHINE),
            new_status: chc_hire_domain::MachineStatus::Maintenance,
        },
        test_actor(),
        test_cause(),
    )
    .expect("edit should apply against the stale read");

    store
        .persist_transition(&stale_state, &handover)
        .expect("handover should persist");

    let result = store.persist_transition(&stale_state, &edit);
    assert!(matches!(
        result,
        Err(PersistenceError::ConcurrentModification { .. })
    ));
}
