// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{BootstrapMetadata, BootstrapResult, State, TransitionResult};
use chc_hire_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot, Subject};
use chc_hire_domain::{
    Booking, BookingAction, BookingStatus, Center, DomainError, Machine, MachineSideEffect,
    MachineStatus, apply_action, check_availability, validate_booking_ref_unique,
    validate_center_code, validate_farmer_fields, validate_field_area, validate_machine_fields,
};

/// Applies a bootstrap command to the metadata, producing new metadata and
/// an audit event.
///
/// Bootstrap commands (`CreateCenter`) operate on the center directory.
///
/// # Errors
///
/// Returns an error if the command violates domain rules.
pub fn apply_bootstrap(
    metadata: &BootstrapMetadata,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<BootstrapResult, CoreError> {
    match command {
        Command::CreateCenter {
            code,
            name,
            district,
            state,
        } => {
            let center: Center = Center::new(&code, &name, &district, &state);
            validate_center_code(center.code())?;

            // Check for duplicate
            if metadata.has_center(&center) {
                return Err(CoreError::DomainViolation(DomainError::DuplicateCenter {
                    code: center.code().to_string(),
                }));
            }

            // Create new metadata with the center added
            let mut new_metadata: BootstrapMetadata = metadata.clone();
            new_metadata.add_center(center.clone());

            let before: StateSnapshot =
                StateSnapshot::new(format!("centers_count={}", metadata.centers.len()));
            let after: StateSnapshot =
                StateSnapshot::new(format!("centers_count={}", new_metadata.centers.len()));

            let action: Action = Action::new(
                String::from("CreateCenter"),
                Some(format!(
                    "Created center '{}' ({}, {})",
                    center.code(),
                    center.district(),
                    center.state()
                )),
            );

            let subject: Subject =
                Subject::new(String::from("centers"), center.code().to_string());
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                subject,
                Some(before),
                after,
                center.clone(),
            );

            Ok(BootstrapResult {
                new_metadata,
                audit_event,
                center,
            })
        }
        _ => {
            // Non-bootstrap commands should use apply() instead
            unreachable!("apply_bootstrap called with non-bootstrap command")
        }
    }
}

/// Applies a command to the current state, producing a new state and audit
/// event.
///
/// This is the single authority for booking transitions and their machine
/// side effects: a booking's status change and the machine synchronization
/// it carries happen in one transition, recorded by one audit event. The
/// inputs are never mutated; callers persist the returned state atomically
/// or discard it.
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules (illegal transition, overlap, guard)
/// - A referenced machine or booking does not exist in this center's state
#[allow(clippy::too_many_lines)]
pub fn apply(
    metadata: &BootstrapMetadata,
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    // The scoped center must exist in the directory
    if !metadata.has_center(&state.center) {
        return Err(CoreError::DomainViolation(DomainError::CenterNotFound {
            code: state.center.code().to_string(),
        }));
    }

    match command {
        Command::RegisterMachine {
            machine_code,
            machine_name,
            machine_type,
            purchase_year,
        } => {
            let machine: Machine = Machine::new(
                &machine_code,
                &machine_name,
                machine_type,
                purchase_year,
                state.center.clone(),
            );
            validate_machine_fields(&machine)?;

            if state.find_machine(&machine_code).is_some() {
                return Err(CoreError::DomainViolation(
                    DomainError::DuplicateMachineCode { machine_code },
                ));
            }

            let mut new_state: State = state.clone();
            new_state.machines.push(machine.clone());

            let action: Action = Action::new(
                String::from("RegisterMachine"),
                Some(format!(
                    "Registered {} '{}' at center {}",
                    machine.machine_type,
                    machine.machine_code,
                    state.center.code()
                )),
            );
            let subject: Subject =
                Subject::new(String::from("machines"), machine.machine_code.clone());
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                subject,
                None,
                machine_snapshot(&machine),
                state.center.clone(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::CreateBooking {
            booking_ref,
            machine_code,
            range,
            farmer,
            field_area,
            purpose,
        } => {
            // The machine must exist; its center is inherited onto the
            // booking, never taken from the caller.
            let Some(machine) = state.find_machine(&machine_code) else {
                return Err(CoreError::DomainViolation(DomainError::MachineNotFound {
                    machine_code,
                }));
            };

            validate_farmer_fields(&farmer)?;
            validate_field_area(field_area)?;

            // The availability read set is this state's ledger; the caller
            // commits the insert against the same snapshot.
            check_availability(&machine_code, &range, &state.bookings)?;
            validate_booking_ref_unique(&booking_ref, &state.bookings)?;

            let booking: Booking = Booking::new(
                booking_ref,
                machine.center.clone(),
                &machine_code,
                range,
                farmer,
                field_area,
                purpose,
            );

            let mut new_state: State = state.clone();
            new_state.bookings.push(booking.clone());

            let action: Action = Action::new(
                String::from("CreateBooking"),
                Some(format!(
                    "Booking '{}' for machine '{}' from {}",
                    booking.booking_ref, machine_code, booking.range
                )),
            );
            let subject: Subject = Subject::new(
                String::from("bookings"),
                booking.booking_ref.value().to_string(),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                subject,
                None,
                booking_snapshot(&booking),
                state.center.clone(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::BookingAction {
            booking_ref,
            action,
            notes,
        } => {
            let Some(booking) = state.find_booking(&booking_ref) else {
                return Err(CoreError::DomainViolation(DomainError::BookingNotFound {
                    booking_ref: booking_ref.value().to_string(),
                }));
            };

            // Empty notes count as absent
            let notes: Option<String> = notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
            if action.requires_reason() && notes.is_none() {
                return Err(CoreError::DomainViolation(DomainError::ReasonRequired {
                    action,
                }));
            }

            // Resolve against the transition table before touching anything
            let (next_status, side_effect) = apply_action(booking.status, action)?;

            let before: StateSnapshot = booking_snapshot(booking);
            let previous_status: BookingStatus = booking.status;

            let mut updated: Booking = booking.clone();
            updated.status = next_status;
            if matches!(action, BookingAction::Reject | BookingAction::Cancel) {
                updated.status_reason = notes.clone();
            }

            let mut new_state: State = state.clone();
            if let Some(slot) = new_state
                .bookings
                .iter_mut()
                .find(|b| b.booking_ref == booking_ref)
            {
                *slot = updated.clone();
            }

            // Machine synchronization is part of the same transition
            apply_machine_side_effect(&mut new_state, &updated.machine_code, side_effect)?;

            let audit_action: Action = Action::new(
                String::from(audit_action_name(action)),
                Some(format!(
                    "Booking '{}': {} -> {}",
                    updated.booking_ref, previous_status, updated.status
                )),
            );
            let subject: Subject = Subject::new(
                String::from("bookings"),
                updated.booking_ref.value().to_string(),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                audit_action,
                subject,
                Some(before),
                booking_snapshot(&updated),
                state.center.clone(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::SetMachineStatus {
            machine_code,
            new_status,
        } => {
            let Some(machine) = state.find_machine(&machine_code) else {
                return Err(CoreError::DomainViolation(DomainError::MachineNotFound {
                    machine_code,
                }));
            };

            let has_active_booking: bool = state.bookings.iter().any(|b| {
                b.machine_code == machine_code && b.status == BookingStatus::Active
            });

            // Guard the InUse-iff-Active invariant in both directions.
            // Maintenance and OutOfService are unconditionally allowed.
            match new_status {
                MachineStatus::Idle if has_active_booking => {
                    return Err(CoreError::DomainViolation(
                        DomainError::ConflictingActiveBooking { machine_code },
                    ));
                }
                MachineStatus::InUse if !has_active_booking => {
                    return Err(CoreError::DomainViolation(DomainError::NoActiveBooking {
                        machine_code,
                    }));
                }
                _ => {}
            }

            let before: StateSnapshot = machine_snapshot(machine);

            let mut new_state: State = state.clone();
            let Some(slot) = new_state
                .machines
                .iter_mut()
                .find(|m| m.machine_code == machine_code)
            else {
                return Err(CoreError::Internal(format!(
                    "machine '{machine_code}' vanished during status edit"
                )));
            };
            slot.status = new_status;
            let after: StateSnapshot = machine_snapshot(slot);

            let action: Action = Action::new(
                String::from("SetMachineStatus"),
                Some(format!(
                    "Machine '{machine_code}' status set to {new_status}"
                )),
            );
            let subject: Subject = Subject::new(String::from("machines"), machine_code);
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                subject,
                Some(before),
                after,
                state.center.clone(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::CreateCenter { .. } => {
            // Bootstrap commands should use apply_bootstrap() instead
            unreachable!("apply called with bootstrap command")
        }
    }
}

/// Applies a machine-status side effect carried by a booking transition.
fn apply_machine_side_effect(
    state: &mut State,
    machine_code: &str,
    side_effect: MachineSideEffect,
) -> Result<(), CoreError> {
    if side_effect == MachineSideEffect::None {
        return Ok(());
    }

    let Some(machine) = state
        .machines
        .iter_mut()
        .find(|m| m.machine_code == machine_code)
    else {
        return Err(CoreError::DomainViolation(DomainError::MachineNotFound {
            machine_code: machine_code.to_string(),
        }));
    };

    match side_effect {
        MachineSideEffect::SetInUse => machine.status = MachineStatus::InUse,
        // Release only an InUse machine: a machine pulled into Maintenance
        // or OutOfService mid-booking keeps that status.
        MachineSideEffect::SetIdle => {
            if machine.status == MachineStatus::InUse {
                machine.status = MachineStatus::Idle;
            }
        }
        MachineSideEffect::None => {}
    }
    Ok(())
}

/// Maps a booking action to its audit action name.
const fn audit_action_name(action: BookingAction) -> &'static str {
    match action {
        BookingAction::Approve => "ApproveBooking",
        BookingAction::Reject => "RejectBooking",
        BookingAction::Handover => "HandoverBooking",
        BookingAction::Complete => "CompleteBooking",
        BookingAction::Cancel => "CancelBooking",
    }
}

/// Snapshot of a booking for audit purposes.
fn booking_snapshot(booking: &Booking) -> StateSnapshot {
    StateSnapshot::new(format!(
        "booking_ref={},machine={},range={},status={}",
        booking.booking_ref, booking.machine_code, booking.range, booking.status
    ))
}

/// Snapshot of a machine for audit purposes.
fn machine_snapshot(machine: &Machine) -> StateSnapshot {
    StateSnapshot::new(format!(
        "machine_code={},status={}",
        machine.machine_code, machine.status
    ))
}
