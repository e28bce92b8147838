// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status tracking and the action transition table.
//!
//! Status transitions are administrator-initiated only; the system never
//! advances a booking based on time alone. The legal transitions form an
//! explicit table in [`apply_action`] so that illegal combinations are
//! rejected exhaustively rather than case by case.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Booking status states tracking a reservation through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Submitted by a farmer, awaiting administrative review.
    Pending,
    /// Accepted by a center administrator, not yet handed over.
    Approved,
    /// Declined by a center administrator (terminal).
    Rejected,
    /// Machine handed over and currently in the farmer's use.
    Active,
    /// Machine returned, booking closed (terminal).
    Completed,
    /// Withdrawn from any non-terminal state (terminal).
    Cancelled,
}

impl BookingStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            "Active" => Ok(Self::Active),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBookingStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (no further transition is possible).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    /// Returns true if this booking still occupies the machine's availability
    /// calendar (Pending, Approved, or Active).
    #[must_use]
    pub const fn occupies_calendar(&self) -> bool {
        !self.is_terminal()
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Administrative actions that drive the booking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    /// Accept a pending booking.
    Approve,
    /// Decline a pending booking. Requires a reason.
    Reject,
    /// Hand the machine over to the farmer.
    Handover,
    /// Mark the machine as returned.
    Complete,
    /// Withdraw a booking from any non-terminal state.
    Cancel,
}

impl BookingAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Handover => "handover",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }

    /// Parses an action from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "handover" => Ok(Self::Handover),
            "complete" => Ok(Self::Complete),
            "cancel" => Ok(Self::Cancel),
            _ => Err(DomainError::InvalidBookingAction(s.to_string())),
        }
    }

    /// Returns true if this action requires a non-empty reason.
    #[must_use]
    pub const fn requires_reason(&self) -> bool {
        matches!(self, Self::Reject)
    }
}

impl FromStr for BookingAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The machine-status synchronization an action carries with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineSideEffect {
    /// The machine's status is untouched.
    None,
    /// The machine enters use (handover).
    SetInUse,
    /// The machine is released (completion, or cancellation while active).
    SetIdle,
}

/// Resolves an action against the transition table.
///
/// Returns the next status and the machine-status side effect the action
/// carries. Every `(status, action)` pair not listed in the table is an
/// illegal transition; terminal states have no outgoing edges.
///
/// # Errors
///
/// Returns `DomainError::IllegalTransition` if the action is not legal from
/// the current status.
pub const fn apply_action(
    current: BookingStatus,
    action: BookingAction,
) -> Result<(BookingStatus, MachineSideEffect), DomainError> {
    match (current, action) {
        (BookingStatus::Pending, BookingAction::Approve) => {
            Ok((BookingStatus::Approved, MachineSideEffect::None))
        }
        (BookingStatus::Pending, BookingAction::Reject) => {
            Ok((BookingStatus::Rejected, MachineSideEffect::None))
        }
        (BookingStatus::Approved, BookingAction::Handover) => {
            Ok((BookingStatus::Active, MachineSideEffect::SetInUse))
        }
        (BookingStatus::Active, BookingAction::Complete) => {
            Ok((BookingStatus::Completed, MachineSideEffect::SetIdle))
        }
        (BookingStatus::Pending | BookingStatus::Approved, BookingAction::Cancel) => {
            Ok((BookingStatus::Cancelled, MachineSideEffect::None))
        }
        // Cancelling an active booking releases the machine, keeping the
        // InUse-iff-Active invariant intact.
        (BookingStatus::Active, BookingAction::Cancel) => {
            Ok((BookingStatus::Cancelled, MachineSideEffect::SetIdle))
        }
        (from, action) => Err(DomainError::IllegalTransition { from, action }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    const ALL_STATUSES: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::Rejected,
        BookingStatus::Active,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    const ALL_ACTIONS: [BookingAction; 5] = [
        BookingAction::Approve,
        BookingAction::Reject,
        BookingAction::Handover,
        BookingAction::Complete,
        BookingAction::Cancel,
    ];

    #[test]
    fn test_status_string_round_trip() {
        for status in ALL_STATUSES {
            let s = status.as_str();
            match BookingStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_action_string_round_trip() {
        for action in ALL_ACTIONS {
            let s = action.as_str();
            match BookingAction::parse_str(s) {
                Ok(parsed) => assert_eq!(action, parsed),
                Err(e) => panic!("Failed to parse action string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        assert!(BookingStatus::parse_str("InProgress").is_err());
        assert!(BookingStatus::parse_str("pending").is_err());
    }

    #[test]
    fn test_invalid_action_string() {
        assert!(BookingAction::parse_str("Approve").is_err());
        assert!(BookingAction::parse_str("return").is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Approved.is_terminal());
        assert!(!BookingStatus::Active.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        assert_eq!(
            apply_action(BookingStatus::Pending, BookingAction::Approve),
            Ok((BookingStatus::Approved, MachineSideEffect::None))
        );
        assert_eq!(
            apply_action(BookingStatus::Pending, BookingAction::Reject),
            Ok((BookingStatus::Rejected, MachineSideEffect::None))
        );
        assert_eq!(
            apply_action(BookingStatus::Approved, BookingAction::Handover),
            Ok((BookingStatus::Active, MachineSideEffect::SetInUse))
        );
        assert_eq!(
            apply_action(BookingStatus::Active, BookingAction::Complete),
            Ok((BookingStatus::Completed, MachineSideEffect::SetIdle))
        );
    }

    #[test]
    fn test_cancel_from_every_non_terminal_state() {
        assert_eq!(
            apply_action(BookingStatus::Pending, BookingAction::Cancel),
            Ok((BookingStatus::Cancelled, MachineSideEffect::None))
        );
        assert_eq!(
            apply_action(BookingStatus::Approved, BookingAction::Cancel),
            Ok((BookingStatus::Cancelled, MachineSideEffect::None))
        );
        assert_eq!(
            apply_action(BookingStatus::Active, BookingAction::Cancel),
            Ok((BookingStatus::Cancelled, MachineSideEffect::SetIdle))
        );
    }

    /// Enumerates the whole `(status, action)` grid: exactly the seven legal
    /// pairs succeed, everything else is an illegal transition.
    #[test]
    fn test_transition_table_is_exhaustive() {
        let legal: [(BookingStatus, BookingAction); 7] = [
            (BookingStatus::Pending, BookingAction::Approve),
            (BookingStatus::Pending, BookingAction::Reject),
            (BookingStatus::Pending, BookingAction::Cancel),
            (BookingStatus::Approved, BookingAction::Handover),
            (BookingStatus::Approved, BookingAction::Cancel),
            (BookingStatus::Active, BookingAction::Complete),
            (BookingStatus::Active, BookingAction::Cancel),
        ];

        for status in ALL_STATUSES {
            for action in ALL_ACTIONS {
                let result = apply_action(status, action);
                if legal.contains(&(status, action)) {
                    assert!(result.is_ok(), "expected ({status}, {action}) to be legal");
                } else {
                    assert_eq!(
                        result,
                        Err(DomainError::IllegalTransition {
                            from: status,
                            action
                        }),
                        "expected ({status}, {action}) to be illegal"
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_transitions_from_terminal_states() {
        for status in [
            BookingStatus::Rejected,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            for action in ALL_ACTIONS {
                assert!(apply_action(status, action).is_err());
            }
        }
    }

    #[test]
    fn test_repeated_action_is_illegal_not_idempotent() {
        let (approved, _) = apply_action(BookingStatus::Pending, BookingAction::Approve)
            .expect("approve from pending is legal");
        assert_eq!(
            apply_action(approved, BookingAction::Approve),
            Err(DomainError::IllegalTransition {
                from: BookingStatus::Approved,
                action: BookingAction::Approve
            })
        );
    }

    #[test]
    fn test_reject_requires_reason_flag() {
        assert!(BookingAction::Reject.requires_reason());
        assert!(!BookingAction::Cancel.requires_reason());
        assert!(!BookingAction::Approve.requires_reason());
    }
}
