// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use chc_hire_domain::Center;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be an administrator, a public submission, or a system process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "govt_admin", "center_admin", "public").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`CreateBooking`", "`ApproveBooking`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The record an audit event is about.
///
/// Audit consumers filter by table name and record identifier, so every
/// event names the row it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// The logical table the subject record lives in (e.g., "bookings").
    pub table: String,
    /// The subject record's identifier (e.g., a booking reference).
    pub record_id: String,
}

impl Subject {
    /// Creates a new Subject.
    #[must_use]
    pub const fn new(table: String, record_id: String) -> Self {
        Self { table, record_id }
    }
}

/// A snapshot of relevant state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - Which record it touched (subject)
/// - The state before the transition (before; absent for creations)
/// - The state after the transition (after)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The event ID assigned by the database. `None` until persisted.
    pub event_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The record this event is about.
    pub subject: Subject,
    /// The state before the transition, if one existed.
    pub before: Option<StateSnapshot>,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The center this event is scoped to.
    pub center: Center,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        subject: Subject,
        before: Option<StateSnapshot>,
        after: StateSnapshot,
        center: Center,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            subject,
            before,
            after,
            center,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_center() -> Center {
        Center::new("LUD", "Ludhiana CHC", "Ludhiana", "Punjab")
    }

    fn test_event() -> AuditEvent {
        let actor: Actor = Actor::new(String::from("admin-123"), String::from("center_admin"));
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Admin request"));
        let action: Action = Action::new(String::from("ApproveBooking"), None);
        let subject: Subject =
            Subject::new(String::from("bookings"), String::from("BKG-A1B2C3"));
        let before: StateSnapshot = StateSnapshot::new(String::from("status=Pending"));
        let after: StateSnapshot = StateSnapshot::new(String::from("status=Approved"));

        AuditEvent::new(
            actor,
            cause,
            action,
            subject,
            Some(before),
            after,
            test_center(),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("admin-123"), String::from("center_admin"));

        assert_eq!(actor.id, "admin-123");
        assert_eq!(actor.actor_type, "center_admin");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Admin request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Admin request");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("RejectBooking"),
            Some(String::from("Machine due for servicing")),
        );

        assert_eq!(action.name, "RejectBooking");
        assert_eq!(
            action.details,
            Some(String::from("Machine due for servicing"))
        );
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let event: AuditEvent = test_event();

        assert_eq!(event.event_id, None);
        assert_eq!(event.actor.id, "admin-123");
        assert_eq!(event.subject.table, "bookings");
        assert_eq!(event.subject.record_id, "BKG-A1B2C3");
        assert_eq!(
            event.before,
            Some(StateSnapshot::new(String::from("status=Pending")))
        );
        assert_eq!(event.after.data, "status=Approved");
        assert_eq!(event.center.code(), "LUD");
    }

    #[test]
    fn test_creation_event_has_no_before_snapshot() {
        let actor: Actor = Actor::new(String::from("public"), String::from("public"));
        let cause: Cause = Cause::new(String::from("req-1"), String::from("Public submission"));
        let action: Action = Action::new(String::from("CreateBooking"), None);
        let subject: Subject =
            Subject::new(String::from("bookings"), String::from("BKG-D4E5F6"));
        let after: StateSnapshot = StateSnapshot::new(String::from("status=Pending"));

        let event: AuditEvent =
            AuditEvent::new(actor, cause, action, subject, None, after, test_center());

        assert_eq!(event.before, None);
    }

    #[test]
    fn test_audit_event_equality() {
        assert_eq!(test_event(), test_event());
    }
}
