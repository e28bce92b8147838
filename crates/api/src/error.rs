// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use chc_hire::CoreError;
use chc_hire_domain::DomainError;
use chc_hire_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the actor may not perform it.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}': {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the actor may not perform it.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with current state (availability overlap,
    /// concurrent modification).
    Conflict {
        /// The rule that produced the conflict.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}': {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { action, reason } => Self::Unauthorized { action, reason },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidRange { start, end } => ApiError::InvalidInput {
            field: String::from("date_range"),
            message: format!("start date {start} is after end date {end}"),
        },
        DomainError::MachineUnavailable {
            machine_code,
            conflict_start,
            conflict_end,
        } => ApiError::Conflict {
            rule: String::from("machine_availability"),
            message: format!(
                "machine '{machine_code}' is already booked from {conflict_start} to {conflict_end}"
            ),
        },
        DomainError::IllegalTransition { from, action } => ApiError::DomainRuleViolation {
            rule: String::from("booking_lifecycle"),
            message: format!("action '{action}' is not permitted from status '{from}'"),
        },
        DomainError::ConflictingActiveBooking { machine_code } => ApiError::Conflict {
            rule: String::from("conflicting_active_booking"),
            message: format!(
                "machine '{machine_code}' has an Active booking and cannot be set to Idle"
            ),
        },
        DomainError::NoActiveBooking { machine_code } => ApiError::DomainRuleViolation {
            rule: String::from("no_active_booking"),
            message: format!(
                "machine '{machine_code}' has no Active booking and cannot be set to In Use"
            ),
        },
        DomainError::ReasonRequired { action } => ApiError::InvalidInput {
            field: String::from("notes"),
            message: format!("action '{action}' requires a reason"),
        },
        DomainError::InvalidBookingStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("'{status}' is not a valid booking status"),
        },
        DomainError::InvalidBookingAction(action) => ApiError::InvalidInput {
            field: String::from("action"),
            message: format!("'{action}' is not a valid booking action"),
        },
        DomainError::InvalidMachineStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("'{status}' is not a valid machine status"),
        },
        DomainError::InvalidMachineType(machine_type) => ApiError::InvalidInput {
            field: String::from("machine_type"),
            message: format!("'{machine_type}' is not a valid equipment category"),
        },
        DomainError::InvalidBookingRef(value) => ApiError::InvalidInput {
            field: String::from("booking_ref"),
            message: format!("'{value}' is not a valid booking reference"),
        },
        DomainError::InvalidFarmerName(msg) => ApiError::InvalidInput {
            field: String::from("farmer_name"),
            message: msg,
        },
        DomainError::InvalidFarmerContact(msg) => ApiError::InvalidInput {
            field: String::from("farmer_contact"),
            message: msg,
        },
        DomainError::InvalidFarmerEmail(msg) => ApiError::InvalidInput {
            field: String::from("farmer_email"),
            message: msg,
        },
        DomainError::InvalidAadhaar(msg) => ApiError::InvalidInput {
            field: String::from("farmer_aadhaar"),
            message: msg,
        },
        DomainError::InvalidFieldArea(msg) => ApiError::InvalidInput {
            field: String::from("field_area"),
            message: msg,
        },
        DomainError::InvalidPurchaseYear(year) => ApiError::InvalidInput {
            field: String::from("purchase_year"),
            message: format!("purchase year {year} is outside the plausible range"),
        },
        DomainError::InvalidHoursUsed(msg) => ApiError::InvalidInput {
            field: String::from("total_hours_used"),
            message: msg,
        },
        DomainError::InvalidMachineCode(msg) => ApiError::InvalidInput {
            field: String::from("machine_code"),
            message: msg,
        },
        DomainError::InvalidMachineName(msg) => ApiError::InvalidInput {
            field: String::from("machine_name"),
            message: msg,
        },
        DomainError::InvalidCenterCode(msg) => ApiError::InvalidInput {
            field: String::from("code"),
            message: msg,
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("failed to parse date '{date_string}': {error}"),
        },
        DomainError::MachineNotFound { machine_code } => ApiError::ResourceNotFound {
            resource_type: String::from("Machine"),
            message: format!("machine '{machine_code}' does not exist"),
        },
        DomainError::BookingNotFound { booking_ref } => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("booking '{booking_ref}' does not exist"),
        },
        DomainError::CenterNotFound { code } => ApiError::ResourceNotFound {
            resource_type: String::from("Center"),
            message: format!("center '{code}' does not exist"),
        },
        DomainError::DuplicateCenter { code } => ApiError::DomainRuleViolation {
            rule: String::from("unique_center_code"),
            message: format!("center '{code}' already exists"),
        },
        DomainError::DuplicateMachineCode { machine_code } => ApiError::DomainRuleViolation {
            rule: String::from("unique_machine_code"),
            message: format!("machine code '{machine_code}' already exists"),
        },
        DomainError::DuplicateBookingRef { booking_ref } => ApiError::DomainRuleViolation {
            rule: String::from("unique_booking_ref"),
            message: format!("booking reference '{booking_ref}' already exists"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Concurrency conflicts surface as conflicts; everything else is an
/// internal error with no storage details leaked.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ConcurrentModification {
            record_id,
            expected,
            actual,
        } => ApiError::Conflict {
            rule: String::from("concurrent_modification"),
            message: format!(
                "'{record_id}' changed from '{expected}' to '{actual}' while this request was in flight"
            ),
        },
        PersistenceError::CenterNotFound(code) => ApiError::ResourceNotFound {
            resource_type: String::from("Center"),
            message: format!("center '{code}' does not exist"),
        },
        PersistenceError::MachineNotFound(machine_code) => ApiError::ResourceNotFound {
            resource_type: String::from("Machine"),
            message: format!("machine '{machine_code}' does not exist"),
        },
        PersistenceError::BookingNotFound(booking_ref) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("booking '{booking_ref}' does not exist"),
        },
        PersistenceError::EventNotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("audit event {event_id} does not exist"),
        },
        err => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
