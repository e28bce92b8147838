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

mod error;
mod reference;
mod request_response;

#[cfg(test)]
mod tests;

use chc_hire::{
    BootstrapMetadata, BootstrapResult, Command, State, TransitionResult, apply, apply_bootstrap,
};
use chc_hire_audit::{Actor, AuditEvent, Cause};
use chc_hire_domain::{
    Booking, BookingRef, BookingStatus, DateRange, FarmerDetails, MachineStatus, MachineType,
};
use std::str::FromStr;
use time::macros::format_description;

pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use reference::{generate_machine_code, generate_unique_booking_ref};
pub use request_response::{
    BookedRange, BookedRangesResponse, BookingActionRequest, BookingListResponse,
    BookingResponse, CenterListResponse, CenterResponse, CreateBookingRequest,
    CreateCenterRequest, MachineResponse, RegisterMachineRequest, SetMachineStatusRequest,
};

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Government administrators oversee the center network: they create
    /// centers and read across tenants.
    GovtAdmin,
    /// Center administrators manage one center's machine inventory and
    /// booking ledger. Every booking action is scoped to their center.
    CenterAdmin,
}

/// An authenticated actor with an associated role.
///
/// This represents an administrator who has been authenticated and has
/// permission to perform certain actions based on their role and, for
/// center administrators, their owning center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
    /// The owning center's code, for center administrators.
    pub center_code: Option<String>,
}

impl AuthenticatedActor {
    /// Creates a government administrator.
    #[must_use]
    pub const fn new_govt_admin(id: String) -> Self {
        Self {
            id,
            role: Role::GovtAdmin,
            center_code: None,
        }
    }

    /// Creates a center administrator belonging to a center.
    #[must_use]
    pub fn new_center_admin(id: String, center_code: &str) -> Self {
        Self {
            id,
            role: Role::CenterAdmin,
            center_code: Some(center_code.to_uppercase()),
        }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions to
    /// the authenticated administrator.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::GovtAdmin => String::from("govt_admin"),
            Role::CenterAdmin => String::from("center_admin"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// The audit actor attributed to public booking submissions.
#[must_use]
pub fn public_actor() -> Actor {
    Actor::new(String::from("public"), String::from("public"))
}

/// Stub authentication function.
///
/// This is a minimal placeholder: real authentication (credentials,
/// sessions, identity providers) is deliberately out of scope, and this
/// boundary is where it would slot in.
///
/// # Errors
///
/// Returns an error if the actor ID is empty, or a center administrator
/// is missing a center.
pub fn authenticate_stub(
    actor_id: String,
    role: Role,
    center_code: Option<String>,
) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    match role {
        Role::GovtAdmin => Ok(AuthenticatedActor::new_govt_admin(actor_id)),
        Role::CenterAdmin => match center_code {
            Some(code) if !code.is_empty() => {
                Ok(AuthenticatedActor::new_center_admin(actor_id, &code))
            }
            _ => Err(AuthError::AuthenticationFailed {
                reason: String::from("Center administrators must belong to a center"),
            }),
        },
    }
}

/// Authorization service for enforcing role and center-scope access
/// control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to create a center.
    ///
    /// Only government administrators may create centers.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the `GovtAdmin` role.
    pub fn authorize_create_center(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::GovtAdmin => Ok(()),
            Role::CenterAdmin => Err(AuthError::Unauthorized {
                action: String::from("create_center"),
                reason: String::from("requires the government administrator role"),
            }),
        }
    }

    /// Checks if an actor may act within a center's scope.
    ///
    /// Every center-scoped action - booking actions included, cancel not
    /// excepted - requires a center administrator whose owning center
    /// matches. The error deliberately names no details of the target
    /// record.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a center administrator of the
    /// given center.
    pub fn authorize_center_scope(
        actor: &AuthenticatedActor,
        action: &str,
        center_code: &str,
    ) -> Result<(), AuthError> {
        match (&actor.role, actor.center_code.as_deref()) {
            (Role::CenterAdmin, Some(own)) if own == center_code => Ok(()),
            (Role::CenterAdmin, _) => Err(AuthError::Unauthorized {
                action: action.to_string(),
                reason: String::from("administrator does not belong to this center"),
            }),
            (Role::GovtAdmin, _) => Err(AuthError::Unauthorized {
                action: action.to_string(),
                reason: String::from("requires a center administrator of this center"),
            }),
        }
    }
}

/// The result of an API operation that includes both the response and the
/// transition it produced.
///
/// This ensures that successful API operations always carry their audit
/// trail; the caller persists `new_state` and `audit_event` atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
    /// The new state after the operation.
    pub new_state: State,
}

impl<T> ApiResult<T> {
    /// Repackages the transition for persistence.
    #[must_use]
    pub fn transition(&self) -> TransitionResult {
        TransitionResult {
            new_state: self.new_state.clone(),
            audit_event: self.audit_event.clone(),
        }
    }
}

fn parse_date(field: &str, value: &str) -> Result<time::Date, ApiError> {
    time::Date::parse(value, &DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("failed to parse date '{value}': {e}"),
    })
}

/// Creates a booking via the public API boundary.
///
/// This function:
/// - Parses and validates the requested date range
/// - Generates a unique booking reference, retrying on collision
/// - Applies the creation command (availability check included)
/// - Translates any errors to API errors
///
/// The booking always enters the ledger as Pending; nothing the caller
/// sends can override that. No authorization applies: submission is
/// public.
///
/// # Errors
///
/// Returns an error if:
/// - A date fails to parse or the range is inverted
/// - The machine does not exist in this center's inventory
/// - The range overlaps an existing non-terminal booking
/// - A farmer field fails validation
pub fn create_booking(
    metadata: &BootstrapMetadata,
    state: &State,
    request: CreateBookingRequest,
    cause: Cause,
) -> Result<ApiResult<BookingResponse>, ApiError> {
    let start: time::Date = parse_date("start_date", &request.start_date)?;
    let end: time::Date = parse_date("end_date", &request.end_date)?;
    let range: DateRange = DateRange::new(start, end).map_err(translate_domain_error)?;

    let booking_ref: BookingRef = generate_unique_booking_ref(&state.bookings)?;

    let farmer: FarmerDetails = FarmerDetails {
        name: request.farmer_name,
        contact: request.farmer_contact,
        email: request.farmer_email,
        aadhaar: request.farmer_aadhaar,
    };

    let command: Command = Command::CreateBooking {
        booking_ref: booking_ref.clone(),
        machine_code: request.machine_code,
        range,
        farmer,
        field_area: request.field_area,
        purpose: request.purpose,
    };

    let transition_result: TransitionResult =
        apply(metadata, state, command, public_actor(), cause).map_err(translate_core_error)?;

    let booking: &Booking = transition_result
        .new_state
        .find_booking(&booking_ref)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("created booking missing from new state"),
        })?;
    let response: BookingResponse = BookingResponse::from_booking(booking);

    Ok(ApiResult {
        response,
        audit_event: transition_result.audit_event,
        new_state: transition_result.new_state,
    })
}

/// Applies an administrative action to a booking via the API boundary.
///
/// This function:
/// - Verifies the actor administers the booking's center (all actions,
///   cancel included)
/// - Optionally verifies the caller's last-seen status still holds
///   (compare-and-swap freshness check)
/// - Applies the action through the transition table
/// - Translates any errors to API errors
///
/// # Errors
///
/// Returns an error if:
/// - The actor does not administer this center (`Unauthorized`)
/// - The booking reference is malformed or unknown
/// - `expected_status` no longer matches (`Conflict`)
/// - The action is illegal from the current status, or reject lacks notes
pub fn booking_action(
    metadata: &BootstrapMetadata,
    state: &State,
    booking_ref: &str,
    request: BookingActionRequest,
    expected_status: Option<String>,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<BookingResponse>, ApiError> {
    // Enforce authorization before touching the booking
    AuthorizationService::authorize_center_scope(
        authenticated_actor,
        "booking_action",
        state.center.code(),
    )?;

    let booking_ref: BookingRef =
        BookingRef::parse(booking_ref).map_err(translate_domain_error)?;
    let Some(booking) = state.find_booking(&booking_ref) else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("booking '{booking_ref}' does not exist"),
        });
    };

    // Freshness check: the status the administrator saw must still hold
    if let Some(expected) = expected_status {
        let expected: BookingStatus =
            BookingStatus::from_str(&expected).map_err(translate_domain_error)?;
        if booking.status != expected {
            return Err(ApiError::Conflict {
                rule: String::from("concurrent_modification"),
                message: format!(
                    "booking '{booking_ref}' is now '{}', not '{}'",
                    booking.status, expected
                ),
            });
        }
    }

    let (action, notes) = request.into_parts();
    let command: Command = Command::BookingAction {
        booking_ref: booking_ref.clone(),
        action,
        notes,
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let transition_result: TransitionResult =
        apply(metadata, state, command, actor, cause).map_err(translate_core_error)?;

    let updated: &Booking = transition_result
        .new_state
        .find_booking(&booking_ref)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("acted-on booking missing from new state"),
        })?;
    let response: BookingResponse = BookingResponse::from_booking(updated);

    Ok(ApiResult {
        response,
        audit_event: transition_result.audit_event,
        new_state: transition_result.new_state,
    })
}

/// Registers a machine via the API boundary with authorization.
///
/// Only an administrator of the owning center may register machines. When
/// the request omits a machine code, one is generated from the center,
/// equipment category, and inventory count.
///
/// # Errors
///
/// Returns an error if:
/// - The actor does not administer this center
/// - The equipment category is unknown
/// - A machine field fails validation, or the code is already taken
pub fn register_machine(
    metadata: &BootstrapMetadata,
    state: &State,
    request: RegisterMachineRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<MachineResponse>, ApiError> {
    AuthorizationService::authorize_center_scope(
        authenticated_actor,
        "register_machine",
        state.center.code(),
    )?;

    let machine_type: MachineType =
        MachineType::from_str(&request.machine_type).map_err(translate_domain_error)?;

    let machine_code: String = match request.machine_code {
        Some(code) => code,
        None => generate_machine_code(&state.center, machine_type, &state.machines),
    };

    let command: Command = Command::RegisterMachine {
        machine_code: machine_code.clone(),
        machine_name: request.machine_name,
        machine_type,
        purchase_year: request.purchase_year,
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let transition_result: TransitionResult =
        apply(metadata, state, command, actor, cause).map_err(translate_core_error)?;

    let machine = transition_result
        .new_state
        .find_machine(&machine_code)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("registered machine missing from new state"),
        })?;
    let response: MachineResponse = MachineResponse::from_machine(machine);

    Ok(ApiResult {
        response,
        audit_event: transition_result.audit_event,
        new_state: transition_result.new_state,
    })
}

/// Directly edits a machine's operational status via the API boundary.
///
/// The core guards the edit: Idle is refused while an Active booking
/// references the machine, In Use is refused without one.
///
/// # Errors
///
/// Returns an error if:
/// - The actor does not administer this center
/// - The status is unknown, or the guarded edit is refused
pub fn set_machine_status(
    metadata: &BootstrapMetadata,
    state: &State,
    machine_code: &str,
    request: &SetMachineStatusRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<MachineResponse>, ApiError> {
    AuthorizationService::authorize_center_scope(
        authenticated_actor,
        "set_machine_status",
        state.center.code(),
    )?;

    let new_status: MachineStatus =
        MachineStatus::from_str(&request.status).map_err(translate_domain_error)?;

    let command: Command = Command::SetMachineStatus {
        machine_code: machine_code.to_string(),
        new_status,
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let transition_result: TransitionResult =
        apply(metadata, state, command, actor, cause).map_err(translate_core_error)?;

    let machine = transition_result
        .new_state
        .find_machine(machine_code)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("edited machine missing from new state"),
        })?;
    let response: MachineResponse = MachineResponse::from_machine(machine);

    Ok(ApiResult {
        response,
        audit_event: transition_result.audit_event,
        new_state: transition_result.new_state,
    })
}

/// Creates a center via the API boundary with authorization.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a government administrator
/// - The center code is invalid or already taken
pub fn create_center(
    metadata: &BootstrapMetadata,
    request: &CreateCenterRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BootstrapResult, ApiError> {
    AuthorizationService::authorize_create_center(authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::CreateCenter {
        code: request.code.clone(),
        name: request.name.clone(),
        district: request.district.clone(),
        state: request.state.clone(),
    };

    apply_bootstrap(metadata, command, actor, cause).map_err(translate_core_error)
}

/// Lists all centers.
///
/// This operation never fails and requires no authorization.
#[must_use]
pub fn list_centers(metadata: &BootstrapMetadata) -> CenterListResponse {
    CenterListResponse {
        centers: metadata
            .centers
            .iter()
            .map(CenterResponse::from_center)
            .collect(),
    }
}

/// Lists a center's bookings, optionally filtered by status and machine.
///
/// # Errors
///
/// Returns an error if the actor does not administer this center, or the
/// status filter is not a valid status.
pub fn list_bookings(
    state: &State,
    status: Option<&str>,
    machine_code: Option<&str>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BookingListResponse, ApiError> {
    AuthorizationService::authorize_center_scope(
        authenticated_actor,
        "list_bookings",
        state.center.code(),
    )?;

    let status_filter: Option<BookingStatus> = status
        .map(BookingStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)?;

    let bookings: Vec<BookingResponse> = state
        .bookings
        .iter()
        .filter(|b| status_filter.is_none_or(|s| b.status == s))
        .filter(|b| machine_code.is_none_or(|m| b.machine_code == m))
        .map(BookingResponse::from_booking)
        .collect();

    Ok(BookingListResponse {
        center_code: state.center.code().to_string(),
        bookings,
    })
}

/// The public calendar feed for a machine: every non-terminal booking's
/// date range. Read-only, no authorization.
#[must_use]
pub fn booked_dates(machine_code: &str, state: &State) -> BookedRangesResponse {
    let ranges = chc_hire_domain::booked_ranges(machine_code, &state.bookings);
    BookedRangesResponse::from_ranges(machine_code, &ranges)
}
