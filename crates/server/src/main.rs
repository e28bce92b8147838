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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use chc_hire::{BootstrapMetadata, BootstrapResult, State};
use chc_hire_api::{
    ApiError, ApiResult, AuthenticatedActor, BookedRangesResponse, BookingActionRequest,
    BookingListResponse, BookingResponse, CenterListResponse, CenterResponse,
    CreateBookingRequest, CreateCenterRequest, MachineResponse, RegisterMachineRequest, Role,
    SetMachineStatusRequest, authenticate_stub, booking_action, create_booking, create_center,
    list_bookings, list_centers, register_machine, set_machine_status,
    translate_persistence_error,
};
use chc_hire_audit::Cause;
use chc_hire_domain::Center;
use chc_hire_persistence::{AuditEventRecord, PersistenceError, SqliteStore};

/// CHC Hire Server - HTTP server for the CHC Hire System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The store is wrapped in a Mutex: each request loads state, applies its
/// command, and persists under one guard, serializing lifecycle actions.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    store: Arc<Mutex<SqliteStore>>,
}

/// Common actor/cause fields carried by administrative requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorFields {
    /// The actor ID performing this action.
    actor_id: String,
    /// The acting administrator's center code.
    actor_center: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl ActorFields {
    fn authenticate(&self) -> Result<AuthenticatedActor, HttpError> {
        authenticate_stub(
            self.actor_id.clone(),
            Role::CenterAdmin,
            Some(self.actor_center.clone()),
        )
        .map_err(|err| HttpError::from(ApiError::from(err)))
    }

    fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}

/// API request for creating a center.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateCenterApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The center code.
    code: String,
    /// The center's display name.
    name: String,
    /// The district.
    district: String,
    /// The state.
    state: String,
}

/// API request for registering a machine.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterMachineApiRequest {
    /// Actor and cause fields.
    #[serde(flatten)]
    actor: ActorFields,
    /// Machine code; generated when absent.
    machine_code: Option<String>,
    /// The machine's display name.
    machine_name: String,
    /// The equipment category's display name.
    machine_type: String,
    /// Year the machine was purchased.
    purchase_year: u16,
}

/// API request for a direct machine-status edit.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetMachineStatusApiRequest {
    /// Actor and cause fields.
    #[serde(flatten)]
    actor: ActorFields,
    /// The requested status's display name.
    status: String,
}

/// Public API request for creating a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateBookingApiRequest {
    /// The cause ID, defaulting for anonymous submissions.
    #[serde(default = "default_public_cause_id")]
    cause_id: String,
    /// The cause description.
    #[serde(default = "default_public_cause_description")]
    cause_description: String,
    /// The requested machine's code.
    machine_code: String,
    /// Requested start date (ISO 8601, inclusive).
    start_date: String,
    /// Requested end date (ISO 8601, inclusive).
    end_date: String,
    /// The farmer's full name.
    farmer_name: String,
    /// 10-digit contact number.
    farmer_contact: String,
    /// Contact email address.
    farmer_email: String,
    /// 12-digit Aadhaar number.
    farmer_aadhaar: String,
    /// Free-text purpose, if given.
    purpose: Option<String>,
    /// Requested field area in acres, if given.
    field_area: Option<f64>,
}

fn default_public_cause_id() -> String {
    String::from("public-submission")
}

fn default_public_cause_description() -> String {
    String::from("Public booking submission")
}

/// API request for an administrative booking action.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BookingActionApiRequest {
    /// Actor and cause fields.
    #[serde(flatten)]
    actor: ActorFields,
    /// The action and its fields (closed tagged union).
    #[serde(flatten)]
    action: BookingActionRequest,
    /// The status the administrator last saw, for the freshness check.
    expected_status: Option<String>,
}

/// Query parameters for listing a center's bookings.
#[derive(Debug, Deserialize)]
struct ListBookingsQuery {
    /// The actor ID performing this read.
    actor_id: String,
    /// The acting administrator's center code.
    actor_center: String,
    /// Optional status filter.
    status: Option<String>,
    /// Optional machine filter.
    machine_code: Option<String>,
}

/// Query parameters for the audit timeline.
#[derive(Debug, Deserialize)]
struct AuditTimelineQuery {
    /// The center to read the timeline for.
    center: String,
}

/// API response for center creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CenterApiResponse {
    /// Success indicator.
    success: bool,
    /// The event ID of the persisted audit event.
    event_id: i64,
    /// The created center.
    center: CenterResponse,
}

/// API response for machine operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MachineApiResponse {
    /// Success indicator.
    success: bool,
    /// The event ID of the persisted audit event.
    event_id: i64,
    /// The machine after the operation.
    machine: MachineResponse,
}

/// API response for booking operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookingApiResponse {
    /// Success indicator.
    success: bool,
    /// The event ID of the persisted audit event.
    event_id: i64,
    /// The booking after the operation.
    booking: BookingResponse,
}

/// API response for the audit timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuditTimelineResponse {
    /// The center the timeline is for.
    center_code: String,
    /// The events, oldest first.
    events: Vec<AuditEventRecord>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn not_found(resource: &str, id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{resource} '{id}' not found"),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self::from(translate_persistence_error(err))
    }
}

/// Loads the metadata and a center's state from the store.
fn load_center_state(
    store: &SqliteStore,
    center_code: &str,
) -> Result<(BootstrapMetadata, State), HttpError> {
    let metadata: BootstrapMetadata = store.get_bootstrap_metadata()?;
    let center: Center = store
        .get_center(center_code)?
        .ok_or_else(|| HttpError::not_found("Center", center_code))?;
    let state: State = store.get_current_state(&center)?;
    Ok((metadata, state))
}

async fn handle_create_center(
    AxumState(app): AxumState<AppState>,
    Json(request): Json<CreateCenterApiRequest>,
) -> Result<Json<CenterApiResponse>, HttpError> {
    let actor: AuthenticatedActor =
        authenticate_stub(request.actor_id.clone(), Role::GovtAdmin, None)
            .map_err(|err| HttpError::from(ApiError::from(err)))?;
    let cause: Cause = Cause::new(request.cause_id.clone(), request.cause_description.clone());

    let mut store = app.store.lock().await;
    let metadata: BootstrapMetadata = store.get_bootstrap_metadata()?;

    let api_request: CreateCenterRequest = CreateCenterRequest {
        code: request.code,
        name: request.name,
        district: request.district,
        state: request.state,
    };
    let result: BootstrapResult = create_center(&metadata, &api_request, &actor, cause)?;
    let (event_id, center) = store.persist_bootstrap(&result)?;

    Ok(Json(CenterApiResponse {
        success: true,
        event_id,
        center: CenterResponse::from_center(&center),
    }))
}

async fn handle_list_centers(
    AxumState(app): AxumState<AppState>,
) -> Result<Json<CenterListResponse>, HttpError> {
    let store = app.store.lock().await;
    let metadata: BootstrapMetadata = store.get_bootstrap_metadata()?;
    Ok(Json(list_centers(&metadata)))
}

async fn handle_register_machine(
    AxumState(app): AxumState<AppState>,
    Json(request): Json<RegisterMachineApiRequest>,
) -> Result<Json<MachineApiResponse>, HttpError> {
    let actor: AuthenticatedActor = request.actor.authenticate()?;
    let cause: Cause = request.actor.cause();

    let mut store = app.store.lock().await;
    let (metadata, state) = load_center_state(&store, &request.actor.actor_center)?;

    let api_request: RegisterMachineRequest = RegisterMachineRequest {
        machine_code: request.machine_code,
        machine_name: request.machine_name,
        machine_type: request.machine_type,
        purchase_year: request.purchase_year,
    };
    let result: ApiResult<MachineResponse> =
        register_machine(&metadata, &state, api_request, &actor, cause)?;
    let event_id: i64 = store.persist_transition(&state, &result.transition())?;

    Ok(Json(MachineApiResponse {
        success: true,
        event_id,
        machine: result.response,
    }))
}

async fn handle_set_machine_status(
    AxumState(app): AxumState<AppState>,
    Path(machine_code): Path<String>,
    Json(request): Json<SetMachineStatusApiRequest>,
) -> Result<Json<MachineApiResponse>, HttpError> {
    let actor: AuthenticatedActor = request.actor.authenticate()?;
    let cause: Cause = request.actor.cause();

    let mut store = app.store.lock().await;
    let center: Center = store
        .get_center_for_machine(&machine_code)?
        .ok_or_else(|| HttpError::not_found("Machine", &machine_code))?;
    let metadata: BootstrapMetadata = store.get_bootstrap_metadata()?;
    let state: State = store.get_current_state(&center)?;

    let api_request: SetMachineStatusRequest = SetMachineStatusRequest {
        status: request.status,
    };
    let result: ApiResult<MachineResponse> =
        set_machine_status(&metadata, &state, &machine_code, &api_request, &actor, cause)?;
    let event_id: i64 = store.persist_transition(&state, &result.transition())?;

    Ok(Json(MachineApiResponse {
        success: true,
        event_id,
        machine: result.response,
    }))
}

async fn handle_booked_dates(
    AxumState(app): AxumState<AppState>,
    Path(machine_code): Path<String>,
) -> Result<Json<BookedRangesResponse>, HttpError> {
    let store = app.store.lock().await;
    if store.get_machine(&machine_code)?.is_none() {
        return Err(HttpError::not_found("Machine", &machine_code));
    }
    let ranges = store.get_booked_ranges(&machine_code)?;
    Ok(Json(BookedRangesResponse::from_ranges(
        &machine_code,
        &ranges,
    )))
}

async fn handle_create_booking(
    AxumState(app): AxumState<AppState>,
    Json(request): Json<CreateBookingApiRequest>,
) -> Result<Json<BookingApiResponse>, HttpError> {
    let cause: Cause = Cause::new(request.cause_id.clone(), request.cause_description.clone());

    // Load, check, and persist under one guard: the availability read set
    // and the booking insert share the same snapshot.
    let mut store = app.store.lock().await;
    let center: Center = store
        .get_center_for_machine(&request.machine_code)?
        .ok_or_else(|| HttpError::not_found("Machine", &request.machine_code))?;
    let metadata: BootstrapMetadata = store.get_bootstrap_metadata()?;
    let state: State = store.get_current_state(&center)?;

    let api_request: CreateBookingRequest = CreateBookingRequest {
        machine_code: request.machine_code,
        start_date: request.start_date,
        end_date: request.end_date,
        farmer_name: request.farmer_name,
        farmer_contact: request.farmer_contact,
        farmer_email: request.farmer_email,
        farmer_aadhaar: request.farmer_aadhaar,
        purpose: request.purpose,
        field_area: request.field_area,
    };
    let result: ApiResult<BookingResponse> =
        create_booking(&metadata, &state, api_request, cause)?;
    let event_id: i64 = store.persist_transition(&state, &result.transition())?;

    // Re-read for the storage-assigned timestamps
    let booking = store
        .get_booking(&result.response.booking_ref)?
        .map_or(result.response, |b| BookingResponse::from_booking(&b));

    Ok(Json(BookingApiResponse {
        success: true,
        event_id,
        booking,
    }))
}

async fn handle_booking_status(
    AxumState(app): AxumState<AppState>,
    Path(booking_ref): Path<String>,
) -> Result<Json<BookingResponse>, HttpError> {
    let store = app.store.lock().await;
    let booking = store
        .get_booking(&booking_ref)?
        .ok_or_else(|| HttpError::not_found("Booking", &booking_ref))?;
    Ok(Json(BookingResponse::from_booking(&booking)))
}

async fn handle_list_bookings(
    AxumState(app): AxumState<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<BookingListResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate_stub(
        query.actor_id.clone(),
        Role::CenterAdmin,
        Some(query.actor_center.clone()),
    )
    .map_err(|err| HttpError::from(ApiError::from(err)))?;

    let store = app.store.lock().await;
    let (_metadata, state) = load_center_state(&store, &query.actor_center)?;

    let response: BookingListResponse = list_bookings(
        &state,
        query.status.as_deref(),
        query.machine_code.as_deref(),
        &actor,
    )?;
    Ok(Json(response))
}

async fn handle_booking_action(
    AxumState(app): AxumState<AppState>,
    Path(booking_ref): Path<String>,
    Json(request): Json<BookingActionApiRequest>,
) -> Result<Json<BookingApiResponse>, HttpError> {
    let actor: AuthenticatedActor = request.actor.authenticate()?;
    let cause: Cause = request.actor.cause();

    let mut store = app.store.lock().await;
    // Resolve the booking's owning center; the action is applied against
    // that center's state, and authorization runs against it
    let target = store
        .get_booking(&booking_ref)?
        .ok_or_else(|| HttpError::not_found("Booking", &booking_ref))?;
    let metadata: BootstrapMetadata = store.get_bootstrap_metadata()?;
    let state: State = store.get_current_state(&target.center)?;

    let result: ApiResult<BookingResponse> = booking_action(
        &metadata,
        &state,
        &booking_ref,
        request.action,
        request.expected_status,
        &actor,
        cause,
    )?;
    let event_id: i64 = store.persist_transition(&state, &result.transition())?;

    let booking = store
        .get_booking(&booking_ref)?
        .map_or(result.response, |b| BookingResponse::from_booking(&b));

    Ok(Json(BookingApiResponse {
        success: true,
        event_id,
        booking,
    }))
}

async fn handle_audit_timeline(
    AxumState(app): AxumState<AppState>,
    Query(query): Query<AuditTimelineQuery>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let store = app.store.lock().await;
    let events: Vec<AuditEventRecord> = store.get_audit_timeline(&query.center)?;
    Ok(Json(AuditTimelineResponse {
        center_code: query.center,
        events,
    }))
}

async fn handle_audit_event(
    AxumState(app): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEventRecord>, HttpError> {
    let store = app.store.lock().await;
    let event: AuditEventRecord = store.get_audit_event(event_id)?;
    Ok(Json(event))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/centers", post(handle_create_center))
        .route("/centers", get(handle_list_centers))
        .route("/machines", post(handle_register_machine))
        .route(
            "/machines/{machine_code}/status",
            post(handle_set_machine_status),
        )
        .route(
            "/machines/{machine_code}/booked_dates",
            get(handle_booked_dates),
        )
        .route("/bookings/public", post(handle_create_booking))
        .route("/bookings/public/{booking_ref}", get(handle_booking_status))
        .route("/bookings", get(handle_list_bookings))
        .route(
            "/bookings/{booking_ref}/action",
            post(handle_booking_action),
        )
        .route("/audit/timeline", get(handle_audit_timeline))
        .route("/audit/event/{event_id}", get(handle_audit_event))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing CHC Hire Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let store: SqliteStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteStore::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
