//! REST API over the MedFlow core.
//!
//! Thin glue: handlers translate HTTP requests into workflow engine and
//! directory calls and map [`ClinicError`] onto HTTP statuses. All domain
//! rules live in `medflow-core`.

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use medflow_core::{
    consultation, directory::DirectorySnapshot, patient, reports, staff::StaffRegistry, triage,
    ClinicError, ConsultationInput, ConsultationRecord, FieldViolation, IntakeInput,
    MedicationInput, MedicationRecord, NewStaffMember, Patient, PatientDirectory, PatientStatus,
    StaffMember, StaffRole, TriageInput, TriageRecord, ValidationReport, WorkflowEngine,
    WorkflowReport,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: WorkflowEngine,
    pub directory: PatientDirectory,
    pub staff: Arc<StaffRegistry>,
}

/// Health check response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// JSON error body returned with every non-2xx status.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorRes {
    pub message: String,
    /// Field-level violations, present for validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListPatientsQuery {
    /// Restrict the listing to one workflow stage.
    pub status: Option<String>,
}

/// Administrative status override request.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateStatusReq {
    pub status: PatientStatus,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateRoleReq {
    pub role: StaffRole,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SuccessRes {
    pub success: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_patients,
        create_patient,
        get_patient,
        update_patient_status,
        begin_triage,
        submit_triage,
        get_triage,
        submit_consultation,
        get_consultation,
        add_medication,
        list_medications,
        dashboard,
        report_summary,
        list_staff,
        register_staff,
        update_staff_role,
        remove_staff,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        SuccessRes,
        UpdateStatusReq,
        UpdateRoleReq,
        Patient,
        patient::Gender,
        PatientStatus,
        IntakeInput,
        TriageInput,
        TriageRecord,
        triage::GlasgowScore,
        triage::PriorityLevel,
        triage::PupilReactivity,
        ConsultationInput,
        ConsultationRecord,
        consultation::GeneralState,
        consultation::DiabetesType,
        consultation::SkinFindings,
        consultation::OropharynxFindings,
        consultation::CardiovascularFindings,
        consultation::RespiratoryFindings,
        consultation::AbdomenFindings,
        consultation::LimbFindings,
        consultation::NeurologicalState,
        consultation::Conduct,
        MedicationInput,
        MedicationRecord,
        DirectorySnapshot,
        WorkflowReport,
        reports::StatusBreakdown,
        reports::PriorityBreakdown,
        StaffMember,
        NewStaffMember,
        StaffRole,
        FieldViolation,
        ValidationReport,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Maps a core error onto its HTTP status and JSON body.
fn error_response(context: &'static str, err: ClinicError) -> ApiError {
    let (status, violations) = match &err {
        ClinicError::Validation(report) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            report.violations.clone(),
        ),
        ClinicError::PatientNotFound(_) | ClinicError::StaffNotFound(_) => {
            (StatusCode::NOT_FOUND, Vec::new())
        }
        ClinicError::ConsultationMissing(_) | ClinicError::InvalidState(_) => {
            (StatusCode::CONFLICT, Vec::new())
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Vec::new()),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{context}: {err:?}");
    }

    (
        status,
        Json(ErrorRes {
            message: err.to_string(),
            violations,
        }),
    )
}

fn not_found(what: &str, id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorRes {
            message: format!("{what} not found for patient {id}"),
            violations: Vec::new(),
        }),
    )
}

/// Builds the full application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients))
        .route("/patients", post(create_patient))
        .route("/patients/:id", get(get_patient))
        .route("/patients/:id/status", put(update_patient_status))
        .route("/patients/:id/triage/begin", post(begin_triage))
        .route("/patients/:id/triage", put(submit_triage))
        .route("/patients/:id/triage", get(get_triage))
        .route("/patients/:id/consultation", put(submit_consultation))
        .route("/patients/:id/consultation", get(get_consultation))
        .route("/patients/:id/medications", post(add_medication))
        .route("/patients/:id/medications", get(list_medications))
        .route("/dashboard", get(dashboard))
        .route("/reports/summary", get(report_summary))
        .route("/staff", get(list_staff))
        .route("/staff", post(register_staff))
        .route("/staff/:id/role", put(update_staff_role))
        .route("/staff/:id", delete(remove_staff))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "MedFlow REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/patients",
    params(ListPatientsQuery),
    responses(
        (status = 200, description = "List of patients", body = [Patient]),
        (status = 400, description = "Unknown status filter", body = ErrorRes)
    )
)]
/// Lists patients, optionally restricted to one workflow stage.
///
/// Filtered listings come back most recently registered first; the
/// unfiltered listing has no guaranteed order.
#[axum::debug_handler]
async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<ListPatientsQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = match query.status.as_deref() {
        Some(raw) => {
            let status: PatientStatus = raw.parse().map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorRes {
                        message: format!("unknown patient status: {raw}"),
                        violations: Vec::new(),
                    }),
                )
            })?;
            state.directory.by_status(status).await
        }
        None => state.directory.all().await,
    }
    .map_err(|e| error_response("list patients", e))?;

    Ok(Json(patients))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = IntakeInput,
    responses(
        (status = 201, description = "Patient registered", body = Patient),
        (status = 422, description = "Rejected intake submission", body = ErrorRes)
    )
)]
/// Registers a new patient from an intake submission.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(input): Json<IntakeInput>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = state
        .engine
        .admit_patient(input)
        .await
        .map_err(|e| error_response("admit patient", e))?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    responses(
        (status = 200, description = "Patient found", body = Patient),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Patient>, ApiError> {
    state
        .directory
        .find(&id)
        .await
        .map_err(|e| error_response("get patient", e))?
        .map(Json)
        .ok_or_else(|| error_response("get patient", ClinicError::PatientNotFound(id)))
}

#[utoipa::path(
    put,
    path = "/patients/{id}/status",
    request_body = UpdateStatusReq,
    responses(
        (status = 200, description = "Status overwritten", body = SuccessRes),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
/// Administrative status override.
///
/// Escape hatch outside the guaranteed stage sequence; the workflow
/// endpoints below are the supported path.
#[axum::debug_handler]
async fn update_patient_status(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<UpdateStatusReq>,
) -> Result<Json<SuccessRes>, ApiError> {
    state
        .engine
        .set_status(&id, req.status)
        .await
        .map_err(|e| error_response("update patient status", e))?;
    Ok(Json(SuccessRes { success: true }))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/triage/begin",
    responses(
        (status = 200, description = "Patient moved into triage", body = Patient),
        (status = 404, description = "No such patient", body = ErrorRes),
        (status = 409, description = "Patient is past triage", body = ErrorRes)
    )
)]
/// Marks the triage form as opened for a waiting patient.
#[axum::debug_handler]
async fn begin_triage(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state
        .engine
        .begin_triage(&id)
        .await
        .map_err(|e| error_response("begin triage", e))?;
    Ok(Json(patient))
}

#[utoipa::path(
    put,
    path = "/patients/{id}/triage",
    request_body = TriageInput,
    responses(
        (status = 200, description = "Triage stored", body = TriageRecord),
        (status = 404, description = "No such patient", body = ErrorRes),
        (status = 409, description = "Patient already completed", body = ErrorRes),
        (status = 422, description = "Rejected triage submission", body = ErrorRes)
    )
)]
/// Stores the triage assessment and sends the patient to consultation.
#[axum::debug_handler]
async fn submit_triage(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(mut input): Json<TriageInput>,
) -> Result<Json<TriageRecord>, ApiError> {
    input.patient_id = id;

    let record = state
        .engine
        .submit_triage(input)
        .await
        .map_err(|e| error_response("submit triage", e))?;
    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/triage",
    responses(
        (status = 200, description = "Triage record", body = TriageRecord),
        (status = 404, description = "No triage on file", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_triage(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<TriageRecord>, ApiError> {
    state
        .engine
        .triage_of(&id)
        .await
        .map_err(|e| error_response("get triage", e))?
        .map(Json)
        .ok_or_else(|| not_found("triage record", &id))
}

#[utoipa::path(
    put,
    path = "/patients/{id}/consultation",
    request_body = ConsultationInput,
    responses(
        (status = 200, description = "Consultation stored", body = ConsultationRecord),
        (status = 404, description = "No such patient", body = ErrorRes),
        (status = 422, description = "Rejected consultation submission", body = ErrorRes)
    )
)]
/// Stores the consultation (merged over the canonical defaults) and
/// completes the workflow for the patient.
#[axum::debug_handler]
async fn submit_consultation(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(mut input): Json<ConsultationInput>,
) -> Result<Json<ConsultationRecord>, ApiError> {
    input.patient_id = id;

    let record = state
        .engine
        .submit_consultation(input)
        .await
        .map_err(|e| error_response("submit consultation", e))?;
    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/consultation",
    responses(
        (status = 200, description = "Consultation record", body = ConsultationRecord),
        (status = 404, description = "No consultation on file", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_consultation(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<ConsultationRecord>, ApiError> {
    state
        .engine
        .consultation_of(&id)
        .await
        .map_err(|e| error_response("get consultation", e))?
        .map(Json)
        .ok_or_else(|| not_found("consultation record", &id))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/medications",
    request_body = MedicationInput,
    responses(
        (status = 201, description = "Medication recorded", body = MedicationRecord),
        (status = 404, description = "No such patient", body = ErrorRes),
        (status = 409, description = "No consultation on file", body = ErrorRes),
        (status = 422, description = "Nurse not on the roster", body = ErrorRes)
    )
)]
/// Records an administered medication for a completed patient.
#[axum::debug_handler]
async fn add_medication(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(mut input): Json<MedicationInput>,
) -> Result<(StatusCode, Json<MedicationRecord>), ApiError> {
    input.patient_id = id;

    let record = state
        .engine
        .administer_medication(input)
        .await
        .map_err(|e| error_response("add medication", e))?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/medications",
    responses(
        (status = 200, description = "Medication history, oldest first", body = [MedicationRecord])
    )
)]
#[axum::debug_handler]
async fn list_medications(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Vec<MedicationRecord>>, ApiError> {
    let records = state
        .engine
        .medications_of(&id)
        .await
        .map_err(|e| error_response("list medications", e))?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "All four stage buckets", body = DirectorySnapshot)
    )
)]
/// The four stage buckets in one response.
#[axum::debug_handler]
async fn dashboard(State(state): State<AppState>) -> Result<Json<DirectorySnapshot>, ApiError> {
    let snapshot = state
        .directory
        .snapshot()
        .await
        .map_err(|e| error_response("dashboard", e))?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    get,
    path = "/reports/summary",
    responses(
        (status = 200, description = "Current workload summary", body = WorkflowReport)
    )
)]
/// Patient totals per stage and triage counts per priority.
#[axum::debug_handler]
async fn report_summary(State(state): State<AppState>) -> Result<Json<WorkflowReport>, ApiError> {
    let report = state
        .engine
        .report()
        .await
        .map_err(|e| error_response("report summary", e))?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/staff",
    responses(
        (status = 200, description = "All staff members", body = [StaffMember])
    )
)]
#[axum::debug_handler]
async fn list_staff(State(state): State<AppState>) -> Json<Vec<StaffMember>> {
    Json(state.staff.list().await)
}

#[utoipa::path(
    post,
    path = "/staff",
    request_body = NewStaffMember,
    responses(
        (status = 201, description = "Staff member registered", body = StaffMember)
    )
)]
#[axum::debug_handler]
async fn register_staff(
    State(state): State<AppState>,
    Json(new): Json<NewStaffMember>,
) -> (StatusCode, Json<StaffMember>) {
    let member = state.staff.register(new).await;
    (StatusCode::CREATED, Json(member))
}

#[utoipa::path(
    put,
    path = "/staff/{id}/role",
    request_body = UpdateRoleReq,
    responses(
        (status = 200, description = "Role updated", body = StaffMember),
        (status = 404, description = "No such staff member", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn update_staff_role(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<UpdateRoleReq>,
) -> Result<Json<StaffMember>, ApiError> {
    let member = state
        .staff
        .update_role(&id, req.role)
        .await
        .map_err(|e| error_response("update staff role", e))?;
    Ok(Json(member))
}

#[utoipa::path(
    delete,
    path = "/staff/{id}",
    responses(
        (status = 200, description = "Staff member removed", body = SuccessRes),
        (status = 404, description = "No such staff member", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn remove_staff(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<SuccessRes>, ApiError> {
    state
        .staff
        .remove(&id)
        .await
        .map_err(|e| error_response("remove staff", e))?;
    Ok(Json(SuccessRes { success: true }))
}
