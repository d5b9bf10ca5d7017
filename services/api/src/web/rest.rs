//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the application lifecycle endpoints and the
//! master definition for the OpenAPI specification.

use crate::error::{ApiResult, ErrorBody};
use crate::web::content;
use crate::web::protocol::{
    AddTimelineRequest, DeleteResponse, HealthResponse, UpdateStatusRequest,
    UploadDocumentRequest,
};
use crate::web::state::AppState;
use assistance_core::domain::{
    Application, ApplicationStatus, ApplicationTracking, AssistanceCategory, Document,
    DocumentType, FeaturedProgram, FeaturedProgramPatch, Gender, IncomeRange, MaritalStatus,
    NewApplication, NewDocument, NewFeaturedProgram, NewNews, NewService, NewTimelineEntry, News,
    NewsPatch, Service, ServicePatch, StatusTimelineEntry, TrackApplicationQuery,
};
use assistance_core::validation::FieldError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        create_application_handler,
        list_applications_handler,
        get_application_handler,
        track_application_handler,
        update_application_status_handler,
        add_timeline_entry_handler,
        list_timeline_handler,
        upload_document_handler,
        list_documents_handler,
        content::list_services_handler,
        content::create_service_handler,
        content::update_service_handler,
        content::delete_service_handler,
        content::list_programs_handler,
        content::create_program_handler,
        content::update_program_handler,
        content::delete_program_handler,
        content::list_news_handler,
        content::list_announcements_handler,
        content::create_news_handler,
        content::update_news_handler,
        content::delete_news_handler,
    ),
    components(
        schemas(
            Application, NewApplication, ApplicationStatus, ApplicationTracking,
            TrackApplicationQuery, StatusTimelineEntry, Document, DocumentType, Gender,
            MaritalStatus, IncomeRange, AssistanceCategory, Service, NewService, ServicePatch,
            FeaturedProgram, NewFeaturedProgram, FeaturedProgramPatch, News, NewNews, NewsPatch,
            UpdateStatusRequest, AddTimelineRequest, UploadDocumentRequest, DeleteResponse,
            HealthResponse, ErrorBody, FieldError
        )
    ),
    tags(
        (name = "Applications", description = "Intake, status lifecycle and public tracking of social assistance applications."),
        (name = "Content", description = "Services, featured programs and news published on the portal.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Health
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

//=========================================================================================
// Application Handlers
//=========================================================================================

/// Submit a new application.
///
/// The response carries the generated tracking number the applicant needs,
/// together with their NIK, to track the application later.
#[utoipa::path(
    post,
    path = "/applications",
    tag = "Applications",
    request_body = NewApplication,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 422, description = "Payload failed validation", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn create_application_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewApplication>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let application = state.applications.create_application(input).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// List every application, newest first.
#[utoipa::path(
    get,
    path = "/applications",
    tag = "Applications",
    responses((status = 200, description = "All applications", body = [Application]))
)]
pub async fn list_applications_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Application>>> {
    Ok(Json(state.applications.list_applications().await?))
}

#[utoipa::path(
    get,
    path = "/applications/{id}",
    tag = "Applications",
    params(("id" = Uuid, Path, description = "Application id")),
    responses(
        (status = 200, description = "The application", body = Application),
        (status = 404, description = "Unknown application", body = ErrorBody)
    )
)]
pub async fn get_application_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Application>> {
    let Path(id) = path?;
    Ok(Json(state.applications.get_application(id).await?))
}

/// Look up an application by tracking number and NIK.
///
/// Responds `200` with `null` when the pair matches nothing, without saying
/// which of the two values was wrong.
#[utoipa::path(
    post,
    path = "/applications/track",
    tag = "Applications",
    request_body = TrackApplicationQuery,
    responses(
        (status = 200, description = "The application with its documents and timeline, or null", body = ApplicationTracking),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn track_application_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TrackApplicationQuery>, JsonRejection>,
) -> ApiResult<Json<Option<ApplicationTracking>>> {
    let Json(query) = payload?;
    Ok(Json(state.applications.track_application(query).await?))
}

/// Change an application's status and record it on the timeline.
#[utoipa::path(
    put,
    path = "/applications/{id}/status",
    tag = "Applications",
    params(("id" = Uuid, Path, description = "Application id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated application", body = Application),
        (status = 404, description = "Unknown application", body = ErrorBody),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn update_application_status_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> ApiResult<Json<Application>> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let application = state
        .applications
        .update_application_status(id, req.status)
        .await?;
    Ok(Json(application))
}

/// Append a timeline entry without changing the application's status.
#[utoipa::path(
    post,
    path = "/applications/{id}/timeline",
    tag = "Applications",
    params(("id" = Uuid, Path, description = "Application id")),
    request_body = AddTimelineRequest,
    responses(
        (status = 201, description = "Entry recorded", body = StatusTimelineEntry),
        (status = 404, description = "Unknown application", body = ErrorBody)
    )
)]
pub async fn add_timeline_entry_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AddTimelineRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(application_id) = path?;
    let Json(req) = payload?;
    let entry = state
        .applications
        .add_status_timeline_entry(NewTimelineEntry {
            application_id,
            status: req.status,
            notes: req.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// The status timeline of one application, newest first.
#[utoipa::path(
    get,
    path = "/applications/{id}/timeline",
    tag = "Applications",
    params(("id" = Uuid, Path, description = "Application id")),
    responses((status = 200, description = "Timeline entries", body = [StatusTimelineEntry]))
)]
pub async fn list_timeline_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Vec<StatusTimelineEntry>>> {
    let Path(application_id) = path?;
    Ok(Json(
        state
            .applications
            .list_status_timeline(application_id)
            .await?,
    ))
}

/// Record metadata of an uploaded supporting document.
#[utoipa::path(
    post,
    path = "/applications/{id}/documents",
    tag = "Applications",
    params(("id" = Uuid, Path, description = "Application id")),
    request_body = UploadDocumentRequest,
    responses(
        (status = 201, description = "Document recorded", body = Document),
        (status = 404, description = "Unknown application", body = ErrorBody),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn upload_document_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UploadDocumentRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(application_id) = path?;
    let Json(req) = payload?;
    let document = state
        .applications
        .upload_document_metadata(NewDocument {
            application_id,
            document_type: req.document_type,
            file_name: req.file_name,
            file_path: req.file_path,
            file_size: req.file_size,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/applications/{id}/documents",
    tag = "Applications",
    params(("id" = Uuid, Path, description = "Application id")),
    responses((status = 200, description = "Document metadata", body = [Document]))
)]
pub async fn list_documents_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Vec<Document>>> {
    let Path(application_id) = path?;
    Ok(Json(state.applications.list_documents(application_id).await?))
}

/// Shared by every delete endpoint.
pub(crate) fn deleted(deleted: bool) -> Json<DeleteResponse> {
    Json(DeleteResponse { deleted })
}
