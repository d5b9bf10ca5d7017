//! services/api/src/web/content.rs
//!
//! Handlers for the administrative content endpoints: services, featured
//! programs and news.

use crate::error::{ApiResult, ErrorBody};
use crate::web::protocol::DeleteResponse;
use crate::web::rest::deleted;
use crate::web::state::AppState;
use assistance_core::domain::{
    FeaturedProgram, FeaturedProgramPatch, NewFeaturedProgram, NewNews, NewService, News,
    NewsPatch, Service, ServicePatch,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use uuid::Uuid;

//=========================================================================================
// Services
//=========================================================================================

/// Active services ordered for display.
#[utoipa::path(
    get,
    path = "/services",
    tag = "Content",
    responses((status = 200, description = "Active services", body = [Service]))
)]
pub async fn list_services_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Service>>> {
    Ok(Json(state.content.list_services().await?))
}

#[utoipa::path(
    post,
    path = "/services",
    tag = "Content",
    request_body = NewService,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn create_service_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewService>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let service = state.content.create_service(input).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// Partial update. Absent fields are left untouched.
#[utoipa::path(
    patch,
    path = "/services/{id}",
    tag = "Content",
    params(("id" = Uuid, Path, description = "Service id")),
    request_body = ServicePatch,
    responses(
        (status = 200, description = "Updated service", body = Service),
        (status = 404, description = "Unknown service", body = ErrorBody),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn update_service_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ServicePatch>, JsonRejection>,
) -> ApiResult<Json<Service>> {
    let Path(id) = path?;
    let Json(patch) = payload?;
    Ok(Json(state.content.update_service(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "Content",
    params(("id" = Uuid, Path, description = "Service id")),
    responses((status = 200, description = "Whether a row was removed", body = DeleteResponse))
)]
pub async fn delete_service_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = path?;
    Ok(deleted(state.content.delete_service(id).await?))
}

//=========================================================================================
// Featured Programs
//=========================================================================================

#[utoipa::path(
    get,
    path = "/programs",
    tag = "Content",
    responses((status = 200, description = "Active featured programs", body = [FeaturedProgram]))
)]
pub async fn list_programs_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<FeaturedProgram>>> {
    Ok(Json(state.content.list_featured_programs().await?))
}

#[utoipa::path(
    post,
    path = "/programs",
    tag = "Content",
    request_body = NewFeaturedProgram,
    responses(
        (status = 201, description = "Program created", body = FeaturedProgram),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn create_program_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewFeaturedProgram>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let program = state.content.create_featured_program(input).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

#[utoipa::path(
    patch,
    path = "/programs/{id}",
    tag = "Content",
    params(("id" = Uuid, Path, description = "Program id")),
    request_body = FeaturedProgramPatch,
    responses(
        (status = 200, description = "Updated program", body = FeaturedProgram),
        (status = 404, description = "Unknown program", body = ErrorBody),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn update_program_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<FeaturedProgramPatch>, JsonRejection>,
) -> ApiResult<Json<FeaturedProgram>> {
    let Path(id) = path?;
    let Json(patch) = payload?;
    Ok(Json(state.content.update_featured_program(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/programs/{id}",
    tag = "Content",
    params(("id" = Uuid, Path, description = "Program id")),
    responses((status = 200, description = "Whether a row was removed", body = DeleteResponse))
)]
pub async fn delete_program_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = path?;
    Ok(deleted(state.content.delete_featured_program(id).await?))
}

//=========================================================================================
// News
//=========================================================================================

/// Published news, most recently published first.
#[utoipa::path(
    get,
    path = "/news",
    tag = "Content",
    responses((status = 200, description = "Published news", body = [News]))
)]
pub async fn list_news_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<News>>> {
    Ok(Json(state.content.list_news().await?))
}

/// Published news flagged as announcements.
#[utoipa::path(
    get,
    path = "/news/announcements",
    tag = "Content",
    responses((status = 200, description = "Published announcements", body = [News]))
)]
pub async fn list_announcements_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<News>>> {
    Ok(Json(state.content.list_announcements().await?))
}

#[utoipa::path(
    post,
    path = "/news",
    tag = "Content",
    request_body = NewNews,
    responses(
        (status = 201, description = "News created", body = News),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn create_news_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewNews>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let news = state.content.create_news(input).await?;
    Ok((StatusCode::CREATED, Json(news)))
}

/// Partial update. Publishing an item for the first time stamps `published_at`.
#[utoipa::path(
    patch,
    path = "/news/{id}",
    tag = "Content",
    params(("id" = Uuid, Path, description = "News id")),
    request_body = NewsPatch,
    responses(
        (status = 200, description = "Updated news", body = News),
        (status = 404, description = "Unknown news item", body = ErrorBody),
        (status = 422, description = "Payload failed validation", body = ErrorBody)
    )
)]
pub async fn update_news_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<NewsPatch>, JsonRejection>,
) -> ApiResult<Json<News>> {
    let Path(id) = path?;
    let Json(patch) = payload?;
    Ok(Json(state.content.update_news(id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/news/{id}",
    tag = "Content",
    params(("id" = Uuid, Path, description = "News id")),
    responses((status = 200, description = "Whether a row was removed", body = DeleteResponse))
)]
pub async fn delete_news_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = path?;
    Ok(deleted(state.content.delete_news(id).await?))
}
