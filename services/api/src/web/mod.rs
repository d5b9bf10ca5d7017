pub mod content;
pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;

use self::state::AppState;

/// JSON bodies are small; document files never pass through this service.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds every API route over the shared state. CORS and the Swagger UI are
/// layered on by the binary.
pub fn build_router(state: Arc<AppState>) -> Router {
    let application_routes = Router::new()
        .route(
            "/applications",
            post(rest::create_application_handler).get(rest::list_applications_handler),
        )
        .route("/applications/track", post(rest::track_application_handler))
        .route("/applications/{id}", get(rest::get_application_handler))
        .route(
            "/applications/{id}/status",
            put(rest::update_application_status_handler),
        )
        .route(
            "/applications/{id}/timeline",
            post(rest::add_timeline_entry_handler).get(rest::list_timeline_handler),
        )
        .route(
            "/applications/{id}/documents",
            post(rest::upload_document_handler).get(rest::list_documents_handler),
        );

    let content_routes = Router::new()
        .route(
            "/services",
            get(content::list_services_handler).post(content::create_service_handler),
        )
        .route(
            "/services/{id}",
            patch(content::update_service_handler).delete(content::delete_service_handler),
        )
        .route(
            "/programs",
            get(content::list_programs_handler).post(content::create_program_handler),
        )
        .route(
            "/programs/{id}",
            patch(content::update_program_handler).delete(content::delete_program_handler),
        )
        .route(
            "/news",
            get(content::list_news_handler).post(content::create_news_handler),
        )
        .route(
            "/news/announcements",
            get(content::list_announcements_handler),
        )
        .route(
            "/news/{id}",
            patch(content::update_news_handler).delete(content::delete_news_handler),
        );

    Router::new()
        .route("/health", get(rest::health_handler))
        .merge(application_routes)
        .merge(content_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .with_state(state)
}
