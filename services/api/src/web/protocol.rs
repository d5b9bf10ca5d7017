//! services/api/src/web/protocol.rs
//!
//! Request and response payloads that exist only at the HTTP boundary.
//! Domain types from the core crate are used directly everywhere else.

use assistance_core::domain::{ApplicationStatus, DocumentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `PUT /applications/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// Body of `POST /applications/{id}/timeline`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddTimelineRequest {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /applications/{id}/documents`. The file itself is stored elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadDocumentRequest {
    pub document_type: DocumentType,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
}

/// Result of every delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
