//! crates/assistance_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases, clocks
//! or random sources.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationStatus, ApplicationTracking, Document, FeaturedProgram,
    FeaturedProgramPatch, NewApplication, NewDocument, NewFeaturedProgram, NewNews, NewService,
    News, NewsPatch, Service, ServicePatch, StatusTimelineEntry,
};
use crate::validation::ValidationErrors;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port and component operations.
/// This abstracts away the specific errors from external services (e.g., database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Invalid(ValidationErrors),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<ValidationErrors> for PortError {
    fn from(errors: ValidationErrors) -> Self {
        PortError::Invalid(errors)
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Write Drafts
//=========================================================================================

/// A fully prepared application row. The repository only assigns the id.
#[derive(Debug, Clone)]
pub struct ApplicationDraft {
    pub tracking_number: String,
    pub fields: NewApplication,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// A timeline row waiting for its id and owning application.
#[derive(Debug, Clone)]
pub struct TimelineDraft {
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DocumentDraft {
    pub fields: NewDocument,
    pub uploaded_at: DateTime<Utc>,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Storage for the application aggregate: applications, their documents and
/// their status timeline.
///
/// Operations touching more than one row must be atomic.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Inserts the application and, when given, its first timeline entry.
    async fn insert_application(
        &self,
        draft: ApplicationDraft,
        initial_entry: Option<TimelineDraft>,
    ) -> PortResult<Application>;

    /// All applications, newest first.
    async fn list_applications(&self) -> PortResult<Vec<Application>>;

    async fn get_application(&self, id: Uuid) -> PortResult<Application>;

    /// Sets the status, refreshes `updated_at` and appends `entry`.
    /// Fails with `NotFound` and writes nothing when `id` is unknown.
    async fn update_status(&self, id: Uuid, entry: TimelineDraft) -> PortResult<Application>;

    /// Appends an entry without touching the application's own status.
    async fn append_timeline_entry(
        &self,
        application_id: Uuid,
        entry: TimelineDraft,
    ) -> PortResult<StatusTimelineEntry>;

    /// Timeline of one application, newest first.
    async fn list_timeline(&self, application_id: Uuid) -> PortResult<Vec<StatusTimelineEntry>>;

    async fn insert_document(&self, draft: DocumentDraft) -> PortResult<Document>;

    async fn list_documents(&self, application_id: Uuid) -> PortResult<Vec<Document>>;

    /// Resolves the exact (tracking number, NIK) pair to the full aggregate
    /// from a single consistent snapshot. `Ok(None)` when nothing matches.
    async fn find_tracking(
        &self,
        tracking_number: &str,
        nik: &str,
    ) -> PortResult<Option<ApplicationTracking>>;
}

/// Storage for the public content tables.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    // --- Services ---
    async fn insert_service(&self, input: NewService, now: DateTime<Utc>) -> PortResult<Service>;

    /// Active services ordered by `order_index`.
    async fn list_active_services(&self) -> PortResult<Vec<Service>>;

    async fn update_service(
        &self,
        id: Uuid,
        patch: ServicePatch,
        now: DateTime<Utc>,
    ) -> PortResult<Service>;

    /// Returns whether a row was removed.
    async fn delete_service(&self, id: Uuid) -> PortResult<bool>;

    // --- Featured Programs ---
    async fn insert_program(
        &self,
        input: NewFeaturedProgram,
        now: DateTime<Utc>,
    ) -> PortResult<FeaturedProgram>;

    /// Active programs ordered by `order_index`.
    async fn list_active_programs(&self) -> PortResult<Vec<FeaturedProgram>>;

    async fn update_program(
        &self,
        id: Uuid,
        patch: FeaturedProgramPatch,
        now: DateTime<Utc>,
    ) -> PortResult<FeaturedProgram>;

    async fn delete_program(&self, id: Uuid) -> PortResult<bool>;

    // --- News ---
    /// `published_at` is stamped with `now` when the item is created published.
    async fn insert_news(&self, input: NewNews, now: DateTime<Utc>) -> PortResult<News>;

    /// Published items, by `published_at` then `created_at`, newest first.
    async fn list_published_news(&self) -> PortResult<Vec<News>>;

    /// Published announcements, newest `published_at` first.
    async fn list_published_announcements(&self) -> PortResult<Vec<News>>;

    /// Publishing an item that was never published stamps `published_at` with `now`.
    async fn update_news(
        &self,
        id: Uuid,
        patch: NewsPatch,
        now: DateTime<Utc>,
    ) -> PortResult<News>;

    async fn delete_news(&self, id: Uuid) -> PortResult<bool>;
}

/// Source of "now" for every timestamp the core writes.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Generates public tracking codes.
pub trait TrackingCodeSource: Send + Sync {
    fn next_code(&self, now: DateTime<Utc>) -> String;
}
