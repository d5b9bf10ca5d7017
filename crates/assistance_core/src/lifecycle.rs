//! crates/assistance_core/src/lifecycle.rs
//!
//! The application lifecycle: intake, status changes, the audit timeline,
//! document metadata and the public tracking lookup.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationStatus, ApplicationTracking, Document, NewApplication, NewDocument,
    NewTimelineEntry, StatusTimelineEntry, TrackApplicationQuery,
};
use crate::ports::{
    ApplicationDraft, ApplicationRepository, Clock, DocumentDraft, PortResult, TimelineDraft,
    TrackingCodeSource,
};
use crate::validation::Validate;

/// Note attached to the optional entry written at intake.
pub const SUBMITTED_NOTE: &str = "Application submitted";

/// The note recorded by a combined status update.
pub fn status_change_note(status: ApplicationStatus) -> String {
    format!("Status updated to {status}")
}

/// Coordinates the application aggregate. Every collaborator is injected.
#[derive(Clone)]
pub struct ApplicationService {
    repo: Arc<dyn ApplicationRepository>,
    clock: Arc<dyn Clock>,
    codes: Arc<dyn TrackingCodeSource>,
    seed_initial_timeline: bool,
}

impl ApplicationService {
    pub fn new(
        repo: Arc<dyn ApplicationRepository>,
        clock: Arc<dyn Clock>,
        codes: Arc<dyn TrackingCodeSource>,
    ) -> Self {
        Self {
            repo,
            clock,
            codes,
            seed_initial_timeline: false,
        }
    }

    /// When enabled, intake also writes a `SUBMITTED` timeline entry.
    pub fn with_initial_timeline(mut self, enabled: bool) -> Self {
        self.seed_initial_timeline = enabled;
        self
    }

    /// Validates and stores a new application in the `SUBMITTED` state.
    pub async fn create_application(&self, input: NewApplication) -> PortResult<Application> {
        let now = self.clock.now();
        let mut errors = input.validate().err().unwrap_or_default();
        if let Err(e) = input.validate_birth_date(now.date_naive()) {
            errors.merge(e);
        }
        errors.into_result()?;

        let draft = ApplicationDraft {
            tracking_number: self.codes.next_code(now),
            fields: input,
            status: ApplicationStatus::INITIAL,
            created_at: now,
        };
        let initial_entry = self.seed_initial_timeline.then(|| TimelineDraft {
            status: ApplicationStatus::INITIAL,
            notes: Some(SUBMITTED_NOTE.to_string()),
            created_at: now,
        });

        let application = self.repo.insert_application(draft, initial_entry).await?;
        info!(
            application_id = %application.id,
            tracking_number = %application.tracking_number,
            "Application submitted"
        );
        Ok(application)
    }

    /// All applications, newest first.
    pub async fn list_applications(&self) -> PortResult<Vec<Application>> {
        self.repo.list_applications().await
    }

    pub async fn get_application(&self, id: Uuid) -> PortResult<Application> {
        self.repo.get_application(id).await
    }

    /// Moves an application to `status` and records the change on its timeline.
    ///
    /// Any status may follow any other; repeating the current status still
    /// records a new timeline entry.
    pub async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> PortResult<Application> {
        let entry = TimelineDraft {
            status,
            notes: Some(status_change_note(status)),
            created_at: self.clock.now(),
        };
        let application = self.repo.update_status(id, entry).await?;
        info!(application_id = %id, status = %status, "Application status updated");
        Ok(application)
    }

    /// Appends an audit entry without changing the application's status.
    pub async fn add_status_timeline_entry(
        &self,
        input: NewTimelineEntry,
    ) -> PortResult<StatusTimelineEntry> {
        input.validate()?;
        let entry = TimelineDraft {
            status: input.status,
            notes: input.notes,
            created_at: self.clock.now(),
        };
        let created = self
            .repo
            .append_timeline_entry(input.application_id, entry)
            .await?;
        debug!(
            application_id = %created.application_id,
            status = %created.status,
            "Timeline entry added"
        );
        Ok(created)
    }

    /// Timeline of one application, newest first.
    pub async fn list_status_timeline(
        &self,
        application_id: Uuid,
    ) -> PortResult<Vec<StatusTimelineEntry>> {
        self.repo.list_timeline(application_id).await
    }

    /// Records metadata for a file that was stored elsewhere.
    pub async fn upload_document_metadata(&self, input: NewDocument) -> PortResult<Document> {
        input.validate()?;
        let draft = DocumentDraft {
            fields: input,
            uploaded_at: self.clock.now(),
        };
        let document = self.repo.insert_document(draft).await?;
        debug!(
            application_id = %document.application_id,
            document_id = %document.id,
            "Document metadata stored"
        );
        Ok(document)
    }

    pub async fn list_documents(&self, application_id: Uuid) -> PortResult<Vec<Document>> {
        self.repo.list_documents(application_id).await
    }

    /// Public lookup by (tracking number, NIK).
    ///
    /// Both values must match one stored application exactly. A miss is
    /// `Ok(None)` and never reveals which of the two values was wrong.
    pub async fn track_application(
        &self,
        query: TrackApplicationQuery,
    ) -> PortResult<Option<ApplicationTracking>> {
        query.validate()?;
        let found = self
            .repo
            .find_tracking(&query.tracking_number, &query.nik)
            .await?;
        if found.is_none() {
            debug!("Tracking lookup matched no application");
        }
        Ok(found)
    }
}
