//! services/api/src/adapters/memory.rs
//!
//! An in-process implementation of the repository ports. It keeps every table
//! behind one lock, so multi-row operations are atomic just like a database
//! transaction. The integration test suites run against it.

use assistance_core::domain::{
    Application, ApplicationTracking, Document, FeaturedProgram, FeaturedProgramPatch,
    NewFeaturedProgram, NewNews, NewService, News, NewsPatch, Service, ServicePatch,
    StatusTimelineEntry,
};
use assistance_core::ports::{
    ApplicationDraft, ApplicationRepository, ContentRepository, DocumentDraft, PortError,
    PortResult, TimelineDraft,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Rows are kept in insertion order.
#[derive(Default)]
struct Tables {
    applications: Vec<Application>,
    documents: Vec<Document>,
    timeline: Vec<StatusTimelineEntry>,
    services: Vec<Service>,
    programs: Vec<FeaturedProgram>,
    news: Vec<News>,
}

impl Tables {
    fn application_mut(&mut self, id: Uuid) -> PortResult<&mut Application> {
        self.applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| PortError::NotFound(format!("Application {} not found", id)))
    }

    fn push_timeline(&mut self, application_id: Uuid, entry: TimelineDraft) -> StatusTimelineEntry {
        let created = StatusTimelineEntry {
            id: Uuid::new_v4(),
            application_id,
            status: entry.status,
            notes: entry.notes,
            created_at: entry.created_at,
        };
        self.timeline.push(created.clone());
        created
    }

    /// Newest first; entries sharing a timestamp come back in reverse insertion order.
    fn timeline_for(&self, application_id: Uuid) -> Vec<StatusTimelineEntry> {
        let mut entries: Vec<StatusTimelineEntry> = self
            .timeline
            .iter()
            .rev()
            .filter(|t| t.application_id == application_id)
            .cloned()
            .collect();
        entries.sort_by_key(|t| Reverse(t.created_at));
        entries
    }

    fn documents_for(&self, application_id: Uuid) -> Vec<Document> {
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| d.application_id == application_id)
            .cloned()
            .collect();
        documents.sort_by_key(|d| d.uploaded_at);
        documents
    }
}

#[derive(Default)]
pub struct InMemoryAdapter {
    tables: RwLock<Tables>,
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timeline rows across all applications.
    pub async fn timeline_len(&self) -> usize {
        self.tables.read().await.timeline.len()
    }
}

//=========================================================================================
// `ApplicationRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl ApplicationRepository for InMemoryAdapter {
    async fn insert_application(
        &self,
        draft: ApplicationDraft,
        initial_entry: Option<TimelineDraft>,
    ) -> PortResult<Application> {
        let mut tables = self.tables.write().await;
        if tables
            .applications
            .iter()
            .any(|a| a.tracking_number == draft.tracking_number)
        {
            return Err(PortError::Unexpected(format!(
                "duplicate tracking number {}",
                draft.tracking_number
            )));
        }

        let f = draft.fields;
        let application = Application {
            id: Uuid::new_v4(),
            tracking_number: draft.tracking_number,
            full_name: f.full_name,
            nik: f.nik,
            place_of_birth: f.place_of_birth,
            date_of_birth: f.date_of_birth,
            gender: f.gender,
            marital_status: f.marital_status,
            phone: f.phone,
            email: f.email,
            address: f.address,
            village: f.village,
            district: f.district,
            assistance_category: f.assistance_category,
            assistance_type: f.assistance_type,
            reason: f.reason,
            family_members_count: f.family_members_count,
            monthly_income_range: f.monthly_income_range,
            status: draft.status,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        };
        tables.applications.push(application.clone());
        if let Some(entry) = initial_entry {
            tables.push_timeline(application.id, entry);
        }
        Ok(application)
    }

    async fn list_applications(&self) -> PortResult<Vec<Application>> {
        let tables = self.tables.read().await;
        let mut applications: Vec<Application> =
            tables.applications.iter().rev().cloned().collect();
        applications.sort_by_key(|a| Reverse(a.created_at));
        Ok(applications)
    }

    async fn get_application(&self, id: Uuid) -> PortResult<Application> {
        let tables = self.tables.read().await;
        tables
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Application {} not found", id)))
    }

    async fn update_status(&self, id: Uuid, entry: TimelineDraft) -> PortResult<Application> {
        let mut tables = self.tables.write().await;
        let application = tables.application_mut(id)?;
        application.status = entry.status;
        application.updated_at = entry.created_at;
        let updated = application.clone();
        tables.push_timeline(id, entry);
        Ok(updated)
    }

    async fn append_timeline_entry(
        &self,
        application_id: Uuid,
        entry: TimelineDraft,
    ) -> PortResult<StatusTimelineEntry> {
        let mut tables = self.tables.write().await;
        tables.application_mut(application_id)?;
        Ok(tables.push_timeline(application_id, entry))
    }

    async fn list_timeline(&self, application_id: Uuid) -> PortResult<Vec<StatusTimelineEntry>> {
        Ok(self.tables.read().await.timeline_for(application_id))
    }

    async fn insert_document(&self, draft: DocumentDraft) -> PortResult<Document> {
        let mut tables = self.tables.write().await;
        let f = draft.fields;
        tables.application_mut(f.application_id)?;
        let document = Document {
            id: Uuid::new_v4(),
            application_id: f.application_id,
            document_type: f.document_type,
            file_name: f.file_name,
            file_path: f.file_path,
            file_size: f.file_size,
            uploaded_at: draft.uploaded_at,
        };
        tables.documents.push(document.clone());
        Ok(document)
    }

    async fn list_documents(&self, application_id: Uuid) -> PortResult<Vec<Document>> {
        Ok(self.tables.read().await.documents_for(application_id))
    }

    async fn find_tracking(
        &self,
        tracking_number: &str,
        nik: &str,
    ) -> PortResult<Option<ApplicationTracking>> {
        let tables = self.tables.read().await;
        let Some(application) = tables
            .applications
            .iter()
            .find(|a| a.tracking_number == tracking_number && a.nik == nik)
            .cloned()
        else {
            return Ok(None);
        };
        let documents = tables.documents_for(application.id);
        let timeline = tables.timeline_for(application.id);
        Ok(Some(ApplicationTracking {
            application,
            documents,
            timeline,
        }))
    }
}

//=========================================================================================
// `ContentRepository` Trait Implementation
//=========================================================================================

fn not_found(kind: &str, id: Uuid) -> PortError {
    PortError::NotFound(format!("{} {} not found", kind, id))
}

#[async_trait]
impl ContentRepository for InMemoryAdapter {
    async fn insert_service(&self, input: NewService, now: DateTime<Utc>) -> PortResult<Service> {
        let service = Service {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            icon: input.icon,
            is_active: input.is_active,
            order_index: input.order_index,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.services.push(service.clone());
        Ok(service)
    }

    async fn list_active_services(&self) -> PortResult<Vec<Service>> {
        let tables = self.tables.read().await;
        let mut services: Vec<Service> = tables
            .services
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect();
        services.sort_by_key(|s| s.order_index);
        Ok(services)
    }

    async fn update_service(
        &self,
        id: Uuid,
        patch: ServicePatch,
        now: DateTime<Utc>,
    ) -> PortResult<Service> {
        let mut tables = self.tables.write().await;
        let service = tables
            .services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("Service", id))?;
        if let Some(title) = patch.title {
            service.title = title;
        }
        if let Some(description) = patch.description {
            service.description = description;
        }
        if let Some(icon) = patch.icon {
            service.icon = icon;
        }
        if let Some(is_active) = patch.is_active {
            service.is_active = is_active;
        }
        if let Some(order_index) = patch.order_index {
            service.order_index = order_index;
        }
        service.updated_at = now;
        Ok(service.clone())
    }

    async fn delete_service(&self, id: Uuid) -> PortResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.services.len();
        tables.services.retain(|s| s.id != id);
        Ok(tables.services.len() < before)
    }

    async fn insert_program(
        &self,
        input: NewFeaturedProgram,
        now: DateTime<Utc>,
    ) -> PortResult<FeaturedProgram> {
        let program = FeaturedProgram {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            image_path: input.image_path,
            target_beneficiaries: input.target_beneficiaries,
            budget: input.budget,
            is_active: input.is_active,
            order_index: input.order_index,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.programs.push(program.clone());
        Ok(program)
    }

    async fn list_active_programs(&self) -> PortResult<Vec<FeaturedProgram>> {
        let tables = self.tables.read().await;
        let mut programs: Vec<FeaturedProgram> = tables
            .programs
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        programs.sort_by_key(|p| p.order_index);
        Ok(programs)
    }

    async fn update_program(
        &self,
        id: Uuid,
        patch: FeaturedProgramPatch,
        now: DateTime<Utc>,
    ) -> PortResult<FeaturedProgram> {
        let mut tables = self.tables.write().await;
        let program = tables
            .programs
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Featured program", id))?;
        if let Some(title) = patch.title {
            program.title = title;
        }
        if let Some(description) = patch.description {
            program.description = description;
        }
        if let Some(image_path) = patch.image_path {
            program.image_path = image_path;
        }
        if let Some(target) = patch.target_beneficiaries {
            program.target_beneficiaries = target;
        }
        if let Some(budget) = patch.budget {
            program.budget = budget;
        }
        if let Some(is_active) = patch.is_active {
            program.is_active = is_active;
        }
        if let Some(order_index) = patch.order_index {
            program.order_index = order_index;
        }
        program.updated_at = now;
        Ok(program.clone())
    }

    async fn delete_program(&self, id: Uuid) -> PortResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.programs.len();
        tables.programs.retain(|p| p.id != id);
        Ok(tables.programs.len() < before)
    }

    async fn insert_news(&self, input: NewNews, now: DateTime<Utc>) -> PortResult<News> {
        let news = News {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            summary: input.summary,
            image_path: input.image_path,
            is_announcement: input.is_announcement,
            is_published: input.is_published,
            published_at: input.is_published.then_some(now),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.news.push(news.clone());
        Ok(news)
    }

    async fn list_published_news(&self) -> PortResult<Vec<News>> {
        let tables = self.tables.read().await;
        let mut news: Vec<News> = tables
            .news
            .iter()
            .filter(|n| n.is_published)
            .cloned()
            .collect();
        news.sort_by_key(|n| Reverse((n.published_at, n.created_at)));
        Ok(news)
    }

    async fn list_published_announcements(&self) -> PortResult<Vec<News>> {
        let tables = self.tables.read().await;
        let mut news: Vec<News> = tables
            .news
            .iter()
            .filter(|n| n.is_published && n.is_announcement)
            .cloned()
            .collect();
        news.sort_by_key(|n| Reverse(n.published_at));
        Ok(news)
    }

    async fn update_news(
        &self,
        id: Uuid,
        patch: NewsPatch,
        now: DateTime<Utc>,
    ) -> PortResult<News> {
        let mut tables = self.tables.write().await;
        let news = tables
            .news
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| not_found("News", id))?;
        if let Some(title) = patch.title {
            news.title = title;
        }
        if let Some(content) = patch.content {
            news.content = content;
        }
        if let Some(summary) = patch.summary {
            news.summary = summary;
        }
        if let Some(image_path) = patch.image_path {
            news.image_path = image_path;
        }
        if let Some(is_announcement) = patch.is_announcement {
            news.is_announcement = is_announcement;
        }
        if let Some(is_published) = patch.is_published {
            news.is_published = is_published;
            if is_published && news.published_at.is_none() {
                news.published_at = Some(now);
            }
        }
        news.updated_at = now;
        Ok(news.clone())
    }

    async fn delete_news(&self, id: Uuid) -> PortResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.news.len();
        tables.news.retain(|n| n.id != id);
        Ok(tables.news.len() < before)
    }
}
