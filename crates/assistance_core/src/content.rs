//! crates/assistance_core/src/content.rs
//!
//! Administrative content: services, featured programs and news.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    FeaturedProgram, FeaturedProgramPatch, NewFeaturedProgram, NewNews, NewService, News,
    NewsPatch, Service, ServicePatch,
};
use crate::ports::{Clock, ContentRepository, PortResult};
use crate::validation::Validate;

#[derive(Clone)]
pub struct ContentService {
    repo: Arc<dyn ContentRepository>,
    clock: Arc<dyn Clock>,
}

impl ContentService {
    pub fn new(repo: Arc<dyn ContentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    // --- Services ---

    pub async fn create_service(&self, input: NewService) -> PortResult<Service> {
        input.validate()?;
        let service = self.repo.insert_service(input, self.clock.now()).await?;
        info!(service_id = %service.id, "Service created");
        Ok(service)
    }

    pub async fn list_services(&self) -> PortResult<Vec<Service>> {
        self.repo.list_active_services().await
    }

    pub async fn update_service(&self, id: Uuid, patch: ServicePatch) -> PortResult<Service> {
        patch.validate()?;
        self.repo.update_service(id, patch, self.clock.now()).await
    }

    pub async fn delete_service(&self, id: Uuid) -> PortResult<bool> {
        let deleted = self.repo.delete_service(id).await?;
        if deleted {
            info!(service_id = %id, "Service deleted");
        }
        Ok(deleted)
    }

    // --- Featured Programs ---

    pub async fn create_featured_program(
        &self,
        input: NewFeaturedProgram,
    ) -> PortResult<FeaturedProgram> {
        input.validate()?;
        let program = self.repo.insert_program(input, self.clock.now()).await?;
        info!(program_id = %program.id, "Featured program created");
        Ok(program)
    }

    pub async fn list_featured_programs(&self) -> PortResult<Vec<FeaturedProgram>> {
        self.repo.list_active_programs().await
    }

    pub async fn update_featured_program(
        &self,
        id: Uuid,
        patch: FeaturedProgramPatch,
    ) -> PortResult<FeaturedProgram> {
        patch.validate()?;
        self.repo.update_program(id, patch, self.clock.now()).await
    }

    pub async fn delete_featured_program(&self, id: Uuid) -> PortResult<bool> {
        let deleted = self.repo.delete_program(id).await?;
        if deleted {
            info!(program_id = %id, "Featured program deleted");
        }
        Ok(deleted)
    }

    // --- News ---

    pub async fn create_news(&self, input: NewNews) -> PortResult<News> {
        input.validate()?;
        let news = self.repo.insert_news(input, self.clock.now()).await?;
        info!(news_id = %news.id, published = news.is_published, "News created");
        Ok(news)
    }

    pub async fn list_news(&self) -> PortResult<Vec<News>> {
        self.repo.list_published_news().await
    }

    pub async fn list_announcements(&self) -> PortResult<Vec<News>> {
        self.repo.list_published_announcements().await
    }

    pub async fn update_news(&self, id: Uuid, patch: NewsPatch) -> PortResult<News> {
        patch.validate()?;
        self.repo.update_news(id, patch, self.clock.now()).await
    }

    pub async fn delete_news(&self, id: Uuid) -> PortResult<bool> {
        let deleted = self.repo.delete_news(id).await?;
        if deleted {
            info!(news_id = %id, "News deleted");
        }
        Ok(deleted)
    }
}
