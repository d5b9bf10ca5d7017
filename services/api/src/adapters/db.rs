//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ApplicationRepository` and `ContentRepository` ports from the `core` crate.
//! It handles all interactions with the PostgreSQL database using `sqlx`.

use assistance_core::domain::{
    Application, ApplicationTracking, Document, FeaturedProgram, FeaturedProgramPatch,
    NewFeaturedProgram, NewNews, NewService, News, NewsPatch, Service, ServicePatch,
    StatusTimelineEntry, UnknownVariant,
};
use assistance_core::ports::{
    ApplicationDraft, ApplicationRepository, ContentRepository, DocumentDraft, PortError,
    PortResult, TimelineDraft,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the repository ports on PostgreSQL.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn application_not_found(id: Uuid) -> PortError {
    PortError::NotFound(format!("Application {} not found", id))
}

fn decode<T>(raw: &str) -> PortResult<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    raw.parse()
        .map_err(|e: UnknownVariant| PortError::Unexpected(format!("Corrupt row: {}", e)))
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

const APPLICATION_COLUMNS: &str = "id, tracking_number, full_name, nik, place_of_birth, \
    date_of_birth, gender, marital_status, phone, email, address, village, district, \
    assistance_category, assistance_type, reason, family_members_count, \
    monthly_income_range, status, created_at, updated_at";

#[derive(FromRow)]
struct ApplicationRecord {
    id: Uuid,
    tracking_number: String,
    full_name: String,
    nik: String,
    place_of_birth: String,
    date_of_birth: NaiveDate,
    gender: String,
    marital_status: String,
    phone: String,
    email: String,
    address: String,
    village: String,
    district: String,
    assistance_category: String,
    assistance_type: String,
    reason: String,
    family_members_count: i32,
    monthly_income_range: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl ApplicationRecord {
    fn to_domain(self) -> PortResult<Application> {
        Ok(Application {
            id: self.id,
            tracking_number: self.tracking_number,
            full_name: self.full_name,
            nik: self.nik,
            place_of_birth: self.place_of_birth,
            date_of_birth: self.date_of_birth,
            gender: decode(&self.gender)?,
            marital_status: decode(&self.marital_status)?,
            phone: self.phone,
            email: self.email,
            address: self.address,
            village: self.village,
            district: self.district,
            assistance_category: decode(&self.assistance_category)?,
            assistance_type: self.assistance_type,
            reason: self.reason,
            family_members_count: self.family_members_count,
            monthly_income_range: decode(&self.monthly_income_range)?,
            status: decode(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const TIMELINE_COLUMNS: &str = "id, application_id, status, notes, created_at";

#[derive(FromRow)]
struct TimelineRecord {
    id: Uuid,
    application_id: Uuid,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}
impl TimelineRecord {
    fn to_domain(self) -> PortResult<StatusTimelineEntry> {
        Ok(StatusTimelineEntry {
            id: self.id,
            application_id: self.application_id,
            status: decode(&self.status)?,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

const DOCUMENT_COLUMNS: &str =
    "id, application_id, document_type, file_name, file_path, file_size, uploaded_at";

#[derive(FromRow)]
struct DocumentRecord {
    id: Uuid,
    application_id: Uuid,
    document_type: String,
    file_name: String,
    file_path: String,
    file_size: i64,
    uploaded_at: DateTime<Utc>,
}
impl DocumentRecord {
    fn to_domain(self) -> PortResult<Document> {
        Ok(Document {
            id: self.id,
            application_id: self.application_id,
            document_type: decode(&self.document_type)?,
            file_name: self.file_name,
            file_path: self.file_path,
            file_size: self.file_size,
            uploaded_at: self.uploaded_at,
        })
    }
}

const SERVICE_COLUMNS: &str =
    "id, title, description, icon, is_active, order_index, created_at, updated_at";

#[derive(FromRow)]
struct ServiceRecord {
    id: Uuid,
    title: String,
    description: String,
    icon: Option<String>,
    is_active: bool,
    order_index: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl ServiceRecord {
    fn to_domain(self) -> Service {
        Service {
            id: self.id,
            title: self.title,
            description: self.description,
            icon: self.icon,
            is_active: self.is_active,
            order_index: self.order_index,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// NUMERIC is read and written through FLOAT8 casts.
const PROGRAM_COLUMNS: &str = "id, title, description, image_path, target_beneficiaries, \
    budget::FLOAT8 AS budget, is_active, order_index, created_at, updated_at";

#[derive(FromRow)]
struct ProgramRecord {
    id: Uuid,
    title: String,
    description: String,
    image_path: Option<String>,
    target_beneficiaries: Option<String>,
    budget: Option<f64>,
    is_active: bool,
    order_index: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl ProgramRecord {
    fn to_domain(self) -> FeaturedProgram {
        FeaturedProgram {
            id: self.id,
            title: self.title,
            description: self.description,
            image_path: self.image_path,
            target_beneficiaries: self.target_beneficiaries,
            budget: self.budget,
            is_active: self.is_active,
            order_index: self.order_index,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const NEWS_COLUMNS: &str = "id, title, content, summary, image_path, is_announcement, \
    is_published, published_at, created_at, updated_at";

#[derive(FromRow)]
struct NewsRecord {
    id: Uuid,
    title: String,
    content: String,
    summary: Option<String>,
    image_path: Option<String>,
    is_announcement: bool,
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl NewsRecord {
    fn to_domain(self) -> News {
        News {
            id: self.id,
            title: self.title,
            content: self.content,
            summary: self.summary,
            image_path: self.image_path,
            is_announcement: self.is_announcement,
            is_published: self.is_published,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn collect<R, T>(records: Vec<R>, f: impl Fn(R) -> PortResult<T>) -> PortResult<Vec<T>> {
    records.into_iter().map(f).collect()
}

//=========================================================================================
// `ApplicationRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl ApplicationRepository for DbAdapter {
    async fn insert_application(
        &self,
        draft: ApplicationDraft,
        initial_entry: Option<TimelineDraft>,
    ) -> PortResult<Application> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let fields = draft.fields;

        let sql = format!(
            "INSERT INTO social_assistance_applications (id, tracking_number, full_name, nik, \
             place_of_birth, date_of_birth, gender, marital_status, phone, email, address, \
             village, district, assistance_category, assistance_type, reason, \
             family_members_count, monthly_income_range, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $20) RETURNING {}",
            APPLICATION_COLUMNS
        );
        let record = sqlx::query_as::<_, ApplicationRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(&draft.tracking_number)
            .bind(&fields.full_name)
            .bind(&fields.nik)
            .bind(&fields.place_of_birth)
            .bind(fields.date_of_birth)
            .bind(fields.gender.as_str())
            .bind(fields.marital_status.as_str())
            .bind(&fields.phone)
            .bind(&fields.email)
            .bind(&fields.address)
            .bind(&fields.village)
            .bind(&fields.district)
            .bind(fields.assistance_category.as_str())
            .bind(&fields.assistance_type)
            .bind(&fields.reason)
            .bind(fields.family_members_count)
            .bind(fields.monthly_income_range.as_str())
            .bind(draft.status.as_str())
            .bind(draft.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(unexpected)?;

        if let Some(entry) = initial_entry {
            insert_timeline(&mut tx, record.id, entry).await?;
        }

        tx.commit().await.map_err(unexpected)?;
        record.to_domain()
    }

    async fn list_applications(&self) -> PortResult<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM social_assistance_applications ORDER BY created_at DESC",
            APPLICATION_COLUMNS
        );
        let records = sqlx::query_as::<_, ApplicationRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        collect(records, ApplicationRecord::to_domain)
    }

    async fn get_application(&self, id: Uuid) -> PortResult<Application> {
        let sql = format!(
            "SELECT {} FROM social_assistance_applications WHERE id = $1",
            APPLICATION_COLUMNS
        );
        let record = sqlx::query_as::<_, ApplicationRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => application_not_found(id),
                _ => unexpected(e),
            })?;
        record.to_domain()
    }

    async fn update_status(&self, id: Uuid, entry: TimelineDraft) -> PortResult<Application> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let sql = format!(
            "UPDATE social_assistance_applications SET status = $1, updated_at = $2 \
             WHERE id = $3 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let record = sqlx::query_as::<_, ApplicationRecord>(&sql)
            .bind(entry.status.as_str())
            .bind(entry.created_at)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| application_not_found(id))?;

        insert_timeline(&mut tx, id, entry).await?;
        tx.commit().await.map_err(unexpected)?;
        record.to_domain()
    }

    async fn append_timeline_entry(
        &self,
        application_id: Uuid,
        entry: TimelineDraft,
    ) -> PortResult<StatusTimelineEntry> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        lock_application(&mut tx, application_id).await?;
        let created = insert_timeline(&mut tx, application_id, entry).await?;
        tx.commit().await.map_err(unexpected)?;
        Ok(created)
    }

    async fn list_timeline(&self, application_id: Uuid) -> PortResult<Vec<StatusTimelineEntry>> {
        let sql = format!(
            "SELECT {} FROM status_timeline WHERE application_id = $1 ORDER BY created_at DESC",
            TIMELINE_COLUMNS
        );
        let records = sqlx::query_as::<_, TimelineRecord>(&sql)
            .bind(application_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        collect(records, TimelineRecord::to_domain)
    }

    async fn insert_document(&self, draft: DocumentDraft) -> PortResult<Document> {
        let fields = draft.fields;
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        lock_application(&mut tx, fields.application_id).await?;

        let sql = format!(
            "INSERT INTO documents (id, application_id, document_type, file_name, file_path, \
             file_size, uploaded_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            DOCUMENT_COLUMNS
        );
        let record = sqlx::query_as::<_, DocumentRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(fields.application_id)
            .bind(fields.document_type.as_str())
            .bind(&fields.file_name)
            .bind(&fields.file_path)
            .bind(fields.file_size)
            .bind(draft.uploaded_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;
        record.to_domain()
    }

    async fn list_documents(&self, application_id: Uuid) -> PortResult<Vec<Document>> {
        let sql = format!(
            "SELECT {} FROM documents WHERE application_id = $1 ORDER BY uploaded_at ASC",
            DOCUMENT_COLUMNS
        );
        let records = sqlx::query_as::<_, DocumentRecord>(&sql)
            .bind(application_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        collect(records, DocumentRecord::to_domain)
    }

    async fn find_tracking(
        &self,
        tracking_number: &str,
        nik: &str,
    ) -> PortResult<Option<ApplicationTracking>> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        let sql = format!(
            "SELECT {} FROM social_assistance_applications \
             WHERE tracking_number = $1 AND nik = $2",
            APPLICATION_COLUMNS
        );
        let Some(record) = sqlx::query_as::<_, ApplicationRecord>(&sql)
            .bind(tracking_number)
            .bind(nik)
            .fetch_optional(&mut *tx)
            .await
            .map_err(unexpected)?
        else {
            return Ok(None);
        };
        let application = record.to_domain()?;

        let sql = format!(
            "SELECT {} FROM documents WHERE application_id = $1 ORDER BY uploaded_at ASC",
            DOCUMENT_COLUMNS
        );
        let documents = sqlx::query_as::<_, DocumentRecord>(&sql)
            .bind(application.id)
            .fetch_all(&mut *tx)
            .await
            .map_err(unexpected)?;

        let sql = format!(
            "SELECT {} FROM status_timeline WHERE application_id = $1 ORDER BY created_at DESC",
            TIMELINE_COLUMNS
        );
        let timeline = sqlx::query_as::<_, TimelineRecord>(&sql)
            .bind(application.id)
            .fetch_all(&mut *tx)
            .await
            .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;

        Ok(Some(ApplicationTracking {
            application,
            documents: collect(documents, DocumentRecord::to_domain)?,
            timeline: collect(timeline, TimelineRecord::to_domain)?,
        }))
    }
}

/// Fails with `NotFound` unless the application exists, and holds it until commit.
async fn lock_application(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    application_id: Uuid,
) -> PortResult<()> {
    sqlx::query("SELECT id FROM social_assistance_applications WHERE id = $1 FOR SHARE")
        .bind(application_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(unexpected)?
        .map(|_| ())
        .ok_or_else(|| application_not_found(application_id))
}

async fn insert_timeline(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    application_id: Uuid,
    entry: TimelineDraft,
) -> PortResult<StatusTimelineEntry> {
    let sql = format!(
        "INSERT INTO status_timeline (id, application_id, status, notes, created_at) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        TIMELINE_COLUMNS
    );
    sqlx::query_as::<_, TimelineRecord>(&sql)
        .bind(Uuid::new_v4())
        .bind(application_id)
        .bind(entry.status.as_str())
        .bind(entry.notes)
        .bind(entry.created_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(unexpected)?
        .to_domain()
}

//=========================================================================================
// `ContentRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentRepository for DbAdapter {
    async fn insert_service(&self, input: NewService, now: DateTime<Utc>) -> PortResult<Service> {
        let sql = format!(
            "INSERT INTO services (id, title, description, icon, is_active, order_index, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $7) RETURNING {}",
            SERVICE_COLUMNS
        );
        let record = sqlx::query_as::<_, ServiceRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.title)
            .bind(input.description)
            .bind(input.icon)
            .bind(input.is_active)
            .bind(input.order_index)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn list_active_services(&self) -> PortResult<Vec<Service>> {
        let sql = format!(
            "SELECT {} FROM services WHERE is_active ORDER BY order_index ASC, created_at ASC",
            SERVICE_COLUMNS
        );
        let records = sqlx::query_as::<_, ServiceRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn update_service(
        &self,
        id: Uuid,
        patch: ServicePatch,
        now: DateTime<Utc>,
    ) -> PortResult<Service> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE services SET updated_at = ");
        qb.push_bind(now);
        if let Some(title) = patch.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(description) = patch.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(icon) = patch.icon {
            qb.push(", icon = ").push_bind(icon);
        }
        if let Some(is_active) = patch.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }
        if let Some(order_index) = patch.order_index {
            qb.push(", order_index = ").push_bind(order_index);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING ").push(SERVICE_COLUMNS);

        let record = qb
            .build_query_as::<ServiceRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| PortError::NotFound(format!("Service {} not found", id)))?;
        Ok(record.to_domain())
    }

    async fn delete_service(&self, id: Uuid) -> PortResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_program(
        &self,
        input: NewFeaturedProgram,
        now: DateTime<Utc>,
    ) -> PortResult<FeaturedProgram> {
        let sql = format!(
            "INSERT INTO featured_programs (id, title, description, image_path, \
             target_beneficiaries, budget, is_active, order_index, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6::NUMERIC, $7, $8, $9, $9) RETURNING {}",
            PROGRAM_COLUMNS
        );
        let record = sqlx::query_as::<_, ProgramRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.title)
            .bind(input.description)
            .bind(input.image_path)
            .bind(input.target_beneficiaries)
            .bind(input.budget)
            .bind(input.is_active)
            .bind(input.order_index)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn list_active_programs(&self) -> PortResult<Vec<FeaturedProgram>> {
        let sql = format!(
            "SELECT {} FROM featured_programs WHERE is_active \
             ORDER BY order_index ASC, created_at ASC",
            PROGRAM_COLUMNS
        );
        let records = sqlx::query_as::<_, ProgramRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn update_program(
        &self,
        id: Uuid,
        patch: FeaturedProgramPatch,
        now: DateTime<Utc>,
    ) -> PortResult<FeaturedProgram> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE featured_programs SET updated_at = ");
        qb.push_bind(now);
        if let Some(title) = patch.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(description) = patch.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(image_path) = patch.image_path {
            qb.push(", image_path = ").push_bind(image_path);
        }
        if let Some(target) = patch.target_beneficiaries {
            qb.push(", target_beneficiaries = ").push_bind(target);
        }
        if let Some(budget) = patch.budget {
            qb.push(", budget = ").push_bind(budget).push("::NUMERIC");
        }
        if let Some(is_active) = patch.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }
        if let Some(order_index) = patch.order_index {
            qb.push(", order_index = ").push_bind(order_index);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING ").push(PROGRAM_COLUMNS);

        let record = qb
            .build_query_as::<ProgramRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| PortError::NotFound(format!("Featured program {} not found", id)))?;
        Ok(record.to_domain())
    }

    async fn delete_program(&self, id: Uuid) -> PortResult<bool> {
        let result = sqlx::query("DELETE FROM featured_programs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_news(&self, input: NewNews, now: DateTime<Utc>) -> PortResult<News> {
        let published_at = input.is_published.then_some(now);
        let sql = format!(
            "INSERT INTO news (id, title, content, summary, image_path, is_announcement, \
             is_published, published_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) RETURNING {}",
            NEWS_COLUMNS
        );
        let record = sqlx::query_as::<_, NewsRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.title)
            .bind(input.content)
            .bind(input.summary)
            .bind(input.image_path)
            .bind(input.is_announcement)
            .bind(input.is_published)
            .bind(published_at)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn list_published_news(&self) -> PortResult<Vec<News>> {
        let sql = format!(
            "SELECT {} FROM news WHERE is_published \
             ORDER BY published_at DESC NULLS LAST, created_at DESC",
            NEWS_COLUMNS
        );
        let records = sqlx::query_as::<_, NewsRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn list_published_announcements(&self) -> PortResult<Vec<News>> {
        let sql = format!(
            "SELECT {} FROM news WHERE is_published AND is_announcement \
             ORDER BY published_at DESC NULLS LAST",
            NEWS_COLUMNS
        );
        let records = sqlx::query_as::<_, NewsRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn update_news(
        &self,
        id: Uuid,
        patch: NewsPatch,
        now: DateTime<Utc>,
    ) -> PortResult<News> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE news SET updated_at = ");
        qb.push_bind(now);
        if let Some(title) = patch.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(content) = patch.content {
            qb.push(", content = ").push_bind(content);
        }
        if let Some(summary) = patch.summary {
            qb.push(", summary = ").push_bind(summary);
        }
        if let Some(image_path) = patch.image_path {
            qb.push(", image_path = ").push_bind(image_path);
        }
        if let Some(is_announcement) = patch.is_announcement {
            qb.push(", is_announcement = ").push_bind(is_announcement);
        }
        if let Some(is_published) = patch.is_published {
            qb.push(", is_published = ").push_bind(is_published);
            if is_published {
                qb.push(", published_at = COALESCE(published_at, ")
                    .push_bind(now)
                    .push(")");
            }
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING ").push(NEWS_COLUMNS);

        let record = qb
            .build_query_as::<NewsRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| PortError::NotFound(format!("News {} not found", id)))?;
        Ok(record.to_domain())
    }

    async fn delete_news(&self, id: Uuid) -> PortResult<bool> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(result.rows_affected() > 0)
    }
}
