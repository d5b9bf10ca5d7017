//! Runs the lifecycle and content flows against `DbAdapter`. Every test is
//! skipped when `DATABASE_URL` is not set. Rows are scoped to the ids each
//! test creates, so the suite can share one database.

mod common;

use api_lib::adapters::DbAdapter;
use api_lib::web::state::AppState;
use assistance_core::domain::{
    ApplicationStatus, DocumentType, FeaturedProgramPatch, NewDocument, NewFeaturedProgram,
    NewNews, NewTimelineEntry, NewsPatch, TrackApplicationQuery,
};
use assistance_core::ports::{Clock, PortError, TrackingCodeSource};
use assistance_core::tracking::RandomTrackingCodes;
use chrono::{TimeZone, Utc};
use common::{application, StepClock, NIK_A, NIK_B};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

async fn connect() -> Option<(PgPool, Arc<AppState>)> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres test");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .unwrap();
    let adapter = Arc::new(DbAdapter::new(pool.clone()));
    adapter.run_migrations().await.unwrap();

    let clock: Arc<dyn Clock> = Arc::new(StepClock::starting_at(
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
    ));
    let codes: Arc<dyn TrackingCodeSource> = Arc::new(RandomTrackingCodes::new("SA"));
    let state = Arc::new(AppState::with_parts(adapter, clock, codes, false));
    Some((pool, state))
}

async fn timeline_rows(pool: &PgPool, application_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM status_timeline WHERE application_id = $1")
        .bind(application_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn submit_verify_then_track() {
    let Some((pool, state)) = connect().await else {
        return;
    };
    let service = &state.applications;

    let created = service.create_application(application(NIK_A)).await.unwrap();
    assert_eq!(created.status, ApplicationStatus::Submitted);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(timeline_rows(&pool, created.id).await, 0);

    let updated = service
        .update_application_status(created.id, ApplicationStatus::Verified)
        .await
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Verified);
    assert!(updated.updated_at > created.updated_at);

    service
        .upload_document_metadata(NewDocument {
            application_id: created.id,
            document_type: DocumentType::Ktp,
            file_name: "ktp.jpg".to_string(),
            file_path: "uploads/ktp.jpg".to_string(),
            file_size: 2048,
        })
        .await
        .unwrap();

    let tracked = service
        .track_application(TrackApplicationQuery {
            tracking_number: created.tracking_number.clone(),
            nik: NIK_A.to_string(),
        })
        .await
        .unwrap()
        .expect("stored application is trackable");
    assert_eq!(tracked.application.status, ApplicationStatus::Verified);
    assert_eq!(tracked.timeline.len(), 1);
    assert_eq!(tracked.timeline[0].status, ApplicationStatus::Verified);
    assert_eq!(tracked.documents.len(), 1);
    assert_eq!(tracked.documents[0].document_type, DocumentType::Ktp);

    let miss = service
        .track_application(TrackApplicationQuery {
            tracking_number: created.tracking_number,
            nik: NIK_B.to_string(),
        })
        .await
        .unwrap();
    assert!(miss.is_none());
}

#[tokio::test]
async fn missing_application_writes_nothing() {
    let Some((pool, state)) = connect().await else {
        return;
    };
    let service = &state.applications;
    let missing = Uuid::new_v4();

    let err = service
        .update_application_status(missing, ApplicationStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));

    let err = service
        .add_status_timeline_entry(NewTimelineEntry {
            application_id: missing,
            status: ApplicationStatus::Approved,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));

    let err = service
        .upload_document_metadata(NewDocument {
            application_id: missing,
            document_type: DocumentType::FotoRumah,
            file_name: "rumah.jpg".to_string(),
            file_path: "uploads/rumah.jpg".to_string(),
            file_size: 512,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));

    assert_eq!(timeline_rows(&pool, missing).await, 0);
}

#[tokio::test]
async fn timeline_is_newest_first() {
    let Some((_pool, state)) = connect().await else {
        return;
    };
    let service = &state.applications;
    let created = service.create_application(application(NIK_A)).await.unwrap();

    for status in [
        ApplicationStatus::UnderReview,
        ApplicationStatus::Verified,
        ApplicationStatus::Approved,
    ] {
        service
            .add_status_timeline_entry(NewTimelineEntry {
                application_id: created.id,
                status,
                notes: Some(format!("set {status}")),
            })
            .await
            .unwrap();
    }

    let listed: Vec<ApplicationStatus> = service
        .list_status_timeline(created.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.status)
        .collect();
    assert_eq!(
        listed,
        vec![
            ApplicationStatus::Approved,
            ApplicationStatus::Verified,
            ApplicationStatus::UnderReview,
        ]
    );
}

#[tokio::test]
async fn publishing_keeps_the_first_stamp() {
    let Some((_pool, state)) = connect().await else {
        return;
    };
    let content = &state.content;
    let draft = content
        .create_news(NewNews {
            title: "Penyaluran bantuan".to_string(),
            content: "Jadwal penyaluran bulan ini".to_string(),
            summary: None,
            image_path: None,
            is_announcement: true,
            is_published: false,
        })
        .await
        .unwrap();
    assert_eq!(draft.published_at, None);

    let publish = NewsPatch {
        is_published: Some(true),
        ..Default::default()
    };
    let published = content.update_news(draft.id, publish.clone()).await.unwrap();
    let stamp = published.published_at.expect("stamped on publish");

    content
        .update_news(
            draft.id,
            NewsPatch {
                is_published: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let republished = content.update_news(draft.id, publish).await.unwrap();
    assert_eq!(republished.published_at, Some(stamp));

    let announcements = content.list_announcements().await.unwrap();
    assert!(announcements.iter().any(|n| n.id == draft.id));

    assert!(content.delete_news(draft.id).await.unwrap());
}

#[tokio::test]
async fn budgets_round_trip_through_numeric() {
    let Some((_pool, state)) = connect().await else {
        return;
    };
    let content = &state.content;
    let created = content
        .create_featured_program(NewFeaturedProgram {
            title: "PKH".to_string(),
            description: "Program Keluarga Harapan".to_string(),
            image_path: None,
            target_beneficiaries: None,
            budget: Some(1_500_000.5),
            is_active: true,
            order_index: 0,
        })
        .await
        .unwrap();
    assert_eq!(created.budget, Some(1_500_000.5));

    let patch: FeaturedProgramPatch =
        serde_json::from_str(r#"{"budget": 9999999999999.99}"#).unwrap();
    let updated = content
        .update_featured_program(created.id, patch)
        .await
        .unwrap();
    assert_eq!(updated.budget, Some(9_999_999_999_999.99));

    let patch: FeaturedProgramPatch = serde_json::from_str(r#"{"budget": null}"#).unwrap();
    let cleared = content
        .update_featured_program(created.id, patch)
        .await
        .unwrap();
    assert_eq!(cleared.budget, None);

    assert!(content.delete_featured_program(created.id).await.unwrap());
}
