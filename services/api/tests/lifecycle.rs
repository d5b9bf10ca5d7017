mod common;

use assistance_core::domain::{
    ApplicationStatus, DocumentType, NewDocument, NewTimelineEntry, TrackApplicationQuery,
};
use assistance_core::lifecycle::SUBMITTED_NOTE;
use assistance_core::ports::PortError;
use assistance_core::tracking::parse_tracking_code;
use chrono::{Datelike, NaiveDate};
use common::{application, harness, harness_with, NIK_A, NIK_B};
use std::collections::HashSet;
use uuid::Uuid;

fn query(tracking_number: &str, nik: &str) -> TrackApplicationQuery {
    TrackApplicationQuery {
        tracking_number: tracking_number.to_string(),
        nik: nik.to_string(),
    }
}

fn document(application_id: Uuid, file_name: &str) -> NewDocument {
    NewDocument {
        application_id,
        document_type: DocumentType::Ktp,
        file_name: file_name.to_string(),
        file_path: format!("uploads/{file_name}"),
        file_size: 204_800,
    }
}

#[tokio::test]
async fn tracking_codes_are_well_formed_and_distinct() {
    let h = harness();
    let service = &h.state.applications;

    let mut seen = HashSet::new();
    for _ in 0..20 {
        let created = service.create_application(application(NIK_A)).await.unwrap();
        let parts = parse_tracking_code(&created.tracking_number)
            .unwrap_or_else(|| panic!("malformed code {}", created.tracking_number));
        assert_eq!(parts.prefix, "SA");
        assert_eq!(parts.millis, created.created_at.timestamp_millis());
        assert!(seen.insert(created.tracking_number.clone()));
    }
}

#[tokio::test]
async fn new_applications_start_submitted_with_equal_timestamps() {
    let h = harness();
    let created = h
        .state
        .applications
        .create_application(application(NIK_A))
        .await
        .unwrap();

    assert_eq!(created.status, ApplicationStatus::Submitted);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.nik, NIK_A);
    assert_eq!(h.repo.timeline_len().await, 0);
}

#[tokio::test]
async fn intake_can_seed_a_submitted_timeline_entry() {
    let h = harness_with(true);
    let created = h
        .state
        .applications
        .create_application(application(NIK_A))
        .await
        .unwrap();

    let timeline = h
        .state
        .applications
        .list_status_timeline(created.id)
        .await
        .unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].status, ApplicationStatus::Submitted);
    assert_eq!(timeline[0].notes.as_deref(), Some(SUBMITTED_NOTE));
    assert_eq!(timeline[0].created_at, created.created_at);
}

#[tokio::test]
async fn invalid_applications_are_rejected_before_any_write() {
    let h = harness();
    let mut input = application("12345");
    input.family_members_count = 0;
    input.email = "not-an-email".to_string();

    let err = h
        .state
        .applications
        .create_application(input)
        .await
        .unwrap_err();
    match err {
        PortError::Invalid(errors) => {
            assert!(errors.has_field("nik"));
            assert!(errors.has_field("family_members_count"));
            assert!(errors.has_field("email"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(h
        .state
        .applications
        .list_applications()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn birth_dates_after_today_are_rejected() {
    let h = harness();
    let mut input = application(NIK_A);
    let today = chrono::Utc::now().date_naive();
    input.date_of_birth = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap();

    let err = h
        .state
        .applications
        .create_application(input)
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::Invalid(ref e) if e.has_field("date_of_birth")));
}

#[tokio::test]
async fn tracking_requires_both_values_to_match() {
    let h = harness();
    let service = &h.state.applications;
    let first = service.create_application(application(NIK_A)).await.unwrap();
    let second = service.create_application(application(NIK_B)).await.unwrap();

    // Each code paired with the other applicant's NIK.
    assert!(service
        .track_application(query(&first.tracking_number, NIK_B))
        .await
        .unwrap()
        .is_none());
    assert!(service
        .track_application(query(&second.tracking_number, NIK_A))
        .await
        .unwrap()
        .is_none());
    // Unknown code, known NIK.
    assert!(service
        .track_application(query("SA-1-ZZZZZ", NIK_A))
        .await
        .unwrap()
        .is_none());
    // Case is significant.
    assert!(service
        .track_application(query(&first.tracking_number.to_lowercase(), NIK_A))
        .await
        .unwrap()
        .is_none());

    let found = service
        .track_application(query(&first.tracking_number, NIK_A))
        .await
        .unwrap()
        .expect("matching pair");
    assert_eq!(found.application.id, first.id);
}

#[tokio::test]
async fn tracking_returns_only_the_matched_applications_children() {
    let h = harness();
    let service = &h.state.applications;
    let first = service.create_application(application(NIK_A)).await.unwrap();
    let second = service.create_application(application(NIK_B)).await.unwrap();

    for app in [&first, &second] {
        service
            .upload_document_metadata(document(app.id, "ktp.jpg"))
            .await
            .unwrap();
        service
            .update_application_status(app.id, ApplicationStatus::UnderReview)
            .await
            .unwrap();
    }
    service
        .upload_document_metadata(document(second.id, "kk.pdf"))
        .await
        .unwrap();

    let tracked = service
        .track_application(query(&first.tracking_number, NIK_A))
        .await
        .unwrap()
        .expect("first application");
    assert_eq!(tracked.documents.len(), 1);
    assert!(tracked.documents.iter().all(|d| d.application_id == first.id));
    assert_eq!(tracked.timeline.len(), 1);
    assert!(tracked.timeline.iter().all(|t| t.application_id == first.id));

    let tracked = service
        .track_application(query(&second.tracking_number, NIK_B))
        .await
        .unwrap()
        .expect("second application");
    assert_eq!(tracked.documents.len(), 2);
    assert!(tracked.documents.iter().all(|d| d.application_id == second.id));
}

#[tokio::test]
async fn malformed_tracking_queries_fail_validation() {
    let h = harness();
    let err = h
        .state
        .applications
        .track_application(query("", "123"))
        .await
        .unwrap_err();
    match err {
        PortError::Invalid(errors) => {
            assert!(errors.has_field("tracking_number"));
            assert!(errors.has_field("nik"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn status_update_on_unknown_application_writes_nothing() {
    let h = harness();
    h.state
        .applications
        .create_application(application(NIK_A))
        .await
        .unwrap();

    let err = h
        .state
        .applications
        .update_application_status(Uuid::new_v4(), ApplicationStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));
    assert_eq!(h.repo.timeline_len().await, 0);
}

#[tokio::test]
async fn every_status_update_appends_one_entry() {
    let h = harness();
    let service = &h.state.applications;
    let created = service.create_application(application(NIK_A)).await.unwrap();

    let updated = service
        .update_application_status(created.id, ApplicationStatus::Verified)
        .await
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Verified);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    // Repeating the same status is a new audit event.
    let again = service
        .update_application_status(created.id, ApplicationStatus::Verified)
        .await
        .unwrap();
    assert!(again.updated_at > updated.updated_at);

    let timeline = service.list_status_timeline(created.id).await.unwrap();
    assert_eq!(timeline.len(), 2);
    assert!(timeline
        .iter()
        .all(|t| t.status == ApplicationStatus::Verified));
    assert_eq!(
        timeline[0].notes.as_deref(),
        Some("Status updated to VERIFIED")
    );
    assert_eq!(timeline[0].created_at, again.updated_at);
}

#[tokio::test]
async fn timeline_is_newest_first() {
    let h = harness();
    let service = &h.state.applications;
    let created = service.create_application(application(NIK_A)).await.unwrap();

    let statuses = [
        ApplicationStatus::UnderReview,
        ApplicationStatus::Verified,
        ApplicationStatus::Approved,
    ];
    for status in statuses {
        service
            .add_status_timeline_entry(NewTimelineEntry {
                application_id: created.id,
                status,
                notes: None,
            })
            .await
            .unwrap();
    }

    let timeline = service.list_status_timeline(created.id).await.unwrap();
    let listed: Vec<ApplicationStatus> = timeline.iter().map(|t| t.status).collect();
    assert_eq!(
        listed,
        vec![
            ApplicationStatus::Approved,
            ApplicationStatus::Verified,
            ApplicationStatus::UnderReview,
        ]
    );
    assert!(timeline.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    // Direct appends leave the application itself alone.
    let stored = service.get_application(created.id).await.unwrap();
    assert_eq!(stored.status, ApplicationStatus::Submitted);
    assert_eq!(stored.updated_at, created.updated_at);
}

#[tokio::test]
async fn children_of_unknown_applications_are_not_found() {
    let h = harness();
    let service = &h.state.applications;
    let missing = Uuid::new_v4();

    let err = service
        .add_status_timeline_entry(NewTimelineEntry {
            application_id: missing,
            status: ApplicationStatus::Approved,
            notes: Some("manual".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));

    let err = service
        .upload_document_metadata(document(missing, "ktp.jpg"))
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));

    let err = service.get_application(missing).await.unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));
}

#[tokio::test]
async fn submit_verify_then_track() {
    let h = harness();
    let service = &h.state.applications;

    let created = service.create_application(application(NIK_A)).await.unwrap();
    assert_eq!(created.family_members_count, 4);

    service
        .update_application_status(created.id, ApplicationStatus::Verified)
        .await
        .unwrap();

    let tracked = service
        .track_application(query(&created.tracking_number, NIK_A))
        .await
        .unwrap()
        .expect("submitted application is trackable");
    assert_eq!(tracked.application.status, ApplicationStatus::Verified);
    assert_eq!(tracked.timeline.len(), 1);
    assert_eq!(tracked.timeline[0].status, ApplicationStatus::Verified);
}

#[tokio::test]
async fn applications_are_listed_newest_first() {
    let h = harness();
    let service = &h.state.applications;
    let older = service.create_application(application(NIK_A)).await.unwrap();
    let newer = service.create_application(application(NIK_B)).await.unwrap();

    let listed = service.list_applications().await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}
