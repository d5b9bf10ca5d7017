mod common;

use assistance_core::domain::{
    FeaturedProgramPatch, NewFeaturedProgram, NewNews, NewService, NewsPatch, ServicePatch,
};
use assistance_core::ports::PortError;
use common::harness;
use uuid::Uuid;

fn service(title: &str, order_index: i32, is_active: bool) -> NewService {
    NewService {
        title: title.to_string(),
        description: format!("{title} description"),
        icon: Some("heart".to_string()),
        is_active,
        order_index,
    }
}

fn news(title: &str, is_announcement: bool, is_published: bool) -> NewNews {
    NewNews {
        title: title.to_string(),
        content: "Isi berita".to_string(),
        summary: None,
        image_path: None,
        is_announcement,
        is_published,
    }
}

#[tokio::test]
async fn only_active_services_are_listed_in_display_order() {
    let h = harness();
    let content = &h.state.content;
    content.create_service(service("Rehabilitasi", 2, true)).await.unwrap();
    content.create_service(service("Arsip", 0, false)).await.unwrap();
    content.create_service(service("Bansos", 1, true)).await.unwrap();

    let titles: Vec<String> = content
        .list_services()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Bansos", "Rehabilitasi"]);
}

#[tokio::test]
async fn service_patches_touch_only_supplied_fields() {
    let h = harness();
    let content = &h.state.content;
    let created = content.create_service(service("Bansos", 1, true)).await.unwrap();

    let patch: ServicePatch = serde_json::from_str(r#"{"icon": null, "order_index": 5}"#).unwrap();
    let updated = content.update_service(created.id, patch).await.unwrap();
    assert_eq!(updated.title, "Bansos");
    assert_eq!(updated.icon, None);
    assert_eq!(updated.order_index, 5);
    assert!(updated.updated_at > created.updated_at);

    let err = content
        .update_service(
            created.id,
            ServicePatch {
                title: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::Invalid(_)));
}

#[tokio::test]
async fn deleting_reports_whether_a_row_was_removed() {
    let h = harness();
    let content = &h.state.content;
    let created = content.create_service(service("Bansos", 1, true)).await.unwrap();

    assert!(content.delete_service(created.id).await.unwrap());
    assert!(!content.delete_service(created.id).await.unwrap());
    assert!(!content.delete_news(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn unknown_content_ids_are_not_found_on_update() {
    let h = harness();
    let err = h
        .state
        .content
        .update_featured_program(Uuid::new_v4(), FeaturedProgramPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)));
}

#[tokio::test]
async fn program_budgets_must_be_positive() {
    let h = harness();
    let content = &h.state.content;
    let mut input = NewFeaturedProgram {
        title: "PKH".to_string(),
        description: "Program Keluarga Harapan".to_string(),
        image_path: None,
        target_beneficiaries: Some("Keluarga miskin".to_string()),
        budget: Some(-1.0),
        is_active: true,
        order_index: 0,
    };
    let err = content
        .create_featured_program(input.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::Invalid(ref e) if e.has_field("budget")));

    input.budget = Some(1_500_000_000.0);
    let created = content.create_featured_program(input).await.unwrap();
    assert_eq!(created.budget, Some(1_500_000_000.0));

    let patch: FeaturedProgramPatch = serde_json::from_str(r#"{"budget": null}"#).unwrap();
    let cleared = content
        .update_featured_program(created.id, patch)
        .await
        .unwrap();
    assert_eq!(cleared.budget, None);
    assert_eq!(cleared.target_beneficiaries.as_deref(), Some("Keluarga miskin"));
}

#[tokio::test]
async fn only_published_news_is_listed() {
    let h = harness();
    let content = &h.state.content;
    let draft = content.create_news(news("Draft", true, false)).await.unwrap();
    assert_eq!(draft.published_at, None);
    let article = content.create_news(news("Artikel", false, true)).await.unwrap();
    let notice = content.create_news(news("Pengumuman", true, true)).await.unwrap();
    assert!(notice.published_at.is_some());

    let listed: Vec<Uuid> = content
        .list_news()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(listed, vec![notice.id, article.id]);

    let announcements: Vec<Uuid> = content
        .list_announcements()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(announcements, vec![notice.id]);
}

#[tokio::test]
async fn publishing_stamps_the_first_publication_time_once() {
    let h = harness();
    let content = &h.state.content;
    let draft = content.create_news(news("Draft", false, false)).await.unwrap();

    let publish = NewsPatch {
        is_published: Some(true),
        ..Default::default()
    };
    let published = content.update_news(draft.id, publish.clone()).await.unwrap();
    let first_stamp = published.published_at.expect("stamped on publish");

    let unpublished = content
        .update_news(
            draft.id,
            NewsPatch {
                is_published: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!unpublished.is_published);

    let republished = content.update_news(draft.id, publish).await.unwrap();
    assert_eq!(republished.published_at, Some(first_stamp));
}
