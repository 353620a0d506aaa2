//! View recording behavior: cooldown dedup, counter consistency, and the
//! public response contract.

use actix_web::{App, test, web};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use tempfile::TempDir;

use portfolio_backend::api::services::{AppStartTime, routes};
use portfolio_backend::repository::{NewProject, Repository};
use portfolio_backend::services::{VIEW_COOLDOWN_MINUTES, ViewOutcome, record_view};

use migration::entities::project_view;

async fn setup() -> (Repository, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let url = format!("sqlite://{}", db_path.display());
    let repository = Repository::connect(&url, "sqlite").await.expect("connect");
    (repository, dir)
}

async fn seed_project(repository: &Repository) -> i32 {
    repository
        .create_project(NewProject {
            title: "Telemetry dashboard".to_string(),
            summary: "A dashboard".to_string(),
            content: None,
            featured: false,
            tags: vec![],
        })
        .await
        .expect("create project")
        .project
        .id
}

#[tokio::test]
async fn second_view_within_window_is_skipped() {
    let (repository, _dir) = setup().await;
    let id = seed_project(&repository).await;

    let first = record_view(repository.db(), id, "203.0.113.7", "test-agent")
        .await
        .expect("first view");
    assert_eq!(first, ViewOutcome::Counted);

    let second = record_view(repository.db(), id, "203.0.113.7", "test-agent")
        .await
        .expect("second view");
    assert_eq!(second, ViewOutcome::Cooldown);

    // Counter incremented exactly once and exactly one event stored
    let project = repository
        .get_project(id)
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(project.project.views, 1);

    let events = project_view::Entity::find()
        .filter(project_view::Column::ProjectId.eq(id))
        .all(repository.db())
        .await
        .expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].ip, "203.0.113.7");
}

#[tokio::test]
async fn distinct_ips_count_independently() {
    let (repository, _dir) = setup().await;
    let id = seed_project(&repository).await;

    let a = record_view(repository.db(), id, "203.0.113.7", "agent-a")
        .await
        .unwrap();
    let b = record_view(repository.db(), id, "198.51.100.4", "agent-b")
        .await
        .unwrap();
    assert_eq!(a, ViewOutcome::Counted);
    assert_eq!(b, ViewOutcome::Counted);

    let project = repository.get_project(id).await.unwrap().unwrap();
    assert_eq!(project.project.views, 2);
}

#[tokio::test]
async fn unknown_clients_share_one_cooldown_bucket() {
    let (repository, _dir) = setup().await;
    let id = seed_project(&repository).await;

    let first = record_view(repository.db(), id, "unknown", "agent-a")
        .await
        .unwrap();
    let second = record_view(repository.db(), id, "unknown", "agent-b")
        .await
        .unwrap();

    assert_eq!(first, ViewOutcome::Counted);
    assert_eq!(second, ViewOutcome::Cooldown);
}

#[tokio::test]
async fn view_outside_window_counts_again() {
    let (repository, _dir) = setup().await;
    let id = seed_project(&repository).await;

    // Plant an event just past the cooldown window
    project_view::ActiveModel {
        project_id: Set(id),
        ip: Set("203.0.113.7".to_string()),
        user_agent: Set("test-agent".to_string()),
        created_at: Set(chrono::Utc::now()
            - chrono::Duration::minutes(VIEW_COOLDOWN_MINUTES + 1)),
        ..Default::default()
    }
    .insert(repository.db())
    .await
    .expect("insert backdated event");

    let outcome = record_view(repository.db(), id, "203.0.113.7", "test-agent")
        .await
        .unwrap();
    assert_eq!(outcome, ViewOutcome::Counted);
}

#[tokio::test]
async fn view_for_missing_project_is_not_found() {
    let (repository, _dir) = setup().await;

    let result = record_view(repository.db(), 999_999, "203.0.113.7", "test-agent").await;
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        portfolio_backend::errors::PortfolioError::NotFound(_)
    ));
}

#[actix_rt::test]
async fn view_endpoint_response_contract() {
    let (repository, _dir) = setup().await;
    let id = seed_project(&repository).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repository.clone()))
            .app_data(web::Data::new(AppStartTime {
                start_datetime: chrono::Utc::now(),
            }))
            .configure(routes::configure),
    )
    .await;

    // First view from this client counts
    let req = test::TestRequest::post()
        .uri(&format!("/api/projects/{}/view", id))
        .insert_header(("x-forwarded-for", "203.0.113.7"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["counted"], true);
    assert!(body.get("skipped").is_none());

    // Repeat inside the window is skipped with the fixed reason string
    let req = test::TestRequest::post()
        .uri(&format!("/api/projects/{}/view", id))
        .insert_header(("x-forwarded-for", "203.0.113.7"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["skipped"], true);
    assert_eq!(body["reason"], "Cooldown active");
    assert!(body.get("counted").is_none());
}

#[actix_rt::test]
async fn view_endpoint_rejects_malformed_and_missing_ids() {
    let (repository, _dir) = setup().await;
    seed_project(&repository).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repository.clone()))
            .app_data(web::Data::new(AppStartTime {
                start_datetime: chrono::Utc::now(),
            }))
            .configure(routes::configure),
    )
    .await;

    // Malformed id is rejected before any side effect
    let req = test::TestRequest::post()
        .uri("/api/projects/not-a-number/view")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Unknown id is a 404
    let req = test::TestRequest::post()
        .uri("/api/projects/999999/view")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

    // Nothing was recorded
    let events = project_view::Entity::find()
        .all(repository.db())
        .await
        .unwrap();
    assert!(events.is_empty());
}
