//! Score recomputation and public listing order.

use actix_web::{App, test, web};
use tempfile::TempDir;

use portfolio_backend::api::services::{AppStartTime, routes};
use portfolio_backend::repository::{NewProject, Repository, UpdateProject};
use portfolio_backend::services::{compute_score, record_view, recompute_score};

async fn setup() -> (Repository, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let url = format!("sqlite://{}", db_path.display());
    let repository = Repository::connect(&url, "sqlite").await.expect("connect");
    (repository, dir)
}

async fn seed_project(repository: &Repository, title: &str, featured: bool) -> i32 {
    repository
        .create_project(NewProject {
            title: title.to_string(),
            summary: "summary".to_string(),
            content: None,
            featured,
            tags: vec![],
        })
        .await
        .expect("create project")
        .project
        .id
}

async fn set_rank_and_recompute(repository: &Repository, id: i32, rank: i32) {
    repository
        .update_project(
            id,
            UpdateProject {
                editorial_rank: Some(rank),
                ..Default::default()
            },
        )
        .await
        .expect("set rank");
    recompute_score(repository.db(), id)
        .await
        .expect("recompute");
}

#[tokio::test]
async fn recompute_persists_weighted_score() {
    let (repository, _dir) = setup().await;
    let id = seed_project(&repository, "alpha", false).await;

    set_rank_and_recompute(&repository, id, 3).await;
    let project = repository.get_project(id).await.unwrap().unwrap();
    assert_eq!(project.score(), 30.0);

    // One counted view shifts the score by the view weight
    record_view(repository.db(), id, "203.0.113.7", "test-agent")
        .await
        .unwrap();
    let score = recompute_score(repository.db(), id)
        .await
        .unwrap()
        .expect("score");
    assert_eq!(score, compute_score(1, 3));
    assert!((score - 30.1).abs() < 1e-9);
}

#[tokio::test]
async fn recompute_missing_project_is_a_noop() {
    let (repository, _dir) = setup().await;

    let result = recompute_score(repository.db(), 999_999).await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn listing_orders_featured_then_score_then_recency() {
    let (repository, _dir) = setup().await;

    // Non-featured with the highest score must still sort below featured
    let a = seed_project(&repository, "featured-low", true).await;
    let b = seed_project(&repository, "plain-high", false).await;
    let c = seed_project(&repository, "featured-high", true).await;

    set_rank_and_recompute(&repository, a, 5).await; // featured, 50.0
    set_rank_and_recompute(&repository, b, 10).await; // plain, 100.0
    set_rank_and_recompute(&repository, c, 8).await; // featured, 80.0

    let listing = repository.list_projects(1, 10).await.unwrap();
    let titles: Vec<&str> = listing.iter().map(|p| p.project.title.as_str()).collect();
    assert_eq!(titles, vec!["featured-high", "featured-low", "plain-high"]);
}

#[tokio::test]
async fn equal_scores_fall_back_to_recency() {
    let (repository, _dir) = setup().await;

    let older = seed_project(&repository, "older", false).await;
    // Ensure distinct created_at values
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let newer = seed_project(&repository, "newer", false).await;

    set_rank_and_recompute(&repository, older, 2).await;
    set_rank_and_recompute(&repository, newer, 2).await;

    let listing = repository.list_projects(1, 10).await.unwrap();
    let titles: Vec<&str> = listing.iter().map(|p| p.project.title.as_str()).collect();
    assert_eq!(titles, vec!["newer", "older"]);
}

#[actix_rt::test]
async fn listing_endpoint_exposes_views_and_score() {
    let (repository, _dir) = setup().await;
    let id = seed_project(&repository, "alpha", false).await;
    set_rank_and_recompute(&repository, id, 1).await;
    record_view(repository.db(), id, "203.0.113.7", "test-agent")
        .await
        .unwrap();
    recompute_score(repository.db(), id).await.unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repository.clone()))
            .app_data(web::Data::new(AppStartTime {
                start_datetime: chrono::Utc::now(),
            }))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["code"], 0);
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["views"], 1);
    assert!((data[0]["score"].as_f64().unwrap() - 10.1).abs() < 1e-9);
    assert_eq!(body["pagination"]["total"], 1);
}
