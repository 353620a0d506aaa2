//! Admin API auth flow and CRUD over HTTP.

use actix_web::cookie::Cookie;
use actix_web::{App, http::StatusCode, test, web};
use tempfile::TempDir;

use portfolio_backend::api::services::{AppStartTime, routes};
use portfolio_backend::repository::Repository;
use portfolio_backend::utils::password::hash_password;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "correct horse battery staple";

async fn setup() -> (Repository, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let url = format!("sqlite://{}", db_path.display());
    let repository = Repository::connect(&url, "sqlite").await.expect("connect");

    let hash = hash_password(ADMIN_PASSWORD).expect("hash");
    repository
        .insert_user(ADMIN_EMAIL, &hash, "ADMIN")
        .await
        .expect("seed admin");

    (repository, dir)
}

macro_rules! test_app {
    ($repository:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repository.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(routes::configure),
        )
        .await
    };
}

fn peer() -> std::net::SocketAddr {
    "127.0.0.1:54321".parse().unwrap()
}

fn refresh_cookie<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "refreshToken")
        .expect("refresh cookie")
        .into_owned()
}

macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer())
            .set_json(serde_json::json!({
                "email": ADMIN_EMAIL,
                "password": ADMIN_PASSWORD,
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&$app, req).await;
        assert_eq!(body["code"], 0, "login failed: {}", body);
        body["data"]["access_token"]
            .as_str()
            .expect("access_token")
            .to_string()
    }};
}

#[actix_rt::test]
async fn admin_routes_require_a_token() {
    let (repository, _dir) = setup().await;
    let app = test_app!(repository);

    let req = test::TestRequest::post()
        .uri("/api/admin/projects")
        .set_json(serde_json::json!({"title": "x", "summary": "y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/admin/analytics")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn login_rejects_bad_credentials() {
    let (repository, _dir) = setup().await;
    let app = test_app!(repository);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .peer_addr(peer())
        .set_json(serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": "wrong",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .peer_addr(peer())
        .set_json(serde_json::json!({
            "email": "nobody@example.com",
            "password": ADMIN_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn non_admin_role_is_rejected() {
    let (repository, _dir) = setup().await;

    let hash = hash_password("reader password").expect("hash");
    repository
        .insert_user("reader@example.com", &hash, "USER")
        .await
        .expect("seed reader");

    let app = test_app!(repository);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .peer_addr(peer())
        .set_json(serde_json::json!({
            "email": "reader@example.com",
            "password": "reader password",
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let token = body["data"]["access_token"].as_str().expect("token");

    // Valid token, wrong role
    let req = test::TestRequest::get()
        .uri("/api/admin/analytics")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn project_crud_flow_with_bearer_token() {
    let (repository, _dir) = setup().await;
    let app = test_app!(repository);
    let token = login!(app);
    let bearer = format!("Bearer {}", token);

    // Create
    let req = test::TestRequest::post()
        .uri("/api/admin/projects")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(serde_json::json!({
            "title": "Search engine",
            "summary": "Full-text search",
            "featured": true,
            "tags": ["rust", "search"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().expect("id");
    assert_eq!(body["data"]["tags"], serde_json::json!(["rust", "search"]));

    // Update editorial rank; response carries the recomputed score
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/projects/{}", id))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(serde_json::json!({"editorial_rank": 4}))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["editorial_rank"], 4);
    assert_eq!(body["data"]["score"], 40.0);

    // Public read sees it
    let req = test::TestRequest::get()
        .uri(&format!("/api/projects/{}", id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Search engine");

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/projects/{}", id))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/projects/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn blog_drafts_hidden_from_public_listing() {
    let (repository, _dir) = setup().await;
    let app = test_app!(repository);
    let token = login!(app);
    let bearer = format!("Bearer {}", token);

    let req = test::TestRequest::post()
        .uri("/api/admin/blog")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(serde_json::json!({
            "title": "Draft post",
            "slug": "draft-post",
            "excerpt": "wip",
            "content": "...",
            "author": "Admin",
            "published": false,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Hidden from the public listing and detail view
    let req = test::TestRequest::get().uri("/api/blog").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let req = test::TestRequest::get()
        .uri("/api/blog/draft-post")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Visible through the admin listing
    let req = test::TestRequest::get()
        .uri("/api/admin/blog")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn refresh_rotates_and_logout_revokes_tokens() {
    let (repository, _dir) = setup().await;
    let app = test_app!(repository);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .peer_addr(peer())
        .set_json(serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first = refresh_cookie(&resp);

    // Refresh rotates: a new token replaces the presented one
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .cookie(first.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second = refresh_cookie(&resp);
    assert_ne!(first.value(), second.value());

    // Replaying the rotated-out token is rejected even though the JWT
    // itself is still unexpired
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .cookie(first)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The replacement works and rotates again
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .cookie(second)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let third = refresh_cookie(&resp);

    // Logout revokes the stored token; the cookie no longer refreshes
    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .cookie(third.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .cookie(third)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn certifications_are_listed_by_manual_order() {
    let (repository, _dir) = setup().await;
    let app = test_app!(repository);
    let token = login!(app);
    let bearer = format!("Bearer {}", token);

    // Admin-only create
    let req = test::TestRequest::post()
        .uri("/api/admin/certifications")
        .set_json(serde_json::json!({"title": "x", "issuer": "y", "date": "2024"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Required fields are validated
    let req = test::TestRequest::post()
        .uri("/api/admin/certifications")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(serde_json::json!({"title": "Cloud cert", "issuer": "", "date": "2024"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    for (title, order_index) in [("second", 2), ("first", 1)] {
        let req = test::TestRequest::post()
            .uri("/api/admin/certifications")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(serde_json::json!({
                "title": title,
                "issuer": "Example Org",
                "date": "Jan 2024",
                "order_index": order_index,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // Public listing sorts by order_index ascending
    let req = test::TestRequest::get()
        .uri("/api/certifications")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["title"], "first");
    assert_eq!(data[1]["title"], "second");
}

#[actix_rt::test]
async fn analytics_reports_totals_and_top_projects() {
    let (repository, _dir) = setup().await;
    let app = test_app!(repository);
    let token = login!(app);
    let bearer = format!("Bearer {}", token);

    for (title, featured) in [("one", true), ("two", false)] {
        let req = test::TestRequest::post()
            .uri("/api/admin/projects")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(serde_json::json!({"title": title, "summary": "s", "featured": featured}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/admin/analytics")
        .insert_header(("Authorization", bearer))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["totals"]["projects"], 2);
    assert_eq!(body["data"]["totals"]["featured"], 1);
    assert_eq!(body["data"]["top_projects"].as_array().unwrap().len(), 2);
}
