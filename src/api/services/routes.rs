//! Route configuration
//!
//! Public routes live under `/api`, admin routes under `/api/admin` behind
//! the AdminAuth middleware, auth endpoints under `/api/auth`.

use actix_web::web;

use crate::api::middleware::AdminAuth;

use super::analytics::get_analytics;
use super::auth::{login, login_rate_limiter, logout, refresh_token, verify_token};
use super::blog;
use super::case_studies;
use super::certifications;
use super::health::health_routes;
use super::projects;
use super::testimonials;

/// Public content routes
///
/// - GET /projects - ranked listing
/// - GET /projects/{id} - single project
/// - POST /projects/{id}/view - record a view (cooldown-deduplicated)
/// - GET /blog, GET /blog/{slug} - published posts
/// - GET /case-studies, GET /case-studies/{slug} - published case studies
/// - GET /testimonials
/// - GET /certifications
fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::list_projects))
            .route("/{id}/view", web::post().to(projects::post_project_view))
            .route("/{id}", web::get().to(projects::get_project)),
    )
    .service(
        web::scope("/blog")
            .route("", web::get().to(blog::list_blog_posts))
            .route("/{slug}", web::get().to(blog::get_blog_post)),
    )
    .service(
        web::scope("/case-studies")
            .route("", web::get().to(case_studies::list_case_studies))
            .route("/{slug}", web::get().to(case_studies::get_case_study)),
    )
    .service(
        web::scope("/testimonials")
            .route("", web::get().to(testimonials::list_testimonials)),
    )
    .service(
        web::scope("/certifications")
            .route("", web::get().to(certifications::list_certifications)),
    );
}

/// Auth routes `/auth`
///
/// Login is rate limited per peer IP.
fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/login", web::post().to(login).wrap(login_rate_limiter()))
        .route("/refresh", web::post().to(refresh_token))
        .route("/logout", web::post().to(logout))
}

/// Admin routes `/admin`, all behind AdminAuth
fn admin_routes() -> impl actix_web::dev::HttpServiceFactory {
    web::scope("/admin")
        .wrap(AdminAuth)
        .route("/auth/verify", web::get().to(verify_token))
        .route("/analytics", web::get().to(get_analytics))
        .service(
            web::scope("/projects")
                .route("", web::post().to(projects::create_project))
                .route(
                    "/{id}/recompute-score",
                    web::post().to(projects::recompute_project_score),
                )
                .route("/{id}", web::put().to(projects::update_project))
                .route("/{id}", web::delete().to(projects::delete_project)),
        )
        .service(
            web::scope("/blog")
                .route("", web::get().to(blog::list_all_blog_posts))
                .route("", web::post().to(blog::create_blog_post))
                .route("/{slug}", web::put().to(blog::update_blog_post))
                .route("/{slug}", web::delete().to(blog::delete_blog_post)),
        )
        .service(
            web::scope("/case-studies")
                .route("", web::get().to(case_studies::list_all_case_studies))
                .route("", web::post().to(case_studies::create_case_study))
                .route("/{slug}", web::put().to(case_studies::update_case_study))
                .route("/{slug}", web::delete().to(case_studies::delete_case_study)),
        )
        .service(
            web::scope("/testimonials")
                .route("", web::post().to(testimonials::create_testimonial))
                .route("/{id}", web::put().to(testimonials::update_testimonial))
                .route("/{id}", web::delete().to(testimonials::delete_testimonial)),
        )
        .service(
            web::scope("/certifications")
                .route("", web::post().to(certifications::create_certification)),
        )
}

/// Top-level route configuration, applied to the HttpServer app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(auth_routes())
            .service(admin_routes())
            .configure(public_routes),
    )
    .service(web::scope("/health").service(health_routes()));
}
