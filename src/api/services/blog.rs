//! Blog endpoints: public reads and admin CRUD

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::error;

use crate::repository::{NewBlogPost, Repository, UpdateBlogPost};

use super::error_code::ErrorCode;
use super::helpers::{created_response, error_from_portfolio, error_response, success_response};
use super::types::{ApiResponse, BlogPostResponse, PostNewBlogPost, UpdateBlogPostRequest};

/// GET /api/blog - published posts only
pub async fn list_blog_posts(repository: web::Data<Repository>) -> ActixResult<impl Responder> {
    match repository.list_blog_posts(true).await {
        Ok(posts) => {
            let data: Vec<BlogPostResponse> = posts.into_iter().map(Into::into).collect();
            Ok(success_response(data))
        }
        Err(e) => {
            error!("Failed to list blog posts: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// GET /api/blog/{slug}
pub async fn get_blog_post(
    repository: web::Data<Repository>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let slug = path.into_inner();

    match repository.get_blog_post(&slug).await {
        Ok(Some(post)) if post.post.published => {
            Ok(success_response(BlogPostResponse::from(post)))
        }
        Ok(_) => Ok(error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::ResourceNotFound,
            &format!("blog post {} does not exist", slug),
        )),
        Err(e) => {
            error!("Failed to fetch blog post {}: {}", slug, e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// GET /api/admin/blog - drafts included
pub async fn list_all_blog_posts(
    repository: web::Data<Repository>,
) -> ActixResult<impl Responder> {
    match repository.list_blog_posts(false).await {
        Ok(posts) => {
            let data: Vec<BlogPostResponse> = posts.into_iter().map(Into::into).collect();
            Ok(success_response(data))
        }
        Err(e) => {
            error!("Failed to list blog posts: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// POST /api/admin/blog
pub async fn create_blog_post(
    repository: web::Data<Repository>,
    body: web::Json<PostNewBlogPost>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();

    if body.slug.trim().is_empty() || body.title.trim().is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidPayload,
            "title and slug must not be empty",
        ));
    }

    let input = NewBlogPost {
        title: body.title,
        slug: body.slug,
        excerpt: body.excerpt,
        content: body.content,
        cover_image: body.cover_image,
        author: body.author,
        published: body.published,
        read_time: body.read_time,
        tags: body.tags,
    };

    match repository.create_blog_post(input).await {
        Ok(post) => Ok(created_response(BlogPostResponse::from(post))),
        Err(e) => {
            error!("Failed to create blog post: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// PUT /api/admin/blog/{slug}
pub async fn update_blog_post(
    repository: web::Data<Repository>,
    path: web::Path<String>,
    body: web::Json<UpdateBlogPostRequest>,
) -> ActixResult<impl Responder> {
    let slug = path.into_inner();
    let body = body.into_inner();

    let input = UpdateBlogPost {
        title: body.title,
        excerpt: body.excerpt,
        content: body.content,
        cover_image: body.cover_image.map(Some),
        author: body.author,
        published: body.published,
        read_time: body.read_time,
        tags: body.tags,
    };

    match repository.update_blog_post(&slug, input).await {
        Ok(post) => Ok(success_response(BlogPostResponse::from(post))),
        Err(e) => Ok(error_from_portfolio(&e)),
    }
}

/// DELETE /api/admin/blog/{slug}
pub async fn delete_blog_post(
    repository: web::Data<Repository>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let slug = path.into_inner();

    match repository.delete_blog_post(&slug).await {
        Ok(()) => Ok(HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ApiResponse::<()> {
                code: ErrorCode::Success as i32,
                message: "Deleted".to_string(),
                data: None,
            })),
        Err(e) => Ok(error_from_portfolio(&e)),
    }
}
