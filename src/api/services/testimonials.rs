//! Testimonial endpoints: public listing and admin CRUD

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::error;

use crate::errors::PortfolioError;
use crate::repository::{NewTestimonial, Repository, UpdateTestimonial};

use super::error_code::ErrorCode;
use super::helpers::{created_response, error_from_portfolio, error_response, success_response};
use super::types::{
    ApiResponse, ListContentQuery, PostNewTestimonial, TestimonialResponse,
    UpdateTestimonialRequest,
};

fn parse_testimonial_id(raw: &str) -> Result<i32, PortfolioError> {
    raw.parse::<i32>()
        .map_err(|_| PortfolioError::validation(format!("invalid testimonial id: {}", raw)))
}

/// GET /api/testimonials - optional `?featured=true`
pub async fn list_testimonials(
    repository: web::Data<Repository>,
    query: web::Query<ListContentQuery>,
) -> ActixResult<impl Responder> {
    let featured_only = query.featured.unwrap_or(false);

    match repository.list_testimonials(featured_only).await {
        Ok(testimonials) => {
            let data: Vec<TestimonialResponse> =
                testimonials.into_iter().map(Into::into).collect();
            Ok(success_response(data))
        }
        Err(e) => {
            error!("Failed to list testimonials: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// POST /api/admin/testimonials
pub async fn create_testimonial(
    repository: web::Data<Repository>,
    body: web::Json<PostNewTestimonial>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();

    if !(1..=5).contains(&body.rating) {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidPayload,
            "rating must be between 1 and 5",
        ));
    }

    let input = NewTestimonial {
        name: body.name,
        role: body.role,
        company: body.company,
        content: body.content,
        avatar_url: body.avatar_url,
        rating: body.rating,
        featured: body.featured,
    };

    match repository.create_testimonial(input).await {
        Ok(testimonial) => Ok(created_response(TestimonialResponse::from(testimonial))),
        Err(e) => {
            error!("Failed to create testimonial: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// PUT /api/admin/testimonials/{id}
pub async fn update_testimonial(
    repository: web::Data<Repository>,
    path: web::Path<String>,
    body: web::Json<UpdateTestimonialRequest>,
) -> ActixResult<impl Responder> {
    let id = match parse_testimonial_id(&path) {
        Ok(id) => id,
        Err(e) => return Ok(error_from_portfolio(&e)),
    };

    let body = body.into_inner();
    if let Some(rating) = body.rating
        && !(1..=5).contains(&rating)
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidPayload,
            "rating must be between 1 and 5",
        ));
    }

    let input = UpdateTestimonial {
        name: body.name,
        role: body.role,
        company: body.company,
        content: body.content,
        avatar_url: body.avatar_url.map(Some),
        rating: body.rating,
        featured: body.featured,
    };

    match repository.update_testimonial(id, input).await {
        Ok(testimonial) => Ok(success_response(TestimonialResponse::from(testimonial))),
        Err(e) => Ok(error_from_portfolio(&e)),
    }
}

/// DELETE /api/admin/testimonials/{id}
pub async fn delete_testimonial(
    repository: web::Data<Repository>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let id = match parse_testimonial_id(&path) {
        Ok(id) => id,
        Err(e) => return Ok(error_from_portfolio(&e)),
    };

    match repository.delete_testimonial(id).await {
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
