//! Case study endpoints: public reads and admin CRUD

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::error;

use crate::repository::{NewCaseStudy, Repository, UpdateCaseStudy};

use super::error_code::ErrorCode;
use super::helpers::{created_response, error_from_portfolio, error_response, success_response};
use super::types::{
    ApiResponse, CaseStudyResponse, ListContentQuery, PostNewCaseStudy, UpdateCaseStudyRequest,
};

/// GET /api/case-studies - published only, optional `?featured=true`
pub async fn list_case_studies(
    repository: web::Data<Repository>,
    query: web::Query<ListContentQuery>,
) -> ActixResult<impl Responder> {
    let featured_only = query.featured.unwrap_or(false);

    match repository.list_case_studies(true, featured_only).await {
        Ok(studies) => {
            let data: Vec<CaseStudyResponse> = studies.into_iter().map(Into::into).collect();
            Ok(success_response(data))
        }
        Err(e) => {
            error!("Failed to list case studies: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// GET /api/case-studies/{slug}
pub async fn get_case_study(
    repository: web::Data<Repository>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let slug = path.into_inner();

    match repository.get_case_study(&slug).await {
        Ok(Some(study)) if study.case_study.published => {
            Ok(success_response(CaseStudyResponse::from(study)))
        }
        Ok(_) => Ok(error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::ResourceNotFound,
            &format!("case study {} does not exist", slug),
        )),
        Err(e) => {
            error!("Failed to fetch case study {}: {}", slug, e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// GET /api/admin/case-studies - drafts included
pub async fn list_all_case_studies(
    repository: web::Data<Repository>,
) -> ActixResult<impl Responder> {
    match repository.list_case_studies(false, false).await {
        Ok(studies) => {
            let data: Vec<CaseStudyResponse> = studies.into_iter().map(Into::into).collect();
            Ok(success_response(data))
        }
        Err(e) => {
            error!("Failed to list case studies: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// POST /api/admin/case-studies
pub async fn create_case_study(
    repository: web::Data<Repository>,
    body: web::Json<PostNewCaseStudy>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();

    if body.slug.trim().is_empty() || body.title.trim().is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidPayload,
            "title and slug must not be empty",
        ));
    }

    let input = NewCaseStudy {
        title: body.title,
        slug: body.slug,
        company: body.company,
        role: body.role,
        duration: body.duration,
        overview: body.overview,
        challenge: body.challenge,
        solution: body.solution,
        impact: body.impact,
        image_url: body.image_url,
        metrics: body.metrics,
        featured: body.featured,
        published: body.published,
        tags: body.tags,
    };

    match repository.create_case_study(input).await {
        Ok(study) => Ok(created_response(CaseStudyResponse::from(study))),
        Err(e) => {
            error!("Failed to create case study: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// PUT /api/admin/case-studies/{slug}
pub async fn update_case_study(
    repository: web::Data<Repository>,
    path: web::Path<String>,
    body: web::Json<UpdateCaseStudyRequest>,
) -> ActixResult<impl Responder> {
    let slug = path.into_inner();
    let body = body.into_inner();

    let input = UpdateCaseStudy {
        title: body.title,
        company: body.company,
        role: body.role,
        duration: body.duration,
        overview: body.overview,
        challenge: body.challenge,
        solution: body.solution,
        impact: body.impact,
        image_url: body.image_url.map(Some),
        metrics: body.metrics,
        featured: body.featured,
        published: body.published,
        tags: body.tags,
    };

    match repository.update_case_study(&slug, input).await {
        Ok(study) => Ok(success_response(CaseStudyResponse::from(study))),
        Err(e) => Ok(error_from_portfolio(&e)),
    }
}

/// DELETE /api/admin/case-studies/{slug}
pub async fn delete_case_study(
    repository: web::Data<Repository>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let slug = path.into_inner();

    match repository.delete_case_study(&slug).await {
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
