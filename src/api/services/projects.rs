//! Project endpoints: public listing, view recording, and admin CRUD

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::{error, info};

use crate::errors::PortfolioError;
use crate::repository::{NewProject, Repository, UpdateProject};
use crate::services::{ViewOutcome, record_view, recompute_score};
use crate::utils::ip::{client_ip_or_unknown, user_agent_or_unknown};

use super::error_code::ErrorCode;
use super::helpers::{created_response, error_from_portfolio, error_response, success_response};
use super::types::{
    ApiResponse, ListProjectsQuery, PaginatedResponse, PaginationInfo, PostNewProject,
    ProjectResponse, RecomputeScoreResponse, UpdateProjectRequest, ViewResponse,
};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Parse a path id, mapping garbage to a 400 validation error
fn parse_project_id(raw: &str) -> Result<i32, PortfolioError> {
    raw.parse::<i32>()
        .map_err(|_| PortfolioError::validation(format!("invalid project id: {}", raw)))
}

/// GET /api/projects
///
/// Ordered featured first, then score, then recency.
pub async fn list_projects(
    repository: web::Data<Repository>,
    query: web::Query<ListProjectsQuery>,
) -> ActixResult<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let projects = match repository.list_projects(page, limit).await {
        Ok(projects) => projects,
        Err(e) => {
            error!("Failed to list projects: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    let total = match repository.count_projects().await {
        Ok(total) => total,
        Err(e) => {
            error!("Failed to count projects: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    let data: Vec<ProjectResponse> = projects.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(PaginatedResponse {
            code: ErrorCode::Success as i32,
            data,
            pagination: PaginationInfo {
                page,
                limit,
                total,
                total_pages: total.div_ceil(limit),
            },
        }))
}

/// GET /api/projects/{id}
pub async fn get_project(
    repository: web::Data<Repository>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let id = match parse_project_id(&path) {
        Ok(id) => id,
        Err(e) => return Ok(error_from_portfolio(&e)),
    };

    match repository.get_project(id).await {
        Ok(Some(project)) => Ok(success_response(ProjectResponse::from(project))),
        Ok(None) => Ok(error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::ResourceNotFound,
            &format!("project {} does not exist", id),
        )),
        Err(e) => {
            error!("Failed to fetch project {}: {}", id, e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// POST /api/projects/{id}/view
///
/// Response shape is fixed by the public contract, so this endpoint does
/// not use the standard envelope.
pub async fn post_project_view(
    repository: web::Data<Repository>,
    path: web::Path<String>,
    req: HttpRequest,
) -> ActixResult<impl Responder> {
    // Validate before any side effect
    let id = match parse_project_id(&path) {
        Ok(id) => id,
        Err(e) => return Ok(error_from_portfolio(&e)),
    };

    let ip = client_ip_or_unknown(&req);
    let user_agent = user_agent_or_unknown(&req);

    match record_view(repository.db(), id, &ip, &user_agent).await {
        Ok(ViewOutcome::Counted) => Ok(HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ViewResponse::counted())),
        Ok(ViewOutcome::Cooldown) => Ok(HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ViewResponse::skipped("Cooldown active"))),
        Err(e) => {
            if !matches!(e, PortfolioError::NotFound(_)) {
                error!("Failed to record view for project {}: {}", id, e);
            }
            Ok(error_from_portfolio(&e))
        }
    }
}

/// POST /api/admin/projects
pub async fn create_project(
    repository: web::Data<Repository>,
    body: web::Json<PostNewProject>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();

    if body.title.trim().is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidPayload,
            "title must not be empty",
        ));
    }

    let input = NewProject {
        title: body.title,
        summary: body.summary,
        content: body.content,
        featured: body.featured,
        tags: body.tags,
    };

    match repository.create_project(input).await {
        Ok(project) => Ok(created_response(ProjectResponse::from(project))),
        Err(e) => {
            error!("Failed to create project: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// PUT /api/admin/projects/{id}
///
/// An editorial rank change triggers a score recompute so the listing
/// reflects it immediately.
pub async fn update_project(
    repository: web::Data<Repository>,
    path: web::Path<String>,
    body: web::Json<UpdateProjectRequest>,
) -> ActixResult<impl Responder> {
    let id = match parse_project_id(&path) {
        Ok(id) => id,
        Err(e) => return Ok(error_from_portfolio(&e)),
    };

    let body = body.into_inner();
    let rank_changed = body.editorial_rank.is_some();

    let input = UpdateProject {
        title: body.title,
        summary: body.summary,
        content: body.content.map(Some),
        featured: body.featured,
        tags: body.tags,
        editorial_rank: body.editorial_rank,
    };

    match repository.update_project(id, input).await {
        Ok(_) => {
            if rank_changed
                && let Err(e) = recompute_score(repository.db(), id).await
            {
                error!("Score recompute failed for project {}: {}", id, e);
            }

            // Re-read so the response carries the recomputed score
            match repository.get_project(id).await {
                Ok(Some(project)) => Ok(success_response(ProjectResponse::from(project))),
                Ok(None) => Ok(error_response(
                    StatusCode::NOT_FOUND,
                    ErrorCode::ResourceNotFound,
                    &format!("project {} does not exist", id),
                )),
                Err(e) => Ok(error_from_portfolio(&e)),
            }
        }
        Err(e) => Ok(error_from_portfolio(&e)),
    }
}

/// DELETE /api/admin/projects/{id}
pub async fn delete_project(
    repository: web::Data<Repository>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let id = match parse_project_id(&path) {
        Ok(id) => id,
        Err(e) => return Ok(error_from_portfolio(&e)),
    };

    match repository.delete_project(id).await {
        Ok(()) => {
            info!("Project {} deleted via admin API", id);
            Ok(HttpResponse::Ok()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Success as i32,
                    message: "Deleted".to_string(),
                    data: None,
                }))
        }
        Err(e) => Ok(error_from_portfolio(&e)),
    }
}

/// POST /api/admin/projects/{id}/recompute-score
///
/// Recompute is best-effort: a missing project yields 404 here, but the
/// underlying service treats it as a no-op.
pub async fn recompute_project_score(
    repository: web::Data<Repository>,
    path: web::Path<String>,
) -> ActixResult<impl Responder> {
    let id = match parse_project_id(&path) {
        Ok(id) => id,
        Err(e) => return Ok(error_from_portfolio(&e)),
    };

    match recompute_score(repository.db(), id).await {
        Ok(Some(score)) => Ok(success_response(RecomputeScoreResponse { id, score })),
        Ok(None) => Ok(error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::ResourceNotFound,
            &format!("project {} does not exist", id),
        )),
        Err(e) => {
            error!("Score recompute failed for project {}: {}", id, e);
            Ok(error_from_portfolio(&e))
        }
    }
}
