//! Certification endpoints: public listing and admin create

use actix_web::http::StatusCode;
use actix_web::{Responder, Result as ActixResult, web};
use tracing::error;

use crate::repository::{NewCertification, Repository};

use super::error_code::ErrorCode;
use super::helpers::{created_response, error_from_portfolio, error_response, success_response};
use super::types::{CertificationResponse, PostNewCertification};

/// GET /api/certifications - ordered by manual rank, then recency
pub async fn list_certifications(
    repository: web::Data<Repository>,
) -> ActixResult<impl Responder> {
    match repository.list_certifications().await {
        Ok(certifications) => {
            let data: Vec<CertificationResponse> =
                certifications.into_iter().map(Into::into).collect();
            Ok(success_response(data))
        }
        Err(e) => {
            error!("Failed to list certifications: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// POST /api/admin/certifications
pub async fn create_certification(
    repository: web::Data<Repository>,
    body: web::Json<PostNewCertification>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();

    if body.title.trim().is_empty() || body.issuer.trim().is_empty() || body.date.trim().is_empty()
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidPayload,
            "title, issuer, and date must not be empty",
        ));
    }

    let input = NewCertification {
        title: body.title,
        issuer: body.issuer,
        date: body.date,
        credential_url: body.credential_url,
        image_url: body.image_url,
        order_index: body.order_index,
    };

    match repository.create_certification(input).await {
        Ok(certification) => Ok(created_response(CertificationResponse::from(certification))),
        Err(e) => {
            error!("Failed to create certification: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}
