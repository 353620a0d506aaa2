use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{info, trace};

use crate::api::constants;
use crate::api::jwt::{AccessClaims, get_jwt_service};
use crate::api::services::{ApiResponse, ErrorCode};

/// Identity of the authenticated admin, inserted into request extensions
/// for handlers that need the acting user
#[derive(Clone, Debug)]
pub struct AdminIdentity {
    pub user_id: i32,
}

/// Admin authentication middleware
///
/// Accepts a Bearer access token first, then falls back to the access
/// cookie. The token must carry the ADMIN role.
#[derive(Clone)]
pub struct AdminAuth;

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle OPTIONS requests for CORS preflight
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    /// Handle unauthorized requests
    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Admin authentication failed - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: Invalid or missing token".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    }

    /// Validate a token and require the ADMIN role
    fn validate_admin_token(token: &str) -> Option<AccessClaims> {
        let jwt_service = get_jwt_service();
        match jwt_service.validate_access_token(token) {
            Ok(claims) if claims.role == "ADMIN" => {
                trace!("Admin token validation successful");
                Some(claims)
            }
            Ok(claims) => {
                info!("Token valid but role {} is not ADMIN", claims.role);
                None
            }
            Err(e) => {
                info!("Token validation failed: {}", e);
                None
            }
        }
    }

    fn extract_cookie_token(req: &ServiceRequest) -> Option<String> {
        req.cookie(constants::ACCESS_COOKIE_NAME)
            .map(|c| c.value().to_string())
    }
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            // Handle CORS preflight requests
            if req.method() == Method::OPTIONS {
                return Ok(Self::handle_options_request(req));
            }

            // 1. Bearer token first (API clients)
            if let Some(token) = Self::extract_bearer_token(&req)
                && let Some(claims) = Self::validate_admin_token(&token)
            {
                if let Ok(user_id) = claims.sub.parse::<i32>() {
                    req.extensions_mut().insert(AdminIdentity { user_id });
                }
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            // 2. Access cookie second (web panel)
            if let Some(token) = Self::extract_cookie_token(&req)
                && let Some(claims) = Self::validate_admin_token(&token)
            {
                if let Ok(user_id) = claims.sub.parse::<i32>() {
                    req.extensions_mut().insert(AdminIdentity { user_id });
                }
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            Ok(Self::handle_unauthorized(req))
        })
    }
}
