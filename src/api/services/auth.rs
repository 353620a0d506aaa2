//! Auth endpoints: login, refresh, logout

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use governor::middleware::NoOpMiddleware;
use tracing::{debug, error, info, warn};

use crate::api::jwt::get_jwt_service;
use crate::repository::{Repository, StoredRefreshToken};
use crate::utils::password::verify_password;

use super::error_code::ErrorCode;
use super::helpers::{CookieBuilder, error_response, success_response};
use super::types::{AuthSuccessResponse, LoginCredentials, MessageResponse};

/// Rate limit key extractor using the TCP peer address
///
/// The peer address cannot be spoofed, unlike forwarding headers.
#[derive(Clone, Copy)]
pub struct LoginKeyExtractor;

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let conn_info = req.connection_info();
        let peer_ip = conn_info
            .peer_addr()
            .ok_or_else(|| SimpleKeyExtractionError::new("Unable to extract peer IP"))?;
        Ok(peer_ip.to_string())
    }
}

/// Login rate limiter: 1 request per second with a burst of 5
///
/// Over the limit returns HTTP 429 Too Many Requests.
pub fn login_rate_limiter() -> Governor<LoginKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .key_extractor(LoginKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!("Login rate limiter created: 1 req/s, burst 5");
    Governor::new(&config)
}

/// POST /api/auth/login
pub async fn login(
    repository: web::Data<Repository>,
    login_body: web::Json<LoginCredentials>,
) -> ActixResult<impl Responder> {
    let user = match repository.find_user_by_email(&login_body.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Login failed - unknown email");
            return Ok(error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::AuthFailed,
                "Invalid credentials",
            ));
        }
        Err(e) => {
            error!("Login failed - user lookup error: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Authentication error",
            ));
        }
    };

    let password_valid = match verify_password(&login_body.password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            error!("Login failed - password verification error: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Authentication error",
            ));
        }
    };

    if !password_valid {
        info!("Login failed - invalid password for {}", user.email);
        return Ok(error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::AuthFailed,
            "Invalid credentials",
        ));
    }

    info!("Login successful: {}", user.email);

    let jwt_service = get_jwt_service();
    let access_token = match jwt_service.generate_access_token(user.id, &user.role) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to generate access token: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate token",
            ));
        }
    };

    let refresh_token = match jwt_service.generate_refresh_token(user.id) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to generate refresh token: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate token",
            ));
        }
    };

    let cookie_builder = CookieBuilder::from_config();

    // Persist the refresh token so it can be revoked
    let stored = StoredRefreshToken {
        token: refresh_token.clone(),
        user_id: user.id,
        expires_at: chrono::Utc::now()
            + chrono::Duration::days(cookie_builder.refresh_token_days() as i64),
    };
    if let Err(e) = repository.rotate_refresh_token(user.id, None, &stored).await {
        error!("Failed to store refresh token: {}", e);
        return Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            "Authentication error",
        ));
    }

    let access_cookie = cookie_builder.build_access_cookie(access_token.clone());
    let refresh_cookie = cookie_builder.build_refresh_cookie(refresh_token);

    Ok(HttpResponse::Ok()
        .cookie(access_cookie)
        .cookie(refresh_cookie)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(super::types::ApiResponse {
            code: ErrorCode::Success as i32,
            message: "OK".to_string(),
            data: Some(AuthSuccessResponse {
                message: "Login successful".to_string(),
                expires_in: cookie_builder.access_token_minutes() * 60,
                access_token,
            }),
        }))
}

/// POST /api/auth/refresh
///
/// Rotates the stored refresh token: the presented token is deleted and a
/// new one issued, so a replayed old token fails.
pub async fn refresh_token(
    repository: web::Data<Repository>,
    req: HttpRequest,
) -> ActixResult<impl Responder> {
    let cookie_builder = CookieBuilder::from_config();

    let presented = match req.cookie(cookie_builder.refresh_cookie_name()) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            warn!("Refresh token not found in cookie");
            return Ok(error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::TokenInvalid,
                "Refresh token not found",
            ));
        }
    };

    let jwt_service = get_jwt_service();
    if let Err(e) = jwt_service.validate_refresh_token(&presented) {
        warn!("Invalid refresh token: {}", e);
        return Ok(error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::TokenInvalid,
            "Invalid refresh token",
        ));
    }

    // Token must still be on record; a rotated-out token is rejected
    let stored = match repository.find_refresh_token(&presented).await {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            warn!("Refresh token not on record or expired");
            return Ok(error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::TokenExpired,
                "Refresh token revoked or expired",
            ));
        }
        Err(e) => {
            error!("Refresh token lookup error: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Authentication error",
            ));
        }
    };

    let user = match repository.find_user_by_id(stored.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("Refresh token user {} no longer exists", stored.user_id);
            return Ok(error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::TokenInvalid,
                "Invalid refresh token",
            ));
        }
        Err(e) => {
            error!("User lookup error during refresh: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Authentication error",
            ));
        }
    };

    info!("Token refresh successful: {}", user.email);

    let new_access_token = match jwt_service.generate_access_token(user.id, &user.role) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to generate access token: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate token",
            ));
        }
    };

    let new_refresh_token = match jwt_service.generate_refresh_token(user.id) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to generate refresh token: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate token",
            ));
        }
    };

    let replacement = StoredRefreshToken {
        token: new_refresh_token.clone(),
        user_id: user.id,
        expires_at: chrono::Utc::now()
            + chrono::Duration::days(cookie_builder.refresh_token_days() as i64),
    };
    if let Err(e) = repository
        .rotate_refresh_token(user.id, Some(&presented), &replacement)
        .await
    {
        error!("Failed to rotate refresh token: {}", e);
        return Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            "Authentication error",
        ));
    }

    let access_cookie = cookie_builder.build_access_cookie(new_access_token.clone());
    let refresh_cookie = cookie_builder.build_refresh_cookie(new_refresh_token);

    Ok(HttpResponse::Ok()
        .cookie(access_cookie)
        .cookie(refresh_cookie)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(super::types::ApiResponse {
            code: ErrorCode::Success as i32,
            message: "OK".to_string(),
            data: Some(AuthSuccessResponse {
                message: "Token refreshed".to_string(),
                expires_in: cookie_builder.access_token_minutes() * 60,
                access_token: new_access_token,
            }),
        }))
}

/// POST /api/auth/logout
///
/// Revokes every stored refresh token for the user when the refresh cookie
/// is present, then clears both cookies.
pub async fn logout(
    repository: web::Data<Repository>,
    req: HttpRequest,
) -> ActixResult<impl Responder> {
    let cookie_builder = CookieBuilder::from_config();

    if let Some(cookie) = req.cookie(cookie_builder.refresh_cookie_name()) {
        let jwt_service = get_jwt_service();
        if let Ok(claims) = jwt_service.validate_refresh_token(cookie.value())
            && let Ok(user_id) = claims.sub.parse::<i32>()
        {
            match repository.delete_refresh_tokens(user_id).await {
                Ok(n) => info!("Logout: revoked {} refresh token(s) for user {}", n, user_id),
                Err(e) => warn!("Logout: failed to revoke refresh tokens: {}", e),
            }
        }
    }

    let access_cookie = cookie_builder.build_expired_access_cookie();
    let refresh_cookie = cookie_builder.build_expired_refresh_cookie();

    Ok(HttpResponse::Ok()
        .cookie(access_cookie)
        .cookie(refresh_cookie)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(super::types::ApiResponse {
            code: ErrorCode::Success as i32,
            message: "OK".to_string(),
            data: Some(MessageResponse {
                message: "Logout successful".to_string(),
            }),
        }))
}

/// GET /api/admin/auth/verify - reaching the handler means the middleware
/// accepted the token
pub async fn verify_token(_req: HttpRequest) -> ActixResult<impl Responder> {
    Ok(success_response(MessageResponse {
        message: "Token is valid".to_string(),
    }))
}
