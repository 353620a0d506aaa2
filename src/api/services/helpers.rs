//! Response helpers shared by all handlers

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::api::constants;
use crate::errors::PortfolioError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// Build a JSON response in the standard envelope
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// Build an error response from a PortfolioError, mapping HTTP status and
/// error code automatically
pub fn error_from_portfolio(err: &PortfolioError) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from(err);
    error_response(status, error_code, err.message())
}

/// Cookie builder for the auth endpoints
pub struct CookieBuilder {
    secure: bool,
    access_token_minutes: u64,
    refresh_token_days: u64,
}

impl CookieBuilder {
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        Self {
            secure: config.auth.cookie_secure,
            access_token_minutes: config.auth.access_token_minutes,
            refresh_token_days: config.auth.refresh_token_days,
        }
    }

    fn build_cookie_base(
        &self,
        name: String,
        value: String,
        path: String,
        max_age: actix_web::cookie::time::Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(name, value);
        cookie.set_path(path);
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn build_access_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            constants::ACCESS_COOKIE_NAME.to_string(),
            token,
            "/".to_string(),
            actix_web::cookie::time::Duration::minutes(self.access_token_minutes as i64),
        )
    }

    /// Refresh cookie is scoped to the auth endpoints only
    pub fn build_refresh_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            constants::REFRESH_COOKIE_NAME.to_string(),
            token,
            "/api/auth".to_string(),
            actix_web::cookie::time::Duration::days(self.refresh_token_days as i64),
        )
    }

    pub fn build_expired_access_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(
            constants::ACCESS_COOKIE_NAME.to_string(),
            String::new(),
            "/".to_string(),
            actix_web::cookie::time::Duration::ZERO,
        )
    }

    pub fn build_expired_refresh_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(
            constants::REFRESH_COOKIE_NAME.to_string(),
            String::new(),
            "/api/auth".to_string(),
            actix_web::cookie::time::Duration::ZERO,
        )
    }

    pub fn refresh_cookie_name(&self) -> &str {
        constants::REFRESH_COOKIE_NAME
    }

    pub fn access_token_minutes(&self) -> u64 {
        self.access_token_minutes
    }

    pub fn refresh_token_days(&self) -> u64 {
        self.refresh_token_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_structure() {
        let response = json_response(StatusCode::OK, ErrorCode::Success, "OK", Some("test_data"));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_success_response() {
        let response = success_response("success_data");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_response() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Something went wrong",
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_from_portfolio_maps_status() {
        let err = PortfolioError::not_found("nope");
        let response = error_from_portfolio(&err);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err = PortfolioError::validation("bad input");
        let response = error_from_portfolio(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
