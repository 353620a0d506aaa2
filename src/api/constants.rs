//! API module constants
//!
//! Cookie names shared by the auth handlers and the auth middleware.

/// Access token cookie name
pub const ACCESS_COOKIE_NAME: &str = "accessToken";

/// Refresh token cookie name
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";
