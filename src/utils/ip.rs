//! Client IP extraction for view dedup
//!
//! The extracted IP is only a cooldown key, never a security decision.
//! Clients with no forwarding header at all share the "unknown" bucket per
//! entity; that is a deliberate anti-spam compromise, not a gap.

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// Sentinel used when no forwarding header is present
pub const UNKNOWN_IP: &str = "unknown";

/// Extract the forwarded client IP from headers
///
/// Prefers the first entry of `x-forwarded-for` (the original client), then
/// `x-real-ip`.
pub fn extract_forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

/// Client IP used as the cooldown key, falling back to [`UNKNOWN_IP`]
pub fn client_ip_or_unknown(req: &HttpRequest) -> String {
    extract_forwarded_ip(req.headers()).unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// User agent string, falling back to "unknown"
pub fn user_agent_or_unknown(req: &HttpRequest) -> String {
    req.headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1, 10.0.0.2"))
            .to_http_request();
        assert_eq!(client_ip_or_unknown(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("x-real-ip", "198.51.100.4"))
            .to_http_request();
        assert_eq!(client_ip_or_unknown(&req), "198.51.100.4");
    }

    #[test]
    fn test_forwarded_for_wins_over_real_ip() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.7"))
            .insert_header(("x-real-ip", "198.51.100.4"))
            .to_http_request();
        assert_eq!(client_ip_or_unknown(&req), "203.0.113.7");
    }

    #[test]
    fn test_unknown_sentinel_without_headers() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(client_ip_or_unknown(&req), UNKNOWN_IP);
    }

    #[test]
    fn test_empty_forwarded_for_falls_through() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", " "))
            .to_http_request();
        assert_eq!(client_ip_or_unknown(&req), UNKNOWN_IP);
    }

    #[test]
    fn test_user_agent_default() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(user_agent_or_unknown(&req), "unknown");

        let req = TestRequest::default()
            .insert_header(("user-agent", "Mozilla/5.0"))
            .to_http_request();
        assert_eq!(user_agent_or_unknown(&req), "Mozilla/5.0");
    }
}
