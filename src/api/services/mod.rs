//! Route handlers and their shared plumbing

pub mod analytics;
pub mod auth;
pub mod blog;
pub mod case_studies;
pub mod certifications;
pub mod error_code;
pub mod health;
pub mod helpers;
pub mod projects;
pub mod routes;
pub mod testimonials;
pub mod types;

pub use error_code::ErrorCode;
pub use health::AppStartTime;
pub use types::ApiResponse;
