//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::{BlogPostWithTags, CaseStudyWithTags, ProjectWithMeta};

use migration::entities::{certification, testimonial};

/// Standard response envelope
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthSuccessResponse {
    pub message: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    /// Also delivered as an httpOnly cookie; returned in the body for
    /// Bearer-token API clients
    pub access_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedResponse<T> {
    pub code: i32,
    pub data: T,
    pub pagination: PaginationInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ListProjectsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Response for POST /projects/{id}/view
///
/// Shape is part of the public contract: a counted view is
/// `{"success":true,"counted":true}`; a deduplicated view is
/// `{"success":true,"skipped":true,"reason":"Cooldown active"}`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ViewResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ViewResponse {
    pub fn counted() -> Self {
        Self {
            success: true,
            counted: Some(true),
            skipped: None,
            reason: None,
        }
    }

    pub fn skipped(reason: &str) -> Self {
        Self {
            success: true,
            counted: None,
            skipped: Some(true),
            reason: Some(reason.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProjectResponse {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub content: Option<String>,
    pub featured: bool,
    pub views: i64,
    pub score: f64,
    pub editorial_rank: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectWithMeta> for ProjectResponse {
    fn from(meta: ProjectWithMeta) -> Self {
        let score = meta.score();
        let editorial_rank = meta.editorial_rank();
        Self {
            id: meta.project.id,
            title: meta.project.title,
            summary: meta.project.summary,
            content: meta.project.content,
            featured: meta.project.featured,
            views: meta.project.views,
            score,
            editorial_rank,
            tags: meta.tags,
            created_at: meta.project.created_at,
            updated_at: meta.project.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewProject {
    pub title: String,
    pub summary: String,
    pub content: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub editorial_rank: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RecomputeScoreResponse {
    pub id: i32,
    pub score: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BlogPostResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub author: String,
    pub published: bool,
    pub views: i64,
    pub read_time: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPostWithTags> for BlogPostResponse {
    fn from(row: BlogPostWithTags) -> Self {
        Self {
            id: row.post.id,
            title: row.post.title,
            slug: row.post.slug,
            excerpt: row.post.excerpt,
            content: row.post.content,
            cover_image: row.post.cover_image,
            author: row.post.author,
            published: row.post.published,
            views: row.post.views,
            read_time: row.post.read_time,
            tags: row.tags,
            created_at: row.post.created_at,
            updated_at: row.post.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub author: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub read_time: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpdateBlogPostRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub read_time: Option<i32>,
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CaseStudyResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub company: String,
    pub role: String,
    pub duration: String,
    pub overview: String,
    pub challenge: String,
    pub solution: String,
    pub impact: String,
    pub image_url: Option<String>,
    pub metrics: serde_json::Value,
    pub featured: bool,
    pub published: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CaseStudyWithTags> for CaseStudyResponse {
    fn from(row: CaseStudyWithTags) -> Self {
        let metrics = row.metrics();
        Self {
            id: row.case_study.id,
            title: row.case_study.title,
            slug: row.case_study.slug,
            company: row.case_study.company,
            role: row.case_study.role,
            duration: row.case_study.duration,
            overview: row.case_study.overview,
            challenge: row.case_study.challenge,
            solution: row.case_study.solution,
            impact: row.case_study.impact,
            image_url: row.case_study.image_url,
            metrics,
            featured: row.case_study.featured,
            published: row.case_study.published,
            tags: row.tags,
            created_at: row.case_study.created_at,
            updated_at: row.case_study.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewCaseStudy {
    pub title: String,
    pub slug: String,
    pub company: String,
    pub role: String,
    pub duration: String,
    pub overview: String,
    pub challenge: String,
    pub solution: String,
    pub impact: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub metrics: serde_json::Value,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpdateCaseStudyRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub duration: Option<String>,
    pub overview: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub impact: Option<String>,
    pub image_url: Option<String>,
    pub metrics: Option<serde_json::Value>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CertificationResponse {
    pub id: i32,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

impl From<certification::Model> for CertificationResponse {
    fn from(model: certification::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            issuer: model.issuer,
            date: model.date,
            credential_url: model.credential_url,
            image_url: model.image_url,
            order_index: model.order_index,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewCertification {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TestimonialResponse {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub company: String,
    pub content: String,
    pub avatar_url: Option<String>,
    pub rating: i32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<testimonial::Model> for TestimonialResponse {
    fn from(model: testimonial::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            role: model.role,
            company: model.company,
            content: model.content,
            avatar_url: model.avatar_url,
            rating: model.rating,
            featured: model.featured,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewTestimonial {
    pub name: String,
    pub role: String,
    pub company: String,
    pub content: String,
    pub avatar_url: Option<String>,
    pub rating: i32,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpdateTestimonialRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: Option<String>,
    pub avatar_url: Option<String>,
    pub rating: Option<i32>,
    pub featured: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ListContentQuery {
    pub featured: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DailyViewsQuery {
    pub days: Option<i64>,
}
