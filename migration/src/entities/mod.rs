pub mod blog_post;
pub mod blog_post_tag;
pub mod case_study;
pub mod case_study_tag;
pub mod certification;
pub mod project;
pub mod project_ranking;
pub mod project_tag;
pub mod project_view;
pub mod refresh_token;
pub mod tag;
pub mod testimonial;
pub mod user;

pub use blog_post::Entity as BlogPostEntity;
pub use blog_post_tag::Entity as BlogPostTagEntity;
pub use case_study::Entity as CaseStudyEntity;
pub use case_study_tag::Entity as CaseStudyTagEntity;
pub use certification::Entity as CertificationEntity;
pub use project::Entity as ProjectEntity;
pub use project_ranking::Entity as ProjectRankingEntity;
pub use project_tag::Entity as ProjectTagEntity;
pub use project_view::Entity as ProjectViewEntity;
pub use refresh_token::Entity as RefreshTokenEntity;
pub use tag::Entity as TagEntity;
pub use testimonial::Entity as TestimonialEntity;
pub use user::Entity as UserEntity;
