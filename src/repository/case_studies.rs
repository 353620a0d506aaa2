//! Case study CRUD
//!
//! Metrics are stored as a serialized JSON object and parsed at the API
//! boundary.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, LoaderTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::info;

use crate::errors::{PortfolioError, Result};

use super::Repository;
use super::tags::upsert_tags;

use migration::entities::{case_study, case_study_tag, tag};

#[derive(Debug, Clone)]
pub struct NewCaseStudy {
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
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCaseStudy {
    pub title: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub duration: Option<String>,
    pub overview: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub impact: Option<String>,
    pub image_url: Option<Option<String>>,
    pub metrics: Option<serde_json::Value>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct CaseStudyWithTags {
    pub case_study: case_study::Model,
    pub tags: Vec<String>,
}

impl CaseStudyWithTags {
    /// Parsed metrics object; malformed stored JSON degrades to an empty map
    pub fn metrics(&self) -> serde_json::Value {
        serde_json::from_str(&self.case_study.metrics)
            .unwrap_or_else(|_| serde_json::json!({}))
    }
}

impl Repository {
    pub async fn create_case_study(&self, input: NewCaseStudy) -> Result<CaseStudyWithTags> {
        use sea_orm::ActiveValue::Set;

        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let model = case_study::ActiveModel {
            title: Set(input.title),
            slug: Set(input.slug),
            company: Set(input.company),
            role: Set(input.role),
            duration: Set(input.duration),
            overview: Set(input.overview),
            challenge: Set(input.challenge),
            solution: Set(input.solution),
            impact: Set(input.impact),
            image_url: Set(input.image_url),
            metrics: Set(serde_json::to_string(&input.metrics)?),
            featured: Set(input.featured),
            published: Set(input.published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let tag_models = upsert_tags(&txn, &input.tags).await?;
        for tag_model in &tag_models {
            case_study_tag::ActiveModel {
                case_study_id: Set(model.id),
                tag_id: Set(tag_model.id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!("Case study created: {}", model.slug);
        Ok(CaseStudyWithTags {
            case_study: model,
            tags: tag_models.into_iter().map(|t| t.name).collect(),
        })
    }

    pub async fn list_case_studies(
        &self,
        published_only: bool,
        featured_only: bool,
    ) -> Result<Vec<CaseStudyWithTags>> {
        let mut query = case_study::Entity::find().order_by_desc(case_study::Column::CreatedAt);

        if published_only {
            query = query.filter(case_study::Column::Published.eq(true));
        }
        if featured_only {
            query = query.filter(case_study::Column::Featured.eq(true));
        }

        let studies = query.all(&self.db).await?;
        self.with_case_study_tags(studies).await
    }

    pub async fn get_case_study(&self, slug: &str) -> Result<Option<CaseStudyWithTags>> {
        let study = case_study::Entity::find()
            .filter(case_study::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;

        let Some(study) = study else {
            return Ok(None);
        };

        Ok(self
            .with_case_study_tags(vec![study])
            .await?
            .into_iter()
            .next())
    }

    pub async fn update_case_study(
        &self,
        slug: &str,
        input: UpdateCaseStudy,
    ) -> Result<CaseStudyWithTags> {
        use sea_orm::ActiveValue::Set;

        let existing = case_study::Entity::find()
            .filter(case_study::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        let Some(existing) = existing else {
            return Err(PortfolioError::not_found(format!(
                "case study {} does not exist",
                slug
            )));
        };
        let id = existing.id;

        let txn = self.db.begin().await?;

        let mut active: case_study::ActiveModel = existing.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(company) = input.company {
            active.company = Set(company);
        }
        if let Some(role) = input.role {
            active.role = Set(role);
        }
        if let Some(duration) = input.duration {
            active.duration = Set(duration);
        }
        if let Some(overview) = input.overview {
            active.overview = Set(overview);
        }
        if let Some(challenge) = input.challenge {
            active.challenge = Set(challenge);
        }
        if let Some(solution) = input.solution {
            active.solution = Set(solution);
        }
        if let Some(impact) = input.impact {
            active.impact = Set(impact);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(metrics) = input.metrics {
            active.metrics = Set(serde_json::to_string(&metrics)?);
        }
        if let Some(featured) = input.featured {
            active.featured = Set(featured);
        }
        if let Some(published) = input.published {
            active.published = Set(published);
        }
        active.updated_at = Set(chrono::Utc::now());
        active.update(&txn).await?;

        if let Some(tags) = &input.tags {
            case_study_tag::Entity::delete_many()
                .filter(case_study_tag::Column::CaseStudyId.eq(id))
                .exec(&txn)
                .await?;

            let tag_models = upsert_tags(&txn, tags).await?;
            for tag_model in &tag_models {
                case_study_tag::ActiveModel {
                    case_study_id: Set(id),
                    tag_id: Set(tag_model.id),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        info!("Case study updated: {}", slug);
        self.get_case_study(slug).await?.ok_or_else(|| {
            PortfolioError::database_operation(format!(
                "case study {} vanished after update",
                slug
            ))
        })
    }

    pub async fn delete_case_study(&self, slug: &str) -> Result<()> {
        let result = case_study::Entity::delete_many()
            .filter(case_study::Column::Slug.eq(slug))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(PortfolioError::not_found(format!(
                "case study {} does not exist",
                slug
            )));
        }

        info!("Case study deleted: {}", slug);
        Ok(())
    }

    async fn with_case_study_tags(
        &self,
        studies: Vec<case_study::Model>,
    ) -> Result<Vec<CaseStudyWithTags>> {
        let tags = studies
            .load_many_to_many(tag::Entity, case_study_tag::Entity, &self.db)
            .await?;

        Ok(studies
            .into_iter()
            .zip(tags)
            .map(|(case_study, tags)| CaseStudyWithTags {
                case_study,
                tags: tags.into_iter().map(|t| t.name).collect(),
            })
            .collect())
    }
}
