//! Project CRUD and ranked listing
//!
//! Listing order is `featured desc, score desc, created_at desc`; the score
//! comes from the owned ranking row, recomputed out of band.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::info;

use crate::errors::{PortfolioError, Result};

use super::Repository;
use super::tags::upsert_tags;

use migration::entities::{project, project_ranking, project_tag, tag};

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub summary: String,
    pub content: Option<String>,
    pub featured: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<Option<String>>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub editorial_rank: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct ProjectWithMeta {
    pub project: project::Model,
    pub ranking: Option<project_ranking::Model>,
    pub tags: Vec<String>,
}

impl ProjectWithMeta {
    pub fn score(&self) -> f64 {
        self.ranking.as_ref().map(|r| r.score).unwrap_or(0.0)
    }

    pub fn editorial_rank(&self) -> i32 {
        self.ranking.as_ref().map(|r| r.editorial_rank).unwrap_or(0)
    }
}

impl Repository {
    /// Create a project together with its default ranking row
    pub async fn create_project(&self, input: NewProject) -> Result<ProjectWithMeta> {
        use sea_orm::ActiveValue::Set;

        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let model = project::ActiveModel {
            title: Set(input.title),
            summary: Set(input.summary),
            content: Set(input.content),
            featured: Set(input.featured),
            views: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // Ranking is created with the project: rank 0, score 0
        let ranking = project_ranking::ActiveModel {
            project_id: Set(model.id),
            editorial_rank: Set(0),
            score: Set(0.0),
        }
        .insert(&txn)
        .await?;

        let tag_models = upsert_tags(&txn, &input.tags).await?;
        for tag_model in &tag_models {
            project_tag::ActiveModel {
                project_id: Set(model.id),
                tag_id: Set(tag_model.id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!("Project created: {} ({})", model.title, model.id);
        Ok(ProjectWithMeta {
            project: model,
            ranking: Some(ranking),
            tags: tag_models.into_iter().map(|t| t.name).collect(),
        })
    }

    /// Ranked project listing
    ///
    /// `page` is 1-based; `limit` is the page size (already clamped by the
    /// caller).
    pub async fn list_projects(&self, page: u64, limit: u64) -> Result<Vec<ProjectWithMeta>> {
        let page = page.max(1);

        let rows = project::Entity::find()
            .find_also_related(project_ranking::Entity)
            .order_by_desc(project::Column::Featured)
            .order_by_desc(project_ranking::Column::Score)
            .order_by_desc(project::Column::CreatedAt)
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await?;

        self.with_project_tags(rows).await
    }

    pub async fn count_projects(&self) -> Result<u64> {
        Ok(project::Entity::find().count(&self.db).await?)
    }

    pub async fn get_project(&self, id: i32) -> Result<Option<ProjectWithMeta>> {
        let row = project::Entity::find_by_id(id)
            .find_also_related(project_ranking::Entity)
            .one(&self.db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.with_project_tags(vec![row]).await?.into_iter().next())
    }

    /// Update a project and, when present, its editorial rank
    ///
    /// Tags are replaced wholesale when a tag list is provided. Returns the
    /// updated project; `NotFound` when the id does not exist.
    pub async fn update_project(&self, id: i32, input: UpdateProject) -> Result<ProjectWithMeta> {
        use sea_orm::ActiveValue::Set;

        let existing = project::Entity::find_by_id(id).one(&self.db).await?;
        let Some(existing) = existing else {
            return Err(PortfolioError::not_found(format!(
                "project {} does not exist",
                id
            )));
        };

        let txn = self.db.begin().await?;

        let mut active: project::ActiveModel = existing.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(summary) = input.summary {
            active.summary = Set(summary);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(featured) = input.featured {
            active.featured = Set(featured);
        }
        active.updated_at = Set(chrono::Utc::now());
        active.update(&txn).await?;

        if let Some(tags) = &input.tags {
            project_tag::Entity::delete_many()
                .filter(project_tag::Column::ProjectId.eq(id))
                .exec(&txn)
                .await?;

            let tag_models = upsert_tags(&txn, tags).await?;
            for tag_model in &tag_models {
                project_tag::ActiveModel {
                    project_id: Set(id),
                    tag_id: Set(tag_model.id),
                }
                .insert(&txn)
                .await?;
            }
        }

        if let Some(rank) = input.editorial_rank {
            let ranking = project_ranking::Entity::find_by_id(id).one(&txn).await?;
            if let Some(ranking) = ranking {
                let mut active: project_ranking::ActiveModel = ranking.into();
                active.editorial_rank = Set(rank);
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;

        info!("Project updated: {}", id);
        self.get_project(id).await?.ok_or_else(|| {
            PortfolioError::database_operation(format!("project {} vanished after update", id))
        })
    }

    pub async fn delete_project(&self, id: i32) -> Result<()> {
        let result = project::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(PortfolioError::not_found(format!(
                "project {} does not exist",
                id
            )));
        }

        info!("Project deleted: {}", id);
        Ok(())
    }

    async fn with_project_tags(
        &self,
        rows: Vec<(project::Model, Option<project_ranking::Model>)>,
    ) -> Result<Vec<ProjectWithMeta>> {
        let models: Vec<project::Model> = rows.iter().map(|(p, _)| p.clone()).collect();
        let tags = models
            .load_many_to_many(tag::Entity, project_tag::Entity, &self.db)
            .await?;

        Ok(rows
            .into_iter()
            .zip(tags)
            .map(|((project, ranking), tags)| ProjectWithMeta {
                project,
                ranking,
                tags: tags.into_iter().map(|t| t.name).collect(),
            })
            .collect())
    }
}
