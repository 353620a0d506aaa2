//! Read-only aggregates for the admin dashboard
//!
//! Daily buckets are aggregated in Rust instead of SQL so the same code
//! works across SQLite, MySQL, and PostgreSQL.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::errors::Result;

use super::Repository;

use migration::entities::{project, project_ranking, project_view};

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsTotals {
    pub projects: u64,
    pub featured: u64,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopProject {
    pub id: i32,
    pub title: String,
    pub views: i64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: i64,
}

impl Repository {
    pub async fn analytics_totals(&self) -> Result<AnalyticsTotals> {
        let projects = project::Entity::find().count(&self.db).await?;
        let featured = project::Entity::find()
            .filter(project::Column::Featured.eq(true))
            .count(&self.db)
            .await?;

        // Counter sum rather than event-log count: the counter is what the
        // public listing shows. SUM over an empty table is NULL.
        let views = project::Entity::find()
            .select_only()
            .column_as(project::Column::Views.sum(), "views")
            .into_tuple::<Option<i64>>()
            .one(&self.db)
            .await?
            .flatten()
            .unwrap_or(0);

        Ok(AnalyticsTotals {
            projects,
            featured,
            views,
        })
    }

    /// Top five projects by the public listing order
    pub async fn top_projects(&self) -> Result<Vec<TopProject>> {
        let rows = project::Entity::find()
            .find_also_related(project_ranking::Entity)
            .order_by_desc(project::Column::Featured)
            .order_by_desc(project_ranking::Column::Score)
            .order_by_desc(project::Column::CreatedAt)
            .limit(5)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(project, ranking)| TopProject {
                id: project.id,
                title: project.title,
                views: project.views,
                score: ranking.map(|r| r.score).unwrap_or(0.0),
            })
            .collect())
    }

    /// View events bucketed per UTC day over the last `days` days
    pub async fn daily_views(&self, days: i64) -> Result<Vec<DailyViews>> {
        let since = chrono::Utc::now() - chrono::Duration::days(days);

        let events = project_view::Entity::find()
            .filter(project_view::Column::CreatedAt.gte(since))
            .order_by_asc(project_view::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for event in events {
            *buckets.entry(event.created_at.date_naive()).or_insert(0) += 1;
        }

        Ok(buckets
            .into_iter()
            .map(|(date, views)| DailyViews { date, views })
            .collect())
    }
}
