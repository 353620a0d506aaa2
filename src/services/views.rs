//! View recording with per-IP cooldown
//!
//! A view counts at most once per client IP per project within the cooldown
//! window. Clients without a resolvable address share the "unknown" bucket
//! per project, so they under-count rather than over-count. The cooldown
//! check and the write are separate statements; concurrent requests from
//! one client may both count, which is acceptable over-counting.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ExprTrait, PaginatorTrait,
    QueryFilter, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::errors::{PortfolioError, Result};

use migration::entities::{project, project_view};

/// Window during which repeat views from the same IP are skipped
pub const VIEW_COOLDOWN_MINUTES: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Event stored and counter incremented
    Counted,
    /// A view from this IP landed inside the cooldown window
    Cooldown,
}

/// Record a view for `project_id` from `ip`
///
/// Returns `NotFound` when the project does not exist. On a counted view the
/// event insert and the counter increment commit in one transaction, so the
/// counter never drifts from the event log.
pub async fn record_view(
    db: &DatabaseConnection,
    project_id: i32,
    ip: &str,
    user_agent: &str,
) -> Result<ViewOutcome> {
    use sea_orm::ActiveValue::Set;

    let exists = project::Entity::find_by_id(project_id).one(db).await?;
    if exists.is_none() {
        return Err(PortfolioError::not_found(format!(
            "project {} does not exist",
            project_id
        )));
    }

    let window_start = chrono::Utc::now() - chrono::Duration::minutes(VIEW_COOLDOWN_MINUTES);
    let recent = project_view::Entity::find()
        .filter(project_view::Column::ProjectId.eq(project_id))
        .filter(project_view::Column::Ip.eq(ip))
        .filter(project_view::Column::CreatedAt.gte(window_start))
        .count(db)
        .await?;

    if recent > 0 {
        debug!("View skipped for project {} from {}: cooldown", project_id, ip);
        return Ok(ViewOutcome::Cooldown);
    }

    let txn = db.begin().await?;

    project_view::ActiveModel {
        project_id: Set(project_id),
        ip: Set(ip.to_string()),
        user_agent: Set(user_agent.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    project::Entity::update_many()
        .col_expr(
            project::Column::Views,
            Expr::col(project::Column::Views).add(1i64),
        )
        .filter(project::Column::Id.eq(project_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    debug!("View counted for project {} from {}", project_id, ip);
    Ok(ViewOutcome::Counted)
}
