//! Listing score recomputation
//!
//! `score = views * VIEW_WEIGHT + editorial_rank * EDITORIAL_WEIGHT`. One
//! editorial rank point outweighs 100 views, so curation dominates traffic.
//! The score is stored denormalized on the ranking row and recomputed on
//! demand rather than per view.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use tracing::debug;

use crate::errors::Result;

use migration::entities::{project, project_ranking};

pub const VIEW_WEIGHT: f64 = 0.1;
pub const EDITORIAL_WEIGHT: f64 = 10.0;

pub fn compute_score(views: i64, editorial_rank: i32) -> f64 {
    views as f64 * VIEW_WEIGHT + f64::from(editorial_rank) * EDITORIAL_WEIGHT
}

/// Recompute and persist the score for one project
///
/// Best-effort: a missing project or ranking row is a no-op returning
/// `Ok(None)`, never an error, so callers can fire this after writes
/// without caring whether the target still exists.
pub async fn recompute_score(db: &DatabaseConnection, project_id: i32) -> Result<Option<f64>> {
    use sea_orm::ActiveValue::Set;

    let Some(project) = project::Entity::find_by_id(project_id).one(db).await? else {
        return Ok(None);
    };
    let Some(ranking) = project_ranking::Entity::find_by_id(project_id).one(db).await? else {
        return Ok(None);
    };

    let score = compute_score(project.views, ranking.editorial_rank);

    let mut active: project_ranking::ActiveModel = ranking.into();
    active.score = Set(score);
    active.update(db).await?;

    debug!("Score recomputed for project {}: {}", project_id, score);
    Ok(Some(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_combines_views_and_rank() {
        assert_eq!(compute_score(100, 3), 40.0);
        assert_eq!(compute_score(0, 0), 0.0);
        assert_eq!(compute_score(250, 0), 25.0);
        assert_eq!(compute_score(0, 5), 50.0);
    }

    #[test]
    fn one_rank_point_beats_under_100_views() {
        assert!(compute_score(0, 1) > compute_score(99, 0));
        assert_eq!(compute_score(0, 1), compute_score(100, 0));
    }

    #[test]
    fn score_is_monotonic_in_views() {
        let mut prev = compute_score(0, 2);
        for views in 1..50 {
            let next = compute_score(views, 2);
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn negative_rank_pulls_score_down() {
        assert!(compute_score(10, -1) < 0.0);
    }
}
