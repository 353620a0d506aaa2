//! Admin analytics endpoints

use actix_web::{Responder, Result as ActixResult, web};
use serde::Serialize;
use tracing::error;

use crate::repository::{AnalyticsTotals, DailyViews, Repository, TopProject};

use super::helpers::{error_from_portfolio, success_response};
use super::types::DailyViewsQuery;

const DEFAULT_DAILY_WINDOW_DAYS: i64 = 30;
const MAX_DAILY_WINDOW_DAYS: i64 = 365;

#[derive(Serialize)]
struct AnalyticsOverview {
    totals: AnalyticsTotals,
    top_projects: Vec<TopProject>,
    daily_views: Vec<DailyViews>,
}

/// GET /api/admin/analytics
///
/// Totals, the top five projects by listing order, and daily view buckets.
pub async fn get_analytics(
    repository: web::Data<Repository>,
    query: web::Query<DailyViewsQuery>,
) -> ActixResult<impl Responder> {
    let days = query
        .days
        .unwrap_or(DEFAULT_DAILY_WINDOW_DAYS)
        .clamp(1, MAX_DAILY_WINDOW_DAYS);

    let totals = match repository.analytics_totals().await {
        Ok(totals) => totals,
        Err(e) => {
            error!("Failed to compute analytics totals: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    let top_projects = match repository.top_projects().await {
        Ok(top) => top,
        Err(e) => {
            error!("Failed to compute top projects: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    let daily_views = match repository.daily_views(days).await {
        Ok(daily) => daily,
        Err(e) => {
            error!("Failed to compute daily views: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    Ok(success_response(AnalyticsOverview {
        totals,
        top_projects,
        daily_views,
    }))
}
