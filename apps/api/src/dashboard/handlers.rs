//! Axum route handlers for dashboards, counters and the JSON backup.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Serialize;

use crate::assessment::aggregation::{aggregate_by_area, aggregate_global, AreaAggregate, Averages};
use crate::assessment::scoring::CompetencyRating;
use crate::assessment::store::list_assessments;
use crate::catalog::fetch_catalog;
use crate::errors::AppError;
use crate::models::assessment::{AssessmentRow, CommentRow};
use crate::models::course::CourseRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub pending: i64,
    pub reviewed: i64,
    pub courses: i64,
}

#[derive(Debug, Serialize)]
pub struct ManagerDashboardResponse {
    pub total: usize,
    pub pending: usize,
    pub reviewed: usize,
    pub areas: Vec<AreaAggregate>,
    pub courses: Vec<CourseRow>,
    pub total_recommendations: i64,
    pub total_recommended_hours: i64,
}

#[derive(Debug, Serialize)]
pub struct ExecutiveDashboardResponse {
    /// `None` when no ratings exist yet.
    pub global: Option<Averages>,
    pub comparisons: Vec<AreaAggregate>,
}

#[derive(Debug, Serialize)]
pub struct BackupResponse {
    pub assessments: Vec<AssessmentRow>,
    pub courses: Vec<CourseRow>,
    pub comments: Vec<CommentRow>,
}

fn rating_sets(assessments: &[AssessmentRow]) -> Vec<&[CompetencyRating]> {
    assessments.iter().map(|a| a.ratings.0.as_slice()).collect()
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let (total, reviewed): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN reviewed = 1 THEN 1 ELSE 0 END), 0) FROM assessments",
    )
    .fetch_one(&state.db)
    .await?;
    let courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(StatsResponse {
        total,
        pending: total - reviewed,
        reviewed,
        courses,
    }))
}

/// GET /api/v1/dashboard/manager
pub async fn handle_manager_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ManagerDashboardResponse>, AppError> {
    let assessments = list_assessments(&state.db).await?;
    let courses = fetch_catalog(&state.db).await?;

    let (total_recommendations, total_recommended_hours): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(r.id), COALESCE(SUM(c.hours), 0)
        FROM recommendations r
        JOIN courses c ON r.course_id = c.id
        "#,
    )
    .fetch_one(&state.db)
    .await?;

    let reviewed = assessments.iter().filter(|a| a.reviewed).count();
    Ok(Json(ManagerDashboardResponse {
        total: assessments.len(),
        pending: assessments.len() - reviewed,
        reviewed,
        areas: aggregate_by_area(&rating_sets(&assessments)),
        courses,
        total_recommendations,
        total_recommended_hours,
    }))
}

/// GET /api/v1/dashboard/executive
pub async fn handle_executive_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ExecutiveDashboardResponse>, AppError> {
    let assessments = list_assessments(&state.db).await?;
    let sets = rating_sets(&assessments);
    Ok(Json(ExecutiveDashboardResponse {
        global: aggregate_global(&sets),
        comparisons: aggregate_by_area(&sets),
    }))
}

/// GET /api/v1/backup
///
/// Full JSON export of assessments, courses and comments as a download.
pub async fn handle_backup(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let assessments = list_assessments(&state.db).await?;
    let courses = fetch_catalog(&state.db).await?;
    let comments = sqlx::query_as::<_, CommentRow>("SELECT * FROM comments ORDER BY id ASC")
        .fetch_all(&state.db)
        .await?;

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=backup_competencias.json",
        )],
        Json(BackupResponse {
            assessments,
            courses,
            comments,
        }),
    ))
}
