//! Axum route handlers for course administration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::fetch_catalog;
use crate::errors::{conflict_or_db, AppError};
use crate::extract::AppJson;
use crate::models::course::CourseRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub instructors: String,
}

impl CourseRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() || self.instructors.trim().is_empty() {
            return Err(AppError::Validation(
                "name and instructors are required".to_string(),
            ));
        }
        if self.hours <= 0 {
            return Err(AppError::Validation("hours must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// GET /api/v1/courses
pub async fn handle_list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseRow>>, AppError> {
    Ok(Json(fetch_catalog(&state.db).await?))
}

/// POST /api/v1/courses
pub async fn handle_create_course(
    State(state): State<AppState>,
    AppJson(req): AppJson<CourseRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    req.validate()?;

    let id = sqlx::query("INSERT INTO courses (name, hours, instructors) VALUES (?, ?, ?)")
        .bind(req.name.trim())
        .bind(req.hours)
        .bind(req.instructors.trim())
        .execute(&state.db)
        .await?
        .last_insert_rowid();

    info!("Created course {id}");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/v1/courses/:id
pub async fn handle_update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<CourseRequest>,
) -> Result<StatusCode, AppError> {
    req.validate()?;

    let result = sqlx::query("UPDATE courses SET name = ?, hours = ?, instructors = ? WHERE id = ?")
        .bind(req.name.trim())
        .bind(req.hours)
        .bind(req.instructors.trim())
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Course {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/courses/:id
///
/// Courses already recommended to a stored assessment cannot be deleted.
pub async fn handle_delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            conflict_or_db(
                e,
                &format!("Course {id} is referenced by existing recommendations"),
            )
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Course {id} not found")));
    }
    info!("Deleted course {id}");
    Ok(StatusCode::NO_CONTENT)
}
