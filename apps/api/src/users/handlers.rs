//! Axum route handlers for user administration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{conflict_or_db, AppError};
use crate::extract::AppJson;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    #[serde(default, alias = "nombre")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "rol")]
    pub role: String,
    #[serde(default = "active_by_default", alias = "activo")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl UserRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.role.trim().is_empty()
        {
            return Err(AppError::Validation(
                "name, email and role are required".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid email",
                self.email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub id: i64,
}

const EMAIL_TAKEN: &str = "A user with that email already exists";

/// GET /api/v1/users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    let users = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY id ASC")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(users))
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<UserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), AppError> {
    req.validate()?;

    let id = sqlx::query(
        "INSERT INTO users (name, email, role, active, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(req.name.trim())
    .bind(req.email.trim())
    .bind(req.role.trim())
    .bind(req.active)
    .bind(Utc::now())
    .execute(&state.db)
    .await
    .map_err(|e| conflict_or_db(e, EMAIL_TAKEN))?
    .last_insert_rowid();

    info!("Created user {id}");
    Ok((StatusCode::CREATED, Json(CreatedUserResponse { id })))
}

/// PUT /api/v1/users/:id
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<UserRequest>,
) -> Result<StatusCode, AppError> {
    req.validate()?;

    let result =
        sqlx::query("UPDATE users SET name = ?, email = ?, role = ?, active = ? WHERE id = ?")
            .bind(req.name.trim())
            .bind(req.email.trim())
            .bind(req.role.trim())
            .bind(req.active)
            .bind(id)
            .execute(&state.db)
            .await
            .map_err(|e| conflict_or_db(e, EMAIL_TAKEN))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User {id} not found")));
    }
    info!("Deleted user {id}");
    Ok(StatusCode::NO_CONTENT)
}
