use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::assessment::scoring::CompetencyRating;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: i64,
    pub employee_name: String,
    pub department: String,
    pub role: String,
    pub experience: String,
    pub ratings: Json<Vec<CompetencyRating>>,
    pub created_at: DateTime<Utc>,
    pub reviewed: bool,
    pub manager_notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub assessment_id: i64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
