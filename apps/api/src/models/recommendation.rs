use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored recommendation joined with the course it points to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationDetailRow {
    pub id: i64,
    pub assessment_id: i64,
    pub course_id: i64,
    pub priority: String,
    pub justification: String,
    pub course_name: String,
    pub hours: i64,
    pub instructors: String,
}
