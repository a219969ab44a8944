use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CourseRow {
    pub id: i64,
    pub name: String,
    pub hours: i64,
    pub instructors: String,
}
