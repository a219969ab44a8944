use chrono::Utc;
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use crate::assessment::recommender::RecommendationDraft;
use crate::assessment::scoring::CompetencyRating;
use crate::models::assessment::{AssessmentRow, CommentRow};
use crate::models::recommendation::RecommendationDetailRow;

/// Fields of a new assessment, already validated.
pub struct NewAssessment<'a> {
    pub employee_name: &'a str,
    pub department: &'a str,
    pub role: &'a str,
    pub experience: &'a str,
    pub ratings: &'a [CompetencyRating],
}

/// Inserts an assessment and its recommendation batch.
/// Run it inside the transaction that read the catalog the drafts were built from.
/// Returns the new assessment id.
pub async fn insert_assessment(
    conn: &mut SqliteConnection,
    new: &NewAssessment<'_>,
    drafts: &[RecommendationDraft],
) -> Result<i64, sqlx::Error> {
    let assessment_id = sqlx::query(
        r#"
        INSERT INTO assessments
            (employee_name, department, role, experience, ratings, created_at, reviewed)
        VALUES (?, ?, ?, ?, ?, ?, 0)
        "#,
    )
    .bind(new.employee_name)
    .bind(new.department)
    .bind(new.role)
    .bind(new.experience)
    .bind(Json(new.ratings))
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    for draft in drafts {
        sqlx::query(
            "INSERT INTO recommendations (assessment_id, course_id, priority, justification) VALUES (?, ?, ?, ?)",
        )
        .bind(assessment_id)
        .bind(draft.course_id)
        .bind(draft.priority.as_str())
        .bind(&draft.justification)
        .execute(&mut *conn)
        .await?;
    }

    info!(
        "Stored assessment {assessment_id} with {} recommendations",
        drafts.len()
    );
    Ok(assessment_id)
}

/// All assessments, newest first.
pub async fn list_assessments(pool: &SqlitePool) -> Result<Vec<AssessmentRow>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessments ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

pub async fn fetch_assessment(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<AssessmentRow>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Recommendations of an assessment joined with their courses, in insertion order.
pub async fn fetch_recommendation_details(
    pool: &SqlitePool,
    assessment_id: i64,
) -> Result<Vec<RecommendationDetailRow>, sqlx::Error> {
    sqlx::query_as::<_, RecommendationDetailRow>(
        r#"
        SELECT r.id, r.assessment_id, r.course_id, r.priority, r.justification,
               c.name AS course_name, c.hours, c.instructors
        FROM recommendations r
        JOIN courses c ON r.course_id = c.id
        WHERE r.assessment_id = ?
        ORDER BY r.id ASC
        "#,
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await
}

/// Marks an assessment as reviewed. Returns false when it does not exist.
pub async fn mark_reviewed(
    pool: &SqlitePool,
    id: i64,
    manager_notes: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE assessments SET reviewed = 1, manager_notes = ?, reviewed_at = ? WHERE id = ?",
    )
    .bind(manager_notes)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Deletes an assessment; its recommendations and comments cascade.
pub async fn delete_assessment(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM assessments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_comments(
    pool: &SqlitePool,
    assessment_id: i64,
) -> Result<Vec<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        "SELECT * FROM comments WHERE assessment_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_comment(
    pool: &SqlitePool,
    assessment_id: i64,
    author: &str,
    body: &str,
) -> Result<CommentRow, sqlx::Error> {
    let created_at = Utc::now();
    let id = sqlx::query(
        "INSERT INTO comments (assessment_id, author, body, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(assessment_id)
    .bind(author)
    .bind(body)
    .bind(created_at)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(CommentRow {
        id,
        assessment_id,
        author: author.to_string(),
        body: body.to_string(),
        created_at,
    })
}
