//! Axum route handlers for the Assessment API.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assessment::area::CompetencyArea;
use crate::assessment::recommender::build_recommendations;
use crate::assessment::report::{build_report, render_report_text, AssessmentReport};
use crate::assessment::scoring::CompetencyRating;
use crate::assessment::store::{self, NewAssessment};
use crate::catalog::fetch_catalog;
use crate::errors::{conflict_or_db, AppError};
use crate::extract::AppJson;
use crate::models::assessment::{AssessmentRow, CommentRow};
use crate::models::recommendation::RecommendationDetailRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    #[serde(default, alias = "nombre")]
    pub employee_name: String,
    #[serde(default, alias = "area")]
    pub department: String,
    #[serde(default, alias = "rol")]
    pub role: String,
    #[serde(default, alias = "experiencia")]
    pub experience: String,
    #[serde(default, alias = "competencias")]
    pub ratings: Vec<CompetencyRating>,
}

#[derive(Debug, Serialize)]
pub struct SubmitAssessmentResponse {
    pub id: i64,
    pub recommendations: usize,
}

#[derive(Debug, Serialize)]
pub struct AssessmentDetailResponse {
    #[serde(flatten)]
    pub assessment: AssessmentRow,
    pub recommendations: Vec<RecommendationDetailRow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewRequest {
    #[serde(default, alias = "notas_gestor")]
    pub manager_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default, alias = "autor")]
    pub author: Option<String>,
    #[serde(default, alias = "comentario")]
    pub body: String,
}

const DEFAULT_COMMENT_AUTHOR: &str = "Gestor";

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

impl SubmitAssessmentRequest {
    fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = [
            ("employee_name", &self.employee_name),
            ("department", &self.department),
            ("role", &self.role),
            ("experience", &self.experience),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let areas: BTreeSet<CompetencyArea> = self.ratings.iter().map(|r| r.area).collect();
        if self.ratings.len() != CompetencyArea::COUNT || areas.len() != CompetencyArea::COUNT {
            return Err(AppError::Validation(format!(
                "Expected exactly one rating for each of the {} competency areas, got {} ratings covering {} areas",
                CompetencyArea::COUNT,
                self.ratings.len(),
                areas.len()
            )));
        }
        Ok(())
    }
}

async fn load_assessment(state: &AppState, id: i64) -> Result<AssessmentRow, AppError> {
    store::fetch_assessment(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assessments
///
/// Validates the submission, scores every rating against the current catalog
/// and stores the assessment together with its recommendations. The catalog
/// read and both inserts share one transaction.
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    AppJson(req): AppJson<SubmitAssessmentRequest>,
) -> Result<(StatusCode, Json<SubmitAssessmentResponse>), AppError> {
    if let Err(e) = req.validate() {
        warn!("Rejected assessment submission: {e}");
        return Err(e);
    }

    let mut tx = state.db.begin().await?;
    let catalog = fetch_catalog(&mut *tx).await?;
    let drafts = match build_recommendations(&req.ratings, &catalog, &state.area_courses) {
        Ok(drafts) => drafts,
        Err(e) => {
            warn!("Rejected assessment submission: {e}");
            return Err(e.into());
        }
    };

    let new = NewAssessment {
        employee_name: req.employee_name.trim(),
        department: req.department.trim(),
        role: req.role.trim(),
        experience: req.experience.trim(),
        ratings: &req.ratings,
    };
    let id = store::insert_assessment(&mut tx, &new, &drafts)
        .await
        .map_err(|e| conflict_or_db(e, "The course catalog changed during submission, retry"))?;
    tx.commit().await?;
    info!("Assessment {id} submitted by {}", new.employee_name);

    Ok((
        StatusCode::CREATED,
        Json(SubmitAssessmentResponse {
            id,
            recommendations: drafts.len(),
        }),
    ))
}

/// GET /api/v1/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    Ok(Json(store::list_assessments(&state.db).await?))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AssessmentDetailResponse>, AppError> {
    let assessment = load_assessment(&state, id).await?;
    let recommendations = store::fetch_recommendation_details(&state.db, id).await?;
    Ok(Json(AssessmentDetailResponse {
        assessment,
        recommendations,
    }))
}

/// DELETE /api/v1/assessments/:id
pub async fn handle_delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !store::delete_assessment(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Assessment {id} not found")));
    }
    info!("Deleted assessment {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/assessments/:id/review
pub async fn handle_review_assessment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<ReviewRequest>>,
) -> Result<StatusCode, AppError> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let notes = req.manager_notes.unwrap_or_default();
    if !store::mark_reviewed(&state.db, id, &notes).await? {
        return Err(AppError::NotFound(format!("Assessment {id} not found")));
    }
    info!("Assessment {id} marked as reviewed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/assessments/:id/report
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AssessmentReport>, AppError> {
    let assessment = load_assessment(&state, id).await?;
    let recommendations = store::fetch_recommendation_details(&state.db, id).await?;
    Ok(Json(build_report(
        &assessment,
        &recommendations,
        state.config.hourly_training_cost,
    )))
}

/// GET /api/v1/assessments/:id/report/text
///
/// Plain-text report served as a download.
pub async fn handle_get_report_text(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = load_assessment(&state, id).await?;
    let recommendations = store::fetch_recommendation_details(&state.db, id).await?;
    let report = build_report(
        &assessment,
        &recommendations,
        state.config.hourly_training_cost,
    );
    let text = render_report_text(&assessment, &report, &recommendations);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=reporte_evaluacion_{id}.txt"),
            ),
        ],
        text,
    ))
}

/// GET /api/v1/assessments/:id/comments
pub async fn handle_list_comments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CommentRow>>, AppError> {
    Ok(Json(store::list_comments(&state.db, id).await?))
}

/// POST /api/v1/assessments/:id/comments
pub async fn handle_add_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentRow>), AppError> {
    if req.body.trim().is_empty() {
        return Err(AppError::Validation("Comment body is required".to_string()));
    }
    load_assessment(&state, id).await?;

    let author = req
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_COMMENT_AUTHOR);
    let comment = store::insert_comment(&state.db, id, author, req.body.trim()).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
