use serde::Serialize;
use thiserror::Error;

use crate::assessment::justification::build_justification;
use crate::assessment::matcher::AreaCourseMap;
use crate::assessment::scoring::{score_rating, CompetencyRating, PriorityTier};
use crate::models::course::CourseRow;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendationError {
    #[error("course catalog has {available} courses but the area mapping needs {required}")]
    CatalogTooSmall { required: usize, available: usize },
}

/// A recommendation ready to be stored against a new assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationDraft {
    pub course_id: i64,
    pub priority: PriorityTier,
    pub justification: String,
}

/// Fails when the catalog cannot satisfy every position the map refers to.
pub fn check_catalog(catalog: &[CourseRow], map: &AreaCourseMap) -> Result<(), RecommendationError> {
    let required = map.required_catalog_size();
    if catalog.len() < required {
        return Err(RecommendationError::CatalogTooSmall {
            required,
            available: catalog.len(),
        });
    }
    Ok(())
}

/// Builds the recommendations of one assessment.
///
/// `catalog` is the course snapshot ordered by id. Output follows the rating
/// order, then the area's course order. Same input, same output.
pub fn build_recommendations(
    ratings: &[CompetencyRating],
    catalog: &[CourseRow],
    map: &AreaCourseMap,
) -> Result<Vec<RecommendationDraft>, RecommendationError> {
    check_catalog(catalog, map)?;

    let mut drafts = Vec::new();
    for rating in ratings {
        let score = score_rating(rating);
        let justification = build_justification(rating, score.gap);

        for &position in map.courses_for(rating.area) {
            // check_catalog guarantees every mapped position exists
            let course = &catalog[position];
            drafts.push(RecommendationDraft {
                course_id: course.id,
                priority: score.tier,
                justification: justification.clone(),
            });
        }
    }
    Ok(drafts)
}
