use serde::{Deserialize, Deserializer, Serialize};

use crate::assessment::area::CompetencyArea;

/// Highest self-rated level; the gap is measured against it.
pub const MAX_LEVEL: i32 = 4;

/// Weights of the priority formula: gap, interest, relevance.
pub const GAP_WEIGHT: f64 = 0.4;
pub const INTEREST_WEIGHT: f64 = 0.3;
pub const RELEVANCE_WEIGHT: f64 = 0.3;

/// Scores strictly above these thresholds reach the tier.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 3.0;
pub const MEDIUM_PRIORITY_THRESHOLD: f64 = 2.0;

/// One self-rating of a competency area.
///
/// Missing, `null` or `0` values fall back to 1. Anything else is kept as-is,
/// out-of-range values included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyRating {
    pub area: CompetencyArea,
    #[serde(rename = "nivel_actual", default = "one", deserialize_with = "zero_or_null_as_one")]
    pub current_level: i32,
    #[serde(rename = "interes", default = "one", deserialize_with = "zero_or_null_as_one")]
    pub interest: i32,
    #[serde(rename = "relevancia", default = "one", deserialize_with = "zero_or_null_as_one")]
    pub relevance: i32,
}

fn one() -> i32 {
    1
}

fn zero_or_null_as_one<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i32>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(0) => 1,
        Some(v) => v,
    })
}

impl CompetencyRating {
    pub fn new(area: CompetencyArea, current_level: i32, interest: i32, relevance: i32) -> Self {
        Self {
            area,
            current_level,
            interest,
            relevance,
        }
    }

    /// A rating with every value at its default.
    pub fn baseline(area: CompetencyArea) -> Self {
        Self::new(area, 1, 1, 1)
    }

    /// `max(0, 4 - current_level)`.
    pub fn gap(&self) -> i32 {
        (MAX_LEVEL - self.current_level).max(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityTier {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Baja")]
    Low,
}

impl PriorityTier {
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_PRIORITY_THRESHOLD {
            PriorityTier::High
        } else if score > MEDIUM_PRIORITY_THRESHOLD {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }

    /// Label persisted with each recommendation.
    pub fn as_str(self) -> &'static str {
        match self {
            PriorityTier::High => "Alta",
            PriorityTier::Medium => "Media",
            PriorityTier::Low => "Baja",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingScore {
    pub gap: i32,
    pub priority_score: f64,
    pub tier: PriorityTier,
}

/// Priority score: 0.4*gap + 0.3*interest + 0.3*relevance. Not rounded.
pub fn compute_priority_score(gap: i32, interest: i32, relevance: i32) -> f64 {
    GAP_WEIGHT * gap as f64 + INTEREST_WEIGHT * interest as f64 + RELEVANCE_WEIGHT * relevance as f64
}

pub fn score_rating(rating: &CompetencyRating) -> RatingScore {
    let gap = rating.gap();
    let priority_score = compute_priority_score(gap, rating.interest, rating.relevance);
    RatingScore {
        gap,
        priority_score,
        tier: PriorityTier::from_score(priority_score),
    }
}
