//! Dashboard statistics over a snapshot of assessments.
//!
//! Sums are kept as integers and divided once, so the result does not depend
//! on the order of the input. An empty snapshot yields `None`, never a
//! fabricated average.

use serde::{Serialize, Serializer};

use crate::assessment::area::CompetencyArea;
use crate::assessment::scoring::CompetencyRating;

/// Serializes a value rounded to two decimals. The in-memory value keeps full precision.
pub fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    #[serde(serialize_with = "serialize_rounded")]
    pub level: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub gap: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub interest: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaAggregate {
    pub area: CompetencyArea,
    pub label: &'static str,
    /// `None` when there are no assessments.
    pub averages: Option<Averages>,
}

#[derive(Debug, Default, Clone, Copy)]
struct RatingTotals {
    count: i64,
    level: i64,
    gap: i64,
    interest: i64,
    relevance: i64,
}

impl RatingTotals {
    fn add(&mut self, rating: &CompetencyRating) {
        self.count += 1;
        self.level += i64::from(rating.current_level);
        self.gap += i64::from(rating.gap());
        self.interest += i64::from(rating.interest);
        self.relevance += i64::from(rating.relevance);
    }

    fn averages(&self) -> Option<Averages> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(Averages {
            level: self.level as f64 / n,
            gap: self.gap as f64 / n,
            interest: self.interest as f64 / n,
            relevance: self.relevance as f64 / n,
        })
    }
}

/// The rating an assessment holds for `area`, or the baseline rating if absent.
pub fn rating_for(ratings: &[CompetencyRating], area: CompetencyArea) -> CompetencyRating {
    ratings
        .iter()
        .find(|r| r.area == area)
        .copied()
        .unwrap_or_else(|| CompetencyRating::baseline(area))
}

/// One aggregate per area, in `CompetencyArea::ALL` order.
pub fn aggregate_by_area<T: AsRef<[CompetencyRating]>>(assessments: &[T]) -> Vec<AreaAggregate> {
    CompetencyArea::ALL
        .iter()
        .map(|&area| {
            let mut totals = RatingTotals::default();
            for ratings in assessments {
                totals.add(&rating_for(ratings.as_ref(), area));
            }
            AreaAggregate {
                area,
                label: area.label(),
                averages: totals.averages(),
            }
        })
        .collect()
}

/// Averages over every rating of every assessment, regardless of area.
pub fn aggregate_global<T: AsRef<[CompetencyRating]>>(assessments: &[T]) -> Option<Averages> {
    let mut totals = RatingTotals::default();
    for rating in assessments.iter().flat_map(|a| a.as_ref().iter()) {
        totals.add(rating);
    }
    totals.averages()
}
