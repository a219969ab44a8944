// Competency assessments: scoring, course matching, recommendations,
// dashboard aggregation and per-assessment reports.
// Scoring, matching and aggregation are pure; store.rs owns the SQL.

pub mod aggregation;
pub mod area;
pub mod handlers;
pub mod justification;
pub mod matcher;
pub mod recommender;
pub mod report;
pub mod scoring;
pub mod store;
