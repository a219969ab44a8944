use std::sync::Arc;

use sqlx::SqlitePool;

use crate::assessment::matcher::AreaCourseMap;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    /// Area → course table used when building recommendations.
    pub area_courses: Arc<AreaCourseMap>,
}
