mod assessment;
mod catalog;
mod config;
mod dashboard;
mod db;
mod errors;
mod extract;
mod models;
mod routes;
mod state;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::matcher::AreaCourseMap;
use crate::catalog::seed::seed_default_courses;
use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Competencias API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    if config.seed_courses {
        seed_default_courses(&db).await?;
    }

    let area_courses = Arc::new(AreaCourseMap::default());
    info!(
        "Area mapping requires at least {} catalog courses",
        area_courses.required_catalog_size()
    );

    let state = AppState {
        db,
        config: config.clone(),
        area_courses,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
