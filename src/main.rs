use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod db;
mod model;
mod service;

use db::repository::IncidentRepository;
use model::Config;
use service::{AnalysisService, OpenAiOracle, PgCaseStore};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    // Initialize PostgreSQL database
    let db_pool = db::create_pool()
        .await
        .expect("Failed to create database pool");

    // Initialize database schema
    db::init_schema(&db_pool)
        .await
        .expect("Failed to initialize database schema");

    // Load the bundled reference incidents when the store is empty
    if let Err(e) = db::seed::seed_if_empty(&db_pool).await {
        tracing::warn!(error = %e, "Incident seeding failed, continuing with existing data");
    }

    // Create services
    let repository = IncidentRepository::new(db_pool.clone());
    let case_store = Arc::new(PgCaseStore::new(
        repository.clone(),
        config.analysis.max_related_cases,
    ));
    let oracle = Arc::new(OpenAiOracle::from_env().expect("Failed to initialize oracle"));

    let analysis_service = web::Data::new(AnalysisService::new(
        case_store,
        oracle,
        config.analysis.clone(),
    ));

    let repository_data = web::Data::new(repository);
    let db_pool_data = web::Data::new(db_pool);
    let config_data = web::Data::new(config);

    tracing::info!("Starting flare-up risk analysis server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(analysis_service.clone())
            .app_data(repository_data.clone())
            .app_data(db_pool_data.clone())
            .app_data(config_data.clone())
            .configure(api::analyze::configure)
            .configure(api::incidents::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
