//! Database module for PostgreSQL persistence

pub mod models;
pub mod repository;
pub mod seed;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;

// Environment variable names
const ENV_POSTGRES_HOST: &str = "FLAREUP_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "FLAREUP_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "FLAREUP_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "FLAREUP_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "FLAREUP_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "flareup";
const DEFAULT_POSTGRES_PASSWORD: &str = "flareup";
const DEFAULT_POSTGRES_DB: &str = "flareup";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Create a new database connection pool
pub async fn create_pool() -> Result<PgPool, DbError> {
    let host = env::var(ENV_POSTGRES_HOST).unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env::var(ENV_POSTGRES_PORT).unwrap_or_else(|_| DEFAULT_POSTGRES_PORT.to_string());
    let user = env::var(ENV_POSTGRES_USER).unwrap_or_else(|_| DEFAULT_POSTGRES_USER.to_string());
    let password =
        env::var(ENV_POSTGRES_PASSWORD).unwrap_or_else(|_| DEFAULT_POSTGRES_PASSWORD.to_string());
    let database = env::var(ENV_POSTGRES_DB).unwrap_or_else(|_| DEFAULT_POSTGRES_DB.to_string());

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    );

    tracing::debug!(host = %host, port = %port, database = %database, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS incidents (
            id BIGINT PRIMARY KEY,
            title TEXT NOT NULL,
            incident_text TEXT NOT NULL,
            incident_date DATE NOT NULL,
            cause_category VARCHAR(50) NOT NULL,
            reasoning_text TEXT NOT NULL,
            company_info TEXT,
            media_url TEXT,
            response_text TEXT,
            outcome TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_incidents_cause_category ON incidents(cause_category)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_incidents_incident_date ON incidents(incident_date)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
