//! Report persistence: PostgreSQL repository and in-memory store

pub mod memory;
pub mod models;
pub mod repository;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

use crate::model::{SafetyReport, StoredReport};

pub use memory::InMemoryReportStore;
pub use repository::PgReportRepository;

// Environment variable names
const ENV_POSTGRES_HOST: &str = "STAYSAFE_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "STAYSAFE_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "STAYSAFE_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "STAYSAFE_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "STAYSAFE_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "staysafe";
const DEFAULT_POSTGRES_PASSWORD: &str = "staysafe";
const DEFAULT_POSTGRES_DB: &str = "staysafe";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persistence for generated safety reports.
///
/// Saving never deduplicates: the same report saved twice is stored twice.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist one report and return it with its storage-assigned key
    async fn save(&self, report: &SafetyReport) -> Result<StoredReport, DbError>;

    /// Every report saved so far, in insertion order
    async fn find_all(&self) -> Result<Vec<StoredReport>, DbError>;
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
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS safety_reports (
            record_id BIGSERIAL PRIMARY KEY,
            report_id BIGINT NOT NULL,
            report_date VARCHAR(32) NOT NULL,
            report_time VARCHAR(16) NOT NULL,
            overview TEXT NOT NULL,
            description TEXT NOT NULL,
            severity_score INTEGER NOT NULL,
            severity_category VARCHAR(16) NOT NULL,
            hazard_categories JSONB NOT NULL DEFAULT '[]',
            solution TEXT NOT NULL,
            prevention TEXT NOT NULL,
            lesson TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_safety_reports_report_id ON safety_reports(report_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
