//! Application state and service initialization
//!
//! Builds the incident source, completion client, report store and the service
//! wired on top of them.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{InMemoryReportStore, PgReportRepository, ReportStore};
use crate::incident::CsvIncidentSource;
use crate::model::{Config, StorageBackend};
use crate::service::{OpenAiReportCompletion, ReportGenerator, SafetyReportService};

const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Application state containing all services and shared resources
pub struct AppState {
    /// Database connection pool, absent with the in-memory store
    pub db_pool: Option<PgPool>,
    /// Incident evaluation and report access
    pub report_service: Arc<SafetyReportService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Report store initialization (PostgreSQL connection and schema, or in-memory)
    /// 2. LLM client initialization (requires OPENAI_API_KEY)
    /// 3. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let (db_pool, store) = Self::build_store(config.storage.backend).await?;

        let api_key = std::env::var(ENV_OPENAI_API_KEY)
            .map_err(|_| AppError::MissingConfig(ENV_OPENAI_API_KEY))?;

        let completion = OpenAiReportCompletion::new(&api_key, config.llm.model);

        let incidents = CsvIncidentSource::new(&config.incidents.fixture_path);
        tracing::info!(
            path = %incidents.path().display(),
            "Incident fixture source configured"
        );

        let generator = ReportGenerator::new(Arc::new(completion), config.llm.max_attempts);
        let report_service = Arc::new(SafetyReportService::new(
            Arc::new(incidents),
            generator,
            store,
        ));

        Ok(Self {
            db_pool,
            report_service,
        })
    }

    /// Build the configured report store
    async fn build_store(
        backend: StorageBackend,
    ) -> Result<(Option<PgPool>, Arc<dyn ReportStore>), AppError> {
        match backend {
            StorageBackend::Postgres => {
                let pool = crate::db::create_pool()
                    .await
                    .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

                crate::db::init_schema(&pool)
                    .await
                    .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

                let repository = PgReportRepository::new(pool.clone());
                Ok((Some(pool), Arc::new(repository)))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory report store, reports are lost on restart");
                Ok((None, Arc::new(InMemoryReportStore::new())))
            }
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),
}
