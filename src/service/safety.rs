//! Safety report service: load an incident, generate its report, persist it

use std::sync::Arc;

use crate::db::{DbError, ReportStore};
use crate::incident::{IncidentSource, IncidentSourceError};
use crate::model::StoredReport;
use crate::service::generator::{GeneratorError, ReportGenerator};

#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error("Incident input error: {0}")]
    Input(#[from] IncidentSourceError),

    #[error("Completion service error: {0}")]
    Upstream(String),

    #[error("Report decode error: {0}")]
    Decode(String),

    #[error("Report storage error: {0}")]
    Storage(#[from] DbError),
}

impl From<GeneratorError> for ReportServiceError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::InvalidIncident { id, fields } => {
                ReportServiceError::Input(IncidentSourceError::InvalidRecord { id, fields })
            }
            GeneratorError::Upstream(msg) => ReportServiceError::Upstream(msg),
            GeneratorError::Decode(msg) => ReportServiceError::Decode(msg),
        }
    }
}

/// Service for evaluating incidents and reading back stored reports
pub struct SafetyReportService {
    incidents: Arc<dyn IncidentSource>,
    generator: ReportGenerator,
    store: Arc<dyn ReportStore>,
}

impl SafetyReportService {
    pub fn new(
        incidents: Arc<dyn IncidentSource>,
        generator: ReportGenerator,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        Self {
            incidents,
            generator,
            store,
        }
    }

    /// Evaluate one incident and persist the resulting report.
    ///
    /// Without an id the first incident of the source is evaluated.
    /// Every call stores a new report, even for an incident evaluated before.
    pub async fn evaluate(
        &self,
        incident_id: Option<i64>,
    ) -> Result<StoredReport, ReportServiceError> {
        let incident = match incident_id {
            Some(id) => self.incidents.load_by_id(id).await?,
            None => self.incidents.load_first().await?,
        };

        let report = self.generator.evaluate(&incident).await?;
        let stored = self.store.save(&report).await?;

        tracing::info!(
            incident_id = incident.id,
            record_id = stored.record_id,
            severity_score = report.severity_score,
            severity_category = %report.severity_category,
            hazard_count = report.hazard_categories.len(),
            "Safety report generated and persisted"
        );

        Ok(stored)
    }

    /// All stored reports, unmodified
    pub async fn get_all_reports(&self) -> Result<Vec<StoredReport>, ReportServiceError> {
        Ok(self.store.find_all().await?)
    }
}
