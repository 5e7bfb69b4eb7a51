//! Incident sources supplying raw incident records for evaluation

mod fixture;

use async_trait::async_trait;

use crate::model::IncidentRecord;

pub use fixture::CsvIncidentSource;

#[derive(Debug, thiserror::Error)]
pub enum IncidentSourceError {
    #[error("Incident not found: {0}")]
    NotFound(String),

    #[error("Failed to read incident fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse incident fixture: {0}")]
    Csv(#[from] csv::Error),

    #[error("Incident {id} is missing required fields: {}", .fields.join(", "))]
    InvalidRecord { id: i64, fields: Vec<&'static str> },
}

/// Trait for incident sources
#[async_trait]
pub trait IncidentSource: Send + Sync {
    /// Load the first incident available from the source
    async fn load_first(&self) -> Result<IncidentRecord, IncidentSourceError>;

    /// Load the incident with the given id
    async fn load_by_id(&self, id: i64) -> Result<IncidentRecord, IncidentSourceError>;
}

/// Reject records with empty text fields
pub fn ensure_complete(incident: IncidentRecord) -> Result<IncidentRecord, IncidentSourceError> {
    let fields = incident.missing_fields();
    if fields.is_empty() {
        Ok(incident)
    } else {
        Err(IncidentSourceError::InvalidRecord {
            id: incident.id,
            fields,
        })
    }
}
