//! Error types for report generation

use thiserror::Error;

/// Error type for report generation
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Incident {id} is missing required fields: {}", .fields.join(", "))]
    InvalidIncident { id: i64, fields: Vec<&'static str> },

    #[error("LLM request failed: {0}")]
    Upstream(String),

    #[error("LLM response could not be decoded into a report: {0}")]
    Decode(String),
}
