//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::incident::IncidentSourceError;
use crate::service::ReportServiceError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Incident not found (404)
    #[error("Incident not found: {0}")]
    IncidentNotFound(String),

    /// Incident record is incomplete (400)
    #[error("Invalid incident: {0}")]
    InvalidIncident(String),

    /// Incident fixture missing or unreadable on the server (500)
    #[error("Incident source error: {0}")]
    IncidentSource(String),

    /// LLM call failed (502)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// LLM answered outside the report schema (502)
    #[error("Invalid model response: {0}")]
    InvalidModelResponse(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::IncidentNotFound(_) => "incident_not_found",
            ApiError::InvalidIncident(_) => "invalid_incident",
            ApiError::IncidentSource(_) => "incident_source_error",
            ApiError::ExternalService(_) => "external_service_error",
            ApiError::InvalidModelResponse(_) => "invalid_model_response",
            ApiError::Database(_) => "database_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::IncidentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidIncident(_) => StatusCode::BAD_REQUEST,
            ApiError::ExternalService(_) | ApiError::InvalidModelResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::IncidentSource(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

impl From<ReportServiceError> for ApiError {
    fn from(err: ReportServiceError) -> Self {
        match err {
            ReportServiceError::Input(IncidentSourceError::NotFound(id)) => {
                ApiError::IncidentNotFound(id)
            }
            ReportServiceError::Input(e @ IncidentSourceError::InvalidRecord { .. }) => {
                ApiError::InvalidIncident(e.to_string())
            }
            ReportServiceError::Input(e) => ApiError::IncidentSource(e.to_string()),
            ReportServiceError::Upstream(msg) => ApiError::ExternalService(msg),
            ReportServiceError::Decode(msg) => ApiError::InvalidModelResponse(msg),
            ReportServiceError::Storage(e) => ApiError::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;

    #[test]
    fn test_error_kinds_map_to_distinct_statuses() {
        let cases = [
            (
                ReportServiceError::Input(IncidentSourceError::NotFound("id 9".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ReportServiceError::Input(IncidentSourceError::InvalidRecord {
                    id: 9,
                    fields: vec!["risks"],
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ReportServiceError::Upstream("timeout".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ReportServiceError::Decode("missing field".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ReportServiceError::Storage(DbError::Serialization("bad row".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_unreadable_fixture_is_server_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "data/incidents.csv");
        let err = ApiError::from(ReportServiceError::Input(IncidentSourceError::Io(io)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "incident_source_error");

        let csv_err = csv::ReaderBuilder::new()
            .from_reader("id,date\nnot-a-number,01/15/2024\n".as_bytes())
            .deserialize::<(i64, String)>()
            .next()
            .unwrap()
            .unwrap_err();
        let err = ApiError::from(ReportServiceError::Input(IncidentSourceError::Csv(csv_err)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_and_decode_are_distinguishable() {
        let upstream = ApiError::from(ReportServiceError::Upstream("x".to_string()));
        let decode = ApiError::from(ReportServiceError::Decode("x".to_string()));
        assert_ne!(upstream.error_type(), decode.error_type());
    }
}
