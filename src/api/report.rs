//! REST API endpoints for safety reports

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::ApiError;
use crate::service::SafetyReportService;

/// Query parameters for evaluating an incident
#[derive(Debug, Deserialize, IntoParams)]
pub struct EvaluateParams {
    /// Incident to evaluate (default: first incident in the fixture)
    pub incident_id: Option<i64>,
}

/// Evaluate one incident and persist the generated report
#[utoipa::path(
    post,
    path = "/v1/reports/evaluate",
    params(EvaluateParams),
    responses(
        (status = 201, description = "Report generated and stored", body = crate::model::StoredReport),
        (status = 400, description = "Incident record incomplete", body = crate::api::error::ErrorResponse),
        (status = 404, description = "Incident not found", body = crate::api::error::ErrorResponse),
        (status = 502, description = "LLM call failed or returned an invalid report", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Database or incident fixture error", body = crate::api::error::ErrorResponse)
    ),
    tag = "reports"
)]
#[post("/v1/reports/evaluate")]
pub async fn evaluate_incident(
    service: web::Data<SafetyReportService>,
    query: web::Query<EvaluateParams>,
) -> Result<HttpResponse, ApiError> {
    let stored = service.evaluate(query.incident_id).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// List every stored report
#[utoipa::path(
    get,
    path = "/v1/reports",
    responses(
        (status = 200, description = "Reports retrieved successfully", body = Vec<crate::model::StoredReport>),
        (status = 500, description = "Database error", body = crate::api::error::ErrorResponse)
    ),
    tag = "reports"
)]
#[get("/v1/reports")]
pub async fn list_reports(
    service: web::Data<SafetyReportService>,
) -> Result<HttpResponse, ApiError> {
    let reports = service.get_all_reports().await?;
    Ok(HttpResponse::Ok().json(reports))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(evaluate_incident).service(list_reports);
}
