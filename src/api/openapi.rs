//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::health::{DependencyHealth, HealthStatus, ReadinessStatus};
use crate::model::{HazardCategory, SafetyReport, SeverityCategory, StoredReport};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StaySafe Report Agent",
        description = "Evaluates field safety incidents and stores severity reports"
    ),
    paths(
        crate::api::report::evaluate_incident,
        crate::api::report::list_reports,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        StoredReport,
        SafetyReport,
        SeverityCategory,
        HazardCategory,
        ErrorResponse,
        HealthStatus,
        ReadinessStatus,
        DependencyHealth,
    )),
    tags(
        (name = "reports", description = "Incident evaluation and safety reports"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_report_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/reports"));
        assert!(doc.paths.paths.contains_key("/v1/reports/evaluate"));
    }
}
