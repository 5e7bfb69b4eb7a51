//! Database models for safety reports

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::model::{HazardCategory, SafetyReport, SeverityCategory, StoredReport};

/// Database representation of a stored safety report
#[derive(Debug, Clone, FromRow)]
pub struct SafetyReportRow {
    pub record_id: i64,
    pub report_id: i64,
    pub report_date: String,
    pub report_time: String,
    pub overview: String,
    pub description: String,
    pub severity_score: i32,
    pub severity_category: String,
    pub hazard_categories: serde_json::Value,
    pub solution: String,
    pub prevention: String,
    pub lesson: String,
    pub created_at: DateTime<Utc>,
}

impl SafetyReportRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<StoredReport, String> {
        let severity_category: SeverityCategory = self.severity_category.parse()?;

        let hazard_categories: Vec<HazardCategory> =
            serde_json::from_value(self.hazard_categories).map_err(|e| {
                format!(
                    "Invalid hazard categories for record {}: {}",
                    self.record_id, e
                )
            })?;

        Ok(StoredReport {
            record_id: self.record_id,
            created_at: self.created_at,
            report: SafetyReport {
                id: self.report_id,
                date: self.report_date,
                time: self.report_time,
                overview: self.overview,
                description: self.description,
                severity_score: self.severity_score,
                severity_category,
                hazard_categories,
                solution: self.solution,
                prevention: self.prevention,
                lesson: self.lesson,
            },
        })
    }
}

/// Helper to convert hazard categories to JSON for database storage
pub fn hazard_categories_to_json(hazards: &[HazardCategory]) -> serde_json::Value {
    serde_json::Value::Array(
        hazards
            .iter()
            .map(|h| serde_json::Value::String(h.as_str().to_string()))
            .collect(),
    )
}
