//! Repository for safety report database operations

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{SafetyReportRow, hazard_categories_to_json};
use super::{DbError, ReportStore};
use crate::model::{SafetyReport, StoredReport};

/// PostgreSQL-backed report store
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportRepository {
    async fn save(&self, report: &SafetyReport) -> Result<StoredReport, DbError> {
        let hazards_json = hazard_categories_to_json(&report.hazard_categories);

        let row: SafetyReportRow = sqlx::query_as(
            r#"
            INSERT INTO safety_reports (
                report_id, report_date, report_time, overview, description,
                severity_score, severity_category, hazard_categories,
                solution, prevention, lesson
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(report.id)
        .bind(&report.date)
        .bind(&report.time)
        .bind(&report.overview)
        .bind(&report.description)
        .bind(report.severity_score)
        .bind(report.severity_category.as_str())
        .bind(&hazards_json)
        .bind(&report.solution)
        .bind(&report.prevention)
        .bind(&report.lesson)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            record_id = row.record_id,
            report_id = report.id,
            "Inserted safety report"
        );

        row.into_domain().map_err(DbError::Serialization)
    }

    async fn find_all(&self) -> Result<Vec<StoredReport>, DbError> {
        let rows: Vec<SafetyReportRow> = sqlx::query_as(
            r#"
            SELECT * FROM safety_reports
            ORDER BY record_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_domain().map_err(DbError::Serialization))
            .collect()
    }
}
