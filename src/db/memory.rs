//! Process-local report store

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{DbError, ReportStore};
use crate::model::{SafetyReport, StoredReport};

/// Keeps reports in memory; contents are lost when the process exits
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<StoredReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, report: &SafetyReport) -> Result<StoredReport, DbError> {
        let mut reports = self.reports.write().await;

        let stored = StoredReport {
            record_id: reports.len() as i64 + 1,
            created_at: Utc::now(),
            report: report.clone(),
        };
        reports.push(stored.clone());

        tracing::debug!(
            record_id = stored.record_id,
            report_id = report.id,
            "Stored safety report in memory"
        );

        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<StoredReport>, DbError> {
        Ok(self.reports.read().await.clone())
    }
}
