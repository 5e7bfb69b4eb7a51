//! CSV fixture incident source

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};

use super::{IncidentSource, IncidentSourceError, ensure_complete};
use crate::model::IncidentRecord;

/// Reads incidents from a CSV file with an
/// `id,date,criteria,observations,risks,solution` header.
///
/// The file is re-read on every call.
pub struct CsvIncidentSource {
    path: PathBuf,
}

impl CsvIncidentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_fixture(&self) -> Result<String, IncidentSourceError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = contents.len(),
            "Read incident fixture"
        );
        Ok(contents)
    }
}

/// Find the first record in CSV data matching `predicate`
fn find_incident(
    data: &str,
    predicate: impl Fn(&IncidentRecord) -> bool,
) -> Result<Option<IncidentRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(data.as_bytes());

    for result in reader.deserialize() {
        let record: IncidentRecord = result?;
        if predicate(&record) {
            return Ok(Some(record));
        }
    }

    Ok(None)
}

#[async_trait]
impl IncidentSource for CsvIncidentSource {
    async fn load_first(&self) -> Result<IncidentRecord, IncidentSourceError> {
        let data = self.read_fixture().await?;
        let incident = find_incident(&data, |_| true)?.ok_or_else(|| {
            IncidentSourceError::NotFound(format!("no rows in {}", self.path.display()))
        })?;

        tracing::debug!(incident_id = incident.id, "Loaded first incident from fixture");
        ensure_complete(incident)
    }

    async fn load_by_id(&self, id: i64) -> Result<IncidentRecord, IncidentSourceError> {
        let data = self.read_fixture().await?;
        let incident = find_incident(&data, |record| record.id == id)?
            .ok_or_else(|| IncidentSourceError::NotFound(format!("id {}", id)))?;

        tracing::debug!(incident_id = incident.id, "Loaded incident from fixture");
        ensure_complete(incident)
    }
}
