pub mod config;
pub mod extracted;
mod incident;
mod report;

pub use config::{Config, StorageBackend};
pub use incident::IncidentRecord;
pub use report::{HazardCategory, SafetyReport, SeverityCategory, StoredReport};
