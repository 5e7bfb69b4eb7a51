pub mod completion;
pub mod generator;
pub mod safety;
#[cfg(test)]
pub mod testing;

pub use completion::OpenAiReportCompletion;
pub use generator::ReportGenerator;
pub use safety::{ReportServiceError, SafetyReportService};
