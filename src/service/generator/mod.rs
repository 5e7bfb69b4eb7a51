//! Safety report generation using LLM
//!
//! Turns one incident into a structured severity report via the completion interface.

use std::sync::Arc;

use crate::model::extracted::ExtractedReport;
use crate::model::{IncidentRecord, SafetyReport};
use crate::service::completion::{CompletionError, ReportCompletion};
use crate::service::generator::converters::convert_report;
use crate::service::generator::prompts::{REPORT_SYSTEM_PROMPT, build_incident_prompt};
use crate::service::generator::validation::validate_extracted_report;

pub mod converters;
pub mod error;
pub mod prompts;
pub mod validation;

pub use error::GeneratorError;

/// Upper bound on model calls per evaluation, whatever the configuration says
pub const MAX_ATTEMPTS: u32 = 4;
const INITIAL_RETRY_DELAY_MS: u64 = 500;
const MAX_RETRY_DELAY_MS: u64 = 4_000;

/// Backoff before the retry that follows failed attempt `attempt` (0-based)
fn retry_delay_ms(attempt: u32) -> u64 {
    1u64.checked_shl(attempt)
        .map_or(MAX_RETRY_DELAY_MS, |factor| {
            INITIAL_RETRY_DELAY_MS.saturating_mul(factor)
        })
        .min(MAX_RETRY_DELAY_MS)
}

/// Generates safety reports from incidents
pub struct ReportGenerator {
    completion: Arc<dyn ReportCompletion>,
    max_attempts: u32,
}

impl ReportGenerator {
    /// Creates a new generator.
    ///
    /// `max_attempts` is the total number of model calls per evaluation; 1 disables retries.
    /// Values outside `1..=MAX_ATTEMPTS` are clamped.
    pub fn new(completion: Arc<dyn ReportCompletion>, max_attempts: u32) -> Self {
        let clamped = max_attempts.clamp(1, MAX_ATTEMPTS);
        if clamped != max_attempts {
            tracing::warn!(
                requested = max_attempts,
                max_attempts = clamped,
                "Report generation attempts clamped"
            );
        }

        Self {
            completion,
            max_attempts: clamped,
        }
    }

    /// Evaluate one incident into a safety report
    pub async fn evaluate(
        &self,
        incident: &IncidentRecord,
    ) -> Result<SafetyReport, GeneratorError> {
        let fields = incident.missing_fields();
        if !fields.is_empty() {
            return Err(GeneratorError::InvalidIncident {
                id: incident.id,
                fields,
            });
        }

        let prompt = build_incident_prompt(incident);
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            match self.generate(incident, &prompt).await {
                Ok(report) => {
                    if attempt > 0 {
                        tracing::info!(
                            incident_id = incident.id,
                            attempt = attempt + 1,
                            "Report generation succeeded after retry"
                        );
                    }
                    return Ok(report);
                }
                Err(e) => {
                    if attempt + 1 < self.max_attempts {
                        let delay_ms = retry_delay_ms(attempt);
                        tracing::warn!(
                            incident_id = incident.id,
                            attempt = attempt + 1,
                            max_attempts = self.max_attempts,
                            delay_ms = delay_ms,
                            error = %e,
                            "Report generation failed, retrying"
                        );
                        tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            GeneratorError::Upstream("Report generation made no attempts".to_string())
        }))
    }

    /// One model round trip, validation and conversion
    async fn generate(
        &self,
        incident: &IncidentRecord,
        prompt: &str,
    ) -> Result<SafetyReport, GeneratorError> {
        let start_time = std::time::Instant::now();
        let model = self.completion.model();

        tracing::debug!(
            incident_id = incident.id,
            model = %model,
            "Initiating LLM call for safety report"
        );

        let extracted = match self.completion.complete(REPORT_SYSTEM_PROMPT, prompt).await {
            Ok(result) => {
                tracing::info!(
                    incident_id = incident.id,
                    model = %model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt.len(),
                    "LLM call for safety report completed successfully"
                );
                result
            }
            Err(e) => {
                tracing::error!(
                    incident_id = incident.id,
                    model = %model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt.len(),
                    error = %e,
                    "LLM call for safety report failed"
                );
                return Err(match e {
                    CompletionError::Upstream(msg) => GeneratorError::Upstream(msg),
                    CompletionError::Decode(msg) => GeneratorError::Decode(msg),
                });
            }
        };

        self.check(incident, &extracted)?;

        Ok(convert_report(extracted, incident.id))
    }

    fn check(
        &self,
        incident: &IncidentRecord,
        extracted: &ExtractedReport,
    ) -> Result<(), GeneratorError> {
        let validation = validate_extracted_report(extracted);

        for warning in &validation.warnings {
            tracing::warn!(incident_id = incident.id, warning = %warning, "Report validation warning");
        }

        if extracted.id != incident.id {
            tracing::warn!(
                incident_id = incident.id,
                reported_id = extracted.id,
                "Model returned a different id, keeping the incident id"
            );
        }

        if !validation.is_valid {
            tracing::error!(
                incident_id = incident.id,
                errors = ?validation.errors,
                "Generated report failed validation"
            );
            return Err(GeneratorError::Decode(validation.errors.join("; ")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HazardCategory, SeverityCategory};
    use crate::service::testing::{ScriptedCompletion, fall_incident, fall_response};

    #[tokio::test]
    async fn test_fall_protection_incident() {
        let completion = Arc::new(ScriptedCompletion::from_json(&fall_response()));
        let generator = ReportGenerator::new(completion.clone(), 1);

        let report = generator.evaluate(&fall_incident()).await.unwrap();

        assert_eq!(report.id, 7);
        assert_eq!(report.date, "01/15/2024");
        assert_eq!(report.time, "14:30");
        assert!(report.hazard_categories.contains(&HazardCategory::HighElevation));
        assert!(report.severity_score >= 50);
        assert_eq!(report.severity_category, SeverityCategory::High);

        let calls = completion.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, REPORT_SYSTEM_PROMPT);
        assert!(calls[0].1.contains("Id of occurrence: 7."));
        assert!(calls[0].1.contains("Date of occurrence: 01/15/2024 14:30."));
        assert!(calls[0].1.contains("List of observations: worker at 6 ft unsecured."));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let completion = Arc::new(ScriptedCompletion::new(vec![Err(
            CompletionError::Upstream("connection reset".to_string()),
        )]));
        let generator = ReportGenerator::new(completion, 1);

        let result = generator.evaluate(&fall_incident()).await;
        assert!(matches!(result, Err(GeneratorError::Upstream(msg)) if msg == "connection reset"));
    }

    #[tokio::test]
    async fn test_missing_severity_score_is_decode_error() {
        let raw = fall_response().replace("\"severityScore\": 55,", "");
        let completion = Arc::new(ScriptedCompletion::from_json(&raw));
        let generator = ReportGenerator::new(completion, 1);

        let result = generator.evaluate(&fall_incident()).await;
        assert!(matches!(result, Err(GeneratorError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unknown_hazard_is_decode_error() {
        let raw = fall_response().replace("HIGH_ELEVATION", "HIGH ELEVATION");
        let completion = Arc::new(ScriptedCompletion::from_json(&raw));
        let generator = ReportGenerator::new(completion, 1);

        let result = generator.evaluate(&fall_incident()).await;
        assert!(matches!(result, Err(GeneratorError::Decode(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_decode_error() {
        let raw = fall_response().replace("\"severityScore\": 55", "\"severityScore\": 150");
        let completion = Arc::new(ScriptedCompletion::from_json(&raw));
        let generator = ReportGenerator::new(completion, 1);

        match generator.evaluate(&fall_incident()).await {
            Err(GeneratorError::Decode(msg)) => assert!(msg.contains("outside 0-100")),
            other => panic!("expected Decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_incomplete_incident_skips_model_call() {
        let completion = Arc::new(ScriptedCompletion::from_json(&fall_response()));
        let generator = ReportGenerator::new(completion.clone(), 1);

        let mut incident = fall_incident();
        incident.observations = String::new();

        let result = generator.evaluate(&incident).await;
        assert!(matches!(
            result,
            Err(GeneratorError::InvalidIncident { id: 7, .. })
        ));
        assert!(completion.calls().is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_upstream_failure() {
        let completion = Arc::new(ScriptedCompletion::new(vec![
            Err(CompletionError::Upstream("rate limited".to_string())),
            ScriptedCompletion::decode(&fall_response()),
        ]));
        let generator = ReportGenerator::new(completion.clone(), 2);

        let report = generator.evaluate(&fall_incident()).await.unwrap();
        assert_eq!(report.id, 7);
        assert_eq!(completion.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_retries_exhausted_returns_last_error() {
        let completion = Arc::new(ScriptedCompletion::new(vec![
            Err(CompletionError::Upstream("timeout".to_string())),
            Err(CompletionError::Decode("not json".to_string())),
        ]));
        let generator = ReportGenerator::new(completion.clone(), 2);

        let result = generator.evaluate(&fall_incident()).await;
        assert!(matches!(result, Err(GeneratorError::Decode(msg)) if msg == "not json"));
        assert_eq!(completion.calls().len(), 2);
    }

    #[test]
    fn test_retry_delay_is_capped() {
        assert_eq!(retry_delay_ms(0), 500);
        assert_eq!(retry_delay_ms(1), 1_000);
        assert_eq!(retry_delay_ms(3), MAX_RETRY_DELAY_MS);
        assert_eq!(retry_delay_ms(56), MAX_RETRY_DELAY_MS);
        assert_eq!(retry_delay_ms(64), MAX_RETRY_DELAY_MS);
        assert_eq!(retry_delay_ms(u32::MAX), MAX_RETRY_DELAY_MS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_attempts_are_clamped() {
        // an empty script fails every call as Upstream
        let completion = Arc::new(ScriptedCompletion::new(Vec::new()));
        let generator = ReportGenerator::new(completion.clone(), 70);

        let started = tokio::time::Instant::now();
        let result = generator.evaluate(&fall_incident()).await;

        assert!(matches!(result, Err(GeneratorError::Upstream(_))));
        assert_eq!(completion.calls().len(), MAX_ATTEMPTS as usize);
        // 500 + 1000 + 2000 ms between the four attempts
        assert_eq!(started.elapsed(), tokio::time::Duration::from_millis(3_500));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let completion = Arc::new(ScriptedCompletion::new(Vec::new()));
        assert_eq!(ReportGenerator::new(completion, 0).max_attempts, 1);
    }
}
