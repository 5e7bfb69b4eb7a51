//! Structured completion interface for report generation
//!
//! The model is asked to fill in the `ExtractedReport` schema; transport failures and
//! schema mismatches are reported as distinct errors.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::extractor::ExtractionError;
use rig::providers::openai;

use crate::model::extracted::ExtractedReport;

/// Default model for report generation
pub const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The completion call itself failed (transport, auth, rate limit)
    #[error("Completion request failed: {0}")]
    Upstream(String),

    /// The model answered, but not in the report schema
    #[error("Completion response does not match the report schema: {0}")]
    Decode(String),
}

impl From<ExtractionError> for CompletionError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::CompletionError(e) => CompletionError::Upstream(e.to_string()),
            ExtractionError::NoData => {
                CompletionError::Decode("model returned no structured data".to_string())
            }
            ExtractionError::DeserializationError(e) => CompletionError::Decode(e.to_string()),
        }
    }
}

/// Completion interface producing schema-conforming reports
#[async_trait]
pub trait ReportCompletion: Send + Sync {
    /// Send both instructions and decode the answer into an `ExtractedReport`
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ExtractedReport, CompletionError>;

    /// Name of the model answering the requests
    fn model(&self) -> &str;
}

/// OpenAI-backed completion using rig's structured extractor
#[derive(Clone)]
pub struct OpenAiReportCompletion {
    client: openai::Client,
    model: String,
}

impl OpenAiReportCompletion {
    /// Create a completion client with the provided API key
    pub fn new(api_key: &str, model: Option<String>) -> Self {
        let client = openai::Client::new(api_key);

        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        tracing::info!(model = %model, "Report completion client initialized");

        Self { client, model }
    }
}

#[async_trait]
impl ReportCompletion for OpenAiReportCompletion {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ExtractedReport, CompletionError> {
        let extractor = self
            .client
            .extractor::<ExtractedReport>(&self.model)
            .preamble(system_prompt)
            .build();

        extractor
            .extract(user_prompt)
            .await
            .map_err(CompletionError::from)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig::completion::CompletionError as RigCompletionError;

    #[test]
    fn test_no_data_is_decode_error() {
        let err = CompletionError::from(ExtractionError::NoData);
        assert!(matches!(err, CompletionError::Decode(_)));
    }

    #[test]
    fn test_deserialization_failure_is_decode_error() {
        let json_err = serde_json::from_str::<ExtractedReport>(r#"{"id": 7}"#).unwrap_err();
        let err = CompletionError::from(ExtractionError::DeserializationError(json_err));
        assert!(matches!(err, CompletionError::Decode(msg) if msg.contains("missing field")));
    }

    #[test]
    fn test_completion_failure_is_upstream_error() {
        let rig_err = RigCompletionError::ProviderError("429 Too Many Requests".to_string());
        let err = CompletionError::from(ExtractionError::CompletionError(rig_err));
        assert!(matches!(err, CompletionError::Upstream(msg) if msg.contains("429")));
    }

    #[test]
    fn test_default_model() {
        let completion = OpenAiReportCompletion::new("sk-test", None);
        assert_eq!(completion.model(), DEFAULT_MODEL);

        let completion = OpenAiReportCompletion::new("sk-test", Some("gpt-4o".to_string()));
        assert_eq!(completion.model(), "gpt-4o");
    }
}
