//! In-process fakes shared by service and API tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::incident::{IncidentSource, IncidentSourceError, ensure_complete};
use crate::model::IncidentRecord;
use crate::model::extracted::ExtractedReport;
use crate::service::completion::{CompletionError, ReportCompletion};

/// Completion that replays scripted answers and records the prompts it received
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<Result<ExtractedReport, CompletionError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedCompletion {
    pub fn new(responses: Vec<Result<ExtractedReport, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Single answer given as raw model JSON
    pub fn from_json(raw: &str) -> Self {
        Self::new(vec![Self::decode(raw)])
    }

    /// Decode raw model JSON the way a structured extractor would
    pub fn decode(raw: &str) -> Result<ExtractedReport, CompletionError> {
        serde_json::from_str(raw).map_err(|e| CompletionError::Decode(e.to_string()))
    }

    /// `(system, user)` prompt pairs, oldest first
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportCompletion for ScriptedCompletion {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ExtractedReport, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Upstream("no scripted response".to_string())))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Incident source over a fixed list of records
pub struct StaticIncidentSource {
    incidents: Vec<IncidentRecord>,
}

impl StaticIncidentSource {
    pub fn new(incidents: Vec<IncidentRecord>) -> Self {
        Self { incidents }
    }
}

#[async_trait]
impl IncidentSource for StaticIncidentSource {
    async fn load_first(&self) -> Result<IncidentRecord, IncidentSourceError> {
        let incident = self
            .incidents
            .first()
            .cloned()
            .ok_or_else(|| IncidentSourceError::NotFound("no incidents".to_string()))?;
        ensure_complete(incident)
    }

    async fn load_by_id(&self, id: i64) -> Result<IncidentRecord, IncidentSourceError> {
        let incident = self
            .incidents
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| IncidentSourceError::NotFound(format!("id {}", id)))?;
        ensure_complete(incident)
    }
}

pub fn fall_incident() -> IncidentRecord {
    IncidentRecord {
        id: 7,
        occurred_at: "01/15/2024 14:30".to_string(),
        criteria: "fall protection".to_string(),
        observations: "worker at 6 ft unsecured".to_string(),
        risks: "fall hazard".to_string(),
        proposed_solution: "install guardrail".to_string(),
    }
}

/// Model answer for `fall_incident`
pub fn fall_response() -> String {
    r#"{
        "id": 7,
        "date": "01/15/2024",
        "time": "14:30",
        "overview": "Worker unsecured at height",
        "description": "A worker stood at 6 ft without fall protection",
        "severityScore": 55,
        "severityCategory": "HIGH",
        "hazardCategories": ["HIGH_ELEVATION"],
        "solution": "Install a guardrail and tie the worker off",
        "prevention": "Fall protection briefing before elevated work",
        "lesson": "Verify anchor points before climbing"
    }"#
    .to_string()
}
