use serde::{Deserialize, Serialize};

/// A single user-reported field incident, as read from the incident fixture.
///
/// `occurred_at` holds date and time in one text field (e.g. `01/15/2024 14:30`);
/// splitting it into the report's `MM/DD/YYYY` and `HH:MM` parts is left to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: i64,
    #[serde(rename = "date")]
    pub occurred_at: String,
    pub criteria: String,
    pub observations: String,
    pub risks: String,
    #[serde(rename = "solution")]
    pub proposed_solution: String,
}

impl IncidentRecord {
    /// Names of the text fields that are empty (after trimming)
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("date", &self.occurred_at),
            ("criteria", &self.criteria),
            ("observations", &self.observations),
            ("risks", &self.risks),
            ("solution", &self.proposed_solution),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
