use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Safety report as returned by the LLM.
///
/// Field names are the schema the model is asked to fill in; any response that
/// cannot be deserialized into this shape is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedReport {
    #[schemars(description = "The id of the incident, copied from the input")]
    pub id: i64,

    #[schemars(description = "Only the date portion of the incident, formatted MM/DD/YYYY")]
    pub date: String,

    #[schemars(description = "Only the time portion of the incident, formatted HH:MM")]
    pub time: String,

    #[schemars(
        description = "Quick and brief overview that delivers the general situation to first responders"
    )]
    pub overview: String,

    #[schemars(description = "Description containing the crucial details of the situation")]
    pub description: String,

    #[schemars(description = "Integer severity from 0 (extremely trivial) to 100 (most severe)")]
    pub severity_score: i64,

    #[schemars(
        description = "Band of the severity score: LOW for 0-29, MEDIUM for 30-49, HIGH for 50-100"
    )]
    pub severity_category: ExtractedSeverityCategory,

    #[schemars(
        description = "Only the high-severity hazard categories present in the incident; empty if none"
    )]
    #[serde(default)]
    pub hazard_categories: Vec<ExtractedHazardCategory>,

    #[schemars(description = "Solutions that can be done right now to fix the issue")]
    pub solution: String,

    #[schemars(description = "Preventative measures that stop this issue from occurring again")]
    pub prevention: String,

    #[schemars(description = "Lessons that better prepare people for similar situations")]
    pub lesson: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractedSeverityCategory {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractedHazardCategory {
    SuspendedLoad,
    HighElevation,
    MobileEquipment,
    FastVehicles,
    RotatingEquipment,
    HotSubstances,
    SteamExposure,
    SustainedFire,
    Explosions,
    UnstableExcavations,
    HighVoltage,
    ArcFlash,
    ToxicChemicals,
}
