use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Severity banding derived from the severity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityCategory {
    Low,
    Medium,
    High,
}

impl SeverityCategory {
    /// Lowest score that belongs to the MEDIUM band
    pub const MEDIUM_FLOOR: i32 = 30;
    /// Lowest score that belongs to the HIGH band (one hazard category present)
    pub const HIGH_FLOOR: i32 = 50;

    /// Band a score falls into, `None` when the score is outside 0-100
    pub fn for_score(score: i32) -> Option<Self> {
        match score {
            0..Self::MEDIUM_FLOOR => Some(Self::Low),
            Self::MEDIUM_FLOOR..Self::HIGH_FLOOR => Some(Self::Medium),
            Self::HIGH_FLOOR..=100 => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for SeverityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(format!("Unknown severity category: {}", other)),
        }
    }
}

/// High-severity hazard classifications.
///
/// The presence of any of these raises the minimum severity score of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardCategory {
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

impl HazardCategory {
    pub const ALL: [HazardCategory; 13] = [
        Self::SuspendedLoad,
        Self::HighElevation,
        Self::MobileEquipment,
        Self::FastVehicles,
        Self::RotatingEquipment,
        Self::HotSubstances,
        Self::SteamExposure,
        Self::SustainedFire,
        Self::Explosions,
        Self::UnstableExcavations,
        Self::HighVoltage,
        Self::ArcFlash,
        Self::ToxicChemicals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuspendedLoad => "SUSPENDED_LOAD",
            Self::HighElevation => "HIGH_ELEVATION",
            Self::MobileEquipment => "MOBILE_EQUIPMENT",
            Self::FastVehicles => "FAST_VEHICLES",
            Self::RotatingEquipment => "ROTATING_EQUIPMENT",
            Self::HotSubstances => "HOT_SUBSTANCES",
            Self::SteamExposure => "STEAM_EXPOSURE",
            Self::SustainedFire => "SUSTAINED_FIRE",
            Self::Explosions => "EXPLOSIONS",
            Self::UnstableExcavations => "UNSTABLE_EXCAVATIONS",
            Self::HighVoltage => "HIGH_VOLTAGE",
            Self::ArcFlash => "ARC_FLASH",
            Self::ToxicChemicals => "TOXIC_CHEMICALS",
        }
    }
}

impl fmt::Display for HazardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured safety report produced from one incident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    /// Id of the incident this report was produced from
    pub id: i64,
    /// `MM/DD/YYYY`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub overview: String,
    pub description: String,
    /// 0 (trivial) to 100 (most severe)
    pub severity_score: i32,
    pub severity_category: SeverityCategory,
    pub hazard_categories: Vec<HazardCategory>,
    /// Immediate remediation
    pub solution: String,
    /// Measures that prevent recurrence
    pub prevention: String,
    /// Retrospective guidance
    pub lesson: String,
}

/// A report as persisted, with its storage-assigned key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    /// Surrogate key assigned by the store; distinct from the incident id
    pub record_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: SafetyReport,
}
