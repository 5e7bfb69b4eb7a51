//! Converters from extracted LLM models to domain models

use crate::model::extracted::{ExtractedHazardCategory, ExtractedReport, ExtractedSeverityCategory};
use crate::model::{HazardCategory, SafetyReport, SeverityCategory};

/// Convert a validated extracted report to the domain model.
///
/// The report id is always the incident id. Duplicate hazard categories are
/// dropped, keeping first-seen order.
pub fn convert_report(extracted: ExtractedReport, incident_id: i64) -> SafetyReport {
    let severity_category = match extracted.severity_category {
        ExtractedSeverityCategory::Low => SeverityCategory::Low,
        ExtractedSeverityCategory::Medium => SeverityCategory::Medium,
        ExtractedSeverityCategory::High => SeverityCategory::High,
    };

    let mut hazard_categories: Vec<HazardCategory> = Vec::new();
    for hazard in extracted.hazard_categories.into_iter().map(convert_hazard) {
        if !hazard_categories.contains(&hazard) {
            hazard_categories.push(hazard);
        }
    }

    SafetyReport {
        id: incident_id,
        date: extracted.date,
        time: extracted.time,
        overview: extracted.overview,
        description: extracted.description,
        severity_score: extracted.severity_score as i32,
        severity_category,
        hazard_categories,
        solution: extracted.solution,
        prevention: extracted.prevention,
        lesson: extracted.lesson,
    }
}

fn convert_hazard(extracted: ExtractedHazardCategory) -> HazardCategory {
    match extracted {
        ExtractedHazardCategory::SuspendedLoad => HazardCategory::SuspendedLoad,
        ExtractedHazardCategory::HighElevation => HazardCategory::HighElevation,
        ExtractedHazardCategory::MobileEquipment => HazardCategory::MobileEquipment,
        ExtractedHazardCategory::FastVehicles => HazardCategory::FastVehicles,
        ExtractedHazardCategory::RotatingEquipment => HazardCategory::RotatingEquipment,
        ExtractedHazardCategory::HotSubstances => HazardCategory::HotSubstances,
        ExtractedHazardCategory::SteamExposure => HazardCategory::SteamExposure,
        ExtractedHazardCategory::SustainedFire => HazardCategory::SustainedFire,
        ExtractedHazardCategory::Explosions => HazardCategory::Explosions,
        ExtractedHazardCategory::UnstableExcavations => HazardCategory::UnstableExcavations,
        ExtractedHazardCategory::HighVoltage => HazardCategory::HighVoltage,
        ExtractedHazardCategory::ArcFlash => HazardCategory::ArcFlash,
        ExtractedHazardCategory::ToxicChemicals => HazardCategory::ToxicChemicals,
    }
}
