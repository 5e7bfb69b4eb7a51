//! Validation logic for LLM-generated safety reports
//!
//! Errors mark reports that must not be stored; warnings flag answers that are
//! structurally fine but disagree with the rubric. Scores are never rewritten here.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};

use crate::model::SeverityCategory;
use crate::model::extracted::{ExtractedReport, ExtractedSeverityCategory};

const MAX_SEVERITY_SCORE: i64 = 100;

/// Minimum score for one, two and three-or-more hazard categories
const HAZARD_FLOORS: [(usize, i64); 3] = [(3, 100), (2, 80), (1, 50)];

/// Result of report validation
#[derive(Debug)]
pub struct ReportValidationResult {
    /// Whether the report passed validation
    pub is_valid: bool,
    /// Critical errors that indicate invalid output
    pub errors: Vec<String>,
    /// Warnings that indicate potential quality issues
    pub warnings: Vec<String>,
}

impl ReportValidationResult {
    /// Create a new validation result with no issues
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the validation result
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the validation result
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validate an extracted report against the score bands and output formats
pub fn validate_extracted_report(report: &ExtractedReport) -> ReportValidationResult {
    let mut result = ReportValidationResult::valid();

    validate_severity(report, &mut result);
    validate_hazard_floor(report, &mut result);
    validate_date_time(report, &mut result);

    result
}

fn validate_severity(report: &ExtractedReport, result: &mut ReportValidationResult) {
    let score = report.severity_score;
    if !(0..=MAX_SEVERITY_SCORE).contains(&score) {
        result.add_error(format!(
            "Severity score {} is outside 0-{}",
            score, MAX_SEVERITY_SCORE
        ));
        return;
    }

    let expected = SeverityCategory::for_score(score as i32);
    let actual = match report.severity_category {
        ExtractedSeverityCategory::Low => SeverityCategory::Low,
        ExtractedSeverityCategory::Medium => SeverityCategory::Medium,
        ExtractedSeverityCategory::High => SeverityCategory::High,
    };

    if expected != Some(actual) {
        result.add_error(format!(
            "Severity category {} does not match score {}",
            actual, score
        ));
    }
}

fn validate_hazard_floor(report: &ExtractedReport, result: &mut ReportValidationResult) {
    let hazard_count = report
        .hazard_categories
        .iter()
        .collect::<HashSet<_>>()
        .len();

    let floor = HAZARD_FLOORS
        .iter()
        .find(|(count, _)| hazard_count >= *count)
        .map(|(_, floor)| *floor);

    if let Some(floor) = floor {
        if report.severity_score < floor {
            result.add_warning(format!(
                "Severity score {} is below the floor of {} for {} hazard categories",
                report.severity_score, floor, hazard_count
            ));
        }
    }
}

fn validate_date_time(report: &ExtractedReport, result: &mut ReportValidationResult) {
    let date_ok = report.date.len() == 10
        && NaiveDate::parse_from_str(&report.date, "%m/%d/%Y").is_ok();
    if !date_ok {
        result.add_warning(format!("Date '{}' is not MM/DD/YYYY", report.date));
    }

    let time_ok =
        report.time.len() == 5 && NaiveTime::parse_from_str(&report.time, "%H:%M").is_ok();
    if !time_ok {
        result.add_warning(format!("Time '{}' is not HH:MM", report.time));
    }
}
