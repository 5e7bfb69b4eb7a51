//! Prompts for safety report generation

use crate::model::IncidentRecord;

/// System prompt: the severity rubric and the output contract.
///
/// Hazard names must match `HazardCategory` serde names exactly, since the
/// response is decoded against them.
pub const REPORT_SYSTEM_PROMPT: &str = concat!(
    "You are a safety observation expert for an electric company. ",
    "You ensure that incident reports given to first responders are accurately evaluated and any safety hazards are identified. ",
    "There are 13 categories that should be considered high severity. ",
    "1. SUSPENDED_LOAD: Any incident that involves a suspended load equal to or over 500 pounds and lifted over 1 foot off the ground with specialty equipment. ",
    "2. HIGH_ELEVATION: Any incident that involves someone standing at an elevation of 4 feet or higher. ",
    "3. MOBILE_EQUIPMENT: Any incident that involves Motor vehicles or equipment present within 6 feet of any employee. ",
    "4. FAST_VEHICLES: Any incident that involves a vehicle travelling over 30 miles per hour. ",
    "5. ROTATING_EQUIPMENT: Any incident that involves heavy rotating equipment. ",
    "6. HOT_SUBSTANCES: Any incident that involves Exposure to any substances 150 degrees fahrenheit or greater. ",
    "7. STEAM_EXPOSURE: Any incident that involves release of steam. ",
    "8. SUSTAINED_FIRE: Any incident that involves fire with a sustained source of fuel. ",
    "9. EXPLOSIONS: Any incident that involves explosions. ",
    "10. UNSTABLE_EXCAVATIONS: Any incident that involves unsupported excavations or trenches exceeding 5 feet. ",
    "11. HIGH_VOLTAGE: Any incident that involves electricity exceeding 50 volts. ",
    "12. ARC_FLASH: Any incident that involves arc flashes. ",
    "13. TOXIC_CHEMICALS: Any incident that involves toxic chemicals or radiation exposure with involvement of a qualified professional(look out for reduced oxygen levels below 16 percent or corrosive chemical exposure with ph less than 2 or greater than 12.5. ",
    "All incidents you evaluate are independent and should be treated as separate cases. ",
    "Format the suggestion to match the following properties: the id, the date, the time, an overview, description, severity score, category, hazards, prevention, solution, and lesson. ",
    "For the id, use the input that is provided for the id. ",
    "For the date, provide ONLY the date portion of the input in the format of 'MM/DD/YYYY'. ",
    "For the time, provide ONLY the time portion of the input in the format of 'HH:MM'. ",
    "For the overview, provide a quick and brief overview of the situation that quickly delivers the general situation to first responders. ",
    "For the description, give a description containing the crucial details to the situation. ",
    "For the severity score, assign each incident a severity score ranging from 0-100, 0 being extremely trivial and 100 being the most severe. This will cast to an int. If a score is between 2 thresholds, assign it between them based on which one it is related too more. ",
    "An example of a severity score of 0 is an uneventful, insignificant, incidence where no injuries occurred, mostly focusing on reminders. ",
    "An example of a severity score of 10 is an event involving situations where no injuries occurred and the situation had low risks involved. ",
    "An example of a severity score of 20 is an event involving situations where minor injuries could have occurred but there none were sustained. ",
    "An example of a severity score of 30 is an event involving situations where minor injuries have occurred or additional consulting and resources are needed such as a professional or specialized equipment. ",
    "An example of a severity score of 40 is an event involving situations where a urgent response is needed that involves swift action from individuals. ",
    "A minimum severity score of 50 is assigned to an event involving situations where only one of the 13 hazards listed before is present. ",
    "An example of a severity score of 60 is an event involving uncontrolled and unsecure dangerous events. ",
    "An example of a severity score of 70 is an event involving uncontrolled and unsecure dangerous events that may involve major injuries. ",
    "A minimum severity score of 80 is assigned to an event involving situations where two of the 13 hazards listed before is present. ",
    "An example of a severity score of 90 is an event involving events that are must be resolved as soon as possible with large teams, with potential fatalities. ",
    "A severity score of 100 is assigned to an event involving situations where three or more of the 13 hazards listed before is present. ",
    "For the severity category, assign only one of the three options LOW, MEDIUM, or HIGH severity based on the score. ",
    "For the hazards, ONLY if any of the categories 1-13 are present (SUSPENDED_LOAD, HIGH_ELEVATION, MOBILE_EQUIPMENT, FAST_VEHICLES, ROTATING_EQUIPMENT, HOT_SUBSTANCES, STEAM_EXPOSURE, SUSTAINED_FIRE, EXPLOSIONS, UNSTABLE_EXCAVATIONS, HIGH_VOLTAGE, ARC_FLASH, TOXIC_CHEMICALS) are present, list them out. This will be parsed into an array. ",
    "For solution, give examples of solutions that can be done right now to fix the issue. ",
    "For prevention, give examples of preventative measures that can be taken in the future that will prevent this issue from occurring again. ",
    "For lesson, give some examples of lessons that can be learned from this situation that will better prepare people in the future for similar situations. ",
);

/// Build the user prompt for one incident
pub fn build_incident_prompt(incident: &IncidentRecord) -> String {
    format!(
        "This is a user reported incident. \
         Id of occurrence: {id}. \
         Date of occurrence: {date}. \
         Safety criteria being assessed: {criteria}. \
         List of observations: {observations}. \
         Potential risks observed: {risks}. \
         Recommended solution: {solution}.",
        id = incident.id,
        date = incident.occurred_at,
        criteria = incident.criteria,
        observations = incident.observations,
        risks = incident.risks,
        solution = incident.proposed_solution,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HazardCategory;

    #[test]
    fn test_incident_prompt_template() {
        let incident = IncidentRecord {
            id: 7,
            occurred_at: "01/15/2024 14:30".to_string(),
            criteria: "fall protection".to_string(),
            observations: "worker at 6 ft unsecured".to_string(),
            risks: "fall hazard".to_string(),
            proposed_solution: "install guardrail".to_string(),
        };

        assert_eq!(
            build_incident_prompt(&incident),
            "This is a user reported incident. Id of occurrence: 7. \
             Date of occurrence: 01/15/2024 14:30. \
             Safety criteria being assessed: fall protection. \
             List of observations: worker at 6 ft unsecured. \
             Potential risks observed: fall hazard. \
             Recommended solution: install guardrail."
        );
    }

    #[test]
    fn test_system_prompt_lists_every_hazard_category() {
        for hazard in HazardCategory::ALL {
            let numbered = REPORT_SYSTEM_PROMPT.contains(&format!(". {}: ", hazard.as_str()));
            assert!(numbered, "{} has no trigger definition", hazard);
        }
    }

    #[test]
    fn test_system_prompt_thresholds() {
        for threshold in [
            "500 pounds",
            "4 feet or higher",
            "within 6 feet",
            "over 30 miles per hour",
            "150 degrees fahrenheit",
            "exceeding 5 feet",
            "exceeding 50 volts",
            "below 16 percent",
        ] {
            assert!(REPORT_SYSTEM_PROMPT.contains(threshold), "missing {}", threshold);
        }
    }

    #[test]
    fn test_system_prompt_severity_anchors_and_floors() {
        for anchor in [0, 10, 20, 30, 40, 60, 70, 90] {
            let text = format!("An example of a severity score of {} is", anchor);
            assert!(REPORT_SYSTEM_PROMPT.contains(&text), "missing anchor {}", anchor);
        }
        assert!(REPORT_SYSTEM_PROMPT.contains("A minimum severity score of 50"));
        assert!(REPORT_SYSTEM_PROMPT.contains("A minimum severity score of 80"));
        assert!(REPORT_SYSTEM_PROMPT.contains("A severity score of 100 is assigned"));
    }
}
