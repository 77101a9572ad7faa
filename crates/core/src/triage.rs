//! Triage assessment: vital signs, Glasgow coma scale, pain, and priority.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority assigned by the triage professional.
///
/// Deliberately operator-chosen, not derived from the vitals or the Glasgow
/// score: the professional's clinical judgment is recorded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Emergency,
}

/// Pupillary light response observed during triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PupilReactivity {
    /// Neither pupil reacts.
    #[serde(rename = "none")]
    Unreactive,
    Unilateral,
    Bilateral,
}

/// Trauma classification derived from the Glasgow total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TraumaSeverity {
    Mild,
    Moderate,
    Severe,
}

/// The three Glasgow coma scale components.
///
/// Component ranges (ocular 1–4, verbal 1–5, motor 1–6) are enforced by
/// stage validation, which bounds the total to 3–15 by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GlasgowScore {
    pub ocular_opening: u8,
    pub verbal_response: u8,
    pub motor_response: u8,
}

impl GlasgowScore {
    /// Sum of the three components.
    pub fn total(&self) -> u8 {
        self.ocular_opening + self.verbal_response + self.motor_response
    }

    /// Trauma classification for this score.
    pub fn trauma_severity(&self) -> TraumaSeverity {
        TraumaSeverity::for_total(self.total())
    }
}

impl TraumaSeverity {
    /// Classification of a Glasgow total: 13–15 mild, 9–12 moderate,
    /// 3–8 severe.
    pub fn for_total(total: u8) -> TraumaSeverity {
        match total {
            13..=u8::MAX => TraumaSeverity::Mild,
            9..=12 => TraumaSeverity::Moderate,
            _ => TraumaSeverity::Severe,
        }
    }
}

/// A completed triage assessment, keyed by patient.
///
/// At most one per patient: a resubmission replaces the previous record
/// (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TriageRecord {
    pub patient_id: String,
    pub blood_pressure: String,
    /// Beats per minute.
    pub heart_rate: u16,
    /// Breaths per minute.
    pub respiratory_rate: u16,
    /// Percent.
    pub oxygen_saturation: u8,
    /// Degrees Celsius.
    pub temperature: f32,
    /// mg/dL, when measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glucose: Option<u16>,
    pub glasgow: GlasgowScore,
    /// Stored sum of the Glasgow components.
    pub glasgow_total: u8,
    pub pupil_reactivity: PupilReactivity,
    /// 0–10.
    pub pain_level: u8,
    pub main_complaints: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub regular_medication: String,
    #[serde(default)]
    pub notes: String,
    pub priority_level: PriorityLevel,
    /// Name of the triage professional.
    pub triage_by: String,
    /// Set once when the record is written.
    pub triage_date: DateTime<Utc>,
}

impl TriageRecord {
    /// Builds the stored record from a validated submission, computing the
    /// Glasgow total and stamping the triage date.
    pub fn from_input(input: TriageInput, now: DateTime<Utc>) -> Self {
        let glasgow_total = input.glasgow.total();
        TriageRecord {
            patient_id: input.patient_id,
            blood_pressure: input.blood_pressure,
            heart_rate: input.heart_rate,
            respiratory_rate: input.respiratory_rate,
            oxygen_saturation: input.oxygen_saturation,
            temperature: input.temperature,
            glucose: input.glucose,
            glasgow: input.glasgow,
            glasgow_total,
            pupil_reactivity: input.pupil_reactivity,
            pain_level: input.pain_level,
            main_complaints: input.main_complaints,
            allergies: input.allergies,
            regular_medication: input.regular_medication,
            notes: input.notes,
            priority_level: input.priority_level,
            triage_by: input.triage_by,
            triage_date: now,
        }
    }

    /// Trauma classification of the stored total.
    pub fn trauma_severity(&self) -> TraumaSeverity {
        TraumaSeverity::for_total(self.glasgow_total)
    }
}

/// Raw triage form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TriageInput {
    pub patient_id: String,
    pub blood_pressure: String,
    pub heart_rate: u16,
    pub respiratory_rate: u16,
    pub oxygen_saturation: u8,
    pub temperature: f32,
    #[serde(default)]
    pub glucose: Option<u16>,
    pub glasgow: GlasgowScore,
    pub pupil_reactivity: PupilReactivity,
    pub pain_level: u8,
    pub main_complaints: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub regular_medication: String,
    #[serde(default)]
    pub notes: String,
    pub priority_level: PriorityLevel,
    pub triage_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input(patient_id: &str) -> TriageInput {
        TriageInput {
            patient_id: patient_id.into(),
            blood_pressure: "120/80 mmHg".into(),
            heart_rate: 88,
            respiratory_rate: 16,
            oxygen_saturation: 98,
            temperature: 36.5,
            glucose: None,
            glasgow: GlasgowScore {
                ocular_opening: 4,
                verbal_response: 5,
                motor_response: 6,
            },
            pupil_reactivity: PupilReactivity::Bilateral,
            pain_level: 2,
            main_complaints: "Dor de cabeça intensa".into(),
            allergies: String::new(),
            regular_medication: String::new(),
            notes: String::new(),
            priority_level: PriorityLevel::Medium,
            triage_by: "Enf. Beatriz Costa".into(),
        }
    }

    #[test]
    fn glasgow_total_is_sum_of_components() {
        let glasgow = GlasgowScore {
            ocular_opening: 3,
            verbal_response: 4,
            motor_response: 5,
        };
        assert_eq!(glasgow.total(), 12);
    }

    #[test]
    fn trauma_severity_matches_classification_bands() {
        assert_eq!(TraumaSeverity::for_total(15), TraumaSeverity::Mild);
        assert_eq!(TraumaSeverity::for_total(13), TraumaSeverity::Mild);
        assert_eq!(TraumaSeverity::for_total(12), TraumaSeverity::Moderate);
        assert_eq!(TraumaSeverity::for_total(9), TraumaSeverity::Moderate);
        assert_eq!(TraumaSeverity::for_total(8), TraumaSeverity::Severe);
        assert_eq!(TraumaSeverity::for_total(3), TraumaSeverity::Severe);
    }

    #[test]
    fn from_input_computes_total_and_stamps_date() {
        let now = Utc::now();
        let record = TriageRecord::from_input(sample_input("p1"), now);

        assert_eq!(record.glasgow_total, 15);
        assert_eq!(record.trauma_severity(), TraumaSeverity::Mild);
        assert_eq!(record.triage_date, now);
    }

    #[test]
    fn pupil_reactivity_uses_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&PupilReactivity::Unreactive).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&PupilReactivity::Unilateral).unwrap(),
            "\"unilateral\""
        );
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = TriageRecord::from_input(sample_input("p1"), Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        let back: TriageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
