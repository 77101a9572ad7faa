//! Medication administration records.
//!
//! Medication is prescribed during consultation and administered afterwards;
//! a patient can accumulate any number of these. They attach to completed
//! patients and never move the workflow status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One administered medication, append-only per patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MedicationRecord {
    /// Server-assigned identifier.
    pub id: String,
    pub patient_id: String,
    /// Roster id of the administering nurse (see [`crate::staff::NURSE_ROSTER`]).
    pub administering_nurse: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// Set once when the record is written.
    pub created_at: DateTime<Utc>,
}

impl MedicationRecord {
    /// Builds the stored record from a validated submission.
    pub fn from_input(input: MedicationInput, now: DateTime<Utc>) -> Self {
        MedicationRecord {
            id: uuid::Uuid::new_v4().simple().to_string(),
            patient_id: input.patient_id,
            administering_nurse: input.administering_nurse,
            special_instructions: input.special_instructions,
            created_at: now,
        }
    }
}

/// Raw medication form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MedicationInput {
    pub patient_id: String,
    /// Roster id, not a free-text name.
    pub administering_nurse: String,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_assigns_id_and_timestamp() {
        let now = Utc::now();
        let record = MedicationRecord::from_input(
            MedicationInput {
                patient_id: "p1".into(),
                administering_nurse: "2".into(),
                special_instructions: Some("administrar com alimento".into()),
            },
            now,
        );

        assert!(!record.id.is_empty());
        assert_eq!(record.created_at, now);
        assert_eq!(record.administering_nurse, "2");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = MedicationRecord::from_input(
            MedicationInput {
                patient_id: "p1".into(),
                administering_nurse: "5".into(),
                special_instructions: None,
            },
            Utc::now(),
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: MedicationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
