//! Patient demographics and workflow status.
//!
//! A patient is created by an intake submission and then moves through the
//! care stages one form at a time. Demographics are immutable after intake;
//! only [`PatientStatus`] changes, and only through the store's status
//! operation.

use chrono::{DateTime, NaiveDate, Utc};
use medflow_types::Cpf;
use serde::{Deserialize, Serialize};

/// Patient gender as captured at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Gender {
    M,
    F,
    O,
}

/// The patient's position in the care workflow.
///
/// The happy path is strictly forward: waiting → in-triage →
/// in-consultation → completed. `completed` is terminal in the base flow;
/// medication administration attaches to completed patients without moving
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Waiting,
    InTriage,
    InConsultation,
    Completed,
}

impl PatientStatus {
    /// All stages, in workflow order.
    pub const ALL: [PatientStatus; 4] = [
        PatientStatus::Waiting,
        PatientStatus::InTriage,
        PatientStatus::InConsultation,
        PatientStatus::Completed,
    ];

    /// The wire-form name of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Waiting => "waiting",
            PatientStatus::InTriage => "in-triage",
            PatientStatus::InConsultation => "in-consultation",
            PatientStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PatientStatus {
    type Err = crate::ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(PatientStatus::Waiting),
            "in-triage" => Ok(PatientStatus::InTriage),
            "in-consultation" => Ok(PatientStatus::InConsultation),
            "completed" => Ok(PatientStatus::Completed),
            other => Err(crate::ClinicError::InvalidState(format!(
                "unknown patient status: {other}"
            ))),
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Patient {
    /// Opaque unique identifier, assigned by the store at registration.
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    /// Brazilian national id in `###.###.###-##` form.
    #[schema(value_type = String)]
    pub cpf: Cpf,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_insurance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    /// Set once at registration, immutable afterwards.
    pub registration_date: DateTime<Utc>,
    pub status: PatientStatus,
}

/// Demographics that passed intake validation, ready for registration.
///
/// Produced by [`crate::validation::parse_intake`]; the raw submission never
/// reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub cpf: Cpf,
    pub phone: String,
    pub address: String,
    pub health_insurance: Option<String>,
    pub emergency_contact: Option<String>,
}

impl Patient {
    /// Builds a registered patient from validated demographics.
    ///
    /// Assigns a fresh opaque id, stamps `registration_date`, and starts the
    /// workflow at [`PatientStatus::Waiting`].
    pub fn register(new: NewPatient, now: DateTime<Utc>) -> Self {
        Patient {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: new.name,
            birth_date: new.birth_date,
            gender: new.gender,
            cpf: new.cpf,
            phone: new.phone,
            address: new.address,
            health_insurance: new.health_insurance,
            emergency_contact: new.emergency_contact,
            registration_date: now,
            status: PatientStatus::Waiting,
        }
    }
}

/// Raw intake form submission, exactly as the caller sent it.
///
/// String-typed where the persisted model is stronger (`birth_date`, `cpf`)
/// so a malformed value produces a field-level violation instead of a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IntakeInput {
    pub name: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    pub gender: Gender,
    /// `###.###.###-##`.
    pub cpf: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub health_insurance: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
}
