//! Stage-level input validation.
//!
//! Each workflow stage validates its whole submission up front and reports
//! every field violation at once; nothing reaches the store until the
//! submission is clean. Format checks are conservative byte walks; the
//! accepted grammar is small enough that a regex engine would be dead
//! weight.

use crate::consultation::ConsultationInput;
use crate::error::{ClinicError, ClinicResult, ValidationReport};
use crate::medication::MedicationInput;
use crate::patient::{IntakeInput, NewPatient};
use crate::staff::nurse_name;
use crate::triage::TriageInput;
use chrono::NaiveDate;
use medflow_types::Cpf;

const MIN_NAME_CHARS: usize = 3;
const MIN_PHONE_CHARS: usize = 10;
const MIN_ADDRESS_CHARS: usize = 5;
const MIN_COMPLAINT_CHARS: usize = 3;

/// Validates an intake submission and converts it into registration-ready
/// demographics.
///
/// # Errors
///
/// Returns [`crate::ClinicError::Validation`] carrying one violation per
/// rejected field.
pub fn parse_intake(input: &IntakeInput) -> ClinicResult<NewPatient> {
    let mut report = ValidationReport::new();

    if input.name.trim().chars().count() < MIN_NAME_CHARS {
        report.reject("name", "must be at least 3 characters");
    }

    let birth_date = parse_iso_date(&input.birth_date);
    if birth_date.is_none() {
        report.reject("birth_date", "must be a valid date in YYYY-MM-DD form");
    }

    let cpf = Cpf::parse(&input.cpf).ok();
    if cpf.is_none() {
        report.reject("cpf", "must match the pattern ###.###.###-##");
    }

    if input.phone.trim().chars().count() < MIN_PHONE_CHARS {
        report.reject("phone", "must be at least 10 characters");
    }
    if input.address.trim().chars().count() < MIN_ADDRESS_CHARS {
        report.reject("address", "must be at least 5 characters");
    }

    // A failed parse always records a violation, so both values are present
    // whenever the report is clean.
    match (birth_date, cpf) {
        (Some(birth_date), Some(cpf)) if report.is_empty() => Ok(NewPatient {
            name: input.name.trim().to_owned(),
            birth_date,
            gender: input.gender,
            cpf,
            phone: input.phone.trim().to_owned(),
            address: input.address.trim().to_owned(),
            health_insurance: normalize_optional(&input.health_insurance),
            emergency_contact: normalize_optional(&input.emergency_contact),
        }),
        _ => Err(ClinicError::Validation(report)),
    }
}

/// Validates a triage submission against the clinical ranges.
pub fn validate_triage(input: &TriageInput) -> ClinicResult<()> {
    let mut report = ValidationReport::new();

    if input.blood_pressure.trim().is_empty() {
        report.reject("blood_pressure", "cannot be empty");
    }
    if !(40..=200).contains(&input.heart_rate) {
        report.reject("heart_rate", "must be between 40 and 200 bpm");
    }
    if !(10..=40).contains(&input.respiratory_rate) {
        report.reject("respiratory_rate", "must be between 10 and 40 rpm");
    }
    if !(70..=100).contains(&input.oxygen_saturation) {
        report.reject("oxygen_saturation", "must be between 70 and 100 percent");
    }
    if !(34.0..=42.0).contains(&input.temperature) {
        report.reject("temperature", "must be between 34 and 42 degrees Celsius");
    }
    if let Some(glucose) = input.glucose {
        if !(40..=500).contains(&glucose) {
            report.reject("glucose", "must be between 40 and 500 mg/dL");
        }
    }
    if !(1..=4).contains(&input.glasgow.ocular_opening) {
        report.reject("glasgow.ocular_opening", "must be between 1 and 4");
    }
    if !(1..=5).contains(&input.glasgow.verbal_response) {
        report.reject("glasgow.verbal_response", "must be between 1 and 5");
    }
    if !(1..=6).contains(&input.glasgow.motor_response) {
        report.reject("glasgow.motor_response", "must be between 1 and 6");
    }
    if input.pain_level > 10 {
        report.reject("pain_level", "must be between 0 and 10");
    }
    if input.main_complaints.trim().chars().count() < MIN_COMPLAINT_CHARS {
        report.reject("main_complaints", "must be at least 3 characters");
    }
    if input.triage_by.trim().chars().count() < MIN_NAME_CHARS {
        report.reject("triage_by", "professional name must be at least 3 characters");
    }

    report.into_result()
}

/// Validates a consultation submission. Only the doctor's name is
/// constrained; every other field is optional and defaulted later.
pub fn validate_consultation(input: &ConsultationInput) -> ClinicResult<()> {
    let mut report = ValidationReport::new();

    if input.doctor_name.trim().chars().count() < MIN_NAME_CHARS {
        report.reject("doctor_name", "doctor name must be at least 3 characters");
    }

    report.into_result()
}

/// Validates a medication submission against the nurse roster.
pub fn validate_medication(input: &MedicationInput) -> ClinicResult<()> {
    let mut report = ValidationReport::new();

    if nurse_name(&input.administering_nurse).is_none() {
        report.reject("administering_nurse", "must be a nurse from the roster");
    }

    report.into_result()
}

/// Parses a strict `YYYY-MM-DD` date; rejects other separators and widths.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shaped = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
