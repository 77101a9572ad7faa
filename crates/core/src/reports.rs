//! Workflow reporting: patient totals by stage and triage priority counts.

use crate::patient::{Patient, PatientStatus};
use crate::triage::{PriorityLevel, TriageRecord};
use serde::Serialize;

/// Patient counts per workflow stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct StatusBreakdown {
    pub waiting: usize,
    pub in_triage: usize,
    pub in_consultation: usize,
    pub completed: usize,
}

/// Triage record counts per priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct PriorityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub emergency: usize,
}

/// A point-in-time summary of the clinic's workload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct WorkflowReport {
    pub total_patients: usize,
    pub status: StatusBreakdown,
    pub priority: PriorityBreakdown,
}

impl WorkflowReport {
    /// Compiles the report from store snapshots. Pure: no I/O, no ordering
    /// assumptions.
    pub fn compile(patients: &[Patient], triage_records: &[TriageRecord]) -> Self {
        let mut status = StatusBreakdown::default();
        for patient in patients {
            match patient.status {
                PatientStatus::Waiting => status.waiting += 1,
                PatientStatus::InTriage => status.in_triage += 1,
                PatientStatus::InConsultation => status.in_consultation += 1,
                PatientStatus::Completed => status.completed += 1,
            }
        }

        let mut priority = PriorityBreakdown::default();
        for record in triage_records {
            match record.priority_level {
                PriorityLevel::Low => priority.low += 1,
                PriorityLevel::Medium => priority.medium += 1,
                PriorityLevel::High => priority.high += 1,
                PriorityLevel::Emergency => priority.emergency += 1,
            }
        }

        WorkflowReport {
            total_patients: patients.len(),
            status,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{Gender, NewPatient};
    use crate::triage::{GlasgowScore, PriorityLevel, PupilReactivity, TriageInput};
    use chrono::{NaiveDate, Utc};
    use medflow_types::Cpf;

    fn patient_with_status(status: PatientStatus) -> Patient {
        let mut patient = Patient::register(
            NewPatient {
                name: "Paciente".into(),
                birth_date: NaiveDate::from_ymd_opt(1988, 12, 1).unwrap(),
                gender: Gender::M,
                cpf: Cpf::parse("123.456.789-00").unwrap(),
                phone: "(11) 90000-0000".into(),
                address: "Rua Direita, 45".into(),
                health_insurance: None,
                emergency_contact: None,
            },
            Utc::now(),
        );
        patient.status = status;
        patient
    }

    fn triage_with_priority(priority: PriorityLevel) -> TriageRecord {
        TriageRecord::from_input(
            TriageInput {
                patient_id: "p".into(),
                blood_pressure: "120/80".into(),
                heart_rate: 75,
                respiratory_rate: 14,
                oxygen_saturation: 99,
                temperature: 36.2,
                glucose: None,
                glasgow: GlasgowScore {
                    ocular_opening: 4,
                    verbal_response: 5,
                    motor_response: 6,
                },
                pupil_reactivity: PupilReactivity::Bilateral,
                pain_level: 0,
                main_complaints: "revisão".into(),
                allergies: String::new(),
                regular_medication: String::new(),
                notes: String::new(),
                priority_level: priority,
                triage_by: "Enf. Costa".into(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn compile_counts_statuses_and_priorities() {
        let patients = vec![
            patient_with_status(PatientStatus::Waiting),
            patient_with_status(PatientStatus::Waiting),
            patient_with_status(PatientStatus::InConsultation),
            patient_with_status(PatientStatus::Completed),
        ];
        let triage_records = vec![
            triage_with_priority(PriorityLevel::Emergency),
            triage_with_priority(PriorityLevel::Medium),
            triage_with_priority(PriorityLevel::Medium),
        ];

        let report = WorkflowReport::compile(&patients, &triage_records);
        assert_eq!(report.total_patients, 4);
        assert_eq!(report.status.waiting, 2);
        assert_eq!(report.status.in_triage, 0);
        assert_eq!(report.status.in_consultation, 1);
        assert_eq!(report.status.completed, 1);
        assert_eq!(report.priority.emergency, 1);
        assert_eq!(report.priority.medium, 2);
        assert_eq!(report.priority.low, 0);
    }

    #[test]
    fn compile_of_empty_snapshots_is_all_zero() {
        let report = WorkflowReport::compile(&[], &[]);
        assert_eq!(report, WorkflowReport::default());
    }
}
