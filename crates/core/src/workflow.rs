//! The workflow engine: form submissions in, record writes and status
//! transitions out.
//!
//! Each stage operation is an explicit two-step transaction (write the
//! stage record, then transition the patient's status), so the coupling
//! between the two is visible and testable on its own. The status update is
//! always the last step: a failed write leaves the patient exactly where
//! they were.

use crate::consultation::{ConsultationInput, ConsultationRecord};
use crate::error::{ClinicError, ClinicResult};
use crate::medication::{MedicationInput, MedicationRecord};
use crate::patient::{IntakeInput, Patient, PatientStatus};
use crate::reports::WorkflowReport;
use crate::store::RecordStore;
use crate::triage::{TriageInput, TriageRecord};
use crate::validation;
use chrono::Utc;
use std::sync::Arc;

/// Orchestrates the care stages over a [`RecordStore`].
#[derive(Clone)]
pub struct WorkflowEngine {
    store: Arc<dyn RecordStore>,
}

impl WorkflowEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Registers a new patient from an intake submission.
    ///
    /// Always allowed; the patient enters the workflow at `waiting`.
    pub async fn admit_patient(&self, input: IntakeInput) -> ClinicResult<Patient> {
        let new = validation::parse_intake(&input)?;
        let patient = self.store.create_patient(new).await?;
        tracing::info!(patient_id = %patient.id, "patient admitted");
        Ok(patient)
    }

    /// Moves a waiting patient into triage.
    ///
    /// Happens when the triage form is opened for the patient, not only on
    /// submit. Re-entry for a patient already in triage is a no-op; any
    /// later stage is a state error.
    pub async fn begin_triage(&self, patient_id: &str) -> ClinicResult<Patient> {
        let mut patient = self.require_patient(patient_id).await?;
        match patient.status {
            PatientStatus::Waiting => {
                self.store
                    .set_patient_status(patient_id, PatientStatus::InTriage)
                    .await?;
                patient.status = PatientStatus::InTriage;
                tracing::info!(patient_id, "triage started");
                Ok(patient)
            }
            PatientStatus::InTriage => Ok(patient),
            other => Err(ClinicError::InvalidState(format!(
                "cannot begin triage for patient {patient_id} with status {other}"
            ))),
        }
    }

    /// Stores a triage assessment and advances the patient to
    /// `in-consultation`.
    ///
    /// A direct submission for a still-waiting patient passes through
    /// `in-triage` first, exactly as if the form had been opened. A second
    /// submission replaces the first (last write wins); only `completed`
    /// patients are off limits.
    pub async fn submit_triage(&self, input: TriageInput) -> ClinicResult<TriageRecord> {
        validation::validate_triage(&input)?;
        let patient = self.require_patient(&input.patient_id).await?;

        if patient.status == PatientStatus::Completed {
            return Err(ClinicError::InvalidState(format!(
                "patient {} has already completed the workflow",
                input.patient_id
            )));
        }
        if patient.status == PatientStatus::Waiting {
            self.store
                .set_patient_status(&input.patient_id, PatientStatus::InTriage)
                .await?;
        }

        let record = TriageRecord::from_input(input, Utc::now());
        self.store.upsert_triage(record.clone()).await?;
        self.store
            .set_patient_status(&record.patient_id, PatientStatus::InConsultation)
            .await?;
        tracing::info!(
            patient_id = %record.patient_id,
            glasgow_total = record.glasgow_total,
            "triage stored, patient ready for consultation"
        );
        Ok(record)
    }

    /// Stores a consultation and advances the patient to `completed`.
    ///
    /// The submission is merged over the canonical defaults, so a record
    /// with only the doctor's name is still total.
    pub async fn submit_consultation(
        &self,
        input: ConsultationInput,
    ) -> ClinicResult<ConsultationRecord> {
        validation::validate_consultation(&input)?;
        self.require_patient(&input.patient_id).await?;

        let record = ConsultationRecord::from_input(input, Utc::now());
        self.store.upsert_consultation(record.clone()).await?;
        self.store
            .set_patient_status(&record.patient_id, PatientStatus::Completed)
            .await?;
        tracing::info!(patient_id = %record.patient_id, "consultation stored, workflow completed");
        Ok(record)
    }

    /// Records an administered medication for a completed patient.
    ///
    /// Medication is prescribed during consultation, so administering with
    /// no consultation on file is a usage error. Does not change status.
    pub async fn administer_medication(
        &self,
        input: MedicationInput,
    ) -> ClinicResult<MedicationRecord> {
        validation::validate_medication(&input)?;
        let patient = self.require_patient(&input.patient_id).await?;

        if self
            .store
            .consultation_by_patient(&input.patient_id)
            .await?
            .is_none()
        {
            return Err(ClinicError::ConsultationMissing(input.patient_id));
        }
        if patient.status != PatientStatus::Completed {
            return Err(ClinicError::InvalidState(format!(
                "patient {} has not completed consultation",
                input.patient_id
            )));
        }

        let record = MedicationRecord::from_input(input, Utc::now());
        self.store.add_medication(record.clone()).await?;
        tracing::info!(
            patient_id = %record.patient_id,
            nurse = %record.administering_nurse,
            "medication recorded"
        );
        Ok(record)
    }

    /// Administrative status override.
    ///
    /// Escape hatch outside the guaranteed stage sequence; the stage
    /// operations above are the supported path.
    pub async fn set_status(&self, patient_id: &str, status: PatientStatus) -> ClinicResult<()> {
        self.store.set_patient_status(patient_id, status).await?;
        tracing::info!(patient_id, status = %status, "status overridden");
        Ok(())
    }

    /// Patients currently at `stage`, most recently registered first.
    pub async fn patients_by_stage(&self, stage: PatientStatus) -> ClinicResult<Vec<Patient>> {
        self.store.list_patients_by_status(stage).await
    }

    pub async fn patient_by_id(&self, id: &str) -> ClinicResult<Option<Patient>> {
        self.store.get_patient(id).await
    }

    pub async fn triage_of(&self, patient_id: &str) -> ClinicResult<Option<TriageRecord>> {
        self.store.triage_by_patient(patient_id).await
    }

    pub async fn consultation_of(
        &self,
        patient_id: &str,
    ) -> ClinicResult<Option<ConsultationRecord>> {
        self.store.consultation_by_patient(patient_id).await
    }

    pub async fn medications_of(&self, patient_id: &str) -> ClinicResult<Vec<MedicationRecord>> {
        self.store.medications_by_patient(patient_id).await
    }

    /// Compiles the current workflow report from store snapshots.
    pub async fn report(&self) -> ClinicResult<WorkflowReport> {
        let patients = self.store.list_patients().await?;
        let triage_records = self.store.list_triage_records().await?;
        Ok(WorkflowReport::compile(&patients, &triage_records))
    }

    async fn require_patient(&self, id: &str) -> ClinicResult<Patient> {
        self.store
            .get_patient(id)
            .await?
            .ok_or_else(|| ClinicError::PatientNotFound(id.to_owned()))
    }
}
