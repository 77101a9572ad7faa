//! Clinical record persistence.
//!
//! [`RecordStore`] is the uniform contract over the four entity kinds.
//! Backends are swappable behind `Arc<dyn RecordStore>`; which one runs is
//! decided once at startup by [`crate::config::CoreConfig`].
//!
//! Every operation resolves to a [`ClinicResult`]: backends report
//! failures as error descriptors and never panic across this boundary.
//! Record lookups return `Option`: a patient who has not reached a stage
//! yet simply has no record there, which is not an error.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::consultation::ConsultationRecord;
use crate::error::ClinicResult;
use crate::medication::MedicationRecord;
use crate::patient::{NewPatient, Patient, PatientStatus};
use crate::triage::TriageRecord;
use async_trait::async_trait;

/// Durable CRUD over patients, triage, consultations, and medications.
///
/// Status changes go through [`set_patient_status`](Self::set_patient_status)
/// and nowhere else; record writes never touch the patient's status. The
/// workflow engine owns the write-then-transition sequence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Registers a patient: assigns an id, stamps the registration date,
    /// and starts the workflow at `waiting`. Returns the stored patient.
    async fn create_patient(&self, new: NewPatient) -> ClinicResult<Patient>;

    /// All patients, in no guaranteed order.
    async fn list_patients(&self) -> ClinicResult<Vec<Patient>>;

    /// Patients with exactly `status`, most recently registered first.
    async fn list_patients_by_status(&self, status: PatientStatus)
        -> ClinicResult<Vec<Patient>>;

    async fn get_patient(&self, id: &str) -> ClinicResult<Option<Patient>>;

    /// Idempotent overwrite of the status field.
    ///
    /// # Errors
    ///
    /// [`crate::ClinicError::PatientNotFound`] if no such patient exists.
    async fn set_patient_status(&self, id: &str, status: PatientStatus) -> ClinicResult<()>;

    /// Writes the triage record keyed by its `patient_id`, replacing any
    /// previous one (last write wins). Fails with `PatientNotFound` rather
    /// than storing a record for an unknown patient.
    async fn upsert_triage(&self, record: TriageRecord) -> ClinicResult<()>;

    async fn triage_by_patient(&self, patient_id: &str) -> ClinicResult<Option<TriageRecord>>;

    /// All triage records, in no guaranteed order.
    async fn list_triage_records(&self) -> ClinicResult<Vec<TriageRecord>>;

    /// Same contract as [`upsert_triage`](Self::upsert_triage), for the
    /// consultation record.
    async fn upsert_consultation(&self, record: ConsultationRecord) -> ClinicResult<()>;

    async fn consultation_by_patient(
        &self,
        patient_id: &str,
    ) -> ClinicResult<Option<ConsultationRecord>>;

    /// Appends a medication record; a patient accumulates any number of
    /// them. Fails with `PatientNotFound` for an unknown patient.
    async fn add_medication(&self, record: MedicationRecord) -> ClinicResult<()>;

    /// Medications for one patient, oldest first.
    async fn medications_by_patient(
        &self,
        patient_id: &str,
    ) -> ClinicResult<Vec<MedicationRecord>>;
}
