//! Read-side patient projections.
//!
//! The directory presents the four status buckets and the full list without
//! re-deriving any workflow logic: every call re-reads the store, so each
//! successful engine mutation is visible to the next read.

use crate::error::ClinicResult;
use crate::patient::{Patient, PatientStatus};
use crate::store::RecordStore;
use serde::Serialize;
use std::sync::Arc;

/// Lookup and filter views over the patient population.
#[derive(Clone)]
pub struct PatientDirectory {
    store: Arc<dyn RecordStore>,
}

/// All four stage buckets at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct DirectorySnapshot {
    pub waiting: Vec<Patient>,
    pub in_triage: Vec<Patient>,
    pub in_consultation: Vec<Patient>,
    pub completed: Vec<Patient>,
}

impl PatientDirectory {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All patients, in no guaranteed order.
    pub async fn all(&self) -> ClinicResult<Vec<Patient>> {
        self.store.list_patients().await
    }

    pub async fn find(&self, id: &str) -> ClinicResult<Option<Patient>> {
        self.store.get_patient(id).await
    }

    /// Patients at exactly `status`, most recently registered first.
    pub async fn by_status(&self, status: PatientStatus) -> ClinicResult<Vec<Patient>> {
        self.store.list_patients_by_status(status).await
    }

    pub async fn waiting(&self) -> ClinicResult<Vec<Patient>> {
        self.by_status(PatientStatus::Waiting).await
    }

    pub async fn in_triage(&self) -> ClinicResult<Vec<Patient>> {
        self.by_status(PatientStatus::InTriage).await
    }

    pub async fn in_consultation(&self) -> ClinicResult<Vec<Patient>> {
        self.by_status(PatientStatus::InConsultation).await
    }

    pub async fn completed(&self) -> ClinicResult<Vec<Patient>> {
        self.by_status(PatientStatus::Completed).await
    }

    /// All four buckets in one pass, for dashboard-style consumers.
    pub async fn snapshot(&self) -> ClinicResult<DirectorySnapshot> {
        Ok(DirectorySnapshot {
            waiting: self.waiting().await?,
            in_triage: self.in_triage().await?,
            in_consultation: self.in_consultation().await?,
            completed: self.completed().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{Gender, IntakeInput};
    use crate::store::MemoryStore;
    use crate::workflow::WorkflowEngine;

    fn intake(name: &str, cpf: &str) -> IntakeInput {
        IntakeInput {
            name: name.into(),
            birth_date: "1975-07-30".into(),
            gender: Gender::O,
            cpf: cpf.into(),
            phone: "(31) 98888-7777".into(),
            address: "Praça da Liberdade, 10".into(),
            health_insurance: None,
            emergency_contact: None,
        }
    }

    #[tokio::test]
    async fn buckets_reflect_engine_mutations_immediately() {
        let store = Arc::new(MemoryStore::new());
        let engine = WorkflowEngine::new(store.clone());
        let directory = PatientDirectory::new(store);

        let patient = engine
            .admit_patient(intake("Paciente Um", "111.111.111-11"))
            .await
            .unwrap();
        assert_eq!(directory.waiting().await.unwrap().len(), 1);
        assert!(directory.in_triage().await.unwrap().is_empty());

        engine.begin_triage(&patient.id).await.unwrap();
        assert!(directory.waiting().await.unwrap().is_empty());
        assert_eq!(directory.in_triage().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn snapshot_partitions_all_patients() {
        let store = Arc::new(MemoryStore::new());
        let engine = WorkflowEngine::new(store.clone());
        let directory = PatientDirectory::new(store);

        engine
            .admit_patient(intake("Paciente Um", "111.111.111-11"))
            .await
            .unwrap();
        let second = engine
            .admit_patient(intake("Paciente Dois", "222.222.222-22"))
            .await
            .unwrap();
        engine.begin_triage(&second.id).await.unwrap();

        let snapshot = directory.snapshot().await.unwrap();
        assert_eq!(snapshot.waiting.len(), 1);
        assert_eq!(snapshot.in_triage.len(), 1);
        assert!(snapshot.in_consultation.is_empty());
        assert!(snapshot.completed.is_empty());
        assert_eq!(directory.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_id() {
        let directory = PatientDirectory::new(Arc::new(MemoryStore::new()));
        assert_eq!(directory.find("missing").await.unwrap(), None);
    }
}
