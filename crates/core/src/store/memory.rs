//! In-memory record store.
//!
//! One map per entity kind behind `tokio::sync::RwLock`, lifetime =
//! application startup to shutdown. The store object is passed around
//! explicitly; there are no process-wide statics.

use super::RecordStore;
use crate::consultation::ConsultationRecord;
use crate::error::{ClinicError, ClinicResult};
use crate::medication::MedicationRecord;
use crate::patient::{NewPatient, Patient, PatientStatus};
use crate::triage::TriageRecord;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: RwLock<HashMap<String, Patient>>,
    triage: RwLock<HashMap<String, TriageRecord>>,
    consultations: RwLock<HashMap<String, ConsultationRecord>>,
    medications: RwLock<HashMap<String, Vec<MedicationRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn ensure_patient_exists(&self, patient_id: &str) -> ClinicResult<()> {
        let patients = self.patients.read().await;
        if patients.contains_key(patient_id) {
            Ok(())
        } else {
            Err(ClinicError::PatientNotFound(patient_id.to_owned()))
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_patient(&self, new: NewPatient) -> ClinicResult<Patient> {
        let patient = Patient::register(new, Utc::now());
        let mut patients = self.patients.write().await;
        patients.insert(patient.id.clone(), patient.clone());
        Ok(patient)
    }

    async fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        let patients = self.patients.read().await;
        Ok(patients.values().cloned().collect())
    }

    async fn list_patients_by_status(
        &self,
        status: PatientStatus,
    ) -> ClinicResult<Vec<Patient>> {
        let patients = self.patients.read().await;
        let mut matching: Vec<Patient> = patients
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
        Ok(matching)
    }

    async fn get_patient(&self, id: &str) -> ClinicResult<Option<Patient>> {
        let patients = self.patients.read().await;
        Ok(patients.get(id).cloned())
    }

    async fn set_patient_status(&self, id: &str, status: PatientStatus) -> ClinicResult<()> {
        let mut patients = self.patients.write().await;
        let patient = patients
            .get_mut(id)
            .ok_or_else(|| ClinicError::PatientNotFound(id.to_owned()))?;
        patient.status = status;
        Ok(())
    }

    async fn upsert_triage(&self, record: TriageRecord) -> ClinicResult<()> {
        self.ensure_patient_exists(&record.patient_id).await?;
        let mut triage = self.triage.write().await;
        triage.insert(record.patient_id.clone(), record);
        Ok(())
    }

    async fn triage_by_patient(&self, patient_id: &str) -> ClinicResult<Option<TriageRecord>> {
        let triage = self.triage.read().await;
        Ok(triage.get(patient_id).cloned())
    }

    async fn list_triage_records(&self) -> ClinicResult<Vec<TriageRecord>> {
        let triage = self.triage.read().await;
        Ok(triage.values().cloned().collect())
    }

    async fn upsert_consultation(&self, record: ConsultationRecord) -> ClinicResult<()> {
        self.ensure_patient_exists(&record.patient_id).await?;
        let mut consultations = self.consultations.write().await;
        consultations.insert(record.patient_id.clone(), record);
        Ok(())
    }

    async fn consultation_by_patient(
        &self,
        patient_id: &str,
    ) -> ClinicResult<Option<ConsultationRecord>> {
        let consultations = self.consultations.read().await;
        Ok(consultations.get(patient_id).cloned())
    }

    async fn add_medication(&self, record: MedicationRecord) -> ClinicResult<()> {
        self.ensure_patient_exists(&record.patient_id).await?;
        let mut medications = self.medications.write().await;
        medications
            .entry(record.patient_id.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn medications_by_patient(
        &self,
        patient_id: &str,
    ) -> ClinicResult<Vec<MedicationRecord>> {
        let medications = self.medications.read().await;
        let mut records = medications.get(patient_id).cloned().unwrap_or_default();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consultation::ConsultationInput;
    use crate::medication::MedicationInput;
    use crate::patient::Gender;
    use crate::triage::{GlasgowScore, PriorityLevel, PupilReactivity, TriageInput};
    use chrono::NaiveDate;
    use medflow_types::Cpf;

    fn new_patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.into(),
            birth_date: NaiveDate::from_ymd_opt(1985, 6, 20).unwrap(),
            gender: Gender::F,
            cpf: Cpf::parse("987.654.321-00").unwrap(),
            phone: "(11) 91234-5678".into(),
            address: "Av. Paulista, 1000".into(),
            health_insurance: None,
            emergency_contact: None,
        }
    }

    fn triage_record(patient_id: &str) -> TriageRecord {
        TriageRecord::from_input(
            TriageInput {
                patient_id: patient_id.into(),
                blood_pressure: "120/80".into(),
                heart_rate: 80,
                respiratory_rate: 15,
                oxygen_saturation: 97,
                temperature: 36.8,
                glucose: None,
                glasgow: GlasgowScore {
                    ocular_opening: 4,
                    verbal_response: 5,
                    motor_response: 6,
                },
                pupil_reactivity: PupilReactivity::Bilateral,
                pain_level: 1,
                main_complaints: "tosse seca".into(),
                allergies: String::new(),
                regular_medication: String::new(),
                notes: String::new(),
                priority_level: PriorityLevel::Low,
                triage_by: "Enf. Costa".into(),
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn create_patient_assigns_waiting_status() {
        let store = MemoryStore::new();
        let patient = store.create_patient(new_patient("Maria")).await.unwrap();

        assert_eq!(patient.status, PatientStatus::Waiting);
        assert!(patient.registration_date <= Utc::now());

        let fetched = store.get_patient(&patient.id).await.unwrap();
        assert_eq!(fetched, Some(patient));
    }

    #[tokio::test]
    async fn list_by_status_matches_filtered_full_list() {
        let store = MemoryStore::new();
        let a = store.create_patient(new_patient("A")).await.unwrap();
        let _b = store.create_patient(new_patient("B")).await.unwrap();
        store
            .set_patient_status(&a.id, PatientStatus::InTriage)
            .await
            .unwrap();

        let all = store.list_patients().await.unwrap();
        for status in PatientStatus::ALL {
            let bucket = store.list_patients_by_status(status).await.unwrap();
            let expected: Vec<&Patient> = all.iter().filter(|p| p.status == status).collect();
            assert_eq!(bucket.len(), expected.len(), "status {status}");
            assert!(bucket.iter().all(|p| p.status == status));
        }
    }

    #[tokio::test]
    async fn list_by_status_orders_most_recent_first() {
        let store = MemoryStore::new();
        let first = store.create_patient(new_patient("Primeira")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store.create_patient(new_patient("Segunda")).await.unwrap();

        let waiting = store
            .list_patients_by_status(PatientStatus::Waiting)
            .await
            .unwrap();
        assert_eq!(waiting.len(), 2);
        assert!(waiting[0].registration_date >= waiting[1].registration_date);
        assert_eq!(waiting[0].id, second.id);
        assert_eq!(waiting[1].id, first.id);
    }

    #[tokio::test]
    async fn set_status_rejects_unknown_patient() {
        let store = MemoryStore::new();
        let err = store
            .set_patient_status("missing", PatientStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, ClinicError::PatientNotFound(_)));
    }

    #[tokio::test]
    async fn triage_upsert_overwrites_previous_record() {
        let store = MemoryStore::new();
        let patient = store.create_patient(new_patient("Ana")).await.unwrap();

        let mut first = triage_record(&patient.id);
        first.heart_rate = 80;
        store.upsert_triage(first).await.unwrap();

        let mut second = triage_record(&patient.id);
        second.heart_rate = 120;
        store.upsert_triage(second.clone()).await.unwrap();

        let stored = store.triage_by_patient(&patient.id).await.unwrap();
        assert_eq!(stored, Some(second));
    }

    #[tokio::test]
    async fn triage_upsert_rejects_unknown_patient() {
        let store = MemoryStore::new();
        let err = store.upsert_triage(triage_record("missing")).await.unwrap_err();
        assert!(matches!(err, ClinicError::PatientNotFound(_)));
    }

    #[tokio::test]
    async fn triage_lookup_returns_none_before_submission() {
        let store = MemoryStore::new();
        let patient = store.create_patient(new_patient("Ana")).await.unwrap();
        assert_eq!(store.triage_by_patient(&patient.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn consultation_round_trips() {
        let store = MemoryStore::new();
        let patient = store.create_patient(new_patient("Ana")).await.unwrap();

        let record = ConsultationRecord::from_input(
            ConsultationInput::minimal(&patient.id, "Dr. Souza"),
            Utc::now(),
        );
        store.upsert_consultation(record.clone()).await.unwrap();

        let stored = store.consultation_by_patient(&patient.id).await.unwrap();
        assert_eq!(stored, Some(record));
    }

    #[tokio::test]
    async fn medications_append_and_list_oldest_first() {
        let store = MemoryStore::new();
        let patient = store.create_patient(new_patient("Ana")).await.unwrap();

        for nurse in ["1", "2"] {
            let record = MedicationRecord::from_input(
                MedicationInput {
                    patient_id: patient.id.clone(),
                    administering_nurse: nurse.into(),
                    special_instructions: None,
                },
                Utc::now(),
            );
            store.add_medication(record).await.unwrap();
        }

        let records = store.medications_by_patient(&patient.id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].administering_nurse, "1");
        assert_eq!(records[1].administering_nurse, "2");
        assert!(records[0].created_at <= records[1].created_at);
    }
}
