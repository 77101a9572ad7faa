//! File-backed record store.
//!
//! One JSON document per record under a flat per-entity layout:
//!
//! ```text
//! <root>/
//!   patients/<patient_id>.json
//!   triage/<patient_id>.json
//!   consultations/<patient_id>.json
//!   medications/<patient_id>/<record_id>.json
//! ```
//!
//! Listing skips unreadable or unparsable documents with a warning instead
//! of failing the whole operation, so one corrupt file never hides the rest
//! of the data set.

use super::RecordStore;
use crate::consultation::ConsultationRecord;
use crate::error::{ClinicError, ClinicResult};
use crate::medication::MedicationRecord;
use crate::patient::{NewPatient, Patient, PatientStatus};
use crate::triage::TriageRecord;
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const PATIENTS_DIR: &str = "patients";
const TRIAGE_DIR: &str = "triage";
const CONSULTATIONS_DIR: &str = "consultations";
const MEDICATIONS_DIR: &str = "medications";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the entity directories if
    /// they do not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> ClinicResult<Self> {
        let root = root.into();
        for dir in [PATIENTS_DIR, TRIAGE_DIR, CONSULTATIONS_DIR, MEDICATIONS_DIR] {
            fs::create_dir_all(root.join(dir)).map_err(ClinicError::RecordDirCreation)?;
        }
        Ok(Self { root })
    }

    fn patient_path(&self, id: &str) -> PathBuf {
        self.root.join(PATIENTS_DIR).join(format!("{id}.json"))
    }

    fn triage_path(&self, patient_id: &str) -> PathBuf {
        self.root.join(TRIAGE_DIR).join(format!("{patient_id}.json"))
    }

    fn consultation_path(&self, patient_id: &str) -> PathBuf {
        self.root
            .join(CONSULTATIONS_DIR)
            .join(format!("{patient_id}.json"))
    }

    fn medications_dir(&self, patient_id: &str) -> PathBuf {
        self.root.join(MEDICATIONS_DIR).join(patient_id)
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> ClinicResult<()> {
        let json = serde_json::to_string_pretty(value).map_err(ClinicError::Serialization)?;
        fs::write(path, json).map_err(ClinicError::FileWrite)
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> ClinicResult<Option<T>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClinicError::FileRead(e)),
        };
        let value = serde_json::from_str(&contents).map_err(ClinicError::Deserialization)?;
        Ok(Some(value))
    }

    /// Reads every `.json` document in `dir`, skipping entries that cannot
    /// be read or parsed.
    fn read_all<T: DeserializeOwned>(dir: &Path) -> ClinicResult<Vec<T>> {
        let entries = match fs::read_dir(dir) {
            Ok(it) => it,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ClinicError::FileRead(e)),
        };

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!("failed to read record: {} - {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_str::<T>(&contents) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("failed to parse record: {} - {}", path.display(), e);
                }
            }
        }
        Ok(records)
    }

    fn require_patient(&self, patient_id: &str) -> ClinicResult<Patient> {
        Self::read_json::<Patient>(&self.patient_path(patient_id))?
            .ok_or_else(|| ClinicError::PatientNotFound(patient_id.to_owned()))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn create_patient(&self, new: NewPatient) -> ClinicResult<Patient> {
        let patient = Patient::register(new, Utc::now());
        Self::write_json(&self.patient_path(&patient.id), &patient)?;
        Ok(patient)
    }

    async fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        Self::read_all(&self.root.join(PATIENTS_DIR))
    }

    async fn list_patients_by_status(
        &self,
        status: PatientStatus,
    ) -> ClinicResult<Vec<Patient>> {
        let mut matching: Vec<Patient> = Self::read_all::<Patient>(&self.root.join(PATIENTS_DIR))?
            .into_iter()
            .filter(|p| p.status == status)
            .collect();
        matching.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
        Ok(matching)
    }

    async fn get_patient(&self, id: &str) -> ClinicResult<Option<Patient>> {
        Self::read_json(&self.patient_path(id))
    }

    async fn set_patient_status(&self, id: &str, status: PatientStatus) -> ClinicResult<()> {
        let mut patient = self.require_patient(id)?;
        patient.status = status;
        Self::write_json(&self.patient_path(id), &patient)
    }

    async fn upsert_triage(&self, record: TriageRecord) -> ClinicResult<()> {
        self.require_patient(&record.patient_id)?;
        Self::write_json(&self.triage_path(&record.patient_id), &record)
    }

    async fn triage_by_patient(&self, patient_id: &str) -> ClinicResult<Option<TriageRecord>> {
        Self::read_json(&self.triage_path(patient_id))
    }

    async fn list_triage_records(&self) -> ClinicResult<Vec<TriageRecord>> {
        Self::read_all(&self.root.join(TRIAGE_DIR))
    }

    async fn upsert_consultation(&self, record: ConsultationRecord) -> ClinicResult<()> {
        self.require_patient(&record.patient_id)?;
        Self::write_json(&self.consultation_path(&record.patient_id), &record)
    }

    async fn consultation_by_patient(
        &self,
        patient_id: &str,
    ) -> ClinicResult<Option<ConsultationRecord>> {
        Self::read_json(&self.consultation_path(patient_id))
    }

    async fn add_medication(&self, record: MedicationRecord) -> ClinicResult<()> {
        self.require_patient(&record.patient_id)?;
        let dir = self.medications_dir(&record.patient_id);
        fs::create_dir_all(&dir).map_err(ClinicError::RecordDirCreation)?;
        Self::write_json(&dir.join(format!("{}.json", record.id)), &record)
    }

    async fn medications_by_patient(
        &self,
        patient_id: &str,
    ) -> ClinicResult<Vec<MedicationRecord>> {
        let mut records: Vec<MedicationRecord> =
            Self::read_all(&self.medications_dir(patient_id))?;
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
    use std::fs;
    use tempfile::TempDir;

    fn new_patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.into(),
            birth_date: NaiveDate::from_ymd_opt(1972, 3, 9).unwrap(),
            gender: Gender::M,
            cpf: Cpf::parse("123.456.789-00").unwrap(),
            phone: "(21) 99876-5432".into(),
            address: "Rua das Flores, 123".into(),
            health_insurance: Some("Unimed".into()),
            emergency_contact: None,
        }
    }

    fn triage_record(patient_id: &str) -> TriageRecord {
        TriageRecord::from_input(
            TriageInput {
                patient_id: patient_id.into(),
                blood_pressure: "130/85".into(),
                heart_rate: 92,
                respiratory_rate: 18,
                oxygen_saturation: 95,
                temperature: 37.2,
                glucose: Some(110),
                glasgow: GlasgowScore {
                    ocular_opening: 4,
                    verbal_response: 4,
                    motor_response: 6,
                },
                pupil_reactivity: PupilReactivity::Unilateral,
                pain_level: 6,
                main_complaints: "dor torácica".into(),
                allergies: "dipirona".into(),
                regular_medication: "losartana".into(),
                notes: String::new(),
                priority_level: PriorityLevel::High,
                triage_by: "Enf. Ribeiro".into(),
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn patient_survives_reopen() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let patient = {
            let store = FileStore::open(temp_dir.path()).expect("open should succeed");
            store.create_patient(new_patient("Carlos")).await.unwrap()
        };

        let reopened = FileStore::open(temp_dir.path()).expect("reopen should succeed");
        let fetched = reopened.get_patient(&patient.id).await.unwrap();
        assert_eq!(fetched, Some(patient));
    }

    #[tokio::test]
    async fn triage_round_trips_field_by_field() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).unwrap();
        let patient = store.create_patient(new_patient("Carlos")).await.unwrap();

        let record = triage_record(&patient.id);
        store.upsert_triage(record.clone()).await.unwrap();

        let stored = store.triage_by_patient(&patient.id).await.unwrap();
        assert_eq!(stored, Some(record));
    }

    #[tokio::test]
    async fn consultation_round_trips_field_by_field() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).unwrap();
        let patient = store.create_patient(new_patient("Carlos")).await.unwrap();

        let mut input = ConsultationInput::minimal(&patient.id, "Dra. Lima");
        input.cid = Some("J45".into());
        input.prescription = Some("salbutamol inalatório".into());
        let record = ConsultationRecord::from_input(input, Utc::now());
        store.upsert_consultation(record.clone()).await.unwrap();

        let stored = store.consultation_by_patient(&patient.id).await.unwrap();
        assert_eq!(stored, Some(record));
    }

    #[tokio::test]
    async fn record_writes_reject_unknown_patient() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).unwrap();

        let err = store.upsert_triage(triage_record("missing")).await.unwrap_err();
        assert!(matches!(err, ClinicError::PatientNotFound(_)));

        let err = store
            .set_patient_status("missing", PatientStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, ClinicError::PatientNotFound(_)));
    }

    #[tokio::test]
    async fn status_overwrite_persists() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).unwrap();
        let patient = store.create_patient(new_patient("Carlos")).await.unwrap();

        store
            .set_patient_status(&patient.id, PatientStatus::InTriage)
            .await
            .unwrap();
        // Idempotent overwrite.
        store
            .set_patient_status(&patient.id, PatientStatus::InTriage)
            .await
            .unwrap();

        let fetched = store.get_patient(&patient.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, PatientStatus::InTriage);
        assert_eq!(fetched.registration_date, patient.registration_date);
    }

    #[tokio::test]
    async fn listing_skips_corrupt_documents() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).unwrap();
        store.create_patient(new_patient("Carlos")).await.unwrap();

        fs::write(
            temp_dir.path().join(PATIENTS_DIR).join("broken.json"),
            "{ not json",
        )
        .unwrap();

        let patients = store.list_patients().await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "Carlos");
    }

    #[tokio::test]
    async fn medications_accumulate_per_patient() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).unwrap();
        let patient = store.create_patient(new_patient("Carlos")).await.unwrap();

        for (nurse, instructions) in [("1", None), ("3", Some("jejum".to_string()))] {
            let record = MedicationRecord::from_input(
                MedicationInput {
                    patient_id: patient.id.clone(),
                    administering_nurse: nurse.into(),
                    special_instructions: instructions,
                },
                Utc::now(),
            );
            store.add_medication(record).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let records = store.medications_by_patient(&patient.id).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].administering_nurse, "1");
        assert_eq!(records[1].special_instructions, Some("jejum".into()));

        // A patient with no medications has an empty history, not an error.
        let other = store.create_patient(new_patient("Outra")).await.unwrap();
        assert!(store.medications_by_patient(&other.id).await.unwrap().is_empty());
    }
}
