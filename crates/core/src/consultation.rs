//! Physician consultation: the structured exam form and its default-fill
//! policy.
//!
//! The consultation form is large and almost entirely optional. A partial
//! submission is merged over [`ConsultationRecord::defaulted`], so the
//! persisted record is always total: every section is present, with each
//! section's canonical "normal" flag set and everything else cleared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall clinical impression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum GeneralState {
    #[serde(rename = "BEG")]
    Beg,
    #[serde(rename = "REG")]
    Reg,
    #[serde(rename = "MEG")]
    Meg,
}

/// Diabetes classification, recorded when `has_diabetes` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DiabetesType {
    Type1,
    Type2,
}

/// Skin examination findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SkinFindings {
    pub normal: bool,
    pub pallor: bool,
    pub jaundice: bool,
    pub cyanosis: bool,
    pub no_changes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Default for SkinFindings {
    fn default() -> Self {
        SkinFindings {
            normal: true,
            pallor: false,
            jaundice: false,
            cyanosis: false,
            no_changes: false,
            detail: None,
        }
    }
}

/// Oropharynx examination findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OropharynxFindings {
    pub normal: bool,
    pub altered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Default for OropharynxFindings {
    fn default() -> Self {
        OropharynxFindings {
            normal: true,
            altered: false,
            detail: None,
        }
    }
}

/// Cardiovascular examination findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CardiovascularFindings {
    pub normal_rhythm: bool,
    pub altered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Default for CardiovascularFindings {
    fn default() -> Self {
        CardiovascularFindings {
            normal_rhythm: true,
            altered: false,
            detail: None,
        }
    }
}

/// Respiratory examination findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RespiratoryFindings {
    pub normal: bool,
    pub altered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Default for RespiratoryFindings {
    fn default() -> Self {
        RespiratoryFindings {
            normal: true,
            altered: false,
            detail: None,
        }
    }
}

/// Abdomen examination findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AbdomenFindings {
    pub flat: bool,
    pub globose: bool,
    pub excavated: bool,
    pub flaccid: bool,
    pub tense: bool,
    pub painful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Default for AbdomenFindings {
    fn default() -> Self {
        AbdomenFindings {
            flat: true,
            globose: false,
            excavated: false,
            flaccid: false,
            tense: false,
            painful: false,
            detail: None,
        }
    }
}

/// Limb examination findings, used for both upper and lower limbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LimbFindings {
    pub normal: bool,
    pub altered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Default for LimbFindings {
    fn default() -> Self {
        LimbFindings {
            normal: true,
            altered: false,
            detail: None,
        }
    }
}

/// Neurological state at examination time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NeurologicalState {
    pub lucid: bool,
    pub oriented: bool,
    pub disoriented: bool,
    pub drowsy: bool,
    pub comatose: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Default for NeurologicalState {
    fn default() -> Self {
        NeurologicalState {
            lucid: true,
            oriented: true,
            disoriented: false,
            drowsy: false,
            comatose: false,
            detail: None,
        }
    }
}

/// Outcome conduct chosen by the physician (multi-select).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Conduct {
    pub discharge: bool,
    pub observation: bool,
    pub hospitalization: bool,
    pub medical_leave: bool,
}

impl Default for Conduct {
    fn default() -> Self {
        Conduct {
            discharge: true,
            observation: false,
            hospitalization: false,
            medical_leave: false,
        }
    }
}

/// A completed consultation, keyed by patient.
///
/// At most one per patient; a resubmission replaces the previous record.
/// Every field is total; see the module docs for the default-fill policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConsultationRecord {
    pub patient_id: String,

    pub has_allergies: bool,
    pub allergies: String,
    pub main_complaint: String,
    pub current_disease_history: String,
    pub has_hypertension: bool,
    pub has_diabetes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diabetes_type: Option<DiabetesType>,
    pub has_dyslipidemia: bool,
    pub has_smoking: bool,
    pub has_pregnancy: bool,
    pub other_comorbidities: String,
    pub continuous_medication: String,

    pub general_state: GeneralState,
    pub skin: SkinFindings,
    pub oropharynx: OropharynxFindings,
    pub cardiovascular: CardiovascularFindings,
    pub respiratory: RespiratoryFindings,
    pub abdomen: AbdomenFindings,
    pub upper_limbs: LimbFindings,
    pub lower_limbs: LimbFindings,
    pub neurological_state: NeurologicalState,

    pub active_bleeding_visible: bool,
    pub glasgow_score: u8,
    /// Consultation-time re-check, free text as dictated.
    pub blood_pressure: String,
    pub heart_rate: String,
    pub respiratory_rate: String,

    /// Diagnosis code (Brazilian ICD usage).
    pub cid: String,
    pub conduct: Conduct,
    pub prescription: String,

    /// `HH:MM:SS`, defaults to the moment the record is written.
    pub medical_time: String,
    pub doctor_name: String,
    pub nursing_technician: String,
    /// Set once when the record is written.
    pub consultation_date: DateTime<Utc>,

    pub symptoms: String,
    pub diagnosis: String,
    pub treatment: String,
    pub exams: String,
    pub notes: String,
    pub follow_up: String,
}

impl ConsultationRecord {
    /// The canonical fully-defaulted record for `patient_id` at `now`.
    ///
    /// This is the single source of the default-fill policy: every boolean
    /// flag is false except each section's "normal" flag, `general_state`
    /// is BEG, the Glasgow score is 15, conduct is discharge, and all free
    /// text is empty.
    pub fn defaulted(patient_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        ConsultationRecord {
            patient_id: patient_id.into(),
            has_allergies: false,
            allergies: String::new(),
            main_complaint: String::new(),
            current_disease_history: String::new(),
            has_hypertension: false,
            has_diabetes: false,
            diabetes_type: None,
            has_dyslipidemia: false,
            has_smoking: false,
            has_pregnancy: false,
            other_comorbidities: String::new(),
            continuous_medication: String::new(),
            general_state: GeneralState::Beg,
            skin: SkinFindings::default(),
            oropharynx: OropharynxFindings::default(),
            cardiovascular: CardiovascularFindings::default(),
            respiratory: RespiratoryFindings::default(),
            abdomen: AbdomenFindings::default(),
            upper_limbs: LimbFindings::default(),
            lower_limbs: LimbFindings::default(),
            neurological_state: NeurologicalState::default(),
            active_bleeding_visible: false,
            glasgow_score: 15,
            blood_pressure: String::new(),
            heart_rate: String::new(),
            respiratory_rate: String::new(),
            cid: String::new(),
            conduct: Conduct::default(),
            prescription: String::new(),
            medical_time: now.format("%H:%M:%S").to_string(),
            doctor_name: String::new(),
            nursing_technician: String::new(),
            consultation_date: now,
            symptoms: String::new(),
            diagnosis: String::new(),
            treatment: String::new(),
            exams: String::new(),
            notes: String::new(),
            follow_up: String::new(),
        }
    }

    /// Merges a validated submission over the canonical defaults.
    ///
    /// `main_complaint` falls back to the legacy `symptoms` field when the
    /// caller only supplies the old name; both are persisted.
    pub fn from_input(input: ConsultationInput, now: DateTime<Utc>) -> Self {
        let mut record = Self::defaulted(input.patient_id, now);

        let symptoms = input.symptoms.unwrap_or_default();
        record.main_complaint = match input.main_complaint {
            Some(complaint) if !complaint.is_empty() => complaint,
            _ => symptoms.clone(),
        };
        record.symptoms = symptoms;

        if let Some(v) = input.has_allergies {
            record.has_allergies = v;
        }
        if let Some(v) = input.allergies {
            record.allergies = v;
        }
        if let Some(v) = input.current_disease_history {
            record.current_disease_history = v;
        }
        if let Some(v) = input.has_hypertension {
            record.has_hypertension = v;
        }
        if let Some(v) = input.has_diabetes {
            record.has_diabetes = v;
        }
        record.diabetes_type = input.diabetes_type;
        if let Some(v) = input.has_dyslipidemia {
            record.has_dyslipidemia = v;
        }
        if let Some(v) = input.has_smoking {
            record.has_smoking = v;
        }
        if let Some(v) = input.has_pregnancy {
            record.has_pregnancy = v;
        }
        if let Some(v) = input.other_comorbidities {
            record.other_comorbidities = v;
        }
        if let Some(v) = input.continuous_medication {
            record.continuous_medication = v;
        }
        if let Some(v) = input.general_state {
            record.general_state = v;
        }
        if let Some(v) = input.skin {
            record.skin = v;
        }
        if let Some(v) = input.oropharynx {
            record.oropharynx = v;
        }
        if let Some(v) = input.cardiovascular {
            record.cardiovascular = v;
        }
        if let Some(v) = input.respiratory {
            record.respiratory = v;
        }
        if let Some(v) = input.abdomen {
            record.abdomen = v;
        }
        if let Some(v) = input.upper_limbs {
            record.upper_limbs = v;
        }
        if let Some(v) = input.lower_limbs {
            record.lower_limbs = v;
        }
        if let Some(v) = input.neurological_state {
            record.neurological_state = v;
        }
        if let Some(v) = input.active_bleeding_visible {
            record.active_bleeding_visible = v;
        }
        if let Some(v) = input.glasgow_score {
            record.glasgow_score = v;
        }
        if let Some(v) = input.blood_pressure {
            record.blood_pressure = v;
        }
        if let Some(v) = input.heart_rate {
            record.heart_rate = v;
        }
        if let Some(v) = input.respiratory_rate {
            record.respiratory_rate = v;
        }
        if let Some(v) = input.cid {
            record.cid = v;
        }
        if let Some(v) = input.conduct {
            record.conduct = v;
        }
        if let Some(v) = input.prescription {
            record.prescription = v;
        }
        if let Some(v) = input.medical_time {
            record.medical_time = v;
        }
        record.doctor_name = input.doctor_name;
        if let Some(v) = input.nursing_technician {
            record.nursing_technician = v;
        }
        if let Some(v) = input.diagnosis {
            record.diagnosis = v;
        }
        if let Some(v) = input.treatment {
            record.treatment = v;
        }
        if let Some(v) = input.exams {
            record.exams = v;
        }
        if let Some(v) = input.notes {
            record.notes = v;
        }
        if let Some(v) = input.follow_up {
            record.follow_up = v;
        }

        record
    }
}

/// Raw consultation form submission.
///
/// Only `patient_id` and `doctor_name` are required; everything else is
/// defaulted at normalization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConsultationInput {
    pub patient_id: String,
    #[serde(default)]
    pub doctor_name: String,

    #[serde(default)]
    pub has_allergies: Option<bool>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub main_complaint: Option<String>,
    #[serde(default)]
    pub current_disease_history: Option<String>,
    #[serde(default)]
    pub has_hypertension: Option<bool>,
    #[serde(default)]
    pub has_diabetes: Option<bool>,
    #[serde(default)]
    pub diabetes_type: Option<DiabetesType>,
    #[serde(default)]
    pub has_dyslipidemia: Option<bool>,
    #[serde(default)]
    pub has_smoking: Option<bool>,
    #[serde(default)]
    pub has_pregnancy: Option<bool>,
    #[serde(default)]
    pub other_comorbidities: Option<String>,
    #[serde(default)]
    pub continuous_medication: Option<String>,
    #[serde(default)]
    pub general_state: Option<GeneralState>,
    #[serde(default)]
    pub skin: Option<SkinFindings>,
    #[serde(default)]
    pub oropharynx: Option<OropharynxFindings>,
    #[serde(default)]
    pub cardiovascular: Option<CardiovascularFindings>,
    #[serde(default)]
    pub respiratory: Option<RespiratoryFindings>,
    #[serde(default)]
    pub abdomen: Option<AbdomenFindings>,
    #[serde(default)]
    pub upper_limbs: Option<LimbFindings>,
    #[serde(default)]
    pub lower_limbs: Option<LimbFindings>,
    #[serde(default)]
    pub neurological_state: Option<NeurologicalState>,
    #[serde(default)]
    pub active_bleeding_visible: Option<bool>,
    #[serde(default)]
    pub glasgow_score: Option<u8>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub heart_rate: Option<String>,
    #[serde(default)]
    pub respiratory_rate: Option<String>,
    #[serde(default)]
    pub cid: Option<String>,
    #[serde(default)]
    pub conduct: Option<Conduct>,
    #[serde(default)]
    pub prescription: Option<String>,
    #[serde(default)]
    pub medical_time: Option<String>,
    #[serde(default)]
    pub nursing_technician: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub exams: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up: Option<String>,
}

impl ConsultationInput {
    /// A submission carrying only the required fields.
    pub fn minimal(patient_id: impl Into<String>, doctor_name: impl Into<String>) -> Self {
        ConsultationInput {
            patient_id: patient_id.into(),
            doctor_name: doctor_name.into(),
            ..ConsultationInput::default()
        }
    }
}
