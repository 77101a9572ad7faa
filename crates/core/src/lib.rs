//! # MedFlow Core
//!
//! Core business logic for the MedFlow clinical workflow system:
//!
//! - The clinical data model: patients, triage, consultations, medications
//! - The record store abstraction with in-memory and file-backed backends
//! - The workflow engine driving the stage sequence
//!   (waiting → in-triage → in-consultation → completed)
//! - Read-side patient projections, workflow reports, and the staff registry
//!
//! **No API concerns**: HTTP routing, serialization formats of the wire, and
//! error presentation belong in `api-rest`.

pub mod config;
pub mod consultation;
pub mod directory;
pub mod error;
pub mod medication;
pub mod patient;
pub mod reports;
pub mod staff;
pub mod store;
pub mod triage;
pub mod validation;
pub mod workflow;

pub use config::{store_backend_from_env_value, CoreConfig, StoreBackend};
pub use consultation::{ConsultationInput, ConsultationRecord};
pub use directory::{DirectorySnapshot, PatientDirectory};
pub use error::{ClinicError, ClinicResult, FieldViolation, ValidationReport};
pub use medication::{MedicationInput, MedicationRecord};
pub use patient::{Gender, IntakeInput, NewPatient, Patient, PatientStatus};
pub use reports::WorkflowReport;
pub use staff::{NewStaffMember, StaffMember, StaffRegistry, StaffRole, NURSE_ROSTER};
pub use store::{FileStore, MemoryStore, RecordStore};
pub use triage::{GlasgowScore, PriorityLevel, PupilReactivity, TraumaSeverity, TriageInput, TriageRecord};
pub use workflow::WorkflowEngine;
