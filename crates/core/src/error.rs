//! Error taxonomy for the MedFlow core.
//!
//! Every fallible operation in this crate returns [`ClinicResult`]; errors
//! cross the component boundary as values, never as panics.

use serde::Serialize;

/// A single rejected input field with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldViolation {
    /// The offending field, in its wire-form name.
    #[schema(value_type = String)]
    pub field: &'static str,
    /// What the caller has to fix.
    pub message: String,
}

/// The full set of field-level violations for one rejected submission.
///
/// A submission is validated as a whole so the caller can surface every
/// problem at once instead of fixing them one round-trip at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ValidationReport {
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation against `field`.
    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Converts the report into a result: `Ok(())` when nothing was
    /// rejected, otherwise the report wrapped in [`ClinicError::Validation`].
    pub fn into_result(self) -> ClinicResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ClinicError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("validation failed: {0}")]
    Validation(ValidationReport),
    #[error("patient not found: {0}")]
    PatientNotFound(String),
    #[error("staff member not found: {0}")]
    StaffNotFound(String),
    #[error("consultation data not found for patient {0}")]
    ConsultationMissing(String),
    #[error("invalid workflow state: {0}")]
    InvalidState(String),
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to create record directory: {0}")]
    RecordDirCreation(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record: {0}")]
    Deserialization(serde_json::Error),
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
