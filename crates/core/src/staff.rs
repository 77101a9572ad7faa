//! Staff roles, the nurse roster, and the staff registry.
//!
//! The registry is the data layer for user management; role-gated screens
//! and authentication live outside the core. The nurse roster is the fixed
//! id → name mapping the medication stage validates against.

use crate::error::{ClinicError, ClinicResult};
use chrono::{DateTime, Utc};
use medflow_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Nurses eligible to administer medication.
pub const NURSE_ROSTER: [(&str, &str); 5] = [
    ("1", "Ana Silva"),
    ("2", "Carlos Oliveira"),
    ("3", "Márcia Santos"),
    ("4", "Paulo Ribeiro"),
    ("5", "Teresa Gomes"),
];

/// Resolves a roster id to the nurse's name.
pub fn nurse_name(id: &str) -> Option<&'static str> {
    NURSE_ROSTER
        .iter()
        .find(|(roster_id, _)| *roster_id == id)
        .map(|(_, name)| *name)
}

/// Professional role of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StaffRole {
    Admin,
    Doctor,
    Nurse,
    NursingTechnician,
}

/// A registered staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StaffMember {
    pub id: String,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[schema(value_type = String)]
    pub email: NonEmptyText,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
}

/// Registration payload for a new staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewStaffMember {
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[schema(value_type = String)]
    pub email: NonEmptyText,
    pub role: StaffRole,
}

/// In-memory staff directory, process lifetime.
#[derive(Debug, Default)]
pub struct StaffRegistry {
    members: RwLock<HashMap<String, StaffMember>>,
}

impl StaffRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a staff member, assigning an id and creation timestamp.
    pub async fn register(&self, new: NewStaffMember) -> StaffMember {
        let member = StaffMember {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: new.name,
            email: new.email,
            role: new.role,
            created_at: Utc::now(),
        };
        let mut members = self.members.write().await;
        members.insert(member.id.clone(), member.clone());
        member
    }

    /// All staff members, oldest registration first.
    pub async fn list(&self) -> Vec<StaffMember> {
        let members = self.members.read().await;
        let mut all: Vec<StaffMember> = members.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }

    pub async fn find(&self, id: &str) -> Option<StaffMember> {
        let members = self.members.read().await;
        members.get(id).cloned()
    }

    /// Changes a member's role.
    pub async fn update_role(&self, id: &str, role: StaffRole) -> ClinicResult<StaffMember> {
        let mut members = self.members.write().await;
        let member = members
            .get_mut(id)
            .ok_or_else(|| ClinicError::StaffNotFound(id.to_owned()))?;
        member.role = role;
        Ok(member.clone())
    }

    /// Removes a member from the registry.
    pub async fn remove(&self, id: &str) -> ClinicResult<()> {
        let mut members = self.members.write().await;
        members
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ClinicError::StaffNotFound(id.to_owned()))
    }
}
