//! Staff user accounts.
//!
//! # Invariants
//! - `permissions` always mirrors the module grants of `role` after a form
//!   save; it is never edited directly through a draft.

use crate::access::{Module, Role};
use crate::filter::Searchable;
use crate::form::{DraftFields, Draftable};
use crate::model::record::{patch_field, Entity, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Active" | "active" => Some(Self::Active),
            "Inactive" | "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    /// Branch or location name the user works at.
    pub branch: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    /// `None` until the first login.
    pub last_login: Option<DateTime<Utc>>,
    pub permissions: Vec<Module>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub branch: Option<String>,
    pub status: Option<UserStatus>,
    pub last_login: Option<Option<DateTime<Utc>>>,
    pub permissions: Option<Vec<Module>>,
}

impl Entity for User {
    type Patch = UserPatch;
    const KIND: &'static str = "user";

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: UserPatch) {
        patch_field(&mut self.first_name, patch.first_name);
        patch_field(&mut self.last_name, patch.last_name);
        patch_field(&mut self.email, patch.email);
        patch_field(&mut self.phone, patch.phone);
        patch_field(&mut self.role, patch.role);
        patch_field(&mut self.branch, patch.branch);
        patch_field(&mut self.status, patch.status);
        patch_field(&mut self.last_login, patch.last_login);
        patch_field(&mut self.permissions, patch.permissions);
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub branch: String,
    pub status: UserStatus,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            role: Role::Sales,
            branch: String::new(),
            status: UserStatus::Active,
        }
    }
}

impl DraftFields for UserDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "first_name" => self.first_name = raw.to_string(),
            "last_name" => self.last_name = raw.to_string(),
            "email" => self.email = raw.to_string(),
            "phone" => self.phone = raw.to_string(),
            "role" => {
                if let Ok(role) = Role::parse(raw) {
                    self.role = role;
                }
            }
            "branch" => self.branch = raw.to_string(),
            "status" => {
                if let Some(status) = UserStatus::parse(raw) {
                    self.status = status;
                }
            }
            _ => return false,
        }
        true
    }
}

impl Draftable for User {
    type Draft = UserDraft;

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
            branch: self.branch.clone(),
            status: self.status,
        }
    }

    fn from_draft(id: RecordId, draft: UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            permissions: draft.role.granted_modules(),
            role: draft.role,
            branch: draft.branch,
            status: draft.status,
            created_at: now,
            last_login: None,
        }
    }

    fn draft_patch(draft: UserDraft) -> UserPatch {
        UserPatch {
            first_name: Some(draft.first_name),
            last_name: Some(draft.last_name),
            email: Some(draft.email),
            phone: Some(draft.phone),
            permissions: Some(draft.role.granted_modules()),
            role: Some(draft.role),
            branch: Some(draft.branch),
            status: Some(draft.status),
            last_login: None,
        }
    }
}
