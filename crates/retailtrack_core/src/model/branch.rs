//! Store branches (shops).
//!
//! The branch `code` doubles as the shop reference used by sales, shop
//! inventory and stock allocations.

use crate::filter::Searchable;
use crate::form::{DraftFields, Draftable};
use crate::model::record::{patch_field, Entity, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BranchStatus {
    #[default]
    Active,
    Inactive,
}

impl BranchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Active" => Some(Self::Active),
            "Inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BranchType {
    /// Head store; cannot be removed.
    Main,
    #[default]
    Branch,
}

impl BranchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Branch => "Branch",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Main" => Some(Self::Main),
            "Branch" => Some(Self::Branch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub manager: String,
    pub status: BranchStatus,
    #[serde(rename = "type")]
    pub kind: BranchType,
}

impl Branch {
    pub fn is_main(&self) -> bool {
        self.kind == BranchType::Main
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub manager: Option<String>,
    pub status: Option<BranchStatus>,
    pub kind: Option<BranchType>,
}

impl Entity for Branch {
    type Patch = BranchPatch;
    const KIND: &'static str = "branch";

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: BranchPatch) {
        patch_field(&mut self.name, patch.name);
        patch_field(&mut self.code, patch.code);
        patch_field(&mut self.address, patch.address);
        patch_field(&mut self.phone, patch.phone);
        patch_field(&mut self.email, patch.email);
        patch_field(&mut self.manager, patch.manager);
        patch_field(&mut self.status, patch.status);
        patch_field(&mut self.kind, patch.kind);
    }
}

impl Searchable for Branch {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.code.as_str(),
            self.manager.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchDraft {
    pub name: String,
    pub code: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub manager: String,
    pub status: BranchStatus,
    pub kind: BranchType,
}

impl DraftFields for BranchDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "name" => self.name = raw.to_string(),
            "code" => self.code = raw.to_string(),
            "address" => self.address = raw.to_string(),
            "phone" => self.phone = raw.to_string(),
            "email" => self.email = raw.to_string(),
            "manager" => self.manager = raw.to_string(),
            "status" => {
                if let Some(status) = BranchStatus::parse(raw) {
                    self.status = status;
                }
            }
            "type" => {
                if let Some(kind) = BranchType::parse(raw) {
                    self.kind = kind;
                }
            }
            _ => return false,
        }
        true
    }
}

impl Draftable for Branch {
    type Draft = BranchDraft;

    fn to_draft(&self) -> BranchDraft {
        BranchDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            manager: self.manager.clone(),
            status: self.status,
            kind: self.kind,
        }
    }

    fn from_draft(id: RecordId, draft: BranchDraft, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            code: draft.code,
            address: draft.address,
            phone: draft.phone,
            email: draft.email,
            manager: draft.manager,
            status: draft.status,
            kind: draft.kind,
        }
    }

    fn draft_patch(draft: BranchDraft) -> BranchPatch {
        BranchPatch {
            name: Some(draft.name),
            code: Some(draft.code),
            address: Some(draft.address),
            phone: Some(draft.phone),
            email: Some(draft.email),
            manager: Some(draft.manager),
            status: Some(draft.status),
            kind: Some(draft.kind),
        }
    }
}
