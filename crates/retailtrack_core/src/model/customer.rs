//! Customer records with store credit.

use crate::aggregate::difference;
use crate::coerce::parse_number_or_zero;
use crate::filter::Searchable;
use crate::form::{DraftFields, Draftable};
use crate::model::record::{patch_field, Entity, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Active,
    Blocked,
    Suspended,
}

impl CustomerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
            Self::Suspended => "suspended",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(Self::Active),
            "blocked" => Some(Self::Blocked),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// Customer with a credit line.
///
/// `current_credit` may exceed `credit_limit`; nothing enforces the limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: RecordId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub credit_limit: f64,
    pub current_credit: f64,
    pub status: CustomerStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Remaining credit line; negative when the customer is over limit.
    pub fn available_credit(&self) -> f64 {
        difference(self.credit_limit, self.current_credit)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub credit_limit: Option<f64>,
    pub current_credit: Option<f64>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
}

impl Entity for Customer {
    type Patch = CustomerPatch;
    const KIND: &'static str = "customer";

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: CustomerPatch) {
        patch_field(&mut self.name, patch.name);
        patch_field(&mut self.phone, patch.phone);
        patch_field(&mut self.email, patch.email);
        patch_field(&mut self.address, patch.address);
        patch_field(&mut self.credit_limit, patch.credit_limit);
        patch_field(&mut self.current_credit, patch.current_credit);
        patch_field(&mut self.status, patch.status);
        patch_field(&mut self.notes, patch.notes);
    }
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str(), self.email.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub credit_limit: f64,
    pub current_credit: f64,
    pub status: CustomerStatus,
    pub notes: String,
}

impl DraftFields for CustomerDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "name" => self.name = raw.to_string(),
            "phone" => self.phone = raw.to_string(),
            "email" => self.email = raw.to_string(),
            "address" => self.address = raw.to_string(),
            "credit_limit" => self.credit_limit = parse_number_or_zero(raw),
            "current_credit" => self.current_credit = parse_number_or_zero(raw),
            "status" => {
                if let Some(status) = CustomerStatus::parse(raw) {
                    self.status = status;
                }
            }
            "notes" => self.notes = raw.to_string(),
            _ => return false,
        }
        true
    }
}

impl Draftable for Customer {
    type Draft = CustomerDraft;

    fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            credit_limit: self.credit_limit,
            current_credit: self.current_credit,
            status: self.status,
            notes: self.notes.clone(),
        }
    }

    fn from_draft(id: RecordId, draft: CustomerDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            credit_limit: draft.credit_limit,
            current_credit: draft.current_credit,
            status: draft.status,
            notes: draft.notes,
            created_at: now,
        }
    }

    fn draft_patch(draft: CustomerDraft) -> CustomerPatch {
        CustomerPatch {
            name: Some(draft.name),
            phone: Some(draft.phone),
            email: Some(draft.email),
            address: Some(draft.address),
            credit_limit: Some(draft.credit_limit),
            current_credit: Some(draft.current_credit),
            status: Some(draft.status),
            notes: Some(draft.notes),
        }
    }
}
