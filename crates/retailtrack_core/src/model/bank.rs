//! Bank account records.

use crate::coerce::parse_number_or_zero;
use crate::filter::Searchable;
use crate::form::{DraftFields, Draftable};
use crate::model::record::{patch_field, Entity, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Current,
    Other,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Current => "current",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "current" => Some(Self::Current),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Business bank account tracked by the accounting screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: RecordId,
    pub account_name: String,
    pub bank_name: String,
    /// Usually masked (`****1234`); stored verbatim.
    pub account_number: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub currency: String,
    pub status: AccountStatus,
    pub notes: String,
}

impl BankAccount {
    /// Label used by sale forms when a bank transfer is selected.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.account_name, self.bank_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankAccountPatch {
    pub account_name: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_type: Option<AccountType>,
    pub balance: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<AccountStatus>,
    pub notes: Option<String>,
}

impl Entity for BankAccount {
    type Patch = BankAccountPatch;
    const KIND: &'static str = "bank_account";

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: BankAccountPatch) {
        patch_field(&mut self.account_name, patch.account_name);
        patch_field(&mut self.bank_name, patch.bank_name);
        patch_field(&mut self.account_number, patch.account_number);
        patch_field(&mut self.account_type, patch.account_type);
        patch_field(&mut self.balance, patch.balance);
        patch_field(&mut self.currency, patch.currency);
        patch_field(&mut self.status, patch.status);
        patch_field(&mut self.notes, patch.notes);
    }
}

impl Searchable for BankAccount {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.account_name.as_str(),
            self.bank_name.as_str(),
            self.account_number.as_str(),
        ]
    }
}

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq)]
pub struct BankAccountDraft {
    pub account_name: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub currency: String,
    pub status: AccountStatus,
    pub notes: String,
}

impl Default for BankAccountDraft {
    fn default() -> Self {
        Self {
            account_name: String::new(),
            bank_name: String::new(),
            account_number: String::new(),
            account_type: AccountType::Checking,
            balance: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
            status: AccountStatus::Active,
            notes: String::new(),
        }
    }
}

impl DraftFields for BankAccountDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "account_name" => self.account_name = raw.to_string(),
            "bank_name" => self.bank_name = raw.to_string(),
            "account_number" => self.account_number = raw.to_string(),
            "account_type" => {
                if let Some(kind) = AccountType::parse(raw) {
                    self.account_type = kind;
                }
            }
            "balance" => self.balance = parse_number_or_zero(raw),
            "currency" => self.currency = raw.to_string(),
            "status" => {
                if let Some(status) = AccountStatus::parse(raw) {
                    self.status = status;
                }
            }
            "notes" => self.notes = raw.to_string(),
            _ => return false,
        }
        true
    }
}

impl Draftable for BankAccount {
    type Draft = BankAccountDraft;

    fn to_draft(&self) -> BankAccountDraft {
        BankAccountDraft {
            account_name: self.account_name.clone(),
            bank_name: self.bank_name.clone(),
            account_number: self.account_number.clone(),
            account_type: self.account_type,
            balance: self.balance,
            currency: self.currency.clone(),
            status: self.status,
            notes: self.notes.clone(),
        }
    }

    fn from_draft(id: RecordId, draft: BankAccountDraft, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            account_name: draft.account_name,
            bank_name: draft.bank_name,
            account_number: draft.account_number,
            account_type: draft.account_type,
            balance: draft.balance,
            currency: draft.currency,
            status: draft.status,
            notes: draft.notes,
        }
    }

    fn draft_patch(draft: BankAccountDraft) -> BankAccountPatch {
        BankAccountPatch {
            account_name: Some(draft.account_name),
            bank_name: Some(draft.bank_name),
            account_number: Some(draft.account_number),
            account_type: Some(draft.account_type),
            balance: Some(draft.balance),
            currency: Some(draft.currency),
            status: Some(draft.status),
            notes: Some(draft.notes),
        }
    }
}
