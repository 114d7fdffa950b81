//! Income/expense transactions and credit sales.
//!
//! # Invariants
//! - `paid` is the only terminal credit status; a paid credit sale is never
//!   overdue.
//! - Outstanding balance is `amount - partial_payments` and may go negative.

use crate::aggregate::{difference, is_overdue};
use crate::coerce::{non_blank, parse_date_at_midnight_utc, parse_number_or_zero};
use crate::filter::Searchable;
use crate::form::{DraftFields, Draftable};
use crate::model::record::{patch_field, Entity, InsertPosition, RecordId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const INCOME_CATEGORIES: &[&str] = &["Sales", "Services", "Interest", "Other Income"];
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Utilities",
    "Rent",
    "Supplies",
    "Marketing",
    "Salaries",
    "Other Expenses",
];
pub const DEFAULT_LOCATION: &str = "Main Store";
const CREDIT_REFERENCE_PREFIX: &str = "CR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    #[default]
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Categories offered for this transaction type.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Income => INCOME_CATEGORIES,
            Self::Expense => EXPENSE_CATEGORIES,
        }
    }
}

/// One income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub source: String,
    pub reference: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub reference: Option<String>,
    pub location: Option<String>,
}

impl Entity for Transaction {
    type Patch = TransactionPatch;
    const KIND: &'static str = "transaction";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: TransactionPatch) {
        patch_field(&mut self.kind, patch.kind);
        patch_field(&mut self.category, patch.category);
        patch_field(&mut self.amount, patch.amount);
        patch_field(&mut self.description, patch.description);
        patch_field(&mut self.source, patch.source);
        patch_field(&mut self.reference, patch.reference);
        patch_field(&mut self.location, patch.location);
    }
}

impl Searchable for Transaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.description.as_str(),
            self.source.as_str(),
            self.reference.as_str(),
            self.category.as_str(),
        ]
    }
}

/// Calendar day of a transaction, for day filters.
pub fn transaction_day(transaction: &Transaction) -> Option<NaiveDate> {
    Some(transaction.date.date_naive())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub source: String,
    pub reference: String,
    pub location: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            kind: TransactionType::Income,
            category: String::new(),
            amount: 0.0,
            description: String::new(),
            source: String::new(),
            reference: String::new(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl DraftFields for TransactionDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "type" => {
                if let Some(kind) = TransactionType::parse(raw) {
                    self.kind = kind;
                }
            }
            "category" => self.category = raw.to_string(),
            "amount" => self.amount = parse_number_or_zero(raw),
            "description" => self.description = raw.to_string(),
            "source" => self.source = raw.to_string(),
            "reference" => self.reference = raw.to_string(),
            "location" => self.location = raw.to_string(),
            _ => return false,
        }
        true
    }
}

impl Draftable for Transaction {
    type Draft = TransactionDraft;

    fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            kind: self.kind,
            category: self.category.clone(),
            amount: self.amount,
            description: self.description.clone(),
            source: self.source.clone(),
            reference: self.reference.clone(),
            location: self.location.clone(),
        }
    }

    fn from_draft(id: RecordId, draft: TransactionDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            date: now,
            kind: draft.kind,
            category: draft.category,
            amount: draft.amount,
            description: draft.description,
            source: draft.source,
            reference: draft.reference,
            location: draft.location,
        }
    }

    fn draft_patch(draft: TransactionDraft) -> TransactionPatch {
        TransactionPatch {
            kind: Some(draft.kind),
            category: Some(draft.category),
            amount: Some(draft.amount),
            description: Some(draft.description),
            source: Some(draft.source),
            reference: Some(draft.reference),
            location: Some(draft.location),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    #[default]
    Pending,
    Partial,
    Paid,
}

impl CreditStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(Self::Pending),
            "partial" => Some(Self::Partial),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Paid
    }
}

/// Sale on credit awaiting settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditSale {
    pub id: RecordId,
    pub customer_name: String,
    pub amount: f64,
    /// UTC midnight of the due day; `None` when the entered date was unparsable.
    pub due_date: Option<DateTime<Utc>>,
    pub partial_payments: f64,
    pub status: CreditStatus,
    pub reference: String,
}

impl CreditSale {
    pub fn outstanding(&self) -> f64 {
        difference(self.amount, self.partial_payments)
    }

    /// Past due and not settled. A missing due date is never overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date
            .is_some_and(|due| is_overdue(due, now, self.status.is_terminal()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditSalePatch {
    pub customer_name: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub partial_payments: Option<f64>,
    pub status: Option<CreditStatus>,
    pub reference: Option<String>,
}

impl Entity for CreditSale {
    type Patch = CreditSalePatch;
    const KIND: &'static str = "credit_sale";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: CreditSalePatch) {
        patch_field(&mut self.customer_name, patch.customer_name);
        patch_field(&mut self.amount, patch.amount);
        patch_field(&mut self.due_date, patch.due_date);
        patch_field(&mut self.partial_payments, patch.partial_payments);
        patch_field(&mut self.status, patch.status);
        patch_field(&mut self.reference, patch.reference);
    }
}

impl Searchable for CreditSale {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.customer_name.as_str(), self.reference.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditSaleDraft {
    pub customer_name: String,
    pub amount: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub reference: String,
}

impl DraftFields for CreditSaleDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "customer_name" => self.customer_name = raw.to_string(),
            "amount" => self.amount = parse_number_or_zero(raw),
            "due_date" => self.due_date = parse_date_at_midnight_utc(raw),
            "reference" => self.reference = raw.to_string(),
            _ => return false,
        }
        true
    }
}

impl Draftable for CreditSale {
    type Draft = CreditSaleDraft;

    fn to_draft(&self) -> CreditSaleDraft {
        CreditSaleDraft {
            customer_name: self.customer_name.clone(),
            amount: self.amount,
            due_date: self.due_date,
            reference: self.reference.clone(),
        }
    }

    /// New credit sales start `pending` with nothing paid.
    fn from_draft(id: RecordId, draft: CreditSaleDraft, now: DateTime<Utc>) -> Self {
        let reference = non_blank(&draft.reference).unwrap_or_else(|| {
            format!("{CREDIT_REFERENCE_PREFIX}{}", now.timestamp_millis())
        });
        Self {
            id,
            customer_name: draft.customer_name,
            amount: draft.amount,
            due_date: draft.due_date,
            partial_payments: 0.0,
            status: CreditStatus::Pending,
            reference,
        }
    }

    fn draft_patch(draft: CreditSaleDraft) -> CreditSalePatch {
        CreditSalePatch {
            customer_name: Some(draft.customer_name),
            amount: Some(draft.amount),
            due_date: Some(draft.due_date),
            partial_payments: None,
            status: None,
            reference: non_blank(&draft.reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CreditSale, CreditStatus};
    use crate::model::record::new_record_id;
    use chrono::{Duration, Utc};

    fn credit(status: CreditStatus, due_in_days: i64) -> CreditSale {
        CreditSale {
            id: new_record_id(),
            customer_name: "XYZ Ltd".to_string(),
            amount: 1800.0,
            due_date: Some(Utc::now() + Duration::days(due_in_days)),
            partial_payments: 600.0,
            status,
            reference: "CR002".to_string(),
        }
    }

    #[test]
    fn outstanding_subtracts_partial_payments() {
        assert_eq!(credit(CreditStatus::Partial, 15).outstanding(), 1200.0);
    }

    #[test]
    fn overdue_requires_past_due_and_open_status() {
        let now = Utc::now();
        assert!(credit(CreditStatus::Partial, -1).is_overdue(now));
        assert!(!credit(CreditStatus::Paid, -1).is_overdue(now));
        assert!(!credit(CreditStatus::Pending, 3).is_overdue(now));

        let mut undated = credit(CreditStatus::Pending, -3);
        undated.due_date = None;
        assert!(!undated.is_overdue(now));
    }
}
