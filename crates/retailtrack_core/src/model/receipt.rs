//! Purchase records with and without receipts.

use crate::coerce::{parse_calendar_date, parse_number_or_zero};
use crate::filter::Searchable;
use crate::form::{DraftFields, Draftable};
use crate::model::record::{patch_field, Entity, InsertPosition, RecordId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Receipt and item are both on hand.
    #[default]
    ItemExists,
    /// Item is gone, only the receipt remains.
    OnlyReceipt,
}

impl ReceiptStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ItemExists => "item_exists",
            Self::OnlyReceipt => "only_receipt",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::ItemExists => Self::OnlyReceipt,
            Self::OnlyReceipt => Self::ItemExists,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoReceiptStatus {
    #[default]
    ItemAvailable,
    ItemSold,
}

impl NoReceiptStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ItemAvailable => "item_available",
            Self::ItemSold => "item_sold",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::ItemAvailable => Self::ItemSold,
            Self::ItemSold => Self::ItemAvailable,
        }
    }
}

/// Item bought with a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub id: RecordId,
    pub receipt_number: String,
    pub item_description: String,
    pub amount: f64,
    /// `None` when the entered date could not be parsed.
    pub purchase_date: Option<NaiveDate>,
    pub status: ReceiptStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptItemPatch {
    pub receipt_number: Option<String>,
    pub item_description: Option<String>,
    pub amount: Option<f64>,
    pub purchase_date: Option<Option<NaiveDate>>,
    pub status: Option<ReceiptStatus>,
}

impl Entity for ReceiptItem {
    type Patch = ReceiptItemPatch;
    const KIND: &'static str = "receipt_item";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: ReceiptItemPatch) {
        patch_field(&mut self.receipt_number, patch.receipt_number);
        patch_field(&mut self.item_description, patch.item_description);
        patch_field(&mut self.amount, patch.amount);
        patch_field(&mut self.purchase_date, patch.purchase_date);
        patch_field(&mut self.status, patch.status);
    }
}

impl Searchable for ReceiptItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.receipt_number.as_str(), self.item_description.as_str()]
    }
}

/// Item bought without any receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoReceiptItem {
    pub id: RecordId,
    pub item_description: String,
    pub amount: f64,
    pub purchase_date: Option<NaiveDate>,
    pub status: NoReceiptStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoReceiptItemPatch {
    pub item_description: Option<String>,
    pub amount: Option<f64>,
    pub purchase_date: Option<Option<NaiveDate>>,
    pub status: Option<NoReceiptStatus>,
}

impl Entity for NoReceiptItem {
    type Patch = NoReceiptItemPatch;
    const KIND: &'static str = "no_receipt_item";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: NoReceiptItemPatch) {
        patch_field(&mut self.item_description, patch.item_description);
        patch_field(&mut self.amount, patch.amount);
        patch_field(&mut self.purchase_date, patch.purchase_date);
        patch_field(&mut self.status, patch.status);
    }
}

impl Searchable for NoReceiptItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.item_description.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptItemDraft {
    pub receipt_number: String,
    pub item_description: String,
    pub amount: f64,
    pub purchase_date: Option<NaiveDate>,
}

impl DraftFields for ReceiptItemDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "receipt_number" => self.receipt_number = raw.to_string(),
            "item_description" => self.item_description = raw.to_string(),
            "amount" => self.amount = parse_number_or_zero(raw),
            "purchase_date" => self.purchase_date = parse_calendar_date(raw),
            _ => return false,
        }
        true
    }
}

impl Draftable for ReceiptItem {
    type Draft = ReceiptItemDraft;

    fn to_draft(&self) -> ReceiptItemDraft {
        ReceiptItemDraft {
            receipt_number: self.receipt_number.clone(),
            item_description: self.item_description.clone(),
            amount: self.amount,
            purchase_date: self.purchase_date,
        }
    }

    fn from_draft(id: RecordId, draft: ReceiptItemDraft, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            receipt_number: draft.receipt_number,
            item_description: draft.item_description,
            amount: draft.amount,
            purchase_date: draft.purchase_date,
            status: ReceiptStatus::ItemExists,
        }
    }

    fn draft_patch(draft: ReceiptItemDraft) -> ReceiptItemPatch {
        ReceiptItemPatch {
            receipt_number: Some(draft.receipt_number),
            item_description: Some(draft.item_description),
            amount: Some(draft.amount),
            purchase_date: Some(draft.purchase_date),
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoReceiptItemDraft {
    pub item_description: String,
    pub amount: f64,
    pub purchase_date: Option<NaiveDate>,
}

impl DraftFields for NoReceiptItemDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "item_description" => self.item_description = raw.to_string(),
            "amount" => self.amount = parse_number_or_zero(raw),
            "purchase_date" => self.purchase_date = parse_calendar_date(raw),
            _ => return false,
        }
        true
    }
}

impl Draftable for NoReceiptItem {
    type Draft = NoReceiptItemDraft;

    fn to_draft(&self) -> NoReceiptItemDraft {
        NoReceiptItemDraft {
            item_description: self.item_description.clone(),
            amount: self.amount,
            purchase_date: self.purchase_date,
        }
    }

    fn from_draft(id: RecordId, draft: NoReceiptItemDraft, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            item_description: draft.item_description,
            amount: draft.amount,
            purchase_date: draft.purchase_date,
            status: NoReceiptStatus::ItemAvailable,
        }
    }

    fn draft_patch(draft: NoReceiptItemDraft) -> NoReceiptItemPatch {
        NoReceiptItemPatch {
            item_description: Some(draft.item_description),
            amount: Some(draft.amount),
            purchase_date: Some(draft.purchase_date),
            status: None,
        }
    }
}
