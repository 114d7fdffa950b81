//! Sale transactions and their line items.
//!
//! # Invariants
//! - `subtotal`, `discount` and `total` are derived from line items when a
//!   sale is created or edited through a draft.
//! - `total = subtotal - discount`; a discount larger than the subtotal is not
//!   rejected.

use crate::aggregate::sum_by;
use crate::coerce::{non_blank, parse_flag, parse_integer_or, parse_number_or_zero};
use crate::filter::Searchable;
use crate::form::{DraftFields, Draftable};
use crate::model::bank::BankAccount;
use crate::model::branch::Branch;
use crate::model::customer::Customer;
use crate::model::inventory::ShopItem;
use crate::model::record::{patch_field, Entity, InsertPosition, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sales person stamped on sales created without one.
pub const DEFAULT_SALES_PERSON: &str = "Current User";
const RECEIPT_NUMBER_PREFIX: &str = "RCP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::BankTransfer => "Bank Transfer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Cash" => Some(Self::Cash),
            "Bank Transfer" => Some(Self::BankTransfer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Paid,
    Partial,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Partial => "partial",
            Self::Pending => "pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "paid" => Some(Self::Paid),
            "partial" => Some(Self::Partial),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// One sold line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub name: String,
    pub code: String,
    pub quantity: i64,
    pub price: f64,
    /// Absolute discount for the whole line, not per unit.
    pub discount: f64,
    pub from_receipt: bool,
}

impl Default for SaleItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            quantity: 1,
            price: 0.0,
            discount: 0.0,
            from_receipt: true,
        }
    }
}

impl SaleItem {
    /// `quantity * price`, before the line discount.
    pub fn line_amount(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Derived money figures of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SaleTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

impl SaleTotals {
    pub fn from_items(items: &[SaleItem]) -> Self {
        let subtotal = sum_by(items, SaleItem::line_amount);
        let discount = sum_by(items, |item| item.discount);
        Self {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: RecordId,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_id: Option<RecordId>,
    pub items: Vec<SaleItem>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub bank_account_id: Option<RecordId>,
    pub bank_account_name: Option<String>,
    pub payment_status: PaymentStatus,
    pub receipt_number: Option<String>,
    /// Branch code of the selling shop.
    pub shop_code: String,
    pub shop_name: String,
    pub sales_person: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalePatch {
    pub customer_name: Option<String>,
    pub customer_id: Option<Option<RecordId>>,
    pub items: Option<Vec<SaleItem>>,
    pub subtotal: Option<f64>,
    pub discount: Option<f64>,
    pub total: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub bank_account_id: Option<Option<RecordId>>,
    pub bank_account_name: Option<Option<String>>,
    pub payment_status: Option<PaymentStatus>,
    pub receipt_number: Option<Option<String>>,
    pub shop_code: Option<String>,
    pub shop_name: Option<String>,
    pub sales_person: Option<String>,
    pub notes: Option<String>,
}

impl Entity for Sale {
    type Patch = SalePatch;
    const KIND: &'static str = "sale";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: SalePatch) {
        patch_field(&mut self.customer_name, patch.customer_name);
        patch_field(&mut self.customer_id, patch.customer_id);
        patch_field(&mut self.items, patch.items);
        patch_field(&mut self.subtotal, patch.subtotal);
        patch_field(&mut self.discount, patch.discount);
        patch_field(&mut self.total, patch.total);
        patch_field(&mut self.payment_method, patch.payment_method);
        patch_field(&mut self.bank_account_id, patch.bank_account_id);
        patch_field(&mut self.bank_account_name, patch.bank_account_name);
        patch_field(&mut self.payment_status, patch.payment_status);
        patch_field(&mut self.receipt_number, patch.receipt_number);
        patch_field(&mut self.shop_code, patch.shop_code);
        patch_field(&mut self.shop_name, patch.shop_name);
        patch_field(&mut self.sales_person, patch.sales_person);
        patch_field(&mut self.notes, patch.notes);
    }
}

impl Searchable for Sale {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.customer_name.as_str()];
        if let Some(receipt_number) = self.receipt_number.as_deref() {
            fields.push(receipt_number);
        }
        fields
    }
}

/// Sale form state, including the editable line list.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub customer_name: String,
    pub customer_id: Option<RecordId>,
    pub shop_code: String,
    pub shop_name: String,
    pub items: Vec<SaleItem>,
    pub payment_method: PaymentMethod,
    pub bank_account_id: Option<RecordId>,
    pub bank_account_name: Option<String>,
    pub payment_status: PaymentStatus,
    pub receipt_number: String,
    pub sales_person: String,
    pub notes: String,
}

impl Default for SaleDraft {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_id: None,
            shop_code: String::new(),
            shop_name: String::new(),
            items: vec![SaleItem::default()],
            payment_method: PaymentMethod::Cash,
            bank_account_id: None,
            bank_account_name: None,
            payment_status: PaymentStatus::Paid,
            receipt_number: String::new(),
            sales_person: String::new(),
            notes: String::new(),
        }
    }
}

impl SaleDraft {
    pub fn totals(&self) -> SaleTotals {
        SaleTotals::from_items(&self.items)
    }

    pub fn select_customer(&mut self, customer: &Customer) {
        self.customer_id = Some(customer.id);
        self.customer_name = customer.name.clone();
    }

    pub fn select_shop(&mut self, shop: &Branch) {
        self.shop_code = shop.code.clone();
        self.shop_name = shop.name.clone();
    }

    pub fn select_bank_account(&mut self, account: &BankAccount) {
        self.bank_account_id = Some(account.id);
        self.bank_account_name = Some(account.display_label());
    }

    /// Appends a blank line (quantity 1).
    pub fn add_item(&mut self) {
        self.items.push(SaleItem::default());
    }

    /// Removes a line. Out-of-range indexes are ignored.
    pub fn remove_item(&mut self, index: usize) -> Option<SaleItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Fills a line from a shop inventory item: name, code, price and origin.
    pub fn select_catalog_item(&mut self, index: usize, item: &ShopItem) -> bool {
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };
        line.name = item.name.clone();
        line.code = item.code.clone();
        line.price = item.selling_price;
        line.from_receipt = item.from_receipt;
        true
    }

    /// Coerces text input into one line field.
    ///
    /// Quantity falls back to `1`; price and discount fall back to `0`.
    pub fn set_item_field(&mut self, index: usize, field: &str, raw: &str) -> bool {
        let Some(line) = self.items.get_mut(index) else {
            return false;
        };
        match field {
            "name" => line.name = raw.to_string(),
            "code" => line.code = raw.to_string(),
            "quantity" => line.quantity = parse_integer_or(raw, 1),
            "price" => line.price = parse_number_or_zero(raw),
            "discount" => line.discount = parse_number_or_zero(raw),
            "from_receipt" => line.from_receipt = parse_flag(raw),
            _ => return false,
        }
        true
    }
}

impl DraftFields for SaleDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "customer_name" => self.customer_name = raw.to_string(),
            "customer_id" => self.customer_id = Uuid::parse_str(raw.trim()).ok(),
            "shop_code" => self.shop_code = raw.to_string(),
            "shop_name" => self.shop_name = raw.to_string(),
            "payment_method" => {
                if let Some(method) = PaymentMethod::parse(raw) {
                    self.payment_method = method;
                }
            }
            "bank_account_id" => self.bank_account_id = Uuid::parse_str(raw.trim()).ok(),
            "payment_status" => {
                if let Some(status) = PaymentStatus::parse(raw) {
                    self.payment_status = status;
                }
            }
            "receipt_number" => self.receipt_number = raw.to_string(),
            "sales_person" => self.sales_person = raw.to_string(),
            "notes" => self.notes = raw.to_string(),
            _ => return false,
        }
        true
    }
}

impl Draftable for Sale {
    type Draft = SaleDraft;

    fn to_draft(&self) -> SaleDraft {
        SaleDraft {
            customer_name: self.customer_name.clone(),
            customer_id: self.customer_id,
            shop_code: self.shop_code.clone(),
            shop_name: self.shop_name.clone(),
            items: self.items.clone(),
            payment_method: self.payment_method,
            bank_account_id: self.bank_account_id,
            bank_account_name: self.bank_account_name.clone(),
            payment_status: self.payment_status,
            receipt_number: self.receipt_number.clone().unwrap_or_default(),
            sales_person: self.sales_person.clone(),
            notes: self.notes.clone(),
        }
    }

    fn from_draft(id: RecordId, draft: SaleDraft, now: DateTime<Utc>) -> Self {
        let totals = draft.totals();
        let receipt_number = non_blank(&draft.receipt_number).unwrap_or_else(|| {
            format!("{RECEIPT_NUMBER_PREFIX}{}", now.timestamp_millis())
        });
        let sales_person = non_blank(&draft.sales_person)
            .unwrap_or_else(|| DEFAULT_SALES_PERSON.to_string());

        Self {
            id,
            date: now,
            customer_name: draft.customer_name,
            customer_id: draft.customer_id,
            items: draft.items,
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            payment_method: draft.payment_method,
            bank_account_id: draft.bank_account_id,
            bank_account_name: draft.bank_account_name,
            payment_status: draft.payment_status,
            receipt_number: Some(receipt_number),
            shop_code: draft.shop_code,
            shop_name: draft.shop_name,
            sales_person,
            notes: draft.notes,
        }
    }

    fn draft_patch(draft: SaleDraft) -> SalePatch {
        let totals = draft.totals();
        SalePatch {
            customer_name: Some(draft.customer_name),
            customer_id: Some(draft.customer_id),
            items: Some(draft.items),
            subtotal: Some(totals.subtotal),
            discount: Some(totals.discount),
            total: Some(totals.total),
            payment_method: Some(draft.payment_method),
            bank_account_id: Some(draft.bank_account_id),
            bank_account_name: Some(draft.bank_account_name),
            payment_status: Some(draft.payment_status),
            receipt_number: Some(non_blank(&draft.receipt_number)),
            shop_code: Some(draft.shop_code),
            shop_name: Some(draft.shop_name),
            sales_person: non_blank(&draft.sales_person),
            notes: Some(draft.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SaleDraft, SaleItem, SaleTotals};

    #[test]
    fn totals_subtract_line_discounts() {
        let items = vec![
            SaleItem {
                name: "Wireless Headphones".to_string(),
                code: "WH001".to_string(),
                quantity: 1,
                price: 80.0,
                discount: 0.0,
                from_receipt: true,
            },
            SaleItem {
                name: "Phone Case".to_string(),
                code: "PC001".to_string(),
                quantity: 2,
                price: 15.0,
                discount: 5.0,
                from_receipt: false,
            },
        ];
        let totals = SaleTotals::from_items(&items);
        assert_eq!(totals.subtotal, 110.0);
        assert_eq!(totals.discount, 5.0);
        assert_eq!(totals.total, 105.0);
    }

    #[test]
    fn line_editing_coerces_and_ignores_bad_indexes() {
        let mut draft = SaleDraft::default();
        assert_eq!(draft.items.len(), 1);
        assert!(draft.set_item_field(0, "quantity", "zero"));
        assert_eq!(draft.items[0].quantity, 1);
        assert!(draft.set_item_field(0, "price", "12.50"));
        assert!(!draft.set_item_field(3, "price", "1"));
        assert!(!draft.set_item_field(0, "colour", "red"));

        draft.add_item();
        assert_eq!(draft.items.len(), 2);
        assert!(draft.remove_item(5).is_none());
        assert!(draft.remove_item(1).is_some());
        assert_eq!(draft.totals().total, 12.5);
    }
}
