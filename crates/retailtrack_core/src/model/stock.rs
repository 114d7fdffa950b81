//! Central stock items and their allocation to shops.
//!
//! # Invariants
//! - At most one allocation per shop code.
//! - A transfer never pushes allocations above `total_stock`.

use crate::aggregate::difference;
use crate::coerce::{non_blank, parse_flag, parse_integer_or, parse_number_or_zero};
use crate::filter::Searchable;
use crate::form::{DraftFields, Draftable};
use crate::model::record::{patch_field, Entity, RecordId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Quantity of one stock item assigned to a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopAllocation {
    pub shop_code: String,
    pub shop_name: String,
    pub quantity: i64,
}

/// Stock transfer errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    InsufficientStock { requested: i64, available: i64 },
    /// Transfers move at least one unit.
    InvalidQuantity(i64),
    UnknownShop(String),
    UnknownItem(RecordId),
}

impl Display for StockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientStock {
                requested,
                available,
            } => write!(
                f,
                "insufficient stock: requested {requested}, available {available}"
            ),
            Self::InvalidQuantity(quantity) => {
                write!(f, "transfer quantity must be positive, got {quantity}")
            }
            Self::UnknownShop(code) => write!(f, "unknown shop: {code}"),
            Self::UnknownItem(id) => write!(f, "stock item not found: {id}"),
        }
    }
}

impl Error for StockError {}

/// Item held in central stock before distribution to shops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    pub category: String,
    pub unit: String,
    pub description: String,
    pub total_stock: i64,
    pub cost_price: f64,
    pub has_receipt: bool,
    pub receipt_number: Option<String>,
    pub supplier: Option<String>,
    pub purchase_date: DateTime<Utc>,
    pub shop_allocations: Vec<ShopAllocation>,
}

impl StockItem {
    pub fn allocated(&self) -> i64 {
        self.shop_allocations
            .iter()
            .map(|allocation| allocation.quantity)
            .sum()
    }

    /// Units still in central stock.
    pub fn available_stock(&self) -> i64 {
        self.total_stock - self.allocated()
    }

    pub fn allocation_for(&self, shop_code: &str) -> Option<&ShopAllocation> {
        self.shop_allocations
            .iter()
            .find(|allocation| allocation.shop_code == shop_code)
    }

    /// Moves `quantity` units from central stock to a shop.
    ///
    /// An existing allocation for the shop is merged and moved to the end.
    ///
    /// # Errors
    /// - `InvalidQuantity` when `quantity` is not positive.
    /// - `InsufficientStock` when `quantity` exceeds available stock.
    pub fn transfer_to_shop(
        &mut self,
        shop_code: &str,
        shop_name: &str,
        quantity: i64,
    ) -> Result<&ShopAllocation, StockError> {
        if quantity <= 0 {
            return Err(StockError::InvalidQuantity(quantity));
        }
        let available = self.available_stock();
        if quantity > available {
            return Err(StockError::InsufficientStock {
                requested: quantity,
                available,
            });
        }

        let previous = self
            .allocation_for(shop_code)
            .map_or(0, |allocation| allocation.quantity);
        self.shop_allocations
            .retain(|allocation| allocation.shop_code != shop_code);
        self.shop_allocations.push(ShopAllocation {
            shop_code: shop_code.to_string(),
            shop_name: shop_name.to_string(),
            quantity: previous + quantity,
        });

        Ok(&self.shop_allocations[self.shop_allocations.len() - 1])
    }

    /// Cost value of everything still in central stock.
    pub fn available_value(&self) -> f64 {
        difference(
            self.total_stock as f64 * self.cost_price,
            self.allocated() as f64 * self.cost_price,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockItemPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub total_stock: Option<i64>,
    pub cost_price: Option<f64>,
    pub has_receipt: Option<bool>,
    pub receipt_number: Option<Option<String>>,
    pub supplier: Option<Option<String>>,
    pub shop_allocations: Option<Vec<ShopAllocation>>,
}

impl Entity for StockItem {
    type Patch = StockItemPatch;
    const KIND: &'static str = "stock_item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: StockItemPatch) {
        patch_field(&mut self.name, patch.name);
        patch_field(&mut self.code, patch.code);
        patch_field(&mut self.category, patch.category);
        patch_field(&mut self.unit, patch.unit);
        patch_field(&mut self.description, patch.description);
        patch_field(&mut self.total_stock, patch.total_stock);
        patch_field(&mut self.cost_price, patch.cost_price);
        patch_field(&mut self.has_receipt, patch.has_receipt);
        patch_field(&mut self.receipt_number, patch.receipt_number);
        patch_field(&mut self.supplier, patch.supplier);
        patch_field(&mut self.shop_allocations, patch.shop_allocations);
    }
}

impl Searchable for StockItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.code.as_str()];
        if let Some(supplier) = self.supplier.as_deref() {
            fields.push(supplier);
        }
        fields
    }
}

/// Calendar day of purchase, for day filters.
pub fn purchase_day(item: &StockItem) -> Option<NaiveDate> {
    Some(item.purchase_date.date_naive())
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockItemDraft {
    pub name: String,
    pub code: String,
    pub category: String,
    pub unit: String,
    pub description: String,
    pub quantity: i64,
    pub cost_price: f64,
    pub has_receipt: bool,
    pub receipt_number: String,
    pub supplier: String,
}

impl Default for StockItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            category: String::new(),
            unit: String::new(),
            description: String::new(),
            quantity: 0,
            cost_price: 0.0,
            has_receipt: true,
            receipt_number: String::new(),
            supplier: String::new(),
        }
    }
}

impl DraftFields for StockItemDraft {
    fn set_field(&mut self, field: &str, raw: &str) -> bool {
        match field {
            "name" => self.name = raw.to_string(),
            "code" => self.code = raw.to_string(),
            "category" => self.category = raw.to_string(),
            "unit" => self.unit = raw.to_string(),
            "description" => self.description = raw.to_string(),
            "quantity" => self.quantity = parse_integer_or(raw, 0),
            "cost_price" => self.cost_price = parse_number_or_zero(raw),
            "has_receipt" => self.has_receipt = parse_flag(raw),
            "receipt_number" => self.receipt_number = raw.to_string(),
            "supplier" => self.supplier = raw.to_string(),
            _ => return false,
        }
        true
    }
}

impl Draftable for StockItem {
    type Draft = StockItemDraft;

    fn to_draft(&self) -> StockItemDraft {
        StockItemDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            category: self.category.clone(),
            unit: self.unit.clone(),
            description: self.description.clone(),
            quantity: self.total_stock,
            cost_price: self.cost_price,
            has_receipt: self.has_receipt,
            receipt_number: self.receipt_number.clone().unwrap_or_default(),
            supplier: self.supplier.clone().unwrap_or_default(),
        }
    }

    fn from_draft(id: RecordId, draft: StockItemDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            code: draft.code,
            category: draft.category,
            unit: draft.unit,
            description: draft.description,
            total_stock: draft.quantity,
            cost_price: draft.cost_price,
            has_receipt: draft.has_receipt,
            receipt_number: non_blank(&draft.receipt_number),
            supplier: non_blank(&draft.supplier),
            purchase_date: now,
            shop_allocations: Vec::new(),
        }
    }

    fn draft_patch(draft: StockItemDraft) -> StockItemPatch {
        StockItemPatch {
            name: Some(draft.name),
            code: Some(draft.code),
            category: Some(draft.category),
            unit: Some(draft.unit),
            description: Some(draft.description),
            total_stock: Some(draft.quantity),
            cost_price: Some(draft.cost_price),
            has_receipt: Some(draft.has_receipt),
            receipt_number: Some(non_blank(&draft.receipt_number)),
            supplier: Some(non_blank(&draft.supplier)),
            shop_allocations: None,
        }
    }
}
