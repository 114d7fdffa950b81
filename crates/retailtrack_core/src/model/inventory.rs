//! Per-shop inventory items.

use crate::filter::Searchable;
use crate::model::record::{patch_field, Entity, RecordId};
use serde::{Deserialize, Serialize};

/// Item stocked and sold by one shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    pub category: String,
    pub unit: String,
    pub description: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub selling_price: f64,
    /// Branch code of the shop holding this item.
    pub shop_code: String,
    pub shop_name: String,
    pub from_receipt: bool,
}

impl ShopItem {
    /// Low stock includes sitting exactly at the minimum.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopItemPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub current_stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub selling_price: Option<f64>,
    pub shop_code: Option<String>,
    pub shop_name: Option<String>,
    pub from_receipt: Option<bool>,
}

impl Entity for ShopItem {
    type Patch = ShopItemPatch;
    const KIND: &'static str = "shop_item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: ShopItemPatch) {
        patch_field(&mut self.name, patch.name);
        patch_field(&mut self.code, patch.code);
        patch_field(&mut self.category, patch.category);
        patch_field(&mut self.unit, patch.unit);
        patch_field(&mut self.description, patch.description);
        patch_field(&mut self.current_stock, patch.current_stock);
        patch_field(&mut self.min_stock, patch.min_stock);
        patch_field(&mut self.selling_price, patch.selling_price);
        patch_field(&mut self.shop_code, patch.shop_code);
        patch_field(&mut self.shop_name, patch.shop_name);
        patch_field(&mut self.from_receipt, patch.from_receipt);
    }
}

impl Searchable for ShopItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str()]
    }
}

/// Product categories offered by item pickers.
pub const PRODUCT_CATEGORIES: &[&str] = &[
    "Electronics",
    "Food & Beverage",
    "Clothing",
    "Books",
    "Health & Beauty",
];
