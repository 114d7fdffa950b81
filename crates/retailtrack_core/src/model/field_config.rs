//! Per-screen field visibility and requirement declarations.
//!
//! These declarations are configuration data only. No form consults them,
//! so a field marked `required` is not enforced anywhere in core.

use crate::filter::Searchable;
use crate::model::record::{patch_field, Entity, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    Sales,
    Customers,
    Inventory,
    Financial,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 4] = [
        FieldCategory::Sales,
        FieldCategory::Customers,
        FieldCategory::Inventory,
        FieldCategory::Financial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Customers => "customers",
            Self::Inventory => "inventory",
            Self::Financial => "financial",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Sales => "Sales Transactions",
            Self::Customers => "Customer Management",
            Self::Inventory => "Inventory Management",
            Self::Financial => "Financial Transactions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub id: RecordId,
    /// Stable lookup key, e.g. `customer_phone`.
    pub key: String,
    pub field_name: String,
    pub display_name: String,
    pub required: bool,
    pub visible: bool,
    pub category: FieldCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConfigPatch {
    pub display_name: Option<String>,
    pub required: Option<bool>,
    pub visible: Option<bool>,
}

impl Entity for FieldConfig {
    type Patch = FieldConfigPatch;
    const KIND: &'static str = "field_config";

    fn id(&self) -> RecordId {
        self.id
    }

    fn apply_patch(&mut self, patch: FieldConfigPatch) {
        patch_field(&mut self.display_name, patch.display_name);
        patch_field(&mut self.required, patch.required);
        patch_field(&mut self.visible, patch.visible);
    }
}

impl Searchable for FieldConfig {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.key.as_str(),
            self.field_name.as_str(),
            self.display_name.as_str(),
        ]
    }
}
