//! Store registry and screen operations.
//!
//! # Invariants
//! - Stores start empty or from injected fixtures; nothing is seeded here.
//! - `Main` branches are never removed.
//! - Stock transfers never allocate more than an item's available stock.
//! - `required` only changes on a visible field.

use crate::access::AccessError;
use crate::aggregate::{
    BankSummary, CustomerCreditSummary, FieldCategorySummary, FinancialSummary,
    InventorySummary, NoReceiptSummary, ReceiptSummary, SalesSummary, StockSummary,
};
use crate::filter::RecordFilter;
use crate::fixtures::{builtin_fixtures, FixtureError, Fixtures};
use crate::form::FormError;
use crate::model::bank::BankAccount;
use crate::model::branch::Branch;
use crate::model::customer::Customer;
use crate::model::field_config::{FieldCategory, FieldConfig, FieldConfigPatch};
use crate::model::finance::{CreditSale, Transaction};
use crate::model::inventory::ShopItem;
use crate::model::receipt::{
    NoReceiptItem, NoReceiptItemPatch, NoReceiptStatus, ReceiptItem, ReceiptItemPatch,
    ReceiptStatus,
};
use crate::model::record::{Entity, RecordId};
use crate::model::sale::Sale;
use crate::model::stock::{ShopAllocation, StockError, StockItem};
use crate::model::user::{User, UserPatch, UserStatus};
use crate::store::{MemoryStore, Repository, StoreError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from desk operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Target record does not exist.
    NotFound { kind: &'static str, id: RecordId },
    /// Record is protected from deletion.
    ProtectedRecord { kind: &'static str, id: RecordId },
    /// Requirement flags cannot change while a field is hidden.
    FieldHidden(String),
    Stock(StockError),
    Store(StoreError),
    Form(FormError),
    Access(AccessError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::ProtectedRecord { kind, id } => {
                write!(f, "{kind} is protected and cannot be removed: {id}")
            }
            Self::FieldHidden(key) => write!(f, "field `{key}` is hidden"),
            Self::Stock(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Form(err) => write!(f, "{err}"),
            Self::Access(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Stock(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Form(err) => Some(err),
            Self::Access(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StockError> for ServiceError {
    fn from(value: StockError) -> Self {
        Self::Stock(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Store(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(value: FormError) -> Self {
        match value {
            FormError::Store(err) => err.into(),
            other => Self::Form(other),
        }
    }
}

impl From<AccessError> for ServiceError {
    fn from(value: AccessError) -> Self {
        Self::Access(value)
    }
}

/// Facade over every entity store of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct Desk {
    pub branches: MemoryStore<Branch>,
    pub bank_accounts: MemoryStore<BankAccount>,
    pub customers: MemoryStore<Customer>,
    pub sales: MemoryStore<Sale>,
    pub shop_items: MemoryStore<ShopItem>,
    pub stock_items: MemoryStore<StockItem>,
    pub receipt_items: MemoryStore<ReceiptItem>,
    pub no_receipt_items: MemoryStore<NoReceiptItem>,
    pub transactions: MemoryStore<Transaction>,
    pub credit_sales: MemoryStore<CreditSale>,
    pub users: MemoryStore<User>,
    pub field_configs: MemoryStore<FieldConfig>,
    as_of: Option<DateTime<Utc>>,
}

impl Desk {
    /// Creates a desk with every store empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a fixture document into fresh stores.
    ///
    /// # Errors
    /// - `FixtureError::Store` when a collection repeats an id.
    pub fn from_fixtures(fixtures: Fixtures) -> Result<Self, FixtureError> {
        let record_count = fixtures.record_count();
        let desk = Self {
            branches: MemoryStore::with_records(fixtures.branches)?,
            bank_accounts: MemoryStore::with_records(fixtures.bank_accounts)?,
            customers: MemoryStore::with_records(fixtures.customers)?,
            sales: MemoryStore::with_records(fixtures.sales)?,
            shop_items: MemoryStore::with_records(fixtures.shop_items)?,
            stock_items: MemoryStore::with_records(fixtures.stock_items)?,
            receipt_items: MemoryStore::with_records(fixtures.receipt_items)?,
            no_receipt_items: MemoryStore::with_records(fixtures.no_receipt_items)?,
            transactions: MemoryStore::with_records(fixtures.transactions)?,
            credit_sales: MemoryStore::with_records(fixtures.credit_sales)?,
            users: MemoryStore::with_records(fixtures.users)?,
            field_configs: MemoryStore::with_records(fixtures.field_configs)?,
            as_of: fixtures.as_of,
        };
        info!("event=desk_seed module=service status=ok records={record_count}");
        Ok(desk)
    }

    /// Desk seeded with the embedded demo dataset.
    pub fn with_builtin_fixtures() -> Result<Self, FixtureError> {
        Self::from_fixtures(builtin_fixtures()?)
    }

    /// Capture instant of the injected dataset, if it declared one.
    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.as_of
    }

    pub fn branch_by_code(&self, code: &str) -> Option<&Branch> {
        self.branches.iter().find(|branch| branch.code == code)
    }

    /// Moves central stock to a shop identified by branch code.
    ///
    /// # Errors
    /// - `StockError::UnknownItem` / `StockError::UnknownShop` for unknown references.
    /// - `StockError::InsufficientStock` when `quantity` exceeds available stock.
    pub fn transfer_stock(
        &mut self,
        item_id: RecordId,
        shop_code: &str,
        quantity: i64,
    ) -> ServiceResult<ShopAllocation> {
        let shop_name = self
            .branch_by_code(shop_code)
            .map(|branch| branch.name.clone())
            .ok_or_else(|| StockError::UnknownShop(shop_code.to_string()))?;
        let transfer = self.stock_items.modify(item_id, |item| {
            item.transfer_to_shop(shop_code, &shop_name, quantity)
                .cloned()
        });
        let transfer = match transfer {
            Ok(transfer) => transfer,
            Err(StoreError::NotFound { .. }) => {
                return Err(StockError::UnknownItem(item_id).into());
            }
            Err(err) => return Err(err.into()),
        };

        match transfer {
            Ok(allocation) => {
                info!(
                    "event=stock_transfer module=service status=ok item={item_id} shop={shop_code} quantity={quantity} allocated={}",
                    allocation.quantity
                );
                Ok(allocation)
            }
            Err(err) => {
                warn!(
                    "event=stock_transfer module=service status=error item={item_id} shop={shop_code} error={err}"
                );
                Err(err.into())
            }
        }
    }

    /// Flips `item_exists` and `only_receipt`.
    pub fn toggle_receipt_status(&mut self, id: RecordId) -> ServiceResult<ReceiptStatus> {
        let next = self
            .receipt_items
            .get(id)
            .map(|item| item.status.toggled())
            .ok_or(ServiceError::NotFound {
                kind: ReceiptItem::KIND,
                id,
            })?;
        self.receipt_items.update(
            id,
            ReceiptItemPatch {
                status: Some(next),
                ..ReceiptItemPatch::default()
            },
        );
        Ok(next)
    }

    /// Flips `item_available` and `item_sold`.
    pub fn toggle_no_receipt_status(&mut self, id: RecordId) -> ServiceResult<NoReceiptStatus> {
        let next = self
            .no_receipt_items
            .get(id)
            .map(|item| item.status.toggled())
            .ok_or(ServiceError::NotFound {
                kind: NoReceiptItem::KIND,
                id,
            })?;
        self.no_receipt_items.update(
            id,
            NoReceiptItemPatch {
                status: Some(next),
                ..NoReceiptItemPatch::default()
            },
        );
        Ok(next)
    }

    /// Flips a user between `Active` and `Inactive`.
    pub fn toggle_user_status(&mut self, id: RecordId) -> ServiceResult<UserStatus> {
        let next = self
            .users
            .get(id)
            .map(|user| user.status.toggled())
            .ok_or(ServiceError::NotFound {
                kind: User::KIND,
                id,
            })?;
        self.users.update(
            id,
            UserPatch {
                status: Some(next),
                ..UserPatch::default()
            },
        );
        info!(
            "event=user_status module=service status=ok id={id} value={}",
            next.as_str()
        );
        Ok(next)
    }

    pub fn field_config_by_key(&self, key: &str) -> Option<&FieldConfig> {
        self.field_configs.iter().find(|config| config.key == key)
    }

    pub fn set_field_visible(&mut self, id: RecordId, visible: bool) -> ServiceResult<()> {
        let patch = FieldConfigPatch {
            visible: Some(visible),
            ..FieldConfigPatch::default()
        };
        if self.field_configs.update(id, patch) {
            Ok(())
        } else {
            Err(ServiceError::NotFound {
                kind: FieldConfig::KIND,
                id,
            })
        }
    }

    /// # Errors
    /// - `FieldHidden` while the field is not visible.
    pub fn set_field_required(&mut self, id: RecordId, required: bool) -> ServiceResult<()> {
        let config = self.field_configs.get(id).ok_or(ServiceError::NotFound {
            kind: FieldConfig::KIND,
            id,
        })?;
        if !config.visible {
            return Err(ServiceError::FieldHidden(config.key.clone()));
        }
        self.field_configs.update(
            id,
            FieldConfigPatch {
                required: Some(required),
                ..FieldConfigPatch::default()
            },
        );
        Ok(())
    }

    pub fn fields_by_category(&self, category: FieldCategory) -> Vec<&FieldConfig> {
        self.field_configs
            .iter()
            .filter(|config| config.category == category)
            .collect()
    }

    pub fn field_category_summaries(&self) -> Vec<FieldCategorySummary> {
        FieldCategory::ALL
            .into_iter()
            .map(|category| FieldCategorySummary::for_category(self.field_configs.iter(), category))
            .collect()
    }

    /// Removes a branch unless it is the main one. Unknown ids are a no-op.
    ///
    /// # Errors
    /// - `ProtectedRecord` for `Main` branches.
    pub fn remove_branch(&mut self, id: RecordId) -> ServiceResult<Option<Branch>> {
        if self.branches.get(id).is_some_and(Branch::is_main) {
            warn!("event=branch_remove module=service status=error id={id} reason=protected");
            return Err(ServiceError::ProtectedRecord {
                kind: Branch::KIND,
                id,
            });
        }
        Ok(self.branches.remove(id))
    }

    pub fn bank_summary(&self) -> BankSummary {
        BankSummary::from_accounts(self.bank_accounts.iter())
    }

    pub fn customer_credit_summary(&self) -> CustomerCreditSummary {
        CustomerCreditSummary::from_customers(self.customers.iter())
    }

    /// Sales totals over the filtered subset.
    pub fn sales_summary(&self, filter: &RecordFilter<Sale>) -> SalesSummary {
        SalesSummary::from_sales(filter.apply(self.sales.list()).into_iter())
    }

    pub fn inventory_summary(&self) -> InventorySummary {
        InventorySummary::from_items(self.shop_items.iter())
    }

    pub fn low_stock_items(&self) -> Vec<&ShopItem> {
        self.shop_items
            .iter()
            .filter(|item| item.is_low_stock())
            .collect()
    }

    pub fn stock_summary(&self) -> StockSummary {
        StockSummary::from_items(self.stock_items.iter())
    }

    pub fn receipt_summary(&self) -> ReceiptSummary {
        ReceiptSummary::from_items(self.receipt_items.iter())
    }

    pub fn no_receipt_summary(&self) -> NoReceiptSummary {
        NoReceiptSummary::from_items(self.no_receipt_items.iter())
    }

    pub fn financial_summary(&self, now: DateTime<Utc>) -> FinancialSummary {
        FinancialSummary::compute(self.transactions.iter(), self.credit_sales.iter(), now)
    }

    pub fn overdue_credit_sales(&self, now: DateTime<Utc>) -> Vec<&CreditSale> {
        self.credit_sales
            .iter()
            .filter(|credit| credit.is_overdue(now))
            .collect()
    }
}
