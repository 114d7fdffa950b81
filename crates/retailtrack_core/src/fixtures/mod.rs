//! Seed data documents.
//!
//! # Responsibility
//! - Deserialize seed records from a JSON document.
//! - Ship the built-in demo dataset embedded in the binary.
//!
//! # Invariants
//! - Missing collections deserialize as empty.
//! - Fixtures are plain data; uniqueness is checked when they are injected
//!   into stores.
//!
//! # See also
//! - `crate::service::desk::Desk::from_fixtures`

use crate::model::bank::BankAccount;
use crate::model::branch::Branch;
use crate::model::customer::Customer;
use crate::model::field_config::FieldConfig;
use crate::model::finance::{CreditSale, Transaction};
use crate::model::inventory::ShopItem;
use crate::model::receipt::{NoReceiptItem, ReceiptItem};
use crate::model::sale::Sale;
use crate::model::stock::StockItem;
use crate::model::user::User;
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN_SEED: &str = include_str!("../../fixtures/seed.json");

/// Fixture loading error.
#[derive(Debug)]
pub enum FixtureError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Store(StoreError),
}

impl Display for FixtureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read fixtures `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid fixture document: {err}"),
            Self::Store(err) => write!(f, "fixture rejected by store: {err}"),
        }
    }
}

impl Error for FixtureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<StoreError> for FixtureError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One seed document, one collection per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    /// Reference instant the dataset was captured at. Time-relative
    /// summaries of a static dataset should be evaluated against it.
    pub as_of: Option<DateTime<Utc>>,
    pub branches: Vec<Branch>,
    pub bank_accounts: Vec<BankAccount>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
    pub shop_items: Vec<ShopItem>,
    pub stock_items: Vec<StockItem>,
    pub receipt_items: Vec<ReceiptItem>,
    pub no_receipt_items: Vec<NoReceiptItem>,
    pub transactions: Vec<Transaction>,
    pub credit_sales: Vec<CreditSale>,
    pub users: Vec<User>,
    pub field_configs: Vec<FieldConfig>,
}

impl Fixtures {
    pub fn record_count(&self) -> usize {
        self.branches.len()
            + self.bank_accounts.len()
            + self.customers.len()
            + self.sales.len()
            + self.shop_items.len()
            + self.stock_items.len()
            + self.receipt_items.len()
            + self.no_receipt_items.len()
            + self.transactions.len()
            + self.credit_sales.len()
            + self.users.len()
            + self.field_configs.len()
    }
}

/// Parses the embedded demo dataset.
pub fn builtin_fixtures() -> Result<Fixtures, FixtureError> {
    let fixtures = load_fixtures_from_str(BUILTIN_SEED)?;
    info!(
        "event=fixtures_load module=fixtures status=ok source=builtin records={}",
        fixtures.record_count()
    );
    Ok(fixtures)
}

pub fn load_fixtures_from_str(document: &str) -> Result<Fixtures, FixtureError> {
    serde_json::from_str(document).map_err(|err| {
        error!("event=fixtures_load module=fixtures status=error error={err}");
        FixtureError::from(err)
    })
}

/// Reads and parses a fixture document from disk.
pub fn load_fixtures_from_path(path: &Path) -> Result<Fixtures, FixtureError> {
    let document = fs::read_to_string(path).map_err(|source| {
        error!(
            "event=fixtures_load module=fixtures status=error path={} error={source}",
            path.display()
        );
        FixtureError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let fixtures = load_fixtures_from_str(&document)?;
    info!(
        "event=fixtures_load module=fixtures status=ok path={} records={}",
        path.display(),
        fixtures.record_count()
    );
    Ok(fixtures)
}
