//! Per-screen summary values.
//!
//! Each summary is built from whatever slice the caller passes: the full
//! store for page totals, or a filtered subset where the screen shows totals
//! for the current filter (sales).

use crate::aggregate::{count_where, difference, sum_by, sum_where};
use crate::model::bank::{AccountStatus, BankAccount};
use crate::model::customer::Customer;
use crate::model::field_config::{FieldCategory, FieldConfig};
use crate::model::finance::{CreditSale, Transaction, TransactionType};
use crate::model::inventory::ShopItem;
use crate::model::receipt::{NoReceiptItem, NoReceiptStatus, ReceiptItem, ReceiptStatus};
use crate::model::sale::{PaymentMethod, PaymentStatus, Sale};
use crate::model::stock::StockItem;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BankSummary {
    pub total_balance: f64,
    pub active_accounts: usize,
}

impl BankSummary {
    pub fn from_accounts<'a, I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = &'a BankAccount> + Clone,
    {
        Self {
            total_balance: sum_by(accounts.clone(), |account| account.balance),
            active_accounts: count_where(accounts, |account| {
                account.status == AccountStatus::Active
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CustomerCreditSummary {
    pub total_credit_limit: f64,
    pub total_current_credit: f64,
    pub total_available: f64,
}

impl CustomerCreditSummary {
    pub fn from_customers<'a, I>(customers: I) -> Self
    where
        I: IntoIterator<Item = &'a Customer> + Clone,
    {
        let total_credit_limit = sum_by(customers.clone(), |customer| customer.credit_limit);
        let total_current_credit = sum_by(customers, |customer| customer.current_credit);
        Self {
            total_credit_limit,
            total_current_credit,
            total_available: difference(total_credit_limit, total_current_credit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesSummary {
    pub total: f64,
    /// Total of sales still awaiting payment.
    pub pending_credit: f64,
    pub cash: f64,
    pub bank_transfer: f64,
    pub count: usize,
}

impl SalesSummary {
    pub fn from_sales<'a, I>(sales: I) -> Self
    where
        I: IntoIterator<Item = &'a Sale> + Clone,
    {
        Self {
            total: sum_by(sales.clone(), |sale| sale.total),
            pending_credit: sum_where(
                sales.clone(),
                |sale| sale.payment_status == PaymentStatus::Pending,
                |sale| sale.total,
            ),
            cash: sum_where(
                sales.clone(),
                |sale| sale.payment_method == PaymentMethod::Cash,
                |sale| sale.total,
            ),
            bank_transfer: sum_where(
                sales.clone(),
                |sale| sale.payment_method == PaymentMethod::BankTransfer,
                |sale| sale.total,
            ),
            count: sales.into_iter().count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventorySummary {
    pub item_count: usize,
    pub low_stock_count: usize,
    pub total_units: i64,
}

impl InventorySummary {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ShopItem> + Clone,
    {
        Self {
            item_count: items.clone().into_iter().count(),
            low_stock_count: count_where(items.clone(), ShopItem::is_low_stock),
            total_units: items.into_iter().map(|item| item.current_stock).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StockSummary {
    pub total_units: i64,
    pub allocated_units: i64,
    pub available_units: i64,
    /// Cost value of units still in central stock.
    pub available_value: f64,
}

impl StockSummary {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a StockItem> + Clone,
    {
        let total_units: i64 = items.clone().into_iter().map(|item| item.total_stock).sum();
        let allocated_units: i64 = items.clone().into_iter().map(StockItem::allocated).sum();
        Self {
            total_units,
            allocated_units,
            available_units: total_units - allocated_units,
            available_value: sum_by(items, StockItem::available_value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReceiptSummary {
    /// Amount of receipted items still on hand.
    pub still_exist: f64,
    pub still_exist_count: usize,
    /// Amount of items for which only the receipt remains.
    pub only_receipt: f64,
    pub only_receipt_count: usize,
    pub total: f64,
}

impl ReceiptSummary {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ReceiptItem> + Clone,
    {
        let exists = |item: &ReceiptItem| item.status == ReceiptStatus::ItemExists;
        let only = |item: &ReceiptItem| item.status == ReceiptStatus::OnlyReceipt;
        Self {
            still_exist: sum_where(items.clone(), exists, |item| item.amount),
            still_exist_count: count_where(items.clone(), exists),
            only_receipt: sum_where(items.clone(), only, |item| item.amount),
            only_receipt_count: count_where(items.clone(), only),
            total: sum_by(items, |item| item.amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoReceiptSummary {
    pub available: f64,
    pub available_count: usize,
    pub sold: f64,
    pub sold_count: usize,
    pub total: f64,
}

impl NoReceiptSummary {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a NoReceiptItem> + Clone,
    {
        let available = |item: &NoReceiptItem| item.status == NoReceiptStatus::ItemAvailable;
        let sold = |item: &NoReceiptItem| item.status == NoReceiptStatus::ItemSold;
        Self {
            available: sum_where(items.clone(), available, |item| item.amount),
            available_count: count_where(items.clone(), available),
            sold: sum_where(items.clone(), sold, |item| item.amount),
            sold_count: count_where(items.clone(), sold),
            total: sum_by(items, |item| item.amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinancialSummary {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub outstanding_credit: f64,
    /// Outstanding amount of credit sales overdue at the evaluation time.
    pub overdue_credit: f64,
}

impl FinancialSummary {
    /// Computes the summary relative to `now`; overdue is time-dependent.
    pub fn compute<'a, T, C>(transactions: T, credit_sales: C, now: DateTime<Utc>) -> Self
    where
        T: IntoIterator<Item = &'a Transaction> + Clone,
        C: IntoIterator<Item = &'a CreditSale> + Clone,
    {
        let income = sum_where(
            transactions.clone(),
            |transaction| transaction.kind == TransactionType::Income,
            |transaction| transaction.amount,
        );
        let expense = sum_where(
            transactions,
            |transaction| transaction.kind == TransactionType::Expense,
            |transaction| transaction.amount,
        );
        Self {
            income,
            expense,
            net: difference(income, expense),
            outstanding_credit: sum_by(credit_sales.clone(), CreditSale::outstanding),
            overdue_credit: sum_where(
                credit_sales,
                |credit| credit.is_overdue(now),
                CreditSale::outstanding,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCategorySummary {
    pub category: FieldCategory,
    pub total: usize,
    pub visible: usize,
    pub required: usize,
}

impl FieldCategorySummary {
    pub fn for_category<'a, I>(configs: I, category: FieldCategory) -> Self
    where
        I: IntoIterator<Item = &'a FieldConfig> + Clone,
    {
        let in_category = |config: &FieldConfig| config.category == category;
        Self {
            category,
            total: count_where(configs.clone(), in_category),
            visible: count_where(configs.clone(), |config| {
                in_category(config) && config.visible
            }),
            required: count_where(configs, |config| in_category(config) && config.required),
        }
    }
}
