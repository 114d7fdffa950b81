//! Derived numbers over entity collections.
//!
//! # Responsibility
//! - Sum and count helpers over any record iterator.
//! - Difference-derived and time-relative predicates shared by the models.
//!
//! # Invariants
//! - Pure: nothing here is cached; every summary is recomputed per call.
//! - Sums over an empty input are `0.0`.
//!
//! # See also
//! - `summary` for the per-screen summary structs.

pub mod summary;

use chrono::{DateTime, Utc};

pub use summary::{
    BankSummary, CustomerCreditSummary, FieldCategorySummary, FinancialSummary,
    InventorySummary, NoReceiptSummary, ReceiptSummary, SalesSummary, StockSummary,
};

/// Sums `value` over every record.
pub fn sum_by<'a, E, I, F>(records: I, value: F) -> f64
where
    E: 'a,
    I: IntoIterator<Item = &'a E>,
    F: Fn(&E) -> f64,
{
    records
        .into_iter()
        .map(value)
        .fold(0.0, |total, amount| total + amount)
}

/// Sums `value` over records matching `predicate`.
pub fn sum_where<'a, E, I, P, F>(records: I, predicate: P, value: F) -> f64
where
    E: 'a,
    I: IntoIterator<Item = &'a E>,
    P: Fn(&E) -> bool,
    F: Fn(&E) -> f64,
{
    records
        .into_iter()
        .filter(|record| predicate(record))
        .map(value)
        .fold(0.0, |total, amount| total + amount)
}

pub fn count_where<'a, E, I, P>(records: I, predicate: P) -> usize
where
    E: 'a,
    I: IntoIterator<Item = &'a E>,
    P: Fn(&E) -> bool,
{
    records
        .into_iter()
        .filter(|record| predicate(record))
        .count()
}

/// `total - used`. Negative results are kept, not clamped.
pub fn difference(total: f64, used: f64) -> f64 {
    total - used
}

/// Strictly past due and not in a terminal status.
pub fn is_overdue(due: DateTime<Utc>, now: DateTime<Utc>, terminal: bool) -> bool {
    due < now && !terminal
}

/// Two-decimal rendering used by every summary display. Never renders `-0.00`.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{:.2}", rounded + 0.0)
}
