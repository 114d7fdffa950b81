use chrono::{DateTime, Duration, TimeZone, Utc};
use retailtrack_core::aggregate::{
    format_amount, sum_by, BankSummary, FinancialSummary, SalesSummary,
};
use retailtrack_core::model::bank::{AccountStatus, AccountType, BankAccount};
use retailtrack_core::model::finance::{CreditSale, CreditStatus, Transaction};
use retailtrack_core::model::record::new_record_id;
use retailtrack_core::model::sale::{PaymentStatus, Sale};
use retailtrack_core::{Desk, RecordFilter, Repository, Selector};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn account(balance: f64) -> BankAccount {
    BankAccount {
        id: new_record_id(),
        account_name: "Main Business Account".to_string(),
        bank_name: "First National Bank".to_string(),
        account_number: "****1234".to_string(),
        account_type: AccountType::Checking,
        balance,
        currency: "USD".to_string(),
        status: AccountStatus::Active,
        notes: String::new(),
    }
}

fn credit(amount: f64, paid: f64, status: CreditStatus, due_in_days: i64) -> CreditSale {
    CreditSale {
        id: new_record_id(),
        customer_name: "XYZ Ltd".to_string(),
        amount,
        due_date: Some(now() + Duration::days(due_in_days)),
        partial_payments: paid,
        status,
        reference: "CR002".to_string(),
    }
}

#[test]
fn empty_sum_is_zero() {
    let accounts: Vec<BankAccount> = Vec::new();
    assert_eq!(sum_by(&accounts, |account| account.balance), 0.0);
    assert_eq!(BankSummary::from_accounts(&accounts).total_balance, 0.0);
}

#[test]
fn sum_of_n_equal_records_is_n_times_x() {
    let x = 19.99;
    for n in [1_usize, 7, 250] {
        let accounts: Vec<BankAccount> = (0..n).map(|_| account(x)).collect();
        let total = BankSummary::from_accounts(&accounts).total_balance;
        assert!((total - n as f64 * x).abs() <= 0.01, "n={n} total={total}");
    }
}

#[test]
fn bank_total_of_seed_balances() {
    let accounts = vec![account(25000.0), account(50000.0)];
    let summary = BankSummary::from_accounts(&accounts);
    assert_eq!(format_amount(summary.total_balance), "75000.00");
    assert_eq!(summary.active_accounts, 2);
}

#[test]
fn outstanding_credit_counts_toward_overdue_when_past_due() {
    let overdue = credit(1800.0, 600.0, CreditStatus::Partial, -1);
    assert_eq!(format_amount(overdue.outstanding()), "1200.00");

    let transactions: Vec<Transaction> = Vec::new();
    let summary = FinancialSummary::compute(&transactions, &[overdue.clone()], now());
    assert_eq!(format_amount(summary.overdue_credit), "1200.00");
    assert_eq!(format_amount(summary.outstanding_credit), "1200.00");
}

#[test]
fn paid_or_future_credit_is_never_overdue() {
    let credits = vec![
        credit(1800.0, 600.0, CreditStatus::Paid, -10),
        credit(2500.0, 0.0, CreditStatus::Pending, 30),
    ];
    let transactions: Vec<Transaction> = Vec::new();
    let summary = FinancialSummary::compute(&transactions, &credits, now());
    assert_eq!(summary.overdue_credit, 0.0);
    assert_eq!(summary.outstanding_credit, 1200.0 + 2500.0);
}

#[test]
fn seed_financials_depend_on_evaluation_time() {
    let desk = Desk::with_builtin_fixtures().unwrap();

    let at_capture = desk.financial_summary(desk.as_of().unwrap());
    assert_eq!(at_capture.income, 2300.0);
    assert_eq!(at_capture.expense, 350.0);
    assert_eq!(at_capture.net, 1950.0);
    assert_eq!(at_capture.outstanding_credit, 3700.0);
    assert_eq!(at_capture.overdue_credit, 0.0);

    // CR002 is due 2024-02-04, CR001 on 2024-02-19.
    let between = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
    let later = desk.financial_summary(between);
    assert_eq!(format_amount(later.overdue_credit), "1200.00");
    assert_eq!(desk.overdue_credit_sales(between).len(), 1);

    let after_both = desk.financial_summary(now());
    assert_eq!(after_both.overdue_credit, 3700.0);
}

#[test]
fn seed_screen_summaries() {
    let desk = Desk::with_builtin_fixtures().unwrap();

    assert_eq!(format_amount(desk.bank_summary().total_balance), "75000.00");

    let credit = desk.customer_credit_summary();
    assert_eq!(credit.total_credit_limit, 8000.0);
    assert_eq!(credit.total_current_credit, 3300.0);
    assert_eq!(credit.total_available, 4700.0);

    let inventory = desk.inventory_summary();
    assert_eq!(inventory.low_stock_count, 2);
    assert_eq!(inventory.total_units, 87);
    assert_eq!(desk.low_stock_items().len(), 2);

    let stock = desk.stock_summary();
    assert_eq!(stock.total_units, 100);
    assert_eq!(stock.allocated_units, 75);
    assert_eq!(stock.available_units, 25);
    assert_eq!(stock.available_value, 1250.0);

    let receipts = desk.receipt_summary();
    assert_eq!(format_amount(receipts.still_exist), "1299.98");
    assert_eq!(receipts.still_exist_count, 2);
    assert_eq!(format_amount(receipts.only_receipt), "1299.99");
    assert_eq!(format_amount(receipts.total), "2599.97");

    let no_receipts = desk.no_receipt_summary();
    assert_eq!(format_amount(no_receipts.available), "450.00");
    assert_eq!(format_amount(no_receipts.sold), "299.99");
    assert_eq!(no_receipts.sold_count, 1);
}

fn payment_status(sale: &Sale) -> &str {
    sale.payment_status.as_str()
}

#[test]
fn sales_summary_follows_the_filtered_subset() {
    let desk = Desk::with_builtin_fixtures().unwrap();

    let all = desk.sales_summary(&RecordFilter::new());
    assert_eq!(all.count, 1);
    assert_eq!(all.total, 105.0);
    assert_eq!(all.bank_transfer, 105.0);
    assert_eq!(all.cash, 0.0);
    assert_eq!(all.pending_credit, 0.0);

    let pending_only = RecordFilter::new().select(
        Selector::Value(PaymentStatus::Pending.as_str().to_string()),
        payment_status,
    );
    assert_eq!(desk.sales_summary(&pending_only), SalesSummary::default());

    let by_slice = SalesSummary::from_sales(desk.sales.list());
    assert_eq!(by_slice, all);
}
