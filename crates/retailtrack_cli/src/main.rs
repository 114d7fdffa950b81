//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `retailtrack_core` linkage and fixture loading end to end.
//! - Print the dashboard summaries of the loaded dataset.
//!
//! Usage: `retailtrack_cli [config.json]`

use chrono::Utc;
use retailtrack_core::aggregate::format_amount;
use retailtrack_core::{
    builtin_fixtures, init_logging_from_config, load_fixtures_from_path, CoreConfig, Desk,
    RecordFilter, Role, Session,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = CoreConfig::resolve(config_path.as_deref())?;
    init_logging_from_config(&config)?;

    let fixtures = match config.fixtures_path.as_deref() {
        Some(path) => load_fixtures_from_path(path)?,
        None => builtin_fixtures()?,
    };
    let desk = Desk::from_fixtures(fixtures)?;
    // Static datasets are evaluated at their capture instant.
    let now = desk.as_of().unwrap_or_else(Utc::now);

    println!("retailtrack_core ping={}", retailtrack_core::ping());
    println!("retailtrack_core version={}", retailtrack_core::core_version());

    let banks = desk.bank_summary();
    println!(
        "banks total_balance={} active={}",
        format_amount(banks.total_balance),
        banks.active_accounts
    );

    let credit = desk.customer_credit_summary();
    println!(
        "customers credit_limit={} current_credit={} available={}",
        format_amount(credit.total_credit_limit),
        format_amount(credit.total_current_credit),
        format_amount(credit.total_available)
    );

    let sales = desk.sales_summary(&RecordFilter::new());
    println!(
        "sales count={} total={} pending={} cash={} bank_transfer={}",
        sales.count,
        format_amount(sales.total),
        format_amount(sales.pending_credit),
        format_amount(sales.cash),
        format_amount(sales.bank_transfer)
    );

    let inventory = desk.inventory_summary();
    println!(
        "inventory items={} low_stock={} units={}",
        inventory.item_count, inventory.low_stock_count, inventory.total_units
    );

    let stock = desk.stock_summary();
    println!(
        "stock total={} allocated={} available={}",
        stock.total_units, stock.allocated_units, stock.available_units
    );

    let receipts = desk.receipt_summary();
    let no_receipts = desk.no_receipt_summary();
    println!(
        "receipts still_exist={} only_receipt={} total={} no_receipt_available={} no_receipt_sold={}",
        format_amount(receipts.still_exist),
        format_amount(receipts.only_receipt),
        format_amount(receipts.total),
        format_amount(no_receipts.available),
        format_amount(no_receipts.sold)
    );

    let finance = desk.financial_summary(now);
    println!(
        "financial income={} expense={} net={} outstanding={} overdue={}",
        format_amount(finance.income),
        format_amount(finance.expense),
        format_amount(finance.net),
        format_amount(finance.outstanding_credit),
        format_amount(finance.overdue_credit)
    );

    for summary in desk.field_category_summaries() {
        println!(
            "fields category={} total={} visible={} required={}",
            summary.category.as_str(),
            summary.total,
            summary.visible,
            summary.required
        );
    }

    for role in Role::ALL {
        let session = Session::for_role(role);
        let modules = session
            .capabilities()
            .visible_modules()
            .into_iter()
            .map(|module| module.as_str())
            .collect::<Vec<_>>()
            .join(",");
        println!("role {} modules={modules}", role.as_str());
    }

    Ok(())
}
