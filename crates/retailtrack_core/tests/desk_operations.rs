use retailtrack_core::aggregate::format_amount;
use retailtrack_core::model::branch::BranchType;
use retailtrack_core::model::field_config::FieldCategory;
use retailtrack_core::model::receipt::{NoReceiptStatus, ReceiptStatus};
use retailtrack_core::model::record::new_record_id;
use retailtrack_core::model::stock::StockError;
use retailtrack_core::model::user::UserStatus;
use retailtrack_core::{Desk, RecordFilter, Repository, Role, ServiceError};

fn desk() -> Desk {
    Desk::with_builtin_fixtures().expect("builtin fixtures")
}

#[test]
fn transfer_merges_allocation_and_respects_available_stock() {
    let mut desk = desk();
    let item_id = desk.stock_items.list()[0].id;

    let allocation = desk.transfer_stock(item_id, "DS002", 20).unwrap();
    assert_eq!(allocation.shop_code, "DS002");
    assert_eq!(allocation.shop_name, "Downtown Store");
    assert_eq!(allocation.quantity, 50);

    let item = desk.stock_items.get(item_id).unwrap();
    assert_eq!(item.shop_allocations.len(), 2);
    assert_eq!(item.available_stock(), 5);

    let err = desk.transfer_stock(item_id, "MB001", 6).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Stock(StockError::InsufficientStock {
            requested: 6,
            available: 5
        })
    ));
    assert_eq!(desk.stock_items.get(item_id).unwrap().available_stock(), 5);

    desk.transfer_stock(item_id, "MB001", 5).unwrap();
    let item = desk.stock_items.get(item_id).unwrap();
    assert_eq!(item.available_stock(), 0);
    assert!(item.allocated() <= item.total_stock);
}

#[test]
fn transfer_rejects_unknown_references_and_empty_quantities() {
    let mut desk = desk();
    let item_id = desk.stock_items.list()[0].id;

    assert!(matches!(
        desk.transfer_stock(item_id, "XX999", 1),
        Err(ServiceError::Stock(StockError::UnknownShop(code))) if code == "XX999"
    ));
    let missing = new_record_id();
    assert!(matches!(
        desk.transfer_stock(missing, "MB001", 1),
        Err(ServiceError::Stock(StockError::UnknownItem(id))) if id == missing
    ));
    assert!(matches!(
        desk.transfer_stock(item_id, "MB001", 0),
        Err(ServiceError::Stock(StockError::InvalidQuantity(0)))
    ));
    assert_eq!(desk.stock_items.get(item_id).unwrap().allocated(), 75);
}

#[test]
fn receipt_status_toggles_back_and_forth() {
    let mut desk = desk();
    let id = desk.receipt_items.list()[0].id;

    assert_eq!(
        desk.toggle_receipt_status(id).unwrap(),
        ReceiptStatus::OnlyReceipt
    );
    assert_eq!(desk.receipt_summary().only_receipt_count, 2);
    assert_eq!(
        desk.toggle_receipt_status(id).unwrap(),
        ReceiptStatus::ItemExists
    );

    let sold_id = desk.no_receipt_items.list()[1].id;
    assert_eq!(
        desk.toggle_no_receipt_status(sold_id).unwrap(),
        NoReceiptStatus::ItemAvailable
    );
    assert_eq!(desk.no_receipt_summary().sold_count, 0);

    assert!(matches!(
        desk.toggle_receipt_status(new_record_id()),
        Err(ServiceError::NotFound { kind: "receipt_item", .. })
    ));
}

#[test]
fn user_status_toggles_between_active_and_inactive() {
    let mut desk = desk();
    let id = desk.users.list()[2].id;

    assert_eq!(desk.toggle_user_status(id).unwrap(), UserStatus::Inactive);
    assert_eq!(desk.users.get(id).unwrap().status, UserStatus::Inactive);
    assert_eq!(desk.users.get(id).unwrap().role, Role::Accountant);
    assert_eq!(desk.toggle_user_status(id).unwrap(), UserStatus::Active);

    assert!(matches!(
        desk.toggle_user_status(new_record_id()),
        Err(ServiceError::NotFound { kind: "user", .. })
    ));
}

#[test]
fn required_flag_only_changes_on_visible_fields() {
    let mut desk = desk();
    let tax = desk.field_config_by_key("sale_tax").unwrap().id;

    desk.set_field_required(tax, false).unwrap();
    assert!(!desk.field_configs.get(tax).unwrap().required);

    desk.set_field_visible(tax, false).unwrap();
    assert!(matches!(
        desk.set_field_required(tax, true),
        Err(ServiceError::FieldHidden(key)) if key == "sale_tax"
    ));

    desk.set_field_visible(tax, true).unwrap();
    desk.set_field_required(tax, true).unwrap();
    assert!(desk.field_configs.get(tax).unwrap().required);
}

#[test]
fn fields_group_by_category() {
    let mut desk = desk();
    let customers = desk.fields_by_category(FieldCategory::Customers);
    assert_eq!(customers.len(), 5);
    assert!(customers
        .iter()
        .all(|config| config.category == FieldCategory::Customers));

    let barcode = desk.field_config_by_key("inventory_barcode").unwrap().id;
    desk.set_field_visible(barcode, false).unwrap();

    let summaries = desk.field_category_summaries();
    assert_eq!(summaries.len(), 4);
    let inventory = summaries
        .iter()
        .find(|summary| summary.category == FieldCategory::Inventory)
        .unwrap();
    assert_eq!(inventory.total, 5);
    assert_eq!(inventory.visible, 4);
    assert_eq!(inventory.required, 2);
}

#[test]
fn main_branch_is_protected() {
    let mut desk = desk();
    let main = desk
        .branches
        .iter()
        .find(|branch| branch.kind == BranchType::Main)
        .unwrap()
        .id;
    let downtown = desk.branch_by_code("DS002").unwrap().id;

    assert!(matches!(
        desk.remove_branch(main),
        Err(ServiceError::ProtectedRecord { kind: "branch", .. })
    ));
    assert_eq!(desk.branches.len(), 2);

    let removed = desk.remove_branch(downtown).unwrap().unwrap();
    assert_eq!(removed.code, "DS002");
    assert!(desk.branch_by_code("DS002").is_none());

    assert!(desk.remove_branch(new_record_id()).unwrap().is_none());
}

#[test]
fn empty_desk_has_zero_summaries() {
    let desk = Desk::new();
    let total = desk.bank_summary().total_balance;
    assert!(total.is_sign_positive());
    assert_eq!(format_amount(total), "0.00");
    assert_eq!(desk.stock_summary().total_units, 0);
    assert!(desk.as_of().is_none());
    assert!(desk.fields_by_category(FieldCategory::Sales).is_empty());
}

#[test]
fn unmatched_seed_sums_render_as_zero() {
    let desk = desk();
    let sales = desk.sales_summary(&RecordFilter::new());
    assert_eq!(format_amount(sales.pending_credit), "0.00");
    assert_eq!(format_amount(sales.cash), "0.00");

    let finance = desk.financial_summary(desk.as_of().unwrap());
    assert_eq!(format_amount(finance.overdue_credit), "0.00");
}
