use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use retailtrack_core::access::{Module, Role};
use retailtrack_core::form::FormState;
use retailtrack_core::model::bank::BankAccount;
use retailtrack_core::model::finance::{CreditSale, CreditStatus};
use retailtrack_core::model::receipt::{ReceiptItem, ReceiptStatus};
use retailtrack_core::model::sale::{PaymentMethod, Sale, DEFAULT_SALES_PERSON};
use retailtrack_core::model::stock::StockItem;
use retailtrack_core::model::user::User;
use retailtrack_core::{
    Desk, FormError, FormSession, MemoryStore, Repository, SubmitOutcome,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 21, 8, 30, 0).unwrap()
}

#[test]
fn non_numeric_balance_is_stored_as_zero() {
    let mut store: MemoryStore<BankAccount> = MemoryStore::new();
    let mut form = FormSession::<BankAccount>::new();

    form.open_create();
    form.set_field("account_name", "Petty Cash").unwrap();
    form.set_field("bank_name", "City Bank").unwrap();
    form.set_field("balance", "lots of money").unwrap();

    let outcome = form.submit(&mut store, now()).unwrap();
    let SubmitOutcome::Created(id) = outcome else {
        panic!("expected create, got {outcome:?}");
    };
    let stored = store.get(id).unwrap();
    assert_eq!(stored.balance, 0.0);
    assert_eq!(stored.currency, "USD");
    assert!(!form.is_editing());
}

#[test]
fn permissive_number_parse_keeps_leading_digits() {
    let mut store: MemoryStore<BankAccount> = MemoryStore::new();
    let mut form = FormSession::<BankAccount>::new();
    form.open_create();
    form.set_field("balance", "1250.75 USD").unwrap();
    let id = form.submit(&mut store, now()).unwrap().record_id();
    assert_eq!(store.get(id).unwrap().balance, 1250.75);
}

#[test]
fn edit_submit_updates_in_place() {
    let mut desk = Desk::with_builtin_fixtures().unwrap();
    let target = desk.bank_accounts.list()[1].clone();

    let mut form = FormSession::<BankAccount>::new();
    form.open_edit(&target);
    assert_eq!(form.target(), Some(target.id));
    assert_eq!(form.draft().unwrap().balance, target.balance);
    form.set_field("balance", "51000").unwrap();

    let outcome = form.submit(&mut desk.bank_accounts, now()).unwrap();
    assert_eq!(outcome, SubmitOutcome::Updated(target.id));
    assert_eq!(desk.bank_accounts.len(), 2);
    assert_eq!(desk.bank_accounts.list()[1].id, target.id);
    assert_eq!(desk.bank_accounts.list()[1].balance, 51000.0);
    assert_eq!(desk.bank_summary().total_balance, 76000.0);
}

#[test]
fn edit_of_vanished_record_is_skipped() {
    let mut desk = Desk::with_builtin_fixtures().unwrap();
    let target = desk.bank_accounts.list()[0].clone();

    let mut form = FormSession::<BankAccount>::new();
    form.open_edit(&target);
    desk.bank_accounts.remove(target.id);

    let outcome = form.submit(&mut desk.bank_accounts, now()).unwrap();
    assert_eq!(outcome, SubmitOutcome::Skipped(target.id));
    assert_eq!(desk.bank_accounts.len(), 1);
}

#[test]
fn cancel_discards_draft_and_submit_requires_editing() {
    let mut store: MemoryStore<BankAccount> = MemoryStore::new();
    let mut form = FormSession::<BankAccount>::new();

    form.open_create();
    form.set_field("account_name", "Draft").unwrap();
    form.cancel();
    assert_eq!(form.state(), &FormState::Empty);

    assert!(matches!(
        form.submit(&mut store, now()),
        Err(FormError::NotEditing)
    ));
    assert!(matches!(
        form.set_field("account_name", "x"),
        Err(FormError::NotEditing)
    ));
    assert!(store.is_empty());
}

#[test]
fn unknown_field_is_reported() {
    let mut form = FormSession::<BankAccount>::new();
    form.open_create();
    let err = form.set_field("iban", "DE00").unwrap_err();
    assert!(matches!(
        err,
        FormError::UnknownField { kind: "bank_account", ref field } if field == "iban"
    ));
    assert!(form.is_editing());
}

#[test]
fn sale_submit_derives_totals_and_defaults() {
    let mut desk = Desk::with_builtin_fixtures().unwrap();
    let customer = desk.customers.list()[1].clone();
    let shop = desk.branch_by_code("DS002").unwrap().clone();
    let catalog = desk.shop_items.list()[2].clone();

    let mut form = FormSession::<Sale>::new();
    form.open_create();
    {
        let draft = form.draft_mut().unwrap();
        draft.select_customer(&customer);
        draft.select_shop(&shop);
        draft.select_catalog_item(0, &catalog);
        draft.set_item_field(0, "quantity", "3");
        draft.set_item_field(0, "discount", "5");
        draft.add_item();
        draft.set_item_field(1, "name", "Gift bag");
        draft.set_item_field(1, "quantity", "n/a");
        draft.set_item_field(1, "price", "2.5");
    }

    let id = form.submit(&mut desk.sales, now()).unwrap().record_id();
    let sale = desk.sales.get(id).unwrap();
    assert_eq!(desk.sales.list()[0].id, id);
    assert_eq!(sale.items[1].quantity, 1);
    assert_eq!(sale.subtotal, 47.5);
    assert_eq!(sale.discount, 5.0);
    assert_eq!(sale.total, 42.5);
    assert_eq!(sale.payment_method, PaymentMethod::Cash);
    assert_eq!(sale.customer_id, Some(customer.id));
    assert_eq!(sale.shop_code, "DS002");
    assert_eq!(sale.sales_person, DEFAULT_SALES_PERSON);
    assert_eq!(
        sale.receipt_number.as_deref(),
        Some(format!("RCP{}", now().timestamp_millis()).as_str())
    );
}

#[test]
fn catalog_line_keeps_item_receipt_origin() {
    let desk = Desk::with_builtin_fixtures().unwrap();
    let coffee = desk.shop_items.list()[1].clone();
    assert!(!coffee.from_receipt);

    let mut form = FormSession::<Sale>::new();
    form.open_create();
    let draft = form.draft_mut().unwrap();
    assert!(draft.items[0].from_receipt);
    assert!(draft.select_catalog_item(0, &coffee));
    assert!(!draft.items[0].from_receipt);
    assert_eq!(draft.items[0].price, coffee.selling_price);
}

#[test]
fn credit_sale_create_starts_pending() {
    let mut store: MemoryStore<CreditSale> = MemoryStore::new();
    let mut form = FormSession::<CreditSale>::new();
    form.open_create();
    form.set_field("customer_name", "ABC Corporation").unwrap();
    form.set_field("amount", "2500").unwrap();
    form.set_field("due_date", "2024-02-19").unwrap();

    let id = form.submit(&mut store, now()).unwrap().record_id();
    let credit = store.get(id).unwrap();
    assert_eq!(credit.status, CreditStatus::Pending);
    assert_eq!(credit.partial_payments, 0.0);
    assert_eq!(
        credit.due_date,
        Some(Utc.with_ymd_and_hms(2024, 2, 19, 0, 0, 0).unwrap())
    );
    assert!(credit.reference.starts_with("CR"));
}

#[test]
fn unparsable_date_leaves_field_unset() {
    let mut store: MemoryStore<ReceiptItem> = MemoryStore::new();
    let mut form = FormSession::<ReceiptItem>::new();
    form.open_create();
    form.set_field("receipt_number", "REC004").unwrap();
    form.set_field("purchase_date", "last tuesday").unwrap();
    let id = form.submit(&mut store, now()).unwrap().record_id();
    let item = store.get(id).unwrap();
    assert_eq!(item.purchase_date, None);
    assert_eq!(item.status, ReceiptStatus::ItemExists);

    form.open_edit(item);
    form.set_field("purchase_date", "2024-01-15").unwrap();
    form.submit(&mut store, now()).unwrap();
    assert_eq!(
        store.get(id).unwrap().purchase_date,
        NaiveDate::from_ymd_opt(2024, 1, 15)
    );
}

#[test]
fn stock_create_sets_total_from_quantity() {
    let mut store: MemoryStore<StockItem> = MemoryStore::new();
    let mut form = FormSession::<StockItem>::new();
    form.open_create();
    form.set_field("name", "Phone Case").unwrap();
    form.set_field("quantity", "40").unwrap();
    form.set_field("cost_price", "4.5").unwrap();
    let id = form.submit(&mut store, now()).unwrap().record_id();

    let item = store.get(id).unwrap();
    assert_eq!(item.total_stock, 40);
    assert_eq!(item.available_stock(), 40);
    assert!(item.shop_allocations.is_empty());
    assert_eq!(item.purchase_date, now());
}

#[test]
fn user_save_derives_permissions_from_role() {
    let mut store: MemoryStore<User> = MemoryStore::new();
    let mut form = FormSession::<User>::new();
    form.open_create();
    form.set_field("first_name", "Bob").unwrap();
    form.set_field("role", "Accountant").unwrap();
    let id = form.submit(&mut store, now()).unwrap().record_id();

    let user = store.get(id).unwrap().clone();
    assert_eq!(user.role, Role::Accountant);
    assert_eq!(
        user.permissions,
        vec![Module::Dashboard, Module::Financial, Module::Banks]
    );
    assert_eq!(user.last_login, None);
    assert_eq!(user.created_at, now());

    form.open_edit(&user);
    form.set_field("role", "Admin").unwrap();
    form.submit(&mut store, now()).unwrap();
    let user = store.get(id).unwrap();
    assert_eq!(user.permissions, Role::Admin.granted_modules());
    assert_eq!(user.created_at, now());
}
