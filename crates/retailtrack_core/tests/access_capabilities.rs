use retailtrack_core::access::{AccessError, CapabilityParseError, ScreenAccess};
use retailtrack_core::{Action, Desk, Module, Repository, Role, ServiceError, Session};

#[test]
fn every_role_sees_the_dashboard() {
    for role in Role::ALL {
        let session = Session::for_role(role);
        assert!(session.can(Module::Dashboard, Action::View), "{role:?}");
        assert!(!session.can(Module::Dashboard, Action::Delete), "{role:?}");
    }
}

#[test]
fn navigation_follows_role() {
    let sales = Session::for_role(Role::Sales);
    assert_eq!(
        sales.capabilities().visible_modules(),
        vec![
            Module::Dashboard,
            Module::Stock,
            Module::Inventory,
            Module::Sales,
            Module::Customers,
            Module::Receipts,
        ]
    );

    let accountant = Session::for_role(Role::Accountant);
    assert_eq!(
        accountant.capabilities().visible_modules(),
        vec![Module::Dashboard, Module::Financial, Module::Banks]
    );

    let admin = Session::for_role(Role::Admin);
    assert_eq!(admin.capabilities().visible_modules(), Module::ALL.to_vec());
}

#[test]
fn destructive_actions_are_admin_only() {
    let sales = Session::for_role(Role::Sales);
    assert_eq!(
        sales.capabilities().screen(Module::Customers),
        ScreenAccess {
            can_view: true,
            can_create: true,
            can_edit: true,
            can_delete: false,
        }
    );
    assert_eq!(
        sales.capabilities().screen(Module::Inventory),
        ScreenAccess {
            can_view: true,
            ..ScreenAccess::default()
        }
    );

    let accountant = Session::for_role(Role::Accountant);
    assert!(accountant.can(Module::Banks, Action::Edit));
    assert!(!accountant.can(Module::Banks, Action::Delete));
    assert!(!accountant.can(Module::Users, Action::View));

    let admin = Session::for_role(Role::Admin);
    for module in Module::ALL {
        if module != Module::Dashboard {
            assert!(admin.can(module, Action::Delete), "{module:?}");
        }
    }
}

#[test]
fn require_reports_typed_denial() {
    let sales = Session::for_role(Role::Sales);
    assert_eq!(sales.require(Module::Sales, Action::Create), Ok(()));

    let err = sales
        .require(Module::Configuration, Action::Edit)
        .unwrap_err();
    assert_eq!(
        err,
        AccessError::Denied {
            role: Role::Sales,
            module: Module::Configuration,
            action: Action::Edit,
        }
    );
    assert_eq!(err.to_string(), "role Sales may not edit in configuration");

    let wrapped: ServiceError = err.into();
    assert!(matches!(wrapped, ServiceError::Access(_)));
}

#[test]
fn session_from_seed_user() {
    let desk = Desk::with_builtin_fixtures().unwrap();
    let jane = desk
        .users
        .iter()
        .find(|user| user.role == Role::Sales)
        .unwrap();

    let session = Session::for_user(jane);
    assert_eq!(session.display_name(), "Jane Smith");
    assert_eq!(session.role(), Role::Sales);
    assert_eq!(
        session.capabilities().visible_modules(),
        Role::Sales.granted_modules()
    );
    assert_eq!(desk.users.len(), 3);
}

#[test]
fn role_and_module_parsing() {
    assert_eq!(Role::parse(" Accountant "), Ok(Role::Accountant));
    assert_eq!(Role::parse(""), Err(CapabilityParseError::Empty));
    assert!(matches!(
        Role::parse("admin"),
        Err(CapabilityParseError::UnsupportedRole(value)) if value == "admin"
    ));
    assert_eq!(Module::parse("banks"), Ok(Module::Banks));
    assert!(matches!(
        Module::parse("reports"),
        Err(CapabilityParseError::UnsupportedModule(_))
    ));
}
