//! Roles, modules and the capability table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Sales,
    Accountant,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Sales, Role::Accountant];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Sales => "Sales",
            Self::Accountant => "Accountant",
        }
    }

    /// Parses a role name. Matching is exact (`"admin"` is rejected).
    pub fn parse(value: &str) -> Result<Self, CapabilityParseError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(CapabilityParseError::Empty);
        }
        match normalized {
            "Admin" => Ok(Self::Admin),
            "Sales" => Ok(Self::Sales),
            "Accountant" => Ok(Self::Accountant),
            other => Err(CapabilityParseError::UnsupportedRole(other.to_string())),
        }
    }

    /// Modules this role may view, in navigation order.
    pub fn granted_modules(self) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|module| role_allows(self, *module, Action::View))
            .collect()
    }
}

/// Dashboard area a capability applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Dashboard,
    Stock,
    Inventory,
    Sales,
    Customers,
    Receipts,
    Financial,
    Banks,
    Users,
    Configuration,
}

impl Module {
    pub const ALL: [Module; 10] = [
        Module::Dashboard,
        Module::Stock,
        Module::Inventory,
        Module::Sales,
        Module::Customers,
        Module::Receipts,
        Module::Financial,
        Module::Banks,
        Module::Users,
        Module::Configuration,
    ];

    /// Stable permission id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Stock => "stock",
            Self::Inventory => "inventory",
            Self::Sales => "sales",
            Self::Customers => "customers",
            Self::Receipts => "receipts",
            Self::Financial => "financial",
            Self::Banks => "banks",
            Self::Users => "users",
            Self::Configuration => "configuration",
        }
    }

    /// User-facing permission label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard Access",
            Self::Stock => "Central Stock",
            Self::Inventory => "Inventory Management",
            Self::Sales => "Sales Management",
            Self::Customers => "Customer Management",
            Self::Receipts => "Receipts",
            Self::Financial => "Financial Reports",
            Self::Banks => "Bank Accounts",
            Self::Users => "User Management",
            Self::Configuration => "System Configuration",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CapabilityParseError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(CapabilityParseError::Empty);
        }
        Self::ALL
            .into_iter()
            .find(|module| module.as_str() == normalized)
            .ok_or_else(|| CapabilityParseError::UnsupportedModule(normalized.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// One granted `(module, action)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capability {
    pub module: Module,
    pub action: Action,
}

impl Capability {
    pub fn new(module: Module, action: Action) -> Self {
        Self { module, action }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module.as_str(), self.action.as_str())
    }
}

/// Per-screen gate flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenAccess {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Resolved capabilities of one role.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    granted: BTreeSet<Capability>,
}

impl CapabilitySet {
    /// Resolves the full capability table for `role`.
    pub fn for_role(role: Role) -> Self {
        let granted = Module::ALL
            .into_iter()
            .flat_map(|module| {
                Action::ALL
                    .into_iter()
                    .map(move |action| Capability::new(module, action))
            })
            .filter(|capability| role_allows(role, capability.module, capability.action))
            .collect();
        Self { granted }
    }

    pub fn allows(&self, module: Module, action: Action) -> bool {
        self.granted.contains(&Capability::new(module, action))
    }

    pub fn screen(&self, module: Module) -> ScreenAccess {
        ScreenAccess {
            can_view: self.allows(module, Action::View),
            can_create: self.allows(module, Action::Create),
            can_edit: self.allows(module, Action::Edit),
            can_delete: self.allows(module, Action::Delete),
        }
    }

    /// Modules visible in navigation.
    pub fn visible_modules(&self) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|module| self.allows(*module, Action::View))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.granted.iter()
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

fn role_allows(role: Role, module: Module, action: Action) -> bool {
    let admin = role == Role::Admin;
    let sales = role == Role::Sales;
    let accountant = role == Role::Accountant;

    match (module, action) {
        (Module::Dashboard, Action::View) => true,
        (Module::Dashboard, _) => false,
        (Module::Stock | Module::Sales | Module::Receipts, Action::Delete) => admin,
        (Module::Stock | Module::Sales | Module::Receipts, _) => admin || sales,
        (Module::Inventory, Action::View) => admin || sales,
        (Module::Inventory, _) => admin,
        (Module::Customers, Action::Delete) => admin,
        (Module::Customers, _) => admin || sales,
        (Module::Financial | Module::Banks, Action::Delete) => admin,
        (Module::Financial | Module::Banks, _) => admin || accountant,
        (Module::Users | Module::Configuration, _) => admin,
    }
}

/// Role/module parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityParseError {
    Empty,
    UnsupportedRole(String),
    UnsupportedModule(String),
}

impl Display for CapabilityParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "role or module value must not be empty"),
            Self::UnsupportedRole(value) => write!(f, "role is unsupported: {value}"),
            Self::UnsupportedModule(value) => write!(f, "module is unsupported: {value}"),
        }
    }
}

impl Error for CapabilityParseError {}

#[cfg(test)]
mod tests {
    use super::{Action, CapabilityParseError, CapabilitySet, Module, Role};

    #[test]
    fn parses_roles_exactly() {
        assert_eq!(Role::parse("Admin").expect("admin parse"), Role::Admin);
        assert_eq!(
            Role::parse(" Accountant ").expect("accountant parse"),
            Role::Accountant
        );
        assert_eq!(
            Role::parse("admin").expect_err("lowercase role must fail"),
            CapabilityParseError::UnsupportedRole("admin".to_string())
        );
        assert_eq!(
            Role::parse("  ").expect_err("empty role must fail"),
            CapabilityParseError::Empty
        );
    }

    #[test]
    fn parses_module_ids() {
        for module in Module::ALL {
            assert_eq!(Module::parse(module.as_str()).expect("module parse"), module);
        }
        assert_eq!(
            Module::parse("payroll").expect_err("unknown module must fail"),
            CapabilityParseError::UnsupportedModule("payroll".to_string())
        );
    }

    #[test]
    fn admin_is_granted_everything_except_dashboard_writes() {
        let caps = CapabilitySet::for_role(Role::Admin);
        assert_eq!(caps.len(), 9 * 4 + 1);
        assert_eq!(caps.visible_modules(), Module::ALL.to_vec());
        assert!(!caps.allows(Module::Dashboard, Action::Edit));
    }

    #[test]
    fn bank_gates_follow_accounting_roles() {
        let accountant = CapabilitySet::for_role(Role::Accountant).screen(Module::Banks);
        assert!(accountant.can_view && accountant.can_create && accountant.can_edit);
        assert!(!accountant.can_delete);

        let sales = CapabilitySet::for_role(Role::Sales).screen(Module::Banks);
        assert!(!sales.can_view && !sales.can_edit);
    }

    #[test]
    fn customer_gates_follow_sales_roles() {
        let sales = CapabilitySet::for_role(Role::Sales).screen(Module::Customers);
        assert!(sales.can_edit);
        assert!(!sales.can_delete);

        let accountant = CapabilitySet::for_role(Role::Accountant).screen(Module::Customers);
        assert!(!accountant.can_view);
    }

    #[test]
    fn granted_modules_match_navigation() {
        assert_eq!(
            Role::Sales.granted_modules(),
            vec![
                Module::Dashboard,
                Module::Stock,
                Module::Inventory,
                Module::Sales,
                Module::Customers,
                Module::Receipts,
            ]
        );
        assert_eq!(
            Role::Accountant.granted_modules(),
            vec![Module::Dashboard, Module::Financial, Module::Banks]
        );
    }

    #[test]
    fn users_and_configuration_are_admin_only() {
        for role in [Role::Sales, Role::Accountant] {
            let caps = CapabilitySet::for_role(role);
            for action in Action::ALL {
                assert!(!caps.allows(Module::Users, action));
                assert!(!caps.allows(Module::Configuration, action));
            }
        }
    }
}
