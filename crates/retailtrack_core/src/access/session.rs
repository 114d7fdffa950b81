//! Signed-in session with its resolved capability set.

use crate::access::capability::{Action, CapabilitySet, Module, Role};
use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Capability guard failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    Denied {
        role: Role,
        module: Module,
        action: Action,
    },
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied {
                role,
                module,
                action,
            } => write!(
                f,
                "role {} may not {} in {}",
                role.as_str(),
                action.as_str(),
                module.as_str()
            ),
        }
    }
}

impl Error for AccessError {}

/// Capabilities are resolved once when the session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    role: Role,
    display_name: String,
    capabilities: CapabilitySet,
}

impl Session {
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            display_name: role.as_str().to_string(),
            capabilities: CapabilitySet::for_role(role),
        }
    }

    pub fn for_user(user: &User) -> Self {
        let session = Self {
            role: user.role,
            display_name: user.full_name(),
            capabilities: CapabilitySet::for_role(user.role),
        };
        log::info!(
            "event=session_start module=access status=ok role={} capabilities={}",
            session.role.as_str(),
            session.capabilities.len()
        );
        session
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn can(&self, module: Module, action: Action) -> bool {
        self.capabilities.allows(module, action)
    }

    /// Guard for callers that want a typed denial instead of a flag.
    pub fn require(&self, module: Module, action: Action) -> Result<(), AccessError> {
        if self.can(module, action) {
            return Ok(());
        }
        log::warn!(
            "event=capability_denied module=access status=error role={} target={} action={}",
            self.role.as_str(),
            module.as_str(),
            action.as_str()
        );
        Err(AccessError::Denied {
            role: self.role,
            module,
            action,
        })
    }
}
