//! Contexts
//!
//! A context is one site taking part in reconciliation, together with the
//! user it runs as and the lists loaded for that user. The target context
//! is always first; source contexts follow in registration order.

pub mod membership;
pub mod site;
pub mod user;

pub use membership::{
    by_id, by_name, default_decision, qualified_name, Decision, Identity, Membership,
    ProcessingType, RecordedDecision, DEFAULT_LIST, DEFAULT_TYPE, QUALIFIER_SEP,
};
pub use site::{EntryHandle, EntryKey, EntryLocator, IdentityLookup, PageType, SourceSite, TargetSite};
pub use user::{UserInfo, UserLookup, UserMapping, NO_USER};

use crate::error::RegistrationError;
use crate::store::{List, Lists};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRole {
    Target,
    Source,
}

impl ContextRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextRole::Target => "target",
            ContextRole::Source => "source",
        }
    }
}

impl fmt::Display for ContextRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime state of one registered site
#[derive(Debug, Clone)]
pub struct Context {
    pub name: String,
    pub role: ContextRole,
    pub user: String,
    pub user_payload: Option<serde_json::Value>,
    pub lists: Lists,
    pub page_type: Option<PageType>,
}

impl Context {
    pub fn new(name: impl Into<String>, role: ContextRole) -> Self {
        Self {
            name: name.into(),
            role,
            user: NO_USER.to_string(),
            user_payload: None,
            lists: Lists::new(),
            page_type: None,
        }
    }

    pub fn set_user(&mut self, user: UserInfo) {
        self.user = user.name;
        self.user_payload = user.payload;
    }

    pub fn list(&self, list_name: &str) -> Option<&List> {
        self.lists.get(list_name)
    }
}

/// Check a context name: non-blank, and free of the qualifier separator
pub fn validate_name(name: &str, role: ContextRole) -> Result<(), RegistrationError> {
    let reason = if name.trim().is_empty() {
        "name cannot be empty"
    } else if name.contains(QUALIFIER_SEP) {
        "name cannot contain '|'"
    } else {
        return Ok(());
    };
    Err(RegistrationError::InvalidContext {
        role: role.as_str(),
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
