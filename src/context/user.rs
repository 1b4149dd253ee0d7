//! Users as seen by a site.

use serde::{Deserialize, Serialize};

/// User name of sites without a user concept
pub const NO_USER: &str = "_";

/// A logged user: name plus an opaque site-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl UserInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// The placeholder user of sites that have no login
    pub fn anonymous() -> Self {
        Self::new(NO_USER)
    }
}

/// Outcome of asking a site who is logged in
#[derive(Debug, Clone, PartialEq)]
pub enum UserLookup {
    /// The site has no notion of users; lists are stored under [`NO_USER`]
    NoUserConcept,
    Found(UserInfo),
    /// The site has users but nobody is logged in right now
    NotFound,
}

/// How a source context picks its user from the target user
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UserMapping {
    /// Use the last user remembered for the source site
    #[default]
    LastRemembered,
    Mapped(UserInfo),
    /// No source user corresponds to the target user
    Unmapped,
}
