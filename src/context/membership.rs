//! Identities, membership sets and processing decisions.

use crate::store::List;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Separator between context name and list name in a qualified list name
pub const QUALIFIER_SEP: char = '|';

/// List name used by sites that keep a single list
pub const DEFAULT_LIST: &str = "_DEF_";

/// Processing type applied when no decision policy is declared
pub const DEFAULT_TYPE: &str = "_DEF_";

/// `"<context>|<list>"`
pub fn qualified_name(ctx: &str, list: &str) -> String {
    format!("{ctx}{QUALIFIER_SEP}{list}")
}

/// Identity of an entry: the id lists are keyed by and a display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Membership test by entry id
pub fn by_id(identity: &Identity, list: &List) -> bool {
    list.contains_key(&identity.id)
}

/// Membership test by display name, for sites whose ids differ from the target's
pub fn by_name(identity: &Identity, list: &List) -> bool {
    list.values().any(|name| *name == identity.name)
}

/// Qualified names of every list, across all contexts, containing one entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership(BTreeSet<String>);

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ctx: &str, list: &str) {
        self.0.insert(qualified_name(ctx, list));
    }

    pub fn contains(&self, ctx: &str, list: &str) -> bool {
        self.0.contains(&qualified_name(ctx, list))
    }

    pub fn contains_qualified(&self, qualified: &str) -> bool {
        self.0.contains(qualified)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Membership {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Site-defined label telling the effect which treatment to apply. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProcessingType(String);

impl ProcessingType {
    /// `None` for the empty string, which means "no processing"
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        if label.is_empty() {
            None
        } else {
            Some(Self(label))
        }
    }

    pub fn default_type() -> Self {
        Self(DEFAULT_TYPE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProcessingType {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::new(label).ok_or_else(|| "processing type cannot be empty".to_string())
    }
}

impl From<ProcessingType> for String {
    fn from(t: ProcessingType) -> Self {
        t.0
    }
}

impl fmt::Display for ProcessingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `None` leaves the entry untouched
pub type Decision = Option<ProcessingType>;

/// Decision used when a site declares no policy: the default type for any listed entry
pub fn default_decision(membership: &Membership) -> Decision {
    if membership.is_empty() {
        None
    } else {
        Some(ProcessingType::default_type())
    }
}

/// Processing recorded on an entry, by reconciliation or by a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedDecision {
    Applied(ProcessingType),
    /// Effect of this type was reversed by a toggle
    Reversed(ProcessingType),
}

impl RecordedDecision {
    pub fn processing_type(&self) -> &ProcessingType {
        match self {
            RecordedDecision::Applied(t) | RecordedDecision::Reversed(t) => t,
        }
    }
}

impl fmt::Display for RecordedDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordedDecision::Applied(t) => write!(f, "{t}"),
            RecordedDecision::Reversed(t) => write!(f, "-{t}"),
        }
    }
}
