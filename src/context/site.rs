//! Site contracts
//!
//! A site plugs into the engine either as the single *target* (the page whose
//! entries get processed) or as a *source* (a site whose stored lists only
//! contribute membership). Mandatory behavior is a required trait method;
//! everything else has a default that reproduces "not declared".

use super::membership::{by_id, default_decision, Decision, Identity, Membership, ProcessingType};
use super::user::{UserLookup, UserMapping};
use crate::engine::{EntryMarks, ToggleWiring};
use crate::store::List;
use std::fmt;
use std::time::Duration;

/// Site-defined page classification, e.g. "title page" vs "search results"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageType(pub u32);

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable key of one page node, used by the entry side-table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(pub u64);

/// Handle to a page node (an entry, or a control inside one)
pub trait EntryHandle: Clone + Send + 'static {
    fn key(&self) -> EntryKey;

    fn parent(&self) -> Option<Self> {
        None
    }

    /// Whether the node matches a site-defined selector
    fn matches(&self, _selector: &str) -> bool {
        false
    }

    /// False once the page has discarded the node; its annotations are then dropped
    fn is_attached(&self) -> bool {
        true
    }
}

/// How to get from a toggle control to the entry it acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLocator {
    /// Walk up this many parents
    Ancestors(usize),
    /// Nearest node, starting with the control itself, matching the selector
    Closest(String),
}

impl EntryLocator {
    pub fn locate<E: EntryHandle>(&self, origin: &E) -> Option<E> {
        match self {
            EntryLocator::Ancestors(levels) => {
                let mut node = origin.clone();
                for _ in 0..*levels {
                    node = node.parent()?;
                }
                Some(node)
            }
            EntryLocator::Closest(selector) => {
                let mut node = Some(origin.clone());
                while let Some(current) = node {
                    if current.matches(selector) {
                        return Some(current);
                    }
                    node = current.parent();
                }
                None
            }
        }
    }
}

impl Default for EntryLocator {
    fn default() -> Self {
        EntryLocator::Ancestors(0)
    }
}

/// Result of extracting an entry identity
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityLookup {
    Found(Identity),
    /// Identity cannot be determined yet; the entry is retried next pass
    Missing,
    /// The site does not extract identities; entries are decided on empty membership
    NotExtracted,
}

/// The site whose page entries are reconciled
pub trait TargetSite: Send + 'static {
    type Entry: EntryHandle;

    fn name(&self) -> &str;

    /// Candidate entries currently on the page
    fn entries(&mut self) -> Vec<Self::Entry>;

    fn apply_effect(
        &mut self,
        entry: &Self::Entry,
        identity: Option<&Identity>,
        processing: &ProcessingType,
    );

    /// Scan period; `None` uses the configured default
    fn interval(&self) -> Option<Duration> {
        None
    }

    fn is_entry_page(&self) -> bool {
        true
    }

    fn page_type(&self) -> Option<PageType> {
        None
    }

    fn on_page_setup(&mut self, _page_type: PageType, _is_entry_page: bool) {}

    /// False means "not ready, retry next pass" unless the entry was marked invalid
    fn is_valid_entry(&mut self, _entry: &Self::Entry, _marks: &mut EntryMarks<'_, Self::Entry>) -> bool {
        true
    }

    fn extract_identity(&self, _entry: &Self::Entry) -> IdentityLookup {
        IdentityLookup::NotExtracted
    }

    /// Called once per entry before the decision, to decorate it or wire toggles
    fn mutate_entry(&mut self, _entry: &Self::Entry, _wiring: &mut ToggleWiring<'_, Self::Entry>) {}

    fn decide(
        &self,
        membership: &Membership,
        _identity: Option<&Identity>,
        _entry: &Self::Entry,
    ) -> Decision {
        default_decision(membership)
    }

    /// Undo the effect of `processing`; needed by sites that wire toggles
    fn reverse_effect(&mut self, _entry: &Self::Entry, _identity: &Identity, _processing: &ProcessingType) {}

    fn test_membership(&self, identity: &Identity, list: &List) -> bool {
        by_id(identity, list)
    }

    fn get_user(&self) -> UserLookup {
        UserLookup::NoUserConcept
    }
}

/// A site contributing its stored lists to membership
pub trait SourceSite: Send {
    fn name(&self) -> &str;

    fn get_user(&self) -> UserLookup {
        UserLookup::NoUserConcept
    }

    fn map_user_from_target(&self, _target_name: &str, _target_user: &str) -> UserMapping {
        UserMapping::LastRemembered
    }

    fn page_type(&self) -> Option<PageType> {
        None
    }

    fn on_page_setup(&mut self, _page_type: PageType, _is_entry_page: bool) {}

    fn test_membership(&self, identity: &Identity, list: &List) -> bool {
        by_id(identity, list)
    }
}
