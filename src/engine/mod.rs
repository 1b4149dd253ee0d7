//! Reconciliation engine
//!
//! One [`Engine`] instance owns the target site, its registered sources, the
//! lists loaded for each, and the per-entry side-table. It is driven by
//! [`Engine::reconcile`] passes and by toggle clicks; [`Session`] adds the
//! periodic scan on a tokio runtime.

mod aggregate;
pub mod entries;
mod lists;
mod reconcile;
mod registry;
pub mod session;
pub mod toggle;

pub use entries::{EntryMarks, EntryState, EntryTable};
pub use reconcile::PassReport;
pub use session::Session;
pub use toggle::{ToggleAction, ToggleControl, ToggleOutcome, ToggleWiring};

use crate::config::EngineConfig;
use crate::context::{Context, EntryKey, SourceSite, TargetSite, UserInfo};
use crate::store::ListStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

struct SourceSlot {
    site: Box<dyn SourceSite>,
    context: Context,
}

pub struct Engine<T: TargetSite> {
    target: T,
    target_ctx: Context,
    sources: Vec<SourceSlot>,
    store: Arc<dyn ListStore>,
    settings: EngineConfig,
    is_entry_page: bool,
    entries: EntryTable<T::Entry>,
    bindings: HashMap<EntryKey, ToggleControl<T::Entry>>,
}

impl<T: TargetSite> Engine<T> {
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn target_context(&self) -> &Context {
        &self.target_ctx
    }

    /// Target context first, then sources in registration order
    pub fn contexts(&self) -> impl Iterator<Item = &Context> {
        std::iter::once(&self.target_ctx).chain(self.sources.iter().map(|s| &s.context))
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts().find(|ctx| ctx.name == name)
    }

    pub fn is_entry_page(&self) -> bool {
        self.is_entry_page
    }

    pub fn store(&self) -> &Arc<dyn ListStore> {
        &self.store
    }

    pub fn entry_state(&self, key: EntryKey) -> Option<&EntryState> {
        self.entries.get(key)
    }

    /// The last user remembered for any site
    pub fn recall_user(&self, site: &str) -> Option<UserInfo> {
        self.store.recall_user(site)
    }

    /// Period of the background scan; `None` when below the configured minimum
    pub fn scan_interval(&self) -> Option<Duration> {
        let interval = self
            .target
            .interval()
            .unwrap_or_else(|| self.settings.interval());
        (interval >= self.settings.min_interval()).then_some(interval)
    }

    /// Start scanning: one immediate pass, then periodic passes when enabled
    pub fn start(self) -> Session<T> {
        Session::start(self)
    }
}
