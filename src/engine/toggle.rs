//! Toggle protocol
//!
//! A site wires a control (a button inside an entry) while mutating the
//! entry. Clicking the control flips the entry's membership in one target
//! list, applies or reverses the effect, records the decision and persists
//! the list.

use super::Engine;
use crate::context::{
    EntryHandle, EntryKey, EntryLocator, Identity, IdentityLookup, ProcessingType,
    RecordedDecision, TargetSite, DEFAULT_LIST,
};
use crate::error::ToggleError;
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Binding of one control to the list it toggles
#[derive(Debug, Clone)]
pub struct ToggleControl<E> {
    pub control: E,
    pub locator: EntryLocator,
    pub list: String,
    pub toggle_type: ProcessingType,
}

/// Handed to [`TargetSite::mutate_entry`] to wire toggle controls
pub struct ToggleWiring<'a, E> {
    bindings: &'a mut HashMap<EntryKey, ToggleControl<E>>,
}

impl<'a, E: EntryHandle> ToggleWiring<'a, E> {
    pub(crate) fn new(bindings: &'a mut HashMap<EntryKey, ToggleControl<E>>) -> Self {
        Self { bindings }
    }

    /// Wire `control`. List and type default to the default list and type.
    pub fn attach(
        &mut self,
        control: &E,
        locator: EntryLocator,
        list: Option<&str>,
        toggle_type: Option<ProcessingType>,
    ) {
        self.bindings.insert(
            control.key(),
            ToggleControl {
                control: control.clone(),
                locator,
                list: list.unwrap_or(DEFAULT_LIST).to_string(),
                toggle_type: toggle_type.unwrap_or_else(ProcessingType::default_type),
            },
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    pub identity: Identity,
    pub list: String,
    pub action: ToggleAction,
    pub recorded: RecordedDecision,
    /// False when the list write failed; memory and page are updated regardless
    pub persisted: bool,
}

impl<T: TargetSite> Engine<T> {
    pub fn is_wired(&self, control: &T::Entry) -> bool {
        self.bindings.contains_key(&control.key())
    }

    /// Dispatch a click on a wired control
    pub fn click(&mut self, control: &T::Entry) -> Result<ToggleOutcome, ToggleError> {
        let key = control.key();
        let Some(binding) = self.bindings.get(&key) else {
            debug!(control = ?key, "Click on unwired control");
            return Err(ToggleError::Unbound(key));
        };
        let Some(entry) = binding.locator.locate(control) else {
            warn!(control = ?key, locator = ?binding.locator, "Toggle control does not lead to an entry");
            return Err(ToggleError::EntryNotFound(key));
        };
        let list = binding.list.clone();
        let toggle_type = binding.toggle_type.clone();
        self.toggle(&entry, &list, toggle_type)
    }

    /// Flip `entry` in the target list `list_name`, creating the list when missing.
    /// Only the recorded decision changes; whether the entry was reconciled does not.
    pub fn toggle(
        &mut self,
        entry: &T::Entry,
        list_name: &str,
        toggle_type: ProcessingType,
    ) -> Result<ToggleOutcome, ToggleError> {
        let identity = match self.target.extract_identity(entry) {
            IdentityLookup::Found(identity) => identity,
            IdentityLookup::Missing | IdentityLookup::NotExtracted => {
                warn!(site = %self.target_ctx.name, entry = ?entry.key(), "Could not determine id for toggled entry");
                return Err(ToggleError::NoIdentity(entry.key()));
            }
        };

        let ctx = &mut self.target_ctx;
        let list = ctx.lists.entry(list_name.to_string()).or_default();
        let (action, recorded) = if list.remove(&identity.id).is_some() {
            self.target.reverse_effect(entry, &identity, &toggle_type);
            (ToggleAction::Removed, RecordedDecision::Reversed(toggle_type))
        } else {
            list.insert(identity.id.clone(), identity.name.clone());
            self.target.apply_effect(entry, Some(&identity), &toggle_type);
            (ToggleAction::Added, RecordedDecision::Applied(toggle_type))
        };

        let persisted = match self.store.save(&ctx.name, &ctx.user, list_name, list) {
            Ok(()) => true,
            Err(e) => {
                error!(site = %ctx.name, list = list_name, error = %e, "Cannot save toggled list");
                false
            }
        };

        // an entry not yet reconciled still gets its pass
        self.entries.state_mut(entry).processing = Some(recorded.clone());

        debug!(site = %ctx.name, list = list_name, id = %identity.id, ?action, "Entry toggled");
        Ok(ToggleOutcome {
            identity,
            list: list_name.to_string(),
            action,
            recorded,
            persisted,
        })
    }
}
