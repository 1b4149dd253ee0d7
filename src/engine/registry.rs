//! Context registration and user resolution.

use super::{Engine, EntryTable, SourceSlot};
use crate::config::EngineConfig;
use crate::context::{
    validate_name, Context, ContextRole, SourceSite, TargetSite, UserInfo, UserLookup, UserMapping,
};
use crate::error::RegistrationError;
use crate::store::ListStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Who is using `site` now, falling back to the last remembered user.
///
/// A user reported by the site is remembered for later fallbacks.
pub(crate) fn resolve_logged_user(
    lookup: UserLookup,
    site: &str,
    store: &dyn ListStore,
) -> Option<UserInfo> {
    match lookup {
        UserLookup::NoUserConcept => Some(UserInfo::anonymous()),
        UserLookup::Found(user) if !user.name.is_empty() => {
            if let Err(e) = store.remember_user(site, &user) {
                error!(site, user = %user.name, error = %e, "Cannot remember user");
            }
            Some(user)
        }
        UserLookup::Found(_) | UserLookup::NotFound => {
            warn!(site, "User not logged in");
            let user = store.recall_user(site)?;
            info!(site, user = %user.name, "Using last remembered user");
            Some(user)
        }
    }
}

impl<T: TargetSite> Engine<T> {
    /// Register the target site and load its lists.
    ///
    /// Fails when the settings or the site are malformed, or when the site
    /// needs a user and none is logged in nor remembered.
    pub fn register_target(
        mut target: T,
        store: Arc<dyn ListStore>,
        settings: EngineConfig,
    ) -> Result<Self, RegistrationError> {
        settings.validate().map_err(RegistrationError::InvalidSettings)?;
        let name = target.name().to_string();
        validate_name(&name, ContextRole::Target)?;

        let mut ctx = Context::new(&name, ContextRole::Target);
        let is_entry_page = target.is_entry_page();
        ctx.page_type = target.page_type();

        if is_entry_page || ctx.page_type.is_some() {
            let Some(user) = resolve_logged_user(target.get_user(), &name, store.as_ref()) else {
                error!(site = %name, "No user is defined, aborting");
                return Err(RegistrationError::NoUser(name));
            };
            ctx.set_user(user);
        }
        if let Some(page_type) = ctx.page_type {
            target.on_page_setup(page_type, is_entry_page);
        }
        if is_entry_page {
            ctx.lists = store.load(&name, &ctx.user);
        }

        info!(
            site = %name,
            user = %ctx.user,
            lists = ctx.lists.len(),
            is_entry_page,
            "Target registered"
        );

        Ok(Self {
            target,
            target_ctx: ctx,
            sources: Vec::new(),
            store,
            settings,
            is_entry_page,
            entries: EntryTable::new(),
            bindings: HashMap::new(),
        })
    }

    /// Register a source site and load its lists for the user mapped from the target user.
    ///
    /// A failing source is not registered; the engine keeps running without it.
    /// On pages without entries the source only gets its page setup.
    pub fn register_source(&mut self, mut source: Box<dyn SourceSite>) -> Result<(), RegistrationError> {
        let name = source.name().to_string();
        validate_name(&name, ContextRole::Source)?;
        if self.contexts().any(|ctx| ctx.name == name) {
            return Err(RegistrationError::DuplicateContext(name));
        }

        let mut ctx = Context::new(&name, ContextRole::Source);
        ctx.page_type = source.page_type();

        if let Some(page_type) = ctx.page_type {
            let Some(user) = resolve_logged_user(source.get_user(), &name, self.store.as_ref()) else {
                error!(site = %name, "No user is defined, aborting");
                return Err(RegistrationError::NoUser(name));
            };
            ctx.set_user(user);
            source.on_page_setup(page_type, self.is_entry_page);
        }

        if !self.is_entry_page {
            debug!(site = %name, "Not an entry page, source lists not loaded");
            return Ok(());
        }

        let remote = match source.map_user_from_target(&self.target_ctx.name, &self.target_ctx.user) {
            UserMapping::LastRemembered => self.store.recall_user(&name),
            UserMapping::Mapped(user) => Some(user),
            UserMapping::Unmapped => None,
        };
        let Some(remote) = remote else {
            error!(site = %name, target_user = %self.target_ctx.user, "No remote user is defined, aborting");
            return Err(RegistrationError::NoRemoteUser(name));
        };
        ctx.set_user(remote);
        ctx.lists = self.store.load(&name, &ctx.user);

        info!(site = %name, user = %ctx.user, lists = ctx.lists.len(), "Source registered");
        self.sources.push(SourceSlot { site: source, context: ctx });
        Ok(())
    }
}
