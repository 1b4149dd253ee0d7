//! Whole-list maintenance on loaded contexts, kept in step with the store.

use super::Engine;
use crate::context::{Context, TargetSite};
use crate::error::EngineError;
use crate::store::List;
use std::sync::Arc;
use tracing::info;

impl<T: TargetSite> Engine<T> {
    fn context_mut(&mut self, name: &str) -> Result<&mut Context, EngineError> {
        if self.target_ctx.name == name {
            return Ok(&mut self.target_ctx);
        }
        self.sources
            .iter_mut()
            .map(|s| &mut s.context)
            .find(|ctx| ctx.name == name)
            .ok_or_else(|| EngineError::UnknownContext(name.to_string()))
    }

    /// Replace a list wholesale, e.g. after re-reading it from the site.
    /// On a failed write both copies keep the previous list.
    pub fn replace_list(&mut self, ctx_name: &str, list_name: &str, list: List) -> Result<(), EngineError> {
        let store = Arc::clone(&self.store);
        let ctx = self.context_mut(ctx_name)?;

        store.save(&ctx.name, &ctx.user, list_name, &list)?;
        info!(site = %ctx.name, list = list_name, entries = list.len(), "List replaced");
        ctx.lists.insert(list_name.to_string(), list);
        Ok(())
    }

    pub fn clear_list(&mut self, ctx_name: &str, list_name: &str) -> Result<(), EngineError> {
        let store = Arc::clone(&self.store);
        let ctx = self.context_mut(ctx_name)?;

        store.delete_one(&ctx.name, &ctx.user, list_name)?;
        ctx.lists.remove(list_name);
        info!(site = %ctx.name, list = list_name, "List cleared");
        Ok(())
    }

    pub fn clear_all_lists(&mut self, ctx_name: &str) -> Result<(), EngineError> {
        let store = Arc::clone(&self.store);
        let ctx = self.context_mut(ctx_name)?;

        store.delete_all(&ctx.name, &ctx.user)?;
        ctx.lists.clear();
        info!(site = %ctx.name, "All lists cleared");
        Ok(())
    }

    /// Persist the in-memory copy of a list
    pub fn save_list(&mut self, ctx_name: &str, list_name: &str) -> Result<(), EngineError> {
        let store = Arc::clone(&self.store);
        let ctx = self.context_mut(ctx_name)?;
        let list = ctx.lists.get(list_name).ok_or_else(|| EngineError::UnknownList {
            context: ctx.name.clone(),
            list: list_name.to_string(),
        })?;

        store.save(&ctx.name, &ctx.user, list_name, list)?;
        Ok(())
    }
}
