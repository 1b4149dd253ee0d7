use super::Engine;
use crate::context::{Identity, Membership, TargetSite};

impl<T: TargetSite> Engine<T> {
    /// Every `"<context>|<list>"` whose list contains the entry, each context
    /// judged by its own membership test
    pub fn aggregate(&self, identity: &Identity) -> Membership {
        let mut membership = Membership::new();

        for (list_name, list) in &self.target_ctx.lists {
            if self.target.test_membership(identity, list) {
                membership.insert(&self.target_ctx.name, list_name);
            }
        }
        for source in &self.sources {
            for (list_name, list) in &source.context.lists {
                if source.site.test_membership(identity, list) {
                    membership.insert(&source.context.name, list_name);
                }
            }
        }
        membership
    }
}
