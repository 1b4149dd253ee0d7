use super::{Engine, EntryMarks, ToggleWiring};
use crate::context::{EntryHandle, IdentityLookup, Membership, RecordedDecision, TargetSite};
use serde::Serialize;
use tracing::{debug, warn};

/// Counters of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Candidates enumerated by the site
    pub seen: usize,
    /// Already processed or invalid
    pub skipped: usize,
    /// Newly marked invalid by the site
    pub invalidated: usize,
    /// Not ready yet, left for a later pass
    pub retried: usize,
    pub processed: usize,
    /// Processed entries that received an effect
    pub applied: usize,
    /// Annotations dropped for detached nodes
    pub pruned: usize,
}

impl<T: TargetSite> Engine<T> {
    /// Run one pass over the page entries. Entries already processed or
    /// invalid are left alone, so repeated passes apply each effect once.
    pub fn reconcile(&mut self) -> PassReport {
        let mut report = PassReport::default();
        if !self.is_entry_page {
            return report;
        }

        report.pruned = self.entries.prune();
        self.bindings.retain(|_, binding| binding.control.is_attached());

        for entry in self.target.entries() {
            report.seen += 1;
            self.reconcile_entry(&entry, &mut report);
        }

        if report.processed > 0 || report.invalidated > 0 {
            debug!(
                site = %self.target_ctx.name,
                seen = report.seen,
                processed = report.processed,
                applied = report.applied,
                invalidated = report.invalidated,
                retried = report.retried,
                "Reconciliation pass"
            );
        }
        report
    }

    fn reconcile_entry(&mut self, entry: &T::Entry, report: &mut PassReport) {
        let key = entry.key();
        if self.entries.is_settled(key) {
            report.skipped += 1;
            return;
        }

        let mut marks = EntryMarks::new(&mut self.entries);
        if !self.target.is_valid_entry(entry, &mut marks) {
            if marks.is_invalid(entry) {
                report.invalidated += 1;
            } else {
                report.retried += 1;
            }
            return;
        }

        let identity = match self.target.extract_identity(entry) {
            IdentityLookup::Found(identity) => Some(identity),
            IdentityLookup::Missing => {
                warn!(site = %self.target_ctx.name, entry = ?key, "Could not determine id for entry");
                report.retried += 1;
                return;
            }
            IdentityLookup::NotExtracted => None,
        };

        self.target
            .mutate_entry(entry, &mut ToggleWiring::new(&mut self.bindings));

        let membership = match &identity {
            Some(identity) => self.aggregate(identity),
            None => Membership::new(),
        };
        let decision = self.target.decide(&membership, identity.as_ref(), entry);

        if let Some(processing) = &decision {
            self.target.apply_effect(entry, identity.as_ref(), processing);
            report.applied += 1;
        }

        let state = self.entries.state_mut(entry);
        state.processing = decision.map(RecordedDecision::Applied);
        state.processed = true;
        report.processed += 1;
    }
}
