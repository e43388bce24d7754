//! Batch processing over a whole safelist.

use crate::dispatch::{hash_entry_with, Outcome};
use crate::fnv::{Fnv64a, KeyHasher};
use safelist_types::Entry;
use tracing::{debug_span, info};

/// Tally of what a batch run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub hashed: usize,
    pub already_keyed: usize,
    pub skipped: usize,
    pub unrecognized: usize,
    pub failed: usize,
    /// Entries whose schema version was filled in.
    pub schema_defaulted: usize,
}

impl BatchReport {
    /// Entries left without a key after the run.
    #[must_use]
    pub const fn unkeyed(&self) -> usize {
        self.skipped + self.unrecognized + self.failed
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::AlreadyKeyed => self.already_keyed += 1,
            Outcome::Hashed(_) => self.hashed += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Unrecognized => self.unrecognized += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Assigns hash keys to every unkeyed entry, in place and in order.
///
/// No entry is added, removed, or reordered.
pub fn process_safelist(entries: &mut [Entry]) -> BatchReport {
    process_safelist_with::<Fnv64a>(entries)
}

/// [`process_safelist`] with a caller-chosen hasher.
pub fn process_safelist_with<H: KeyHasher>(entries: &mut [Entry]) -> BatchReport {
    let mut report = BatchReport {
        total: entries.len(),
        ..BatchReport::default()
    };

    for (index, entry) in entries.iter_mut().enumerate() {
        let _span = debug_span!("entry", index).entered();
        if !entry.is_keyed() && entry.schema_version == 0 {
            report.schema_defaulted += 1;
        }
        let outcome = hash_entry_with::<H>(entry);
        report.record(&outcome);
    }

    info!(
        total = report.total,
        hashed = report.hashed,
        already_keyed = report.already_keyed,
        skipped = report.skipped,
        unrecognized = report.unrecognized,
        failed = report.failed,
        "processed safelist"
    );
    report
}
