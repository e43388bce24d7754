//! Safelist housekeeping built on hash keys: comment filtering, key-based
//! deduplication, key verification, and key stripping.

use crate::dispatch::compute_key;
use crate::error::HashError;
use safelist_types::Entry;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Keeps only entries whose comment contains `needle`, ignoring case.
///
/// An empty needle keeps everything.
pub fn filter_by_comment(entries: &mut Vec<Entry>, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let needle = needle.to_lowercase();
    let before = entries.len();
    entries.retain(|e| e.comment.to_lowercase().contains(&needle));
    let removed = before - entries.len();
    debug!(removed, remaining = entries.len(), "filtered by comment");
    removed
}

/// Drops entries whose non-zero key was already seen earlier in the list.
///
/// The first occurrence wins. Unkeyed entries are always kept. Returns the
/// number of entries removed.
pub fn dedup_by_key(entries: &mut Vec<Entry>) -> usize {
    let mut seen = HashSet::new();
    let before = entries.len();
    entries.retain(|e| !e.is_keyed() || seen.insert(e.hash_key));
    let removed = before - entries.len();
    if removed > 0 {
        debug!(removed, "dropped duplicate entries");
    }
    removed
}

/// Resets every hash key to `0`. Returns how many keys were cleared.
pub fn strip_hash_keys(entries: &mut [Entry]) -> usize {
    let mut cleared = 0;
    for entry in entries.iter_mut().filter(|e| e.is_keyed()) {
        entry.hash_key = 0;
        cleared += 1;
    }
    cleared
}

/// A stored key that disagrees with the recomputed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub name: String,
    pub stored: i64,
    pub computed: i64,
}

/// Result of checking stored keys against recomputed ones.
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Keyed entries that were recomputed successfully.
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
    /// Keyed entries whose key could not be recomputed.
    pub unverifiable: Vec<(usize, HashError)>,
}

impl VerifyReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Recomputes the key of every keyed entry without modifying any of them.
pub fn verify(entries: &[Entry]) -> VerifyReport {
    let mut report = VerifyReport::default();

    for (index, entry) in entries.iter().enumerate().filter(|(_, e)| e.is_keyed()) {
        match compute_key(entry) {
            Ok(computed) if computed == entry.hash_key => report.checked += 1,
            Ok(computed) => {
                warn!(
                    index,
                    name = %entry.name,
                    stored = entry.hash_key,
                    computed,
                    "stored hash key does not match"
                );
                report.checked += 1;
                report.mismatches.push(Mismatch {
                    index,
                    name: entry.name.clone(),
                    stored: entry.hash_key,
                    computed,
                });
            }
            Err(e) => {
                debug!(index, name = %entry.name, "cannot verify entry: {e}");
                report.unverifiable.push((index, e));
            }
        }
    }
    report
}
