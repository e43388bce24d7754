//! Single-entry dispatcher.

use crate::error::{HashError, HashResult};
use crate::fnv::{Fnv64a, KeyHasher};
use crate::Strategy;
use safelist_types::{Entry, DEFAULT_SCHEMA_VERSION};
use tracing::{debug, error, warn};

/// What the dispatcher did with one entry.
#[derive(Debug)]
pub enum Outcome {
    /// The entry already had a key and was left alone.
    AlreadyKeyed,
    /// A new key was computed and stored.
    Hashed(i64),
    /// The entry lacked required fields; its key stays `0`.
    Skipped(HashError),
    /// The type tag selects no strategy; the entry passes through.
    Unrecognized,
    /// The hasher failed; its key stays `0`.
    Failed(HashError),
}

impl Outcome {
    #[must_use]
    pub const fn is_hashed(&self) -> bool {
        matches!(self, Self::Hashed(_))
    }
}

/// Computes the key an entry should carry, ignoring any key it already has.
pub fn compute_key(entry: &Entry) -> HashResult<i64> {
    compute_key_with::<Fnv64a>(entry)
}

/// [`compute_key`] with a caller-chosen hasher.
pub fn compute_key_with<H: KeyHasher>(entry: &Entry) -> HashResult<i64> {
    let strategy = Strategy::for_type(&entry.entry_type)
        .ok_or_else(|| HashError::UnrecognizedType(entry.entry_type.clone()))?;
    let identity = strategy.identity(&entry.payload)?;
    Ok(identity.hash_key::<H>()?)
}

/// Assigns a hash key to `entry` if it has none.
///
/// Also fills in a missing schema version. Entries that already carry a key
/// are not touched at all.
pub fn hash_entry(entry: &mut Entry) -> Outcome {
    hash_entry_with::<Fnv64a>(entry)
}

/// [`hash_entry`] with a caller-chosen hasher.
pub fn hash_entry_with<H: KeyHasher>(entry: &mut Entry) -> Outcome {
    if entry.is_keyed() {
        return Outcome::AlreadyKeyed;
    }

    if entry.schema_version == 0 {
        warn!(
            name = %entry.name,
            "schema version missing, setting it to {DEFAULT_SCHEMA_VERSION}"
        );
        entry.schema_version = DEFAULT_SCHEMA_VERSION;
    }

    match compute_key_with::<H>(entry) {
        Ok(key) => {
            entry.hash_key = key;
            debug!(name = %entry.name, entry_type = %entry.entry_type, key, "hashed entry");
            Outcome::Hashed(key)
        }
        Err(HashError::UnrecognizedType(tag)) => {
            debug!(name = %entry.name, entry_type = %tag, "unrecognized entry type, passing through");
            Outcome::Unrecognized
        }
        Err(e) if e.is_validation() => {
            warn!(
                name = %entry.name,
                entry_type = %entry.entry_type,
                "cannot hash entry, skipping: {e}"
            );
            Outcome::Skipped(e)
        }
        Err(e) => {
            error!(
                name = %entry.name,
                entry_type = %entry.entry_type,
                "error hashing entry: {e}"
            );
            Outcome::Failed(e)
        }
    }
}
