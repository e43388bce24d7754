//! Identity hash keys for safelist entries.
//!
//! Every entry type maps to a [`Strategy`] that decides which fields make up
//! the entry's identity and in what order they are hashed:
//!
//! - [`Strategy::for_type`]: case-insensitive type tag lookup over [`TYPE_TABLE`]
//! - [`Strategy::identity`]: validates a payload into an [`Identity`]
//! - [`hash_entry`]: assigns a key to one entry, leaving keyed entries alone
//! - [`process_safelist`]: runs the dispatcher over a whole list in place
//!
//! Keys are FNV-1a 64-bit digests reinterpreted as `i64`. Range lists are
//! combined by summing per-range sub-hashes, so reordering a list never
//! changes the key.

mod batch;
mod dispatch;
mod error;
mod fnv;
mod identity;
mod maintenance;
mod ranges;
mod strategy;

pub use batch::{process_safelist, process_safelist_with, BatchReport};
pub use dispatch::{compute_key, compute_key_with, hash_entry, hash_entry_with, Outcome};
pub use error::{HashError, HashResult};
pub use fnv::{fnv1a64, Fnv64a, KeyHasher};
pub use identity::Identity;
pub use maintenance::{
    dedup_by_key, filter_by_comment, strip_hash_keys, verify, Mismatch, VerifyReport,
};
pub use ranges::{combine_ranges, range_hash};
pub use strategy::{Strategy, TYPE_TABLE};
