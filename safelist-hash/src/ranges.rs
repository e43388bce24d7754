//! Order-independent combination of range lists.
//!
//! Each range is hashed on its own and the sub-hashes are summed with
//! wrapping addition, so the result does not depend on list order. Duplicate
//! ranges each contribute their sub-hash.

use crate::fnv::KeyHasher;
use safelist_types::IpRange;
use std::io;

/// Sub-hash of one range over its big-endian `start ++ end` bytes.
pub fn range_hash<H: KeyHasher>(range: &IpRange) -> io::Result<u64> {
    let mut hasher = H::default();
    hasher.write_all(&range.to_be_bytes())?;
    Ok(hasher.finish())
}

/// Wrapping sum of the sub-hashes of every range in every list.
pub fn combine_ranges<'a, H, I>(lists: I) -> io::Result<u64>
where
    H: KeyHasher,
    I: IntoIterator<Item = &'a [IpRange]>,
{
    let mut acc = 0u64;
    for range in lists.into_iter().flatten() {
        acc = acc.wrapping_add(range_hash::<H>(range)?);
    }
    Ok(acc)
}
