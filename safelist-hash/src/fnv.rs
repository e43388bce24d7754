//! FNV-1a 64-bit accumulator.
//!
//! The accumulator is exposed through [`std::io::Write`] so identity bytes are
//! fed the same way regardless of which [`KeyHasher`] backs them.

use std::io;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A 64-bit hasher that consumes bytes through `Write`.
///
/// Writes may fail; a failure aborts the key computation for one entry.
pub trait KeyHasher: io::Write + Default {
    /// Returns the digest of everything written so far.
    fn finish(&self) -> u64;
}

/// Streaming FNV-1a 64-bit hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv64a {
    state: u64,
}

impl Fnv64a {
    #[must_use]
    pub const fn new() -> Self {
        Self { state: FNV_OFFSET }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= u64::from(b);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }
}

impl Default for Fnv64a {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for Fnv64a {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl KeyHasher for Fnv64a {
    fn finish(&self) -> u64 {
        self.state
    }
}

/// One-shot FNV-1a 64-bit hash of `data`.
#[must_use]
pub fn fnv1a64(data: &[u8]) -> u64 {
    let mut h = Fnv64a::new();
    h.update(data);
    h.state
}
