use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive numeric interval, e.g. the bounds of a CIDR block or ASN
/// allocation expressed as IPv4 integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpRange {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
}

impl IpRange {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Canonical 8-byte form: big-endian start followed by big-endian end.
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 8] {
        let mut buf = [0u8; 8];
        buf[..4].copy_from_slice(&self.start.to_be_bytes());
        buf[4..].copy_from_slice(&self.end.to_be_bytes());
        buf
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
