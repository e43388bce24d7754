//! Validated identifying fields and the byte order they are hashed in.

use crate::fnv::KeyHasher;
use crate::ranges::combine_ranges;
use safelist_types::IpRange;
use std::io;

/// The fields of an entry that participate in its identity, borrowed from a
/// payload that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity<'a> {
    /// Domain or user agent string.
    Text(&'a str),
    Ip {
        ip: &'a str,
        network: &'a [u8],
    },
    IpPair {
        src_ip: &'a str,
        src_network: &'a [u8],
        dst_ip: &'a str,
        dst_network: &'a [u8],
    },
    Ranges {
        ranges: &'a [IpRange],
        network: &'a [u8],
    },
    /// Source and destination ranges are pooled into one combination.
    PairRanges {
        src_ranges: &'a [IpRange],
        src_network: &'a [u8],
        dst_ranges: &'a [IpRange],
        dst_network: &'a [u8],
    },
    DomainPair {
        fqdn: &'a str,
        src_ip: &'a str,
        src_network: &'a [u8],
    },
    DomainPairRanges {
        ranges: &'a [IpRange],
        network: &'a [u8],
        fqdn: &'a str,
    },
}

impl Identity<'_> {
    /// Feeds the identifying bytes to `hasher` in canonical order.
    pub fn write_to<H: KeyHasher>(&self, hasher: &mut H) -> io::Result<()> {
        match *self {
            Self::Text(s) => hasher.write_all(s.as_bytes()),
            Self::Ip { ip, network } => {
                hasher.write_all(ip.as_bytes())?;
                hasher.write_all(network)
            }
            Self::IpPair {
                src_ip,
                src_network,
                dst_ip,
                dst_network,
            } => {
                hasher.write_all(src_ip.as_bytes())?;
                hasher.write_all(src_network)?;
                hasher.write_all(dst_ip.as_bytes())?;
                hasher.write_all(dst_network)
            }
            Self::Ranges { ranges, network } => {
                let combined = combine_ranges::<H, _>([ranges])?;
                hasher.write_all(&combined.to_be_bytes())?;
                hasher.write_all(network)
            }
            Self::PairRanges {
                src_ranges,
                src_network,
                dst_ranges,
                dst_network,
            } => {
                let combined = combine_ranges::<H, _>([src_ranges, dst_ranges])?;
                hasher.write_all(&combined.to_be_bytes())?;
                hasher.write_all(src_network)?;
                hasher.write_all(dst_network)
            }
            Self::DomainPair {
                fqdn,
                src_ip,
                src_network,
            } => {
                hasher.write_all(fqdn.as_bytes())?;
                hasher.write_all(src_ip.as_bytes())?;
                hasher.write_all(src_network)
            }
            Self::DomainPairRanges {
                ranges,
                network,
                fqdn,
            } => {
                let combined = combine_ranges::<H, _>([ranges])?;
                hasher.write_all(&combined.to_be_bytes())?;
                hasher.write_all(network)?;
                hasher.write_all(fqdn.as_bytes())
            }
        }
    }

    /// Computes the signed 64-bit hash key.
    pub fn hash_key<H: KeyHasher>(&self) -> io::Result<i64> {
        let mut hasher = H::default();
        self.write_to(&mut hasher)?;
        Ok(hasher.finish() as i64)
    }
}
