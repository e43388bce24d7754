//! Shared entry builders for hashing tests.

#![allow(dead_code)]

use safelist_types::{
    DomainPairEntry, DomainPairRangesEntry, DomainPairSrc, Entry, IpEntry, IpPairEntry,
    IpPairRangesEntry, IpRange, IpRangesEntry, NetworkId, Payload,
};
use std::io;

/// Sixteen `0xAA` bytes under the UUID kind.
pub fn net() -> NetworkId {
    NetworkId::new(NetworkId::UUID_KIND, vec![0xAA; 16])
}

pub fn net_byte(b: u8) -> NetworkId {
    NetworkId::new(NetworkId::UUID_KIND, vec![b])
}

pub fn ranges(pairs: &[(u32, u32)]) -> Vec<IpRange> {
    pairs.iter().map(|&(s, e)| IpRange::new(s, e)).collect()
}

pub fn ip_entry(ip: &str, network_id: NetworkId) -> Entry {
    Entry::new(
        "ip",
        "ip",
        Payload::Ip(IpEntry {
            ip: ip.into(),
            network_id,
            src: true,
            dst: true,
        }),
    )
}

pub fn pair_entry(src: &str, dst: &str) -> Entry {
    Entry::new(
        "pair",
        "pair",
        Payload::IpPair(IpPairEntry {
            src_ip: src.into(),
            src_network_id: net_byte(1),
            dst_ip: dst.into(),
            dst_network_id: net_byte(2),
        }),
    )
}

pub fn ranges_entry(entry_type: &str, pairs: &[(u32, u32)]) -> Entry {
    Entry::new(
        "ranges",
        entry_type,
        Payload::IpRanges(IpRangesEntry {
            ranges: Some(ranges(pairs)),
            network_id: net(),
            src: false,
            dst: false,
        }),
    )
}

pub fn pair_ranges_entry(src: &[(u32, u32)], dst: &[(u32, u32)]) -> Entry {
    Entry::new(
        "pair ranges",
        "pair_ranges",
        Payload::IpPairRanges(IpPairRangesEntry {
            src_ranges: Some(ranges(src)),
            src_network_id: net_byte(1),
            dst_ranges: Some(ranges(dst)),
            dst_network_id: net_byte(2),
        }),
    )
}

pub fn domain_entry(domain: &str) -> Entry {
    Entry::new("domain", "domain_literal", Payload::Domain(domain.into()))
}

pub fn useragent_entry(ua: &str) -> Entry {
    Entry::new("ua", "useragent", Payload::Useragent(ua.into()))
}

pub fn domain_pair_entry(src_ip: &str, fqdn: &str) -> Entry {
    Entry::new(
        "domain pair",
        "domain_pair_literal",
        Payload::DomainPair(DomainPairEntry {
            src: Some(DomainPairSrc {
                ip: src_ip.into(),
                network_id: net_byte(1),
            }),
            fqdn: fqdn.into(),
        }),
    )
}

pub fn domain_pair_ranges_entry(pairs: &[(u32, u32)], fqdn: &str) -> Entry {
    Entry::new(
        "domain pair ranges",
        "domain_pair_cidr_literal",
        Payload::DomainPairRanges(DomainPairRangesEntry {
            network_id: net(),
            fqdn: fqdn.into(),
            ranges: Some(ranges(pairs)),
        }),
    )
}

/// A hasher whose every write fails.
#[derive(Default)]
pub struct BrokenHasher;

impl io::Write for BrokenHasher {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("hasher offline"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl safelist_hash::KeyHasher for BrokenHasher {
    fn finish(&self) -> u64 {
        0
    }
}
