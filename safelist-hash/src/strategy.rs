//! Type tags, hashing strategies, and per-strategy validation.

use crate::error::{HashError, HashResult};
use crate::identity::Identity;
use safelist_types::{IpRange, NetworkId, Payload};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// How an entry's identifying fields are turned into a hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Range list within one network.
    Ranges,
    /// Domain name string.
    Domain,
    /// Host to FQDN.
    DomainPair,
    /// Range list to FQDN.
    DomainPairRanges,
    /// Single address.
    Ip,
    /// Source/destination address pair.
    IpPair,
    /// Source/destination range lists.
    PairRanges,
    /// User agent string.
    Useragent,
}

/// Every recognized type tag and the strategy it selects.
pub const TYPE_TABLE: &[(&str, Strategy)] = &[
    ("asn", Strategy::Ranges),
    ("asn_org", Strategy::Ranges),
    ("cidr", Strategy::Ranges),
    ("ranges", Strategy::Ranges),
    ("domain_literal", Strategy::Domain),
    ("domain_pattern", Strategy::Domain),
    ("domain_pair_literal", Strategy::DomainPair),
    ("domain_pair_pattern", Strategy::DomainPair),
    ("domain_pair_cidr_literal", Strategy::DomainPairRanges),
    ("domain_pair_cidr_pattern", Strategy::DomainPairRanges),
    ("domain_pair_ranges_literal", Strategy::DomainPairRanges),
    ("domain_pair_ranges_pattern", Strategy::DomainPairRanges),
    ("ip", Strategy::Ip),
    ("pair", Strategy::IpPair),
    ("pair_cidr", Strategy::PairRanges),
    ("pair_ranges", Strategy::PairRanges),
    ("useragent", Strategy::Useragent),
];

fn type_index() -> &'static HashMap<&'static str, Strategy> {
    static INDEX: OnceLock<HashMap<&'static str, Strategy>> = OnceLock::new();
    INDEX.get_or_init(|| TYPE_TABLE.iter().copied().collect())
}

impl Strategy {
    /// Looks up the strategy for a type tag, ignoring case.
    #[must_use]
    pub fn for_type(tag: &str) -> Option<Self> {
        type_index().get(tag.to_lowercase().as_str()).copied()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ranges => "ranges",
            Self::Domain => "domain",
            Self::DomainPair => "domain pair",
            Self::DomainPairRanges => "domain pair ranges",
            Self::Ip => "ip",
            Self::IpPair => "ip pair",
            Self::PairRanges => "pair ranges",
            Self::Useragent => "useragent",
        }
    }

    /// Payload field this strategy reads from.
    #[must_use]
    pub const fn payload_field(self) -> &'static str {
        match self {
            Self::Ranges => "ranges",
            Self::Domain => "domain",
            Self::DomainPair => "domain_pair",
            Self::DomainPairRanges => "domain_pair_ranges",
            Self::Ip => "ip",
            Self::IpPair => "pair",
            Self::PairRanges => "pair_ranges",
            Self::Useragent => "useragent",
        }
    }

    fn missing(self, field: &'static str) -> HashError {
        HashError::MissingField {
            strategy: self,
            field,
        }
    }

    fn network<'a>(self, id: &'a NetworkId, field: &'static str) -> HashResult<&'a [u8]> {
        if id.kind() == 0 {
            return Err(self.missing(field));
        }
        id.bytes().ok_or_else(|| self.missing(field))
    }

    fn text<'a>(self, s: &'a str, field: &'static str) -> HashResult<&'a str> {
        if s.is_empty() {
            Err(self.missing(field))
        } else {
            Ok(s)
        }
    }

    fn ranges<'a>(
        self,
        ranges: &'a Option<Vec<IpRange>>,
        field: &'static str,
    ) -> HashResult<&'a [IpRange]> {
        ranges.as_deref().ok_or_else(|| self.missing(field))
    }

    /// Checks that `payload` has everything this strategy hashes and returns
    /// a borrowed view of exactly those fields.
    pub fn identity(self, payload: &Payload) -> HashResult<Identity<'_>> {
        match (self, payload) {
            (Self::Ranges, Payload::IpRanges(p)) => Ok(Identity::Ranges {
                network: self.network(&p.network_id, "network_uuid")?,
                ranges: self.ranges(&p.ranges, "ranges")?,
            }),
            (Self::Domain, Payload::Domain(s)) | (Self::Useragent, Payload::Useragent(s)) => {
                Ok(Identity::Text(self.text(s, self.payload_field())?))
            }
            (Self::DomainPair, Payload::DomainPair(p)) => {
                let src = p.src.as_ref().ok_or_else(|| self.missing("src"))?;
                Ok(Identity::DomainPair {
                    src_ip: self.text(&src.ip, "src.ip")?,
                    src_network: self.network(&src.network_id, "src.network_uuid")?,
                    fqdn: self.text(&p.fqdn, "fqdn")?,
                })
            }
            (Self::DomainPairRanges, Payload::DomainPairRanges(p)) => {
                Ok(Identity::DomainPairRanges {
                    network: self.network(&p.network_id, "network_uuid")?,
                    fqdn: self.text(&p.fqdn, "fqdn")?,
                    ranges: self.ranges(&p.ranges, "ranges")?,
                })
            }
            (Self::Ip, Payload::Ip(p)) => Ok(Identity::Ip {
                ip: self.text(&p.ip, "ip")?,
                network: self.network(&p.network_id, "network_uuid")?,
            }),
            (Self::IpPair, Payload::IpPair(p)) => Ok(Identity::IpPair {
                src_ip: self.text(&p.src_ip, "src")?,
                src_network: self.network(&p.src_network_id, "src_network_uuid")?,
                dst_ip: self.text(&p.dst_ip, "dst")?,
                dst_network: self.network(&p.dst_network_id, "dst_network_uuid")?,
            }),
            (Self::PairRanges, Payload::IpPairRanges(p)) => Ok(Identity::PairRanges {
                src_ranges: self.ranges(&p.src_ranges, "src_ranges")?,
                src_network: self.network(&p.src_network_id, "src_network_uuid")?,
                dst_ranges: self.ranges(&p.dst_ranges, "dst_ranges")?,
                dst_network: self.network(&p.dst_network_id, "dst_network_uuid")?,
            }),
            (_, Payload::Conflicting(_)) => Err(HashError::ConflictingPayloads {
                strategy: self,
                fields: payload.field_names(),
            }),
            (_, other) => Err(HashError::WrongPayload {
                strategy: self,
                expected: self.payload_field(),
                found: other.field_name(),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
