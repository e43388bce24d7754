//! Per-type payload shapes.
//!
//! Every struct tolerates missing fields on decode: a record that leaves out
//! part of its payload still loads, and the hasher decides whether the entry
//! has enough information to be keyed.

use crate::{null_as_default, IpRange, NetworkId};
use serde::{Deserialize, Serialize};

/// A single address, optionally restricted to one traffic direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(rename = "network_uuid", deserialize_with = "null_as_default")]
    pub network_id: NetworkId,
    #[serde(deserialize_with = "null_as_default")]
    pub src: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub dst: bool,
}

/// A source/destination address pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpPairEntry {
    #[serde(rename = "src", deserialize_with = "null_as_default")]
    pub src_ip: String,
    #[serde(rename = "src_network_uuid", deserialize_with = "null_as_default")]
    pub src_network_id: NetworkId,
    #[serde(rename = "dst", deserialize_with = "null_as_default")]
    pub dst_ip: String,
    #[serde(rename = "dst_network_uuid", deserialize_with = "null_as_default")]
    pub dst_network_id: NetworkId,
}

/// A source/destination pair where each side is a list of ranges.
///
/// `None` range lists are kept distinct from empty ones; they serialize back
/// as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpPairRangesEntry {
    pub src_ranges: Option<Vec<IpRange>>,
    #[serde(rename = "src_network_uuid", deserialize_with = "null_as_default")]
    pub src_network_id: NetworkId,
    pub dst_ranges: Option<Vec<IpRange>>,
    #[serde(rename = "dst_network_uuid", deserialize_with = "null_as_default")]
    pub dst_network_id: NetworkId,
}

/// A list of ranges within one network (CIDR blocks, ASN allocations, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpRangesEntry {
    pub ranges: Option<Vec<IpRange>>,
    #[serde(rename = "network_uuid", deserialize_with = "null_as_default")]
    pub network_id: NetworkId,
    #[serde(deserialize_with = "null_as_default")]
    pub src: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub dst: bool,
}

/// The source side of a domain pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainPairSrc {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(rename = "network_uuid", deserialize_with = "null_as_default")]
    pub network_id: NetworkId,
}

/// A host talking to a fully qualified domain name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainPairEntry {
    pub src: Option<DomainPairSrc>,
    #[serde(deserialize_with = "null_as_default")]
    pub fqdn: String,
}

/// A set of source ranges talking to a fully qualified domain name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainPairRangesEntry {
    #[serde(rename = "network_uuid", deserialize_with = "null_as_default")]
    pub network_id: NetworkId,
    #[serde(deserialize_with = "null_as_default")]
    pub fqdn: String,
    pub ranges: Option<Vec<IpRange>>,
}

/// The populated payload of an entry.
///
/// Which payload is set does not have to agree with the entry's `type` tag;
/// the hasher checks that. A record that sets more than one payload field
/// loads as [`Payload::Conflicting`] so the rest of the list is unaffected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    /// No payload field was populated.
    #[default]
    None,
    Ip(IpEntry),
    IpPair(IpPairEntry),
    IpPairRanges(IpPairRangesEntry),
    IpRanges(IpRangesEntry),
    Domain(String),
    DomainPair(DomainPairEntry),
    DomainPairRanges(DomainPairRangesEntry),
    Useragent(String),
    /// More than one payload field was populated, in record field order.
    Conflicting(Vec<Payload>),
}

impl Payload {
    /// The record field this payload is stored under, if any.
    #[must_use]
    pub const fn field_name(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ip(_) => Some("ip"),
            Self::IpPair(_) => Some("pair"),
            Self::IpPairRanges(_) => Some("pair_ranges"),
            Self::IpRanges(_) => Some("ranges"),
            Self::Domain(_) => Some("domain"),
            Self::DomainPair(_) => Some("domain_pair"),
            Self::DomainPairRanges(_) => Some("domain_pair_ranges"),
            Self::Useragent(_) => Some("useragent"),
            Self::Conflicting(_) => None,
        }
    }

    /// Every record field this payload occupies.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            Self::Conflicting(parts) => parts.iter().flat_map(Self::field_names).collect(),
            other => other.field_name().into_iter().collect(),
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
