//! The safelist entry record.
//!
//! On the wire an entry is a flat object with one optional field per payload
//! shape. In memory the payload is a single [`Payload`] value; a record that
//! populates more than one payload field decodes to [`Payload::Conflicting`].

use crate::payload::{
    DomainPairEntry, DomainPairRangesEntry, IpEntry, IpPairEntry, IpPairRangesEntry, IpRangesEntry,
};
use crate::{null_as_default, Payload, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Schema version assigned to entries that arrive without one.
pub const DEFAULT_SCHEMA_VERSION: i32 = 5;

/// One exception rule in a safelist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryRecord", into = "EntryRecord")]
pub struct Entry {
    /// Document id assigned by the store the list was exported from. Accepts
    /// a plain hex string or the extended `{"$oid": ...}` form; empty ids are
    /// treated as absent.
    pub object_id: Option<String>,
    pub name: String,
    /// Type tag selecting the hashing strategy. Matched case-insensitively.
    pub entry_type: String,
    /// 64-bit identity of the entry; `0` until computed.
    pub hash_key: i64,
    pub comment: String,
    /// `0` means the record did not carry a schema version.
    pub schema_version: i32,
    pub payload: Payload,
}

impl Entry {
    /// Creates an unkeyed entry with the given type tag and payload.
    #[must_use]
    pub fn new(name: impl Into<String>, entry_type: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            entry_type: entry_type.into(),
            payload,
            ..Self::default()
        }
    }

    /// Sets an existing hash key.
    #[must_use]
    pub fn with_hash_key(mut self, hash_key: i64) -> Self {
        self.hash_key = hash_key;
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the schema version.
    #[must_use]
    pub fn with_schema_version(mut self, schema_version: i32) -> Self {
        self.schema_version = schema_version;
        self
    }

    /// True once a hash key has been assigned.
    #[must_use]
    pub const fn is_keyed(&self) -> bool {
        self.hash_key != 0
    }
}

/// Decodes a JSON array of entries.
pub fn decode_safelist(bytes: &[u8]) -> Result<Vec<Entry>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encodes entries as a JSON array, compact unless `pretty` is set.
pub fn encode_safelist(entries: &[Entry], pretty: bool) -> Result<Vec<u8>> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(entries)?
    } else {
        serde_json::to_vec(entries)?
    };
    Ok(bytes)
}

/// Flat wire form of [`Entry`]. Field order is the serialized key order.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct EntryRecord {
    #[serde(
        rename = "_id",
        deserialize_with = "object_id",
        skip_serializing_if = "Option::is_none"
    )]
    object_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(rename = "type", alias = "Type", deserialize_with = "null_as_default")]
    entry_type: String,
    #[serde(deserialize_with = "null_as_default")]
    hash_key: i64,
    #[serde(deserialize_with = "null_as_default")]
    comment: String,
    #[serde(deserialize_with = "null_as_default")]
    schema_version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip: Option<IpEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pair: Option<IpPairEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pair_ranges: Option<IpPairRangesEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranges: Option<IpRangesEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain_pair: Option<DomainPairEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain_pair_ranges: Option<DomainPairRangesEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    useragent: Option<String>,
}

/// Document id as exported: `"hex"` or `{"$oid": "hex"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectIdWire {
    Hex(String),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

fn object_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<ObjectIdWire>::deserialize(deserializer)? {
        Some(ObjectIdWire::Hex(id) | ObjectIdWire::Extended { oid: id }) => id,
        None => return Ok(None),
    };
    Ok(Some(id).filter(|id| !id.is_empty()))
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());

        let candidates = [
            record.ip.map(Payload::Ip),
            record.pair.map(Payload::IpPair),
            record.pair_ranges.map(Payload::IpPairRanges),
            record.ranges.map(Payload::IpRanges),
            non_empty(record.domain).map(Payload::Domain),
            record.domain_pair.map(Payload::DomainPair),
            record.domain_pair_ranges.map(Payload::DomainPairRanges),
            non_empty(record.useragent).map(Payload::Useragent),
        ];
        let mut populated: Vec<Payload> = candidates.into_iter().flatten().collect();
        let payload = if populated.len() > 1 {
            Payload::Conflicting(populated)
        } else {
            populated.pop().unwrap_or_default()
        };

        Self {
            object_id: record.object_id,
            name: record.name,
            entry_type: record.entry_type,
            hash_key: record.hash_key,
            comment: record.comment,
            schema_version: record.schema_version,
            payload,
        }
    }
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        let mut record = Self {
            object_id: entry.object_id.filter(|id| !id.is_empty()),
            name: entry.name,
            entry_type: entry.entry_type,
            hash_key: entry.hash_key,
            comment: entry.comment,
            schema_version: entry.schema_version,
            ..Self::default()
        };
        record.place(entry.payload);
        record
    }
}

impl EntryRecord {
    fn place(&mut self, payload: Payload) {
        match payload {
            Payload::None => {}
            Payload::Ip(p) => self.ip = Some(p),
            Payload::IpPair(p) => self.pair = Some(p),
            Payload::IpPairRanges(p) => self.pair_ranges = Some(p),
            Payload::IpRanges(p) => self.ranges = Some(p),
            Payload::Domain(d) => self.domain = Some(d),
            Payload::DomainPair(p) => self.domain_pair = Some(p),
            Payload::DomainPairRanges(p) => self.domain_pair_ranges = Some(p),
            Payload::Useragent(u) => self.useragent = Some(u),
            Payload::Conflicting(parts) => parts.into_iter().for_each(|p| self.place(p)),
        }
    }
}
