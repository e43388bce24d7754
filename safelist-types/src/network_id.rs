//! Network context identifiers.
//!
//! A network ID is stored as a binary document value: a kind tag plus raw
//! bytes. On the JSON wire it looks like `{"Kind": 4, "Data": "<base64>"}`.
//! Kind `0` means no identifier was set; `Data: null` means the bytes are nil,
//! which is not the same as an empty byte string.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of the network an address belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NetworkIdWire", into = "NetworkIdWire")]
pub struct NetworkId {
    kind: u8,
    data: Option<Vec<u8>>,
}

impl NetworkId {
    /// Binary subtype used for UUID payloads.
    pub const UUID_KIND: u8 = 4;

    /// Creates a network ID from a kind tag and raw bytes.
    #[must_use]
    pub fn new(kind: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            data: Some(data.into()),
        }
    }

    /// Creates a network ID that carries a kind tag but nil bytes.
    #[must_use]
    pub const fn without_data(kind: u8) -> Self {
        Self { kind, data: None }
    }

    /// Creates a UUID-kind network ID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self::new(Self::UUID_KIND, uuid.as_bytes().to_vec())
    }

    /// Parses a UUID string into a UUID-kind network ID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }

    #[must_use]
    pub const fn kind(&self) -> u8 {
        self.kind
    }

    /// Raw identifier bytes, or `None` when nil.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// True when both the kind tag and the bytes are set.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.kind != 0 && self.data.is_some()
    }

    /// Returns the UUID when this is a well-formed UUID-kind identifier.
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        if self.kind != Self::UUID_KIND {
            return None;
        }
        self.bytes().and_then(|b| Uuid::from_slice(b).ok())
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(uuid) = self.as_uuid() {
            return write!(f, "{uuid}");
        }
        match &self.data {
            Some(data) => write!(f, "{}:{}", self.kind, STANDARD.encode(data)),
            None => write!(f, "{}:nil", self.kind),
        }
    }
}

impl FromStr for NetworkId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Serialize, Deserialize)]
struct NetworkIdWire {
    #[serde(rename = "Kind", alias = "kind", default)]
    kind: u8,
    #[serde(rename = "Data", alias = "data", default)]
    data: Option<String>,
}

impl TryFrom<NetworkIdWire> for NetworkId {
    type Error = crate::Error;

    fn try_from(wire: NetworkIdWire) -> crate::Result<Self> {
        let data = wire.data.map(|d| STANDARD.decode(d)).transpose()?;
        Ok(Self {
            kind: wire.kind,
            data,
        })
    }
}

impl From<NetworkId> for NetworkIdWire {
    fn from(id: NetworkId) -> Self {
        Self {
            kind: id.kind,
            data: id.data.map(|d| STANDARD.encode(d)),
        }
    }
}
