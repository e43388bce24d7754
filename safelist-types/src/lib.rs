//! Core type definitions for safelist entries.
//!
//! This crate defines the record model shared by the hasher and the CLI:
//! - [`Entry`] with its common fields and a single [`Payload`]
//! - The per-type payload shapes (IP, pair, ranges, domain pair, ...)
//! - [`NetworkId`], the opaque network context identifier
//! - The JSON wire format, including the `{"Kind", "Data"}` binary shape
//!
//! Nothing here knows how hash keys are computed; see `safelist-hash`.

mod entry;
mod network_id;
mod payload;
mod range;

pub use entry::{decode_safelist, encode_safelist, Entry, DEFAULT_SCHEMA_VERSION};
pub use network_id::NetworkId;
pub use payload::{
    DomainPairEntry, DomainPairRangesEntry, DomainPairSrc, IpEntry, IpPairEntry,
    IpPairRangesEntry, IpRangesEntry, Payload,
};
pub use range::IpRange;

use serde::{Deserialize, Deserializer};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or encoding safelist records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid network id data: {0}")]
    InvalidNetworkId(#[from] base64::DecodeError),
}

/// Treats an explicit JSON `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
