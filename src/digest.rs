//! Digest and selector types.
//!
//! Hex text is lower-case, most-significant nibble first, with an optional
//! `0x` prefix on output and tolerated on input.

use crate::error::{HashError, HashResult};
use crate::keccak::DIGEST_LEN;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Length of an ABI function selector in bytes.
pub const SELECTOR_LEN: usize = 4;

/// Encode bytes as lower-case hex, optionally `0x`-prefixed.
pub fn encode_hex(bytes: &[u8], with_prefix: bool) -> String {
    let hex = hex::encode(bytes);
    if with_prefix {
        format!("0x{}", hex)
    } else {
        hex
    }
}

fn decode_fixed<const N: usize>(hex_str: &str) -> HashResult<[u8; N]> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);

    if hex_str.len() != 2 * N {
        return Err(HashError::WrongLength {
            expected: 2 * N,
            actual: hex_str.len(),
        });
    }

    let bytes = hex::decode(hex_str).map_err(|e| HashError::InvalidHex(e.to_string()))?;

    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// A 32-byte Keccak-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Create from a hex string (64 hex chars, `0x` prefix tolerated).
    pub fn from_hex(hex_str: &str) -> HashResult<Self> {
        decode_fixed(hex_str).map(Digest)
    }

    /// Convert to hex string.
    pub fn to_hex(&self, with_prefix: bool) -> String {
        encode_hex(&self.0, with_prefix)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Consume into the underlying bytes.
    pub fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// The ABI selector: the first four bytes.
    pub fn selector(&self) -> Selector {
        let mut arr = [0u8; SELECTOR_LEN];
        arr.copy_from_slice(&self.0[..SELECTOR_LEN]);
        Selector(arr)
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(arr: [u8; DIGEST_LEN]) -> Self {
        Digest(arr)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl Deref for Digest {
    type Target = [u8; DIGEST_LEN];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex(true))
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex(f.alternate()))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex(true))
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A 4-byte function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector([u8; SELECTOR_LEN]);

impl Selector {
    /// Create from a hex string (8 hex chars, `0x` prefix tolerated).
    pub fn from_hex(hex_str: &str) -> HashResult<Self> {
        decode_fixed(hex_str).map(Selector)
    }

    /// Convert to hex string.
    pub fn to_hex(&self, with_prefix: bool) -> String {
        encode_hex(&self.0, with_prefix)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; SELECTOR_LEN] {
        &self.0
    }
}

impl From<[u8; SELECTOR_LEN]> for Selector {
    fn from(arr: [u8; SELECTOR_LEN]) -> Self {
        Selector(arr)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex(true))
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex(true))
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Selector::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
