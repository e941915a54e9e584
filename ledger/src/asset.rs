//! # Asset & Account Identifiers
//!
//! Every balance and price-source lookup is keyed by an [`AssetId`]:
//! either the native-asset sentinel or the 20-byte address of a fungible
//! token contract. Owners are identified by an [`AccountId`], an opaque
//! address string — the ledger never interprets it beyond equality.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TokenAddress
// ---------------------------------------------------------------------------

/// The 20-byte address of a fungible-token contract.
///
/// Stored raw; displayed and parsed as `0x`-prefixed hex. Two addresses
/// are the same token — there is no other notion of token identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenAddress([u8; 20]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 20-byte address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns the `0x`-prefixed hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses a hex address, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        if bytes.len() != 20 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAddress({})", self.to_hex())
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for TokenAddress {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// An asset held by the vault: the chain's native asset or a token.
///
/// The native variant is a sentinel distinct from every token address,
/// mirroring the on-chain convention of reserving a marker value for the
/// base currency.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AssetId {
    /// The chain's base currency.
    Native,
    /// A fungible-token contract.
    Token(TokenAddress),
}

impl AssetId {
    /// Returns the token address, or `None` for the native asset.
    pub fn token(&self) -> Option<TokenAddress> {
        match self {
            AssetId::Native => None,
            AssetId::Token(addr) => Some(*addr),
        }
    }

    /// Returns `true` for the native-asset sentinel.
    pub fn is_native(&self) -> bool {
        matches!(self, AssetId::Native)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Native => write!(f, "native"),
            AssetId::Token(addr) => write!(f, "{}", addr),
        }
    }
}

impl From<TokenAddress> for AssetId {
    fn from(addr: TokenAddress) -> Self {
        AssetId::Token(addr)
    }
}

impl std::str::FromStr for AssetId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "native" {
            Ok(AssetId::Native)
        } else {
            TokenAddress::from_hex(s).map(AssetId::Token)
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helper: serialize HashMap<AssetId, V> with string keys
// ---------------------------------------------------------------------------

/// Serde helper module for `HashMap<AssetId, V>` maps.
///
/// JSON requires map keys to be strings, but `AssetId` is an enum that
/// serde would otherwise serialize structurally. This module converts
/// keys to/from their display form (`"native"` or `"0x…"` hex) so the
/// map serializes as a plain JSON object.
///
/// # Usage
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct MyStruct {
///     #[serde(with = "crate::asset::asset_id_map")]
///     balances: HashMap<AssetId, SomeValue>,
/// }
/// ```
pub mod asset_id_map {
    use super::AssetId;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<V, S>(map: &HashMap<AssetId, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut ser_map = serializer.serialize_map(Some(map.len()))?;
        for (key, value) in map {
            ser_map.serialize_entry(&key.to_string(), value)?;
        }
        ser_map.end()
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<HashMap<AssetId, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let string_map: HashMap<String, V> = HashMap::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(key, value)| {
                key.parse::<AssetId>()
                    .map(|id| (id, value))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// An owner identity: a caller, a withdrawal destination, the deployer.
///
/// Opaque to the ledger — equality and hashing are all it needs. Kept as
/// a string so host environments can use whatever address format they
/// already have.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an `AccountId` from any address-like string.
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Returns the underlying address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_address_hex_roundtrip() {
        let addr = TokenAddress::from_bytes([0xAB; 20]);
        let s = addr.to_hex();
        assert!(s.starts_with("0x"));
        assert_eq!(TokenAddress::from_hex(&s).unwrap(), addr);
        // Prefix is optional on parse.
        assert_eq!(TokenAddress::from_hex(&s[2..]).unwrap(), addr);
    }

    #[test]
    fn token_address_wrong_length_rejected() {
        assert!(TokenAddress::from_hex("0xabcd").is_err());
    }

    #[test]
    fn native_is_distinct_from_every_token() {
        let zero = AssetId::Token(TokenAddress::from_bytes([0u8; 20]));
        assert_ne!(AssetId::Native, zero);
        assert!(AssetId::Native.is_native());
        assert!(!zero.is_native());
        assert_eq!(AssetId::Native.token(), None);
    }

    #[test]
    fn asset_id_parses_display_form() {
        assert_eq!("native".parse::<AssetId>().unwrap(), AssetId::Native);
        let addr = TokenAddress::from_bytes([3u8; 20]);
        let parsed: AssetId = addr.to_hex().parse().unwrap();
        assert_eq!(parsed, AssetId::Token(addr));
    }

    #[test]
    fn asset_id_serialization_roundtrip() {
        let asset = AssetId::Token(TokenAddress::from_bytes([7u8; 20]));
        let json = serde_json::to_string(&asset).expect("serialize");
        let back: AssetId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(asset, back);
    }
}
