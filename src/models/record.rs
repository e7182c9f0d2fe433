// src/models/record.rs
//! Ledger-side record types.
//!
//! These are the fixed-width structures actually persisted by the identity
//! ledger. The storage model has no variable-length arrays, no nulls, and no
//! pointer-based unions, so every record here is built from fixed-width
//! zero-padded buffers, closed sum types with explicit wire tags, and
//! fixed-capacity slot vectors.
//!
//! All buffers serialize as hex strings so a ledger snapshot can be
//! round-tripped through JSON for inspection and tests.

use crate::codec::bytes::{string_from_padded, to_fixed_bytes};
use crate::codec::slots::SlotVector;
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of a stored identifier buffer.
pub const DID_ID_WIDTH: usize = 64;
/// Width of raw public key material (KeyMaterial variant A).
pub const PUBLIC_KEY_WIDTH: usize = 130;
/// Width of a chain address (KeyMaterial variant B).
pub const CHAIN_ADDRESS_WIDTH: usize = 104;
/// Width of a stored ISO-8601 timestamp.
pub const TIMESTAMP_WIDTH: usize = 20;
/// Width of an authorized controller public address.
pub const AUTHORIZED_ADDRESS_WIDTH: usize = 32;
/// Slot count of a controller vector.
pub const CONTROLLER_SLOTS: usize = 5;

/// Hex (de)serialization for fixed-width buffers.
pub(crate) mod serde_hex {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let raw = hex::decode(&text).map_err(de::Error::custom)?;
        raw.try_into()
            .map_err(|_| de::Error::custom(format!("expected {} bytes", N)))
    }
}

/// A DID stored as a zero-padded 64-byte buffer.
///
/// Two identifiers are equal iff their padded byte representations are
/// equal. Strings longer than 64 bytes are truncated silently; validating
/// identifier length is the caller's responsibility.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DidId([u8; DID_ID_WIDTH]);

impl DidId {
    /// Encodes a DID string into its fixed-width form.
    pub fn new(did: &str) -> Self {
        DidId(to_fixed_bytes(did))
    }

    /// The padded storage bytes.
    pub fn as_bytes(&self) -> &[u8; DID_ID_WIDTH] {
        &self.0
    }

    /// Recovers the DID string, stripping the zero padding.
    pub fn to_did_string(&self) -> Result<String, CodecError> {
        string_from_padded(&self.0, "id")
    }
}

impl fmt::Debug for DidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_did_string() {
            Ok(s) => write!(f, "DidId({:?})", s),
            Err(_) => write!(f, "DidId(0x{})", hex::encode(self.0)),
        }
    }
}

impl fmt::Display for DidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_did_string() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "0x{}", hex::encode(self.0)),
        }
    }
}

// DidId keys the ledger maps, so it must serialize as a plain string.
impl Serialize for DidId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for DidId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let raw = hex::decode(&text).map_err(serde::de::Error::custom)?;
        let bytes: [u8; DID_ID_WIDTH] = raw
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 64 identifier bytes"))?;
        Ok(DidId(bytes))
    }
}

/// One opaque context URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub uri: String,
}

/// Cryptographic key reference: raw public key bytes or a chain address.
///
/// A closed sum type; the wire tag plus a zero-filled placeholder for the
/// inactive buffer are produced only at serialization time, so in-memory
/// code never sees a meaningless second field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyMaterial {
    /// Hex-decoded raw key material, zero-padded to 130 bytes.
    PublicKeyHex(#[serde(with = "serde_hex")] [u8; PUBLIC_KEY_WIDTH]),
    /// Chain address bytes, zero-padded to 104 bytes.
    ChainAddress(#[serde(with = "serde_hex")] [u8; CHAIN_ADDRESS_WIDTH]),
}

impl KeyMaterial {
    /// The all-zero variant-A key used as a structural placeholder.
    pub fn zeroed() -> Self {
        KeyMaterial::PublicKeyHex([0u8; PUBLIC_KEY_WIDTH])
    }
}

/// Exactly five 64-byte controller slots, filled from index 0.
///
/// The logical controller count is 0..=5; unused slots stay zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerVector(pub(crate) [[u8; DID_ID_WIDTH]; CONTROLLER_SLOTS]);

impl ControllerVector {
    /// A vector with every slot zero-filled (no controllers).
    pub fn empty() -> Self {
        ControllerVector([[0u8; DID_ID_WIDTH]; CONTROLLER_SLOTS])
    }

    /// Raw slot access, mainly for wire encoding.
    pub fn slots(&self) -> &[[u8; DID_ID_WIDTH]; CONTROLLER_SLOTS] {
        &self.0
    }
}

impl Serialize for ControllerVector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(CONTROLLER_SLOTS))?;
        for slot in &self.0 {
            seq.serialize_element(&hex::encode(slot))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ControllerVector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let texts: Vec<String> = Vec::deserialize(deserializer)?;
        if texts.len() != CONTROLLER_SLOTS {
            return Err(serde::de::Error::custom(format!(
                "expected {} controller slots, got {}",
                CONTROLLER_SLOTS,
                texts.len()
            )));
        }
        let mut slots = [[0u8; DID_ID_WIDTH]; CONTROLLER_SLOTS];
        for (i, text) in texts.iter().enumerate() {
            let raw = hex::decode(text).map_err(serde::de::Error::custom)?;
            slots[i] = raw
                .try_into()
                .map_err(|_| serde::de::Error::custom("expected 64 controller bytes"))?;
        }
        Ok(ControllerVector(slots))
    }
}

/// A verification method as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMethodRecord {
    /// Fragment identifier, stripped of any `#` prefix.
    pub id: String,
    /// Key type, e.g. `BIP32-Ed25519`.
    pub method_type: String,
    pub key: KeyMaterial,
    pub controller: ControllerVector,
    /// Free-form key/value extensions carried alongside the method.
    pub other_keys: Option<Vec<(String, String)>>,
}

/// An authentication entry: a fragment reference to a verification method
/// defined elsewhere in the document, or an embedded method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthenticationRecord {
    Reference(String),
    Embedded(VerificationMethodRecord),
}

/// A service endpoint as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub service_type: String,
    pub service_endpoint: String,
    pub other_keys: Option<Vec<(String, String)>>,
}

/// An attached credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub data: String,
    pub public_key_multibase: String,
}

/// A public address authorized to control the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedAddress(#[serde(with = "serde_hex")] pub [u8; AUTHORIZED_ADDRESS_WIDTH]);

impl AuthorizedAddress {
    pub fn zeroed() -> Self {
        AuthorizedAddress([0u8; AUTHORIZED_ADDRESS_WIDTH])
    }
}

/// A stored timestamp: 20 zero-padded ISO-8601 bytes plus epoch seconds.
///
/// Always wrapped in `Option` by consumers; absence means "not recorded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTimestamp {
    #[serde(with = "serde_hex")]
    pub iso8601: [u8; TIMESTAMP_WIDTH],
    pub epoch_seconds: i64,
}

impl LedgerTimestamp {
    /// Builds a timestamp from a UTC datetime, truncated to whole seconds.
    pub fn from_datetime(at: chrono::DateTime<chrono::Utc>) -> Self {
        let rendered = at.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        LedgerTimestamp {
            iso8601: to_fixed_bytes(&rendered),
            epoch_seconds: at.timestamp(),
        }
    }

    /// The current time as a ledger timestamp.
    pub fn now() -> Self {
        Self::from_datetime(chrono::Utc::now())
    }

    /// Recovers the ISO-8601 string, stripping zero padding.
    pub fn iso8601_string(&self) -> Result<String, CodecError> {
        string_from_padded(&self.iso8601, "timestamp")
    }
}

impl ContextRecord {
    /// Structurally valid all-empty wire placeholder.
    pub fn placeholder() -> Self {
        ContextRecord { uri: String::new() }
    }
}

impl VerificationMethodRecord {
    /// Structurally valid all-zero wire placeholder.
    pub fn placeholder() -> Self {
        VerificationMethodRecord {
            id: String::new(),
            method_type: String::new(),
            key: KeyMaterial::zeroed(),
            controller: ControllerVector::empty(),
            other_keys: None,
        }
    }
}

impl AuthenticationRecord {
    /// Structurally valid all-empty wire placeholder.
    pub fn placeholder() -> Self {
        AuthenticationRecord::Reference(String::new())
    }
}

impl ServiceRecord {
    /// Structurally valid all-empty wire placeholder.
    pub fn placeholder() -> Self {
        ServiceRecord {
            id: String::new(),
            service_type: String::new(),
            service_endpoint: String::new(),
            other_keys: None,
        }
    }
}

impl CredentialRecord {
    /// Structurally valid all-empty wire placeholder.
    pub fn placeholder() -> Self {
        CredentialRecord {
            data: String::new(),
            public_key_multibase: String::new(),
        }
    }
}

/// The full set of fixed-width structures produced by one builder
/// invocation, ready for ledger submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidRecords {
    pub id: DidId,
    pub contexts: SlotVector<ContextRecord>,
    pub verification_methods: SlotVector<VerificationMethodRecord>,
    pub authentication_methods: SlotVector<AuthenticationRecord>,
    pub services: SlotVector<ServiceRecord>,
    pub credentials: SlotVector<CredentialRecord>,
    pub authorized_addresses: SlotVector<AuthorizedAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn did_id_equality_is_padded_byte_equality() {
        let a = DidId::new("did:example:abc");
        let b = DidId::new("did:example:abc");
        let c = DidId::new("did:example:abd");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn did_id_truncates_past_64_bytes() {
        let long = "did:example:".to_string() + &"x".repeat(100);
        let id = DidId::new(&long);
        assert_eq!(id.as_bytes().len(), DID_ID_WIDTH);
        assert_eq!(id.to_did_string().unwrap(), long[..DID_ID_WIDTH]);
    }

    #[test]
    fn ledger_timestamp_is_exactly_20_iso_bytes() {
        let at = chrono::DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let ts = LedgerTimestamp::from_datetime(at);
        assert_eq!(ts.iso8601_string().unwrap(), "2024-01-15T10:30:00Z");
        assert_eq!(ts.iso8601_string().unwrap().len(), TIMESTAMP_WIDTH);
        assert_eq!(ts.epoch_seconds, at.timestamp());
    }

    #[test]
    fn key_material_serde_round_trip() {
        let mut bytes = [0u8; PUBLIC_KEY_WIDTH];
        bytes[0] = 0xaa;
        let key = KeyMaterial::PublicKeyHex(bytes);
        let json = serde_json::to_string(&key).unwrap();
        let back: KeyMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }

    #[test]
    fn controller_vector_serde_round_trip() {
        let mut vector = ControllerVector::empty();
        vector.0[0] = to_fixed_bytes("did:example:controller");
        let json = serde_json::to_string(&vector).unwrap();
        let back: ControllerVector = serde_json::from_str(&json).unwrap();
        assert_eq!(vector, back);
    }
}
