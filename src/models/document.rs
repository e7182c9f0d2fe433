// src/models/document.rs
//! JSON-side DID document data model.
//!
//! Defines the W3C-shaped document structure consumed by the builder and
//! produced by the serializer, following the
//! [DID Core Specification](https://www.w3.org/TR/did-core/).
//!
//! The JSON shape is looser than the ledger records: authentication entries
//! may be bare fragment references or embedded methods, and the controller
//! field accepts either a single DID string or a list.

use serde::{Deserialize, Serialize};

/// A value that is either a single `T` or a list of them.
///
/// DID JSON uses this for `controller` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    /// Flattens into a list regardless of shape.
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value.clone()],
            OneOrMany::Many(values) => values.clone(),
        }
    }
}

/// A DID Document in its canonical JSON shape.
///
/// This is both the builder's input and the serializer's output. Absent
/// optional groups deserialize to `None`; absent timestamps are omitted
/// from serialized output entirely, never rendered as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidDocument {
    /// Context URIs; by convention the first is the canonical schema URI.
    /// Accepts the legacy `context` key on input.
    #[serde(rename = "@context", alias = "context", default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,

    /// The DID string identifier, e.g. `did:example:123`.
    pub id: String,

    #[serde(rename = "verificationMethod", default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<Vec<VerificationMethodEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Vec<AuthenticationEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<ServiceEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<CredentialEntry>>,

    /// Last-update timestamp, ISO-8601. Omitted when not recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Deactivation timestamp, ISO-8601. Omitted when not recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<String>,

    /// Resolution metadata; produced on read, ignored on create.
    #[serde(rename = "_metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

/// A verification method in JSON form.
///
/// Exactly one of `publicKeyHex` / `AdaAddress` / `publicKeyMultibase` is
/// expected; a method with none of them encodes an all-zero key buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMethodEntry {
    /// Method identifier; may carry a `did:...#fragment` prefix on input.
    pub id: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub method_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<OneOrMany<String>>,

    #[serde(rename = "publicKeyHex", default, skip_serializing_if = "Option::is_none")]
    pub public_key_hex: Option<String>,

    #[serde(rename = "AdaAddress", default, skip_serializing_if = "Option::is_none")]
    pub ada_address: Option<String>,

    #[serde(rename = "publicKeyMultibase", default, skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
}

/// An authentication entry: a fragment reference string or an embedded
/// verification method object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthenticationEntry {
    Reference(String),
    Embedded(VerificationMethodEntry),
}

/// A service endpoint in JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub service_type: String,

    #[serde(rename = "serviceEndpoint", default)]
    pub service_endpoint: String,
}

/// An attached credential in JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    #[serde(default)]
    pub data: String,

    #[serde(rename = "publicKeyMultibase", default)]
    pub public_key_multibase: String,
}

/// Resolution metadata attached to a reconstructed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Hex-encoded public addresses authorized to control the document.
    #[serde(rename = "authorizedControllers")]
    pub authorized_controllers: Vec<String>,
    /// Whether the identifier was found on the ledger.
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_union_deserializes_both_shapes() {
        let json = r#"["did:example:abc#keys-1", {"id": "keys-2", "type": "BIP32-Ed25519"}]"#;
        let entries: Vec<AuthenticationEntry> = serde_json::from_str(json).unwrap();
        assert!(matches!(&entries[0], AuthenticationEntry::Reference(r) if r.ends_with("keys-1")));
        assert!(matches!(&entries[1], AuthenticationEntry::Embedded(vm) if vm.id == "keys-2"));
    }

    #[test]
    fn controller_accepts_string_or_list() {
        let one: VerificationMethodEntry =
            serde_json::from_str(r#"{"id": "k", "controller": "did:example:a"}"#).unwrap();
        let many: VerificationMethodEntry =
            serde_json::from_str(r#"{"id": "k", "controller": ["did:example:a", "did:example:b"]}"#)
                .unwrap();
        assert_eq!(one.controller.unwrap().to_vec(), vec!["did:example:a"]);
        assert_eq!(many.controller.unwrap().to_vec().len(), 2);
    }

    #[test]
    fn legacy_context_key_is_accepted() {
        let doc: DidDocument =
            serde_json::from_str(r#"{"context": ["https://www.w3.org/ns/did/v1"], "id": "did:example:abc"}"#)
                .unwrap();
        assert_eq!(doc.context, vec!["https://www.w3.org/ns/did/v1"]);
    }

    #[test]
    fn absent_timestamps_are_omitted_from_output() {
        let doc = DidDocument {
            context: vec!["https://www.w3.org/ns/did/v1".to_string()],
            id: "did:example:abc".to_string(),
            verification_method: None,
            authentication: None,
            service: None,
            credentials: None,
            updated: None,
            deactivated: None,
            metadata: None,
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("updated"));
        assert!(!json.contains("null"));
    }
}
