// src/config.rs
//! Codec configuration.
//!
//! Network- and method-specific values are passed explicitly into the
//! builder and reconstructor at construction time; there is no process-wide
//! mutable setting anywhere in the crate.
//!
//! The synthetic default records live here because both the builder (for
//! missing document categories) and the reconstructor (for unreadable
//! ledger categories) must produce the exact same entries.

use crate::models::record::{
    AuthenticationRecord, ContextRecord, ControllerVector, CredentialRecord, KeyMaterial,
    ServiceRecord, VerificationMethodRecord,
};

/// Explicit configuration for the builder and reconstructor.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Canonical schema context URI, used as the default context and moved
    /// to position 0 on reconstruction when present.
    pub default_context_uri: String,
    /// Verification method type assumed when a document omits one.
    pub default_key_type: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            default_context_uri: "https://www.w3.org/ns/did/v1".to_string(),
            default_key_type: "BIP32-Ed25519".to_string(),
        }
    }
}

impl CodecConfig {
    /// Synthetic context entry for documents created without one.
    pub fn default_context(&self) -> ContextRecord {
        ContextRecord {
            uri: self.default_context_uri.clone(),
        }
    }

    /// Synthetic verification method: named slot, all-zero key material.
    pub fn default_verification_method(&self) -> VerificationMethodRecord {
        VerificationMethodRecord {
            id: "keys-1".to_string(),
            method_type: self.default_key_type.clone(),
            key: KeyMaterial::zeroed(),
            controller: ControllerVector::empty(),
            other_keys: None,
        }
    }

    /// Synthetic authentication entry referencing the default method.
    pub fn default_authentication(&self) -> AuthenticationRecord {
        AuthenticationRecord::Reference("keys-1".to_string())
    }

    /// Synthetic service entry.
    pub fn default_service(&self) -> ServiceRecord {
        ServiceRecord {
            id: "service-1".to_string(),
            service_type: "DIDCommMessaging".to_string(),
            service_endpoint: "https://example.com/endpoint".to_string(),
            other_keys: None,
        }
    }

    /// Synthetic credential entry.
    pub fn default_credential(&self) -> CredentialRecord {
        CredentialRecord {
            data: "credential-data".to_string(),
            public_key_multibase: "z6MkHaXU2BzXhf8X4n6Q1Q2QJ9CkN5j8L9M2P3R4S5T6U7V8W9X"
                .to_string(),
        }
    }
}
