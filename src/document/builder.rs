// src/document/builder.rs
//! Document builder: JSON document to fixed-width ledger records.
//!
//! A pure transform with no side effects. Every document category is
//! encoded into a five-slot vector; missing categories are defaulted to a
//! single synthetic record so the ledger schema stays non-empty by
//! convention after creation.

use crate::codec::controller::to_controller_vector;
use crate::codec::key::{parse_chain_address, parse_public_key_hex, parse_raw_key_bytes};
use crate::codec::slots::SlotVector;
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::models::document::{
    AuthenticationEntry, DidDocument, VerificationMethodEntry,
};
use crate::models::record::{
    AuthenticationRecord, ContextRecord, ControllerVector, CredentialRecord, DidId, DidRecords,
    KeyMaterial, ServiceRecord, VerificationMethodRecord,
};

/// Reduces an id to its fragment: the suffix after the last `#`, or the
/// whole string when no `#` is present.
fn fragment(id: &str) -> &str {
    match id.rsplit_once('#') {
        Some((_, frag)) => frag,
        None => id,
    }
}

/// Transforms canonical JSON documents into ledger-ready records.
pub struct DocumentBuilder {
    config: CodecConfig,
}

impl DocumentBuilder {
    pub fn new(config: CodecConfig) -> Self {
        DocumentBuilder { config }
    }

    /// Builds the fixed-width record set for one document.
    ///
    /// # Errors
    /// - `CapacityExceeded` if any category supplies more than five entries.
    /// - `MalformedEncoding` if key material or an address fails to decode.
    pub fn build(&self, document: &DidDocument) -> Result<DidRecords, CodecError> {
        log::debug!("building ledger records for {}", document.id);
        let id = DidId::new(&document.id);

        let contexts = self.build_contexts(document)?;
        let verification_methods = self.build_verification_methods(document)?;
        let authentication_methods = self.build_authentication(document)?;
        let services = self.build_services(document)?;
        let credentials = self.build_credentials(document)?;

        Ok(DidRecords {
            id,
            contexts,
            verification_methods,
            authentication_methods,
            services,
            credentials,
            // Authorized addresses are granted post-creation; none at build time.
            authorized_addresses: SlotVector::empty(),
        })
    }

    fn build_contexts(
        &self,
        document: &DidDocument,
    ) -> Result<SlotVector<ContextRecord>, CodecError> {
        let uris = if document.context.is_empty() {
            vec![self.config.default_context_uri.clone()]
        } else {
            document.context.clone()
        };
        let records = uris.into_iter().map(|uri| ContextRecord { uri }).collect();
        SlotVector::from_items(records, "contexts")
    }

    fn build_verification_methods(
        &self,
        document: &DidDocument,
    ) -> Result<SlotVector<VerificationMethodRecord>, CodecError> {
        let records = match document.verification_method.as_deref() {
            None | Some([]) => vec![self.config.default_verification_method()],
            Some(entries) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    self.encode_method(entry, &document.id, &format!("keys-{}", index + 1))
                })
                .collect::<Result<_, _>>()?,
        };
        SlotVector::from_items(records, "verification methods")
    }

    fn build_authentication(
        &self,
        document: &DidDocument,
    ) -> Result<SlotVector<AuthenticationRecord>, CodecError> {
        let records = match document.authentication.as_deref() {
            None | Some([]) => vec![self.config.default_authentication()],
            Some(entries) => entries
                .iter()
                .map(|entry| match entry {
                    AuthenticationEntry::Reference(reference) => {
                        let frag = fragment(reference);
                        let frag = if frag.is_empty() { "keys-1" } else { frag };
                        Ok(AuthenticationRecord::Reference(frag.to_string()))
                    }
                    AuthenticationEntry::Embedded(method) => Ok(AuthenticationRecord::Embedded(
                        self.encode_method(method, &document.id, "auth-1")?,
                    )),
                })
                .collect::<Result<_, _>>()?,
        };
        SlotVector::from_items(records, "authentication methods")
    }

    fn build_services(
        &self,
        document: &DidDocument,
    ) -> Result<SlotVector<ServiceRecord>, CodecError> {
        let records = match document.service.as_deref() {
            None | Some([]) => vec![self.config.default_service()],
            Some(entries) => entries
                .iter()
                .map(|entry| {
                    let frag = fragment(&entry.id);
                    ServiceRecord {
                        id: if frag.is_empty() {
                            "default-service".to_string()
                        } else {
                            frag.to_string()
                        },
                        service_type: if entry.service_type.is_empty() {
                            "DefaultService".to_string()
                        } else {
                            entry.service_type.clone()
                        },
                        service_endpoint: if entry.service_endpoint.is_empty() {
                            "https://example.com".to_string()
                        } else {
                            entry.service_endpoint.clone()
                        },
                        other_keys: None,
                    }
                })
                .collect(),
        };
        SlotVector::from_items(records, "services")
    }

    fn build_credentials(
        &self,
        document: &DidDocument,
    ) -> Result<SlotVector<CredentialRecord>, CodecError> {
        let records = match document.credentials.as_deref() {
            None | Some([]) => vec![self.config.default_credential()],
            Some(entries) => entries
                .iter()
                .map(|entry| CredentialRecord {
                    data: if entry.data.is_empty() {
                        "default-credential-data".to_string()
                    } else {
                        entry.data.clone()
                    },
                    public_key_multibase: if entry.public_key_multibase.is_empty() {
                        "default-key".to_string()
                    } else {
                        entry.public_key_multibase.clone()
                    },
                })
                .collect(),
        };
        SlotVector::from_items(records, "credentials")
    }

    /// Encodes one verification method entry, shared by the top-level list
    /// and embedded authentication methods.
    fn encode_method(
        &self,
        entry: &VerificationMethodEntry,
        document_id: &str,
        fallback_id: &str,
    ) -> Result<VerificationMethodRecord, CodecError> {
        let key = self.encode_key(entry)?;
        let controller = self.encode_controller(entry, document_id)?;

        let frag = fragment(&entry.id);
        let id = if frag.is_empty() {
            fallback_id.to_string()
        } else {
            frag.to_string()
        };

        Ok(VerificationMethodRecord {
            id,
            method_type: entry
                .method_type
                .clone()
                .unwrap_or_else(|| self.config.default_key_type.clone()),
            key,
            controller,
            other_keys: None,
        })
    }

    fn encode_key(&self, entry: &VerificationMethodEntry) -> Result<KeyMaterial, CodecError> {
        if let Some(hex_key) = &entry.public_key_hex {
            parse_public_key_hex(hex_key)
        } else if let Some(address) = &entry.ada_address {
            parse_chain_address(address)
        } else if let Some(multibase) = &entry.public_key_multibase {
            parse_raw_key_bytes(multibase)
        } else {
            Ok(KeyMaterial::zeroed())
        }
    }

    fn encode_controller(
        &self,
        entry: &VerificationMethodEntry,
        document_id: &str,
    ) -> Result<ControllerVector, CodecError> {
        let controllers = entry
            .controller
            .as_ref()
            .map(|c| c.to_vec())
            .unwrap_or_else(|| vec![document_id.to_string()]);
        to_controller_vector(&controllers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::controller::from_controller_vector;
    use crate::models::document::{CredentialEntry, OneOrMany, ServiceEntry};

    fn builder() -> DocumentBuilder {
        DocumentBuilder::new(CodecConfig::default())
    }

    fn empty_document(id: &str) -> DidDocument {
        DidDocument {
            context: vec![],
            id: id.to_string(),
            verification_method: None,
            authentication: None,
            service: None,
            credentials: None,
            updated: None,
            deactivated: None,
            metadata: None,
        }
    }

    #[test]
    fn empty_document_gets_one_synthetic_record_per_category() {
        let records = builder().build(&empty_document("did:example:abc")).unwrap();
        assert_eq!(records.contexts.len(), 1);
        assert_eq!(
            records.contexts.items()[0].uri,
            "https://www.w3.org/ns/did/v1"
        );
        assert_eq!(records.verification_methods.len(), 1);
        assert_eq!(records.verification_methods.items()[0].id, "keys-1");
        assert_eq!(records.authentication_methods.len(), 1);
        assert_eq!(records.services.len(), 1);
        assert_eq!(records.credentials.len(), 1);
        assert!(records.authorized_addresses.is_empty());
    }

    #[test]
    fn fragment_is_suffix_after_last_hash() {
        assert_eq!(fragment("did:example:abc#keys-1"), "keys-1");
        assert_eq!(fragment("a#b#keys-2"), "keys-2");
        assert_eq!(fragment("keys-3"), "keys-3");
        assert_eq!(fragment("did:example:abc#"), "");
    }

    #[test]
    fn method_ids_are_fragment_stripped() {
        let mut document = empty_document("did:example:abc");
        document.verification_method = Some(vec![VerificationMethodEntry {
            id: "did:example:abc#keys-7".to_string(),
            method_type: Some("BIP32-Ed25519".to_string()),
            controller: None,
            public_key_hex: Some("aa".repeat(64)),
            ada_address: None,
            public_key_multibase: None,
        }]);
        let records = builder().build(&document).unwrap();
        let method = &records.verification_methods.items()[0];
        assert_eq!(method.id, "keys-7");
        // Missing controller defaults to the document id.
        assert_eq!(
            from_controller_vector(&method.controller).unwrap(),
            vec!["did:example:abc"]
        );
    }

    #[test]
    fn bare_string_authentication_becomes_reference() {
        let mut document = empty_document("did:example:abc");
        document.authentication = Some(vec![
            AuthenticationEntry::Reference("did:example:abc#keys-1".to_string()),
            AuthenticationEntry::Embedded(VerificationMethodEntry {
                id: "did:example:abc#auth-2".to_string(),
                method_type: None,
                controller: Some(OneOrMany::One("did:example:ctrl".to_string())),
                public_key_hex: None,
                ada_address: Some("addr1test123".to_string()),
                public_key_multibase: None,
            }),
        ]);
        let records = builder().build(&document).unwrap();
        let methods = records.authentication_methods.items();
        assert_eq!(
            methods[0],
            AuthenticationRecord::Reference("keys-1".to_string())
        );
        match &methods[1] {
            AuthenticationRecord::Embedded(vm) => {
                assert_eq!(vm.id, "auth-2");
                assert_eq!(vm.method_type, "BIP32-Ed25519");
                assert!(matches!(vm.key, KeyMaterial::ChainAddress(_)));
            }
            other => panic!("expected embedded method, got {other:?}"),
        }
    }

    #[test]
    fn overflowing_category_is_rejected() {
        let mut document = empty_document("did:example:abc");
        document.service = Some(
            (0..6)
                .map(|i| ServiceEntry {
                    id: format!("svc-{}", i),
                    service_type: "DIDCommMessaging".to_string(),
                    service_endpoint: "https://example.com".to_string(),
                })
                .collect(),
        );
        let err = builder().build(&document).unwrap_err();
        assert!(matches!(
            err,
            CodecError::CapacityExceeded { category: "services", actual: 6, .. }
        ));
    }

    #[test]
    fn malformed_key_material_is_rejected() {
        let mut document = empty_document("did:example:abc");
        document.verification_method = Some(vec![VerificationMethodEntry {
            id: "keys-1".to_string(),
            method_type: None,
            controller: None,
            public_key_hex: Some("not-hex!".to_string()),
            ada_address: None,
            public_key_multibase: None,
        }]);
        assert!(matches!(
            builder().build(&document).unwrap_err(),
            CodecError::MalformedEncoding { .. }
        ));
    }

    #[test]
    fn credentials_pass_through_verbatim() {
        let mut document = empty_document("did:example:abc");
        document.credentials = Some(vec![CredentialEntry {
            data: "signed-claim".to_string(),
            public_key_multibase: "z6Mk".to_string(),
        }]);
        let records = builder().build(&document).unwrap();
        assert_eq!(records.credentials.items()[0].data, "signed-claim");
        assert_eq!(records.credentials.items()[0].public_key_multibase, "z6Mk");
    }

    #[test]
    fn empty_credential_fields_are_defaulted_per_field() {
        let mut document = empty_document("did:example:abc");
        document.credentials = Some(vec![
            CredentialEntry {
                data: String::new(),
                public_key_multibase: "z6Mk".to_string(),
            },
            CredentialEntry {
                data: "signed-claim".to_string(),
                public_key_multibase: String::new(),
            },
        ]);
        let records = builder().build(&document).unwrap();
        let credentials = records.credentials.items();
        assert_eq!(credentials[0].data, "default-credential-data");
        assert_eq!(credentials[0].public_key_multibase, "z6Mk");
        assert_eq!(credentials[1].data, "signed-claim");
        assert_eq!(credentials[1].public_key_multibase, "default-key");
    }
}
