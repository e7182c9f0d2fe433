// src/document/serialize.rs
//! Document serializer: reconstructed document back to the canonical JSON
//! shape.
//!
//! Mirrors the builder's input shape so a full round trip lands on the same
//! structure. Key material renders as `publicKeyHex` (full 130 bytes,
//! lower-case, padding included) or `AdaAddress`; absent timestamps are
//! omitted from the output entirely.

use crate::codec::controller::from_controller_vector;
use crate::codec::key::{render_key, RenderedKey};
use crate::error::CodecError;
use crate::models::document::{
    AuthenticationEntry, CredentialEntry, DidDocument, DocumentMetadata, OneOrMany,
    ServiceEntry, VerificationMethodEntry,
};
use crate::models::record::{
    AuthenticationRecord, ControllerVector, LedgerTimestamp, VerificationMethodRecord,
};
use crate::document::reconstruct::ReconstructedDocument;

/// Converts a reconstructed document into its JSON document shape.
///
/// # Errors
/// `MalformedEncoding` if stored identifier, controller, or address bytes
/// are not valid UTF-8.
pub fn to_document(document: &ReconstructedDocument) -> Result<DidDocument, CodecError> {
    let verification_method = document
        .verification_methods
        .iter()
        .map(method_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let authentication = document
        .authentication_methods
        .iter()
        .map(|auth| match auth {
            AuthenticationRecord::Reference(reference) => {
                Ok(AuthenticationEntry::Reference(reference.clone()))
            }
            AuthenticationRecord::Embedded(method) => {
                Ok(AuthenticationEntry::Embedded(method_entry(method)?))
            }
        })
        .collect::<Result<Vec<_>, CodecError>>()?;

    let service = document
        .services
        .iter()
        .map(|svc| ServiceEntry {
            id: svc.id.clone(),
            service_type: svc.service_type.clone(),
            service_endpoint: svc.service_endpoint.clone(),
        })
        .collect();

    let credentials = document
        .credentials
        .iter()
        .map(|cred| CredentialEntry {
            data: cred.data.clone(),
            public_key_multibase: cred.public_key_multibase.clone(),
        })
        .collect();

    Ok(DidDocument {
        context: document.contexts.iter().map(|c| c.uri.clone()).collect(),
        id: document.id.to_did_string()?,
        verification_method: Some(verification_method),
        authentication: Some(authentication),
        service: Some(service),
        credentials: Some(credentials),
        updated: render_timestamp(&document.updated)?,
        deactivated: render_timestamp(&document.deactivated)?,
        metadata: Some(DocumentMetadata {
            authorized_controllers: document
                .authorized_addresses
                .iter()
                .map(|addr| hex::encode(addr.0))
                .collect(),
            exists: true,
        }),
    })
}

fn method_entry(method: &VerificationMethodRecord) -> Result<VerificationMethodEntry, CodecError> {
    let mut entry = VerificationMethodEntry {
        id: method.id.clone(),
        method_type: Some(method.method_type.clone()),
        controller: Some(render_controller(&method.controller)?),
        public_key_hex: None,
        ada_address: None,
        public_key_multibase: None,
    };
    match render_key(&method.key)? {
        RenderedKey::PublicKeyHex(hex_key) => entry.public_key_hex = Some(hex_key),
        RenderedKey::ChainAddress(address) => entry.ada_address = Some(address),
    }
    Ok(entry)
}

fn render_controller(vector: &ControllerVector) -> Result<OneOrMany<String>, CodecError> {
    let mut controllers = from_controller_vector(vector)?;
    if controllers.len() == 1 {
        Ok(OneOrMany::One(controllers.remove(0)))
    } else {
        Ok(OneOrMany::Many(controllers))
    }
}

fn render_timestamp(timestamp: &Option<LedgerTimestamp>) -> Result<Option<String>, CodecError> {
    timestamp.map(|ts| ts.iso8601_string()).transpose()
}
