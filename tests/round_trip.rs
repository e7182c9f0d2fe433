// tests/round_trip.rs
//! Full pipeline round trips: JSON document -> builder -> ledger write ->
//! reconstructor -> serializer -> JSON document.

use did_ledger_codec::config::CodecConfig;
use did_ledger_codec::document::builder::DocumentBuilder;
use did_ledger_codec::document::reconstruct::DocumentReconstructor;
use did_ledger_codec::document::serialize::to_document;
use did_ledger_codec::ledger::client::{CreateDidCall, InMemoryLedger, LedgerClient};
use did_ledger_codec::models::document::{
    AuthenticationEntry, DidDocument, OneOrMany, ServiceEntry, VerificationMethodEntry,
};
use did_ledger_codec::models::record::DidId;
use std::collections::HashSet;

fn document(id: &str) -> DidDocument {
    DidDocument {
        context: vec!["https://www.w3.org/ns/did/v1".to_string()],
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

fn create(doc: &DidDocument, ledger: &mut InMemoryLedger) {
    let records = DocumentBuilder::new(CodecConfig::default()).build(doc).unwrap();
    ledger
        .submit_transaction(CreateDidCall::from_records(&records))
        .unwrap();
}

fn resolve(ledger: &InMemoryLedger, did: &str) -> Option<DidDocument> {
    let reconstructor = DocumentReconstructor::new(CodecConfig::default());
    let reconstructed = reconstructor.reconstruct(ledger.query_state(), &DidId::new(did))?;
    Some(to_document(&reconstructed).unwrap())
}

#[test]
fn example_scenario_round_trips_key_material() {
    // One verification method with 128 bytes of 0xaa key material.
    let mut doc = document("did:example:abc");
    doc.verification_method = Some(vec![VerificationMethodEntry {
        id: "keys-1".to_string(),
        method_type: Some("BIP32-Ed25519".to_string()),
        controller: None,
        public_key_hex: Some("aa".repeat(128)),
        ada_address: None,
        public_key_multibase: None,
    }]);

    let mut ledger = InMemoryLedger::new();
    create(&doc, &mut ledger);
    let resolved = resolve(&ledger, "did:example:abc").unwrap();

    let methods = resolved.verification_method.unwrap();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].method_type.as_deref(), Some("BIP32-Ed25519"));

    // The rendered hex decodes to a 130-byte buffer: 0xaa repeated, then
    // zero padding at the end.
    let raw = hex::decode(methods[0].public_key_hex.as_ref().unwrap()).unwrap();
    assert_eq!(raw.len(), 130);
    assert!(raw[..128].iter().all(|&b| b == 0xaa));
    assert_eq!(&raw[128..], &[0, 0]);
}

#[test]
fn never_written_identifier_is_absent() {
    let ledger = InMemoryLedger::new();
    assert!(resolve(&ledger, "did:example:never-written").is_none());
}

#[test]
fn context_only_document_reconstructs_with_synthetic_defaults() {
    let mut ledger = InMemoryLedger::new();
    create(&document("did:example:minimal"), &mut ledger);
    let resolved = resolve(&ledger, "did:example:minimal").unwrap();

    assert_eq!(resolved.verification_method.unwrap().len(), 1);
    assert_eq!(resolved.authentication.unwrap().len(), 1);
    assert_eq!(resolved.service.unwrap().len(), 1);
    assert_eq!(resolved.credentials.unwrap().len(), 1);
    assert!(resolved.metadata.unwrap().exists);
}

#[test]
fn full_document_preserves_id_contexts_and_category_presence() {
    let mut doc = document("did:example:full");
    doc.context = vec![
        "https://www.w3.org/ns/did/v1".to_string(),
        "https://w3id.org/security/suites/ed25519-2020/v1".to_string(),
    ];
    doc.verification_method = Some(vec![
        VerificationMethodEntry {
            id: "did:example:full#keys-1".to_string(),
            method_type: Some("BIP32-Ed25519".to_string()),
            controller: Some(OneOrMany::One("did:example:full".to_string())),
            public_key_hex: Some("0102".to_string()),
            ada_address: None,
            public_key_multibase: None,
        },
        VerificationMethodEntry {
            id: "did:example:full#ada-key".to_string(),
            method_type: Some("BIP32-ECDSA".to_string()),
            controller: Some(OneOrMany::Many(vec![
                "did:example:full".to_string(),
                "did:example:other".to_string(),
            ])),
            public_key_hex: None,
            ada_address: Some("addr1test123".to_string()),
            public_key_multibase: None,
        },
    ]);
    doc.authentication = Some(vec![AuthenticationEntry::Reference(
        "did:example:full#keys-1".to_string(),
    )]);
    doc.service = Some(vec![ServiceEntry {
        id: "did:example:full#agent".to_string(),
        service_type: "DIDCommMessaging".to_string(),
        service_endpoint: "https://agent.example.com".to_string(),
    }]);

    let mut ledger = InMemoryLedger::new();
    create(&doc, &mut ledger);
    let resolved = resolve(&ledger, "did:example:full").unwrap();

    assert_eq!(resolved.id, "did:example:full");

    // Context URIs survive as a set (reconstruction may reorder them).
    let sent: HashSet<_> = doc.context.iter().collect();
    let got: HashSet<_> = resolved.context.iter().collect();
    assert_eq!(sent, got);

    let methods = resolved.verification_method.unwrap();
    assert_eq!(methods.len(), 2);
    // Fragments were stripped on the way in.
    assert_eq!(methods[0].id, "keys-1");
    assert_eq!(methods[1].id, "ada-key");
    assert_eq!(methods[1].method_type.as_deref(), Some("BIP32-ECDSA"));
    assert_eq!(methods[1].ada_address.as_deref(), Some("addr1test123"));
    assert_eq!(
        methods[1].controller,
        Some(OneOrMany::Many(vec![
            "did:example:full".to_string(),
            "did:example:other".to_string(),
        ]))
    );

    let auth = resolved.authentication.unwrap();
    assert_eq!(auth[0], AuthenticationEntry::Reference("keys-1".to_string()));

    let services = resolved.service.unwrap();
    assert_eq!(services[0].id, "agent");
    assert_eq!(services[0].service_endpoint, "https://agent.example.com");
}

#[test]
fn embedded_authentication_method_round_trips() {
    let mut doc = document("did:example:embedded");
    doc.authentication = Some(vec![AuthenticationEntry::Embedded(
        VerificationMethodEntry {
            id: "did:example:embedded#auth-key".to_string(),
            method_type: Some("BIP32-Ed25519".to_string()),
            controller: Some(OneOrMany::One("did:example:ctrl".to_string())),
            public_key_hex: Some("beef".to_string()),
            ada_address: None,
            public_key_multibase: None,
        },
    )]);

    let mut ledger = InMemoryLedger::new();
    create(&doc, &mut ledger);
    let resolved = resolve(&ledger, "did:example:embedded").unwrap();

    match &resolved.authentication.unwrap()[0] {
        AuthenticationEntry::Embedded(vm) => {
            assert_eq!(vm.id, "auth-key");
            assert_eq!(
                vm.controller,
                Some(OneOrMany::One("did:example:ctrl".to_string()))
            );
            let hex_key = vm.public_key_hex.as_ref().unwrap();
            assert!(hex_key.starts_with("beef"));
            assert_eq!(hex_key.len(), 260);
        }
        other => panic!("expected embedded method, got {other:?}"),
    }
}

#[test]
fn documents_with_up_to_five_entries_per_category_round_trip() {
    for count in 1..=5usize {
        let did = format!("did:example:n{}", count);
        let mut doc = document(&did);
        doc.service = Some(
            (0..count)
                .map(|i| ServiceEntry {
                    id: format!("{}#svc-{}", did, i),
                    service_type: "DIDCommMessaging".to_string(),
                    service_endpoint: format!("https://example.com/{}", i),
                })
                .collect(),
        );

        let mut ledger = InMemoryLedger::new();
        create(&doc, &mut ledger);
        let resolved = resolve(&ledger, &did).unwrap();
        let services = resolved.service.unwrap();
        assert_eq!(services.len(), count);
        for (i, svc) in services.iter().enumerate() {
            assert_eq!(svc.id, format!("svc-{}", i));
        }
    }
}

#[test]
fn serialized_output_parses_back_into_a_document() {
    let mut ledger = InMemoryLedger::new();
    create(&document("did:example:loop"), &mut ledger);
    let resolved = resolve(&ledger, "did:example:loop").unwrap();

    let text = serde_json::to_string(&resolved).unwrap();
    let reparsed: DidDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed.id, "did:example:loop");
    assert_eq!(reparsed.context, resolved.context);
}
