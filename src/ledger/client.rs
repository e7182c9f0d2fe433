// src/ledger/client.rs
//! Ledger client boundary.
//!
//! The network stack behind this trait — wallet funding, proof generation,
//! transaction balancing, indexer synchronization — is an external
//! collaborator. This crate only defines the interface it consumes and an
//! in-memory implementation used by tests and the demo binary.
//!
//! The reference flow assumes one creation call completes fully before
//! another is issued against the same contract instance; concurrent
//! creation under a single identifier is not supported.

use crate::codec::slots::{SlotVector, WireSlot, SLOT_CAPACITY};
use crate::error::LedgerError;
use crate::ledger::snapshot::LedgerSnapshot;
use crate::models::record::{
    AuthenticationRecord, AuthorizedAddress, ContextRecord, CredentialRecord, DidId,
    DidRecords, LedgerTimestamp, ServiceRecord, VerificationMethodRecord,
};
use serde::{Deserialize, Serialize};

/// Identifier of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionId(pub String);

/// The wire-encoded `create_did` call.
///
/// Every category is a full five-slot array; unoccupied slots carry a
/// zero-filled placeholder record and an occupancy tag, since the wire
/// format has no tag-free nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDidCall {
    pub did: DidId,
    pub authentication_methods: [WireSlot<AuthenticationRecord>; SLOT_CAPACITY],
    pub verification_methods: [WireSlot<VerificationMethodRecord>; SLOT_CAPACITY],
    pub services: [WireSlot<ServiceRecord>; SLOT_CAPACITY],
    pub credentials: [WireSlot<CredentialRecord>; SLOT_CAPACITY],
    pub contexts: [WireSlot<ContextRecord>; SLOT_CAPACITY],
    pub authorized_addresses: [WireSlot<AuthorizedAddress>; SLOT_CAPACITY],
}

impl CreateDidCall {
    /// Encodes built records into the wire call shape.
    pub fn from_records(records: &DidRecords) -> Self {
        CreateDidCall {
            did: records.id,
            authentication_methods: records
                .authentication_methods
                .to_wire(AuthenticationRecord::placeholder()),
            verification_methods: records
                .verification_methods
                .to_wire(VerificationMethodRecord::placeholder()),
            services: records.services.to_wire(ServiceRecord::placeholder()),
            credentials: records.credentials.to_wire(CredentialRecord::placeholder()),
            contexts: records.contexts.to_wire(ContextRecord::placeholder()),
            authorized_addresses: records
                .authorized_addresses
                .to_wire(AuthorizedAddress::zeroed()),
        }
    }

    /// Decodes the call back into slot vectors, dropping placeholders.
    pub fn into_records(self) -> DidRecords {
        DidRecords {
            id: self.did,
            contexts: SlotVector::from_wire(self.contexts),
            verification_methods: SlotVector::from_wire(self.verification_methods),
            authentication_methods: SlotVector::from_wire(self.authentication_methods),
            services: SlotVector::from_wire(self.services),
            credentials: SlotVector::from_wire(self.credentials),
            authorized_addresses: SlotVector::from_wire(self.authorized_addresses),
        }
    }
}

/// The collaborator interface this crate consumes.
///
/// Implementations own all transport, retry, and proof concerns.
pub trait LedgerClient {
    /// Submits an encoded creation call.
    fn submit_transaction(&mut self, call: CreateDidCall) -> Result<TransactionId, LedgerError>;

    /// Returns the latest ledger snapshot.
    fn query_state(&self) -> &LedgerSnapshot;
}

/// An in-memory ledger holding a single contract instance's state.
///
/// Applies creation calls directly to a [`LedgerSnapshot`], mirroring what
/// the on-chain contract does with the same arguments.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    snapshot: LedgerSnapshot,
    next_tx: u64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing snapshot (e.g. loaded from disk).
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        InMemoryLedger {
            snapshot,
            next_tx: 0,
        }
    }

    pub fn into_snapshot(self) -> LedgerSnapshot {
        self.snapshot
    }
}

impl LedgerClient for InMemoryLedger {
    fn submit_transaction(&mut self, call: CreateDidCall) -> Result<TransactionId, LedgerError> {
        let records = call.into_records();
        if self.snapshot.contains(&records.id) {
            return Err(LedgerError::Rejected(format!(
                "identifier already exists: {}",
                records.id
            )));
        }
        let did = records.id;
        self.snapshot.apply(records, LedgerTimestamp::now());
        self.next_tx += 1;
        let tx = TransactionId(format!("mem-tx-{:08}", self.next_tx));
        log::info!("created {} in transaction {}", did, tx.0);
        Ok(tx)
    }

    fn query_state(&self) -> &LedgerSnapshot {
        &self.snapshot
    }
}
