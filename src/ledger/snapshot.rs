// src/ledger/snapshot.rs
//! An immutable view of the identity ledger's storage.
//!
//! The ledger keeps five independent maps, each keyed by identifier and
//! valued at a fixed five-slot vector of one record kind, plus a map of
//! authorized controller addresses and optional timestamp maps.
//!
//! Existence of an identifier is determined solely by membership in the
//! contexts map; a dedicated "created" flag is not tracked.

use crate::codec::slots::SlotVector;
use crate::models::record::{
    AuthenticationRecord, AuthorizedAddress, ContextRecord, CredentialRecord, DidId,
    DidRecords, LedgerTimestamp, ServiceRecord, VerificationMethodRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One snapshot of ledger state, as returned by `query_state`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    contexts: HashMap<DidId, SlotVector<ContextRecord>>,
    verification_methods: HashMap<DidId, SlotVector<VerificationMethodRecord>>,
    authentication_methods: HashMap<DidId, SlotVector<AuthenticationRecord>>,
    services: HashMap<DidId, SlotVector<ServiceRecord>>,
    credentials: HashMap<DidId, SlotVector<CredentialRecord>>,
    authorized_addresses: HashMap<DidId, SlotVector<AuthorizedAddress>>,
    updated: HashMap<DidId, LedgerTimestamp>,
    deactivated: HashMap<DidId, LedgerTimestamp>,
}

impl LedgerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the identifier exists on the ledger.
    ///
    /// Membership in the contexts map is the sole existence check.
    pub fn contains(&self, id: &DidId) -> bool {
        self.contexts.contains_key(id)
    }

    /// Number of identifiers on the ledger.
    pub fn did_count(&self) -> usize {
        self.contexts.len()
    }

    /// Iterates all identifiers on the ledger.
    pub fn dids(&self) -> impl Iterator<Item = &DidId> {
        self.contexts.keys()
    }

    pub fn contexts(&self, id: &DidId) -> Option<&SlotVector<ContextRecord>> {
        self.contexts.get(id)
    }

    pub fn verification_methods(&self, id: &DidId) -> Option<&SlotVector<VerificationMethodRecord>> {
        self.verification_methods.get(id)
    }

    pub fn authentication_methods(&self, id: &DidId) -> Option<&SlotVector<AuthenticationRecord>> {
        self.authentication_methods.get(id)
    }

    pub fn services(&self, id: &DidId) -> Option<&SlotVector<ServiceRecord>> {
        self.services.get(id)
    }

    pub fn credentials(&self, id: &DidId) -> Option<&SlotVector<CredentialRecord>> {
        self.credentials.get(id)
    }

    pub fn authorized_addresses(&self, id: &DidId) -> Option<&SlotVector<AuthorizedAddress>> {
        self.authorized_addresses.get(id)
    }

    pub fn updated(&self, id: &DidId) -> Option<LedgerTimestamp> {
        self.updated.get(id).copied()
    }

    pub fn deactivated(&self, id: &DidId) -> Option<LedgerTimestamp> {
        self.deactivated.get(id).copied()
    }

    /// Writes one creation's records into all category maps.
    ///
    /// From the codec's point of view this is atomic; the durability of the
    /// underlying write belongs to the ledger, not to this crate.
    pub(crate) fn apply(&mut self, records: DidRecords, at: LedgerTimestamp) {
        let DidRecords {
            id,
            contexts,
            verification_methods,
            authentication_methods,
            services,
            credentials,
            authorized_addresses,
        } = records;
        self.contexts.insert(id, contexts);
        self.verification_methods.insert(id, verification_methods);
        self.authentication_methods.insert(id, authentication_methods);
        self.services.insert(id, services);
        self.credentials.insert(id, credentials);
        self.authorized_addresses.insert(id, authorized_addresses);
        self.updated.insert(id, at);
    }
}
