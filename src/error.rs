// src/error.rs
//! Error types for the DID ledger codec.
//!
//! The codec distinguishes two fatal error classes:
//! - `CapacityExceeded`: a document category supplies more logical entries
//!   than the ledger's fixed slot count can hold. The builder never truncates
//!   silently; the caller must trim the document.
//! - `MalformedEncoding`: key material or address input cannot be decoded
//!   into its fixed-width buffer (bad hex digits, oversized input, or stored
//!   bytes that are not valid UTF-8 on the way back out).
//!
//! Lookup misses during reconstruction are *not* errors: a missing category
//! falls back to a synthetic default record, and an unknown identifier is
//! reported as an absent document (`None`), never as a failure.

use thiserror::Error;

/// Errors surfaced by the encode/decode paths.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A document category holds more entries than the fixed slot count.
    #[error("{category} holds {actual} entries, exceeding the {capacity}-slot capacity")]
    CapacityExceeded {
        /// Which category overflowed (e.g. "verification methods").
        category: &'static str,
        /// Number of entries supplied.
        actual: usize,
        /// The fixed slot capacity (always 5 in the current layout).
        capacity: usize,
    },

    /// Input could not be decoded into its fixed-width buffer.
    #[error("malformed {field}: {reason}")]
    MalformedEncoding {
        /// Which field failed to decode (e.g. "publicKeyHex").
        field: &'static str,
        /// Human-readable decode failure.
        reason: String,
    },
}

impl CodecError {
    pub(crate) fn capacity(category: &'static str, actual: usize, capacity: usize) -> Self {
        CodecError::CapacityExceeded {
            category,
            actual,
            capacity,
        }
    }

    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        CodecError::MalformedEncoding {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors from the ledger-write boundary.
///
/// Only the in-memory ledger produces these today; a network-backed client
/// would map its transport failures into the same shape.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The ledger rejected the transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),
}
