// src/lib.rs
//! # DID Ledger Codec
//!
//! Converts between flexible JSON DID Documents and the rigid fixed-width,
//! fixed-capacity representation of an append-mostly identity ledger whose
//! storage model has no variable-length arrays, no nulls, and no
//! pointer-based unions.
//!
//! ## Architecture Overview
//! 1. **Codec Layer**: fixed-slot vectors, tagged key material, controller
//!    vectors, zero-padded buffers
//! 2. **Document Layer**: builder (JSON -> records), reconstructor
//!    (snapshot -> document), serializer (document -> JSON)
//! 3. **Ledger Layer**: snapshot model and the opaque client boundary
//!    (`submit_transaction` / `query_state`)
//!
//! Wallets, proof generation, and network synchronization are external
//! collaborators behind [`ledger::client::LedgerClient`]; this crate is a
//! pure, synchronous transform over immutable snapshots.
//!
//! ```
//! use did_ledger_codec::config::CodecConfig;
//! use did_ledger_codec::document::builder::DocumentBuilder;
//! use did_ledger_codec::models::document::DidDocument;
//!
//! let document: DidDocument = serde_json::from_str(
//!     r#"{"@context": ["https://www.w3.org/ns/did/v1"], "id": "did:example:abc"}"#,
//! ).unwrap();
//! let builder = DocumentBuilder::new(CodecConfig::default());
//! let records = builder.build(&document).unwrap();
//! assert_eq!(records.contexts.len(), 1);
//! ```

pub mod codec;      // Fixed-width encode/decode primitives
pub mod config;     // Explicit codec configuration
pub mod document;   // Builder, reconstructor, serializer
pub mod error;      // Error taxonomy
pub mod ledger;     // Snapshot model and client boundary
pub mod models;     // Data structures
