// src/models/mod.rs
//! Data structures: the JSON-side document shapes and the ledger-side
//! fixed-width records.

pub mod document;
pub mod record;
