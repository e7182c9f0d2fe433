// src/document/mod.rs
//! Document pipeline: build JSON documents into ledger records, rebuild
//! them from ledger snapshots, and serialize back to JSON.

pub mod builder;
pub mod reconstruct;
pub mod serialize;
