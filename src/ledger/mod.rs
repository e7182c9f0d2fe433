// src/ledger/mod.rs
//! Ledger state model and the client boundary consumed by this crate.

pub mod client;
pub mod snapshot;
