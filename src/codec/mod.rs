// src/codec/mod.rs
//! Codecs between variable-length document data and the ledger's
//! fixed-width, fixed-capacity storage forms.

pub mod bytes;
pub mod controller;
pub mod key;
pub mod slots;
