// src/codec/controller.rs
//! Controller vector codec.
//!
//! A document controller is one or more DID strings. The ledger stores them
//! as exactly five 64-byte zero-padded slots, filled from index 0; unused
//! slots stay all-zero and are omitted on decode.

use crate::codec::bytes::{string_from_padded, to_fixed_bytes};
use crate::codec::slots::SLOT_CAPACITY;
use crate::error::CodecError;
use crate::models::record::ControllerVector;

/// Encodes controllers into the fixed five-slot vector.
///
/// A single controller occupies slot 0; more than five fail with
/// `CapacityExceeded` (the same overflow policy as the slot vectors).
pub fn to_controller_vector(controllers: &[String]) -> Result<ControllerVector, CodecError> {
    if controllers.len() > SLOT_CAPACITY {
        return Err(CodecError::capacity(
            "controllers",
            controllers.len(),
            SLOT_CAPACITY,
        ));
    }
    let mut vector = ControllerVector::empty();
    for (slot, controller) in vector.0.iter_mut().zip(controllers) {
        *slot = to_fixed_bytes(controller);
    }
    Ok(vector)
}

/// Decodes a controller vector back into its DID strings.
///
/// Trailing zero padding is stripped per slot; wholly zero slots are
/// omitted from the result.
///
/// # Errors
/// `MalformedEncoding` if an occupied slot holds invalid UTF-8.
pub fn from_controller_vector(vector: &ControllerVector) -> Result<Vec<String>, CodecError> {
    let mut controllers = Vec::new();
    for slot in vector.slots() {
        if slot.iter().all(|&b| b == 0) {
            continue;
        }
        controllers.push(string_from_padded(slot, "controller")?);
    }
    Ok(controllers)
}
