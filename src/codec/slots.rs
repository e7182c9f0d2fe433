// src/codec/slots.rs
//! Fixed-slot vector codec.
//!
//! The ledger cannot store variable-length lists, so every document category
//! is persisted as exactly five optional slots. The logical content of a
//! vector is the ordered sub-sequence of occupied slots, always filled from
//! index 0 upward.
//!
//! Overflow policy: encoding more than five entries fails with
//! `CapacityExceeded`. The codec never truncates silently — dropping a
//! verification method or service on the floor would be unrecoverable data
//! loss on an identity ledger.

use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// Number of slots in every category vector.
pub const SLOT_CAPACITY: usize = 5;

/// A fixed-capacity vector of optional slots.
///
/// In memory, an unoccupied slot is simply `None`. On the wire (where a
/// tag-free null does not exist) unoccupied slots carry a structurally valid
/// placeholder value; see [`SlotVector::to_wire`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotVector<T> {
    slots: [Option<T>; SLOT_CAPACITY],
}

impl<T> SlotVector<T> {
    /// A vector with every slot unoccupied.
    pub fn empty() -> Self {
        SlotVector {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Encodes a list of 0..=5 items, filling slots from index 0.
    ///
    /// # Errors
    /// `CapacityExceeded` if more than five items are supplied; `category`
    /// names the offending document category in the error.
    pub fn from_items(items: Vec<T>, category: &'static str) -> Result<Self, CodecError> {
        if items.len() > SLOT_CAPACITY {
            return Err(CodecError::capacity(category, items.len(), SLOT_CAPACITY));
        }
        let mut vector = Self::empty();
        for (slot, item) in vector.slots.iter_mut().zip(items) {
            *slot = Some(item);
        }
        Ok(vector)
    }

    /// Iterates the occupied slots in index order.
    ///
    /// Unoccupied slots are skipped; placeholder values never reach the
    /// caller.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// Decodes the vector back into its logical list, consuming it.
    pub fn into_items(self) -> Vec<T> {
        self.slots.into_iter().flatten().collect()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> SlotVector<T> {
    /// Decodes the vector into its logical list by cloning occupied slots.
    pub fn items(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Produces the wire form: every slot present, unoccupied ones filled
    /// with a clone of `placeholder` and tagged unoccupied.
    pub fn to_wire(&self, placeholder: T) -> [WireSlot<T>; SLOT_CAPACITY] {
        std::array::from_fn(|i| match &self.slots[i] {
            Some(value) => WireSlot {
                occupied: true,
                value: value.clone(),
            },
            None => WireSlot {
                occupied: false,
                value: placeholder.clone(),
            },
        })
    }
}

impl<T> SlotVector<T> {
    /// Rebuilds a vector from its wire form, discarding placeholder values
    /// in unoccupied slots.
    pub fn from_wire(wire: [WireSlot<T>; SLOT_CAPACITY]) -> Self {
        SlotVector {
            slots: wire.map(|slot| slot.occupied.then_some(slot.value)),
        }
    }
}

/// One fixed-width wire cell: an occupancy tag plus an always-present value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSlot<T> {
    pub occupied: bool,
    pub value: T,
}
