//! Flat variable storage for a running program.
//!
//! The stack is sized once from the resolver's slot count, zero-initialized,
//! and never resized. Every variable of the program owns exactly one slot.

use core::fmt;

use thiserror::Error;

use crate::resolver::Resolution;
use crate::value::Value;

/// Index of a variable's storage in the [`Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(usize);

impl Slot {
    pub const fn new(index: usize) -> Self {
        Slot(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("slot {slot} is out of bounds for a stack of {len} slot(s)")]
    SlotOutOfBounds { slot: Slot, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    slots: Box<[Value]>,
}

impl Stack {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Value::default(); len].into_boxed_slice(),
        }
    }

    pub fn for_resolution(resolution: &Resolution<'_>) -> Self {
        Self::new(resolution.slot_count())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn read(&self, slot: Slot) -> Result<Value, StackError> {
        self.slots
            .get(slot.index())
            .copied()
            .ok_or(StackError::SlotOutOfBounds {
                slot,
                len: self.len(),
            })
    }

    pub fn write(&mut self, slot: Slot, value: Value) -> Result<(), StackError> {
        let len = self.len();
        let entry = self
            .slots
            .get_mut(slot.index())
            .ok_or(StackError::SlotOutOfBounds { slot, len })?;
        *entry = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, Value)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, value)| (Slot(i), *value))
    }
}
