//! Transaction outputs waiting for the operator's approval.
//!
//! The transaction parser stages every output it finds, and the fee if there
//! is one; [`UserInterface::confirm`] then shows them back one at a time in
//! the same order. The buffer belongs to whoever runs the parse-then-confirm
//! cycle and must be cleared before the next transaction is parsed.
//!
//! [`UserInterface::confirm`]: crate::protocol::UserInterface::confirm

use crate::bounded_text::{AddressText, AmountText};
use crate::error::CapacityExceeded;
use crate::MAX_OUTPUTS;

/// One amount/address pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputEntry {
    pub amount: AmountText,
    pub address: AddressText,
}

/// Transaction fee, once the parser has seen one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeEntry {
    pub amount: AmountText,
    pub is_set: bool,
}

/// Up to [`MAX_OUTPUTS`] outputs in parse order, plus an optional fee
#[derive(Debug, Clone)]
pub struct OutputStagingBuffer {
    entries: [OutputEntry; MAX_OUTPUTS],
    count: usize,
    fee: FeeEntry,
}

impl OutputStagingBuffer {
    pub fn new() -> Self {
        Self {
            entries: [OutputEntry::default(); MAX_OUTPUTS],
            count: 0,
            fee: FeeEntry::default(),
        }
    }

    /// Append an output, truncating both texts to their capacities.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] once `MAX_OUTPUTS` entries are staged;
    /// the existing entries are left untouched.
    pub fn stage(&mut self, amount: &str, address: &str) -> Result<(), CapacityExceeded> {
        let Some(slot) = self.entries.get_mut(self.count) else {
            log::warn!("rejecting output {}: staging buffer full", self.count + 1);
            return Err(CapacityExceeded);
        };
        *slot = OutputEntry {
            amount: AmountText::truncating(amount),
            address: AddressText::truncating(address),
        };
        self.count += 1;
        Ok(())
    }

    /// Record the transaction fee. A later call replaces an earlier one.
    pub fn set_fee(&mut self, amount: &str) {
        self.fee = FeeEntry {
            amount: AmountText::truncating(amount),
            is_set: true,
        };
    }

    /// Forget all outputs and the fee.
    pub fn clear(&mut self) {
        self.count = 0;
        self.fee.is_set = false;
    }

    /// Staged outputs in insertion order
    pub fn outputs(&self) -> &[OutputEntry] {
        &self.entries[..self.count]
    }

    pub fn fee(&self) -> Option<&AmountText> {
        self.fee.is_set.then_some(&self.fee.amount)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == MAX_OUTPUTS
    }
}

impl Default for OutputStagingBuffer {
    fn default() -> Self {
        Self::new()
    }
}
