//! Layout of non-volatile storage.
//!
//! Global data (the persistent entropy pool and its checksum) comes first,
//! then a staging slot, then wallet records back to back. This module only
//! says where records go, not what is inside them. The offsets are fixed for
//! the life of the storage format.
//!
//! The staging slot is reserved for making wallet writes atomic against
//! power loss: write the candidate record to staging, verify it, then copy
//! it into its final slot. That commit sequence is owed by the storage
//! engine and is not implemented here.

/// Length of a wallet record, in bytes
///
/// Must be a multiple of 16, the AES block size.
pub const WALLET_RECORD_LENGTH: u32 = 160;

/// Address of the persistent entropy pool
pub const ADDRESS_ENTROPY_POOL: u32 = 64;

/// Address of the entropy pool checksum
pub const ADDRESS_POOL_CHECKSUM: u32 = 96;

/// Address of the wallet staging slot
///
/// Must be a multiple of 16, the AES block size.
pub const ADDRESS_WALLET_STAGING: u32 = 128;

/// Address of the first wallet record
pub const ADDRESS_WALLET_START: u32 = ADDRESS_WALLET_STAGING + WALLET_RECORD_LENGTH;

/// AES block size; record boundaries must fall on it
pub const ENCRYPTION_BLOCK_SIZE: u32 = 16;

const _: () = assert!(WALLET_RECORD_LENGTH > 0);
const _: () = assert!(WALLET_RECORD_LENGTH % ENCRYPTION_BLOCK_SIZE == 0);
const _: () = assert!(ADDRESS_WALLET_STAGING % ENCRYPTION_BLOCK_SIZE == 0);
const _: () = assert!(ADDRESS_WALLET_START == ADDRESS_WALLET_STAGING + WALLET_RECORD_LENGTH);
const _: () = assert!(ADDRESS_ENTROPY_POOL < ADDRESS_POOL_CHECKSUM);
const _: () = assert!(ADDRESS_POOL_CHECKSUM < ADDRESS_WALLET_STAGING);

/// Address of the zero-based wallet record `index`.
///
/// Not checked against the device size; that is the storage engine's job
/// (see [`wallet_capacity`]). Indices too large for `u32` arithmetic
/// saturate to `u32::MAX`, which no device accepts, rather than wrapping
/// onto global data.
pub const fn record_address(index: u32) -> u32 {
    ADDRESS_WALLET_START.saturating_add(index.saturating_mul(WALLET_RECORD_LENGTH))
}

/// Number of whole wallet records that fit on a device of `device_size` bytes.
pub const fn wallet_capacity(device_size: u32) -> u32 {
    if device_size <= ADDRESS_WALLET_START {
        0
    } else {
        (device_size - ADDRESS_WALLET_START) / WALLET_RECORD_LENGTH
    }
}
