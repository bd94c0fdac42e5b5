//! Error types for the confirmation layer
//!
//! Every failure is an explicit value. The one deliberate exception is the
//! stream-error halt, see [`UserInterface::notify_stream_error`].
//!
//! ## Error Types
//!
//! - [`CapacityExceeded`] - the staging buffer already holds `MAX_OUTPUTS` entries
//! - [`BackupError`] - the backup seed could not be shown
//! - [`BuilderError`] - invalid configuration
//! - [`NvError`] - out-of-range non-volatile access
//!
//! ## Example
//!
//! ```
//! use hwb_ui::{BuilderError, DebounceConfig};
//!
//! let result = DebounceConfig::builder().samples(0).build();
//! assert!(matches!(result, Err(BuilderError::ZeroSamples)));
//! ```
//!
//! [`UserInterface::notify_stream_error`]: crate::protocol::UserInterface::notify_stream_error

use crate::MAX_OUTPUTS;

/// A transaction tried to stage more than [`MAX_OUTPUTS`] outputs.
///
/// The buffer is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded;

impl core::fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Too many outputs: at most {MAX_OUTPUTS} can await approval")
    }
}

impl core::error::Error for CapacityExceeded {}

/// Errors while presenting a backup seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupError {
    /// The requested destination is not the display.
    ///
    /// Reported before anything is drawn.
    UnsupportedDevice,
    /// The operator pressed cancel at one of the gates.
    UserCancelled,
}

impl core::fmt::Display for BackupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BackupError::UnsupportedDevice => write!(f, "Backup destination not supported"),
            BackupError::UserCancelled => write!(f, "Backup cancelled by user"),
        }
    }
}

impl core::error::Error for BackupError {}

/// Errors that can occur when building configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// A debounce window of zero samples would accept every bounce.
    ZeroSamples,
    /// The tick interval must be at least one millisecond.
    ZeroTick,
    /// Text grid dimensions out of range
    ///
    /// Both `cols` and `rows` must be in `1..=64`.
    InvalidDimensions {
        /// Characters per line requested
        cols: u16,
        /// Lines per page requested
        rows: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::ZeroSamples => write!(f, "Debounce sample count must be non-zero"),
            BuilderError::ZeroTick => write!(f, "Tick interval must be non-zero"),
            BuilderError::InvalidDimensions { cols, rows } => {
                write!(f, "Invalid text dimensions {cols}x{rows} (each must be 1..=64)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}

/// Non-volatile storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvError {
    /// The access would run past the end of the device.
    InvalidAddress {
        /// First byte of the access
        address: u32,
        /// Number of bytes requested
        length: usize,
    },
}

impl core::fmt::Display for NvError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NvError::InvalidAddress { address, length } => {
                write!(f, "Invalid non-volatile access: {length} bytes at {address}")
            }
        }
    }
}

impl core::error::Error for NvError {}
