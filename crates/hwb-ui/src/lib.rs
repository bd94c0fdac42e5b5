//! Confirmation layer for a two-button hardware Bitcoin wallet.
//!
//! Nothing that moves value or destroys a wallet proceeds without a debounced
//! physical press. The pieces, leaf first:
//!
//! - [`debounce`]: turns two noisy button lines into accept/cancel decisions.
//! - [`staging`]: the bounded list of transaction outputs awaiting approval.
//! - [`protocol`]: walks the operator through the prompts for each [`Command`].
//! - [`backup`]: pages a backup seed onto the display as hexadecimal.
//! - [`storage_layout`]: fixed non-volatile offsets shared with the storage engine.
//!
//! Works on bare-metal targets (`no_std` + `alloc`) and on the host with `std`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod backup;
pub mod bounded_text;
pub mod command;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod input;
pub mod nv_storage;
pub mod protocol;
pub mod staging;
pub mod storage_layout;
pub mod test_display;
pub mod text_display;

#[cfg(any(test, feature = "std"))]
pub mod mock_io;

pub use backup::{DeviceId, SEED_LENGTH};
pub use bounded_text::{AddressText, AmountText, BoundedText};
pub use command::{Command, Decision};
pub use config::Dimensions;
pub use debounce::{DebounceConfig, Debouncer};
pub use display::PromptDisplay;
pub use error::{BackupError, BuilderError, CapacityExceeded, NvError};
pub use input::{ButtonSample, ButtonSampler, HalButtons};
pub use nv_storage::{EepromImage, NonVolatileStorage};
pub use protocol::{Halted, UserInterface};
pub use staging::{FeeEntry, OutputEntry, OutputStagingBuffer};
pub use text_display::TextDisplay;

#[cfg(any(test, feature = "std"))]
pub use mock_io::{DisplayEvent, RecordingDisplay, ScriptedButtons, SimulatedClock};

/// Number of consecutive stable samples (one per tick) that make a real event.
pub const DEBOUNCE_COUNT: u32 = 50;

/// Sampling interval of the button lines, in milliseconds.
pub const TICK_MS: u32 = 1;

/// Maximum number of outputs a single transaction may stage for approval.
pub const MAX_OUTPUTS: usize = 20;

/// Size of an amount text buffer, terminator included.
pub const TEXT_AMOUNT_LENGTH: usize = 22;

/// Size of an address text buffer, terminator included.
pub const TEXT_ADDRESS_LENGTH: usize = 36;

/// Panel dimensions of the prompt display (SSD1306-class OLED).
pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;
