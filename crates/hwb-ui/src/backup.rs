//! Backup seed display.
//!
//! The seed is shown as lowercase hexadecimal, six bytes per line:
//!
//! ```text
//! 0:a1b2 c3d4 e5f6
//! 1:0718 293a 4b5c
//! ```
//!
//! Each line starts with a one-digit line number that wraps after `f`. When
//! the page fills up the operator must press a button to see the next one;
//! cancel at any page stops immediately.

use alloc::format;

use embedded_hal::delay::DelayNs;

use crate::command::Decision;
use crate::display::PromptDisplay;
use crate::error::BackupError;
use crate::input::ButtonSampler;
use crate::protocol::UserInterface;

/// Length of a wallet backup seed, in bytes
pub const SEED_LENGTH: usize = 64;

const BYTES_PER_LINE: u8 = 6;

/// Where a backup seed should be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId(pub u8);

impl DeviceId {
    /// The on-device display, the only supported destination
    pub const DISPLAY: Self = DeviceId(0);
}

impl<P, S, D> UserInterface<P, S, D>
where
    P: PromptDisplay,
    S: ButtonSampler,
    D: DelayNs,
{
    /// Show `seed` to the operator, page by page.
    ///
    /// # Errors
    ///
    /// - [`BackupError::UnsupportedDevice`] if `destination` is not
    ///   [`DeviceId::DISPLAY`]; the display is not touched.
    /// - [`BackupError::UserCancelled`] if cancel is pressed at the
    ///   encryption notice, at a page turn, or at the final gate. Nothing
    ///   after the cancelled page is drawn.
    pub fn present_backup_seed(
        &mut self,
        seed: &[u8; SEED_LENGTH],
        is_encrypted: bool,
        destination: DeviceId,
    ) -> Result<(), BackupError> {
        self.page_out_seed(seed, is_encrypted, destination)
    }

    /// Paging for a seed of any length; line leaders wrap after `f`.
    fn page_out_seed(
        &mut self,
        seed: &[u8],
        is_encrypted: bool,
        destination: DeviceId,
    ) -> Result<(), BackupError> {
        if destination != DeviceId::DISPLAY {
            log::warn!("backup to device {} not supported", destination.0);
            return Err(BackupError::UnsupportedDevice);
        }

        self.display.clear();
        self.display.display_on();
        self.buttons.wait_for_release();
        self.display.write_str_word_wrap(if is_encrypted {
            "Backup is encrypted."
        } else {
            "Backup is not encrypted."
        });
        let notice = self.buttons.wait_for_press();
        self.display.clear();
        if notice == Decision::Deny {
            return self.cancel_backup();
        }

        // Every page gate starts with its own release wait.
        let mut byte_counter = 0u8;
        let mut line_number = 0u8;
        let mut pages = 1u32;
        for byte in seed {
            if byte_counter == 0 {
                self.display.write_str(&format!("{:x}:", line_number & 0x0f));
            } else if byte_counter % 2 == 0 {
                self.display.write_str(" ");
            }
            self.display.write_str(&hex::encode([*byte]));

            byte_counter += 1;
            if byte_counter == BYTES_PER_LINE {
                byte_counter = 0;
                line_number = line_number.wrapping_add(1);
            }

            if self.display.cursor_at_end() {
                let turn = self.gate();
                self.display.clear();
                if turn == Decision::Deny {
                    return self.cancel_backup();
                }
                byte_counter = 0;
                pages += 1;
            }
        }

        let done = self.gate();
        self.display.clear();
        self.display.display_off();
        if done == Decision::Deny {
            log::info!("backup cancelled at final gate");
            return Err(BackupError::UserCancelled);
        }
        log::info!("backup seed shown: {} bytes over {} pages", seed.len(), pages);
        Ok(())
    }

    fn cancel_backup(&mut self) -> Result<(), BackupError> {
        self.display.display_off();
        log::info!("backup cancelled by user");
        Err(BackupError::UserCancelled)
    }
}
