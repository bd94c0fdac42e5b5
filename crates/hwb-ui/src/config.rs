//! Configuration types and builder

pub use crate::error::BuilderError;
use crate::{DEBOUNCE_COUNT, TICK_MS};

/// Largest text grid side accepted by [`Dimensions::new`]
pub const MAX_TEXT_SIDE: u16 = 64;

/// Text grid dimensions, in character cells
///
/// Only [`Dimensions::new`] and `Default` construct one, so both sides are
/// always in `1..=`[`MAX_TEXT_SIDE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    cols: u16,
    rows: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero or
    /// larger than [`MAX_TEXT_SIDE`].
    pub fn new(cols: u16, rows: u16) -> Result<Self, BuilderError> {
        if cols == 0 || cols > MAX_TEXT_SIDE || rows == 0 || rows > MAX_TEXT_SIDE {
            return Err(BuilderError::InvalidDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Characters per line
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Lines per page
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of character cells on one page
    pub fn cells(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

impl Default for Dimensions {
    /// 16 x 4: a 128x64 panel with an 8x13 font
    fn default() -> Self {
        Self { cols: 16, rows: 4 }
    }
}

/// Debounce timing
///
/// Use [`Builder`] (via [`DebounceConfig::builder`]) to create one. Neither
/// value can be zero: a zero-sample window would register a press without
/// reading the buttons at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceConfig {
    samples: u32,
    tick_ms: u32,
}

impl DebounceConfig {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Consecutive stable samples that make an event
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Milliseconds between samples
    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    /// Minimum time an event takes to register, in milliseconds
    pub fn window_ms(&self) -> u32 {
        self.samples.saturating_mul(self.tick_ms)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            samples: DEBOUNCE_COUNT,
            tick_ms: TICK_MS,
        }
    }
}

/// Builder for [`DebounceConfig`]
///
/// # Example
///
/// ```
/// use hwb_ui::DebounceConfig;
///
/// let config = DebounceConfig::builder()
///     .samples(20)
///     .tick_ms(2)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.window_ms(), 40);
/// ```
pub struct Builder {
    samples: u32,
    tick_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            samples: DEBOUNCE_COUNT,
            tick_ms: TICK_MS,
        }
    }
}

impl Builder {
    /// Create a new Builder with the firmware defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set consecutive stable samples required per event
    pub fn samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Set sampling interval
    pub fn tick_ms(mut self, tick_ms: u32) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ZeroSamples` or `BuilderError::ZeroTick` for a
    /// zero value.
    pub fn build(self) -> Result<DebounceConfig, BuilderError> {
        if self.samples == 0 {
            return Err(BuilderError::ZeroSamples);
        }
        if self.tick_ms == 0 {
            return Err(BuilderError::ZeroTick);
        }
        Ok(DebounceConfig {
            samples: self.samples,
            tick_ms: self.tick_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_firmware() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config, DebounceConfig::default());
        assert_eq!(config.samples(), 50);
        assert_eq!(config.tick_ms(), 1);
        assert_eq!(config.window_ms(), 50);
    }

    #[test]
    fn test_builder_rejects_zero_values() {
        assert_eq!(
            Builder::new().samples(0).build(),
            Err(BuilderError::ZeroSamples)
        );
        assert_eq!(Builder::new().tick_ms(0).build(), Err(BuilderError::ZeroTick));
    }

    #[test]
    fn test_dimensions_validation() {
        assert!(Dimensions::new(16, 4).is_ok());
        assert!(Dimensions::new(0, 4).is_err());
        assert!(Dimensions::new(16, 65).is_err());
        assert_eq!(
            Dimensions::new(0, 4),
            Err(BuilderError::InvalidDimensions { cols: 0, rows: 4 })
        );
        assert_eq!(Dimensions::default().cells(), 64);

        let narrow = Dimensions::new(1, 64).unwrap();
        assert_eq!((narrow.cols(), narrow.rows()), (1, 64));
    }
}
