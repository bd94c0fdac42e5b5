//! Raw button input.
//!
//! The device has two pushbuttons, accept and cancel, each wired between a
//! GPIO (pull-up enabled) and ground. A sample is the instantaneous level of
//! both lines with no debouncing; see [`crate::debounce`] for that.

use embedded_hal::digital::InputPin;

/// Instantaneous state of both button lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSample {
    pub accept: bool,
    pub cancel: bool,
}

impl ButtonSample {
    /// Neither button pressed
    pub const IDLE: Self = Self {
        accept: false,
        cancel: false,
    };
    pub const ACCEPT: Self = Self {
        accept: true,
        cancel: false,
    };
    pub const CANCEL: Self = Self {
        accept: false,
        cancel: true,
    };
    pub const BOTH: Self = Self {
        accept: true,
        cancel: true,
    };

    pub fn is_idle(self) -> bool {
        !self.accept && !self.cancel
    }
}

/// Source of raw button samples
///
/// Implementations:
/// - [`HalButtons`] for real GPIO lines
/// - [`ScriptedButtons`](crate::mock_io::ScriptedButtons) for tests
pub trait ButtonSampler {
    /// Read both lines once. Must not block.
    fn sample(&mut self) -> ButtonSample;
}

impl<T: ButtonSampler + ?Sized> ButtonSampler for &mut T {
    fn sample(&mut self) -> ButtonSample {
        (**self).sample()
    }
}

/// Two active-low [`InputPin`]s
///
/// Pressing a button pulls its line to ground. A failed pin read counts as
/// "not pressed", so a faulty line can never produce an accept on its own.
pub struct HalButtons<A, C> {
    /// Accept button line
    accept: A,
    /// Cancel button line
    cancel: C,
}

impl<A, C> HalButtons<A, C>
where
    A: InputPin,
    C: InputPin,
{
    pub fn new(accept: A, cancel: C) -> Self {
        Self { accept, cancel }
    }

    /// Give the pins back
    pub fn release(self) -> (A, C) {
        (self.accept, self.cancel)
    }
}

impl<A, C> ButtonSampler for HalButtons<A, C>
where
    A: InputPin,
    C: InputPin,
{
    fn sample(&mut self) -> ButtonSample {
        ButtonSample {
            accept: self.accept.is_low().unwrap_or(false),
            cancel: self.cancel.is_low().unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct Level(bool);

    impl ErrorType for Level {
        type Error = Infallible;
    }

    impl InputPin for Level {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    struct Broken;

    impl ErrorType for Broken {
        type Error = ErrorKind;
    }

    impl InputPin for Broken {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_low_line_reads_as_pressed() {
        let mut buttons = HalButtons::new(Level(false), Level(true));
        assert_eq!(buttons.sample(), ButtonSample::ACCEPT);

        let mut buttons = HalButtons::new(Level(true), Level(false));
        assert_eq!(buttons.sample(), ButtonSample::CANCEL);
    }

    #[test]
    fn test_pulled_up_lines_are_idle() {
        let mut buttons = HalButtons::new(Level(true), Level(true));
        assert!(buttons.sample().is_idle());
    }

    #[test]
    fn test_read_error_is_not_a_press() {
        let mut buttons = HalButtons::new(Broken, Level(true));
        assert_eq!(buttons.sample(), ButtonSample::IDLE);
    }
}
