//! Debounced two-button input.
//!
//! Both lines are sampled once per tick. A condition becomes an event only
//! after `samples` consecutive ticks in which it holds; any sample that breaks
//! it restarts the count from zero. There is no timeout: the only way out of
//! a wait is a physical button transition.

use embedded_hal::delay::DelayNs;

use crate::command::Decision;
pub use crate::config::DebounceConfig;
use crate::input::{ButtonSample, ButtonSampler};

/// Turns raw samples from `S`, paced by the tick source `D`, into events.
pub struct Debouncer<S, D> {
    sampler: S,
    delay: D,
    config: DebounceConfig,
}

impl<S, D> Debouncer<S, D>
where
    S: ButtonSampler,
    D: DelayNs,
{
    /// Debouncer with the firmware timing (50 samples, 1 ms apart)
    pub fn new(sampler: S, delay: D) -> Self {
        Self::with_config(sampler, delay, DebounceConfig::default())
    }

    pub fn with_config(sampler: S, delay: D, config: DebounceConfig) -> Self {
        Self {
            sampler,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    fn next_sample(&mut self) -> ButtonSample {
        self.delay.delay_ms(self.config.tick_ms());
        self.sampler.sample()
    }

    /// Block until neither button has been pressed for a full debounce window.
    ///
    /// Called before every prompt so a button still held from the previous
    /// decision cannot answer the next one.
    pub fn wait_for_release(&mut self) {
        let mut stable = 0u32;
        let mut taken = 0u32;

        while stable < self.config.samples() {
            let sample = self.next_sample();
            taken = taken.wrapping_add(1);
            if sample.is_idle() {
                stable += 1;
            } else {
                stable = 0;
            }
        }

        log::debug!("buttons released after {} samples", taken);
    }

    /// Block until a press has been stable for a full debounce window.
    ///
    /// Stable means at least one button is down and both lines read the same
    /// as on the previous sample, so a bounce on either line restarts the
    /// count even while the other is held steady. Returns
    /// [`Decision::Deny`] if cancel is down when the window completes
    /// (including when both are down), otherwise [`Decision::Accept`].
    pub fn wait_for_press(&mut self) -> Decision {
        let mut stable = 0u32;
        let mut taken = 0u32;
        let mut last = ButtonSample::IDLE;

        while stable < self.config.samples() {
            let sample = self.next_sample();
            taken = taken.wrapping_add(1);
            stable = if sample.is_idle() {
                0
            } else if stable > 0 && sample != last {
                1
            } else {
                stable + 1
            };
            last = sample;
        }

        let decision = if last.cancel {
            Decision::Deny
        } else {
            Decision::Accept
        };
        log::debug!("button press registered after {} samples: {}", taken, decision);
        decision
    }

    /// Borrow the sampler, e.g. to inspect a test double
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give the sampler and tick source back
    pub fn release(self) -> (S, D) {
        (self.sampler, self.delay)
    }
}
