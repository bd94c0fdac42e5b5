//! In-memory doubles for host tests and simulators.
//!
//! Replays button traces sample by sample, counts simulated time instead of
//! sleeping, and records every display call for later assertions.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::command::Decision;
use crate::display::PromptDisplay;
use crate::input::{ButtonSample, ButtonSampler};
use crate::DEBOUNCE_COUNT;

/// Replays a scripted trace of button samples, one per call.
///
/// Running past the end of the script panics: a blocking wait with no more
/// input would otherwise spin forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedButtons {
    segments: VecDeque<(ButtonSample, u32)>,
    consumed: u32,
}

impl ScriptedButtons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `samples` ticks of `state`.
    pub fn hold(mut self, state: ButtonSample, samples: u32) -> Self {
        if samples > 0 {
            self.segments.push_back((state, samples));
        }
        self
    }

    /// Append `samples` ticks with neither button down.
    pub fn idle(self, samples: u32) -> Self {
        self.hold(ButtonSample::IDLE, samples)
    }

    /// One clean answer to one prompt: a full release window, then a full
    /// press window.
    pub fn answer(self, decision: Decision) -> Self {
        let press = match decision {
            Decision::Accept => ButtonSample::ACCEPT,
            Decision::Deny => ButtonSample::CANCEL,
        };
        self.idle(DEBOUNCE_COUNT).hold(press, DEBOUNCE_COUNT)
    }

    pub fn accept(self) -> Self {
        self.answer(Decision::Accept)
    }

    pub fn cancel(self) -> Self {
        self.answer(Decision::Deny)
    }

    /// Answer several prompts in order.
    pub fn answers(self, decisions: &[Decision]) -> Self {
        decisions
            .iter()
            .fold(self, |script, decision| script.answer(*decision))
    }

    /// Samples handed out so far
    pub fn consumed(&self) -> u32 {
        self.consumed
    }

    /// Samples left in the script
    pub fn remaining(&self) -> u32 {
        self.segments.iter().map(|(_, n)| *n).sum()
    }
}

impl ButtonSampler for ScriptedButtons {
    #[allow(clippy::panic)]
    fn sample(&mut self) -> ButtonSample {
        let Some((state, left)) = self.segments.front_mut() else {
            panic!(
                "button script exhausted after {} samples while waiting for input",
                self.consumed
            );
        };
        let state = *state;
        *left -= 1;
        if *left == 0 {
            self.segments.pop_front();
        }
        self.consumed += 1;
        state
    }
}

/// Tick source that only counts the time it was asked to wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedClock {
    elapsed_ns: u64,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for SimulatedClock {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += u64::from(ms) * 1_000_000;
    }
}

/// One call made on a [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Clear,
    On,
    Off,
    Text(String),
    WrappedText(String),
    NextLine,
}

/// Display double that records calls and tracks a page cursor.
///
/// With [`RecordingDisplay::with_page`] the cursor advances one cell per
/// character and [`PromptDisplay::cursor_at_end`] reports a full page,
/// matching a text-cell panel without drawing anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    events: Vec<DisplayEvent>,
    page: Option<(usize, usize)>,
    cursor: usize,
    on: bool,
}

impl RecordingDisplay {
    /// Display with unlimited page capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Display whose page holds `rows` lines of `cols` characters
    pub fn with_page(cols: usize, rows: usize) -> Self {
        Self {
            page: Some((cols, rows)),
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn clear_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| **e == DisplayEvent::Clear)
            .count()
    }

    /// Text of every screen between clears, skipping blank ones.
    ///
    /// Line breaks requested with `next_line` appear as `'\n'`.
    pub fn screens(&self) -> Vec<String> {
        let mut screens = Vec::new();
        let mut current = String::new();
        for event in &self.events {
            match event {
                DisplayEvent::Clear => {
                    if !current.is_empty() {
                        screens.push(core::mem::take(&mut current));
                    }
                }
                DisplayEvent::Text(text) | DisplayEvent::WrappedText(text) => {
                    current.push_str(text)
                }
                DisplayEvent::NextLine => current.push('\n'),
                DisplayEvent::On | DisplayEvent::Off => {}
            }
        }
        if !current.is_empty() {
            screens.push(current);
        }
        screens
    }

    /// Everything ever written, concatenated
    pub fn text(&self) -> String {
        self.screens().concat()
    }

    fn advance(&mut self, chars: usize) {
        if let Some((cols, rows)) = self.page {
            self.cursor = (self.cursor + chars).min(cols * rows);
        }
    }
}

impl PromptDisplay for RecordingDisplay {
    fn clear(&mut self) {
        self.cursor = 0;
        self.events.push(DisplayEvent::Clear);
    }

    fn display_on(&mut self) {
        self.on = true;
        self.events.push(DisplayEvent::On);
    }

    fn display_off(&mut self) {
        self.on = false;
        self.events.push(DisplayEvent::Off);
    }

    fn write_str(&mut self, text: &str) {
        self.advance(text.chars().count());
        self.events.push(DisplayEvent::Text(String::from(text)));
    }

    fn write_str_word_wrap(&mut self, text: &str) {
        self.advance(text.chars().count());
        self.events.push(DisplayEvent::WrappedText(String::from(text)));
    }

    fn next_line(&mut self) {
        if let Some((cols, rows)) = self.page {
            let next_row = self.cursor / cols + 1;
            self.cursor = (next_row * cols).min(cols * rows);
        }
        self.events.push(DisplayEvent::NextLine);
    }

    fn cursor_at_end(&self) -> bool {
        match self.page {
            Some((cols, rows)) => self.cursor >= cols * rows,
            None => false,
        }
    }
}
