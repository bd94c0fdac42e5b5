//! Character-cell prompt display on any embedded-graphics target.
//!
//! Keeps a page of ASCII cells and redraws it with a monospace font after
//! every change. Characters past the last cell are dropped, so the caller
//! can use [`PromptDisplay::cursor_at_end`] to decide when to turn the page.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{
    mono_font::{ascii::FONT_8X13, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use crate::config::Dimensions;
use crate::display::PromptDisplay;

const BLANK: u8 = b' ';

/// Shown in place of characters the font cannot draw
const REPLACEMENT: u8 = b'?';

/// Text page rendered onto a monochrome draw target
///
/// The default 16 x 4 grid with the 8x13 font fills a 128x64 panel.
pub struct TextDisplay<D> {
    target: D,
    dimensions: Dimensions,
    cells: Vec<u8>,
    cursor: usize,
    on: bool,
}

impl<D> TextDisplay<D>
where
    D: DrawTarget<Color = BinaryColor>,
    D::Error: core::fmt::Debug,
{
    pub fn new(target: D) -> Self {
        Self::with_dimensions(target, Dimensions::default())
    }

    pub fn with_dimensions(target: D, dimensions: Dimensions) -> Self {
        Self {
            target,
            dimensions,
            cells: vec![BLANK; dimensions.cells()],
            cursor: 0,
            on: false,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_target(self) -> D {
        self.target
    }

    /// Page contents, one string per line, trailing blanks trimmed
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.dimensions.cols() as usize)
            .map(|row| String::from_utf8_lossy(row).trim_end().into())
            .collect()
    }

    fn column(&self) -> usize {
        self.cursor % self.dimensions.cols() as usize
    }

    fn put_char(&mut self, ch: char) {
        let Some(cell) = self.cells.get_mut(self.cursor) else {
            return;
        };
        *cell = if ch.is_ascii_graphic() || ch == ' ' {
            ch as u8
        } else {
            REPLACEMENT
        };
        self.cursor += 1;
    }

    fn advance_line(&mut self) {
        let cols = self.dimensions.cols() as usize;
        self.cursor = ((self.cursor / cols + 1) * cols).min(self.cells.len());
    }

    fn render(&mut self) {
        if !self.on {
            return;
        }
        let style = MonoTextStyle::new(&FONT_8X13, BinaryColor::On);
        let line_height = FONT_8X13.character_size.height as i32;
        let cols = self.dimensions.cols() as usize;

        if let Err(e) = self.target.clear(BinaryColor::Off) {
            log::warn!("prompt display clear failed: {:?}", e);
            return;
        }
        for (row, cells) in self.cells.chunks(cols).enumerate() {
            let text = core::str::from_utf8(cells).unwrap_or_default();
            let origin = Point::new(0, row as i32 * line_height);
            if let Err(e) = Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut self.target) {
                log::warn!("prompt display draw failed on line {}: {:?}", row, e);
                return;
            }
        }
    }
}

impl<D> PromptDisplay for TextDisplay<D>
where
    D: DrawTarget<Color = BinaryColor>,
    D::Error: core::fmt::Debug,
{
    fn clear(&mut self) {
        self.cells.fill(BLANK);
        self.cursor = 0;
        self.render();
    }

    fn display_on(&mut self) {
        self.on = true;
        self.render();
    }

    fn display_off(&mut self) {
        self.on = false;
        if let Err(e) = self.target.clear(BinaryColor::Off) {
            log::warn!("prompt display blank failed: {:?}", e);
        }
    }

    fn write_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.put_char(ch);
        }
        self.render();
    }

    fn write_str_word_wrap(&mut self, text: &str) {
        let cols = self.dimensions.cols() as usize;
        for (i, word) in text.split(' ').enumerate() {
            // No blank at the start of a line
            if i > 0 && self.column() != 0 {
                self.put_char(' ');
            }
            let len = word.chars().count();
            if self.column() != 0 && len > cols - self.column() && len <= cols {
                self.advance_line();
            }
            for ch in word.chars() {
                self.put_char(ch);
            }
        }
        self.render();
    }

    fn next_line(&mut self) {
        self.advance_line();
    }

    fn cursor_at_end(&self) -> bool {
        self.cursor >= self.cells.len()
    }
}
