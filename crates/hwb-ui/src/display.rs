//! Prompt display abstraction.
//! Supports a text-cell panel on hardware and a recording double for tests.

/// Text surface the confirmation prompts are written to
///
/// Implementations:
/// - [`TextDisplay`](crate::text_display::TextDisplay) over any
///   embedded-graphics draw target
/// - [`RecordingDisplay`](crate::mock_io::RecordingDisplay) for tests
///
/// Drawing failures are the implementation's business; the protocol never
/// sees them.
pub trait PromptDisplay {
    /// Blank the page and move the cursor to the top-left cell
    fn clear(&mut self);

    /// Make the page visible
    fn display_on(&mut self);

    /// Blank the panel and stop showing the page
    fn display_off(&mut self);

    /// Write text at the cursor, breaking lines at the panel edge
    fn write_str(&mut self, text: &str);

    /// Write text at the cursor, moving words that would be split onto the
    /// next line
    fn write_str_word_wrap(&mut self, text: &str);

    /// Move the cursor to the start of the next line
    fn next_line(&mut self);

    /// Whether the page is full
    fn cursor_at_end(&self) -> bool;
}

impl<T: PromptDisplay + ?Sized> PromptDisplay for &mut T {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn display_on(&mut self) {
        (**self).display_on()
    }

    fn display_off(&mut self) {
        (**self).display_off()
    }

    fn write_str(&mut self, text: &str) {
        (**self).write_str(text)
    }

    fn write_str_word_wrap(&mut self, text: &str) {
        (**self).write_str_word_wrap(text)
    }

    fn next_line(&mut self) {
        (**self).next_line()
    }

    fn cursor_at_end(&self) -> bool {
        (**self).cursor_at_end()
    }
}
