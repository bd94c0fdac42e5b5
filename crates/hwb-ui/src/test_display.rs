//! Framebuffer stand-in for the 128x64 prompt panel.
//!
//! The text display repaints the whole panel on every write, so the same
//! pixels are drawn over and over. `MockDisplay` from embedded-graphics
//! rejects that, hence this plain buffer. Drawing outside the panel is
//! clipped like the real controller does.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Overdraw-friendly framebuffer for render tests and screenshots.
pub struct TestDisplay {
    pixels: Vec<BinaryColor>,
    width: u32,
    height: u32,
}

impl TestDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
        }
    }

    /// Buffer the size of the prompt panel
    pub fn default_size() -> Self {
        Self::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> &[BinaryColor] {
        &self.pixels
    }

    /// Colour at `point`, or `None` off the panel
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    pub fn black_pixel_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|p| **p == BinaryColor::On)
            .count()
    }

    /// Lit pixels inside text cell (`col`, `row`) of the prompt font.
    pub fn lit_in_cell(&self, col: u32, row: u32) -> usize {
        let cell = FONT_8X13.character_size;
        let origin = Point::new(
            (col * cell.width) as i32,
            (row * cell.height) as i32,
        );
        cell_points(origin, cell)
            .filter(|p| self.pixel(*p) == Some(BinaryColor::On))
            .count()
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok().filter(|x| *x < self.width)?;
        let y = u32::try_from(point.y).ok().filter(|y| *y < self.height)?;
        Some((y * self.width + x) as usize)
    }
}

fn cell_points(origin: Point, size: Size) -> impl Iterator<Item = Point> {
    (0..size.height as i32).flat_map(move |dy| {
        (0..size.width as i32).map(move |dx| origin + Point::new(dx, dy))
    })
}

impl DrawTarget for TestDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::MonoTextStyle;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_graphics::text::{Baseline, Text};

    fn draw_glyph(display: &mut TestDisplay, glyph: &str, col: i32, row: i32) {
        let style = MonoTextStyle::new(&FONT_8X13, BinaryColor::On);
        Text::with_baseline(glyph, Point::new(col * 8, row * 13), style, Baseline::Top)
            .draw(display)
            .unwrap();
    }

    #[test]
    fn test_repainted_glyph_stays_in_its_cell() {
        let mut display = TestDisplay::default_size();
        draw_glyph(&mut display, "B", 15, 3);
        let lit = display.black_pixel_count();
        assert!(lit > 0);
        assert_eq!(display.lit_in_cell(15, 3), lit);

        // Same cell again, as every page write does
        draw_glyph(&mut display, "B", 15, 3);
        assert_eq!(display.black_pixel_count(), lit);
        assert_eq!(display.lit_in_cell(14, 3), 0);

        display.clear(BinaryColor::Off).unwrap();
        assert_eq!(display.lit_in_cell(15, 3), 0);
    }

    #[test]
    fn test_drawing_past_the_panel_edge_is_clipped() {
        let mut display = TestDisplay::default_size();
        Rectangle::new(Point::new(120, 60), Size::new(16, 16))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut display)
            .unwrap();

        assert_eq!(display.black_pixel_count(), 8 * 4);
        assert_eq!(display.pixels()[63 * 128 + 127], BinaryColor::On);
        assert_eq!(display.pixel(Point::new(127, 63)), Some(BinaryColor::On));
        assert_eq!(display.pixel(Point::new(128, 63)), None);
        assert_eq!(display.pixel(Point::new(-1, 0)), None);
        // Below the fourth text row, so no text cell sees it
        assert_eq!(display.lit_in_cell(15, 3), 0);
    }

    #[test]
    fn test_default_size_matches_panel() {
        let display = TestDisplay::default_size();
        assert_eq!(display.size(), Size::new(128, 64));
        assert_eq!(display.pixels().len(), 128 * 64);
    }
}
