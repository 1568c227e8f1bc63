//! Page-organized monochrome frame buffer
//!
//! Matches the SSD1306/SH1106 memory layout: 8 pages of 128 columns, one
//! byte per column holding 8 vertical pixels, LSB at the top.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};

use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

/// Panel width in pixels
pub const WIDTH: usize = 128;
/// Panel height in pixels
pub const HEIGHT: usize = 64;
/// 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Horizontal pitch of one character cell
pub const CELL_WIDTH: usize = 6;
/// Vertical pitch of one character cell (one page)
pub const CELL_HEIGHT: usize = 8;

/// 128x64 1bpp frame buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Raw bytes of one page, in column order
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page.min(PAGES - 1)]
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Draw text into character row `row` starting at cell `col`
    ///
    /// Glyphs are 5x8 drawn on a 6 pixel pitch so 21 cells fill a row.
    /// Text past the right edge is dropped.
    pub fn draw_text(&mut self, row: u8, col: u8, text: &str) {
        if row as usize >= SCREEN_ROWS {
            return;
        }

        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        let y = row as i32 * CELL_HEIGHT as i32;
        let mut buf = [0u8; 4];

        for (i, ch) in text.chars().enumerate() {
            let cell = col as usize + i;
            if cell >= SCREEN_COLS {
                break;
            }
            let glyph: &str = ch.encode_utf8(&mut buf);
            let origin = Point::new((cell * CELL_WIDTH) as i32, y);
            infallible(Text::with_baseline(glyph, origin, style, Baseline::Top).draw(self));
        }
    }

    /// XOR the cells `start_col..end_col` of `row`
    pub fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) {
        if row as usize >= PAGES {
            return;
        }

        let start = (start_col as usize * CELL_WIDTH).min(WIDTH);
        let end = (end_col as usize * CELL_WIDTH).min(WIDTH);
        for byte in &mut self.pages[row as usize][start..end] {
            *byte ^= 0xFF;
        }
    }

    /// One-pixel horizontal line across the middle of `row`
    pub fn draw_rule(&mut self, row: u8) {
        if row as usize >= PAGES {
            return;
        }

        let y = (row as usize * CELL_HEIGHT + CELL_HEIGHT / 2 - 1) as i32;
        infallible(
            Line::new(Point::new(0, y), Point::new(WIDTH as i32 - 1, y))
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(self),
        );
    }
}

fn infallible<T>(result: Result<T, Infallible>) {
    match result {
        Ok(_) => {}
        Err(e) => match e {},
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let bit = 1 << (y % 8);
            let byte = &mut self.pages[y / 8][x];
            if color.is_on() {
                *byte |= bit;
            } else {
                *byte &= !bit;
            }
        }
        Ok(())
    }
}
