//! Display backend trait
//!
//! Defines the interface a panel driver provides to the renderer.

use crate::screen::{Screen, SCREEN_COLS, SCREEN_ROWS};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Character-cell display
///
/// Coordinates are in character cells; implementations map them to pixels.
pub trait DisplayBackend {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text starting at `row`, `col`
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert cells `start_col..end_col` of `row`
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Draw a full-width horizontal line through the middle of `row`
    fn draw_rule(&mut self, row: u8) -> Result<(), DisplayError>;

    /// Send the frame buffer to the panel
    fn flush(&mut self) -> impl core::future::Future<Output = Result<(), DisplayError>>;

    /// (columns, rows) in character cells
    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}

/// Draw `screen` into the backend's frame buffer and flush it
pub async fn draw<B: DisplayBackend>(screen: &Screen, backend: &mut B) -> Result<(), DisplayError> {
    backend.clear()?;

    for (row, line) in screen.lines().enumerate() {
        if !line.is_empty() {
            backend.draw_text(row as u8, 0, line)?;
        }
    }

    if let Some(row) = screen.rule() {
        backend.draw_rule(row)?;
    }

    for row in 0..SCREEN_ROWS {
        if let Some((start, end)) = screen.highlight(row) {
            backend.invert_region(row as u8, start, end)?;
        }
    }

    backend.flush().await
}
