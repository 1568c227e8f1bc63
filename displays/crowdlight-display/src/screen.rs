//! Character screen buffer
//!
//! 8 rows of 21 characters: a 128x64 panel with a 6x8 character cell.

use heapless::String;

/// Character rows
pub const SCREEN_ROWS: usize = 8;

/// Character columns
pub const SCREEN_COLS: usize = 21;

/// Text-mode screen content, independent of the panel
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
    /// Inverted span per row (start_col, end_col exclusive)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Row whose middle carries a horizontal rule
    rule: Option<u8>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            rule: None,
        }
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; SCREEN_ROWS];
        self.rule = None;
    }

    /// Set the content of a row, cut at [`SCREEN_COLS`] characters
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        line.clear();
        for ch in text.chars().take(SCREEN_COLS) {
            if line.push(ch).is_err() {
                break;
            }
        }
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Highlight a whole row
    pub fn highlight_row(&mut self, row: usize) {
        if row < SCREEN_ROWS {
            self.highlights[row] = Some((0, SCREEN_COLS as u8));
        }
    }

    pub fn highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    pub fn set_rule(&mut self, row: usize) {
        if row < SCREEN_ROWS {
            self.rule = Some(row as u8);
        }
    }

    pub fn rule(&self) -> Option<u8> {
        self.rule
    }

    /// Row index of the first line containing `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.contains(needle))
    }
}

impl core::fmt::Debug for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.lines()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_line_is_cut() {
        let mut screen = Screen::new();
        screen.set_line(0, "0123456789012345678901234");
        assert_eq!(screen.line(0), "012345678901234567890");
    }

    #[test]
    fn test_out_of_range_rows_ignored() {
        let mut screen = Screen::new();
        screen.set_line(SCREEN_ROWS, "nope");
        screen.highlight_row(SCREEN_ROWS);
        screen.set_rule(SCREEN_ROWS);
        assert_eq!(screen.line(SCREEN_ROWS), "");
        assert_eq!(screen.rule(), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut screen = Screen::new();
        screen.set_line(3, "x");
        screen.highlight_row(3);
        screen.set_rule(1);
        screen.clear();
        assert_eq!(screen, Screen::new());
    }

    #[test]
    fn test_non_ascii_counts_chars() {
        let mut screen = Screen::new();
        screen.set_line(0, "23.4°C");
        assert_eq!(screen.line(0), "23.4°C");
    }
}
