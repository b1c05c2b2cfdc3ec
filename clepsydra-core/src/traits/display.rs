//! Character display trait
//!
//! The timer renders through this trait only. The display is a single row
//! of [`DISPLAY_COLS`] character cells addressed by column.

/// Number of character columns on the display
pub const DISPLAY_COLS: u8 = 16;

/// Single-row character display
///
/// Implementations track the cursor themselves: every written character
/// advances it by one column.
pub trait CharDisplay {
    /// Move the cursor to `col`
    ///
    /// Columns past the last one are clamped to the last column.
    fn set_cursor(&mut self, col: u8);

    /// Blank the display and return the cursor to column 0
    fn clear(&mut self);

    /// Return the cursor to column 0 without blanking
    fn home(&mut self);

    /// Write one character at the cursor and advance
    ///
    /// Writing past the last column is left to the caller.
    fn write_char(&mut self, ch: u8);

    /// Current cursor column
    fn cursor(&self) -> u8;

    /// Write text left to right starting at the cursor
    fn add_text(&mut self, text: &str) {
        for ch in text.bytes() {
            self.write_char(ch);
        }
    }

    /// Replace the display content with `text`
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.add_text(text);
    }
}
