use super::buffer::Buffer;
use super::error::BufferError;
use super::line;

/// Cursor position in a [`Buffer`].
///
/// The cursor never owns a buffer; every operation that needs line lengths
/// takes the active buffer explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based character index into the raw line (may equal the line length).
    x: usize,
    /// Zero-based line index.
    y: usize,
    /// Screen column of `x` after tab expansion, refreshed each frame.
    scr_x: usize,
    /// Remembered column for vertical movement (sticky column).
    preferred_x: usize,
}

impl Cursor {
    /// Create a cursor at column 0, line 0.
    pub const fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            scr_x: 0,
            preferred_x: 0,
        }
    }

    /// Create a cursor at column `x` of line `y` without validating it.
    pub const fn at(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            scr_x: x,
            preferred_x: x,
        }
    }

    pub const fn x(&self) -> usize {
        self.x
    }

    pub const fn y(&self) -> usize {
        self.y
    }

    /// `(x, y)` as a pair.
    pub const fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// The screen column computed by the last [`Cursor::refresh_screen_col`].
    pub const fn screen_col(&self) -> usize {
        self.scr_x
    }

    /// Recompute the screen column from the raw content of the current line.
    pub fn refresh_screen_col(&mut self, buffer: &Buffer) -> usize {
        self.scr_x = buffer
            .get_raw(self.y)
            .map_or(self.x, |raw| line::screen_col(raw, self.x));
        self.scr_x
    }

    pub fn left(&mut self, buffer: &Buffer) {
        if self.x > 0 {
            self.set_col(self.x - 1);
        } else if self.y > 0 {
            self.up(buffer);
            self.end(buffer);
        }
    }

    pub fn right(&mut self, buffer: &Buffer) {
        if self.x < line_len(buffer, self.y) {
            self.set_col(self.x + 1);
        } else if self.y + 1 < buffer.line_count() {
            self.down(buffer);
            self.home();
        }
    }

    pub fn up(&mut self, buffer: &Buffer) {
        if self.y > 0 {
            self.y -= 1;
            self.clamp_to_preferred(buffer);
        }
    }

    /// Move down one line; on the last line this moves to the end instead.
    pub fn down(&mut self, buffer: &Buffer) {
        if self.y + 1 < buffer.line_count() {
            self.y += 1;
            self.clamp_to_preferred(buffer);
        } else {
            self.end(buffer);
        }
    }

    pub const fn home(&mut self) {
        self.set_col(0);
    }

    pub fn end(&mut self, buffer: &Buffer) {
        self.set_col(line_len(buffer, self.y));
    }

    /// Jump to line `row`, keeping the column where the target line allows.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LineOutOfRange`] if `row` is not a line of `buffer`.
    pub fn goto_line(&mut self, buffer: &Buffer, row: usize) -> Result<(), BufferError> {
        let len = buffer.line_len(row)?;
        self.y = row;
        self.set_col(self.x.min(len));
        Ok(())
    }

    /// Place the cursor at `(x, y)`, clamped into `buffer`.
    pub fn set(&mut self, buffer: &Buffer, x: usize, y: usize) {
        self.y = y.min(buffer.line_count().saturating_sub(1));
        self.set_col(x.min(line_len(buffer, self.y)));
    }

    /// Re-validate the position after the buffer changed underneath.
    pub fn clamp(&mut self, buffer: &Buffer) {
        self.y = self.y.min(buffer.line_count().saturating_sub(1));
        self.x = self.x.min(line_len(buffer, self.y));
    }

    const fn set_col(&mut self, x: usize) {
        self.x = x;
        self.preferred_x = x;
    }

    fn clamp_to_preferred(&mut self, buffer: &Buffer) {
        self.x = self.preferred_x.min(line_len(buffer, self.y));
    }
}

fn line_len(buffer: &Buffer, y: usize) -> usize {
    buffer.line_len(y).unwrap_or_default()
}
