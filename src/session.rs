//! The set of open buffers and the single editing cursor.

use crate::editor::{Buffer, BufferError, Cursor};

/// Open buffers, the index of the active one, and the cursor into it.
///
/// There is always at least one buffer. Switching buffers resets the cursor
/// to the origin.
#[derive(Debug, Clone)]
pub struct Session {
    buffers: Vec<Buffer>,
    current: usize,
    cursor: Cursor,
    yank: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Session {
    /// Create a session over `buffers`; an empty list gets one new buffer.
    pub fn new(mut buffers: Vec<Buffer>) -> Self {
        if buffers.is_empty() {
            buffers.push(Buffer::new());
        }
        Self {
            buffers,
            current: 0,
            cursor: Cursor::new(),
            yank: None,
        }
    }

    /// The active buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffers[self.current]
    }

    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The active buffer and the cursor, borrowed together for editing.
    pub fn edit(&mut self) -> (&mut Buffer, &mut Cursor) {
        (&mut self.buffers[self.current], &mut self.cursor)
    }

    /// The active buffer (shared) and the cursor (mutable), for motion.
    pub fn motion(&mut self) -> (&Buffer, &mut Cursor) {
        (&self.buffers[self.current], &mut self.cursor)
    }

    pub const fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Zero-based index of the active buffer.
    pub const fn current_index(&self) -> usize {
        self.current
    }

    pub fn next_buffer(&mut self) {
        self.switch_to((self.current + 1) % self.buffers.len());
    }

    pub fn prev_buffer(&mut self) {
        let count = self.buffers.len();
        self.switch_to((self.current + count - 1) % count);
    }

    /// Replace the active buffer wholesale (open or new).
    pub fn replace_buffer(&mut self, buffer: Buffer) {
        self.buffers[self.current] = buffer;
        self.cursor = Cursor::new();
    }

    /// Replace the active buffer but keep the cursor where it was (reload after save).
    pub fn reload_buffer(&mut self, buffer: Buffer) {
        self.buffers[self.current] = buffer;
        self.cursor.clamp(&self.buffers[self.current]);
    }

    /// Copy the current line into the yank register.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor row is outside the active buffer.
    pub fn yank_line(&mut self) -> Result<(), BufferError> {
        let raw = self.buffer().get_raw(self.cursor.y())?;
        self.yank = Some(raw.to_string());
        Ok(())
    }

    /// The text last copied with [`Session::yank_line`].
    pub fn yanked(&self) -> Option<&str> {
        self.yank.as_deref()
    }

    fn switch_to(&mut self, index: usize) {
        if index != self.current {
            tracing::debug!(from = self.current, to = index, "switching buffer");
        }
        self.current = index;
        self.cursor = Cursor::new();
    }
}
