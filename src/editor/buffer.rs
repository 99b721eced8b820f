use std::io;
use std::path::{Path, PathBuf};

use super::cursor::Cursor;
use super::error::BufferError;
use super::line::Line;
use crate::persist;

/// Lifecycle of a buffer relative to its file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Never saved; has no file yet.
    New,
    /// Freshly loaded from disk.
    Opened,
    /// Edited since it was loaded or saved.
    Modified,
    /// Written to disk by this session.
    Saved,
}

impl BufferState {
    /// Whether leaving this buffer would lose work.
    pub const fn has_unsaved_changes(self) -> bool {
        matches!(self, Self::New | Self::Modified)
    }
}

/// An ordered, never-empty sequence of lines.
///
/// All structural edits go through here. Each edit takes the cursor,
/// validates its position, and moves it to reflect the edit.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<Line>,
    title: String,
    path: Option<PathBuf>,
    state: BufferState,
    size: u64,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Create an untitled buffer with one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::default()],
            title: "Untitled".to_string(),
            path: None,
            state: BufferState::New,
            size: 0,
        }
    }

    /// Create an opened, untitled buffer from in-memory text.
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::from_lines(persist::split_lines(text));
        buf.size = text.len() as u64;
        buf
    }

    /// Create an opened, untitled buffer from raw lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: normalize(lines.into_iter().map(Into::into).collect()),
            state: BufferState::Opened,
            ..Self::new()
        }
    }

    /// Load `path` from disk.
    ///
    /// Returns `Ok(None)` if the file does not exist. A zero-byte file gives
    /// a single empty line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: &Path) -> io::Result<Option<Self>> {
        let Some(loaded) = persist::load(path)? else {
            return Ok(None);
        };
        let title = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        tracing::debug!(path = %path.display(), lines = loaded.lines.len(), "opened file");
        Ok(Some(Self {
            lines: normalize(loaded.lines),
            title,
            path: Some(path.to_path_buf()),
            state: BufferState::Opened,
            size: loaded.size,
        }))
    }

    // --- Metadata ---

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The file backing this buffer, if it has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub const fn state(&self) -> BufferState {
        self.state
    }

    /// Size of the file in bytes as of the last load or save.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Mark the buffer as written to disk.
    pub const fn mark_saved(&mut self) {
        self.state = BufferState::Saved;
    }

    // --- Line access ---

    /// Number of lines; always at least 1.
    pub const fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of line `index` in characters.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LineOutOfRange`] if `index` is past the end.
    pub fn line_len(&self, index: usize) -> Result<usize, BufferError> {
        self.line(index).map(Line::len)
    }

    /// Raw content of line `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LineOutOfRange`] if `index` is past the end.
    pub fn get_raw(&self, index: usize) -> Result<&str, BufferError> {
        self.line(index).map(Line::raw)
    }

    /// Tab-expanded content of line `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LineOutOfRange`] if `index` is past the end.
    pub fn get_rendered(&self, index: usize) -> Result<&str, BufferError> {
        self.line(index).map(Line::rendered)
    }

    /// Raw content of every line, in document order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(Line::raw)
    }

    /// The full text as written to disk: lines joined by `\n`, no trailing newline.
    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    // --- Insertion ---

    /// Insert `ch` at the cursor and step the cursor right.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is outside the buffer.
    pub fn insert_char(&mut self, ch: char, cursor: &mut Cursor) -> Result<(), BufferError> {
        let byte = self.locate(cursor)?;
        let line = &mut self.lines[cursor.y()];
        let mut raw = line.raw().to_string();
        raw.insert(byte, ch);
        line.set_raw(raw);
        self.state = BufferState::Modified;
        cursor.right(self);
        Ok(())
    }

    /// Split the current line at the cursor (Enter).
    ///
    /// The text right of the cursor becomes a new line below; the cursor
    /// moves to its start.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is outside the buffer.
    pub fn split_line(&mut self, cursor: &mut Cursor) -> Result<(), BufferError> {
        let byte = self.locate(cursor)?;
        let y = cursor.y();
        let (head, tail) = self.lines[y].raw().split_at(byte);
        let (head, tail) = (head.to_string(), tail.to_string());
        self.lines[y].set_raw(head);
        self.lines.insert(y + 1, Line::new(tail));
        self.state = BufferState::Modified;
        cursor.down(self);
        cursor.home();
        Ok(())
    }

    /// Split at the cursor, then replace the new line's content with `text`.
    ///
    /// The cursor ends up at the end of the inserted line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is outside the buffer.
    pub fn insert_line(&mut self, text: &str, cursor: &mut Cursor) -> Result<(), BufferError> {
        self.split_line(cursor)?;
        self.lines[cursor.y()].set_raw(text);
        cursor.end(self);
        Ok(())
    }

    // --- Deletion ---

    /// Backspace at the cursor.
    ///
    /// Deletes the character before the cursor, joins the line onto the
    /// previous one when at column 0, or removes an empty line. Returns
    /// `true` if anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is outside the buffer.
    pub fn delete_at(&mut self, cursor: &mut Cursor) -> Result<bool, BufferError> {
        let byte = self.locate(cursor)?;
        let (x, y) = cursor.position();
        let line_len = self.lines[y].len();

        if line_len > 0 && x > 0 {
            let line = &mut self.lines[y];
            let start = line.byte_index(x - 1).unwrap_or(0);
            let mut raw = line.raw().to_string();
            raw.replace_range(start..byte, "");
            line.set_raw(raw);
            self.state = BufferState::Modified;
            cursor.left(self);
        } else if y > 0 && x == 0 && line_len > 0 {
            // Join with previous line
            let removed = self.lines.remove(y);
            let prev = &mut self.lines[y - 1];
            let join_at = prev.len();
            let joined = format!("{}{}", prev.raw(), removed.raw());
            prev.set_raw(joined);
            self.state = BufferState::Modified;
            cursor.set(self, join_at, y - 1);
        } else if y > 0 {
            self.lines.remove(y);
            self.state = BufferState::Modified;
            cursor.set(self, usize::MAX, y - 1);
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    /// Remove the current line (Ctrl+D).
    ///
    /// The last remaining line is cleared instead of removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is outside the buffer.
    pub fn delete_line(&mut self, cursor: &mut Cursor) -> Result<(), BufferError> {
        self.locate(cursor)?;
        let y = cursor.y();
        if self.lines.len() > 1 {
            self.lines.remove(y);
            if y > 0 {
                cursor.set(self, usize::MAX, y - 1);
            } else {
                cursor.set(self, 0, 0);
            }
        } else {
            self.lines[y].set_raw("");
            cursor.home();
        }
        self.state = BufferState::Modified;
        Ok(())
    }

    // --- Private helpers ---

    fn line(&self, index: usize) -> Result<&Line, BufferError> {
        self.lines.get(index).ok_or(BufferError::LineOutOfRange {
            index,
            len: self.lines.len(),
        })
    }

    /// Validate the cursor and convert its column to a byte offset.
    fn locate(&self, cursor: &Cursor) -> Result<usize, BufferError> {
        let (x, y) = cursor.position();
        let line = self.line(y)?;
        line.byte_index(x).ok_or(BufferError::ColumnOutOfRange {
            line: y,
            col: x,
            len: line.len(),
        })
    }
}

fn normalize(lines: Vec<String>) -> Vec<Line> {
    if lines.is_empty() {
        return vec![Line::default()];
    }
    lines.into_iter().map(Line::new).collect()
}
