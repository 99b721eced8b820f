//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the terminal size and the scroll offsets,
//! and moves them just enough to keep the cursor on screen.

use super::CONTENT_TOP_PADDING;

/// Manages the visible portion of a buffer.
///
/// The viewport tracks:
/// - Terminal dimensions (width, height), including the status rows
/// - Vertical offset (first visible line)
/// - Horizontal offset (first visible screen column)
///
/// # Example
///
/// ```
/// use centi::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20);
/// vp.follow(5, 0);
/// vp.follow(19, 0);
/// assert_eq!(vp.offset_y(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset_x: usize,
    offset_y: usize,
}

impl Viewport {
    /// Create a viewport for a terminal of `width` x `height` cells.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            offset_x: 0,
            offset_y: 0,
        }
    }

    /// First visible line.
    pub const fn offset_y(&self) -> usize {
        self.offset_y
    }

    /// First visible screen column.
    pub const fn offset_x(&self) -> usize {
        self.offset_x
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of rows available for buffer content.
    ///
    /// One row goes to the top padding (the top status line) and one to the
    /// bottom status line.
    pub const fn content_rows(&self) -> usize {
        (self.height as usize).saturating_sub(1 + CONTENT_TOP_PADDING as usize)
    }

    /// Resize the viewport. Offsets are re-clamped by the next [`Viewport::follow`].
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Forget the scroll position (after switching or replacing a buffer).
    pub const fn reset(&mut self) {
        self.offset_x = 0;
        self.offset_y = 0;
    }

    /// Scroll the minimum amount that brings the cursor into view.
    ///
    /// `row` is the cursor line and `screen_col` its tab-expanded column.
    pub fn follow(&mut self, row: usize, screen_col: usize) {
        let height = self.height as usize;
        let width = self.width as usize;

        if row < self.offset_y {
            self.offset_y = row;
        }
        if row >= (self.offset_y + height).saturating_sub(2) {
            self.offset_y = (row + 3).saturating_sub(height).min(row);
        }

        if screen_col < self.offset_x {
            self.offset_x = screen_col;
        }
        if screen_col >= self.offset_x + width {
            self.offset_x = (screen_col + 1).saturating_sub(width).min(screen_col);
        }
    }
}
