//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll offsets that follow the cursor
//! - `render`: Frame composition and row slicing
//! - `status`: Status lines and the prompt/notice bar

pub mod viewport;

mod render;
mod status;

pub use render::{render, visible_rows};
pub use status::{compose_status, prompt_line};

/// Rows above the buffer content (the top status line).
pub const CONTENT_TOP_PADDING: u16 = 1;
