//! Line-oriented text buffer with a tab-aware cursor.
//!
//! - [`Line`]: raw content plus its tab-expanded rendering
//! - [`Buffer`]: the never-empty line sequence and every structural edit
//! - [`Cursor`]: logical position, sticky column, and screen-column projection

mod buffer;
mod cursor;
mod error;
pub mod line;

pub use buffer::{Buffer, BufferState};
pub use cursor::Cursor;
pub use error::BufferError;
pub use line::{Line, TAB_STOP};
