// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::BufferError)
    clippy::module_name_repetitions
)]

//! # Centi
//!
//! A small terminal text editor.
//!
//! Centi edits plain text files in the terminal with:
//! - Several buffers open at once
//! - Incremental search with result stepping
//! - Line yank and paste
//! - Save-as prompts with a fallback location when writing fails
//!
//! ## Architecture
//!
//! Centi uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Text buffers and cursor motion
//! - [`session`]: The set of open buffers and the yank register
//! - [`persist`]: Reading and writing files
//! - [`search`]: Search functionality
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod editor;
pub mod perf;
pub mod persist;
pub mod search;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Buffer, Cursor};
    pub use crate::session::Session;
    pub use crate::ui::viewport::Viewport;
}
