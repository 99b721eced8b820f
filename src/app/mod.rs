//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File I/O never happens inside `update`. It records an [`Effect`] on the
//! model and the event loop performs it before the next frame.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{
    Confirm, ConfirmKind, Effect, FollowUp, Model, Notice, NoticeLevel, Overlay, Prompt,
    PromptKind,
};
pub use update::{Message, update};

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::editor::Buffer;
use crate::session::Session;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    files: Vec<PathBuf>,
    confirm_quit: bool,
}

impl App {
    /// Create a new application for the given files, one buffer each.
    pub const fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            confirm_quit: true,
        }
    }

    /// Ask before quitting with unsaved changes.
    #[must_use]
    pub const fn with_confirm_quit(mut self, enabled: bool) -> Self {
        self.confirm_quit = enabled;
        self
    }

    /// Load every file into a buffer; missing files become new buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read.
    pub fn load_session(&self) -> Result<Session> {
        let mut buffers = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let buffer = Buffer::open(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
                .unwrap_or_default();
            buffers.push(buffer);
        }
        Ok(Session::new(buffers))
    }
}

#[cfg(test)]
mod tests;
