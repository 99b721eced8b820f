use std::path::PathBuf;

use crate::search::SearchResults;
use crate::session::Session;
use crate::ui::viewport::Viewport;

/// Severity of a notice shown on the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Normal,
    Info,
    Error,
}

/// What to do once the active buffer has been saved (or deliberately not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    Stay,
    Quit,
    Open(PathBuf),
    New,
}

/// Which question an input prompt is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    SaveAs(FollowUp),
    Open,
    Search,
    Goto,
}

impl PromptKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SaveAs(_) => "Write a name for new buffer",
            Self::Open => "Enter filename to open",
            Self::Search => "Search: ",
            Self::Goto => "Goto line: ",
        }
    }
}

/// Single-line text input with its own cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    input: String,
    cursor: usize,
}

impl Prompt {
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
            cursor: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Input cursor as a character index.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert `ch` at the input cursor unless the input is full.
    pub fn insert(&mut self, ch: char) {
        if self.input.chars().count() >= crate::persist::MAX_NAME_LEN {
            return;
        }
        let at = self.byte_at(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_at(self.cursor - 1);
        self.input.remove(at);
        self.cursor -= 1;
    }

    pub const fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_at(&self, index: usize) -> usize {
        self.input
            .char_indices()
            .nth(index)
            .map_or(self.input.len(), |(i, _)| i)
    }
}

/// Which question a yes/no prompt is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmKind {
    SaveChanges(FollowUp),
    Overwrite { path: PathBuf, then: FollowUp },
}

impl ConfirmKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SaveChanges(_) => "File has not yet been saved. Would you like to save?",
            Self::Overwrite { .. } => "File already exists. Overwrite it?",
        }
    }
}

/// Yes/no question; the typed answer is held until Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
    pub kind: ConfirmKind,
    pub answer: Option<char>,
}

impl Confirm {
    pub const fn new(kind: ConfirmKind) -> Self {
        Self { kind, answer: None }
    }

    pub const fn is_yes(&self) -> bool {
        matches!(self.answer, Some('y' | 'Y'))
    }
}

/// A message that waits for Enter, optionally resuming a prompt afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub resume: Option<Box<Overlay>>,
}

/// Modal state drawn on the bottom row; it owns all key input while active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Prompt(Prompt),
    Confirm(Confirm),
    Notice(Notice),
    Results(SearchResults),
}

/// File work requested by `update` and carried out by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Save under a name typed by the user, asking before overwriting.
    SaveAs { name: String, then: FollowUp },
    /// Write the active buffer to `path`.
    Write { path: PathBuf, then: FollowUp },
    /// Check that `path` exists, guard unsaved changes, then load it.
    Open(PathBuf),
    /// Replace the active buffer with the contents of `path`.
    Load(PathBuf),
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Open buffers, the cursor and the yank register
    pub session: Session,
    /// Scroll offsets and terminal size
    pub viewport: Viewport,
    /// Active prompt, question or notice
    pub overlay: Option<Overlay>,
    /// Directory that typed file names are resolved against
    pub work_dir: PathBuf,
    /// Whether quitting with unsaved changes asks first
    pub confirm_quit: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    effect: Option<Effect>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Session::default(), (80, 24))
    }
}

impl Model {
    /// Create a new model with default settings.
    pub fn new(session: Session, terminal_size: (u16, u16)) -> Self {
        Self {
            session,
            viewport: Viewport::new(terminal_size.0, terminal_size.1),
            overlay: None,
            work_dir: PathBuf::from("."),
            confirm_quit: true,
            should_quit: false,
            effect: None,
        }
    }

    #[must_use]
    pub fn with_work_dir(mut self, dir: PathBuf) -> Self {
        self.work_dir = dir;
        self
    }

    #[must_use]
    pub const fn with_confirm_quit(mut self, enabled: bool) -> Self {
        self.confirm_quit = enabled;
        self
    }

    pub(super) fn show_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.overlay = Some(Overlay::Notice(Notice {
            level,
            text: text.into(),
            resume: None,
        }));
    }

    /// Show an error, then return to `resume` once it is dismissed.
    pub(super) fn show_error_then(&mut self, text: impl Into<String>, resume: Overlay) {
        self.overlay = Some(Overlay::Notice(Notice {
            level: NoticeLevel::Error,
            text: text.into(),
            resume: Some(Box::new(resume)),
        }));
    }

    pub(super) fn request(&mut self, effect: Effect) {
        self.effect = Some(effect);
    }

    /// The file work requested by the last update, if any.
    pub fn take_effect(&mut self) -> Option<Effect> {
        self.effect.take()
    }

    pub fn pending_effect(&self) -> Option<&Effect> {
        self.effect.as_ref()
    }

    /// The notice currently shown, as `(level, text)`.
    pub fn active_notice(&self) -> Option<(NoticeLevel, &str)> {
        match &self.overlay {
            Some(Overlay::Notice(notice)) => Some((notice.level, notice.text.as_str())),
            _ => None,
        }
    }
}
