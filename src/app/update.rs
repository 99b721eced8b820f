use crate::app::Model;
use crate::app::model::{
    Confirm, ConfirmKind, Effect, FollowUp, NoticeLevel, Overlay, Prompt, PromptKind,
};
use crate::editor::{Buffer, BufferError};
use crate::search::{self, SearchResults};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    SplitLine,
    /// Delete backwards (Backspace)
    DeleteBack,
    /// Remove the current line
    DeleteLine,

    // Cursor
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,

    // Files
    /// Save the active buffer
    Save,
    /// Ask for a file to open in place of the active buffer
    Open,
    /// Replace the active buffer with a new one
    NewBuffer,
    /// Leave the editor
    Quit,

    // Buffers
    NextBuffer,
    PrevBuffer,

    // Tools
    /// Ask for a search query
    StartSearch,
    /// Ask for a line number
    StartGoto,
    /// Copy the current line into the yank register
    YankLine,
    /// Insert the yank register as a new line
    Paste,

    // Overlays
    /// Type into the active prompt or answer the active question
    OverlayChar(char),
    OverlayLeft,
    OverlayRight,
    OverlayBackspace,
    /// Enter: submit, confirm or dismiss
    OverlaySubmit,
    /// Escape: cancel the prompt or restore the pre-search position
    OverlayCancel,
    /// Jump to the next search result
    SearchNext,
    /// Jump to the previous search result
    SearchPrev,

    /// Terminal resized
    Resize(u16, u16),
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function; file work is requested
/// through [`Model::take_effect`].
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editing
        Message::InsertChar(ch) => {
            let (buffer, cursor) = model.session.edit();
            let result = buffer.insert_char(ch, cursor);
            report(&mut model, result);
        }
        Message::SplitLine => {
            let (buffer, cursor) = model.session.edit();
            let result = buffer.split_line(cursor);
            report(&mut model, result);
        }
        Message::DeleteBack => {
            let (buffer, cursor) = model.session.edit();
            let result = buffer.delete_at(cursor).map(drop);
            report(&mut model, result);
        }
        Message::DeleteLine => {
            let (buffer, cursor) = model.session.edit();
            let result = buffer.delete_line(cursor);
            report(&mut model, result);
        }

        // Cursor
        Message::CursorLeft => {
            let (buffer, cursor) = model.session.motion();
            cursor.left(buffer);
        }
        Message::CursorRight => {
            let (buffer, cursor) = model.session.motion();
            cursor.right(buffer);
        }
        Message::CursorUp => {
            let (buffer, cursor) = model.session.motion();
            cursor.up(buffer);
        }
        Message::CursorDown => {
            let (buffer, cursor) = model.session.motion();
            cursor.down(buffer);
        }
        Message::CursorHome => {
            let (_, cursor) = model.session.motion();
            cursor.home();
        }
        Message::CursorEnd => {
            let (buffer, cursor) = model.session.motion();
            cursor.end(buffer);
        }

        // Files
        Message::Save => begin_save(&mut model, FollowUp::Stay),
        Message::Open => open_prompt(&mut model, PromptKind::Open),
        Message::NewBuffer => guard_unsaved(&mut model, FollowUp::New),
        Message::Quit => {
            if model.confirm_quit {
                guard_unsaved(&mut model, FollowUp::Quit);
            } else {
                model.should_quit = true;
            }
        }

        // Buffers
        Message::NextBuffer => {
            model.session.next_buffer();
            model.viewport.reset();
        }
        Message::PrevBuffer => {
            model.session.prev_buffer();
            model.viewport.reset();
        }

        // Tools
        Message::StartSearch => open_prompt(&mut model, PromptKind::Search),
        Message::StartGoto => open_prompt(&mut model, PromptKind::Goto),
        Message::YankLine => {
            let result = model.session.yank_line();
            report(&mut model, result);
        }
        Message::Paste => {
            let yanked = model.session.yanked().map(str::to_owned);
            match yanked {
                Some(text) => {
                    let (buffer, cursor) = model.session.edit();
                    let result = buffer.insert_line(&text, cursor);
                    report(&mut model, result);
                }
                None => model.show_notice(NoticeLevel::Info, "Clipboard is empty"),
            }
        }

        // Overlays
        Message::OverlayChar(ch) => match &mut model.overlay {
            Some(Overlay::Prompt(prompt)) => prompt.insert(ch),
            Some(Overlay::Confirm(confirm)) => confirm.answer = Some(ch),
            _ => {}
        },
        Message::OverlayLeft => {
            if let Some(Overlay::Prompt(prompt)) = &mut model.overlay {
                prompt.left();
            }
        }
        Message::OverlayRight => {
            if let Some(Overlay::Prompt(prompt)) = &mut model.overlay {
                prompt.right();
            }
        }
        Message::OverlayBackspace => match &mut model.overlay {
            Some(Overlay::Prompt(prompt)) => prompt.backspace(),
            Some(Overlay::Confirm(confirm)) => confirm.answer = None,
            _ => {}
        },
        Message::OverlaySubmit => submit_overlay(&mut model),
        Message::OverlayCancel => cancel_overlay(&mut model),
        Message::SearchNext => step_results(&mut model, SearchResults::next_match),
        Message::SearchPrev => step_results(&mut model, SearchResults::prev_match),

        Message::Resize(width, height) => model.viewport.resize(width, height),
    }
    model
}

/// Log a failed buffer operation and show it as an error notice.
fn report(model: &mut Model, result: Result<(), BufferError>) {
    if let Err(err) = result {
        tracing::error!(%err, "buffer operation failed");
        model.show_notice(NoticeLevel::Error, err.to_string());
    }
}

fn open_prompt(model: &mut Model, kind: PromptKind) {
    model.overlay = Some(Overlay::Prompt(Prompt::new(kind)));
}

/// Start the save flow for the active buffer.
///
/// Buffers without a file ask for a name first.
pub(super) fn begin_save(model: &mut Model, then: FollowUp) {
    match model.session.buffer().path() {
        Some(path) => {
            let path = path.to_path_buf();
            model.overlay = None;
            model.request(Effect::Write { path, then });
        }
        None => open_prompt(model, PromptKind::SaveAs(then)),
    }
}

/// Ask to save first if leaving the active buffer would lose work.
pub(super) fn guard_unsaved(model: &mut Model, then: FollowUp) {
    if model.session.buffer().state().has_unsaved_changes() {
        model.overlay = Some(Overlay::Confirm(Confirm::new(ConfirmKind::SaveChanges(
            then,
        ))));
    } else {
        apply_follow_up(model, then);
    }
}

/// Carry out the action that was waiting on a save decision.
pub(super) fn apply_follow_up(model: &mut Model, then: FollowUp) {
    model.overlay = None;
    match then {
        FollowUp::Stay => {}
        FollowUp::Quit => model.should_quit = true,
        FollowUp::Open(path) => model.request(Effect::Load(path)),
        FollowUp::New => {
            model.session.replace_buffer(Buffer::new());
            model.viewport.reset();
        }
    }
}

fn submit_overlay(model: &mut Model) {
    let Some(overlay) = model.overlay.take() else {
        return;
    };
    match overlay {
        Overlay::Prompt(prompt) => submit_prompt(model, prompt),
        Overlay::Confirm(confirm) => {
            if confirm.answer.is_none() {
                model.overlay = Some(Overlay::Confirm(confirm));
                return;
            }
            let yes = confirm.is_yes();
            match confirm.kind {
                ConfirmKind::SaveChanges(then) if yes => begin_save(model, then),
                ConfirmKind::SaveChanges(then) => apply_follow_up(model, then),
                ConfirmKind::Overwrite { path, then } if yes => {
                    model.request(Effect::Write { path, then });
                }
                ConfirmKind::Overwrite { then, .. } => {
                    open_prompt(model, PromptKind::SaveAs(then));
                }
            }
        }
        Overlay::Notice(notice) => model.overlay = notice.resume.map(|resume| *resume),
        // Enter keeps the cursor on the current result.
        Overlay::Results(_) => {}
    }
}

fn submit_prompt(model: &mut Model, prompt: Prompt) {
    let input = prompt.input().to_string();
    match prompt.kind {
        PromptKind::SaveAs(then) => match crate::persist::validate_file_name(&input) {
            Ok(()) => model.request(Effect::SaveAs { name: input, then }),
            Err(err) => model.show_error_then(
                err.to_string(),
                Overlay::Prompt(Prompt::new(PromptKind::SaveAs(then))),
            ),
        },
        PromptKind::Open => {
            let path = model.work_dir.join(&input);
            model.request(Effect::Open(path));
        }
        PromptKind::Search => run_search(model, &input),
        PromptKind::Goto => {
            let (buffer, cursor) = model.session.motion();
            let target = input
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|line| line.checked_sub(1));
            let moved = target.is_some_and(|row| cursor.goto_line(buffer, row).is_ok());
            if !moved {
                model.show_error_then(
                    "Please enter a valid line number.",
                    Overlay::Prompt(Prompt::new(PromptKind::Goto)),
                );
            }
        }
    }
}

fn run_search(model: &mut Model, query: &str) {
    let matches = search::find_matches(model.session.buffer(), query);
    tracing::debug!(query, count = matches.len(), "search");
    let origin = model.session.cursor().position();
    match SearchResults::new(matches, origin) {
        Some(results) => {
            let first = results.current();
            let (buffer, cursor) = model.session.motion();
            cursor.set(buffer, first.col, first.line);
            model.overlay = Some(Overlay::Results(results));
        }
        None => model.show_notice(NoticeLevel::Error, "No matches were found."),
    }
}

fn step_results(model: &mut Model, step: fn(&mut SearchResults) -> search::Match) {
    let Some(Overlay::Results(results)) = &mut model.overlay else {
        return;
    };
    let target = step(results);
    let (buffer, cursor) = model.session.motion();
    cursor.set(buffer, target.col, target.line);
}

fn cancel_overlay(model: &mut Model) {
    match model.overlay.take() {
        Some(Overlay::Results(results)) => {
            let (x, y) = results.origin();
            let (buffer, cursor) = model.session.motion();
            cursor.set(buffer, x, y);
        }
        Some(Overlay::Notice(notice)) => model.overlay = notice.resume.map(|resume| *resume),
        // Yes/no questions must be answered.
        Some(confirm @ Overlay::Confirm(_)) => model.overlay = Some(confirm),
        Some(Overlay::Prompt(_)) | None => {}
    }
}
