use std::fs;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tempfile::tempdir;

use crate::editor::{Buffer, BufferState};
use crate::session::Session;

use super::{App, ConfirmKind, FollowUp, Message, Model, NoticeLevel, Overlay, PromptKind, update};

fn create_test_model(text: &str) -> Model {
    Model::new(Session::new(vec![Buffer::from_text(text)]), (80, 24))
}

fn create_model_in(dir: &Path) -> Model {
    Model::new(Session::default(), (80, 24)).with_work_dir(dir.to_path_buf())
}

fn key(code: KeyCode) -> event::KeyEvent {
    event::KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> event::KeyEvent {
    event::KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn alt(code: KeyCode) -> event::KeyEvent {
    event::KeyEvent::new(code, KeyModifiers::ALT)
}

/// Run one key through input mapping, update and effects, like the event loop.
fn press(model: Model, key: event::KeyEvent) -> Model {
    let Some(msg) = App::handle_key(key, &model) else {
        return model;
    };
    let mut model = update(model, msg);
    App::handle_effects(&mut model);
    model
}

fn type_text(model: Model, text: &str) -> Model {
    text.chars()
        .fold(model, |model, c| press(model, key(KeyCode::Char(c))))
}

fn raw_lines(model: &Model) -> Vec<String> {
    model.session.buffer().lines().map(str::to_owned).collect()
}

fn prompt_kind(model: &Model) -> Option<&PromptKind> {
    match &model.overlay {
        Some(Overlay::Prompt(prompt)) => Some(&prompt.kind),
        _ => None,
    }
}

fn confirm_kind(model: &Model) -> Option<&ConfirmKind> {
    match &model.overlay {
        Some(Overlay::Confirm(confirm)) => Some(&confirm.kind),
        _ => None,
    }
}

// --- Key mapping ---

#[test]
fn test_control_keys_map_to_commands() {
    let model = create_test_model("abc");
    let cases = [
        ('q', Message::Quit),
        ('x', Message::Save),
        ('d', Message::DeleteLine),
        ('o', Message::Open),
        ('n', Message::NewBuffer),
        ('f', Message::StartSearch),
        ('l', Message::StartGoto),
        ('c', Message::YankLine),
        ('v', Message::Paste),
    ];
    for (c, expected) in cases {
        assert_eq!(App::handle_key(ctrl(c), &model), Some(expected));
    }
}

#[test]
fn test_unbound_modified_keys_never_insert() {
    let model = create_test_model("abc");
    assert_eq!(App::handle_key(ctrl('z'), &model), None);
    assert_eq!(App::handle_key(alt(KeyCode::Char('m')), &model), None);
}

#[test]
fn test_ignored_keys() {
    let model = create_test_model("abc");
    for code in [
        KeyCode::Esc,
        KeyCode::Insert,
        KeyCode::Delete,
        KeyCode::PageUp,
        KeyCode::PageDown,
    ] {
        assert_eq!(App::handle_key(key(code), &model), None);
    }
}

#[test]
fn test_alt_arrows_switch_buffers() {
    let model = create_test_model("abc");
    assert_eq!(
        App::handle_key(alt(KeyCode::Right), &model),
        Some(Message::NextBuffer)
    );
    assert_eq!(
        App::handle_key(alt(KeyCode::Left), &model),
        Some(Message::PrevBuffer)
    );
}

#[test]
fn test_key_release_is_ignored() {
    let model = create_test_model("abc");
    let release = Event::Key(event::KeyEvent::new_with_kind(
        KeyCode::Char('a'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));
    assert_eq!(App::handle_event(&release, &model), None);
}

#[test]
fn test_resize_event_updates_viewport() {
    let model = create_test_model("abc");
    let msg = App::handle_event(&Event::Resize(100, 30), &model).unwrap();
    let model = update(model, msg);
    assert_eq!(model.viewport.width(), 100);
    assert_eq!(model.viewport.height(), 30);
}

// --- Editing ---

#[test]
fn test_typing_inserts_at_cursor() {
    let model = type_text(create_test_model(""), "ab");
    let model = press(model, key(KeyCode::Left));
    let model = type_text(model, "X");
    assert_eq!(raw_lines(&model), vec!["aXb"]);
    assert_eq!(model.session.cursor().position(), (2, 0));
    assert_eq!(model.session.buffer().state(), BufferState::Modified);
}

#[test]
fn test_tab_inserts_tab_character() {
    let model = press(create_test_model("x"), key(KeyCode::Tab));
    assert_eq!(raw_lines(&model), vec!["\tx"]);
}

#[test]
fn test_enter_splits_and_backspace_joins() {
    let model = create_test_model("hello");
    let model = press(model, key(KeyCode::Right));
    let model = press(model, key(KeyCode::Right));
    let model = press(model, key(KeyCode::Enter));
    assert_eq!(raw_lines(&model), vec!["he", "llo"]);
    assert_eq!(model.session.cursor().position(), (0, 1));

    let model = press(model, key(KeyCode::Backspace));
    assert_eq!(raw_lines(&model), vec!["hello"]);
    assert_eq!(model.session.cursor().position(), (2, 0));
}

#[test]
fn test_delete_line_keeps_one_line() {
    let model = create_test_model("only");
    let model = press(model, ctrl('d'));
    let model = press(model, ctrl('d'));
    assert_eq!(raw_lines(&model), vec![""]);
}

#[test]
fn test_home_and_end() {
    let model = create_test_model("hello");
    let model = press(model, key(KeyCode::End));
    assert_eq!(model.session.cursor().x(), 5);
    let model = press(model, key(KeyCode::Home));
    assert_eq!(model.session.cursor().x(), 0);
}

// --- Yank register ---

#[test]
fn test_copy_then_paste_inserts_line() {
    let model = create_test_model("first\nsecond");
    let model = press(model, ctrl('c'));
    let model = press(model, key(KeyCode::Down));
    let model = press(model, key(KeyCode::End));
    let model = press(model, ctrl('v'));
    assert_eq!(raw_lines(&model), vec!["first", "second", "first"]);
    assert_eq!(model.session.cursor().position(), (5, 2));
}

#[test]
fn test_paste_with_empty_register_shows_info() {
    let model = press(create_test_model("abc"), ctrl('v'));
    assert_eq!(
        model.active_notice(),
        Some((NoticeLevel::Info, "Clipboard is empty"))
    );
    let model = press(model, key(KeyCode::Enter));
    assert!(model.overlay.is_none());
    assert_eq!(raw_lines(&model), vec!["abc"]);
}

// --- Buffers ---

#[test]
fn test_switching_buffers_resets_cursor() {
    let session = Session::new(vec![
        Buffer::from_text("one\ntwo"),
        Buffer::from_text("three"),
    ]);
    let model = Model::new(session, (80, 24));
    let model = press(model, key(KeyCode::Down));
    let model = press(model, alt(KeyCode::Right));
    assert_eq!(model.session.current_index(), 1);
    assert_eq!(model.session.cursor().position(), (0, 0));
    let model = press(model, alt(KeyCode::Right));
    assert_eq!(model.session.current_index(), 0);
}

#[test]
fn test_load_session_turns_missing_files_into_new_buffers() {
    let dir = tempdir().unwrap();
    let existing = dir.path().join("a.txt");
    fs::write(&existing, "alpha").unwrap();
    let app = App::new(vec![existing, dir.path().join("missing.txt")]);

    let session = app.load_session().unwrap();
    assert_eq!(session.buffer_count(), 2);
    assert_eq!(session.buffer().title(), "a.txt");

    let mut session = session;
    session.next_buffer();
    assert_eq!(session.buffer().state(), BufferState::New);
    assert_eq!(session.buffer().title(), "Untitled");
}

#[test]
fn test_load_session_without_files_has_one_new_buffer() {
    let session = App::new(Vec::new()).load_session().unwrap();
    assert_eq!(session.buffer_count(), 1);
    assert_eq!(session.buffer().state(), BufferState::New);
}

// --- Save ---

#[test]
fn test_save_new_buffer_asks_for_name_and_writes() {
    let dir = tempdir().unwrap();
    let model = type_text(create_model_in(dir.path()), "hi");
    let model = press(model, ctrl('x'));
    assert_eq!(
        prompt_kind(&model),
        Some(&PromptKind::SaveAs(FollowUp::Stay))
    );

    let model = type_text(model, "notes.txt");
    let model = press(model, key(KeyCode::Enter));
    assert!(model.overlay.is_none());

    let path = dir.path().join("notes.txt");
    assert_eq!(fs::read_to_string(&path).unwrap(), "hi");
    let buffer = model.session.buffer();
    assert_eq!(buffer.title(), "notes.txt");
    assert_eq!(buffer.state(), BufferState::Saved);
    assert_eq!(buffer.size(), 2);
    assert_eq!(buffer.path(), Some(path.as_path()));
}

#[test]
fn test_save_opened_file_writes_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    fs::write(&path, "a\nb\n").unwrap();
    let buffer = Buffer::open(&path).unwrap().unwrap();
    let model = Model::new(Session::new(vec![buffer]), (80, 24));

    let model = type_text(model, "x");
    let model = press(model, ctrl('x'));
    assert!(model.overlay.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), "xa\nb");
    assert_eq!(model.session.buffer().state(), BufferState::Saved);
    assert_eq!(model.session.buffer().size(), 4);
}

#[test]
fn test_save_with_invalid_name_reprompts() {
    let dir = tempdir().unwrap();
    let model = press(create_model_in(dir.path()), ctrl('x'));
    let model = press(model, key(KeyCode::Enter));
    assert_eq!(
        model.active_notice(),
        Some((NoticeLevel::Error, "File name cannot be empty"))
    );

    let model = press(model, key(KeyCode::Enter));
    assert_eq!(
        prompt_kind(&model),
        Some(&PromptKind::SaveAs(FollowUp::Stay))
    );
}

#[test]
fn test_save_over_existing_file_asks_first() {
    let dir = tempdir().unwrap();
    let taken = dir.path().join("taken.txt");
    fs::write(&taken, "old").unwrap();

    let model = type_text(create_model_in(dir.path()), "new");
    let model = press(model, ctrl('x'));
    let model = type_text(model, "taken.txt");
    let model = press(model, key(KeyCode::Enter));
    assert!(matches!(
        confirm_kind(&model),
        Some(ConfirmKind::Overwrite { .. })
    ));

    // "no" goes back to the name prompt and leaves the file alone
    let model = type_text(model, "n");
    let model = press(model, key(KeyCode::Enter));
    assert_eq!(
        prompt_kind(&model),
        Some(&PromptKind::SaveAs(FollowUp::Stay))
    );
    assert_eq!(fs::read_to_string(&taken).unwrap(), "old");

    let model = type_text(model, "taken.txt");
    let model = press(model, key(KeyCode::Enter));
    let model = type_text(model, "y");
    let model = press(model, key(KeyCode::Enter));
    assert!(model.overlay.is_none());
    assert_eq!(fs::read_to_string(&taken).unwrap(), "new");
}

#[test]
fn test_confirm_needs_an_answer_before_enter() {
    let model = type_text(create_test_model("abc"), "x");
    let model = press(model, ctrl('q'));
    let model = press(model, key(KeyCode::Enter));
    assert!(confirm_kind(&model).is_some());
    let model = press(model, key(KeyCode::Esc));
    assert!(confirm_kind(&model).is_some());
    assert!(!model.should_quit);
}

#[test]
fn test_confirm_backspace_clears_answer() {
    let model = type_text(create_test_model("abc"), "x");
    let model = press(model, ctrl('q'));
    let model = type_text(model, "y");
    let model = press(model, key(KeyCode::Backspace));
    let model = type_text(model, "n");
    let model = press(model, key(KeyCode::Enter));
    assert!(model.should_quit);
}

// --- Quit ---

#[test]
fn test_quit_clean_buffer_exits() {
    let model = press(create_test_model("abc"), ctrl('q'));
    assert!(model.should_quit);
}

#[test]
fn test_quit_with_changes_asks_to_save() {
    let model = type_text(create_test_model("abc"), "x");
    let model = press(model, ctrl('q'));
    assert_eq!(
        confirm_kind(&model),
        Some(&ConfirmKind::SaveChanges(FollowUp::Quit))
    );
    assert!(!model.should_quit);
}

#[test]
fn test_quit_new_buffer_with_save_then_exits() {
    let dir = tempdir().unwrap();
    let model = type_text(create_model_in(dir.path()), "draft");
    let model = press(model, ctrl('q'));
    let model = type_text(model, "y");
    let model = press(model, key(KeyCode::Enter));
    assert_eq!(
        prompt_kind(&model),
        Some(&PromptKind::SaveAs(FollowUp::Quit))
    );

    let model = type_text(model, "draft.txt");
    let model = press(model, key(KeyCode::Enter));
    assert!(model.should_quit);
    assert_eq!(
        fs::read_to_string(dir.path().join("draft.txt")).unwrap(),
        "draft"
    );
}

#[test]
fn test_quit_without_confirmation() {
    let model = type_text(create_test_model("abc"), "x").with_confirm_quit(false);
    let model = press(model, ctrl('q'));
    assert!(model.should_quit);
}

// --- Open / new ---

#[test]
fn test_open_missing_file_reports_error() {
    let dir = tempdir().unwrap();
    let model = press(create_model_in(dir.path()), ctrl('o'));
    assert_eq!(prompt_kind(&model), Some(&PromptKind::Open));
    let model = type_text(model, "nope.txt");
    let model = press(model, key(KeyCode::Enter));
    assert_eq!(
        model.active_notice(),
        Some((
            NoticeLevel::Error,
            "Specified file does not exist. Operation cancelled."
        ))
    );
    assert_eq!(model.session.buffer().state(), BufferState::New);
}

#[test]
fn test_open_existing_file_replaces_buffer() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("other.txt"), "one\ntwo").unwrap();
    let model = Model::new(Session::new(vec![Buffer::from_text("abc")]), (80, 24))
        .with_work_dir(dir.path().to_path_buf());
    let model = press(model, key(KeyCode::End));

    let model = press(model, ctrl('o'));
    let model = type_text(model, "other.txt");
    let model = press(model, key(KeyCode::Enter));
    assert!(model.overlay.is_none());
    assert_eq!(raw_lines(&model), vec!["one", "two"]);
    assert_eq!(model.session.buffer().title(), "other.txt");
    assert_eq!(model.session.buffer().state(), BufferState::Opened);
    assert_eq!(model.session.cursor().position(), (0, 0));
}

#[test]
fn test_open_with_unsaved_changes_can_discard() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("other.txt"), "loaded").unwrap();
    let model = type_text(create_model_in(dir.path()), "scratch");

    let model = press(model, ctrl('o'));
    let model = type_text(model, "other.txt");
    let model = press(model, key(KeyCode::Enter));
    assert_eq!(
        confirm_kind(&model),
        Some(&ConfirmKind::SaveChanges(FollowUp::Open(
            dir.path().join("other.txt")
        )))
    );

    let model = type_text(model, "n");
    let model = press(model, key(KeyCode::Enter));
    assert_eq!(raw_lines(&model), vec!["loaded"]);
}

#[test]
fn test_new_buffer_replaces_clean_buffer() {
    let model = press(create_test_model("abc"), ctrl('n'));
    assert_eq!(model.session.buffer().state(), BufferState::New);
    assert_eq!(raw_lines(&model), vec![""]);
}

#[test]
fn test_cancel_prompt_changes_nothing() {
    let model = press(create_test_model("abc"), ctrl('o'));
    let model = type_text(model, "x");
    let model = press(model, key(KeyCode::Esc));
    assert!(model.overlay.is_none());
    assert_eq!(raw_lines(&model), vec!["abc"]);
    assert!(model.pending_effect().is_none());
}

#[test]
fn test_prompt_ignores_control_keys() {
    let model = press(create_test_model("abc"), ctrl('f'));
    let model = press(model, ctrl('q'));
    assert!(!model.should_quit);
    assert_eq!(prompt_kind(&model), Some(&PromptKind::Search));
}

// --- Search ---

fn search(model: Model, query: &str) -> Model {
    let model = press(model, ctrl('f'));
    let model = type_text(model, query);
    press(model, key(KeyCode::Enter))
}

#[test]
fn test_search_jumps_to_first_match_and_cycles() {
    let model = create_test_model("alpha\nbeta alpha\ngamma");
    let model = search(model, "ALPHA");
    assert!(matches!(model.overlay, Some(Overlay::Results(_))));
    assert_eq!(model.session.cursor().position(), (0, 0));

    let model = press(model, key(KeyCode::Char('n')));
    assert_eq!(model.session.cursor().position(), (5, 1));
    let model = press(model, key(KeyCode::Char('n')));
    assert_eq!(model.session.cursor().position(), (0, 0));
    let model = press(model, key(KeyCode::Char('b')));
    assert_eq!(model.session.cursor().position(), (5, 1));
}

#[test]
fn test_search_enter_keeps_position() {
    let model = search(create_test_model("alpha\nbeta alpha"), "alpha");
    let model = press(model, key(KeyCode::Char('n')));
    let model = press(model, key(KeyCode::Enter));
    assert!(model.overlay.is_none());
    assert_eq!(model.session.cursor().position(), (5, 1));
}

#[test]
fn test_search_escape_restores_position() {
    let model = create_test_model("alpha\nbeta alpha\ngamma");
    let model = press(model, key(KeyCode::Down));
    let model = press(model, key(KeyCode::Down));
    let model = press(model, key(KeyCode::End));
    let model = search(model, "alpha");
    assert_eq!(model.session.cursor().position(), (0, 0));
    let model = press(model, key(KeyCode::Esc));
    assert!(model.overlay.is_none());
    assert_eq!(model.session.cursor().position(), (5, 2));
}

#[test]
fn test_search_without_matches_reports_error() {
    let model = search(create_test_model("alpha"), "zzz");
    assert_eq!(
        model.active_notice(),
        Some((NoticeLevel::Error, "No matches were found."))
    );
}

// --- Goto ---

#[test]
fn test_goto_line_moves_cursor() {
    let model = create_test_model("abcdef\nab\nabcd");
    let model = press(model, key(KeyCode::End));
    let model = press(model, ctrl('l'));
    let model = type_text(model, "3");
    let model = press(model, key(KeyCode::Enter));
    assert!(model.overlay.is_none());
    assert_eq!(model.session.cursor().position(), (4, 2));
}

#[test]
fn test_goto_invalid_line_reprompts() {
    for input in ["0", "4", "x", ""] {
        let model = press(create_test_model("a\nb\nc"), ctrl('l'));
        let model = type_text(model, input);
        let model = press(model, key(KeyCode::Enter));
        assert_eq!(
            model.active_notice(),
            Some((NoticeLevel::Error, "Please enter a valid line number."))
        );
        let model = press(model, key(KeyCode::Enter));
        assert_eq!(prompt_kind(&model), Some(&PromptKind::Goto));
        assert_eq!(model.session.cursor().position(), (0, 0));
    }
}
