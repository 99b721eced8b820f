use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::model::Overlay;
use crate::app::{App, Message, Model};

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::handle_key(*key, model),
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    /// Map a key press to a message; an active overlay owns all input.
    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match &model.overlay {
            None => editing_key(key),
            Some(Overlay::Prompt(_)) => prompt_key(key),
            Some(Overlay::Confirm(_)) => confirm_key(key),
            Some(Overlay::Notice(_)) => match key.code {
                KeyCode::Enter => Some(Message::OverlaySubmit),
                KeyCode::Esc => Some(Message::OverlayCancel),
                _ => None,
            },
            Some(Overlay::Results(_)) => match key.code {
                KeyCode::Char('n' | 'N') => Some(Message::SearchNext),
                KeyCode::Char('b' | 'B') => Some(Message::SearchPrev),
                KeyCode::Enter => Some(Message::OverlaySubmit),
                KeyCode::Esc => Some(Message::OverlayCancel),
                _ => None,
            },
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

fn editing_key(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        return match c.to_ascii_lowercase() {
            'q' => Some(Message::Quit),
            'x' => Some(Message::Save),
            'd' => Some(Message::DeleteLine),
            'o' => Some(Message::Open),
            'n' => Some(Message::NewBuffer),
            'f' => Some(Message::StartSearch),
            'l' => Some(Message::StartGoto),
            'c' => Some(Message::YankLine),
            'v' => Some(Message::Paste),
            _ => None,
        };
    }

    // Alt never inserts text.
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Left => Some(Message::PrevBuffer),
            KeyCode::Right => Some(Message::NextBuffer),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Left => Some(Message::CursorLeft),
        KeyCode::Right => Some(Message::CursorRight),
        KeyCode::Up => Some(Message::CursorUp),
        KeyCode::Down => Some(Message::CursorDown),
        KeyCode::Home => Some(Message::CursorHome),
        KeyCode::End => Some(Message::CursorEnd),
        KeyCode::Backspace => Some(Message::DeleteBack),
        KeyCode::Enter => Some(Message::SplitLine),
        KeyCode::Tab => Some(Message::InsertChar('\t')),
        KeyCode::Char(c) => Some(Message::InsertChar(c)),
        _ => None,
    }
}

const fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL.union(KeyModifiers::ALT))
}

fn prompt_key(key: KeyEvent) -> Option<Message> {
    if has_command_modifier(&key) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(Message::OverlayChar(c)),
        KeyCode::Left => Some(Message::OverlayLeft),
        KeyCode::Right => Some(Message::OverlayRight),
        KeyCode::Backspace => Some(Message::OverlayBackspace),
        KeyCode::Enter => Some(Message::OverlaySubmit),
        KeyCode::Esc => Some(Message::OverlayCancel),
        _ => None,
    }
}

fn confirm_key(key: KeyEvent) -> Option<Message> {
    if has_command_modifier(&key) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(Message::OverlayChar(c)),
        KeyCode::Backspace => Some(Message::OverlayBackspace),
        KeyCode::Enter => Some(Message::OverlaySubmit),
        _ => None,
    }
}
