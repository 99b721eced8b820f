use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{NoticeLevel, Overlay};
use crate::editor::{Buffer, BufferState};
use crate::persist::MAX_NAME_LEN;
use crate::session::Session;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR")
);

pub const fn state_label(state: BufferState) -> &'static str {
    match state {
        BufferState::New => "(new)",
        BufferState::Opened => "",
        BufferState::Modified => "(modified)",
        BufferState::Saved => "(saved to disk)",
    }
}

pub fn size_label(size: u64) -> String {
    let unit = if size == 1 { "Byte" } else { "Bytes" };
    format!("FileSize: {size} {unit}")
}

/// Left and right text of the top status line.
pub fn top_status(session: &Session) -> (String, String) {
    let mut left = format!("Centi Text Editor {VERSION}");
    if session.buffer_count() > 1 {
        left.push_str(&format!(
            " [{}/{}]",
            session.current_index() + 1,
            session.buffer_count()
        ));
    }
    let cursor = session.cursor();
    let lines = session.buffer().line_count();
    let percent = (cursor.y() + 1) * 100 / lines.max(1);
    let right = format!(
        "col: {} / row: {} / {percent}%",
        cursor.x() + 1,
        cursor.y() + 1
    );
    (left, right)
}

/// Left and right text of the bottom status line.
pub fn bottom_status(buffer: &Buffer) -> (String, String) {
    (
        format!("{} {}", buffer.title(), state_label(buffer.state())),
        size_label(buffer.size()),
    )
}

/// Lay out a status line exactly `width` characters wide.
///
/// The left text gets one leading space and the right text one trailing
/// space. The right text is drawn last, so it wins where the two overlap.
pub fn compose_status(left: &str, right: &str, width: usize) -> String {
    let mut cells = vec![' '; width];
    let left = std::iter::once(' ').chain(left.chars());
    for (cell, ch) in cells.iter_mut().zip(left) {
        *cell = ch;
    }
    let right: Vec<char> = right.chars().chain(std::iter::once(' ')).collect();
    let start = width.saturating_sub(right.len());
    for (cell, ch) in cells[start..].iter_mut().zip(right) {
        *cell = ch;
    }
    cells.into_iter().collect()
}

/// Text of an input prompt and the column of its input cursor.
///
/// The prompt reads `label (n/255 chars) > ` followed by the input. When the
/// input does not fit, it scrolls so the cursor stays on the last column.
pub fn prompt_line(label: &str, input: &str, cursor: usize, width: usize) -> (String, usize) {
    let prefix: String = format!(
        "{label} ({}/{MAX_NAME_LEN} chars) > ",
        input.chars().count()
    )
    .chars()
    .take(width)
    .collect();
    let prefix_len = prefix.chars().count();
    let edge = width.saturating_sub(1);
    let offset = (prefix_len + cursor).saturating_sub(edge);
    let room = edge.saturating_sub(prefix_len);

    let mut line = prefix;
    line.extend(input.chars().skip(offset).take(room));
    (line, prefix_len + cursor - offset)
}

/// Text shown in the bottom bar for a notice.
pub fn notice_text(level: NoticeLevel, text: &str) -> String {
    match level {
        NoticeLevel::Normal => format!("{text} -- PRESS ENTER TO DISMISS"),
        NoticeLevel::Info => format!("INFO: {text} -- PRESS ENTER TO DISMISS"),
        NoticeLevel::Error => format!("ERROR: {text} -- PRESS ENTER TO DISMISS"),
    }
}

/// Text, style and input cursor column of the bar drawn for `overlay`.
///
/// The cursor column is `None` when the cursor stays in the buffer.
pub fn overlay_bar(overlay: &Overlay, width: usize) -> (String, Style, Option<usize>) {
    let normal = Style::default().bg(Color::LightBlue).fg(Color::White);
    let (text, cursor) = match overlay {
        Overlay::Prompt(prompt) => {
            let (line, col) =
                prompt_line(prompt.kind.label(), prompt.input(), prompt.cursor(), width);
            (line, Some(col))
        }
        Overlay::Confirm(confirm) => {
            let mut line = format!("{} (y/n) ", confirm.kind.label());
            line.extend(confirm.answer);
            let line: String = line.chars().take(width).collect();
            let col = line.chars().count().min(width.saturating_sub(1));
            (line, Some(col))
        }
        Overlay::Notice(notice) => {
            let style = if notice.level == NoticeLevel::Error {
                Style::default().bg(Color::LightRed).fg(Color::White)
            } else {
                normal
            };
            let line = notice_text(notice.level, &notice.text);
            return (line.chars().take(width).collect(), style, None);
        }
        Overlay::Results(results) => {
            let (index, total) = results.progress();
            (format!("Results: ({index}/{total})"), None)
        }
    };
    (text.chars().take(width).collect(), normal, cursor)
}

fn status_style() -> Style {
    Style::default().bg(Color::Gray).fg(Color::Black)
}

pub fn render_status_line(frame: &mut Frame, area: Rect, (left, right): (String, String)) {
    let line = compose_status(&left, &right, area.width as usize);
    frame.render_widget(Paragraph::new(line).style(status_style()), area);
}

/// Draw the prompt/notice bar and return the input cursor column, if any.
pub fn render_overlay_bar(overlay: &Overlay, frame: &mut Frame, area: Rect) -> Option<usize> {
    let (text, style, cursor) = overlay_bar(overlay, area.width as usize);
    frame.render_widget(Paragraph::new(text).style(style), area);
    cursor
}
