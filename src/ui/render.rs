use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, Overlay};
use crate::editor::Buffer;

use super::CONTENT_TOP_PADDING;
use super::status;
use super::viewport::Viewport;

/// The visible slice of each content row, top to bottom.
///
/// Rows past the end of the buffer, and rows whose rendered content ends
/// before the horizontal offset, come back empty.
pub fn visible_rows(buffer: &Buffer, viewport: &Viewport) -> Vec<String> {
    let width = viewport.width() as usize;
    (0..viewport.content_rows())
        .map(|row| {
            buffer
                .get_rendered(row + viewport.offset_y())
                .map(|rendered| {
                    rendered
                        .chars()
                        .skip(viewport.offset_x())
                        .take(width)
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect()
}

/// Render the complete UI.
///
/// Recomputes the cursor's screen column and scrolls the viewport before
/// drawing, so the cursor is always visible in the frame.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    model.viewport.resize(area.width, area.height);

    let (buffer, cursor) = model.session.motion();
    let screen_col = cursor.refresh_screen_col(buffer);
    let row = cursor.y();
    model.viewport.follow(row, screen_col);

    if area.height == 0 {
        return;
    }

    let top = Rect { height: 1, ..area };
    status::render_status_line(frame, top, status::top_status(&model.session));

    let content = Rect {
        y: area.y + CONTENT_TOP_PADDING,
        height: u16::try_from(model.viewport.content_rows()).unwrap_or(u16::MAX),
        ..area
    };
    render_content(model, frame, content);

    if area.height < 2 {
        return;
    }
    let bottom = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    let bar_cursor = match &model.overlay {
        None => {
            status::render_status_line(frame, bottom, status::bottom_status(model.session.buffer()));
            None
        }
        Some(overlay) => status::render_overlay_bar(overlay, frame, bottom),
    };

    match (&model.overlay, bar_cursor) {
        (_, Some(col)) => {
            frame.set_cursor_position((area.x + clamp_u16(col), bottom.y));
        }
        (None | Some(Overlay::Results(_)), None) => {
            let x = screen_col.saturating_sub(model.viewport.offset_x());
            let y = row.saturating_sub(model.viewport.offset_y());
            frame.set_cursor_position((area.x + clamp_u16(x), content.y + clamp_u16(y)));
        }
        // Notices hide the cursor.
        (Some(_), None) => {}
    }
}

fn render_content(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let lines: Vec<Line> = visible_rows(model.session.buffer(), &model.viewport)
        .into_iter()
        .map(Line::raw)
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
