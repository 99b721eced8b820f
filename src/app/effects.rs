use std::path::Path;

use crate::app::model::{Confirm, ConfirmKind, Effect, FollowUp, NoticeLevel, Overlay};
use crate::app::{App, Model};
use crate::editor::Buffer;
use crate::persist;

use super::update::{apply_follow_up, guard_unsaved};

const MISSING_FILE: &str = "Specified file does not exist. Operation cancelled.";

impl App {
    /// Carry out the file work requested by the last update.
    ///
    /// Effects can request further effects (a save followed by an open), so
    /// this runs until the model has nothing pending.
    pub(super) fn handle_effects(model: &mut Model) {
        while let Some(effect) = model.take_effect() {
            crate::perf::log_event("effect", format!("{effect:?}"));
            match effect {
                Effect::SaveAs { name, then } => save_as(model, &name, then),
                Effect::Write { path, then } => write_buffer(model, &path, then),
                Effect::Open(path) => {
                    if path.is_file() {
                        guard_unsaved(model, FollowUp::Open(path));
                    } else {
                        model.show_notice(NoticeLevel::Error, MISSING_FILE);
                    }
                }
                Effect::Load(path) => load_file(model, &path),
            }
        }
    }
}

fn save_as(model: &mut Model, name: &str, then: FollowUp) {
    let path = model.work_dir.join(name);
    if path.exists() {
        model.overlay = Some(Overlay::Confirm(Confirm::new(ConfirmKind::Overwrite {
            path,
            then,
        })));
    } else {
        write_buffer(model, &path, then);
    }
}

fn write_buffer(model: &mut Model, path: &Path, then: FollowUp) {
    let buffer = model.session.buffer();
    let name = path.file_name().map_or_else(
        || buffer.title().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    let dir = if path.is_dir() {
        path.to_path_buf()
    } else {
        model.work_dir.clone()
    };
    let fallback = persist::fallback_path(&dir, path, &name);
    let lines: Vec<&str> = buffer.lines().collect();

    match persist::save_with_fallback(path, &fallback, &lines) {
        Ok((written, size)) => {
            tracing::info!(path = %written.display(), size, "saved buffer");
            reload_saved(model, &written, then);
        }
        Err(err) => {
            tracing::warn!(%err, "save failed");
            model.show_notice(NoticeLevel::Error, format!("Could not save file: {err}"));
        }
    }
}

/// Re-read a file just written so title, size and lines match the disk.
fn reload_saved(model: &mut Model, path: &Path, then: FollowUp) {
    match Buffer::open(path) {
        Ok(Some(mut buffer)) => {
            buffer.mark_saved();
            model.session.reload_buffer(buffer);
            apply_follow_up(model, then);
        }
        Ok(None) => model.show_notice(NoticeLevel::Error, MISSING_FILE),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "reload after save failed");
            model.show_notice(NoticeLevel::Error, format!("Could not reload file: {err}"));
        }
    }
}

fn load_file(model: &mut Model, path: &Path) {
    match Buffer::open(path) {
        Ok(Some(buffer)) => {
            tracing::info!(path = %path.display(), "opened buffer");
            model.session.replace_buffer(buffer);
            model.viewport.reset();
            model.overlay = None;
        }
        Ok(None) => model.show_notice(NoticeLevel::Error, MISSING_FILE),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "open failed");
            model.show_notice(NoticeLevel::Error, format!("Could not open file: {err}"));
        }
    }
}
