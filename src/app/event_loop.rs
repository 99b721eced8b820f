use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, update};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, the terminal cannot be
    /// initialized, or reading input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let read_scope = crate::perf::scope("app.load_session");
        let session = self.load_session()?;
        drop(read_scope);
        let work_dir = std::env::current_dir().context("Failed to read the current directory")?;

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: centi requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);
        crate::perf::log_event(
            "init.layout",
            format!("terminal={}x{}", size.width, size.height),
        );

        let mut model = Model::new(session, (size.width, size.height))
            .with_work_dir(work_dir)
            .with_confirm_quit(self.confirm_quit);

        let result = Self::event_loop(&mut terminal, &mut model);

        ratatui::restore();

        result
    }

    /// Draw, block for one event, apply it, repeat.
    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut frame_idx: u64 = 0;

        loop {
            frame_idx += 1;
            let draw_start = Instant::now();
            terminal.draw(|frame| Self::view(model, frame))?;
            crate::perf::log_event(
                "frame.draw",
                format!(
                    "frame={} draw_ms={:.3} offset={},{}",
                    frame_idx,
                    draw_start.elapsed().as_secs_f64() * 1000.0,
                    model.viewport.offset_x(),
                    model.viewport.offset_y()
                ),
            );

            let Some(msg) = Self::handle_event(&event::read()?, model) else {
                continue;
            };
            crate::perf::log_event("event.message", format!("frame={frame_idx} msg={msg:?}"));
            *model = update(std::mem::take(model), msg);
            Self::handle_effects(model);

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
