use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::journal::{DraftStore, JournalBoard};
use crate::perf::EVENT_TARGET;

const TICK: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// Returns the drafts recorded during the session.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<DraftStore> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - reverie requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let board = JournalBoard::with_samples();
        let mut model = Model::new(board, self.input_mode, (size.width, size.height));
        model.toolbar_visible = self.toolbar_visible;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        if let Some(entry) = self.entry.clone() {
            model = update(model, Message::SelectEntry(entry));
        }
        tracing::debug!(
            target: EVENT_TARGET,
            width = size.width,
            height = size.height,
            toolbar = model.toolbar_visible,
            input_mode = ?model.input_mode,
            entry = model.surface.entry_id(),
            "session started"
        );

        let result = execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)
            .context("Failed to enable mouse capture")
            .and_then(|()| self.event_loop(&mut terminal, &mut model));

        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result.map(|()| model.board.drafts)
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if needs_render {
                frame_idx += 1;
                let draw_scope = crate::perf::scope("frame.draw");
                terminal.draw(|frame| Self::view(model, frame))?;
                drop(draw_scope);
                needs_render = false;
            }

            if !event::poll(TICK)? {
                let had_toast = model.has_toast();
                *model = update(std::mem::take(model), Message::Tick);
                needs_render = had_toast && !model.has_toast();
                continue;
            }

            // Coalesce key repeat bursts into a single render.
            loop {
                let event = event::read()?;
                if let Some(msg) = self.handle_event(&event, model) {
                    tracing::debug!(target: EVENT_TARGET, frame = frame_idx, ?msg, "message");
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
