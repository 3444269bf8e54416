pub mod card;
pub mod events;
pub mod state;
pub mod ui;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::api::MailBackend;
use crate::terminal::state::{AppState, Section};

pub fn run_tui(mut state: AppState, backend: &dyn MailBackend, start: Section) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("{e}"))?;

    let terminal = ratatui::init();
    state.navigate(start, backend);
    let result = run(terminal, &mut state, backend);

    // unmount the current page even if the loop errored
    let closed = state.shutdown(backend);
    ratatui::restore();

    result.and(closed)
}

fn run(mut terminal: DefaultTerminal, state: &mut AppState, backend: &dyn MailBackend) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, state))?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if events::handle_key(key, state, backend)? {
                return Ok(());
            }
        }
    }
}
