//! Interactive terminal view of the current checklist.
//!
//! Pure display adapter: every keypress maps to cursor movement or to
//! exactly one `ChecklistStore::toggle` call; no checklist logic lives
//! here. Toggles are persisted to the session file on exit.

pub mod app;
mod ui;

use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::session::{self, Session};

use app::App;

/// Launch the interactive checklist view.
pub fn run_tui(session: Session) -> Result<()> {
    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&session);

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Persist toggles made during the view.
    if app.dirty {
        if let Some(checklist) = app.store.current() {
            let mut session = session;
            session.checklist = checklist.clone();
            session::save(&session)?;
        }
    }

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    app.should_quit = true;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    app.move_down();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    app.move_up();
                }
                KeyCode::Char(' ') => {
                    app.toggle_selected();
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
