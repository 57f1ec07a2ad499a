//! Interactive TUI for parkctl.
//!
//! Grid and table layouts over the live spot list, with a reservation
//! form overlay. A 1 second draw tick keeps the per-spot countdowns
//! current; the spot list itself arrives as snapshots from the feed
//! task.

mod app;
mod input;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::context::AppContext;
use crate::core::feed::SpotFeed;
use app::TuiApp;

/// Countdown redraw cadence while the TUI is open.
const TICK: Duration = Duration::from_millis(1000);

/// Run the TUI against the configured backend.
pub async fn run(ctx: AppContext) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (tx, rx) = mpsc::channel(16);
    let feed = SpotFeed::start(ctx.backend.clone(), ctx.config.refresh, tx);

    let user_name = ctx
        .sessions
        .load()
        .ok()
        .flatten()
        .map(|session| session.user.name);

    let mut app = TuiApp::new(ctx.backend.clone(), feed, rx, user_name, ctx.config.demo);
    let result = run_app(&mut terminal, &mut app).await;

    app.stop_feed();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> Result<()> {
    loop {
        app.drain_events();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Wake up at least once per tick so countdowns stay live even
        // with no input and no new snapshot.
        if event::poll(TICK)? {
            let event = event::read()?;

            if app.form.is_some() {
                if let event::Event::Key(key) = event {
                    if let Some(form_key) = input::handle_form_key(key) {
                        app.handle_form_key(form_key).await;
                    }
                }
            } else if let Some(action) = input::handle_event(event) {
                app.handle_action(action).await;
            }
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
