use std::io::{self, Stdout};
use std::panic;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::PendingFetch;

mod app;
mod constants;
mod helpers;

use app::App;
use constants::TICK_RATE;

type Backend = CrosstermBackend<Stdout>;

pub fn run(config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let mut app = App::new(config.clone());
    match config.source().open() {
        Ok(source) => app.start_fetch(PendingFetch::spawn(runtime.handle(), source)),
        Err(err) => {
            warn!(error = %err, "could not open shipment source");
            app.resolve(Err(err), &chrono::Local::now());
        }
    }

    let result = {
        let mut session = TerminalSession::enter()?;
        let height = session.terminal.size().context("failed to measure terminal")?.height;
        app.measure(height);
        run_app(&mut session.terminal, &mut app)
    };

    if app.fetch_in_flight() {
        info!("abandoning shipment fetch still in flight");
    }
    runtime.shutdown_background();
    info!("dashboard closed");
    result
}

fn run_app(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        app.poll_fetch();
        app.settle_resize(Instant::now());
        terminal.draw(|f| app.draw(f))?;
        if app.should_quit() {
            break;
        }

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| std::time::Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Resize(_, rows) => app.on_resize(rows, Instant::now()),
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Raw mode plus the alternate screen; released when dropped. A panic restores
/// the terminal from the panic hook so its message lands on the main screen.
struct TerminalSession {
    terminal: Terminal<Backend>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        chain_panic_hook(restore_terminal);
        enable_raw_mode().context("failed to enable raw mode")?;
        match Self::open_terminal() {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(err)
            }
        }
    }

    fn open_terminal() -> Result<Terminal<Backend>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.hide_cursor().context("failed to hide cursor")?;
        Ok(terminal)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!(error = %err, "failed to disable raw mode");
        }
        if let Err(err) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!(error = %err, "failed to leave alternate screen");
        }
        if let Err(err) = self.terminal.show_cursor() {
            warn!(error = %err, "failed to show cursor");
        }
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Run `restore` before whatever panic hook is currently installed.
fn chain_panic_hook<R>(restore: R)
where
    R: Fn() + Send + Sync + 'static,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}
