//! Vacancy Dash - terminal dashboard for job vacancy CSV exports.
//!
//! Loads a vacancy listing, then lets the user filter, sort and inspect it
//! from a full-screen terminal interface.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use tracing::{error, info};

use vacancy_dash::application::App;
use vacancy_dash::infrastructure::{logging, Config, CsvLoader};
use vacancy_dash::presentation::{render_ui, DashboardLayout, InputHandler};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(
    name = "vacancy-dash",
    about = "Filter, sort and inspect job vacancy CSV exports in the terminal",
    version
)]
struct Cli {
    /// CSV file to load on startup
    file: Option<PathBuf>,
    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured log level or filter directive
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    let log_path = logging::init(&config.logging).context("failed to initialise logging")?;
    info!(log = %log_path.display(), "vacancy-dash starting");

    let loader = CsvLoader::new();
    let mut app = App::with_config(&config);
    if let Some(path) = cli.file {
        if let Some(request) = app.begin_load(path) {
            loader.submit(request);
        }
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &loader);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "dashboard terminated with an error");
        return Err(err).context("terminal I/O failed");
    }

    info!("vacancy-dash exiting");
    Ok(())
}

/// Main event loop.
///
/// Applies finished loads, redraws, then waits briefly for terminal input so
/// background loads are picked up without a keypress.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, loader: &CsvLoader) -> io::Result<()> {
    loop {
        while let Some(outcome) = loader.try_recv() {
            app.finish_load(outcome);
        }

        terminal.draw(|f| {
            let layout = DashboardLayout::compute(f.area(), app.has_data());
            app.update_viewport_size(layout.table_body_rows());
            render_ui(f, app);
        })?;

        if app.should_quit {
            return Ok(());
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                InputHandler::handle_key_event(app, loader, key.code, key.modifiers);
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                InputHandler::handle_mouse_event(app, mouse, area);
            }
            _ => {}
        }
    }
}
