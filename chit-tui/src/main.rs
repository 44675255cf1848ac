//! CHIT Desk — terminal dashboard for the AZ.Cash mock CHIT marketplace.
//!
//! Layout:
//! - Sidebar: market summary, action triggers, pricing, live balances
//! - Dashboard: header, stat cards, sparklines, Trades/Listed/Pending table
//! - Action modal: input → processing → result

mod app;
mod input;
mod mock_market;
mod panels;
mod theme;
mod ui;
mod worker;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use chit_core::{Ledger, LedgerConfig};

use crate::app::AppState;
use crate::worker::WorkerCommand;

const CONFIG_ENV: &str = "CHIT_DESK_CONFIG";

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // The terminal is in raw mode, so logs go to a file.
    let log_path = data_dir().join("chit-desk.log");
    let logging = init_logging(&log_path);

    let (config, config_source) = load_config()?;
    tracing::info!(
        source = %config_source,
        operator = %config.operator,
        delay_ms = config.processing_delay_ms,
        "starting chit-desk"
    );

    // Timer channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx)
        .context("failed to spawn settlement timer")?;

    let mut app = AppState::new(Ledger::new(config), cmd_tx.clone(), resp_rx);
    if let Err(e) = logging {
        app.set_warning(format!("Logging disabled: {e:#}"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Shutdown timer
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(records = app.ledger.log().len(), "chit-desk exited");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        let frame = terminal.draw(|f| ui::draw(f, app))?;
        app.viewport_width = frame.area.width;

        // 2. Drain timer responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Resize(width, _) => app.viewport_width = width,
                _ => {}
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chit-desk")
}

/// Route `tracing` to a log file, filtered by `RUST_LOG`.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("opening {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chit_core=info,chit_desk=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

/// `$CHIT_DESK_CONFIG`, else `<config_dir>/chit-desk/config.toml` if present,
/// else defaults.
fn load_config() -> Result<(LedgerConfig, String)> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        let config = LedgerConfig::load(&path)
            .with_context(|| format!("loading config from ${CONFIG_ENV}"))?;
        return Ok((config, path.display().to_string()));
    }

    if let Some(dir) = dirs::config_dir() {
        let path = dir.join("chit-desk").join("config.toml");
        if path.exists() {
            let config = LedgerConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            return Ok((config, path.display().to_string()));
        }
    }

    Ok((LedgerConfig::default(), "defaults".to_string()))
}
