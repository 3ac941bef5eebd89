//! ipweather - current weather for the machine's IP location
//!
//! # Usage
//!
//! ```sh
//! OPENWEATHER_API_KEY=... ipweather
//! ipweather --api-key ... --fahrenheit --refresh-secs 600 --log-file /tmp/ipweather.log
//! ```

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;

use ipweather::api::WeatherApi;
use ipweather::app::run_app;
use ipweather::config::Config;
use ipweather::orchestrator::Orchestrator;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::parse();

    // The terminal belongs to the UI, so logs only go to a file
    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }

    let api = WeatherApi::new(&config).map_err(io::Error::other)?;
    let orchestrator = Orchestrator::new(api);

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("ipweather started");
    let result = run_app(&mut terminal, orchestrator, &config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "ipweather exited with error");
    }
    result
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
