//! Outlet Form - terminal form driven by a JSON schema
//!
//! Renders the fields a schema describes, evaluates their visibility
//! conditions as values change, and hands the collected values to the
//! configured submit target.

mod app;
mod config;
mod platform;
mod schema;
mod state;
mod submit;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::{Cli, FormConfig, Settings};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use schema::Schema;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    let config = FormConfig::load().context("failed to read config file")?;
    let settings = Settings::resolve(cli, config)?;

    if let Some(path) = &settings.log_file {
        init_logging(path)?;
    }
    tracing::info!("Starting with schema {}", settings.schema_path.display());

    let handler = submit::handler_for(settings.output, settings.output_path.as_deref())?;
    let mut app = App::new(&settings.title, handler, settings.keep_open);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Exited with error: {err:#}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    app.finish()
}

/// Send tracing output to a file so it never draws over the form
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outlet_form=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Read the schema; failures stay on screen as an error dialog
fn load_schema(app: &mut App, settings: &Settings) {
    let path = &settings.schema_path;
    let loaded = if settings.strict {
        Schema::load_strict(path)
    } else {
        Schema::load(path)
    };

    match loaded {
        Ok(schema) => {
            for issue in schema.validate() {
                tracing::warn!("Schema issue: {issue}");
            }
            app.load_schema(schema);
        }
        Err(err) => {
            tracing::error!("Failed to load schema {}: {err}", path.display());
            app.push_error(format!("Failed to load {}: {err}", path.display()));
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    settings: &Settings,
) -> Result<()> {
    // Show the loading placeholder while the schema is read
    terminal.draw(|frame| ui::draw(frame, app))?;
    load_schema(app, settings);

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }
                app.handle_key(key);
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
