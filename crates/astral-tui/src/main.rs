//! Astral Pips - the trading academy landing page in a terminal.
//!
//! Runs the interactive landing page by default. `--sign-in` and
//! `--sign-up` run a single authentication against the configured
//! identity provider and print the resulting identity as JSON.

mod app;
mod ui;

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use astral_core::{AuthStore, Config, GoTrueClient};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written while the terminal UI owns the screen
const LOG_FILE_NAME: &str = "astral-pips.log";

const USAGE: &str = "\
Usage: astral-pips [--sign-in | --sign-up | --help]

  (no flag)   open the interactive landing page
  --sign-in   sign in once and print the identity as JSON
  --sign-up   create an account and print the identity as JSON

Configuration: SUPABASE_URL and SUPABASE_ANON_KEY (environment or .env),
or ~/.config/astral-pips/config.json. RUST_LOG controls log verbosity.";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to a file so events never draw over the terminal UI
fn init_file_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .with_context(|| format!("Failed to open log file in {}", log_dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Ok(guard)
}

fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

#[derive(Clone, Copy)]
enum AuthCommand {
    SignIn,
    SignUp,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--sign-in") => return run_auth_command(AuthCommand::SignIn).await,
        Some("--sign-up") => return run_auth_command(AuthCommand::SignUp).await,
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown argument: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
        None => {}
    }

    // Initialize logging; the UI still runs if the log file can't be opened
    let _log_guard = match Config::log_dir().and_then(|dir| init_file_tracing(&dir)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {:#}", e);
            None
        }
    };
    info!("Astral Pips starting");

    // Build the app before touching the terminal so config errors print normally
    let config = Config::load()?;
    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Astral Pips shutting down");
    Ok(())
}

/// Authenticate once from the command line and print the identity
async fn run_auth_command(command: AuthCommand) -> Result<()> {
    init_stderr_tracing();

    let config = Config::load()?;
    let (url, key) = config.identity_endpoint()?;
    let store = AuthStore::new(Arc::new(GoTrueClient::new(url, key)?));

    print!("Email: ");
    io::stdout().flush()?;
    let mut email = String::new();
    io::stdin().read_line(&mut email)?;
    let email = email.trim();

    let password = rpassword::prompt_password("Password: ")?;

    let identity = match command {
        AuthCommand::SignIn => store.sign_in(email, &password).await,
        AuthCommand::SignUp => store.sign_up(email, &password).await,
    }?;

    println!("{}", serde_json::to_string_pretty(&identity)?);
    if matches!(command, AuthCommand::SignUp) && !identity.is_confirmed() {
        eprintln!("Check {} to confirm the account.", email);
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so the fact rotation keeps ticking
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Pick up session changes and rotate facts
        app.on_tick();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
