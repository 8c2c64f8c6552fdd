//! Clarify TUI Entry Point
//!
//! Launches the terminal UI for Clarify.
//!
//! Usage:
//!   clarify [OPTIONS] [TEXT]
//!
//! The API key is read from `CLARIFY_API_KEY` (or `GEMINI_API_KEY`), or
//! from `api_key` in the `[backend]` section of the config file.

use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use clarify_conductor::{
    default_config_path, load_config_from_path, ClarifyConfig, ConfigOverrides, GeminiBackend,
    Tone,
};
use clarify_tui::{logging, App, ConductorClient, Osc52Clipboard};

/// Clarify - polish your words to perfection
#[derive(Parser, Debug)]
#[command(name = "clarify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, env = "CLARIFY_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Model to request corrections from
    #[arg(short = 'm', long)]
    model: Option<String>,

    /// Environment name (development, production)
    #[arg(long = "env", value_name = "NAME")]
    environment: Option<String>,

    /// Tone selected at startup
    #[arg(short = 't', long)]
    tone: Option<Tone>,

    /// Maximum input length in UTF-16 code units
    #[arg(long, value_name = "UNITS")]
    max_input_length: Option<usize>,

    /// Log file path
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Text to load into the editor
    text: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(model) = &self.model {
            overrides = overrides.with_model(model.clone());
        }
        if let Some(environment) = &self.environment {
            overrides = overrides.with_environment(environment.clone());
        }
        if let Some(tone) = self.tone {
            overrides = overrides.with_default_tone(tone);
        }
        if let Some(length) = self.max_input_length {
            overrides = overrides.with_max_input_length(length);
        }
        if let Some(path) = &self.log_file {
            overrides = overrides.with_log_file(path.clone());
        }
        overrides
    }
}

fn load(cli: &Cli) -> anyhow::Result<ClarifyConfig> {
    let path = cli.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path).context("Failed to load configuration")?;
    cli.overrides()
        .apply(&mut config)
        .context("Invalid command-line option")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load(&cli)?;
    let log_path = logging::init(&config)?;
    config.validate_api_key();

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: clarify requires a terminal (TTY)");
        eprintln!();
        eprintln!("Run it interactively, or over SSH with the -t flag.");
        std::process::exit(1);
    }

    let backend = GeminiBackend::from_config(&config).context("Failed to create HTTP client")?;
    let conductor = ConductorClient::new(backend, &config);

    // Restore the terminal before printing a panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let size = terminal.size()?;
    let mut app = App::new(conductor, Osc52Clipboard::stdout(), (size.width, size.height))
        .with_prefill(cli.text);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Terminal UI failed");
        eprintln!("Logs: {}", log_path.display());
    } else if let Some(goodbye) = app.goodbye() {
        println!("\n\x1b[34mClarify:\x1b[0m {goodbye}\n");
    }

    result
}
