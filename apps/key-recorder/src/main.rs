//! Key Recorder - capture key-combo sequences from the terminal.
//!
//! Press `r` to record a sequence, `q` to quit. While recording, every key
//! goes to the recorder; the sequence is printed once no combo has closed for
//! the idle timeout.

mod app;

use anyhow::{Context, Result};
use app::{App, Output};
use clap::Parser;
use crossterm::{
    cursor::MoveToColumn,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tui_keyrecord::{KeyDisplayConfig, RecordOptions, RecorderConfig};

/// Record key-combo sequences.
#[derive(Debug, Parser)]
#[command(name = "key-recorder", version, about)]
struct Cli {
    /// Idle timeout in milliseconds after the last combo
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Suppress default handling of recorded keys
    #[arg(long)]
    prevent_default: Option<bool>,

    /// Ignore auto-repeated key presses
    #[arg(long)]
    no_repeat: Option<bool>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show keys as symbols instead of names
    #[arg(long)]
    symbolic: bool,

    /// Record a single sequence immediately and exit
    #[arg(long)]
    once: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn record_options(&self) -> RecordOptions {
        RecordOptions {
            timeout_ms: self.timeout_ms,
            prevent_default: self.prevent_default,
            no_repeat: self.no_repeat,
        }
    }

    fn load_config(&self) -> Result<RecorderConfig> {
        let config = match &self.config {
            Some(path) => RecorderConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RecorderConfig::load_default()?,
        };
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.load_config()?;
    let display = if cli.symbolic {
        KeyDisplayConfig::symbolic()
    } else {
        KeyDisplayConfig::text()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        let pushed = execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        );
        if let Err(err) = pushed {
            disable_raw_mode()?;
            return Err(err).context("enabling key release reporting");
        }
    }

    // Run app
    let mut app = App::new(config, cli.record_options(), display, release_events);
    let result = run_app(&mut stdout, &mut app, cli.once, release_events);

    // Restore terminal
    if release_events {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;

    result
}

fn run_app(out: &mut impl Write, app: &mut App, once: bool, release_events: bool) -> Result<()> {
    if once {
        app.start_recording()?;
        line(out, "Recording... (stop typing to finish)")?;
    } else {
        line(out, "Press r to record a key sequence, q to quit.")?;
    }
    if !release_events {
        line(out, "Terminal does not report key releases; every key press is its own combo.")?;
    }

    loop {
        if event::poll(app.poll_timeout())? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        for output in app.update()? {
            match output {
                Output::Started => line(out, "Recording... (stop typing to finish)")?,
                Output::Progress(keys) => {
                    execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(keys))?
                }
                Output::Finished { canonical, display } => {
                    execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
                    line(out, &format!("{display}    [{canonical}]"))?;
                }
            }
        }

        if app.should_quit() || (once && app.completed() > 0) {
            return Ok(());
        }
    }
}

/// Print a line in raw mode.
fn line(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{text}\r\n")?;
    out.flush()
}
