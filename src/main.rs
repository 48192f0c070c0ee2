//! Terminal 2048 runner (default binary).
//!
//! Loads configuration, starts file logging, then runs a fixed-timestep loop:
//! render (throttled), wait for one input event until the next tick, dispatch
//! it, tick the game clock.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};

use tui_2048::config::Config;
use tui_2048::input::{handle_key_event, handle_mouse_event, should_quit};
use tui_2048::logging;
use tui_2048::session::Session;
use tui_2048::term::{TerminalRenderer, Viewport};

#[derive(Parser, Debug)]
#[command(name = "tui-2048", version, about = "Play 2048 in the terminal")]
struct Cli {
    /// Config file (defaults to the user config dir when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u32>,

    /// Log file path
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `tui_2048=debug`
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,

    /// Keyboard only: do not capture the mouse
    #[arg(long)]
    no_mouse: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(file) = &self.log_file {
            config.log.file = file.clone();
        }
        if let Some(filter) = &self.log_filter {
            config.log.filter = filter.clone();
        }
        if self.no_mouse {
            config.mouse = false;
        }
    }
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("load config")?;
    config
        .apply_env(|key| std::env::var(key).ok())
        .context("apply environment overrides")?;
    cli.apply_to(&mut config);
    config.validate().context("validate config")?;

    logging::init(&config.log.file, &config.log.filter)?;

    let seed = config.seed.unwrap_or_else(seed_from_clock);
    info!(seed, ?config, "session start");

    let mut term = if config.mouse {
        TerminalRenderer::new()
    } else {
        TerminalRenderer::new().without_mouse()
    };
    term.enter().context("set up terminal")?;

    let result = run(&mut term, &config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    match &result {
        Ok(()) => info!("session end"),
        Err(err) => error!(error = %err, "session failed"),
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &Config, seed: u32) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut session = Session::new(config, seed, Viewport::new(w, h));

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));

    loop {
        let now_ms = started.elapsed().as_millis() as u64;
        if let Some(fb) = session.frame(now_ms) {
            term.draw_swap(fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(
                            score = session.game().score(),
                            moves = session.game().moves(),
                            "quit requested"
                        );
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = handle_mouse_event(mouse) {
                        session.handle_pointer(pointer);
                    }
                }
                Event::Resize(w, h) => {
                    session.resize(w, h);
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Advance the game clock by the whole milliseconds that really passed;
        // the sub-millisecond remainder carries into the next tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            last_tick += Duration::from_millis(u64::from(elapsed_ms));
            session.tick(elapsed_ms);
        }
    }
}
