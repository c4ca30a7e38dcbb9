mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Color,
    terminal, ExecutableCommand,
};
use log::LevelFilter;

use space_invaders::config::{SimConfig, COMPLEXITY};
use space_invaders::entities::Steering;
use space_invaders::rng::{RandomSource, RngSource};
use space_invaders::surface::{CellGrid, Presenter};
use space_invaders::Simulation;

use display::{Overlay, Starfield};

/// Fixed-tick space invaders in the terminal
#[derive(Parser)]
#[command(name = "space_invaders")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Tick period in milliseconds
    #[arg(long, default_value_t = 40)]
    tick_ms: u64,

    /// Enemy fire rate; one shot is attempted with probability complexity/100
    #[arg(long, default_value_t = COMPLEXITY)]
    complexity: u32,

    /// Write logs to this file (the screen belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

fn steering(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Steering {
    let left = any_held(
        key_frame,
        &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        frame,
    );
    let right = any_held(
        key_frame,
        &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        frame,
    );
    match (left, right) {
        (true, false) => Steering::Left,
        (false, true) => Steering::Right,
        _ => Steering::Neutral,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(File::create(path)?)))
        .try_init()?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input is drained between ticks, never during one.  Space fires while a
/// game runs and restarts once it has stopped.
fn game_loop<W: Write, R: RandomSource>(
    out: &mut W,
    sim: &mut Simulation,
    rng: &mut R,
    rx: &mpsc::Receiver<Event>,
    period: Duration,
) -> std::io::Result<()> {
    let (width, height) = (sim.config().width, sim.config().height);
    let mut grid = CellGrid::new(width, height);
    let mut starfield = Starfield::new(rng, width, height);
    let mut overlay = Overlay::default();

    // Maps each held key → the tick it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') if sim.is_stopped() => {
                            sim.on_restart_requested();
                            starfield = Starfield::new(rng, width, height);
                            overlay.clear();
                        }
                        KeyCode::Char(' ') => sim.on_fire_requested(),
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        sim.on_direction_change(steering(&key_frame, frame));

        if let Some(outcome) = sim.tick(rng) {
            overlay.show_message(&outcome.message());
        }

        grid.clear(Color::Black);
        starfield.draw(&mut grid);
        sim.draw(&mut grid);
        display::render(out, &grid, sim.current_score(), overlay.message())?;

        let elapsed = frame_start.elapsed();
        if elapsed < period {
            thread::sleep(period - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = SimConfig {
        complexity: cli.complexity,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config)?;
    let mut rng = match cli.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let period = Duration::from_millis(cli.tick_ms);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events so steering stops the moment a key is
    // let go; other terminals fall back to `HOLD_WINDOW` expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut sim, &mut rng, &rx, period);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    Ok(())
}
