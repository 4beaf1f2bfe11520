mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use arcade_shooter::compute::{init_state, tick};
use arcade_shooter::config::Tuning;
use arcade_shooter::entities::{GameEvent, GameState, InputSnapshot};

const FRAME: Duration = Duration::from_millis(1000 / 60); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Top-down arcade shooter for the terminal
#[derive(Parser)]
#[command(name = "arcade_shooter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file overriding gameplay tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed; the same seed and inputs replay the same session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where log output goes (the terminal is busy drawing the game)
    #[arg(long, default_value = "arcade_shooter.log")]
    log_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(cli: &Cli) -> std::io::Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let file = File::create(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn snapshot(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputSnapshot {
    let held = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame));
    InputSnapshot {
        left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        fire: held(&[KeyCode::Char(' ')]),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum SessionExit {
    Quit,
    Restart,
}

/// Run one session until the player quits or asks for a new one.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the still-fresh keys become the tick's
/// `InputSnapshot`, so Space + A/D can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rng: &mut ChaCha8Rng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<SessionExit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let session_start = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(SessionExit::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(SessionExit::Quit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if !state.is_running() => {
                            return Ok(SessionExit::Restart);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = snapshot(&key_frame, frame);
        tick(state, &input, session_start.elapsed(), rng);

        for event in state.events() {
            match event {
                GameEvent::Shoot { weapon, spawned } => {
                    debug!(weapon = weapon.name(), spawned, "shoot")
                }
                GameEvent::Hit { .. } => debug!(score = state.score, "hit"),
                GameEvent::LifeLost { lives } => info!(lives, "ship hit"),
                GameEvent::LifePickup { lives } => info!(lives, "extra life"),
                GameEvent::WeaponPickup(weapon) => info!(weapon = weapon.name(), "weapon pickup"),
                GameEvent::SessionEnded { score } => info!(score, "game over"),
            }
        }

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        } else {
            debug!(?elapsed, "frame overran budget");
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let tuning = match &cli.config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, config = ?cli.config, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal lacks key-release events, falling back to hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &tuning, seed);

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

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tuning: &Tuning,
    seed: u64,
) -> std::io::Result<()> {
    for session in 0u64.. {
        let session_seed = seed.wrapping_add(session);
        info!(session, seed = session_seed, "new session");
        let mut rng = ChaCha8Rng::seed_from_u64(session_seed);
        let mut state = init_state(tuning.clone());

        match game_loop(out, &mut state, &mut rng, rx)? {
            SessionExit::Quit => break,
            SessionExit::Restart => continue,
        }
    }
    Ok(())
}
