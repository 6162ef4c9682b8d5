mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::thread_rng;

use space_shooter::config::GameConfig;
use space_shooter::error::GameError;
use space_shooter::input::{is_quit_key, KeyTracker};
use space_shooter::session::Session;

use display::Viewport;

/// Everything the loop and the renderer share, built once in `main`.
struct Context<W: Write> {
    out: W,
    rx: mpsc::Receiver<Event>,
    frame: Duration,
}

impl<W: Write> Context<W> {
    fn viewport(&self, config: &GameConfig) -> std::io::Result<Viewport> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport::new(cols, rows, config.width, config.height))
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive the session at a fixed cadence until the player quits or dies.
fn game_loop<W: Write>(ctx: &mut Context<W>, config: GameConfig) -> Result<(), GameError> {
    let mut session = Session::new(config, thread_rng())?;
    let mut keys = KeyTracker::new();

    while session.is_running() {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = ctx.rx.try_recv() {
            if let Event::Key(key) = ev {
                keys.handle(key);
            }
        }

        session.step(&keys.end_tick());

        let view = ctx.viewport(session.config())?;
        display::render(&mut ctx.out, &session.snapshot(), &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < ctx.frame {
            thread::sleep(ctx.frame - elapsed);
        }
    }

    if session.snapshot().game_over {
        wait_for_quit(&ctx.rx);
    }
    Ok(())
}

/// Block on the game-over screen until a quit key arrives.
fn wait_for_quit(rx: &mpsc::Receiver<Event>) {
    while let Ok(ev) = rx.recv() {
        if let Event::Key(key) = ev {
            if is_quit_key(&key) {
                return;
            }
        }
    }
}

/// `--dump-config` prints the defaults as TOML, a starting point for a
/// custom config file.
fn load_config() -> Result<Option<GameConfig>, GameError> {
    match std::env::args().nth(1).as_deref() {
        Some("--dump-config") => {
            print!("{}", GameConfig::default().to_toml()?);
            Ok(None)
        }
        Some(path) => {
            info!("loading config from {}", path);
            Ok(Some(GameConfig::load(path)?))
        }
        None => Ok(Some(GameConfig::default())),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    // Logs go to stderr; the game draws on stdout.  Run with `2>game.log`.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(config) = load_config()? else {
        return Ok(());
    };
    let frame = Duration::from_millis(1000 / u64::from(config.ticks_per_second));

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key releases; using hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut ctx = Context { out, rx, frame };
    let result = game_loop(&mut ctx, config);

    // Always restore the terminal
    let out = &mut ctx.out;
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
