mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, LevelFilter};
use rand::thread_rng;

use space_shooter::assets::Assets;
use space_shooter::compute::{init_state, move_player_to, player_shoot, tick};
use space_shooter::config::GameConfig;
use space_shooter::entities::GameState;
use space_shooter::viewport::Viewport;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS
const LOG_FILE: &str = "space_shooter.log";
const TITLE: &str = "Space Shooter Example";

fn assets_dir() -> PathBuf {
    let local = PathBuf::from("assets");
    if local.is_dir() {
        local
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Input events are drained at the top of each
/// frame, so pointer callbacks and the simulation never interleave.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    assets: &Assets,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<GameState> {
    let mut rng = thread_rng();
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows);
    let mut state = init_state(config, &mut rng);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(state);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(state);
                        }
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        let (x, y) = view.to_world(column, row, config);
                        state = move_player_to(&state, x, y, config);
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        state = player_shoot(&state, config);
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    info!("terminal resized to {}x{}", cols, rows);
                    view = Viewport::new(cols, rows);
                }
                _ => {}
            }
        }

        if state.is_playing() {
            state = tick(&state, config, &mut rng);
        }

        display::render(out, &state, config, assets, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let level = if std::env::var_os("SPACE_SHOOTER_DEBUG").is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    simple_logging::log_to_file(LOG_FILE, level)
        .with_context(|| format!("failed to open log file {}", LOG_FILE))?;
    info!("starting space_shooter");

    let config = GameConfig::default();
    config.validate().context("invalid game configuration")?;
    let dir = assets_dir();
    let assets = Assets::load(&dir, &config)
        .with_context(|| format!("failed to load assets from {}", dir.display()))?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(TITLE))?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

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

    let result = game_loop(&mut out, &config, &assets, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(state) => {
            info!(
                "exiting: {:?} on level {} at frame {}, score {}, hp {}",
                state.status,
                state.level + 1,
                state.frame,
                state.score as u64,
                state.player.hp
            );
            Ok(())
        }
        Err(err) => {
            error!("game loop failed: {}", err);
            Err(err).context("terminal error during game loop")
        }
    }
}
