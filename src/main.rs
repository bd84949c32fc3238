mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use space_shooter::clock::FrameClock;
use space_shooter::entities::Vector2;
use space_shooter::input::{InputSnapshot, MenuKey};
use space_shooter::{run, GameConfig, GameController, InputSource};

use display::{TerminalRenderer, Viewport};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// 8 frames @ 60 FPS ≈ 133 ms, refreshed by the OS key-repeat while held.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "space_shooter", about = "Single-screen arcade shooter for the terminal")]
struct Cli {
    /// JSON file overriding gameplay constants
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Write log output here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Turns the raw crossterm event stream into one snapshot per frame.
///
/// Instead of acting on each key event individually, we record the frame
/// number of the last press/repeat event for every key and treat keys seen
/// within `HOLD_WINDOW` frames as held. Terminals with keyboard enhancement
/// (kitty protocol) also send releases, which drop the key immediately.
struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    pointer: Option<Vector2>,
    width: f32,
    height: f32,
}

impl TerminalInput {
    fn new(rx: mpsc::Receiver<Event>, width: f32, height: f32) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
            pointer: None,
            width,
            height,
        }
    }

    fn is_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| {
            self.key_frame
                .get(key)
                .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
                .unwrap_or(false)
        })
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputSnapshot {
        self.frame += 1;
        let mut snapshot = InputSnapshot::default();

        // Drain all pending events (non-blocking)
        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        self.key_frame.insert(code.clone(), self.frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                snapshot.quit = true;
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                snapshot.quit = true;
                            }
                            KeyCode::Char(' ') => snapshot.fire = true,
                            KeyCode::Enter | KeyCode::Char('1') => {
                                snapshot.menu = Some(MenuKey::Primary);
                            }
                            KeyCode::Tab | KeyCode::Char('2') => {
                                snapshot.menu = Some(MenuKey::Secondary);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        self.key_frame.insert(code, self.frame);
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let Ok(view) = Viewport::current(self.width, self.height) else {
                        continue;
                    };
                    let point = view.to_playfield(column, row);
                    self.pointer = Some(point);
                    if kind == MouseEventKind::Down(MouseButton::Left) {
                        snapshot.click = Some(point);
                    }
                }
                _ => {}
            }
        }

        snapshot.pointer = self.pointer;
        snapshot.move_left =
            self.is_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]);
        snapshot.move_right =
            self.is_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]);
        snapshot
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;
    Ok(config)
}

fn play(config: GameConfig) -> Result<u64> {
    let mut out = BufWriter::new(stdout());
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    if out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_err()
    {
        log::warn!("Keyboard enhancement unavailable, using key-repeat hold detection");
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

    let (width, height) = (config.screen_width, config.screen_height);
    let mut clock = FrameClock::new(config.tick_rate);
    let mut controller = GameController::new(config);
    let mut input = TerminalInput::new(rx, width, height);
    let mut renderer = TerminalRenderer::new(out, width, height);

    let ticks = run(&mut controller, &mut input, &mut renderer, &mut clock)
        .context("drawing to the terminal")?;
    Ok(ticks)
}

fn restore_terminal() {
    let mut out = stdout();
    let _ = out.execute(PopKeyboardEnhancementFlags);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let config = load_config(&cli)?;
    log::info!(
        "Space Shooter starting: {}x{} @ {} Hz",
        config.screen_width,
        config.screen_height,
        config.tick_rate
    );

    terminal::enable_raw_mode().context("enabling raw mode")?;
    let result = play(config);

    // Always restore the terminal
    restore_terminal();

    let ticks = result?;
    log::info!("Exited cleanly after {ticks} ticks");
    Ok(())
}
