use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use alien_invasion::audio::TerminalBell;
use alien_invasion::compute::{Collaborators, Game};
use alien_invasion::difficulty::LinearModel;
use alien_invasion::display::{self, Viewport};
use alien_invasion::driver::{self, Command, Flow, FrameClock};
use alien_invasion::highscore;
use alien_invasion::settings::Settings;
use alien_invasion::telemetry::CsvTelemetry;

const LOG_FILE: &str = "alien_invasion.log";
const METRICS_FILE: &str = "player_metrics.csv";
const DEFAULT_MODEL: &str = "assets/difficulty_model.json";

// ── Held-key input ────────────────────────────────────────────────────────────

/// Frames between automatic shots while Space stays down.
const SHOOT_COOLDOWN: u32 = 10;

/// Terminals without release events only send press/repeat. A key counts as
/// down while its latest event is at most this many frames old; OS key
/// repeat refreshes it well inside that window.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Tracks held keys across frames and turns raw terminal events into
/// driver commands.
struct InputState {
    key_frame: HashMap<KeyCode, u64>,
    shoot_cooldown: u32,
}

impl InputState {
    fn new() -> Self {
        Self {
            key_frame: HashMap::new(),
            shoot_cooldown: 0,
        }
    }

    fn drain(&mut self, rx: &mpsc::Receiver<Event>, frame: u64, view: &Viewport) -> Vec<Command> {
        let mut commands = Vec::new();

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        self.key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                commands.push(Command::Quit)
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                commands.push(Command::Quit)
                            }
                            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => {
                                commands.push(Command::Start)
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        self.key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) if view.play_button_contains(column, row) => commands.push(Command::Start),
                _ => {}
            }
        }

        let held = |key: KeyCode| is_held(&self.key_frame, &key, frame);
        let left = held(KeyCode::Left) || held(KeyCode::Char('a'));
        let right = held(KeyCode::Right) || held(KeyCode::Char('d'));
        let shoot = held(KeyCode::Char(' '));

        commands.push(Command::MoveLeft(left));
        commands.push(Command::MoveRight(right));
        if shoot && self.shoot_cooldown == 0 {
            commands.push(Command::Fire);
            self.shoot_cooldown = SHOOT_COOLDOWN;
        }
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        commands
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(out: &mut W, game: &mut Game, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let mut rng = thread_rng();
    let mut input = InputState::new();
    let clock = FrameClock::from_rate(game.settings.tick_rate);
    let score_path = highscore::default_path();
    let mut saved_high = game.stats.high_score;
    let mut was_active = game.is_active();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, game);

        let commands = input.drain(rx, frame, &view);
        if driver::apply_all(game, commands, &mut rng) == Flow::Quit {
            break;
        }

        game.tick(&mut rng);

        // Hide the pointer while playing, give it back on the menu.
        let active = game.is_active();
        if active != was_active {
            if active {
                out.execute(cursor::Hide)?;
            } else {
                out.execute(cursor::Show)?;
            }
            was_active = active;
        }

        if game.stats.high_score > saved_high && !active {
            if let Err(e) = highscore::save(&score_path, game.stats.high_score) {
                log::warn!("{e}");
            }
            saved_high = game.stats.high_score;
        }

        display::render(out, game, &view)?;
        clock.wait(frame_start);
    }

    if game.stats.high_score > saved_high {
        if let Err(e) = highscore::save(&score_path, game.stats.high_score) {
            log::warn!("{e}");
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn build_game() -> Result<Game> {
    let settings = match std::env::var_os("ALIEN_INVASION_SETTINGS") {
        Some(path) => {
            let path = PathBuf::from(path);
            Settings::load(&path)
                .with_context(|| format!("loading settings from {}", path.display()))?
        }
        None => Settings::default(),
    };

    let model_path = std::env::var_os("ALIEN_INVASION_MODEL")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL));
    let model = LinearModel::load(&model_path).context("the difficulty model is required")?;

    let telemetry = CsvTelemetry::new(METRICS_FILE);
    log::info!("Player metrics append to {}", telemetry.path().display());
    let collaborators = Collaborators::new(
        Box::new(model),
        Box::new(TerminalBell::default()),
        Box::new(telemetry),
    );
    let high_score = highscore::load(&highscore::default_path());
    Ok(Game::new(settings, collaborators, &mut thread_rng()).with_high_score(high_score))
}

fn main() -> Result<()> {
    init_logging()?;
    log::info!("Alien Invasion starting");

    // Load everything before touching the terminal so startup faults print cleanly.
    let mut game = build_game()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;

    // Ghostty / kitty-protocol terminals report key releases; others fall back
    // to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
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

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Alien Invasion exiting");
    result
}
