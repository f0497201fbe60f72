#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use alien_invasion::audio::{AudioSink, Cue};
use alien_invasion::compute::{Collaborators, Game};
use alien_invasion::difficulty::{DifficultyPredictor, Features};
use alien_invasion::error::GameError;
use alien_invasion::settings::Settings;
use alien_invasion::telemetry::{MetricsRow, TelemetrySink};

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Defaults with the random alien jitter switched off so positions are exact.
pub fn quiet_settings() -> Settings {
    Settings {
        alien_jitter_chance: 0.0,
        ..Settings::default()
    }
}

#[derive(Clone, Default)]
pub struct RecordingAudio(pub Rc<RefCell<Vec<Cue>>>);

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.0.borrow_mut().push(cue);
    }
}

#[derive(Clone, Default)]
pub struct MemoryTelemetry(pub Rc<RefCell<Vec<MetricsRow>>>);

impl TelemetrySink for MemoryTelemetry {
    fn persist(&mut self, row: &MetricsRow) -> Result<(), GameError> {
        self.0.borrow_mut().push(row.clone());
        Ok(())
    }
}

pub struct FailingTelemetry;

impl TelemetrySink for FailingTelemetry {
    fn persist(&mut self, _row: &MetricsRow) -> Result<(), GameError> {
        Err(GameError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only disk",
        )))
    }
}

/// Always errors, so the current alien speed is always held.
pub struct FailingPredictor;

impl DifficultyPredictor for FailingPredictor {
    fn predict(&self, _features: &Features) -> Result<f64, GameError> {
        Err(GameError::Predictor("model unavailable".into()))
    }
}

pub struct Harness {
    pub game: Game,
    pub rng: StdRng,
    pub cues: Rc<RefCell<Vec<Cue>>>,
    pub rows: Rc<RefCell<Vec<MetricsRow>>>,
}

pub fn harness_with(settings: Settings, predictor: Box<dyn DifficultyPredictor>) -> Harness {
    let audio = RecordingAudio::default();
    let telemetry = MemoryTelemetry::default();
    let cues = audio.0.clone();
    let rows = telemetry.0.clone();
    let mut rng = seeded_rng();
    let game = Game::new(
        settings,
        Collaborators::new(predictor, Box::new(audio), Box::new(telemetry)),
        &mut rng,
    );
    Harness {
        game,
        rng,
        cues,
        rows,
    }
}

/// An inactive game with a failing predictor and jitter off.
pub fn harness() -> Harness {
    harness_with(quiet_settings(), Box::new(FailingPredictor))
}

/// Same as `harness`, already started.
pub fn started() -> Harness {
    let mut h = harness();
    h.game.start(&mut h.rng);
    h
}
