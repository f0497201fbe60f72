//! Adaptive difficulty: feed recent play metrics to a predictor and take
//! its answer as the new alien speed.
//!
//! The predictor is an injected capability. A failing or nonsensical
//! prediction never breaks the frame; the previous speed is kept instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::GameStats;
use crate::error::GameError;

/// hits / fired, or 0 when nothing has been fired yet.
pub fn accuracy(shots_fired: u32, shots_hit: u32) -> f64 {
    if shots_fired == 0 {
        0.0
    } else {
        shots_hit as f64 / shots_fired as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Features {
    pub reaction_time: f64,
    pub accuracy: f64,
    pub lives_lost: f64,
}

impl Features {
    /// `None` until at least one reaction time has been recorded.
    pub fn from_stats(stats: &GameStats) -> Option<Self> {
        let reaction_time = *stats.reaction_times.last()?;
        Some(Features {
            reaction_time,
            accuracy: accuracy(stats.shots_fired, stats.shots_hit),
            lives_lost: stats.lives_lost as f64,
        })
    }
}

pub trait DifficultyPredictor {
    fn predict(&self, features: &Features) -> Result<f64, GameError>;
}

/// Adapts a plain function or closure into a predictor.
pub struct FnPredictor<F>(pub F);

impl<F> DifficultyPredictor for FnPredictor<F>
where
    F: Fn(&Features) -> f64,
{
    fn predict(&self, features: &Features) -> Result<f64, GameError> {
        Ok((self.0)(features))
    }
}

/// Linear regression over the three features, clamped to a speed band.
/// Stored on disk as JSON and loaded once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub reaction_time: f64,
    pub accuracy: f64,
    pub lives_lost: f64,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl LinearModel {
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path).map_err(|e| GameError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let model: LinearModel = serde_json::from_str(&json).map_err(|e| GameError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !(model.min_speed > 0.0 && model.min_speed <= model.max_speed) {
            return Err(GameError::ModelLoad {
                path: path.to_path_buf(),
                reason: format!(
                    "speed band [{}, {}] is empty or non-positive",
                    model.min_speed, model.max_speed
                ),
            });
        }
        log::info!("Loaded difficulty model from {}", path.display());
        Ok(model)
    }
}

impl DifficultyPredictor for LinearModel {
    fn predict(&self, f: &Features) -> Result<f64, GameError> {
        let raw = self.intercept
            + self.reaction_time * f.reaction_time
            + self.accuracy * f.accuracy
            + self.lives_lost * f.lives_lost;
        if raw.is_nan() {
            return Err(GameError::InvalidPrediction(raw));
        }
        Ok(raw.clamp(self.min_speed, self.max_speed))
    }
}

/// The alien speed to use this tick.
///
/// Holds `current` when there are no samples yet, when the predictor
/// errors, or when it answers with a non-finite or non-positive speed.
pub fn next_alien_speed(predictor: &dyn DifficultyPredictor, stats: &GameStats, current: f32) -> f32 {
    let Some(features) = Features::from_stats(stats) else {
        return current;
    };
    match predictor.predict(&features) {
        Ok(speed) if speed.is_finite() && speed > 0.0 => speed as f32,
        Ok(speed) => {
            log::warn!("{}; keeping alien speed {current}", GameError::InvalidPrediction(speed));
            current
        }
        Err(e) => {
            log::warn!("{e}; keeping alien speed {current}");
            current
        }
    }
}
