//! Tuning constants, split into the static table and the dynamic subset
//! that changes over the course of a game.
//!
//! Leaf components only ever read these. The game state machine owns the
//! `DynamicSettings` value and is the only thing that resets or scales it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

// ── Static settings ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Viewport
    pub screen_width: f32,
    pub screen_height: f32,

    // Ship
    pub ship_width: f32,
    pub ship_height: f32,
    /// Spare ships at the start of a game.
    pub ship_limit: u32,

    // Bullets
    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Magazine cap: maximum bullets on screen at once.
    pub bullets_allowed: usize,
    /// Multiplier applied on top of the dynamic bullet speed.
    pub bullet_speed_effect: f32,

    // Aliens
    pub alien_width: f32,
    pub alien_height: f32,
    pub fleet_drop_speed: f32,
    /// Per-alien, per-tick probability of a downward jitter nudge.
    pub alien_jitter_chance: f64,
    /// Range the per-alien jitter magnitude is drawn from at spawn.
    pub alien_jitter_min: f32,
    pub alien_jitter_max: f32,

    // Power-ups
    pub powerup_width: f32,
    pub powerup_height: f32,
    pub powerup_speed: f32,
    pub powerup_chance: f64,
    pub powerup_spawn_top: f32,
    pub powerup_spawn_bottom: f32,

    // Difficulty ramp
    pub speedup_scale: f32,
    pub score_scale: f32,

    // Timing
    pub tick_rate: u32,
    /// Ticks the simulation holds still after a ship is lost.
    pub respawn_pause_ticks: u32,
    /// Ticks between periodic telemetry rows while playing.
    pub telemetry_interval_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1000.0,
            screen_height: 700.0,

            ship_width: 60.0,
            ship_height: 48.0,
            ship_limit: 3,

            bullet_width: 5.0,
            bullet_height: 20.0,
            bullets_allowed: 5,
            bullet_speed_effect: 1.5,

            alien_width: 50.0,
            alien_height: 50.0,
            fleet_drop_speed: 10.0,
            alien_jitter_chance: 0.05,
            alien_jitter_min: 0.5,
            alien_jitter_max: 1.5,

            powerup_width: 30.0,
            powerup_height: 30.0,
            powerup_speed: 1.0,
            powerup_chance: 0.2,
            powerup_spawn_top: 50.0,
            powerup_spawn_bottom: 150.0,

            speedup_scale: 1.1,
            score_scale: 1.5,

            tick_rate: 60,
            respawn_pause_ticks: 30,
            telemetry_interval_ticks: 300,
        }
    }
}

impl Settings {
    /// Read a JSON override file. Fields the file leaves out keep their
    /// compiled-in defaults. The result must pass [`Settings::validate`].
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json).map_err(|source| GameError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings override from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with: non-positive sizes or
    /// rates, probabilities outside [0, 1], and inverted ranges.
    pub fn validate(&self) -> Result<(), GameError> {
        let sizes = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
            ("powerup_width", self.powerup_width),
            ("powerup_height", self.powerup_height),
            ("speedup_scale", self.speedup_scale),
            ("score_scale", self.score_scale),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        for (name, p) in [
            ("alien_jitter_chance", self.alien_jitter_chance),
            ("powerup_chance", self.powerup_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{name} must be within [0, 1], got {p}")));
            }
        }

        if !(0.0 <= self.alien_jitter_min && self.alien_jitter_min <= self.alien_jitter_max)
            || !self.alien_jitter_max.is_finite()
        {
            return Err(invalid(format!(
                "alien jitter range [{}, {}] is inverted or negative",
                self.alien_jitter_min, self.alien_jitter_max
            )));
        }
        if !(self.powerup_spawn_top <= self.powerup_spawn_bottom)
            || !self.powerup_spawn_top.is_finite()
            || !self.powerup_spawn_bottom.is_finite()
        {
            return Err(invalid(format!(
                "power-up spawn band [{}, {}] is inverted",
                self.powerup_spawn_top, self.powerup_spawn_bottom
            )));
        }
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidSettings(reason)
}

// ── Dynamic settings ──────────────────────────────────────────────────────────

/// Horizontal heading shared by the whole fleet. There is no "stopped" state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FleetDirection {
    #[default]
    Right,
    Left,
}

impl FleetDirection {
    /// +1.0 for right, -1.0 for left.
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DynamicSettings {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub fleet_direction: FleetDirection,
    pub alien_points: u64,
}

impl Default for DynamicSettings {
    fn default() -> Self {
        Self {
            ship_speed: 1.5,
            bullet_speed: 3.0,
            alien_speed: 1.0,
            fleet_direction: FleetDirection::Right,
            alien_points: 50,
        }
    }
}

impl DynamicSettings {
    /// Scale speeds and the alien point value after a level clear. The point
    /// value saturates at `u64::MAX`.
    pub fn increase_speed(&mut self, settings: &Settings) {
        self.ship_speed *= settings.speedup_scale;
        self.bullet_speed *= settings.speedup_scale;
        self.alien_speed *= settings.speedup_scale;
        self.alien_points = (self.alien_points as f64 * settings.score_scale as f64) as u64;
    }
}
