//! Game state machine.
//!
//! `Game` owns every mutable piece of a session: the ship, the fleet, the
//! bullets and pickups, the stats block and the dynamic settings. Leaf
//! components never touch each other; all cross-component reactions happen
//! here, once per tick, in a fixed order:
//!
//! 1. ship, bullets, fleet (edge check, then move) and pickups advance
//! 2. difficulty is re-evaluated
//! 3. collisions are resolved and the resulting events applied
//! 4. a telemetry row is written on the configured cadence
//!
//! All randomness comes through the injected RNG.

use rand::Rng;

use crate::audio::{AudioSink, Cue};
use crate::collision;
use crate::difficulty::{self, DifficultyPredictor};
use crate::entities::{GameStats, GameStatus, Ship};
use crate::formation::Formation;
use crate::powerups::{CountPickup, PowerUpEffect, PowerUps};
use crate::projectiles::Projectiles;
use crate::settings::{DynamicSettings, Settings};
use crate::telemetry::{MetricsRow, TelemetrySink};

/// What one tick did, for the frame driver and for tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// False when the tick was skipped (inactive or respawn pause).
    pub advanced: bool,
    pub aliens_destroyed: usize,
    pub points_scored: u64,
    pub level_cleared: bool,
    pub ship_hit: bool,
    pub game_over: bool,
    pub powerups_collected: usize,
}

/// External collaborators the state machine calls into.
pub struct Collaborators {
    pub predictor: Box<dyn DifficultyPredictor>,
    pub audio: Box<dyn AudioSink>,
    pub telemetry: Box<dyn TelemetrySink>,
    pub effect: Box<dyn PowerUpEffect>,
}

impl Collaborators {
    pub fn new(
        predictor: Box<dyn DifficultyPredictor>,
        audio: Box<dyn AudioSink>,
        telemetry: Box<dyn TelemetrySink>,
    ) -> Self {
        Self {
            predictor,
            audio,
            telemetry,
            effect: Box::new(CountPickup),
        }
    }
}

pub struct Game {
    pub settings: Settings,
    pub dynamic: DynamicSettings,
    pub stats: GameStats,
    pub status: GameStatus,
    pub ship: Ship,
    pub formation: Formation,
    pub projectiles: Projectiles,
    pub powerups: PowerUps,
    /// Active ticks since the current game started.
    pub frame: u64,
    /// Ticks left in the post-hit pause.
    pub pause_ticks: u32,
    /// Tick of the last fleet spawn or kill; reaction times count from here.
    pub stimulus_frame: u64,
    collaborators: Collaborators,
}

impl Game {
    /// A fresh, inactive game with a fleet already laid out behind the menu.
    pub fn new(settings: Settings, collaborators: Collaborators, rng: &mut impl Rng) -> Self {
        let mut formation = Formation::new();
        formation.spawn_fleet(&settings, rng);
        Game {
            dynamic: DynamicSettings::default(),
            stats: GameStats::new(&settings),
            status: GameStatus::Inactive,
            ship: Ship::new(&settings),
            formation,
            projectiles: Projectiles::new(),
            powerups: PowerUps::new(),
            frame: 0,
            pause_ticks: 0,
            stimulus_frame: 0,
            settings,
            collaborators,
        }
    }

    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.stats.high_score = high_score;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    // ── Input-driven transitions ──────────────────────────────────────────────

    /// INACTIVE → ACTIVE. Everything but the high score starts over.
    /// Returns `false` if a game is already running.
    pub fn start(&mut self, rng: &mut impl Rng) -> bool {
        if self.is_active() {
            return false;
        }
        self.dynamic = DynamicSettings::default();
        self.stats.reset(&self.settings);
        self.frame = 0;
        self.pause_ticks = 0;
        self.ship.moving_left = false;
        self.ship.moving_right = false;
        self.reset_elements(rng);
        self.status = GameStatus::Active;
        log::info!("Game started (high score {})", self.stats.high_score);
        true
    }

    pub fn set_moving_left(&mut self, moving: bool) {
        self.ship.moving_left = moving;
    }

    pub fn set_moving_right(&mut self, moving: bool) {
        self.ship.moving_right = moving;
    }

    /// Fire if the game is running and the magazine has room.
    pub fn fire_bullet(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        if !self.projectiles.fire(&self.ship, &self.settings) {
            return false;
        }
        self.stats.shots_fired += 1;
        self.collaborators.audio.play(Cue::Fire);
        true
    }

    // ── Per-frame tick ────────────────────────────────────────────────────────

    pub fn tick(&mut self, rng: &mut impl Rng) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.is_active() {
            return outcome;
        }
        if self.pause_ticks > 0 {
            self.pause_ticks -= 1;
            return outcome;
        }
        outcome.advanced = true;
        self.frame += 1;

        // 1. Movement
        self.ship.update(self.dynamic.ship_speed, &self.settings);
        self.projectiles.advance(&self.dynamic, &self.settings);
        if self.formation.check_edges(&self.settings) {
            self.formation.drop_fleet(self.settings.fleet_drop_speed);
            self.dynamic.fleet_direction = self.dynamic.fleet_direction.reversed();
        }
        self.formation.advance(&self.dynamic, &self.settings, rng);
        self.powerups.advance(&self.settings);

        // 2. Difficulty
        self.dynamic.alien_speed = difficulty::next_alien_speed(
            self.collaborators.predictor.as_ref(),
            &self.stats,
            self.dynamic.alien_speed,
        );

        // 3. Collisions
        self.resolve_bullet_hits(rng, &mut outcome);

        let breached = collision::ship_hits_alien(&self.ship, &self.formation.aliens)
            || collision::aliens_reached_bottom(&self.formation.aliens, self.settings.screen_height);
        if breached {
            outcome.ship_hit = true;
            outcome.game_over = !self.ship_hit(rng);
        }

        if self.is_active() {
            let caught = collision::ship_vs_powerups(&self.ship, &self.powerups.items);
            if !caught.is_empty() {
                self.powerups.remove(&caught);
                for _ in &caught {
                    self.collaborators.effect.apply(&mut self.stats);
                }
                self.collaborators.audio.play(Cue::PowerUp);
                outcome.powerups_collected = caught.len();
            }
        }

        // 4. Telemetry
        let interval = self.settings.telemetry_interval_ticks;
        if self.is_active() && interval > 0 && self.frame % interval == 0 {
            self.save_metrics();
        }

        outcome
    }

    /// Score every bullet/alien pair found this tick. Each destroyed alien
    /// plays its own explosion cue.
    fn resolve_bullet_hits(&mut self, rng: &mut impl Rng, outcome: &mut TickOutcome) {
        let hits = collision::bullets_vs_aliens(&self.projectiles.bullets, &self.formation.aliens);
        if !hits.is_empty() {
            let kills = hits.kills();
            self.projectiles.remove(&hits.bullets);
            self.formation.remove(&hits.aliens);

            let points = self.dynamic.alien_points.saturating_mul(kills as u64);
            self.stats.score = self.stats.score.saturating_add(points);
            self.stats.shots_hit += kills as u32;
            self.stats.check_high_score();
            self.record_reaction();
            for _ in 0..kills {
                self.collaborators.audio.play(Cue::Explosion);
            }
            self.powerups.maybe_spawn(kills, &self.settings, rng);

            outcome.aliens_destroyed = kills;
            outcome.points_scored = points;
        }

        if self.formation.is_empty() {
            self.level_clear(rng);
            outcome.level_cleared = true;
        }
    }

    fn record_reaction(&mut self) {
        let elapsed = self.frame.saturating_sub(self.stimulus_frame);
        let seconds = elapsed as f64 / self.settings.tick_rate.max(1) as f64;
        self.stats.reaction_times.push(seconds);
        self.stimulus_frame = self.frame;
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// The fleet is gone: new fleet, harder settings, next level.
    pub fn level_clear(&mut self, rng: &mut impl Rng) {
        self.projectiles.clear();
        self.formation.spawn_fleet(&self.settings, rng);
        self.stimulus_frame = self.frame;
        self.dynamic.increase_speed(&self.settings);
        self.stats.level += 1;
        log::info!(
            "Level {} (alien speed {:.2}, {} points per alien)",
            self.stats.level,
            self.dynamic.alien_speed,
            self.dynamic.alien_points
        );
    }

    /// Lose a ship. Returns `true` if play continues, `false` on game over.
    pub fn ship_hit(&mut self, rng: &mut impl Rng) -> bool {
        if self.stats.ships_left > 0 {
            self.stats.ships_left -= 1;
            self.stats.lives_lost += 1;
            self.reset_elements(rng);
            self.pause_ticks = self.settings.respawn_pause_ticks;
            log::info!("Ship lost, {} left", self.stats.ships_left);
            true
        } else {
            self.save_metrics();
            self.status = GameStatus::Inactive;
            log::info!(
                "Game over: score {}, level {}, high score {}",
                self.stats.score,
                self.stats.level,
                self.stats.high_score
            );
            false
        }
    }

    fn reset_elements(&mut self, rng: &mut impl Rng) {
        self.projectiles.clear();
        self.powerups.clear();
        self.formation.spawn_fleet(&self.settings, rng);
        self.ship.center(&self.settings);
        self.stimulus_frame = self.frame;
    }

    /// Write one telemetry row. Failures are logged and swallowed.
    pub fn save_metrics(&mut self) {
        let row = MetricsRow {
            reaction_time: self.stats.reaction_times.last().copied(),
            accuracy: difficulty::accuracy(self.stats.shots_fired, self.stats.shots_hit),
            lives_lost: self.stats.lives_lost,
        };
        if let Err(e) = self.collaborators.telemetry.persist(&row) {
            log::warn!("{e}");
        }
    }
}
