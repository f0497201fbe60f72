//! Power-up spawner: pickups that drift down after kills.

use rand::Rng;

use crate::entities::{Entity, EntityKind, GameStats, PowerUp};
use crate::settings::Settings;

/// What happens to the player when a pickup is caught.
pub trait PowerUpEffect {
    fn apply(&mut self, stats: &mut GameStats);
}

/// Default effect: just tally the pickup.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountPickup;

impl PowerUpEffect for CountPickup {
    fn apply(&mut self, stats: &mut GameStats) {
        stats.powerups_collected += 1;
    }
}

#[derive(Clone, Debug, Default)]
pub struct PowerUps {
    pub items: Vec<PowerUp>,
}

impl PowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    /// One roll per batch of kills, however many aliens the batch holds.
    /// A hit drops a pickup at a random column in the spawn band near the top.
    pub fn maybe_spawn(&mut self, kills: usize, settings: &Settings, rng: &mut impl Rng) -> bool {
        if kills == 0 || rng.gen::<f64>() >= settings.powerup_chance {
            return false;
        }
        let max_x = (settings.screen_width - settings.powerup_width).max(0.0);
        let x = rng.gen_range(0.0..=max_x);
        let y = rng.gen_range(settings.powerup_spawn_top..=settings.powerup_spawn_bottom);
        self.items.push(PowerUp {
            body: Entity::new(
                EntityKind::PowerUp,
                x.floor(),
                y.floor(),
                settings.powerup_width,
                settings.powerup_height,
            ),
        });
        log::debug!("Power-up spawned at ({x:.0}, {y:.0})");
        true
    }

    /// Sink every pickup and drop the ones that have fallen off the bottom.
    pub fn advance(&mut self, settings: &Settings) {
        for item in &mut self.items {
            item.body.translate(0.0, settings.powerup_speed);
        }
        let bottom = settings.screen_height as i32;
        self.items.retain(|p| p.body.rect().top() < bottom);
    }

    pub fn remove(&mut self, indices: &[usize]) {
        let mut i = 0;
        self.items.retain(|_| {
            let keep = !indices.contains(&i);
            i += 1;
            keep
        });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
