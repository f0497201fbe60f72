//! Formation controller: owns the alien fleet.
//!
//! The fleet shares one heading and one speed, both read from
//! `DynamicSettings`. Reversing the heading is the caller's job; this module
//! only reports edge contact and applies the drop.

use rand::Rng;

use crate::entities::{Alien, Entity, EntityKind};
use crate::settings::{DynamicSettings, Settings};

#[derive(Clone, Debug, Default)]
pub struct Formation {
    pub aliens: Vec<Alien>,
}

impl Formation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-left corners of a full fleet, row by row.
    ///
    /// Starts one alien in from the top-left, steps two alien widths across
    /// and two alien heights down, and stops short of a two-width right
    /// margin and a three-height bottom margin.
    pub fn grid_positions(settings: &Settings) -> Vec<(f32, f32)> {
        let (w, h) = (settings.alien_width, settings.alien_height);
        let mut positions = Vec::new();
        if w <= 0.0 || h <= 0.0 {
            return positions;
        }

        let mut y = h;
        while y < settings.screen_height - 3.0 * h {
            let mut x = w;
            while x < settings.screen_width - 2.0 * w {
                positions.push((x, y));
                x += 2.0 * w;
            }
            y += 2.0 * h;
        }
        positions
    }

    /// Replace the fleet with a freshly laid-out grid.
    pub fn spawn_fleet(&mut self, settings: &Settings, rng: &mut impl Rng) {
        self.aliens.clear();
        for (x, y) in Self::grid_positions(settings) {
            let jitter = if settings.alien_jitter_max > settings.alien_jitter_min {
                rng.gen_range(settings.alien_jitter_min..settings.alien_jitter_max)
            } else {
                settings.alien_jitter_min
            };
            self.aliens.push(Alien {
                body: Entity::new(
                    EntityKind::Alien,
                    x,
                    y,
                    settings.alien_width,
                    settings.alien_height,
                ),
                jitter,
            });
        }
        log::debug!("Spawned fleet of {} aliens", self.aliens.len());
    }

    /// Move every alien by `alien_speed * direction`, then give each one an
    /// independent chance to sink by its own jitter amount.
    pub fn advance(&mut self, dynamic: &DynamicSettings, settings: &Settings, rng: &mut impl Rng) {
        let dx = dynamic.alien_speed * dynamic.fleet_direction.sign();
        for alien in &mut self.aliens {
            alien.body.translate(dx, 0.0);
            if settings.alien_jitter_chance > 0.0 && rng.gen_bool(settings.alien_jitter_chance) {
                alien.body.translate(0.0, alien.jitter);
            }
        }
    }

    /// True when any alien touches the left or right side of the viewport.
    pub fn check_edges(&self, settings: &Settings) -> bool {
        let right_edge = settings.screen_width as i32;
        self.aliens.iter().any(|alien| {
            let rect = alien.body.rect();
            rect.right() >= right_edge || rect.left() <= 0
        })
    }

    pub fn drop_fleet(&mut self, step: f32) {
        for alien in &mut self.aliens {
            alien.body.translate(0.0, step);
        }
    }

    /// Remove the aliens at `indices` (any order, duplicates ignored).
    pub fn remove(&mut self, indices: &[usize]) {
        let mut i = 0;
        self.aliens.retain(|_| {
            let keep = !indices.contains(&i);
            i += 1;
            keep
        });
    }

    pub fn clear(&mut self) {
        self.aliens.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }
}
