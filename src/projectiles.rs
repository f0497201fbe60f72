//! Projectile manager: the player's bullets and the magazine cap.

use crate::entities::{Bullet, Entity, EntityKind, Ship};
use crate::settings::{DynamicSettings, Settings};

#[derive(Clone, Debug, Default)]
pub struct Projectiles {
    pub bullets: Vec<Bullet>,
}

impl Projectiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one bullet at the ship's top-center. Returns `false` and does
    /// nothing when the magazine is already full.
    pub fn fire(&mut self, ship: &Ship, settings: &Settings) -> bool {
        if self.bullets.len() >= settings.bullets_allowed {
            return false;
        }
        let x = ship.body.x + (ship.body.width - settings.bullet_width) / 2.0;
        self.bullets.push(Bullet {
            body: Entity::new(
                EntityKind::Bullet,
                x,
                ship.body.y,
                settings.bullet_width,
                settings.bullet_height,
            ),
        });
        true
    }

    /// Move bullets up and drop the ones whose bottom edge has left the
    /// top of the viewport.
    pub fn advance(&mut self, dynamic: &DynamicSettings, settings: &Settings) {
        let dy = dynamic.bullet_speed * settings.bullet_speed_effect;
        for bullet in &mut self.bullets {
            bullet.body.translate(0.0, -dy);
        }
        self.bullets.retain(|b| b.body.rect().bottom() > 0);
    }

    pub fn remove(&mut self, indices: &[usize]) {
        let mut i = 0;
        self.bullets.retain(|_| {
            let keep = !indices.contains(&i);
            i += 1;
            keep
        });
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}
