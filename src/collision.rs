//! Collision resolver. Pure queries over the current positions; nothing here
//! mutates a collection; callers apply the reported removals afterwards.
//!
//! Tests are discrete: two bodies that pass through each other between
//! ticks without overlapping at a checked instant are not detected.

use crate::entities::{Alien, Bullet, PowerUp, Ship};

/// Matched bullet/alien pairs from one tick, as indices into the
/// collections that were scanned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulletHits {
    pub bullets: Vec<usize>,
    pub aliens: Vec<usize>,
}

impl BulletHits {
    pub fn kills(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }
}

/// Each bullet claims the first overlapping alien not already claimed.
/// Every match pairs exactly one bullet with exactly one alien.
pub fn bullets_vs_aliens(bullets: &[Bullet], aliens: &[Alien]) -> BulletHits {
    let mut hits = BulletHits::default();
    let alien_rects: Vec<_> = aliens.iter().map(|a| a.body.rect()).collect();

    for (bi, bullet) in bullets.iter().enumerate() {
        let rect = bullet.body.rect();
        let target = alien_rects
            .iter()
            .enumerate()
            .find(|(ai, alien)| !hits.aliens.contains(ai) && rect.overlaps(alien));
        if let Some((ai, _)) = target {
            hits.bullets.push(bi);
            hits.aliens.push(ai);
        }
    }
    hits
}

/// Any overlap at all counts once.
pub fn ship_hits_alien(ship: &Ship, aliens: &[Alien]) -> bool {
    let rect = ship.body.rect();
    aliens.iter().any(|a| rect.overlaps(&a.body.rect()))
}

/// Indices of every pickup the ship is touching.
pub fn ship_vs_powerups(ship: &Ship, powerups: &[PowerUp]) -> Vec<usize> {
    let rect = ship.body.rect();
    powerups
        .iter()
        .enumerate()
        .filter(|(_, p)| rect.overlaps(&p.body.rect()))
        .map(|(i, _)| i)
        .collect()
}

/// True once any alien's bottom edge reaches the bottom of the viewport.
pub fn aliens_reached_bottom(aliens: &[Alien], screen_height: f32) -> bool {
    let bottom = screen_height as i32;
    aliens.iter().any(|a| a.body.rect().bottom() >= bottom)
}
