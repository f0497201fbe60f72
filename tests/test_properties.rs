mod common;

use proptest::prelude::*;

use alien_invasion::collision::bullets_vs_aliens;
use alien_invasion::difficulty::accuracy;
use alien_invasion::entities::{Alien, Bullet, Entity, EntityKind, Ship};
use alien_invasion::formation::Formation;
use alien_invasion::projectiles::Projectiles;
use alien_invasion::settings::{DynamicSettings, FleetDirection, Settings};

use common::{quiet_settings, seeded_rng, started};

fn direction() -> impl Strategy<Value = FleetDirection> {
    prop_oneof![Just(FleetDirection::Right), Just(FleetDirection::Left)]
}

proptest! {
    #[test]
    fn fleet_moves_in_lockstep(speed in 0.1f32..5.0, dir in direction()) {
        let s = quiet_settings();
        let mut rng = seeded_rng();
        let mut f = Formation::new();
        f.spawn_fleet(&s, &mut rng);
        let before: Vec<f32> = f.aliens.iter().map(|a| a.body.x).collect();

        let d = DynamicSettings { alien_speed: speed, fleet_direction: dir, ..DynamicSettings::default() };
        f.advance(&d, &s, &mut rng);

        for (x0, alien) in before.iter().zip(&f.aliens) {
            prop_assert!((alien.body.x - x0 - speed * dir.sign()).abs() < 1e-3);
        }
    }

    #[test]
    fn fleet_layout_is_reproducible(
        width in 200.0f32..2000.0,
        height in 200.0f32..1500.0,
        alien in 10.0f32..80.0,
    ) {
        let s = Settings {
            screen_width: width,
            screen_height: height,
            alien_width: alien,
            alien_height: alien,
            ..Settings::default()
        };
        let mut f = Formation::new();
        f.spawn_fleet(&s, &mut seeded_rng());
        let first: Vec<(f32, f32)> = f.aliens.iter().map(|a| (a.body.x, a.body.y)).collect();
        f.spawn_fleet(&s, &mut rand::thread_rng());
        let second: Vec<(f32, f32)> = f.aliens.iter().map(|a| (a.body.x, a.body.y)).collect();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, Formation::grid_positions(&s));
    }

    #[test]
    fn magazine_never_exceeds_cap(cap in 1usize..10, shots in 0usize..25) {
        let s = Settings { bullets_allowed: cap, ..Settings::default() };
        let ship = Ship::new(&s);
        let mut p = Projectiles::new();
        for _ in 0..shots {
            p.fire(&ship, &s);
            prop_assert!(p.len() <= cap);
        }
        prop_assert_eq!(p.len(), shots.min(cap));
    }

    #[test]
    fn every_match_is_one_bullet_and_one_alien(
        aliens in prop::collection::vec((0.0f32..500.0, 0.0f32..500.0), 0..20),
        bullets in prop::collection::vec((0.0f32..500.0, 0.0f32..500.0), 0..20),
    ) {
        let aliens: Vec<Alien> = aliens
            .into_iter()
            .map(|(x, y)| Alien { body: Entity::new(EntityKind::Alien, x, y, 50.0, 50.0), jitter: 1.0 })
            .collect();
        let bullets: Vec<Bullet> = bullets
            .into_iter()
            .map(|(x, y)| Bullet { body: Entity::new(EntityKind::Bullet, x, y, 5.0, 20.0) })
            .collect();

        let hits = bullets_vs_aliens(&bullets, &aliens);
        prop_assert_eq!(hits.bullets.len(), hits.aliens.len());

        let mut b = hits.bullets.clone();
        b.sort_unstable();
        b.dedup();
        prop_assert_eq!(b.len(), hits.bullets.len());
        let mut a = hits.aliens.clone();
        a.sort_unstable();
        a.dedup();
        prop_assert_eq!(a.len(), hits.aliens.len());

        for (bi, ai) in hits.bullets.iter().zip(&hits.aliens) {
            prop_assert!(bullets[*bi].body.rect().overlaps(&aliens[*ai].body.rect()));
        }
    }

    #[test]
    fn score_grows_by_points_per_kill(picks in prop::collection::btree_set(0usize..45, 1..10)) {
        let mut h = started();
        let score = h.game.stats.score;
        let points = h.game.dynamic.alien_points;
        for &i in &picks {
            let alien = &h.game.formation.aliens[i];
            let bullet = Bullet {
                body: Entity::new(EntityKind::Bullet, alien.body.x + 20.0, alien.body.y + 20.0, 5.0, 20.0),
            };
            h.game.projectiles.bullets.push(bullet);
        }

        let outcome = h.game.tick(&mut h.rng);

        prop_assert_eq!(outcome.aliens_destroyed, picks.len());
        prop_assert_eq!(h.game.stats.score, score + points * picks.len() as u64);
        prop_assert_eq!(h.game.formation.len(), 45 - picks.len());
        prop_assert_eq!(h.game.stats.level, 1);
    }

    #[test]
    fn accuracy_stays_in_unit_range(fired in 0u32..1000, hit_frac in 0.0f64..=1.0) {
        let hit = (fired as f64 * hit_frac) as u32;
        let acc = accuracy(fired, hit);
        prop_assert!((0.0..=1.0).contains(&acc));
        if fired == 0 {
            prop_assert_eq!(acc, 0.0);
        }
    }
}
