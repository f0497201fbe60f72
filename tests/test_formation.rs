mod common;

use alien_invasion::entities::{Alien, Entity, EntityKind};
use alien_invasion::formation::Formation;
use alien_invasion::settings::{DynamicSettings, FleetDirection, Settings};

use common::{quiet_settings, seeded_rng};

fn positions(f: &Formation) -> Vec<(f32, f32)> {
    f.aliens.iter().map(|a| (a.body.x, a.body.y)).collect()
}

// ── Grid layout ───────────────────────────────────────────────────────────────

#[test]
fn default_grid_is_nine_by_five() {
    let grid = Formation::grid_positions(&Settings::default());
    assert_eq!(grid.len(), 45);
    assert_eq!(grid[0], (50.0, 50.0));
    assert_eq!(grid[1], (150.0, 50.0));
    assert_eq!(grid[8], (850.0, 50.0));
    assert_eq!(grid[9], (50.0, 150.0));
    assert_eq!(grid[44], (850.0, 450.0));
}

#[test]
fn grid_respects_margins() {
    let s = Settings::default();
    for (x, y) in Formation::grid_positions(&s) {
        assert!(x < s.screen_width - 2.0 * s.alien_width);
        assert!(y < s.screen_height - 3.0 * s.alien_height);
    }
}

#[test]
fn grid_too_small_for_a_single_alien_is_empty() {
    let s = Settings {
        screen_width: 120.0,
        screen_height: 120.0,
        ..Settings::default()
    };
    assert!(Formation::grid_positions(&s).is_empty());
}

#[test]
fn spawn_fleet_is_idempotent() {
    let s = Settings::default();
    let mut rng = seeded_rng();
    let mut f = Formation::new();

    f.spawn_fleet(&s, &mut rng);
    let first = positions(&f);
    f.aliens.truncate(3);
    f.spawn_fleet(&s, &mut rng);

    assert_eq!(positions(&f), first);
    assert_eq!(f.len(), 45);
}

#[test]
fn spawned_aliens_carry_jitter_in_range() {
    let s = Settings::default();
    let mut f = Formation::new();
    f.spawn_fleet(&s, &mut seeded_rng());
    for alien in &f.aliens {
        assert_eq!(alien.body.kind, EntityKind::Alien);
        assert!(alien.jitter >= 0.5 && alien.jitter < 1.5);
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn advance_moves_whole_fleet_by_speed_times_direction() {
    let s = quiet_settings();
    let mut rng = seeded_rng();
    let mut f = Formation::new();
    f.spawn_fleet(&s, &mut rng);
    let before = positions(&f);

    let mut d = DynamicSettings::default();
    d.alien_speed = 2.0;
    f.advance(&d, &s, &mut rng);
    for ((x0, y0), (x1, y1)) in before.iter().zip(positions(&f)) {
        assert_eq!(x1 - x0, 2.0);
        assert_eq!(y1, *y0);
    }

    d.fleet_direction = FleetDirection::Left;
    f.advance(&d, &s, &mut rng);
    assert_eq!(positions(&f), before);
}

#[test]
fn jitter_only_ever_moves_aliens_down() {
    let s = Settings {
        alien_jitter_chance: 1.0,
        ..Settings::default()
    };
    let mut rng = seeded_rng();
    let mut f = Formation::new();
    f.spawn_fleet(&s, &mut rng);
    let before: Vec<_> = f.aliens.iter().map(|a| (a.body.y, a.jitter)).collect();

    f.advance(&DynamicSettings::default(), &s, &mut rng);

    for (alien, (y0, jitter)) in f.aliens.iter().zip(before) {
        assert_eq!(alien.body.y, y0 + jitter);
    }
}

// ── Edges ─────────────────────────────────────────────────────────────────────

fn alien_at(x: f32, y: f32) -> Alien {
    Alien {
        body: Entity::new(EntityKind::Alien, x, y, 50.0, 50.0),
        jitter: 1.0,
    }
}

#[test]
fn fresh_fleet_is_clear_of_edges() {
    let s = Settings::default();
    let mut f = Formation::new();
    f.spawn_fleet(&s, &mut seeded_rng());
    assert!(!f.check_edges(&s));
}

#[test]
fn edge_detected_on_either_side() {
    let s = Settings::default();
    let mut f = Formation::new();

    f.aliens = vec![alien_at(500.0, 100.0), alien_at(950.0, 100.0)];
    assert!(f.check_edges(&s));

    f.aliens = vec![alien_at(949.0, 100.0)];
    assert!(!f.check_edges(&s));

    f.aliens = vec![alien_at(0.0, 100.0)];
    assert!(f.check_edges(&s));

    f.aliens = vec![alien_at(1.0, 100.0)];
    assert!(!f.check_edges(&s));
}

#[test]
fn drop_fleet_moves_every_alien_down() {
    let mut f = Formation::new();
    f.aliens = vec![alien_at(100.0, 100.0), alien_at(300.0, 250.0)];
    f.drop_fleet(10.0);
    assert_eq!(positions(&f), vec![(100.0, 110.0), (300.0, 260.0)]);
}

#[test]
fn remove_drops_exactly_the_listed_aliens() {
    let mut f = Formation::new();
    f.aliens = (0..5).map(|i| alien_at(i as f32 * 100.0, 0.0)).collect();
    f.remove(&[3, 1, 3]);
    let xs: Vec<f32> = f.aliens.iter().map(|a| a.body.x).collect();
    assert_eq!(xs, vec![0.0, 200.0, 400.0]);

    f.clear();
    assert!(f.is_empty());
}
