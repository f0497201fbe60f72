//! Game entity types: positioned rectangular bodies plus the
//! per-session statistics block. Pure data with a few geometric helpers.

use crate::settings::Settings;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Integer bounding rectangle used for collision tests and drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Ship,
    Bullet,
    Alien,
    PowerUp,
}

/// A rectangular body. The float position is authoritative; the integer
/// rectangle is derived from it every time it is asked for.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(kind: EntityKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            width: self.width as i32,
            height: self.height as i32,
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

// ── Per-kind bodies ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub body: Entity,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            body: Entity::new(
                EntityKind::Ship,
                0.0,
                0.0,
                settings.ship_width,
                settings.ship_height,
            ),
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    /// Park the ship at bottom-center of the viewport.
    pub fn center(&mut self, settings: &Settings) {
        self.body.x = (settings.screen_width - self.body.width) / 2.0;
        self.body.y = settings.screen_height - self.body.height;
    }

    /// Horizontal-only motion, clamped to the viewport.
    pub fn update(&mut self, speed: f32, settings: &Settings) {
        if self.moving_right && self.body.x + self.body.width < settings.screen_width {
            self.body.x = (self.body.x + speed).min(settings.screen_width - self.body.width);
        }
        if self.moving_left && self.body.x > 0.0 {
            self.body.x = (self.body.x - speed).max(0.0);
        }
    }
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub body: Entity,
}

#[derive(Clone, Debug)]
pub struct Alien {
    pub body: Entity,
    /// Size of this alien's occasional downward nudge.
    pub jitter: f32,
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub body: Entity,
}

// ── Game flow ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Start menu shown; the simulation does not advance.
    Inactive,
    Active,
}

/// Score, lives and behavioural telemetry. `high_score` survives `reset`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub score: u64,
    pub ships_left: u32,
    pub level: u32,
    pub high_score: u64,
    pub shots_fired: u32,
    pub shots_hit: u32,
    /// Seconds from each stimulus to the kill that answered it, oldest first.
    pub reaction_times: Vec<f64>,
    pub lives_lost: u32,
    pub powerups_collected: u32,
}

impl GameStats {
    pub fn new(settings: &Settings) -> Self {
        let mut stats = GameStats {
            score: 0,
            ships_left: 0,
            level: 1,
            high_score: 0,
            shots_fired: 0,
            shots_hit: 0,
            reaction_times: Vec::new(),
            lives_lost: 0,
            powerups_collected: 0,
        };
        stats.reset(settings);
        stats
    }

    /// Clear everything a new game starts over with.
    pub fn reset(&mut self, settings: &Settings) {
        self.score = 0;
        self.ships_left = settings.ship_limit;
        self.level = 1;
        self.shots_fired = 0;
        self.shots_hit = 0;
        self.reaction_times.clear();
        self.lives_lost = 0;
        self.powerups_collected = 0;
    }

    pub fn check_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }
}
