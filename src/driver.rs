//! Frame driver: turns abstract input commands into state-machine calls and
//! paces the loop at a fixed cadence. One tick is one update plus one draw;
//! a slow frame simply lowers the simulation rate.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::compute::Game;

/// Input after the terminal layer has decoded it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft(bool),
    MoveRight(bool),
    Fire,
    /// Explicit start action (menu click or key). Ignored mid-game.
    Start,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn apply(game: &mut Game, command: Command, rng: &mut impl Rng) -> Flow {
    match command {
        Command::MoveLeft(held) => game.set_moving_left(held),
        Command::MoveRight(held) => game.set_moving_right(held),
        Command::Fire => {
            game.fire_bullet();
        }
        Command::Start => {
            game.start(rng);
        }
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Apply a drained queue of commands in order. Stops at the first quit.
pub fn apply_all(
    game: &mut Game,
    commands: impl IntoIterator<Item = Command>,
    rng: &mut impl Rng,
) -> Flow {
    for command in commands {
        if apply(game, command, rng) == Flow::Quit {
            return Flow::Quit;
        }
    }
    Flow::Continue
}

#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    pub frame: Duration,
}

impl FrameClock {
    pub fn from_rate(ticks_per_second: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / ticks_per_second.max(1),
        }
    }

    /// How long to sleep so a frame that began at `started` fills its slot.
    pub fn remaining(&self, started: Instant) -> Duration {
        self.frame.saturating_sub(started.elapsed())
    }

    pub fn wait(&self, started: Instant) {
        let rest = self.remaining(started);
        if !rest.is_zero() {
            std::thread::sleep(rest);
        }
    }
}
