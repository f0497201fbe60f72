//! Audio cue sink. Fire-and-forget: playing a cue never fails.

use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Fire,
    Explosion,
    PowerUp,
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Terminal "speaker": rings the bell for the cues it is told to, and logs
/// every cue either way.
#[derive(Clone, Debug)]
pub struct TerminalBell {
    pub ring_on: Vec<Cue>,
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self {
            ring_on: vec![Cue::PowerUp],
        }
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        log::debug!("audio cue {cue:?}");
        if self.ring_on.contains(&cue) {
            let mut err = std::io::stderr();
            let _ = err.write_all(b"\x07");
            let _ = err.flush();
        }
    }
}
