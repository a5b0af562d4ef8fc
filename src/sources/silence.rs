//! Silence: the filler frame and a finite source of silent frames.

use crate::sources::{AudioSource, Frame, Pull};
use std::time::Duration;

/// The neutral frame, zero amplitude on both channels.
pub const SILENCE: Frame = (0.0, 0.0);

/// Overwrite every frame in `out` with silence.
pub fn fill(out: &mut [Frame]) {
    out.fill(SILENCE);
}

/// A finite run of silent frames, used to hold the length of a rest.
#[derive(Clone, Debug)]
pub struct Silence {
    remaining: usize,
}

impl Silence {
    pub fn frames(count: usize) -> Self {
        Self { remaining: count }
    }

    /// Silence lasting `duration` at `sample_rate`, rounded down to whole frames.
    pub fn duration(duration: Duration, sample_rate: u32) -> Self {
        Self::frames((duration.as_secs_f64() * sample_rate as f64) as usize)
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl AudioSource for Silence {
    fn pull_frames(&mut self, out: &mut [Frame]) -> Pull {
        let n = out.len().min(self.remaining);
        fill(&mut out[..n]);
        self.remaining -= n;

        if self.remaining == 0 {
            Pull::Exhausted(n)
        } else {
            Pull::Filled(n)
        }
    }
}
