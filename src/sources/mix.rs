//! Superposition of several sources into one.

use crate::sources::{silence::SILENCE, AudioSource, BoxedSource, Frame, Pull};

/// Plays all of its inputs at once by summing their frames.
///
/// Inputs are dropped as they exhaust; the mix itself is exhausted once every
/// input is. Sums are clamped to `-1.0..=1.0`. Inputs are expected to fill
/// the whole request unless they exhaust; a short pull from a live input
/// shifts that input earlier relative to the others.
pub struct Mix {
    inputs: Vec<BoxedSource>,
    scratch: Vec<Frame>,
}

impl Mix {
    pub fn new(inputs: impl IntoIterator<Item = BoxedSource>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            scratch: Vec::new(),
        }
    }

    /// Number of inputs that have not exhausted yet.
    pub fn active_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl AudioSource for Mix {
    fn pull_frames(&mut self, out: &mut [Frame]) -> Pull {
        if self.inputs.is_empty() {
            return Pull::Exhausted(0);
        }

        if self.scratch.len() < out.len() {
            self.scratch.resize(out.len(), SILENCE);
        }

        let scratch = &mut self.scratch[..out.len()];
        let mut written = 0;

        self.inputs.retain_mut(|input| {
            let pull = input.pull_frames(scratch);
            let n = pull.frames();

            // Positions this input reaches first start from silence
            if n > written {
                out[written..n].fill(SILENCE);
                written = n;
            }

            for ((left, right), (l, r)) in out.iter_mut().zip(&scratch[..n]) {
                *left += l;
                *right += r;
            }

            !pull.is_exhausted()
        });

        for (left, right) in &mut out[..written] {
            *left = left.clamp(-1.0, 1.0);
            *right = right.clamp(-1.0, 1.0);
        }

        if self.inputs.is_empty() {
            Pull::Exhausted(written)
        } else {
            Pull::Filled(written)
        }
    }
}
