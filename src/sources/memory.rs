//! Finite in-memory audio source.
//!
//! Decoded drum samples are short, so the library keeps them fully decoded and
//! hands out one of these per trigger, each with its own read position.

use crate::sources::{AudioSource, Frame, Pull};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct BufferedSource {
    position: usize,
    frames: Arc<[Frame]>,
}

impl Default for BufferedSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl BufferedSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self::shared(frames.into())
    }

    /// A source over frames that other sources may also be reading.
    pub fn shared(frames: Arc<[Frame]>) -> Self {
        Self {
            position: 0,
            frames,
        }
    }

    /// Total length in frames, regardless of how much has been read.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames left before the source is exhausted.
    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.position)
    }
}

impl AudioSource for BufferedSource {
    fn pull_frames(&mut self, out: &mut [Frame]) -> Pull {
        let to_read = out.len().min(self.remaining());

        out[..to_read].copy_from_slice(&self.frames[self.position..self.position + to_read]);
        self.position += to_read;

        if self.remaining() == 0 {
            Pull::Exhausted(to_read)
        } else {
            Pull::Filled(to_read)
        }
    }
}
