//! Audio source abstraction for the sample queue.
//!
//! All audio sources implement the `AudioSource` trait, which provides
//! a pull-based interface for reading stereo frames into a caller-owned buffer.

pub mod memory;
pub mod mix;
pub mod silence;
pub mod symphonia;

/// A stereo frame (left, right) as amplitudes in the range `-1.0..=1.0`.
pub type Frame = (f32, f32);

/// An owned, type-erased source as stored by the queue.
pub type BoxedSource = Box<dyn AudioSource>;

/// Outcome of a single pull from a source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    /// This many frames were written and the source may produce more later.
    Filled(usize),

    /// This many frames were written and the source will never produce more.
    Exhausted(usize),
}

impl Pull {
    /// Number of frames written by the pull.
    pub fn frames(self) -> usize {
        match self {
            Pull::Filled(n) | Pull::Exhausted(n) => n,
        }
    }

    pub fn is_exhausted(self) -> bool {
        matches!(self, Pull::Exhausted(_))
    }
}

/// Trait for audio sources that can produce frames on demand.
///
/// Sources are finite and consumed strictly forward: once a pull returns
/// `Pull::Exhausted`, every later pull should do the same with zero frames.
pub trait AudioSource: Send {
    /// Write up to `out.len()` frames to the front of `out`.
    ///
    /// Returns how many frames were written and whether the source is now
    /// exhausted. Frames past the written count are left untouched.
    fn pull_frames(&mut self, out: &mut [Frame]) -> Pull;
}

impl<S: AudioSource + ?Sized> AudioSource for Box<S> {
    fn pull_frames(&mut self, out: &mut [Frame]) -> Pull {
        (**self).pull_frames(out)
    }
}
