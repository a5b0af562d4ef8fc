//! Test infrastructure for drum-queue integration tests.
//!
//! Provides mock sources, frame helpers and WAV fixture writers so the queue
//! can be exercised without a sound card or a real drum kit.

#![allow(dead_code, unused_imports)]

use hound::{SampleFormat, WavSpec, WavWriter};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Re-export key types from the main crate
pub use drum_queue::library::{OpenError, SampleLibrary, SourceProvider};
pub use drum_queue::queue::{SampleQueue, SharedQueue};
pub use drum_queue::sources::{
    memory::BufferedSource, silence::SILENCE, AudioSource, BoxedSource, Frame, Pull,
};

/// A source that answers each pull with the next scripted step.
///
/// Each step is the list of frames to hand out for one pull (cut short if the
/// caller asks for fewer). The source reports exhaustion together with its
/// last step.
pub struct ScriptedSource {
    steps: VecDeque<Vec<Frame>>,
    pub pulls: usize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Vec<Frame>>) -> Self {
        Self {
            steps: steps.into(),
            pulls: 0,
        }
    }

    pub fn boxed(steps: Vec<Vec<Frame>>) -> BoxedSource {
        Box::new(Self::new(steps))
    }
}

impl AudioSource for ScriptedSource {
    fn pull_frames(&mut self, out: &mut [Frame]) -> Pull {
        self.pulls += 1;

        let Some(mut step) = self.steps.pop_front() else {
            return Pull::Exhausted(0);
        };

        let n = step.len().min(out.len());
        out[..n].copy_from_slice(&step[..n]);

        // Keep whatever did not fit for the next pull
        if n < step.len() {
            step.drain(..n);
            self.steps.push_front(step);
        }

        if self.steps.is_empty() {
            Pull::Exhausted(n)
        } else {
            Pull::Filled(n)
        }
    }
}

/// `len` frames of `(value, value)`.
pub fn constant(value: f32, len: usize) -> Vec<Frame> {
    vec![(value, value); len]
}

/// Frames `(start, start)`, `(start + 1, start + 1)`, ... for easy ordering checks.
pub fn ramp(start: usize, len: usize) -> Vec<Frame> {
    (start..start + len).map(|i| (i as f32, i as f32)).collect()
}

pub fn buffered(frames: Vec<Frame>) -> BoxedSource {
    Box::new(BufferedSource::new(frames))
}

pub fn silence(len: usize) -> Vec<Frame> {
    vec![SILENCE; len]
}

/// Write a 16-bit WAV file with interleaved `samples`.
pub fn write_wav(path: &Path, channels: u16, sample_rate: u32, samples: &[i16]) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).expect("Failed to create WAV fixture");
    for &sample in samples {
        writer.write_sample(sample).expect("Failed to write WAV sample");
    }
    writer.finalize().expect("Failed to finalize WAV fixture");
}

/// A temporary sample directory laid out like the drum kit.
pub struct TestKit {
    pub dir: TempDir,
}

impl TestKit {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Add a stereo 44.1 kHz sample at `id`, creating directories as needed.
    pub fn add_stereo(&self, id: &str, samples: &[i16]) -> PathBuf {
        self.add(id, 2, 44100, samples)
    }

    pub fn add(&self, id: &str, channels: u16, sample_rate: u32, samples: &[i16]) -> PathBuf {
        let path = self.root().join(id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create kit directory");
        }
        write_wav(&path, channels, sample_rate, samples);
        path
    }

    pub fn add_raw(&self, id: &str, bytes: &[u8]) -> PathBuf {
        let path = self.root().join(id);
        std::fs::write(&path, bytes).expect("Failed to write raw fixture");
        path
    }

    pub fn library(&self) -> SampleLibrary {
        SampleLibrary::new(self.root())
    }
}

impl Default for TestKit {
    fn default() -> Self {
        Self::new()
    }
}
