//! Offline rendering of the queue to a WAV file.

use crate::{net, queue::SampleQueue, sources::Frame};
use anyhow::{Context, Result};
use std::path::Path;

/// Pull chunks of `chunk_frames` until the queue runs dry.
///
/// The final chunk keeps the silence the queue padded it with. At most
/// `max_frames` frames are rendered, so a stalled source cannot hold this up.
pub fn until_idle(queue: &SampleQueue, chunk_frames: usize, max_frames: usize) -> Vec<Frame> {
    let chunk_frames = chunk_frames.max(1);
    let mut frames = Vec::new();

    while !queue.is_idle() && frames.len() < max_frames {
        let count = chunk_frames.min(max_frames - frames.len());
        frames.extend(queue.pull(count));
    }

    frames
}

pub fn write_wav(path: &Path, frames: &[Frame]) -> Result<()> {
    let mut writer = hound::WavWriter::create(path, net::wav_spec())
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for &(left, right) in frames {
        writer.write_sample(net::to_pcm16(left))?;
        writer.write_sample(net::to_pcm16(right))?;
    }

    writer
        .finalize()
        .with_context(|| format!("Failed to finish writing {}", path.display()))
}
