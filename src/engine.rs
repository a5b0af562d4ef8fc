//! Playback engine: pulls frames from the queue on a fixed clock.
//!
//! The loop keeps the number of frames sent in step with wall-clock time at
//! the output sample rate, so a late tick is made up for by a larger chunk on
//! the next one.

use crate::{
    constants::SAMPLE_RATE,
    queue::SharedQueue,
    sources::{silence::SILENCE, Frame},
};
use std::time::{Duration, Instant};
use tokio::sync::watch;

pub type EngineOutput = watch::Receiver<Vec<Frame>>;

fn tick_duration(chunk_frames: usize) -> Duration {
    Duration::from_secs_f64(chunk_frames as f64 / SAMPLE_RATE as f64)
}

pub fn start(queue: SharedQueue, chunk_frames: usize) -> EngineOutput {
    let (tx, rx) = watch::channel(Vec::new());

    tokio::spawn(async move {
        let start_time = Instant::now();
        let sleep_time = tick_duration(chunk_frames);
        let mut frames_sent: u64 = 0;
        let mut was_idle = true;
        let mut chunk = Vec::with_capacity(chunk_frames);

        info!(
            "Playback engine started: {chunk_frames} frames per tick ({} ms)",
            sleep_time.as_millis()
        );

        loop {
            let frames_due =
                ((start_time.elapsed() + sleep_time).as_secs_f64() * SAMPLE_RATE as f64) as u64;
            let chunk_size = frames_due.saturating_sub(frames_sent) as usize;

            chunk.clear();
            chunk.resize(chunk_size, SILENCE);
            queue.pull_into(&mut chunk);

            let idle = queue.is_idle();
            if idle != was_idle {
                if idle {
                    debug!("Queue drained, playing silence");
                } else {
                    debug!("Queue busy, {} source(s) pending", queue.len());
                }
                was_idle = idle;
            }

            if tx.send(chunk.clone()).is_err() {
                info!("All engine listeners dropped, stopping playback engine");
                break;
            }
            frames_sent += chunk_size as u64;

            tokio::time::sleep(sleep_time).await;
        }
    });

    rx
}
