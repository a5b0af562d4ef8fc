//! The sample queue: an ordered list of finite sources played back to back as
//! one endless stream.
//!
//! The playback engine pulls from the queue on its own clock while the control
//! loop enqueues from elsewhere, so the order lives behind a single mutex. A
//! pull holds the lock for its whole duration: an enqueue that returns before
//! a pull starts is always visible to that pull.

use crate::sources::{silence, AudioSource, BoxedSource, Frame, Pull};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle shared between the engine and the control loop.
pub type SharedQueue = Arc<SampleQueue>;

#[derive(Default)]
pub struct SampleQueue {
    sources: Mutex<VecDeque<BoxedSource>>,
}

impl SampleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedQueue {
        Arc::new(Self::new())
    }

    /// The queue never fails, so a panic on another thread while holding the
    /// lock must not take playback down with it.
    fn lock(&self) -> MutexGuard<'_, VecDeque<BoxedSource>> {
        self.sources.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append sources to the back of the queue, keeping their order.
    pub fn enqueue<I>(&self, sources: I)
    where
        I: IntoIterator<Item = BoxedSource>,
    {
        let mut queue = self.lock();
        let before = queue.len();
        queue.extend(sources);

        if queue.len() > before {
            debug!(
                "Enqueued {} source(s), queue length: {}",
                queue.len() - before,
                queue.len()
            );
        }
    }

    /// Fill `out` completely, draining sources front to back and padding
    /// with silence once none are left.
    ///
    /// Pulls that produce nothing without exhausting their source share one
    /// budget per call: the number of sources queued when the call starts,
    /// plus one. Once it is spent the rest of the buffer is silence and the
    /// stalled source stays at the front for the next call.
    pub fn pull_into(&self, out: &mut [Frame]) {
        let mut queue = self.lock();
        let mut stalls_left = queue.len() + 1;
        let mut filled = 0;

        while filled < out.len() {
            let Some(front) = queue.front_mut() else {
                silence::fill(&mut out[filled..]);
                break;
            };

            let pull = front.pull_frames(&mut out[filled..]);
            filled += pull.frames();

            match pull {
                Pull::Exhausted(_) => {
                    queue.pop_front();
                    trace!("Source drained, {} left in queue", queue.len());
                }
                Pull::Filled(0) => {
                    stalls_left -= 1;
                    if stalls_left == 0 {
                        trace!("Front source stalled, padding {} frames", out.len() - filled);
                        silence::fill(&mut out[filled..]);
                        break;
                    }
                }
                Pull::Filled(_) => {}
            }
        }
    }

    /// Pull exactly `count` frames.
    pub fn pull(&self, count: usize) -> Vec<Frame> {
        let mut frames = vec![silence::SILENCE; count];
        self.pull_into(&mut frames);
        frames
    }

    /// True when no sources are queued, meaning the next pull is all silence.
    pub fn is_idle(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of sources waiting to be drained, including the one playing.
    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

/// The queue is itself a source that never runs dry.
impl AudioSource for SampleQueue {
    fn pull_frames(&mut self, out: &mut [Frame]) -> Pull {
        self.pull_into(out);
        Pull::Filled(out.len())
    }
}

impl AudioSource for SharedQueue {
    fn pull_frames(&mut self, out: &mut [Frame]) -> Pull {
        self.pull_into(out);
        Pull::Filled(out.len())
    }
}
