//! Turns queue requests from the event bus into enqueued sources.
//!
//! Samples are opened and decoded on a blocking thread, and only a request
//! whose samples all opened reaches the queue.

use crate::{
    event::{Event, EventBus, QueueAction},
    library::{OpenError, SourceProvider},
    queue::SharedQueue,
    sources::BoxedSource,
};
use std::sync::Arc;

pub type SharedProvider = Arc<dyn SourceProvider>;

pub fn init(bus: &EventBus, queue: SharedQueue, provider: SharedProvider, beat_frames: usize) {
    let mut subscriber = bus.subscribe();

    tokio::spawn(async move {
        while let Some(Event::Queue(action)) = subscriber.recv().await {
            handle_action(action, &queue, &provider, beat_frames).await;
        }

        debug!("Event bus closed, stopping queue control loop");
    });
}

/// Open the sources a request asks for.
pub fn open_sources(
    action: &QueueAction,
    provider: &dyn SourceProvider,
    beat_frames: usize,
) -> Result<Vec<BoxedSource>, OpenError> {
    match action {
        QueueAction::EnqueueSamples { ids } => provider.open_all(ids),
        QueueAction::EnqueuePattern { pattern } => pattern.build(provider, beat_frames),
        QueueAction::Status => Ok(Vec::new()),
    }
}

pub async fn handle_action(
    action: QueueAction,
    queue: &SharedQueue,
    provider: &SharedProvider,
    beat_frames: usize,
) {
    if let QueueAction::Status = action {
        if queue.is_idle() {
            info!("Queue is idle");
        } else {
            info!("Queue holds {} source(s)", queue.len());
        }
        return;
    }

    let opened = {
        let provider = provider.clone();
        let action = action.clone();
        tokio::task::spawn_blocking(move || open_sources(&action, provider.as_ref(), beat_frames))
            .await
    };

    match opened {
        Ok(Ok(sources)) => {
            info!("Queueing {} source(s) for {:?}", sources.len(), action);
            queue.enqueue(sources);
        }
        Ok(Err(e)) => error!("Not queueing request, {e}"),
        Err(e) => error!("Sample loader task failed: {e}"),
    }
}
