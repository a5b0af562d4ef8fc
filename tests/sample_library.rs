//! Integration tests for opening samples from disk and queueing them.

mod common;

use common::*;
use drum_queue::control::{self, SharedProvider};
use drum_queue::event::QueueAction;
use drum_queue::pattern::Pattern;
use std::sync::Arc;

const HALF: i16 = 16384; // 0.5 after conversion to f32
const QUARTER: i16 = 8192; // 0.25

#[test]
fn test_open_stereo_wav() {
    let kit = TestKit::new();
    kit.add_stereo("drums/kick/kick.wav", &[HALF, -HALF, QUARTER, 0]);

    let library = kit.library();
    let mut source = library.open("drums/kick/kick.wav").unwrap();

    let mut out = vec![SILENCE; 4];
    assert_eq!(source.pull_frames(&mut out), Pull::Exhausted(2));
    assert_eq!(&out[..2], &[(0.5, -0.5), (0.25, 0.0)]);
}

#[test]
fn test_open_mono_wav_plays_on_both_channels() {
    let kit = TestKit::new();
    kit.add("snare909.wav", 1, 44100, &[HALF, QUARTER]);

    let library = kit.library();
    let queue = SampleQueue::new();
    queue.enqueue(vec![library.open("snare909.wav").unwrap()]);

    assert_eq!(queue.pull(3), vec![(0.5, 0.5), (0.25, 0.25), (0.0, 0.0)]);
}

#[test]
fn test_open_other_sample_rate_still_plays() {
    let kit = TestKit::new();
    kit.add("slow.wav", 2, 22050, &[HALF, HALF]);

    let mut source = kit.library().open("slow.wav").unwrap();
    let mut out = vec![SILENCE; 1];
    assert_eq!(source.pull_frames(&mut out), Pull::Exhausted(1));
    assert_eq!(out[0], (0.5, 0.5));
}

#[test]
fn test_missing_sample_is_not_found() {
    let kit = TestKit::new();
    let library = kit.library();

    let result = library.open("drums/kick/nope.wav");
    assert!(matches!(result, Err(OpenError::NotFound { id }) if id == "drums/kick/nope.wav"));
}

#[test]
fn test_directory_is_not_a_sample() {
    let kit = TestKit::new();
    kit.add_stereo("drums/hat.wav", &[0, 0]);

    assert!(matches!(
        kit.library().open("drums"),
        Err(OpenError::NotFound { .. })
    ));
}

#[test]
fn test_identifiers_outside_root_are_rejected() {
    let kit = TestKit::new();
    let library = kit.library();

    for id in ["", "../kick.wav", "drums/../../kick.wav", "/etc/hosts", "./kick.wav"] {
        assert!(
            matches!(library.open(id), Err(OpenError::InvalidIdentifier { .. })),
            "{id:?} should be rejected"
        );
    }
}

#[test]
fn test_garbage_file_is_decode_error() {
    let kit = TestKit::new();
    kit.add_raw("broken.wav", b"definitely not a RIFF file");

    let result = kit.library().open("broken.wav");
    assert!(matches!(result, Err(OpenError::Decode { .. })));

    let message = result.err().unwrap().to_string();
    assert!(message.contains("broken.wav"), "{message}");
}

#[test]
fn test_samples_are_cached_with_independent_cursors() {
    let kit = TestKit::new();
    let path = kit.add_stereo("clap.wav", &[HALF, HALF, QUARTER, QUARTER]);
    let library = kit.library();

    let mut first = library.open("clap.wav").unwrap();
    assert_eq!(library.cached(), 1);

    // Served from memory from here on
    std::fs::remove_file(path).unwrap();
    let mut second = library.open("clap.wav").unwrap();
    assert_eq!(library.cached(), 1);

    let mut out = vec![SILENCE; 1];
    first.pull_frames(&mut out);
    assert_eq!(out[0], (0.5, 0.5));
    second.pull_frames(&mut out);
    assert_eq!(out[0], (0.5, 0.5));
}

#[test]
fn test_open_all_is_all_or_nothing() {
    let kit = TestKit::new();
    kit.add_stereo("kick.wav", &[HALF, HALF]);
    let library = kit.library();

    let ids = vec!["kick.wav".to_string(), "kick.wav".to_string()];
    assert_eq!(library.open_all(&ids).unwrap().len(), 2);

    let ids = vec!["kick.wav".to_string(), "missing.wav".to_string()];
    assert!(library.open_all(&ids).is_err());
}

#[tokio::test]
async fn test_control_enqueues_samples_in_order() {
    let kit = TestKit::new();
    kit.add_stereo("kick.wav", &[HALF, HALF]);
    kit.add_stereo("hat.wav", &[QUARTER, QUARTER]);

    let queue = SampleQueue::shared();
    let provider: SharedProvider = Arc::new(kit.library());

    let action = QueueAction::EnqueueSamples {
        ids: vec!["kick.wav".to_string(), "hat.wav".to_string()],
    };
    control::handle_action(action, &queue, &provider, 4).await;

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.pull(3), vec![(0.5, 0.5), (0.25, 0.25), (0.0, 0.0)]);
}

#[tokio::test]
async fn test_control_rejects_request_with_missing_sample() {
    let kit = TestKit::new();
    kit.add_stereo("kick.wav", &[HALF, HALF]);

    let queue = SampleQueue::shared();
    let provider: SharedProvider = Arc::new(kit.library());

    let action = QueueAction::EnqueuePattern {
        pattern: Pattern::parse("kick.wav | missing.wav"),
    };
    control::handle_action(action, &queue, &provider, 4).await;

    assert!(queue.is_idle());
}

#[tokio::test]
async fn test_control_enqueues_pattern_beats() {
    let kit = TestKit::new();
    kit.add_stereo("kick.wav", &[HALF, HALF]);
    kit.add_stereo("hat.wav", &[QUARTER, QUARTER]);

    let queue = SampleQueue::shared();
    let provider: SharedProvider = Arc::new(kit.library());

    let action = QueueAction::EnqueuePattern {
        pattern: Pattern::parse("kick.wav hat.wav | - | hat.wav"),
    };
    control::handle_action(action, &queue, &provider, 2).await;
    assert_eq!(queue.len(), 3);

    assert_eq!(
        queue.pull(7),
        vec![
            (0.75, 0.75),
            (0.0, 0.0),
            (0.0, 0.0),
            (0.0, 0.0),
            (0.25, 0.25),
            (0.0, 0.0),
            (0.0, 0.0),
        ]
    );
    assert!(queue.is_idle());
}

#[tokio::test]
async fn test_status_request_leaves_queue_alone() {
    let queue = SampleQueue::shared();
    queue.enqueue(vec![buffered(constant(0.5, 3))]);
    let provider: SharedProvider = Arc::new(SampleLibrary::new("does-not-exist"));

    control::handle_action(QueueAction::Status, &queue, &provider, 2).await;

    assert_eq!(queue.len(), 1);
}
