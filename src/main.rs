#[macro_use]
extern crate log;

use anyhow::{bail, Result};
use drum_queue::{
    config, control, engine, event::EventBus, library::SampleLibrary, net, pattern::Pattern,
    queue::SampleQueue, render, stdin,
};
use std::{path::PathBuf, sync::Arc};

/// Longest offline render, in seconds of audio.
const MAX_RENDER_SECS: usize = 60;

fn init_logging() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&filters)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = config::load().await?;
    debug!("Configuration: {config:?}");

    let library = Arc::new(SampleLibrary::new(&config.samples_dir));
    info!("Resolving samples from {}", library.root().display());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(flag) = args.first() {
        if flag != "--render" || args.len() < 3 {
            bail!("Usage: drum-queue [--render <out.wav> <pattern>]");
        }
        return render_pattern(&config, &library, PathBuf::from(&args[1]), &args[2..].join(" "));
    }

    let queue = SampleQueue::shared();
    let bus = EventBus::new();

    control::init(&bus, queue.clone(), library, config.beat_frames());
    let output = engine::start(queue, config.chunk_frames());
    net::init(&config.listen_addr, output).await?;
    stdin::init(&bus);

    info!("{}", stdin::HELP);

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}

fn render_pattern(
    config: &config::Config,
    library: &SampleLibrary,
    out: PathBuf,
    pattern: &str,
) -> Result<()> {
    let pattern = Pattern::parse(pattern);
    let sources = pattern.build(library, config.beat_frames())?;

    let queue = SampleQueue::new();
    queue.enqueue(sources);

    let max_frames = MAX_RENDER_SECS * drum_queue::constants::SAMPLE_RATE as usize;
    let frames = render::until_idle(&queue, config.chunk_frames(), max_frames);
    render::write_wav(&out, &frames)?;

    info!(
        "Rendered {pattern} to {} ({} frames)",
        out.display(),
        frames.len()
    );

    Ok(())
}
