use crate::constants::SAMPLE_RATE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_FILE: &str = "Config.toml";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory sample identifiers are resolved against
    pub samples_dir: PathBuf,

    /// Address the WAV stream is served on
    pub listen_addr: String,

    /// How much audio the engine pulls from the queue per tick
    pub chunk_ms: u64,

    /// Length of one beat in a drum pattern
    pub beat_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            samples_dir: PathBuf::from("static/audio"),
            listen_addr: "127.0.0.1:7878".to_string(),
            chunk_ms: 100,
            beat_ms: 250,
        }
    }
}

impl Config {
    pub fn chunk_frames(&self) -> usize {
        ms_to_frames(self.chunk_ms)
    }

    pub fn beat_frames(&self) -> usize {
        ms_to_frames(self.beat_ms)
    }
}

/// Convert milliseconds to frames at the output rate, never less than one.
fn ms_to_frames(ms: u64) -> usize {
    let frames = Duration::from_millis(ms).as_secs_f64() * SAMPLE_RATE as f64;
    (frames as usize).max(1)
}

pub fn parse(config: &str) -> Result<Config> {
    toml::from_str(config).context("Invalid configuration")
}

pub async fn load() -> Result<Config> {
    match tokio::fs::read_to_string(CONFIG_FILE).await {
        Ok(config) => parse(&config).with_context(|| format!("Failed to parse {CONFIG_FILE}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No {CONFIG_FILE} found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {CONFIG_FILE}")),
    }
}
