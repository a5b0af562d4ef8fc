//! Resolves sample identifiers to playable sources.
//!
//! Identifiers are paths relative to the sample root, e.g.
//! `drums/kick/kick.wav`. Every sample is decoded once and cached; each open
//! hands out a fresh source with its own read position.

use crate::constants::SAMPLE_RATE;
use crate::sources::{
    memory::BufferedSource,
    symphonia::{decode_file, DecodeError},
    BoxedSource, Frame,
};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("no sample named {id:?}")]
    NotFound { id: String },

    #[error("{id:?} is not a valid sample name")]
    InvalidIdentifier { id: String },

    #[error("could not decode sample {id:?}: {source}")]
    Decode {
        id: String,
        #[source]
        source: DecodeError,
    },
}

/// Something that can turn an identifier into a finite source.
pub trait SourceProvider: Send + Sync {
    fn open(&self, id: &str) -> Result<BoxedSource, OpenError>;

    /// Open several identifiers in order. Fails as a whole on the first
    /// identifier that cannot be opened.
    fn open_all(&self, ids: &[String]) -> Result<Vec<BoxedSource>, OpenError> {
        ids.iter().map(|id| self.open(id)).collect()
    }
}

/// Samples stored as audio files under a root directory.
pub struct SampleLibrary {
    root: PathBuf,
    cache: Mutex<HashMap<String, Arc<[Frame]>>>,
}

impl SampleLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an identifier to a file under the root, refusing anything that
    /// could point outside it.
    pub fn resolve(&self, id: &str) -> Result<PathBuf, OpenError> {
        let relative = Path::new(id);
        let is_plain = !id.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_plain {
            return Err(OpenError::InvalidIdentifier { id: id.to_string() });
        }

        let path = self.root.join(relative);
        if !path.is_file() {
            return Err(OpenError::NotFound { id: id.to_string() });
        }

        Ok(path)
    }

    fn load(&self, id: &str) -> Result<Arc<[Frame]>, OpenError> {
        if let Some(frames) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            return Ok(frames.clone());
        }

        let path = self.resolve(id)?;
        let decoded = decode_file(&path).map_err(|source| match source {
            DecodeError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                OpenError::NotFound { id: id.to_string() }
            }
            source => OpenError::Decode {
                id: id.to_string(),
                source,
            },
        })?;

        if let Some(rate) = decoded.sample_rate.filter(|&rate| rate != SAMPLE_RATE) {
            warn!("Sample {id} is {rate} Hz, output is {SAMPLE_RATE} Hz; playing unresampled");
        }

        info!("Loaded sample {id} ({} frames)", decoded.frames.len());

        let frames: Arc<[Frame]> = decoded.frames.into();
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), frames.clone());

        Ok(frames)
    }

    /// Number of decoded samples held in memory.
    pub fn cached(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl SourceProvider for SampleLibrary {
    fn open(&self, id: &str) -> Result<BoxedSource, OpenError> {
        let frames = self.load(id)?;
        Ok(Box::new(BufferedSource::shared(frames)))
    }
}
