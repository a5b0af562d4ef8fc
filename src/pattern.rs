//! Drum patterns: an ordered list of beats, each a set of samples struck
//! together.

use crate::library::{OpenError, SourceProvider};
use crate::sources::{mix::Mix, silence::Silence, BoxedSource};
use std::fmt::{self, Display, Formatter};

/// Marks a beat with no samples.
pub const REST: &str = "-";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Beat {
    pub samples: Vec<String>,
}

impl Beat {
    pub fn rest() -> Self {
        Self::default()
    }

    pub fn is_rest(&self) -> bool {
        self.samples.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pattern {
    pub beats: Vec<Beat>,
}

impl Pattern {
    /// Parse a pattern like `kick.wav hat.wav | snare.wav | - | hat.wav`.
    ///
    /// Beats are separated by `|`; samples within a beat by whitespace or
    /// commas. An empty beat or `-` is a rest.
    pub fn parse(line: &str) -> Self {
        let beats = line
            .split('|')
            .map(|beat| Beat {
                samples: beat
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|id| !id.is_empty() && *id != REST)
                    .map(str::to_string)
                    .collect(),
            })
            .collect();

        Self { beats }
    }

    pub fn is_empty(&self) -> bool {
        self.beats.iter().all(Beat::is_rest)
    }

    /// Open every sample and build one source per beat, in order.
    ///
    /// Each beat mixes its samples over `beat_frames` of silence, so a beat
    /// never ends early and a rest keeps time. Nothing is returned unless
    /// every sample opens.
    pub fn build(
        &self,
        provider: &dyn SourceProvider,
        beat_frames: usize,
    ) -> Result<Vec<BoxedSource>, OpenError> {
        self.beats
            .iter()
            .map(|beat| {
                let mut inputs = provider.open_all(&beat.samples)?;
                inputs.push(Box::new(Silence::frames(beat_frames)));
                Ok(Box::new(Mix::new(inputs)) as BoxedSource)
            })
            .collect()
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let beats: Vec<String> = self
            .beats
            .iter()
            .map(|beat| {
                if beat.is_rest() {
                    REST.to_string()
                } else {
                    beat.samples.join(" ")
                }
            })
            .collect();

        write!(f, "{}", beats.join(" | "))
    }
}
