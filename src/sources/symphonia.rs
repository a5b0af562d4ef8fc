//! File decoding via symphonia.
//!
//! Decodes a whole file up front into stereo `f32` frames. Drum samples are a
//! few hundred milliseconds long, so decoding eagerly keeps all I/O out of the
//! playback path.

use crate::sources::Frame;
use itertools::Itertools;
use std::fs::File;
use std::io;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("unsupported or corrupt stream: {0}")]
    Format(#[from] SymphoniaError),

    #[error("no audio track found in file")]
    NoTrack,
}

/// A fully decoded file.
#[derive(Clone, Debug)]
pub struct Decoded {
    pub frames: Vec<Frame>,

    /// Native sample rate of the file, if the container reports one.
    pub sample_rate: Option<u32>,
}

pub fn decode_file(path: &Path) -> Result<Decoded, DecodeError> {
    let file = Box::new(File::open(path)?);
    let mss = MediaSourceStream::new(file, Default::default());

    // The extension is enough for the probe to pick the right reader
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let format_opts: FormatOptions = Default::default();
    let metadata_opts: MetadataOptions = Default::default();
    let decoder_opts: DecoderOptions = Default::default();

    let probed =
        symphonia::default::get_probe().format(&hint, mss, &format_opts, &metadata_opts)?;
    let mut format = probed.format;

    let track = format.default_track().ok_or(DecodeError::NoTrack)?;
    let mut decoder = symphonia::default::get_codecs().make(&track.codec_params, &decoder_opts)?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;

    let mut frames = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels = 0;

    loop {
        // Symphonia reports the end of the stream as UnexpectedEof
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let audio_buf = match decoder.decode(&packet) {
            Ok(audio_buf) => audio_buf,
            Err(SymphoniaError::DecodeError(e)) => {
                warn!("Skipping undecodable packet in {}: {e}", path.display());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *audio_buf.spec();
        channels = spec.channels.count();
        sample_rate = Some(spec.rate);

        let needed = audio_buf.capacity() * channels;
        if sample_buf.as_ref().map_or(true, |buf| buf.capacity() < needed) {
            sample_buf = Some(SampleBuffer::<f32>::new(audio_buf.capacity() as u64, spec));
        }

        if let Some(buf) = &mut sample_buf {
            buf.copy_interleaved_ref(audio_buf);
            push_interleaved(&mut frames, buf.samples(), channels);
        }
    }

    trace!(
        "Decoded {} frames ({channels} channels) from {}",
        frames.len(),
        path.display()
    );

    Ok(Decoded {
        frames,
        sample_rate,
    })
}

/// Append interleaved samples as stereo frames. Mono is copied to both sides,
/// anything past the second channel is dropped.
pub fn push_interleaved(frames: &mut Vec<Frame>, samples: &[f32], channels: usize) {
    match channels {
        0 => {}
        1 => frames.extend(samples.iter().map(|&s| (s, s))),
        2 => frames.extend(samples.iter().copied().tuples::<(f32, f32)>()),
        n => frames.extend(samples.chunks_exact(n).map(|c| (c[0], c[1]))),
    }
}
