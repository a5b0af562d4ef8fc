use std::net::SocketAddr;

use anyhow::{Context, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use hound::{SampleFormat, WavSpec};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

use crate::constants::{BIT_DEPTH, CHANNELS, SAMPLE_RATE};
use crate::engine::EngineOutput;
use crate::sources::Frame;

pub fn wav_spec() -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BIT_DEPTH,
        sample_format: SampleFormat::Int,
    }
}

/// Convert an amplitude to 16-bit PCM, clamping out-of-range values.
pub fn to_pcm16(amplitude: f32) -> i16 {
    (amplitude.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Encode frames as interleaved little-endian 16-bit PCM.
pub fn encode_pcm16(frames: &[Frame]) -> std::io::Result<Vec<u8>> {
    let mut wav_data: Vec<u8> = Vec::with_capacity(frames.len() * 4);

    for &(left, right) in frames {
        WriteBytesExt::write_i16::<LittleEndian>(&mut wav_data, to_pcm16(left))?;
        WriteBytesExt::write_i16::<LittleEndian>(&mut wav_data, to_pcm16(right))?;
    }

    Ok(wav_data)
}

/// Bind `addr` and stream the engine output to every client that connects.
pub async fn init(addr: &str, source: EngineOutput) -> Result<SocketAddr> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local_addr = listener.local_addr()?;
    info!("Streaming WAV audio on {local_addr}");

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    info!("Accepted connection from {addr}");
                    tokio::spawn(serve(stream, addr, source.clone()));
                }
                Err(e) => error!("Failed to accept connection: {e}"),
            }
        }
    });

    Ok(local_addr)
}

async fn serve(mut stream: TcpStream, addr: SocketAddr, mut source: EngineOutput) {
    // A header for an infinite file lets players start right away
    let header = wav_spec().into_header_for_infinite_file();
    if let Err(e) = stream.write_all(&header[..]).await {
        warn!("Failed to write WAV header to {addr}: {e}");
        return;
    }

    loop {
        if source.changed().await.is_err() {
            info!("Playback engine stopped, closing connection to {addr}");
            break;
        }

        let wav_data = match encode_pcm16(&source.borrow_and_update()) {
            Ok(wav_data) => wav_data,
            Err(e) => {
                error!("Failed to encode audio for {addr}: {e}");
                break;
            }
        };

        if let Err(e) = stream.write_all(&wav_data).await {
            info!("Client {addr} disconnected: {e}");
            break;
        }
    }
}
