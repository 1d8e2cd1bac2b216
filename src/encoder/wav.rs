use crate::core::AudioBuffer;
use crate::error::{AudioError, AudioResult};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Size of the canonical PCM WAV header
pub const WAV_HEADER_LEN: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u32 = 2;
const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;
const WRITE_BLOCK_FRAMES: usize = 4096;

/// Fields of a 44-byte canonical 16-bit PCM WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Number of interleaved channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Length of the sample data in bytes
    pub data_len: u32,
}

impl WavHeader {
    /// Header describing the encoding of `buffer`
    pub fn for_buffer(buffer: &AudioBuffer) -> Self {
        let data_len = buffer.frames() as u64 * buffer.channel_count() as u64 * 2;
        WavHeader {
            channels: buffer.channel_count() as u16,
            sample_rate: buffer.sample_rate(),
            data_len: data_len as u32,
        }
    }

    /// Bytes per frame (`channels * 2`)
    pub fn block_align(&self) -> u16 {
        self.channels.wrapping_mul(BYTES_PER_SAMPLE as u16)
    }

    /// Bytes per second (`sample_rate * channels * 2`)
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .wrapping_mul(self.channels as u32)
            .wrapping_mul(BYTES_PER_SAMPLE)
    }

    /// Serialize the header, all fields little-endian
    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut out = [0u8; WAV_HEADER_LEN];
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&(36u32.wrapping_add(self.data_len)).to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        out[20..22].copy_from_slice(&FORMAT_PCM.to_le_bytes());
        out[22..24].copy_from_slice(&self.channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        out[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_len.to_le_bytes());
        out
    }

    /// Parse a canonical header written by [`WavHeader::to_bytes`]
    pub fn parse(bytes: &[u8]) -> AudioResult<Self> {
        if bytes.len() < WAV_HEADER_LEN {
            return Err(AudioError::InvalidMetadata(format!(
                "WAV header needs {} bytes, got {}",
                WAV_HEADER_LEN,
                bytes.len()
            )));
        }

        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };

        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(AudioError::UnsupportedFormat("Not a RIFF/WAVE stream".to_string()));
        }
        if &bytes[12..16] != b"fmt " || u32_at(16) != FMT_CHUNK_LEN || &bytes[36..40] != b"data" {
            return Err(AudioError::UnsupportedFormat(
                "Not a canonical 44-byte WAV header".to_string(),
            ));
        }
        if u16_at(20) != FORMAT_PCM || u16_at(34) != BITS_PER_SAMPLE {
            return Err(AudioError::UnsupportedFormat(
                "Only 16-bit linear PCM is supported".to_string(),
            ));
        }

        let header = WavHeader {
            channels: u16_at(22),
            sample_rate: u32_at(24),
            data_len: u32_at(40),
        };

        if u32_at(4) != 36u32.wrapping_add(header.data_len)
            || u32_at(28) != header.byte_rate()
            || u16_at(32) != header.block_align()
        {
            return Err(AudioError::InvalidMetadata(
                "Inconsistent WAV header fields".to_string(),
            ));
        }

        Ok(header)
    }
}

/// Convert a normalized sample to 16-bit PCM
///
/// Clamps to `[-1.0, 1.0]`, scales negatives by 32768 and the rest by 32767,
/// then truncates toward zero. NaN maps to 0.
pub fn quantize(sample: f32) -> i16 {
    let s = (sample as f64).clamp(-1.0, 1.0);
    let scaled = if s < 0.0 { s * 32768.0 } else { s * 32767.0 };
    scaled as i16
}

/// Serialize a buffer as a complete WAV file in memory
pub fn encode_wav(buffer: &AudioBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(WAV_HEADER_LEN + buffer.frames() * buffer.channel_count() * 2);
    out.extend_from_slice(&WavHeader::for_buffer(buffer).to_bytes());
    extend_samples(&mut out, buffer);
    out
}

/// Write a buffer as a complete WAV stream
pub fn write_wav<W: Write>(buffer: &AudioBuffer, mut writer: W) -> AudioResult<()> {
    writer.write_all(&WavHeader::for_buffer(buffer).to_bytes())?;

    let mut chunk = Vec::with_capacity(buffer.channel_count() * 2 * WRITE_BLOCK_FRAMES);
    for start in (0..buffer.frames()).step_by(WRITE_BLOCK_FRAMES) {
        let end = (start + WRITE_BLOCK_FRAMES).min(buffer.frames());
        chunk.clear();
        for frame in start..end {
            for channel in buffer.channels() {
                chunk.extend_from_slice(&quantize(channel[frame]).to_le_bytes());
            }
        }
        writer.write_all(&chunk)?;
    }

    writer.flush()?;
    Ok(())
}

fn extend_samples(out: &mut Vec<u8>, buffer: &AudioBuffer) {
    for frame in 0..buffer.frames() {
        for channel in buffer.channels() {
            out.extend_from_slice(&quantize(channel[frame]).to_le_bytes());
        }
    }
}

/// WAV audio encoder writing 16-bit PCM to any sink
pub struct WavEncoder<W: Write> {
    writer: W,
    frames_written: Option<usize>,
}

impl WavEncoder<BufWriter<File>> {
    /// Create a new WAV encoder to file
    pub fn create<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let file = File::create(path)?;
        Ok(WavEncoder::new(BufWriter::new(file)))
    }
}

impl<W: Write> WavEncoder<W> {
    /// Create a new WAV encoder around a writer
    pub fn new(writer: W) -> Self {
        WavEncoder {
            writer,
            frames_written: None,
        }
    }

    /// Get the number of frames written
    pub fn frames_written(&self) -> usize {
        self.frames_written.unwrap_or(0)
    }

    /// Hand back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> super::Encoder for WavEncoder<W> {
    fn encode(&mut self, buffer: &AudioBuffer) -> AudioResult<()> {
        // The header carries the total length, so a stream holds one buffer
        if self.frames_written.is_some() {
            return Err(AudioError::EncodeError(
                "WAV stream already holds a buffer".to_string(),
            ));
        }

        write_wav(buffer, &mut self.writer)?;
        self.frames_written = Some(buffer.frames());
        debug!(
            "Encoded {} frames x {} channels at {} Hz",
            buffer.frames(),
            buffer.channel_count(),
            buffer.sample_rate()
        );

        Ok(())
    }

    fn finalize(&mut self) -> AudioResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
