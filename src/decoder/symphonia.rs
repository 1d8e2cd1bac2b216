use crate::core::{AudioBuffer, AudioMetadata};
use crate::error::{AudioError, AudioResult};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio decoder
pub struct SymphoniaDecoder {
    /// Container reader for the audio source
    reader: Box<dyn FormatReader>,
    /// Codec state for the selected track
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
    /// Track being decoded
    track_id: u32,
    /// Stream information gathered while probing
    metadata: AudioMetadata,
}

impl SymphoniaDecoder {
    /// Create decoder from file path, using the extension as a format hint
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        Self::from_source(Box::new(file), hint)
    }

    /// Create decoder from an in-memory encoded file
    pub fn from_bytes(bytes: Vec<u8>, extension: Option<&str>) -> AudioResult<Self> {
        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }

        Self::from_source(Box::new(Cursor::new(bytes)), hint)
    }

    fn from_source(source: Box<dyn MediaSource>, hint: Hint) -> AudioResult<Self> {
        let mss = MediaSourceStream::new(source, Default::default());

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        // Find the first audio track
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::InvalidMetadata("No audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = &track.codec_params;

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown sample rate".to_string()))?;

        let channels = codec_params
            .channels
            .map(|c| c.count())
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown channel count".to_string()))?;

        let codec = symphonia::default::get_codecs()
            .get_codec(codec_params.codec)
            .map(|d| d.short_name.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let mut metadata = AudioMetadata::new(sample_rate, channels, codec)?;
        if let Some(frames) = codec_params.n_frames {
            metadata = metadata.with_total_frames(frames);
        }

        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        debug!(
            "Probed {} stream: {} Hz, {} channel(s)",
            metadata.codec, sample_rate, channels
        );

        Ok(SymphoniaDecoder {
            reader,
            decoder,
            track_id,
            metadata,
        })
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn metadata(&self) -> &AudioMetadata {
        &self.metadata
    }

    fn decode(&mut self) -> AudioResult<AudioBuffer> {
        let channels = self.metadata.channels;
        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            // Only process packets from our audio track
            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!("Skipping undecodable packet: {}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if decoded.frames() == 0 {
                continue;
            }

            let spec = *decoded.spec();
            if spec.channels.count() != channels {
                return Err(AudioError::InvalidChannels {
                    expected: channels as u32,
                    got: spec.channels.count() as u32,
                });
            }

            let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(sample_buf.samples());
        }

        debug!("Decoded {} samples", samples.len());
        AudioBuffer::from_interleaved(&samples, self.metadata.sample_rate, channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;
    use crate::encoder::encode_wav;
    use std::io::Write;
    use tempfile::Builder;

    fn stereo_fixture() -> AudioBuffer {
        let left: Vec<f32> = (0..800).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        let right = vec![0.25f32; 800];
        AudioBuffer::new(8000, vec![left, right]).unwrap()
    }

    #[test]
    fn test_invalid_file() {
        let result = SymphoniaDecoder::from_file("/nonexistent/file.mp3");
        assert!(matches!(result, Err(AudioError::Io(_))));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = SymphoniaDecoder::from_bytes(vec![0x42; 512], None);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_wav_bytes() {
        let original = stereo_fixture();
        let mut decoder = SymphoniaDecoder::from_bytes(encode_wav(&original), Some("wav")).unwrap();

        assert_eq!(decoder.metadata().sample_rate, 8000);
        assert_eq!(decoder.metadata().channels, 2);

        let decoded = decoder.decode().unwrap();
        assert_eq!(decoded.sample_rate(), 8000);
        assert_eq!(decoded.channel_count(), 2);
        assert_eq!(decoded.frames(), 800);

        for (a, b) in original.channels().iter().flatten().zip(decoded.channels().iter().flatten()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_decode_wav_file() {
        let original = stereo_fixture();
        let mut file = Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(&encode_wav(&original)).unwrap();
        file.flush().unwrap();

        let mut decoder = SymphoniaDecoder::from_file(file.path()).unwrap();
        let decoded = decoder.decode().unwrap();

        assert_eq!(decoded.frames(), original.frames());
        assert_eq!(decoder.metadata().total_frames, Some(800));
    }
}
