//! silence-trim command line interface
//!
//! Removes silent passages from an audio file and writes 16-bit PCM WAV.

use clap::{Parser, Subcommand};
use log::{debug, info};
use silence_trim::config::{DEFAULT_MIN_SILENCE_DURATION, DEFAULT_SILENCE_THRESHOLD};
use silence_trim::decoder::{self, Decoder};
use silence_trim::encoder::{Encoder, WavEncoder};
use silence_trim::progress::NoProgress;
use silence_trim::{SilenceTrimmer, TrimConfig};
use std::path::{Path, PathBuf};

/// Suffix appended to the input stem when no output path is given
const OUTPUT_SUFFIX: &str = "-no-silence";

#[derive(Parser)]
#[command(name = "silence-trim")]
#[command(about = "Remove silent passages from audio recordings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trim silence and write a WAV file
    Trim {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output WAV file (defaults to <input>-no-silence.wav)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// RMS level below which a 10ms window counts as silent (0.001-0.05)
        #[arg(short, long, default_value_t = DEFAULT_SILENCE_THRESHOLD)]
        threshold: f64,

        /// Minimum silence duration in seconds (0.1-2.0)
        #[arg(short, long, default_value_t = DEFAULT_MIN_SILENCE_DURATION)]
        min_silence: f64,

        /// Keep silences shorter than --min-silence instead of cutting them
        #[arg(long)]
        enforce_min_silence: bool,
    },

    /// Show stream information and the ranges that would be kept
    Probe {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// RMS level below which a 10ms window counts as silent (0.001-0.05)
        #[arg(short, long, default_value_t = DEFAULT_SILENCE_THRESHOLD)]
        threshold: f64,
    },
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    input.with_file_name(format!("{}{}.wav", stem, OUTPUT_SUFFIX))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    info!("silence-trim {}", silence_trim::VERSION);

    match cli.command {
        Commands::Trim {
            input,
            output,
            threshold,
            min_silence,
            enforce_min_silence,
        } => {
            let config = TrimConfig::new(threshold, min_silence)?
                .with_min_silence_enforced(enforce_min_silence);
            let output = output.unwrap_or_else(|| default_output(&input));

            let buffer = decoder::from_file(&input)?.decode()?;
            info!(
                "Decoded {:?}: {} frames, {} channel(s) at {} Hz",
                input,
                buffer.frames(),
                buffer.channel_count(),
                buffer.sample_rate()
            );

            let trimmer = SilenceTrimmer::new(config);
            let mut report = |percent: u8| debug!("Progress: {}%", percent);
            let outcome = trimmer.process(buffer, &mut report);

            let mut encoder = WavEncoder::create(&output)?;
            encoder.encode(&outcome.buffer)?;
            encoder.finalize()?;

            println!(
                "{:?} -> {:?}: kept {} of {} frames in {} segment(s)",
                input,
                output,
                outcome.stats.output_frames,
                outcome.stats.input_frames,
                outcome.segments.len()
            );
        }
        Commands::Probe { input, threshold } => {
            let config = TrimConfig::new(threshold, DEFAULT_MIN_SILENCE_DURATION)?;
            let mut decoder = decoder::from_file(&input)?;

            let metadata = decoder.metadata().clone();
            println!("File: {:?}", input);
            println!("  Codec: {}", metadata.codec);
            println!("  Sample rate: {} Hz", metadata.sample_rate);
            println!("  Channels: {}", metadata.channels);
            if let Some(secs) = metadata.duration_secs() {
                println!("  Duration: {:.3} s", secs);
            }

            let buffer = decoder.decode()?;
            let rate = buffer.sample_rate() as f64;
            let outcome = SilenceTrimmer::new(config).process(buffer, &mut NoProgress);

            println!(
                "  Silent windows: {} of {}",
                outcome.stats.silent_windows, outcome.stats.windows
            );
            println!("  Kept segments:");
            for segment in &outcome.segments {
                println!(
                    "    {:>10.3}s - {:>10.3}s ({} frames)",
                    segment.start as f64 / rate,
                    segment.end as f64 / rate,
                    segment.len()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output(Path::new("/tmp/voice memo.mp3")),
            PathBuf::from("/tmp/voice memo-no-silence.wav")
        );
    }

    #[test]
    fn test_trim_arguments() {
        let cli = Cli::parse_from(["silence-trim", "trim", "in.mp3", "-t", "0.02", "--enforce-min-silence"]);
        match cli.command {
            Commands::Trim {
                threshold,
                min_silence,
                enforce_min_silence,
                output,
                ..
            } => {
                assert_eq!(threshold, 0.02);
                assert_eq!(min_silence, 0.5);
                assert!(enforce_min_silence);
                assert!(output.is_none());
            }
            Commands::Probe { .. } => panic!("expected trim"),
        }
    }
}
