/// Audio input and output for the harmonic engine.
///
/// This module provides functionality to:
/// - Read WAV files into a mono, normalized sample buffer
/// - Write reconstructed signals back to WAV files
mod types;
mod wav;

pub use types::{AudioError, ChannelMode, OutputFormat, SampleBuffer};
pub use wav::{read_wav_file, write_wav_file};
