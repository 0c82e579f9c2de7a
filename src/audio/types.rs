use serde::Deserialize;

/// A mono signal read fully into memory.
///
/// Samples are normalized to the [-1, 1] range regardless of the source
/// bit depth. A buffer always holds at least one sample.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Creates a buffer, rejecting empty signals and a zero sample rate.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self, AudioError> {
        if samples.is_empty() {
            return Err(AudioError::EmptyAudio);
        }
        if sample_rate == 0 {
            return Err(AudioError::InvalidParams(
                "Sample rate must be positive".to_string(),
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed buffer
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the signal in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// How multi-channel input is reduced to a single channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    /// Average every channel into one
    #[default]
    Mix,
    /// Keep channel 0 and ignore the rest
    First,
}

/// Sample format used when writing a reconstruction to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 16-bit PCM, clamped to [-1, 1] before scaling
    #[default]
    Int16,
    /// 32-bit IEEE float, written as-is
    Float32,
}

/// Errors that can occur while loading or writing audio
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors during WAV file parsing, including unsupported formats
    #[error("WAV parsing error: {0}")]
    WavParse(String),

    /// The source decoded to zero samples
    #[error("Audio file contains no samples")]
    EmptyAudio,

    /// Invalid parameter values
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}
