use super::types::{AudioError, ChannelMode, OutputFormat, SampleBuffer};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Reads a WAV file into a mono [`SampleBuffer`].
///
/// This function supports the following WAV formats:
/// - 32-bit float
/// - 16-bit integer
/// - 24-bit integer
/// - 32-bit integer
///
/// All integer formats are normalized to the [-1, 1] range. Multi-channel
/// files are reduced to one channel according to `channel_mode`.
///
/// # Errors
/// * If the file cannot be opened or read
/// * If the WAV format is unsupported
/// * If the file contains no samples
pub fn read_wav_file(path: &Path, channel_mode: ChannelMode) -> Result<SampleBuffer, AudioError> {
    let reader = WavReader::open(path).map_err(wav_error)?;
    let spec = reader.spec();

    // Convert samples to f32, regardless of input format
    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .map(|s| s.map_err(wav_error))
            .collect::<Result<Vec<f32>, AudioError>>()?,
        (SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .map(|s| s.map_err(wav_error))
            .map(|s| Ok(s? as f32 / 32768.0))
            .collect::<Result<Vec<f32>, AudioError>>()?,
        (SampleFormat::Int, 24) => reader
            .into_samples::<i32>()
            .map(|s| s.map_err(wav_error))
            .map(|s| Ok(s? as f32 / 8388608.0))
            .collect::<Result<Vec<f32>, AudioError>>()?,
        (SampleFormat::Int, 32) => reader
            .into_samples::<i32>()
            .map(|s| s.map_err(wav_error))
            .map(|s| Ok(s? as f32 / 2147483648.0))
            .collect::<Result<Vec<f32>, AudioError>>()?,
        _ => {
            return Err(AudioError::WavParse(format!(
                "Unsupported WAV format: {:?} {}-bit",
                spec.sample_format, spec.bits_per_sample
            )))
        }
    };

    let mono = downmix(&interleaved, spec.channels as usize, channel_mode);

    tracing::info!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        samples = mono.len(),
        "loaded audio"
    );

    SampleBuffer::new(mono, spec.sample_rate)
}

/// Writes a mono signal to a WAV file at the given sample rate.
///
/// With [`OutputFormat::Int16`] samples are clamped to [-1, 1] and scaled to
/// the full 16-bit range; with [`OutputFormat::Float32`] they are written
/// unchanged.
pub fn write_wav_file(
    path: &Path,
    samples: &[f64],
    sample_rate: u32,
    format: OutputFormat,
) -> Result<(), AudioError> {
    let (bits_per_sample, sample_format) = match format {
        OutputFormat::Int16 => (16, SampleFormat::Int),
        OutputFormat::Float32 => (32, SampleFormat::Float),
    };
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample,
        sample_format,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_error)?;
    match format {
        OutputFormat::Int16 => {
            for &sample in samples {
                let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16;
                writer.write_sample(scaled).map_err(wav_error)?;
            }
        }
        OutputFormat::Float32 => {
            for &sample in samples {
                writer.write_sample(sample as f32).map_err(wav_error)?;
            }
        }
    }
    writer.finalize().map_err(wav_error)?;

    tracing::info!(path = %path.display(), samples = samples.len(), ?format, "wrote audio");
    Ok(())
}

fn downmix(interleaved: &[f32], channels: usize, channel_mode: ChannelMode) -> Vec<f64> {
    if channels <= 1 {
        return interleaved.iter().map(|&s| s as f64).collect();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| match channel_mode {
            ChannelMode::Mix => frame.iter().map(|&s| s as f64).sum::<f64>() / channels as f64,
            ChannelMode::First => frame[0] as f64,
        })
        .collect()
}

fn wav_error(err: hound::Error) -> AudioError {
    match err {
        hound::Error::IoError(io_err) => AudioError::Io(io_err),
        other => AudioError::WavParse(other.to_string()),
    }
}
