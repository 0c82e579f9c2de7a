use super::selection::select_components;
use super::spectrum::analyze_spectrum;
use super::synthesis::{synthesize, time_axis};
use super::types::{AnalysisConfig, HarmonicError, SignalAnalysis, WindowAnalysis};
use crate::audio::SampleBuffer;

/// Decomposes one window into cosine components and resynthesizes it.
///
/// This function performs the following steps:
/// 1. Computes the one-sided spectrum of the window
/// 2. Selects the `max_harmonics` strongest bins
/// 3. Sums the selected cosines over the window's time axis
///
/// Both the whole-signal and the block-parallel paths go through here, so a
/// block analyzed on its own matches the same block inside a parallel run.
///
/// # Errors
/// * If the window is empty
/// * If `max_harmonics` is zero
pub fn analyze_window(
    window: &[f64],
    sample_rate: u32,
    max_harmonics: usize,
) -> Result<WindowAnalysis, HarmonicError> {
    let frame = analyze_spectrum(window, sample_rate)?;
    let components = select_components(&frame, max_harmonics)?;
    let time = time_axis(window.len(), sample_rate);
    let reconstructed = synthesize(&components, &time);

    Ok(WindowAnalysis {
        components,
        reconstructed,
    })
}

/// Analyzes the start of a signal as a single window.
///
/// The window is the first `duration_seconds * sample_rate` samples, or the
/// whole signal when it is shorter or no duration is configured.
///
/// # Errors
/// * If the configuration is invalid
/// * If the truncated window is empty
pub fn analyze_signal(
    buffer: &SampleBuffer,
    config: &AnalysisConfig,
) -> Result<SignalAnalysis, HarmonicError> {
    config.validate()?;

    let window_len = match config.duration_seconds {
        Some(seconds) => buffer
            .len()
            .min(seconds as usize * buffer.sample_rate() as usize),
        None => buffer.len(),
    };
    let window = &buffer.samples()[..window_len];

    tracing::info!(
        samples = window_len,
        sample_rate = buffer.sample_rate(),
        max_harmonics = config.max_harmonics,
        "analyzing signal"
    );

    let WindowAnalysis {
        components,
        reconstructed,
    } = analyze_window(window, buffer.sample_rate(), config.max_harmonics)?;

    let quality = reconstruction_error(window, &reconstructed);
    tracing::info!(
        components = components.len(),
        rms_error = quality.rms_error,
        snr_db = quality.snr_db,
        "reconstructed signal"
    );

    Ok(SignalAnalysis {
        components,
        reconstructed,
        sample_rate: buffer.sample_rate(),
    })
}

/// How closely a reconstruction follows the original signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconstructionQuality {
    pub rms_error: f64,
    /// Signal-to-error ratio; infinite for an exact match
    pub snr_db: f64,
}

/// Compares a reconstruction against the samples it was built from.
///
/// Only the overlapping prefix of the two slices is compared.
pub fn reconstruction_error(original: &[f64], reconstructed: &[f64]) -> ReconstructionQuality {
    let len = original.len().min(reconstructed.len());
    if len == 0 {
        return ReconstructionQuality {
            rms_error: 0.0,
            snr_db: f64::INFINITY,
        };
    }

    let (signal_energy, error_energy) = original
        .iter()
        .zip(reconstructed)
        .fold((0.0, 0.0), |(signal, error), (&o, &r)| {
            (signal + o * o, error + (o - r) * (o - r))
        });

    let snr_db = if error_energy == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (signal_energy / error_energy).log10()
    };

    ReconstructionQuality {
        rms_error: (error_energy / len as f64).sqrt(),
        snr_db,
    }
}
