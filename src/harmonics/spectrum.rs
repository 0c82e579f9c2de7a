use super::types::{HarmonicError, SpectralFrame};
use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// Computes the one-sided spectrum of a real-valued window.
///
/// The full complex transform is taken with no padding, so any window
/// length works. Bins `0..=N/2` are kept, giving `N / 2 + 1` entries whose
/// frequencies run from 0 Hz up to (at most) the Nyquist frequency.
///
/// # Arguments
/// * `window` - Samples to transform
/// * `sample_rate` - Sample rate of the window in Hz
///
/// # Errors
/// * If the window is empty
pub fn analyze_spectrum(window: &[f64], sample_rate: u32) -> Result<SpectralFrame, HarmonicError> {
    if window.is_empty() {
        return Err(HarmonicError::EmptyWindow);
    }
    if sample_rate == 0 {
        return Err(HarmonicError::InvalidParams(
            "Sample rate must be positive".to_string(),
        ));
    }

    let spectrum = compute_fft(window);
    let n = window.len();
    let num_bins = n / 2 + 1;
    let resolution = sample_rate as f64 / n as f64;

    let one_sided = &spectrum[..num_bins];
    let magnitude = one_sided.iter().map(|c| c.norm()).collect();
    let phase = one_sided.iter().map(|c| wrap_phase(c.arg())).collect();
    let frequency = (0..num_bins).map(|k| k as f64 * resolution).collect();

    Ok(SpectralFrame {
        magnitude,
        phase,
        frequency,
        window_len: n,
        sample_rate,
    })
}

/// Performs a forward FFT on real input.
fn compute_fft(samples: &[f64]) -> Vec<Complex<f64>> {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(samples.len());

    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    buffer
}

/// Maps `atan2` output from [-π, π] onto (-π, π].
fn wrap_phase(phase: f64) -> f64 {
    if phase <= -PI {
        phase + 2.0 * PI
    } else {
        phase
    }
}
