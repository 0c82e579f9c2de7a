// Test utilities and common helpers
//
// This file provides shared helpers used across multiple test files.
// Fixtures are generated on the fly instead of being checked in, so every
// test knows exactly which sinusoids its input contains.
//
// The utilities include:
// - Synthetic cosine signal builders
// - Temporary file paths that do not collide between tests
// - WAV fixture writers built on hound

use std::f64::consts::PI;
use std::path::PathBuf;

/// A cosine term used to build synthetic signals: (frequency Hz, amplitude, phase)
pub type Tone = (f64, f64, f64);

/// Build `len` samples of `offset + Σ amplitude * cos(2π f t + phase)`.
///
/// # Arguments
/// * `len` - Number of samples
/// * `sample_rate` - Sample rate in Hz
/// * `tones` - The cosine terms to sum
/// * `offset` - Constant added to every sample
#[allow(dead_code)]
pub fn cosine_signal(len: usize, sample_rate: u32, tones: &[Tone], offset: f64) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate as f64;
            offset
                + tones
                    .iter()
                    .map(|&(f, a, p)| a * (2.0 * PI * f * t + p).cos())
                    .sum::<f64>()
        })
        .collect()
}

/// A deterministic, irregular test signal with no dominant structure.
#[allow(dead_code)]
pub fn irregular_signal(len: usize) -> Vec<f64> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 20001) as f64 / 10000.0 - 1.0
        })
        .collect()
}

/// A path in the system temp directory, unique to this process and `name`.
#[allow(dead_code)]
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("harmonic_sum_{}_{}", std::process::id(), name))
}

/// Write interleaved samples as a 32-bit float WAV file.
#[allow(dead_code)]
pub fn write_float_wav(path: &PathBuf, samples: &[f64], sample_rate: u32, channels: u16) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV file");
    for &sample in samples {
        writer
            .write_sample(sample as f32)
            .expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV file");
}

/// Assert two slices match element-wise within `tolerance`.
#[allow(dead_code)]
pub fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "Length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "Sample {} differs: {} vs {} (tolerance {})",
            i,
            a,
            e,
            tolerance
        );
    }
}

/// Test that the signal builder produces the requested shape.
#[test]
fn test_cosine_signal_builder() {
    let signal = cosine_signal(4, 4, &[(1.0, 2.0, 0.0)], 0.5);
    assert_close(&signal, &[2.5, 0.5, -1.5, 0.5], 1e-12);
}
