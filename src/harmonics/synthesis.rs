use super::types::ComponentSet;
use std::f64::consts::PI;

/// Builds the time axis `t[n] = n / sample_rate` in seconds.
pub fn time_axis(len: usize, sample_rate: u32) -> Vec<f64> {
    let rate = sample_rate as f64;
    (0..len).map(|n| n as f64 / rate).collect()
}

/// Sums the cosine terms of a component set over a time axis.
///
/// Every component contributes, near-DC ones included. Each output sample
/// depends only on its own timestamp, and terms are added in selection
/// order, so the result is reproducible for a given set and axis.
pub fn synthesize(components: &ComponentSet, time: &[f64]) -> Vec<f64> {
    let mut output = vec![0.0; time.len()];

    for component in components {
        let omega = 2.0 * PI * component.frequency;
        for (value, &t) in output.iter_mut().zip(time) {
            *value += component.amplitude * (omega * t + component.phase).cos();
        }
    }

    output
}
