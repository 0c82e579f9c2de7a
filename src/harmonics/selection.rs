use super::types::{ComponentSet, HarmonicComponent, HarmonicError, SpectralFrame};

/// Picks the strongest bins of a spectrum as cosine components.
///
/// Bins are ranked by magnitude, largest first. Equal magnitudes keep
/// ascending bin order, so identical input always yields the same set.
/// The result holds `min(max_harmonics, frame.num_bins())` components in
/// ranking order.
///
/// Folded bins are scaled by `2 / N` to undo the one-sided fold. The DC bin
/// and the Nyquist bin of an even-length window appear once in the full
/// spectrum and are scaled by `1 / N`.
///
/// # Errors
/// * If `max_harmonics` is zero
pub fn select_components(
    frame: &SpectralFrame,
    max_harmonics: usize,
) -> Result<ComponentSet, HarmonicError> {
    if max_harmonics == 0 {
        return Err(HarmonicError::InvalidParams(
            "Number of harmonics must be at least 1".to_string(),
        ));
    }

    let n = frame.window_len as f64;
    let ranked = rank_bins(&frame.magnitude);

    let components = ranked
        .into_iter()
        .take(max_harmonics)
        .map(|k| {
            let scale = if frame.is_unfolded_bin(k) { 1.0 } else { 2.0 };
            HarmonicComponent {
                frequency: frame.frequency[k],
                amplitude: frame.magnitude[k] * scale / n,
                phase: frame.phase[k],
                bin: k,
            }
        })
        .collect();

    Ok(ComponentSet::new(components))
}

/// Bin indices ordered by descending magnitude, ties by ascending index.
fn rank_bins(magnitude: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..magnitude.len()).collect();
    // sort_by is stable, which keeps equal magnitudes in index order
    indices.sort_by(|&a, &b| magnitude[b].total_cmp(&magnitude[a]));
    indices
}
