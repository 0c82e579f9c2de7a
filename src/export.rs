use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::audio::{self, AudioError, OutputFormat};
use crate::harmonics::{BlockReconstruction, ComponentSet};

/// Writes the expression log for a whole-signal analysis.
///
/// The file is truncated first and then receives one line per oscillating
/// component, in selection order.
pub fn write_expression_file(path: &Path, components: &ComponentSet) -> Result<(), AudioError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let lines = components.expression_lines();
    for line in &lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), lines = lines.len(), "wrote expressions");
    Ok(())
}

/// Writes the expression log for a block-parallel analysis.
///
/// The file is truncated first; block groups follow in block index order.
pub fn write_block_expression_file(
    path: &Path,
    reconstruction: &BlockReconstruction,
) -> Result<(), AudioError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for group in reconstruction.expressions() {
        writer.write_all(group.as_bytes())?;
    }
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        blocks = reconstruction.blocks.len(),
        "wrote block expressions"
    );
    Ok(())
}

/// Writes a reconstructed signal as a mono WAV file.
pub fn write_reconstruction(
    path: &Path,
    samples: &[f64],
    sample_rate: u32,
    format: OutputFormat,
) -> Result<(), AudioError> {
    audio::write_wav_file(path, samples, sample_rate, format)
}
