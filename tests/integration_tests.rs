// Integration tests for the harmonic decomposition pipeline
//
// These tests verify the end-to-end flow: a WAV file is loaded, decomposed
// into cosine components, and both the expression log and the reconstructed
// audio are written back to disk.
//
// The integration tests ensure:
// 1. The whole-signal pipeline emits one line per oscillating component
// 2. The block pipeline emits ordered block groups and whole blocks of audio
// 3. Expression logs are truncated on every run
// 4. Configuration files override only the values they name

use harmonic_sum::audio::{self, ChannelMode, OutputFormat};
use harmonic_sum::config::{self, AnalysisLimits};
use harmonic_sum::export;
use harmonic_sum::harmonics::{self, AnalysisConfig, BlockConfig, BlockOrchestrator};
use std::fs;

mod test_utils;
use test_utils::{cosine_signal, temp_path, write_float_wav};

/// Test the whole-signal pipeline from WAV file to output files.
///
/// This test verifies:
/// - Loading, truncation, analysis and export work together
/// - The expression log holds the fixed line format, DC omitted
/// - The reconstructed audio has the analyzed length and sample rate
#[test]
fn test_whole_signal_end_to_end() {
    let rate = 8000;
    let input = temp_path("e2e_whole_in.wav");
    let expr_out = temp_path("e2e_whole_do.txt");
    let audio_out = temp_path("e2e_whole_out.wav");

    let signal = cosine_signal(2 * 8000, rate, &[(100.0, 0.5, 0.0), (250.0, 0.25, -0.5)], 0.125);
    write_float_wav(&input, &signal, rate, 1);

    let buffer = audio::read_wav_file(&input, ChannelMode::Mix).expect("Failed to load WAV file");
    let config = AnalysisConfig {
        max_harmonics: 3,
        duration_seconds: Some(1),
    };
    let result = harmonics::analyze_signal(&buffer, &config).expect("Failed to analyze");
    assert_eq!(result.components.len(), 3);

    export::write_expression_file(&expr_out, &result.components)
        .expect("Failed to write expressions");
    export::write_reconstruction(&audio_out, &result.reconstructed, rate, OutputFormat::Int16)
        .expect("Failed to write audio");

    let text = fs::read_to_string(&expr_out).expect("Failed to read expressions");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "DC component must not be emitted");
    assert!(lines[0].starts_with("50.0000*c2p*100.0000*x+"));
    assert!(lines[1].starts_with("25.0000*c2p*250.0000*x+-0.5000"));

    let output = audio::read_wav_file(&audio_out, ChannelMode::Mix).expect("Failed to load output");
    assert_eq!(output.sample_rate(), rate);
    assert_eq!(output.len(), 8000);

    let quality = harmonics::reconstruction_error(&signal[..8000], output.samples());
    assert!(quality.snr_db > 40.0, "Reconstruction too far off: {:?}", quality);

    for path in [&input, &expr_out, &audio_out] {
        fs::remove_file(path).ok();
    }
}

/// Test that the expression log is truncated on each run.
#[test]
fn test_expression_file_is_truncated() {
    let path = temp_path("truncate_do.txt");
    fs::write(&path, "stale line 1\nstale line 2\nstale line 3\n").expect("Failed to seed file");

    let signal = cosine_signal(64, 64, &[(4.0, 1.0, 0.0)], 0.0);
    let result = harmonics::analyze_window(&signal, 64, 1).expect("Failed to analyze");
    export::write_expression_file(&path, &result.components).expect("Failed to write");

    let text = fs::read_to_string(&path).expect("Failed to read expressions");
    assert!(!text.contains("stale"));
    assert_eq!(text.lines().count(), 1);

    fs::remove_file(&path).ok();
}

/// Test the block pipeline from WAV file to output files.
///
/// This test verifies:
/// - Blocks are emitted as ordered `Block <i>:` groups
/// - The output audio holds whole blocks only
#[test]
fn test_block_pipeline_end_to_end() {
    let rate = 4096;
    let input = temp_path("e2e_blocks_in.wav");
    let expr_out = temp_path("e2e_blocks_do.txt");
    let audio_out = temp_path("e2e_blocks_out.wav");

    // Stereo input: the left channel carries the tone, the right is silent
    let left = cosine_signal(5 * 1024 + 300, rate, &[(64.0, 0.5, 0.0)], 0.0);
    let interleaved: Vec<f64> = left.iter().flat_map(|&s| [s, 0.0]).collect();
    write_float_wav(&input, &interleaved, rate, 2);

    let buffer = audio::read_wav_file(&input, ChannelMode::First).expect("Failed to load WAV file");
    let orchestrator = BlockOrchestrator::new(BlockConfig {
        block_size: 1024,
        max_harmonics: 4,
        workers: 2,
    })
    .expect("Failed to create orchestrator");
    let result = orchestrator.reconstruct(&buffer).expect("Failed to reconstruct");

    export::write_block_expression_file(&expr_out, &result).expect("Failed to write expressions");
    export::write_reconstruction(&audio_out, &result.samples, rate, OutputFormat::Float32)
        .expect("Failed to write audio");

    let text = fs::read_to_string(&expr_out).expect("Failed to read expressions");
    let headers: Vec<&str> = text.lines().filter(|l| l.starts_with("Block ")).collect();
    assert_eq!(headers, vec!["Block 0:", "Block 1:", "Block 2:", "Block 3:", "Block 4:"]);
    assert!(text.contains("50.0000*c2p*64.0000*x+"));

    let output = audio::read_wav_file(&audio_out, ChannelMode::Mix).expect("Failed to load output");
    assert_eq!(output.len(), 5 * 1024);

    for path in [&input, &expr_out, &audio_out] {
        fs::remove_file(path).ok();
    }
}

/// Test configuration loading.
///
/// This test verifies:
/// - A missing file yields the defaults
/// - A partial file overrides only the keys it names
/// - Limits reject out-of-range parameters
#[test]
fn test_config_loading() {
    let missing = temp_path("missing_config.toml");
    let defaults = config::load_config_from(&missing).expect("Failed to load defaults");
    assert_eq!(defaults.common.expression_file, "do.txt");
    assert_eq!(defaults.analysis.max_harmonics, 10);
    assert_eq!(defaults.analysis.duration_seconds, Some(5));
    assert_eq!(defaults.blocks.block_size, 32768);
    assert_eq!(defaults.blocks.max_harmonics, 100);
    assert_eq!(defaults.blocks.channel_mode, ChannelMode::First);

    let path = temp_path("partial_config.toml");
    fs::write(
        &path,
        "[common]\noutput_format = \"float32\"\n\n[blocks]\nblock_size = 4096\nworkers = 3\n",
    )
    .expect("Failed to write config");
    let loaded = config::load_config_from(&path).expect("Failed to load config");
    assert_eq!(loaded.common.output_format, OutputFormat::Float32);
    assert_eq!(loaded.common.expression_file, "do.txt");
    assert_eq!(loaded.blocks.block_size, 4096);
    assert_eq!(loaded.blocks.workers, 3);
    assert_eq!(loaded.blocks.max_harmonics, 100);
    fs::remove_file(&path).ok();

    let limits = AnalysisLimits::default();
    assert!(limits.check_harmonics(50).is_ok());
    assert!(limits.check_harmonics(0).is_err());
    assert!(limits.check_block_size(32768).is_ok());
    assert!(limits.check_block_size(16).is_err());
}
