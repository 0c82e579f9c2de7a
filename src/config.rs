use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::audio::{ChannelMode, OutputFormat};
use crate::harmonics::HarmonicError;

/// Settings loaded from `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub common: CommonConfig,
    pub analysis: AnalysisDefaults,
    pub blocks: BlockDefaults,
    pub limits: AnalysisLimits,
}

/// Settings shared by both analysis modes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// Where the expression log is written
    pub expression_file: String,
    pub output_format: OutputFormat,
}

/// Defaults for whole-signal analysis
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    pub max_harmonics: usize,
    /// Seconds analyzed from the start of the signal; omit to analyze all
    pub duration_seconds: Option<u32>,
    pub output_file: String,
    pub channel_mode: ChannelMode,
}

/// Defaults for block-parallel analysis
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlockDefaults {
    pub block_size: usize,
    pub max_harmonics: usize,
    /// 0 means one worker per CPU
    pub workers: usize,
    pub output_file: String,
    pub channel_mode: ChannelMode,
}

/// Bounds applied to user-supplied parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisLimits {
    pub min_harmonics: usize,
    pub max_harmonics: usize,
    pub min_block_size: usize,
    pub max_block_size: usize,
}

impl Default for CommonConfig {
    fn default() -> Self {
        CommonConfig {
            expression_file: "do.txt".to_string(),
            output_format: OutputFormat::Int16,
        }
    }
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        AnalysisDefaults {
            max_harmonics: 10,
            duration_seconds: Some(5),
            output_file: "output.wav".to_string(),
            channel_mode: ChannelMode::Mix,
        }
    }
}

impl Default for BlockDefaults {
    fn default() -> Self {
        BlockDefaults {
            block_size: 32768,
            max_harmonics: 100,
            workers: 0,
            output_file: "output.ch.wav".to_string(),
            channel_mode: ChannelMode::First,
        }
    }
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        AnalysisLimits {
            min_harmonics: 1,
            max_harmonics: 4096,
            min_block_size: 64,
            max_block_size: 1 << 20,
        }
    }
}

impl AnalysisLimits {
    /// Rejects a harmonic count outside the configured range
    pub fn check_harmonics(&self, harmonics: usize) -> Result<(), HarmonicError> {
        if harmonics < self.min_harmonics || harmonics > self.max_harmonics {
            return Err(HarmonicError::InvalidParams(format!(
                "Number of harmonics ({}) must be between {} and {}",
                harmonics, self.min_harmonics, self.max_harmonics
            )));
        }
        Ok(())
    }

    /// Rejects a block size outside the configured range
    pub fn check_block_size(&self, block_size: usize) -> Result<(), HarmonicError> {
        if block_size < self.min_block_size || block_size > self.max_block_size {
            return Err(HarmonicError::InvalidParams(format!(
                "Block size ({}) must be between {} and {} samples",
                block_size, self.min_block_size, self.max_block_size
            )));
        }
        Ok(())
    }
}

/// Load configuration from config.toml in the working directory
pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    load_config_from(Path::new("config.toml"))
}

/// Load configuration from `path`, falling back to defaults if it is missing
pub fn load_config_from(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    match File::open(path) {
        Ok(mut file) => {
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            let config = toml::from_str(&contents)?;
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        Err(_) => {
            // If file doesn't exist, return default config
            Ok(Config::default())
        }
    }
}
