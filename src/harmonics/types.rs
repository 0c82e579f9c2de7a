/// Frequencies below this value (Hz) are treated as a constant offset.
pub const NEAR_DC_HZ: f64 = 0.1;

/// One-sided spectrum of an N-sample window.
///
/// The three arrays are parallel and hold `N / 2 + 1` bins, bin `k` sitting
/// at `k * sample_rate / N` Hz.
#[derive(Debug, Clone)]
pub struct SpectralFrame {
    pub magnitude: Vec<f64>,
    /// Bin phase in radians, within (-π, π]
    pub phase: Vec<f64>,
    /// Bin center frequency in Hz
    pub frequency: Vec<f64>,
    /// Length of the analyzed window (N)
    pub window_len: usize,
    pub sample_rate: u32,
}

impl SpectralFrame {
    pub fn num_bins(&self) -> usize {
        self.magnitude.len()
    }

    /// Whether bin `k` has no mirrored counterpart in the full spectrum.
    ///
    /// That is the DC bin and, for even window lengths, the Nyquist bin.
    pub fn is_unfolded_bin(&self, k: usize) -> bool {
        k == 0 || (self.window_len % 2 == 0 && k == self.window_len / 2)
    }
}

/// A single cosine term `amplitude * cos(2π * frequency * t + phase)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicComponent {
    /// Frequency in Hz
    pub frequency: f64,
    /// Amplitude, normalized by the window length
    pub amplitude: f64,
    /// Phase in radians
    pub phase: f64,
    /// Spectrum bin this component was taken from
    pub bin: usize,
}

impl HarmonicComponent {
    pub fn is_near_dc(&self) -> bool {
        self.frequency < NEAR_DC_HZ
    }
}

/// The components selected from one analysis window, in selection order.
///
/// Selection order is strongest first; it is not sorted by frequency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSet {
    components: Vec<HarmonicComponent>,
}

impl ComponentSet {
    pub fn new(components: Vec<HarmonicComponent>) -> Self {
        Self { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HarmonicComponent> {
        self.components.iter()
    }

    pub fn as_slice(&self) -> &[HarmonicComponent] {
        &self.components
    }

    /// Components that oscillate, i.e. everything except near-DC terms
    pub fn oscillating(&self) -> impl Iterator<Item = &HarmonicComponent> {
        self.components.iter().filter(|c| !c.is_near_dc())
    }
}

impl<'a> IntoIterator for &'a ComponentSet {
    type Item = &'a HarmonicComponent;
    type IntoIter = std::slice::Iter<'a, HarmonicComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

/// Configuration for whole-signal analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Number of components to keep
    pub max_harmonics: usize,
    /// Analyze only the first N seconds; `None` analyzes everything
    pub duration_seconds: Option<u32>,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), HarmonicError> {
        if self.max_harmonics == 0 {
            return Err(HarmonicError::InvalidParams(
                "Number of harmonics must be at least 1".to_string(),
            ));
        }
        if self.duration_seconds == Some(0) {
            return Err(HarmonicError::InvalidParams(
                "Duration must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for block-parallel analysis
#[derive(Debug, Clone)]
pub struct BlockConfig {
    /// Samples per block
    pub block_size: usize,
    /// Number of components to keep per block
    pub max_harmonics: usize,
    /// Worker threads; 0 uses one per available CPU
    pub workers: usize,
}

impl BlockConfig {
    pub fn validate(&self) -> Result<(), HarmonicError> {
        if self.block_size == 0 {
            return Err(HarmonicError::InvalidParams(
                "Block size must be at least 1 sample".to_string(),
            ));
        }
        if self.max_harmonics == 0 {
            return Err(HarmonicError::InvalidParams(
                "Number of harmonics must be at least 1".to_string(),
            ));
        }
        if !self.block_size.is_power_of_two() {
            tracing::warn!(
                block_size = self.block_size,
                "block size is not a power of two, the transform will be slower"
            );
        }
        Ok(())
    }
}

/// Result of analyzing and resynthesizing a single window
#[derive(Debug, Clone)]
pub struct WindowAnalysis {
    pub components: ComponentSet,
    /// Reconstruction with the same length as the analyzed window
    pub reconstructed: Vec<f64>,
}

/// Result of the whole-signal variant
#[derive(Debug, Clone)]
pub struct SignalAnalysis {
    pub components: ComponentSet,
    pub reconstructed: Vec<f64>,
    pub sample_rate: u32,
}

/// Per-block output of the block-parallel variant
#[derive(Debug, Clone)]
pub struct BlockResult {
    pub index: usize,
    pub components: ComponentSet,
    pub reconstructed: Vec<f64>,
}

/// Merged output of the block-parallel variant, in block order
#[derive(Debug, Clone)]
pub struct BlockReconstruction {
    pub blocks: Vec<BlockResult>,
    /// Concatenated reconstruction, `blocks.len() * block_size` samples long
    pub samples: Vec<f64>,
    pub block_size: usize,
    pub sample_rate: u32,
}

/// Errors that can occur during harmonic analysis
#[derive(Debug, thiserror::Error)]
pub enum HarmonicError {
    /// The analysis window has no samples
    #[error("Analysis window is empty")]
    EmptyWindow,

    /// Invalid parameter values
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A block task failed; the whole run is aborted
    #[error("Block {block} failed: {source}")]
    TaskFailure {
        block: usize,
        #[source]
        source: Box<HarmonicError>,
    },

    /// The worker pool could not be created
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}
