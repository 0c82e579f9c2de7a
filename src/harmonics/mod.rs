/// Harmonic decomposition and reconstruction.
///
/// This module provides functionality to:
/// - Compute the one-sided spectrum of a sample window
/// - Select the strongest bins as cosine components
/// - Resynthesize a signal from a component set
/// - Run the same pipeline over fixed-size blocks on a worker pool
/// - Render component sets as text expressions
mod analysis;
mod blocks;
mod expression;
mod selection;
mod spectrum;
mod synthesis;
mod types;

pub use analysis::{analyze_signal, analyze_window, reconstruction_error, ReconstructionQuality};
pub use blocks::{BlockOrchestrator, ProgressFn};
pub use expression::format_block_expression;
pub use selection::select_components;
pub use spectrum::analyze_spectrum;
pub use synthesis::{synthesize, time_axis};
pub use types::{
    AnalysisConfig, BlockConfig, BlockReconstruction, BlockResult, ComponentSet,
    HarmonicComponent, HarmonicError, SignalAnalysis, SpectralFrame, WindowAnalysis, NEAR_DC_HZ,
};
