use super::analysis::{analyze_window, reconstruction_error};
use super::types::{BlockConfig, BlockReconstruction, BlockResult, HarmonicError};
use crate::audio::SampleBuffer;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Callback invoked with the index of each block as it finishes
pub type ProgressFn = Box<dyn Fn(usize) + Send + Sync>;

/// Splits a long signal into fixed-size blocks and analyzes them in parallel.
///
/// Only whole blocks are processed: samples past `total_blocks * block_size`
/// are discarded. Blocks run on a dedicated worker pool in any order, but
/// every result lands in a slot addressed by its block index, so the merged
/// output is always in the original temporal order.
pub struct BlockOrchestrator {
    config: BlockConfig,
    pool: ThreadPool,
    on_block_done: Option<ProgressFn>,
}

impl BlockOrchestrator {
    /// Creates an orchestrator with its own worker pool.
    ///
    /// # Errors
    /// * If the configuration is invalid
    /// * If the worker threads cannot be spawned
    pub fn new(config: BlockConfig) -> Result<Self, HarmonicError> {
        config.validate()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("harmonic-block-{}", i))
            .build()
            .map_err(|e| HarmonicError::WorkerPool(e.to_string()))?;

        tracing::debug!(workers = pool.current_num_threads(), "worker pool ready");

        Ok(Self {
            config,
            pool,
            on_block_done: None,
        })
    }

    /// Registers a callback run once per finished block.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_block_done = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    /// Number of whole blocks in a signal of `len` samples
    pub fn total_blocks(&self, len: usize) -> usize {
        len / self.config.block_size
    }

    /// Runs `task` on every whole block and returns the results in block order.
    ///
    /// Tasks see only their own block. The first failure aborts the run and
    /// is reported as [`HarmonicError::TaskFailure`]; no partial results are
    /// returned.
    ///
    /// # Errors
    /// * If the signal is shorter than one block
    /// * If any block task fails
    pub fn run<T, F>(&self, samples: &[f64], task: F) -> Result<Vec<T>, HarmonicError>
    where
        T: Send,
        F: Fn(usize, &[f64]) -> Result<T, HarmonicError> + Sync,
    {
        let block_size = self.config.block_size;
        let total_blocks = self.total_blocks(samples.len());
        if total_blocks == 0 {
            return Err(HarmonicError::EmptyWindow);
        }

        let dropped = samples.len() - total_blocks * block_size;
        if dropped > 0 {
            tracing::info!(dropped, "discarding trailing partial block");
        }
        tracing::info!(total_blocks, block_size, "dispatching blocks");

        // One write-once slot per block; workers never share a slot.
        let mut slots: Vec<Option<T>> = (0..total_blocks).map(|_| None).collect();

        self.pool.install(|| {
            slots
                .par_iter_mut()
                .enumerate()
                .try_for_each(|(index, slot)| {
                    let block = &samples[index * block_size..(index + 1) * block_size];
                    let result = task(index, block).map_err(|source| HarmonicError::TaskFailure {
                        block: index,
                        source: Box::new(source),
                    })?;
                    *slot = Some(result);

                    if let Some(callback) = &self.on_block_done {
                        callback(index);
                    }
                    Ok::<(), HarmonicError>(())
                })
        })?;

        let results: Vec<T> = slots.into_iter().flatten().collect();
        debug_assert_eq!(results.len(), total_blocks);
        Ok(results)
    }

    /// Decomposes and resynthesizes every whole block of `buffer`.
    ///
    /// # Errors
    /// * If the buffer is shorter than one block
    /// * If any block fails to analyze
    pub fn reconstruct(&self, buffer: &SampleBuffer) -> Result<BlockReconstruction, HarmonicError> {
        let sample_rate = buffer.sample_rate();
        let max_harmonics = self.config.max_harmonics;

        let blocks = self.run(buffer.samples(), |index, block| {
            let window = analyze_window(block, sample_rate, max_harmonics)?;
            tracing::debug!(block = index, components = window.components.len(), "block done");
            Ok(BlockResult {
                index,
                components: window.components,
                reconstructed: window.reconstructed,
            })
        })?;

        let samples: Vec<f64> = blocks
            .iter()
            .flat_map(|block| block.reconstructed.iter().copied())
            .collect();

        let quality = reconstruction_error(buffer.samples(), &samples);
        tracing::info!(
            blocks = blocks.len(),
            samples = samples.len(),
            rms_error = quality.rms_error,
            snr_db = quality.snr_db,
            "reconstructed blocks"
        );

        Ok(BlockReconstruction {
            blocks,
            samples,
            block_size: self.config.block_size,
            sample_rate,
        })
    }
}
