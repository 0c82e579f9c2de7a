//! Decompose audio into a bounded sum of cosines and rebuild it.
//!
//! A signal is transformed with an FFT, its strongest bins become
//! amplitude/frequency/phase triples, and those triples are summed back into
//! a time-domain approximation. Long signals can be processed in fixed-size
//! blocks on a worker pool.
pub mod audio;
pub mod config;
pub mod export;
pub mod harmonics;
