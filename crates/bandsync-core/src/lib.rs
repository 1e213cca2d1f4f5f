//! BandSync Core - Audio-reactive band analysis and parameter mapping
//!
//! This crate contains the per-frame analysis pipeline for driving visual
//! parameters from audio, including:
//! - Reduction of an FFT magnitude buffer into 8 logarithmic frequency bands
//! - Attack/decay smoothing of band values across ticks
//! - Offset/strength/threshold mapping of bands onto named parameters
//! - Validated, serde-compatible configuration for all of the above
//!
//! The FFT itself is the host's job: the core consumes a periodically
//! refreshed magnitude buffer and produces band values and parameter updates
//! once per tick.

#![warn(missing_docs)]

pub mod analyzer;
pub mod bands;
pub mod config;
pub mod engine;
pub mod mapping;
pub mod smoothing;

// --- Re-exports grouped by category ---

// Analysis pipeline
pub use analyzer::SpectrumAnalyzer;
pub use bands::{BandAggregator, NUM_BANDS, SAMPLES_CONSUMED};
pub use smoothing::BandSmoother;

// Configuration
pub use config::{AnalyzerConfig, DecayStrategy, SampleCount};

// Parameter mapping
pub use engine::{BandSyncEngine, ParameterUpdate};
pub use mapping::{BandParameterBinding, BindingSet, ConfigError};
