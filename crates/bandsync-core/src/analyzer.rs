//! Per-tick spectrum analysis pipeline.

use tracing::{debug, trace};

use crate::bands::{BandAggregator, NUM_BANDS};
use crate::config::AnalyzerConfig;
use crate::smoothing::BandSmoother;

/// One analyzer instance: spectrum in, raw and smoothed band values out.
///
/// Owns the two 8-element read points: `frequency_bands` (this tick's raw
/// aggregate) and `band_buffer` (the smoothed, displayed values). Both are
/// refreshed once per [`process_spectrum`](Self::process_spectrum) call and
/// stable between calls. Multiple analyzers can coexist; there is no shared
/// state between instances.
#[derive(Debug, Clone)]
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    aggregator: BandAggregator,
    smoother: BandSmoother,
    frequency_bands: [f32; NUM_BANDS],
    tick_count: u64,
}

impl SpectrumAnalyzer {
    /// Create an analyzer with the given configuration.
    pub fn new(config: AnalyzerConfig) -> Self {
        debug!(
            "SpectrumAnalyzer created: samples={}, decay={:?}",
            config.sample_count.as_usize(),
            config.decay_strategy
        );
        Self {
            config,
            aggregator: BandAggregator::new(),
            smoother: BandSmoother::new(config.decay_strategy),
            frequency_bands: [0.0; NUM_BANDS],
            tick_count: 0,
        }
    }

    /// Run one tick: aggregate the spectrum into raw bands, then advance the
    /// smoother.
    ///
    /// `spectrum` should hold `config.sample_count` magnitude samples; a
    /// shorter buffer is treated as zero-padded, a longer one has its tail
    /// ignored.
    pub fn process_spectrum(&mut self, spectrum: &[f32]) {
        let expected = self.config.sample_count.as_usize();
        if spectrum.len() != expected {
            trace!(
                "Spectrum length {} differs from configured {}",
                spectrum.len(),
                expected
            );
        }

        self.aggregator.aggregate(spectrum, &mut self.frequency_bands);
        self.smoother.smooth(&self.frequency_bands);

        self.tick_count += 1;
        if self.tick_count % 600 == 0 {
            trace!(
                "Tick {}: bands={:?}",
                self.tick_count,
                &self.smoother.values()[..3]
            );
        }
    }

    /// This tick's raw band aggregate.
    pub fn frequency_bands(&self) -> &[f32; NUM_BANDS] {
        &self.frequency_bands
    }

    /// The smoothed band values consumers should read.
    pub fn band_buffer(&self) -> &[f32; NUM_BANDS] {
        self.smoother.values()
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Replace the configuration and clear all per-buffer state.
    ///
    /// Reconfiguring mid-run must not carry stale band or decay values into
    /// the new buffer size.
    pub fn set_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
        self.smoother = BandSmoother::new(config.decay_strategy);
        self.frequency_bands = [0.0; NUM_BANDS];
        self.tick_count = 0;
        debug!(
            "SpectrumAnalyzer reconfigured: samples={}, decay={:?}",
            config.sample_count.as_usize(),
            config.decay_strategy
        );
    }

    /// Zero all band state without touching the configuration.
    pub fn reset(&mut self) {
        self.frequency_bands = [0.0; NUM_BANDS];
        self.smoother.reset();
        self.tick_count = 0;
        debug!("SpectrumAnalyzer reset");
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
