//! Tick-driven sync engine.
//!
//! Runs the full per-frame pipeline: spectrum → band aggregation → smoothing
//! → per-binding parameter evaluation. Strictly sequential: within one tick
//! the analyzer finishes writing before any binding reads, so no locking is
//! needed in the single-threaded host model.

use tracing::debug;

use crate::analyzer::SpectrumAnalyzer;
use crate::config::AnalyzerConfig;
use crate::mapping::BindingSet;

/// A named scalar value produced by one engine tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterUpdate {
    /// Name of the downstream parameter.
    pub name: String,
    /// The computed value.
    pub value: f32,
}

/// Drives one analyzer and one binding set, once per rendered frame.
///
/// Only scalar bindings are evaluated by [`tick`](Self::tick); the color
/// path on [`BandParameterBinding`](crate::BandParameterBinding) is a
/// standalone capability the host calls directly if it needs it.
#[derive(Debug)]
pub struct BandSyncEngine {
    analyzer: SpectrumAnalyzer,
    bindings: BindingSet,
}

impl BandSyncEngine {
    /// Create an engine from a validated binding set.
    pub fn new(config: AnalyzerConfig, bindings: BindingSet) -> Self {
        debug!("BandSyncEngine created with {} bindings", bindings.len());
        Self {
            analyzer: SpectrumAnalyzer::new(config),
            bindings,
        }
    }

    /// Run one tick and collect the updates for every binding that applies
    /// at `time`.
    ///
    /// Bindings that are disabled or outside their time window contribute no
    /// update; the host keeps those parameters at their last value.
    pub fn tick(&mut self, spectrum: &[f32], time: f32) -> Vec<ParameterUpdate> {
        self.analyzer.process_spectrum(spectrum);
        let bands = self.analyzer.band_buffer();

        let mut updates = Vec::with_capacity(self.bindings.len());
        for (name, binding) in self.bindings.iter() {
            if let Some(value) = binding.evaluate(bands, time) {
                if binding.log_value {
                    debug!("{}: {} (band {})", name, value, binding.band);
                }
                updates.push(ParameterUpdate {
                    name: name.clone(),
                    value,
                });
            }
        }
        updates
    }

    /// The analyzer, for reading the band buffers directly.
    pub fn analyzer(&self) -> &SpectrumAnalyzer {
        &self.analyzer
    }

    /// Mutable analyzer access, for reconfiguration or reset.
    pub fn analyzer_mut(&mut self) -> &mut SpectrumAnalyzer {
        &mut self.analyzer
    }

    /// The binding set.
    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    /// Mutable binding set access, for runtime enable/disable and overrides.
    pub fn bindings_mut(&mut self) -> &mut BindingSet {
        &mut self.bindings
    }
}
