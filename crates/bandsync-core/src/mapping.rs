//! Band-to-parameter mapping configuration and evaluation.
//!
//! A [`BandParameterBinding`] links one downstream parameter to one frequency
//! band through an `offset + band * strength` transform, with an optional
//! threshold filter and an optional active time window. Bindings live in a
//! name-keyed [`BindingSet`] that validates them at configuration time so the
//! per-tick evaluation never has to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bands::NUM_BANDS;

/// Errors raised while validating binding configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A binding referenced a band outside 0..=7.
    #[error("binding `{name}`: band index {band} is out of range (0-7)")]
    InvalidBandIndex {
        /// Name of the offending binding.
        name: String,
        /// The rejected band index.
        band: usize,
    },
}

fn default_enabled() -> bool {
    true
}

/// Configuration linking a downstream parameter to a frequency band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandParameterBinding {
    /// Frequency band to sync with (0 = lowest, 7 = highest).
    pub band: usize,
    /// Multiplier applied to the band value.
    pub strength: f32,
    /// Added to the scaled band value.
    pub offset: f32,
    /// Whether the threshold filter is active.
    #[serde(default)]
    pub use_filter: bool,
    /// Values below this threshold are replaced.
    #[serde(default)]
    pub filter_below: f32,
    /// Replacement for filtered values (the parameter's resting value).
    #[serde(default)]
    pub filter_to: f32,
    /// Whether the binding only applies inside a time window.
    #[serde(default)]
    pub use_time_window: bool,
    /// Window start in seconds (inclusive).
    #[serde(default)]
    pub start_time: f32,
    /// Window end in seconds (inclusive).
    #[serde(default)]
    pub end_time: f32,
    /// Whether this binding participates in the tick loop.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Emit a debug log with the computed value on every tick that produces
    /// one (disabled or gated-out ticks log nothing). Useful for picking
    /// filter thresholds.
    #[serde(default)]
    pub log_value: bool,
    /// Base color for the per-channel color transform, if this parameter is
    /// color-valued.
    #[serde(default)]
    pub color: Option<[f32; 3]>,
}

impl BandParameterBinding {
    /// Create a minimal scalar binding. Filtering and time gating are off,
    /// the binding starts enabled.
    pub fn new(band: usize, strength: f32, offset: f32) -> Self {
        Self {
            band,
            strength,
            offset,
            use_filter: false,
            filter_below: 0.0,
            filter_to: 0.0,
            use_time_window: false,
            start_time: 0.0,
            end_time: 0.0,
            enabled: true,
            log_value: false,
            color: None,
        }
    }

    /// Whether the binding applies at `time`. Bounds are inclusive; bindings
    /// without a time window always apply.
    pub fn active_at(&self, time: f32) -> bool {
        if self.use_time_window {
            time >= self.start_time && time <= self.end_time
        } else {
            true
        }
    }

    /// Compute the scalar output for the current smoothed band values.
    ///
    /// Returns `None` when the binding is disabled or outside its time
    /// window; downstream keeps its last value in that case. A band index
    /// outside 0..=7 also produces `None` - [`BindingSet`] never holds one,
    /// but a hand-built binding must not be able to panic the tick loop.
    pub fn evaluate(&self, bands: &[f32; NUM_BANDS], time: f32) -> Option<f32> {
        if !self.enabled || !self.active_at(time) {
            return None;
        }
        let mut value = self.offset + bands.get(self.band)? * self.strength;
        if self.use_filter && value < self.filter_below {
            value = self.filter_to;
        }
        Some(value)
    }

    /// Compute the color output: each channel of the base color multiplied
    /// by `offset + band * strength`.
    ///
    /// Returns `None` when no base color is configured or the band index is
    /// out of range. The color path has no filtering or time gating and is
    /// not driven by the engine tick; it exists for hosts that fade color
    /// parameters with band intensity.
    pub fn evaluate_color(&self, bands: &[f32; NUM_BANDS]) -> Option<[f32; 3]> {
        let base = self.color?;
        let factor = self.offset + bands.get(self.band)? * self.strength;
        Some([base[0] * factor, base[1] * factor, base[2] * factor])
    }
}

/// Name-keyed set of validated parameter bindings.
///
/// Every path into the set validates - [`insert`](Self::insert) for
/// programmatic configuration, a checking `Deserialize` impl for loaded
/// configuration - so the per-tick evaluation never sees an out-of-range
/// band index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BindingSet {
    bindings: HashMap<String, BandParameterBinding>,
}

impl<'de> Deserialize<'de> for BindingSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawBindingSet {
            bindings: HashMap<String, BandParameterBinding>,
        }

        let raw = RawBindingSet::deserialize(deserializer)?;
        let mut set = BindingSet::new();
        for (name, binding) in raw.bindings {
            set.insert(name, binding).map_err(serde::de::Error::custom)?;
        }
        Ok(set)
    }
}

impl BindingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a binding, validating its band index.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        binding: BandParameterBinding,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if binding.band >= NUM_BANDS {
            return Err(ConfigError::InvalidBandIndex {
                name,
                band: binding.band,
            });
        }
        self.bindings.insert(name, binding);
        Ok(())
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&BandParameterBinding> {
        self.bindings.get(name)
    }

    /// Remove a binding by name, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<BandParameterBinding> {
        self.bindings.remove(name)
    }

    /// Enable or disable a binding. Returns false if the name is unknown.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.bindings.get_mut(name) {
            Some(binding) => {
                binding.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Iterate over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BandParameterBinding)> {
        self.bindings.iter()
    }

    /// Number of bindings in the set.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Force every binding onto one shared band.
    pub fn apply_global_band(&mut self, band: usize) -> Result<(), ConfigError> {
        if band >= NUM_BANDS {
            return Err(ConfigError::InvalidBandIndex {
                name: "<global>".to_string(),
                band,
            });
        }
        for binding in self.bindings.values_mut() {
            binding.band = band;
        }
        Ok(())
    }

    /// Enable one shared threshold filter on every binding.
    pub fn apply_global_filter(&mut self, filter_below: f32, filter_to: f32) {
        for binding in self.bindings.values_mut() {
            binding.use_filter = true;
            binding.filter_below = filter_below;
            binding.filter_to = filter_to;
        }
    }
}
