//! Analyzer configuration types.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bands::NUM_BANDS;

/// Valid spectrum buffer sizes.
///
/// Spectrum sources must deliver a power-of-two number of magnitude samples.
/// Anything below 512 leaves too few samples for the upper bands, so the
/// accepted range is 512 through 8192.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleCount {
    /// 512 samples (minimum, exactly covers all band ranges)
    #[default]
    S512,
    /// 1024 samples
    S1024,
    /// 2048 samples
    S2048,
    /// 4096 samples
    S4096,
    /// 8192 samples (maximum)
    S8192,
}

impl SampleCount {
    /// All valid sample counts, smallest first.
    pub const ALL: [SampleCount; 5] = [
        SampleCount::S512,
        SampleCount::S1024,
        SampleCount::S2048,
        SampleCount::S4096,
        SampleCount::S8192,
    ];

    /// The number of samples this variant stands for.
    pub fn as_usize(self) -> usize {
        match self {
            SampleCount::S512 => 512,
            SampleCount::S1024 => 1024,
            SampleCount::S2048 => 2048,
            SampleCount::S4096 => 4096,
            SampleCount::S8192 => 8192,
        }
    }

    /// Sanitize a raw sample count supplied by the host.
    ///
    /// Invalid counts fall back to 512 rather than failing; a bad value must
    /// never take down the tick loop.
    pub fn from_samples(samples: usize) -> Self {
        match samples {
            512 => SampleCount::S512,
            1024 => SampleCount::S1024,
            2048 => SampleCount::S2048,
            4096 => SampleCount::S4096,
            8192 => SampleCount::S8192,
            other => {
                warn!(
                    "Invalid spectrum sample count {}, defaulting to 512",
                    other
                );
                SampleCount::S512
            }
        }
    }

    /// Map a selector index (0..=4) to a sample count.
    ///
    /// Hosts that expose the size as a stepped slider hand over the step
    /// index instead of the sample count itself. Out-of-range indices fall
    /// back to 512.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(count) => *count,
            None => {
                warn!("Invalid sample count index {}, defaulting to 512", index);
                SampleCount::S512
            }
        }
    }
}

/// How smoothed band values fall toward a lower raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecayStrategy {
    /// Close 1/8 of the remaining gap per tick (asymptotic approach).
    #[default]
    Proportional,
    /// Subtract a fixed step that grows by 1.4x per falling tick, clamped at
    /// the raw value.
    LinearAccelerating,
}

/// Configuration for a [`SpectrumAnalyzer`](crate::SpectrumAnalyzer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Expected spectrum buffer size.
    pub sample_count: SampleCount,
    /// Decay behavior for the band smoother.
    pub decay_strategy: DecayStrategy,
}

impl AnalyzerConfig {
    /// Number of output bands this configuration produces. Always 8.
    pub fn num_bands(&self) -> usize {
        NUM_BANDS
    }
}
