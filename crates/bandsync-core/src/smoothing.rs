//! Temporal band smoothing.
//!
//! Applies an asymmetric attack/decay filter to the raw band values: a rising
//! band snaps to its new value instantly, a falling band eases down toward it
//! over several ticks. The smoothed values are what consumers should display
//! or map to parameters; the raw values are too jittery to drive visuals
//! directly.

use crate::bands::NUM_BANDS;
use crate::config::DecayStrategy;

/// Decay step installed when a band attacks, consumed by the
/// `LinearAccelerating` strategy on the following falling ticks.
const ATTACK_DECAY_RESET: f32 = 0.005;

/// Fraction of the remaining gap closed per tick by the `Proportional`
/// strategy (1/8 of the gap).
const PROPORTIONAL_FALLOFF: f32 = 8.0;

/// Per-tick growth factor for the `LinearAccelerating` decay step.
const DECAY_ACCELERATION: f32 = 1.4;

/// Stateful attack/decay filter over the 8 band values.
///
/// Guarantee: after an update, each smoothed value lies within
/// `[raw, previous]` - attack is instantaneous and decay never overshoots
/// below the current raw target.
#[derive(Debug, Clone)]
pub struct BandSmoother {
    strategy: DecayStrategy,
    smoothed: [f32; NUM_BANDS],
    decay: [f32; NUM_BANDS],
}

impl BandSmoother {
    /// Create a smoother with all bands at zero.
    pub fn new(strategy: DecayStrategy) -> Self {
        Self {
            strategy,
            smoothed: [0.0; NUM_BANDS],
            decay: [0.0; NUM_BANDS],
        }
    }

    /// Advance the filter by one tick against this tick's raw band values.
    pub fn smooth(&mut self, raw: &[f32; NUM_BANDS]) {
        for i in 0..NUM_BANDS {
            if raw[i] > self.smoothed[i] {
                // Instant attack; arm the decay step for the fall.
                self.smoothed[i] = raw[i];
                self.decay[i] = ATTACK_DECAY_RESET;
            } else if raw[i] < self.smoothed[i] {
                match self.strategy {
                    DecayStrategy::Proportional => {
                        self.decay[i] = (self.smoothed[i] - raw[i]) / PROPORTIONAL_FALLOFF;
                        self.smoothed[i] -= self.decay[i];
                    }
                    DecayStrategy::LinearAccelerating => {
                        self.smoothed[i] = (self.smoothed[i] - self.decay[i]).max(raw[i]);
                        self.decay[i] *= DECAY_ACCELERATION;
                    }
                }
            }
        }
    }

    /// The current smoothed band values.
    pub fn values(&self) -> &[f32; NUM_BANDS] {
        &self.smoothed
    }

    /// Zero all band and decay state.
    pub fn reset(&mut self) {
        self.smoothed = [0.0; NUM_BANDS];
        self.decay = [0.0; NUM_BANDS];
    }
}
