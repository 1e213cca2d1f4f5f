//! Spectrum-to-band reduction.
//!
//! Buckets an FFT magnitude buffer into 8 logarithmically-widening frequency
//! bands. Band widths double from 2 samples at the bottom to 128 at the top,
//! with two extra samples folded into the last band, for a fixed total of
//! 512 consumed samples. Buffers larger than 512 samples leave an unused
//! high-frequency remainder.

/// Number of frequency bands produced by the aggregator.
pub const NUM_BANDS: usize = 8;

/// Total spectrum samples consumed across all bands.
pub const SAMPLES_CONSUMED: usize = 512;

/// Fixed display scaling applied to every band value.
const DISPLAY_SCALE: f32 = 10.0;

/// Reduces an N-sample spectrum into [`NUM_BANDS`] band magnitudes.
///
/// Within a band, each sample is weighted by its absolute buffer index + 1,
/// compensating for FFT magnitude roll-off at higher bins. Each band's sum is
/// divided by the cumulative number of samples consumed so far across all
/// bands this tick (not the band's own count) - a deliberate normalization
/// that tempers the growing band widths.
#[derive(Debug, Clone)]
pub struct BandAggregator {
    band_ranges: [(usize, usize); NUM_BANDS],
}

impl Default for BandAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl BandAggregator {
    /// Create an aggregator with precomputed band index ranges.
    pub fn new() -> Self {
        let mut band_ranges = [(0usize, 0usize); NUM_BANDS];
        let mut start = 0;
        for (i, range) in band_ranges.iter_mut().enumerate() {
            let mut width = 2 * (1 << i);
            if i == NUM_BANDS - 1 {
                // The last band absorbs the remainder of the 512-sample run.
                width += 2;
            }
            *range = (start, start + width);
            start += width;
        }
        debug_assert_eq!(start, SAMPLES_CONSUMED);
        Self { band_ranges }
    }

    /// Half-open `[start, end)` spectrum index range consumed by each band.
    pub fn band_ranges(&self) -> &[(usize, usize); NUM_BANDS] {
        &self.band_ranges
    }

    /// Reduce `spectrum` into `bands`.
    ///
    /// Buffers shorter than [`SAMPLES_CONSUMED`] are treated as zero-padded:
    /// missing samples contribute nothing but still advance the cumulative
    /// divisor, so band values are comparable across buffer sizes. Non-finite
    /// input samples are treated as zero.
    pub fn aggregate(&self, spectrum: &[f32], bands: &mut [f32; NUM_BANDS]) {
        for (i, &(start, end)) in self.band_ranges.iter().enumerate() {
            let mut sum = 0.0f32;
            for index in start..end.min(spectrum.len()) {
                let sample = spectrum[index];
                if sample.is_finite() {
                    sum += sample * (index + 1) as f32;
                }
            }
            // `end` equals the cumulative sample count through this band.
            bands[i] = sum / end as f32 * DISPLAY_SCALE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_ranges_cover_512_samples() {
        let aggregator = BandAggregator::new();
        let ranges = aggregator.band_ranges();

        // Widths double per band, +2 on the last.
        let expected_widths = [2, 4, 8, 16, 32, 64, 128, 258];
        for (i, &(start, end)) in ranges.iter().enumerate() {
            assert_eq!(end - start, expected_widths[i], "band {} width", i);
        }

        // Strictly increasing, non-overlapping, starting at 0.
        assert_eq!(ranges[0].0, 0);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(ranges[NUM_BANDS - 1].1, SAMPLES_CONSUMED);
    }

    #[test]
    fn test_zero_spectrum_yields_zero_bands() {
        let aggregator = BandAggregator::new();
        let mut bands = [1.0f32; NUM_BANDS];
        for n in [512, 1024, 2048, 4096, 8192] {
            aggregator.aggregate(&vec![0.0; n], &mut bands);
            assert_eq!(bands, [0.0; NUM_BANDS], "N = {}", n);
        }
    }

    #[test]
    fn test_flat_spectrum_band_values() {
        let aggregator = BandAggregator::new();
        let spectrum = vec![1.0f32; 512];
        let mut bands = [0.0f32; NUM_BANDS];
        aggregator.aggregate(&spectrum, &mut bands);

        // Band 0: indices 0,1 weighted 1+2 = 3, divided by 2 consumed, x10.
        assert!((bands[0] - 15.0).abs() < 1e-4);
        // Band 1: indices 2..6 weighted 3+4+5+6 = 18, divided by 6, x10.
        assert!((bands[1] - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_short_buffer_treated_as_zero_padded() {
        let aggregator = BandAggregator::new();
        let mut full = [0.0f32; NUM_BANDS];
        let mut short = [0.0f32; NUM_BANDS];

        // 256 real samples followed by zeros vs. a truncated buffer.
        let mut spectrum = vec![0.5f32; 256];
        aggregator.aggregate(&spectrum, &mut short);
        spectrum.resize(512, 0.0);
        aggregator.aggregate(&spectrum, &mut full);

        assert_eq!(short, full);
    }

    #[test]
    fn test_remainder_above_512_is_ignored() {
        let aggregator = BandAggregator::new();
        let mut bands_512 = [0.0f32; NUM_BANDS];
        let mut bands_8192 = [0.0f32; NUM_BANDS];

        let spectrum_512 = vec![0.25f32; 512];
        let mut spectrum_8192 = vec![0.25f32; 512];
        // Garbage above index 511 must not influence any band.
        spectrum_8192.resize(8192, 123.0);

        aggregator.aggregate(&spectrum_512, &mut bands_512);
        aggregator.aggregate(&spectrum_8192, &mut bands_8192);
        assert_eq!(bands_512, bands_8192);
    }

    #[test]
    fn test_non_finite_samples_treated_as_zero() {
        let aggregator = BandAggregator::new();
        let mut spectrum = vec![0.0f32; 512];
        spectrum[0] = f32::NAN;
        spectrum[1] = f32::INFINITY;
        spectrum[2] = f32::NEG_INFINITY;

        let mut bands = [0.0f32; NUM_BANDS];
        aggregator.aggregate(&spectrum, &mut bands);
        for (i, band) in bands.iter().enumerate() {
            assert!(band.is_finite(), "band {} not finite", i);
            assert_eq!(*band, 0.0);
        }
    }
}
