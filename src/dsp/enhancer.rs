//! Stereo enhancer block processor
//!
//! Band-shapes both channels with a high-pass/low-pass cascade, delays the
//! right channel by a few milliseconds (Haas effect) and blends the result
//! with the dry signal according to the intensity parameter.
//!
//! Everything here runs on the audio thread: no locks, no logging, and the
//! only allocation is a delay-line resize when the spatial width changes.

use super::delay_line::DelayLine;
use super::filter::OnePoleFilter;
use crate::params::EffectParams;

// ============================================================================
// Parameter mapping
// ============================================================================

/// Maximum inter-channel delay at full spatial width (15 ms)
pub const MAX_HAAS_SECONDS: f32 = 0.015;

/// High-pass corner at zero intensity
pub const HIGH_PASS_BASE_HZ: f32 = 50.0;

/// High-pass corner increase per unit of intensity
pub const HIGH_PASS_SPAN_HZ: f32 = 150.0;

/// Low-pass corner at zero intensity
pub const LOW_PASS_BASE_HZ: f32 = 12000.0;

/// Low-pass corner decrease per unit of intensity
pub const LOW_PASS_SPAN_HZ: f32 = 8000.0;

/// Haas delay in whole samples: `floor(width * 0.015 * sample_rate)`
///
/// Negative or NaN widths give 0 (bypass). The result never exceeds one
/// second of audio so a runaway width cannot request an unbounded buffer.
pub fn haas_delay_samples(spatial_width: f32, sample_rate: u32) -> usize {
    let samples = (spatial_width * MAX_HAAS_SECONDS) * sample_rate as f32;
    if !samples.is_finite() {
        return 0;
    }
    // `as` saturates negatives to zero and truncates toward zero
    (samples as usize).min(sample_rate as usize)
}

/// High-pass and low-pass corners for a given intensity
///
/// Higher intensity narrows the processed band toward the midrange.
pub fn band_cutoffs(intensity: f32) -> (f32, f32) {
    (
        HIGH_PASS_BASE_HZ + intensity * HIGH_PASS_SPAN_HZ,
        LOW_PASS_BASE_HZ - intensity * LOW_PASS_SPAN_HZ,
    )
}

// ============================================================================
// Stereo Enhancer
// ============================================================================

/// Per-instance DSP state: four filter stages and two delay lines
///
/// The left delay line is resized alongside the right one but never fed,
/// so the widening is one-sided: only the right channel is delayed.
#[derive(Debug, Clone, Default)]
pub struct StereoEnhancer {
    hp_left: OnePoleFilter,
    hp_right: OnePoleFilter,
    lp_left: OnePoleFilter,
    lp_right: OnePoleFilter,
    delay_left: DelayLine,
    delay_right: DelayLine,
}

impl StereoEnhancer {
    /// Fully initialised state: identity filters, empty delay lines
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one block of interleaved stereo audio in place
    ///
    /// `frames` holds `[L0, R0, L1, R1, ...]`; a trailing unpaired sample is
    /// left untouched. When `params.enabled` is false nothing is read or
    /// written, including internal state.
    pub fn process_block(&mut self, params: &EffectParams, frames: &mut [f32]) {
        if !params.enabled {
            return;
        }

        let intensity = params.intensity;
        let sample_rate = params.sample_rate as f32;

        let delay_len = haas_delay_samples(params.spatial_width, params.sample_rate);
        self.delay_left.resize_if_needed(delay_len);
        self.delay_right.resize_if_needed(delay_len);

        let (hp_cutoff, lp_cutoff) = band_cutoffs(intensity);
        self.hp_left.configure_high_pass(hp_cutoff, sample_rate);
        self.hp_right.configure_high_pass(hp_cutoff, sample_rate);
        self.lp_left.configure_low_pass(lp_cutoff, sample_rate);
        self.lp_right.configure_low_pass(lp_cutoff, sample_rate);

        let dry_gain = 1.0 - intensity;

        for frame in frames.chunks_exact_mut(2) {
            let in_l = frame[0];
            let in_r = frame[1];

            let eq_l = self.lp_left.process(self.hp_left.process(in_l));
            let eq_r = self.lp_right.process(self.hp_right.process(in_r));

            // Zero-length line hands eq_r straight back
            let widened_r = self.delay_right.read_then_write(eq_r);
            let widened_l = eq_l;

            frame[0] = in_l * dry_gain + widened_l * intensity;
            frame[1] = in_r * dry_gain + widened_r * intensity;
        }
    }

    /// Current Haas delay capacity in samples
    pub fn delay_samples(&self) -> usize {
        self.delay_right.capacity()
    }

    pub fn left_delay(&self) -> &DelayLine {
        &self.delay_left
    }

    pub fn right_delay(&self) -> &DelayLine {
        &self.delay_right
    }

    /// (high-pass, low-pass) stages of the left channel
    pub fn left_filters(&self) -> (&OnePoleFilter, &OnePoleFilter) {
        (&self.hp_left, &self.lp_left)
    }

    /// (high-pass, low-pass) stages of the right channel
    pub fn right_filters(&self) -> (&OnePoleFilter, &OnePoleFilter) {
        (&self.hp_right, &self.lp_right)
    }
}
