//! Single-pole IIR filter stage
//!
//! First-order high-pass and low-pass sections designed with the bilinear
//! transform. Both variants share the one-pole denominator and differ only in
//! their feedforward coefficients.

use std::f32::consts::PI;

/// Filter response selected by the last `configure_*` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    /// Identity coefficients, nothing configured yet
    #[default]
    Passthrough,
    HighPass,
    LowPass,
}

/// First-order filter coefficients: `y = b0*x + b1*x[n-1] + a1*y[n-1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePoleCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub a1: f32,
}

impl Default for OnePoleCoeffs {
    fn default() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            a1: 0.0,
        }
    }
}

/// Prewarped analog frequency for the bilinear transform
#[inline]
fn warped_frequency(cutoff_hz: f32, sample_rate_hz: f32) -> f32 {
    (PI * cutoff_hz / sample_rate_hz).tan()
}

/// Single-pole IIR stage with one sample of input and output memory
///
/// Memory cells persist across blocks and across reconfiguration; they are
/// only zero at construction.
#[derive(Debug, Clone, Default)]
pub struct OnePoleFilter {
    coeffs: OnePoleCoeffs,
    kind: FilterKind,
    /// x[n-1]
    x1: f32,
    /// y[n-1]
    y1: f32,
}

impl OnePoleFilter {
    /// Create a filter with identity coefficients and cleared memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute coefficients for a high-pass response
    ///
    /// # Arguments
    /// * `cutoff_hz` - Corner frequency, expected in (0, sample_rate / 2)
    /// * `sample_rate_hz` - Sample rate; a non-positive value leaves the
    ///   current coefficients untouched
    pub fn configure_high_pass(&mut self, cutoff_hz: f32, sample_rate_hz: f32) {
        if sample_rate_hz <= 0.0 {
            return;
        }
        let wc = warped_frequency(cutoff_hz, sample_rate_hz);
        let a0_inv = 1.0 / (1.0 + wc);
        self.coeffs = OnePoleCoeffs {
            b0: a0_inv,
            b1: -a0_inv,
            a1: (1.0 - wc) * a0_inv,
        };
        self.kind = FilterKind::HighPass;
    }

    /// Recompute coefficients for a low-pass response
    ///
    /// Same guard and prewarping as [`configure_high_pass`](Self::configure_high_pass).
    pub fn configure_low_pass(&mut self, cutoff_hz: f32, sample_rate_hz: f32) {
        if sample_rate_hz <= 0.0 {
            return;
        }
        let wc = warped_frequency(cutoff_hz, sample_rate_hz);
        let a0_inv = 1.0 / (1.0 + wc);
        self.coeffs = OnePoleCoeffs {
            b0: wc * a0_inv,
            b1: wc * a0_inv,
            a1: (1.0 - wc) * a0_inv,
        };
        self.kind = FilterKind::LowPass;
    }

    /// Filter one sample
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.a1 * self.y1;
        self.x1 = input;
        self.y1 = output;
        output
    }

    pub fn coefficients(&self) -> OnePoleCoeffs {
        self.coeffs
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE_RATE: f32 = 48000.0;

    fn peak_response(filter: &mut OnePoleFilter, freq: f32, num_samples: usize) -> f32 {
        (0..num_samples)
            .map(|n| {
                let x = (2.0 * PI * freq * n as f32 / SAMPLE_RATE).sin();
                filter.process(x).abs()
            })
            .fold(0.0_f32, f32::max)
    }

    #[test]
    fn test_new_filter_is_identity() {
        let mut filter = OnePoleFilter::new();
        assert_eq!(filter.kind(), FilterKind::Passthrough);
        for x in [0.25_f32, -1.0, 0.5, 0.0] {
            assert_eq!(filter.process(x), x);
        }
    }

    #[test]
    fn test_high_pass_coefficients() {
        let mut filter = OnePoleFilter::new();
        filter.configure_high_pass(1000.0, SAMPLE_RATE);

        let wc = (PI * 1000.0 / SAMPLE_RATE).tan();
        let c = filter.coefficients();
        assert_relative_eq!(c.b0, 1.0 / (1.0 + wc));
        assert_relative_eq!(c.b1, -c.b0);
        assert_relative_eq!(c.a1, (1.0 - wc) / (1.0 + wc));
        assert_eq!(filter.kind(), FilterKind::HighPass);
    }

    #[test]
    fn test_low_pass_shares_denominator() {
        let mut hp = OnePoleFilter::new();
        let mut lp = OnePoleFilter::new();
        hp.configure_high_pass(2500.0, SAMPLE_RATE);
        lp.configure_low_pass(2500.0, SAMPLE_RATE);

        assert_eq!(hp.coefficients().a1, lp.coefficients().a1);
        assert_eq!(lp.coefficients().b0, lp.coefficients().b1);
        assert_eq!(lp.kind(), FilterKind::LowPass);
    }

    #[test]
    fn test_non_positive_sample_rate_keeps_coefficients() {
        let mut filter = OnePoleFilter::new();
        filter.configure_low_pass(4000.0, SAMPLE_RATE);
        let before = filter.coefficients();

        filter.configure_high_pass(200.0, 0.0);
        filter.configure_low_pass(200.0, -44100.0);

        assert_eq!(filter.coefficients(), before);
        assert_eq!(filter.kind(), FilterKind::LowPass);
    }

    #[test]
    fn test_reconfigure_is_idempotent() {
        let mut filter = OnePoleFilter::new();
        filter.configure_high_pass(125.0, SAMPLE_RATE);
        filter.configure_low_pass(125.0, SAMPLE_RATE);
        let first_lp = filter.coefficients();

        for _ in 0..10 {
            filter.configure_high_pass(125.0, SAMPLE_RATE);
            filter.configure_low_pass(125.0, SAMPLE_RATE);
        }
        assert_eq!(filter.coefficients(), first_lp);

        filter.configure_high_pass(125.0, SAMPLE_RATE);
        let hp_a = filter.coefficients();
        filter.configure_high_pass(125.0, SAMPLE_RATE);
        assert_eq!(filter.coefficients(), hp_a);
    }

    #[test]
    fn test_stability_with_unit_sine() {
        // Cutoffs spread across (0, nyquist), probed at low, mid and high input frequencies
        let cutoffs = [1.0_f32, 20.0, 200.0, 1000.0, 8000.0, 16000.0, 23000.0];
        let probes = [50.0_f32, 1000.0, 12000.0, 23900.0];

        for &cutoff in &cutoffs {
            for &freq in &probes {
                let mut hp = OnePoleFilter::new();
                hp.configure_high_pass(cutoff, SAMPLE_RATE);
                let peak = peak_response(&mut hp, freq, 10_000);
                assert!(peak.is_finite() && peak < 2.0, "HP {cutoff} Hz @ {freq} Hz peaked at {peak}");

                let mut lp = OnePoleFilter::new();
                lp.configure_low_pass(cutoff, SAMPLE_RATE);
                let peak = peak_response(&mut lp, freq, 10_000);
                assert!(peak.is_finite() && peak < 2.0, "LP {cutoff} Hz @ {freq} Hz peaked at {peak}");
            }
        }
    }

    #[test]
    fn test_high_pass_blocks_dc() {
        let mut filter = OnePoleFilter::new();
        filter.configure_high_pass(100.0, SAMPLE_RATE);

        let mut last = 1.0;
        for _ in 0..20_000 {
            last = filter.process(1.0);
        }
        assert!(last.abs() < 1e-3);
    }

    #[test]
    fn test_low_pass_passes_dc() {
        let mut filter = OnePoleFilter::new();
        filter.configure_low_pass(1000.0, SAMPLE_RATE);

        let mut last = 0.0;
        for _ in 0..20_000 {
            last = filter.process(1.0);
        }
        assert_relative_eq!(last, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_memory_survives_reconfigure() {
        let mut a = OnePoleFilter::new();
        let mut b = OnePoleFilter::new();
        a.configure_low_pass(500.0, SAMPLE_RATE);
        b.configure_low_pass(500.0, SAMPLE_RATE);

        for x in [1.0_f32, 0.5, -0.25] {
            a.process(x);
            b.process(x);
        }
        // Reconfiguring with the same settings must not clear history
        a.configure_low_pass(500.0, SAMPLE_RATE);
        assert_eq!(a.process(0.75), b.process(0.75));
    }
}
