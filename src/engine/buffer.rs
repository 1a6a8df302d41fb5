//! Interleaved stereo audio buffer

use crate::error::{CafeModeError, Result};

/// Channels per frame; the enhancer is strictly two-channel
pub const STEREO_CHANNELS: usize = 2;

/// Interleaved stereo buffer for offline processing
///
/// Samples are stored as `[L0, R0, L1, R1, ...]`, the layout the block
/// processor works on in place.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    /// Interleaved sample data
    samples: Vec<f32>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a silent buffer of `num_frames` stereo frames
    pub fn new(num_frames: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; num_frames * STEREO_CHANNELS],
            sample_rate,
        }
    }

    /// Create a buffer from existing interleaved stereo samples
    pub fn from_interleaved(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if samples.len() % STEREO_CHANNELS != 0 {
            return Err(CafeModeError::UnsupportedFormat {
                details: format!(
                    "Sample count {} is not a whole number of stereo frames",
                    samples.len()
                ),
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Duplicate a mono signal onto both channels
    pub fn from_mono(mono: &[f32], sample_rate: u32) -> Self {
        Self {
            samples: mono.iter().flat_map(|&s| [s, s]).collect(),
            sample_rate,
        }
    }

    /// Stereo sine test tone at `amplitude` on both channels
    pub fn sine_wave(frequency: f32, amplitude: f32, duration_secs: f32, sample_rate: u32) -> Self {
        let num_frames = (duration_secs * sample_rate as f32) as usize;
        let mono: Vec<f32> = (0..num_frames)
            .map(|n| {
                let t = n as f64 / sample_rate as f64;
                amplitude * (2.0 * std::f64::consts::PI * frequency as f64 * t).sin() as f32
            })
            .collect();
        Self::from_mono(&mono, sample_rate)
    }

    /// Number of stereo frames
    pub fn num_frames(&self) -> usize {
        self.samples.len() / STEREO_CHANNELS
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get a reference to all interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get a mutable reference to all interleaved samples
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Copy of one channel (0 = left, 1 = right)
    pub fn channel(&self, channel: usize) -> Vec<f32> {
        if channel >= STEREO_CHANNELS {
            return Vec::new();
        }
        self.samples
            .iter()
            .skip(channel)
            .step_by(STEREO_CHANNELS)
            .copied()
            .collect()
    }

    /// RMS level (linear) of one channel
    pub fn rms(&self, channel: usize) -> f64 {
        if channel >= STEREO_CHANNELS || self.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self
            .samples
            .iter()
            .skip(channel)
            .step_by(STEREO_CHANNELS)
            .map(|&s| (s as f64).powi(2))
            .sum();
        (sum_sq / self.num_frames() as f64).sqrt()
    }

    /// RMS level in dB for a channel
    pub fn rms_db(&self, channel: usize) -> f64 {
        let rms = self.rms(channel);
        if rms > 0.0 {
            20.0 * rms.log10()
        } else {
            f64::NEG_INFINITY
        }
    }

    /// RMS over both channels together
    pub fn stereo_rms(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.samples.iter().map(|&s| (s as f64).powi(2)).sum();
        (sum_sq / self.samples.len() as f64).sqrt()
    }

    /// Check buffer contains valid audio (no NaN/Inf)
    pub fn is_valid(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_new_buffer() {
        let buf = AudioBuffer::new(1000, 44100);
        assert_eq!(buf.num_frames(), 1000);
        assert_eq!(buf.samples().len(), 2000);
        assert_eq!(buf.sample_rate(), 44100);
    }

    #[test]
    fn test_from_interleaved_rejects_odd_length() {
        assert!(AudioBuffer::from_interleaved(vec![0.0; 3], 48000).is_err());
        assert!(AudioBuffer::from_interleaved(vec![0.0; 4], 48000).is_ok());
    }

    #[test]
    fn test_from_mono_duplicates() {
        let buf = AudioBuffer::from_mono(&[0.1, 0.2], 48000);
        assert_eq!(buf.samples(), &[0.1, 0.1, 0.2, 0.2]);
        assert_eq!(buf.channel(0), buf.channel(1));
        assert!(buf.channel(2).is_empty());
    }

    #[test]
    fn test_sine_rms() {
        let buf = AudioBuffer::sine_wave(440.0, 1.0, 1.0, 48000);
        assert_eq!(buf.num_frames(), 48000);
        // RMS of sine wave is 1/sqrt(2) = -3.01 dB
        assert_abs_diff_eq!(buf.rms_db(0), -3.01, epsilon = 0.05);
        assert_abs_diff_eq!(buf.stereo_rms(), buf.rms(1), epsilon = 1e-9);
    }

    #[test]
    fn test_is_valid() {
        let mut buf = AudioBuffer::new(10, 48000);
        assert!(buf.is_valid());
        buf.samples_mut()[3] = f32::NAN;
        assert!(!buf.is_valid());
    }
}
