//! Effect parameters and the control/audio thread handoff
//!
//! The control side publishes complete [`EffectParams`] snapshots through a
//! triple buffer; the audio side reads exactly one snapshot per block. A block
//! therefore never mixes an old spatial width with a new intensity, and neither
//! side ever waits on the other.

use std::fmt;

use serde::{Deserialize, Serialize};
use triple_buffer::{Input, Output, TripleBuffer};

/// Default host sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Snapshot of every runtime-adjustable parameter
///
/// Intensity and spatial width are nominally in `[0, 1]` but are stored as
/// given; callers clamp if they want sane behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectParams {
    pub enabled: bool,
    /// Dry/wet mix and filter bandwidth driver
    pub intensity: f32,
    /// Haas delay length driver
    pub spatial_width: f32,
    pub sample_rate: u32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.5,
            spatial_width: 0.5,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Create a connected controller/reader pair seeded with `initial`
pub fn parameter_channel(initial: EffectParams) -> (ParameterController, ParameterReader) {
    let (input, output) = TripleBuffer::new(&initial).split();
    (
        ParameterController {
            input,
            current: initial,
        },
        ParameterReader { output },
    )
}

/// Producer half: the single writer of parameter snapshots
///
/// Not `Clone`; there is exactly one controller per effect instance. Each
/// setter rewrites its local copy and publishes the whole snapshot.
pub struct ParameterController {
    input: Input<EffectParams>,
    current: EffectParams,
}

impl fmt::Debug for ParameterController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterController")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl ParameterController {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.current.enabled = enabled;
        self.publish();
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.current.intensity = intensity;
        self.publish();
    }

    pub fn set_spatial_width(&mut self, spatial_width: f32) {
        self.current.spatial_width = spatial_width;
        self.publish();
    }

    /// Takes effect when the next block derives its coefficients
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.current.sample_rate = sample_rate;
        self.publish();
    }

    /// Replace every field at once
    pub fn set_all(&mut self, params: EffectParams) {
        self.current = params;
        self.publish();
    }

    /// Last snapshot published by this controller
    pub fn current(&self) -> EffectParams {
        self.current
    }

    fn publish(&mut self) {
        self.input.write(self.current);
    }
}

/// Consumer half, owned by the block processor
///
/// Not `Clone`; reading swaps buffer indices with a single atomic exchange
/// and never waits for the controller.
pub struct ParameterReader {
    output: Output<EffectParams>,
}

impl fmt::Debug for ParameterReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterReader").finish_non_exhaustive()
    }
}

impl ParameterReader {
    /// Latest published snapshot, or the previous one if nothing new arrived
    #[inline]
    pub fn snapshot(&mut self) -> EffectParams {
        *self.output.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_default_params() {
        let params = EffectParams::default();
        assert!(!params.enabled);
        assert_eq!(params.intensity, 0.5);
        assert_eq!(params.spatial_width, 0.5);
        assert_eq!(params.sample_rate, 48000);
    }

    #[test]
    fn test_setters_publish_immediately() {
        let (mut controller, mut reader) = parameter_channel(EffectParams::default());

        controller.set_enabled(true);
        controller.set_intensity(0.8);
        controller.set_spatial_width(0.1);
        controller.set_sample_rate(44100);

        let snapshot = reader.snapshot();
        assert!(snapshot.enabled);
        assert_eq!(snapshot.intensity, 0.8);
        assert_eq!(snapshot.spatial_width, 0.1);
        assert_eq!(snapshot.sample_rate, 44100);
        assert_eq!(snapshot, controller.current());
    }

    #[test]
    fn test_out_of_range_values_are_stored_verbatim() {
        let (mut controller, mut reader) = parameter_channel(EffectParams::default());
        controller.set_intensity(1.7);
        controller.set_spatial_width(-0.3);

        assert_eq!(reader.snapshot().intensity, 1.7);
        assert_eq!(reader.snapshot().spatial_width, -0.3);
    }

    #[test]
    fn test_snapshots_are_never_torn() {
        // The writer only ever publishes pairs where width == intensity
        let (mut controller, mut reader) = parameter_channel(EffectParams {
            enabled: true,
            intensity: 0.0,
            spatial_width: 0.0,
            sample_rate: 48000,
        });

        let writer = thread::spawn(move || {
            for i in 0..20_000u32 {
                let v = (i % 100) as f32 / 100.0;
                controller.set_all(EffectParams {
                    enabled: true,
                    intensity: v,
                    spatial_width: v,
                    sample_rate: 48000 + i % 100,
                });
            }
        });

        for _ in 0..20_000 {
            let s = reader.snapshot();
            assert_eq!(s.intensity, s.spatial_width);
            assert_eq!(s.sample_rate - 48000, (s.intensity * 100.0).round() as u32);
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_snapshot_never_waits_for_controller() {
        let (mut controller, mut reader) = parameter_channel(EffectParams::default());
        let (published_tx, published_rx) = mpsc::channel();
        let (resume_tx, resume_rx) = mpsc::channel::<()>();

        // Controller stays alive but idle on another thread while the reader runs
        let writer = thread::spawn(move || {
            controller.set_intensity(0.9);
            published_tx.send(()).unwrap();
            resume_rx.recv().unwrap();
            controller.set_intensity(0.1);
        });

        published_rx.recv().unwrap();
        for _ in 0..10_000 {
            assert_eq!(reader.snapshot().intensity, 0.9);
        }

        resume_tx.send(()).unwrap();
        writer.join().unwrap();
        assert_eq!(reader.snapshot().intensity, 0.1);
    }

    #[test]
    fn test_snapshot_survives_dropped_controller() {
        let (mut controller, mut reader) = parameter_channel(EffectParams::default());
        controller.set_enabled(true);
        drop(controller);

        assert!(reader.snapshot().enabled);
        assert!(reader.snapshot().enabled);
    }
}
