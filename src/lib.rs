//! CafeMode - real-time stereo enhancement engine
//!
//! Reshapes the spectrum of a two-channel signal with a one-pole band-pass
//! cascade and widens the stereo image by delaying the right channel a few
//! milliseconds (the Haas effect), blended with the dry signal by intensity.
//!
//! # Architecture
//!
//! - [`dsp`]: filter stages, delay lines and the per-block stereo enhancer
//! - [`params`]: lock-free parameter snapshots between control and audio threads
//! - [`effect`]: one effect instance (controller + block processor)
//! - [`host`]: capability interface a host pipeline drives the effect through
//! - [`session`]: one instance per audio session, settings broadcast
//! - [`engine`]: offline buffers, WAV I/O and block-wise rendering

pub mod cli;
pub mod config;
pub mod dsp;
pub mod effect;
pub mod engine;
pub mod error;
pub mod host;
pub mod params;
pub mod session;

pub use config::{RenderConfig, Settings};
pub use effect::{BlockProcessor, EffectInstance};
pub use error::{CafeModeError, Result};
pub use params::EffectParams;
