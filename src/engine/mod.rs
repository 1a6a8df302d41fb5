//! Offline audio engine
//!
//! Stereo buffer management, WAV file I/O and block-wise rendering through
//! the effect host.

pub mod buffer;
pub mod io;
pub mod render;

pub use buffer::{AudioBuffer, STEREO_CHANNELS};
pub use io::{read_wav, write_wav};
pub use render::{render_buffer, render_file};
