//! DSP building blocks
//!
//! Filter stages and delay lines, plus the stereo enhancer that drives them
//! once per audio block.

mod delay_line;
mod enhancer;
mod filter;

pub use delay_line::DelayLine;
pub use enhancer::{
    band_cutoffs, haas_delay_samples, StereoEnhancer, HIGH_PASS_BASE_HZ, HIGH_PASS_SPAN_HZ,
    LOW_PASS_BASE_HZ, LOW_PASS_SPAN_HZ, MAX_HAAS_SECONDS,
};
pub use filter::{FilterKind, OnePoleCoeffs, OnePoleFilter};
