//! WAV file I/O for offline rendering
//!
//! Reads mono or stereo WAV files (integer or float) into an interleaved
//! stereo [`AudioBuffer`]; writes 32-bit float stereo WAV. No resampling:
//! the file's own rate becomes the effect's sample rate.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use crate::engine::buffer::{AudioBuffer, STEREO_CHANNELS};
use crate::error::{CafeModeError, Result};

/// Read a WAV file into an interleaved stereo buffer
///
/// # Errors
/// * `AudioReadError` - If the file cannot be opened or decoded
/// * `UnsupportedFormat` - If the file has more than two channels
pub fn read_wav(path: &Path) -> Result<AudioBuffer> {
    let read_err = |source| CafeModeError::AudioReadError {
        path: path.display().to_string(),
        source,
    };

    let reader = WavReader::open(path).map_err(read_err)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    if channels == 0 || channels > STEREO_CHANNELS {
        return Err(CafeModeError::UnsupportedFormat {
            details: format!("{}-channel audio (only mono/stereo supported)", channels),
        });
    }

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(read_err)?,
        SampleFormat::Int => {
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(read_err)?
        }
    };

    debug!(
        "Read {} ({} ch, {} Hz, {} samples)",
        path.display(),
        channels,
        spec.sample_rate,
        samples.len()
    );

    if channels == 1 {
        Ok(AudioBuffer::from_mono(&samples, spec.sample_rate))
    } else {
        AudioBuffer::from_interleaved(samples, spec.sample_rate)
    }
}

/// Write an interleaved stereo buffer as a 32-bit float WAV file
pub fn write_wav(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let write_err = |source| CafeModeError::AudioWriteError {
        path: path.display().to_string(),
        source,
    };

    let spec = WavSpec {
        channels: STEREO_CHANNELS as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec).map_err(write_err)?;
    for &sample in buffer.samples() {
        writer.write_sample(sample).map_err(write_err)?;
    }
    writer.finalize().map_err(write_err)?;

    debug!("Wrote {} ({} frames)", path.display(), buffer.num_frames());
    Ok(())
}
