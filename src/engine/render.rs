//! Offline rendering through the host interface
//!
//! Drives a fresh effect instance exactly like a host would: create, send the
//! stream configuration and control settings as commands, then process the
//! buffer block by block.

use std::path::Path;

use log::info;

use crate::config::{RenderConfig, Settings};
use crate::engine::buffer::{AudioBuffer, STEREO_CHANNELS};
use crate::engine::io::{read_wav, write_wav};
use crate::error::Result;
use crate::host::{
    encode_bool, encode_config, encode_f32, BlockIo, CafeModeLibrary, EffectLibrary,
    CAFEMODE_DESCRIPTOR, CMD_SET_CONFIG, CMD_SET_ENABLED, CMD_SET_INTENSITY, CMD_SET_SPATIAL_WIDTH,
};

/// Render `input` through a new effect instance configured with `settings`
///
/// Unlike the session manager, intensity and width are always sent so a
/// bypassed render still records the requested knob positions.
pub fn render_buffer(input: &AudioBuffer, settings: &Settings, config: &RenderConfig) -> Result<AudioBuffer> {
    let mut library = CafeModeLibrary::new();
    let handle = library.create(&CAFEMODE_DESCRIPTOR.uuid)?;

    let commands: [(u32, &[u8]); 4] = [
        (CMD_SET_CONFIG, &encode_config(input.sample_rate())),
        (CMD_SET_ENABLED, &encode_bool(settings.enabled)),
        (CMD_SET_INTENSITY, &encode_f32(settings.intensity)),
        (CMD_SET_SPATIAL_WIDTH, &encode_f32(settings.spatial_width)),
    ];
    for (code, payload) in commands {
        library.command(handle, code, Some(payload))?;
    }

    let block_len = config.block_frames.max(1) * STEREO_CHANNELS;
    let mut output = AudioBuffer::new(input.num_frames(), input.sample_rate());

    for (src, dst) in input
        .samples()
        .chunks(block_len)
        .zip(output.samples_mut().chunks_mut(block_len))
    {
        let frames = src.len() / STEREO_CHANNELS;
        let io = BlockIo::Separate {
            input: src,
            output: dst,
        };
        library.process(handle, io, frames)?;
    }

    library.release(handle)?;
    Ok(output)
}

/// Render a WAV file to a 32-bit float stereo WAV file
pub fn render_file(input: &Path, output: &Path, settings: &Settings, config: &RenderConfig) -> Result<()> {
    let buffer = read_wav(input)?;
    info!(
        "Rendering {} ({:.2}s @ {} Hz, enabled={}, intensity={:.2}, width={:.2})",
        input.display(),
        buffer.duration(),
        buffer.sample_rate(),
        settings.enabled,
        settings.intensity,
        settings.spatial_width
    );

    let rendered = render_buffer(&buffer, settings, config)?;
    write_wav(&rendered, output)?;

    info!("Wrote {}", output.display());
    Ok(())
}
