//! CafeMode effect library: instance registry behind the host interface

use std::collections::HashMap;

use log::{debug, info, warn};
use uuid::Uuid;

use super::command::Command;
use super::descriptor::{EffectDescriptor, CAFEMODE_DESCRIPTOR};
use super::{BlockIo, EffectHandle, EffectLibrary};
use crate::effect::EffectInstance;
use crate::engine::STEREO_CHANNELS;
use crate::error::{CafeModeError, Result};
use crate::params::EffectParams;

/// Library exposing the CafeMode effect to a host
///
/// Owns every live instance; handles are never reused within one library.
#[derive(Debug)]
pub struct CafeModeLibrary {
    descriptor: &'static EffectDescriptor,
    instances: HashMap<EffectHandle, EffectInstance>,
    next_handle: u32,
}

impl CafeModeLibrary {
    pub fn new() -> Self {
        Self {
            descriptor: &CAFEMODE_DESCRIPTOR,
            instances: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Number of live instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instance(&self, handle: EffectHandle) -> Option<&EffectInstance> {
        self.instances.get(&handle)
    }

    /// Published parameters of a live instance
    pub fn params(&self, handle: EffectHandle) -> Option<EffectParams> {
        self.instances.get(&handle).map(EffectInstance::params)
    }

    /// Apply a decoded command to an instance
    pub fn apply(&mut self, handle: EffectHandle, command: Command) -> Result<()> {
        let instance = self
            .instances
            .get_mut(&handle)
            .ok_or(CafeModeError::InvalidHandle { handle: handle.raw() })?;
        let controller = instance.controller();

        match command {
            Command::SetConfig { sample_rate } => controller.set_sample_rate(sample_rate),
            Command::SetEnabled(enabled) => controller.set_enabled(enabled),
            Command::SetIntensity(intensity) => controller.set_intensity(intensity),
            Command::SetSpatialWidth(width) => controller.set_spatial_width(width),
            Command::MissingPayload(code) => {
                warn!("Command {} on {} ignored: payload absent or short", code, handle);
            }
            Command::Unknown(code) => {
                debug!("Unknown command {} on {} accepted as no-op", code, handle);
            }
        }
        Ok(())
    }
}

fn check_len(actual: usize, expected: usize) -> Result<()> {
    if actual < expected {
        return Err(CafeModeError::BufferTooShort { expected, actual });
    }
    Ok(())
}

impl Default for CafeModeLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectLibrary for CafeModeLibrary {
    fn describe(&self, uuid: &Uuid) -> Result<&EffectDescriptor> {
        if self.descriptor.matches(uuid) {
            Ok(self.descriptor)
        } else {
            Err(CafeModeError::UnknownEffect { uuid: *uuid })
        }
    }

    fn create(&mut self, uuid: &Uuid) -> Result<EffectHandle> {
        self.describe(uuid)?;

        let handle = EffectHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        self.instances.insert(handle, EffectInstance::default());

        info!("Created {} instance {}", self.descriptor.name, handle);
        Ok(handle)
    }

    fn release(&mut self, handle: EffectHandle) -> Result<()> {
        self.instances
            .remove(&handle)
            .ok_or(CafeModeError::InvalidHandle { handle: handle.raw() })?;
        info!("Released instance {}", handle);
        Ok(())
    }

    fn process(&mut self, handle: EffectHandle, io: BlockIo<'_>, frame_count: usize) -> Result<()> {
        let instance = self
            .instances
            .get_mut(&handle)
            .ok_or(CafeModeError::InvalidHandle { handle: handle.raw() })?;
        let required = frame_count
            .checked_mul(STEREO_CHANNELS)
            .ok_or(CafeModeError::FrameCountOverflow { frame_count })?;

        let frames = match io {
            BlockIo::InPlace(buffer) => {
                check_len(buffer.len(), required)?;
                &mut buffer[..required]
            }
            BlockIo::Separate { input, output } => {
                check_len(input.len(), required)?;
                check_len(output.len(), required)?;
                output[..required].copy_from_slice(&input[..required]);
                &mut output[..required]
            }
        };

        instance.processor().process(frames);
        Ok(())
    }

    fn command(&mut self, handle: EffectHandle, code: u32, payload: Option<&[u8]>) -> Result<()> {
        let command = Command::decode(code, payload);
        debug!("Command {:?} for {}", command, handle);
        self.apply(handle, command)
    }
}
