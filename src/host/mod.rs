//! Host boundary
//!
//! The capability interface a host pipeline drives the effect through:
//! describe, create, release, process and command. Every operation returns
//! [`Result`]; [`to_status`] is the single place those results become host
//! status codes (0 = success, negative = failure). Byte layouts of command
//! payloads stay in [`command`].

pub mod command;
pub mod descriptor;
mod library;

use std::fmt;

use uuid::Uuid;

use crate::error::{Result, STATUS_OK};

pub use command::{
    encode_bool, encode_config, encode_f32, Command, CMD_SET_CONFIG, CMD_SET_ENABLED,
    CMD_SET_INTENSITY, CMD_SET_SPATIAL_WIDTH,
};
pub use descriptor::{EffectDescriptor, EffectFlags, CAFEMODE_DESCRIPTOR, EFFECT_API_VERSION};
pub use library::CafeModeLibrary;

/// Opaque identifier of a live effect instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(u32);

impl EffectHandle {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EffectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Buffers handed to a process call, two interleaved samples per frame
#[derive(Debug)]
pub enum BlockIo<'a> {
    /// Input and output are the same buffer
    InPlace(&'a mut [f32]),
    /// Distinct buffers; input is copied to output before processing
    Separate {
        input: &'a [f32],
        output: &'a mut [f32],
    },
}

/// Capability interface of an effect library
pub trait EffectLibrary {
    /// Static metadata for the effect identified by `uuid`
    fn describe(&self, uuid: &Uuid) -> Result<&EffectDescriptor>;

    /// Instantiate the effect identified by `uuid`
    fn create(&mut self, uuid: &Uuid) -> Result<EffectHandle>;

    /// Free an instance and everything it owns
    fn release(&mut self, handle: EffectHandle) -> Result<()>;

    /// Render `frame_count` stereo frames
    fn process(&mut self, handle: EffectHandle, io: BlockIo<'_>, frame_count: usize) -> Result<()>;

    /// Dispatch a control command; unknown codes succeed as no-ops
    fn command(&mut self, handle: EffectHandle, code: u32, payload: Option<&[u8]>) -> Result<()>;
}

/// Host status code for the outcome of an [`EffectLibrary`] call
pub fn to_status(result: Result<()>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => e.status_code(),
    }
}
