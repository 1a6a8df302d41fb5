//! Command codes and payload decoding
//!
//! Control surfaces deliver parameter changes as a 32-bit code plus an
//! optional byte payload. Values are 4-byte native-endian words.

/// Enable flag: 4-byte i32, nonzero = enabled
pub const CMD_SET_ENABLED: u32 = 0;

/// Intensity: 4-byte f32
pub const CMD_SET_INTENSITY: u32 = 1;

/// Spatial width: 4-byte f32
pub const CMD_SET_SPATIAL_WIDTH: u32 = 2;

/// Host configuration record; the sample rate is its second word
pub const CMD_SET_CONFIG: u32 = 0x100;

/// Byte offset of the sample-rate word inside a configuration record
const CONFIG_SAMPLE_RATE_OFFSET: usize = 4;

/// A decoded control command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetConfig { sample_rate: u32 },
    SetEnabled(bool),
    SetIntensity(f32),
    SetSpatialWidth(f32),
    /// Recognised code whose payload was absent or too short
    MissingPayload(u32),
    /// Unrecognised code, accepted as a no-op
    Unknown(u32),
}

fn read_word(payload: Option<&[u8]>, offset: usize) -> Option<[u8; 4]> {
    payload?.get(offset..offset + 4)?.try_into().ok()
}

impl Command {
    /// Decode a raw command. Never fails: bad input maps to a no-op variant.
    pub fn decode(code: u32, payload: Option<&[u8]>) -> Self {
        let word = match code {
            CMD_SET_CONFIG => read_word(payload, CONFIG_SAMPLE_RATE_OFFSET),
            CMD_SET_ENABLED | CMD_SET_INTENSITY | CMD_SET_SPATIAL_WIDTH => read_word(payload, 0),
            other => return Command::Unknown(other),
        };
        let Some(word) = word else {
            return Command::MissingPayload(code);
        };

        match code {
            CMD_SET_CONFIG => Command::SetConfig {
                sample_rate: u32::from_ne_bytes(word),
            },
            CMD_SET_ENABLED => Command::SetEnabled(i32::from_ne_bytes(word) != 0),
            CMD_SET_INTENSITY => Command::SetIntensity(f32::from_ne_bytes(word)),
            _ => Command::SetSpatialWidth(f32::from_ne_bytes(word)),
        }
    }
}

/// Encode a boolean as a 4-byte i32 payload
pub fn encode_bool(value: bool) -> [u8; 4] {
    i32::from(value).to_ne_bytes()
}

pub fn encode_f32(value: f32) -> [u8; 4] {
    value.to_ne_bytes()
}

/// Build a configuration record carrying `sample_rate`
///
/// The first word is reserved for host use and written as zero.
pub fn encode_config(sample_rate: u32) -> [u8; 8] {
    let mut record = [0u8; 8];
    record[CONFIG_SAMPLE_RATE_OFFSET..].copy_from_slice(&sample_rate.to_ne_bytes());
    record
}
