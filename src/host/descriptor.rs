//! Static effect metadata advertised to the host

use serde::Serialize;
use uuid::Uuid;

/// Capability flags reported in the descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EffectFlags(u32);

impl EffectFlags {
    /// Inserted directly in the signal path
    pub const TYPE_INSERT: Self = Self(1 << 0);
    /// Requests the first position in an insert chain
    pub const INSERT_FIRST: Self = Self(1 << 1);
    /// Input and output may be the same buffer
    pub const PROCESS_IN_PLACE: Self = Self(1 << 2);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Control API version 2.0, packed as major << 16 | minor
pub const EFFECT_API_VERSION: u32 = 0x0002_0000;

/// Fixed metadata for one effect implementation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectDescriptor {
    /// Effect family identifier
    pub type_uuid: Uuid,
    /// Identifier of this implementation
    pub uuid: Uuid,
    pub api_version: u32,
    pub flags: EffectFlags,
    pub cpu_load: u16,
    pub memory_usage: u16,
    pub name: &'static str,
    pub implementor: &'static str,
}

impl EffectDescriptor {
    /// True when `uuid` names this implementation
    pub fn matches(&self, uuid: &Uuid) -> bool {
        self.uuid == *uuid
    }
}

/// Descriptor of the CafeMode stereo enhancer
pub const CAFEMODE_DESCRIPTOR: EffectDescriptor = EffectDescriptor {
    type_uuid: Uuid::from_bytes([
        0xf2, 0x73, 0x17, 0xf4, 0xc9, 0x84, 0x4d, 0xe6, 0x9a, 0x90, 0x54, 0x57, 0x59, 0x49, 0x5b,
        0xf2,
    ]),
    uuid: Uuid::from_bytes([
        0xf2, 0x59, 0x49, 0x54, 0xa4, 0x93, 0x47, 0x94, 0x82, 0xd6, 0x4a, 0x52, 0x76, 0x8b, 0x8a,
        0xaf,
    ]),
    api_version: EFFECT_API_VERSION,
    flags: EffectFlags::TYPE_INSERT
        .union(EffectFlags::INSERT_FIRST)
        .union(EffectFlags::PROCESS_IN_PLACE),
    cpu_load: 0,
    memory_usage: 0,
    name: "CafeMode",
    implementor: "Judini",
};
