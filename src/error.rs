//! Error handling for CafeMode
//!
//! Errors never abort. Host-facing calls return [`Result`]; the host boundary
//! turns them into status codes via [`CafeModeError::status_code`].

use thiserror::Error;

/// Result type alias for CafeMode operations
pub type Result<T> = std::result::Result<T, CafeModeError>;

/// Host status: success
pub const STATUS_OK: i32 = 0;

/// Host status: unknown effect (`-ENOENT`)
pub const STATUS_NO_ENTRY: i32 = -2;

/// Host status: I/O failure (`-EIO`)
pub const STATUS_IO: i32 = -5;

/// Host status: invalid handle or argument (`-EINVAL`)
pub const STATUS_INVALID: i32 = -22;

/// Main error type for CafeMode operations
#[derive(Error, Debug)]
pub enum CafeModeError {
    // Host boundary errors
    #[error("Invalid effect handle: {handle}")]
    InvalidHandle { handle: u32 },

    #[error("No effect registered for uuid {uuid}")]
    UnknownEffect { uuid: uuid::Uuid },

    #[error("Buffer too short: expected {expected} samples, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Frame count {frame_count} exceeds the addressable buffer size")]
    FrameCountOverflow { frame_count: usize },

    #[error("No effect attached to audio session {session}")]
    UnknownSession { session: i32 },

    // Audio file errors
    #[error("Failed to read audio file: {path}")]
    AudioReadError {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to write audio file: {path}")]
    AudioWriteError {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    // Settings errors
    #[error("Settings error: {details}")]
    SettingsError { details: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CafeModeError {
    /// Map this error onto the host's negative status convention
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InvalidHandle { .. }
            | Self::BufferTooShort { .. }
            | Self::FrameCountOverflow { .. }
            | Self::UnknownSession { .. } => STATUS_INVALID,
            Self::UnknownEffect { .. } => STATUS_NO_ENTRY,
            _ => STATUS_IO,
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidHandle { .. } => "INVALID_HANDLE",
            Self::UnknownEffect { .. } => "UNKNOWN_EFFECT",
            Self::BufferTooShort { .. } => "BUFFER_TOO_SHORT",
            Self::FrameCountOverflow { .. } => "FRAME_COUNT_OVERFLOW",
            Self::UnknownSession { .. } => "UNKNOWN_SESSION",
            Self::AudioReadError { .. } => "AUDIO_READ_ERROR",
            Self::AudioWriteError { .. } => "AUDIO_WRITE_ERROR",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::SettingsError { .. } => "SETTINGS_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidHandle { .. } => "Create the effect before processing or sending commands",
            Self::UnknownEffect { .. } => "Use the CafeMode effect uuid from `describe`",
            Self::BufferTooShort { .. } => "Pass two interleaved samples per frame",
            Self::FrameCountOverflow { .. } => "Pass the frame count of the buffer actually supplied",
            Self::UnknownSession { .. } => "Open the session before configuring or processing it",
            Self::AudioReadError { .. } => "Check that the file exists and is a valid WAV file",
            Self::UnsupportedFormat { .. } => "Convert to a mono or stereo WAV file",
            Self::SettingsError { .. } => "Regenerate the settings file with `init-settings`",
            _ => "Check the error details and try again",
        }
    }
}
