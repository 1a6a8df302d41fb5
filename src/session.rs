//! Per-session effect management
//!
//! Attaches one effect instance to every open audio session and broadcasts
//! control-surface settings to all of them through the host command path.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::config::Settings;
use crate::error::{CafeModeError, Result};
use crate::host::{
    encode_bool, encode_config, encode_f32, BlockIo, CafeModeLibrary, EffectHandle, EffectLibrary,
    CAFEMODE_DESCRIPTOR, CMD_SET_CONFIG, CMD_SET_ENABLED, CMD_SET_INTENSITY, CMD_SET_SPATIAL_WIDTH,
};

/// Audio session identifier; 0 is the global output mix and never attached
pub type SessionId = i32;

/// Tracks effect instances per audio session
#[derive(Debug)]
pub struct SessionManager<L: EffectLibrary = CafeModeLibrary> {
    library: L,
    sessions: BTreeMap<SessionId, EffectHandle>,
    settings: Settings,
}

impl SessionManager<CafeModeLibrary> {
    pub fn new() -> Self {
        Self::with_library(CafeModeLibrary::new())
    }
}

impl Default for SessionManager<CafeModeLibrary> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: EffectLibrary> SessionManager<L> {
    pub fn with_library(library: L) -> Self {
        Self {
            library,
            sessions: BTreeMap::new(),
            settings: Settings::default(),
        }
    }

    /// Attach an effect to `session`
    ///
    /// Session 0 and sessions already open are ignored. Returns whether a new
    /// instance was created.
    pub fn open_session(&mut self, session: SessionId) -> Result<bool> {
        if session == 0 || self.sessions.contains_key(&session) {
            return Ok(false);
        }

        let handle = self.library.create(&CAFEMODE_DESCRIPTOR.uuid)?;
        self.sessions.insert(session, handle);
        info!("New audio session {} -> {}", session, handle);

        let settings = self.settings;
        self.push_settings(handle, &settings);
        Ok(true)
    }

    /// Release the effect attached to `session`, if any
    pub fn close_session(&mut self, session: SessionId) -> bool {
        match self.sessions.remove(&session) {
            Some(handle) => {
                match self.library.release(handle) {
                    Ok(()) => info!("Closed audio session {}", session),
                    Err(e) => warn!(
                        "Closed audio session {} but release of {} failed: {}",
                        session, handle, e
                    ),
                }
                true
            }
            None => false,
        }
    }

    /// Broadcast settings to every open session
    ///
    /// The enable flag always goes out; intensity and width are only sent
    /// while enabled, so a disabled effect keeps its last knob positions.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        let handles: Vec<EffectHandle> = self.sessions.values().copied().collect();
        for handle in handles {
            self.push_settings(handle, &settings);
        }
    }

    /// Forward the host's stream configuration to one session
    pub fn configure_session(&mut self, session: SessionId, sample_rate: u32) -> Result<()> {
        let handle = self.attached(session)?;
        self.library.command(handle, CMD_SET_CONFIG, Some(&encode_config(sample_rate)))
    }

    /// Process one block for `session`
    pub fn process(&mut self, session: SessionId, io: BlockIo<'_>, frame_count: usize) -> Result<()> {
        let handle = self.attached(session)?;
        self.library.process(handle, io, frame_count)
    }

    pub fn handle(&self, session: SessionId) -> Option<EffectHandle> {
        self.sessions.get(&session).copied()
    }

    fn attached(&self, session: SessionId) -> Result<EffectHandle> {
        self.handle(session).ok_or(CafeModeError::UnknownSession { session })
    }

    /// Open session ids in ascending order
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    /// Release every instance
    pub fn close_all(&mut self) {
        let sessions: Vec<SessionId> = self.session_ids();
        for session in sessions {
            self.close_session(session);
        }
    }

    fn push_settings(&mut self, handle: EffectHandle, settings: &Settings) {
        let mut send = |code: u32, payload: &[u8]| {
            if let Err(e) = self.library.command(handle, code, Some(payload)) {
                warn!("Command {} to {} failed: {}", code, handle, e);
            }
        };

        send(CMD_SET_ENABLED, &encode_bool(settings.enabled));
        if settings.enabled {
            send(CMD_SET_INTENSITY, &encode_f32(settings.intensity));
            send(CMD_SET_SPATIAL_WIDTH, &encode_f32(settings.spatial_width));
        }
        debug!("Pushed {:?} to {}", settings, handle);
    }
}

impl<L: EffectLibrary> Drop for SessionManager<L> {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::STATUS_INVALID;
    use crate::host::{to_status, EffectDescriptor};
    use crate::params::EffectParams;
    use uuid::Uuid;

    fn params(manager: &SessionManager, session: SessionId) -> EffectParams {
        let handle = manager.handle(session).unwrap();
        manager.library().params(handle).unwrap()
    }

    fn enabled_settings(intensity: f32, spatial_width: f32) -> Settings {
        Settings {
            enabled: true,
            intensity,
            spatial_width,
        }
    }

    #[test]
    fn test_open_ignores_global_and_duplicate_sessions() {
        let mut manager = SessionManager::new();
        assert!(!manager.open_session(0).unwrap());
        assert!(manager.open_session(42).unwrap());
        assert!(!manager.open_session(42).unwrap());

        assert_eq!(manager.session_ids(), vec![42]);
        assert_eq!(manager.library().len(), 1);
    }

    #[test]
    fn test_close_releases_instance() {
        let mut manager = SessionManager::new();
        manager.open_session(7).unwrap();

        assert!(manager.close_session(7));
        assert!(!manager.close_session(7));
        assert!(manager.library().is_empty());
    }

    #[test]
    fn test_apply_settings_broadcasts() {
        let mut manager = SessionManager::new();
        manager.open_session(1).unwrap();
        manager.open_session(2).unwrap();

        manager.apply_settings(enabled_settings(0.9, 0.2));

        for session in [1, 2] {
            let p = params(&manager, session);
            assert!(p.enabled);
            assert_eq!(p.intensity, 0.9);
            assert_eq!(p.spatial_width, 0.2);
        }
    }

    #[test]
    fn test_disabled_settings_keep_knob_positions() {
        let mut manager = SessionManager::new();
        manager.open_session(5).unwrap();
        manager.apply_settings(enabled_settings(0.7, 0.6));

        manager.apply_settings(Settings {
            enabled: false,
            intensity: 0.1,
            spatial_width: 0.1,
        });

        let p = params(&manager, 5);
        assert!(!p.enabled);
        assert_eq!(p.intensity, 0.7);
        assert_eq!(p.spatial_width, 0.6);
    }

    #[test]
    fn test_new_session_gets_current_settings() {
        let mut manager = SessionManager::new();
        manager.apply_settings(enabled_settings(0.3, 1.0));
        manager.open_session(9).unwrap();

        let p = params(&manager, 9);
        assert!(p.enabled);
        assert_eq!(p.intensity, 0.3);
        assert_eq!(p.spatial_width, 1.0);
    }

    #[test]
    fn test_configure_and_process_unknown_session() {
        let mut manager = SessionManager::new();
        let mut buffer = vec![0.0_f32; 4];
        let err = manager.configure_session(3, 44100).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_SESSION");
        assert_eq!(
            to_status(manager.process(3, BlockIo::InPlace(&mut buffer), 2)),
            STATUS_INVALID
        );

        manager.open_session(3).unwrap();
        manager.configure_session(3, 44100).unwrap();
        assert_eq!(params(&manager, 3).sample_rate, 44100);
        manager.process(3, BlockIo::InPlace(&mut buffer), 2).unwrap();
    }

    /// Library whose instances can never be released
    #[derive(Debug, Default)]
    struct StuckLibrary {
        created: u32,
        release_attempts: u32,
    }

    impl EffectLibrary for StuckLibrary {
        fn describe(&self, _uuid: &Uuid) -> Result<&EffectDescriptor> {
            Ok(&CAFEMODE_DESCRIPTOR)
        }

        fn create(&mut self, _uuid: &Uuid) -> Result<EffectHandle> {
            self.created += 1;
            Ok(EffectHandle::from_raw(self.created))
        }

        fn release(&mut self, handle: EffectHandle) -> Result<()> {
            self.release_attempts += 1;
            Err(CafeModeError::InvalidHandle { handle: handle.raw() })
        }

        fn process(&mut self, _: EffectHandle, _: BlockIo<'_>, _: usize) -> Result<()> {
            Ok(())
        }

        fn command(&mut self, _: EffectHandle, _: u32, _: Option<&[u8]>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_release_still_detaches_session() {
        let mut manager = SessionManager::with_library(StuckLibrary::default());
        manager.open_session(4).unwrap();

        assert!(manager.close_session(4));
        assert_eq!(manager.library().release_attempts, 1);
        assert!(manager.session_ids().is_empty());
        assert!(!manager.close_session(4));
        assert_eq!(manager.library().release_attempts, 1);
    }
}
