//! In-Process Software Session
//!
//! A playback session whose live equalizer input is a single-slot mailbox.
//! Each commit replaces whatever the render side has not picked up yet, so
//! the render side always catches up to the newest commit, however long it
//! was idle.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::EngineError;
use crate::traits::{EqualizerHandle, PlaybackSession};
use sonora_dsp::{Equalizer, EqualizerSettings, Preset};

/// Settings waiting for the render side; newest wins
type Mailbox = Arc<Mutex<Option<EqualizerSettings>>>;

/// Caller-side bookkeeping, guarded by the session mutex
struct SessionState {
    active: Option<EqualizerHandle>,
    next_handle: u64,
    last_applied: Option<EqualizerSettings>,
    commit_count: u64,
}

/// Software playback session
pub struct SoftwareSession {
    config: SessionConfig,
    state: Mutex<SessionState>,
    mailbox: Mailbox,
}

impl SoftwareSession {
    /// Create a session and its render-side equalizer stage
    pub fn new(config: SessionConfig) -> Result<(Self, LiveEqualizer), EngineError> {
        config.validate()?;

        let equalizer = Equalizer::new(config.sample_rate as f32, &config.band_frequencies)?;
        let mailbox: Mailbox = Arc::new(Mutex::new(None));

        info!(
            "Software session '{}' created ({} bands, {} presets, equalizer {})",
            config.name,
            config.band_frequencies.len(),
            config.presets.len(),
            if config.equalizer_available { "available" } else { "unavailable" }
        );

        let session = Self {
            config,
            state: Mutex::new(SessionState {
                active: None,
                next_handle: 1,
                last_applied: None,
                commit_count: 0,
            }),
            mailbox: Arc::clone(&mailbox),
        };
        let live = LiveEqualizer {
            mailbox,
            equalizer,
            applied_count: 0,
        };
        Ok((session, live))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Most recent settings accepted by `apply_equalizer`
    pub fn last_applied(&self) -> Option<EqualizerSettings> {
        self.state.lock().last_applied.clone()
    }

    /// Number of accepted commits
    pub fn commit_count(&self) -> u64 {
        self.state.lock().commit_count
    }

    /// Whether an equalizer handle is currently allocated
    pub fn has_active_equalizer(&self) -> bool {
        self.state.lock().active.is_some()
    }

    fn post(&self, settings: EqualizerSettings) {
        *self.mailbox.lock() = Some(settings);
    }
}

impl PlaybackSession for SoftwareSession {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn allocate_equalizer(&self) -> Result<EqualizerHandle, EngineError> {
        if !self.config.equalizer_available {
            return Err(EngineError::EqualizerUnsupported(self.config.name.clone()));
        }

        let mut state = self.state.lock();
        if state.active.is_some() {
            return Err(EngineError::EqualizerInUse(self.config.name.clone()));
        }

        let handle = EqualizerHandle::from_raw(state.next_handle);
        state.next_handle += 1;
        state.active = Some(handle);
        debug!("Allocated equalizer {} on '{}'", handle.raw(), self.config.name);
        Ok(handle)
    }

    fn release_equalizer(&self, handle: EqualizerHandle) {
        let mut state = self.state.lock();
        if state.active != Some(handle) {
            warn!(
                "Ignoring release of unknown equalizer {} on '{}'",
                handle.raw(),
                self.config.name
            );
            return;
        }
        state.active = None;

        // Take the equalizer out of the live graph
        let mut bypass = EqualizerSettings::flat(self.config.band_frequencies.len());
        bypass.enabled = false;
        self.post(bypass);
        debug!("Released equalizer {} on '{}'", handle.raw(), self.config.name);
    }

    fn band_count(&self) -> usize {
        if self.config.equalizer_available {
            self.config.band_frequencies.len()
        } else {
            0
        }
    }

    fn band_frequency(&self, index: usize) -> Option<f32> {
        if !self.config.equalizer_available {
            return None;
        }
        self.config.band_frequencies.get(index).copied()
    }

    fn preset_count(&self) -> usize {
        if self.config.equalizer_available {
            self.config.presets.len()
        } else {
            0
        }
    }

    fn preset_name(&self, index: usize) -> Option<String> {
        self.preset(index).map(|preset| preset.name)
    }

    fn preset(&self, index: usize) -> Option<Preset> {
        if !self.config.equalizer_available {
            return None;
        }
        self.config.presets.get(index).cloned()
    }

    fn apply_equalizer(
        &self,
        handle: EqualizerHandle,
        settings: &EqualizerSettings,
    ) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        if state.active != Some(handle) {
            return Err(EngineError::StaleHandle(handle.raw()));
        }

        let expected = self.config.band_frequencies.len();
        if settings.gains.len() != expected {
            return Err(EngineError::BandCountMismatch {
                expected,
                got: settings.gains.len(),
            });
        }

        self.post(settings.clone());
        state.last_applied = Some(settings.clone());
        state.commit_count += 1;

        debug!(
            "Committed equalizer on '{}' (preamp {:.1}dB, enabled {})",
            self.config.name, settings.preamp, settings.enabled
        );
        Ok(())
    }
}

/// Render-side stage of a `SoftwareSession`
///
/// Owned by the audio thread. The mailbox is checked before every buffer
/// with `try_lock`, so the audio thread never waits on a committing caller;
/// a contended check simply retries on the next buffer.
pub struct LiveEqualizer {
    mailbox: Mailbox,
    equalizer: Equalizer,
    applied_count: u64,
}

impl LiveEqualizer {
    /// Apply the newest pending commit, if any
    ///
    /// Returns true when new settings took effect.
    pub fn sync(&mut self) -> bool {
        let pending = match self.mailbox.try_lock() {
            Some(mut slot) => slot.take(),
            None => None,
        };

        let Some(settings) = pending else {
            return false;
        };
        match self.equalizer.apply(&settings) {
            Ok(()) => {
                self.applied_count += 1;
                true
            }
            Err(e) => {
                warn!("Failed to apply equalizer settings: {}", e);
                false
            }
        }
    }

    /// Process an interleaved stereo buffer in-place
    pub fn process_interleaved(&mut self, buffer: &mut [f32]) {
        self.sync();
        self.equalizer.process_interleaved(buffer);
    }

    pub fn is_enabled(&self) -> bool {
        self.equalizer.is_enabled()
    }

    /// Number of settings sets that reached the processor
    pub fn applied_count(&self) -> u64 {
        self.applied_count
    }

    pub fn equalizer(&self) -> &Equalizer {
        &self.equalizer
    }
}
