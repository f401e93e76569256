//! Equalizer Controller
//!
//! The sole accessor and mutator of the equalizer bound to one playback
//! session. Every mutation is clamped, stored locally, then committed to the
//! session as a full settings set.
//!
//! # Binding
//!
//! The controller borrows its session, so the session always outlives it.
//! If the session cannot supply an equalizer the controller stays usable in
//! an unbound state: queries return sentinels and edits do nothing.

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::error::{EqualizerError, EqualizerResult};
use crate::event::EqualizerEvent;
use sonora_dsp::{Band, EqualizerProfile, EqualizerSettings};
use sonora_engine::{EngineError, EqualizerHandle, PlaybackSession};

/// Sentinel returned by float queries for an out-of-range band index
///
/// `-1.0` is also a legal gain. Callers that must tell the two apart check
/// the index against `band_count()` or use the `try_*` accessors.
pub const NO_SUCH_BAND: f32 = -1.0;

/// Engine-side equalizer plus the local profile mirrored into it
struct Binding {
    handle: EqualizerHandle,
    profile: EqualizerProfile,
}

/// Controller for the equalizer of one playback session
pub struct EqualizerController<'s, S: PlaybackSession + ?Sized> {
    session: &'s S,
    binding: Option<Binding>,
    listeners: Vec<Sender<EqualizerEvent>>,
}

impl<'s, S: PlaybackSession + ?Sized> EqualizerController<'s, S> {
    /// Bind a controller to `session`
    ///
    /// Never fails: if the session has no equalizer support the controller is
    /// returned unbound and every operation degrades to a no-op.
    pub fn new(session: &'s S) -> Self {
        let binding = match Self::bind(session) {
            Ok(binding) => Some(binding),
            Err(e) => {
                warn!("Equalizer unavailable on '{}': {}", session.name(), e);
                None
            }
        };

        Self {
            session,
            binding,
            listeners: Vec::new(),
        }
    }

    /// Bind a controller to `session`, failing if no equalizer can be bound
    pub fn try_new(session: &'s S) -> EqualizerResult<Self> {
        let binding = Self::bind(session).map_err(EqualizerError::BindFailed)?;
        Ok(Self {
            session,
            binding: Some(binding),
            listeners: Vec::new(),
        })
    }

    fn bind(session: &S) -> Result<Binding, EngineError> {
        let handle = session.allocate_equalizer()?;

        let band_count = session.band_count();
        let frequencies: Option<Vec<f32>> =
            (0..band_count).map(|i| session.band_frequency(i)).collect();
        let Some(frequencies) = frequencies else {
            session.release_equalizer(handle);
            let got = (0..band_count)
                .take_while(|&i| session.band_frequency(i).is_some())
                .count();
            return Err(EngineError::BandCountMismatch {
                expected: band_count,
                got,
            });
        };

        info!(
            "Equalizer {} bound to '{}' ({} bands, {} presets)",
            handle.raw(),
            session.name(),
            band_count,
            session.preset_count()
        );

        Ok(Binding {
            handle,
            profile: EqualizerProfile::new(frequencies),
        })
    }

    /// Whether an engine equalizer is bound
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The playback session this controller is bound to
    pub fn session(&self) -> &'s S {
        self.session
    }

    /// Number of bands (0 when unbound)
    pub fn band_count(&self) -> usize {
        self.profile().map_or(0, EqualizerProfile::band_count)
    }

    /// Band at `index`; `None` for an out-of-range index or when unbound
    pub fn band(&self, index: usize) -> Option<Band> {
        self.profile().and_then(|profile| profile.band(index))
    }

    /// Center frequency of band `index`, or `NO_SUCH_BAND`
    pub fn band_frequency(&self, index: usize) -> f32 {
        self.try_band_frequency(index).unwrap_or(NO_SUCH_BAND)
    }

    /// Center frequency of band `index`; `None` for an out-of-range index
    pub fn try_band_frequency(&self, index: usize) -> Option<f32> {
        self.band(index).map(|band| band.frequency)
    }

    /// Current gain of band `index`, or `NO_SUCH_BAND`
    pub fn amplification_for_band_at(&self, index: usize) -> f32 {
        self.try_amplification_for_band_at(index)
            .unwrap_or(NO_SUCH_BAND)
    }

    /// Current gain of band `index`; `None` for an out-of-range index
    pub fn try_amplification_for_band_at(&self, index: usize) -> Option<f32> {
        self.band(index).map(|band| band.gain)
    }

    /// All band gains in band order
    pub fn amplifications(&self) -> Vec<f32> {
        self.profile().map(EqualizerProfile::gains).unwrap_or_default()
    }

    /// Set the gain of band `index`, clamped to `[GAIN_MIN, GAIN_MAX]`
    ///
    /// An out-of-range index changes nothing, but the profile is still
    /// committed.
    pub fn set_amplification_for_band_at(&mut self, amp: f32, index: usize) -> EqualizerResult<()> {
        let binding = self.binding.as_mut().ok_or(EqualizerError::NotBound)?;
        if !binding.profile.set_gain(index, amp) {
            debug!("Ignoring gain for out-of-range band {}", index);
        }
        self.commit()
    }

    /// Current preamp (0.0 when unbound)
    pub fn preamplification(&self) -> f32 {
        self.profile().map_or(0.0, EqualizerProfile::preamp)
    }

    /// Set the preamp, clamped to `[GAIN_MIN, GAIN_MAX]`
    pub fn set_preamplification(&mut self, value: f32) -> EqualizerResult<()> {
        let binding = self.binding.as_mut().ok_or(EqualizerError::NotBound)?;
        binding.profile.set_preamp(value);
        self.commit()
    }

    /// Whether equalization is active (false when unbound)
    pub fn is_enabled(&self) -> bool {
        self.profile().is_some_and(EqualizerProfile::is_enabled)
    }

    /// Enable or bypass equalization; band state is preserved either way
    pub fn set_enabled(&mut self, enabled: bool) -> EqualizerResult<()> {
        let binding = self.binding.as_mut().ok_or(EqualizerError::NotBound)?;
        binding.profile.set_enabled(enabled);
        self.commit()
    }

    /// Number of engine presets (0 when unbound)
    pub fn preset_count(&self) -> usize {
        if self.is_bound() {
            self.session.preset_count()
        } else {
            0
        }
    }

    /// Name of preset `index`, or an empty string
    pub fn preset_name_at(&self, index: i32) -> String {
        self.preset_name(index).unwrap_or_default()
    }

    /// Name of preset `index`; `None` for an out-of-range index or when unbound
    pub fn preset_name(&self, index: i32) -> Option<String> {
        if !self.is_bound() {
            return None;
        }
        preset_slot(index).and_then(|i| self.session.preset_name(i))
    }

    /// Overwrite gains and preamp from preset `index`, then commit
    ///
    /// The enabled flag is untouched. An out-of-range index changes nothing,
    /// commits nothing and raises no event. `PresetLoaded` is raised once the
    /// profile has changed, even if the engine rejects the commit.
    pub fn load_from_preset(&mut self, index: i32) -> EqualizerResult<()> {
        let binding = self.binding.as_mut().ok_or(EqualizerError::NotBound)?;
        let Some(preset) = preset_slot(index).and_then(|i| self.session.preset(i)) else {
            debug!("Ignoring out-of-range preset {}", index);
            return Ok(());
        };

        binding.profile.apply_preset(&preset);
        info!("Loaded preset '{}'", preset.name);

        let result = self.commit();
        self.emit(EqualizerEvent::PresetLoaded);
        result
    }

    /// Copy of the state last handed to the engine
    pub fn snapshot(&self) -> Option<EqualizerSettings> {
        self.profile().map(EqualizerProfile::to_settings)
    }

    /// Listen for controller events
    pub fn subscribe(&mut self) -> Receiver<EqualizerEvent> {
        let (sender, receiver) = unbounded();
        self.listeners.push(sender);
        receiver
    }

    fn profile(&self) -> Option<&EqualizerProfile> {
        self.binding.as_ref().map(|binding| &binding.profile)
    }

    /// Push the full profile into the session's live equalizer input
    fn commit(&self) -> EqualizerResult<()> {
        let binding = self.binding.as_ref().ok_or(EqualizerError::NotBound)?;
        let settings = binding.profile.to_settings();

        self.session
            .apply_equalizer(binding.handle, &settings)
            .map_err(|e| {
                warn!("Equalizer commit to '{}' failed: {}", self.session.name(), e);
                EqualizerError::CommitFailed(e)
            })
    }

    fn emit(&mut self, event: EqualizerEvent) {
        // Dropped receivers are pruned
        self.listeners.retain(|sender| sender.send(event).is_ok());
    }
}

impl<'s, S: PlaybackSession + ?Sized> Drop for EqualizerController<'s, S> {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.take() {
            self.session.release_equalizer(binding.handle);
            debug!("Equalizer {} released", binding.handle.raw());
        }
    }
}

/// Preset indices are signed at the API surface
fn preset_slot(index: i32) -> Option<usize> {
    usize::try_from(index).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonora_dsp::{Preset, PresetCatalog};
    use sonora_engine::{LiveEqualizer, SessionConfig, SoftwareSession};

    fn session() -> (SoftwareSession, LiveEqualizer) {
        SoftwareSession::new(SessionConfig::default()).unwrap()
    }

    fn flat_index(session: &SoftwareSession) -> i32 {
        session.config().presets.position("Flat").unwrap() as i32
    }

    #[test]
    fn test_binds_to_session() {
        let (session, _live) = session();
        let controller = EqualizerController::new(&session);

        assert!(controller.is_bound());
        assert!(session.has_active_equalizer());
        assert_eq!(controller.band_count(), 10);
        assert_eq!(controller.band_frequency(0), 31.0);
        assert_eq!(controller.band_frequency(9), 16000.0);
        assert_eq!(controller.preamplification(), 0.0);
        assert!(controller.is_enabled());
        assert_eq!(controller.amplifications(), vec![0.0; 10]);
        // Binding alone does not commit
        assert_eq!(session.commit_count(), 0);
    }

    #[test]
    fn test_set_amplification_clamps() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);

        let inputs = [
            f32::NEG_INFINITY,
            -1000.0,
            -20.5,
            -20.0,
            -1.0,
            0.0,
            7.25,
            20.0,
            20.01,
            1e9,
            f32::INFINITY,
        ];
        for index in 0..controller.band_count() {
            for amp in inputs {
                controller.set_amplification_for_band_at(amp, index).unwrap();
                assert_eq!(
                    controller.amplification_for_band_at(index),
                    amp.clamp(-20.0, 20.0),
                    "band {index}, amp {amp}"
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_band() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);
        controller.set_amplification_for_band_at(4.0, 2).unwrap();
        let before = controller.amplifications();

        for index in [10, 11, 1000, usize::MAX] {
            assert_eq!(controller.band_frequency(index), NO_SUCH_BAND);
            assert_eq!(controller.amplification_for_band_at(index), NO_SUCH_BAND);
            assert!(controller.try_band_frequency(index).is_none());
            assert!(controller.try_amplification_for_band_at(index).is_none());

            controller.set_amplification_for_band_at(12.0, index).unwrap();
            assert_eq!(controller.amplifications(), before);
        }
    }

    #[test]
    fn test_sentinel_matches_real_gain() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);
        controller.set_amplification_for_band_at(-1.0, 0).unwrap();

        // Same float either way; the Option accessor disambiguates
        assert_eq!(controller.amplification_for_band_at(0), NO_SUCH_BAND);
        assert_eq!(controller.try_amplification_for_band_at(0), Some(-1.0));
        assert_eq!(controller.try_amplification_for_band_at(10), None);
    }

    #[test]
    fn test_preamplification_clamps() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);

        controller.set_preamplification(25.0).unwrap();
        assert_eq!(controller.preamplification(), 20.0);

        controller.set_preamplification(-50.0).unwrap();
        assert_eq!(controller.preamplification(), -20.0);

        controller.set_preamplification(3.5).unwrap();
        assert_eq!(controller.preamplification(), 3.5);
    }

    #[test]
    fn test_every_mutation_commits_full_profile() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);

        controller.set_amplification_for_band_at(6.0, 4).unwrap();
        assert_eq!(session.commit_count(), 1);
        controller.set_preamplification(-2.0).unwrap();
        assert_eq!(session.commit_count(), 2);
        controller.set_enabled(true).unwrap();
        assert_eq!(session.commit_count(), 3);
        // Out-of-range band still commits
        controller.set_amplification_for_band_at(6.0, 99).unwrap();
        assert_eq!(session.commit_count(), 4);

        let committed = session.last_applied().unwrap();
        assert_eq!(committed.gains[4], 6.0);
        assert_eq!(committed.preamp, -2.0);
        assert!(committed.enabled);
        assert_eq!(Some(committed), controller.snapshot());
    }

    #[test]
    fn test_disabled_commit_keeps_bypass() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);

        controller.set_enabled(false).unwrap();
        controller.set_amplification_for_band_at(5.0, 0).unwrap();

        let committed = session.last_applied().unwrap();
        assert!(!committed.enabled);
        assert_eq!(committed.gains[0], 5.0);
        assert_eq!(controller.amplification_for_band_at(0), 5.0);
        assert!(!controller.is_enabled());
    }

    #[test]
    fn test_preset_names() {
        let (session, _live) = session();
        let controller = EqualizerController::new(&session);
        let count = controller.preset_count();

        assert_eq!(count, session.config().presets.len());
        assert_eq!(controller.preset_name_at(0), "Flat");
        assert_eq!(controller.preset_name_at(count as i32), "");
        assert_eq!(controller.preset_name_at(i32::MAX), "");
        assert_eq!(controller.preset_name_at(-1), "");
        assert_eq!(controller.preset_name_at(i32::MIN), "");
        assert!(controller.preset_name(-1).is_none());
    }

    #[test]
    fn test_load_from_preset() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);
        let events = controller.subscribe();
        controller.set_enabled(false).unwrap();

        let index = 1;
        let preset = session.preset(index).unwrap();
        controller.load_from_preset(index as i32).unwrap();

        assert_eq!(controller.amplifications(), preset.gains);
        assert_eq!(controller.preamplification(), preset.preamp);
        assert!(!controller.is_enabled(), "Loading must not touch enabled");

        let committed = session.last_applied().unwrap();
        assert_eq!(committed.gains, preset.gains);
        assert!(!committed.enabled);

        assert_eq!(events.try_recv(), Ok(EqualizerEvent::PresetLoaded));
        assert!(events.try_recv().is_err(), "Exactly one event per load");
    }

    #[test]
    fn test_load_out_of_range_preset_is_noop() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);
        let events = controller.subscribe();
        controller.set_amplification_for_band_at(3.0, 1).unwrap();
        let before = controller.snapshot();
        let commits = session.commit_count();

        let count = controller.preset_count() as i32;
        for index in [count, count + 5, -1, i32::MIN] {
            controller.load_from_preset(index).unwrap();
        }

        assert_eq!(controller.snapshot(), before);
        assert_eq!(session.commit_count(), commits);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_preset_overwrites_manual_edit() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);

        controller.set_amplification_for_band_at(15.0, 3).unwrap();
        controller.load_from_preset(flat_index(&session)).unwrap();

        assert_eq!(controller.amplification_for_band_at(3), 0.0);
        assert_eq!(controller.amplifications(), vec![0.0; 10]);
    }

    #[test]
    fn test_preset_values_are_clamped() {
        let config = SessionConfig {
            band_frequencies: vec![100.0, 1000.0],
            presets: PresetCatalog::new(vec![Preset::new("Wild", 40.0, vec![-30.0, 30.0])]),
            ..Default::default()
        };
        let (session, _live) = SoftwareSession::new(config).unwrap();
        let mut controller = EqualizerController::new(&session);

        controller.load_from_preset(0).unwrap();
        assert_eq!(controller.amplifications(), vec![-20.0, 20.0]);
        assert_eq!(controller.preamplification(), 20.0);
    }

    #[test]
    fn test_events_reach_every_listener() {
        let (session, _live) = session();
        let mut controller = EqualizerController::new(&session);
        let first = controller.subscribe();
        let second = controller.subscribe();
        drop(controller.subscribe());

        controller.load_from_preset(0).unwrap();
        controller.set_enabled(false).unwrap();
        controller.set_preamplification(1.0).unwrap();
        controller.set_amplification_for_band_at(1.0, 0).unwrap();

        assert_eq!(first.try_iter().count(), 1);
        assert_eq!(second.try_iter().count(), 1);
        assert_eq!(controller.listeners.len(), 2);
    }

    #[test]
    fn test_unsupported_engine_degrades() {
        let (session, _live) = SoftwareSession::new(SessionConfig::without_equalizer()).unwrap();
        let mut controller = EqualizerController::new(&session);
        let events = controller.subscribe();

        assert!(!controller.is_bound());
        assert_eq!(controller.band_count(), 0);
        assert_eq!(controller.band_frequency(0), NO_SUCH_BAND);
        assert_eq!(controller.amplification_for_band_at(0), NO_SUCH_BAND);
        assert_eq!(controller.preamplification(), 0.0);
        assert!(!controller.is_enabled());
        assert_eq!(controller.preset_count(), 0);
        assert_eq!(controller.preset_name_at(0), "");
        assert!(controller.amplifications().is_empty());
        assert!(controller.snapshot().is_none());

        assert!(matches!(
            controller.set_amplification_for_band_at(3.0, 0),
            Err(EqualizerError::NotBound)
        ));
        assert!(matches!(
            controller.set_preamplification(3.0),
            Err(EqualizerError::NotBound)
        ));
        assert!(matches!(controller.set_enabled(false), Err(EqualizerError::NotBound)));
        assert!(matches!(controller.load_from_preset(0), Err(EqualizerError::NotBound)));
        assert!(events.try_recv().is_err());
        assert_eq!(session.commit_count(), 0);
    }

    #[test]
    fn test_try_new_reports_bind_failure() {
        let (unsupported, _live) = SoftwareSession::new(SessionConfig::without_equalizer()).unwrap();
        assert!(matches!(
            EqualizerController::try_new(&unsupported),
            Err(EqualizerError::BindFailed(EngineError::EqualizerUnsupported(_)))
        ));

        let (session, _live) = session();
        let controller = EqualizerController::try_new(&session).unwrap();
        assert!(controller.is_bound());
    }

    #[test]
    fn test_second_controller_on_session_is_unbound() {
        let (session, _live) = session();
        let first = EqualizerController::new(&session);
        let second = EqualizerController::new(&session);

        assert!(first.is_bound());
        assert!(!second.is_bound());
        drop(second);
        // Dropping the unbound controller must not free the first's handle
        assert!(session.has_active_equalizer());
    }

    #[test]
    fn test_drop_releases_handle() {
        let (session, mut live) = session();
        {
            let mut controller = EqualizerController::new(&session);
            controller.set_amplification_for_band_at(6.0, 5).unwrap();
            live.sync();
            assert!(live.is_enabled());
        }

        assert!(!session.has_active_equalizer());
        live.sync();
        assert!(!live.is_enabled(), "Released equalizer leaves the audio graph");
        assert!(EqualizerController::new(&session).is_bound());
    }

    #[test]
    fn test_commit_failure_is_surfaced() {
        let session = RejectingSession::new();
        let mut controller = EqualizerController::new(&session);

        controller.set_amplification_for_band_at(2.0, 0).unwrap();
        session.reject.set(true);
        let err = controller.set_amplification_for_band_at(4.0, 0).unwrap_err();
        assert!(matches!(err, EqualizerError::CommitFailed(EngineError::StaleHandle(_))));
        // Local state keeps the edit
        assert_eq!(controller.amplification_for_band_at(0), 4.0);
        assert_eq!(session.inner.last_applied().unwrap().gains[0], 2.0);

        // The next accepted commit carries the whole profile, rejected edit included
        session.reject.set(false);
        controller.set_preamplification(1.0).unwrap();
        let committed = session.inner.last_applied().unwrap();
        assert_eq!(committed.gains[0], 4.0);
        assert_eq!(Some(committed), controller.snapshot());
    }

    #[test]
    fn test_preset_event_raised_even_if_commit_fails() {
        let session = RejectingSession::new();
        let mut controller = EqualizerController::new(&session);
        let events = controller.subscribe();
        let preset = session.preset(1).unwrap();

        session.reject.set(true);
        assert!(matches!(
            controller.load_from_preset(1),
            Err(EqualizerError::CommitFailed(_))
        ));
        assert_eq!(controller.amplifications(), preset.gains);
        assert_eq!(events.try_recv(), Ok(EqualizerEvent::PresetLoaded));
        assert!(events.try_recv().is_err());
        assert_eq!(session.inner.commit_count(), 0);
    }

    #[test]
    fn test_lagging_render_catches_up_to_snapshot() {
        let (session, mut live) = session();
        let mut controller = EqualizerController::new(&session);

        // Render side never runs while the edits pile up
        for step in 1..=20 {
            controller.set_preamplification(-(step as f32)).unwrap();
            controller.set_amplification_for_band_at(step as f32 / 4.0, step % 10).unwrap();
        }
        for index in 0..controller.band_count() {
            controller.set_amplification_for_band_at(0.0, index).unwrap();
        }
        assert_eq!(session.commit_count(), 50);
        assert_eq!(session.last_applied(), controller.snapshot());

        let mut buffer = vec![0.5_f32; 2048];
        live.process_interleaved(&mut buffer);
        assert_eq!(live.applied_count(), 1, "Only the newest settings are applied");
        // -20dB preamp, flat bands
        assert!((buffer[buffer.len() - 1] - 0.05).abs() < 1e-3, "{}", buffer[buffer.len() - 1]);
    }

    #[test]
    fn test_drop_after_many_edits_bypasses_live_graph() {
        let (session, mut live) = session();
        {
            let mut controller = EqualizerController::new(&session);
            for index in 0..64 {
                controller.set_amplification_for_band_at(12.0, index % 10).unwrap();
            }
        }

        live.sync();
        assert!(!live.is_enabled(), "Release must not be lost behind pending edits");
        let mut buffer = vec![0.5_f32; 64];
        live.process_interleaved(&mut buffer);
        assert!(buffer.iter().all(|sample| *sample == 0.5));
    }

    #[test]
    fn test_edits_reach_live_audio() {
        let (session, mut live) = session();
        let mut controller = EqualizerController::new(&session);
        controller.set_preamplification(-20.0).unwrap();

        let mut buffer = vec![0.5_f32; 2048];
        live.process_interleaved(&mut buffer);
        assert!((buffer[buffer.len() - 1] - 0.05).abs() < 1e-3);

        controller.set_enabled(false).unwrap();
        let mut buffer = vec![0.5_f32; 64];
        live.process_interleaved(&mut buffer);
        assert!(buffer.iter().all(|sample| *sample == 0.5));
    }

    #[test]
    fn test_dyn_session() {
        let (software, _live) = session();
        let session: &dyn PlaybackSession = &software;
        let mut controller = EqualizerController::new(session);

        controller.set_amplification_for_band_at(1.5, 2).unwrap();
        assert_eq!(controller.amplification_for_band_at(2), 1.5);
        assert_eq!(controller.session().name(), "Sonora Session");
    }

    /// Software session whose engine can be told to refuse commits
    struct RejectingSession {
        inner: SoftwareSession,
        reject: std::cell::Cell<bool>,
    }

    impl RejectingSession {
        fn new() -> Self {
            let (inner, _live) = SoftwareSession::new(SessionConfig::default()).unwrap();
            Self {
                inner,
                reject: std::cell::Cell::new(false),
            }
        }
    }

    impl PlaybackSession for RejectingSession {
        fn name(&self) -> &str {
            self.inner.name()
        }

        fn allocate_equalizer(&self) -> Result<EqualizerHandle, EngineError> {
            self.inner.allocate_equalizer()
        }

        fn release_equalizer(&self, handle: EqualizerHandle) {
            self.inner.release_equalizer(handle)
        }

        fn band_count(&self) -> usize {
            self.inner.band_count()
        }

        fn band_frequency(&self, index: usize) -> Option<f32> {
            self.inner.band_frequency(index)
        }

        fn preset_count(&self) -> usize {
            self.inner.preset_count()
        }

        fn preset_name(&self, index: usize) -> Option<String> {
            self.inner.preset_name(index)
        }

        fn preset(&self, index: usize) -> Option<Preset> {
            self.inner.preset(index)
        }

        fn apply_equalizer(
            &self,
            handle: EqualizerHandle,
            settings: &EqualizerSettings,
        ) -> Result<(), EngineError> {
            if self.reject.get() {
                return Err(EngineError::StaleHandle(handle.raw()));
            }
            self.inner.apply_equalizer(handle, settings)
        }
    }

    /// Session whose band table disagrees with its band count
    struct InconsistentSession {
        released: std::cell::Cell<bool>,
    }

    impl PlaybackSession for InconsistentSession {
        fn name(&self) -> &str {
            "Inconsistent"
        }

        fn allocate_equalizer(&self) -> Result<EqualizerHandle, EngineError> {
            Ok(EqualizerHandle::from_raw(1))
        }

        fn release_equalizer(&self, _handle: EqualizerHandle) {
            self.released.set(true);
        }

        fn band_count(&self) -> usize {
            3
        }

        fn band_frequency(&self, index: usize) -> Option<f32> {
            (index < 2).then_some(100.0 * (index + 1) as f32)
        }

        fn preset_count(&self) -> usize {
            0
        }

        fn preset_name(&self, _index: usize) -> Option<String> {
            None
        }

        fn preset(&self, _index: usize) -> Option<Preset> {
            None
        }

        fn apply_equalizer(
            &self,
            _handle: EqualizerHandle,
            _settings: &EqualizerSettings,
        ) -> Result<(), EngineError> {
            Ok(())
        }
    }

    #[test]
    fn test_inconsistent_band_table_fails_bind() {
        let session = InconsistentSession {
            released: std::cell::Cell::new(false),
        };
        let result = EqualizerController::try_new(&session);

        assert!(matches!(
            result,
            Err(EqualizerError::BindFailed(EngineError::BandCountMismatch {
                expected: 3,
                got: 2
            }))
        ));
        assert!(session.released.get(), "Handle must be returned on failed bind");
    }
}
