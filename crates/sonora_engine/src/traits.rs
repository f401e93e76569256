//! Playback Session Trait
//!
//! The interface a playback engine exposes to an equalizer controller.

use crate::error::EngineError;
use sonora_dsp::{EqualizerSettings, Preset};

/// Opaque token for an engine-side equalizer
///
/// Issued by `PlaybackSession::allocate_equalizer` and only meaningful to the
/// session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EqualizerHandle(u64);

impl EqualizerHandle {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// An initialized playback session that may support live equalization
///
/// All methods take `&self`: the session is shared between the host
/// application and the controller bound to it, so implementations keep their
/// mutable state behind interior mutability.
pub trait PlaybackSession {
    /// Human-readable session name (for logs)
    fn name(&self) -> &str;

    /// Allocate the session's equalizer
    ///
    /// Fails with `EngineError::EqualizerUnsupported` when the engine has no
    /// equalizer, or `EngineError::EqualizerInUse` when one is already bound.
    fn allocate_equalizer(&self) -> Result<EqualizerHandle, EngineError>;

    /// Free an equalizer allocated by this session
    fn release_equalizer(&self, handle: EqualizerHandle);

    /// Number of equalizer bands the engine implements
    fn band_count(&self) -> usize;

    /// Center frequency (Hz) of band `index`
    fn band_frequency(&self, index: usize) -> Option<f32>;

    /// Number of built-in presets
    fn preset_count(&self) -> usize;

    /// Name of preset `index`
    fn preset_name(&self, index: usize) -> Option<String>;

    /// Full gain template of preset `index`
    fn preset(&self, index: usize) -> Option<Preset>;

    /// Replace the live equalizer input wholesale
    fn apply_equalizer(
        &self,
        handle: EqualizerHandle,
        settings: &EqualizerSettings,
    ) -> Result<(), EngineError>;
}
