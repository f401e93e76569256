//! Equalizer Band Table
//!
//! The live equalizer state: one gain per engine-defined band, a global
//! pre-amplification offset and an enabled flag. Gains are in decibels.

use serde::{Deserialize, Serialize};

use crate::presets::Preset;

/// Lowest accepted gain/preamp value (dB)
pub const GAIN_MIN: f32 = -20.0;

/// Highest accepted gain/preamp value (dB)
pub const GAIN_MAX: f32 = 20.0;

/// Constrain a gain value into `[GAIN_MIN, GAIN_MAX]`
///
/// NaN carries no usable level and maps to 0 dB.
pub fn clamp_gain(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(GAIN_MIN, GAIN_MAX)
    }
}

/// Single band: engine-supplied center frequency plus its current gain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub frequency: f32,
    pub gain: f32,
}

/// Full settings set pushed into a playback session on every commit
///
/// There is no delta form: engines always replace their live input wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualizerSettings {
    /// Band gains in band order (dB)
    pub gains: Vec<f32>,
    pub preamp: f32,
    /// When false the engine bypasses equalization entirely
    pub enabled: bool,
}

impl EqualizerSettings {
    /// Neutral settings for `band_count` bands
    pub fn flat(band_count: usize) -> Self {
        Self {
            gains: vec![0.0; band_count],
            preamp: 0.0,
            enabled: true,
        }
    }
}

/// Live equalizer state
///
/// The band count is fixed at construction. Frequencies are never mutated,
/// and every stored gain is clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizerProfile {
    bands: Vec<Band>,
    preamp: f32,
    enabled: bool,
}

impl EqualizerProfile {
    /// Create a flat, enabled profile with one band per frequency
    pub fn new(frequencies: impl IntoIterator<Item = f32>) -> Self {
        let bands = frequencies
            .into_iter()
            .map(|frequency| Band {
                frequency,
                gain: 0.0,
            })
            .collect();

        Self {
            bands,
            preamp: 0.0,
            enabled: true,
        }
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn band(&self, index: usize) -> Option<Band> {
        self.bands.get(index).copied()
    }

    /// Set gain for the band at `index`
    ///
    /// Returns false, leaving every band untouched, if `index` is out of range.
    pub fn set_gain(&mut self, index: usize, gain: f32) -> bool {
        match self.bands.get_mut(index) {
            Some(band) => {
                band.gain = clamp_gain(gain);
                true
            }
            None => false,
        }
    }

    /// All gains in band order (useful for UI serialization)
    pub fn gains(&self) -> Vec<f32> {
        self.bands.iter().map(|band| band.gain).collect()
    }

    pub fn preamp(&self) -> f32 {
        self.preamp
    }

    pub fn set_preamp(&mut self, value: f32) {
        self.preamp = clamp_gain(value);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Overwrite every gain and the preamp from `preset`
    ///
    /// The enabled flag is left as is. Bands the preset has no value for are
    /// reset to 0 dB so no manual edit survives a preset load.
    pub fn apply_preset(&mut self, preset: &Preset) {
        for (i, band) in self.bands.iter_mut().enumerate() {
            band.gain = clamp_gain(preset.gains.get(i).copied().unwrap_or(0.0));
        }
        self.preamp = clamp_gain(preset.preamp);
    }

    /// Snapshot for a commit
    pub fn to_settings(&self) -> EqualizerSettings {
        EqualizerSettings {
            gains: self.gains(),
            preamp: self.preamp,
            enabled: self.enabled,
        }
    }
}
