//! Built-in EQ Presets

use serde::{Deserialize, Serialize};

/// Factory band layout (Hz) - ISO standard octave centers
pub const FACTORY_BANDS: [f32; 10] = [
    31.0,    // Sub-bass
    62.0,    // Bass
    125.0,   // Low-mid
    250.0,   // Mid
    500.0,   // Mid
    1000.0,  // Upper-mid
    2000.0,  // Presence
    4000.0,  // Brilliance
    8000.0,  // High
    16000.0, // Air
];

/// Factory preset: (name, preamp dB, 10 band gains)
pub type FactoryPreset = (&'static str, f32, [f32; 10]);

/// List of factory presets, in catalog order
pub const FACTORY_PRESETS: &[FactoryPreset] = &[
    ("Flat", 0.0, [0.0; 10]),
    ("Bass Boost", -4.0, [6.0, 5.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("Treble Boost", -4.0, [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 3.0, 5.0, 6.0, 6.0]),
    ("Vocal Clarity", -3.0, [-2.0, -1.0, 0.0, 2.0, 4.0, 4.0, 3.0, 2.0, 1.0, 0.0]),
    ("Bass Reduce", 0.0, [-6.0, -4.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("Loudness", -3.0, [4.0, 3.0, 0.0, -1.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]),
    ("Classical", 0.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -7.2, -7.2, -7.2, -9.6]),
    ("Club", -5.0, [0.0, 0.0, 8.0, 5.6, 5.6, 5.6, 3.2, 0.0, 0.0, 0.0]),
    ("Dance", -6.0, [9.6, 7.2, 2.4, 0.0, 0.0, -5.6, -7.2, -7.2, 0.0, 0.0]),
    ("Headphones", -8.0, [4.8, 11.2, 5.6, -3.2, -2.4, 1.6, 4.8, 9.6, 12.8, 14.4]),
    ("Live", -4.0, [-4.8, 0.0, 4.0, 5.6, 5.6, 5.6, 4.0, 2.4, 2.4, 2.4]),
    ("Rock", -6.0, [8.0, 4.8, -5.6, -8.0, -3.2, 4.0, 8.8, 11.2, 11.2, 11.2]),
    ("Electronic", -4.0, [4.0, 3.0, 1.0, 0.0, -2.0, -2.0, 0.0, 1.0, 3.0, 4.0]),
];

/// Named template of band gains plus its own preamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub preamp: f32,
    pub gains: Vec<f32>,
}

impl Preset {
    pub fn new(name: impl Into<String>, preamp: f32, gains: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            preamp,
            gains,
        }
    }

    pub fn band_count(&self) -> usize {
        self.gains.len()
    }
}

impl From<&FactoryPreset> for Preset {
    fn from((name, preamp, gains): &FactoryPreset) -> Self {
        Preset::new(*name, *preamp, gains.to_vec())
    }
}

/// Ordered, zero-based, read-only list of presets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Catalog built from `FACTORY_PRESETS` (10 bands, "Flat" first)
    pub fn factory() -> Self {
        Self::new(FACTORY_PRESETS.iter().map(Preset::from).collect())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.presets.get(index).map(|preset| preset.name.as_str())
    }

    /// Index of the first preset called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.presets.iter().position(|preset| preset.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// First preset whose band count differs from `band_count`, if any
    pub fn find_mismatch(&self, band_count: usize) -> Option<&Preset> {
        self.presets
            .iter()
            .find(|preset| preset.band_count() != band_count)
    }
}
