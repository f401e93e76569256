//! Session Configuration

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use sonora_dsp::{PresetCatalog, FACTORY_BANDS};

/// Configuration for a `SoftwareSession`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session name, used in logs and error messages
    pub name: String,

    /// Render sample rate in Hz (e.g., 44100, 48000, 96000)
    pub sample_rate: u32,

    /// Band center frequencies in Hz, strictly ascending
    pub band_frequencies: Vec<f32>,

    /// Built-in presets; each must carry one gain per band
    pub presets: PresetCatalog,

    /// Whether the engine offers an equalizer at all
    #[serde(default = "default_equalizer_available")]
    pub equalizer_available: bool,
}

fn default_equalizer_available() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "Sonora Session".to_string(),
            sample_rate: 48000,
            band_frequencies: FACTORY_BANDS.to_vec(),
            presets: PresetCatalog::factory(),
            equalizer_available: true,
        }
    }
}

impl SessionConfig {
    /// Session whose engine reports no equalizer support
    pub fn without_equalizer() -> Self {
        Self {
            equalizer_available: false,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sample_rate < 8000 || self.sample_rate > 192000 {
            return Err(EngineError::InvalidConfiguration(format!(
                "Invalid sample rate: {}",
                self.sample_rate
            )));
        }

        let nyquist = self.sample_rate as f32 / 2.0;
        for (i, frequency) in self.band_frequencies.iter().enumerate() {
            if !frequency.is_finite() || *frequency <= 0.0 || *frequency >= nyquist {
                return Err(EngineError::InvalidConfiguration(format!(
                    "Band {} frequency {}Hz outside (0, {}Hz)",
                    i, frequency, nyquist
                )));
            }
        }
        if self.band_frequencies.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(EngineError::InvalidConfiguration(
                "Band frequencies must be strictly ascending".to_string(),
            ));
        }

        if let Some(preset) = self.presets.find_mismatch(self.band_frequencies.len()) {
            return Err(EngineError::InvalidConfiguration(format!(
                "Preset '{}' has {} gains for {} bands",
                preset.name,
                preset.band_count(),
                self.band_frequencies.len()
            )));
        }
        Ok(())
    }
}
