//! Sonora DSP - Equalizer State and Signal Processing
//!
//! This crate is the leaf of the Sonora workspace. It provides:
//! - The equalizer band table (`EqualizerProfile`) with gain clamping
//! - The commit payload handed to playback engines (`EqualizerSettings`)
//! - Factory presets and the read-only `PresetCatalog`
//! - A biquad cascade (`Equalizer`) that applies committed settings to audio
//!
//! # Architecture
//!
//! State lives in `EqualizerProfile` and is only ever mutated through clamped
//! setters. Engines never see the profile itself, only the `EqualizerSettings`
//! snapshot produced on every commit. The `Equalizer` recomputes coefficients
//! between buffers and performs no allocation while processing.

mod eq;
mod error;
mod presets;
mod profile;

pub use eq::{BandType, Equalizer};
pub use error::DspError;
pub use presets::{FactoryPreset, Preset, PresetCatalog, FACTORY_BANDS, FACTORY_PRESETS};
pub use profile::{clamp_gain, Band, EqualizerProfile, EqualizerSettings, GAIN_MAX, GAIN_MIN};
