//! Sonora Core - Equalizer Controller
//!
//! This crate provides the controller that owns a playback session's
//! equalizer state:
//! - Band and preamp queries with sentinel and `Option` forms
//! - Clamped gain edits, enable/disable, factory preset loading
//! - A full-state commit into the bound session after every mutation
//! - `PresetLoaded` notifications over crossbeam channels
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        UI Layer                             │
//! │    slider/toggle ──calls──▶ Controller ──events──▶ views    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ &PlaybackSession (borrowed)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Playback Session                        │
//! │   apply_equalizer ──▶ live equalizer input ──▶ audio graph  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod controller;
mod error;
mod event;

pub use controller::{EqualizerController, NO_SUCH_BAND};
pub use error::{EqualizerError, EqualizerResult};
pub use event::EqualizerEvent;

// Re-export the types callers need alongside the controller
pub use sonora_dsp::{Band, EqualizerSettings, GAIN_MAX, GAIN_MIN};
pub use sonora_engine::{PlaybackSession, SessionConfig, SoftwareSession};
