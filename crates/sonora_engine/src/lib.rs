//! Sonora Engine - Playback Session Seam
//!
//! Defines what an equalizer controller needs from a playback engine, and
//! ships one in-process implementation of it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐  apply_equalizer   ┌──────────────────────┐
//! │ Controller (caller side) │ ─────────────────▶ │ SoftwareSession      │
//! └──────────────────────────┘                    │  (parking_lot state) │
//!                                                 └──────────┬───────────┘
//!                                                            │ mailbox (latest)
//!                                                            ▼
//!                                                 ┌──────────────────────┐
//!                                                 │ LiveEqualizer        │
//!                                                 │  (render thread)     │
//!                                                 └──────────────────────┘
//! ```

mod config;
mod error;
mod software;
mod traits;

pub use config::SessionConfig;
pub use error::EngineError;
pub use software::{LiveEqualizer, SoftwareSession};
pub use traits::{EqualizerHandle, PlaybackSession};

// Re-export DSP types used in the trait signatures
pub use sonora_dsp::{EqualizerSettings, Preset, PresetCatalog};
