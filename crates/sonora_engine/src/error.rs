//! Engine Error Types

use thiserror::Error;

/// Errors reported by a playback session
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Playback session '{0}' has no equalizer support")]
    EqualizerUnsupported(String),

    #[error("An equalizer is already bound to playback session '{0}'")]
    EqualizerInUse(String),

    #[error("Equalizer handle {0} is not bound to this session")]
    StaleHandle(u64),

    #[error("Band count mismatch: session has {expected} bands, settings carry {got}")]
    BandCountMismatch { expected: usize, got: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("DSP error: {0}")]
    Dsp(#[from] sonora_dsp::DspError),
}
