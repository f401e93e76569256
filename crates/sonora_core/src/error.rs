//! Controller Error Types

use thiserror::Error;

use sonora_engine::EngineError;

/// Errors surfaced by equalizer controller operations
///
/// Out-of-range indices are never errors: queries answer with sentinels or
/// `None`, and edits are silently ignored.
#[derive(Error, Debug)]
pub enum EqualizerError {
    #[error("No equalizer is bound to the playback session")]
    NotBound,

    #[error("Failed to bind equalizer: {0}")]
    BindFailed(#[source] EngineError),

    #[error("Engine rejected equalizer settings: {0}")]
    CommitFailed(#[source] EngineError),
}

/// Result type alias for controller operations
pub type EqualizerResult<T> = Result<T, EqualizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EqualizerError::NotBound;
        assert!(err.to_string().contains("No equalizer"));

        let err = EqualizerError::BindFailed(EngineError::EqualizerUnsupported("Radio".into()));
        assert!(err.to_string().contains("Radio"));

        let err = EqualizerError::CommitFailed(EngineError::StaleHandle(9));
        assert!(err.to_string().contains("rejected"));
    }

    #[test]
    fn test_error_source() {
        use std::error::Error as _;

        let err = EqualizerError::CommitFailed(EngineError::StaleHandle(3));
        assert!(err.source().is_some());
        assert!(EqualizerError::NotBound.source().is_none());
    }
}
