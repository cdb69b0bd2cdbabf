//! Error types for the turn-order engine and its console.
//!
//! Engine mutators never fail; these errors only cover the edges around
//! the engine (parsing names, snapshots, console input, rosters).

/// Errors that can occur around encounter tracking.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// A participant category name could not be parsed.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A snapshot was written with a schema version this build cannot read.
    #[error("unsupported snapshot version: {0}")]
    UnsupportedSnapshotVersion(u32),

    /// A snapshot or roster could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A console command received a malformed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A console command was not recognized.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A roster could not be loaded.
    #[error("roster error: {0}")]
    Roster(String),
}

/// Convenience result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            TrackerError::UnknownCategory("dragon".to_string()).to_string(),
            "unknown category: dragon"
        );
        assert_eq!(
            TrackerError::UnsupportedSnapshotVersion(9).to_string(),
            "unsupported snapshot version: 9"
        );
    }

    #[test]
    fn from_serde_json() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: TrackerError = err.into();
        assert!(matches!(err, TrackerError::Serialization(_)));
    }
}
