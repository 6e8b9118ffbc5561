//! Error types for the diff engine.

use recount_metadata::MetadataError;

/// Errors that can abort a comparison.
///
/// All variants are fatal to the single `compare` call that raised them —
/// no partial result is returned — but no process-wide state is touched,
/// so unrelated comparisons are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Both instances were absent; a comparison needs at least one side.
    #[error("compare requires at least one instance")]
    MissingInstances,

    /// A declared metadata path did not resolve against a live instance.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
