// Error taxonomy for corpus builds.
//
// Only two kinds of failure are recoverable, and both are handled inside
// the generation loops as ordinary values: structured render failures and
// filter/dedup rejections. Everything surfacing as `BuildError` is fatal,
// aborts the run, and leaves no partial manifest.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    /// Malformed or out-of-range CLI value. Reported before any work.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required capability is unusable (e.g. the word engine exposes no
    /// usable roots). Reported before any work.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// An attempt budget ran out before a quota was met. Carries the
    /// attempted count and a remediation hint.
    #[error("generation exhausted after {attempts} attempts: {hint}")]
    GenerationExhausted { attempts: u64, hint: String },

    /// Internal consistency failure (e.g. no usable global target height).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
