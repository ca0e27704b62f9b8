use std::path::PathBuf;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `phrasepool` can emit.
///
/// Depletion is not an error: running out of phrases is reported as
/// [`IssueStatus::Depleted`](crate::IssueStatus::Depleted).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A word category was empty, so no phrase can ever be composed.
    #[error("word category `{category}` must not be empty")]
    EmptyCategory { category: &'static str },

    /// More unique phrases were requested than the vocabulary can produce.
    #[error("cannot generate {requested} unique phrases, vocabulary only yields {available}")]
    NotEnoughPhrases { requested: usize, available: usize },

    /// The persisted collection (or a storage entry) could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted collection (or a storage entry) could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted data exists but is not the expected JSON shape.
    #[error("corrupt data in {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A storage backend rejected the operation for a reason of its own,
    /// e.g. an exceeded quota.
    #[error("storage unavailable: {reason}")]
    Storage { reason: String },
}
