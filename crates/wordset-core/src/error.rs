//! Error types for word set construction

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`WordSet`](crate::WordSet)
#[derive(Error, Debug)]
pub enum WordSetError {
    #[error("target chain length must be non-zero")]
    ZeroChainLength,

    #[error("invalid table parameter: {0}")]
    InvalidParams(&'static str),

    #[error("alphabet must contain at least one character")]
    EmptyAlphabet,

    #[error("source path is empty")]
    EmptySource,

    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("cannot read source {}: {source}", .path.display())]
    Unreadable { path: PathBuf, source: io::Error },

    #[error("source is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("malformed lemma table: {0}")]
    InvalidLemmaTable(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl WordSetError {
    /// True for errors caused by bad construction parameters, as opposed
    /// to failures reported by the source stream while scanning.
    pub fn is_config(&self) -> bool {
        !matches!(self, WordSetError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, WordSetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_classification() {
        assert!(WordSetError::ZeroChainLength.is_config());
        assert!(WordSetError::EmptySource.is_config());
        assert!(WordSetError::SourceNotFound(PathBuf::from("missing.txt")).is_config());
        assert!(WordSetError::Unreadable {
            path: PathBuf::from("locked.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .is_config());

        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "read failed");
        assert!(!WordSetError::from(io_err).is_config());
    }

    #[test]
    fn test_display() {
        let err = WordSetError::SourceNotFound(PathBuf::from("/tmp/nope.txt"));
        assert_eq!(err.to_string(), "source not found: /tmp/nope.txt");
    }
}
