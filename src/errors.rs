//! Error types for the compile pipeline.
//!
//! Every failure a stage can produce is a `CompileError` variant, so the
//! pipeline boundary can log one value and `try_compile` callers can match
//! on the category. The binary and command handlers stay on `anyhow` at the
//! outermost layer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// Invalid options, detected before any filesystem operation.
    #[error("configuration error: {0}")]
    Config(String),

    /// A plugin name that the registry cannot resolve.
    #[error("Cannot load plugin '{0}'")]
    Plugin(String),

    /// A filesystem operation failed on a specific path.
    #[error("{op} failed for '{}': {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying the source tree into the target folder failed. Fatal to the
    /// whole pipeline; no partial-copy repair is attempted.
    #[error("failed to copy '{}' to '{}': {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File enumeration under the working directory failed.
    #[error("cannot walk '{}': {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// tree-sitter could not produce a syntax tree for a JavaScript file.
    #[error("cannot parse JavaScript in '{}'", .path.display())]
    JsParse { path: PathBuf },

    /// A stage was invoked before an earlier stage produced its input.
    #[error("pipeline state field '{0}' requested before any stage produced it")]
    MissingStageInput(&'static str),
}

impl CompileError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// True for errors that are reported before the pipeline touches the
    /// filesystem.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Plugin(_))
    }
}
