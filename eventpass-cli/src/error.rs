//! Error types emitted by the EventPass CLI.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the EventPass CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// A referenced input file could not be read.
    #[error("failed to read {field} file {path:?}: {source}")]
    ReadInput {
        /// Which argument named the file.
        field: &'static str,
        /// The path that failed.
        path: Utf8PathBuf,
        /// The underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The events payload could not be decoded.
    #[error("failed to parse events JSON at {path:?}: {source}")]
    ParseEvents {
        /// The path that failed.
        path: Utf8PathBuf,
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// The profile payload could not be decoded.
    #[error("failed to parse profile JSON at {path:?}: {source}")]
    ParseProfile {
        /// The path that failed.
        path: Utf8PathBuf,
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// The `--now` argument is not an RFC 3339 timestamp.
    #[error("failed to parse --now value {value:?}: {source}")]
    ParseTimestamp {
        /// The rejected argument text.
        value: String,
        /// The underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },
    /// Serializing the output payload failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the output to stdout failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
