//! Errors raised while handling `config.ron`.

use std::io;

/// Failures while locating, reading, validating or writing `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform exposes no configuration directory.
    #[error("no platform configuration directory available")]
    NoConfigDir,

    #[error("cannot read config file: {0}")]
    ReadError(#[source] io::Error),

    #[error("cannot write config file: {0}")]
    WriteError(#[source] io::Error),

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("malformed config file: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// A parsed value is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("cannot serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
