//! Crate-level error types.

use std::fmt;

/// Errors produced by the evergreen crate.
///
/// The animation core itself never fails: numeric inputs are clamped. These
/// variants cover the edges of the crate (configuration files, photo
/// discovery, one-shot photo attachment).
#[derive(Debug)]
pub enum EvergreenError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but describe an unusable configuration.
    InvalidOptions(String),
    /// Photos were already attached to the focus subsystem.
    PhotosAlreadyAttached,
}

impl fmt::Display for EvergreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::PhotosAlreadyAttached => {
                write!(f, "photos were already attached to the scene")
            }
        }
    }
}

impl std::error::Error for EvergreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EvergreenError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
