//! Crate-level error types.

use std::fmt;

/// Errors produced by the freecam crate.
#[derive(Debug)]
pub enum FreeCamError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Replay script parsing failure.
    ScriptParse(String),
}

impl fmt::Display for FreeCamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::ScriptParse(msg) => {
                write!(f, "replay script parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for FreeCamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FreeCamError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
