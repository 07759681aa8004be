use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Position in the SGF input. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}:")?;
        }
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Error)]
pub enum SgfError {
    /// Malformed structure: no root, unterminated value, unexpected token.
    #[error("{location}: {message}")]
    Structural { location: Location, message: String },
    /// Well-formed input the data model cannot represent.
    #[error("{location}: {message}")]
    Semantic { location: Location, message: String },
    #[error("IO error")]
    Io(#[source] io::Error),
    #[error("File not found")]
    FileNotFound(PathBuf),
    #[error("Could not reset SGF stream after charset change")]
    Reopen(#[source] io::Error),
    #[error("Out of memory")]
    OutOfMemory,
    #[error("Unknown character set: {0}")]
    UnknownCharset(String),
}

impl SgfError {
    /// Message without location, for structural and semantic errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            SgfError::Structural { message, .. } | SgfError::Semantic { message, .. } => {
                Some(message)
            }
            _ => None,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            SgfError::Structural { location, .. } | SgfError::Semantic { location, .. } => {
                Some(location)
            }
            _ => None,
        }
    }
}
