//! Error types for instance loading, validation and result output.
//!
//! All fatal errors are raised while an instance is read or validated, before
//! the search starts. The search itself is total on a validated instance.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Structural problems detected while validating an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInstance {
    /// The instance contains no nodes or cells.
    EmptyInstance,
    /// A graph node without any incident edge.
    IsolatedNode(usize),
    /// An edge connecting a node with itself.
    SelfLoop(usize),
    /// `from` lists `to` as a neighbor but not the other way around.
    NotBidirectional { from: usize, to: usize },
    /// A given value appears twice within one row, column or block.
    DuplicateValue { group: String, value: u8 },
    /// A grid value outside `0..=size`.
    ValueOutOfRange { row: usize, col: usize, value: usize },
    /// The grid dimensions are not usable (e.g. size is not a square).
    BadDimension(String),
}

impl fmt::Display for InvalidInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInstance => write!(f, "instance is empty"),
            Self::IsolatedNode(node) => write!(f, "node {} is isolated", node),
            Self::SelfLoop(node) => write!(f, "node {} has an edge to itself", node),
            Self::NotBidirectional { from, to } => {
                write!(f, "connection between {} and {} isn't bidirectional", from, to)
            }
            Self::DuplicateValue { group, value } => {
                write!(f, "value {} appears more than once in {}", value, group)
            }
            Self::ValueOutOfRange { row, col, value } => {
                write!(f, "value {} at ({}, {}) is out of range", value, row, col)
            }
            Self::BadDimension(reason) => write!(f, "bad dimension: {}", reason),
        }
    }
}

/// The error type of the crate.
#[derive(Debug)]
pub enum Error {
    /// The instance file could not be opened or read.
    Io(io::Error),
    /// The instance text is malformed.
    Parse { line: usize, message: String },
    /// An index exceeds the configured capacity of the loader.
    IndexOutOfBounds { index: usize, max: usize },
    /// The instance violates a structural invariant.
    InvalidInstance(InvalidInstance),
    /// A result file could not be written. Not fatal for the search itself.
    OutputWrite { path: PathBuf, source: io::Error },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a parse error for a (1-based) line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Whether the error aborts a run, as opposed to only losing the output file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::OutputWrite { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Parse { line, message } => write!(f, "parse error at line {}: {}", line, message),
            Self::IndexOutOfBounds { index, max } => {
                write!(f, "index {} out of bounds (maximum {})", index, max)
            }
            Self::InvalidInstance(reason) => write!(f, "invalid instance: {}", reason),
            Self::OutputWrite { path, source } => {
                write!(f, "unable to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::OutputWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<InvalidInstance> for Error {
    fn from(e: InvalidInstance) -> Self {
        Error::InvalidInstance(e)
    }
}
