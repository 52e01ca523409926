//! Errors for network, attribute, and zone file handling.
//!
//! Every variant carries the offending path, and format violations carry
//! the 1-based line number, so fatal errors can be reported against the
//! exact input location. I/O failures store the rendered `std::io::Error`
//! message rather than the source value, keeping the enum cheap to clone
//! and compare in tests.
use std::path::PathBuf;

/// Result alias for file loading and writing.
pub type FileResult<T> = Result<T, NetworkFileError>;

/// Unified error type for Pajek arc lists, attribute files, and zone files.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkFileError {
    /// Underlying I/O failure (open, read, write, flush).
    Io { path: PathBuf, message: String },

    /// Pajek file does not start with a `*Vertices N` header.
    MissingVerticesHeader { path: PathBuf, line: usize },

    /// Pajek file has no `*Arcs` section.
    MissingArcsHeader { path: PathBuf },

    /// The vertex count in the `*Vertices` header is not a positive integer.
    BadVertexCount { path: PathBuf, line: usize, token: String },

    /// An arc line does not hold two node ids.
    BadArcLine { path: PathBuf, line: usize, content: String },

    /// An arc references a node outside `1..=num_nodes`.
    NodeOutOfRange { path: PathBuf, line: usize, node: i64, num_nodes: usize },

    /// A self-loop appears in the arc list.
    SelfLoop { path: PathBuf, line: usize, node: u32 },

    /// The same arc appears twice in the arc list.
    DuplicateArc { path: PathBuf, line: usize, from: u32, to: u32 },

    /// An attribute or zone file is empty (no header row).
    MissingHeader { path: PathBuf },

    /// A data row holds a different number of cells than the header.
    ColumnCountMismatch { path: PathBuf, line: usize, expected: usize, actual: usize },

    /// A cell cannot be parsed as the column's type.
    BadToken {
        path: PathBuf,
        line: usize,
        column: String,
        token: String,
        expected: &'static str,
    },
}

impl std::error::Error for NetworkFileError {}

impl std::fmt::Display for NetworkFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkFileError::Io { path, message } => {
                write!(f, "I/O error on {}: {message}", path.display())
            }
            NetworkFileError::MissingVerticesHeader { path, line } => {
                write!(f, "{}:{line}: expected '*Vertices N' header.", path.display())
            }
            NetworkFileError::MissingArcsHeader { path } => {
                write!(f, "{}: no '*Arcs' section found.", path.display())
            }
            NetworkFileError::BadVertexCount { path, line, token } => {
                write!(
                    f,
                    "{}:{line}: vertex count '{token}' is not a positive integer.",
                    path.display()
                )
            }
            NetworkFileError::BadArcLine { path, line, content } => {
                write!(f, "{}:{line}: expected 'i j' arc pair, got '{content}'.", path.display())
            }
            NetworkFileError::NodeOutOfRange { path, line, node, num_nodes } => {
                write!(
                    f,
                    "{}:{line}: node id {node} outside 1..={num_nodes}.",
                    path.display()
                )
            }
            NetworkFileError::SelfLoop { path, line, node } => {
                write!(f, "{}:{line}: self-loop on node {node} is not allowed.", path.display())
            }
            NetworkFileError::DuplicateArc { path, line, from, to } => {
                write!(f, "{}:{line}: duplicate arc {from} -> {to}.", path.display())
            }
            NetworkFileError::MissingHeader { path } => {
                write!(f, "{}: file is empty, expected a header row.", path.display())
            }
            NetworkFileError::ColumnCountMismatch { path, line, expected, actual } => {
                write!(
                    f,
                    "{}:{line}: row has {actual} cells but the header names {expected} columns.",
                    path.display()
                )
            }
            NetworkFileError::BadToken { path, line, column, token, expected } => {
                write!(
                    f,
                    "{}:{line}: cell '{token}' in column '{column}' is not {expected}.",
                    path.display()
                )
            }
        }
    }
}

impl NetworkFileError {
    /// Wrap a `std::io::Error` with the path it occurred on.
    pub fn io(path: &std::path::Path, err: std::io::Error) -> NetworkFileError {
        NetworkFileError::Io { path: path.to_path_buf(), message: err.to_string() }
    }
}
