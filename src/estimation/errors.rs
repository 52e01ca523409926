//! Umbrella error type for one estimation task.
//!
//! The driver touches every other layer — configuration, file loading, the
//! graph store — so its error type wraps theirs with `From` conversions and
//! the `?` operator carries them up to the CLI, which reports the message
//! and exits non-zero. No retries, no partial-state recovery: outputs
//! written before the failure stay on disk.
use crate::config::ConfigError;
use crate::graph::GraphError;
use crate::io::NetworkFileError;

/// Result alias for estimation tasks.
pub type EstimationResult<T> = Result<T, EstimationError>;

/// Any fatal error of one estimation task.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    /// Configuration syntax or semantics.
    Config(ConfigError),
    /// Network, attribute, zone, or output file failure.
    File(NetworkFileError),
    /// Graph-integrity violation.
    Graph(GraphError),
}

impl std::error::Error for EstimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EstimationError::Config(e) => Some(e),
            EstimationError::File(e) => Some(e),
            EstimationError::Graph(e) => Some(e),
        }
    }
}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationError::Config(e) => write!(f, "configuration error: {e}"),
            EstimationError::File(e) => write!(f, "file error: {e}"),
            EstimationError::Graph(e) => write!(f, "graph error: {e}"),
        }
    }
}

impl From<ConfigError> for EstimationError {
    fn from(err: ConfigError) -> EstimationError {
        EstimationError::Config(err)
    }
}

impl From<NetworkFileError> for EstimationError {
    fn from(err: NetworkFileError) -> EstimationError {
        EstimationError::File(err)
    }
}

impl From<GraphError> for EstimationError {
    fn from(err: GraphError) -> EstimationError {
        EstimationError::Graph(err)
    }
}
