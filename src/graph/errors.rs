//! Errors for the directed-graph store (toggle preconditions, attribute and
//! zone attachment).
//!
//! ## Conventions
//! - Node ids are 0-based `u32` values; `num_nodes` reports the valid range.
//! - Toggle operations have strict preconditions: `insert_arc` requires the
//!   arc to be absent, `remove_arc` requires it to be present. Violations are
//!   programming or data errors and surface as [`GraphError`] rather than
//!   being silently ignored.

/// Result alias for graph-store operations that may produce [`GraphError`].
pub type GraphResult<T> = Result<T, GraphError>;

/// Unified error type for the directed-graph store.
///
/// Covers arc toggle preconditions, node-id range checks, and consistency
/// checks performed when attribute tables or snowball zones are attached to
/// a graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An arc from a node to itself was requested.
    SelfLoop { node: u32 },

    /// A node id is outside `0..num_nodes`.
    NodeOutOfRange { node: u32, num_nodes: usize },

    /// `insert_arc` was called for an arc that already exists.
    DuplicateArc { from: u32, to: u32 },

    /// `remove_arc` was called for an arc that does not exist.
    MissingArc { from: u32, to: u32 },

    /// An attribute column does not have one value per node.
    AttributeLengthMismatch { name: String, expected: usize, actual: usize },

    /// The zone vector does not have one entry per node.
    ZoneLengthMismatch { expected: usize, actual: usize },

    /// Zone indices do not form a contiguous range `0..=max_zone`.
    NonContiguousZones { missing_zone: u32 },

    /// A node in wave `zone > 0` has no neighbour in the preceding wave,
    /// which cannot arise from a snowball sample.
    DisconnectedFromPreviousWave { node: u32, zone: u32 },
}

impl std::error::Error for GraphError {}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::SelfLoop { node } => {
                write!(f, "Self-loop on node {node} is not allowed in a directed graph.")
            }
            GraphError::NodeOutOfRange { node, num_nodes } => {
                write!(f, "Node id {node} is out of range for a graph with {num_nodes} nodes.")
            }
            GraphError::DuplicateArc { from, to } => {
                write!(f, "Arc {from} -> {to} already exists.")
            }
            GraphError::MissingArc { from, to } => {
                write!(f, "Arc {from} -> {to} does not exist.")
            }
            GraphError::AttributeLengthMismatch { name, expected, actual } => {
                write!(
                    f,
                    "Attribute column '{name}' has {actual} values but the graph has {expected} nodes."
                )
            }
            GraphError::ZoneLengthMismatch { expected, actual } => {
                write!(f, "Zone file has {actual} entries but the graph has {expected} nodes.")
            }
            GraphError::NonContiguousZones { missing_zone } => {
                write!(f, "Snowball zones must be contiguous; no node has zone {missing_zone}.")
            }
            GraphError::DisconnectedFromPreviousWave { node, zone } => {
                write!(
                    f,
                    "Node {node} in wave {zone} has no neighbour in wave {}.",
                    zone - 1
                )
            }
        }
    }
}
