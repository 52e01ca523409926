//! graph — directed-network store: adjacency, two-path counts, attributes,
//! and snowball zones.
//!
//! Purpose
//! -------
//! Provide the single mutable network object shared between the MCMC
//! samplers and the change-statistic catalog. The samplers hold it by
//! exclusive reference and toggle arcs; change statistics hold it by shared
//! reference and only read.
//!
//! Key behaviors
//! -------------
//! - [`Digraph`] owns adjacency in both directions, a flat arc list for
//!   uniform arc sampling, and the two sparse two-path count maps that keep
//!   higher-order change statistics near-constant time.
//! - [`AttributeTable`] carries immutable typed node covariates (binary,
//!   categorical, continuous, set-valued) with explicit missing-data
//!   representations.
//! - [`SnowballZones`] carries the wave structure used by conditional
//!   estimation; `prev_wave_degree` is repaired in lockstep with toggles.
//! - [`GraphError`] / [`GraphResult`] give every mutation a checked
//!   precondition instead of silent corruption.

pub mod attributes;
pub mod digraph;
pub mod errors;
pub mod twopaths;
pub mod zones;

pub use self::attributes::{
    AttributeTable, BinaryAttribute, CategoricalAttribute, ContinuousAttribute, SetAttribute,
};
pub use self::digraph::Digraph;
pub use self::errors::{GraphError, GraphResult};
pub use self::twopaths::TwoPathCounts;
pub use self::zones::SnowballZones;
