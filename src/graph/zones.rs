//! Snowball-sampling zones.
//!
//! Purpose
//! -------
//! Carry the wave structure of a snowball sample: each node's zone index
//! (0 = seed set, `max_zone` = outermost observed wave), the list of inner
//! nodes eligible for conditional-estimation proposals, and each node's
//! count of distinct neighbours in the preceding wave.
//!
//! Invariants
//! ----------
//! - Zones form a contiguous range `0..=max_zone`.
//! - `inner_nodes` lists exactly the nodes with `zone < max_zone`.
//! - `prev_wave_degree[v] = |{u : (u, v) or (v, u) in arcs, zone[u] =
//!   zone[v] - 1}|`, counting each neighbour once regardless of arc
//!   direction or mutuality. The graph store repairs this count in lockstep
//!   with arc toggles.
//!
//! The snowball procedure is assumed to ignore arc direction, so every rule
//! here treats the graph as undirected.
use crate::graph::errors::{GraphError, GraphResult};

/// Wave structure of a snowball sample attached to a directed graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowballZones {
    /// Zone (wave) index per node.
    pub zone: Vec<u32>,
    /// The outermost observed wave.
    pub max_zone: u32,
    /// Nodes with `zone < max_zone`, eligible for conditional proposals.
    pub inner_nodes: Vec<u32>,
    /// Count of distinct neighbours in the preceding wave, per node.
    pub prev_wave_degree: Vec<u32>,
}

impl SnowballZones {
    /// Build the zone structure from a per-node zone vector.
    ///
    /// Validates contiguity (every zone in `0..=max_zone` is inhabited) and
    /// derives `inner_nodes`. `prev_wave_degree` starts at zero; it is
    /// populated by [`crate::graph::Digraph::attach_zones`], which can see
    /// the arcs.
    ///
    /// # Errors
    /// - [`GraphError::NonContiguousZones`] if some zone in the range has no
    ///   nodes.
    pub fn new(zone: Vec<u32>) -> GraphResult<SnowballZones> {
        let max_zone = zone.iter().copied().max().unwrap_or(0);
        for z in 0..=max_zone {
            if !zone.iter().any(|&v| v == z) {
                return Err(GraphError::NonContiguousZones { missing_zone: z });
            }
        }
        let inner_nodes: Vec<u32> = (0..zone.len() as u32).filter(|&v| zone[v as usize] < max_zone).collect();
        let prev_wave_degree = vec![0; zone.len()];
        Ok(SnowballZones { zone, max_zone, inner_nodes, prev_wave_degree })
    }

    /// Number of inner nodes.
    pub fn num_inner_nodes(&self) -> usize {
        self.inner_nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_nodes_exclude_the_outermost_wave() {
        let zones = SnowballZones::new(vec![0, 0, 1, 1, 2, 2]).unwrap();
        assert_eq!(zones.max_zone, 2);
        assert_eq!(zones.inner_nodes, vec![0, 1, 2, 3]);
        assert_eq!(zones.num_inner_nodes(), 4);
    }

    #[test]
    fn single_wave_sample_has_every_node_outer() {
        // All nodes in zone 0: max_zone = 0, so nothing is "inner".
        let zones = SnowballZones::new(vec![0, 0, 0]).unwrap();
        assert_eq!(zones.max_zone, 0);
        assert!(zones.inner_nodes.is_empty());
    }

    #[test]
    fn gap_in_zone_range_is_rejected() {
        let err = SnowballZones::new(vec![0, 0, 2]).unwrap_err();
        assert_eq!(err, GraphError::NonContiguousZones { missing_zone: 1 });
    }
}
