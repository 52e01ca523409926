//! Directed-graph store with incremental two-path bookkeeping.
//!
//! Purpose
//! -------
//! Own the mutable network state shared between the MCMC samplers and the
//! change-statistic catalog: adjacency in both directions, a flat arc list
//! for uniform arc sampling and Pajek output, sparse two-path count maps,
//! node attributes, and optional snowball zones.
//!
//! Key behaviors
//! -------------
//! - `is_arc` and arc toggles are O(1) on the hash index; the adjacency
//!   lists pay O(degree) for removal by swap-remove.
//! - Every `insert_arc` / `remove_arc` updates the two-path maps in
//!   O(degree) so change statistics read them in constant time, and repairs
//!   `prev_wave_degree` when snowball zones are attached.
//! - The flat arc list is kept consistent on every toggle. (The reference
//!   implementation let its copy go stale inside the basic sampler; the IFD
//!   delete proposal and the consistency invariant both need it live.)
//!
//! Invariants & assumptions
//! ------------------------
//! - No self-loops, no duplicate arcs; node ids lie in `0..num_nodes`.
//! - `directed_paths[(i, j)]` equals `|{k : i->k and k->j}|` and
//!   `mixed_paths[(i, j)]` equals `|{k : i->k and j->k}|` for every ordered
//!   pair, at every step; the mixed map is stored symmetrically.
//! - `prev_wave_degree` counts *distinct* neighbours ignoring direction, so
//!   the repair only fires when the reverse arc is absent.
//!
//! Conventions
//! -----------
//! - `insert_arc` scans adjacency *before* inserting and `remove_arc` scans
//!   *after* removing, so both sides of a toggle see identical neighbour
//!   sets and the count updates mirror exactly.
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::graph::attributes::AttributeTable;
use crate::graph::errors::{GraphError, GraphResult};
use crate::graph::twopaths::TwoPathCounts;
use crate::graph::zones::SnowballZones;

/// Directed graph over nodes `0..num_nodes` with per-node attributes,
/// incremental two-path counts, and optional snowball zones.
#[derive(Debug, Clone)]
pub struct Digraph {
    num_nodes: usize,
    out_neighbours: Vec<Vec<u32>>,
    in_neighbours: Vec<Vec<u32>>,
    arcs: Vec<(u32, u32)>,
    arc_pos: FxHashMap<(u32, u32), usize>,
    directed_paths: TwoPathCounts,
    mixed_paths: TwoPathCounts,
    attrs: AttributeTable,
    zones: Option<SnowballZones>,
}

impl Digraph {
    /// Construct an empty graph on `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> Digraph {
        Digraph {
            num_nodes,
            out_neighbours: vec![Vec::new(); num_nodes],
            in_neighbours: vec![Vec::new(); num_nodes],
            arcs: Vec::new(),
            arc_pos: FxHashMap::default(),
            directed_paths: TwoPathCounts::new(),
            mixed_paths: TwoPathCounts::new(),
            attrs: AttributeTable::new(),
            zones: None,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Number of ordered dyads excluding loops: `n (n - 1)`.
    pub fn num_dyads(&self) -> usize {
        self.num_nodes * self.num_nodes.saturating_sub(1)
    }

    /// Current density `L / n(n - 1)`.
    pub fn density(&self) -> f64 {
        self.arcs.len() as f64 / self.num_dyads() as f64
    }

    #[inline]
    pub fn is_arc(&self, i: u32, j: u32) -> bool {
        self.arc_pos.contains_key(&(i, j))
    }

    #[inline]
    pub fn is_arc_ignore_direction(&self, i: u32, j: u32) -> bool {
        self.is_arc(i, j) || self.is_arc(j, i)
    }

    #[inline]
    pub fn out_degree(&self, i: u32) -> usize {
        self.out_neighbours[i as usize].len()
    }

    #[inline]
    pub fn in_degree(&self, i: u32) -> usize {
        self.in_neighbours[i as usize].len()
    }

    #[inline]
    pub fn out_neighbours(&self, i: u32) -> &[u32] {
        &self.out_neighbours[i as usize]
    }

    #[inline]
    pub fn in_neighbours(&self, i: u32) -> &[u32] {
        &self.in_neighbours[i as usize]
    }

    /// The arc set as a flat slice, in insertion-perturbed order.
    pub fn arcs(&self) -> &[(u32, u32)] {
        &self.arcs
    }

    /// A uniformly random existing arc, or `None` on an empty graph.
    pub fn random_arc<R: Rng>(&self, rng: &mut R) -> Option<(u32, u32)> {
        if self.arcs.is_empty() {
            return None;
        }
        Some(self.arcs[rng.gen_range(0..self.arcs.len())])
    }

    /// Count of directed two-paths `i -> k -> j`.
    #[inline]
    pub fn directed_two_paths(&self, i: u32, j: u32) -> u32 {
        self.directed_paths.get(i, j)
    }

    /// Count of mixed two-paths `i -> k <- j` (symmetric in `i`, `j`).
    #[inline]
    pub fn mixed_two_paths(&self, i: u32, j: u32) -> u32 {
        self.mixed_paths.get(i, j)
    }

    pub fn attributes(&self) -> &AttributeTable {
        &self.attrs
    }

    pub fn zones(&self) -> Option<&SnowballZones> {
        self.zones.as_ref()
    }

    /// IFD arc-count correction `ln(L / (N - L))` with `N = n(n - 1)`.
    pub fn arc_correction(&self) -> f64 {
        let arcs = self.arcs.len() as f64;
        let dyads = self.num_dyads() as f64;
        (arcs / (dyads - arcs)).ln()
    }

    /// Attach node attributes, validating one value per node in every column.
    ///
    /// # Errors
    /// - [`GraphError::AttributeLengthMismatch`] naming the first offending
    ///   column.
    pub fn attach_attributes(&mut self, attrs: AttributeTable) -> GraphResult<()> {
        for (name, len) in attrs.column_lengths() {
            if len != self.num_nodes {
                return Err(GraphError::AttributeLengthMismatch {
                    name: name.to_string(),
                    expected: self.num_nodes,
                    actual: len,
                });
            }
        }
        self.attrs = attrs;
        Ok(())
    }

    /// Attach snowball zones, computing `prev_wave_degree` from the current
    /// arc set and validating the snowball structure.
    ///
    /// # Errors
    /// - [`GraphError::ZoneLengthMismatch`] if the zone vector length is not
    ///   `num_nodes`.
    /// - [`GraphError::DisconnectedFromPreviousWave`] if some node in wave
    ///   `z > 0` has no neighbour in wave `z - 1`.
    pub fn attach_zones(&mut self, mut zones: SnowballZones) -> GraphResult<()> {
        if zones.zone.len() != self.num_nodes {
            return Err(GraphError::ZoneLengthMismatch {
                expected: self.num_nodes,
                actual: zones.zone.len(),
            });
        }
        for v in 0..self.num_nodes as u32 {
            let wave = zones.zone[v as usize];
            let mut degree = 0;
            for &u in self.out_neighbours(v) {
                if zones.zone[u as usize] + 1 == wave {
                    degree += 1;
                }
            }
            for &u in self.in_neighbours(v) {
                // A mutual dyad is one neighbour, already counted above.
                if zones.zone[u as usize] + 1 == wave && !self.is_arc(v, u) {
                    degree += 1;
                }
            }
            if wave > 0 && degree == 0 {
                return Err(GraphError::DisconnectedFromPreviousWave { node: v, zone: wave });
            }
            zones.prev_wave_degree[v as usize] = degree;
        }
        self.zones = Some(zones);
        Ok(())
    }

    /// Insert arc `i -> j`.
    ///
    /// Precondition: the arc is absent. Updates adjacency, the flat arc
    /// list, both two-path maps, and `prev_wave_degree` when zones are
    /// attached.
    ///
    /// # Errors
    /// - [`GraphError::SelfLoop`], [`GraphError::NodeOutOfRange`],
    ///   [`GraphError::DuplicateArc`].
    pub fn insert_arc(&mut self, i: u32, j: u32) -> GraphResult<()> {
        self.check_dyad(i, j)?;
        if self.is_arc(i, j) {
            return Err(GraphError::DuplicateArc { from: i, to: j });
        }

        // Two-path counts from the pre-insertion adjacency: the new arc as
        // first leg (i -> j -> k), as second leg (k -> i -> j), and as one
        // side of a shared target (i -> j <- a).
        for idx in 0..self.out_neighbours[j as usize].len() {
            let k = self.out_neighbours[j as usize][idx];
            self.directed_paths.increment(i, k);
        }
        for idx in 0..self.in_neighbours[i as usize].len() {
            let k = self.in_neighbours[i as usize][idx];
            self.directed_paths.increment(k, j);
        }
        for idx in 0..self.in_neighbours[j as usize].len() {
            let a = self.in_neighbours[j as usize][idx];
            self.mixed_paths.increment(i, a);
            self.mixed_paths.increment(a, i);
        }

        self.out_neighbours[i as usize].push(j);
        self.in_neighbours[j as usize].push(i);
        self.arc_pos.insert((i, j), self.arcs.len());
        self.arcs.push((i, j));

        if self.zones.is_some() && !self.is_arc(j, i) {
            self.repair_prev_wave_degree(i, j, 1);
        }
        Ok(())
    }

    /// Remove arc `i -> j`.
    ///
    /// Precondition: the arc is present. Mirrors [`Digraph::insert_arc`]
    /// exactly, so a toggle pair is the identity on every auxiliary
    /// structure.
    ///
    /// # Errors
    /// - [`GraphError::SelfLoop`], [`GraphError::NodeOutOfRange`],
    ///   [`GraphError::MissingArc`].
    pub fn remove_arc(&mut self, i: u32, j: u32) -> GraphResult<()> {
        self.check_dyad(i, j)?;
        let pos = match self.arc_pos.remove(&(i, j)) {
            Some(pos) => pos,
            None => return Err(GraphError::MissingArc { from: i, to: j }),
        };

        self.arcs.swap_remove(pos);
        if pos < self.arcs.len() {
            let moved = self.arcs[pos];
            self.arc_pos.insert(moved, pos);
        }
        swap_remove_value(&mut self.out_neighbours[i as usize], j);
        swap_remove_value(&mut self.in_neighbours[j as usize], i);

        // Post-removal adjacency excludes the toggled arc, matching the
        // pre-insertion scans above.
        for idx in 0..self.out_neighbours[j as usize].len() {
            let k = self.out_neighbours[j as usize][idx];
            self.directed_paths.decrement(i, k);
        }
        for idx in 0..self.in_neighbours[i as usize].len() {
            let k = self.in_neighbours[i as usize][idx];
            self.directed_paths.decrement(k, j);
        }
        for idx in 0..self.in_neighbours[j as usize].len() {
            let a = self.in_neighbours[j as usize][idx];
            self.mixed_paths.decrement(i, a);
            self.mixed_paths.decrement(a, i);
        }

        if self.zones.is_some() && !self.is_arc(j, i) {
            self.repair_prev_wave_degree(i, j, -1);
        }
        Ok(())
    }

    fn check_dyad(&self, i: u32, j: u32) -> GraphResult<()> {
        if i == j {
            return Err(GraphError::SelfLoop { node: i });
        }
        for node in [i, j] {
            if node as usize >= self.num_nodes {
                return Err(GraphError::NodeOutOfRange { node, num_nodes: self.num_nodes });
            }
        }
        Ok(())
    }

    /// Adjust `prev_wave_degree` for the endpoints of a toggled dyad whose
    /// nodes just became (or stopped being) neighbours.
    fn repair_prev_wave_degree(&mut self, i: u32, j: u32, delta: i32) {
        let zones = self.zones.as_mut().expect("zones checked by caller");
        let (zi, zj) = (zones.zone[i as usize], zones.zone[j as usize]);
        if zi + 1 == zj {
            let degree = &mut zones.prev_wave_degree[j as usize];
            *degree = degree.wrapping_add_signed(delta);
        } else if zj + 1 == zi {
            let degree = &mut zones.prev_wave_degree[i as usize];
            *degree = degree.wrapping_add_signed(delta);
        }
    }
}

/// Remove the first occurrence of `value` from `list` by swap-remove.
fn swap_remove_value(list: &mut Vec<u32>, value: u32) {
    let pos = list.iter().position(|&v| v == value).expect("adjacency consistent with arc index");
    list.swap_remove(pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::zones::SnowballZones;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Arc toggle preconditions and adjacency consistency.
    // - Incremental two-path counts against a from-scratch recount, on
    //   random graphs under random toggles.
    // - prev_wave_degree repair under snowball zones, including mutual dyads.
    // - arc_correction values.
    // -------------------------------------------------------------------------

    /// Brute-force recount of both two-path definitions.
    fn recount_two_paths(g: &Digraph) -> (TwoPathCounts, TwoPathCounts) {
        let mut directed = TwoPathCounts::new();
        let mut mixed = TwoPathCounts::new();
        for &(i, k) in g.arcs() {
            for &j in g.out_neighbours(k) {
                directed.increment(i, j);
            }
        }
        for &(i, k) in g.arcs() {
            for &j in g.in_neighbours(k) {
                if j != i {
                    mixed.increment(i, j);
                }
            }
        }
        (directed, mixed)
    }

    fn assert_two_paths_consistent(g: &Digraph) {
        let (directed, mixed) = recount_two_paths(g);
        assert_eq!(g.directed_paths.num_entries(), directed.num_entries());
        for (&(i, j), &count) in directed.iter() {
            assert_eq!(g.directed_two_paths(i, j), count, "directed two-paths at ({i}, {j})");
        }
        assert_eq!(g.mixed_paths.num_entries(), mixed.num_entries());
        for (&(i, j), &count) in mixed.iter() {
            assert_eq!(g.mixed_two_paths(i, j), count, "mixed two-paths at ({i}, {j})");
        }
    }

    #[test]
    fn insert_and_remove_maintain_adjacency_and_arc_list() {
        let mut g = Digraph::new(4);
        g.insert_arc(0, 1).unwrap();
        g.insert_arc(1, 2).unwrap();
        g.insert_arc(0, 2).unwrap();

        assert!(g.is_arc(0, 1));
        assert!(!g.is_arc(1, 0));
        assert!(g.is_arc_ignore_direction(1, 0));
        assert_eq!(g.num_arcs(), 3);
        assert_eq!(g.out_degree(0), 2);
        assert_eq!(g.in_degree(2), 2);

        g.remove_arc(0, 1).unwrap();
        assert!(!g.is_arc(0, 1));
        assert_eq!(g.num_arcs(), 2);
        assert_eq!(g.out_degree(0), 1);
        assert!(g.arcs().contains(&(1, 2)));
        assert!(g.arcs().contains(&(0, 2)));
    }

    #[test]
    fn toggle_preconditions_are_enforced() {
        let mut g = Digraph::new(3);
        assert_eq!(g.insert_arc(1, 1).unwrap_err(), GraphError::SelfLoop { node: 1 });
        assert_eq!(
            g.insert_arc(0, 5).unwrap_err(),
            GraphError::NodeOutOfRange { node: 5, num_nodes: 3 }
        );
        g.insert_arc(0, 1).unwrap();
        assert_eq!(g.insert_arc(0, 1).unwrap_err(), GraphError::DuplicateArc { from: 0, to: 1 });
        assert_eq!(g.remove_arc(1, 0).unwrap_err(), GraphError::MissingArc { from: 1, to: 0 });
    }

    #[test]
    fn two_path_counts_match_recount_after_random_toggles() {
        let mut rng = StdRng::seed_from_u64(314159);
        let n: u32 = 12;
        let mut g = Digraph::new(n as usize);
        for _ in 0..400 {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            if i == j {
                continue;
            }
            if g.is_arc(i, j) {
                g.remove_arc(i, j).unwrap();
            } else {
                g.insert_arc(i, j).unwrap();
            }
        }
        assert_two_paths_consistent(&g);

        // Toggle a pair back and forth: auxiliary state must be identical.
        let before_directed = g.directed_paths.num_entries();
        let before_mixed = g.mixed_paths.num_entries();
        let toggled = !g.is_arc(0, 1);
        if toggled {
            g.insert_arc(0, 1).unwrap();
            g.remove_arc(0, 1).unwrap();
        } else {
            g.remove_arc(0, 1).unwrap();
            g.insert_arc(0, 1).unwrap();
        }
        assert_eq!(g.directed_paths.num_entries(), before_directed);
        assert_eq!(g.mixed_paths.num_entries(), before_mixed);
        assert_two_paths_consistent(&g);
    }

    #[test]
    fn arc_correction_matches_definition() {
        let mut g = Digraph::new(4); // 12 ordered dyads
        g.insert_arc(0, 1).unwrap();
        g.insert_arc(1, 2).unwrap();
        g.insert_arc(2, 3).unwrap();
        let expected = (3.0f64 / 9.0).ln();
        approx::assert_abs_diff_eq!(g.arc_correction(), expected, epsilon = 1e-12);
    }

    #[test]
    fn random_arc_draws_existing_arcs_uniformly_enough() {
        let mut g = Digraph::new(5);
        g.insert_arc(0, 1).unwrap();
        g.insert_arc(2, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let arc = g.random_arc(&mut rng).unwrap();
            assert!(g.is_arc(arc.0, arc.1));
        }
        assert_eq!(Digraph::new(3).random_arc(&mut rng), None);
    }

    #[test]
    fn attach_zones_computes_prev_wave_degree_and_validates_structure() {
        // 0,1 in wave 0; 2,3 in wave 1; 4 in wave 2.
        let mut g = Digraph::new(5);
        g.insert_arc(0, 2).unwrap();
        g.insert_arc(2, 0).unwrap(); // mutual dyad: one neighbour, not two
        g.insert_arc(1, 3).unwrap();
        g.insert_arc(3, 4).unwrap();
        let zones = SnowballZones::new(vec![0, 0, 1, 1, 2]).unwrap();
        g.attach_zones(zones).unwrap();

        let zones = g.zones().unwrap();
        assert_eq!(zones.prev_wave_degree[2], 1);
        assert_eq!(zones.prev_wave_degree[3], 1);
        assert_eq!(zones.prev_wave_degree[4], 1);
        assert_eq!(zones.prev_wave_degree[0], 0);

        // Wave-2 node with no wave-1 neighbour is rejected.
        let mut bad = Digraph::new(3);
        bad.insert_arc(0, 1).unwrap();
        let zones = SnowballZones::new(vec![0, 1, 2]).unwrap();
        assert_eq!(
            bad.attach_zones(zones).unwrap_err(),
            GraphError::DisconnectedFromPreviousWave { node: 2, zone: 2 }
        );
    }

    #[test]
    fn prev_wave_degree_tracks_toggles_including_mutual_dyads() {
        let mut g = Digraph::new(4);
        g.insert_arc(0, 2).unwrap();
        g.insert_arc(1, 3).unwrap();
        g.attach_zones(SnowballZones::new(vec![0, 0, 1, 1]).unwrap()).unwrap();
        assert_eq!(g.zones().unwrap().prev_wave_degree[2], 1);

        // New cross-wave arc raises the count.
        g.insert_arc(1, 2).unwrap();
        assert_eq!(g.zones().unwrap().prev_wave_degree[2], 2);

        // Reverse arc over an existing dyad must not double-count.
        g.insert_arc(2, 0).unwrap();
        assert_eq!(g.zones().unwrap().prev_wave_degree[2], 2);

        // Removing one direction of the mutual dyad keeps the neighbour.
        g.remove_arc(0, 2).unwrap();
        assert_eq!(g.zones().unwrap().prev_wave_degree[2], 2);

        // Removing the last direction drops it.
        g.remove_arc(2, 0).unwrap();
        assert_eq!(g.zones().unwrap().prev_wave_degree[2], 1);
    }

    #[test]
    fn attach_attributes_rejects_wrong_column_length() {
        use crate::graph::attributes::{AttributeTable, BinaryAttribute};
        let mut g = Digraph::new(3);
        let table = AttributeTable {
            binary: vec![BinaryAttribute {
                name: "flag".to_string(),
                values: vec![Some(true), Some(false)],
            }],
            ..AttributeTable::new()
        };
        assert_eq!(
            g.attach_attributes(table).unwrap_err(),
            GraphError::AttributeLengthMismatch {
                name: "flag".to_string(),
                expected: 3,
                actual: 2
            }
        );
    }
}
