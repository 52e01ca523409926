//! Structural change statistics for directed graphs.
//!
//! Purpose
//! -------
//! Pure functions `delta(g, i, j) -> f64` returning the change each
//! structural sufficient statistic would undergo if arc `i -> j` were added
//! to the current state of `g`. Deletions are handled by the caller, which
//! temporarily removes the arc, evaluates the same function, and negates
//! the result; the sign symmetry is exact because every formula reads only
//! state that excludes the toggled arc.
//!
//! Conventions
//! -----------
//! - Alternating statistics (stars, k-triangles, two-paths) use the fixed
//!   geometric decay [`DECAY`]. Their change formulas come from
//!   telescoping the per-node / per-pair geometric sums: raising a count
//!   from `d` to `d + 1` changes `lambda * (1 - (1 - 1/lambda)^d)` by
//!   `(1 - 1/lambda)^d`.
//! - Two-path counts are read from the graph's incremental maps; the
//!   remaining O(degree) terms iterate the shorter adjacency list.
use crate::graph::Digraph;

/// Geometric decay for alternating statistics (stars, k-triangles,
/// two-paths), as in the reference implementation.
pub const DECAY: f64 = 2.0;

/// Retained weight per existing unit: `1 - 1/DECAY`.
const DECAY_BASE: f64 = 1.0 - 1.0 / DECAY;

/// Arc (edge count): always 1.
pub fn change_arc(_g: &Digraph, _i: u32, _j: u32) -> f64 {
    1.0
}

/// Reciprocity: 1 when the reverse arc `j -> i` exists.
pub fn change_reciprocity(g: &Digraph, i: u32, j: u32) -> f64 {
    if g.is_arc(j, i) { 1.0 } else { 0.0 }
}

/// Sink count: a sink has in-degree > 0 and out-degree 0. The new arc can
/// promote `j` to a sink (if previously isolated) and demote `i`.
pub fn change_sink(g: &Digraph, i: u32, j: u32) -> f64 {
    let mut delta = 0.0;
    if g.out_degree(j) == 0 && g.in_degree(j) == 0 {
        delta += 1.0;
    }
    if g.out_degree(i) == 0 && g.in_degree(i) > 0 {
        delta -= 1.0;
    }
    delta
}

/// Source count: a source has out-degree > 0 and in-degree 0.
pub fn change_source(g: &Digraph, i: u32, j: u32) -> f64 {
    let mut delta = 0.0;
    if g.in_degree(i) == 0 && g.out_degree(i) == 0 {
        delta += 1.0;
    }
    if g.in_degree(j) == 0 && g.out_degree(j) > 0 {
        delta -= 1.0;
    }
    delta
}

/// Isolate count: both endpoints stop being isolated when the arc arrives.
pub fn change_isolates(g: &Digraph, i: u32, j: u32) -> f64 {
    let mut delta = 0.0;
    if g.in_degree(i) == 0 && g.out_degree(i) == 0 {
        delta -= 1.0;
    }
    if g.in_degree(j) == 0 && g.out_degree(j) == 0 {
        delta -= 1.0;
    }
    delta
}

/// In-two-stars `sum_v C(indeg(v), 2)`: raising `indeg(j)` by one adds one
/// star per existing in-neighbour.
pub fn change_in_two_stars(g: &Digraph, _i: u32, j: u32) -> f64 {
    g.in_degree(j) as f64
}

/// Out-two-stars `sum_v C(outdeg(v), 2)`.
pub fn change_out_two_stars(g: &Digraph, i: u32, _j: u32) -> f64 {
    g.out_degree(i) as f64
}

/// Transitive triads `(a, b, c)` with `a -> b`, `b -> c`, `a -> c`. The new
/// arc can play all three roles:
/// - shortcut `a -> c`: one triad per directed two-path `i -> k -> j`,
/// - first leg `a -> b`: one per shared out-target `i -> k <- j`,
/// - second leg `b -> c`: one per shared in-neighbour `k -> i`, `k -> j`.
pub fn change_transitive_triangles(g: &Digraph, i: u32, j: u32) -> f64 {
    let shortcut = g.directed_two_paths(i, j) as f64;
    let first_leg = g.mixed_two_paths(i, j) as f64;
    let second_leg = shared_in_neighbours(g, i, j) as f64;
    shortcut + first_leg + second_leg
}

/// Cyclic triads: the arc `i -> j` closes one cycle per directed two-path
/// `j -> k -> i`.
pub fn change_cyclic_triangles(g: &Digraph, i: u32, j: u32) -> f64 {
    g.directed_two_paths(j, i) as f64
}

/// Alternating in-stars: geometric telescoping on `indeg(j)`.
pub fn change_alt_in_stars(g: &Digraph, _i: u32, j: u32) -> f64 {
    DECAY_BASE.powi(g.in_degree(j) as i32)
}

/// Alternating out-stars: geometric telescoping on `outdeg(i)`.
pub fn change_alt_out_stars(g: &Digraph, i: u32, _j: u32) -> f64 {
    DECAY_BASE.powi(g.out_degree(i) as i32)
}

/// Alternating transitive k-triangles (AT-T).
///
/// The statistic is `DECAY * sum over arcs (a, c) of
/// (1 - DECAY_BASE^{two_paths(a, c)})`. The new arc contributes as a fresh
/// base arc with its current two-path count, and as a new two-path under
/// every existing base arc it extends (as first leg `i -> j -> k` under
/// base `i -> k`, as second leg `k -> i -> j` under base `k -> j`).
pub fn change_alt_k_triangles_t(g: &Digraph, i: u32, j: u32) -> f64 {
    let mut delta = DECAY * (1.0 - DECAY_BASE.powi(g.directed_two_paths(i, j) as i32));
    for &k in g.out_neighbours(j) {
        if g.is_arc(i, k) {
            delta += DECAY_BASE.powi(g.directed_two_paths(i, k) as i32);
        }
    }
    for &k in g.in_neighbours(i) {
        if g.is_arc(k, j) {
            delta += DECAY_BASE.powi(g.directed_two_paths(k, j) as i32);
        }
    }
    delta
}

/// Alternating transitive two-paths (A2P-T).
///
/// The statistic is `DECAY * sum over ordered pairs (a, c), a != c, of
/// (1 - DECAY_BASE^{two_paths(a, c)})`. The new arc adds one two-path
/// `i -> j -> k` for every out-neighbour `k` of `j` and one `k -> i -> j`
/// for every in-neighbour `k` of `i`; self-pairs are excluded.
pub fn change_alt_two_paths_t(g: &Digraph, i: u32, j: u32) -> f64 {
    let mut delta = 0.0;
    for &k in g.out_neighbours(j) {
        if k != i {
            delta += DECAY_BASE.powi(g.directed_two_paths(i, k) as i32);
        }
    }
    for &k in g.in_neighbours(i) {
        if k != j {
            delta += DECAY_BASE.powi(g.directed_two_paths(k, j) as i32);
        }
    }
    delta
}

/// Count nodes `k` with `k -> i` and `k -> j`, iterating the shorter
/// in-neighbour list.
fn shared_in_neighbours(g: &Digraph, i: u32, j: u32) -> usize {
    if g.in_degree(i) <= g.in_degree(j) {
        g.in_neighbours(i).iter().filter(|&&k| g.is_arc(k, j)).count()
    } else {
        g.in_neighbours(j).iter().filter(|&&k| g.is_arc(k, i)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Locality of every structural change statistic: on seeded random graphs
    // and random dyads, the incremental delta must equal the difference of
    // the statistic evaluated globally before and after the toggle, and the
    // add/delete deltas must be exact negations of each other.
    // -------------------------------------------------------------------------

    fn random_graph(n: u32, arcs: usize, seed: u64) -> Digraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut g = Digraph::new(n as usize);
        while g.num_arcs() < arcs {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            if i != j && !g.is_arc(i, j) {
                g.insert_arc(i, j).unwrap();
            }
        }
        g
    }

    /// Directed two-path count recomputed without the incremental maps.
    fn count_two_paths(g: &Digraph, a: u32, c: u32) -> u32 {
        g.out_neighbours(a).iter().filter(|&&k| g.is_arc(k, c)).count() as u32
    }

    /// Global statistics evaluated from first principles.
    fn global_stat(g: &Digraph, which: usize) -> f64 {
        let n = g.num_nodes() as u32;
        match which {
            0 => g.num_arcs() as f64,
            1 => g.arcs().iter().filter(|&&(i, j)| g.is_arc(j, i)).count() as f64 / 2.0,
            2 => (0..n).filter(|&v| g.in_degree(v) > 0 && g.out_degree(v) == 0).count() as f64,
            3 => (0..n).filter(|&v| g.out_degree(v) > 0 && g.in_degree(v) == 0).count() as f64,
            4 => (0..n).filter(|&v| g.in_degree(v) == 0 && g.out_degree(v) == 0).count() as f64,
            5 => (0..n).map(|v| choose2(g.in_degree(v))).sum(),
            6 => (0..n).map(|v| choose2(g.out_degree(v))).sum(),
            7 => {
                // transitive triads: ordered (a, b, c) with a->b, b->c, a->c
                let mut count = 0.0;
                for &(a, b) in g.arcs() {
                    for &c in g.out_neighbours(b) {
                        if g.is_arc(a, c) {
                            count += 1.0;
                        }
                    }
                }
                count
            }
            8 => {
                // directed three-cycles, each counted once
                let mut count = 0.0;
                for &(a, b) in g.arcs() {
                    for &c in g.out_neighbours(b) {
                        if g.is_arc(c, a) {
                            count += 1.0;
                        }
                    }
                }
                count / 3.0
            }
            9 => (0..n).map(|v| DECAY * (1.0 - DECAY_BASE.powi(g.in_degree(v) as i32))).sum(),
            10 => (0..n).map(|v| DECAY * (1.0 - DECAY_BASE.powi(g.out_degree(v) as i32))).sum(),
            11 => g
                .arcs()
                .iter()
                .map(|&(a, c)| DECAY * (1.0 - DECAY_BASE.powi(count_two_paths(g, a, c) as i32)))
                .sum(),
            12 => {
                let mut total = 0.0;
                for a in 0..n {
                    for c in 0..n {
                        if a != c {
                            total += DECAY
                                * (1.0 - DECAY_BASE.powi(count_two_paths(g, a, c) as i32));
                        }
                    }
                }
                total
            }
            _ => unreachable!(),
        }
    }

    fn choose2(d: usize) -> f64 {
        (d * d.saturating_sub(1)) as f64 / 2.0
    }

    fn change_stat(g: &Digraph, which: usize, i: u32, j: u32) -> f64 {
        match which {
            0 => change_arc(g, i, j),
            1 => change_reciprocity(g, i, j),
            2 => change_sink(g, i, j),
            3 => change_source(g, i, j),
            4 => change_isolates(g, i, j),
            5 => change_in_two_stars(g, i, j),
            6 => change_out_two_stars(g, i, j),
            7 => change_transitive_triangles(g, i, j),
            8 => change_cyclic_triangles(g, i, j),
            9 => change_alt_in_stars(g, i, j),
            10 => change_alt_out_stars(g, i, j),
            11 => change_alt_k_triangles_t(g, i, j),
            12 => change_alt_two_paths_t(g, i, j),
            _ => unreachable!(),
        }
    }

    #[test]
    // For every effect: sample random graphs and random absent dyads, and
    // check delta == stat(g + arc) - stat(g).
    fn change_statistics_are_local() {
        let mut rng = StdRng::seed_from_u64(271828);
        for which in 0..13 {
            for trial in 0..12u64 {
                let mut g = random_graph(8, 18, 1000 * which as u64 + trial);
                let (i, j) = loop {
                    let i = rng.gen_range(0..8u32);
                    let j = rng.gen_range(0..8u32);
                    if i != j && !g.is_arc(i, j) {
                        break (i, j);
                    }
                };
                let before = global_stat(&g, which);
                let delta = change_stat(&g, which, i, j);
                g.insert_arc(i, j).unwrap();
                let after = global_stat(&g, which);
                assert_abs_diff_eq!(
                    after - before,
                    delta,
                    epsilon = 1e-9 * (1.0 + before.abs())
                );
            }
        }
    }

    #[test]
    // Sign symmetry: the delta for adding an arc on g without it equals the
    // negated delta the caller derives for deleting it from g with it.
    fn add_and_delete_deltas_negate() {
        for which in 0..13 {
            let mut g = random_graph(8, 20, 555 + which as u64);
            let &(i, j) = g.arcs().first().unwrap();
            g.remove_arc(i, j).unwrap();
            let add_delta = change_stat(&g, which, i, j);
            g.insert_arc(i, j).unwrap();
            // Caller's deletion protocol: remove, evaluate, negate.
            g.remove_arc(i, j).unwrap();
            let del_delta = -change_stat(&g, which, i, j);
            g.insert_arc(i, j).unwrap();
            assert_abs_diff_eq!(add_delta, -del_delta, epsilon = 1e-12);
        }
    }

    #[test]
    fn reciprocity_sees_only_the_reverse_arc() {
        let mut g = Digraph::new(3);
        assert_eq!(change_reciprocity(&g, 0, 1), 0.0);
        g.insert_arc(1, 0).unwrap();
        assert_eq!(change_reciprocity(&g, 0, 1), 1.0);
        assert_eq!(change_reciprocity(&g, 1, 2), 0.0);
    }

    #[test]
    fn alternating_star_delta_decays_geometrically() {
        let mut g = Digraph::new(5);
        assert_abs_diff_eq!(change_alt_in_stars(&g, 0, 4), 1.0);
        g.insert_arc(1, 4).unwrap();
        assert_abs_diff_eq!(change_alt_in_stars(&g, 0, 4), 0.5);
        g.insert_arc(2, 4).unwrap();
        assert_abs_diff_eq!(change_alt_in_stars(&g, 0, 4), 0.25);
    }
}
