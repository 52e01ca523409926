//! Basic toggle sampler.
//!
//! Picks a dyad uniformly at random and proposes to toggle the arc between
//! its endpoints: add it if absent, delete it if present. Change statistics
//! are always evaluated on the graph *without* the arc — a deletion first
//! removes the arc temporarily and negates the statistics' contribution to
//! the acceptance exponent — so a single set of pure add-deltas serves both
//! move directions.
//!
//! In conditional (snowball) mode, both endpoints are drawn from the inner
//! waves, the zones must be equal or adjacent, and a deletion that would
//! drop a node's last connection to its preceding wave is redrawn. Arc
//! direction is ignored by every snowball rule, matching the sampling
//! procedure's assumption.
use ndarray::{Array1, ArrayView1};
use rand::Rng;

use crate::effects::EffectCatalog;
use crate::graph::{Digraph, GraphResult};
use crate::sampler::{SamplerOptions, SweepStats};

/// Run one sweep of `sampler_m` Metropolis toggle proposals.
///
/// Returns the accumulated add/delete change statistics and the acceptance
/// rate. The graph is net-unchanged when `options.perform_move` is false;
/// otherwise accepted moves persist.
///
/// # Errors
/// Propagates [`crate::graph::GraphError`] from arc toggles; under the
/// documented preconditions (valid dyads, consistent restore protocol)
/// these do not occur.
pub fn basic_sampler<R: Rng>(
    g: &mut Digraph, catalog: &EffectCatalog, theta: ArrayView1<f64>, sampler_m: usize,
    options: &SamplerOptions, rng: &mut R,
) -> GraphResult<SweepStats> {
    let mut stats = SweepStats::zeros(catalog.len());
    let mut change = Array1::zeros(catalog.len());
    let mut accepted: usize = 0;

    for _ in 0..sampler_m {
        let (i, j, is_delete) = if options.use_conditional {
            select_conditional_dyad(g, rng)
        } else {
            select_unconditional_dyad(g, options.forbid_reciprocity, rng)
        };

        // Change statistics are computed for adding i -> j, so a deletion
        // evaluates on the graph with the arc temporarily removed and
        // negates the exponent.
        if is_delete {
            g.remove_arc(i, j)?;
        }
        catalog.change_stats_into(g, i, j, &mut change);
        let sign = if is_delete { -1.0 } else { 1.0 };
        let total: f64 =
            theta.iter().zip(change.iter()).map(|(&t, &c)| t * sign * c).sum();

        // A NaN total rejects here, which is the numerically safe outcome.
        if rng.gen::<f64>() < total.exp() {
            accepted += 1;
            if options.perform_move {
                if !is_delete {
                    g.insert_arc(i, j)?;
                }
            } else if is_delete {
                g.insert_arc(i, j)?;
            }
            if is_delete {
                stats.del += &change;
            } else {
                stats.add += &change;
            }
        } else if is_delete {
            g.insert_arc(i, j)?;
        }
    }

    stats.acceptance_rate = accepted as f64 / sampler_m as f64;
    Ok(stats)
}

/// Uniform dyad selection, optionally redrawing add proposals that would
/// create a mutual dyad.
fn select_unconditional_dyad<R: Rng>(
    g: &Digraph, forbid_reciprocity: bool, rng: &mut R,
) -> (u32, u32, bool) {
    let n = g.num_nodes() as u32;
    loop {
        let i = rng.gen_range(0..n);
        let j = loop {
            let j = rng.gen_range(0..n);
            if j != i {
                break j;
            }
        };
        let is_delete = g.is_arc(i, j);
        if forbid_reciprocity && !is_delete && g.is_arc(j, i) {
            continue;
        }
        return (i, j, is_delete);
    }
}

/// Snowball-conditional dyad selection: inner nodes only, equal or adjacent
/// zones, and no deletion that would sever a node's last link to the
/// preceding wave.
fn select_conditional_dyad<R: Rng>(g: &Digraph, rng: &mut R) -> (u32, u32, bool) {
    let zones = g.zones().expect("conditional estimation requires snowball zones");
    let inner = &zones.inner_nodes;
    loop {
        let i = inner[rng.gen_range(0..inner.len())];
        let j = loop {
            let j = inner[rng.gen_range(0..inner.len())];
            if j != i {
                break j;
            }
        };
        let (zi, zj) = (zones.zone[i as usize], zones.zone[j as usize]);
        if zi.abs_diff(zj) > 1 {
            continue;
        }
        let is_delete = g.is_arc(i, j);
        // Deleting i -> j only severs the neighbour relation when no
        // reverse arc remains; only then can it strand a node from its
        // preceding wave.
        if is_delete
            && !g.is_arc(j, i)
            && ((zi > zj && zones.prev_wave_degree[i as usize] == 1)
                || (zj > zi && zones.prev_wave_degree[j as usize] == 1))
        {
            continue;
        }
        return (i, j, is_delete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Effect, EffectTerm, StructuralEffect};
    use crate::graph::SnowballZones;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Acceptance behaviour at theta = 0 (everything accepted) and under
    //   extreme / non-finite theta (everything rejected).
    // - Graph restoration with perform_move = false.
    // - forbid_reciprocity never produces a mutual dyad.
    // - Conditional mode never touches frozen arcs and keeps
    //   prev_wave_degree consistent.
    // -------------------------------------------------------------------------

    fn arc_only_catalog() -> EffectCatalog {
        EffectCatalog::new(
            vec![Effect {
                name: "Arc".to_string(),
                term: EffectTerm::Structural(StructuralEffect::Arc),
            }],
            vec![],
            vec![],
            vec![],
        )
    }

    fn sorted_arcs(g: &Digraph) -> Vec<(u32, u32)> {
        let mut arcs = g.arcs().to_vec();
        arcs.sort_unstable();
        arcs
    }

    #[test]
    // At theta = 0 the acceptance exponent is 0 and exp(0) = 1, so every
    // proposal is accepted: the chain samples the uniform distribution.
    fn zero_theta_accepts_every_proposal() {
        let mut g = Digraph::new(6);
        g.insert_arc(0, 1).unwrap();
        let catalog = arc_only_catalog();
        let theta = array![0.0];
        let mut rng = StdRng::seed_from_u64(42);
        let options = SamplerOptions { perform_move: false, ..SamplerOptions::default() };
        let stats =
            basic_sampler(&mut g, &catalog, theta.view(), 500, &options, &mut rng).unwrap();
        assert_eq!(stats.acceptance_rate, 1.0);
    }

    #[test]
    fn perform_move_false_leaves_the_graph_unchanged() {
        let mut g = Digraph::new(8);
        g.insert_arc(0, 1).unwrap();
        g.insert_arc(3, 2).unwrap();
        g.insert_arc(5, 7).unwrap();
        let before = sorted_arcs(&g);
        let catalog = arc_only_catalog();
        let theta = array![0.7];
        let mut rng = StdRng::seed_from_u64(99);
        let options = SamplerOptions::default();
        basic_sampler(&mut g, &catalog, theta.view(), 1000, &options, &mut rng).unwrap();
        assert_eq!(sorted_arcs(&g), before);
    }

    #[test]
    fn strongly_negative_theta_rejects_all_adds_on_an_empty_graph() {
        let mut g = Digraph::new(6);
        let catalog = arc_only_catalog();
        let theta = array![-1e9];
        let mut rng = StdRng::seed_from_u64(5);
        let options = SamplerOptions { perform_move: true, ..SamplerOptions::default() };
        let stats =
            basic_sampler(&mut g, &catalog, theta.view(), 300, &options, &mut rng).unwrap();
        assert_eq!(stats.acceptance_rate, 0.0);
        assert_eq!(g.num_arcs(), 0);
        assert_eq!(stats.add.sum(), 0.0);
        assert_eq!(stats.del.sum(), 0.0);
    }

    #[test]
    // A NaN exponent must behave as a rejection, not an acceptance.
    fn non_finite_acceptance_ratio_rejects() {
        let mut g = Digraph::new(5);
        g.insert_arc(1, 2).unwrap();
        let before = sorted_arcs(&g);
        let catalog = arc_only_catalog();
        let theta = array![f64::NAN];
        let mut rng = StdRng::seed_from_u64(11);
        let options = SamplerOptions { perform_move: true, ..SamplerOptions::default() };
        let stats =
            basic_sampler(&mut g, &catalog, theta.view(), 400, &options, &mut rng).unwrap();
        assert_eq!(stats.acceptance_rate, 0.0);
        assert_eq!(sorted_arcs(&g), before);
    }

    #[test]
    fn forbid_reciprocity_never_creates_a_mutual_dyad() {
        let mut g = Digraph::new(6);
        let catalog = arc_only_catalog();
        // Arc effect pushed positive so plenty of adds are accepted.
        let theta = array![2.0];
        let mut rng = StdRng::seed_from_u64(2024);
        let options = SamplerOptions {
            perform_move: true,
            forbid_reciprocity: true,
            ..SamplerOptions::default()
        };
        for _ in 0..20 {
            basic_sampler(&mut g, &catalog, theta.view(), 200, &options, &mut rng).unwrap();
            for &(i, j) in g.arcs() {
                assert!(!g.is_arc(j, i), "mutual dyad {i} <-> {j} under forbidReciprocity");
            }
        }
    }

    #[test]
    fn conditional_mode_freezes_the_outermost_waves() {
        // Waves: 0 = {0, 1}, 1 = {2, 3}, 2 = {4, 5}. Frozen arcs are those
        // within wave 2 and between waves 1 and 2.
        let mut g = Digraph::new(6);
        g.insert_arc(0, 2).unwrap();
        g.insert_arc(1, 3).unwrap();
        g.insert_arc(2, 4).unwrap();
        g.insert_arc(3, 5).unwrap();
        g.insert_arc(4, 5).unwrap();
        g.attach_zones(SnowballZones::new(vec![0, 0, 1, 1, 2, 2]).unwrap()).unwrap();

        let frozen_before: Vec<(u32, u32)> = frozen_arcs(&g);
        let catalog = arc_only_catalog();
        let theta = array![0.5];
        let mut rng = StdRng::seed_from_u64(77);
        let options = SamplerOptions {
            perform_move: true,
            use_conditional: true,
            ..SamplerOptions::default()
        };
        for _ in 0..10 {
            basic_sampler(&mut g, &catalog, theta.view(), 300, &options, &mut rng).unwrap();
        }
        assert_eq!(frozen_arcs(&g), frozen_before);

        // prev_wave_degree still matches its definition after all toggles.
        let zones = g.zones().unwrap().clone();
        for v in 0..6u32 {
            let mut expected = 0;
            for u in 0..6u32 {
                if u != v
                    && g.is_arc_ignore_direction(u, v)
                    && zones.zone[u as usize] + 1 == zones.zone[v as usize]
                {
                    expected += 1;
                }
            }
            assert_eq!(zones.prev_wave_degree[v as usize], expected, "pwd of node {v}");
        }
    }

    fn frozen_arcs(g: &Digraph) -> Vec<(u32, u32)> {
        let zones = g.zones().unwrap();
        let max = zones.max_zone;
        let mut frozen: Vec<(u32, u32)> = g
            .arcs()
            .iter()
            .copied()
            .filter(|&(i, j)| {
                let (zi, zj) = (zones.zone[i as usize], zones.zone[j as usize]);
                zi == max || zj == max
            })
            .collect();
        frozen.sort_unstable();
        frozen
    }
}
