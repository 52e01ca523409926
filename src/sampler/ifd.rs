//! Improved fixed density (IFD) sampler.
//!
//! Purpose
//! -------
//! Sample the ERGM distribution while holding the arc count near its
//! observed value: every iteration pairs one add proposal at a uniformly
//! chosen non-arc dyad with one delete proposal at a uniformly chosen
//! existing arc. The Arc effect is excluded from θ; its role in the
//! acceptance exponent is played by the auxiliary parameter carried in
//! [`IfdState`], and the Arc-equivalent reported value is
//! `aux - arc_correction(g)`.
//!
//! Key behaviors
//! -------------
//! - `dzArc = N_del - N_add` summarizes the arc-count drift of a sweep;
//!   after each sweep the auxiliary parameter takes the density-restoring
//!   step `aux += sign(dzArc) · ifd_K · dzArc²` (more deletes than adds
//!   pushes the auxiliary up, favouring adds next sweep).
//! - Acceptance is counted over the `2 m` individual proposals.
//! - Conditional (snowball) constraints apply to both proposals; delete
//!   proposals redraw while the sampled arc is frozen (touches the
//!   outermost wave) or is a last remaining prev-wave connection.
use ndarray::{Array1, ArrayView1};
use rand::Rng;

use crate::effects::EffectCatalog;
use crate::graph::{Digraph, GraphResult};
use crate::sampler::{SamplerOptions, SweepStats};

/// Auxiliary-parameter state for the IFD sampler, owned by one estimation
/// phase (Algorithm S and Algorithm EE each start from 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfdState {
    aux: f64,
    step_scale: f64,
}

impl IfdState {
    /// Fresh state with `aux = 0` and the configured `ifd_K` step scale.
    pub fn new(step_scale: f64) -> IfdState {
        IfdState { aux: 0.0, step_scale }
    }

    /// Current auxiliary parameter value.
    pub fn aux(&self) -> f64 {
        self.aux
    }

    /// Apply the density-restoring step for one sweep's arc-count drift.
    pub fn advance(&mut self, dz_arc: f64) {
        let sign = if dz_arc < 0.0 { -1.0 } else { 1.0 };
        self.aux += sign * self.step_scale * dz_arc * dz_arc;
    }
}

/// One IFD sweep: the usual per-effect statistics plus the arc-count drift.
#[derive(Debug, Clone, PartialEq)]
pub struct IfdSweep {
    pub stats: SweepStats,
    /// `N_del - N_add` over the sweep.
    pub dz_arc: f64,
}

/// Run one IFD sweep of `sampler_m` paired add/delete proposals and advance
/// the auxiliary parameter.
///
/// # Errors
/// Propagates [`crate::graph::GraphError`] from arc toggles; under the
/// documented preconditions these do not occur.
pub fn ifd_sampler<R: Rng>(
    g: &mut Digraph, catalog: &EffectCatalog, theta: ArrayView1<f64>, sampler_m: usize,
    options: &SamplerOptions, state: &mut IfdState, rng: &mut R,
) -> GraphResult<IfdSweep> {
    let mut stats = SweepStats::zeros(catalog.len());
    let mut change = Array1::zeros(catalog.len());
    let mut accepted: usize = 0;
    let mut num_add: usize = 0;
    let mut num_del: usize = 0;

    for _ in 0..sampler_m {
        // Add proposal at a uniformly chosen non-arc dyad.
        let (i, j) = select_absent_dyad(g, options, rng);
        catalog.change_stats_into(g, i, j, &mut change);
        let total: f64 = state.aux
            + theta.iter().zip(change.iter()).map(|(&t, &c)| t * c).sum::<f64>();
        if rng.gen::<f64>() < total.exp() {
            accepted += 1;
            num_add += 1;
            if options.perform_move {
                g.insert_arc(i, j)?;
            }
            stats.add += &change;
        }

        // Delete proposal at a uniformly chosen existing arc.
        let Some((i, j)) = select_deletable_arc(g, options, rng) else {
            continue;
        };
        g.remove_arc(i, j)?;
        catalog.change_stats_into(g, i, j, &mut change);
        let total: f64 = -(state.aux
            + theta.iter().zip(change.iter()).map(|(&t, &c)| t * c).sum::<f64>());
        if rng.gen::<f64>() < total.exp() {
            accepted += 1;
            num_del += 1;
            if !options.perform_move {
                g.insert_arc(i, j)?;
            }
            stats.del += &change;
        } else {
            g.insert_arc(i, j)?;
        }
    }

    stats.acceptance_rate = accepted as f64 / (2 * sampler_m) as f64;
    let dz_arc = num_del as f64 - num_add as f64;
    state.advance(dz_arc);
    Ok(IfdSweep { stats, dz_arc })
}

/// Uniformly select a dyad with no arc, honouring conditional-zone and
/// reciprocity constraints.
fn select_absent_dyad<R: Rng>(g: &Digraph, options: &SamplerOptions, rng: &mut R) -> (u32, u32) {
    if options.use_conditional {
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
            if zones.zone[i as usize].abs_diff(zones.zone[j as usize]) > 1 {
                continue;
            }
            if g.is_arc(i, j) {
                continue;
            }
            return (i, j);
        }
    } else {
        let n = g.num_nodes() as u32;
        loop {
            let i = rng.gen_range(0..n);
            let j = loop {
                let j = rng.gen_range(0..n);
                if j != i {
                    break j;
                }
            };
            if g.is_arc(i, j) {
                continue;
            }
            if options.forbid_reciprocity && g.is_arc(j, i) {
                continue;
            }
            return (i, j);
        }
    }
}

/// Uniformly select an existing arc that conditional mode allows deleting;
/// `None` on a graph with no arcs.
fn select_deletable_arc<R: Rng>(
    g: &Digraph, options: &SamplerOptions, rng: &mut R,
) -> Option<(u32, u32)> {
    if !options.use_conditional {
        return g.random_arc(rng);
    }
    let zones = g.zones().expect("conditional estimation requires snowball zones");
    if g.num_arcs() == 0 {
        return None;
    }
    loop {
        let (i, j) = g.random_arc(rng)?;
        let (zi, zj) = (zones.zone[i as usize], zones.zone[j as usize]);
        // Frozen: any arc touching the outermost wave.
        if zi == zones.max_zone || zj == zones.max_zone {
            continue;
        }
        // Never sever a node's last link to the preceding wave.
        if !g.is_arc(j, i)
            && ((zi > zj && zones.prev_wave_degree[i as usize] == 1)
                || (zj > zi && zones.prev_wave_degree[j as usize] == 1))
        {
            continue;
        }
        return Some((i, j));
    }
}
