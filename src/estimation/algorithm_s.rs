//! Algorithm S: seed estimation of θ and the derivative scale.
//!
//! Purpose
//! -------
//! Starting from θ = 0, run the sampler *without* applying moves and use
//! the accumulated change statistics to produce (a) rough starting
//! parameter values and (b) `Dmean`, the per-effect step-scale estimate
//! Algorithm EE refines. With θ = 0 the sampler explores the uniform graph
//! model, so the expected squared change of each statistic approximates
//! the diagonal of the Fisher information.
//!
//! Per iteration, for every effect k:
//!
//! ```text
//! dzA_k  = delΔ_k - addΔ_k
//! sumΔ_k = delΔ_k + addΔ_k
//! D0_k  += dzA_k²
//! θ_k   += sign(dzA_k) · (ACA_S / sumΔ_k²) · dzA_k²      (0 when sumΔ_k = 0)
//! ```
//!
//! and on return `Dmean_k = m / D0_k`. The damping by `sumΔ²` keeps
//! unusually active effects from dominating the seed step. θ rows are
//! emitted with indices `t - M₁` so Algorithm EE can continue from t = 0
//! in the same stream.
use ndarray::Array1;
use rand::Rng;

use crate::effects::EffectCatalog;
use crate::estimation::errors::EstimationResult;
use crate::estimation::output::OutputStream;
use crate::estimation::settings::EstimationSettings;
use crate::graph::Digraph;
use crate::sampler::{basic_sampler, ifd_sampler, IfdState};

/// Output of Algorithm S: seed θ and the starting step-scale vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedEstimate {
    pub theta: Array1<f64>,
    pub d_mean: Array1<f64>,
}

/// Run Algorithm S for `num_steps` iterations (the driver computes
/// `M₁ = Ssteps · n / samplerSteps`).
///
/// The graph is borrowed mutably for the sampler's transient toggles but
/// is net-unchanged on return (`perform_move = false`).
///
/// # Errors
/// Output-stream failures and (never under the documented preconditions)
/// graph toggle errors.
pub fn algorithm_s<R: Rng>(
    g: &mut Digraph, catalog: &EffectCatalog, settings: &EstimationSettings, num_steps: usize,
    theta_stream: &mut OutputStream, rng: &mut R,
) -> EstimationResult<SeedEstimate> {
    let num_effects = catalog.len();
    let mut theta = Array1::zeros(num_effects);
    let mut d0 = Array1::<f64>::zeros(num_effects);
    let options = settings.sampler_options(false);
    let mut ifd_state =
        if settings.use_ifd_sampler { Some(IfdState::new(settings.ifd_k)) } else { None };
    let arc_correction = if settings.use_ifd_sampler { g.arc_correction() } else { 0.0 };
    let mut row = Vec::with_capacity(num_effects + 2);

    for t in 0..num_steps {
        let stats = match ifd_state.as_mut() {
            Some(state) => {
                ifd_sampler(
                    g,
                    catalog,
                    theta.view(),
                    settings.sampler_steps,
                    &options,
                    state,
                    rng,
                )?
                .stats
            }
            None => basic_sampler(
                g,
                catalog,
                theta.view(),
                settings.sampler_steps,
                &options,
                rng,
            )?,
        };

        row.clear();
        if let Some(state) = &ifd_state {
            // The Arc column the IFD sampler reports in place of a θ entry.
            row.push(state.aux() - arc_correction);
        }
        for k in 0..num_effects {
            let dz = stats.del[k] - stats.add[k];
            let sum = stats.del[k] + stats.add[k];
            d0[k] += dz * dz;
            let damping = if sum != 0.0 { settings.aca_s / (sum * sum) } else { 0.0 };
            let sign = if dz < 0.0 { -1.0 } else { 1.0 };
            theta[k] += sign * damping * dz * dz;
            row.push(theta[k]);
        }
        row.push(stats.acceptance_rate);
        theta_stream.write_row(t as i64 - num_steps as i64, &row)?;
    }

    let sampler_m = settings.sampler_steps as f64;
    let d_mean = d0.mapv(|d| sampler_m / d);
    Ok(SeedEstimate { theta, d_mean })
}
