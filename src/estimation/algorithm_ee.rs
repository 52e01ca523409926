//! Algorithm EE: the main equilibrium-expectation estimator.
//!
//! Purpose
//! -------
//! Iterate the sampler *with* moves applied, accumulate the signed change
//! statistics `dzA` (zeroed only on entry), and push θ against the
//! accumulated deviation so that, at equilibrium, the expected change in
//! every sufficient statistic matches the observed network:
//!
//! ```text
//! dzA_k += addΔ_k - delΔ_k
//! θ_k   += -sign(dzA_k) · (D0_k · ACA_EE) · dzA_k²
//! ```
//!
//! The sign is opposite to Algorithm S: S drives θ toward the simulated
//! baseline, EE pushes the simulation toward the data.
//!
//! Variance control
//! ----------------
//! Each outer iteration records θ across the inner loop (a p × M_in ring)
//! and rescales D₀ to hold the coefficient of variation of θ near `compC`:
//! `D0_k *= sqrt(compC / (sd / |mean|))` with |mean| floored at
//! `meanFloor` and no rescale at all when sd falls below `sdThreshold`.
//! Output streams flush once per outer iteration, which is the restart
//! granularity.
use ndarray::{Array1, Array2};
use rand::Rng;

use crate::effects::EffectCatalog;
use crate::estimation::errors::EstimationResult;
use crate::estimation::output::OutputStream;
use crate::estimation::settings::EstimationSettings;
use crate::graph::Digraph;
use crate::sampler::{basic_sampler, ifd_sampler, IfdState};

/// Run Algorithm EE, refining `theta` in place and mutating the graph
/// toward the fitted distribution. `d0` is consumed as working state and
/// holds no meaningful value afterwards.
///
/// # Errors
/// Output-stream failures and (never under the documented preconditions)
/// graph toggle errors.
pub fn algorithm_ee<R: Rng>(
    g: &mut Digraph, catalog: &EffectCatalog, settings: &EstimationSettings,
    d0: &mut Array1<f64>, theta: &mut Array1<f64>, theta_stream: &mut OutputStream,
    dza_stream: &mut OutputStream, rng: &mut R,
) -> EstimationResult<()> {
    let num_effects = catalog.len();
    let mut dza = Array1::<f64>::zeros(num_effects);
    let options = settings.sampler_options(true);
    let mut ifd_state =
        if settings.use_ifd_sampler { Some(IfdState::new(settings.ifd_k)) } else { None };
    let arc_correction = if settings.use_ifd_sampler { g.arc_correction() } else { 0.0 };
    let mut thetamatrix = Array2::<f64>::zeros((num_effects, settings.ee_inner_steps));
    let mut theta_row = Vec::with_capacity(num_effects + 2);
    let mut dza_row = Vec::with_capacity(num_effects + 1);
    let mut t: i64 = 0;

    for _outer in 0..settings.ee_outer_steps {
        for inner in 0..settings.ee_inner_steps {
            let (stats, dz_arc) = match ifd_state.as_mut() {
                Some(state) => {
                    let sweep = ifd_sampler(
                        g,
                        catalog,
                        theta.view(),
                        settings.sampler_steps,
                        &options,
                        state,
                        rng,
                    )?;
                    (sweep.stats, sweep.dz_arc)
                }
                None => (
                    basic_sampler(
                        g,
                        catalog,
                        theta.view(),
                        settings.sampler_steps,
                        &options,
                        rng,
                    )?,
                    0.0,
                ),
            };

            theta_row.clear();
            dza_row.clear();
            if let Some(state) = &ifd_state {
                // The IFD Arc column: change in arc count and the adjusted
                // auxiliary parameter.
                dza_row.push(dz_arc);
                theta_row.push(state.aux() - arc_correction);
            }
            for k in 0..num_effects {
                dza[k] += stats.add[k] - stats.del[k];
                let step = d0[k] * settings.aca_ee;
                let sign = if dza[k] < 0.0 { 1.0 } else { -1.0 };
                theta[k] += sign * step * dza[k] * dza[k];
                thetamatrix[[k, inner]] = theta[k];
                theta_row.push(theta[k]);
                dza_row.push(dza[k]);
            }
            theta_row.push(stats.acceptance_rate);
            if settings.output_all_steps || inner == 0 {
                theta_stream.write_row(t, &theta_row)?;
                dza_stream.write_row(t, &dza_row)?;
            }
            t += 1;
        }

        // Rescale D0 so that cv(θ) over the inner loop tracks compC.
        for k in 0..num_effects {
            let ring = thetamatrix.row(k);
            let mean = ring.mean().unwrap_or(0.0);
            let sd = ring.std(0.0);
            let mean_abs = mean.abs().max(settings.mean_floor);
            if sd > settings.sd_threshold {
                d0[k] *= (settings.comp_c / (sd / mean_abs)).sqrt();
            }
        }
        theta_stream.flush()?;
        dza_stream.flush()?;
    }
    Ok(())
}
