//! Estimation driver: one task end to end.
//!
//! Purpose
//! -------
//! Orchestrate a single estimation task: load the observed network and its
//! covariates, resolve the configured effects, validate the sampler-mode
//! rules, open the per-task output streams, run Algorithm S followed by
//! Algorithm EE, and optionally write the final simulated network. Every
//! semantic validation runs *before* any output file is created, so a
//! misconfigured task fails without leaving artifacts.
//!
//! Concurrency model
//! -----------------
//! One task is single-threaded and owns all of its state: the graph, θ,
//! the auxiliaries, the output streams, and one PRNG seeded once from
//! `rngSeed + task_id` (or OS entropy when no seed is configured).
//! Independent tasks run as separate processes and share nothing.
use std::path::PathBuf;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::effects::{EffectCatalog, StructuralEffect};
use crate::estimation::algorithm_ee::algorithm_ee;
use crate::estimation::algorithm_s::algorithm_s;
use crate::estimation::errors::EstimationResult;
use crate::estimation::output::OutputStream;
use crate::graph::{AttributeTable, Digraph, SnowballZones};
use crate::io::{attributes, pajek, zones};

/// Run one estimation task.
///
/// # Errors
/// Any [`crate::estimation::EstimationError`]: configuration semantics,
/// file loading, graph integrity, or output I/O. Outputs written before a
/// failure remain on disk.
pub fn run_estimation(config: &Config, task_id: u32) -> EstimationResult<()> {
    let started = Instant::now();
    let mut g = load_graph(config)?;
    info!(
        task = task_id,
        nodes = g.num_nodes(),
        arcs = g.num_arcs(),
        density = g.density(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded network and built two-path matrices"
    );

    let catalog = config.build_catalog(g.attributes())?;
    config.validate_modes()?;
    if config.settings.use_conditional_estimation && g.zones().is_none() {
        return Err(ConfigError::ConditionalWithoutZones.into());
    }
    // The IFD sampler models the arc count through its auxiliary
    // parameter; a configured Arc effect would double-count it.
    if config.settings.use_ifd_sampler && catalog.contains_structural(StructuralEffect::Arc) {
        return Err(ConfigError::ArcWithIfdSampler.into());
    }

    let seed = config.rng_seed.map(|s| s.wrapping_add(task_id as u64));
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let theta_path = task_file(&config.theta_file_prefix, task_id, "txt");
    let dza_path = task_file(&config.dza_file_prefix, task_id, "txt");
    let mut theta_stream = OutputStream::create(&theta_path)?;
    let mut dza_stream = OutputStream::create(&dza_path)?;
    let header = build_header(&catalog, config.settings.use_ifd_sampler);
    theta_stream
        .write_header(header.iter().map(String::as_str).chain(["AcceptanceRate"]))?;
    dza_stream.write_header(header.iter().map(String::as_str))?;

    let settings = &config.settings;
    // Steps of Algorithm S, scaled by network size; the EE inner count is
    // deliberately a constant instead.
    let m1 = settings.s_steps * g.num_nodes() / settings.sampler_steps;
    info!(
        task = task_id,
        aca_s = settings.aca_s,
        aca_ee = settings.aca_ee,
        comp_c = settings.comp_c,
        sampler_steps = settings.sampler_steps,
        m1,
        ee_outer = settings.ee_outer_steps,
        ee_inner = settings.ee_inner_steps,
        ifd = settings.use_ifd_sampler,
        conditional = settings.use_conditional_estimation,
        seed = seed,
        "starting Algorithm S"
    );

    let phase = Instant::now();
    let seed_estimate =
        algorithm_s(&mut g, &catalog, settings, m1, &mut theta_stream, &mut rng)?;
    theta_stream.flush()?;
    info!(
        task = task_id,
        elapsed_ms = phase.elapsed().as_millis() as u64,
        theta = ?seed_estimate.theta.as_slice().unwrap_or(&[]),
        d_mean = ?seed_estimate.d_mean.as_slice().unwrap_or(&[]),
        "Algorithm S finished"
    );

    let mut theta = seed_estimate.theta;
    let mut d0 = seed_estimate.d_mean;
    let phase = Instant::now();
    algorithm_ee(
        &mut g,
        &catalog,
        settings,
        &mut d0,
        &mut theta,
        &mut theta_stream,
        &mut dza_stream,
        &mut rng,
    )?;
    info!(
        task = task_id,
        elapsed_ms = phase.elapsed().as_millis() as u64,
        theta = ?theta.as_slice().unwrap_or(&[]),
        "Algorithm EE finished"
    );

    if settings.output_simulated_network {
        let sim_path = task_file(&config.sim_net_file_prefix, task_id, "net");
        pajek::write_digraph(&sim_path, &g)?;
        info!(task = task_id, path = %sim_path.display(), "wrote simulated network");
    }
    Ok(())
}

/// Load the Pajek graph and attach whatever covariate files are configured.
fn load_graph(config: &Config) -> EstimationResult<Digraph> {
    let mut g = pajek::load_digraph(&config.arclist_file)?;
    let mut table = AttributeTable::new();
    if let Some(path) = &config.binattr_file {
        attributes::load_binary_attributes(&mut table, path)?;
    }
    if let Some(path) = &config.catattr_file {
        attributes::load_categorical_attributes(&mut table, path)?;
    }
    if let Some(path) = &config.contattr_file {
        attributes::load_continuous_attributes(&mut table, path)?;
    }
    if let Some(path) = &config.setattr_file {
        attributes::load_set_attributes(&mut table, path)?;
    }
    g.attach_attributes(table)?;
    if let Some(path) = &config.zone_file {
        let zone_vector = zones::load_zones(path)?;
        g.attach_zones(SnowballZones::new(zone_vector)?)?;
    }
    Ok(g)
}

/// Output column names shared by the θ and dzA streams: `t`, the Arc
/// column under the IFD sampler, then the effects in catalog order.
fn build_header(catalog: &EffectCatalog, use_ifd: bool) -> Vec<String> {
    let mut header = vec!["t".to_string()];
    if use_ifd {
        header.push("Arc".to_string());
    }
    header.extend(catalog.names().map(str::to_string));
    header
}

fn task_file(prefix: &str, task_id: u32, extension: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}_{task_id}.{extension}"))
}
