//! rust_ergm — equilibrium-expectation ERGM estimation for directed
//! networks.
//!
//! Purpose
//! -------
//! Estimate the parameters of an exponential random graph model for an
//! observed directed network by Monte-Carlo maximum likelihood, using the
//! equilibrium-expectation (EE) method: instead of evaluating the
//! intractable likelihood, short MCMC sweeps are run and θ is updated so
//! that at equilibrium the expected change in the sufficient statistics
//! matches the observed network.
//!
//! Key behaviors
//! -------------
//! - [`graph`] owns the mutable network state: adjacency, incremental
//!   two-path counts, typed node attributes, and optional snowball zones.
//! - [`effects`] is the flat catalog of pure change statistics
//!   (structural, attribute-indexed, dyadic-covariate, and attribute
//!   interaction) that fixes the estimation order of θ.
//! - [`sampler`] provides the basic toggle sampler and the improved
//!   fixed-density (IFD) variant, both with conditional-snowball and
//!   reciprocity-forbidding modes.
//! - [`estimation`] runs Algorithm S (seed θ and step scales) followed by
//!   Algorithm EE (the main estimator), writing θ and dzA streams for
//!   external convergence analysis.
//! - [`config`] and [`io`] cover the `key = value` configuration files,
//!   Pajek arc lists, attribute files, and zone files.
//!
//! Conventions
//! -----------
//! - One estimation task is single-threaded and owns all of its state;
//!   independent tasks are separate processes distinguished by a task id
//!   tag on output file names.
//! - Every task draws from a single `ChaCha8Rng` seeded once (per-task
//!   offset on the configured seed), making runs bit-reproducible.
//! - Fatal errors (configuration, file format, graph integrity) carry the
//!   offending file and line where applicable; a non-finite acceptance
//!   ratio is not an error — the proposal is rejected.

pub mod config;
pub mod effects;
pub mod estimation;
pub mod graph;
pub mod io;
pub mod sampler;
