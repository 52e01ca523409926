//! Estimation settings.
//!
//! One struct bundles every knob the estimation engine reads: the step
//! multipliers for Algorithms S and EE, the variance-control target, the
//! sampler iteration counts, the sampler choice and its modes, and the two
//! numerical guards of the EE variance control. Defaults mirror the
//! reference implementation; the configuration parser types and validates
//! values on assignment, so this struct stays a plain data carrier.

/// Default step multiplier for Algorithm S.
pub const DEFAULT_ACA_S: f64 = 0.1;

/// Default step multiplier for Algorithm EE.
pub const DEFAULT_ACA_EE: f64 = 1e-9;

/// Default target coefficient of variation for the θ variance control.
pub const DEFAULT_COMP_C: f64 = 1e-2;

/// Default IFD auxiliary-parameter step scale.
pub const DEFAULT_IFD_K: f64 = 0.1;

/// Default floor on |mean θ| in the EE variance control. Stops θ values
/// sitting at zero from zeroing the coefficient of variation.
pub const DEFAULT_MEAN_FLOOR: f64 = 0.1;

/// Default minimum sd(θ) below which the EE variance control leaves D₀
/// untouched.
pub const DEFAULT_SD_THRESHOLD: f64 = 1e-10;

/// Default learning rate declared for the (unimplemented) Borisenko update.
pub const DEFAULT_LEARNING_RATE: f64 = 0.001;

/// Default minimum |θ| declared for the (unimplemented) Borisenko update.
pub const DEFAULT_MIN_THETA: f64 = 0.01;

/// All estimation-engine knobs for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationSettings {
    /// Step multiplier for Algorithm S (`ACA_S`).
    pub aca_s: f64,
    /// Step multiplier for Algorithm EE (`ACA_EE`).
    pub aca_ee: f64,
    /// Target coefficient of variation for θ (`compC`).
    pub comp_c: f64,
    /// Sampler proposals per algorithm step (`samplerSteps`, m).
    pub sampler_steps: usize,
    /// Algorithm S step budget (`Ssteps`); the iteration count is
    /// `Ssteps * n / samplerSteps`.
    pub s_steps: usize,
    /// Algorithm EE outer iterations (`EEsteps`).
    pub ee_outer_steps: usize,
    /// Algorithm EE inner iterations (`EEinnerSteps`).
    pub ee_inner_steps: usize,
    /// Emit θ and dzA every inner iteration instead of once per outer.
    pub output_all_steps: bool,
    /// Use the IFD sampler instead of the basic sampler.
    pub use_ifd_sampler: bool,
    /// IFD auxiliary-parameter step scale (`ifd_K`).
    pub ifd_k: f64,
    /// Write the final simulated network as a Pajek file.
    pub output_simulated_network: bool,
    /// Conditional estimation of a snowball sample.
    pub use_conditional_estimation: bool,
    /// Reject add proposals that would create a mutual dyad.
    pub forbid_reciprocity: bool,
    /// Floor on |mean θ| in the variance control (`meanFloor`).
    pub mean_floor: f64,
    /// Minimum sd(θ) for D₀ rescaling (`sdThreshold`).
    pub sd_threshold: f64,
    /// Declared for forward compatibility; not consumed by the engine.
    pub use_borisenko_update: bool,
    /// Declared for forward compatibility; not consumed by the engine.
    pub learning_rate: f64,
    /// Declared for forward compatibility; not consumed by the engine.
    pub min_theta: f64,
}

impl Default for EstimationSettings {
    fn default() -> EstimationSettings {
        EstimationSettings {
            aca_s: DEFAULT_ACA_S,
            aca_ee: DEFAULT_ACA_EE,
            comp_c: DEFAULT_COMP_C,
            sampler_steps: 1000,
            s_steps: 100,
            ee_outer_steps: 500,
            ee_inner_steps: 100,
            output_all_steps: false,
            use_ifd_sampler: false,
            ifd_k: DEFAULT_IFD_K,
            output_simulated_network: false,
            use_conditional_estimation: false,
            forbid_reciprocity: false,
            mean_floor: DEFAULT_MEAN_FLOOR,
            sd_threshold: DEFAULT_SD_THRESHOLD,
            use_borisenko_update: false,
            learning_rate: DEFAULT_LEARNING_RATE,
            min_theta: DEFAULT_MIN_THETA,
        }
    }
}

impl EstimationSettings {
    /// Sampler flags implied by these settings for the given phase.
    pub fn sampler_options(&self, perform_move: bool) -> crate::sampler::SamplerOptions {
        crate::sampler::SamplerOptions {
            perform_move,
            use_conditional: self.use_conditional_estimation,
            forbid_reciprocity: self.forbid_reciprocity,
        }
    }
}
