//! config — configuration parsing and effect resolution.
//!
//! Purpose
//! -------
//! Turn a `key = value` configuration file into a typed [`Config`]: the
//! estimation settings, input/output paths, the optional PRNG seed, and
//! the four effect lists. Effect names are resolved against the loaded
//! graph's attribute table by [`Config::build_catalog`], which produces the
//! ordered [`EffectCatalog`] shared by θ, dzA, and the output headers.
//!
//! Key behaviors
//! -------------
//! - Keys are ASCII case-insensitive; unknown keys are fatal syntax errors
//!   with the offending line.
//! - Scalar values are typed on assignment (double / uint / bool / path),
//!   so a bad value is reported with its line and the expected type.
//! - Set values bind effects to attribute columns: `attrParams =
//!   {Sender(gender)}`, `dyadicParams = {GeoDistance(lat, lon)}`,
//!   `attrInteractionParams = {BinaryPairInteraction(a, b)}`.
//! - Defaults mirror the reference implementation, including the declared
//!   but unconsumed Borisenko-update keys kept for forward compatibility.
use std::path::{Path, PathBuf};

use crate::effects::{AttrKind, AttributeEffect, Effect, EffectCatalog, EffectTerm, StructuralEffect};
use crate::estimation::settings::EstimationSettings;
use crate::graph::AttributeTable;

pub mod errors;
pub mod parse;

pub use self::errors::{ConfigError, ConfigResult};

use self::parse::{parse_entries, SetElement, Value};

/// Fully parsed configuration for one estimation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Algorithm knobs (Algorithm S / EE constants, sampler choice, flags).
    pub settings: EstimationSettings,
    /// Base PRNG seed; the task seed is `rng_seed + task_id`. `None` draws
    /// from OS entropy (runs are then not reproducible).
    pub rng_seed: Option<u64>,
    /// Pajek arc list of the observed network (required).
    pub arclist_file: PathBuf,
    pub binattr_file: Option<PathBuf>,
    pub catattr_file: Option<PathBuf>,
    pub contattr_file: Option<PathBuf>,
    pub setattr_file: Option<PathBuf>,
    pub zone_file: Option<PathBuf>,
    pub theta_file_prefix: String,
    pub dza_file_prefix: String,
    pub sim_net_file_prefix: String,
    /// Structural effect names from `structParams`.
    pub struct_params: Vec<String>,
    /// `(effect, attribute)` pairs from `attrParams`.
    pub attr_params: Vec<(String, String)>,
    /// `(effect, attributes)` from `dyadicParams`.
    pub dyadic_params: Vec<(String, Vec<String>)>,
    /// `(effect, attributes)` from `attrInteractionParams`.
    pub attr_interaction_params: Vec<(String, Vec<String>)>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            settings: EstimationSettings::default(),
            rng_seed: None,
            arclist_file: PathBuf::new(),
            binattr_file: None,
            catattr_file: None,
            contattr_file: None,
            setattr_file: None,
            zone_file: None,
            theta_file_prefix: "theta_values".to_string(),
            dza_file_prefix: "dzA_values".to_string(),
            sim_net_file_prefix: "sim".to_string(),
            struct_params: Vec::new(),
            attr_params: Vec::new(),
            dyadic_params: Vec::new(),
            attr_interaction_params: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a configuration file from disk.
    pub fn parse_file(path: &Path) -> ConfigResult<Config> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Config::parse_str(&text)
    }

    /// Parse configuration text.
    ///
    /// # Errors
    /// Any [`ConfigError`] syntax variant, or [`ConfigError::MissingKey`]
    /// when `arclistFile` is absent. Later occurrences of a key override
    /// earlier ones.
    pub fn parse_str(text: &str) -> ConfigResult<Config> {
        let mut config = Config::default();
        let mut have_arclist = false;
        for entry in parse_entries(text)? {
            let key = entry.key.to_ascii_lowercase();
            match (key.as_str(), &entry.value) {
                ("aca_s", Value::Scalar(v)) => {
                    config.settings.aca_s = positive_double(&entry.key, v, entry.line)?;
                }
                ("aca_ee", Value::Scalar(v)) => {
                    config.settings.aca_ee = positive_double(&entry.key, v, entry.line)?;
                }
                ("compc", Value::Scalar(v)) => {
                    config.settings.comp_c = positive_double(&entry.key, v, entry.line)?;
                }
                ("samplersteps", Value::Scalar(v)) => {
                    config.settings.sampler_steps = positive_uint(&entry.key, v, entry.line)?;
                }
                ("ssteps", Value::Scalar(v)) => {
                    config.settings.s_steps = positive_uint(&entry.key, v, entry.line)?;
                }
                ("eesteps", Value::Scalar(v)) => {
                    config.settings.ee_outer_steps = positive_uint(&entry.key, v, entry.line)?;
                }
                ("eeinnersteps", Value::Scalar(v)) => {
                    config.settings.ee_inner_steps = positive_uint(&entry.key, v, entry.line)?;
                }
                ("outputallsteps", Value::Scalar(v)) => {
                    config.settings.output_all_steps = boolean(&entry.key, v, entry.line)?;
                }
                ("useifdsampler", Value::Scalar(v)) => {
                    config.settings.use_ifd_sampler = boolean(&entry.key, v, entry.line)?;
                }
                ("ifd_k", Value::Scalar(v)) => {
                    config.settings.ifd_k = positive_double(&entry.key, v, entry.line)?;
                }
                ("outputsimulatednetwork", Value::Scalar(v)) => {
                    config.settings.output_simulated_network =
                        boolean(&entry.key, v, entry.line)?;
                }
                ("useconditionalestimation", Value::Scalar(v)) => {
                    config.settings.use_conditional_estimation =
                        boolean(&entry.key, v, entry.line)?;
                }
                ("forbidreciprocity", Value::Scalar(v)) => {
                    config.settings.forbid_reciprocity = boolean(&entry.key, v, entry.line)?;
                }
                ("meanfloor", Value::Scalar(v)) => {
                    config.settings.mean_floor = positive_double(&entry.key, v, entry.line)?;
                }
                ("sdthreshold", Value::Scalar(v)) => {
                    config.settings.sd_threshold = positive_double(&entry.key, v, entry.line)?;
                }
                ("useborisenkoupdate", Value::Scalar(v)) => {
                    config.settings.use_borisenko_update = boolean(&entry.key, v, entry.line)?;
                }
                ("learningrate", Value::Scalar(v)) => {
                    config.settings.learning_rate = positive_double(&entry.key, v, entry.line)?;
                }
                ("mintheta", Value::Scalar(v)) => {
                    config.settings.min_theta = positive_double(&entry.key, v, entry.line)?;
                }
                ("rngseed", Value::Scalar(v)) => {
                    config.rng_seed = Some(unsigned(&entry.key, v, entry.line)?);
                }
                ("arclistfile", Value::Scalar(v)) => {
                    config.arclist_file = PathBuf::from(unquote(v));
                    have_arclist = true;
                }
                ("binattrfile", Value::Scalar(v)) => {
                    config.binattr_file = Some(PathBuf::from(unquote(v)));
                }
                ("catattrfile", Value::Scalar(v)) => {
                    config.catattr_file = Some(PathBuf::from(unquote(v)));
                }
                ("contattrfile", Value::Scalar(v)) => {
                    config.contattr_file = Some(PathBuf::from(unquote(v)));
                }
                ("setattrfile", Value::Scalar(v)) => {
                    config.setattr_file = Some(PathBuf::from(unquote(v)));
                }
                ("zonefile", Value::Scalar(v)) => {
                    config.zone_file = Some(PathBuf::from(unquote(v)));
                }
                ("thetafileprefix", Value::Scalar(v)) => {
                    config.theta_file_prefix = unquote(v).to_string();
                }
                ("dzafileprefix", Value::Scalar(v)) => {
                    config.dza_file_prefix = unquote(v).to_string();
                }
                ("simnetfileprefix", Value::Scalar(v)) => {
                    config.sim_net_file_prefix = unquote(v).to_string();
                }
                ("structparams", Value::Set(elements)) => {
                    config.struct_params = plain_names(elements, &entry.key, entry.line)?;
                }
                ("attrparams", Value::Set(elements)) => {
                    config.attr_params = one_arg_pairs(elements)?;
                }
                ("dyadicparams", Value::Set(elements)) => {
                    config.dyadic_params =
                        elements.iter().map(|e| (e.name.clone(), e.args.clone())).collect();
                }
                ("attrinteractionparams", Value::Set(elements)) => {
                    config.attr_interaction_params =
                        elements.iter().map(|e| (e.name.clone(), e.args.clone())).collect();
                }
                (_, Value::Set(_)) | (_, Value::Scalar(_)) => {
                    return Err(ConfigError::UnknownKey { key: entry.key, line: entry.line });
                }
            }
        }
        if !have_arclist {
            return Err(ConfigError::MissingKey { key: "arclistFile" });
        }
        Ok(config)
    }

    /// Resolve the configured effect names against the loaded graph's
    /// attribute table, producing the ordered catalog.
    ///
    /// # Errors
    /// [`ConfigError::UnknownEffect`], [`ConfigError::WrongArgumentCount`],
    /// or [`ConfigError::UnknownAttribute`].
    pub fn build_catalog(&self, attrs: &AttributeTable) -> ConfigResult<EffectCatalog> {
        let mut structural = Vec::new();
        for name in &self.struct_params {
            let effect = StructuralEffect::from_name(name)
                .ok_or_else(|| ConfigError::UnknownEffect {
                    kind: "structural",
                    name: name.clone(),
                })?;
            structural.push(Effect {
                name: effect.name().to_string(),
                term: EffectTerm::Structural(effect),
            });
        }

        let mut attribute = Vec::new();
        for (effect_name, attr_name) in &self.attr_params {
            let effect = AttributeEffect::from_name(effect_name).ok_or_else(|| {
                ConfigError::UnknownEffect { kind: "attribute", name: effect_name.clone() }
            })?;
            let column = resolve_column(attrs, effect.attr_kind(), effect_name, attr_name)?;
            attribute.push(Effect {
                name: format!("{}_{}", effect.name(), attr_name),
                term: EffectTerm::Attribute { effect, column },
            });
        }

        let mut dyadic = Vec::new();
        for (effect_name, args) in &self.dyadic_params {
            if effect_name.eq_ignore_ascii_case("GeoDistance") {
                let [lat, lon] = two_args(effect_name, args)?;
                dyadic.push(Effect {
                    name: "GeoDistance".to_string(),
                    term: EffectTerm::GeoDistance {
                        lat: resolve_column(attrs, AttrKind::Continuous, effect_name, lat)?,
                        lon: resolve_column(attrs, AttrKind::Continuous, effect_name, lon)?,
                    },
                });
            } else if effect_name.eq_ignore_ascii_case("EuclideanDistance") {
                let [x, y, z] = three_args(effect_name, args)?;
                dyadic.push(Effect {
                    name: "EuclideanDistance".to_string(),
                    term: EffectTerm::EuclideanDistance {
                        x: resolve_column(attrs, AttrKind::Continuous, effect_name, x)?,
                        y: resolve_column(attrs, AttrKind::Continuous, effect_name, y)?,
                        z: resolve_column(attrs, AttrKind::Continuous, effect_name, z)?,
                    },
                });
            } else {
                return Err(ConfigError::UnknownEffect {
                    kind: "dyadic",
                    name: effect_name.clone(),
                });
            }
        }

        let mut interaction = Vec::new();
        for (effect_name, args) in &self.attr_interaction_params {
            if !effect_name.eq_ignore_ascii_case("BinaryPairInteraction") {
                return Err(ConfigError::UnknownEffect {
                    kind: "attribute interaction",
                    name: effect_name.clone(),
                });
            }
            let [sender, receiver] = two_args(effect_name, args)?;
            interaction.push(Effect {
                name: format!("BinaryPairInteraction_{sender}_{receiver}"),
                term: EffectTerm::BinaryPairInteraction {
                    sender: resolve_column(attrs, AttrKind::Binary, effect_name, sender)?,
                    receiver: resolve_column(attrs, AttrKind::Binary, effect_name, receiver)?,
                },
            });
        }

        Ok(EffectCatalog::new(structural, attribute, dyadic, interaction))
    }

    /// Cross-field semantic checks that need only the configuration.
    ///
    /// # Errors
    /// [`ConfigError::ConditionalWithoutZones`] or
    /// [`ConfigError::ConditionalWithForbidReciprocity`].
    pub fn validate_modes(&self) -> ConfigResult<()> {
        if self.settings.use_conditional_estimation {
            if self.zone_file.is_none() {
                return Err(ConfigError::ConditionalWithoutZones);
            }
            if self.settings.forbid_reciprocity {
                return Err(ConfigError::ConditionalWithForbidReciprocity);
            }
        }
        Ok(())
    }
}

fn resolve_column(
    attrs: &AttributeTable, kind: AttrKind, effect: &str, attribute: &str,
) -> ConfigResult<usize> {
    let (index, table) = match kind {
        AttrKind::Binary => (attrs.binary_index(attribute), "binary"),
        AttrKind::Categorical => (attrs.categorical_index(attribute), "categorical"),
        AttrKind::Continuous => (attrs.continuous_index(attribute), "continuous"),
        AttrKind::Set => (attrs.set_index(attribute), "set"),
    };
    index.ok_or_else(|| ConfigError::UnknownAttribute {
        effect: effect.to_string(),
        attribute: attribute.to_string(),
        table,
    })
}

fn plain_names(elements: &[SetElement], key: &str, line: usize) -> ConfigResult<Vec<String>> {
    elements
        .iter()
        .map(|e| {
            if e.args.is_empty() {
                Ok(e.name.clone())
            } else {
                Err(ConfigError::MalformedSetElement {
                    key: key.to_string(),
                    line,
                    element: e.name.clone(),
                })
            }
        })
        .collect()
}

fn one_arg_pairs(elements: &[SetElement]) -> ConfigResult<Vec<(String, String)>> {
    elements
        .iter()
        .map(|e| {
            if e.args.len() == 1 {
                Ok((e.name.clone(), e.args[0].clone()))
            } else {
                Err(ConfigError::WrongArgumentCount {
                    effect: e.name.clone(),
                    expected: 1,
                    actual: e.args.len(),
                })
            }
        })
        .collect()
}

fn two_args<'a>(effect: &str, args: &'a [String]) -> ConfigResult<[&'a str; 2]> {
    if args.len() != 2 {
        return Err(ConfigError::WrongArgumentCount {
            effect: effect.to_string(),
            expected: 2,
            actual: args.len(),
        });
    }
    Ok([&args[0], &args[1]])
}

fn three_args<'a>(effect: &str, args: &'a [String]) -> ConfigResult<[&'a str; 3]> {
    if args.len() != 3 {
        return Err(ConfigError::WrongArgumentCount {
            effect: effect.to_string(),
            expected: 3,
            actual: args.len(),
        });
    }
    Ok([&args[0], &args[1], &args[2]])
}

fn positive_double(key: &str, value: &str, line: usize) -> ConfigResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| ConfigError::BadValue {
            key: key.to_string(),
            line,
            value: value.to_string(),
            expected: "a positive floating-point value",
        })
}

fn positive_uint(key: &str, value: &str, line: usize) -> ConfigResult<usize> {
    value.parse::<usize>().ok().filter(|v| *v > 0).ok_or_else(|| ConfigError::BadValue {
        key: key.to_string(),
        line,
        value: value.to_string(),
        expected: "a positive integer",
    })
}

fn unsigned(key: &str, value: &str, line: usize) -> ConfigResult<u64> {
    value.parse::<u64>().map_err(|_| ConfigError::BadValue {
        key: key.to_string(),
        line,
        value: value.to_string(),
        expected: "a non-negative integer",
    })
}

fn boolean(key: &str, value: &str, line: usize) -> ConfigResult<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::BadValue {
            key: key.to_string(),
            line,
            value: value.to_string(),
            expected: "True or False",
        })
    }
}

/// Strip optional surrounding double quotes from a path or prefix value.
fn unquote(value: &str) -> &str {
    value.strip_prefix('"').and_then(|v| v.strip_suffix('"')).unwrap_or(value)
}
