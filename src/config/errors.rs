//! Errors for configuration parsing and resolution.
//!
//! Two families, mirroring the fatal-error taxonomy: *syntax* errors carry
//! the 1-based line in the configuration file; *semantics* errors surface
//! after parsing, when effect names are resolved against the loaded graph
//! or cross-field rules are checked.
use std::path::PathBuf;

/// Result alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Unified error type for the configuration layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Underlying I/O failure reading the configuration file.
    Io { path: PathBuf, message: String },

    /// A non-blank line has no `key = value` shape.
    MissingEquals { line: usize },

    /// A key that is not part of the configuration vocabulary.
    UnknownKey { key: String, line: usize },

    /// A scalar value that cannot be parsed as the key's type.
    BadValue { key: String, line: usize, value: String, expected: &'static str },

    /// A `{ ... }` set value with no closing brace.
    UnterminatedSet { key: String, line: usize },

    /// A set element with unbalanced parentheses or an empty name.
    MalformedSetElement { key: String, line: usize, element: String },

    /// A required key is absent.
    MissingKey { key: &'static str },

    /// An effect name that no registered statistic matches.
    UnknownEffect { kind: &'static str, name: String },

    /// An effect was given the wrong number of bound attributes.
    WrongArgumentCount { effect: String, expected: usize, actual: usize },

    /// An effect references an attribute column the graph does not carry.
    UnknownAttribute { effect: String, attribute: String, table: &'static str },

    /// `Arc` cannot be a structural effect under the IFD sampler, which
    /// models the arc count through its auxiliary parameter.
    ArcWithIfdSampler,

    /// Conditional estimation requires a zone file.
    ConditionalWithoutZones,

    /// Conditional estimation and forbidReciprocity are mutually exclusive.
    ConditionalWithForbidReciprocity,
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "cannot read config file {}: {message}", path.display())
            }
            ConfigError::MissingEquals { line } => {
                write!(f, "config line {line}: expected 'key = value'.")
            }
            ConfigError::UnknownKey { key, line } => {
                write!(f, "config line {line}: unknown key '{key}'.")
            }
            ConfigError::BadValue { key, line, value, expected } => {
                write!(f, "config line {line}: value '{value}' for '{key}' is not {expected}.")
            }
            ConfigError::UnterminatedSet { key, line } => {
                write!(f, "config line {line}: set value for '{key}' has no closing brace.")
            }
            ConfigError::MalformedSetElement { key, line, element } => {
                write!(f, "config line {line}: malformed element '{element}' in '{key}'.")
            }
            ConfigError::MissingKey { key } => {
                write!(f, "required config key '{key}' is missing.")
            }
            ConfigError::UnknownEffect { kind, name } => {
                write!(f, "unknown {kind} effect '{name}'.")
            }
            ConfigError::WrongArgumentCount { effect, expected, actual } => {
                write!(f, "effect '{effect}' takes {expected} attribute name(s), got {actual}.")
            }
            ConfigError::UnknownAttribute { effect, attribute, table } => {
                write!(
                    f,
                    "effect '{effect}' references {table} attribute '{attribute}', which is not loaded."
                )
            }
            ConfigError::ArcWithIfdSampler => {
                write!(
                    f,
                    "cannot include the Arc effect when using the IFD sampler; unset \
                     useIFDsampler or remove Arc from structParams."
                )
            }
            ConfigError::ConditionalWithoutZones => {
                write!(f, "useConditionalEstimation requires zoneFile.")
            }
            ConfigError::ConditionalWithForbidReciprocity => {
                write!(f, "forbidReciprocity is not supported with conditional estimation.")
            }
        }
    }
}
