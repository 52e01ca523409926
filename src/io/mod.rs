//! io — network, attribute, and zone file formats.
//!
//! Pajek arc lists come in and go out through [`pajek`]; the four typed
//! attribute files load through [`attributes`]; snowball zone vectors load
//! through [`zones`]. Every loader reports failures as
//! [`NetworkFileError`] values carrying the offending path and line, per
//! the fatal-error policy: report, free partial state, exit non-zero.

pub mod attributes;
pub mod errors;
pub mod pajek;
pub mod zones;

pub use self::errors::{FileResult, NetworkFileError};
