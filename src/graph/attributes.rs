//! Typed node attributes for directed networks.
//!
//! Purpose
//! -------
//! Hold the per-node covariates that attribute and dyadic change statistics
//! read: binary (0/1), categorical (non-negative id), continuous (`f64`),
//! and set-valued (small bitsets). Attributes are immutable once attached
//! to a graph; samplers and change statistics only ever read them.
//!
//! Conventions
//! -----------
//! - Missing data is explicit: binary and categorical cells are `Option`,
//!   continuous cells use `f64::NAN`, set cells are `Option<BitSet>`.
//!   Change statistics treat a missing operand as a zero contribution.
//! - Columns are named; lookups by name are ASCII case-insensitive to match
//!   the configuration parser's treatment of identifiers.
//! - One value per node, in node-id order. Length validation happens when a
//!   table is attached to a [`crate::graph::Digraph`].
use bit_set::BitSet;

/// A named binary (0/1) attribute column; `None` marks missing data.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryAttribute {
    pub name: String,
    pub values: Vec<Option<bool>>,
}

/// A named categorical attribute column holding non-negative category ids;
/// `None` marks missing data (a negative or `NA` cell in the input file).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalAttribute {
    pub name: String,
    pub values: Vec<Option<u32>>,
}

/// A named continuous attribute column; `NaN` marks missing data.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousAttribute {
    pub name: String,
    pub values: Vec<f64>,
}

/// A named set-valued attribute column; each cell is a small bitset of
/// element ids, `None` marks missing data.
#[derive(Debug, Clone, PartialEq)]
pub struct SetAttribute {
    pub name: String,
    pub values: Vec<Option<BitSet>>,
}

/// All attribute columns attached to a graph, grouped by type.
///
/// Effects reference columns by `(table, index)` pairs resolved from names
/// at configuration-build time, so the hot path never touches strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    pub binary: Vec<BinaryAttribute>,
    pub categorical: Vec<CategoricalAttribute>,
    pub continuous: Vec<ContinuousAttribute>,
    pub sets: Vec<SetAttribute>,
}

impl AttributeTable {
    pub fn new() -> AttributeTable {
        AttributeTable::default()
    }

    /// True when no columns of any type are present.
    pub fn is_empty(&self) -> bool {
        self.binary.is_empty()
            && self.categorical.is_empty()
            && self.continuous.is_empty()
            && self.sets.is_empty()
    }

    /// Index of the binary column called `name`, case-insensitively.
    pub fn binary_index(&self, name: &str) -> Option<usize> {
        self.binary.iter().position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Index of the categorical column called `name`, case-insensitively.
    pub fn categorical_index(&self, name: &str) -> Option<usize> {
        self.categorical.iter().position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Index of the continuous column called `name`, case-insensitively.
    pub fn continuous_index(&self, name: &str) -> Option<usize> {
        self.continuous.iter().position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Index of the set column called `name`, case-insensitively.
    pub fn set_index(&self, name: &str) -> Option<usize> {
        self.sets.iter().position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Iterate `(name, len)` over every column, for length validation.
    pub fn column_lengths(&self) -> impl Iterator<Item = (&str, usize)> {
        let binary = self.binary.iter().map(|c| (c.name.as_str(), c.values.len()));
        let categorical = self.categorical.iter().map(|c| (c.name.as_str(), c.values.len()));
        let continuous = self.continuous.iter().map(|c| (c.name.as_str(), c.values.len()));
        let sets = self.sets.iter().map(|c| (c.name.as_str(), c.values.len()));
        binary.chain(categorical).chain(continuous).chain(sets)
    }
}
