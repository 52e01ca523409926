//! Flat, indexed catalog of change statistics.
//!
//! Purpose
//! -------
//! Replace the reference implementation's parallel function-pointer arrays
//! with a tagged union: every configured effect becomes an [`Effect`] — a
//! display name plus an [`EffectTerm`] variant binding the statistic to its
//! attribute columns — and an [`EffectCatalog`] holds them in the fixed
//! estimation order (structural, then attribute, then dyadic, then
//! attribute interaction). θ, dzA, and the output headers all share this
//! order.
//!
//! Key behaviors
//! -------------
//! - `Effect::change_stat(&Digraph, i, j)` is pure: shared reference, no
//!   mutation, returning the change from *adding* arc `i -> j` to the
//!   current graph state. Callers handle deletions by temporary removal
//!   and negation.
//! - Name lookup (`from_name`) is ASCII case-insensitive, matching the
//!   configuration parser.
//! - The catalog knows which structural effects it carries so the driver
//!   can reject `Arc` under the IFD sampler before any output is opened.
use ndarray::Array1;

use crate::effects::{attribute, dyadic, structural};
use crate::graph::Digraph;

/// Structural (purely graph-dependent) effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralEffect {
    Arc,
    Reciprocity,
    Sink,
    Source,
    Isolates,
    InTwoStars,
    OutTwoStars,
    TransitiveTriangles,
    CyclicTriangles,
    AltInStars,
    AltOutStars,
    AltKTrianglesT,
    AltTwoPathsT,
}

impl StructuralEffect {
    /// All registered structural effects, in catalog-name order.
    pub const ALL: [StructuralEffect; 13] = [
        StructuralEffect::Arc,
        StructuralEffect::Reciprocity,
        StructuralEffect::Sink,
        StructuralEffect::Source,
        StructuralEffect::Isolates,
        StructuralEffect::InTwoStars,
        StructuralEffect::OutTwoStars,
        StructuralEffect::TransitiveTriangles,
        StructuralEffect::CyclicTriangles,
        StructuralEffect::AltInStars,
        StructuralEffect::AltOutStars,
        StructuralEffect::AltKTrianglesT,
        StructuralEffect::AltTwoPathsT,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StructuralEffect::Arc => "Arc",
            StructuralEffect::Reciprocity => "Reciprocity",
            StructuralEffect::Sink => "Sink",
            StructuralEffect::Source => "Source",
            StructuralEffect::Isolates => "Isolates",
            StructuralEffect::InTwoStars => "InTwoStars",
            StructuralEffect::OutTwoStars => "OutTwoStars",
            StructuralEffect::TransitiveTriangles => "TransitiveTriangles",
            StructuralEffect::CyclicTriangles => "CyclicTriangles",
            StructuralEffect::AltInStars => "AltInStars",
            StructuralEffect::AltOutStars => "AltOutStars",
            StructuralEffect::AltKTrianglesT => "AltKTrianglesT",
            StructuralEffect::AltTwoPathsT => "AltTwoPathsT",
        }
    }

    /// Resolve a configuration name, case-insensitively.
    pub fn from_name(name: &str) -> Option<StructuralEffect> {
        StructuralEffect::ALL.iter().copied().find(|e| e.name().eq_ignore_ascii_case(name))
    }

    pub fn change_stat(&self, g: &Digraph, i: u32, j: u32) -> f64 {
        match self {
            StructuralEffect::Arc => structural::change_arc(g, i, j),
            StructuralEffect::Reciprocity => structural::change_reciprocity(g, i, j),
            StructuralEffect::Sink => structural::change_sink(g, i, j),
            StructuralEffect::Source => structural::change_source(g, i, j),
            StructuralEffect::Isolates => structural::change_isolates(g, i, j),
            StructuralEffect::InTwoStars => structural::change_in_two_stars(g, i, j),
            StructuralEffect::OutTwoStars => structural::change_out_two_stars(g, i, j),
            StructuralEffect::TransitiveTriangles => {
                structural::change_transitive_triangles(g, i, j)
            }
            StructuralEffect::CyclicTriangles => structural::change_cyclic_triangles(g, i, j),
            StructuralEffect::AltInStars => structural::change_alt_in_stars(g, i, j),
            StructuralEffect::AltOutStars => structural::change_alt_out_stars(g, i, j),
            StructuralEffect::AltKTrianglesT => structural::change_alt_k_triangles_t(g, i, j),
            StructuralEffect::AltTwoPathsT => structural::change_alt_two_paths_t(g, i, j),
        }
    }
}

/// Which attribute table an effect reads its column from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Binary,
    Categorical,
    Continuous,
    Set,
}

/// Nodal-attribute effects; each binds one column of the kind reported by
/// [`AttributeEffect::attr_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeEffect {
    Sender,
    Receiver,
    Interaction,
    Matching,
    MatchingReciprocity,
    ContinuousSender,
    ContinuousReceiver,
    Diff,
    DiffReciprocity,
    JaccardSimilarity,
}

impl AttributeEffect {
    pub const ALL: [AttributeEffect; 10] = [
        AttributeEffect::Sender,
        AttributeEffect::Receiver,
        AttributeEffect::Interaction,
        AttributeEffect::Matching,
        AttributeEffect::MatchingReciprocity,
        AttributeEffect::ContinuousSender,
        AttributeEffect::ContinuousReceiver,
        AttributeEffect::Diff,
        AttributeEffect::DiffReciprocity,
        AttributeEffect::JaccardSimilarity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttributeEffect::Sender => "Sender",
            AttributeEffect::Receiver => "Receiver",
            AttributeEffect::Interaction => "Interaction",
            AttributeEffect::Matching => "Matching",
            AttributeEffect::MatchingReciprocity => "MatchingReciprocity",
            AttributeEffect::ContinuousSender => "ContinuousSender",
            AttributeEffect::ContinuousReceiver => "ContinuousReceiver",
            AttributeEffect::Diff => "Diff",
            AttributeEffect::DiffReciprocity => "DiffReciprocity",
            AttributeEffect::JaccardSimilarity => "JaccardSimilarity",
        }
    }

    pub fn from_name(name: &str) -> Option<AttributeEffect> {
        AttributeEffect::ALL.iter().copied().find(|e| e.name().eq_ignore_ascii_case(name))
    }

    /// The attribute table this effect's column lives in.
    pub fn attr_kind(&self) -> AttrKind {
        match self {
            AttributeEffect::Sender | AttributeEffect::Receiver | AttributeEffect::Interaction => {
                AttrKind::Binary
            }
            AttributeEffect::Matching | AttributeEffect::MatchingReciprocity => {
                AttrKind::Categorical
            }
            AttributeEffect::ContinuousSender
            | AttributeEffect::ContinuousReceiver
            | AttributeEffect::Diff
            | AttributeEffect::DiffReciprocity => AttrKind::Continuous,
            AttributeEffect::JaccardSimilarity => AttrKind::Set,
        }
    }

    pub fn change_stat(&self, g: &Digraph, i: u32, j: u32, column: usize) -> f64 {
        match self {
            AttributeEffect::Sender => attribute::change_sender(g, i, j, column),
            AttributeEffect::Receiver => attribute::change_receiver(g, i, j, column),
            AttributeEffect::Interaction => attribute::change_interaction(g, i, j, column),
            AttributeEffect::Matching => attribute::change_matching(g, i, j, column),
            AttributeEffect::MatchingReciprocity => {
                attribute::change_matching_reciprocity(g, i, j, column)
            }
            AttributeEffect::ContinuousSender => {
                attribute::change_continuous_sender(g, i, j, column)
            }
            AttributeEffect::ContinuousReceiver => {
                attribute::change_continuous_receiver(g, i, j, column)
            }
            AttributeEffect::Diff => attribute::change_diff(g, i, j, column),
            AttributeEffect::DiffReciprocity => {
                attribute::change_diff_reciprocity(g, i, j, column)
            }
            AttributeEffect::JaccardSimilarity => {
                attribute::change_jaccard_similarity(g, i, j, column)
            }
        }
    }
}

/// One catalog entry: the statistic variant with its column bindings.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectTerm {
    Structural(StructuralEffect),
    Attribute { effect: AttributeEffect, column: usize },
    GeoDistance { lat: usize, lon: usize },
    EuclideanDistance { x: usize, y: usize, z: usize },
    BinaryPairInteraction { sender: usize, receiver: usize },
}

/// A configured effect: display name (used in output headers) plus term.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub name: String,
    pub term: EffectTerm,
}

impl Effect {
    /// Change in this effect's statistic from adding arc `i -> j` to the
    /// current state of `g`.
    pub fn change_stat(&self, g: &Digraph, i: u32, j: u32) -> f64 {
        match &self.term {
            EffectTerm::Structural(effect) => effect.change_stat(g, i, j),
            EffectTerm::Attribute { effect, column } => effect.change_stat(g, i, j, *column),
            EffectTerm::GeoDistance { lat, lon } => {
                dyadic::change_geo_distance(g, i, j, *lat, *lon)
            }
            EffectTerm::EuclideanDistance { x, y, z } => {
                dyadic::change_euclidean_distance(g, i, j, *x, *y, *z)
            }
            EffectTerm::BinaryPairInteraction { sender, receiver } => {
                attribute::change_binary_pair_interaction(g, i, j, *sender, *receiver)
            }
        }
    }
}

/// Ordered effect catalog shared by the samplers, the estimators, and the
/// output headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectCatalog {
    effects: Vec<Effect>,
    num_structural: usize,
    num_attribute: usize,
    num_dyadic: usize,
    num_interaction: usize,
}

impl EffectCatalog {
    /// Assemble the catalog in the fixed estimation order.
    pub fn new(
        structural: Vec<Effect>, attribute: Vec<Effect>, dyadic: Vec<Effect>,
        interaction: Vec<Effect>,
    ) -> EffectCatalog {
        let num_structural = structural.len();
        let num_attribute = attribute.len();
        let num_dyadic = dyadic.len();
        let num_interaction = interaction.len();
        let mut effects = structural;
        effects.extend(attribute);
        effects.extend(dyadic);
        effects.extend(interaction);
        EffectCatalog { effects, num_structural, num_attribute, num_dyadic, num_interaction }
    }

    /// Total number of effects (= length of θ).
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn num_structural(&self) -> usize {
        self.num_structural
    }

    pub fn num_attribute(&self) -> usize {
        self.num_attribute
    }

    pub fn num_dyadic(&self) -> usize {
        self.num_dyadic
    }

    pub fn num_interaction(&self) -> usize {
        self.num_interaction
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Display names in estimation order, for output headers.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().map(|e| e.name.as_str())
    }

    /// True when the catalog carries the given structural effect.
    pub fn contains_structural(&self, effect: StructuralEffect) -> bool {
        self.effects[..self.num_structural]
            .iter()
            .any(|e| e.term == EffectTerm::Structural(effect))
    }

    /// Fill `out[k]` with every effect's change statistic for adding arc
    /// `i -> j`. `out` must have length `self.len()`.
    pub fn change_stats_into(&self, g: &Digraph, i: u32, j: u32, out: &mut Array1<f64>) {
        debug_assert_eq!(out.len(), self.effects.len());
        for (slot, effect) in out.iter_mut().zip(self.effects.iter()) {
            *slot = effect.change_stat(g, i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AttributeTable, BinaryAttribute};

    fn catalog() -> EffectCatalog {
        EffectCatalog::new(
            vec![
                Effect {
                    name: "Arc".to_string(),
                    term: EffectTerm::Structural(StructuralEffect::Arc),
                },
                Effect {
                    name: "Reciprocity".to_string(),
                    term: EffectTerm::Structural(StructuralEffect::Reciprocity),
                },
            ],
            vec![Effect {
                name: "Sender_treated".to_string(),
                term: EffectTerm::Attribute { effect: AttributeEffect::Sender, column: 0 },
            }],
            vec![],
            vec![],
        )
    }

    fn graph() -> Digraph {
        let mut g = Digraph::new(3);
        g.insert_arc(1, 0).unwrap();
        g.attach_attributes(AttributeTable {
            binary: vec![BinaryAttribute {
                name: "treated".to_string(),
                values: vec![Some(true), Some(false), Some(false)],
            }],
            ..AttributeTable::new()
        })
        .unwrap();
        g
    }

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(StructuralEffect::from_name("reciprocity"), Some(StructuralEffect::Reciprocity));
        assert_eq!(StructuralEffect::from_name("ALTINSTARS"), Some(StructuralEffect::AltInStars));
        assert_eq!(StructuralEffect::from_name("nonsense"), None);
        assert_eq!(AttributeEffect::from_name("jaccardsimilarity"),
            Some(AttributeEffect::JaccardSimilarity));
    }

    #[test]
    fn attribute_effects_know_their_table() {
        assert_eq!(AttributeEffect::Sender.attr_kind(), AttrKind::Binary);
        assert_eq!(AttributeEffect::Matching.attr_kind(), AttrKind::Categorical);
        assert_eq!(AttributeEffect::Diff.attr_kind(), AttrKind::Continuous);
        assert_eq!(AttributeEffect::JaccardSimilarity.attr_kind(), AttrKind::Set);
    }

    #[test]
    fn catalog_preserves_order_and_counts() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.num_structural(), 2);
        assert_eq!(catalog.num_attribute(), 1);
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["Arc", "Reciprocity", "Sender_treated"]);
        assert!(catalog.contains_structural(StructuralEffect::Arc));
        assert!(!catalog.contains_structural(StructuralEffect::Sink));
    }

    #[test]
    fn change_stats_into_fills_in_catalog_order() {
        let catalog = catalog();
        let g = graph();
        let mut out = Array1::zeros(catalog.len());
        // Adding 0 -> 1: reverse arc exists, sender is treated.
        catalog.change_stats_into(&g, 0, 1, &mut out);
        assert_eq!(out.as_slice().unwrap(), &[1.0, 1.0, 1.0]);
        // Adding 2 -> 0: no reverse arc, sender untreated.
        catalog.change_stats_into(&g, 2, 0, &mut out);
        assert_eq!(out.as_slice().unwrap(), &[1.0, 0.0, 0.0]);
    }
}
