//! effects — the change-statistic catalog.
//!
//! Purpose
//! -------
//! Provide every sufficient-statistic change function the samplers evaluate,
//! together with the flat, indexed catalog that fixes the estimation order
//! shared by θ, dzA, and the output headers. Three flavours of statistic
//! live here: purely structural ([`structural`]), nodal-attribute-indexed
//! ([`attribute`]), and dyadic-covariate ([`dyadic`]); the [`registry`]
//! module binds configured instances of them into an [`EffectCatalog`].
//!
//! Every function is a pure `delta(g, i, j)` for *adding* arc `i -> j`;
//! callers realize deletions by temporarily removing the arc, evaluating
//! the same function, and negating the result.

pub mod attribute;
pub mod dyadic;
pub mod registry;
pub mod structural;

pub use self::registry::{
    AttrKind, AttributeEffect, Effect, EffectCatalog, EffectTerm, StructuralEffect,
};
pub use self::structural::DECAY;
