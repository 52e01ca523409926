//! Attribute-indexed change statistics.
//!
//! Each function takes the column index it is bound to (resolved from the
//! configuration at build time) and returns the change from adding arc
//! `i -> j`. Missing data contributes zero: a missing binary or categorical
//! cell, a `NaN` continuous cell, or a missing set cell silently drops the
//! term, matching the reference implementation's treatment of `NA` values.
use crate::graph::Digraph;

/// Sender: 1 when the binary attribute of the sender is set.
pub fn change_sender(g: &Digraph, i: u32, _j: u32, column: usize) -> f64 {
    binary_value(g, column, i)
}

/// Receiver: 1 when the binary attribute of the receiver is set.
pub fn change_receiver(g: &Digraph, _i: u32, j: u32, column: usize) -> f64 {
    binary_value(g, column, j)
}

/// Interaction: 1 when the binary attribute is set on both endpoints.
pub fn change_interaction(g: &Digraph, i: u32, j: u32, column: usize) -> f64 {
    binary_value(g, column, i) * binary_value(g, column, j)
}

/// Matching: 1 when both endpoints carry the same (non-missing) category.
pub fn change_matching(g: &Digraph, i: u32, j: u32, column: usize) -> f64 {
    let values = &g.attributes().categorical[column].values;
    match (values[i as usize], values[j as usize]) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    }
}

/// Matching reciprocity: matching categories and the reverse arc exists.
pub fn change_matching_reciprocity(g: &Digraph, i: u32, j: u32, column: usize) -> f64 {
    if g.is_arc(j, i) { change_matching(g, i, j, column) } else { 0.0 }
}

/// Continuous sender: the sender's value, 0 when missing.
pub fn change_continuous_sender(g: &Digraph, i: u32, _j: u32, column: usize) -> f64 {
    continuous_value(g, column, i)
}

/// Continuous receiver: the receiver's value, 0 when missing.
pub fn change_continuous_receiver(g: &Digraph, _i: u32, j: u32, column: usize) -> f64 {
    continuous_value(g, column, j)
}

/// Diff: absolute difference of the endpoint values, 0 when either is
/// missing.
pub fn change_diff(g: &Digraph, i: u32, j: u32, column: usize) -> f64 {
    let values = &g.attributes().continuous[column].values;
    let (a, b) = (values[i as usize], values[j as usize]);
    if a.is_nan() || b.is_nan() { 0.0 } else { (a - b).abs() }
}

/// Diff reciprocity: absolute difference gated on the reverse arc.
pub fn change_diff_reciprocity(g: &Digraph, i: u32, j: u32, column: usize) -> f64 {
    if g.is_arc(j, i) { change_diff(g, i, j, column) } else { 0.0 }
}

/// Jaccard similarity of the endpoint sets: `|A ∩ B| / |A ∪ B|`, with 0 for
/// missing cells and for two empty sets.
pub fn change_jaccard_similarity(g: &Digraph, i: u32, j: u32, column: usize) -> f64 {
    let values = &g.attributes().sets[column].values;
    match (&values[i as usize], &values[j as usize]) {
        (Some(a), Some(b)) => {
            let union = a.union(b).count();
            if union == 0 {
                0.0
            } else {
                a.intersection(b).count() as f64 / union as f64
            }
        }
        _ => 0.0,
    }
}

/// Cross-attribute interaction: 1 when binary column `sender_column` is set
/// on the sender and binary column `receiver_column` is set on the receiver.
pub fn change_binary_pair_interaction(
    g: &Digraph, i: u32, j: u32, sender_column: usize, receiver_column: usize,
) -> f64 {
    binary_value(g, sender_column, i) * binary_value(g, receiver_column, j)
}

fn binary_value(g: &Digraph, column: usize, node: u32) -> f64 {
    match g.attributes().binary[column].values[node as usize] {
        Some(true) => 1.0,
        _ => 0.0,
    }
}

fn continuous_value(g: &Digraph, column: usize, node: u32) -> f64 {
    let value = g.attributes().continuous[column].values[node as usize];
    if value.is_nan() { 0.0 } else { value }
}
