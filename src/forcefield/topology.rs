//! Perception of angles, proper dihedrals and 1-4 pairs from a bond graph.

use super::graph::MolecularGraph;
use std::collections::HashSet;

/// Every `i-j-k` with `j` bonded to both ends.
///
/// Centres are visited in index order and each neighbour pair in ascending
/// order, so the result is deterministic for a given graph.
pub fn perceive_angles(graph: &MolecularGraph) -> Vec<[usize; 3]> {
    let mut angles = Vec::new();
    for (center, nbrs) in graph.neighbors.iter().enumerate() {
        for (a, &i) in nbrs.iter().enumerate() {
            for &k in &nbrs[a + 1..] {
                angles.push([i, center, k]);
            }
        }
    }
    angles
}

/// Every proper dihedral `i-j-k-l` around each bond `j-k`, in bond order.
pub fn perceive_dihedrals(graph: &MolecularGraph) -> Vec<[usize; 4]> {
    let mut dihedrals = Vec::new();
    for &[j, k] in &graph.bonds {
        for &i in graph.neighbors[j].iter().filter(|&&i| i != k) {
            for &l in graph.neighbors[k].iter().filter(|&&l| l != j && l != i) {
                dihedrals.push([i, j, k, l]);
            }
        }
    }
    dihedrals
}

/// 1-4 pairs: the ends of each dihedral, sorted, first occurrence only.
///
/// Ends that are already 1-2 or 1-3 related (small rings) are skipped.
pub fn perceive_pairs(graph: &MolecularGraph, dihedrals: &[[usize; 4]]) -> Vec<[usize; 2]> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();
    for &[i, _, _, l] in dihedrals {
        let pair = [i.min(l), i.max(l)];
        if !seen.insert(pair) {
            continue;
        }
        if graph.are_bonded(i, l) || shares_neighbor(graph, i, l) {
            continue;
        }
        pairs.push(pair);
    }
    pairs
}

fn shares_neighbor(graph: &MolecularGraph, a: usize, b: usize) -> bool {
    graph.neighbors[a]
        .iter()
        .any(|&n| graph.neighbors[b].binary_search(&n).is_ok())
}
