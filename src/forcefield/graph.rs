//! Bond graph of a compound, resolved to elements.

use super::error::Error;
use crate::model::compound::Compound;
use crate::model::element::Element;

/// Elements and adjacency of a compound, validated for typing.
///
/// Neighbour lists are sorted ascending and free of duplicates; `bonds` keeps
/// the first occurrence of each bond in compound order.
#[derive(Debug, Clone)]
pub struct MolecularGraph {
    pub elements: Vec<Element>,
    pub neighbors: Vec<Vec<usize>>,
    pub bonds: Vec<[usize; 2]>,
}

impl MolecularGraph {
    /// # Errors
    ///
    /// Returns [`Error::InvalidBond`] for an out-of-range or self bond and
    /// [`Error::UnknownElement`] for a particle whose name is not an element.
    pub fn from_compound(compound: &Compound) -> Result<Self, Error> {
        let n_particles = compound.particles.len();

        let elements = compound
            .particles
            .iter()
            .enumerate()
            .map(|(index, p)| p.element().ok_or_else(|| Error::unknown_element(index, &p.name)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut neighbors = vec![Vec::new(); n_particles];
        let mut bonds: Vec<[usize; 2]> = Vec::with_capacity(compound.bonds.len());
        for bond in &compound.bonds {
            if bond.i >= n_particles || bond.j >= n_particles || bond.i == bond.j {
                return Err(Error::InvalidBond {
                    i: bond.i,
                    j: bond.j,
                    n_particles,
                });
            }
            if neighbors[bond.i].contains(&bond.j) {
                continue;
            }
            neighbors[bond.i].push(bond.j);
            neighbors[bond.j].push(bond.i);
            bonds.push([bond.i, bond.j]);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Ok(Self {
            elements,
            neighbors,
            bonds,
        })
    }

    #[inline]
    pub fn degree(&self, idx: usize) -> usize {
        self.neighbors[idx].len()
    }

    #[inline]
    pub fn are_bonded(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].binary_search(&b).is_ok()
    }

    /// Number of neighbours of `idx` that are `element`.
    pub fn neighbor_count(&self, idx: usize, element: Element) -> usize {
        self.neighbors[idx]
            .iter()
            .filter(|&&n| self.elements[n] == element)
            .count()
    }
}
