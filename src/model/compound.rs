use super::particle::Particle;
use super::simbox::SimBox;

/// Covalent bond between two particles, stored with `i <= j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }
}

/// A flat molecular compound: particles and bonds in insertion order plus an
/// optional periodic box.
///
/// Insertion order is the ordering contract for every exported per-particle
/// and per-bond array.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    pub name: String,
    pub particles: Vec<Particle>,
    pub bonds: Vec<Bond>,
    pub simbox: Option<SimBox>,
}

impl Compound {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a particle and returns its index.
    pub fn add_particle(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    pub fn add_bond(&mut self, i: usize, j: usize) {
        self.bonds.push(Bond::new(i, j));
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.simbox.is_some()
    }

    pub fn xyz(&self) -> Vec<[f64; 3]> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// First bond that references a missing particle or bonds a particle to itself.
    pub fn invalid_bond(&self) -> Option<&Bond> {
        let n = self.particles.len();
        self.bonds.iter().find(|b| b.j >= n || b.i == b.j)
    }

    /// Puts every particle named `name` into a new rigid body.
    ///
    /// The new body id is one past the largest id already in use (0 if none).
    /// Returns the id, or `None` when no particle carries that name.
    pub fn label_rigid_bodies(&mut self, name: &str) -> Option<usize> {
        if !self.particles.iter().any(|p| p.name == name) {
            return None;
        }

        let next_id = self
            .particles
            .iter()
            .filter_map(|p| p.rigid_id)
            .max()
            .map_or(0, |id| id + 1);

        for particle in self.particles.iter_mut().filter(|p| p.name == name) {
            particle.rigid_id = Some(next_id);
        }
        Some(next_id)
    }

    pub fn rigid_body_count(&self) -> usize {
        let mut ids: Vec<usize> = self.particles.iter().filter_map(|p| p.rigid_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}
