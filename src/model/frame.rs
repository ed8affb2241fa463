use serde::{Deserialize, Serialize};

/// Frame-level metadata and the periodic box tensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub step: u64,
    pub dimensions: u8,
    /// `(lx, ly, lz, xy, xz, yz)` in export length units.
    pub box_tensor: [f64; 6],
}

/// Per-particle arrays; row `i` of every array describes particle `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleSection {
    pub positions: Vec<[f64; 3]>,
    pub masses: Vec<f64>,
    pub charges: Vec<f64>,
    /// Natural-sorted distinct particle type names.
    pub types: Vec<String>,
    pub typeids: Vec<usize>,
    /// Rigid-body id per particle, `-1` when the particle is not rigid.
    pub bodies: Vec<i32>,
}

/// A connectivity section (bonds, angles, dihedrals or pairs).
///
/// `G` is the fixed-size group of particle indices, e.g. `[usize; 2]` for bonds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section<G> {
    /// Natural-sorted distinct type keys such as `"opls_135-opls_140"`.
    pub types: Vec<String>,
    pub typeids: Vec<usize>,
    pub groups: Vec<G>,
}

impl<G> Section<G> {
    pub fn empty() -> Self {
        Self {
            types: Vec::new(),
            typeids: Vec::new(),
            groups: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Everything a GSD/HOOMD writer persists for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedFrame {
    pub configuration: Configuration,
    pub particles: ParticleSection,
    pub bonds: Section<[usize; 2]>,
    pub angles: Section<[usize; 3]>,
    pub dihedrals: Section<[usize; 4]>,
    pub pairs: Section<[usize; 2]>,
}

impl ExportedFrame {
    #[inline]
    pub fn n_particles(&self) -> usize {
        self.particles.positions.len()
    }

    #[inline]
    pub fn n_bonds(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn n_angles(&self) -> usize {
        self.angles.len()
    }

    #[inline]
    pub fn n_dihedrals(&self) -> usize {
        self.dihedrals.len()
    }

    #[inline]
    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }
}
