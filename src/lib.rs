//! A pure Rust library for exporting molecular compounds to GSD/HOOMD frames.
//! It rescales coordinates, the periodic box, masses and charges into reduced
//! units and builds the naturally sorted type tables a HOOMD simulation reads.
//!
//! # Features
//!
//! - **Unit reduction** — Lengths from nm to Å over a reference distance,
//!   masses over a reference mass, charges over `sqrt(4π·ε0·d·E)`
//! - **Triclinic boxes** — `(lx, ly, lz, xy, xz, yz)` box tensors from edge
//!   lengths and angles
//! - **Type tables** — Deduplicated, naturally sorted particle, bond, angle,
//!   dihedral and pair types with per-entity type ids
//! - **Force fields** — Rule-based OPLS-AA typing with angle, dihedral and 1-4
//!   pair perception, or any injected [`ForcefieldApplicator`]
//! - **I/O** — Read MOL2 structures; write and read frames as JSON
//!
//! # Quick Start
//!
//! The main entry point is the [`export`] function, which takes a [`Compound`]
//! and an [`ExportConfig`] and produces an [`ExportedFrame`]:
//!
//! ```
//! use gsd_forge::{Compound, Element, Particle, SimBox};
//! use gsd_forge::{export, ExportConfig, ReferenceUnits};
//!
//! // Ethane (C₂H₆), coordinates in nm
//! let mut ethane = Compound::new("ethane");
//! let c1 = ethane.add_particle(Particle::from_element(Element::C, [0.000, 0.000, 0.000]));
//! let c2 = ethane.add_particle(Particle::from_element(Element::C, [0.154, 0.000, 0.000]));
//! ethane.add_bond(c1, c2);
//! for (carbon, x) in [(c1, -0.036), (c2, 0.190)] {
//!     for (y, z) in [(0.103, 0.0), (-0.051, 0.089), (-0.051, -0.089)] {
//!         let h = ethane.add_particle(Particle::from_element(Element::H, [x, y, z]));
//!         ethane.add_bond(carbon, h);
//!     }
//! }
//! ethane.simbox = Some(SimBox::orthorhombic([2.0, 3.0, 4.0])?);
//!
//! let config = ExportConfig::default()
//!     .with_forcefield("oplsaa")
//!     .with_units(ReferenceUnits::new(1.0, 1.0, 12.011));
//! let frame = export(&ethane, &config)?;
//!
//! // Box in Å: (lx, ly, lz, xy, xz, yz)
//! assert_eq!(frame.configuration.box_tensor, [20.0, 30.0, 40.0, 0.0, 0.0, 0.0]);
//!
//! // Particle types and masses in reduced units
//! assert_eq!(frame.particles.types, vec!["opls_135", "opls_140"]);
//! assert_eq!(frame.particles.masses[0], 1.0);
//!
//! // Bonded sections perceived from the bond graph
//! assert_eq!(frame.bonds.types, vec!["opls_135-opls_135", "opls_135-opls_140"]);
//! assert_eq!(frame.n_angles(), 12);
//! assert_eq!(frame.n_dihedrals(), 9);
//! assert_eq!(frame.n_pairs(), 9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — MOL2 input and JSON frame output
//! - [`export`] / [`export_with`] — The export transform
//! - [`ExportConfig`] — Force field, reference units, box override, shifting
//!
//! # Data Types
//!
//! ## Input Structures
//!
//! - [`Compound`] — Particles and bonds in insertion order with an optional box
//! - [`Particle`] — Named point particle with mass, charge and rigid body
//! - [`Bond`] — Bond between two particles
//! - [`SimBox`] — Periodic cell from edge lengths and angles
//! - [`Element`] — Chemical element lookup
//!
//! ## Output Structures
//!
//! - [`ExportedFrame`] — Everything a GSD writer persists for one frame
//! - [`Configuration`] — Step, dimensionality and box tensor
//! - [`ParticleSection`] — Per-particle arrays
//! - [`Section`] — Bond, angle, dihedral or pair connectivity
//!
//! ## Force Fields
//!
//! - [`ForcefieldApplicator`] — Capability that types a compound
//! - [`ForcefieldLibrary`] — Registry of TOML rule sets, OPLS-AA built in
//! - [`RuleSet`] / [`AtomRule`] — Atom-type rules evaluated in order
//! - [`TypedStructure`] / [`TypedParticle`] — Result of typing

mod export;
mod forcefield;
mod model;

pub mod io;

pub use model::compound::{Bond, Compound};
pub use model::element::{Element, ParseElementError};
pub use model::frame::{Configuration, ExportedFrame, ParticleSection, Section};
pub use model::particle::Particle;
pub use model::simbox::{BOUNDING_BOX_PADDING, GeometryError, SimBox};

pub use export::{
    ExportConfig, NM_TO_ANGSTROM, ReferenceUnits, TypeTable, VACUUM_PERMITTIVITY, bonded_key,
    dihedral_key, export, export_with, natural_cmp, natural_sort,
};

pub use forcefield::{
    AtomRule, ForcefieldApplicator, ForcefieldLibrary, RuleSet, TypedParticle, TypedStructure,
};

pub use export::Error as ExportError;
pub use forcefield::Error as ForcefieldError;
