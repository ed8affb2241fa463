//! Core data structures for compounds and the frames exported from them.
//!
//! - [`element`] – Element lookup used for typing rules and default masses.
//! - [`particle`] – A named point particle with mass, charge and optional rigid body.
//! - [`compound`] – Insertion-ordered particles and bonds with an optional box.
//! - [`simbox`] – Periodic cell validated into a triclinic basis.
//! - [`frame`] – The GSD/HOOMD-shaped record produced by an export.
//!
//! Native units are nanometres, amu and elementary charges. The export layer
//! is the only place where quantities are converted.

pub mod compound;
pub mod element;
pub mod frame;
pub mod particle;
pub mod simbox;
