//! Error type for the export transform.

use crate::forcefield::Error as ForcefieldError;
use crate::model::simbox::GeometryError;
use thiserror::Error;

/// Errors that can occur while exporting a compound to a frame.
///
/// No partial frame is ever produced: any of these aborts the whole export.
#[derive(Debug, Error)]
pub enum Error {
    /// The compound (or a typed structure derived from it) cannot be exported.
    ///
    /// Occurs for an empty compound, a bond referencing a missing particle, or
    /// a typed structure whose particle count differs from the compound's.
    #[error("invalid export input: {0}")]
    Configuration(String),

    /// A reference quantity is zero, negative or not finite.
    #[error("reference quantity {quantity} must be finite and positive, got {value}")]
    Unit {
        /// Name of the offending quantity (`ref_distance`, `ref_energy`, `ref_mass`).
        quantity: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The requested force field is not known to the applicator.
    #[error("force field '{0}' is not available")]
    ForcefieldUnavailable(String),

    /// The simulation box does not describe a real cell.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The force field was found but could not type the compound.
    #[error("force field application failed: {0}")]
    Forcefield(ForcefieldError),
}

impl From<ForcefieldError> for Error {
    fn from(e: ForcefieldError) -> Self {
        match e {
            ForcefieldError::Unavailable(name) => Error::ForcefieldUnavailable(name),
            other => Error::Forcefield(other),
        }
    }
}

impl Error {
    /// Creates a [`Configuration`](Error::Configuration) error.
    pub fn configuration(details: impl Into<String>) -> Self {
        Self::Configuration(details.into())
    }

    /// Creates a [`Unit`](Error::Unit) error.
    pub fn unit(quantity: &'static str, value: f64) -> Self {
        Self::Unit { quantity, value }
    }
}
