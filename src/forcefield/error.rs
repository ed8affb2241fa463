//! Error types for force-field application.

use thiserror::Error;

/// Errors that can occur while applying a force field to a compound.
#[derive(Debug, Error)]
pub enum Error {
    /// No force field of this name is known.
    #[error("force field '{0}' is not available")]
    Unavailable(String),

    /// Failed to parse a TOML rule set.
    #[error("failed to parse force field rules: {0}")]
    RuleParse(#[from] toml::de::Error),

    /// A rule set parsed but contains a rule that can never be evaluated.
    #[error("invalid typing rule '{rule}': {detail}")]
    InvalidRule {
        /// Name of the offending rule.
        rule: String,
        /// Description of the problem.
        detail: String,
    },

    /// A particle name does not resolve to a chemical element.
    #[error("particle {index} ('{name}') does not name a known element")]
    UnknownElement {
        /// Particle index.
        index: usize,
        /// Particle name.
        name: String,
    },

    /// No rule of the force field matches a particle.
    #[error("no typing rule matches particle {index} ('{name}')")]
    Untyped {
        /// Particle index.
        index: usize,
        /// Particle name.
        name: String,
    },

    /// A bond references a missing particle or bonds a particle to itself.
    #[error("invalid bond between particles {i} and {j} (n_particles = {n_particles})")]
    InvalidBond {
        /// First particle index.
        i: usize,
        /// Second particle index.
        j: usize,
        /// Number of particles in the compound.
        n_particles: usize,
    },
}

impl Error {
    /// Creates an [`InvalidRule`](Error::InvalidRule) error.
    pub fn invalid_rule(rule: &str, detail: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule: rule.to_string(),
            detail: detail.into(),
        }
    }

    /// Creates an [`UnknownElement`](Error::UnknownElement) error.
    pub fn unknown_element(index: usize, name: &str) -> Self {
        Self::UnknownElement {
            index,
            name: name.to_string(),
        }
    }

    /// Creates an [`Untyped`](Error::Untyped) error.
    pub fn untyped(index: usize, name: &str) -> Self {
        Self::Untyped {
            index,
            name: name.to_string(),
        }
    }
}
