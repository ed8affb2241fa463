//! Force-field application: atom typing and bonded-term perception.
//!
//! A force field is any [`ForcefieldApplicator`]. The export layer only sees
//! the [`TypedStructure`] it returns, so tests and callers can inject their
//! own typing. The bundled implementation evaluates TOML [`RuleSet`]s held in
//! a [`ForcefieldLibrary`].

mod error;
mod graph;
mod rules;
mod topology;

pub use error::Error;
pub use rules::{AtomRule, RuleSet};

use crate::model::compound::Compound;
use graph::MolecularGraph;
use log::debug;
use std::collections::BTreeMap;

/// Type and optional charge assigned to one particle.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedParticle {
    pub type_name: String,
    /// `None` keeps the particle's own charge.
    pub charge: Option<f64>,
}

impl TypedParticle {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            charge: None,
        }
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }
}

/// A compound after force-field application.
///
/// `particles` is parallel to the compound's particles. Every bonded term is a
/// tuple of particle indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedStructure {
    pub particles: Vec<TypedParticle>,
    pub bonds: Vec<[usize; 2]>,
    pub angles: Vec<[usize; 3]>,
    pub dihedrals: Vec<[usize; 4]>,
    pub pairs: Vec<[usize; 2]>,
}

/// Capability that turns a compound into a [`TypedStructure`].
pub trait ForcefieldApplicator {
    /// Applies the force field `name` to `compound`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if `name` cannot be resolved, or any
    /// other [`Error`] if typing fails.
    fn apply(&self, compound: &Compound, name: &str) -> Result<TypedStructure, Error>;
}

impl RuleSet {
    /// Types every particle and perceives angles, dihedrals and 1-4 pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBond`], [`Error::UnknownElement`] or
    /// [`Error::Untyped`].
    pub fn type_compound(&self, compound: &Compound) -> Result<TypedStructure, Error> {
        let graph = MolecularGraph::from_compound(compound)?;

        let particles = compound
            .particles
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                self.match_particle(&graph, idx)
                    .map(|rule| TypedParticle {
                        type_name: rule.name.clone(),
                        charge: rule.charge,
                    })
                    .ok_or_else(|| Error::untyped(idx, &p.name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let angles = topology::perceive_angles(&graph);
        let dihedrals = topology::perceive_dihedrals(&graph);
        let pairs = topology::perceive_pairs(&graph, &dihedrals);

        debug!(
            "Typed '{}' with {}: {} particles, {} bonds, {} angles, {} dihedrals, {} pairs",
            compound.name,
            self.name,
            particles.len(),
            graph.bonds.len(),
            angles.len(),
            dihedrals.len(),
            pairs.len()
        );

        Ok(TypedStructure {
            particles,
            bonds: graph.bonds,
            angles,
            dihedrals,
            pairs,
        })
    }
}

impl ForcefieldApplicator for RuleSet {
    fn apply(&self, compound: &Compound, name: &str) -> Result<TypedStructure, Error> {
        if name != self.name {
            return Err(Error::Unavailable(name.to_string()));
        }
        self.type_compound(compound)
    }
}

/// Registry of rule sets by force-field name.
#[derive(Debug, Clone, Default)]
pub struct ForcefieldLibrary {
    forcefields: BTreeMap<String, RuleSet>,
}

impl ForcefieldLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding the force fields shipped with the crate.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.register(rules::builtin_oplsaa().clone());
        library
    }

    /// Adds `rule_set`, replacing any force field of the same name.
    pub fn register(&mut self, rule_set: RuleSet) {
        self.forcefields.insert(rule_set.name.clone(), rule_set);
    }

    /// Parses a TOML rule set, registers it and returns its name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RuleParse`] or [`Error::InvalidRule`].
    pub fn register_toml(&mut self, toml: &str) -> Result<String, Error> {
        let rule_set = RuleSet::from_toml(toml)?;
        let name = rule_set.name.clone();
        self.register(rule_set);
        Ok(name)
    }

    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.forcefields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forcefields.contains_key(name)
    }

    /// Registered force fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        self.forcefields.values()
    }
}

impl ForcefieldApplicator for ForcefieldLibrary {
    fn apply(&self, compound: &Compound, name: &str) -> Result<TypedStructure, Error> {
        self.get(name)
            .ok_or_else(|| Error::Unavailable(name.to_string()))?
            .type_compound(compound)
    }
}
