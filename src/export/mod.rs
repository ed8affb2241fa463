//! Compound to GSD/HOOMD frame conversion.
//!
//! [`export`] and [`export_with`] turn a [`Compound`] into an
//! [`ExportedFrame`]: positions and box reduced by the reference distance,
//! masses by the reference mass, charges by `sqrt(4π·ε0·d·E)`, and every
//! entity mapped to an index into a naturally sorted type table.
//!
//! When a force field is requested, the injected [`ForcefieldApplicator`]
//! supplies particle types, charges and the bonded terms. Without one,
//! particles are typed by name and the bonded sections are left empty.

mod config;
mod error;
mod natsort;
mod typetable;
mod units;

pub use config::ExportConfig;
pub use error::Error;
pub use natsort::{natural_cmp, natural_sort};
pub use typetable::{TypeTable, bonded_key, dihedral_key};
pub use units::{NM_TO_ANGSTROM, ReferenceUnits, VACUUM_PERMITTIVITY};

use crate::forcefield::{ForcefieldApplicator, ForcefieldLibrary, TypedStructure};
use crate::model::compound::Compound;
use crate::model::frame::{Configuration, ExportedFrame, ParticleSection, Section};
use crate::model::simbox::{BOUNDING_BOX_PADDING, SimBox};
use log::{debug, info};

/// Exports `compound` using the force fields bundled with the crate.
///
/// # Errors
///
/// See [`export_with`].
pub fn export(compound: &Compound, config: &ExportConfig) -> Result<ExportedFrame, Error> {
    export_with(compound, config, &ForcefieldLibrary::builtin())
}

/// Exports `compound`, resolving `config.forcefield` through `applicator`.
///
/// The compound is only read. Box precedence is `config.simbox`, then the
/// compound's own box, then the particle bounding box padded by
/// [`BOUNDING_BOX_PADDING`] nm.
///
/// # Errors
///
/// - [`Error::Unit`] if a reference quantity is not finite and positive.
/// - [`Error::Configuration`] for an empty compound, an out-of-range bond, a
///   rigid body id beyond `i32::MAX` or a typed structure that does not fit
///   the compound.
/// - [`Error::ForcefieldUnavailable`] / [`Error::Forcefield`] if the
///   applicator cannot resolve or apply the force field.
/// - [`Error::Geometry`] if no valid box can be derived.
pub fn export_with(
    compound: &Compound,
    config: &ExportConfig,
    applicator: &dyn ForcefieldApplicator,
) -> Result<ExportedFrame, Error> {
    let units = config.units;
    units.validate()?;
    validate_compound(compound)?;

    let simbox = resolve_box(compound, config)?;
    debug!(
        "Exporting '{}' with box lengths {:?} nm, angles {:?} deg",
        compound.name,
        simbox.lengths(),
        simbox.angles()
    );

    let typed = match config.forcefield.as_deref() {
        Some(name) => {
            let typed = applicator.apply(compound, name)?;
            validate_typed(compound, &typed)?;
            debug!("Applied force field '{}' to '{}'", name, compound.name);
            Some(typed)
        }
        None => None,
    };

    let particles = particle_section(compound, typed.as_ref(), &simbox, config)?;
    let frame = match typed {
        Some(typed) => ExportedFrame {
            configuration: configuration(&simbox, &units),
            bonds: typetable::build_section(&typed.bonds, &particles.type_names, bonded_key),
            angles: typetable::build_section(&typed.angles, &particles.type_names, bonded_key),
            dihedrals: typetable::build_section(
                &typed.dihedrals,
                &particles.type_names,
                dihedral_key,
            ),
            pairs: typetable::build_section(&typed.pairs, &particles.type_names, bonded_key),
            particles: particles.section,
        },
        None => ExportedFrame {
            configuration: configuration(&simbox, &units),
            particles: particles.section,
            bonds: Section::empty(),
            angles: Section::empty(),
            dihedrals: Section::empty(),
            pairs: Section::empty(),
        },
    };

    info!(
        "Exported '{}': {} particles ({} types), {} bonds, {} angles, {} dihedrals, {} pairs",
        compound.name,
        frame.n_particles(),
        frame.particles.types.len(),
        frame.n_bonds(),
        frame.n_angles(),
        frame.n_dihedrals(),
        frame.n_pairs()
    );
    Ok(frame)
}

fn validate_compound(compound: &Compound) -> Result<(), Error> {
    if compound.particles.is_empty() {
        return Err(Error::configuration("compound contains no particles"));
    }
    if let Some(bond) = compound.invalid_bond() {
        return Err(Error::configuration(format!(
            "bond ({}, {}) does not join two distinct particles (n_particles = {})",
            bond.i,
            bond.j,
            compound.particle_count()
        )));
    }
    Ok(())
}

fn validate_typed(compound: &Compound, typed: &TypedStructure) -> Result<(), Error> {
    let n = compound.particle_count();
    if typed.particles.len() != n {
        return Err(Error::configuration(format!(
            "force field typed {} particles, compound has {}",
            typed.particles.len(),
            n
        )));
    }

    let out_of_range = typed
        .bonds
        .iter()
        .map(|g| g.as_slice())
        .chain(typed.angles.iter().map(|g| g.as_slice()))
        .chain(typed.dihedrals.iter().map(|g| g.as_slice()))
        .chain(typed.pairs.iter().map(|g| g.as_slice()))
        .find(|group| group.iter().any(|&idx| idx >= n));
    if let Some(group) = out_of_range {
        return Err(Error::configuration(format!(
            "force field term {group:?} references a particle outside 0..{n}"
        )));
    }
    Ok(())
}

fn resolve_box(compound: &Compound, config: &ExportConfig) -> Result<SimBox, Error> {
    if let Some(simbox) = config.simbox.or(compound.simbox) {
        return Ok(simbox);
    }
    debug!(
        "'{}' has no box; using its bounding box padded by {} nm",
        compound.name, BOUNDING_BOX_PADDING
    );
    match SimBox::bounding(compound.xyz(), BOUNDING_BOX_PADDING) {
        Some(result) => Ok(result?),
        None => Err(Error::configuration("compound contains no particles")),
    }
}

fn configuration(simbox: &SimBox, units: &ReferenceUnits) -> Configuration {
    Configuration {
        step: 0,
        dimensions: 3,
        box_tensor: simbox.tensor(units.length_scale()),
    }
}

struct Particles {
    section: ParticleSection,
    /// Type name of each particle, parallel to the compound.
    type_names: Vec<String>,
}

fn particle_section(
    compound: &Compound,
    typed: Option<&TypedStructure>,
    simbox: &SimBox,
    config: &ExportConfig,
) -> Result<Particles, Error> {
    let units = &config.units;
    let shift = if config.shift_coords {
        let [a, b, c] = simbox.vectors();
        [0, 1, 2].map(|d| 0.5 * (a[d] + b[d] + c[d]))
    } else {
        [0.0; 3]
    };

    let type_names: Vec<String> = match typed {
        Some(typed) => typed.particles.iter().map(|p| p.type_name.clone()).collect(),
        None => compound.particles.iter().map(|p| p.name.clone()).collect(),
    };
    let table = TypeTable::from_keys(type_names.iter().cloned());
    let typeids = type_names
        .iter()
        .filter_map(|name| table.index_of(name))
        .collect();

    let charges = compound
        .particles
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let q = typed
                .and_then(|t| t.particles[idx].charge)
                .unwrap_or(p.charge);
            units.reduce_charge(q)
        })
        .collect();

    let bodies = compound
        .particles
        .iter()
        .enumerate()
        .map(|(idx, p)| match p.rigid_id {
            None => Ok(-1),
            Some(id) => i32::try_from(id).map_err(|_| {
                Error::configuration(format!(
                    "rigid body id {} of particle {} does not fit a GSD body id",
                    id, idx
                ))
            }),
        })
        .collect::<Result<Vec<i32>, Error>>()?;

    let section = ParticleSection {
        positions: compound
            .particles
            .iter()
            .map(|p| [0, 1, 2].map(|d| units.reduce_length(p.position[d] - shift[d])))
            .collect(),
        masses: compound
            .particles
            .iter()
            .map(|p| units.reduce_mass(p.mass))
            .collect(),
        charges,
        types: table.into_names(),
        typeids,
        bodies,
    };

    Ok(Particles {
        section,
        type_names,
    })
}
