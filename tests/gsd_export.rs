use std::io::Cursor;

use approx::assert_abs_diff_eq;

use gsd_forge::io::{read_frame_json, read_mol2, write_frame_json};
use gsd_forge::{
    Compound, Element, ExportConfig, ExportError, ForcefieldApplicator, ForcefieldError, Particle,
    ReferenceUnits, SimBox, TypedParticle, TypedStructure, VACUUM_PERMITTIVITY, export, export_with,
};

fn ethane() -> Compound {
    let mut ethane = Compound::new("ethane");
    let c1 = ethane.add_particle(Particle::from_element(Element::C, [0.000, 0.000, 0.000]));
    let c2 = ethane.add_particle(Particle::from_element(Element::C, [0.154, 0.000, 0.000]));
    ethane.add_bond(c1, c2);
    for (carbon, x) in [(c1, -0.036), (c2, 0.190)] {
        for (y, z) in [(0.103, 0.0), (-0.051, 0.089), (-0.051, -0.089)] {
            let h = ethane.add_particle(Particle::from_element(Element::H, [x, y, z]));
            ethane.add_bond(carbon, h);
        }
    }
    ethane
}

fn benzene() -> Compound {
    let mut benzene = Compound::new("benzene");
    let ring: Vec<usize> = (0..6)
        .map(|k| {
            let theta = (k as f64 * 60.0).to_radians();
            benzene.add_particle(Particle::from_element(
                Element::C,
                [0.139 * theta.cos(), 0.139 * theta.sin(), 0.0],
            ))
        })
        .collect();
    for k in 0..6 {
        benzene.add_bond(ring[k], ring[(k + 1) % 6]);
    }
    for (k, &carbon) in ring.iter().enumerate() {
        let theta = (k as f64 * 60.0).to_radians();
        let h = benzene.add_particle(Particle::from_element(
            Element::H,
            [0.247 * theta.cos(), 0.247 * theta.sin(), 0.0],
        ));
        benzene.add_bond(carbon, h);
    }
    benzene
}

fn ethanol() -> Compound {
    let mut ethanol = Compound::new("ethanol");
    let c1 = ethanol.add_particle(Particle::from_element(Element::C, [0.000, 0.000, 0.000]));
    let c2 = ethanol.add_particle(Particle::from_element(Element::C, [0.152, 0.000, 0.000]));
    let o = ethanol.add_particle(Particle::from_element(Element::O, [0.200, 0.135, 0.000]));
    let ho = ethanol.add_particle(Particle::from_element(Element::H, [0.296, 0.135, 0.000]));
    ethanol.add_bond(c1, c2);
    ethanol.add_bond(c2, o);
    ethanol.add_bond(o, ho);
    for (y, z) in [(0.103, 0.0), (-0.051, 0.089), (-0.051, -0.089)] {
        let h = ethanol.add_particle(Particle::from_element(Element::H, [-0.036, y, z]));
        ethanol.add_bond(c1, h);
    }
    for z in [0.089, -0.089] {
        let h = ethanol.add_particle(Particle::from_element(Element::H, [0.188, -0.051, z]));
        ethanol.add_bond(c2, h);
    }
    ethanol
}

fn boxed(mut compound: Compound, lengths: [f64; 3]) -> Compound {
    compound.simbox = Some(SimBox::orthorhombic(lengths).unwrap());
    compound
}

#[test]
fn untyped_export_uses_particle_names() {
    let frame = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &ExportConfig::default()).unwrap();

    assert_eq!(frame.configuration.step, 0);
    assert_eq!(frame.configuration.dimensions, 3);
    assert_eq!(frame.particles.types, vec!["C", "H"]);
    assert_eq!(frame.particles.typeids, vec![0, 0, 1, 1, 1, 1, 1, 1]);
    assert_abs_diff_eq!(frame.particles.masses[0], 12.011, epsilon = 1e-12);
    assert_abs_diff_eq!(frame.particles.masses[7], 1.008, epsilon = 1e-12);
    assert!(frame.particles.charges.iter().all(|&q| q == 0.0));
    assert!(frame.particles.bodies.iter().all(|&b| b == -1));

    assert!(frame.bonds.is_empty());
    assert!(frame.angles.is_empty());
    assert!(frame.dihedrals.is_empty());
    assert!(frame.pairs.is_empty());
}

#[test]
fn positions_are_scaled_to_angstrom_over_reference_distance() {
    let config = ExportConfig::default().with_units(ReferenceUnits::new(2.0, 1.0, 1.0));
    let frame = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &config).unwrap();

    assert_eq!(frame.configuration.box_tensor, [10.0, 15.0, 20.0, 0.0, 0.0, 0.0]);
    assert_abs_diff_eq!(frame.particles.positions[1][0], 0.77, epsilon = 1e-12);
    assert_abs_diff_eq!(frame.particles.positions[2][1], 0.515, epsilon = 1e-12);
}

#[test]
fn shift_coords_centres_the_box_on_the_origin() {
    let config = ExportConfig::default().with_shift_coords(true);
    let frame = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &config).unwrap();

    assert_abs_diff_eq!(frame.particles.positions[0][0], -10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(frame.particles.positions[0][1], -15.0, epsilon = 1e-12);
    assert_abs_diff_eq!(frame.particles.positions[0][2], -20.0, epsilon = 1e-12);
}

#[test]
fn triclinic_box_tensor() {
    let simbox = SimBox::new([2.0, 2.0, 2.0], [90.0, 90.0, 120.0]).unwrap();
    let config = ExportConfig::default()
        .with_simbox(simbox)
        .with_units(ReferenceUnits::new(2.0, 1.0, 1.0));
    let frame = export(&ethane(), &config).unwrap();

    let [lx, ly, lz, xy, xz, yz] = frame.configuration.box_tensor;
    assert_abs_diff_eq!(lx, 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ly, 10.0 * 120f64.to_radians().sin(), epsilon = 1e-12);
    assert_abs_diff_eq!(lz, 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(xy, -5.0, epsilon = 1e-12);
    assert_eq!(xz, 0.0);
    assert_abs_diff_eq!(yz, 0.0, epsilon = 1e-12);
}

#[test]
fn triclinic_angles_are_recoverable_from_the_tensor() {
    let simbox = SimBox::new([2.0, 2.5, 3.0], [80.0, 95.0, 110.0]).unwrap();
    let config = ExportConfig::default().with_simbox(simbox);
    let frame = export(&ethane(), &config).unwrap();

    let [lx, ly, lz, xy, xz, yz] = frame.configuration.box_tensor;
    let b = (ly * ly + xy * xy).sqrt();
    let c = (lz * lz + xz * xz + yz * yz).sqrt();
    let alpha = ((xy * xz + ly * yz) / (b * c)).acos().to_degrees();
    let beta = (xz / c).acos().to_degrees();
    let gamma = (xy / b).acos().to_degrees();

    assert_abs_diff_eq!(lx, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(c, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(alpha, 80.0, epsilon = 1e-3);
    assert_abs_diff_eq!(beta, 95.0, epsilon = 1e-3);
    assert_abs_diff_eq!(gamma, 110.0, epsilon = 1e-3);
}

#[test]
fn positions_round_trip_to_native_units() {
    let compound = boxed(ethane(), [2.0, 3.0, 4.0]);
    let d = 3.5;
    let config = ExportConfig::default().with_units(ReferenceUnits::new(d, 0.066, 12.011));
    let frame = export(&compound, &config).unwrap();

    for (exported, particle) in frame.particles.positions.iter().zip(&compound.particles) {
        for axis in 0..3 {
            assert_abs_diff_eq!(exported[axis] * d / 10.0, particle.position[axis], epsilon = 1e-4);
        }
    }
}

#[test]
fn config_box_overrides_compound_box() {
    let config =
        ExportConfig::default().with_simbox(SimBox::orthorhombic([5.0, 5.0, 5.0]).unwrap());
    let frame = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &config).unwrap();
    assert_eq!(frame.configuration.box_tensor, [50.0, 50.0, 50.0, 0.0, 0.0, 0.0]);
}

#[test]
fn missing_box_falls_back_to_padded_bounding_box() {
    let frame = export(&ethane(), &ExportConfig::default()).unwrap();
    let [lx, ly, lz, xy, xz, yz] = frame.configuration.box_tensor;

    assert_abs_diff_eq!(lx, (0.226 + 0.5) * 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ly, (0.154 + 0.5) * 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(lz, (0.178 + 0.5) * 10.0, epsilon = 1e-9);
    assert_eq!([xy, xz, yz], [0.0; 3]);
}

#[test]
fn rigid_bodies_are_exported_as_body_ids() {
    let mut compound = boxed(ethane(), [2.0, 3.0, 4.0]);
    assert_eq!(compound.label_rigid_bodies("H"), Some(0));
    assert_eq!(compound.label_rigid_bodies("Xe"), None);

    let frame = export(&compound, &ExportConfig::default()).unwrap();
    assert_eq!(frame.particles.bodies, vec![-1, -1, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn particle_types_are_naturally_sorted() {
    let mut compound = Compound::new("labels");
    for (i, name) in ["C10", "C2", "c1", "C2"].into_iter().enumerate() {
        compound.add_particle(Particle::new(name, [0.1 * i as f64, 0.0, 0.0], 12.0));
    }

    let frame = export(&compound, &ExportConfig::default()).unwrap();
    assert_eq!(frame.particles.types, vec!["c1", "C2", "C10"]);
    assert_eq!(frame.particles.typeids, vec![2, 1, 0, 1]);
}

#[test]
fn oplsaa_ethane_type_tables() {
    let config = ExportConfig::default().with_forcefield("oplsaa");
    let frame = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &config).unwrap();

    assert_eq!(frame.particles.types, vec!["opls_135", "opls_140"]);
    assert_eq!(frame.particles.typeids, vec![0, 0, 1, 1, 1, 1, 1, 1]);

    assert_eq!(frame.bonds.types, vec!["opls_135-opls_135", "opls_135-opls_140"]);
    assert_eq!(frame.n_bonds(), 7);
    let cc = frame.bonds.groups.iter().position(|g| *g == [0, 1]).unwrap();
    assert_eq!(frame.bonds.typeids[cc], 0);
    assert_eq!(frame.bonds.typeids.iter().filter(|&&t| t == 1).count(), 6);

    assert_eq!(
        frame.angles.types,
        vec!["opls_135-opls_135-opls_140", "opls_140-opls_135-opls_140"]
    );
    assert_eq!(frame.n_angles(), 12);

    assert_eq!(frame.dihedrals.types, vec!["opls_140-opls_135-opls_135-opls_140"]);
    assert_eq!(frame.n_dihedrals(), 9);

    assert_eq!(frame.pairs.types, vec!["opls_140-opls_140"]);
    assert_eq!(frame.n_pairs(), 9);
}

#[test]
fn oplsaa_charges_are_reduced() {
    let config = ExportConfig::default().with_forcefield("oplsaa");
    let frame = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &config).unwrap();

    let factor = (4.0 * std::f64::consts::PI * VACUUM_PERMITTIVITY).sqrt();
    assert_abs_diff_eq!(frame.particles.charges[0], -0.18 / factor, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.particles.charges[2], 0.06 / factor, epsilon = 1e-9);

    let total: f64 = frame.particles.charges.iter().sum();
    assert_abs_diff_eq!(total, 0.0, epsilon = 1e-9);
}

#[test]
fn oplsaa_charges_with_reference_distance_and_energy() {
    let config = ExportConfig::default()
        .with_forcefield("oplsaa")
        .with_units(ReferenceUnits::new(3.5, 0.066, 12.011));
    let frame = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &config).unwrap();

    let factor = (4.0 * std::f64::consts::PI * VACUUM_PERMITTIVITY * 3.5 * 0.066).sqrt();
    assert_abs_diff_eq!(frame.particles.charges[0], -0.18 / factor, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.particles.charges[1], -0.18 / factor, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.particles.charges[2], 0.06 / factor, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.particles.charges[7], 0.06 / factor, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.particles.positions[1][0], 1.54 / 3.5, epsilon = 1e-9);
}

#[test]
fn oplsaa_ethanol_dihedrals_orient_by_middle_types() {
    let config = ExportConfig::default().with_forcefield("oplsaa");
    let frame = export(&boxed(ethanol(), [2.0, 2.0, 2.0]), &config).unwrap();

    assert_eq!(
        frame.particles.types,
        vec!["opls_135", "opls_140", "opls_154", "opls_155", "opls_157"]
    );
    assert_eq!(
        frame.dihedrals.types,
        vec![
            "opls_140-opls_135-opls_157-opls_140",
            "opls_140-opls_135-opls_157-opls_154",
            "opls_155-opls_154-opls_157-opls_135",
            "opls_155-opls_154-opls_157-opls_140",
        ]
    );
    assert_eq!(frame.n_dihedrals(), 12);

    let hcoh = frame
        .dihedrals
        .groups
        .iter()
        .position(|g| *g == [7, 1, 2, 3])
        .unwrap();
    assert_eq!(frame.dihedrals.typeids[hcoh], 3);
}

#[test]
fn rigid_ids_beyond_body_range_are_rejected() {
    for id in [u32::MAX as usize, 1 << 31] {
        let mut compound = boxed(ethane(), [2.0, 3.0, 4.0]);
        compound.particles[2].rigid_id = Some(id);
        let err = export(&compound, &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, ExportError::Configuration(_)), "id {id}: {err}");
    }
}

#[test]
fn reduced_masses_with_carbon_reference() {
    let config = ExportConfig::default()
        .with_forcefield("oplsaa")
        .with_units(ReferenceUnits::new(1.0, 1.0, 12.011));
    let frame = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &config).unwrap();

    assert_abs_diff_eq!(frame.particles.masses[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(frame.particles.masses[2], 0.0839, epsilon = 1e-4);
}

#[test]
fn oplsaa_benzene_sections() {
    let config = ExportConfig::default().with_forcefield("oplsaa");
    let frame = export(&boxed(benzene(), [3.0, 3.0, 3.0]), &config).unwrap();

    assert_eq!(frame.particles.types, vec!["opls_145", "opls_146"]);
    assert_eq!(frame.n_bonds(), 12);
    assert_eq!(frame.n_angles(), 18);
    assert_eq!(frame.n_dihedrals(), 24);
    assert_eq!(frame.n_pairs(), 21);
    assert_eq!(
        frame.pairs.types,
        vec!["opls_145-opls_145", "opls_145-opls_146", "opls_146-opls_146"]
    );
}

#[test]
fn every_typeid_indexes_its_table() {
    let config = ExportConfig::default().with_forcefield("oplsaa");
    let frame = export(&boxed(benzene(), [3.0, 3.0, 3.0]), &config).unwrap();

    let n = frame.n_particles();
    assert!(frame.particles.typeids.iter().all(|&t| t < frame.particles.types.len()));
    assert!(frame.bonds.typeids.iter().all(|&t| t < frame.bonds.types.len()));
    assert!(frame.angles.typeids.iter().all(|&t| t < frame.angles.types.len()));
    assert!(frame.dihedrals.typeids.iter().all(|&t| t < frame.dihedrals.types.len()));
    assert!(frame.pairs.typeids.iter().all(|&t| t < frame.pairs.types.len()));
    assert!(frame.dihedrals.groups.iter().flatten().all(|&i| i < n));
}

/// Types every particle as `X<degree>` and charges it by its index.
struct DegreeApplicator;

impl ForcefieldApplicator for DegreeApplicator {
    fn apply(&self, compound: &Compound, name: &str) -> Result<TypedStructure, ForcefieldError> {
        if name != "degree" {
            return Err(ForcefieldError::Unavailable(name.to_string()));
        }
        let mut degree = vec![0usize; compound.particle_count()];
        for bond in &compound.bonds {
            degree[bond.i] += 1;
            degree[bond.j] += 1;
        }
        Ok(TypedStructure {
            particles: degree
                .iter()
                .enumerate()
                .map(|(i, d)| TypedParticle::new(format!("X{d}")).with_charge(i as f64))
                .collect(),
            bonds: compound.bonds.iter().map(|b| [b.i, b.j]).collect(),
            ..TypedStructure::default()
        })
    }
}

#[test]
fn injected_applicator_supplies_types_and_charges() {
    // Energy chosen so the charge divisor is exactly one.
    let energy = 1.0 / (4.0 * std::f64::consts::PI * VACUUM_PERMITTIVITY);
    let config = ExportConfig::default()
        .with_forcefield("degree")
        .with_units(ReferenceUnits::new(1.0, energy, 1.0));
    let frame =
        export_with(&boxed(ethane(), [2.0, 3.0, 4.0]), &config, &DegreeApplicator).unwrap();

    assert_eq!(frame.particles.types, vec!["X1", "X4"]);
    assert_eq!(frame.particles.typeids, vec![1, 1, 0, 0, 0, 0, 0, 0]);
    assert_abs_diff_eq!(frame.particles.charges[5], 5.0, epsilon = 1e-9);
    assert_eq!(frame.bonds.types, vec!["X1-X4", "X4-X4"]);
    assert!(frame.angles.is_empty());
}

#[test]
fn unknown_forcefield_is_unavailable() {
    let config = ExportConfig::default().with_forcefield("gaff");
    let err = export(&boxed(ethane(), [2.0, 3.0, 4.0]), &config).unwrap_err();
    assert!(matches!(err, ExportError::ForcefieldUnavailable(ref name) if name == "gaff"));
}

#[test]
fn invalid_inputs_are_rejected() {
    let err = export(&Compound::new("empty"), &ExportConfig::default()).unwrap_err();
    assert!(matches!(err, ExportError::Configuration(_)));

    let config = ExportConfig::default().with_units(ReferenceUnits::new(1.0, 1.0, 0.0));
    let err = export(&ethane(), &config).unwrap_err();
    assert!(matches!(err, ExportError::Unit { quantity: "ref_mass", .. }));
}

const ETHANE_MOL2: &str = "\
@<TRIPOS>MOLECULE
ethane
 8 7 1 0 0
SMALL
USER_CHARGES

@<TRIPOS>ATOM
      1 C1          0.0000    0.0000    0.0000 C.3     1 ETH     -0.1800
      2 C2          1.5400    0.0000    0.0000 C.3     1 ETH     -0.1800
      3 H1         -0.3600    1.0300    0.0000 H       1 ETH      0.0600
      4 H2         -0.3600   -0.5100    0.8900 H       1 ETH      0.0600
      5 H3         -0.3600   -0.5100   -0.8900 H       1 ETH      0.0600
      6 H4          1.9000   -1.0300    0.0000 H       1 ETH      0.0600
      7 H5          1.9000    0.5100    0.8900 H       1 ETH      0.0600
      8 H6          1.9000    0.5100   -0.8900 H       1 ETH      0.0600
@<TRIPOS>BOND
     1     1     2    1
     2     1     3    1
     3     1     4    1
     4     1     5    1
     5     2     6    1
     6     2     7    1
     7     2     8    1
@<TRIPOS>CRYSIN
   20.0000   30.0000   40.0000   90.0000   90.0000   90.0000 1 1
";

#[test]
fn mol2_to_frame_json_and_back() {
    let compound = read_mol2(Cursor::new(ETHANE_MOL2)).unwrap();
    let config = ExportConfig::default().with_forcefield("oplsaa");
    let frame = export(&compound, &config).unwrap();

    let expected = [20.0, 30.0, 40.0, 0.0, 0.0, 0.0];
    for (got, want) in frame.configuration.box_tensor.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(frame.particles.positions[1][0], 1.54, epsilon = 1e-9);

    let mut buf = Vec::new();
    write_frame_json(&mut buf, &frame).unwrap();
    let back = read_frame_json(buf.as_slice()).unwrap();

    assert_eq!(back.particles.types, frame.particles.types);
    assert_eq!(back.particles.typeids, frame.particles.typeids);
    assert_eq!(back.bonds.groups, frame.bonds.groups);
    assert_eq!(back.pairs.types, frame.pairs.types);
    for (a, b) in back.particles.positions.iter().zip(&frame.particles.positions) {
        for d in 0..3 {
            assert_abs_diff_eq!(a[d], b[d], epsilon = 1e-12);
        }
    }
}
