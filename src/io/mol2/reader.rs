use crate::io::{Format, error::Error};
use crate::model::{
    compound::Compound, element::Element, particle::Particle, simbox::SimBox,
};
use std::collections::HashMap;
use std::io::BufRead;

/// MOL2 lengths are Ångström; compounds are stored in nm.
const ANGSTROM_TO_NM: f64 = 0.1;

pub fn read<R: BufRead>(reader: R) -> Result<Compound, Error> {
    let lines = collect_lines(reader)?;

    let mol_idx = find_section(&lines, "@<TRIPOS>MOLECULE")
        .ok_or_else(|| Error::parse(Format::Mol2, 1, "missing @<TRIPOS>MOLECULE section"))?;

    let mut cursor = mol_idx + 1;
    let (_, name) = next_data_line(&lines, &mut cursor).unwrap_or_else(|| (0, String::from("MOL2")));

    let (count_line_no, count_line) = next_data_line(&lines, &mut cursor)
        .ok_or_else(|| Error::parse(Format::Mol2, cursor + 1, "missing counts line"))?;
    let (atom_count, bond_count) = parse_counts(&count_line, count_line_no)?;

    let atom_section = find_section(&lines, "@<TRIPOS>ATOM")
        .ok_or_else(|| Error::parse(Format::Mol2, cursor + 1, "missing @<TRIPOS>ATOM section"))?;
    let bond_section = find_section(&lines, "@<TRIPOS>BOND");

    let mut compound = Compound::new(name.trim());
    let atom_end = next_section_after(&lines, atom_section);
    let id_map = parse_atoms(&lines, atom_section + 1, atom_end, atom_count, &mut compound)?;

    if let Some(section) = bond_section {
        let bond_end = next_section_after(&lines, section);
        parse_bonds(&lines, section + 1, bond_end, bond_count, &id_map, &mut compound)?;
    } else if bond_count > 0 {
        return Err(Error::parse(
            Format::Mol2,
            count_line_no,
            "bonds declared but @<TRIPOS>BOND section is missing",
        ));
    }

    if let Some(section) = find_section(&lines, "@<TRIPOS>CRYSIN") {
        let mut cursor = section + 1;
        let (ln, line) = next_data_line(&lines, &mut cursor)
            .ok_or_else(|| Error::parse(Format::Mol2, cursor, "empty @<TRIPOS>CRYSIN section"))?;
        compound.simbox = Some(parse_crysin(&line, ln)?);
    }

    Ok(compound)
}

fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| {
            line.map(|v| (i + 1, v))
                .map_err(|e| Error::Io { source: e })
        })
        .collect()
}

fn find_section(lines: &[(usize, String)], name: &str) -> Option<usize> {
    lines
        .iter()
        .position(|(_, line)| line.trim().eq_ignore_ascii_case(name))
}

fn next_section_after(lines: &[(usize, String)], section: usize) -> usize {
    lines[section + 1..]
        .iter()
        .position(|(_, line)| line.trim_start().starts_with("@<TRIPOS>"))
        .map_or(lines.len(), |offset| section + 1 + offset)
}

fn next_data_line(lines: &[(usize, String)], cursor: &mut usize) -> Option<(usize, String)> {
    while *cursor < lines.len() {
        let (ln, content) = &lines[*cursor];
        *cursor += 1;
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        return Some((*ln, content.clone()));
    }
    None
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    let parts: Vec<_> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Err(Error::parse(
            Format::Mol2,
            line_no,
            "counts line must have at least an atom count",
        ));
    }
    let atoms = parts[0]
        .parse::<usize>()
        .map_err(|_| Error::parse(Format::Mol2, line_no, "invalid atom count in counts line"))?;
    let bonds = match parts.get(1) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Mol2, line_no, "invalid bond count in counts line"))?,
        None => 0,
    };
    Ok((atoms, bonds))
}

fn parse_atoms(
    lines: &[(usize, String)],
    start: usize,
    end: usize,
    expected: usize,
    compound: &mut Compound,
) -> Result<HashMap<usize, usize>, Error> {
    let mut id_map = HashMap::with_capacity(expected);
    let mut cursor = start;

    while compound.particle_count() < expected {
        let (ln, raw) = match next_data_line(&lines[..end], &mut cursor) {
            Some(line) => line,
            None => {
                return Err(Error::parse(
                    Format::Mol2,
                    lines.get(end.saturating_sub(1)).map_or(0, |(ln, _)| *ln),
                    "ATOM section ended before expected atom count",
                ));
            }
        };
        let parts: Vec<_> = raw.split_whitespace().collect();
        if parts.len() < 6 {
            return Err(Error::parse(Format::Mol2, ln, "invalid ATOM line"));
        }

        let atom_id = parts[0]
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Mol2, ln, "invalid atom id in ATOM line"))?;
        let mut position = [0.0; 3];
        for (axis, (slot, raw)) in position.iter_mut().zip(&parts[2..5]).enumerate() {
            let value = raw.parse::<f64>().map_err(|_| {
                Error::parse(
                    Format::Mol2,
                    ln,
                    format!("invalid {} coordinate in ATOM line", ["x", "y", "z"][axis]),
                )
            })?;
            *slot = value * ANGSTROM_TO_NM;
        }

        let element = Element::from_label(parts[5])
            .or_else(|| Element::from_label(parts[1]))
            .ok_or_else(|| Error::parse(Format::Mol2, ln, "unable to infer element"))?;

        let charge = match parts.get(8) {
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| Error::parse(Format::Mol2, ln, "invalid charge in ATOM line"))?,
            None => 0.0,
        };

        if id_map.insert(atom_id, compound.particle_count()).is_some() {
            return Err(Error::parse(Format::Mol2, ln, "duplicate atom id in ATOM line"));
        }
        compound.add_particle(Particle::from_element(element, position).with_charge(charge));
    }

    Ok(id_map)
}

fn parse_bonds(
    lines: &[(usize, String)],
    start: usize,
    end: usize,
    expected: usize,
    id_map: &HashMap<usize, usize>,
    compound: &mut Compound,
) -> Result<(), Error> {
    let mut cursor = start;

    for _ in 0..expected {
        let (ln, raw) = next_data_line(&lines[..end], &mut cursor).ok_or_else(|| {
            Error::parse(
                Format::Mol2,
                lines.get(end.saturating_sub(1)).map_or(0, |(ln, _)| *ln),
                "BOND section ended before expected bond count",
            )
        })?;
        let parts: Vec<_> = raw.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(Error::parse(Format::Mol2, ln, "invalid BOND line"));
        }

        let a1 = parts[1]
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Mol2, ln, "invalid first atom id in BOND line"))?;
        let a2 = parts[2]
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Mol2, ln, "invalid second atom id in BOND line"))?;

        let i = *id_map
            .get(&a1)
            .ok_or_else(|| Error::parse(Format::Mol2, ln, "bond references unknown atom id"))?;
        let j = *id_map
            .get(&a2)
            .ok_or_else(|| Error::parse(Format::Mol2, ln, "bond references unknown atom id"))?;
        if i == j {
            return Err(Error::parse(Format::Mol2, ln, "bond joins an atom to itself"));
        }

        compound.add_bond(i, j);
    }

    Ok(())
}

fn parse_crysin(line: &str, line_no: usize) -> Result<SimBox, Error> {
    let values = line
        .split_whitespace()
        .take(6)
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|_| Error::parse(Format::Mol2, line_no, "invalid value in CRYSIN line"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let [a, b, c, alpha, beta, gamma] = values[..] else {
        return Err(Error::parse(
            Format::Mol2,
            line_no,
            "CRYSIN line must list a, b, c, alpha, beta, gamma",
        ));
    };

    Ok(SimBox::new(
        [a * ANGSTROM_TO_NM, b * ANGSTROM_TO_NM, c * ANGSTROM_TO_NM],
        [alpha, beta, gamma],
    )?)
}
