//! Type tables and the per-entity type ids that index into them.

use super::natsort::{natural_cmp, natural_sort};
use crate::model::frame::Section;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Separator between participant types in a bonded type key.
pub const KEY_SEPARATOR: &str = "-";

/// Distinct type names in natural order, with constant-time lookup.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl TypeTable {
    /// Builds a table from every key in `keys`, duplicates included.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = keys.into_iter().map(Into::into).collect();
        names.sort_unstable();
        names.dedup();
        natural_sort(&mut names);

        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Type key of a bonded term: participant types joined with `-`, read in
/// whichever direction sorts first naturally.
///
/// A C-H bond and an H-C bond therefore share the key `opls_135-opls_140`.
pub fn bonded_key(types: &[&str]) -> String {
    let forward = join(types.iter());
    let reverse = join(types.iter().rev());
    if natural_cmp(&reverse, &forward).is_lt() {
        reverse
    } else {
        forward
    }
}

/// Type key of a dihedral `i-j-k-l`, oriented by its middle pair: kept as read
/// when `j` sorts before `k` naturally, reversed when it sorts after.
///
/// Only a dihedral with identical middle types falls back to the whole-tuple
/// rule of [`bonded_key`].
pub fn dihedral_key(types: &[&str]) -> String {
    let order = match types {
        [_, j, k, _] => natural_cmp(j, k),
        _ => Ordering::Equal,
    };
    match order {
        Ordering::Less => join(types.iter()),
        Ordering::Greater => join(types.iter().rev()),
        Ordering::Equal => bonded_key(types),
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a &'a str>) -> String {
    parts.copied().collect::<Vec<&str>>().join(KEY_SEPARATOR)
}

/// Builds a connectivity section from index groups and the per-particle type
/// names they refer to.
///
/// Group order is preserved; `typeids[k]` is the table index of group `k`'s key
/// as computed by `key`.
pub fn build_section<const N: usize>(
    groups: &[[usize; N]],
    particle_types: &[String],
    key: fn(&[&str]) -> String,
) -> Section<[usize; N]> {
    let keys: Vec<String> = groups
        .iter()
        .map(|group| key(&group.map(|idx| particle_types[idx].as_str())))
        .collect();
    let table = TypeTable::from_keys(keys.iter().cloned());
    let typeids = keys
        .iter()
        .filter_map(|key| table.index_of(key))
        .collect();

    Section {
        types: table.into_names(),
        typeids,
        groups: groups.to_vec(),
    }
}
