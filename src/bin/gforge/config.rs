use std::fs;

use anyhow::{Context, Result};

use gsd_forge::{ExportConfig, ForcefieldLibrary, ReferenceUnits, SimBox};

use crate::cli::{BoxOptions, ExportArgs, ForcefieldOptions, UnitOptions};

pub fn build_units(opts: &UnitOptions) -> ReferenceUnits {
    ReferenceUnits::new(opts.distance, opts.energy, opts.mass)
}

pub fn build_simbox(opts: &BoxOptions) -> Result<Option<SimBox>> {
    opts.simbox
        .map(|spec| SimBox::new(spec.lengths, spec.angles).context("Invalid --box"))
        .transpose()
}

/// Built-in force fields plus the one from `--forcefield-file`, and the name
/// of the force field to apply.
pub fn build_library(opts: &ForcefieldOptions) -> Result<(ForcefieldLibrary, Option<String>)> {
    let mut library = ForcefieldLibrary::builtin();
    let mut selected = opts.forcefield.clone();

    if let Some(path) = &opts.forcefield_file {
        let name = register_file(&mut library, path)?;
        if selected.is_none() {
            selected = Some(name);
        }
    }

    Ok((library, selected))
}

pub fn register_file(library: &mut ForcefieldLibrary, path: &std::path::Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read force field file: {}", path.display()))?;
    library
        .register_toml(&text)
        .with_context(|| format!("Invalid force field file: {}", path.display()))
}

pub fn build_export_config(args: &ExportArgs, forcefield: Option<String>) -> Result<ExportConfig> {
    Ok(ExportConfig {
        forcefield,
        units: build_units(&args.units),
        simbox: build_simbox(&args.simbox)?,
        shift_coords: args.simbox.shift_coords,
    })
}
