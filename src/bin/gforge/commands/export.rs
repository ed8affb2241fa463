use anyhow::{Context, Result, bail};
use log::warn;

use gsd_forge::io::{Format, read_compound, write_frame_json};
use gsd_forge::{Compound, ExportedFrame, export_with};

use crate::cli::ExportArgs;
use crate::config::{build_export_config, build_library};
use crate::display::{
    Context as DisplayContext, Progress, Stage, print_frame_summary, print_structure_info,
    print_type_distribution,
};
use crate::io::{
    create_output, infer_input_format, open_input, stdin_is_tty, stdout_is_tty, stream_label,
};

pub fn run_export(args: ExportArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: gforge export -i <INPUT> or pipe data via stdin."
        );
    }
    if args.io.output.is_none() && stdout_is_tty() {
        bail!(
            "No output file specified and stdout is a terminal.\n\nUsage: gforge export -i <INPUT> -o <OUTPUT> or pipe output."
        );
    }

    let input_format = resolve_input_format(&args)?;
    let (library, forcefield) = build_library(&args.forcefield)?;
    let config = build_export_config(&args, forcefield)?;

    let mut progress = Progress::new(ctx.interactive);

    progress.begin(Stage::Read);
    let mut compound = read_structure(&args, input_format)?;
    let source = stream_label(args.io.input.as_deref(), "stdin");
    let mut read_notes = vec![format!("Parse {} ← {}", input_format, source)];
    read_notes.extend(label_rigid_bodies(&mut compound, &args.simbox.rigid));
    progress.done(Stage::Read, &read_notes);

    if ctx.interactive {
        print_structure_info(&compound);
    }

    progress.begin(Stage::Export);
    let frame = export_with(&compound, &config, &library).context("Export failed")?;
    progress.done(Stage::Export, &export_notes(&config));

    if ctx.interactive {
        print_type_distribution(&frame);
        print_frame_summary(&frame);
    }

    progress.begin(Stage::Write);
    write_output(&args, &frame)?;
    let target = stream_label(args.io.output.as_deref(), "stdout");
    progress.done(Stage::Write, &[format!("Write JSON → {}", target)]);

    progress.finish();

    Ok(())
}

fn resolve_input_format(args: &ExportArgs) -> Result<Format> {
    if let Some(fmt) = args.input_format {
        return Ok(fmt.into());
    }

    if let Some(path) = &args.io.input {
        if let Some(fmt) = infer_input_format(path) {
            return Ok(fmt);
        }
        bail!(
            "Cannot infer format from '{}'. Use --infmt to specify.",
            path.display()
        );
    }

    bail!("Reading from stdin requires --infmt");
}

fn read_structure(args: &ExportArgs, format: Format) -> Result<Compound> {
    let input = open_input(args.io.input.as_deref())?;
    read_compound(input, format).context("Failed to read structure")
}

fn label_rigid_bodies(compound: &mut Compound, names: &[String]) -> Vec<String> {
    let mut steps = Vec::new();
    for name in names {
        match compound.label_rigid_bodies(name) {
            Some(id) => steps.push(format!("Rigid body {} ← particles named '{}'", id, name)),
            None => warn!("No particles named '{}'; no rigid body created", name),
        }
    }
    steps
}

fn export_notes(config: &gsd_forge::ExportConfig) -> Vec<String> {
    let mut steps = Vec::new();

    match &config.forcefield {
        Some(name) => steps.push(format!("Apply force field '{}'", name)),
        None => steps.push("Type particles by name (no force field)".to_string()),
    }

    match &config.simbox {
        Some(_) => steps.push("Use box from --box".to_string()),
        None => steps.push("Use structure box (or padded bounding box)".to_string()),
    }

    let units = &config.units;
    steps.push(format!(
        "Reduce units (d = {} Å, E = {} kcal/mol, m = {} amu)",
        units.distance, units.energy, units.mass
    ));

    if config.shift_coords {
        steps.push("Shift coordinates to box centre".to_string());
    }

    steps
}

fn write_output(args: &ExportArgs, frame: &ExportedFrame) -> Result<()> {
    let writer = create_output(args.io.output.as_deref())?;
    write_frame_json(writer, frame).context("Failed to write frame")
}
