use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "gforge",
    about = "Export molecular structures to GSD/HOOMD frames",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export a structure (MOL2) to a frame (JSON)
    #[command(visible_alias = "e")]
    Export(ExportArgs),

    /// List available force fields
    #[command(visible_alias = "ff")]
    Forcefields(ForcefieldsArgs),
}

/// I/O options for the export command.
#[derive(Args)]
pub struct IoOptions {
    /// Input file (stdin if omitted, requires --infmt)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Force field selection shared by export and forcefields commands.
#[derive(Args)]
#[command(next_help_heading = "Force Field")]
pub struct ForcefieldOptions {
    /// Force field to apply before export (e.g. oplsaa)
    #[arg(long, value_name = "NAME")]
    pub forcefield: Option<String>,

    /// Custom force field rules (TOML file); applied unless --forcefield names another
    #[arg(long = "forcefield-file", value_name = "FILE")]
    pub forcefield_file: Option<PathBuf>,
}

/// Reference quantities for reduced units.
#[derive(Args)]
#[command(next_help_heading = "Reduced Units")]
pub struct UnitOptions {
    /// Reference distance (Å)
    #[arg(long = "ref-distance", value_name = "D", default_value = "1.0")]
    pub distance: f64,

    /// Reference energy (kcal/mol)
    #[arg(long = "ref-energy", value_name = "E", default_value = "1.0")]
    pub energy: f64,

    /// Reference mass (amu)
    #[arg(long = "ref-mass", value_name = "M", default_value = "1.0")]
    pub mass: f64,
}

#[derive(Args)]
#[command(next_help_heading = "Simulation Box")]
pub struct BoxOptions {
    /// Box override: a,b,c in nm, optionally followed by α,β,γ in degrees
    #[arg(long = "box", value_name = "a,b,c[,α,β,γ]")]
    pub simbox: Option<BoxSpec>,

    /// Shift coordinates so the box is centred on the origin
    #[arg(long = "shift-coords")]
    pub shift_coords: bool,

    /// Particle name to group into a rigid body, repeatable
    #[arg(long = "rigid", value_name = "NAME", action = clap::ArgAction::Append)]
    pub rigid: Vec<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Input format (inferred from extension if not specified)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    #[command(flatten)]
    pub forcefield: ForcefieldOptions,

    #[command(flatten)]
    pub units: UnitOptions,

    #[command(flatten)]
    pub simbox: BoxOptions,
}

#[derive(Args)]
pub struct ForcefieldsArgs {
    /// Also list the force field defined in this TOML file
    #[arg(long = "forcefield-file", value_name = "FILE")]
    pub forcefield_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormat {
    /// Tripos MOL2
    Mol2,
}

/// Box lengths (nm) and angles (degrees) given on the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpec {
    pub lengths: [f64; 3],
    pub angles: [f64; 3],
}

impl FromStr for BoxSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number in box specification: '{}'", v.trim()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match values[..] {
            [a, b, c] => Ok(Self {
                lengths: [a, b, c],
                angles: [90.0; 3],
            }),
            [a, b, c, alpha, beta, gamma] => Ok(Self {
                lengths: [a, b, c],
                angles: [alpha, beta, gamma],
            }),
            _ => Err(format!(
                "box needs 3 lengths or 3 lengths and 3 angles, got {} values",
                values.len()
            )),
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
