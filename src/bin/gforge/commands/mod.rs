mod export;
mod forcefields;

use export::run_export;
use forcefields::run_forcefields;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Export(args) => run_export(args, ctx),
        Command::Forcefields(args) => run_forcefields(args),
    }
}
