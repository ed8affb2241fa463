use std::io::{self, Write};

use anyhow::Result;

use gsd_forge::ForcefieldLibrary;

use crate::cli::ForcefieldsArgs;
use crate::config::register_file;
use crate::display::print_forcefields;

pub fn run_forcefields(args: ForcefieldsArgs) -> Result<()> {
    let mut library = ForcefieldLibrary::builtin();
    if let Some(path) = &args.forcefield_file {
        register_file(&mut library, path)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_forcefields(&mut out, &library);
    out.flush()?;
    Ok(())
}
