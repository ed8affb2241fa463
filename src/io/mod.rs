//! Reading compounds and writing exported frames.
//!
//! - MOL2 (Tripos) input is converted to a [`Compound`] in native units.
//! - Exported frames are rendered to and from JSON with `serde_json`.

use crate::model::compound::Compound;
use std::fmt;
use std::io::BufRead;

pub mod error;

mod frame;
mod mol2;

pub use error::Error;
pub use frame::{read_frame_json, write_frame_json};
pub use mol2::reader::read as read_mol2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Mol2,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Mol2 => write!(f, "MOL2"),
            Format::Json => write!(f, "JSON"),
        }
    }
}

/// Reads a compound in `format`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedReadFormat`] for formats that do not carry a
/// compound, or the reader's own error.
pub fn read_compound<R: BufRead>(reader: R, format: Format) -> Result<Compound, Error> {
    match format {
        Format::Mol2 => read_mol2(reader),
        Format::Json => Err(Error::UnsupportedReadFormat(format)),
    }
}
