use gsd_forge::io::Format;

use crate::cli::InputFormat;

impl From<InputFormat> for Format {
    fn from(f: InputFormat) -> Self {
        match f {
            InputFormat::Mol2 => Format::Mol2,
        }
    }
}
