use std::path::Path;

use gsd_forge::io::Format;

pub fn input(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "mol2" | "ml2" => Some(Format::Mol2),
        _ => None,
    }
}
