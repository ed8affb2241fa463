use std::io::{self, Write};

use anyhow::Error;

use gsd_forge::{ExportError, ForcefieldError};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_export_hints(err);
        if let Some(ff_err) = err.downcast_ref::<ForcefieldError>() {
            collector.mark_typed();
            collector.collect_forcefield_hints(ff_err);
        }

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use gsd_forge::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser encountered an issue near line {} in {} format",
                    line, format
                ));
                self.add("Inspect the file around that line for malformed entries");
                self.add("Try specifying --infmt to ensure correct format detection");
                self.add_format_specific_parse_hints(*format);
            }

            IoError::UnsupportedReadFormat(fmt) => {
                self.add(format!("The '{}' format cannot be used for input", fmt));
                self.add("Supported input formats: mol2");
            }

            IoError::Json(_) => {
                self.add("Frame JSON could not be serialized or deserialized");
                self.add("Check that the frame file was written by gforge");
            }

            IoError::Model(_) => {
                self.add("The @<TRIPOS>CRYSIN record describes an impossible cell");
                self.add("Lengths must be positive and angles strictly between 0° and 180°");
                self.add("Override the cell with --box a,b,c[,alpha,beta,gamma]");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("Verify the file is not truncated or corrupted");
            }

            ErrorKind::UnexpectedEof => {
                self.add("Unexpected end of file encountered");
                self.add("The file may be truncated or incomplete");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe: output consumer terminated");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn add_format_specific_parse_hints(&mut self, format: gsd_forge::io::Format) {
        use gsd_forge::io::Format;

        match format {
            Format::Mol2 => {
                self.add("MOL2: Verify @<TRIPOS>ATOM and @<TRIPOS>BOND sections");
                self.add("MOL2: Atom records need id, name, x, y, z and an atom type");
            }

            Format::Json => {
                self.add("JSON: Validate the document with a JSON linter");
            }
        }
    }

    fn collect_export_hints(&mut self, err: &Error) {
        let Some(export_err) = err.downcast_ref::<ExportError>() else {
            return;
        };

        self.mark_typed();

        match export_err {
            ExportError::Configuration(msg) => {
                let msg_lower = msg.to_lowercase();
                if msg_lower.contains("no particles") || msg_lower.contains("empty") {
                    self.add("Input structure contains no particles");
                    self.add("Verify the @<TRIPOS>ATOM section is present");
                } else if msg_lower.contains("bond") {
                    self.add("A bond references a particle that does not exist");
                    self.add("Check atom ids in the @<TRIPOS>BOND section");
                } else {
                    self.add("The typed structure does not match the input compound");
                    self.add("This may indicate a bug; please report if reproducible");
                }
            }

            ExportError::Unit { quantity, .. } => {
                self.add(format!("{} must be a finite, positive number", quantity));
                self.add("Check --ref-distance, --ref-energy and --ref-mass");
            }

            ExportError::ForcefieldUnavailable(name) => {
                self.add(format!("No force field named '{}' is registered", name));
                self.add("Run `gforge forcefields` to list available force fields");
                self.add("Or load a rule set with --forcefield-file <rules.toml>");
            }

            ExportError::Geometry(_) => {
                self.add("The simulation box is not a valid cell");
                self.add("Lengths must be positive and angles strictly between 0° and 180°");
            }

            ExportError::Forcefield(ff_err) => {
                self.collect_forcefield_hints(ff_err);
            }
        }
    }

    fn collect_forcefield_hints(&mut self, err: &ForcefieldError) {
        match err {
            ForcefieldError::Unavailable(name) => {
                self.add(format!("No force field named '{}' is registered", name));
                self.add("Run `gforge forcefields` to list available force fields");
            }

            ForcefieldError::RuleParse(_) => {
                self.add("Force field rule file has invalid TOML syntax");
                self.add("Check for missing quotes, brackets, or invalid values");
            }

            ForcefieldError::InvalidRule { rule, .. } => {
                self.add(format!("Rule '{}' can never match a particle", rule));
                self.add("Element symbols must be valid (e.g. C, H, O, Cl)");
            }

            ForcefieldError::UnknownElement { name, .. } => {
                self.add(format!("Cannot determine the element of particle '{}'", name));
                self.add("MOL2 atom types should start with an element symbol (C.3, O.2, ...)");
            }

            ForcefieldError::Untyped { name, .. } => {
                self.add(format!("No typing rule covers particle '{}'", name));
                self.add("Supply a rule set covering this environment via --forcefield-file");
                self.add("Or export without --forcefield to keep particle names as types");
            }

            ForcefieldError::InvalidBond { i, j, .. } => {
                self.add(format!("Invalid bond between particles {} and {}", i, j));
                self.add("Check input structure for self-bonds or missing atoms");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") || msg.contains("tty") {
            self.add("Input appears to be from a terminal");
            self.add("Provide input via -i/--input or pipe data to stdin");
            return;
        }

        if msg.contains("--box") {
            self.add("Give the box as a,b,c or a,b,c,alpha,beta,gamma (nm, degrees)");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
            self.add("Ensure you have the required access rights");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
