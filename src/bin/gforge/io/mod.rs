mod infer;

pub use infer::input as infer_input_format;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Read, Stdin, StdoutLock, Write};
use std::path::Path;

use anyhow::{Context, Result};

pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn stdout_is_tty() -> bool {
    io::stdout().is_terminal()
}

/// Display name for an optional path: its file name, or `fallback` for a
/// standard stream.
pub fn stream_label(path: Option<&Path>, fallback: &str) -> String {
    path.and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}

/// Buffered structure input: a file or standard input.
pub enum InputSource {
    File(BufReader<File>),
    Stdin(BufReader<Stdin>),
}

impl InputSource {
    fn inner(&mut self) -> &mut dyn BufRead {
        match self {
            Self::File(r) => r,
            Self::Stdin(r) => r,
        }
    }
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner().read(buf)
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner().fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner().consume(amt)
    }
}

pub fn open_input(path: Option<&Path>) -> Result<InputSource> {
    let Some(p) = path else {
        return Ok(InputSource::Stdin(BufReader::new(io::stdin())));
    };
    let file =
        File::open(p).with_context(|| format!("Failed to open input file: {}", p.display()))?;
    Ok(InputSource::File(BufReader::new(file)))
}

/// Buffered frame output: a file or locked standard output.
pub enum OutputTarget {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl OutputTarget {
    fn inner(&mut self) -> &mut dyn Write {
        match self {
            Self::File(w) => w,
            Self::Stdout(w) => w,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner().flush()
    }
}

pub fn create_output(path: Option<&Path>) -> Result<OutputTarget> {
    let Some(p) = path else {
        return Ok(OutputTarget::Stdout(BufWriter::new(io::stdout().lock())));
    };
    let file =
        File::create(p).with_context(|| format!("Failed to create output file: {}", p.display()))?;
    Ok(OutputTarget::File(BufWriter::new(file)))
}
