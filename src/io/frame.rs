use super::error::Error;
use crate::model::frame::ExportedFrame;
use std::io::{Read, Write};

/// Writes `frame` as pretty-printed JSON followed by a newline.
pub fn write_frame_json<W: Write>(mut writer: W, frame: &ExportedFrame) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, frame)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_frame_json<R: Read>(reader: R) -> Result<ExportedFrame, Error> {
    Ok(serde_json::from_reader(reader)?)
}
