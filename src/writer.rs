use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::Record;

const END_OF_HEADER: &str = "<eoh>";

/// Streaming writer for ADIF log data.
///
/// Owns its underlying sink for the session's lifetime. An optional
/// free-text header is written at construction, terminated by `<eoh>` and
/// a newline; records follow, each terminated by `<eor>`.
pub struct AdifWriter<W: Write> {
    out: W,
}

impl AdifWriter<BufWriter<File>> {
    /// Create an ADIF log file, without a header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }

    /// Create an ADIF log file and write the given free-text header.
    pub fn create_with_header(path: impl AsRef<Path>, header: &str) -> Result<Self> {
        Self::with_header(BufWriter::new(File::create(path)?), header)
    }
}

impl<W: Write> AdifWriter<W> {
    /// Create a writer over an already open sink, without a header.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Create a writer and immediately write the given free-text header,
    /// followed by the end-of-header marker and a newline.
    pub fn with_header(out: W, header: &str) -> Result<Self> {
        let mut writer = Self::new(out);
        write!(writer.out, "{}", header)?;
        writeln!(writer.out, "{}", END_OF_HEADER)?;
        Ok(writer)
    }

    /// Write one record, terminated by the end-of-record marker.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        record.write(&mut self.out)?;
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Consume the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
