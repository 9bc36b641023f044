use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{AdifError, Result};
use crate::scanner::read_record;
use crate::source::CharSource;
use crate::types::Record;

const END_OF_HEADER: &str = "<eoh>";

/// Streaming reader for ADIF log data.
///
/// Owns its underlying character source for the session's lifetime and
/// reads records sequentially; there is no seeking or rewinding. After a
/// parse error the stream position is undefined and further reads are not
/// meaningful.
pub struct AdifReader<R> {
    src: CharSource<R>,
    failed: bool,
}

impl AdifReader<BufReader<File>> {
    /// Open an ADIF log file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> AdifReader<R> {
    /// Create a reader over an already open byte stream.
    pub fn new(inner: R) -> Self {
        Self {
            src: CharSource::new(inner),
            failed: false,
        }
    }

    /// Retrieve the next record.
    ///
    /// Returns `Ok(None)` once the stream is exhausted: end-of-stream
    /// before any field of a record is "no more records", while
    /// end-of-stream after a partial record is a
    /// [`MalformedRecord`](AdifError::MalformedRecord) error.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        read_record(&mut self.src)
    }

    /// Consume the free-text header through the first `<eoh>` marker
    /// (case-insensitive), returning the text that precedes it.
    ///
    /// ADIF headers are free text, so the field scanner cannot step over
    /// them; call this once, before the first record, on streams known to
    /// carry a header. On a stream without one the whole input is consumed
    /// and a [`MalformedRecord`](AdifError::MalformedRecord) error is
    /// returned. Whitespace after the marker is skipped by the next
    /// record read.
    pub fn skip_header(&mut self) -> Result<String> {
        let marker: Vec<char> = END_OF_HEADER.chars().collect();
        let mut text = String::new();
        let mut pending: Vec<char> = Vec::new();

        loop {
            let c = match self.src.next_char()? {
                Some(c) => c,
                None => {
                    return Err(AdifError::MalformedRecord {
                        message: "unexpected end-of-file before <eoh>".to_string(),
                    });
                }
            };
            if c.to_ascii_lowercase() == marker[pending.len()] {
                pending.push(c);
                if pending.len() == marker.len() {
                    return Ok(text);
                }
            } else {
                text.extend(pending.drain(..));
                if c.to_ascii_lowercase() == marker[0] {
                    pending.push(c);
                } else {
                    text.push(c);
                }
            }
        }
    }
}

impl<R: Read> Iterator for AdifReader<R> {
    type Item = Result<Record>;

    /// Yields records until the stream is exhausted. Iteration fuses after
    /// the first error since the stream position is undefined past it.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
