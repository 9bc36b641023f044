use std::io::{self, Read};

/// Pull-based character source over any byte stream.
///
/// Decodes UTF-8 one scalar value at a time so callers never need lookahead
/// or whole-stream buffering. End-of-stream is reported as `Ok(None)`.
/// Reads are issued one byte at a time; wrap files in a `BufReader`.
pub struct CharSource<R> {
    inner: R,
    position: usize,
}

impl<R: Read> CharSource<R> {
    /// Create a character source over the given byte stream.
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Read the next character, or `Ok(None)` at end-of-stream.
    ///
    /// A byte sequence that is not valid UTF-8, or one truncated by
    /// end-of-stream, is reported as an `InvalidData` error.
    pub fn next_char(&mut self) -> io::Result<Option<char>> {
        let mut buf = [0u8; 4];
        if !self.read_byte(&mut buf[..1])? {
            return Ok(None);
        }

        let len = match utf8_len(buf[0]) {
            Some(len) => len,
            None => return Err(invalid_utf8(self.position)),
        };
        if len > 1 {
            self.inner.read_exact(&mut buf[1..len]).map_err(|e| {
                if e.kind() == io::ErrorKind::UnexpectedEof {
                    invalid_utf8(self.position)
                } else {
                    e
                }
            })?;
        }

        match std::str::from_utf8(&buf[..len]).ok().and_then(|s| s.chars().next()) {
            Some(c) => {
                self.position += 1;
                Ok(Some(c))
            }
            None => Err(invalid_utf8(self.position)),
        }
    }

    fn read_byte(&mut self, buf: &mut [u8]) -> io::Result<bool> {
        loop {
            match self.inner.read(buf) {
                Ok(0) => return Ok(false),
                Ok(_) => return Ok(true),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Sequence length implied by a UTF-8 leading byte, or `None` for a byte
/// that cannot start a sequence.
fn utf8_len(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(position: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 sequence after character {}", position),
    )
}
