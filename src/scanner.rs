use std::io::Read;

use crate::error::{AdifError, Result};
use crate::source::CharSource;
use crate::types::{Field, Record};

/// Scanner states. One field is scanned by pulling a character off the
/// source and dispatching on the current state, with no lookahead.
enum ScanState {
    /// Skipping whitespace before the opening '<'.
    PreField,
    /// Accumulating the field name.
    Name,
    /// Accumulating the declared value length.
    Length,
    /// Accumulating the type indicator.
    Type,
    /// Consuming exactly the declared number of value characters.
    Value,
}

/// Scan a single `<name:length[:type]>value` field off the character source.
///
/// Returns `Ok(None)` when the source is exhausted before anything but
/// whitespace has been consumed; this is the only clean end-of-stream. Any
/// grammar violation, including end-of-stream partway through a field, is a
/// [`MalformedField`](AdifError::MalformedField) error.
///
/// The value boundary is known only through the declared length, so a value
/// may contain `<`, `>`, and whitespace; none of them terminate it.
pub fn scan_field<R: Read>(src: &mut CharSource<R>) -> Result<Option<Field>> {
    let mut name = String::new();
    let mut length = String::new();
    let mut data_type = String::new();
    let mut value = String::new();
    let mut remaining = 0usize;

    let mut state = ScanState::PreField;
    loop {
        match state {
            ScanState::PreField => match src.next_char()? {
                None => return Ok(None),
                Some('<') => state = ScanState::Name,
                Some(c) if c.is_whitespace() => {}
                Some(c) => {
                    return Err(AdifError::MalformedField {
                        position: src.position(),
                        message: format!("invalid character '{}', expected '<'", c),
                    });
                }
            },
            ScanState::Name => match src.next_char()? {
                Some(':') => state = ScanState::Length,
                Some('>') => {
                    remaining = parse_length(&length, src)?;
                    state = ScanState::Value;
                }
                Some(c) if c == '_' || c.is_alphanumeric() => name.push(c),
                Some(c) => return Err(invalid_char(src, c)),
                None => return Err(unexpected_eof(src)),
            },
            ScanState::Length => match src.next_char()? {
                Some(':') => state = ScanState::Type,
                Some('>') => {
                    remaining = parse_length(&length, src)?;
                    state = ScanState::Value;
                }
                Some(c) if c.is_ascii_digit() => length.push(c),
                Some(c) => return Err(invalid_char(src, c)),
                None => return Err(unexpected_eof(src)),
            },
            ScanState::Type => match src.next_char()? {
                Some('>') => {
                    remaining = parse_length(&length, src)?;
                    state = ScanState::Value;
                }
                Some(c) if c.is_alphanumeric() => data_type.push(c),
                Some(c) => return Err(invalid_char(src, c)),
                None => return Err(unexpected_eof(src)),
            },
            ScanState::Value => {
                if remaining == 0 {
                    let data_type = if data_type.is_empty() {
                        None
                    } else {
                        Some(data_type)
                    };
                    return Ok(Some(Field {
                        name,
                        data_type,
                        value,
                    }));
                }
                match src.next_char()? {
                    Some(c) => {
                        value.push(c);
                        remaining -= 1;
                    }
                    None => return Err(unexpected_eof(src)),
                }
            }
        }
    }
}

/// Read fields until an end-of-record marker, collecting them into a [`Record`].
///
/// The terminating field (any field named "EOR", case-insensitive) is
/// consumed and discarded, never appended. Returns `Ok(None)` when the
/// source is exhausted before any field of this record was seen, meaning no
/// more records. End-of-stream after at least one field is a
/// [`MalformedRecord`](AdifError::MalformedRecord) error: a truncated record.
pub fn read_record<R: Read>(src: &mut CharSource<R>) -> Result<Option<Record>> {
    let mut record = Record::new();
    loop {
        match scan_field(src)? {
            None => {
                if record.is_empty() {
                    return Ok(None);
                }
                return Err(AdifError::MalformedRecord {
                    message: "expected field or <eor>".to_string(),
                });
            }
            Some(field) if field.name.eq_ignore_ascii_case("EOR") => {
                return Ok(Some(record));
            }
            Some(field) => record.add_field(field),
        }
    }
}

/// Finalize the length buffer: empty means a zero-length value.
fn parse_length<R>(length: &str, src: &CharSource<R>) -> Result<usize>
where
    R: Read,
{
    if length.is_empty() {
        return Ok(0);
    }
    length.parse().map_err(|_| AdifError::MalformedField {
        position: src.position(),
        message: format!("can't parse field length '{}'", length),
    })
}

fn invalid_char<R>(src: &CharSource<R>, c: char) -> AdifError
where
    R: Read,
{
    AdifError::MalformedField {
        position: src.position(),
        message: format!("invalid character '{}'", c),
    }
}

fn unexpected_eof<R>(src: &CharSource<R>) -> AdifError
where
    R: Read,
{
    AdifError::MalformedField {
        position: src.position(),
        message: "unexpected end-of-file while reading field".to_string(),
    }
}
