//! Streaming ADIF Reader and Writer
//!
//! A library for reading and writing ADIF (Amateur Data Interchange Format)
//! log files in the ADI format. Fields are scanned one character at a time
//! off any `std::io::Read` source, so no lookahead or whole-file buffering
//! is required.

mod error;
mod reader;
mod scanner;
mod source;
mod types;
mod writer;

pub use error::{AdifError, Result};
pub use reader::AdifReader;
pub use scanner::{read_record, scan_field};
pub use source::CharSource;
pub use types::{Field, Record};
pub use writer::AdifWriter;
