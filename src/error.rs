use thiserror::Error;

/// Errors that can occur while reading or writing ADIF streams
#[derive(Error, Debug)]
pub enum AdifError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed field at position {position}: {message}")]
    MalformedField { position: usize, message: String },

    #[error("Malformed record: {message}")]
    MalformedRecord { message: String },
}

pub type Result<T> = std::result::Result<T, AdifError>;
