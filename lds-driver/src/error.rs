use std::io;

pub type Result<T> = std::result::Result<T, LdsError>;

#[derive(Debug, thiserror::Error)]
pub enum LdsError {
    #[error("Record of {len} bytes is not a whole number of 4-byte floats.")]
    MalformedRecord { len: usize },
    #[error(transparent)]
    SerialError(#[from] serialport::Error),
    #[error(transparent)]
    IoError(#[from] io::Error),
}
