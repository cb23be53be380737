//! Byte-at-a-time view over whatever carries the sensor stream.
//!
//! `None` means the stream ended, or the transport timed out, before the
//! request could be satisfied. It is an expected outcome, not an error: the
//! caller simply gets no scan this cycle and may try again later.

use crate::error::Result;
use std::io::{ErrorKind, Read};

pub trait ByteSource {
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Reads exactly `n` bytes, or returns `None` if the stream ends first.
    /// Bytes read before the stream ended are discarded.
    fn read_exact_bytes(&mut self, n: usize) -> Result<Option<Vec<u8>>>;
}

impl<R: Read + ?Sized> ByteSource for R {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match fill(self, &mut buf)? {
            1 => Ok(Some(buf[0])),
            _ => Ok(None),
        }
    }

    fn read_exact_bytes(&mut self, n: usize) -> Result<Option<Vec<u8>>> {
        let mut buf = vec![0u8; n];
        if fill(self, &mut buf)? < n {
            return Ok(None);
        }
        Ok(Some(buf))
    }
}

/// Reads until `buf` is full or the stream ends. Returns the number of bytes read.
fn fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut n_read = 0;
    while n_read < buf.len() {
        match reader.read(&mut buf[n_read..]) {
            Ok(0) => break,
            Ok(n) => n_read += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::UnexpectedEof
                ) =>
            {
                break
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(n_read)
}
