use super::ReadPoints;
use crate::Result;
use std::io::{Error as IoError, ErrorKind, Read, Take};

/// Reads uncompressed point records, up to the end of the point data.
pub(crate) struct PointReader<R: Read> {
    read: Take<R>,
}

impl<R: Read> PointReader<R> {
    /// `limit` is the number of bytes of point data, if known.
    pub(crate) fn new(read: R, limit: Option<u64>) -> PointReader<R> {
        PointReader {
            read: read.take(limit.unwrap_or(u64::MAX)),
        }
    }
}

impl<R: Read + Send> ReadPoints for PointReader<R> {
    fn read_record(&mut self, buffer: &mut [u8]) -> Result<bool> {
        let mut filled = 0;
        while filled < buffer.len() {
            match self.read.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }
        if filled == 0 {
            Ok(false)
        } else if filled < buffer.len() {
            Err(IoError::from(ErrorKind::UnexpectedEof).into())
        } else {
            Ok(true)
        }
    }
}
