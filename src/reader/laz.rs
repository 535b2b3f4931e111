use super::ReadPoints;
use crate::{Header, Result};
use laz::{LasZipDecompressor, LazDecompressor};
use std::io::{Read, Seek};

/// Decompresses point records with laszip.
///
/// The decompressor can't tell where the points end, so the reader always stops at the header's
/// point count.
pub(crate) struct PointReader<R: Read + Seek + Send + 'static> {
    decompressor: LasZipDecompressor<'static, R>,
}

impl<R: Read + Seek + Send + 'static> PointReader<R> {
    pub(crate) fn new(read: R, header: &Header) -> Result<PointReader<R>> {
        let decompressor = LasZipDecompressor::new(read, header.laz_vlr()?)?;
        Ok(PointReader { decompressor })
    }
}

impl<R: Read + Seek + Send + 'static> ReadPoints for PointReader<R> {
    fn read_record(&mut self, buffer: &mut [u8]) -> Result<bool> {
        LazDecompressor::decompress_one(&mut self.decompressor, buffer)?;
        Ok(true)
    }
}
