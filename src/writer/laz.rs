use super::WritePoints;
use crate::{Header, Result};
use ::laz::{LasZipCompressor, LazCompressor, LazCompressorWithInner};
use std::io::{Seek, Write};

/// Compresses point records with laszip.
pub(crate) struct PointWriter<W: Write + Seek + Send + 'static> {
    compressor: LasZipCompressor<'static, W>,
}

impl<W: Write + Seek + Send + 'static> PointWriter<W> {
    pub(crate) fn new(write: W, header: &Header) -> Result<PointWriter<W>> {
        let compressor = LasZipCompressor::new(write, header.laz_vlr()?)?;
        Ok(PointWriter { compressor })
    }
}

impl<W: Write + Seek + Send + 'static> WritePoints<W> for PointWriter<W> {
    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        LazCompressor::compress_one(&mut self.compressor, record)?;
        Ok(())
    }

    fn done(&mut self) -> Result<()> {
        LazCompressor::done(&mut self.compressor)?;
        Ok(())
    }

    fn get_mut(&mut self) -> &mut W {
        self.compressor.inner_mut()
    }

    fn into_inner(self: Box<Self>) -> W {
        self.compressor.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Builder, Point, Reader, Vlr, Writer};
    use std::io::Cursor;

    #[test]
    fn evlr() {
        let vlr = Vlr {
            user_id: "las-stream".to_string(),
            record_id: 42,
            description: "A great vlr".to_string(),
            data: b"some data".to_vec(),
        };
        let mut builder = Builder::from((1, 4));
        builder.point_format.is_compressed = true;
        builder.evlrs.push(vlr);
        let header = builder.into_header().unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
        for i in 0..5 {
            let mut point = Point::new(*writer.header().point_format(), *writer.header().transforms());
            point.set_return_number(i).unwrap();
            writer.write_point(&point).unwrap();
        }
        let cursor = writer.into_inner().unwrap();
        let reader = Reader::new(cursor).unwrap();
        let evlr = &reader.header().evlrs()[0];
        assert_eq!(evlr.user_id, "las-stream");
        assert_eq!(evlr.record_id, 42);
        assert_eq!(evlr.data, b"some data");
        let return_numbers = reader
            .into_iter()
            .map(|point| point.unwrap().return_number())
            .collect::<Vec<_>>();
        assert_eq!(vec![0, 1, 2, 3, 4], return_numbers);
    }
}
