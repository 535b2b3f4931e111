use super::WritePoints;
use crate::Result;
use std::io::{Seek, Write};

/// Writes uncompressed point records.
pub(crate) struct PointWriter<W: Write + Seek> {
    write: W,
}

impl<W: Write + Seek> PointWriter<W> {
    pub(crate) fn new(write: W) -> PointWriter<W> {
        PointWriter { write }
    }
}

impl<W: Write + Seek + Send> WritePoints<W> for PointWriter<W> {
    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        self.write.write_all(record)?;
        Ok(())
    }

    fn done(&mut self) -> Result<()> {
        Ok(())
    }

    fn get_mut(&mut self) -> &mut W {
        &mut self.write
    }

    fn into_inner(self: Box<Self>) -> W {
        self.write
    }
}
