//! Raw variable length records.

use crate::Result;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Error as IoError, ErrorKind, Read, Write};

/// The size of a vlr header, before its data.
pub const VLR_HEADER_LEN: u64 = 54;

/// The size of an evlr header, before its data.
pub const EVLR_HEADER_LEN: u64 = 60;

/// A raw variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// Reserved, should be zero.
    pub reserved: u16,

    /// The user id, NUL filled.
    pub user_id: [u8; 16],

    /// The record id.
    pub record_id: u16,

    /// The number of bytes after the record's header.
    ///
    /// This is a `u16` for regular vlrs and a `u64` for extended vlrs.
    pub record_length_after_header: RecordLength,

    /// The description, NUL filled.
    pub description: [u8; 32],

    /// The data.
    pub data: Vec<u8>,
}

/// The length of the data in the vlr.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordLength {
    /// Vlrs use u16.
    Vlr(u16),

    /// Evlrs use u64.
    Evlr(u64),
}

impl Vlr {
    /// Reads a raw vlr or evlr.
    ///
    /// The data is read through a `take`, so a bogus length cannot allocate more than the source
    /// holds. A source that ends early is an `UnexpectedEof` io error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_stream::raw::Vlr;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Vlr::default().write_to(&mut cursor).unwrap();
    /// cursor.set_position(0);
    /// let vlr = Vlr::read_from(cursor, false).unwrap();
    /// ```
    pub fn read_from<R: Read>(mut read: R, extended: bool) -> Result<Vlr> {
        let reserved = read.read_u16::<LittleEndian>()?;
        let mut user_id = [0; 16];
        read.read_exact(&mut user_id)?;
        let record_id = read.read_u16::<LittleEndian>()?;
        let record_length_after_header = if extended {
            RecordLength::Evlr(read.read_u64::<LittleEndian>()?)
        } else {
            RecordLength::Vlr(read.read_u16::<LittleEndian>()?)
        };
        let mut description = [0; 32];
        read.read_exact(&mut description)?;
        let len = u64::from(record_length_after_header);
        let mut data = Vec::new();
        let n = read.take(len).read_to_end(&mut data)?;
        if (n as u64) < len {
            return Err(IoError::from(ErrorKind::UnexpectedEof).into());
        }
        Ok(Vlr {
            reserved,
            user_id,
            record_id,
            record_length_after_header,
            description,
            data,
        })
    }

    /// Writes a raw vlr or evlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_stream::raw::Vlr;
    /// let mut cursor = Cursor::new(Vec::new());
    /// let vlr = Vlr::default();
    /// vlr.write_to(&mut cursor).unwrap();
    /// assert_eq!(54, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_u16::<LittleEndian>(self.reserved)?;
        write.write_all(&self.user_id)?;
        write.write_u16::<LittleEndian>(self.record_id)?;
        match self.record_length_after_header {
            RecordLength::Vlr(n) => write.write_u16::<LittleEndian>(n)?,
            RecordLength::Evlr(n) => write.write_u64::<LittleEndian>(n)?,
        }
        write.write_all(&self.description)?;
        write.write_all(&self.data)?;
        Ok(())
    }

    /// Returns the total length of this vlr on disk, header included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        let header_len = match self.record_length_after_header {
            RecordLength::Vlr(_) => VLR_HEADER_LEN,
            RecordLength::Evlr(_) => EVLR_HEADER_LEN,
        };
        header_len + self.data.len() as u64
    }
}

impl From<RecordLength> for u64 {
    fn from(record_length: RecordLength) -> u64 {
        match record_length {
            RecordLength::Vlr(n) => u64::from(n),
            RecordLength::Evlr(n) => n,
        }
    }
}

impl Default for RecordLength {
    fn default() -> RecordLength {
        RecordLength::Vlr(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Cursor;

    #[test]
    fn evlr_roundtrip() {
        let vlr = Vlr {
            record_length_after_header: RecordLength::Evlr(3),
            data: vec![1, 2, 3],
            ..Default::default()
        };
        assert_eq!(63, vlr.len());
        let mut cursor = Cursor::new(Vec::new());
        vlr.write_to(&mut cursor).unwrap();
        assert_eq!(63, cursor.get_ref().len());
        cursor.set_position(0);
        assert_eq!(vlr, Vlr::read_from(cursor, true).unwrap());
    }

    #[test]
    fn short_data() {
        let vlr = Vlr {
            record_length_after_header: RecordLength::Vlr(10),
            data: vec![1, 2, 3],
            ..Default::default()
        };
        let mut bytes = Vec::new();
        vlr.write_to(&mut bytes).unwrap();
        match Vlr::read_from(&bytes[..], false).unwrap_err() {
            Error::Io(err) => assert_eq!(ErrorKind::UnexpectedEof, err.kind()),
            err => panic!("unexpected error: {err}"),
        }
    }
}
