//! Raw file metadata.

use crate::{
    Error, Result, Version,
    feature::{Evlrs, LargeFiles, Waveforms},
    raw::LASF,
    utils,
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{ErrorKind, Read, Write};

const IS_COMPRESSED_MASK: u8 = 0x80;

/// A las public header block, field for field.
///
/// Fields introduced by later versions are `Option`s, and are only read or written when the
/// version supports them.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// The file signature, always "LASF".
    pub file_signature: [u8; 4],

    /// The file source id, often the flight line.
    ///
    /// Zero means no id has been assigned.
    pub file_source_id: u16,

    /// A bit field of global properties.
    ///
    /// | Bit | Meaning | Since |
    /// | --- | ------- | ----- |
    /// | 0 | GPS time is standard GPS time minus 1e9 | 1.2 |
    /// | 1 | Waveform data packets are internal | 1.3 |
    /// | 2 | Waveform data packets are external (`.wdp`) | 1.3 |
    /// | 3 | Return numbers are synthetic | 1.3 |
    /// | 4 | The CRS is WKT | 1.4 |
    pub global_encoding: u16,

    /// The project id.
    pub guid: [u8; 16],

    /// The las version.
    pub version: Version,

    /// The hardware system or operation that produced the file, NUL filled.
    pub system_identifier: [u8; 32],

    /// The software that produced the file, NUL filled.
    pub generating_software: [u8; 32],

    /// The GMT day of the year the file was created, where January 1 is day 1.
    pub file_creation_day_of_year: u16,

    /// The four digit year the file was created.
    pub file_creation_year: u16,

    /// The size of this header in bytes.
    ///
    /// Bytes beyond the version's size are kept in `padding`.
    pub header_size: u16,

    /// The byte offset from the start of the file to the first point record.
    pub offset_to_point_data: u32,

    /// The number of variable length records between the header and the points.
    pub number_of_variable_length_records: u32,

    /// The point data format byte, including the laszip compression bit.
    pub point_data_record_format: u8,

    /// The size of one point record, in bytes.
    pub point_data_record_length: u16,

    /// The legacy point count.
    pub number_of_point_records: u32,

    /// The legacy point counts for returns one through five.
    pub number_of_points_by_return: [u32; 5],

    #[allow(missing_docs)]
    pub x_scale_factor: f64,
    #[allow(missing_docs)]
    pub y_scale_factor: f64,
    #[allow(missing_docs)]
    pub z_scale_factor: f64,
    #[allow(missing_docs)]
    pub x_offset: f64,
    #[allow(missing_docs)]
    pub y_offset: f64,
    #[allow(missing_docs)]
    pub z_offset: f64,
    #[allow(missing_docs)]
    pub max_x: f64,
    #[allow(missing_docs)]
    pub min_x: f64,
    #[allow(missing_docs)]
    pub max_y: f64,
    #[allow(missing_docs)]
    pub min_y: f64,
    #[allow(missing_docs)]
    pub max_z: f64,
    #[allow(missing_docs)]
    pub min_z: f64,

    /// **las 1.3 and 1.4**: The byte offset to the waveform data packet record, if any.
    pub start_of_waveform_data_packet_record: Option<u64>,

    /// **las 1.4**: Where the extended variable length records live.
    pub evlr: Option<Evlr>,

    /// **las 1.4**: The 64-bit point counts.
    pub large_file: Option<LargeFile>,

    /// Bytes between the end of the version's header and `header_size`.
    pub padding: Vec<u8>,
}

/// The location of the extended variable length records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evlr {
    /// The byte offset to the first evlr.
    pub start_of_first_evlr: u64,

    /// The number of evlrs, including the waveform data packet record.
    pub number_of_evlrs: u32,
}

/// The 64-bit point counts of a las 1.4 header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LargeFile {
    /// The total number of point records.
    pub number_of_point_records: u64,

    /// The number of points for returns one through fifteen.
    pub number_of_points_by_return: [u64; 15],
}

impl Header {
    /// Reads a raw header from a `Read`.
    ///
    /// The signature is checked first, so reading garbage fails with `Error::BadSignature` before
    /// anything else. An early end of input is `Error::TruncatedHeader`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_stream::raw::Header;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// cursor.set_position(0);
    /// let header = Header::read_from(cursor).unwrap();
    /// assert_eq!(227, header.header_size);
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Header> {
        let mut file_signature = [0; 4];
        read.read_exact(&mut file_signature).map_err(truncated)?;
        if file_signature != LASF {
            return Err(Error::BadSignature(file_signature));
        }
        Header::read_after_signature(file_signature, read).map_err(|err| match err {
            Error::Io(err) if err.kind() == ErrorKind::UnexpectedEof => Error::TruncatedHeader,
            err => err,
        })
    }

    fn read_after_signature<R: Read>(file_signature: [u8; 4], mut read: R) -> Result<Header> {
        let file_source_id = read.read_u16::<LittleEndian>()?;
        let global_encoding = read.read_u16::<LittleEndian>()?;
        let mut guid = [0; 16];
        read.read_exact(&mut guid)?;
        let version_major = read.read_u8()?;
        let version_minor = read.read_u8()?;
        let version = Version::new(version_major, version_minor);
        let mut system_identifier = [0; 32];
        read.read_exact(&mut system_identifier)?;
        let mut generating_software = [0; 32];
        read.read_exact(&mut generating_software)?;
        let file_creation_day_of_year = read.read_u16::<LittleEndian>()?;
        let file_creation_year = read.read_u16::<LittleEndian>()?;
        let header_size = read.read_u16::<LittleEndian>()?;
        if header_size < version.header_size() {
            return Err(Error::HeaderSize {
                version,
                header_size,
            });
        }
        let offset_to_point_data = read.read_u32::<LittleEndian>()?;
        let number_of_variable_length_records = read.read_u32::<LittleEndian>()?;
        let point_data_record_format = read.read_u8()?;
        let point_data_record_length = read.read_u16::<LittleEndian>()?;
        let number_of_point_records = read.read_u32::<LittleEndian>()?;
        let mut number_of_points_by_return = [0; 5];
        for n in &mut number_of_points_by_return {
            *n = read.read_u32::<LittleEndian>()?;
        }
        let x_scale_factor = read.read_f64::<LittleEndian>()?;
        let y_scale_factor = read.read_f64::<LittleEndian>()?;
        let z_scale_factor = read.read_f64::<LittleEndian>()?;
        let x_offset = read.read_f64::<LittleEndian>()?;
        let y_offset = read.read_f64::<LittleEndian>()?;
        let z_offset = read.read_f64::<LittleEndian>()?;
        let max_x = read.read_f64::<LittleEndian>()?;
        let min_x = read.read_f64::<LittleEndian>()?;
        let max_y = read.read_f64::<LittleEndian>()?;
        let min_y = read.read_f64::<LittleEndian>()?;
        let max_z = read.read_f64::<LittleEndian>()?;
        let min_z = read.read_f64::<LittleEndian>()?;
        let start_of_waveform_data_packet_record = if version.supports::<Waveforms>() {
            utils::some_or_none_if_zero(read.read_u64::<LittleEndian>()?)
        } else {
            None
        };
        let evlr = if version.supports::<Evlrs>() {
            Evlr::read_from(&mut read)?.into_option()
        } else {
            None
        };
        let large_file = if version.supports::<LargeFiles>() {
            Some(LargeFile::read_from(&mut read)?)
        } else {
            None
        };
        let padding = if header_size > version.header_size() {
            let mut bytes = vec![0; usize::from(header_size - version.header_size())];
            read.read_exact(&mut bytes)?;
            bytes
        } else {
            Vec::new()
        };
        Ok(Header {
            file_signature,
            file_source_id,
            global_encoding,
            guid,
            version,
            system_identifier,
            generating_software,
            file_creation_day_of_year,
            file_creation_year,
            header_size,
            offset_to_point_data,
            number_of_variable_length_records,
            point_data_record_format,
            point_data_record_length,
            number_of_point_records,
            number_of_points_by_return,
            x_scale_factor,
            y_scale_factor,
            z_scale_factor,
            x_offset,
            y_offset,
            z_offset,
            max_x,
            min_x,
            max_y,
            min_y,
            max_z,
            min_z,
            start_of_waveform_data_packet_record,
            evlr,
            large_file,
            padding,
        })
    }

    /// Returns true if this raw header is for compressed las data.
    ///
    /// Though this isn't part of the las spec, the high bit of the point data format id marks
    /// laszip compressed data.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::raw::Header;
    /// let mut header = Header::default();
    /// assert!(!header.is_compressed());
    /// header.point_data_record_format = 131;
    /// assert!(header.is_compressed());
    /// ```
    pub fn is_compressed(&self) -> bool {
        (self.point_data_record_format & IS_COMPRESSED_MASK) == IS_COMPRESSED_MASK
    }

    /// Returns the 64-bit point count if it is set, else the legacy count.
    pub fn number_of_points(&self) -> u64 {
        self.large_file
            .map(|large_file| large_file.number_of_point_records)
            .filter(|&n| n > 0)
            .unwrap_or_else(|| u64::from(self.number_of_point_records))
    }

    /// Writes a raw header to a `Write`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_stream::raw::Header;
    /// let mut cursor = Cursor::new(Vec::new());
    /// let header = Header::default();
    /// header.write_to(&mut cursor).unwrap();
    /// assert_eq!(227, cursor.into_inner().len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_all(&self.file_signature)?;
        write.write_u16::<LittleEndian>(self.file_source_id)?;
        write.write_u16::<LittleEndian>(self.global_encoding)?;
        write.write_all(&self.guid)?;
        write.write_u8(self.version.major)?;
        write.write_u8(self.version.minor)?;
        write.write_all(&self.system_identifier)?;
        write.write_all(&self.generating_software)?;
        write.write_u16::<LittleEndian>(self.file_creation_day_of_year)?;
        write.write_u16::<LittleEndian>(self.file_creation_year)?;
        write.write_u16::<LittleEndian>(self.header_size)?;
        write.write_u32::<LittleEndian>(self.offset_to_point_data)?;
        write.write_u32::<LittleEndian>(self.number_of_variable_length_records)?;
        write.write_u8(self.point_data_record_format)?;
        write.write_u16::<LittleEndian>(self.point_data_record_length)?;
        write.write_u32::<LittleEndian>(self.number_of_point_records)?;
        for n in &self.number_of_points_by_return {
            write.write_u32::<LittleEndian>(*n)?;
        }
        write.write_f64::<LittleEndian>(self.x_scale_factor)?;
        write.write_f64::<LittleEndian>(self.y_scale_factor)?;
        write.write_f64::<LittleEndian>(self.z_scale_factor)?;
        write.write_f64::<LittleEndian>(self.x_offset)?;
        write.write_f64::<LittleEndian>(self.y_offset)?;
        write.write_f64::<LittleEndian>(self.z_offset)?;
        write.write_f64::<LittleEndian>(self.max_x)?;
        write.write_f64::<LittleEndian>(self.min_x)?;
        write.write_f64::<LittleEndian>(self.max_y)?;
        write.write_f64::<LittleEndian>(self.min_y)?;
        write.write_f64::<LittleEndian>(self.max_z)?;
        write.write_f64::<LittleEndian>(self.min_z)?;
        if self.version.supports::<Waveforms>() {
            write
                .write_u64::<LittleEndian>(self.start_of_waveform_data_packet_record.unwrap_or(0))?;
        }
        if self.version.supports::<Evlrs>() {
            let evlr = self.evlr.unwrap_or_default();
            write.write_u64::<LittleEndian>(evlr.start_of_first_evlr)?;
            write.write_u32::<LittleEndian>(evlr.number_of_evlrs)?;
        }
        if self.version.supports::<LargeFiles>() {
            let large_file = self.large_file.unwrap_or_default();
            write.write_u64::<LittleEndian>(large_file.number_of_point_records)?;
            for n in &large_file.number_of_points_by_return {
                write.write_u64::<LittleEndian>(*n)?;
            }
        }
        if !self.padding.is_empty() {
            write.write_all(&self.padding)?;
        }
        Ok(())
    }
}

impl Default for Header {
    fn default() -> Header {
        let version = Version::new(1, 2);
        Header {
            file_signature: LASF,
            file_source_id: 0,
            global_encoding: 0,
            guid: [0; 16],
            version,
            system_identifier: [0; 32],
            generating_software: [0; 32],
            file_creation_day_of_year: 0,
            file_creation_year: 0,
            header_size: version.header_size(),
            offset_to_point_data: u32::from(version.header_size()),
            number_of_variable_length_records: 0,
            point_data_record_format: 0,
            point_data_record_length: 20,
            number_of_point_records: 0,
            number_of_points_by_return: [0; 5],
            x_scale_factor: 0.001,
            y_scale_factor: 0.001,
            z_scale_factor: 0.001,
            x_offset: 0.,
            y_offset: 0.,
            z_offset: 0.,
            max_x: 0.,
            min_x: 0.,
            max_y: 0.,
            min_y: 0.,
            max_z: 0.,
            min_z: 0.,
            start_of_waveform_data_packet_record: None,
            evlr: None,
            large_file: None,
            padding: Vec::new(),
        }
    }
}

impl Evlr {
    fn read_from<R: Read>(mut read: R) -> Result<Evlr> {
        Ok(Evlr {
            start_of_first_evlr: read.read_u64::<LittleEndian>()?,
            number_of_evlrs: read.read_u32::<LittleEndian>()?,
        })
    }

    fn into_option(self) -> Option<Evlr> {
        if self.start_of_first_evlr == 0 && self.number_of_evlrs == 0 {
            None
        } else {
            Some(self)
        }
    }
}

impl LargeFile {
    fn read_from<R: Read>(mut read: R) -> Result<LargeFile> {
        let number_of_point_records = read.read_u64::<LittleEndian>()?;
        let mut number_of_points_by_return = [0; 15];
        for n in &mut number_of_points_by_return {
            *n = read.read_u64::<LittleEndian>()?;
        }
        Ok(LargeFile {
            number_of_point_records,
            number_of_points_by_return,
        })
    }
}

fn truncated(err: std::io::Error) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::TruncatedHeader
    } else {
        Error::Io(err)
    }
}
