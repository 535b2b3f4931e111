//! Metadata describing the layout and interpretation of points.
//!
//! A [Header] is read along with its variable length records when a
//! [Reader](crate::Reader) opens las data, and is immutable from then on. Use a [Builder] to
//! author a header for writing:
//!
//! ```
//! use las_stream::{Builder, Header};
//! use las_stream::point::Format;
//!
//! let mut builder = Builder::from((1, 4));
//! builder.point_format = Format::new(6).unwrap();
//! let header = builder.into_header().unwrap();
//! assert_eq!(375, header.header_size());
//! ```
//!
//! Point counts are reconciled when reading: a non-zero 64-bit count wins over the legacy 32-bit
//! count.
//!
//! ```
//! use las_stream::{Builder, raw};
//! use las_stream::raw::header::LargeFile;
//!
//! let mut raw_header = raw::Header {
//!     version: (1, 4).into(),
//!     number_of_point_records: 0,
//!     large_file: Some(LargeFile {
//!         number_of_point_records: 42,
//!         number_of_points_by_return: [0; 15],
//!     }),
//!     ..Default::default()
//! };
//! raw_header.header_size = 375;
//! let header = Builder::new(raw_header).unwrap().into_header().unwrap();
//! assert_eq!(42, header.number_of_points());
//! ```

mod builder;

pub use self::builder::Builder;

use crate::{
    Bounds, Error, GlobalEncoding, GpsTimeType, Point, Result, Transform, Vector, Version, Vlr,
    feature::{LargeFiles, Waveforms},
    point::{ExtraBytesDescription, Format},
    raw::{
        self,
        header::{Evlr, LargeFile},
    },
    utils::FromLasStr,
};
use chrono::{Datelike, NaiveDate};
use std::io::{ErrorKind, Read, Write};
use uuid::Uuid;

/// Metadata describing the layout, source, and interpretation of the points.
///
/// Headers include *all* las metadata, including regular and extended variable length records and
/// any file padding (e.g. extra bytes after the header).
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    bounds: Bounds,
    date: Option<NaiveDate>,
    evlrs: Vec<Vlr>,
    extra_bytes: Vec<ExtraBytesDescription>,
    file_source_id: u16,
    generating_software: String,
    gps_time_type: GpsTimeType,
    guid: Uuid,
    has_synthetic_return_numbers: bool,
    has_waveforms_external: bool,
    has_waveforms_internal: bool,
    has_wkt_crs: bool,
    number_of_points: u64,
    number_of_points_by_return: [u64; 15],
    padding: Vec<u8>,
    point_format: Format,
    point_padding: Vec<u8>,
    system_identifier: String,
    transforms: Vector<Transform>,
    version: Version,
    vlr_padding: Vec<u8>,
    vlrs: Vec<Vlr>,
    evlr: Option<Evlr>,
    start_of_waveform_data_packet_record: Option<u64>,
}

impl Header {
    /// Reads a header and its variable length records.
    ///
    /// The `Read` is left at the start of the point data. Extended variable length records live
    /// after the points, and are read by the [Reader](crate::Reader) when the source can seek.
    ///
    /// A variable length record that ends early, or that crosses into the point data, is
    /// `Error::TruncatedVlr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_stream::{Header, Vlr};
    ///
    /// let mut header = Header::default();
    /// header.push_vlr(Vlr { data: vec![1, 2, 3], ..Default::default() });
    /// let mut cursor = Cursor::new(Vec::new());
    /// header.write_to(&mut cursor).unwrap();
    /// cursor.set_position(0);
    ///
    /// let header = Header::read_from(&mut cursor).unwrap();
    /// assert_eq!(1, header.vlrs().len());
    /// assert_eq!(227 + 54 + 3, cursor.position());
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Header> {
        let raw_header = raw::Header::read_from(&mut read)?;
        let offset_to_point_data = raw_header.offset_to_point_data;
        let header_size = raw_header.header_size;
        if offset_to_point_data < u32::from(header_size) {
            return Err(Error::OffsetToPointData {
                offset: offset_to_point_data,
                header_size,
            });
        }
        let number_of_variable_length_records = raw_header.number_of_variable_length_records;
        let mut builder = Builder::new(raw_header)?;

        let mut position = u64::from(header_size);
        let end = u64::from(offset_to_point_data);
        for index in 0..number_of_variable_length_records {
            let truncated = |err: Error| match err {
                Error::Io(err) if err.kind() == ErrorKind::UnexpectedEof => Error::TruncatedVlr {
                    index,
                    is_extended: false,
                },
                err => err,
            };
            let raw_vlr =
                raw::Vlr::read_from((&mut read).take(end - position), false).map_err(truncated)?;
            position += raw_vlr.len();
            builder.vlrs.push(Vlr::new(raw_vlr)?);
        }

        let mut vlr_padding = vec![0; usize::try_from(end - position)?];
        read.read_exact(&mut vlr_padding)?;
        builder.vlr_padding = vlr_padding;
        builder.into_header()
    }

    /// Writes the public header block, the variable length records, and the vlr padding.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// let mut bytes = Vec::new();
    /// Header::default().write_to(&mut bytes).unwrap();
    /// assert_eq!(227, bytes.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.clone().into_raw()?.write_to(&mut write)?;
        for vlr in &self.vlrs {
            vlr.clone().into_raw(false)?.write_to(&mut write)?;
        }
        if !self.vlr_padding.is_empty() {
            write.write_all(&self.vlr_padding)?;
        }
        Ok(())
    }

    /// Converts this header into a raw header.
    ///
    /// Legacy 32-bit counts are zeroed for las 1.4 when they cannot hold the counts, or when the
    /// point format is extended. Before las 1.4, counts that don't fit are an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// let raw_header = Header::default().into_raw().unwrap();
    /// assert_eq!(227, raw_header.header_size);
    /// ```
    pub fn into_raw(self) -> Result<raw::Header> {
        let mut system_identifier = [0; 32];
        system_identifier.from_las_str(&self.system_identifier)?;
        let mut generating_software = [0; 32];
        generating_software.from_las_str(&self.generating_software)?;
        let header_size = self.header_size();
        let offset_to_point_data = self.offset_to_point_data()?;
        let number_of_variable_length_records = u32::try_from(self.vlrs.len())?;
        let number_of_point_records = self.legacy_number_of_points()?;
        let number_of_points_by_return = self.legacy_number_of_points_by_return()?;
        let bounds = if self.bounds.is_empty() {
            Bounds {
                min: Vector::default(),
                max: Vector::default(),
            }
        } else {
            self.bounds
        };
        let evlr = if self.evlrs.is_empty() {
            None
        } else {
            Some(Evlr {
                start_of_first_evlr: self.evlr.map_or(0, |evlr| evlr.start_of_first_evlr),
                number_of_evlrs: u32::try_from(self.evlrs.len())?,
            })
        };
        let large_file = if self.version.supports::<LargeFiles>() {
            Some(LargeFile {
                number_of_point_records: self.number_of_points,
                number_of_points_by_return: self.number_of_points_by_return,
            })
        } else {
            None
        };
        Ok(raw::Header {
            file_signature: raw::LASF,
            file_source_id: self.file_source_id,
            global_encoding: self.global_encoding().into(),
            guid: *self.guid.as_bytes(),
            version: self.version,
            system_identifier,
            generating_software,
            file_creation_day_of_year: self
                .date
                .map_or(0, |date| u16::try_from(date.ordinal()).unwrap_or(0)),
            file_creation_year: self
                .date
                .map_or(0, |date| u16::try_from(date.year()).unwrap_or(0)),
            header_size,
            offset_to_point_data,
            number_of_variable_length_records,
            point_data_record_format: self.point_format.to_writable_u8(),
            point_data_record_length: self.point_format.len(),
            number_of_point_records,
            number_of_points_by_return,
            x_scale_factor: self.transforms.x.scale,
            y_scale_factor: self.transforms.y.scale,
            z_scale_factor: self.transforms.z.scale,
            x_offset: self.transforms.x.offset,
            y_offset: self.transforms.y.offset,
            z_offset: self.transforms.z.offset,
            max_x: bounds.max.x,
            min_x: bounds.min.x,
            max_y: bounds.max.y,
            min_y: bounds.min.y,
            max_z: bounds.max.z,
            min_z: bounds.min.z,
            start_of_waveform_data_packet_record: if self.version.supports::<Waveforms>() {
                self.start_of_waveform_data_packet_record
            } else {
                None
            },
            evlr,
            large_file,
            padding: self.padding,
        })
    }

    fn legacy_number_of_points(&self) -> Result<u32> {
        if self.version.supports::<LargeFiles>() {
            if self.point_format.is_extended() {
                Ok(0)
            } else {
                Ok(u32::try_from(self.number_of_points).unwrap_or(0))
            }
        } else {
            u32::try_from(self.number_of_points).map_err(|_| Error::TooManyPoints {
                n: self.number_of_points,
                version: self.version,
            })
        }
    }

    fn legacy_number_of_points_by_return(&self) -> Result<[u32; 5]> {
        let mut number_of_points_by_return = [0; 5];
        if self.version.supports::<LargeFiles>() && self.point_format.is_extended() {
            return Ok(number_of_points_by_return);
        }
        for (legacy, &n) in number_of_points_by_return
            .iter_mut()
            .zip(&self.number_of_points_by_return)
        {
            match u32::try_from(n) {
                Ok(n) => *legacy = n,
                Err(_) if self.version.supports::<LargeFiles>() => return Ok([0; 5]),
                Err(_) => {
                    return Err(Error::TooManyPoints {
                        n,
                        version: self.version,
                    });
                }
            }
        }
        Ok(number_of_points_by_return)
    }

    /// Returns the size of the public header block, including its padding.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// assert_eq!(227, Header::default().header_size());
    /// ```
    pub fn header_size(&self) -> u16 {
        self.version.header_size() + self.padding.len() as u16
    }

    /// Returns the offset from the start of the las data to the first point record.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Header, Vlr};
    /// let mut header = Header::default();
    /// header.push_vlr(Vlr::default());
    /// assert_eq!(227 + 54, header.offset_to_point_data().unwrap());
    /// ```
    pub fn offset_to_point_data(&self) -> Result<u32> {
        let vlr_len: usize = self.vlrs.iter().map(|vlr| vlr.len(false)).sum();
        let offset = usize::from(self.header_size()) + vlr_len + self.vlr_padding.len();
        u32::try_from(offset).map_err(Error::from)
    }

    /// Returns this header's file source id.
    ///
    /// For airborne data, this is often the flight line number.
    pub fn file_source_id(&self) -> u16 {
        self.file_source_id
    }

    /// Returns the gps time type.
    ///
    /// This affects what the gps time values on points means. `GpsTimeType::Week` means that the
    /// time values are seconds from the start of the week. `GpsTimeType::Standard` means that the
    /// time values are standard GPS time (satellite gps time) minus 1e9.
    pub fn gps_time_type(&self) -> GpsTimeType {
        self.gps_time_type
    }

    /// Returns the global encoding bit field.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// assert_eq!(0, u16::from(Header::default().global_encoding()));
    /// ```
    pub fn global_encoding(&self) -> GlobalEncoding {
        GlobalEncoding {
            gps_time_type: self.gps_time_type,
            has_waveforms_internal: self.has_waveforms_internal,
            has_waveforms_external: self.has_waveforms_external,
            has_synthetic_return_numbers: self.has_synthetic_return_numbers,
            has_wkt_crs: self.has_wkt_crs,
        }
    }

    /// Returns true if the return numbers on the point data records have been synthetically
    /// generated.
    pub fn has_synthetic_return_numbers(&self) -> bool {
        self.has_synthetic_return_numbers
    }

    /// Returns true if the waveform data packets are stored in this file.
    pub fn has_waveforms_internal(&self) -> bool {
        self.has_waveforms_internal
    }

    /// Returns true if the waveform data packets are stored in an external `.wdp` file.
    pub fn has_waveforms_external(&self) -> bool {
        self.has_waveforms_external
    }

    /// Returns true if the coordinate reference system is Well Known Text (WKT).
    pub fn has_wkt_crs(&self) -> bool {
        self.has_wkt_crs
    }

    /// Returns this header's guid.
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Returns this header's version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Header, Version};
    /// assert_eq!(Version::new(1, 2), Header::default().version());
    /// ```
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this header's system identifier.
    pub fn system_identifier(&self) -> &str {
        &self.system_identifier
    }

    /// Returns this header's generating software.
    pub fn generating_software(&self) -> &str {
        &self.generating_software
    }

    /// Returns this header's file creation date.
    ///
    /// Can be `None`, which is against the spec but happens with files in the wild.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns this header's padding, the bytes after the public header block.
    pub fn padding(&self) -> &Vec<u8> {
        &self.padding
    }

    /// Returns this header's point format.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// assert_eq!(0, Header::default().point_format().to_u8());
    /// ```
    pub fn point_format(&self) -> &Format {
        &self.point_format
    }

    pub(crate) fn point_format_mut(&mut self) -> &mut Format {
        &mut self.point_format
    }

    /// Returns this header's transforms.
    ///
    /// The transforms are the scales and offsets used to convert floating point numbers to `i32`s
    /// for storage in the point records.
    pub fn transforms(&self) -> &Vector<Transform> {
        &self.transforms
    }

    /// Returns the bounds of this header.
    ///
    /// The bounds are defined by the points.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns this header's number of points.
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }

    /// Returns this header's number of points for a given return number.
    ///
    /// Return numbers start at one. There are five return numbers for legacy point formats and
    /// fifteen for extended ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// let header = Header::default();
    /// assert_eq!(Some(0), header.number_of_points_by_return(1));
    /// assert_eq!(None, header.number_of_points_by_return(0));
    /// assert_eq!(None, header.number_of_points_by_return(6));
    /// ```
    pub fn number_of_points_by_return(&self, n: u8) -> Option<u64> {
        if n == 0 || n > self.point_format.number_of_return_buckets() {
            None
        } else {
            Some(self.number_of_points_by_return[usize::from(n - 1)])
        }
    }

    /// Returns this header's vlr padding.
    ///
    /// These are bytes after the vlrs but before the points. Las 1.0 files keep the point data
    /// start signature here.
    pub fn vlr_padding(&self) -> &Vec<u8> {
        &self.vlr_padding
    }

    /// Returns this header's point padding.
    ///
    /// These are bytes after the points but before the evlrs.
    pub fn point_padding(&self) -> &Vec<u8> {
        &self.point_padding
    }

    /// Returns a reference to this header's vlrs.
    pub fn vlrs(&self) -> &Vec<Vlr> {
        &self.vlrs
    }

    /// Returns a reference to this header's extended variable length records.
    ///
    /// For las 1.3, the internal waveform data packet record is kept here too.
    pub fn evlrs(&self) -> &Vec<Vlr> {
        &self.evlrs
    }

    /// Returns an iterator over all this header's vlrs, both extended and regular.
    pub fn all_vlrs(&self) -> impl Iterator<Item = &Vlr> {
        self.vlrs.iter().chain(&self.evlrs)
    }

    /// Finds the first vlr or evlr with this user id and record id.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Header, Vlr};
    /// let mut header = Header::default();
    /// header.push_vlr(Vlr { user_id: "me".to_string(), record_id: 1, ..Default::default() });
    /// assert!(header.find_vlr("me", 1).is_some());
    /// assert!(header.find_vlr("me", 2).is_none());
    /// ```
    pub fn find_vlr(&self, user_id: &str, record_id: u16) -> Option<&Vlr> {
        self.all_vlrs().find(|vlr| vlr.is(user_id, record_id))
    }

    /// Returns the extra bytes descriptions of the extra bytes vlr.
    ///
    /// Empty if there is no extra bytes vlr.
    pub fn extra_bytes(&self) -> &[ExtraBytesDescription] {
        &self.extra_bytes
    }

    /// Adds a vlr to this header.
    ///
    /// Vlrs whose data are too long for a regular vlr are stored as evlrs.
    pub fn push_vlr(&mut self, vlr: Vlr) {
        if vlr.has_large_data() {
            self.evlrs.push(vlr);
        } else {
            self.vlrs.push(vlr);
        }
    }

    /// Adds an evlr read from the end of the data.
    pub(crate) fn push_evlr(&mut self, evlr: Vlr) -> Result<()> {
        if evlr.is_extra_bytes() && self.extra_bytes.is_empty() {
            let extra_bytes = ExtraBytesDescription::parse_all(&evlr.data)?;
            for description in &extra_bytes {
                description.check_fits(usize::from(self.point_format.extra_bytes))?;
            }
            self.extra_bytes = extra_bytes;
        }
        self.evlrs.push(evlr);
        Ok(())
    }

    pub(crate) fn evlr(&self) -> Option<Evlr> {
        self.evlr
    }

    pub(crate) fn set_start_of_first_evlr(&mut self, start_of_first_evlr: u64) {
        self.evlr = Some(Evlr {
            start_of_first_evlr,
            number_of_evlrs: u32::try_from(self.evlrs.len()).unwrap_or(u32::MAX),
        });
    }

    pub(crate) fn start_of_waveform_data_packet_record(&self) -> Option<u64> {
        self.start_of_waveform_data_packet_record
    }

    pub(crate) fn set_start_of_waveform_data_packet_record(&mut self, start: Option<u64>) {
        self.start_of_waveform_data_packet_record = start;
    }

    pub(crate) fn set_waveforms_external(&mut self) {
        self.has_waveforms_internal = false;
        self.has_waveforms_external = true;
        self.evlrs.retain(|evlr| !evlr.is_waveform_data_packets());
    }

    pub(crate) fn vlrs_mut(&mut self) -> &mut Vec<Vlr> {
        &mut self.vlrs
    }

    pub(crate) fn evlrs_mut(&mut self) -> &mut Vec<Vlr> {
        &mut self.evlrs
    }

    pub(crate) fn set_has_wkt_crs(&mut self, has_wkt_crs: bool) {
        self.has_wkt_crs = has_wkt_crs;
    }

    /// Clears the point counts and bounds, and forgets where the evlrs were.
    pub(crate) fn clear(&mut self) {
        self.number_of_points = 0;
        self.number_of_points_by_return = [0; 15];
        self.bounds = Bounds::default();
        self.evlr = None;
        self.start_of_waveform_data_packet_record = None;
    }

    /// Adds a point's return number and coordinates to the counts and bounds.
    ///
    /// Return numbers outside of the format's buckets, including zero, are counted in the total
    /// only.
    pub(crate) fn add_point(&mut self, point: &Point) {
        self.number_of_points += 1;
        let return_number = point.return_number();
        if return_number > 0 && return_number <= self.point_format.number_of_return_buckets() {
            self.number_of_points_by_return[usize::from(return_number - 1)] += 1;
        }
        self.bounds.grow(point);
    }
}

impl Default for Header {
    fn default() -> Header {
        Builder::default()
            .into_header()
            .expect("the default builder always converts")
    }
}

impl<V: Into<Version>> From<V> for Header {
    fn from(version: V) -> Header {
        Builder::from(version)
            .into_header()
            .expect("a builder with only a version always converts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(header: &Header) -> Header {
        let mut cursor = Cursor::new(Vec::new());
        header.write_to(&mut cursor).unwrap();
        cursor.set_position(0);
        Header::read_from(cursor).unwrap()
    }

    #[test]
    fn number_of_points_by_return_zero() {
        let header = Header::from((1, 4));
        assert_eq!(None, header.number_of_points_by_return(0));
    }

    #[test]
    fn number_of_points_by_return_extended() {
        let mut builder = Builder::from((1, 4));
        builder.point_format = Format::new(6).unwrap();
        let header = builder.into_header().unwrap();
        assert_eq!(Some(0), header.number_of_points_by_return(15));
        assert_eq!(None, header.number_of_points_by_return(16));
    }

    #[test]
    fn add_point() {
        let mut header = Header::default();
        let mut point = Point::new(*header.point_format(), *header.transforms());
        point.set_return_number(2).unwrap();
        point.set_x(1.).unwrap();
        header.add_point(&point);
        point.set_return_number(0).unwrap();
        header.add_point(&point);
        assert_eq!(2, header.number_of_points());
        assert_eq!(Some(1), header.number_of_points_by_return(2));
        assert_eq!(Some(0), header.number_of_points_by_return(1));
        assert_eq!(1., header.bounds().max.x);
    }

    #[test]
    fn too_many_points_before_1_4() {
        let mut header = Header::from((1, 2));
        header.number_of_points = u64::from(u32::MAX) + 1;
        assert!(matches!(
            header.into_raw(),
            Err(Error::TooManyPoints { .. })
        ));
    }

    #[test]
    fn legacy_counts_zeroed_on_1_4() {
        let mut header = Header::from((1, 4));
        header.number_of_points = u64::from(u32::MAX) + 1;
        header.number_of_points_by_return[0] = 42;
        let raw_header = header.into_raw().unwrap();
        assert_eq!(0, raw_header.number_of_point_records);
        assert_eq!(
            u64::from(u32::MAX) + 1,
            raw_header.large_file.unwrap().number_of_point_records
        );
        assert_eq!(42, raw_header.number_of_points_by_return[0]);

        let mut builder = Builder::from((1, 4));
        builder.point_format = Format::new(6).unwrap();
        let mut header = builder.into_header().unwrap();
        header.number_of_points = 1;
        header.number_of_points_by_return[0] = 1;
        let raw_header = header.into_raw().unwrap();
        assert_eq!(0, raw_header.number_of_point_records);
        assert_eq!([0; 5], raw_header.number_of_points_by_return);
    }

    #[test]
    fn empty_bounds_are_zero() {
        let raw_header = Header::default().into_raw().unwrap();
        assert_eq!(0., raw_header.min_x);
        assert_eq!(0., raw_header.max_z);
    }

    #[test]
    fn roundtrip_vlrs_and_padding() {
        let mut builder = Builder::from((1, 4));
        builder.padding = vec![1, 2];
        builder.vlr_padding = vec![3];
        builder.vlrs.push(Vlr {
            user_id: "me".to_string(),
            record_id: 42,
            description: "mine".to_string(),
            data: vec![4, 5, 6],
        });
        let header = builder.into_header().unwrap();
        let other = roundtrip(&header);
        assert_eq!(header.vlrs(), other.vlrs());
        assert_eq!(header.padding(), other.padding());
        assert_eq!(header.vlr_padding(), other.vlr_padding());
        assert_eq!(377 + 57 + 1, other.offset_to_point_data().unwrap());
    }

    #[test]
    fn vlr_crosses_point_data() {
        let mut header = Header::default();
        header.push_vlr(Vlr {
            data: vec![0; 10],
            ..Default::default()
        });
        let mut raw_header = header.clone().into_raw().unwrap();
        raw_header.offset_to_point_data -= 5;
        let mut bytes = Vec::new();
        raw_header.write_to(&mut bytes).unwrap();
        for vlr in header.vlrs() {
            vlr.clone().into_raw(false).unwrap().write_to(&mut bytes).unwrap();
        }
        assert!(matches!(
            Header::read_from(&bytes[..]),
            Err(Error::TruncatedVlr {
                index: 0,
                is_extended: false
            })
        ));
    }

    #[test]
    fn vlr_truncated_by_end_of_data() {
        let mut header = Header::default();
        header.push_vlr(Vlr {
            data: vec![0; 10],
            ..Default::default()
        });
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            Header::read_from(&bytes[..]),
            Err(Error::TruncatedVlr { index: 0, .. })
        ));
    }

    #[test]
    fn offset_to_point_data_in_header() {
        let mut raw_header = raw::Header::default();
        raw_header.offset_to_point_data = 100;
        let mut bytes = Vec::new();
        raw_header.write_to(&mut bytes).unwrap();
        assert!(matches!(
            Header::read_from(&bytes[..]),
            Err(Error::OffsetToPointData { offset: 100, .. })
        ));
    }

    #[test]
    fn date_roundtrip() {
        let mut builder = Builder::default();
        builder.date = NaiveDate::from_ymd_opt(2017, 10, 15);
        let header = builder.into_header().unwrap();
        assert_eq!(header.date(), roundtrip(&header).date());
    }

    #[test]
    fn guid_roundtrip() {
        let mut builder = Builder::default();
        builder.guid = Uuid::from_bytes([1; 16]);
        let header = builder.into_header().unwrap();
        assert_eq!(header.guid(), roundtrip(&header).guid());
    }
}
