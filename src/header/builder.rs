use super::Header;
use crate::{
    Bounds, Error, GlobalEncoding, GpsTimeType, Result, Transform, Vector, Version, Vlr,
    feature::{Evlrs, FileSourceId, GpsStandardTime, SyntheticReturnNumbers, Waveforms, WktCrs},
    point::{ExtraBytesDescription, Format},
    raw::{self, POINT_DATA_START_SIGNATURE, header::Evlr},
    utils::AsLasStr,
};
use chrono::NaiveDate;
use log::warn;
use uuid::Uuid;

/// Builds headers.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// The date of file creation.
    pub date: Option<NaiveDate>,

    /// The file source id, sometimes the flight line.
    pub file_source_id: u16,

    /// The software that created this file.
    pub generating_software: String,

    /// The type of gps time, either week or standard.
    pub gps_time_type: GpsTimeType,

    /// A globally unique identifier.
    pub guid: Uuid,

    /// Are the return numbers in this file synthetic?
    pub has_synthetic_return_numbers: bool,

    /// Are the waveform data packets stored in this file?
    pub has_waveforms_internal: bool,

    /// Are the waveform data packets stored in an external `.wdp` file?
    pub has_waveforms_external: bool,

    /// Is the coordinate reference system stored as WKT?
    pub has_wkt_crs: bool,

    /// Bytes after the header but before the vlrs.
    pub padding: Vec<u8>,

    /// The format that the points will be written in.
    pub point_format: Format,

    /// The bytes after the points but before any evlrs.
    ///
    /// Discouraged.
    pub point_padding: Vec<u8>,

    /// The system that generated the points.
    pub system_identifier: String,

    /// The scale and offset that will be used to convert coordinates to `i32`s to write in the
    /// file.
    pub transforms: Vector<Transform>,

    /// The las version.
    pub version: Version,

    /// The bytes after the vlrs but before the points.
    pub vlr_padding: Vec<u8>,

    /// The variable length records.
    pub vlrs: Vec<Vlr>,

    /// The extended variable length records.
    pub evlrs: Vec<Vlr>,

    number_of_points_by_return: [u64; 15],
    number_of_points: u64,
    bounds: Bounds,
    evlr: Option<Evlr>,
    start_of_waveform_data_packet_record: Option<u64>,
}

impl Builder {
    /// Creates a new builder from a raw header.
    ///
    /// The 64-bit point counts win over the legacy 32-bit counts when they are set. If both are set
    /// and they disagree, a warning is logged.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Builder;
    /// let builder = Builder::new(Default::default()).unwrap();
    /// ```
    pub fn new(raw_header: raw::Header) -> Result<Builder> {
        let number_of_points = reconcile_number_of_points(&raw_header);
        let number_of_points_by_return = reconcile_number_of_points_by_return(&raw_header);
        let mut point_format = Format::new(raw_header.point_data_record_format)?;
        let n = point_format.base_len();
        if raw_header.point_data_record_length < n {
            return Err(Error::PointDataRecordLength {
                format: point_format,
                len: raw_header.point_data_record_length,
            });
        }
        point_format.extra_bytes = raw_header.point_data_record_length - n;
        let global_encoding = GlobalEncoding::from(raw_header.global_encoding);
        Ok(Builder {
            date: NaiveDate::from_yo_opt(
                i32::from(raw_header.file_creation_year),
                u32::from(raw_header.file_creation_day_of_year),
            ),
            file_source_id: raw_header.file_source_id,
            generating_software: raw_header.generating_software.as_las_str()?.to_string(),
            gps_time_type: global_encoding.gps_time_type,
            guid: Uuid::from_bytes(raw_header.guid),
            has_synthetic_return_numbers: global_encoding.has_synthetic_return_numbers,
            has_waveforms_internal: global_encoding.has_waveforms_internal,
            has_waveforms_external: global_encoding.has_waveforms_external,
            has_wkt_crs: global_encoding.has_wkt_crs,
            padding: raw_header.padding,
            point_format,
            point_padding: Vec::new(),
            system_identifier: raw_header.system_identifier.as_las_str()?.to_string(),
            transforms: Vector {
                x: Transform {
                    scale: raw_header.x_scale_factor,
                    offset: raw_header.x_offset,
                },
                y: Transform {
                    scale: raw_header.y_scale_factor,
                    offset: raw_header.y_offset,
                },
                z: Transform {
                    scale: raw_header.z_scale_factor,
                    offset: raw_header.z_offset,
                },
            },
            version: raw_header.version,
            vlr_padding: Vec::new(),
            vlrs: Vec::new(),
            evlrs: Vec::new(),
            bounds: Bounds {
                min: Vector {
                    x: raw_header.min_x,
                    y: raw_header.min_y,
                    z: raw_header.min_z,
                },
                max: Vector {
                    x: raw_header.max_x,
                    y: raw_header.max_y,
                    z: raw_header.max_z,
                },
            },
            number_of_points,
            number_of_points_by_return,
            evlr: raw_header.evlr,
            start_of_waveform_data_packet_record: raw_header.start_of_waveform_data_packet_record,
        })
    }

    /// Converts this builder into a `Header`.
    ///
    /// Checks that the version supports everything this builder asks for. Extended vlrs are
    /// downgraded to regular vlrs for versions without evlrs, except for the waveform data packet
    /// record of las 1.3. The extra bytes vlr, if any, is parsed and each attribute must fit into
    /// the point format's extra bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Builder;
    /// let header = Builder::new(Default::default()).unwrap().into_header().unwrap();
    /// ```
    pub fn into_header(mut self) -> Result<Header> {
        let n = self.vlr_padding.len();
        if self.version.requires_point_data_start_signature()
            && (n < 2 || self.vlr_padding[n - 2..] != POINT_DATA_START_SIGNATURE)
        {
            self.vlr_padding.extend(POINT_DATA_START_SIGNATURE);
        }
        let _ = u16::try_from(self.padding.len())
            .ok()
            .and_then(|n| self.version.header_size().checked_add(n))
            .ok_or(Error::HeaderPadding(self.padding.len()))?;
        if self.file_source_id != 0 {
            self.version.verify_support_for::<FileSourceId>()?;
        }
        if self.has_synthetic_return_numbers {
            self.version.verify_support_for::<SyntheticReturnNumbers>()?;
        }
        if self.gps_time_type.is_standard() {
            self.version.verify_support_for::<GpsStandardTime>()?;
        }
        if self.has_waveforms_internal
            || self.has_waveforms_external
            || self.point_format.has_waveform()
        {
            self.version.verify_support_for::<Waveforms>()?;
        }
        if self.has_wkt_crs {
            self.version.verify_support_for::<WktCrs>()?;
        }
        if !self.version.supports_point_format(self.point_format) {
            return Err(Error::UnsupportedPointFormat {
                version: self.version,
                format: self.point_format,
            });
        }
        let mut vlrs = Vec::new();
        let mut evlrs = Vec::new();
        for evlr in self.evlrs {
            if self.version.supports::<Evlrs>()
                || evlr.has_large_data()
                || (self.version.supports::<Waveforms>() && evlr.is_waveform_data_packets())
            {
                evlrs.push(evlr);
            } else {
                vlrs.push(evlr);
            }
        }
        for vlr in self.vlrs {
            if vlr.has_large_data() {
                evlrs.push(vlr);
            } else {
                vlrs.push(vlr);
            }
        }
        if evlrs.iter().any(|evlr| !evlr.is_waveform_data_packets()) {
            self.version.verify_support_for::<Evlrs>()?;
        } else if evlrs.is_empty() && !self.point_padding.is_empty() {
            return Err(Error::PointPadding);
        }
        let extra_bytes = match vlrs.iter().chain(&evlrs).find(|vlr| vlr.is_extra_bytes()) {
            Some(vlr) => ExtraBytesDescription::parse_all(&vlr.data)?,
            None => Vec::new(),
        };
        for description in &extra_bytes {
            description.check_fits(usize::from(self.point_format.extra_bytes))?;
        }
        Ok(Header {
            bounds: self.bounds,
            date: self.date,
            evlrs,
            extra_bytes,
            file_source_id: self.file_source_id,
            generating_software: self.generating_software,
            gps_time_type: self.gps_time_type,
            guid: self.guid,
            has_synthetic_return_numbers: self.has_synthetic_return_numbers,
            has_waveforms_external: self.has_waveforms_external,
            has_waveforms_internal: self.has_waveforms_internal,
            has_wkt_crs: self.has_wkt_crs,
            number_of_points: self.number_of_points,
            number_of_points_by_return: self.number_of_points_by_return,
            padding: self.padding,
            point_format: self.point_format,
            point_padding: self.point_padding,
            system_identifier: self.system_identifier,
            transforms: self.transforms,
            version: self.version,
            vlr_padding: self.vlr_padding,
            vlrs,
            evlr: self.evlr,
            start_of_waveform_data_packet_record: self.start_of_waveform_data_packet_record,
        })
    }
}

impl<V: Into<Version>> From<V> for Builder {
    fn from(version: V) -> Builder {
        Builder {
            version: version.into(),
            ..Default::default()
        }
    }
}

impl From<Header> for Builder {
    fn from(header: Header) -> Builder {
        Builder {
            date: header.date,
            file_source_id: header.file_source_id,
            generating_software: header.generating_software,
            gps_time_type: header.gps_time_type,
            guid: header.guid,
            has_synthetic_return_numbers: header.has_synthetic_return_numbers,
            has_waveforms_internal: header.has_waveforms_internal,
            has_waveforms_external: header.has_waveforms_external,
            has_wkt_crs: header.has_wkt_crs,
            padding: header.padding,
            point_format: header.point_format,
            point_padding: header.point_padding,
            system_identifier: header.system_identifier,
            transforms: header.transforms,
            version: header.version,
            vlr_padding: header.vlr_padding,
            vlrs: header.vlrs,
            evlrs: header.evlrs,
            number_of_points_by_return: header.number_of_points_by_return,
            number_of_points: header.number_of_points,
            bounds: header.bounds,
            evlr: header.evlr,
            start_of_waveform_data_packet_record: header.start_of_waveform_data_packet_record,
        }
    }
}

fn reconcile_number_of_points(raw_header: &raw::Header) -> u64 {
    let legacy = u64::from(raw_header.number_of_point_records);
    match raw_header.large_file {
        Some(large_file) if large_file.number_of_point_records > 0 => {
            if legacy > 0 && legacy != large_file.number_of_point_records {
                warn!(
                    "legacy point count ({}) disagrees with the 64-bit point count ({}), using the 64-bit count",
                    legacy, large_file.number_of_point_records
                );
            }
            large_file.number_of_point_records
        }
        _ => legacy,
    }
}

fn reconcile_number_of_points_by_return(raw_header: &raw::Header) -> [u64; 15] {
    let mut legacy = [0; 15];
    for (n, &count) in legacy.iter_mut().zip(&raw_header.number_of_points_by_return) {
        *n = u64::from(count);
    }
    match raw_header.large_file {
        Some(large_file) if large_file.number_of_points_by_return.iter().any(|&n| n > 0) => {
            let disagrees = legacy
                .iter()
                .zip(&large_file.number_of_points_by_return)
                .any(|(&legacy, &n)| legacy > 0 && legacy != n);
            if disagrees {
                warn!(
                    "legacy point counts by return ({:?}) disagree with the 64-bit counts, using the 64-bit counts",
                    raw_header.number_of_points_by_return
                );
            }
            large_file.number_of_points_by_return
        }
        _ => legacy,
    }
}
