//! Variable length records are used to store additional metadata not defined in the header.
//!
//! Variable length records (VLRs) can be "regular" or "extended". "Regular" vlrs are stored right
//! after the header, before the point records. "Extended" vlrs (EVLRs) are stored at the end of
//! the file, after the point records. Both are represented by the same [Vlr] type, and the
//! [Header](crate::Header) keeps them in separate lists.
//!
//! ```
//! use las_stream::Vlr;
//! let vlr = Vlr {
//!     user_id: "las-stream".to_string(),
//!     record_id: 42,
//!     description: "Some really important data".to_string(),
//!     data: vec![1, 2, 3],
//! };
//! assert_eq!(57, vlr.len(false));
//! assert_eq!(63, vlr.len(true));
//! ```

use crate::{
    Error, Result,
    raw::{
        self,
        vlr::{EVLR_HEADER_LEN, RecordLength, VLR_HEADER_LEN},
    },
    utils::{AsLasStr, FromLasStr},
};

const LASF_SPEC: &str = "LASF_Spec";
const LASF_PROJECTION: &str = "LASF_Projection";
const LASZIP_ENCODED: &str = "laszip encoded";
const LASZIP_RECORD_ID: u16 = 22204;

/// The record id of the WKT coordinate system vlr.
pub const WKT_CRS_RECORD_ID: u16 = 2112;

/// The record ids of the waveform packet descriptor vlrs.
pub const WAVEFORM_PACKET_DESCRIPTOR_RECORD_IDS: std::ops::RangeInclusive<u16> = 100..=354;

/// The record id of the waveform data packets record.
pub const WAVEFORM_DATA_PACKETS_RECORD_ID: u16 = 65535;

/// A variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// The user that created this record.
    ///
    /// This value is often an official, "registered" user_id, such as "LASF_Spec" or
    /// "LASF_Projection".
    pub user_id: String,

    /// This value specifies the type of record, and depends on the user id.
    pub record_id: u16,

    /// Textual description of these data.
    pub description: String,

    /// The data themselves.
    pub data: Vec<u8>,
}

impl Vlr {
    /// Creates a vlr from a raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Vlr, raw};
    /// let raw_vlr = raw::Vlr::default();
    /// let vlr = Vlr::new(raw_vlr).unwrap();
    /// ```
    pub fn new(raw_vlr: raw::Vlr) -> Result<Vlr> {
        Ok(Vlr {
            user_id: raw_vlr.user_id.as_las_str()?.to_string(),
            record_id: raw_vlr.record_id,
            description: raw_vlr.description.as_las_str()?.to_string(),
            data: raw_vlr.data,
        })
    }

    /// Converts this vlr to a raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Vlr;
    /// let raw_vlr = Vlr::default().into_raw(false).unwrap();
    /// let raw_evlr = Vlr::default().into_raw(true).unwrap();
    /// ```
    pub fn into_raw(self, is_extended: bool) -> Result<raw::Vlr> {
        let mut user_id = [0; 16];
        user_id.from_las_str(&self.user_id)?;
        let mut description = [0; 32];
        description.from_las_str(&self.description)?;
        Ok(raw::Vlr {
            reserved: 0,
            user_id,
            record_id: self.record_id,
            record_length_after_header: self.record_length_after_header(is_extended)?,
            description,
            data: self.data,
        })
    }

    /// Returns the total length of this vlr on disk, header and data.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Vlr;
    /// let vlr = Vlr::default();
    /// assert_eq!(54, vlr.len(false));
    /// assert_eq!(60, vlr.len(true));
    /// ```
    pub fn len(&self, is_extended: bool) -> usize {
        let header_len = if is_extended {
            EVLR_HEADER_LEN
        } else {
            VLR_HEADER_LEN
        };
        self.data.len() + header_len as usize
    }

    /// Returns true if the data of this vlr are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Vlr;
    /// let mut vlr = Vlr::default();
    /// assert!(vlr.is_empty());
    /// vlr.data = vec![42];
    /// assert!(!vlr.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if this vlr's data are too long for a regular vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Vlr;
    /// let mut vlr = Vlr::default();
    /// assert!(!vlr.has_large_data());
    /// vlr.data = vec![0; u16::MAX as usize + 1];
    /// assert!(vlr.has_large_data());
    /// ```
    pub fn has_large_data(&self) -> bool {
        self.data.len() > usize::from(u16::MAX)
    }

    /// Is this a coordinate reference system vlr, of any kind?
    pub fn is_projection(&self) -> bool {
        self.user_id == LASF_PROJECTION
    }

    /// Is this the WKT coordinate reference system vlr?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Vlr;
    /// let vlr = Vlr {
    ///     user_id: "LASF_Projection".to_string(),
    ///     record_id: 2112,
    ///     ..Default::default()
    /// };
    /// assert!(vlr.is_crs_wkt());
    /// ```
    pub fn is_crs_wkt(&self) -> bool {
        self.is_projection() && self.record_id == WKT_CRS_RECORD_ID
    }

    /// Is this the extra bytes vlr?
    pub fn is_extra_bytes(&self) -> bool {
        self.user_id == LASF_SPEC && self.record_id == crate::point::extra_bytes::RECORD_ID
    }

    /// Is this one of the 255 waveform packet descriptor vlrs?
    pub fn is_waveform_packet_descriptor(&self) -> bool {
        self.user_id == LASF_SPEC && WAVEFORM_PACKET_DESCRIPTOR_RECORD_IDS.contains(&self.record_id)
    }

    /// Is this the record that holds the waveform data packets?
    pub fn is_waveform_data_packets(&self) -> bool {
        self.user_id == LASF_SPEC && self.record_id == WAVEFORM_DATA_PACKETS_RECORD_ID
    }

    /// Is this the laszip vlr, which describes compressed point records?
    pub fn is_laszip(&self) -> bool {
        self.is(LASZIP_ENCODED, LASZIP_RECORD_ID)
    }

    /// Does this record match the user id and record id?
    pub fn is(&self, user_id: &str, record_id: u16) -> bool {
        self.user_id == user_id && self.record_id == record_id
    }

    fn record_length_after_header(&self, is_extended: bool) -> Result<RecordLength> {
        if is_extended {
            Ok(RecordLength::Evlr(self.data.len() as u64))
        } else {
            u16::try_from(self.data.len())
                .map(RecordLength::Vlr)
                .map_err(|_| Error::VlrTooLong(self.data.len()))
        }
    }
}
