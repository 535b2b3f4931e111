//! Laszip compressed data.
//!
//! Compression itself is done by the [laz](https://docs.rs/laz) crate. The laszip vlr describes
//! the compressed items of each point record, and is kept in the header like any other vlr.

use crate::{Error, Header, Result, Vlr};
use laz::{LazItemRecordBuilder, LazItemType, LazVlr};

/// Returns true if this [Vlr] is the laszip vlr.
///
/// # Examples
///
/// ```
/// use las_stream::{laz, Vlr};
///
/// let mut vlr = Vlr::default();
/// assert!(!laz::is_laszip_vlr(&vlr));
/// vlr.user_id = "laszip encoded".to_string();
/// vlr.record_id = 22204;
/// assert!(laz::is_laszip_vlr(&vlr));
/// ```
pub fn is_laszip_vlr(vlr: &Vlr) -> bool {
    vlr.is_laszip()
}

impl Header {
    /// Adds the laszip vlr for this header's point format, replacing any existing one.
    ///
    /// Point formats with waveform packets can't be compressed.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Builder, Header};
    /// use las_stream::point::Format;
    ///
    /// let mut header = Header::default();
    /// header.add_laz_vlr().unwrap();
    /// assert!(header.laz_vlr().is_ok());
    ///
    /// let mut builder = Builder::from((1, 3));
    /// builder.point_format = Format::new(4).unwrap();
    /// assert!(builder.into_header().unwrap().add_laz_vlr().is_err());
    /// ```
    pub fn add_laz_vlr(&mut self) -> Result<()> {
        let point_format = *self.point_format();
        if point_format.has_waveform() {
            return Err(Error::UnsupportedCompression(point_format));
        }
        let mut laz_items = LazItemRecordBuilder::new();
        if point_format.is_extended() {
            let _ = laz_items.add_item(LazItemType::Point14);
            if point_format.has_nir() {
                let _ = laz_items.add_item(LazItemType::RGBNIR14);
            } else if point_format.has_color() {
                let _ = laz_items.add_item(LazItemType::RGB14);
            }
            if point_format.extra_bytes > 0 {
                let _ = laz_items.add_item(LazItemType::Byte14(point_format.extra_bytes));
            }
        } else {
            let _ = laz_items.add_item(LazItemType::Point10);
            if point_format.has_gps_time() {
                let _ = laz_items.add_item(LazItemType::GpsTime);
            }
            if point_format.has_color() {
                let _ = laz_items.add_item(LazItemType::RGB12);
            }
            if point_format.extra_bytes > 0 {
                let _ = laz_items.add_item(LazItemType::Byte(point_format.extra_bytes));
            }
        }
        let laz_vlr = LazVlr::from_laz_items(laz_items.build());
        let mut data = Vec::new();
        laz_vlr.write_to(&mut data)?;
        let vlrs = self.vlrs_mut();
        vlrs.retain(|vlr| !is_laszip_vlr(vlr));
        vlrs.push(Vlr {
            user_id: LazVlr::USER_ID.to_owned(),
            record_id: LazVlr::RECORD_ID,
            description: LazVlr::DESCRIPTION.to_owned(),
            data,
        });
        Ok(())
    }

    /// Returns this header's [LazVlr].
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// let mut header = Header::default();
    /// assert!(header.laz_vlr().is_err());
    /// header.add_laz_vlr().unwrap();
    /// assert!(header.laz_vlr().is_ok());
    /// ```
    pub fn laz_vlr(&self) -> Result<LazVlr> {
        self.vlrs()
            .iter()
            .find(|vlr| is_laszip_vlr(vlr))
            .ok_or(Error::LasZipVlrNotFound)
            .and_then(LazVlr::try_from)
    }
}

impl TryFrom<&Vlr> for LazVlr {
    type Error = Error;

    fn try_from(vlr: &Vlr) -> Result<LazVlr> {
        LazVlr::from_buffer(&vlr.data).map_err(Error::from)
    }
}
