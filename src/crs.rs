//! Coordinate reference system (CRS) data in a header's variable length records.
//!
//! CRSes are stored either as [WKT](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry)
//! or as GeoTiff tags. Only WKT is read and written here, GeoTiff records are passed through as
//! plain vlrs.

use crate::{
    Error, Header, Result, Vlr,
    feature::WktCrs,
    vlr::WKT_CRS_RECORD_ID,
};
use log::warn;

impl Header {
    /// Removes all CRS (E)VLRs from the header, WKT and GeoTiff.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// let mut header = Header::from((1, 4));
    /// header.set_wkt_crs(b"PROJCS[]".to_vec()).unwrap();
    /// header.remove_crs_vlrs();
    /// assert!(header.get_wkt_crs_bytes().is_none());
    /// assert!(!header.has_wkt_crs());
    /// ```
    pub fn remove_crs_vlrs(&mut self) {
        self.vlrs_mut().retain(|vlr| !vlr.is_projection());
        self.evlrs_mut().retain(|vlr| !vlr.is_projection());
        self.set_has_wkt_crs(false);
    }

    /// Adds a WKT CRS VLR to the header, and sets the WKT bit of the global encoding.
    ///
    /// Returns an error if the header already contains CRS (E)VLRs or the las version is below
    /// 1.4. WKT that is too long for a regular vlr is stored as an evlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Header;
    /// let mut header = Header::from((1, 4));
    /// header.set_wkt_crs(b"PROJCS[]".to_vec()).unwrap();
    /// assert_eq!(Some(&b"PROJCS[]"[..]), header.get_wkt_crs_bytes());
    /// assert!(header.set_wkt_crs(b"PROJCS[]".to_vec()).is_err());
    ///
    /// let mut header = Header::from((1, 2));
    /// assert!(header.set_wkt_crs(b"PROJCS[]".to_vec()).is_err());
    /// ```
    pub fn set_wkt_crs(&mut self, wkt_crs_bytes: Vec<u8>) -> Result<()> {
        self.version().verify_support_for::<WktCrs>()?;
        if self.all_vlrs().any(|vlr| vlr.is_projection()) {
            return Err(Error::HeaderContainsCrsVlr);
        }
        self.push_vlr(Vlr {
            user_id: "LASF_Projection".to_string(),
            record_id: WKT_CRS_RECORD_ID,
            description: "OGC WKT Coordinate System".to_string(),
            data: wkt_crs_bytes,
        });
        self.set_has_wkt_crs(true);
        Ok(())
    }

    /// Gets the WKT-CRS data if the WKT-CRS (E)VLR exists.
    ///
    /// Logs a warning if the global encoding's WKT bit disagrees with the records.
    pub fn get_wkt_crs_bytes(&self) -> Option<&[u8]> {
        let bytes = self
            .all_vlrs()
            .find(|vlr| vlr.is_crs_wkt())
            .map(|vlr| vlr.data.as_slice());
        match (bytes.is_some(), self.has_wkt_crs()) {
            (true, false) => warn!("WKT CRS (E)VLR found, but header says it does not exist"),
            (false, true) => warn!("no WKT CRS (E)VLR found, but header says it exists"),
            _ => {}
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use crate::{Builder, Header, Vlr};

    #[test]
    fn large_wkt_is_an_evlr() {
        let mut header = Header::from((1, 4));
        header
            .set_wkt_crs(vec![b'A'; u16::MAX as usize + 1])
            .unwrap();
        assert_eq!(1, header.evlrs().len());
        assert!(header.get_wkt_crs_bytes().is_some());
    }

    #[test]
    fn geotiff_blocks_wkt() {
        let mut builder = Builder::from((1, 4));
        builder.vlrs.push(Vlr {
            user_id: "LASF_Projection".to_string(),
            record_id: 34735,
            ..Default::default()
        });
        let mut header = builder.into_header().unwrap();
        assert!(header.set_wkt_crs(b"PROJCS[]".to_vec()).is_err());
        header.remove_crs_vlrs();
        assert!(header.vlrs().is_empty());
        header.set_wkt_crs(b"PROJCS[]".to_vec()).unwrap();
    }

    #[test]
    fn wkt_bit_without_vlr() {
        let mut builder = Builder::from((1, 4));
        builder.has_wkt_crs = true;
        let header = builder.into_header().unwrap();
        assert!(header.get_wkt_crs_bytes().is_none());
    }
}
