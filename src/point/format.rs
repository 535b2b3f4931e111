use crate::{Error, Result};
use std::fmt;

const IS_COMPRESSED_MASK: u8 = 0x80;
const FORMAT_ID_MASK: u8 = 0x3f;

/// Capabilities of each point format, indexed by format id.
///
/// `(has_gps_time, has_color, has_nir, has_waveform, is_extended, base_len)`
const CAPABILITIES: [(bool, bool, bool, bool, bool, u16); 11] = [
    (false, false, false, false, false, 20),
    (true, false, false, false, false, 28),
    (false, true, false, false, false, 26),
    (true, true, false, false, false, 34),
    (true, false, false, true, false, 57),
    (true, true, false, true, false, 63),
    (true, false, false, false, true, 30),
    (true, true, false, false, true, 36),
    (true, true, true, false, true, 38),
    (true, false, false, true, true, 59),
    (true, true, true, true, true, 67),
];

/// Point formats are defined by the las spec.
///
/// The format id decides which optional attributes a point record carries and how its flag bytes
/// are laid out. The file version never does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Format {
    id: u8,

    /// The number of extra bytes at the end of each point record.
    pub extra_bytes: u16,

    /// Are the points compressed with laszip?
    pub is_compressed: bool,
}

impl Format {
    /// Creates a new point format from a u8.
    ///
    /// The high bit of the point data format byte is used by laszip to mark compressed data, so it
    /// is honored here.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::Format;
    /// let format = Format::new(1).unwrap();
    /// assert!(format.has_gps_time());
    /// assert!(!format.has_color());
    ///
    /// let format = Format::new(131).unwrap();
    /// assert_eq!(3, format.to_u8());
    /// assert!(format.is_compressed);
    ///
    /// assert!(Format::new(11).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Format> {
        let id = n & FORMAT_ID_MASK;
        if (id as usize) < CAPABILITIES.len() {
            Ok(Format {
                id,
                extra_bytes: 0,
                is_compressed: n & IS_COMPRESSED_MASK == IS_COMPRESSED_MASK,
            })
        } else {
            Err(Error::InvalidPointFormat(n))
        }
    }

    /// Returns this format's id, 0 through 10.
    pub fn to_u8(&self) -> u8 {
        self.id
    }

    /// Returns the point data format byte as written into a header, including the compression bit.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::Format;
    /// let mut format = Format::new(6).unwrap();
    /// assert_eq!(6, format.to_writable_u8());
    /// format.is_compressed = true;
    /// assert_eq!(134, format.to_writable_u8());
    /// ```
    pub fn to_writable_u8(&self) -> u8 {
        if self.is_compressed {
            self.id | IS_COMPRESSED_MASK
        } else {
            self.id
        }
    }

    fn capabilities(&self) -> (bool, bool, bool, bool, bool, u16) {
        CAPABILITIES[self.id as usize]
    }

    /// Does this point format have gps time?
    pub fn has_gps_time(&self) -> bool {
        self.capabilities().0
    }

    /// Does this point format have red, green and blue channels?
    pub fn has_color(&self) -> bool {
        self.capabilities().1
    }

    /// Does this point format have a near infrared channel?
    pub fn has_nir(&self) -> bool {
        self.capabilities().2
    }

    /// Does this point format have a waveform packet?
    pub fn has_waveform(&self) -> bool {
        self.capabilities().3
    }

    /// Does this point format use the extended (las 1.4) record layout?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::Format;
    /// assert!(!Format::new(5).unwrap().is_extended());
    /// assert!(Format::new(6).unwrap().is_extended());
    /// ```
    pub fn is_extended(&self) -> bool {
        self.capabilities().4
    }

    /// Returns the width of the classification field in bits.
    pub fn classification_width(&self) -> u8 {
        if self.is_extended() { 8 } else { 5 }
    }

    /// Returns the largest classification this format can store.
    pub fn max_classification(&self) -> u8 {
        if self.is_extended() { u8::MAX } else { 31 }
    }

    /// Returns the largest return number (or number of returns) this format can store.
    pub fn max_return_number(&self) -> u8 {
        if self.is_extended() { 15 } else { 7 }
    }

    /// Returns the number of return buckets in the header for this format.
    pub fn number_of_return_buckets(&self) -> u8 {
        if self.is_extended() { 15 } else { 5 }
    }

    /// Returns the length of a record in this format, without extra bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().base_len());
    /// assert_eq!(67, Format::new(10).unwrap().base_len());
    /// ```
    pub fn base_len(&self) -> u16 {
        self.capabilities().5
    }

    /// Returns the length of a record in this format, including extra bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::Format;
    /// let mut format = Format::new(1).unwrap();
    /// format.extra_bytes = 4;
    /// assert_eq!(32, format.len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u16 {
        self.base_len() + self.extra_bytes
    }

    /// Returns true if records in both formats are laid out the same, ignoring compression.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::Format;
    /// let format = Format::new(3).unwrap();
    /// assert!(format.has_same_layout(&Format::new(0x83).unwrap()));
    /// assert!(!format.has_same_layout(&Format::new(2).unwrap()));
    /// ```
    pub fn has_same_layout(&self, other: &Format) -> bool {
        self.id == other.id && self.extra_bytes == other.extra_bytes
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! capabilities {
        ($name:ident, $id:expr, $gps:expr, $color:expr, $nir:expr, $waveform:expr, $len:expr) => {
            #[test]
            fn $name() {
                let format = Format::new($id).unwrap();
                assert_eq!($gps, format.has_gps_time());
                assert_eq!($color, format.has_color());
                assert_eq!($nir, format.has_nir());
                assert_eq!($waveform, format.has_waveform());
                assert_eq!($id > 5, format.is_extended());
                assert_eq!($len, format.len());
                assert!(!format.is_compressed);
            }
        };
    }

    capabilities!(format_0, 0, false, false, false, false, 20);
    capabilities!(format_1, 1, true, false, false, false, 28);
    capabilities!(format_2, 2, false, true, false, false, 26);
    capabilities!(format_3, 3, true, true, false, false, 34);
    capabilities!(format_4, 4, true, false, false, true, 57);
    capabilities!(format_5, 5, true, true, false, true, 63);
    capabilities!(format_6, 6, true, false, false, false, 30);
    capabilities!(format_7, 7, true, true, false, false, 36);
    capabilities!(format_8, 8, true, true, true, false, 38);
    capabilities!(format_9, 9, true, false, false, true, 59);
    capabilities!(format_10, 10, true, true, true, true, 67);

    #[test]
    fn invalid() {
        assert!(matches!(Format::new(11), Err(Error::InvalidPointFormat(11))));
        assert!(Format::new(0x3f).is_err());
    }

    #[test]
    fn classification_width() {
        assert_eq!(5, Format::new(5).unwrap().classification_width());
        assert_eq!(8, Format::new(6).unwrap().classification_width());
        assert_eq!(31, Format::new(0).unwrap().max_classification());
        assert_eq!(255, Format::new(10).unwrap().max_classification());
    }

    #[test]
    fn compressed_roundtrip() {
        let format = Format::new(0x80 | 7).unwrap();
        assert_eq!(7, format.to_u8());
        assert!(format.is_compressed);
        assert_eq!(0x87, format.to_writable_u8());
    }
}
