//! Global properties about LAS data.

use crate::GpsTimeType;

const GPS_TIME_TYPE_BIT: u16 = 1;
const WAVEFORM_INTERNAL_BIT: u16 = 1 << 1;
const WAVEFORM_EXTERNAL_BIT: u16 = 1 << 2;
const SYNTHETIC_RETURN_NUMBERS_BIT: u16 = 1 << 3;
const WKT_CRS_BIT: u16 = 1 << 4;

/// The global encoding bit field of the header.
///
/// Reserved bits are dropped on read.
///
/// # Examples
///
/// ```
/// use las_stream::{GlobalEncoding, GpsTimeType};
/// let global_encoding = GlobalEncoding::from(0b10001);
/// assert_eq!(GpsTimeType::Standard, global_encoding.gps_time_type);
/// assert!(global_encoding.has_wkt_crs);
/// assert!(!global_encoding.has_waveforms_internal);
/// assert_eq!(0b10001, u16::from(global_encoding));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalEncoding {
    /// The gps time definition.
    pub gps_time_type: GpsTimeType,

    /// Are waveform packets stored in this file, after the points?
    pub has_waveforms_internal: bool,

    /// Are waveform packets stored in an external `.wdp` file?
    pub has_waveforms_external: bool,

    /// Were the return numbers generated synthetically?
    pub has_synthetic_return_numbers: bool,

    /// Is the coordinate reference system stored as WKT?
    pub has_wkt_crs: bool,
}

impl From<u16> for GlobalEncoding {
    fn from(n: u16) -> GlobalEncoding {
        GlobalEncoding {
            gps_time_type: GpsTimeType::from(n & GPS_TIME_TYPE_BIT),
            has_waveforms_internal: n & WAVEFORM_INTERNAL_BIT != 0,
            has_waveforms_external: n & WAVEFORM_EXTERNAL_BIT != 0,
            has_synthetic_return_numbers: n & SYNTHETIC_RETURN_NUMBERS_BIT != 0,
            has_wkt_crs: n & WKT_CRS_BIT != 0,
        }
    }
}

impl From<GlobalEncoding> for u16 {
    fn from(global_encoding: GlobalEncoding) -> u16 {
        let mut n = u16::from(global_encoding.gps_time_type);
        if global_encoding.has_waveforms_internal {
            n |= WAVEFORM_INTERNAL_BIT;
        }
        if global_encoding.has_waveforms_external {
            n |= WAVEFORM_EXTERNAL_BIT;
        }
        if global_encoding.has_synthetic_return_numbers {
            n |= SYNTHETIC_RETURN_NUMBERS_BIT;
        }
        if global_encoding.has_wkt_crs {
            n |= WKT_CRS_BIT;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gps_time_type() {
        assert_eq!(GpsTimeType::Week, GlobalEncoding::from(0).gps_time_type);
        assert_eq!(GpsTimeType::Standard, GlobalEncoding::from(1).gps_time_type);
    }

    #[test]
    fn each_bit() {
        assert!(GlobalEncoding::from(2).has_waveforms_internal);
        assert!(GlobalEncoding::from(4).has_waveforms_external);
        assert!(GlobalEncoding::from(8).has_synthetic_return_numbers);
        assert!(GlobalEncoding::from(16).has_wkt_crs);
        for n in 0..32 {
            assert_eq!(n, u16::from(GlobalEncoding::from(n)));
        }
    }

    #[test]
    fn reserved_bits() {
        assert_eq!(0, u16::from(GlobalEncoding::from(0xffe0)));
    }
}
