//! Three-dimensional points with additional attributes.
//!
//! A [Point] is decoded from one point data record. Which optional attributes it carries is
//! decided by its [Format]:
//!
//! ```
//! use las_stream::{Error, Point, Vector};
//! use las_stream::point::Format;
//!
//! let point = Point::new(Format::new(1).unwrap(), Vector::default());
//! assert_eq!(0., point.gps_time().unwrap());
//! assert!(matches!(point.color(), Err(Error::AttributeNotAvailable { .. })));
//! ```
//!
//! Coordinates are stored as the integers of the record, and scaled on access:
//!
//! ```
//! use las_stream::{Point, Transform, Vector};
//! use las_stream::point::Format;
//!
//! let transform = Transform { scale: 0.01, offset: 0. };
//! let transforms = Vector { x: transform, y: transform, z: transform };
//! let mut point = Point::new(Format::new(0).unwrap(), transforms);
//! point.set_raw_x(39_900_000);
//! assert_eq!(39_900_000, point.raw_x());
//! assert!((point.x() - 399_000.00).abs() < 1e-9);
//! ```

pub mod extra_bytes;
mod format;
mod scan_direction;

pub use self::extra_bytes::ExtraBytesDescription;
pub use self::format::Format;
pub use self::scan_direction::ScanDirection;

use crate::{
    Color, Error, Result, Transform, Vector,
    raw::{
        self,
        point::{Flags, ScanAngle, Waveform},
    },
};
use std::io::Write;

/// Each increment of a scaled scan angle is this many degrees.
pub const SCAN_ANGLE_SCALE_FACTOR: f32 = 0.006;

/// The classification that marks overlap points in point formats zero through five.
pub const OVERLAP_CLASSIFICATION: u8 = 12;

/// A point is the basic unit of information in LAS data.
///
/// Attributes every format has are returned directly. Optional attributes (gps time, color, near
/// infrared, waveform, scanner channel) are returned as a `Result`, which is
/// `Error::AttributeNotAvailable` when the point's format does not have them. Setters check that
/// values fit into the format.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    format: Format,
    transforms: Vector<Transform>,
    raw_x: i32,
    raw_y: i32,
    raw_z: i32,
    intensity: u16,
    return_number: u8,
    number_of_returns: u8,
    scan_direction: ScanDirection,
    is_edge_of_flight_line: bool,
    classification: u8,
    is_synthetic: bool,
    is_key_point: bool,
    is_withheld: bool,
    is_overlap: bool,
    scanner_channel: u8,
    scan_angle: ScanAngle,
    user_data: u8,
    point_source_id: u16,
    gps_time: Option<f64>,
    color: Option<Color>,
    nir: Option<u16>,
    waveform: Option<Waveform>,
    extra_bytes: Vec<u8>,
}

impl Point {
    /// Creates a zeroed point with every attribute the format calls for.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Vector};
    /// use las_stream::point::Format;
    /// let point = Point::new(Format::new(8).unwrap(), Vector::default());
    /// assert_eq!(0, point.nir().unwrap());
    /// ```
    pub fn new(format: Format, transforms: Vector<Transform>) -> Point {
        Point {
            format,
            transforms,
            raw_x: 0,
            raw_y: 0,
            raw_z: 0,
            intensity: 0,
            return_number: 0,
            number_of_returns: 0,
            scan_direction: ScanDirection::default(),
            is_edge_of_flight_line: false,
            classification: 0,
            is_synthetic: false,
            is_key_point: false,
            is_withheld: false,
            is_overlap: false,
            scanner_channel: 0,
            scan_angle: if format.is_extended() {
                ScanAngle::Scaled(0)
            } else {
                ScanAngle::Rank(0)
            },
            user_data: 0,
            point_source_id: 0,
            gps_time: format.has_gps_time().then_some(0.),
            color: format.has_color().then(Color::default),
            nir: format.has_nir().then_some(0),
            waveform: format.has_waveform().then(Waveform::default),
            extra_bytes: vec![0; usize::from(format.extra_bytes)],
        }
    }

    /// Decodes a point from the bytes of one point data record.
    ///
    /// The bit layout of the flags is chosen from the format id alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Vector};
    /// use las_stream::point::Format;
    /// let mut bytes = [0u8; 20];
    /// bytes[15] = 2; // classification
    /// let point = Point::decode(&bytes, &Format::new(0).unwrap(), &Vector::default()).unwrap();
    /// assert_eq!(2, point.classification());
    /// ```
    pub fn decode(bytes: &[u8], format: &Format, transforms: &Vector<Transform>) -> Result<Point> {
        raw::Point::read_from(bytes, format)
            .map(|raw_point| Point::from_raw(raw_point, format, transforms))
    }

    /// Creates a point from a raw point.
    pub fn from_raw(raw_point: raw::Point, format: &Format, transforms: &Vector<Transform>) -> Point {
        let flags = match (format.is_extended(), raw_point.flags) {
            (true, Flags::TwoByte(..)) => {
                let (a, b, c) = raw_point.flags.to_three_bytes();
                Flags::ThreeByte(a, b, c)
            }
            (false, Flags::ThreeByte(..)) => {
                let (a, b) = raw_point.flags.to_two_bytes();
                Flags::TwoByte(a, b)
            }
            (_, flags) => flags,
        };
        let classification = flags.classification();
        Point {
            format: *format,
            transforms: *transforms,
            raw_x: raw_point.x,
            raw_y: raw_point.y,
            raw_z: raw_point.z,
            intensity: raw_point.intensity,
            return_number: flags.return_number(),
            number_of_returns: flags.number_of_returns(),
            scan_direction: flags.scan_direction().into(),
            is_edge_of_flight_line: flags.is_edge_of_flight_line(),
            classification,
            is_synthetic: flags.is_synthetic(),
            is_key_point: flags.is_key_point(),
            is_withheld: flags.is_withheld(),
            is_overlap: if format.is_extended() {
                flags.is_overlap()
            } else {
                classification == OVERLAP_CLASSIFICATION
            },
            scanner_channel: flags.scanner_channel(),
            scan_angle: if format.is_extended() {
                ScanAngle::Scaled(raw_point.scan_angle.to_scaled())
            } else {
                ScanAngle::Rank(raw_point.scan_angle.to_rank())
            },
            user_data: raw_point.user_data,
            point_source_id: raw_point.point_source_id,
            gps_time: raw_point.gps_time.filter(|_| format.has_gps_time()),
            color: raw_point.color.filter(|_| format.has_color()),
            nir: raw_point.nir.filter(|_| format.has_nir()),
            waveform: raw_point.waveform.filter(|_| format.has_waveform()),
            extra_bytes: raw_point.extra_bytes,
        }
    }

    /// Converts this point into a raw point, laid out for its format.
    pub fn to_raw(&self) -> raw::Point {
        let flags = if self.format.is_extended() {
            Flags::ThreeByte(
                (self.return_number & 0b1111) | (self.number_of_returns & 0b1111) << 4,
                u8::from(self.is_synthetic)
                    | u8::from(self.is_key_point) << 1
                    | u8::from(self.is_withheld) << 2
                    | u8::from(self.is_overlap) << 3
                    | (self.scanner_channel & 0b11) << 4
                    | u8::from(bool::from(self.scan_direction)) << 6
                    | u8::from(self.is_edge_of_flight_line) << 7,
                self.classification,
            )
        } else {
            Flags::TwoByte(
                (self.return_number & 0b111)
                    | (self.number_of_returns & 0b111) << 3
                    | u8::from(bool::from(self.scan_direction)) << 6
                    | u8::from(self.is_edge_of_flight_line) << 7,
                (self.classification & 0b1_1111)
                    | u8::from(self.is_synthetic) << 5
                    | u8::from(self.is_key_point) << 6
                    | u8::from(self.is_withheld) << 7,
            )
        };
        raw::Point {
            x: self.raw_x,
            y: self.raw_y,
            z: self.raw_z,
            intensity: self.intensity,
            flags,
            scan_angle: self.scan_angle,
            user_data: self.user_data,
            point_source_id: self.point_source_id,
            gps_time: self.gps_time,
            color: self.color,
            nir: self.nir,
            waveform: self.waveform,
            extra_bytes: self.extra_bytes.clone(),
        }
    }

    /// Encodes this point as one point data record of its format.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Vector};
    /// use las_stream::point::Format;
    /// let format = Format::new(7).unwrap();
    /// let point = Point::new(format, Vector::default());
    /// let mut bytes = Vec::new();
    /// point.write_to(&mut bytes).unwrap();
    /// assert_eq!(36, bytes.len());
    /// assert_eq!(point, Point::decode(&bytes, &format, &Vector::default()).unwrap());
    /// ```
    pub fn write_to<W: Write>(&self, write: W) -> Result<()> {
        self.to_raw().write_to(write, &self.format)
    }

    /// Returns a copy of this point quantized with other transforms.
    ///
    /// The real coordinates are kept, and the raw integers recomputed. Errors if a coordinate does
    /// not fit into an `i32` under the new transforms.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Transform, Vector};
    /// use las_stream::point::Format;
    /// let mut point = Point::new(Format::new(0).unwrap(), Vector::default());
    /// point.set_x(1.5).unwrap();
    /// let coarse = Transform { scale: 0.5, offset: 0. };
    /// let transforms = Vector { x: coarse, y: coarse, z: coarse };
    /// let point = point.with_transforms(&transforms).unwrap();
    /// assert_eq!(3, point.raw_x());
    /// assert_eq!(1.5, point.x());
    /// ```
    pub fn with_transforms(&self, transforms: &Vector<Transform>) -> Result<Point> {
        if *transforms == self.transforms {
            return Ok(self.clone());
        }
        let mut point = self.clone();
        point.raw_x = transforms.x.inverse(self.x())?;
        point.raw_y = transforms.y.inverse(self.y())?;
        point.raw_z = transforms.z.inverse(self.z())?;
        point.transforms = *transforms;
        Ok(point)
    }

    /// Returns this point's format.
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// Returns the transforms used to scale this point's coordinates.
    pub fn transforms(&self) -> &Vector<Transform> {
        &self.transforms
    }

    /// Returns the x coordinate as stored in the record.
    pub fn raw_x(&self) -> i32 {
        self.raw_x
    }

    /// Returns the y coordinate as stored in the record.
    pub fn raw_y(&self) -> i32 {
        self.raw_y
    }

    /// Returns the z coordinate as stored in the record.
    pub fn raw_z(&self) -> i32 {
        self.raw_z
    }

    /// Returns the x coordinate, `raw * scale + offset`.
    pub fn x(&self) -> f64 {
        self.transforms.x.direct(self.raw_x)
    }

    /// Returns the y coordinate, `raw * scale + offset`.
    pub fn y(&self) -> f64 {
        self.transforms.y.direct(self.raw_y)
    }

    /// Returns the z coordinate, `raw * scale + offset`.
    pub fn z(&self) -> f64 {
        self.transforms.z.direct(self.raw_z)
    }

    /// Sets the raw x coordinate.
    pub fn set_raw_x(&mut self, x: i32) {
        self.raw_x = x;
    }

    /// Sets the raw y coordinate.
    pub fn set_raw_y(&mut self, y: i32) {
        self.raw_y = y;
    }

    /// Sets the raw z coordinate.
    pub fn set_raw_z(&mut self, z: i32) {
        self.raw_z = z;
    }

    /// Sets the x coordinate, quantizing it with this point's transform.
    pub fn set_x(&mut self, x: f64) -> Result<()> {
        self.raw_x = self.transforms.x.inverse(x)?;
        Ok(())
    }

    /// Sets the y coordinate, quantizing it with this point's transform.
    pub fn set_y(&mut self, y: f64) -> Result<()> {
        self.raw_y = self.transforms.y.inverse(y)?;
        Ok(())
    }

    /// Sets the z coordinate, quantizing it with this point's transform.
    pub fn set_z(&mut self, z: f64) -> Result<()> {
        self.raw_z = self.transforms.z.inverse(z)?;
        Ok(())
    }

    /// Returns the intensity.
    pub fn intensity(&self) -> u16 {
        self.intensity
    }

    /// Sets the intensity.
    pub fn set_intensity(&mut self, intensity: u16) {
        self.intensity = intensity;
    }

    /// Returns the return number, starting at one.
    pub fn return_number(&self) -> u8 {
        self.return_number
    }

    /// Sets the return number.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Vector};
    /// use las_stream::point::Format;
    /// let mut point = Point::new(Format::new(0).unwrap(), Vector::default());
    /// assert!(point.set_return_number(7).is_ok());
    /// assert!(point.set_return_number(8).is_err());
    ///
    /// let mut point = Point::new(Format::new(6).unwrap(), Vector::default());
    /// assert!(point.set_return_number(15).is_ok());
    /// ```
    pub fn set_return_number(&mut self, return_number: u8) -> Result<()> {
        self.check_return_number(return_number)?;
        self.return_number = return_number;
        Ok(())
    }

    /// Returns the number of returns of this pulse.
    pub fn number_of_returns(&self) -> u8 {
        self.number_of_returns
    }

    /// Sets the number of returns of this pulse.
    pub fn set_number_of_returns(&mut self, number_of_returns: u8) -> Result<()> {
        self.check_return_number(number_of_returns)?;
        self.number_of_returns = number_of_returns;
        Ok(())
    }

    fn check_return_number(&self, return_number: u8) -> Result<()> {
        if return_number > self.format.max_return_number() {
            Err(Error::ReturnNumber {
                format: self.format,
                return_number,
            })
        } else {
            Ok(())
        }
    }

    /// Returns the scan direction.
    pub fn scan_direction(&self) -> ScanDirection {
        self.scan_direction
    }

    /// Sets the scan direction.
    pub fn set_scan_direction(&mut self, scan_direction: ScanDirection) {
        self.scan_direction = scan_direction;
    }

    /// Is this point at the edge of a flight line?
    pub fn is_edge_of_flight_line(&self) -> bool {
        self.is_edge_of_flight_line
    }

    /// Sets the edge of flight line flag.
    pub fn set_edge_of_flight_line(&mut self, is_edge_of_flight_line: bool) {
        self.is_edge_of_flight_line = is_edge_of_flight_line;
    }

    /// Returns the classification.
    ///
    /// Five bits wide for point formats zero through five, eight bits for six through ten.
    pub fn classification(&self) -> u8 {
        self.classification
    }

    /// Sets the classification.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Vector};
    /// use las_stream::point::Format;
    /// let mut point = Point::new(Format::new(1).unwrap(), Vector::default());
    /// assert!(point.set_classification(31).is_ok());
    /// assert!(point.set_classification(32).is_err());
    ///
    /// let mut point = Point::new(Format::new(6).unwrap(), Vector::default());
    /// assert!(point.set_classification(255).is_ok());
    /// ```
    pub fn set_classification(&mut self, classification: u8) -> Result<()> {
        if classification > self.format.max_classification() {
            return Err(Error::Classification {
                format: self.format,
                classification,
            });
        }
        self.classification = classification;
        if !self.format.is_extended() {
            self.is_overlap = classification == OVERLAP_CLASSIFICATION;
        }
        Ok(())
    }

    /// Was this point created by a technique other than lidar collection?
    pub fn is_synthetic(&self) -> bool {
        self.is_synthetic
    }

    /// Sets the synthetic flag.
    pub fn set_synthetic(&mut self, is_synthetic: bool) {
        self.is_synthetic = is_synthetic;
    }

    /// Is this point a model key-point?
    pub fn is_key_point(&self) -> bool {
        self.is_key_point
    }

    /// Sets the key-point flag.
    pub fn set_key_point(&mut self, is_key_point: bool) {
        self.is_key_point = is_key_point;
    }

    /// Should this point be excluded from processing?
    pub fn is_withheld(&self) -> bool {
        self.is_withheld
    }

    /// Sets the withheld flag.
    pub fn set_withheld(&mut self, is_withheld: bool) {
        self.is_withheld = is_withheld;
    }

    /// Is this point in the overlap region of two or more swaths?
    ///
    /// Point formats zero through five mark overlap with classification 12.
    pub fn is_overlap(&self) -> bool {
        self.is_overlap
    }

    /// Sets the overlap flag.
    ///
    /// Only point formats six through ten have an overlap flag.
    pub fn set_overlap(&mut self, is_overlap: bool) -> Result<()> {
        self.require_extended("overlap")?;
        self.is_overlap = is_overlap;
        Ok(())
    }

    /// Returns the scanner channel.
    pub fn scanner_channel(&self) -> Result<u8> {
        self.require_extended("scanner channel")?;
        Ok(self.scanner_channel)
    }

    /// Sets the scanner channel, zero through three.
    pub fn set_scanner_channel(&mut self, scanner_channel: u8) -> Result<()> {
        self.require_extended("scanner channel")?;
        if scanner_channel > 3 {
            return Err(Error::ScannerChannel {
                format: self.format,
                channel: scanner_channel,
            });
        }
        self.scanner_channel = scanner_channel;
        Ok(())
    }

    fn require_extended(&self, attribute: &'static str) -> Result<()> {
        if self.format.is_extended() {
            Ok(())
        } else {
            Err(self.not_available(attribute))
        }
    }

    fn not_available(&self, attribute: &'static str) -> Error {
        Error::AttributeNotAvailable {
            format: self.format,
            attribute,
        }
    }

    /// Returns the scan angle in degrees.
    pub fn scan_angle(&self) -> f32 {
        self.scan_angle.degrees()
    }

    /// Returns the scan angle as stored in the record.
    pub fn raw_scan_angle(&self) -> ScanAngle {
        self.scan_angle
    }

    /// Sets the scan angle in degrees.
    ///
    /// The angle is rounded to whole degrees for point formats zero through five, and to 0.006
    /// degree increments for the others.
    pub fn set_scan_angle(&mut self, degrees: f32) {
        self.scan_angle = if self.format.is_extended() {
            ScanAngle::Scaled((degrees / SCAN_ANGLE_SCALE_FACTOR).round() as i16)
        } else {
            ScanAngle::Rank(degrees.round() as i8)
        };
    }

    /// Returns the user data.
    pub fn user_data(&self) -> u8 {
        self.user_data
    }

    /// Sets the user data.
    pub fn set_user_data(&mut self, user_data: u8) {
        self.user_data = user_data;
    }

    /// Returns the point source id.
    pub fn point_source_id(&self) -> u16 {
        self.point_source_id
    }

    /// Sets the point source id.
    pub fn set_point_source_id(&mut self, point_source_id: u16) {
        self.point_source_id = point_source_id;
    }

    /// Returns the gps time.
    pub fn gps_time(&self) -> Result<f64> {
        self.gps_time.ok_or_else(|| self.not_available("gps time"))
    }

    /// Sets the gps time.
    pub fn set_gps_time(&mut self, gps_time: f64) -> Result<()> {
        if !self.format.has_gps_time() {
            return Err(self.not_available("gps time"));
        }
        self.gps_time = Some(gps_time);
        Ok(())
    }

    /// Returns the color.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Error, Point, Vector};
    /// use las_stream::point::Format;
    /// let point = Point::new(Format::new(1).unwrap(), Vector::default());
    /// assert!(matches!(point.color(), Err(Error::AttributeNotAvailable { .. })));
    /// ```
    pub fn color(&self) -> Result<Color> {
        self.color.ok_or_else(|| self.not_available("color"))
    }

    /// Sets the color.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        if !self.format.has_color() {
            return Err(self.not_available("color"));
        }
        self.color = Some(color);
        Ok(())
    }

    /// Returns the near infrared channel.
    pub fn nir(&self) -> Result<u16> {
        self.nir.ok_or_else(|| self.not_available("nir"))
    }

    /// Sets the near infrared channel.
    pub fn set_nir(&mut self, nir: u16) -> Result<()> {
        if !self.format.has_nir() {
            return Err(self.not_available("nir"));
        }
        self.nir = Some(nir);
        Ok(())
    }

    /// Returns the waveform packet reference.
    pub fn waveform(&self) -> Result<Waveform> {
        self.waveform.ok_or_else(|| self.not_available("waveform"))
    }

    /// Sets the waveform packet reference.
    pub fn set_waveform(&mut self, waveform: Waveform) -> Result<()> {
        if !self.format.has_waveform() {
            return Err(self.not_available("waveform"));
        }
        self.waveform = Some(waveform);
        Ok(())
    }

    /// Returns the extra bytes region of the record.
    pub fn extra_bytes(&self) -> &[u8] {
        &self.extra_bytes
    }

    /// Sets the extra bytes, which must be exactly as long as the format's extra bytes.
    pub fn set_extra_bytes(&mut self, extra_bytes: Vec<u8>) -> Result<()> {
        if extra_bytes.len() != usize::from(self.format.extra_bytes) {
            return Err(Error::ExtraBytesLength {
                format: self.format,
                expected: self.format.extra_bytes,
                len: extra_bytes.len(),
            });
        }
        self.extra_bytes = extra_bytes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_point(format: u8) -> Point {
        Point::new(Format::new(format).unwrap(), Vector::default())
    }

    fn hundredths() -> Vector<Transform> {
        let transform = Transform {
            scale: 0.01,
            offset: 0.,
        };
        Vector {
            x: transform,
            y: transform,
            z: transform,
        }
    }

    #[test]
    fn scaled_coordinates() {
        let mut bytes = [0u8; 20];
        bytes[0..4].copy_from_slice(&39_900_000i32.to_le_bytes());
        let point = Point::decode(&bytes, &Format::new(0).unwrap(), &hundredths()).unwrap();
        assert_eq!(39_900_000, point.raw_x());
        assert_eq!("399000.00", format!("{:.2}", point.x()));
    }

    #[test]
    fn optional_attributes() {
        let point = new_point(1);
        assert!(point.gps_time().is_ok());
        assert!(matches!(
            point.color(),
            Err(Error::AttributeNotAvailable {
                attribute: "color",
                ..
            })
        ));
        assert!(point.nir().is_err());
        assert!(point.waveform().is_err());
        assert!(point.scanner_channel().is_err());

        let point = new_point(10);
        assert!(point.gps_time().is_ok());
        assert!(point.color().is_ok());
        assert!(point.nir().is_ok());
        assert!(point.waveform().is_ok());
        assert!(point.scanner_channel().is_ok());
    }

    #[test]
    fn setters_check_format() {
        let mut point = new_point(0);
        assert!(point.set_gps_time(1.).is_err());
        assert!(point.set_color(Color::new(1, 2, 3)).is_err());
        assert!(point.set_nir(1).is_err());
        assert!(point.set_waveform(Waveform::default()).is_err());
        assert!(point.set_overlap(true).is_err());
        assert!(point.set_scanner_channel(1).is_err());
        assert!(point.set_extra_bytes(vec![1]).is_err());
        assert!(point.set_number_of_returns(8).is_err());

        let mut point = new_point(6);
        assert!(point.set_scanner_channel(3).is_ok());
        assert!(point.set_scanner_channel(4).is_err());
        assert!(point.set_overlap(true).is_ok());
        assert!(point.set_number_of_returns(15).is_ok());
        assert!(point.set_number_of_returns(16).is_err());
    }

    #[test]
    fn legacy_overlap() {
        let mut point = new_point(3);
        point.set_classification(OVERLAP_CLASSIFICATION).unwrap();
        assert!(point.is_overlap());
        point.set_classification(2).unwrap();
        assert!(!point.is_overlap());
    }

    #[test]
    fn flags_roundtrip() {
        for format in [0, 6] {
            let mut point = new_point(format);
            point.set_return_number(2).unwrap();
            point.set_number_of_returns(3).unwrap();
            point.set_scan_direction(ScanDirection::LeftToRight);
            point.set_edge_of_flight_line(true);
            point.set_classification(9).unwrap();
            point.set_synthetic(true);
            point.set_key_point(true);
            point.set_withheld(true);
            point.set_scan_angle(-12.);
            point.set_user_data(42);
            point.set_point_source_id(1024);
            if format == 6 {
                point.set_overlap(true).unwrap();
                point.set_scanner_channel(2).unwrap();
            }
            let mut bytes = Vec::new();
            point.write_to(&mut bytes).unwrap();
            let decoded = Point::decode(&bytes, point.format(), point.transforms()).unwrap();
            assert_eq!(point, decoded);
            assert!((decoded.scan_angle() + 12.).abs() < 0.01);
        }
    }

    #[test]
    fn decode_short_record() {
        let bytes = [0u8; 19];
        assert!(Point::decode(&bytes, &Format::new(0).unwrap(), &Vector::default()).is_err());
    }

    #[test]
    fn with_transforms_overflow() {
        let mut point = new_point(0);
        point.set_raw_x(i32::MAX);
        let tiny = Transform {
            scale: 0.00001,
            offset: 0.,
        };
        let transforms = Vector {
            x: tiny,
            y: tiny,
            z: tiny,
        };
        assert!(matches!(
            point.with_transforms(&transforms),
            Err(Error::InverseTransform { .. })
        ));
    }
}
