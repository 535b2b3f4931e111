//! Defines raw las points and the flag and scan angle encodings that differ between formats.

use crate::{
    Color, Result,
    point::{Format, SCAN_ANGLE_SCALE_FACTOR},
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// A raw point, as laid out in a point data record.
///
/// Optional fields follow the point source id in a fixed order: gps time, color, near infrared,
/// waveform packet, then extra bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// The x coordinate, before scaling and offset.
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
    #[allow(missing_docs)]
    pub z: i32,

    /// The pulse return magnitude, normalized to 16 bits.
    pub intensity: u16,

    /// Return numbers, classification and other bit fields.
    pub flags: Flags,

    /// The scan angle, as a rank or scaled.
    pub scan_angle: ScanAngle,

    /// This field may be used at the user's discretion.
    pub user_data: u8,

    /// The file from which this point originated.
    pub point_source_id: u16,

    /// The time at which the point was acquired.
    pub gps_time: Option<f64>,

    /// The red, green and blue channels.
    pub color: Option<Color>,

    /// The near infrared channel.
    pub nir: Option<u16>,

    /// The waveform packet reference.
    pub waveform: Option<Waveform>,

    /// Bytes after the fields defined by the point format.
    pub extra_bytes: Vec<u8>,
}

/// A reference to a waveform packet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Waveform {
    /// The one-based index of the wave packet descriptor, or zero if there is no packet.
    ///
    /// Descriptor `n` is stored in the vlr with record id `n + 99`.
    pub wave_packet_descriptor_index: u8,

    /// The packet's byte offset, relative to the start of the waveform data packet record, its
    /// header included (internal), or to the start of the `.wdp` file (external).
    pub byte_offset_to_waveform_data: u64,

    /// The size of the packet in bytes.
    pub waveform_packet_size_in_bytes: u32,

    /// The offset in picoseconds from the first digitized value to the return.
    pub return_point_waveform_location: f32,

    /// Parametric line equation for extrapolating points along the waveform.
    pub x_t: f32,
    #[allow(missing_docs)]
    pub y_t: f32,
    #[allow(missing_docs)]
    pub z_t: f32,
}

/// Scan angle can be stored as a i8 (rank) or i16 (scaled).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanAngle {
    /// Whole degrees, used by point formats zero through five.
    Rank(i8),
    /// Increments of 0.006 degrees, used by point formats six through ten.
    Scaled(i16),
}

/// These flags hold information about point classification, return number, and more.
///
/// Point formats zero through five use two bytes:
///
/// | Byte | Bits |
/// | ---- | ---- |
/// | a | return number (0:2), number of returns (3:5), scan direction (6), edge of flight line (7) |
/// | b | classification (0:4), synthetic (5), key-point (6), withheld (7) |
///
/// Point formats six through ten use three:
///
/// | Byte | Bits |
/// | ---- | ---- |
/// | a | return number (0:3), number of returns (4:7) |
/// | b | synthetic (0), key-point (1), withheld (2), overlap (3), scanner channel (4:5), scan direction (6), edge of flight line (7) |
/// | c | classification |
///
/// ```
/// use las_stream::raw::point::Flags;
/// let flags = Flags::TwoByte(0b0001_0001, 2);
/// assert_eq!(1, flags.return_number());
/// assert_eq!(2, flags.number_of_returns());
/// assert_eq!(2, flags.classification());
///
/// let flags = Flags::ThreeByte(0b1111_1111, 0b0011_0000, 200);
/// assert_eq!(15, flags.return_number());
/// assert_eq!(3, flags.scanner_channel());
/// assert_eq!(200, flags.classification());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flags {
    /// Two byte flags, used for point formats zero through five.
    TwoByte(u8, u8),
    /// Three byte flags, used for point formats six through ten.
    ThreeByte(u8, u8, u8),
}

impl Point {
    /// Reads a raw point.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::raw::Point;
    /// use las_stream::point::Format;
    /// let bytes = [0u8; 28];
    /// let point = Point::read_from(&bytes[..], &Format::new(1).unwrap()).unwrap();
    /// assert_eq!(Some(0.), point.gps_time);
    /// ```
    pub fn read_from<R: Read>(mut read: R, format: &Format) -> Result<Point> {
        let x = read.read_i32::<LittleEndian>()?;
        let y = read.read_i32::<LittleEndian>()?;
        let z = read.read_i32::<LittleEndian>()?;
        let intensity = read.read_u16::<LittleEndian>()?;
        let (flags, user_data, scan_angle) = if format.is_extended() {
            let flags = Flags::ThreeByte(read.read_u8()?, read.read_u8()?, read.read_u8()?);
            let user_data = read.read_u8()?;
            let scan_angle = ScanAngle::Scaled(read.read_i16::<LittleEndian>()?);
            (flags, user_data, scan_angle)
        } else {
            let flags = Flags::TwoByte(read.read_u8()?, read.read_u8()?);
            let scan_angle = ScanAngle::Rank(read.read_i8()?);
            let user_data = read.read_u8()?;
            (flags, user_data, scan_angle)
        };
        let point_source_id = read.read_u16::<LittleEndian>()?;
        let gps_time = if format.has_gps_time() {
            Some(read.read_f64::<LittleEndian>()?)
        } else {
            None
        };
        let color = if format.has_color() {
            let red = read.read_u16::<LittleEndian>()?;
            let green = read.read_u16::<LittleEndian>()?;
            let blue = read.read_u16::<LittleEndian>()?;
            Some(Color::new(red, green, blue))
        } else {
            None
        };
        let nir = if format.has_nir() {
            Some(read.read_u16::<LittleEndian>()?)
        } else {
            None
        };
        let waveform = if format.has_waveform() {
            Some(Waveform::read_from(&mut read)?)
        } else {
            None
        };
        let mut extra_bytes = vec![0; usize::from(format.extra_bytes)];
        read.read_exact(&mut extra_bytes)?;
        Ok(Point {
            x,
            y,
            z,
            intensity,
            flags,
            scan_angle,
            user_data,
            point_source_id,
            gps_time,
            color,
            nir,
            waveform,
            extra_bytes,
        })
    }

    /// Writes a raw point.
    ///
    /// Optional fields the format needs but the point lacks are written as zeros, and fields the
    /// format does not have are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::raw::Point;
    /// use las_stream::point::Format;
    /// let mut bytes = Vec::new();
    /// Point::default().write_to(&mut bytes, &Format::new(0).unwrap()).unwrap();
    /// assert_eq!(20, bytes.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W, format: &Format) -> Result<()> {
        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        if format.is_extended() {
            let (a, b, c) = self.flags.to_three_bytes();
            write.write_u8(a)?;
            write.write_u8(b)?;
            write.write_u8(c)?;
            write.write_u8(self.user_data)?;
            write.write_i16::<LittleEndian>(self.scan_angle.to_scaled())?;
        } else {
            let (a, b) = self.flags.to_two_bytes();
            write.write_u8(a)?;
            write.write_u8(b)?;
            write.write_i8(self.scan_angle.to_rank())?;
            write.write_u8(self.user_data)?;
        }
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        if format.has_gps_time() {
            write.write_f64::<LittleEndian>(self.gps_time.unwrap_or(0.))?;
        }
        if format.has_color() {
            let color = self.color.unwrap_or_default();
            write.write_u16::<LittleEndian>(color.red)?;
            write.write_u16::<LittleEndian>(color.green)?;
            write.write_u16::<LittleEndian>(color.blue)?;
        }
        if format.has_nir() {
            write.write_u16::<LittleEndian>(self.nir.unwrap_or(0))?;
        }
        if format.has_waveform() {
            self.waveform.unwrap_or_default().write_to(&mut write)?;
        }
        let n = usize::from(format.extra_bytes);
        if self.extra_bytes.len() >= n {
            write.write_all(&self.extra_bytes[..n])?;
        } else {
            write.write_all(&self.extra_bytes)?;
            write.write_all(&vec![0; n - self.extra_bytes.len()])?;
        }
        Ok(())
    }
}

impl Waveform {
    fn read_from<R: Read>(mut read: R) -> Result<Waveform> {
        Ok(Waveform {
            wave_packet_descriptor_index: read.read_u8()?,
            byte_offset_to_waveform_data: read.read_u64::<LittleEndian>()?,
            waveform_packet_size_in_bytes: read.read_u32::<LittleEndian>()?,
            return_point_waveform_location: read.read_f32::<LittleEndian>()?,
            x_t: read.read_f32::<LittleEndian>()?,
            y_t: read.read_f32::<LittleEndian>()?,
            z_t: read.read_f32::<LittleEndian>()?,
        })
    }

    fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_u8(self.wave_packet_descriptor_index)?;
        write.write_u64::<LittleEndian>(self.byte_offset_to_waveform_data)?;
        write.write_u32::<LittleEndian>(self.waveform_packet_size_in_bytes)?;
        write.write_f32::<LittleEndian>(self.return_point_waveform_location)?;
        write.write_f32::<LittleEndian>(self.x_t)?;
        write.write_f32::<LittleEndian>(self.y_t)?;
        write.write_f32::<LittleEndian>(self.z_t)?;
        Ok(())
    }
}

impl Flags {
    /// Returns the return number.
    pub fn return_number(&self) -> u8 {
        match *self {
            Flags::TwoByte(a, _) => a & 0b0000_0111,
            Flags::ThreeByte(a, _, _) => a & 0b0000_1111,
        }
    }

    /// Returns the number of returns.
    pub fn number_of_returns(&self) -> u8 {
        match *self {
            Flags::TwoByte(a, _) => (a >> 3) & 0b0000_0111,
            Flags::ThreeByte(a, _, _) => (a >> 4) & 0b0000_1111,
        }
    }

    /// Returns the scan direction bit.
    pub fn scan_direction(&self) -> bool {
        match *self {
            Flags::TwoByte(a, _) | Flags::ThreeByte(_, a, _) => (a >> 6) & 1 == 1,
        }
    }

    /// Returns the edge of flight line bit.
    pub fn is_edge_of_flight_line(&self) -> bool {
        match *self {
            Flags::TwoByte(a, _) | Flags::ThreeByte(_, a, _) => (a >> 7) & 1 == 1,
        }
    }

    /// Returns the classification, five bits wide for two byte flags.
    pub fn classification(&self) -> u8 {
        match *self {
            Flags::TwoByte(_, b) => b & 0b0001_1111,
            Flags::ThreeByte(_, _, c) => c,
        }
    }

    /// Returns the synthetic bit.
    pub fn is_synthetic(&self) -> bool {
        match *self {
            Flags::TwoByte(_, b) => (b >> 5) & 1 == 1,
            Flags::ThreeByte(_, b, _) => b & 1 == 1,
        }
    }

    /// Returns the key-point bit.
    pub fn is_key_point(&self) -> bool {
        match *self {
            Flags::TwoByte(_, b) => (b >> 6) & 1 == 1,
            Flags::ThreeByte(_, b, _) => (b >> 1) & 1 == 1,
        }
    }

    /// Returns the withheld bit.
    pub fn is_withheld(&self) -> bool {
        match *self {
            Flags::TwoByte(_, b) => (b >> 7) & 1 == 1,
            Flags::ThreeByte(_, b, _) => (b >> 2) & 1 == 1,
        }
    }

    /// Returns the overlap bit.
    ///
    /// Two byte flags have no overlap bit, and always return false.
    pub fn is_overlap(&self) -> bool {
        match *self {
            Flags::TwoByte(_, _) => false,
            Flags::ThreeByte(_, b, _) => (b >> 3) & 1 == 1,
        }
    }

    /// Returns the scanner channel, zero for two byte flags.
    pub fn scanner_channel(&self) -> u8 {
        match *self {
            Flags::TwoByte(_, _) => 0,
            Flags::ThreeByte(_, b, _) => (b >> 4) & 0b11,
        }
    }

    /// Converts these flags into two bytes, truncating fields that do not fit.
    pub fn to_two_bytes(&self) -> (u8, u8) {
        match *self {
            Flags::TwoByte(a, b) => (a, b),
            Flags::ThreeByte(..) => {
                let a = (self.return_number() & 0b111)
                    | (self.number_of_returns() & 0b111) << 3
                    | u8::from(self.scan_direction()) << 6
                    | u8::from(self.is_edge_of_flight_line()) << 7;
                let b = (self.classification() & 0b1_1111)
                    | u8::from(self.is_synthetic()) << 5
                    | u8::from(self.is_key_point()) << 6
                    | u8::from(self.is_withheld()) << 7;
                (a, b)
            }
        }
    }

    /// Converts these flags into three bytes.
    pub fn to_three_bytes(&self) -> (u8, u8, u8) {
        match *self {
            Flags::ThreeByte(a, b, c) => (a, b, c),
            Flags::TwoByte(..) => {
                let a = self.return_number() | self.number_of_returns() << 4;
                let b = u8::from(self.is_synthetic())
                    | u8::from(self.is_key_point()) << 1
                    | u8::from(self.is_withheld()) << 2
                    | u8::from(self.scan_direction()) << 6
                    | u8::from(self.is_edge_of_flight_line()) << 7;
                (a, b, self.classification())
            }
        }
    }
}

impl Default for Flags {
    fn default() -> Flags {
        Flags::TwoByte(0, 0)
    }
}

impl ScanAngle {
    /// Returns the rank, converting from scaled if needed.
    pub fn to_rank(&self) -> i8 {
        match *self {
            ScanAngle::Rank(n) => n,
            ScanAngle::Scaled(n) => (f32::from(n) * SCAN_ANGLE_SCALE_FACTOR).round() as i8,
        }
    }

    /// Returns the scaled value, converting from rank if needed.
    pub fn to_scaled(&self) -> i16 {
        match *self {
            ScanAngle::Rank(n) => (f32::from(n) / SCAN_ANGLE_SCALE_FACTOR).round() as i16,
            ScanAngle::Scaled(n) => n,
        }
    }

    /// Returns the angle in degrees.
    pub fn degrees(&self) -> f32 {
        match *self {
            ScanAngle::Rank(n) => f32::from(n),
            ScanAngle::Scaled(n) => f32::from(n) * SCAN_ANGLE_SCALE_FACTOR,
        }
    }
}

impl Default for ScanAngle {
    fn default() -> ScanAngle {
        ScanAngle::Rank(0)
    }
}
