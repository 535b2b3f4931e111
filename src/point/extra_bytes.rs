//! Typed access to the extra bytes at the end of point records.
//!
//! The extra bytes vlr (`LASF_Spec`, record id 4) holds one 192-byte description per attribute.
//! Attributes are packed into the extra bytes region in declaration order.
//!
//! ```
//! use las_stream::{Point, Vector};
//! use las_stream::point::{Format, extra_bytes::{ExtraBytesDescription, ExtraBytesType}};
//!
//! let description = ExtraBytesDescription::new("Amplitude", ExtraBytesType::new(5).unwrap());
//! let mut format = Format::new(0).unwrap();
//! format.extra_bytes = 4;
//! let mut point = Point::new(format, Vector::default());
//! point.set_extra_bytes(23905u32.to_le_bytes().to_vec()).unwrap();
//! assert_eq!(23905., description.value(&point, 0).unwrap());
//! ```

use crate::{
    Error, Point, Result, Vlr,
    utils::{AsLasStr, FromLasStr},
};
use log::warn;

/// The user id of the extra bytes vlr.
pub const USER_ID: &str = "LASF_Spec";

/// The record id of the extra bytes vlr.
pub const RECORD_ID: u16 = 4;

/// The size of one description in the extra bytes vlr.
pub const DESCRIPTION_LEN: usize = 192;

const NO_DATA_BIT: u8 = 1;
const MIN_BIT: u8 = 1 << 1;
const MAX_BIT: u8 = 1 << 2;
const SCALE_BIT: u8 = 1 << 3;
const OFFSET_BIT: u8 = 1 << 4;

/// The primitive types an extra bytes attribute can be made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// One byte integer.
    Byte,
    /// Two byte integer.
    Short,
    /// Four byte integer.
    Int,
    /// Eight byte integer.
    Long,
    /// Four byte float.
    Float,
    /// Eight byte float.
    Double,
}

/// The ten base types, in data type order. Types 11 through 20 are pairs of these, and 21 through
/// 30 are triples.
const BASE_TYPES: [(PrimitiveKind, bool); 10] = [
    (PrimitiveKind::Byte, true),
    (PrimitiveKind::Byte, false),
    (PrimitiveKind::Short, true),
    (PrimitiveKind::Short, false),
    (PrimitiveKind::Int, true),
    (PrimitiveKind::Int, false),
    (PrimitiveKind::Long, true),
    (PrimitiveKind::Long, false),
    (PrimitiveKind::Float, false),
    (PrimitiveKind::Double, false),
];

impl PrimitiveKind {
    /// Returns the size of this primitive in bytes.
    pub fn size(&self) -> usize {
        match *self {
            PrimitiveKind::Byte => 1,
            PrimitiveKind::Short => 2,
            PrimitiveKind::Int | PrimitiveKind::Float => 4,
            PrimitiveKind::Long | PrimitiveKind::Double => 8,
        }
    }
}

/// An extra bytes data type, one of 1 through 30.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExtraBytesType {
    id: u8,

    /// The primitive each element is made of.
    pub kind: PrimitiveKind,

    /// The number of elements, one through three.
    pub cardinality: usize,

    /// Are the elements unsigned integers?
    pub is_unsigned: bool,
}

impl ExtraBytesType {
    /// Looks up a data type.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::extra_bytes::{ExtraBytesType, PrimitiveKind};
    /// let data_type = ExtraBytesType::new(15).unwrap();
    /// assert_eq!(PrimitiveKind::Int, data_type.kind);
    /// assert_eq!(2, data_type.cardinality);
    /// assert!(data_type.is_unsigned);
    /// assert_eq!(8, data_type.size());
    ///
    /// assert!(ExtraBytesType::new(0).is_err());
    /// assert!(ExtraBytesType::new(31).is_err());
    /// ```
    pub fn new(id: u8) -> Result<ExtraBytesType> {
        if !(1..=30).contains(&id) {
            return Err(Error::UnknownExtraByteType(id));
        }
        let (kind, is_unsigned) = BASE_TYPES[usize::from((id - 1) % 10)];
        Ok(ExtraBytesType {
            id,
            kind,
            cardinality: usize::from((id - 1) / 10) + 1,
            is_unsigned,
        })
    }

    /// Returns the data type id.
    pub fn to_u8(&self) -> u8 {
        self.id
    }

    /// Returns the size of an attribute of this type, in bytes.
    pub fn size(&self) -> usize {
        self.kind.size() * self.cardinality
    }
}

/// One element of an extra bytes attribute, before scale and offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawValue {
    /// An unsigned integer, widened to 64 bits.
    Unsigned(u64),
    /// A signed integer, widened to 64 bits.
    Signed(i64),
    /// A float, widened to 64 bits.
    Float(f64),
}

impl RawValue {
    /// Converts this value to an `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            RawValue::Unsigned(n) => n as f64,
            RawValue::Signed(n) => n as f64,
            RawValue::Float(n) => n,
        }
    }

    fn read(bytes: &[u8], kind: PrimitiveKind, is_unsigned: bool) -> RawValue {
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        match (kind, is_unsigned) {
            (PrimitiveKind::Float, _) => {
                RawValue::Float(f64::from(f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])))
            }
            (PrimitiveKind::Double, _) => RawValue::Float(f64::from_le_bytes(buf)),
            (_, true) => RawValue::Unsigned(u64::from_le_bytes(buf)),
            (PrimitiveKind::Byte, false) => RawValue::Signed(i64::from(buf[0] as i8)),
            (PrimitiveKind::Short, false) => {
                RawValue::Signed(i64::from(i16::from_le_bytes([buf[0], buf[1]])))
            }
            (PrimitiveKind::Int, false) => RawValue::Signed(i64::from(i32::from_le_bytes([
                buf[0], buf[1], buf[2], buf[3],
            ]))),
            (PrimitiveKind::Long, false) => RawValue::Signed(i64::from_le_bytes(buf)),
        }
    }

    /// Reads a value stored in an 8-byte "anytype" slot of the description, e.g. no data.
    fn read_any(bytes: [u8; 8], kind: PrimitiveKind, is_unsigned: bool) -> RawValue {
        match (kind, is_unsigned) {
            (PrimitiveKind::Float | PrimitiveKind::Double, _) => {
                RawValue::Float(f64::from_le_bytes(bytes))
            }
            (_, true) => RawValue::Unsigned(u64::from_le_bytes(bytes)),
            (_, false) => RawValue::Signed(i64::from_le_bytes(bytes)),
        }
    }
}

/// The description of one extra bytes attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtraBytesDescription {
    /// The attribute name.
    pub name: String,

    /// A description of the attribute.
    pub description: String,

    /// The data type.
    pub data_type: ExtraBytesType,

    /// The option bits: no data (0), min (1), max (2), scale (3), offset (4).
    pub options: u8,

    /// The no data values, one per element, stored as 8 bytes of the attribute's type.
    pub no_data: [[u8; 8]; 3],

    /// The minimum values, one per element.
    pub min: [[u8; 8]; 3],

    /// The maximum values, one per element.
    pub max: [[u8; 8]; 3],

    /// The scale factors, one per element.
    pub scale: [f64; 3],

    /// The offsets, one per element.
    pub offset: [f64; 3],

    /// Where this attribute starts in the extra bytes region.
    pub position: usize,
}

impl ExtraBytesDescription {
    /// Creates a new description without any options set.
    pub fn new(name: &str, data_type: ExtraBytesType) -> ExtraBytesDescription {
        ExtraBytesDescription {
            name: name.to_string(),
            description: String::new(),
            data_type,
            options: 0,
            no_data: [[0; 8]; 3],
            min: [[0; 8]; 3],
            max: [[0; 8]; 3],
            scale: [1.; 3],
            offset: [0.; 3],
            position: 0,
        }
    }

    /// Parses every description in an extra bytes vlr payload.
    ///
    /// Positions accumulate in declaration order. A payload whose length is not a multiple of 192
    /// bytes has its tail ignored, with a warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::extra_bytes::{ExtraBytesDescription, ExtraBytesType};
    /// let first = ExtraBytesDescription::new("a", ExtraBytesType::new(3).unwrap());
    /// let second = ExtraBytesDescription::new("b", ExtraBytesType::new(10).unwrap());
    /// let mut payload = Vec::new();
    /// first.write_to(&mut payload).unwrap();
    /// second.write_to(&mut payload).unwrap();
    ///
    /// let descriptions = ExtraBytesDescription::parse_all(&payload).unwrap();
    /// assert_eq!(0, descriptions[0].position);
    /// assert_eq!(2, descriptions[1].position);
    /// ```
    pub fn parse_all(payload: &[u8]) -> Result<Vec<ExtraBytesDescription>> {
        if payload.len() % DESCRIPTION_LEN != 0 {
            warn!(
                "extra bytes vlr payload of {} bytes is not a multiple of {}, ignoring the last {} bytes",
                payload.len(),
                DESCRIPTION_LEN,
                payload.len() % DESCRIPTION_LEN
            );
        }
        let mut position = 0;
        let mut descriptions = Vec::with_capacity(payload.len() / DESCRIPTION_LEN);
        for chunk in payload.chunks_exact(DESCRIPTION_LEN) {
            let description = ExtraBytesDescription::parse(chunk, position)?;
            position += description.size();
            descriptions.push(description);
        }
        Ok(descriptions)
    }

    fn parse(bytes: &[u8], position: usize) -> Result<ExtraBytesDescription> {
        let data_type = ExtraBytesType::new(bytes[2])?;
        let anytype = |start: usize| -> [[u8; 8]; 3] {
            let mut values = [[0; 8]; 3];
            for (i, value) in values.iter_mut().enumerate() {
                value.copy_from_slice(&bytes[start + 8 * i..start + 8 * (i + 1)]);
            }
            values
        };
        let doubles = |start: usize| -> [f64; 3] {
            anytype(start).map(f64::from_le_bytes)
        };
        Ok(ExtraBytesDescription {
            name: bytes[4..36].as_las_str()?.to_string(),
            description: bytes[160..192].as_las_str()?.to_string(),
            data_type,
            options: bytes[3],
            no_data: anytype(40),
            min: anytype(64),
            max: anytype(88),
            scale: doubles(112),
            offset: doubles(136),
            position,
        })
    }

    /// Writes this description as 192 bytes.
    pub fn write_to<W: std::io::Write>(&self, mut write: W) -> Result<()> {
        let mut bytes = [0u8; DESCRIPTION_LEN];
        bytes[2] = self.data_type.to_u8();
        bytes[3] = self.options;
        bytes[4..36].from_las_str(&self.name)?;
        for i in 0..3 {
            bytes[40 + 8 * i..48 + 8 * i].copy_from_slice(&self.no_data[i]);
            bytes[64 + 8 * i..72 + 8 * i].copy_from_slice(&self.min[i]);
            bytes[88 + 8 * i..96 + 8 * i].copy_from_slice(&self.max[i]);
            bytes[112 + 8 * i..120 + 8 * i].copy_from_slice(&self.scale[i].to_le_bytes());
            bytes[136 + 8 * i..144 + 8 * i].copy_from_slice(&self.offset[i].to_le_bytes());
        }
        bytes[160..192].from_las_str(&self.description)?;
        write.write_all(&bytes)?;
        Ok(())
    }

    /// Creates an extra bytes vlr holding these descriptions.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::extra_bytes::{ExtraBytesDescription, ExtraBytesType};
    /// let description = ExtraBytesDescription::new("a", ExtraBytesType::new(1).unwrap());
    /// let vlr = ExtraBytesDescription::to_vlr(&[description]).unwrap();
    /// assert!(vlr.is_extra_bytes());
    /// assert_eq!(192, vlr.data.len());
    /// ```
    pub fn to_vlr(descriptions: &[ExtraBytesDescription]) -> Result<Vlr> {
        let mut data = Vec::with_capacity(descriptions.len() * DESCRIPTION_LEN);
        for description in descriptions {
            description.write_to(&mut data)?;
        }
        Ok(Vlr {
            user_id: USER_ID.to_string(),
            record_id: RECORD_ID,
            description: "Extra Bytes Record".to_string(),
            data,
        })
    }

    /// Returns the size of this attribute in bytes.
    pub fn size(&self) -> usize {
        self.data_type.size()
    }

    /// Is the no data value meaningful?
    pub fn has_no_data(&self) -> bool {
        self.options & NO_DATA_BIT != 0
    }

    /// Is the min value meaningful?
    pub fn has_min(&self) -> bool {
        self.options & MIN_BIT != 0
    }

    /// Is the max value meaningful?
    pub fn has_max(&self) -> bool {
        self.options & MAX_BIT != 0
    }

    /// Should values be multiplied by the scale?
    pub fn has_scale(&self) -> bool {
        self.options & SCALE_BIT != 0
    }

    /// Should the offset be added to values?
    pub fn has_offset(&self) -> bool {
        self.options & OFFSET_BIT != 0
    }

    /// Sets the scale of one element, and turns on the scale bit.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::point::extra_bytes::{ExtraBytesDescription, ExtraBytesType};
    /// let mut description = ExtraBytesDescription::new("a", ExtraBytesType::new(1).unwrap());
    /// description.set_scale(0, 0.1).unwrap();
    /// assert!(description.has_scale());
    /// assert!(description.set_scale(1, 0.1).is_err());
    /// ```
    pub fn set_scale(&mut self, i: usize, scale: f64) -> Result<()> {
        self.check_element(i)?;
        self.scale[i] = scale;
        self.options |= SCALE_BIT;
        Ok(())
    }

    /// Sets the offset of one element, and turns on the offset bit.
    pub fn set_offset(&mut self, i: usize, offset: f64) -> Result<()> {
        self.check_element(i)?;
        self.offset[i] = offset;
        self.options |= OFFSET_BIT;
        Ok(())
    }

    fn check_element(&self, i: usize) -> Result<()> {
        if i < self.data_type.cardinality {
            Ok(())
        } else {
            Err(Error::ExtraBytesElement {
                name: self.name.clone(),
                i,
                cardinality: self.data_type.cardinality,
            })
        }
    }

    /// Returns the minimum of one element, if the min bit is set.
    pub fn min(&self, i: usize) -> Option<RawValue> {
        self.anytype(&self.min, i).filter(|_| self.has_min())
    }

    /// Returns the maximum of one element, if the max bit is set.
    pub fn max(&self, i: usize) -> Option<RawValue> {
        self.anytype(&self.max, i).filter(|_| self.has_max())
    }

    fn anytype(&self, values: &[[u8; 8]; 3], i: usize) -> Option<RawValue> {
        values.get(i).map(|bytes| {
            RawValue::read_any(*bytes, self.data_type.kind, self.data_type.is_unsigned)
        })
    }

    /// Checks that this attribute fits into an extra bytes region of `len` bytes.
    pub fn check_fits(&self, len: usize) -> Result<()> {
        if self.position + self.size() > len {
            Err(Error::ExtraBytesOutOfRange {
                name: self.name.clone(),
                offset: self.position,
                size: self.size(),
                len,
            })
        } else {
            Ok(())
        }
    }

    /// Returns element `i` of this attribute, before scale and offset.
    ///
    /// Unsigned integers widen to `u64`, so `0xFF` in an unsigned char is 255.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Vector};
    /// use las_stream::point::{Format, extra_bytes::{ExtraBytesDescription, ExtraBytesType, RawValue}};
    /// let description = ExtraBytesDescription::new("a", ExtraBytesType::new(1).unwrap());
    /// let mut format = Format::new(0).unwrap();
    /// format.extra_bytes = 1;
    /// let mut point = Point::new(format, Vector::default());
    /// point.set_extra_bytes(vec![0xFF]).unwrap();
    /// assert_eq!(RawValue::Unsigned(255), description.raw_value(&point, 0).unwrap());
    /// ```
    pub fn raw_value(&self, point: &Point, i: usize) -> Result<RawValue> {
        let bytes = self.element_bytes(point.extra_bytes(), i)?;
        Ok(RawValue::read(
            bytes,
            self.data_type.kind,
            self.data_type.is_unsigned,
        ))
    }

    /// Returns element `i` of this attribute, multiplied by its scale if the scale bit is set,
    /// and then translated by its offset if the offset bit is set.
    pub fn value(&self, point: &Point, i: usize) -> Result<f64> {
        let mut value = self.raw_value(point, i)?.as_f64();
        if self.has_scale() {
            value *= self.scale[i];
        }
        if self.has_offset() {
            value += self.offset[i];
        }
        Ok(value)
    }

    /// Returns every element of this attribute, scaled and offset.
    pub fn values(&self, point: &Point) -> Result<Vec<f64>> {
        (0..self.data_type.cardinality)
            .map(|i| self.value(point, i))
            .collect()
    }

    /// Returns true if element `i` equals the no data value, and the no data bit is set.
    pub fn is_no_data(&self, point: &Point, i: usize) -> Result<bool> {
        let value = self.raw_value(point, i)?;
        Ok(self.has_no_data()
            && self
                .anytype(&self.no_data, i)
                .is_some_and(|no_data| no_data == value))
    }

    fn element_bytes<'a>(&self, extra_bytes: &'a [u8], i: usize) -> Result<&'a [u8]> {
        self.check_element(i)?;
        let size = self.data_type.kind.size();
        let start = self.position + i * size;
        if start + size > extra_bytes.len() {
            return Err(Error::ExtraBytesOutOfRange {
                name: self.name.clone(),
                offset: start,
                size,
                len: extra_bytes.len(),
            });
        }
        Ok(&extra_bytes[start..start + size])
    }
}
