use crate::{Transform, Version, point::Format};
use std::path::PathBuf;
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The point format does not carry this attribute.
    #[error("point format {format} does not have {attribute}")]
    AttributeNotAvailable {
        /// The point format of the point that was asked.
        format: Format,
        /// The name of the missing attribute.
        attribute: &'static str,
    },

    /// The file signature was not "LASF".
    #[error("the file signature must be LASF, found {0:?}")]
    BadSignature([u8; 4]),

    /// The value cannot be stored in this point format's classification field.
    #[error("point format {format} cannot store classification {classification}")]
    Classification {
        /// The point format.
        format: Format,
        /// The classification that didn't fit.
        classification: u8,
    },

    /// The reader was closed and cannot be read from.
    #[error("the reader is closed")]
    ClosedReader,

    /// The writer was closed and cannot be written to.
    #[error("the writer is closed")]
    ClosedWriter,

    /// The attribute has no element at this index.
    #[error("extra bytes attribute {name} has {cardinality} element(s), no element {i}")]
    ExtraBytesElement {
        /// The attribute name.
        name: String,
        /// The requested element.
        i: usize,
        /// The number of elements of the attribute's type.
        cardinality: usize,
    },

    /// An extra bytes attribute reaches past the end of the point's extra bytes.
    #[error(
        "extra bytes attribute {name} at offset {offset} with size {size} does not fit into {len} extra bytes"
    )]
    ExtraBytesOutOfRange {
        /// The attribute name.
        name: String,
        /// The attribute's offset in the extra bytes region.
        offset: usize,
        /// The attribute's size in bytes.
        size: usize,
        /// The number of extra bytes available.
        len: usize,
    },

    /// The extra bytes vector has the wrong length for this point format.
    #[error("point format {format} needs {expected} extra bytes, got {len}")]
    ExtraBytesLength {
        /// The point format.
        format: Format,
        /// The expected length.
        expected: u16,
        /// The length that was given.
        len: usize,
    },

    /// The path does not exist or is not a regular file.
    #[error("no such file: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The header padding does not fit in the header size.
    #[error("the header padding is too long: {0} bytes")]
    HeaderPadding(usize),

    /// The header size is too small for its version.
    #[error("las {version} needs a header of at least {} bytes, the header says {header_size}", version.header_size())]
    HeaderSize {
        /// The version.
        version: Version,
        /// The header size the file declares.
        header_size: u16,
    },

    /// The header already has CRS (E)VLRs.
    #[error("the header already contains CRS (E)VLRs")]
    HeaderContainsCrsVlr,

    /// The value is out of range for the transform.
    #[error("the transform {transform} cannot convert {n} into an i32")]
    InverseTransform {
        /// The float that could not be converted.
        n: f64,
        /// The transform that was used.
        transform: Transform,
    },

    /// The point format id is not defined by any las version.
    #[error("invalid point format: {0}")]
    InvalidPointFormat(u8),

    /// Wrapper around `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The `laz` feature is not enabled, but the data are compressed.
    #[error("the laz feature is not enabled")]
    LaszipNotEnabled,

    /// Wrapper around `laz::LasZipError`.
    #[cfg(feature = "laz")]
    #[error(transparent)]
    Laz(#[from] laz::LasZipError),

    /// The compressed data have no laszip vlr.
    #[cfg(feature = "laz")]
    #[error("the header has no laszip vlr")]
    LasZipVlrNotFound,

    /// This string is not ASCII.
    #[error("this string is not ascii: {0}")]
    NotAscii(String),

    /// The point's format does not match the writer's format.
    #[error("the point's attributes do not match the writer's point format {0}")]
    PointAttributesDoNotMatch(Format),

    /// The point data record length is shorter than the point format requires.
    #[error("point format {format} needs records of at least {} bytes, the header says {len}", format.base_len())]
    PointDataRecordLength {
        /// The point format.
        format: Format,
        /// The declared record length.
        len: u16,
    },

    /// The offset to the point data points into the public header block.
    #[error("the offset to point data ({offset}) is less than the header size ({header_size})")]
    OffsetToPointData {
        /// The declared offset to the point data.
        offset: u32,
        /// The declared header size.
        header_size: u16,
    },

    /// Point padding requires evlrs.
    #[error("point padding is only allowed when evlrs are present")]
    PointPadding,

    /// The return number or number of returns does not fit in this point format.
    #[error("point format {format} cannot store return number {return_number}")]
    ReturnNumber {
        /// The point format.
        format: Format,
        /// The return number (or number of returns) that didn't fit.
        return_number: u8,
    },

    /// The compressed data need a seekable source.
    #[error("compressed data can only be read from a seekable source")]
    SeekRequired,

    /// The point format cannot be compressed.
    #[error("point format {0} cannot be compressed")]
    UnsupportedCompression(Format),

    /// The string is too long for its fixed-size field.
    #[error("the string is longer than {len} bytes: {string}")]
    StringTooLong {
        /// The string.
        string: String,
        /// The size of the field.
        len: usize,
    },

    /// Too many points for this version.
    #[error("las {version} cannot hold {n} points")]
    TooManyPoints {
        /// The number of points.
        n: u64,
        /// The las version.
        version: Version,
    },

    /// The public header block ended early.
    #[error("the public header block is truncated")]
    TruncatedHeader,

    /// A point record ended early.
    #[error("point record {index} is truncated")]
    TruncatedData {
        /// The zero-based index of the record that could not be read.
        index: u64,
    },

    /// A variable length record ended early or crosses into the point data.
    #[error("{} {index} is truncated", if *.is_extended { "evlr" } else { "vlr" })]
    TruncatedVlr {
        /// The zero-based index of the record.
        index: u32,
        /// Whether this is an extended record.
        is_extended: bool,
    },

    /// Wrapper around `std::num::TryFromIntError`.
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// The extra bytes data type is not one of 1..=30.
    #[error("unknown extra bytes data type: {0}")]
    UnknownExtraByteType(u8),

    /// The feature is not supported by the version.
    #[error("las {version} does not support {feature}")]
    UnsupportedFeature {
        /// The version.
        version: Version,
        /// The feature that isn't supported.
        feature: &'static str,
    },

    /// The point format is not supported by the version.
    #[error("las {version} does not support point format {format}")]
    UnsupportedPointFormat {
        /// The version.
        version: Version,
        /// The point format.
        format: Format,
    },

    /// Wrapper around `std::str::Utf8Error`.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// The vlr data is too long for a regular vlr.
    #[error("the vlr is too long: {0}")]
    VlrTooLong(usize),

    /// A waveform packet reference violates the waveform policy.
    #[error("waveform packet of point {index} at offset {offset}: {reason}")]
    WaveformLayout {
        /// The zero-based index of the point.
        index: u64,
        /// The packet's byte offset.
        offset: u64,
        /// What was wrong.
        reason: &'static str,
    },

    /// The scanner channel does not fit in a legacy point format.
    #[error("point format {format} cannot store scanner channel {channel}")]
    ScannerChannel {
        /// The point format.
        format: Format,
        /// The scanner channel.
        channel: u8,
    },
}
