//! Stream, filter, and write [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! point cloud data.
//!
//! # Reading
//!
//! Create a `Reader` from a `Path`:
//!
//! ```no_run
//! use las_stream::Reader;
//! let reader = Reader::from_path("points.las").unwrap();
//! ```
//!
//! Or anything that implements `Read` and `Seek`:
//!
//! ```no_run
//! use std::io::BufReader;
//! use std::fs::File;
//! use las_stream::Reader;
//! let read = BufReader::new(File::open("points.las").unwrap());
//! let reader = Reader::new(read).unwrap();
//! ```
//!
//! Data that can't seek, like a pipe, can be read with `Reader::from_stream`, as long as the
//! points aren't compressed.
//!
//! ## Prefer `BufRead`
//!
//! Your performance will be better if your `Read` is actually a `BufRead`. `Reader::from_path`
//! takes care of this for you, but `Reader::new` doesn't.
//!
//! ## Read points
//!
//! Read points one-by-one with `Reader::read_point`, or iterate over them:
//!
//! ```
//! use las_stream::{Point, Reader, Writer};
//!
//! let mut writer = Writer::default();
//! let mut point = Point::new(*writer.header().point_format(), *writer.header().transforms());
//! point.set_x(1.).unwrap();
//! writer.write_point(&point).unwrap();
//! let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
//!
//! for point in reader.points() {
//!     let point = point.unwrap();
//!     println!("Point coordinates: ({}, {}, {})", point.x(), point.y(), point.z());
//! }
//! ```
//!
//! ## Filter and transform
//!
//! Points outside a [SpatialFilter] are skipped before they are decoded, and a transform can
//! change each point that is read:
//!
//! ```no_run
//! use las_stream::{Reader, ReaderOptions, SpatialFilter};
//!
//! let options = ReaderOptions::default().with_filter(SpatialFilter::Rectangle {
//!     min_x: 0.,
//!     min_y: 0.,
//!     max_x: 100.,
//!     max_y: 100.,
//! });
//! let reader = Reader::from_path_with_options("points.las", options)
//!     .unwrap()
//!     .with_transform(|point| point.set_intensity(0));
//! ```
//!
//! # Writing
//!
//! Create a `Writer` from a `Write` and a `Header`:
//!
//! ```
//! use std::io::Cursor;
//! use las_stream::{Writer, Header};
//! let write = Cursor::new(Vec::new());
//! let header = Header::default();
//! let writer = Writer::new(write, header).unwrap();
//! ```
//!
//! You can also write out to a path (automatically buffered with `BufWriter`):
//!
//! ```
//! use las_stream::Writer;
//! let writer = Writer::from_path("/dev/null", Default::default());
//! ```
//!
//! Use a `Builder` to customize the las data:
//!
//! ```
//! use std::io::Cursor;
//! use las_stream::{Writer, Builder};
//! use las_stream::point::Format;
//!
//! let mut builder = Builder::from((1, 4));
//! builder.point_format = Format::new(2).unwrap();
//! let header = builder.into_header().unwrap();
//!
//! let write = Cursor::new(Vec::new());
//! let writer = Writer::new(write, header).unwrap();
//! ```
//!
//! If compiled with laz you can compress the data written:
//!
//! ```
//! use std::io::Cursor;
//! use las_stream::{Writer, Builder};
//! use las_stream::point::Format;
//!
//! let mut builder = Builder::from((1, 4));
//! builder.point_format = Format::new(2).unwrap();
//! builder.point_format.is_compressed = true;
//! let header = builder.into_header().unwrap();
//!
//! let result = Writer::new(Cursor::new(Vec::new()), header);
//! assert_eq!(cfg!(feature = "laz"), result.is_ok());
//! ```
//!
//! `Writer::from_path` uses the extension of the output file to decide whether the data should
//! be compressed: `.laz` is compressed, anything else is not.
//!
//! ## Write points
//!
//! Write points one at a time. The header's counts and bounds are updated as you go, and written
//! when the writer closes:
//!
//! ```
//! use las_stream::{Point, Writer};
//! let mut writer = Writer::default();
//! let mut point = Point::new(*writer.header().point_format(), *writer.header().transforms());
//! point.set_x(1.).unwrap();
//! writer.write_point(&point).unwrap();
//! writer.close().unwrap();
//! assert_eq!(1, writer.header().number_of_points());
//! ```
//!
//! # Copying
//!
//! The [pipeline] module streams points from a reader into new las data, optionally building a
//! spatial index and moving waveform packets to a `.wdp` file.

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]
#![warn(trivial_casts, trivial_numeric_casts, unused_qualifications)]

#[cfg(feature = "laz")]
pub mod laz;

pub mod feature;
pub mod filter;
pub mod header;
pub mod pipeline;
pub mod point;
pub mod raw;
pub mod reader;
pub mod vlr;
pub mod waveform;
pub mod writer;

mod bounds;
mod color;
mod crs;
mod error;
mod global_encoding;
mod gps_time_type;
mod transform;
mod utils;
mod vector;
mod version;

pub use crate::bounds::Bounds;
pub use crate::color::Color;
pub use crate::error::Error;
pub use crate::feature::Feature;
pub use crate::filter::SpatialFilter;
pub use crate::global_encoding::GlobalEncoding;
pub use crate::gps_time_type::GpsTimeType;
pub use crate::header::{Builder, Header};
pub use crate::point::Point;
pub use crate::reader::{Reader, ReaderOptions};
pub use crate::transform::Transform;
pub use crate::vector::Vector;
pub use crate::version::Version;
pub use crate::vlr::Vlr;
pub use crate::writer::{Writer, WriterOptions};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
