//! Write las points.
//!
//! A `Writer` uses a `Header` for its configuration:
//!
//! ```
//! use std::io::Cursor;
//! use las_stream::{Header, Writer};
//! let header = Header::from((1, 4));
//! let writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
//! ```
//!
//! Points must have the same layout as the header's point format:
//!
//! ```
//! use std::io::Cursor;
//! use las_stream::{Builder, Point, Vector, Writer};
//! use las_stream::point::Format;
//!
//! let mut builder = Builder::default();
//! builder.point_format = Format::new(1).unwrap();
//! let mut writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
//!
//! let point = Point::new(Format::new(0).unwrap(), Vector::default());
//! assert!(writer.write_point(&point).is_err());
//!
//! let point = Point::new(Format::new(1).unwrap(), Vector::default());
//! writer.write_point(&point).unwrap();
//! ```
//!
//! Points whose transforms differ from the header's are quantized again before they're written.

mod las;
#[cfg(feature = "laz")]
mod laz;

use crate::{Error, Header, Point, Result};
use log::{debug, error};
use std::{
    borrow::Cow,
    fmt,
    fs::File,
    io::{BufWriter, Cursor, Seek, SeekFrom, Write},
    path::Path,
};

/// The default capacity of the buffer around a file created with [Writer::from_path].
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Writes whole point records.
trait WritePoints<W: Write>: Send {
    fn write_record(&mut self, record: &[u8]) -> Result<()>;
    fn done(&mut self) -> Result<()>;
    fn get_mut(&mut self) -> &mut W;
    fn into_inner(self: Box<Self>) -> W;
}

/// Options for [Writer].
///
/// # Examples
///
/// ```
/// use las_stream::WriterOptions;
/// let options = WriterOptions::default().with_buffer_capacity(1 << 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriterOptions {
    buffer_capacity: usize,
}

impl WriterOptions {
    /// Changes the capacity of the buffer used by [Writer::from_path_with_options].
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    pub(crate) fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

/// Writes las data.
///
/// The header is rewritten with the point counts and bounds when the writer closes. This is done
/// by the `Drop` implementation if `close` was never called, and a failure there is logged, not
/// raised. Call `close` to check for errors.
///
/// ```
/// use las_stream::Writer;
/// {
///     let mut writer = Writer::default();
///     writer.close().unwrap();
/// }
/// {
///     let writer = Writer::default();
/// } // <- `close` is called on drop
/// ```
pub struct Writer<W: Write + Seek + Send + 'static> {
    bytes_written: u64,
    closed: bool,
    header: Header,
    point_writer: Option<Box<dyn WritePoints<W>>>,
    record: Vec<u8>,
    start: u64,
}

impl<W: Write + Seek + Send + 'static> Writer<W> {
    /// Creates a new writer.
    ///
    /// The header that is passed in will have its point counts and bounds cleared. The header and
    /// its vlrs are written right away.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_stream::Writer;
    /// let writer = Writer::new(Cursor::new(Vec::new()), Default::default());
    /// ```
    pub fn new(mut write: W, mut header: Header) -> Result<Writer<W>> {
        let start = write.stream_position()?;
        header.clear();
        let point_writer: Box<dyn WritePoints<W>> = if header.point_format().is_compressed {
            #[cfg(feature = "laz")]
            {
                header.add_laz_vlr()?;
                header.write_to(&mut write)?;
                Box::new(laz::PointWriter::new(write, &header)?)
            }
            #[cfg(not(feature = "laz"))]
            {
                return Err(Error::LaszipNotEnabled);
            }
        } else {
            header.vlrs_mut().retain(|vlr| !vlr.is_laszip());
            header.write_to(&mut write)?;
            Box::new(las::PointWriter::new(write))
        };
        Ok(Writer {
            bytes_written: 0,
            closed: false,
            record: Vec::with_capacity(usize::from(header.point_format().len())),
            header,
            point_writer: Some(point_writer),
            start,
        })
    }

    /// Returns a reference to this writer's header.
    ///
    /// The point counts and bounds grow as points are written.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Writer;
    /// let writer = Writer::default();
    /// let header = writer.header();
    /// ```
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Writes a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Writer};
    ///
    /// let mut writer = Writer::default();
    /// let point = Point::new(*writer.header().point_format(), *writer.header().transforms());
    /// writer.write_point(&point).unwrap();
    /// assert_eq!(1, writer.header().number_of_points());
    /// ```
    pub fn write_point(&mut self, point: &Point) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        if !point.format().has_same_layout(self.header.point_format()) {
            return Err(Error::PointAttributesDoNotMatch(*self.header.point_format()));
        }
        let point = if point.transforms() == self.header.transforms() {
            Cow::Borrowed(point)
        } else {
            Cow::Owned(point.with_transforms(self.header.transforms())?)
        };
        self.record.clear();
        point.write_to(&mut self.record)?;
        self.point_writer
            .as_mut()
            .ok_or(Error::ClosedWriter)?
            .write_record(&self.record)?;
        self.header.add_point(&point);
        Ok(())
    }

    /// Writes all the points.
    pub fn write_points(&mut self, points: &[Point]) -> Result<()> {
        for point in points {
            self.write_point(point)?;
        }
        Ok(())
    }

    /// Closes this writer.
    ///
    /// Writes the point padding and the evlrs, then rewrites the header with the point counts,
    /// bounds, and the evlr offsets.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Writer;
    /// let mut writer = Writer::default();
    /// writer.close().unwrap();
    /// assert!(writer.close().is_err());
    /// ```
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        self.closed = true;
        let point_writer = self.point_writer.as_mut().ok_or(Error::ClosedWriter)?;
        point_writer.done()?;
        let write = point_writer.get_mut();
        write.write_all(self.header.point_padding())?;

        if !self.header.evlrs().is_empty() {
            let start_of_first_evlr = write.stream_position()? - self.start;
            let mut position = start_of_first_evlr;
            let mut start_of_waveform_data_packet_record = None;
            for evlr in self.header.evlrs() {
                if evlr.is_waveform_data_packets() {
                    start_of_waveform_data_packet_record = Some(position);
                }
                evlr.clone().into_raw(true)?.write_to(&mut *write)?;
                position += evlr.len(true) as u64;
            }
            self.header.set_start_of_first_evlr(start_of_first_evlr);
            self.header
                .set_start_of_waveform_data_packet_record(start_of_waveform_data_packet_record);
        }

        self.bytes_written = write.stream_position()? - self.start;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        self.header.clone().into_raw()?.write_to(&mut *write)?;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        write.flush()?;
        debug!(
            "writer closed after {} points",
            self.header.number_of_points()
        );
        Ok(())
    }

    /// Returns the number of bytes of las data, once the writer is closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Writer;
    /// let mut writer = Writer::default();
    /// assert_eq!(0, writer.bytes_written());
    /// writer.close().unwrap();
    /// assert_eq!(227, writer.bytes_written());
    /// ```
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Closes this writer and returns its inner `Write`, seeked to the beginning of the las data.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Writer;
    /// let writer = Writer::default();
    /// let cursor = writer.into_inner().unwrap();
    /// ```
    pub fn into_inner(mut self) -> Result<W> {
        if !self.closed {
            self.close()?;
        }
        let point_writer = self.point_writer.take().ok_or(Error::ClosedWriter)?;
        let mut inner = point_writer.into_inner();
        let _ = inner.seek(SeekFrom::Start(self.start))?;
        Ok(inner)
    }
}

impl Writer<BufWriter<File>> {
    /// Creates a new writer for a path.
    ///
    /// If the `laz` feature is enabled, a `.laz` extension means the points are compressed.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Writer;
    /// let writer = Writer::from_path("/dev/null", Default::default());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P, header: Header) -> Result<Writer<BufWriter<File>>> {
        Writer::from_path_with_options(path, header, WriterOptions::default())
    }

    /// Creates a new writer for a path with custom options.
    pub fn from_path_with_options<P: AsRef<Path>>(
        path: P,
        mut header: Header,
        options: WriterOptions,
    ) -> Result<Writer<BufWriter<File>>> {
        let path = path.as_ref();
        header.point_format_mut().is_compressed = cfg!(feature = "laz") && is_laz_path(path);
        let file = File::create(path)?;
        Writer::new(BufWriter::with_capacity(options.buffer_capacity, file), header)
    }
}

impl Default for Writer<Cursor<Vec<u8>>> {
    fn default() -> Writer<Cursor<Vec<u8>>> {
        Writer::new(Cursor::new(Vec::new()), Header::default())
            .expect("writing a default header to memory never fails")
    }
}

impl<W: Write + Seek + Send + 'static> Drop for Writer<W> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(err) = self.close() {
                error!("error when closing the writer on drop: {err}");
            }
        }
    }
}

impl<W: Write + Seek + Send + 'static> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("bytes_written", &self.bytes_written)
            .field("closed", &self.closed)
            .field("header", &self.header)
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}

/// Returns true if the path has a `.laz` extension, ignoring case.
pub(crate) fn is_laz_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("laz"))
}
