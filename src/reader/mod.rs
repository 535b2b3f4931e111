//! Read las points.
//!
//! A [Reader] reads the header and its variable length records when it's opened, then decodes
//! one point record at a time:
//!
//! ```no_run
//! use las_stream::Reader;
//! let mut reader = Reader::from_path("points.las").unwrap();
//! let first_point = reader.read_point().unwrap().unwrap();
//! let the_rest = reader.points().map(|r| r.unwrap()).collect::<Vec<_>>();
//! ```
//!
//! A reader is a single pass over the points. Once the points run out, or a record fails to
//! decode, the source is released and every later read returns `Ok(None)`. Open the data again to
//! start over.
//!
//! # Filtering and transforming
//!
//! A [SpatialFilter] is checked against the coordinates of each record before the rest of the
//! record is decoded. A transform runs on every accepted point before it is returned:
//!
//! ```
//! use las_stream::{Reader, SpatialFilter, Writer};
//!
//! let mut writer = Writer::default();
//! for x in 0..10 {
//!     let mut point = las_stream::Point::new(*writer.header().point_format(), *writer.header().transforms());
//!     point.set_x(f64::from(x)).unwrap();
//!     writer.write_point(&point).unwrap();
//! }
//!
//! let reader = Reader::new(writer.into_inner().unwrap())
//!     .unwrap()
//!     .with_filter(SpatialFilter::Rectangle { min_x: 2., min_y: 0., max_x: 4., max_y: 0. })
//!     .with_transform(|point| point.set_user_data(42));
//! let points = reader.into_iter().collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(3, points.len());
//! assert!(points.iter().all(|point| point.user_data() == 42));
//! ```
//!
//! # Compression
//!
//! [laszip](https://laszip.org/) is supported by enabling the `laz` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! las-stream = { version = "*", features = ["laz"] }
//! ```

mod las;
#[cfg(feature = "laz")]
mod laz;

use crate::{
    Error, Header, Point, Result, SpatialFilter, Vlr,
    feature::Evlrs,
    raw,
};
use log::debug;
use std::{
    fmt,
    fs::File,
    io::{BufReader, ErrorKind, Read, Seek, SeekFrom},
    path::Path,
};

/// The default capacity of the buffer around a file opened with [Reader::from_path].
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Reads whole point records.
trait ReadPoints: Send {
    /// Fills the buffer with the next record.
    ///
    /// Returns false if the data ended cleanly before the record.
    fn read_record(&mut self, buffer: &mut [u8]) -> Result<bool>;
}

/// Where the points end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndOfPoints {
    /// Stop after the header's number of points.
    #[default]
    HeaderCount,

    /// Ignore the header's count and read records until the point data ends.
    ///
    /// The point data ends at the end of the source, or at the first evlr or waveform data packet
    /// record. Compressed data always stop at the header's count.
    EndOfData,
}

/// Options for [Reader].
///
/// # Examples
///
/// ```
/// use las_stream::{ReaderOptions, SpatialFilter};
/// use las_stream::reader::EndOfPoints;
/// let options = ReaderOptions::default()
///     .with_filter(SpatialFilter::Circle { center_x: 0., center_y: 0., radius: 1. })
///     .with_end_of_points(EndOfPoints::EndOfData)
///     .with_buffer_capacity(1 << 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReaderOptions {
    filter: SpatialFilter,
    end_of_points: EndOfPoints,
    buffer_capacity: usize,
}

impl ReaderOptions {
    /// Only return points accepted by this filter.
    pub fn with_filter(mut self, filter: SpatialFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Changes where the points end.
    pub fn with_end_of_points(mut self, end_of_points: EndOfPoints) -> Self {
        self.end_of_points = end_of_points;
        self
    }

    /// Changes the capacity of the buffer used by [Reader::from_path_with_options].
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            filter: SpatialFilter::None,
            end_of_points: EndOfPoints::HeaderCount,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Created,
    Reading,
    Exhausted,
    Errored,
    Closed,
}

/// Reads las data.
pub struct Reader {
    header: Header,
    point_reader: Option<Box<dyn ReadPoints>>,
    state: State,
    filter: SpatialFilter,
    transform: Option<Box<dyn FnMut(&mut Point) + Send>>,
    end_of_points: EndOfPoints,
    buffer: Vec<u8>,
    index: u64,
    number_of_yielded_points: u64,
    number_of_filtered_points: u64,
}

impl Reader {
    /// Creates a new reader with default options.
    ///
    /// This does *not* wrap the `Read` in a `BufRead`, so if you're concerned about performance
    /// you should do that wrapping yourself (or use `from_path`).
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Reader, Writer};
    /// let cursor = Writer::default().into_inner().unwrap();
    /// let reader = Reader::new(cursor).unwrap();
    /// ```
    pub fn new<R: Read + Seek + Send + Sync + 'static>(read: R) -> Result<Reader> {
        Reader::with_options(read, ReaderOptions::default())
    }

    /// Creates a new reader with custom options.
    ///
    /// The extended variable length records (and, for las 1.3, the waveform data packet record)
    /// are read right away. For uncompressed data that stop at the header's point count, the
    /// point data must fit in the source, else this is `Error::TruncatedData`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Reader, ReaderOptions, Writer};
    /// use las_stream::reader::EndOfPoints;
    /// let cursor = Writer::default().into_inner().unwrap();
    /// let options = ReaderOptions::default().with_end_of_points(EndOfPoints::EndOfData);
    /// let reader = Reader::with_options(cursor, options).unwrap();
    /// ```
    pub fn with_options<R: Read + Seek + Send + Sync + 'static>(
        mut read: R,
        options: ReaderOptions,
    ) -> Result<Reader> {
        let start = read.stream_position()?;
        let mut header = Header::read_from(&mut read)?;
        let offset_to_point_data = u64::from(header.offset_to_point_data()?);
        let end = read.seek(SeekFrom::End(0))? - start;

        if let Some(evlr) = header.evlr().filter(|evlr| evlr.start_of_first_evlr > 0) {
            let _ = read.seek(SeekFrom::Start(start + evlr.start_of_first_evlr))?;
            for index in 0..evlr.number_of_evlrs {
                let raw_evlr = raw::Vlr::read_from(&mut read, true).map_err(|err| match err {
                    Error::Io(err) if err.kind() == ErrorKind::UnexpectedEof => {
                        Error::TruncatedVlr {
                            index,
                            is_extended: true,
                        }
                    }
                    err => err,
                })?;
                header.push_evlr(Vlr::new(raw_evlr)?)?;
            }
        }
        if let Some(start_of_waveform_data_packet_record) = header
            .start_of_waveform_data_packet_record()
            .filter(|&offset| offset > 0)
        {
            if header.has_waveforms_internal() && !header.version().supports::<Evlrs>() {
                let _ = read.seek(SeekFrom::Start(start + start_of_waveform_data_packet_record))?;
                let raw_evlr = raw::Vlr::read_from(&mut read, true).map_err(|err| match err {
                    Error::Io(err) if err.kind() == ErrorKind::UnexpectedEof => {
                        Error::TruncatedVlr {
                            index: 0,
                            is_extended: true,
                        }
                    }
                    err => err,
                })?;
                header.push_evlr(Vlr::new(raw_evlr)?)?;
            }
        }

        let end_of_point_data = end_of_point_data(&header).map_or(end, |offset| offset.min(end));
        let point_data_len = end_of_point_data.saturating_sub(offset_to_point_data);
        let record_len = u64::from(header.point_format().len());
        if !header.point_format().is_compressed
            && options.end_of_points == EndOfPoints::HeaderCount
            && header
                .number_of_points()
                .checked_mul(record_len)
                .is_none_or(|len| len > point_data_len)
        {
            return Err(Error::TruncatedData {
                index: point_data_len / record_len,
            });
        }

        let _ = read.seek(SeekFrom::Start(start + offset_to_point_data))?;
        let point_reader: Box<dyn ReadPoints> = if header.point_format().is_compressed {
            #[cfg(feature = "laz")]
            {
                Box::new(laz::PointReader::new(read, &header)?)
            }
            #[cfg(not(feature = "laz"))]
            {
                return Err(Error::LaszipNotEnabled);
            }
        } else {
            Box::new(las::PointReader::new(read, Some(point_data_len)))
        };
        Ok(Reader::from_parts(header, point_reader, options))
    }

    /// Creates a new reader over a forward-only stream.
    ///
    /// Extended variable length records live after the points, so they are skipped. Compressed
    /// data need to seek, so they are `Error::SeekRequired`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Read;
    /// use las_stream::{Reader, Writer};
    /// let mut bytes = Vec::new();
    /// Writer::default().into_inner().unwrap().read_to_end(&mut bytes).unwrap();
    /// let reader = Reader::from_stream(std::io::Cursor::new(bytes)).unwrap();
    /// ```
    pub fn from_stream<R: Read + Send + 'static>(read: R) -> Result<Reader> {
        Reader::from_stream_with_options(read, ReaderOptions::default())
    }

    /// Creates a new reader over a forward-only stream with custom options.
    pub fn from_stream_with_options<R: Read + Send + 'static>(
        mut read: R,
        options: ReaderOptions,
    ) -> Result<Reader> {
        let header = Header::read_from(&mut read)?;
        if header.point_format().is_compressed {
            return Err(Error::SeekRequired);
        }
        if header.evlr().is_some_and(|evlr| evlr.number_of_evlrs > 0)
            || header.has_waveforms_internal()
        {
            debug!("skipping the extended variable length records of a stream");
        }
        let offset_to_point_data = u64::from(header.offset_to_point_data()?);
        let limit = end_of_point_data(&header).map(|end| end.saturating_sub(offset_to_point_data));
        let point_reader = Box::new(las::PointReader::new(read, limit));
        Ok(Reader::from_parts(header, point_reader, options))
    }

    /// Creates a new reader from a path.
    ///
    /// The underlying `File` is wrapped in a `BufReader` for performance reasons.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Error, Reader};
    /// assert!(matches!(Reader::from_path("not/a/file.las"), Err(Error::FileNotFound(_))));
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader> {
        Reader::from_path_with_options(path, ReaderOptions::default())
    }

    /// Creates a new reader from a path with custom options.
    ///
    /// A path that does not name a regular file is `Error::FileNotFound`.
    pub fn from_path_with_options<P: AsRef<Path>>(
        path: P,
        options: ReaderOptions,
    ) -> Result<Reader> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Reader::with_options(BufReader::with_capacity(options.buffer_capacity, file), options)
    }

    fn from_parts(
        header: Header,
        point_reader: Box<dyn ReadPoints>,
        options: ReaderOptions,
    ) -> Reader {
        let buffer = vec![0; usize::from(header.point_format().len())];
        Reader {
            header,
            point_reader: Some(point_reader),
            state: State::Created,
            filter: SpatialFilter::None,
            transform: None,
            end_of_points: options.end_of_points,
            buffer,
            index: 0,
            number_of_yielded_points: 0,
            number_of_filtered_points: 0,
        }
        .with_filter(options.filter)
    }

    /// Only returns points accepted by this filter.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use las_stream::{Reader, SpatialFilter};
    /// let reader = Reader::from_path("points.las")
    ///     .unwrap()
    ///     .with_filter(SpatialFilter::Tile { ll_x: 637000., ll_y: 850000., size: 100. });
    /// ```
    pub fn with_filter(mut self, filter: SpatialFilter) -> Reader {
        if !filter.intersects(&self.header.bounds()) {
            debug!("{filter:?} does not intersect the bounds of the data");
        }
        self.filter = filter;
        self
    }

    /// Runs this function on every point that passes the filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Point, Reader, Writer};
    /// let mut writer = Writer::default();
    /// let point = Point::new(*writer.header().point_format(), *writer.header().transforms());
    /// writer.write_point(&point).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap())
    ///     .unwrap()
    ///     .with_transform(|point| {
    ///         let _ = point.set_classification(2);
    ///     });
    /// assert_eq!(2, reader.read_point().unwrap().unwrap().classification());
    /// ```
    pub fn with_transform<F: FnMut(&mut Point) + Send + 'static>(mut self, transform: F) -> Reader {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Returns a reference to this reader's header.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use las_stream::Reader;
    /// let reader = Reader::from_path("points.las").unwrap();
    /// let header = reader.header();
    /// ```
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the next point that passes the filter.
    ///
    /// Returns `Ok(None)` once the points run out, and after any error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use las_stream::Reader;
    /// let mut reader = Reader::from_path("points.las").unwrap();
    /// let point = reader.read_point().unwrap().unwrap();
    /// ```
    pub fn read_point(&mut self) -> Result<Option<Point>> {
        match self.state {
            State::Closed => return Err(Error::ClosedReader),
            State::Exhausted | State::Errored => return Ok(None),
            State::Created => self.state = State::Reading,
            State::Reading => {}
        }
        loop {
            match self.read_record() {
                Ok(true) => {}
                Ok(false) => {
                    self.finish(State::Exhausted);
                    return Ok(None);
                }
                Err(err) => {
                    self.finish(State::Errored);
                    return Err(err);
                }
            }
            if !self.accepts_record() {
                self.number_of_filtered_points += 1;
                continue;
            }
            let mut point =
                match Point::decode(&self.buffer, self.header.point_format(), self.header.transforms()) {
                    Ok(point) => point,
                    Err(err) => {
                        self.finish(State::Errored);
                        return Err(err);
                    }
                };
            if let Some(transform) = self.transform.as_mut() {
                transform(&mut point);
            }
            self.number_of_yielded_points += 1;
            return Ok(Some(point));
        }
    }

    /// Reads up to `n` points into a vector.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use las_stream::Reader;
    /// let mut reader = Reader::from_path("points.las").unwrap();
    /// let points = reader.read_points(10).unwrap();
    /// assert_eq!(points.len(), 10);
    /// ```
    pub fn read_points(&mut self, n: u64) -> Result<Vec<Point>> {
        let mut points = Vec::with_capacity(usize::try_from(n)?.min(DEFAULT_BUFFER_CAPACITY));
        let _ = self.read_points_into(n, &mut points)?;
        Ok(points)
    }

    /// Reads up to `n` points into a provided vector, returning the number of points read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use las_stream::Reader;
    /// let mut reader = Reader::from_path("points.las").unwrap();
    /// let mut points = Vec::new();
    /// let count = reader.read_points_into(10, &mut points).unwrap();
    /// assert_eq!(10, count);
    /// ```
    pub fn read_points_into(&mut self, n: u64, points: &mut Vec<Point>) -> Result<u64> {
        let mut count = 0;
        while count < n {
            match self.read_point()? {
                Some(point) => points.push(point),
                None => break,
            }
            count += 1;
        }
        Ok(count)
    }

    /// Releases the source.
    ///
    /// Reading after a close is `Error::ClosedReader`, and so is closing twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Reader, Writer};
    /// let mut reader = Reader::new(Writer::default().into_inner().unwrap()).unwrap();
    /// reader.close().unwrap();
    /// assert!(reader.read_point().is_err());
    /// assert!(reader.close().is_err());
    /// ```
    pub fn close(&mut self) -> Result<()> {
        if self.state == State::Closed {
            return Err(Error::ClosedReader);
        }
        self.point_reader = None;
        self.state = State::Closed;
        Ok(())
    }

    /// Returns an iterator over this reader's points.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use las_stream::Reader;
    /// let mut reader = Reader::from_path("points.las").unwrap();
    /// let points = reader.points().collect::<Result<Vec<_>, _>>().unwrap();
    /// ```
    pub fn points(&mut self) -> PointIterator<'_> {
        PointIterator { reader: self }
    }

    fn read_record(&mut self) -> Result<bool> {
        let counted =
            self.end_of_points == EndOfPoints::HeaderCount || self.header.point_format().is_compressed;
        if counted && self.index >= self.header.number_of_points() {
            return Ok(false);
        }
        let Some(point_reader) = self.point_reader.as_mut() else {
            return Ok(false);
        };
        let index = self.index;
        match point_reader.read_record(&mut self.buffer) {
            Ok(true) => {
                self.index += 1;
                Ok(true)
            }
            Ok(false) if counted => Err(Error::TruncatedData { index }),
            Ok(false) => Ok(false),
            Err(Error::Io(err)) if err.kind() == ErrorKind::UnexpectedEof => {
                Err(Error::TruncatedData { index })
            }
            Err(err) => Err(err),
        }
    }

    fn accepts_record(&self) -> bool {
        if self.filter == SpatialFilter::None {
            return true;
        }
        let raw_x = i32::from_le_bytes([self.buffer[0], self.buffer[1], self.buffer[2], self.buffer[3]]);
        let raw_y = i32::from_le_bytes([self.buffer[4], self.buffer[5], self.buffer[6], self.buffer[7]]);
        let transforms = self.header.transforms();
        self.filter
            .accepts(transforms.x.direct(raw_x), transforms.y.direct(raw_y))
    }

    fn finish(&mut self, state: State) {
        self.point_reader = None;
        self.state = state;
        debug!(
            "reader {:?} after {} records, {} points yielded, {} filtered",
            state, self.index, self.number_of_yielded_points, self.number_of_filtered_points
        );
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("header", &self.header)
            .field("state", &self.state)
            .field("filter", &self.filter)
            .field("end_of_points", &self.end_of_points)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Returns the offset where the point data must end, if the header knows of anything after it.
fn end_of_point_data(header: &Header) -> Option<u64> {
    let evlr = header
        .evlr()
        .filter(|evlr| evlr.number_of_evlrs > 0 && evlr.start_of_first_evlr > 0)
        .map(|evlr| evlr.start_of_first_evlr);
    let waveforms = header
        .start_of_waveform_data_packet_record()
        .filter(|&offset| offset > 0 && header.has_waveforms_internal());
    match (evlr, waveforms) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// An iterator over the points in a [Reader].
///
/// This struct is generally created by calling `points()` on `Reader`.
#[derive(Debug)]
pub struct PointIterator<'a> {
    reader: &'a mut Reader,
}

impl Iterator for PointIterator<'_> {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_point().transpose()
    }
}

/// An owning iterator over the points of a [Reader].
///
/// The source is released when the iterator is dropped.
#[derive(Debug)]
pub struct IntoPoints {
    reader: Reader,
}

impl Iterator for IntoPoints {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_point().transpose()
    }
}

impl IntoIterator for Reader {
    type Item = Result<Point>;
    type IntoIter = IntoPoints;

    fn into_iter(self) -> IntoPoints {
        IntoPoints { reader: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, Writer, point::Format};
    use std::io::Cursor;

    fn data(n: i32) -> Cursor<Vec<u8>> {
        let mut writer = Writer::default();
        for i in 0..n {
            let mut point = Point::new(*writer.header().point_format(), *writer.header().transforms());
            point.set_x(f64::from(i)).unwrap();
            point.set_y(f64::from(i)).unwrap();
            writer.write_point(&point).unwrap();
        }
        writer.into_inner().unwrap()
    }

    #[test]
    fn end_twice() {
        let mut reader = Reader::new(data(1)).unwrap();
        assert!(reader.read_point().unwrap().is_some());
        assert!(reader.read_point().unwrap().is_none());
        assert!(reader.read_point().unwrap().is_none());
    }

    #[test]
    fn closed() {
        let mut reader = Reader::new(data(1)).unwrap();
        reader.close().unwrap();
        assert!(matches!(reader.read_point(), Err(Error::ClosedReader)));
    }

    #[test]
    fn filter() {
        let reader = Reader::new(data(10)).unwrap().with_filter(SpatialFilter::Rectangle {
            min_x: 2.,
            min_y: 2.,
            max_x: 4.,
            max_y: 4.,
        });
        let xs = reader
            .into_iter()
            .map(|point| point.unwrap().x())
            .collect::<Vec<_>>();
        assert_eq!(vec![2., 3., 4.], xs);
    }

    #[test]
    fn transform() {
        let reader = Reader::new(data(3))
            .unwrap()
            .with_transform(|point| point.set_classification(9).unwrap());
        for point in reader {
            assert_eq!(9, point.unwrap().classification());
        }
    }

    #[test]
    fn truncated_at_open() {
        let mut bytes = data(2).into_inner();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            Reader::new(Cursor::new(bytes)),
            Err(Error::TruncatedData { index: 1 })
        ));
    }

    #[test]
    fn truncated_stream() {
        let mut bytes = data(2).into_inner();
        bytes.truncate(bytes.len() - 1);
        let mut reader = Reader::from_stream(Cursor::new(bytes)).unwrap();
        assert!(reader.read_point().unwrap().is_some());
        assert!(matches!(
            reader.read_point(),
            Err(Error::TruncatedData { index: 1 })
        ));
        assert!(reader.read_point().unwrap().is_none());
    }

    #[test]
    fn end_of_data() {
        let bytes = data(3).into_inner();
        let mut raw_header = raw::Header::read_from(&bytes[..]).unwrap();
        raw_header.number_of_point_records = 1;
        let mut patched = Vec::new();
        raw_header.write_to(&mut patched).unwrap();
        patched.extend_from_slice(&bytes[patched.len()..]);

        let reader = Reader::new(Cursor::new(patched.clone())).unwrap();
        assert_eq!(1, reader.into_iter().count());

        let options = ReaderOptions::default().with_end_of_points(EndOfPoints::EndOfData);
        let reader = Reader::with_options(Cursor::new(patched), options).unwrap();
        assert_eq!(3, reader.into_iter().count());
    }

    #[test]
    fn count_too_large_for_the_data() {
        let mut builder = Builder::from((1, 4));
        builder.point_format = Format::new(6).unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
        let point = Point::new(*writer.header().point_format(), *writer.header().transforms());
        writer.write_point(&point).unwrap();
        let bytes = writer.into_inner().unwrap().into_inner();

        let mut raw_header = raw::Header::read_from(&bytes[..]).unwrap();
        raw_header.large_file.as_mut().unwrap().number_of_point_records = u64::MAX / 2;
        let mut patched = Vec::new();
        raw_header.write_to(&mut patched).unwrap();
        patched.extend_from_slice(&bytes[patched.len()..]);
        assert!(matches!(
            Reader::new(Cursor::new(patched)),
            Err(Error::TruncatedData { index: 1 })
        ));
    }

    #[test]
    fn evlrs_end_the_point_data() {
        let mut builder = Builder::from((1, 4));
        builder.point_format = Format::new(6).unwrap();
        builder.evlrs.push(Vlr {
            user_id: "me".to_string(),
            record_id: 1,
            description: String::new(),
            data: vec![0; 100],
        });
        let mut writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
        let point = Point::new(*writer.header().point_format(), *writer.header().transforms());
        writer.write_point(&point).unwrap();
        let cursor = writer.into_inner().unwrap();

        let options = ReaderOptions::default().with_end_of_points(EndOfPoints::EndOfData);
        let reader = Reader::with_options(cursor, options).unwrap();
        assert_eq!(1, reader.header().evlrs().len());
        assert_eq!(1, reader.into_iter().count());
    }

    #[test]
    fn stream_skips_evlrs() {
        let mut builder = Builder::from((1, 4));
        builder.evlrs.push(Vlr::default());
        let writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
        let cursor = writer.into_inner().unwrap();
        let reader = Reader::from_stream(cursor).unwrap();
        assert!(reader.header().evlrs().is_empty());
    }

    #[test]
    fn bad_signature() {
        let mut bytes = data(1).into_inner();
        bytes[0] = b'X';
        assert!(matches!(
            Reader::new(Cursor::new(bytes)),
            Err(Error::BadSignature(_))
        ));
    }

    #[cfg(not(feature = "laz"))]
    #[test]
    fn laz_not_enabled() {
        let mut builder = Builder::default();
        builder.point_format.is_compressed = true;
        let header = builder.into_header().unwrap();
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        assert!(matches!(
            Reader::new(Cursor::new(bytes)),
            Err(Error::LaszipNotEnabled)
        ));
    }

    #[test]
    fn stream_rejects_laz() {
        let mut builder = Builder::default();
        builder.point_format.is_compressed = true;
        let header = builder.into_header().unwrap();
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        assert!(matches!(
            Reader::from_stream(Cursor::new(bytes)),
            Err(Error::SeekRequired)
        ));
    }
}
