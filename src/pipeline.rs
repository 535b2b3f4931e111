//! Copy points from a reader into new las data.
//!
//! The writer is configured from the reader's header, so vlrs, evlrs, and the point format carry
//! over. The reader's filter and transform apply, and the point counts, counts by return, and
//! bounds of the output describe the points that were actually written.
//!
//! ```
//! use las_stream::{Point, Reader, Writer, pipeline};
//!
//! let mut writer = Writer::default();
//! let point = Point::new(*writer.header().point_format(), *writer.header().transforms());
//! writer.write_point(&point).unwrap();
//! let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
//!
//! let mut copy = Writer::new(std::io::Cursor::new(Vec::new()), reader.header().clone()).unwrap();
//! let bytes_written = pipeline::copy(reader, &mut copy).unwrap();
//! assert_eq!(227 + 20, bytes_written);
//! ```
//!
//! [copy_to_path] adds a few file level services, see [CopyOptions].

use crate::{
    Reader, Result, Writer, WriterOptions,
    waveform::{WaveformChecker, WaveformPolicy, wdp_path, write_wdp},
    writer::is_laz_path,
};
use log::debug;
use std::{
    fmt,
    fs::{self, File},
    io::{BufWriter, Seek, Write},
    path::{Path, PathBuf},
};

/// A spatial index built while points are written, e.g. a quadtree stored in a `.lax` file.
pub trait SpatialIndex {
    /// Adds a point's position and its index in the output.
    fn add(&mut self, x: f64, y: f64, index: u64);

    /// Finishes the index once all points are added.
    fn complete(&mut self, min_points: u32, max_intervals: i32);

    /// Writes the index to its own file.
    fn write(&mut self, path: &Path) -> Result<()>;

    /// Appends the index to the las data at this path.
    fn append(&mut self, path: &Path) -> Result<()>;
}

/// How a [SpatialIndex] is completed and stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpatialIndexOptions {
    /// The minimum number of points in a cell.
    pub min_points: u32,

    /// The maximum number of intervals per cell, negative to scale with the number of cells.
    pub max_intervals: i32,

    /// Append the index to the output instead of writing a `.lax` file.
    pub append: bool,
}

impl Default for SpatialIndexOptions {
    fn default() -> Self {
        SpatialIndexOptions {
            min_points: 100_000,
            max_intervals: -20,
            append: false,
        }
    }
}

/// Options for [copy_to_path].
///
/// # Examples
///
/// ```
/// use las_stream::pipeline::CopyOptions;
/// use las_stream::waveform::WaveformPolicy;
/// let options = CopyOptions::default()
///     .with_atomic(true)
///     .with_waveforms(WaveformPolicy { allow_gaps: true, ..Default::default() });
/// ```
#[derive(Default)]
pub struct CopyOptions {
    atomic: bool,
    spatial_index: Option<Box<dyn SpatialIndex + Send>>,
    spatial_index_options: SpatialIndexOptions,
    waveforms: Option<WaveformPolicy>,
    writer_options: WriterOptions,
}

impl CopyOptions {
    /// Writes to a temporary file next to the destination, and renames it on success.
    ///
    /// On failure, the temporary file is removed and the destination is left untouched. Off by
    /// default, in which case a failed copy leaves a partial file behind.
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Feeds every written point to a spatial index, which is stored when the copy succeeds.
    pub fn with_spatial_index<S: SpatialIndex + Send + 'static>(mut self, spatial_index: S) -> Self {
        self.spatial_index = Some(Box::new(spatial_index));
        self
    }

    /// Changes how the spatial index is completed and stored.
    pub fn with_spatial_index_options(mut self, options: SpatialIndexOptions) -> Self {
        self.spatial_index_options = options;
        self
    }

    /// Moves waveform data packets stored in the source into a `.wdp` file next to the
    /// destination, and checks each point's packet reference under this policy.
    pub fn with_waveforms(mut self, policy: WaveformPolicy) -> Self {
        self.waveforms = Some(policy);
        self
    }

    /// Changes the options of the writer.
    pub fn with_writer_options(mut self, options: WriterOptions) -> Self {
        self.writer_options = options;
        self
    }
}

impl fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyOptions")
            .field("atomic", &self.atomic)
            .field("spatial_index", &self.spatial_index.is_some())
            .field("spatial_index_options", &self.spatial_index_options)
            .field("waveforms", &self.waveforms)
            .field("writer_options", &self.writer_options)
            .finish()
    }
}

/// Writes every point of the reader, closes the writer, and returns the number of bytes written.
///
/// The writer should have been created from the reader's header.
pub fn copy<W: Write + Seek + Send + 'static>(reader: Reader, writer: &mut Writer<W>) -> Result<u64> {
    stream(reader, writer, None, None)
}

/// Copies every point of the reader into las data at a path, and returns the number of bytes
/// written.
///
/// A `.laz` extension means the points are compressed.
///
/// # Examples
///
/// ```
/// use las_stream::{Point, Reader, Writer, pipeline};
/// use las_stream::pipeline::CopyOptions;
///
/// let mut writer = Writer::default();
/// let point = Point::new(*writer.header().point_format(), *writer.header().transforms());
/// writer.write_point(&point).unwrap();
/// let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("copy.las");
/// let options = CopyOptions::default().with_atomic(true);
/// pipeline::copy_to_path(reader, &path, options).unwrap();
/// assert_eq!(1, Reader::from_path(&path).unwrap().header().number_of_points());
/// ```
pub fn copy_to_path<P: AsRef<Path>>(reader: Reader, path: P, options: CopyOptions) -> Result<u64> {
    let path = path.as_ref();
    let CopyOptions {
        atomic,
        mut spatial_index,
        spatial_index_options,
        waveforms,
        writer_options,
    } = options;

    let mut header = reader.header().clone();
    header.point_format_mut().is_compressed = cfg!(feature = "laz") && is_laz_path(path);
    let mut waveform_data = None;
    let mut checker = None;
    if let Some(policy) = waveforms.filter(|_| header.point_format().has_waveform()) {
        waveform_data = header.waveform_data().cloned();
        let data_len = waveform_data.as_ref().map(|vlr| vlr.data.len() as u64);
        if waveform_data.is_some() {
            header.set_waveforms_external();
        }
        checker = Some(WaveformChecker::new(policy, data_len));
    }

    let target = if atomic {
        temporary_path(path)
    } else {
        path.to_path_buf()
    };
    let result = File::create(&target).map_err(Into::into).and_then(|file| {
        let write = BufWriter::with_capacity(writer_options.buffer_capacity(), file);
        let mut writer = Writer::new(write, header)?;
        let spatial_index = match spatial_index.as_mut() {
            Some(spatial_index) => {
                let spatial_index: &mut dyn SpatialIndex = &mut **spatial_index;
                Some(spatial_index)
            }
            None => None,
        };
        stream(reader, &mut writer, spatial_index, checker.as_mut())
    });
    let bytes_written = match result {
        Ok(bytes_written) => bytes_written,
        Err(err) => {
            if atomic && let Err(remove_err) = fs::remove_file(&target) {
                debug!("could not remove {}: {remove_err}", target.display());
            }
            return Err(err);
        }
    };
    if atomic {
        fs::rename(&target, path)?;
    }

    if let Some(record) = waveform_data {
        let path = wdp_path(path);
        write_wdp(&record, BufWriter::new(File::create(&path)?))?;
        debug!("wrote waveform data packets to {}", path.display());
    }
    if let Some(spatial_index) = spatial_index.as_mut() {
        spatial_index.complete(
            spatial_index_options.min_points,
            spatial_index_options.max_intervals,
        );
        if spatial_index_options.append {
            spatial_index.append(path)?;
        } else {
            spatial_index.write(&lax_path(path))?;
        }
    }
    Ok(bytes_written)
}

/// Returns the path of the `.lax` spatial index file next to a las file.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use las_stream::pipeline::lax_path;
/// assert_eq!(Path::new("points.lax"), lax_path("points.laz"));
/// ```
pub fn lax_path<P: AsRef<Path>>(path: P) -> PathBuf {
    path.as_ref().with_extension("lax")
}

fn temporary_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|file_name| file_name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{file_name}.partial"))
}

fn stream<W: Write + Seek + Send + 'static>(
    reader: Reader,
    writer: &mut Writer<W>,
    mut spatial_index: Option<&mut dyn SpatialIndex>,
    mut checker: Option<&mut WaveformChecker>,
) -> Result<u64> {
    let mut index = 0;
    for point in reader {
        let point = point?;
        if let Some(checker) = checker.as_deref_mut() {
            checker.check(index, &point.waveform()?)?;
        }
        writer.write_point(&point)?;
        if let Some(spatial_index) = spatial_index.as_deref_mut() {
            spatial_index.add(point.x(), point.y(), index);
        }
        index += 1;
    }
    writer.close()?;
    debug!("copied {} points", index);
    Ok(writer.bytes_written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Builder, Error, Point, ReaderOptions, SpatialFilter, Vlr,
        point::Format,
        raw::point::Waveform,
    };
    use std::{
        io::Cursor,
        sync::{Arc, Mutex},
    };

    #[derive(Default)]
    struct Recorded {
        points: Vec<(f64, f64, u64)>,
        completed: Option<(u32, i32)>,
        written: Option<PathBuf>,
        appended: Option<PathBuf>,
    }

    #[derive(Clone, Default)]
    struct MockIndex(Arc<Mutex<Recorded>>);

    impl SpatialIndex for MockIndex {
        fn add(&mut self, x: f64, y: f64, index: u64) {
            self.0.lock().unwrap().points.push((x, y, index));
        }

        fn complete(&mut self, min_points: u32, max_intervals: i32) {
            self.0.lock().unwrap().completed = Some((min_points, max_intervals));
        }

        fn write(&mut self, path: &Path) -> Result<()> {
            self.0.lock().unwrap().written = Some(path.to_path_buf());
            Ok(())
        }

        fn append(&mut self, path: &Path) -> Result<()> {
            self.0.lock().unwrap().appended = Some(path.to_path_buf());
            Ok(())
        }
    }

    fn source(n: u16) -> Cursor<Vec<u8>> {
        let mut builder = Builder::from((1, 2));
        builder.point_format = Format::new(1).unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
        for i in 0..n {
            let mut point = Point::new(*writer.header().point_format(), *writer.header().transforms());
            point.set_x(f64::from(i)).unwrap();
            point.set_return_number((i % 3) as u8 + 1).unwrap();
            writer.write_point(&point).unwrap();
        }
        writer.into_inner().unwrap()
    }

    #[test]
    fn copy_counts() {
        let options = ReaderOptions::default().with_filter(SpatialFilter::Rectangle {
            min_x: 0.,
            min_y: 0.,
            max_x: 4.,
            max_y: 0.,
        });
        let reader = Reader::with_options(source(10), options).unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), reader.header().clone()).unwrap();
        let bytes_written = copy(reader, &mut writer).unwrap();
        assert_eq!(227 + 5 * 28, bytes_written);
        let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        let header = reader.header();
        assert_eq!(5, header.number_of_points());
        let by_return: u64 = (1..=5)
            .map(|n| header.number_of_points_by_return(n).unwrap())
            .sum();
        assert_eq!(5, by_return);
        assert_eq!(Some(2), header.number_of_points_by_return(1));
        assert_eq!(4., header.bounds().max.x);
    }

    #[test]
    fn spatial_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexed.las");
        let index = MockIndex::default();
        let options = CopyOptions::default().with_spatial_index(index.clone());
        let _ = copy_to_path(Reader::new(source(3)).unwrap(), &path, options).unwrap();
        let recorded = index.0.lock().unwrap();
        assert_eq!(vec![(0., 0., 0), (1., 0., 1), (2., 0., 2)], recorded.points);
        assert_eq!(Some((100_000, -20)), recorded.completed);
        assert_eq!(Some(dir.path().join("indexed.lax")), recorded.written);
        assert!(recorded.appended.is_none());
    }

    #[test]
    fn spatial_index_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexed.las");
        let index = MockIndex::default();
        let options = CopyOptions::default()
            .with_spatial_index(index.clone())
            .with_spatial_index_options(SpatialIndexOptions {
                min_points: 10,
                max_intervals: 5,
                append: true,
            });
        let _ = copy_to_path(Reader::new(source(1)).unwrap(), &path, options).unwrap();
        let recorded = index.0.lock().unwrap();
        assert_eq!(Some((10, 5)), recorded.completed);
        assert_eq!(Some(path), recorded.appended);
    }

    #[test]
    fn atomic_failure_leaves_nothing() {
        let mut bytes = source(2).into_inner();
        bytes.truncate(bytes.len() - 1);
        let reader = Reader::from_stream(Cursor::new(bytes)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.las");
        let options = CopyOptions::default().with_atomic(true);
        assert!(matches!(
            copy_to_path(reader, &path, options),
            Err(Error::TruncatedData { index: 1 })
        ));
        assert!(!path.exists());
        assert_eq!(0, fs::read_dir(dir.path()).unwrap().count());
    }

    #[test]
    fn non_atomic_failure_leaves_partial_output() {
        let mut bytes = source(2).into_inner();
        bytes.truncate(bytes.len() - 1);
        let reader = Reader::from_stream(Cursor::new(bytes)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.las");
        assert!(copy_to_path(reader, &path, CopyOptions::default()).is_err());
        assert!(path.exists());
    }

    fn waveform_source(offsets: &[u64]) -> Cursor<Vec<u8>> {
        let mut builder = Builder::from((1, 4));
        builder.point_format = Format::new(4).unwrap();
        builder.has_waveforms_internal = true;
        builder.evlrs.push(Vlr {
            user_id: "LASF_Spec".to_string(),
            record_id: 65535,
            description: String::new(),
            data: vec![7; 20],
        });
        let mut writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
        for &offset in offsets {
            let mut point = Point::new(*writer.header().point_format(), *writer.header().transforms());
            point
                .set_waveform(Waveform {
                    wave_packet_descriptor_index: 1,
                    byte_offset_to_waveform_data: offset,
                    waveform_packet_size_in_bytes: 10,
                    ..Default::default()
                })
                .unwrap();
            writer.write_point(&point).unwrap();
        }
        writer.into_inner().unwrap()
    }

    #[test]
    fn externalize_waveforms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waveforms.las");
        let options = CopyOptions::default().with_waveforms(WaveformPolicy::default());
        let reader = Reader::new(waveform_source(&[60, 70])).unwrap();
        let _ = copy_to_path(reader, &path, options).unwrap();

        let wdp = fs::read(dir.path().join("waveforms.wdp")).unwrap();
        assert_eq!(60 + 20, wdp.len());
        assert_eq!(vec![7; 20], wdp[60..]);
        let reader = Reader::from_path(&path).unwrap();
        let header = reader.header();
        assert!(header.has_waveforms_external());
        assert!(!header.has_waveforms_internal());
        assert!(header.waveform_data().is_none());
        assert_eq!(2, header.number_of_points());
    }

    #[test]
    fn waveform_gap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waveforms.las");
        let options = CopyOptions::default().with_waveforms(WaveformPolicy::default());
        let reader = Reader::new(waveform_source(&[60, 75])).unwrap();
        assert!(matches!(
            copy_to_path(reader, &path, options),
            Err(Error::WaveformLayout { index: 1, .. })
        ));
        assert!(!dir.path().join("waveforms.wdp").exists());
    }
}
