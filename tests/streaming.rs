use las_stream::{
    Builder, Error, Point, Reader, ReaderOptions, SpatialFilter, Vlr, Writer,
    pipeline::{self, CopyOptions},
    point::Format,
    reader::EndOfPoints,
};
use std::io::{Cursor, Read};

/// A source that can only be read forward.
struct Pipe(Cursor<Vec<u8>>);

impl Read for Pipe {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.0.read(buf)
    }
}

fn grid(builder: Builder, n: i32) -> Cursor<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
    for x in 0..n {
        for y in 0..n {
            let mut point = Point::new(*writer.header().point_format(), *writer.header().transforms());
            point.set_x(f64::from(x)).unwrap();
            point.set_y(f64::from(y)).unwrap();
            point.set_return_number((x % 2 + 1) as u8).unwrap();
            writer.write_point(&point).unwrap();
        }
    }
    writer.into_inner().unwrap()
}

fn default_grid(n: i32) -> Cursor<Vec<u8>> {
    grid(Builder::default(), n)
}

fn count(reader: Reader) -> usize {
    reader.into_iter().map(|point| point.unwrap()).count()
}

/// Reads the grid through a filter, checking each point against the filter on its own.
fn filtered(n: i32, filter: SpatialFilter) -> Vec<Point> {
    let options = ReaderOptions::default().with_filter(filter);
    let reader = Reader::with_options(default_grid(n), options).unwrap();
    let points = reader
        .into_iter()
        .map(|point| point.unwrap())
        .collect::<Vec<_>>();
    for point in &points {
        assert!(
            filter.accepts(point.x(), point.y()),
            "({}, {}) is outside {:?}",
            point.x(),
            point.y(),
            filter
        );
    }
    points
}

#[test]
fn tile_is_half_open() {
    let points = filtered(
        5,
        SpatialFilter::Tile {
            ll_x: 1.,
            ll_y: 1.,
            size: 2.,
        },
    );
    assert_eq!(4, points.len());
    assert!(points.iter().all(|point| point.x() < 3. && point.y() < 3.));
}

#[test]
fn rectangle_is_closed() {
    let points = filtered(
        5,
        SpatialFilter::Rectangle {
            min_x: 1.,
            min_y: 1.,
            max_x: 3.,
            max_y: 3.,
        },
    );
    assert_eq!(9, points.len());
}

#[test]
fn circle() {
    let points = filtered(
        5,
        SpatialFilter::Circle {
            center_x: 2.,
            center_y: 2.,
            radius: 1.,
        },
    );
    assert_eq!(5, points.len());
}

#[test]
fn filter_outside_the_bounds() {
    let options = ReaderOptions::default().with_filter(SpatialFilter::Rectangle {
        min_x: 100.,
        min_y: 100.,
        max_x: 200.,
        max_y: 200.,
    });
    let reader = Reader::with_options(default_grid(3), options).unwrap();
    assert_eq!(0, count(reader));
}

#[test]
fn stream() {
    let reader = Reader::from_stream(Pipe(default_grid(3))).unwrap();
    assert_eq!(9, count(reader));
}

#[test]
fn stream_stops_before_evlrs() {
    let mut builder = Builder::from((1, 4));
    builder.point_format = Format::new(6).unwrap();
    builder.evlrs.push(Vlr {
        user_id: "test".to_string(),
        record_id: 1,
        description: String::new(),
        data: vec![0; 100],
    });
    let options = ReaderOptions::default().with_end_of_points(EndOfPoints::EndOfData);
    let reader = Reader::from_stream_with_options(Pipe(grid(builder, 2)), options).unwrap();
    assert_eq!(4, count(reader));
}

#[test]
fn end_of_data_ignores_the_count() {
    let mut bytes = default_grid(2).into_inner();
    bytes.extend(vec![0; 20]);
    let options = ReaderOptions::default().with_end_of_points(EndOfPoints::EndOfData);
    let reader = Reader::with_options(Cursor::new(bytes), options).unwrap();
    assert_eq!(5, count(reader));
}

#[test]
fn read_points_into() {
    let mut reader = Reader::new(default_grid(3)).unwrap();
    let mut points = Vec::new();
    assert_eq!(5, reader.read_points_into(5, &mut points).unwrap());
    assert_eq!(4, reader.read_points_into(5, &mut points).unwrap());
    assert_eq!(0, reader.read_points_into(5, &mut points).unwrap());
    assert_eq!(9, points.len());
}

#[test]
fn points_by_return_sum_to_the_count() {
    let mut builder = Builder::from((1, 4));
    builder.point_format = Format::new(7).unwrap();
    let reader = Reader::new(grid(builder, 3)).unwrap();
    let header = reader.header();
    let by_return: u64 = (1..=15)
        .map(|n| header.number_of_points_by_return(n).unwrap())
        .sum();
    assert_eq!(header.number_of_points(), by_return);
    assert_eq!(Some(6), header.number_of_points_by_return(1));
    assert_eq!(Some(3), header.number_of_points_by_return(2));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Reader::from_path(dir.path()),
        Err(Error::FileNotFound(_))
    ));
    assert!(matches!(
        Reader::from_path(dir.path().join("missing.las")),
        Err(Error::FileNotFound(_))
    ));
}

#[test]
fn copy_keeps_vlrs() {
    let mut builder = Builder::from((1, 4));
    builder.point_format = Format::new(6).unwrap();
    builder.vlrs.push(Vlr {
        user_id: "test".to_string(),
        record_id: 42,
        description: "a vlr".to_string(),
        data: b"data".to_vec(),
    });
    builder.evlrs.push(Vlr {
        user_id: "test".to_string(),
        record_id: 43,
        description: "an evlr".to_string(),
        data: b"more data".to_vec(),
    });
    let reader = Reader::new(grid(builder, 2)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.las");
    let _ = pipeline::copy_to_path(reader, &path, CopyOptions::default()).unwrap();

    let reader = Reader::from_path(&path).unwrap();
    let header = reader.header();
    assert_eq!(4, header.number_of_points());
    assert_eq!(b"data".to_vec(), header.find_vlr("test", 42).unwrap().data);
    assert_eq!(b"more data".to_vec(), header.find_vlr("test", 43).unwrap().data);
    assert_eq!(4, count(reader));
}

#[test]
fn copy_with_transform() {
    let reader = Reader::new(default_grid(2))
        .unwrap()
        .with_transform(|point| point.set_x(point.x() + 10.).unwrap());
    let mut writer = Writer::new(Cursor::new(Vec::new()), reader.header().clone()).unwrap();
    let _ = pipeline::copy(reader, &mut writer).unwrap();
    let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    assert_eq!(10., reader.header().bounds().min.x);
    assert_eq!(11., reader.header().bounds().max.x);
}

#[test]
fn copy_keeps_the_classification_sequence() {
    let classifications = [0, 2, 31, 64, 200, 255, 7];
    let mut builder = Builder::from((1, 4));
    builder.point_format = Format::new(6).unwrap();
    let mut writer = Writer::new(Cursor::new(Vec::new()), builder.into_header().unwrap()).unwrap();
    for (i, &classification) in classifications.iter().enumerate() {
        let mut point = Point::new(*writer.header().point_format(), *writer.header().transforms());
        point.set_x(i as f64).unwrap();
        point.set_classification(classification).unwrap();
        writer.write_point(&point).unwrap();
    }
    let reader = Reader::new(writer.into_inner().unwrap())
        .unwrap()
        .with_transform(|point| {
            if point.classification() == 7 {
                point.set_classification(2).unwrap();
            }
        });
    let mut writer = Writer::new(Cursor::new(Vec::new()), reader.header().clone()).unwrap();
    let _ = pipeline::copy(reader, &mut writer).unwrap();

    let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    let copied = reader
        .into_iter()
        .map(|point| point.unwrap().classification())
        .collect::<Vec<_>>();
    assert_eq!(vec![0, 2, 31, 64, 200, 255, 2], copied);
}

#[cfg(feature = "laz")]
#[test]
fn laz_roundtrip() {
    let mut builder = Builder::from((1, 4));
    builder.point_format = Format::new(7).unwrap();
    let reader = Reader::new(grid(builder, 4)).unwrap();
    let expected = Reader::new(grid(
        {
            let mut builder = Builder::from((1, 4));
            builder.point_format = Format::new(7).unwrap();
            builder
        },
        4,
    ))
    .unwrap()
    .into_iter()
    .map(|point| point.unwrap())
    .collect::<Vec<_>>();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.laz");
    let _ = pipeline::copy_to_path(reader, &path, CopyOptions::default()).unwrap();

    let reader = Reader::from_path(&path).unwrap();
    assert!(reader.header().point_format().is_compressed);
    let points = reader
        .into_iter()
        .map(|point| point.unwrap())
        .collect::<Vec<_>>();
    assert_eq!(expected.len(), points.len());
    for (expected, point) in expected.iter().zip(&points) {
        assert_eq!(expected.x(), point.x());
        assert_eq!(expected.y(), point.y());
        assert_eq!(expected.return_number(), point.return_number());
    }
}

#[cfg(feature = "laz")]
#[test]
fn laz_needs_to_seek() {
    let mut builder = Builder::from((1, 2));
    builder.point_format = Format::new(1).unwrap();
    builder.point_format.is_compressed = true;
    let bytes = grid(builder, 1);
    assert!(matches!(
        Reader::from_stream(Pipe(bytes)),
        Err(Error::SeekRequired)
    ));
}
