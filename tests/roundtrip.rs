//! Roundtrip (write-read) tests for supported LAS versions and attributes.

use las_stream::{Builder, Point, Reader, Writer, point::Format};
use std::io::Cursor;

pub fn roundtrip(builder: Builder, modify_point: impl FnOnce(&mut Point), should_succeed: bool) {
    let header = if should_succeed {
        builder.into_header().unwrap()
    } else {
        assert!(builder.into_header().is_err());
        return;
    };
    let mut point = Point::new(*header.point_format(), *header.transforms());
    modify_point(&mut point);
    let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
    writer.write_point(&point).unwrap();
    writer.close().unwrap();
    let header = writer.header().clone();
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    assert_eq!(point, reader.read_point().unwrap().unwrap());
    assert!(reader.read_point().unwrap().is_none());
    assert_eq!(header.number_of_points(), reader.header().number_of_points());
    assert_eq!(header.bounds(), reader.header().bounds());
    assert_eq!(header.all_vlrs().count(), reader.header().all_vlrs().count());
}

fn format(n: u8) -> Format {
    Format::new(n).unwrap()
}

macro_rules! roundtrip_point {
    ($name:ident, $modify_point:expr) => {
        roundtrip_point!($name, $modify_point, 0);
    };
    ($name:ident, $modify_point:expr, $min_version_minor:expr) => {
        roundtrip_point!($name, $modify_point, $min_version_minor, |_f| {});
    };
    ($name:ident, $modify_point:expr, $min_version_minor:expr, $modify_point_format:expr) => {
        #[test]
        fn $name() {
            use las_stream::{Builder, Version, point::Format};

            let version = super::version();
            let should_succeed = version >= Version::new(1, $min_version_minor);
            let mut point_format = Format::default();
            $modify_point_format(&mut point_format);
            let mut builder = Builder::from(version);
            builder.point_format = point_format;
            crate::roundtrip(builder, $modify_point, should_succeed);
        }
    };
}

macro_rules! roundtrip_builder {
    ($name:ident, $modify_builder:expr) => {
        roundtrip_builder!($name, $modify_builder, 0);
    };
    ($name:ident, $modify_builder:expr, $min_version_minor:expr) => {
        #[test]
        fn $name() {
            use las_stream::{Builder, Version};

            let version = super::version();
            let should_succeed = version >= Version::new(1, $min_version_minor);
            let mut builder = Builder::from(version);
            $modify_builder(&mut builder);
            crate::roundtrip(builder, |_| {}, should_succeed);
        }
    };
}

macro_rules! version {
    ($name:ident, $major:expr, $minor:expr) => {
        mod $name {
            use las_stream::Version;

            fn version() -> Version {
                Version::new($major, $minor)
            }

            mod point {
                use crate::format;
                use las_stream::{Color, Point, point::ScanDirection, raw::point::Waveform};

                roundtrip_point!(xyz, |p: &mut Point| {
                    p.set_x(1.).unwrap();
                    p.set_y(2.).unwrap();
                    p.set_z(3.).unwrap();
                });
                roundtrip_point!(intensity, |p: &mut Point| p.set_intensity(42));
                roundtrip_point!(return_number, |p: &mut Point| p
                    .set_return_number(2)
                    .unwrap());
                roundtrip_point!(number_of_returns, |p: &mut Point| p
                    .set_number_of_returns(2)
                    .unwrap());
                roundtrip_point!(scan_direction, |p: &mut Point| p
                    .set_scan_direction(ScanDirection::LeftToRight));
                roundtrip_point!(is_edge_of_flight_line, |p: &mut Point| p
                    .set_edge_of_flight_line(true));
                roundtrip_point!(classification, |p: &mut Point| p
                    .set_classification(2)
                    .unwrap());
                roundtrip_point!(is_synthetic, |p: &mut Point| p.set_synthetic(true));
                roundtrip_point!(is_key_point, |p: &mut Point| p.set_key_point(true));
                roundtrip_point!(is_withheld, |p: &mut Point| p.set_withheld(true));
                roundtrip_point!(
                    is_overlap,
                    |p: &mut Point| p.set_overlap(true).unwrap(),
                    4,
                    |f: &mut Format| *f = format(6)
                );
                roundtrip_point!(
                    scanner_channel,
                    |p: &mut Point| {
                        p.set_scanner_channel(1).unwrap();
                        p.set_gps_time(42.).unwrap();
                    },
                    4,
                    |f: &mut Format| *f = format(6)
                );
                roundtrip_point!(scan_angle_rank, |p: &mut Point| p.set_scan_angle(3.));
                roundtrip_point!(
                    scan_angle_scaled,
                    |p: &mut Point| p.set_scan_angle(-12.6),
                    4,
                    |f: &mut Format| *f = format(6)
                );
                roundtrip_point!(user_data, |p: &mut Point| p.set_user_data(42));
                roundtrip_point!(point_source_id, |p: &mut Point| p.set_point_source_id(42));
                roundtrip_point!(
                    gps_time,
                    |p: &mut Point| p.set_gps_time(42.).unwrap(),
                    0,
                    |f: &mut Format| *f = format(1)
                );
                roundtrip_point!(
                    color,
                    |p: &mut Point| p
                        .set_color(Color {
                            red: 1,
                            green: 2,
                            blue: 3,
                        })
                        .unwrap(),
                    2,
                    |f: &mut Format| *f = format(2)
                );
                roundtrip_point!(
                    waveform,
                    |p: &mut Point| p
                        .set_waveform(Waveform {
                            wave_packet_descriptor_index: 1,
                            byte_offset_to_waveform_data: 60,
                            waveform_packet_size_in_bytes: 24,
                            return_point_waveform_location: 1.5,
                            x_t: 0.25,
                            y_t: -0.5,
                            z_t: 1.,
                        })
                        .unwrap(),
                    3,
                    |f: &mut Format| *f = format(4)
                );
                roundtrip_point!(
                    nir,
                    |p: &mut Point| {
                        p.set_color(Color {
                            red: 1,
                            green: 2,
                            blue: 3,
                        })
                        .unwrap();
                        p.set_nir(42).unwrap();
                        p.set_gps_time(42.).unwrap();
                    },
                    4,
                    |f: &mut Format| *f = format(8)
                );
                roundtrip_point!(
                    extra_bytes,
                    |p: &mut Point| p.set_extra_bytes(vec![42]).unwrap(),
                    0,
                    |f: &mut Format| f.extra_bytes = 1
                );
            }

            mod builder {
                use chrono::NaiveDate;
                use las_stream::{GpsTimeType, Transform, Vector, Vlr};
                use uuid::Uuid;

                roundtrip_builder!(file_source_id, |b: &mut Builder| b.file_source_id = 42, 1);
                roundtrip_builder!(
                    gps_time_type,
                    |b: &mut Builder| b.gps_time_type = GpsTimeType::Standard,
                    2
                );
                roundtrip_builder!(
                    has_synthetic_return_numbers,
                    |b: &mut Builder| b.has_synthetic_return_numbers = true,
                    3
                );
                roundtrip_builder!(guid, |b: &mut Builder| b.guid = Uuid::from_bytes([42; 16]));
                roundtrip_builder!(system_identifier, |b: &mut Builder| b.system_identifier =
                    "roundtrip test".to_string());
                roundtrip_builder!(generating_software, |b: &mut Builder| b
                    .generating_software =
                    "roundtrip test".to_string());
                roundtrip_builder!(date, |b: &mut Builder| b.date =
                    NaiveDate::from_ymd_opt(2017, 10, 30));
                roundtrip_builder!(transforms, |b: &mut Builder| {
                    let transform = Transform {
                        scale: 0.1,
                        offset: -1.,
                    };
                    b.transforms = Vector {
                        x: transform,
                        y: transform,
                        z: transform,
                    };
                });
                roundtrip_builder!(vlrs, |b: &mut Builder| b.vlrs.push(Vlr::default()));
                roundtrip_builder!(
                    evlrs,
                    |b: &mut Builder| {
                        let vlr = Vlr {
                            data: vec![42; usize::from(u16::MAX) + 1],
                            ..Default::default()
                        };
                        b.evlrs.push(vlr);
                    },
                    4
                );
                roundtrip_builder!(padding, |b: &mut Builder| b.padding =
                    b"You probably shouldn't do this".to_vec());
                roundtrip_builder!(
                    point_padding,
                    |b: &mut Builder| {
                        b.point_padding = vec![42];
                        b.evlrs.push(Vlr::default());
                    },
                    4
                );
            }
        }
    };
}

version!(las_1_0, 1, 0);
version!(las_1_1, 1, 1);
version!(las_1_2, 1, 2);
version!(las_1_3, 1, 3);
version!(las_1_4, 1, 4);
