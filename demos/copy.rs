//! Copies a las file, optionally keeping only the points inside a rectangle.
//!
//! `cargo run --example copy -- in.las out.laz [min_x min_y max_x max_y]`

use las_stream::{Reader, ReaderOptions, SpatialFilter, pipeline};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (infile, outfile) = match args.as_slice() {
        [infile, outfile, ..] => (infile, outfile),
        _ => panic!("usage: copy <infile> <outfile> [min_x min_y max_x max_y]"),
    };
    let mut options = ReaderOptions::default();
    if let [_, _, min_x, min_y, max_x, max_y] = args.as_slice() {
        let parse = |s: &String| s.parse::<f64>().expect("Coordinates must be numbers");
        options = options.with_filter(SpatialFilter::Rectangle {
            min_x: parse(min_x),
            min_y: parse(min_y),
            max_x: parse(max_x),
            max_y: parse(max_y),
        });
    }
    let reader = Reader::from_path_with_options(infile, options).expect("Unable to open infile");
    let bytes_written = pipeline::copy_to_path(reader, outfile, Default::default())
        .expect("Unable to copy points");
    println!("Wrote {bytes_written} bytes to {outfile}");
}
