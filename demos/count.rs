//! Counts the number of points in a las file.

use las_stream::Reader;

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("Must provide a path to a las file");
    let reader = Reader::from_path(path).expect("Unable to open reader");
    let npoints = reader
        .into_iter()
        .map(|p| p.expect("Unable to read point"))
        .count();
    println!("Number of points: {}", npoints);
}
