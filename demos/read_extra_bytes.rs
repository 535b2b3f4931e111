//! Prints the extra bytes attributes of the first ten points of a las file.

use las_stream::Reader;

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("Must provide a path to a las file");
    let reader = Reader::from_path(&path).expect("Unable to open reader");
    let descriptions = reader.header().extra_bytes().to_vec();
    if descriptions.is_empty() {
        println!("{path} has no extra bytes attributes");
        return;
    }
    let names: Vec<&str> = descriptions.iter().map(|d| d.name.as_str()).collect();
    println!("Extra bytes attributes: {:?}", names);

    for point in reader.into_iter().take(10) {
        let point = point.expect("Unable to read point");
        for description in &descriptions {
            let values = description
                .values(&point)
                .expect("Unable to read extra bytes");
            println!("{} -> {:?}", description.name, values);
        }
    }
}
