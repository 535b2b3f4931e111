//! Raw structures that map directly onto structures as defined in the las format specifications.
//!
//! In general, these structures are "dumb", meaning that they do the least amount of validity
//! checking. For example:
//!
//! ```
//! let raw_header = las_stream::raw::Header::default();
//! assert_eq!(0, raw_header.number_of_point_records);
//!
//! let header = las_stream::Header::default();
//! assert_eq!(las_stream::Version::new(1, 2), header.version());
//! ```
//!
//! Users should prefer the non-raw versions, e.g. `las_stream::Header` over
//! `las_stream::raw::Header`, since those enforce the rules of the format.

pub mod header;
pub mod point;
pub mod vlr;

pub use self::header::Header;
pub use self::point::Point;
pub use self::vlr::Vlr;

/// The file magic number used for all las files.
pub const LASF: [u8; 4] = *b"LASF";

/// The point data start signature required by las 1.0.
pub const POINT_DATA_START_SIGNATURE: [u8; 2] = [0xDD, 0xCC];
