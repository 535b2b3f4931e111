//! Spatial predicates evaluated while points are streamed.
//!
//! A [Reader](crate::Reader) checks its filter against the x and y of each record before decoding
//! the rest of it, so rejected points are never built.
//!
//! ```
//! use las_stream::SpatialFilter;
//! let filter = SpatialFilter::Tile { ll_x: 0., ll_y: 0., size: 10. };
//! assert!(filter.accepts(0., 9.99));
//! assert!(!filter.accepts(10., 5.));
//! ```

use crate::Bounds;

/// A region in the xy plane, in real world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SpatialFilter {
    /// Every point is accepted.
    #[default]
    None,

    /// A square with its lower left corner at `(ll_x, ll_y)`, half-open on the upper edges.
    Tile {
        /// The x of the lower left corner.
        ll_x: f64,
        /// The y of the lower left corner.
        ll_y: f64,
        /// The side length.
        size: f64,
    },

    /// A closed rectangle.
    Rectangle {
        /// The minimum x.
        min_x: f64,
        /// The minimum y.
        min_y: f64,
        /// The maximum x.
        max_x: f64,
        /// The maximum y.
        max_y: f64,
    },

    /// A closed disc.
    Circle {
        /// The x of the center.
        center_x: f64,
        /// The y of the center.
        center_y: f64,
        /// The radius.
        radius: f64,
    },
}

impl SpatialFilter {
    /// Returns true if this filter accepts a point at `(x, y)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::SpatialFilter;
    /// let filter = SpatialFilter::Circle { center_x: 0., center_y: 0., radius: 5. };
    /// assert!(filter.accepts(3., 4.));
    /// assert!(!filter.accepts(3., 4.1));
    /// assert!(SpatialFilter::None.accepts(f64::MAX, f64::MIN));
    /// ```
    pub fn accepts(&self, x: f64, y: f64) -> bool {
        match *self {
            SpatialFilter::None => true,
            SpatialFilter::Tile { ll_x, ll_y, size } => {
                x >= ll_x && x < ll_x + size && y >= ll_y && y < ll_y + size
            }
            SpatialFilter::Rectangle {
                min_x,
                min_y,
                max_x,
                max_y,
            } => x >= min_x && x <= max_x && y >= min_y && y <= max_y,
            SpatialFilter::Circle {
                center_x,
                center_y,
                radius,
            } => {
                let dx = x - center_x;
                let dy = y - center_y;
                dx * dx + dy * dy <= radius * radius
            }
        }
    }

    /// Returns true if this filter might accept a point inside these bounds.
    ///
    /// Empty bounds intersect nothing, except for [SpatialFilter::None].
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::{Bounds, SpatialFilter, Vector};
    /// let bounds = Bounds {
    ///     min: Vector { x: 0., y: 0., z: 0. },
    ///     max: Vector { x: 10., y: 10., z: 0. },
    /// };
    /// let filter = SpatialFilter::Rectangle { min_x: 5., min_y: 5., max_x: 20., max_y: 20. };
    /// assert!(filter.intersects(&bounds));
    /// let filter = SpatialFilter::Tile { ll_x: 10., ll_y: 0., size: 5. };
    /// assert!(filter.intersects(&bounds));
    /// let filter = SpatialFilter::Circle { center_x: 20., center_y: 20., radius: 1. };
    /// assert!(!filter.intersects(&bounds));
    /// ```
    pub fn intersects(&self, bounds: &Bounds) -> bool {
        if let SpatialFilter::None = self {
            return true;
        }
        if bounds.is_empty() {
            return false;
        }
        let (min, max) = (bounds.min, bounds.max);
        match *self {
            SpatialFilter::None => true,
            SpatialFilter::Tile { ll_x, ll_y, size } => {
                ll_x <= max.x && ll_x + size > min.x && ll_y <= max.y && ll_y + size > min.y
            }
            SpatialFilter::Rectangle {
                min_x,
                min_y,
                max_x,
                max_y,
            } => min_x <= max.x && max_x >= min.x && min_y <= max.y && max_y >= min.y,
            SpatialFilter::Circle {
                center_x,
                center_y,
                radius,
            } => {
                let dx = center_x - center_x.clamp(min.x, max.x);
                let dy = center_y - center_y.clamp(min.y, max.y);
                dx * dx + dy * dy <= radius * radius
            }
        }
    }
}
