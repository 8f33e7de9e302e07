//! Geometry primitives and predicates (spec §4.1).
//!
//! Coordinates are WGS-84 longitude/latitude `f64`. `covered_by` implements
//! the OGC `covers` predicate (shared boundary counts as inside), not the
//! stricter `contains`.

pub mod obb;
pub mod predicates;
pub mod serialize;
pub mod simplify;

use geo::{GeodesicArea, MultiPolygon as GeoMultiPolygon};

pub use geo_types::{Coord, LineString, Point, Polygon, Rect};

/// Spec's `Box`: an axis-aligned envelope.
pub type Envelope = Rect<f64>;
pub type MultiPolygon = GeoMultiPolygon<f64>;

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("polygon has fewer than three unique vertices or self-intersects")]
    Invalid,
}

/// Computes the envelope of any geo-types geometry that has a bounding rect.
pub fn envelope<G: geo::BoundingRect<f64, Output = Option<Rect<f64>>>>(
    g: &G,
) -> Result<Envelope, GeometryError> {
    g.bounding_rect().ok_or(GeometryError::Invalid)
}

/// Geodesic area in square meters via the spherical-excess formula.
/// `wkt_precision` never affects this: it is an output-rounding concern only.
pub fn area(polygon: &MultiPolygon) -> f64 {
    polygon.geodesic_area_unsigned()
}

pub fn convex_hull(g: &MultiPolygon) -> Polygon<f64> {
    use geo::ConvexHull;
    g.convex_hull()
}

pub use predicates::{
    area_covered_by, covered_by, covered_by_envelope, envelopes_intersect, equals, intersects, Geom,
};
pub use simplify::simplify;
pub use obb::obb;
