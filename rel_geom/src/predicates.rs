use geo::{Intersects, Relate};

use crate::{Envelope, GeometryError, LineString, MultiPolygon, Point};

/// The geometry shape of a "probe" feature: a node, a way, or an (unnamed)
/// area. Named-area-vs-named-area checks go through `covered_by`/`equals`
/// directly on `MultiPolygon`, since both sides of a DAG edge are areas.
#[derive(Debug, Clone)]
pub enum Geom {
    Point(Point<f64>),
    Line(LineString<f64>),
    Area(MultiPolygon),
}

/// OGC `covers`: a covers b iff every point of b lies in a, including shared
/// boundary points. This is deliberately not `geo`'s `Contains` trait, whose
/// boundary handling does not match OGC `covers` for every geometry pair;
/// the DE-9IM relate matrix is used directly so the semantics spec.md §4.1
/// asks for are explicit rather than inherited from `Contains`'s own rules.
pub fn covered_by(probe: &Geom, area: &MultiPolygon) -> bool {
    let matrix = match probe {
        Geom::Point(p) => p.relate(area),
        Geom::Line(l) => l.relate(area),
        Geom::Area(a) => a.relate(area),
    };
    matrix.is_covered_by()
}

/// `intersects(p.geom, a.geom)`.
pub fn intersects(probe: &Geom, area: &MultiPolygon) -> bool {
    match probe {
        Geom::Point(p) => p.intersects(area),
        Geom::Line(l) => l.intersects(area),
        Geom::Area(a) => a.intersects(area),
    }
}

/// Area-vs-area `covered_by`, used by the DAG build (§4.7.3).
pub fn area_covered_by(inner: &MultiPolygon, outer: &MultiPolygon) -> bool {
    covered_by(&Geom::Area(inner.clone()), outer)
}

/// Topological equality: `a` and `b` cover each other. When this holds the
/// DAG build suppresses the edge (spec.md §3 invariant, §8 scenario 5).
pub fn equals(a: &MultiPolygon, b: &MultiPolygon) -> bool {
    a.relate(b).is_equal_topo()
}

/// Envelope `covered_by`: `a` fully contains `b` (shared edges count as
/// covered, matching the `BoundingBox::contains` convention this is
/// grounded on).
pub fn covered_by_envelope(b: &Envelope, a: &Envelope) -> bool {
    a.min().x <= b.min().x && a.min().y <= b.min().y && a.max().x >= b.max().x && a.max().y >= b.max().y
}

pub fn envelopes_intersect(a: &Envelope, b: &Envelope) -> bool {
    a.min().x <= b.max().x && a.max().x >= b.min().x && a.min().y <= b.max().y && a.max().y >= b.min().y
}

/// Validates that a ring-like geometry has at least three unique vertices.
pub fn validate_ring(coords: &[geo::Coord<f64>]) -> Result<(), GeometryError> {
    let mut uniq = coords.to_vec();
    uniq.dedup_by(|a, b| a.x == b.x && a.y == b.y);
    if uniq.len() < 3 {
        return Err(GeometryError::Invalid);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::polygon;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon {
        MultiPolygon::new(vec![polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
            (x: x0, y: y0),
        ]])
    }

    #[test]
    fn disjoint_squares_neither_cover_nor_intersect() {
        let a = square(48.0, 7.5, 48.1, 7.6);
        let b = square(40.0, 7.5, 40.1, 7.6);

        assert!(!intersects(&Geom::Area(a.clone()), &b));
        assert!(!area_covered_by(&a, &b));
    }

    #[test]
    fn nested_squares_cover() {
        let inner = square(48.0, 7.51, 48.1, 7.61);
        let outer = square(40.0, 7.0, 50.0, 8.0);

        assert!(area_covered_by(&inner, &outer));
        assert!(!area_covered_by(&outer, &inner));
    }

    #[test]
    fn identical_rings_are_equal() {
        let a = square(48.0, 7.51, 48.1, 7.61);
        let b = square(48.0, 7.51, 48.1, 7.61);

        assert!(equals(&a, &b));
    }

    #[test]
    fn point_inside_area_is_covered() {
        let area = square(48.0, 7.51, 48.1, 7.61);
        let p = Geom::Point(Point::new(48.05, 7.56));

        assert!(covered_by(&p, &area));
    }

    #[test]
    fn point_on_boundary_is_covered_not_strictly_contained() {
        let area = square(48.0, 7.51, 48.1, 7.61);
        let p = Geom::Point(Point::new(48.0, 7.56));

        assert!(covered_by(&p, &area));
    }
}
