use geo::{EuclideanLength, Simplify as GeoSimplify};

use crate::MultiPolygon;

/// `simplify(g, t)` with `t = base_factor * max(perimeter, length) * level`.
/// Douglas-Peucker (`geo::Simplify`) is retried with halved tolerance until a
/// valid non-empty result is found or `t < 1`, at which point the original
/// geometry is returned unchanged (spec.md §4.1).
pub fn simplify(g: &MultiPolygon, base_factor: f64, level: f64) -> MultiPolygon {
    let perimeter: f64 = g
        .iter()
        .map(|poly| {
            let ext: f64 = poly.exterior().euclidean_length();
            let interiors: f64 = poly.interiors().iter().map(|r| r.euclidean_length()).sum();
            ext + interiors
        })
        .sum();

    let mut t = base_factor * perimeter * level;

    loop {
        if t < 1.0 {
            return g.clone();
        }

        let candidate = g.simplify(&t);

        if is_valid_nonempty(&candidate) {
            return candidate;
        }

        t /= 2.0;
    }
}

fn is_valid_nonempty(g: &MultiPolygon) -> bool {
    if g.0.is_empty() {
        return false;
    }
    g.iter().all(|poly| {
        poly.exterior().0.len() >= 4 && crate::predicates::validate_ring(&poly.exterior().0).is_ok()
    })
}
