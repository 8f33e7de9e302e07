//! Oriented (minimum-area) bounding box via rotating calipers over the
//! convex hull. `geo` has no OBB algorithm; this is a direct implementation
//! of the standard rotating-calipers method, stored as a closed 5-point
//! polygon per spec.md §3.

use crate::{Coord, Polygon};

pub fn obb(hull: &Polygon<f64>) -> Polygon<f64> {
    let ring = &hull.exterior().0;

    // A degenerate hull (point or segment) has no orientation to find.
    if ring.len() < 4 {
        return hull.clone();
    }

    let pts = &ring[..ring.len() - 1];

    let mut best_area = f64::INFINITY;
    let mut best: Option<[Coord<f64>; 4]> = None;

    for i in 0..pts.len() {
        let p1 = pts[i];
        let p2 = pts[(i + 1) % pts.len()];

        let edge = Coord {
            x: p2.x - p1.x,
            y: p2.y - p1.y,
        };
        let len = (edge.x * edge.x + edge.y * edge.y).sqrt();
        if len == 0.0 {
            continue;
        }
        let ux = edge.x / len;
        let uy = edge.y / len;

        // project every hull point onto the (u, v) axes defined by this edge
        let mut min_u = f64::INFINITY;
        let mut max_u = f64::NEG_INFINITY;
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;

        for p in pts {
            let dx = p.x - p1.x;
            let dy = p.y - p1.y;
            let u = dx * ux + dy * uy;
            let v = dx * (-uy) + dy * ux;

            min_u = min_u.min(u);
            max_u = max_u.max(u);
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }

        let area = (max_u - min_u) * (max_v - min_v);

        if area < best_area {
            best_area = area;

            let corner = |u: f64, v: f64| Coord {
                x: p1.x + u * ux - v * uy,
                y: p1.y + u * uy + v * ux,
            };

            best = Some([
                corner(min_u, min_v),
                corner(max_u, min_v),
                corner(max_u, max_v),
                corner(min_u, max_v),
            ]);
        }
    }

    match best {
        Some([a, b, c, d]) => Polygon::new(vec![a, b, c, d, a].into(), vec![]),
        None => hull.clone(),
    }
}
