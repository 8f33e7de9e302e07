//! BoxId grid (spec.md §4.5): a fixed global grid of coarse tiles, each
//! fingerprinted relative to an area as "fully inside" (positive) or
//! "touched" (negative). Grounded on the teacher's `lutmorton` Morton-code
//! table, reused unchanged for tile interleaving.
//!
//! Deviation from spec.md's illustrative "65 536 tiles along each axis":
//! with 16 bits per axis the interleaved Morton code needs the full 32 bits
//! and can't be carried as a signed magnitude in `i32`. This grid uses 15
//! bits per axis (32 768 tiles/axis) so the Morton code fits in 30 bits,
//! leaving the sign bit free for the inside/touched flag. Recorded in
//! DESIGN.md.

pub mod serialize;

use std::collections::HashMap;

use geo::BooleanOps;
use rel_geom::{Envelope, Geom, MultiPolygon};

pub use serialize::{read_cutouts, write_cutouts};

pub const GRID_AXIS_BITS: u32 = 15;
pub const GRID_AXIS_TILES: u32 = 1 << GRID_AXIS_BITS;

const LON_MIN: f64 = -180.0;
const LON_SPAN: f64 = 360.0;
const LAT_MIN: f64 = -90.0;
const LAT_SPAN: f64 = 180.0;

/// Signed tile fingerprint: positive magnitude = fully inside the area,
/// negative magnitude = only partially covered ("touched").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoxId(i32);

impl BoxId {
    pub fn inside(tile: u32) -> Self {
        BoxId(tile as i32)
    }

    pub fn partial(tile: u32) -> Self {
        BoxId(-(tile as i32))
    }

    pub fn is_inside(self) -> bool {
        self.0 > 0
    }

    pub fn magnitude(self) -> u32 {
        self.0.unsigned_abs()
    }

    pub fn raw(self) -> i32 {
        self.0
    }
}

/// A `BoxIdList` is kept sorted by `|tile_index|` (spec.md §3) so shortcuts
/// can binary-search it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxIdList(Vec<BoxId>);

impl BoxIdList {
    pub fn new() -> Self {
        BoxIdList(Vec::new())
    }

    pub fn push(&mut self, id: BoxId) {
        let pos = self
            .0
            .partition_point(|existing| existing.magnitude() < id.magnitude());
        self.0.insert(pos, id);
    }

    pub fn iter(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.0.iter().copied()
    }

    pub fn find(&self, tile: u32) -> Option<BoxId> {
        let pos = self.0.partition_point(|existing| existing.magnitude() < tile);
        self.0[pos..]
            .iter()
            .take_while(|existing| existing.magnitude() == tile)
            .copied()
            .next()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Cheap disjointness check: if no tile magnitude is shared between the
    /// two lists, the geometries cannot intersect (spec.md §4.5). This is a
    /// sufficient, not necessary, condition for disjointness.
    pub fn magnitudes_disjoint(&self, other: &BoxIdList) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            let (a, b) = (self.0[i].magnitude(), other.0[j].magnitude());
            if a == b {
                return false;
            } else if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        true
    }
}

fn to_tile_coords(lon: f64, lat: f64) -> (u32, u32) {
    let x = (((lon - LON_MIN) / LON_SPAN) * GRID_AXIS_TILES as f64)
        .clamp(0.0, (GRID_AXIS_TILES - 1) as f64) as u32;
    let y = (((lat - LAT_MIN) / LAT_SPAN) * GRID_AXIS_TILES as f64)
        .clamp(0.0, (GRID_AXIS_TILES - 1) as f64) as u32;
    (x, y)
}

pub fn tile_id(lon: f64, lat: f64) -> u32 {
    let (x, y) = to_tile_coords(lon, lat);
    lutmorton::morton(x, y) as u32
}

fn tile_envelope(tile: u32) -> Envelope {
    let (x, y) = lutmorton::unmorton(tile as u64);
    let lon0 = LON_MIN + (x as f64 / GRID_AXIS_TILES as f64) * LON_SPAN;
    let lat0 = LAT_MIN + (y as f64 / GRID_AXIS_TILES as f64) * LAT_SPAN;
    let lon1 = LON_MIN + ((x + 1) as f64 / GRID_AXIS_TILES as f64) * LON_SPAN;
    let lat1 = LAT_MIN + ((y + 1) as f64 / GRID_AXIS_TILES as f64) * LAT_SPAN;
    Envelope::new((lon0, lat0), (lon1, lat1))
}

fn tile_polygon(tile: u32) -> geo::Polygon<f64> {
    let env = tile_envelope(tile);
    env.to_polygon()
}

/// Covers every tile whose envelope intersects `envelope`, bounded so a
/// pathologically large area can't blow the cutout cache (spec.md §9's
/// "cap cutout size or fall back" requirement).
pub fn compute_box_ids(
    area: &MultiPolygon,
    envelope: &Envelope,
    max_cutouts: usize,
) -> (BoxIdList, HashMap<i32, MultiPolygon>) {
    let (tx0, ty0) = to_tile_coords(envelope.min().x, envelope.min().y);
    let (tx1, ty1) = to_tile_coords(envelope.max().x, envelope.max().y);

    let tile_count = (tx1 - tx0 + 1) as usize * (ty1 - ty0 + 1) as usize;

    let mut ids = BoxIdList::new();
    let mut cutouts = HashMap::new();

    if tile_count > max_cutouts {
        // Grid too fine relative to this area: skip the shortcut entirely
        // rather than building an unbounded cutout map. Correctness doesn't
        // depend on this grid firing (spec.md §4.5).
        return (ids, cutouts);
    }

    for ty in ty0..=ty1 {
        for tx in tx0..=tx1 {
            let tile = lutmorton::morton(tx, ty) as u32;
            let poly = tile_polygon(tile);
            let tile_mp = MultiPolygon::new(vec![poly.clone()]);

            if !rel_geom::intersects(&Geom::Area(tile_mp.clone()), area) {
                continue;
            }

            if rel_geom::covered_by(&Geom::Area(tile_mp), area) {
                ids.push(BoxId::inside(tile));
            } else {
                ids.push(BoxId::partial(tile));
                let clip = area.intersection(&poly);
                cutouts.insert(-(tile as i32), clip);
            }
        }
    }

    (ids, cutouts)
}

/// Proves `a` covers `b` from their box-id lists alone, returning `None`
/// when the shortcut can't decide and a full geometric predicate is needed.
pub fn covers_shortcut(
    a_ids: &BoxIdList,
    b_ids: &BoxIdList,
    a_cutouts: &HashMap<i32, MultiPolygon>,
    b_cutouts: &HashMap<i32, MultiPolygon>,
) -> Option<bool> {
    if a_ids.is_empty() || b_ids.is_empty() {
        return None;
    }

    for b_id in b_ids.iter() {
        let tile = b_id.magnitude();
        let Some(a_id) = a_ids.find(tile) else {
            // `b` touches/covers a tile `a` has no record for: can't prove.
            return None;
        };

        if b_id.is_inside() {
            // b is fully inside this tile; a must be fully inside too.
            if !a_id.is_inside() {
                return Some(false);
            }
        } else {
            // b only touches this tile: need a's clip to cover b's clip.
            if a_id.is_inside() {
                continue;
            }
            let (Some(a_clip), Some(b_clip)) =
                (a_cutouts.get(&a_id.raw()), b_cutouts.get(&b_id.raw()))
            else {
                return None;
            };
            if !rel_geom::covered_by(&Geom::Area(b_clip.clone()), a_clip) {
                return Some(false);
            }
        }
    }

    Some(true)
}
