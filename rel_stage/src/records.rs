//! Staged record shapes (spec.md §3): the exact fields a feature needs once
//! its geometry has already been computed by the (out-of-scope) OSM reader.

use std::collections::HashMap;

use rel_boxid::BoxIdList;
use rel_geom::{Envelope, LineString, MultiPolygon, Point, Polygon};

/// An area as staged during pass 2. `is_admin` backs the admin-on-admin
/// filtering supplement (`Config::skip_admin_on_admin`); it plays no role
/// in spec.md's own described behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRecord {
    pub envelopes: Vec<Envelope>,
    pub id: u64,
    pub obj_id: u64,
    pub from_way: bool,
    pub is_admin: bool,
    pub geom: MultiPolygon,
    pub inner: MultiPolygon,
    pub outer: MultiPolygon,
    pub area: f64,
    pub box_ids: BoxIdList,
    pub cutouts: HashMap<i32, MultiPolygon>,
    pub convex_hull: Polygon<f64>,
    pub obb: Polygon<f64>,
}

impl AreaRecord {
    /// Union of the per-ring envelopes; what the R-tree indexes this area
    /// under (spec.md §3 invariant: "its envelope is present in the R-tree
    /// with the same internal id").
    pub fn envelope(&self) -> Envelope {
        union_envelopes(&self.envelopes)
    }
}

pub fn union_envelopes(envelopes: &[Envelope]) -> Envelope {
    let mut iter = envelopes.iter();
    let first = *iter.next().expect("area record has at least one envelope");
    iter.fold(first, |acc, env| {
        Envelope::new(
            (acc.min().x.min(env.min().x), acc.min().y.min(env.min().y)),
            (acc.max().x.max(env.max().x), acc.max().y.max(env.max().y)),
        )
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct WayRecord {
    pub envelope: Envelope,
    pub id: u64,
    pub geom: LineString<f64>,
    pub node_ids: Vec<u64>,
    pub sub_envelopes: Vec<Envelope>,
    pub box_ids: BoxIdList,
    pub convex_hull: Polygon<f64>,
    pub obb: Polygon<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub envelope: Envelope,
    pub id: u64,
    pub geom: Point<f64>,
}
