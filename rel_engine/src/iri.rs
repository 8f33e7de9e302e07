//! IRI and predicate helpers (spec.md §4.8, §6.2): the engine only
//! concatenates `namespace_prefix + id`; prefix management belongs to the
//! sink.

pub mod predicate {
    pub const CONTAINS_AREA: &str = "osm2rdf:contains_area";
    pub const INTERSECTS_AREA: &str = "osm2rdf:intersects_area";
    pub const CONTAINS_NON_AREA: &str = "osm2rdf:contains_non_area";
    pub const INTERSECTS_NON_AREA: &str = "osm2rdf:intersects_non_area";
}

/// `(from_way ? osm_way : osm_relation, obj_id)` (spec.md §4.7.4).
pub fn area_iri(from_way: bool, obj_id: u64) -> String {
    if from_way {
        format!("osm_way:{obj_id}")
    } else {
        format!("osm_relation:{obj_id}")
    }
}

pub fn way_iri(id: u64) -> String {
    format!("osm_way:{id}")
}

pub fn node_iri(id: u64) -> String {
    format!("osm_node:{id}")
}
