//! Global configuration (spec.md §6.3, §9 "one frozen configuration threaded
//! through all components by reference"), plus the two ambient fields
//! `skip_admin_on_admin` and `max_cutouts_per_area` supplemented from the
//! original C++ source (see SPEC_FULL.md §4.7/§4.5).

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub no_area_geom_relations: bool,
    pub no_node_geom_relations: bool,
    pub no_way_geom_relations: bool,
    pub min_area_envelope_ratio: f64,
    /// `None` disables pre-emission simplification; `Some(level)` is
    /// spec.md §4.1's `simplification_level` multiplier.
    pub simplify_geometries: Option<f64>,
    /// 0 = rayon's own default thread count.
    pub num_threads: usize,
    pub cache_max_entries: usize,
    pub temp_dir: PathBuf,
    /// Admin-boundary-on-admin-boundary filtering supplement: when `true`,
    /// an admin-tagged probe area skips intersects/contains checks against
    /// admin-tagged candidates. Defaults to `false` so default behavior
    /// matches spec.md's unconditional description.
    pub skip_admin_on_admin: bool,
    /// Cap on a single area's BoxId cutout map (spec.md §9); above this the
    /// shortcut is abandoned for that area rather than built unbounded.
    pub max_cutouts_per_area: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            no_area_geom_relations: false,
            no_node_geom_relations: false,
            no_way_geom_relations: false,
            min_area_envelope_ratio: 0.0,
            simplify_geometries: None,
            num_threads: 0,
            cache_max_entries: 4096,
            temp_dir: std::env::temp_dir(),
            skip_admin_on_admin: false,
            max_cutouts_per_area: 4096,
        }
    }
}
