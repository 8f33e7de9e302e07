//! Bulk-loaded spatial index over named-area envelopes (spec.md §4.6),
//! grounded on `novelt-building-aggregation-tool`'s `RTreeIndexObject`
//! pattern (`fast_intersection/src/cmd_intersect.rs`): a small `RTreeObject`
//! wrapper carrying an opaque id plus an `AABB`, built once with
//! `RTree::bulk_load` and then only ever queried, never mutated.

use rel_geom::Envelope;
use rstar::{RTree, RTreeObject, AABB};

/// One indexed entry: an opaque id (an area/node/way key from the staging
/// store) paired with its envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry<T> {
    id: T,
    aabb: AABB<[f64; 2]>,
}

impl<T: Clone> RTreeObject for Entry<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

fn to_aabb(env: &Envelope) -> AABB<[f64; 2]> {
    AABB::from_corners([env.min().x, env.min().y], [env.max().x, env.max().y])
}

fn to_envelope(aabb: &AABB<[f64; 2]>) -> Envelope {
    let lo = aabb.lower();
    let hi = aabb.upper();
    Envelope::new((lo[0], lo[1]), (hi[0], hi[1]))
}

/// Read-only spatial index: built once from every candidate's envelope,
/// then queried for overlap candidates during relation computation
/// (spec.md §4.7).
pub struct RTreeIndex<T: Clone> {
    tree: RTree<Entry<T>>,
}

impl<T: Clone> RTreeIndex<T> {
    pub fn build(items: impl IntoIterator<Item = (T, Envelope)>) -> Self {
        let entries: Vec<Entry<T>> = items
            .into_iter()
            .map(|(id, env)| Entry {
                id,
                aabb: to_aabb(&env),
            })
            .collect();
        RTreeIndex {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Every indexed id whose envelope intersects `env`. This is a coarse
    /// candidate set; callers still run the exact predicate (spec.md §4.6).
    pub fn query_envelope<'a>(&'a self, env: &Envelope) -> impl Iterator<Item = &'a T> + 'a {
        let aabb = to_aabb(env);
        self.tree
            .locate_in_envelope_intersecting(&aabb)
            .map(|e| &e.id)
    }

    /// Every indexed id whose envelope fully covers `env` (spec.md §4.3's
    /// `covers_query`). `rstar` has no native "covers" query, so this
    /// filters the intersecting candidates by full envelope containment.
    pub fn covers_query<'a>(&'a self, env: &'a Envelope) -> impl Iterator<Item = &'a T> + 'a {
        let aabb = to_aabb(env);
        self.tree
            .locate_in_envelope_intersecting(&aabb)
            .filter_map(move |entry| {
                let candidate_env = to_envelope(&entry.aabb);
                rel_geom::covered_by_envelope(env, &candidate_env).then_some(&entry.id)
            })
    }

    /// All `(id, envelope)` pairs, e.g. to rebuild a reverse lookup.
    pub fn iter(&self) -> impl Iterator<Item = (&T, Envelope)> + '_ {
        self.tree.iter().map(|e| (&e.id, to_envelope(&e.aabb)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn query_finds_overlapping_envelopes_only() {
        let a = Envelope::new((0.0, 0.0), (1.0, 1.0));
        let b = Envelope::new((5.0, 5.0), (6.0, 6.0));
        let index = RTreeIndex::build([(1u64, a), (2u64, b)]);

        let probe = Envelope::new((0.5, 0.5), (0.6, 0.6));
        let hits: Vec<u64> = index.query_envelope(&probe).copied().collect();
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn empty_index_returns_no_hits() {
        let index: RTreeIndex<u64> = RTreeIndex::build(std::iter::empty());
        let probe = Envelope::new((0.0, 0.0), (1.0, 1.0));
        assert_eq!(index.query_envelope(&probe).count(), 0);
    }

    #[test]
    fn covers_query_excludes_merely_intersecting_envelopes() {
        let outer = Envelope::new((0.0, 0.0), (10.0, 10.0));
        let sibling = Envelope::new((5.0, 5.0), (20.0, 20.0));
        let index = RTreeIndex::build([(1u64, outer), (2u64, sibling)]);

        let probe = Envelope::new((1.0, 1.0), (2.0, 2.0));
        let hits: Vec<u64> = index.covers_query(&probe).copied().collect();
        assert_eq!(hits, vec![1]);
    }
}
