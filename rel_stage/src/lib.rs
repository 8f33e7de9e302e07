//! Spatial staging store (spec.md §4.6): record shapes plus the three
//! append-only files and in-memory named-area vector that pass 2 writes
//! into and the relation engine streams back out of.

pub mod records;
pub mod serialize;
pub mod store;

pub use records::{union_envelopes, AreaRecord, NodeRecord, WayRecord};
pub use store::StagingStore;
