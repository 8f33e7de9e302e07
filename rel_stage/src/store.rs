//! Spatial staging store (spec.md §4.6): three append-only files for
//! streamed features plus an in-memory vector for named areas. Grounded on
//! the teacher's `open_tree` file-open idiom (`tree/src/lib.rs`):
//! create-if-missing directory, hold a read+write handle during staging,
//! then switch to read-only streaming for pass 2.

use std::{io, path::Path};

use parking_lot::Mutex;
use rel_storage::{GeomCache, StreamReader};

use crate::records::{AreaRecord, NodeRecord, WayRecord};

pub struct StagingStore {
    nodes: GeomCache<NodeRecord>,
    ways: GeomCache<WayRecord>,
    areas_unnamed: GeomCache<AreaRecord>,
    named_areas: Mutex<Vec<AreaRecord>>,
}

impl StagingStore {
    pub fn create(temp_dir: impl AsRef<Path>, cache_max_entries: usize) -> io::Result<Self> {
        let dir = temp_dir.as_ref();
        Ok(StagingStore {
            nodes: GeomCache::create(dir.join("nodes"), cache_max_entries)?,
            ways: GeomCache::create(dir.join("ways"), cache_max_entries)?,
            areas_unnamed: GeomCache::create(dir.join("areas_unnamed"), cache_max_entries)?,
            named_areas: Mutex::new(Vec::new()),
        })
    }

    pub fn stage_node(&self, rec: NodeRecord) -> io::Result<u64> {
        self.nodes.add(rec)
    }

    pub fn stage_way(&self, rec: WayRecord) -> io::Result<u64> {
        self.ways.add(rec)
    }

    pub fn stage_unnamed_area(&self, rec: AreaRecord) -> io::Result<u64> {
        self.areas_unnamed.add(rec)
    }

    /// Appends to the in-memory named-area vector, returning the index the
    /// area DAG will use as its internal vertex id.
    pub fn stage_named_area(&self, rec: AreaRecord) -> usize {
        let mut guard = self.named_areas.lock();
        let idx = guard.len();
        guard.push(rec);
        idx
    }

    pub fn node_cache(&self) -> &GeomCache<NodeRecord> {
        &self.nodes
    }

    pub fn way_cache(&self) -> &GeomCache<WayRecord> {
        &self.ways
    }

    pub fn unnamed_area_cache(&self) -> &GeomCache<AreaRecord> {
        &self.areas_unnamed
    }

    /// Flushes every append log: must be called once staging (pass 2's
    /// write side) is complete and before any streaming reader is opened.
    pub fn flush(&self) -> io::Result<()> {
        self.nodes.flush()?;
        self.ways.flush()?;
        self.areas_unnamed.flush()
    }

    pub fn stream_nodes(&self) -> io::Result<StreamReader<NodeRecord>> {
        StreamReader::open(self.nodes.path(), self.nodes.len_bytes())
    }

    pub fn stream_ways(&self) -> io::Result<StreamReader<WayRecord>> {
        StreamReader::open(self.ways.path(), self.ways.len_bytes())
    }

    pub fn stream_unnamed_areas(&self) -> io::Result<StreamReader<AreaRecord>> {
        StreamReader::open(self.areas_unnamed.path(), self.areas_unnamed.len_bytes())
    }

    /// Takes ownership of the named-area vector, freezing it for the DAG
    /// build phase (spec.md §4.7.3 "Sort named areas... build id→index").
    pub fn take_named_areas(&self) -> Vec<AreaRecord> {
        std::mem::take(&mut self.named_areas.lock())
    }

    pub fn named_area_count(&self) -> usize {
        self.named_areas.lock().len()
    }
}
