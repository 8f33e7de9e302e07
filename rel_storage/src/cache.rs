//! Per-thread LRU over deserialized values read from an [`AppendLog`].
//! Each worker thread owns its own read handle and its own LRU (spec.md
//! §4.2, §9): "Per-thread mutable state... a global map keyed by thread
//! identity is error-prone" — so rather than a `HashMap<ThreadId, _>`
//! guarded by a lock, this uses the `thread_local` crate's `ThreadLocal<T>`,
//! which gives every thread its own slot with no shared lock on the hot
//! path. The LRU eviction order itself (move-to-front on hit, evict from
//! back) is adapted from the teacher's `lru_cache::TopNHeap`, generalized
//! from a const-generic capacity to a runtime `max_size` so it can honor
//! `Config::cache_max_entries`.

use std::{
    cell::RefCell,
    collections::VecDeque,
    fs::File,
    io::{Seek, SeekFrom},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use thread_local::ThreadLocal;

use crate::{
    serialize_min::DeserializeFromMinimal,
    writer::AppendLog,
};

struct ThreadState<W> {
    reader: File,
    lru: VecDeque<(u64, Arc<W>)>,
}

/// Shared, append-only writer plus a per-thread read-side LRU cache.
pub struct GeomCache<W> {
    log: AppendLog<W>,
    max_size: usize,
    state: ThreadLocal<RefCell<ThreadState<W>>>,
    cache_hits: AtomicU64,
    disk_reads: AtomicU64,
}

impl<W> GeomCache<W>
where
    W: for<'s> crate::serialize_min::SerializeMinimal<ExternalData<'s> = ()>
        + for<'d> DeserializeFromMinimal<ExternalData<'d> = ()>,
{
    pub fn create(path: impl AsRef<std::path::Path>, max_size: usize) -> std::io::Result<Self> {
        Ok(Self {
            log: AppendLog::create(path)?,
            max_size,
            state: ThreadLocal::new(),
            cache_hits: AtomicU64::new(0),
            disk_reads: AtomicU64::new(0),
        })
    }

    /// Appends `val` and prewarms the calling thread's LRU with it, so that
    /// thread's first `get()` never touches disk (spec.md §4.2 invariant).
    pub fn add(&self, val: W) -> std::io::Result<u64> {
        let offset = self.log.add(&val)?;

        let arc = Arc::new(val);
        let mut state = self.thread_state()?;
        push_front(&mut state.lru, self.max_size, offset, arc);

        Ok(offset)
    }

    pub fn flush(&self) -> std::io::Result<()> {
        self.log.flush()
    }

    /// Shared-ownership fetch of the value at `offset`. On a cache miss the
    /// value is deserialized from this thread's private read handle,
    /// installed at the front of this thread's LRU, and the
    /// least-recently-used entry is evicted if the thread is over
    /// `max_size`.
    pub fn get(&self, offset: u64) -> std::io::Result<Arc<W>> {
        let mut state = self.thread_state()?;

        if let Some(pos) = state.lru.iter().position(|(o, _)| *o == offset) {
            let entry = state.lru.remove(pos).unwrap();
            let value = Arc::clone(&entry.1);
            state.lru.push_front(entry);
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value);
        }

        self.disk_reads.fetch_add(1, Ordering::Relaxed);

        state.reader.seek(SeekFrom::Start(offset))?;
        let value = Arc::new(W::deserialize_minimal(&mut state.reader, ())?);

        push_front(&mut state.lru, self.max_size, offset, Arc::clone(&value));

        Ok(value)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn disk_reads(&self) -> u64 {
        self.disk_reads.load(Ordering::Relaxed)
    }

    fn thread_state(&self) -> std::io::Result<std::cell::RefMut<'_, ThreadState<W>>> {
        let cell = self.state.get_or_try(|| {
            self.log.flush()?;
            let reader = File::open(self.log.path())?;
            std::io::Result::Ok(RefCell::new(ThreadState {
                reader,
                lru: VecDeque::with_capacity(self.max_size.min(1024)),
            }))
        })?;
        Ok(cell.borrow_mut())
    }
}

fn push_front<W>(lru: &mut VecDeque<(u64, Arc<W>)>, max_size: usize, offset: u64, value: Arc<W>) {
    if let Some(pos) = lru.iter().position(|(o, _)| *o == offset) {
        lru.remove(pos);
    }
    lru.push_front((offset, value));
    while lru.len() > max_size.max(1) {
        lru.pop_back();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_prewarms_so_first_get_is_free() {
        let dir = tempfile::tempdir().unwrap();
        let cache = GeomCache::<u64>::create(dir.path().join("vals"), 8).unwrap();

        let offset = cache.add(42).unwrap();
        assert_eq!(*cache.get(offset).unwrap(), 42);
        assert_eq!(cache.disk_reads(), 0);
        assert_eq!(cache.cache_hits(), 1);
    }

    #[test]
    fn eviction_respects_max_size() {
        let dir = tempfile::tempdir().unwrap();
        let cache = GeomCache::<u64>::create(dir.path().join("vals"), 2).unwrap();

        let a = cache.add(1).unwrap();
        let _b = cache.add(2).unwrap();
        let _c = cache.add(3).unwrap();

        // `a` was evicted from this thread's LRU by the cap of 2, so
        // fetching it again must go back to disk.
        cache.get(a).unwrap();
        assert!(cache.disk_reads() >= 1);
    }
}
