//! Append-only binary store: `add(W) -> offset`, single-writer, serialized
//! during pass 2 (spec.md §4.2). Grounded on the teacher's
//! `minimal_storage::Storage` write discipline (buffer-then-write,
//! `flush()` fsyncs), but append-only rather than rewrite-in-place —
//! `Storage` is a single rewritable cell, which is the wrong shape for a
//! growing log, so this type seeks to end-of-file and appends instead.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;

use crate::serialize_min::SerializeMinimal;

pub struct AppendLog<W> {
    path: PathBuf,
    file: Mutex<File>,
    next_offset: AtomicU64,
    _marker: std::marker::PhantomData<fn() -> W>,
}

impl<W> AppendLog<W>
where
    W: for<'s> SerializeMinimal<ExternalData<'s> = ()>,
{
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::options()
            .create(true)
            .read(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
            next_offset: AtomicU64::new(0),
            _marker: std::marker::PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes `val` and appends it, returning the offset it was written
    /// at. Offsets returned by `add()` remain valid for the lifetime of the
    /// cache (spec.md §3 invariant).
    pub fn add(&self, val: &W) -> io::Result<u64> {
        let mut buf = Vec::new();
        val.minimally_serialize(&mut buf, ())?;

        let mut file = self.file.lock();
        use std::io::Write;
        let offset = self.next_offset.fetch_add(buf.len() as u64, Ordering::AcqRel);
        file.write_all(&buf)?;
        Ok(offset)
    }

    /// Flushes the OS buffer. After this, read-only handles opened on
    /// `path()` see every write made so far.
    pub fn flush(&self) -> io::Result<()> {
        use std::io::Write;
        self.file.lock().flush()
    }

    pub fn len_bytes(&self) -> u64 {
        self.next_offset.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::serialize_min::DeserializeFromMinimal;

    #[test]
    fn offsets_are_stable_and_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let log = AppendLog::<u64>::create(dir.path().join("vals")).unwrap();

        let off_a = log.add(&11u64).unwrap();
        let off_b = log.add(&22u64).unwrap();
        assert!(off_b > off_a);
        log.flush().unwrap();

        let mut f = File::open(log.path()).unwrap();
        use std::io::{Seek, SeekFrom};
        f.seek(SeekFrom::Start(off_a)).unwrap();
        assert_eq!(u64::deserialize_minimal(&mut f, ()).unwrap(), 11);

        f.seek(SeekFrom::Start(off_b)).unwrap();
        assert_eq!(u64::deserialize_minimal(&mut f, ()).unwrap(), 22);
    }
}
