//! Shared streaming cursor over a flushed [`crate::writer::AppendLog`]
//! (spec.md §4.6): the pass-2 read phase opens one of these per staging
//! file and pulls records under a single cursor lock, so many worker
//! threads drain the same stream without any thread owning the whole file
//! in memory. The lock doubles as the "read lock around the cursor" the
//! spec calls for, since advancing the cursor and reading the record are
//! the same critical section.

use std::{
    fs::File,
    io::{self, Seek},
    path::Path,
};

use parking_lot::Mutex;

use crate::serialize_min::DeserializeFromMinimal;

pub struct StreamReader<W> {
    file: Mutex<File>,
    len: u64,
    _marker: std::marker::PhantomData<fn() -> W>,
}

impl<W> StreamReader<W>
where
    W: for<'d> DeserializeFromMinimal<ExternalData<'d> = ()>,
{
    pub fn open(path: impl AsRef<Path>, len: u64) -> io::Result<Self> {
        Ok(StreamReader {
            file: Mutex::new(File::open(path)?),
            len,
            _marker: std::marker::PhantomData,
        })
    }

    /// Pulls and deserializes the next record, advancing the shared cursor.
    /// Returns `None` once the cursor reaches the recorded end-of-file
    /// length (the length is captured before streaming starts, so a
    /// concurrent writer - which never happens in pass 2 - couldn't race
    /// this instance's idea of "end").
    pub fn next_record(&self) -> io::Result<Option<(u64, W)>> {
        let mut file = self.file.lock();
        let offset = file.stream_position()?;
        if offset >= self.len {
            return Ok(None);
        }
        let val = W::deserialize_minimal(&mut *file, ())?;
        Ok(Some((offset, val)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::writer::AppendLog;

    #[test]
    fn streams_every_record_once_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = AppendLog::<u64>::create(dir.path().join("vals")).unwrap();
        for v in [10u64, 20, 30] {
            log.add(&v).unwrap();
        }
        log.flush().unwrap();

        let reader = StreamReader::<u64>::open(log.path(), log.len_bytes()).unwrap();
        let mut seen = Vec::new();
        while let Some((_, v)) = reader.next_record().unwrap() {
            seen.push(v);
        }
        assert_eq!(seen, vec![10, 20, 30]);
        assert!(reader.next_record().unwrap().is_none());
    }
}
