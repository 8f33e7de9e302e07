//! Triple sink adapter (spec.md §4.8): the narrow capability the
//! surrounding fact writer exposes to the engine.

pub trait TripleSink: Send + Sync {
    fn write_triple(&self, subject: &str, predicate: &str, object: &str);
}

/// An in-memory sink, mainly for tests: collects every emitted triple
/// behind a lock (spec.md §5's "single per-sink lock or sharded output
/// streams" resource discipline).
#[derive(Default)]
pub struct VecSink {
    triples: parking_lot::Mutex<Vec<(String, String, String)>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_triples(self) -> Vec<(String, String, String)> {
        self.triples.into_inner()
    }

    pub fn triples(&self) -> Vec<(String, String, String)> {
        self.triples.lock().clone()
    }
}

impl TripleSink for VecSink {
    fn write_triple(&self, subject: &str, predicate: &str, object: &str) {
        self.triples
            .lock()
            .push((subject.to_string(), predicate.to_string(), object.to_string()));
    }
}
