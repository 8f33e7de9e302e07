pub mod cache;
pub mod serialize_min;
pub mod stream;
pub mod writer;

pub use cache::GeomCache;
pub use serialize_min::{DeserializeFromMinimal, SerializeMinimal};
pub use stream::StreamReader;
pub use writer::AppendLog;
