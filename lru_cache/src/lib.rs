pub mod topn;

pub use topn::TopNHeap;
