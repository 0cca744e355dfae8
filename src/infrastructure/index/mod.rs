//! Vector index clients

mod chroma;

pub use chroma::ChromaVectorStore;
