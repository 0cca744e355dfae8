//! Vector index seam, search results, and ranking

mod index;
mod ranker;
mod result;

pub use index::{IndexHit, VectorIndexClient};
pub use ranker::filter_ranked;
pub use result::SearchResult;

#[cfg(test)]
pub use index::mock::MockVectorIndexClient;
