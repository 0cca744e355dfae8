//! Text processing: cleaning, term normalization, segmentation

pub mod cleaner;
pub mod normalizer;
mod segmenter;

pub use cleaner::clean;
pub use normalizer::{expand_abbreviations, normalize, normalize_units};
pub use segmenter::SentenceSegmenter;
