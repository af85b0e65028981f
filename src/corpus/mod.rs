//! Corpus module
//!
//! Static reference data: the ordered section list and the text of every
//! column of the scroll.
//!
//! # Example
//!
//! ```rust,no_run
//! use scroll_locator::{CorpusPaths, CorpusStore, Normalizer};
//!
//! let paths = CorpusPaths::new("data/sections.json", "data/columns.json");
//! let corpus = CorpusStore::load(&paths, &Normalizer::hebrew()).unwrap();
//! println!("{} sections, {} columns", corpus.section_count(), corpus.column_count());
//! ```

// Submodules
mod store;
mod types;

// Re-export public API
pub use store::CorpusStore;
pub use types::{
    CorpusError, CorpusPaths, ReferenceColumn, Result, Section, DEFAULT_COLUMNS_FILE,
    DEFAULT_SECTIONS_FILE, FUZZY_SECTION_THRESHOLD,
};
