//! Index store: configuration, postings, the inverted index and its
//! thread-safe handle.

pub mod config;
pub mod inverted;
pub mod posting;
pub mod search_index;
pub mod snapshot;

pub use config::IndexConfig;
pub use inverted::{DocumentPostings, IndexStats, InvertedIndex};
pub use posting::{Posting, PostingList};
pub use search_index::SearchIndex;
