//! Storage abstraction layer for index snapshots.
//!
//! The index core does no I/O of its own. When a caller wants durability it
//! hands a [`Storage`] backend to
//! [`SearchIndex::save`](crate::index::SearchIndex::save) and
//! [`SearchIndex::load`](crate::index::SearchIndex::load).
//!
//! # Storage Types
//!
//! - [`file::FileStorage`] - one file per name inside a directory; writes are
//!   staged in a temporary file and renamed into place on close.
//! - [`memory::MemoryStorage`] - in-memory map, for tests and caching.
//!
//! # Example
//!
//! ```
//! use std::io::{Read, Write};
//!
//! use sift::storage::Storage;
//! use sift::storage::memory::MemoryStorage;
//!
//! # fn main() -> sift::error::Result<()> {
//! let storage = MemoryStorage::new();
//!
//! let mut output = storage.create_output("index.bin")?;
//! output.write_all(b"test data")?;
//! output.close()?;
//!
//! let mut input = storage.open_input("index.bin")?;
//! let mut buffer = Vec::new();
//! input.read_to_end(&mut buffer)?;
//! assert_eq!(buffer, b"test data");
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};

use crate::error::Result;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A trait for storage backends that can store and retrieve named blobs.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Open an existing file for reading.
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>>;

    /// Create (or replace) a file for writing.
    ///
    /// The new content becomes visible once the returned output is closed.
    fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>>;

    fn file_exists(&self, name: &str) -> bool;

    fn delete_file(&self, name: &str) -> Result<()>;

    /// List stored names in sorted order.
    fn list_files(&self) -> Result<Vec<String>>;

    fn file_size(&self, name: &str) -> Result<u64>;
}

/// Readable handle returned by [`Storage::open_input`].
pub trait StorageInput: Read + Send + std::fmt::Debug {
    /// Total size of the underlying file in bytes.
    fn size(&self) -> Result<u64>;
}

/// Writable handle returned by [`Storage::create_output`].
pub trait StorageOutput: Write + Send + std::fmt::Debug {
    /// Flush and publish the written bytes under the output's name.
    fn close(&mut self) -> Result<()>;
}
