//! Caller-owned documents and their JSON Lines ingestion format.

pub mod document;
pub mod jsonl;

pub use document::{DocId, Document, DocumentBuilder, Field};
pub use jsonl::JsonlDocumentReader;
