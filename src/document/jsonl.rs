//! JSON Lines document reader.
//!
//! Each non-blank line is one document:
//!
//! ```jsonl
//! {"id": 1, "fields": {"title": "The quick fox", "tags": ["animals", "fast"]}}
//! {"id": 2, "fields": {"title": "Lazy dogs", "year": 2024}}
//! ```
//!
//! String values become one field value, arrays become one value per element,
//! numbers and booleans are indexed as their text, and nulls are skipped.

use std::io::BufRead;

use log::warn;
use serde_json::Value;

use crate::document::document::Document;
use crate::error::{Result, SiftError};

/// Reads [`Document`]s from any buffered reader of JSON Lines.
#[derive(Debug, Default, Clone)]
pub struct JsonlDocumentReader;

impl JsonlDocumentReader {
    pub fn new() -> Self {
        JsonlDocumentReader
    }

    /// Read all documents; the first malformed line aborts with its line number.
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let document = self
                .parse_line(&line)
                .map_err(|e| SiftError::other(format!("line {}: {e}", line_no + 1)))?;
            documents.push(document);
        }

        Ok(documents)
    }

    /// Parse a single JSON object into a document.
    pub fn parse_line(&self, line: &str) -> Result<Document> {
        let value: Value = serde_json::from_str(line)?;

        let Value::Object(map) = value else {
            return Err(SiftError::other("expected a JSON object"));
        };

        let id = map
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| SiftError::other("missing or non-integer \"id\""))?;

        let mut document = Document::new(id);

        match map.get("fields") {
            Some(Value::Object(fields)) => {
                for (name, value) in fields {
                    Self::push_value(&mut document, name, value);
                }
            }
            Some(Value::Null) | None => {
                warn!("document {id} has no fields");
            }
            Some(_) => return Err(SiftError::other("\"fields\" must be an object")),
        }

        Ok(document)
    }

    fn push_value(document: &mut Document, name: &str, value: &Value) {
        match value {
            Value::String(s) => document.add_field(name, s.as_str()),
            Value::Number(n) => document.add_field(name, n.to_string()),
            Value::Bool(b) => document.add_field(name, b.to_string()),
            Value::Array(items) => {
                for item in items {
                    Self::push_value(document, name, item);
                }
            }
            Value::Null => {}
            Value::Object(_) => {
                warn!(
                    "document {}: nested object in field {name:?} is not indexable, skipping",
                    document.id()
                );
            }
        }
    }
}
