//! Document structure handed to the index.
//!
//! A document is an opaque id plus an ordered list of text fields. The index
//! never keeps the document itself, only the postings derived from it, so the
//! caller resolves ids back into records after a search.

use serde::{Deserialize, Serialize};

/// Opaque document identifier. Ordering is used only to break score ties.
pub type DocId = u64;

/// A single named text value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A document represents a single item to be indexed.
///
/// Fields keep insertion order and a name may repeat, which is how
/// list-valued fields (tags, related titles) are expressed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocId,
    fields: Vec<Field>,
}

impl Document {
    /// Create a new document with no fields.
    pub fn new(id: DocId) -> Self {
        Document {
            id,
            fields: Vec::new(),
        }
    }

    pub fn id(&self) -> DocId {
        self.id
    }

    /// Append a text value.
    pub fn add_field<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.fields.push(Field::new(name, value));
    }

    /// All values of the named field, in insertion order.
    pub fn get_field<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get the number of field values.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Create a builder for constructing documents.
    pub fn builder(id: DocId) -> DocumentBuilder {
        DocumentBuilder::new(id)
    }
}

/// A builder for constructing documents in a fluent manner.
#[derive(Debug)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn new(id: DocId) -> Self {
        DocumentBuilder {
            document: Document::new(id),
        }
    }

    /// Add a text field to the document.
    pub fn add_text<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.document.add_field(name, value);
        self
    }

    /// Add one value per item under the same field name.
    pub fn add_texts<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        for value in values {
            self.document.add_field(name.clone(), value);
        }
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let doc = Document::builder(7)
            .add_text("title", "Quick fox")
            .add_texts("tags", ["animals", "fast"])
            .add_text("body", "jumps")
            .build();

        assert_eq!(doc.id(), 7);
        assert_eq!(doc.len(), 4);
        let names: Vec<&str> = doc.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["title", "tags", "tags", "body"]);
        assert_eq!(doc.get_field("tags").collect::<Vec<_>>(), vec!["animals", "fast"]);
        assert!(doc.has_field("body"));
        assert!(!doc.has_field("missing"));
    }
}
