//! Article records and the chunk-metadata serialization boundary

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata fields that hold ordered lists.
///
/// The vector index stores flat scalar metadata only, so exactly these
/// fields are JSON-string encoded on write and parsed back on read. The set
/// is a fixed contract between [`SourceMetadata::flatten`] and
/// [`SourceMetadata::restore`]; it is never inferred per record.
pub const LIST_METADATA_FIELDS: [&str; 4] =
    ["authors", "mesh_terms", "keywords", "publication_types"];

/// A bibliographic article as delivered by the acquisition layer.
///
/// Immutable once ingested; the ingestion pipeline only reads from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier (PubMed ID)
    pub pmid: String,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    /// Ordered author list
    pub authors: Vec<String>,
    pub journal: Option<String>,
    /// ISO-8601, possibly partial (year or year-month)
    pub publication_date: Option<String>,
    pub doi: Option<String>,
    /// Controlled-vocabulary terms
    pub mesh_terms: Vec<String>,
    /// Free keywords
    pub keywords: Vec<String>,
    pub publication_types: Vec<String>,
}

impl Article {
    /// Create a new article with the given identifier
    pub fn new(pmid: impl Into<String>) -> Self {
        Self {
            pmid: pmid.into(),
            title: None,
            abstract_text: None,
            authors: Vec::new(),
            journal: None,
            publication_date: None,
            doi: None,
            mesh_terms: Vec::new(),
            keywords: Vec::new(),
            publication_types: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    pub fn with_publication_date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = Some(date.into());
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    pub fn with_mesh_terms(mut self, terms: Vec<String>) -> Self {
        self.mesh_terms = terms;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_publication_types(mut self, types: Vec<String>) -> Self {
        self.publication_types = types;
        self
    }

    /// Metadata carried with every chunk segmented from this article
    pub fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            pmid: self.pmid.clone(),
            title: self.title.clone(),
            authors: self.authors.clone(),
            journal: self.journal.clone(),
            publication_date: self.publication_date.clone(),
            doi: self.doi.clone(),
            mesh_terms: self.mesh_terms.clone(),
            keywords: self.keywords.clone(),
            publication_types: self.publication_types.clone(),
        }
    }
}

/// Provenance metadata attached to every chunk and search result.
///
/// Structured form on the core side; [`flatten`](Self::flatten) produces the
/// scalar-only map written to the vector index, [`restore`](Self::restore)
/// parses that map back when results come in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub pmid: String,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub journal: Option<String>,
    pub publication_date: Option<String>,
    pub doi: Option<String>,
    pub mesh_terms: Vec<String>,
    pub keywords: Vec<String>,
    pub publication_types: Vec<String>,
}

impl SourceMetadata {
    /// Flatten to the scalar-only map the index accepts.
    ///
    /// List fields become JSON strings; absent scalar fields are omitted
    /// rather than written as nulls.
    pub fn flatten(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("pmid".to_string(), serde_json::Value::String(self.pmid.clone()));

        let scalars = [
            ("title", &self.title),
            ("journal", &self.journal),
            ("publication_date", &self.publication_date),
            ("doi", &self.doi),
        ];
        for (key, value) in scalars {
            if let Some(value) = value {
                map.insert(key.to_string(), serde_json::Value::String(value.clone()));
            }
        }

        let lists = [
            ("authors", &self.authors),
            ("mesh_terms", &self.mesh_terms),
            ("keywords", &self.keywords),
            ("publication_types", &self.publication_types),
        ];
        for (key, values) in lists {
            let encoded = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
            map.insert(key.to_string(), serde_json::Value::String(encoded));
        }

        map
    }

    /// Restore the structured form from a flattened index record.
    ///
    /// Fields in [`LIST_METADATA_FIELDS`] are parsed as JSON arrays; a value
    /// that fails to parse is kept as a single-element list so the record
    /// survives rather than being dropped.
    pub fn restore(map: &HashMap<String, serde_json::Value>) -> Self {
        let scalar = |key: &str| -> Option<String> {
            map.get(key).and_then(|v| v.as_str()).map(str::to_string)
        };

        let list = |key: &str| -> Vec<String> {
            match map.get(key).and_then(|v| v.as_str()) {
                Some(raw) => serde_json::from_str::<Vec<String>>(raw)
                    .unwrap_or_else(|_| vec![raw.to_string()]),
                None => Vec::new(),
            }
        };

        Self {
            pmid: scalar("pmid").unwrap_or_default(),
            title: scalar("title"),
            authors: list("authors"),
            journal: scalar("journal"),
            publication_date: scalar("publication_date"),
            doi: scalar("doi"),
            mesh_terms: list("mesh_terms"),
            keywords: list("keywords"),
            publication_types: list("publication_types"),
        }
    }
}
