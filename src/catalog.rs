//! Static content tables
//!
//! Recommendable titles, emoji riddles and the canned greeting lines. The
//! built-in tables are compiled into the binary; another JSON file with the
//! same shape can be loaded instead.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// A recommendable title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// An emoji puzzle whose answer should be one of the catalog titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    pub puzzle: String,
    pub answer: String,
}

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog entry #{index} has an empty title")]
    EmptyTitle { index: usize },
    #[error("Duplicate catalog title: {0}")]
    DuplicateTitle(String),
    #[error("Greeting #{index} is empty")]
    EmptyGreeting { index: usize },
}

/// On-disk layout
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    entries: Vec<CatalogEntry>,
    #[serde(default)]
    riddles: Vec<Riddle>,
    #[serde(default)]
    greetings: Vec<String>,
}

/// Validated, read-only content tables
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    riddles: Vec<Riddle>,
    greetings: Vec<String>,
    title_set: HashSet<String>,
}

impl Catalog {
    /// The catalog shipped with the bot
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_parts(file.entries, file.riddles, file.greetings)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build a catalog from raw tables, validating titles and greetings.
    ///
    /// Titles must be non-empty and unique. Riddles are accepted as-is; the
    /// ones whose answer is not a title are simply never playable.
    pub fn from_parts(
        mut entries: Vec<CatalogEntry>,
        riddles: Vec<Riddle>,
        greetings: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let mut title_set = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter_mut().enumerate() {
            if entry.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { index });
            }
            if !title_set.insert(entry.title.clone()) {
                return Err(CatalogError::DuplicateTitle(entry.title.clone()));
            }
            // An empty photo_url in a hand-edited file means "no photo"
            if entry.photo_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
                entry.photo_url = None;
            }
        }

        if let Some(index) = greetings.iter().position(|g| g.trim().is_empty()) {
            return Err(CatalogError::EmptyGreeting { index });
        }

        Ok(Self {
            entries,
            riddles,
            greetings,
            title_set,
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All titles, in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.title_set.contains(title)
    }

    pub fn riddles(&self) -> &[Riddle] {
        &self.riddles
    }

    /// Riddles whose answer is a catalog title
    pub fn playable_riddles(&self) -> Vec<&Riddle> {
        self.riddles
            .iter()
            .filter(|r| self.contains_title(&r.answer))
            .collect()
    }

    pub fn greetings(&self) -> &[String] {
        &self.greetings
    }
}

#[cfg(test)]
impl Catalog {
    /// Compact constructor for tests: bare titles and `(puzzle, answer)` pairs
    pub fn for_tests(titles: &[&str], riddles: &[(&str, &str)]) -> Self {
        let entries = titles
            .iter()
            .map(|t| CatalogEntry {
                title: (*t).to_string(),
                description: String::new(),
                photo_url: None,
            })
            .collect();
        let riddles = riddles
            .iter()
            .map(|(puzzle, answer)| Riddle {
                puzzle: (*puzzle).to_string(),
                answer: (*answer).to_string(),
            })
            .collect();
        Self::from_parts(entries, riddles, vec!["hi".to_string()])
            .expect("test catalog should be valid")
    }
}
