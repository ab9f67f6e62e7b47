//! Word normalization strategies
//!
//! A [`Normalizer`] collapses related word forms to one canonical form
//! before a word is stored. Closures work directly:
//!
//! ```
//! use wordset_core::Normalizer;
//!
//! let strip_plural = |word: &str| word.strip_suffix('s').unwrap_or(word).to_string();
//! assert_eq!(strip_plural.normalize("cats".to_string()), "cat");
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::error::{Result, WordSetError};

/// Maps a raw lowercase word to its normalized form.
///
/// Implementations must be deterministic and free of side effects.
pub trait Normalizer {
    fn normalize(&self, word: String) -> String;
}

/// Leaves every word unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Normalizer for Identity {
    #[inline]
    fn normalize(&self, word: String) -> String {
        word
    }
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize(&self, word: String) -> String {
        self(&word)
    }
}

/// On-disk lemma table: root form -> list of inflected forms
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct LemmaFile(HashMap<String, Vec<String>>);

/// Dictionary normalizer mapping known word forms to their root.
///
/// Unknown words pass through unchanged. Roots map to themselves.
#[derive(Debug, Clone, Default)]
pub struct LemmaTable {
    roots: AHashMap<String, String>,
}

impl LemmaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `forms` as inflections of `root`
    pub fn insert<S: AsRef<str>>(&mut self, root: &str, forms: &[S]) {
        let root = root.to_lowercase();
        for form in forms {
            self.roots.insert(form.as_ref().to_lowercase(), root.clone());
        }
        self.roots.insert(root.clone(), root);
    }

    /// Load a table from JSON of the form `{"run": ["running", "ran"]}`
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let file: LemmaFile = serde_json::from_reader(reader)?;
        let mut table = Self::new();
        for (root, forms) in &file.0 {
            table.insert(root, forms.as_slice());
        }
        Ok(table)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => WordSetError::SourceNotFound(path.to_path_buf()),
            _ => WordSetError::Unreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn root(&self, word: &str) -> Option<&str> {
        self.roots.get(word).map(String::as_str)
    }

    /// Number of known word forms, roots included
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl Normalizer for LemmaTable {
    fn normalize(&self, word: String) -> String {
        match self.roots.get(&word) {
            Some(root) => root.clone(),
            None => word,
        }
    }
}
