//! Python bindings for WordSet Rust components

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use pyo3::exceptions::{PyFileNotFoundError, PyOSError, PyValueError};
use pyo3::prelude::*;
use wordset_core::{Alphabet, Normalizer, TableParams, WordSet as CoreWordSet, WordSetError};

fn to_py_err(err: WordSetError) -> PyErr {
    match &err {
        WordSetError::SourceNotFound(_) => PyFileNotFoundError::new_err(err.to_string()),
        WordSetError::Io(_) => PyOSError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Calls a Python `str -> str` function for each word.
///
/// The first exception is kept and later words pass through unchanged;
/// the caller raises it once the scan returns.
struct PyNormalizer<'py> {
    py: Python<'py>,
    callable: &'py PyObject,
    error: RefCell<Option<PyErr>>,
}

impl Normalizer for PyNormalizer<'_> {
    fn normalize(&self, word: String) -> String {
        if self.error.borrow().is_some() {
            return word;
        }
        let result = self
            .callable
            .call1(self.py, (word.as_str(),))
            .and_then(|root| root.extract::<String>(self.py));
        match result {
            Ok(root) => root,
            Err(err) => {
                *self.error.borrow_mut() = Some(err);
                word
            }
        }
    }
}

/// Python-exposed word set
#[pyclass]
pub struct WordSet {
    set: CoreWordSet,
}

#[pymethods]
impl WordSet {
    /// Build the set of distinct words in a text file
    ///
    /// Args:
    ///     path: Path to a UTF-8 text file
    ///     chain_length: Target average words per hash bucket (non-zero)
    ///     alphabet: Characters that form words (case-insensitive)
    ///     normalize: Optional callable mapping a word to its root form
    #[new]
    #[pyo3(signature = (path, chain_length, alphabet, normalize=None))]
    fn new(
        py: Python<'_>,
        path: PathBuf,
        chain_length: u32,
        alphabet: &str,
        normalize: Option<PyObject>,
    ) -> PyResult<Self> {
        let params = TableParams::new(chain_length);
        let alphabet = Alphabet::new(alphabet.chars()).map_err(to_py_err)?;

        let set = match &normalize {
            Some(callable) => {
                let normalizer = PyNormalizer {
                    py,
                    callable,
                    error: RefCell::new(None),
                };
                let set = CoreWordSet::from_path_with(&path, &params, &alphabet, &normalizer)
                    .map_err(to_py_err)?;
                if let Some(err) = normalizer.error.into_inner() {
                    return Err(err);
                }
                set
            }
            None => CoreWordSet::from_path(&path, &params, &alphabet).map_err(to_py_err)?,
        };
        Ok(Self { set })
    }

    /// List of distinct words, order unspecified
    fn words(&self) -> Vec<String> {
        self.set.words()
    }

    /// Get table statistics
    ///
    /// Returns:
    ///     Dictionary with bucket_count, word_count, occupied_buckets,
    ///     longest_chain, avg_chain_len
    fn stats(&self) -> HashMap<String, PyObject> {
        let stats = self.set.stats();
        Python::with_gil(|py| {
            let mut map = HashMap::new();
            map.insert("bucket_count".to_string(), stats.bucket_count.to_object(py));
            map.insert("word_count".to_string(), stats.word_count.to_object(py));
            map.insert("occupied_buckets".to_string(), stats.occupied_buckets.to_object(py));
            map.insert("longest_chain".to_string(), stats.longest_chain.to_object(py));
            map.insert("avg_chain_len".to_string(), stats.avg_chain_len.to_object(py));
            map
        })
    }

    fn __len__(&self) -> usize {
        self.set.len()
    }

    fn __contains__(&self, word: &str) -> bool {
        self.set.contains(word)
    }

    fn __repr__(&self) -> String {
        let stats = self.set.stats();
        format!(
            "WordSet(words={}, buckets={}, longest_chain={})",
            stats.word_count, stats.bucket_count, stats.longest_chain
        )
    }
}

/// Python module
#[pymodule]
fn wordset_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<WordSet>()?;
    Ok(())
}
