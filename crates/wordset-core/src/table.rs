//! Separately chained hash table of distinct words
//!
//! The bucket count is estimated once from the byte size of the source
//! and never changes. Each bucket is a short vector scanned linearly on
//! insert, so the sizing heuristic is what keeps chains short.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;

use ahash::RandomState;

use crate::alphabet::Alphabet;
use crate::chars::Utf8Chars;
use crate::error::{Result, WordSetError};
use crate::normalize::{Identity, Normalizer};
use crate::tokenizer::Tokenizer;

/// Estimated mean byte width of a word: ten two-byte characters
pub const DEFAULT_AVG_WORD_BYTES: u64 = 20;

/// Upper clamp on the bucket count. Any large ceiling works; this one
/// matches the signed 32-bit limit of the reference sizing.
pub const DEFAULT_MAX_BUCKETS: usize = i32::MAX as usize;

// Fixed seeds keep bucket placement reproducible between runs
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Table sizing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableParams {
    /// Desired average number of words per bucket
    pub target_chain_length: u32,
    pub avg_word_bytes: u64,
    pub max_buckets: usize,
}

impl TableParams {
    pub fn new(target_chain_length: u32) -> Self {
        Self {
            target_chain_length,
            avg_word_bytes: DEFAULT_AVG_WORD_BYTES,
            max_buckets: DEFAULT_MAX_BUCKETS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_chain_length == 0 {
            return Err(WordSetError::ZeroChainLength);
        }
        if self.avg_word_bytes == 0 {
            return Err(WordSetError::InvalidParams("avg_word_bytes must be non-zero"));
        }
        if self.max_buckets == 0 {
            return Err(WordSetError::InvalidParams("max_buckets must be non-zero"));
        }
        Ok(())
    }
}

/// Estimate the bucket count for a source of `byte_len` bytes.
///
/// `byte_len / (target_chain_length * avg_word_bytes)`, clamped to
/// `1..=max_buckets`.
pub fn bucket_count_for(byte_len: u64, params: &TableParams) -> usize {
    let bytes_per_bucket = u64::from(params.target_chain_length)
        .saturating_mul(params.avg_word_bytes)
        .max(1);
    let estimate = byte_len / bytes_per_bucket;
    let max = u64::try_from(params.max_buckets).unwrap_or(u64::MAX);
    estimate.clamp(1, max.max(1)) as usize
}

/// Table statistics
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    pub bucket_count: usize,
    pub word_count: usize,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
    /// Mean chain length over occupied buckets
    pub avg_chain_len: f32,
}

/// Immutable set of distinct words extracted from a text source
#[derive(Debug, Clone)]
pub struct WordSet {
    buckets: Vec<Vec<String>>,
    hasher: RandomState,
    len: usize,
}

impl WordSet {
    /// Build from a file, storing words unchanged
    pub fn from_path<P: AsRef<Path>>(path: P, params: &TableParams, alphabet: &Alphabet) -> Result<Self> {
        Self::from_path_with(path, params, alphabet, &Identity)
    }

    /// Build from a file, passing every word through `normalizer` first.
    ///
    /// All parameters and the path are validated before the table is
    /// allocated. The file is closed on every return path.
    pub fn from_path_with<P, N>(
        path: P,
        params: &TableParams,
        alphabet: &Alphabet,
        normalizer: &N,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        N: Normalizer + ?Sized,
    {
        params.validate()?;
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(WordSetError::EmptySource);
        }
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(WordSetError::SourceNotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(WordSetError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if !metadata.is_file() {
            return Err(WordSetError::NotAFile(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| WordSetError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wordset: scanning path={} byte_len={}", path.display(), metadata.len());
        Self::from_reader(BufReader::new(file), metadata.len(), params, alphabet, normalizer)
    }

    /// Build from any UTF-8 byte stream whose total size is `byte_len`.
    ///
    /// `byte_len` only sizes the table; it need not be exact. Malformed
    /// UTF-8 decodes to U+FFFD; only read failures abort construction.
    pub fn from_reader<R, N>(
        reader: R,
        byte_len: u64,
        params: &TableParams,
        alphabet: &Alphabet,
        normalizer: &N,
    ) -> Result<Self>
    where
        R: Read,
        N: Normalizer + ?Sized,
    {
        params.validate()?;
        let bucket_count = bucket_count_for(byte_len, params);
        log::debug!(
            "wordset: sizing table byte_len={} target_chain_length={} bucket_count={}",
            byte_len,
            params.target_chain_length,
            bucket_count
        );

        let mut set = Self::with_bucket_count(bucket_count);
        let tokenizer = Tokenizer::new(alphabet);
        for word in tokenizer.words(Utf8Chars::new(reader)) {
            set.insert(normalizer.normalize(word?));
        }

        let stats = set.stats();
        log::debug!(
            "wordset: built words={} occupied_buckets={} longest_chain={}",
            stats.word_count,
            stats.occupied_buckets,
            stats.longest_chain
        );
        Ok(set)
    }

    fn with_bucket_count(bucket_count: usize) -> Self {
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        Self {
            buckets,
            hasher: RandomState::with_seeds(HASH_SEEDS[0], HASH_SEEDS[1], HASH_SEEDS[2], HASH_SEEDS[3]),
            len: 0,
        }
    }

    #[inline]
    fn bucket_index(&self, word: &str) -> usize {
        // Unsigned hash, so the index is always in 0..bucket_count
        (self.hasher.hash_one(word) % self.buckets.len() as u64) as usize
    }

    /// Insert a word unless an equal one is already chained in its bucket
    fn insert(&mut self, word: String) -> bool {
        let index = self.bucket_index(&word);
        let bucket = &mut self.buckets[index];
        if bucket.iter().any(|stored| *stored == word) {
            return false;
        }
        bucket.push(word);
        self.len += 1;
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.buckets[self.bucket_index(word)]
            .iter()
            .any(|stored| stored == word)
    }

    /// Borrowing iterator over all words, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets.iter().flatten().map(String::as_str)
    }

    /// Materialized snapshot of all distinct words
    pub fn words(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Get table statistics
    pub fn stats(&self) -> TableStats {
        let occupied_buckets = self.buckets.iter().filter(|b| !b.is_empty()).count();
        TableStats {
            bucket_count: self.buckets.len(),
            word_count: self.len,
            occupied_buckets,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
            avg_chain_len: if occupied_buckets == 0 {
                0.0
            } else {
                self.len as f32 / occupied_buckets as f32
            },
        }
    }
}

impl<'a> IntoIterator for &'a WordSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::iter::Flatten<std::slice::Iter<'a, Vec<String>>>, fn(&String) -> &str>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter().flatten().map(String::as_str as fn(&String) -> &str)
    }
}
