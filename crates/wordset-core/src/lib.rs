//! WordSet Core - distinct word extraction over a chained hash table
//!
//! This library streams a text source through an alphabet-driven
//! tokenizer, optionally normalizes each word, and stores the distinct
//! results in a hash table sized up front from the source's byte length.

pub mod alphabet;
pub mod chars;
pub mod error;
pub mod normalize;
pub mod table;
pub mod tokenizer;

pub use alphabet::Alphabet;
pub use error::{Result, WordSetError};
pub use normalize::{Identity, LemmaTable, Normalizer};
pub use table::{bucket_count_for, TableParams, TableStats, WordSet};
pub use tokenizer::Tokenizer;
