//! Streaming word tokenizer
//!
//! A word is a maximal run of alphabet characters after lowercasing.
//! Every other character separates words.

use std::convert::Infallible;

use crate::alphabet::{fold_case, Alphabet};

/// Splits a character stream into lowercase words over an [`Alphabet`]
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> Tokenizer<'a> {
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    /// Lazily split a fallible character stream into words.
    ///
    /// The stream is consumed as the iterator advances. A stream error is
    /// yielded once and ends the sequence.
    pub fn words<I, E>(&self, chars: I) -> Words<'a, I::IntoIter>
    where
        I: IntoIterator<Item = Result<char, E>>,
    {
        Words {
            chars: chars.into_iter(),
            alphabet: self.alphabet,
            buffer: String::new(),
            finished: false,
        }
    }

    /// Tokenize in-memory text into words
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.words(text.chars().map(Ok::<char, Infallible>))
            .map(|word| match word {
                Ok(word) => word,
                Err(never) => match never {},
            })
            .collect()
    }
}

/// Lazy word sequence produced by [`Tokenizer::words`]
pub struct Words<'a, I> {
    chars: I,
    alphabet: &'a Alphabet,
    buffer: String,
    finished: bool,
}

impl<I, E> Iterator for Words<'_, I>
where
    I: Iterator<Item = Result<char, E>>,
{
    type Item = Result<String, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            match self.chars.next() {
                Some(Ok(c)) => {
                    let lower = fold_case(c);
                    if self.alphabet.contains(lower) {
                        self.buffer.push(lower);
                    } else if !self.buffer.is_empty() {
                        return Some(Ok(std::mem::take(&mut self.buffer)));
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    self.buffer.clear();
                    return Some(Err(e));
                }
                None => {
                    // Flush a word that runs up to the end of the stream
                    self.finished = true;
                    if self.buffer.is_empty() {
                        return None;
                    }
                    return Some(Ok(std::mem::take(&mut self.buffer)));
                }
            }
        }
    }
}
