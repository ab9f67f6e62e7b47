//! Incremental UTF-8 decoding of a byte stream into characters
//!
//! Reads are chunked, so a multi-byte character may straddle two reads.
//! The decoder keeps the incomplete tail in its buffer and only emits
//! complete characters. Malformed bytes decode to U+FFFD.

use std::io::{self, Read};

const CHUNK_SIZE: usize = 8 * 1024;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Iterator over the characters of a UTF-8 byte stream.
///
/// Each malformed or truncated sequence yields one `char::REPLACEMENT_CHARACTER`
/// and decoding resumes after it. A leading byte-order mark is dropped.
/// Only read failures are reported as errors, after which the iterator is
/// exhausted.
pub struct Utf8Chars<R> {
    reader: R,
    buf: Box<[u8]>,
    start: usize,
    end: usize,
    eof: bool,
    failed: bool,
    at_start: bool,
}

impl<R: Read> Utf8Chars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
            start: 0,
            end: 0,
            eof: false,
            failed: false,
            at_start: true,
        }
    }

    /// Move the unread tail to the front of the buffer and read more bytes
    fn refill(&mut self) -> io::Result<()> {
        self.buf.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
        loop {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Decode the next character, `None` when more bytes are needed
    fn decode_one(&mut self) -> Option<char> {
        let pending = &self.buf[self.start..self.end];
        let lead = *pending.first()?;

        // ASCII fast path
        if lead < 0x80 {
            self.start += 1;
            return Some(lead as char);
        }

        let width = sequence_width(lead).min(pending.len());
        match std::str::from_utf8(&pending[..width]) {
            Ok(s) => {
                let c = s.chars().next()?;
                self.start += width;
                Some(c)
            }
            Err(e) => match e.error_len() {
                Some(bad) => {
                    self.start += bad;
                    Some(char::REPLACEMENT_CHARACTER)
                }
                // Incomplete so far; only final once the stream has ended
                None if self.eof => {
                    self.start += width;
                    Some(char::REPLACEMENT_CHARACTER)
                }
                None => None,
            },
        }
    }
}

/// Expected sequence length from a UTF-8 lead byte, 1 if it cannot start one
#[inline]
fn sequence_width(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

impl<R: Read> Iterator for Utf8Chars<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(c) = self.decode_one() {
                if std::mem::take(&mut self.at_start) && c == BYTE_ORDER_MARK {
                    continue;
                }
                return Some(Ok(c));
            }
            if self.eof && self.start == self.end {
                return None;
            }
            if let Err(e) = self.refill() {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}
