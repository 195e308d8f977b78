//! Transliteration engine.
//!
//! Input is processed in two phases. The leading run of bytes below 0x7F is
//! copied verbatim; those bytes are complete UTF-8 sequences and already
//! ASCII. The remainder is decoded and every scalar value is replaced through
//! the [`Table`], with a one-character lookahead that collapses separator
//! spaces (see [`Replacements`]).

use std::str::Chars;

use crate::table::Table;
use crate::{Result, TranslitError};

/// Substitute written for characters the table does not know.
pub const DEFAULT_PLACEHOLDER: &[u8] = b"[?]";

/// Bytes below this value are passed through without a table lookup.
const FAST_PATH_LIMIT: u8 = 0x7F;

/// Length of the prefix of `input` that is copied without decoding.
#[inline]
pub fn ascii_prefix_len(input: &[u8]) -> usize {
    input.iter().take_while(|&&b| b < FAST_PATH_LIMIT).count()
}

/// Initial capacity of an allocating call's output buffer.
///
/// Short inputs get at least 16 bytes, and sizes are kept on 16-byte steps so
/// small strings don't land in a wasteful allocator size class.
#[inline]
fn initial_capacity(input_len: usize) -> usize {
    input_len.max(16).next_multiple_of(16)
}

/// Per-character replacements with separator spaces collapsed.
///
/// Yields `Some(bytes)` for every mapped character and `None` for characters
/// the table does not know. A replacement longer than one byte that ends in a
/// space keeps that space only if the next character maps to something that
/// does not itself start with a space. At the end of the input, or before an
/// unknown character, the space is dropped.
#[derive(Debug, Clone)]
pub struct Replacements<'t, 's> {
    table: Table<'t>,
    chars: Chars<'s>,
    /// Lookup of the next character, resolved while deciding on a trailing space.
    peeked: Option<Option<&'t [u8]>>,
}

impl<'t, 's> Replacements<'t, 's> {
    pub fn new(table: Table<'t>, text: &'s str) -> Self {
        Self {
            table,
            chars: text.chars(),
            peeked: None,
        }
    }
}

impl<'t> Iterator for Replacements<'t, '_> {
    type Item = Option<&'t [u8]>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = match self.peeked.take() {
            Some(resolved) => resolved,
            None => self.table.lookup(self.chars.next()?),
        };

        let Some(bytes) = current else {
            return Some(None);
        };

        if let [.., b' '] = bytes {
            if bytes.len() > 1 {
                let next = self.chars.next().map(|ch| self.table.lookup(ch));
                let keep_space = matches!(next, Some(Some(following)) if following.first() != Some(&b' '));
                self.peeked = next;
                if !keep_space {
                    return Some(Some(&bytes[..bytes.len() - 1]));
                }
            }
        }

        Some(Some(bytes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.peeked.is_some());
        let (lower, upper) = self.chars.size_hint();
        (lower + pending, upper.map(|upper| upper + pending))
    }
}

/// Destination for transliterated bytes.
trait Output {
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Caller-owned buffer with a write cursor.
struct Bounded<'o> {
    buf: &'o mut [u8],
    pos: usize,
}

impl Output for Bounded<'_> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let capacity = self.buf.len();
        let end = self.pos + bytes.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(TranslitError::CapacityExceeded { capacity })?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

impl Output for Vec<u8> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.try_reserve(bytes.len())?;
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// A table plus the placeholder used for unmapped characters.
#[derive(Debug, Clone, Copy)]
pub struct Transliterator<'a> {
    table: Table<'a>,
    placeholder: &'a [u8],
}

impl Default for Transliterator<'static> {
    fn default() -> Self {
        Self::new(*Table::global())
    }
}

impl<'a> Transliterator<'a> {
    pub fn new(table: Table<'a>) -> Self {
        Self {
            table,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }

    /// Use `placeholder` instead of `"[?]"` for unmapped characters.
    ///
    /// The bytes are written as given; they need not be ASCII.
    pub fn with_placeholder(mut self, placeholder: &'a [u8]) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn table(&self) -> Table<'a> {
        self.table
    }

    pub fn placeholder(&self) -> &'a [u8] {
        self.placeholder
    }

    /// Per-character replacements for `text`.
    ///
    /// Unlike the transliterate methods there is no ASCII fast path here:
    /// every character, ASCII included, goes through the table.
    pub fn replacements<'s>(&self, text: &'s str) -> Replacements<'a, 's> {
        Replacements::new(self.table, text)
    }

    /// Transliterate `input` into a newly allocated buffer.
    pub fn transliterate(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.try_reserve_exact(initial_capacity(input.len()))?;
        self.run(&mut out, input)?;
        out.shrink_to_fit();
        Ok(out)
    }

    /// Transliterate text that is already known to be valid UTF-8.
    ///
    /// Only fails on allocation failure, or with
    /// [`TranslitError::InvalidEncoding`] when a custom placeholder is not
    /// valid UTF-8.
    pub fn transliterate_str(&self, input: &str) -> Result<String> {
        let out = self.transliterate(input.as_bytes())?;
        String::from_utf8(out).map_err(|e| TranslitError::InvalidEncoding(e.utf8_error()))
    }

    /// Transliterate `input` into `output`, returning the written prefix.
    pub fn transliterate_into<'o>(&self, output: &'o mut [u8], input: &[u8]) -> Result<&'o [u8]> {
        let mut out = Bounded { buf: output, pos: 0 };
        self.run(&mut out, input)?;
        let Bounded { buf, pos } = out;
        let buf: &'o [u8] = buf;
        Ok(&buf[..pos])
    }

    fn run<O: Output>(&self, out: &mut O, input: &[u8]) -> Result<()> {
        let (ascii, rest) = input.split_at(ascii_prefix_len(input));
        out.write(ascii)?;
        if rest.is_empty() {
            return Ok(());
        }

        let rest = std::str::from_utf8(rest)?;
        for replacement in self.replacements(rest) {
            out.write(replacement.unwrap_or(self.placeholder))?;
        }
        Ok(())
    }
}
