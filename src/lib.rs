//! Transliterate Unicode text into printable ASCII.
//!
//! Every Unicode scalar value is replaced with a fixed ASCII string from an
//! embedded table, so `"Æneid"` becomes `"AEneid"` and `"北京"` becomes
//! `"Bei Jing"`. Characters without a mapping become a placeholder, `"[?]"`
//! by default.
//!
//! ```
//! assert_eq!(asciify::transliterate_str("🦄☣").unwrap(), "unicorn biohazard");
//!
//! let mut buf = [0u8; 32];
//! let out = asciify::transliterate_into(&mut buf, "étude".as_bytes()).unwrap();
//! assert_eq!(out, b"etude");
//! ```

use std::collections::TryReserveError;
use std::str::Utf8Error;

use thiserror::Error;

pub mod engine;
pub mod table;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use engine::{Replacements, Transliterator, DEFAULT_PLACEHOLDER};
pub use table::{Table, TableData};

#[derive(Error, Debug)]
pub enum TranslitError {
    #[error("Invalid UTF-8 input: {0}")]
    InvalidEncoding(#[from] Utf8Error),
    #[error("Output buffer too small ({capacity} bytes)")]
    CapacityExceeded { capacity: usize },
    #[error("Out of memory: {0}")]
    AllocationFailure(#[from] TryReserveError),
    #[error("Malformed codepoint table: {0}")]
    MalformedTable(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TranslitError>;

/// Transliterate UTF-8 `input` into a newly allocated ASCII buffer.
pub fn transliterate(input: &[u8]) -> Result<Vec<u8>> {
    Transliterator::default().transliterate(input)
}

/// Transliterate UTF-8 `input` into `output`, returning the written prefix.
///
/// Fails with [`TranslitError::CapacityExceeded`] as soon as a write would not
/// fit. The contents of `output` are unspecified after an error.
pub fn transliterate_into<'o>(output: &'o mut [u8], input: &[u8]) -> Result<&'o [u8]> {
    Transliterator::default().transliterate_into(output, input)
}

/// Like [`transliterate`], writing `placeholder` for unmapped characters.
pub fn transliterate_custom(input: &[u8], placeholder: &[u8]) -> Result<Vec<u8>> {
    Transliterator::new(*Table::global())
        .with_placeholder(placeholder)
        .transliterate(input)
}

/// Like [`transliterate_into`], writing `placeholder` for unmapped characters.
pub fn transliterate_custom_into<'o>(
    output: &'o mut [u8],
    input: &[u8],
    placeholder: &[u8],
) -> Result<&'o [u8]> {
    Transliterator::new(*Table::global())
        .with_placeholder(placeholder)
        .transliterate_into(output, input)
}

/// Transliterate a string slice.
pub fn transliterate_str(input: &str) -> Result<String> {
    Transliterator::default().transliterate_str(input)
}

/// The raw replacement for a single character, without space collapsing.
///
/// Returns `None` for characters the table does not know.
pub fn transliterate_char(ch: char) -> Option<&'static str> {
    Table::global()
        .lookup(ch)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
}

/// Per-character replacements for `text` using the embedded table.
pub fn ascii_chars(text: &str) -> Replacements<'static, '_> {
    Transliterator::default().replacements(text)
}
