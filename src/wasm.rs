//! WebAssembly bindings for the transliteration API.
//!
//! JavaScript strings are always valid UTF-16, so inputs arrive here as valid
//! UTF-8 and the only failures left are allocation failures.

use wasm_bindgen::prelude::*;

use crate::{Table, Transliterator};

/// Transliterate a string to ASCII.
///
/// # Arguments
/// * `input` - Any Unicode text
///
/// # Returns
/// ASCII approximation, with `[?]` for unmapped characters
#[wasm_bindgen]
pub fn transliterate(input: &str) -> Result<String, JsError> {
    Transliterator::default()
        .transliterate_str(input)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Transliterate a string to ASCII with a custom placeholder.
///
/// # Arguments
/// * `input` - Any Unicode text
/// * `placeholder` - Text written for each unmapped character
#[wasm_bindgen]
pub fn transliterate_custom(input: &str, placeholder: &str) -> Result<String, JsError> {
    Transliterator::new(*Table::global())
        .with_placeholder(placeholder.as_bytes())
        .transliterate_str(input)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Get library version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Number of codepoints covered by the embedded table.
#[wasm_bindgen]
pub fn table_size() -> usize {
    Table::global().len()
}
