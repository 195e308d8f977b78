//! Codepoint table and mapping blob.
//!
//! The table is a dense array of 4-byte records indexed by Unicode scalar value:
//!
//! | byte | meaning                                              |
//! |------|------------------------------------------------------|
//! | 0..2 | inline literal, or little-endian offset into the blob |
//! | 2    | replacement length                                   |
//! | 3    | padding                                              |
//!
//! Replacements of up to two bytes live inline. Longer ones are stored in the
//! blob and addressed by `(offset, length)`. Codepoints without a mapping point
//! outside the blob, so a lookup that fails the bounds check means "unknown".

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::{Result, TranslitError};

include!(concat!(env!("OUT_DIR"), "/table_meta.rs"));

static TABLE_BYTES: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/table.bin"));
static BLOB_BYTES: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/blob.bin"));

static GLOBAL_TABLE: OnceLock<Table<'static>> = OnceLock::new();

/// A single decoded table record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Inline replacement bytes, or the blob offset when `len > 2`.
    pub literal: [u8; 2],
    pub len: u8,
}

impl Entry {
    /// Size of a packed record in bytes.
    pub const SIZE: usize = 4;

    /// Longest replacement that is stored inline.
    pub const MAX_INLINE: u8 = 2;

    #[inline]
    fn decode(record: &[u8]) -> Self {
        Self {
            literal: [record[0], record[1]],
            len: record[2],
        }
    }

    /// Whether the replacement is stored inline rather than in the blob.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.len <= Self::MAX_INLINE
    }

    /// Blob offset, meaningful only for non-inline entries.
    #[inline]
    pub fn offset(&self) -> usize {
        u16::from_le_bytes(self.literal) as usize
    }
}

/// Read-only view over a codepoint table and its mapping blob.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    records: &'a [u8],
    blob: &'a [u8],
}

impl<'a> Table<'a> {
    /// Build a table over an artifact pair, validating its layout.
    ///
    /// Fails with [`TranslitError::MalformedTable`] if the record buffer is not
    /// a whole number of records, or if any replacement byte is outside ASCII.
    pub fn from_parts(records: &'a [u8], blob: &'a [u8]) -> Result<Self> {
        if records.len() % Entry::SIZE != 0 {
            return Err(TranslitError::MalformedTable(
                "record buffer is not a multiple of the record size",
            ));
        }
        if blob.len() > u16::MAX as usize {
            return Err(TranslitError::MalformedTable(
                "blob is too large for 16-bit offsets",
            ));
        }
        if !blob.is_ascii() {
            return Err(TranslitError::MalformedTable("blob contains non-ASCII bytes"));
        }

        let table = Self { records, blob };
        for record in records.chunks_exact(Entry::SIZE) {
            let entry = Entry::decode(record);
            if entry.is_inline() && !entry.literal[..entry.len as usize].is_ascii() {
                return Err(TranslitError::MalformedTable(
                    "inline literal contains non-ASCII bytes",
                ));
            }
        }

        log::debug!(
            "validated codepoint table: {} entries, {} blob bytes",
            table.len(),
            table.blob_len()
        );
        Ok(table)
    }

    /// Number of indexable scalar values.
    pub fn len(&self) -> usize {
        self.records.len() / Entry::SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn blob_len(&self) -> usize {
        self.blob.len()
    }

    /// Raw record for `scalar`, or `None` past the end of the table.
    #[inline]
    pub fn entry(&self, scalar: u32) -> Option<Entry> {
        self.record(scalar).map(Entry::decode)
    }

    #[inline]
    fn record(&self, scalar: u32) -> Option<&'a [u8]> {
        let index = scalar as usize;
        if index >= self.len() {
            return None;
        }
        let start = index * Entry::SIZE;
        Some(&self.records[start..start + Entry::SIZE])
    }

    /// Replacement bytes for `ch`, or `None` if it has no mapping.
    ///
    /// An empty slice is a valid result: the character is deleted.
    #[inline]
    pub fn lookup(&self, ch: char) -> Option<&'a [u8]> {
        self.lookup_scalar(ch as u32)
    }

    /// Same as [`Table::lookup`], keyed by the raw scalar value.
    #[inline]
    pub fn lookup_scalar(&self, scalar: u32) -> Option<&'a [u8]> {
        let record = self.record(scalar)?;
        let entry = Entry::decode(record);

        if entry.is_inline() {
            return Some(&record[..entry.len as usize]);
        }

        let offset = entry.offset();
        let end = offset + entry.len as usize;
        if offset >= self.blob.len() || end > self.blob.len() {
            return None;
        }
        Some(&self.blob[offset..end])
    }
}

impl Table<'static> {
    /// The table embedded in the library, materialized on first use.
    ///
    /// The embedded artifacts are validated by the build script, so this never fails.
    pub fn global() -> &'static Table<'static> {
        GLOBAL_TABLE.get_or_init(|| {
            log::debug!(
                "loading embedded codepoint table: {} entries, {} blob bytes",
                TABLE_ENTRIES,
                BLOB_LEN
            );
            Table {
                records: TABLE_BYTES,
                blob: BLOB_BYTES,
            }
        })
    }
}

/// An owned artifact pair, typically read from disk at startup.
///
/// Construction validates the pair once; [`TableData::table`] then hands out
/// cheap read-only views.
#[derive(Debug, Clone)]
pub struct TableData {
    records: Vec<u8>,
    blob: Vec<u8>,
}

impl TableData {
    pub fn from_bytes(records: Vec<u8>, blob: Vec<u8>) -> Result<Self> {
        Table::from_parts(&records, &blob)?;
        Ok(Self { records, blob })
    }

    /// Read a table file and a blob file.
    pub fn read<P: AsRef<Path>, Q: AsRef<Path>>(table_path: P, blob_path: Q) -> Result<Self> {
        let records = fs::read(table_path)?;
        let blob = fs::read(blob_path)?;
        Self::from_bytes(records, blob)
    }

    /// Read `table.bin` and `blob.bin` from `dir`.
    pub fn read_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Self::read(dir.join("table.bin"), dir.join("blob.bin"))
    }

    pub fn table(&self) -> Table<'_> {
        Table {
            records: &self.records,
            blob: &self.blob,
        }
    }
}
